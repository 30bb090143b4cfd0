use super::*;
use crate::encode::frames::write_image;
use crate::foundation::core::FrameIndex;
use crate::render::frame::FrameRGBA;
use image::AnimationDecoder;
use image::codecs::gif::GifDecoder;
use std::io::BufReader;
use std::path::PathBuf;

fn temp_dir(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "seachart_{name}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}

fn solid(w: u32, h: u32, rgba: [u8; 4]) -> FrameRGBA {
    FrameRGBA {
        width: w,
        height: h,
        data: rgba.repeat((w * h) as usize),
        premultiplied: true,
    }
}

fn decoded_frames(path: &Path) -> Vec<image::Frame> {
    let f = File::open(path).unwrap();
    GifDecoder::new(BufReader::new(f))
        .unwrap()
        .into_frames()
        .collect_frames()
        .unwrap()
}

#[test]
fn frames_are_held_and_unreadable_ones_skipped() {
    let dir = temp_dir("gif_assemble");
    let pattern = FramePattern::new(dir.join("*.png").to_string_lossy()).unwrap();
    write_image(&pattern.frame_path(FrameIndex(0)), &solid(4, 4, [255, 0, 0, 255])).unwrap();
    std::fs::write(pattern.frame_path(FrameIndex(1)), b"not a png").unwrap();
    write_image(&pattern.frame_path(FrameIndex(2)), &solid(4, 4, [0, 0, 255, 255])).unwrap();
    write_image(&pattern.named_path("map"), &solid(4, 4, [0, 255, 0, 255])).unwrap();

    let out = dir.join("sim.gif");
    let stats = assemble_gif(&pattern, &out, 10, 2).unwrap();
    assert_eq!(
        stats,
        AnimationStats {
            frames_found: 3,
            frames_skipped: 1,
            frames_written: 6,
        }
    );

    let frames = decoded_frames(&out);
    assert_eq!(frames.len(), 6);
    let (num, den) = frames[0].delay().numer_denom_ms();
    assert_eq!(num / den.max(1), 100);
    assert!(frames[0].buffer().get_pixel(0, 0).0[0] > 240);
    assert!(frames[5].buffer().get_pixel(0, 0).0[2] > 240);

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn mismatched_sizes_are_skipped() {
    let dir = temp_dir("gif_sizes");
    let pattern = FramePattern::new(dir.join("*.png").to_string_lossy()).unwrap();
    write_image(&pattern.frame_path(FrameIndex(0)), &solid(4, 4, [0, 0, 0, 255])).unwrap();
    write_image(&pattern.frame_path(FrameIndex(1)), &solid(8, 8, [0, 0, 0, 255])).unwrap();

    let stats = assemble_gif(&pattern, &dir.join("sim.gif"), 20, 0).unwrap();
    assert_eq!(stats.frames_skipped, 1);
    assert_eq!(stats.frames_written, 1);

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn no_frames_is_an_error() {
    let dir = temp_dir("gif_empty");
    let pattern = FramePattern::new(dir.join("*.png").to_string_lossy()).unwrap();
    let err = assemble_gif(&pattern, &dir.join("sim.gif"), 20, 1).unwrap_err();
    assert!(matches!(err, SeaError::Encode(_)));
    assert!(!dir.join("sim.gif").exists());
}

#[test]
fn zero_fps_is_rejected() {
    let pattern = FramePattern::new("unused/*.png").unwrap();
    assert!(assemble_gif(&pattern, Path::new("unused.gif"), 0, 0).is_err());
}
