use super::*;

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

#[test]
fn pattern_requires_single_star() {
    assert!(FramePattern::new("frames/x.png").is_err());
    assert!(FramePattern::new("frames/*/*.png").is_err());
    assert!(FramePattern::new("frames/*.png").is_ok());
}

#[test]
fn frame_names_are_zero_padded() {
    assert_eq!(FramePattern::frame_name(FrameIndex(0)), "00000");
    assert_eq!(FramePattern::frame_name(FrameIndex(42)), "00042");
    assert_eq!(FramePattern::frame_name(FrameIndex(99999)), "99999");

    let p = FramePattern::new("out/*.png").unwrap();
    assert_eq!(p.frame_path(FrameIndex(7)), PathBuf::from("out/00007.png"));
    assert_eq!(p.named_path("map"), PathBuf::from("out/map.png"));
}

#[test]
fn lexical_order_matches_numeric_order() {
    let mut names: Vec<String> = [10u64, 2, 100, 0, 9]
        .iter()
        .map(|&i| FramePattern::frame_name(FrameIndex(i)))
        .collect();
    names.sort();
    assert_eq!(names, ["00000", "00002", "00009", "00010", "00100"]);
}

#[test]
fn write_list_and_clear() {
    let dir = temp_dir("frames_list_clear");
    let pattern = FramePattern::new(dir.join("*.png").to_string_lossy()).unwrap();

    for i in [2u64, 0, 1] {
        write_image(&pattern.frame_path(FrameIndex(i)), &solid(2, 2, [10, 20, 30, 255])).unwrap();
    }
    let listed = pattern.list().unwrap();
    assert_eq!(listed.len(), 3);
    assert!(listed[0].ends_with("00000.png"));
    assert!(listed[2].ends_with("00002.png"));

    let img = image::open(&listed[1]).unwrap().to_rgba8();
    assert_eq!(img.get_pixel(1, 1).0, [10, 20, 30, 255]);

    assert_eq!(pattern.clear().unwrap(), 3);
    assert!(pattern.list().unwrap().is_empty());

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn atomic_write_leaves_no_temp_file() {
    let dir = temp_dir("frames_atomic");
    let path = dir.join("live.png");
    write_image_atomic(&path, &solid(1, 1, [0, 0, 0, 255])).unwrap();
    write_image_atomic(&path, &solid(1, 1, [255, 255, 255, 255])).unwrap();
    assert!(path.exists());
    assert!(!dir.join("live.tmp.png").exists());
    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn unknown_extension_is_a_capture_error() {
    let err = write_image(Path::new("frame.unknown"), &solid(1, 1, [0; 4])).unwrap_err();
    assert!(matches!(err, SeaError::Capture(_)));
}

#[test]
fn named_snapshots_are_not_frames() {
    let dir = temp_dir("frames_named");
    let pattern = FramePattern::new(dir.join("*.png").to_string_lossy()).unwrap();
    for i in [11u64, 3] {
        write_image(&pattern.frame_path(FrameIndex(i)), &solid(1, 1, [0, 0, 0, 255])).unwrap();
    }
    write_image(&pattern.named_path("map"), &solid(1, 1, [0, 0, 0, 255])).unwrap();

    assert_eq!(pattern.list().unwrap().len(), 3);
    let frames = pattern.list_frames().unwrap();
    assert_eq!(frames.len(), 2);
    assert_eq!(pattern.frame_index(&frames[0]), Some(FrameIndex(3)));
    assert_eq!(pattern.frame_index(&frames[1]), Some(FrameIndex(11)));
    assert_eq!(pattern.frame_index(&pattern.named_path("map")), None);

    assert_eq!(pattern.clear().unwrap(), 2);
    assert_eq!(pattern.list().unwrap(), [pattern.named_path("map")]);

    std::fs::remove_dir_all(&dir).ok();
}
