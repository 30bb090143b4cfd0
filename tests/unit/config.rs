use super::*;

const MINIMAL: &str = r#"{
  "origin": [38100, 6948700],
  "extent": [1000, 800],
  "depths": [0, 5, 20],
  "features": ["Land", "Seabed", "Rocks"],
  "paths": {
    "environment": "data/environment.json",
    "ships": "data/ships.csv",
    "frames_dir": "reports/frames",
    "frame_files": "reports/frames/*.png",
    "simulation": "reports/simulation.gif"
  }
}"#;

fn minimal() -> ChartConfig {
    ChartConfig::from_reader(MINIMAL.as_bytes()).unwrap()
}

#[test]
fn minimal_config_uses_display_defaults() {
    let cfg = minimal();
    cfg.validate().unwrap();
    assert_eq!(cfg.display.fps, 20);
    assert_eq!(cfg.display.identity, SlotPolicy::Index);
    assert_eq!(cfg.display.tick_quantum(), Duration::from_millis(1));
    assert!(cfg.paths.preview.is_none());
}

#[test]
fn feature_kinds_are_sorted_into_draw_order() {
    let kinds = minimal().feature_kinds().unwrap();
    assert_eq!(
        kinds,
        [FeatureKind::Seabed, FeatureKind::Land, FeatureKind::Rocks]
    );
}

#[test]
fn bounding_box_is_origin_plus_extent() {
    let b = minimal().bounding_box().unwrap();
    assert_eq!(b.x_min, 38100.0);
    assert_eq!(b.y_max, 6949500.0);
}

#[test]
fn rejects_fps_out_of_range() {
    let mut cfg = minimal();
    cfg.display.fps = 0;
    assert!(cfg.validate().is_err());
    cfg.display.fps = FPS_MAX + 1;
    let err = cfg.validate().unwrap_err().to_string();
    assert!(err.contains("fps"));
}

#[test]
fn rejects_unknown_feature_and_negative_depths() {
    let mut cfg = minimal();
    cfg.features.push("Kelp".to_string());
    assert!(cfg.validate().unwrap_err().to_string().contains("Kelp"));

    let mut cfg = minimal();
    cfg.depths.push(-1.0);
    assert!(cfg.validate().is_err());
}

#[test]
fn rejects_frame_pattern_without_single_star() {
    let mut cfg = minimal();
    cfg.paths.frame_files = "frames/frame.png".to_string();
    assert!(cfg.validate().is_err());
    cfg.paths.frame_files = "frames/*_*.png".to_string();
    assert!(cfg.validate().is_err());
}

#[test]
fn rejects_frame_files_outside_frames_dir() {
    let mut cfg = minimal();
    cfg.paths.frame_files = "reports/other/*.png".to_string();
    let err = cfg.validate().unwrap_err().to_string();
    assert!(err.contains("frames_dir"));

    cfg.paths.frame_files = "reports/frames/nested/*.png".to_string();
    cfg.validate().unwrap();
}

#[test]
fn rejects_unknown_fields() {
    let bad = MINIMAL.replacen("\"depths\"", "\"depth\"", 1);
    assert!(matches!(
        ChartConfig::from_reader(bad.as_bytes()),
        Err(SeaError::Serde(_))
    ));
}

#[test]
fn resolve_paths_rebases_relative_entries() {
    let mut cfg = minimal();
    cfg.paths.simulation = PathBuf::from("/abs/sim.gif");
    cfg.resolve_paths(Path::new("/charts/oslo"));
    assert_eq!(
        cfg.paths.ships,
        PathBuf::from("/charts/oslo/data/ships.csv")
    );
    assert_eq!(cfg.paths.simulation, PathBuf::from("/abs/sim.gif"));
    assert!(cfg.paths.frame_files.starts_with("/charts/oslo"));
    assert!(cfg.paths.frame_files.ends_with("*.png"));
}

#[test]
fn identity_policy_parses_lowercase() {
    let json = MINIMAL.replacen(
        "\"paths\"",
        "\"display\": {\"identity\": \"explicit\"},\n  \"paths\"",
        1,
    );
    let cfg = ChartConfig::from_reader(json.as_bytes()).unwrap();
    assert_eq!(cfg.display.identity, SlotPolicy::Explicit);
}
