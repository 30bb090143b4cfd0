use super::*;

const FIXTURE: &str = r#"{
  "layers": [
    {"name": "Land", "polygons": [[[10, 10], [20, 10], [20, 20], [10, 20]],
                                  [[500, 500], [510, 500], [510, 510]]]},
    {"name": "Rocks", "points": [[5, 5], [-50, 5]]},
    {"name": "Seabed", "polygons": [[[0, 0], [100, 0], [100, 100], [0, 100]]]},
    {"name": "Kelp", "polygons": [[[0, 0], [1, 0], [1, 1]]]}
  ]
}"#;

fn bbox() -> BoundingBox {
    BoundingBox::from_origin_extent([0.0, 0.0], [100.0, 100.0]).unwrap()
}

#[test]
fn feature_names_round_trip() {
    for kind in FeatureKind::ALL {
        assert_eq!(FeatureKind::from_name(kind.name()).unwrap(), kind);
    }
    let err = FeatureKind::from_name("Kelp").unwrap_err().to_string();
    assert!(err.contains("Kelp"));
    assert!(err.contains("Seabed, Land, Shore, Shallows, Rocks"));
}

#[test]
fn load_orders_layers_and_clips_to_bbox() {
    let kinds = [FeatureKind::Rocks, FeatureKind::Land, FeatureKind::Seabed];
    let env = Environment::from_reader(FIXTURE.as_bytes(), &kinds, bbox()).unwrap();

    let names: Vec<_> = env.layers().iter().map(|l| l.name()).collect();
    assert_eq!(names, ["Seabed", "Land", "Rocks"]);

    let land = env.layer(FeatureKind::Land).unwrap();
    assert_eq!(land.polygons().len(), 1);
    assert_eq!(land.color(), crate::scene::color::color("Land"));

    let rocks = env.layer(FeatureKind::Rocks).unwrap();
    assert_eq!(rocks.points(), &[Point::new(5.0, 5.0)]);
}

#[test]
fn seabed_is_base_fill_not_drawn() {
    let kinds = [FeatureKind::Seabed, FeatureKind::Land];
    let env = Environment::from_reader(FIXTURE.as_bytes(), &kinds, bbox()).unwrap();
    assert_eq!(env.bottom().unwrap().kind(), FeatureKind::Seabed);
    let drawn: Vec<_> = env.drawn_layers().map(|l| l.kind()).collect();
    assert_eq!(drawn, [FeatureKind::Land]);
}

#[test]
fn missing_requested_layer_is_empty() {
    let env = Environment::from_reader(FIXTURE.as_bytes(), &[FeatureKind::Shore], bbox()).unwrap();
    let shore = env.layer(FeatureKind::Shore).unwrap();
    assert!(shore.polygons().is_empty());
    assert!(shore.points().is_empty());
    assert!(env.bottom().is_none());
}

#[test]
fn malformed_json_is_a_serde_error() {
    let err = Environment::from_reader("{".as_bytes(), &[FeatureKind::Land], bbox()).unwrap_err();
    assert!(matches!(err, SeaError::Serde(_)));
}
