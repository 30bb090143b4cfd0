use super::*;

fn close(a: Point, b: Point) -> bool {
    (a - b).hypot() < 1e-9
}

#[test]
fn north_heading_points_bow_up() {
    let hull = ship_hull(PoseRecord::new(1000.0, 2000.0, 0.0), 1.0);
    let bow = hull.points()[2];
    assert!(close(bow, Point::new(1000.0, 2050.0)));
    let stern_mid = (hull.points()[0].x + hull.points()[4].x) / 2.0;
    assert!((stern_mid - 1000.0).abs() < 1e-9);
}

#[test]
fn east_heading_points_bow_right() {
    let hull = ship_hull(PoseRecord::new(0.0, 0.0, 90.0), 1.0);
    let bow = hull.points()[2];
    assert!(close(bow, Point::new(50.0, 0.0)));
}

#[test]
fn scale_stretches_hull() {
    let hull = ship_hull(PoseRecord::new(0.0, 0.0, 0.0), 2.0);
    let bow = hull.points()[2];
    let stern = hull.points()[0];
    assert!(close(bow, Point::new(0.0, 100.0)));
    assert!(close(stern, Point::new(-20.0, -100.0)));
}

#[test]
fn hull_path_is_closed() {
    let hull = Hull::new(vec![
        Point::new(0.0, 0.0),
        Point::new(1.0, 0.0),
        Point::new(1.0, 1.0),
    ]);
    let path = hull.to_path(Affine::IDENTITY);
    assert_eq!(path.elements().len(), 4);
    assert!(matches!(
        path.elements().last(),
        Some(kurbo::PathEl::ClosePath)
    ));
    assert!(Hull::new(Vec::new()).to_path(Affine::IDENTITY).elements().is_empty());
}

#[test]
fn ship_pose_carries_ship_name_and_id() {
    let pose = Pose::ship(PoseRecord::new(1.0, 2.0, 45.0).with_id(7), 1.0);
    assert_eq!(pose.name, SHIP);
    assert_eq!(pose.record.id, Some(7));
    assert_eq!(pose.hull.points().len(), 5);
}
