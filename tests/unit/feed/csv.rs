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

#[test]
fn parse_header_only_is_empty_read() {
    assert!(parse_poses("x_position,y_position,heading\n").unwrap().is_empty());
}

#[test]
fn parse_rows_with_and_without_ids() {
    let text = "x_position,y_position,heading,id\n1.5,2,90,7\n\n3,4,180,\n";
    let rows = parse_poses(text).unwrap();
    assert_eq!(rows, vec![
        PoseRecord::new(1.5, 2.0, 90.0).with_id(7),
        PoseRecord::new(3.0, 4.0, 180.0),
    ]);
}

#[test]
fn parse_rejects_torn_rows() {
    assert!(parse_poses("").is_err());
    assert!(parse_poses("h\n1,2\n").is_err());
    assert!(parse_poses("h\n1,2,x\n").is_err());
    assert!(parse_poses("h\n1,2,NaN\n").is_err());
}

#[test]
fn write_then_read_round_trips() {
    let dir = temp_dir("csv_write_read");
    let path = dir.join("ships.csv");
    let records = [
        PoseRecord::new(38500.0, 6949000.0, 45.0),
        PoseRecord::new(38600.5, 6949100.25, 270.0),
    ];
    write_poses(&path, &records).unwrap();
    assert_eq!(read_poses(&path).unwrap(), records);
    assert!(!dir.join("ships.csv.tmp").exists());

    write_poses(&path, &[]).unwrap();
    assert!(read_poses(&path).unwrap().is_empty());

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn feed_yields_ship_poses() {
    let dir = temp_dir("csv_feed");
    let path = dir.join("ships.csv");
    write_poses(&path, &[PoseRecord::new(0.0, 0.0, 0.0).with_id(3)]).unwrap();

    let mut feed = CsvPoseFeed::new(&path, 2.0);
    let poses = feed.read().unwrap();
    assert_eq!(poses.len(), 1);
    assert_eq!(poses[0].name, "Ship");
    assert_eq!(poses[0].record.id, Some(3));
    assert_eq!(poses[0].hull, crate::scene::pose::ship_hull(poses[0].record, 2.0));

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn feed_reports_no_update_when_unreadable() {
    let dir = temp_dir("csv_missing");
    let mut feed = CsvPoseFeed::new(dir.join("missing.csv"), 1.0);
    assert!(feed.read().is_none());

    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("torn.csv"), "x_position,y_position,heading\n1,2").unwrap();
    let mut feed = CsvPoseFeed::new(dir.join("torn.csv"), 1.0);
    assert!(feed.read().is_none());

    std::fs::remove_dir_all(&dir).ok();
}
