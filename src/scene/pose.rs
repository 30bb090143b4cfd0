use crate::foundation::core::{Affine, BezPath, Point, Vec2};

/// Name carried by every pose read from the ships feed.
pub const SHIP: &str = "Ship";

/// Hull length in chart units at `ship_scale == 1`.
pub const HULL_LENGTH: f64 = 100.0;
/// Hull beam in chart units at `ship_scale == 1`.
pub const HULL_BEAM: f64 = 20.0;

/// Raw placement of one entity as written to / read from the pose source.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PoseRecord {
    /// Easting.
    pub x: f64,
    /// Northing.
    pub y: f64,
    /// Heading in degrees, clockwise from north.
    pub heading: f64,
    /// Optional stable entity id.
    pub id: Option<u64>,
}

impl PoseRecord {
    /// Record without an id.
    pub fn new(x: f64, y: f64, heading: f64) -> Self {
        Self {
            x,
            y,
            heading,
            id: None,
        }
    }

    /// Attach a stable entity id.
    pub fn with_id(mut self, id: u64) -> Self {
        self.id = Some(id);
        self
    }
}

/// Closed polygon in chart coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct Hull(Vec<Point>);

impl Hull {
    /// Wrap an exterior ring. The ring is implicitly closed.
    pub fn new(points: Vec<Point>) -> Self {
        Self(points)
    }

    /// Vertices of the ring.
    pub fn points(&self) -> &[Point] {
        &self.0
    }

    /// Closed path through the vertices, transformed by `t`.
    pub fn to_path(&self, t: Affine) -> BezPath {
        let mut path = BezPath::new();
        let mut it = self.0.iter();
        if let Some(&first) = it.next() {
            path.move_to(t * first);
            for &p in it {
                path.line_to(t * p);
            }
            path.close_path();
        }
        path
    }
}

/// One dynamic entity at one point in time.
///
/// Poses carry no identity of their own unless `id` is set; the registry matches them to slots
/// by position otherwise.
#[derive(Clone, Debug, PartialEq)]
pub struct Pose {
    /// Entity kind name, used to pick a color when a slot is created.
    pub name: String,
    /// Placement this pose was derived from.
    pub record: PoseRecord,
    /// Outline in chart coordinates.
    pub hull: Hull,
}

impl Pose {
    /// Pose with an explicit hull.
    pub fn new(name: impl Into<String>, record: PoseRecord, hull: Hull) -> Self {
        Self {
            name: name.into(),
            record,
            hull,
        }
    }

    /// Ship pose with the standard hull derived from the record.
    pub fn ship(record: PoseRecord, scale: f64) -> Self {
        Self::new(SHIP, record, ship_hull(record, scale))
    }
}

/// Pointed ship outline centred on the record's position, rotated to its heading.
///
/// The bow points along the heading; headings are nautical (0 = north, 90 = east).
pub fn ship_hull(record: PoseRecord, scale: f64) -> Hull {
    let half_l = 0.5 * HULL_LENGTH * scale;
    let half_b = 0.5 * HULL_BEAM * scale;
    let shoulder = half_l - HULL_BEAM * scale;

    // Local frame: +y is the bow, +x starboard.
    let local = [
        Point::new(-half_b, -half_l),
        Point::new(-half_b, shoulder),
        Point::new(0.0, half_l),
        Point::new(half_b, shoulder),
        Point::new(half_b, -half_l),
    ];
    let t = Affine::translate(Vec2::new(record.x, record.y))
        * Affine::rotate(-record.heading.to_radians());
    Hull::new(local.iter().map(|&p| t * p).collect())
}

#[cfg(test)]
#[path = "../../tests/unit/scene/pose.rs"]
mod tests;
