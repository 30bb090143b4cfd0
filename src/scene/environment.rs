use crate::foundation::core::{BoundingBox, Point, Rect, Rgba8Premul};
use crate::foundation::error::{SeaError, SeaResult};
use crate::scene::color::color;
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Static chart feature layers, in canonical bottom-to-top draw order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FeatureKind {
    /// Open water; its color becomes the base fill of the chart.
    Seabed,
    /// Land masses.
    Land,
    /// Shoreline areas.
    Shore,
    /// Shallow water.
    Shallows,
    /// Rocks (usually points).
    Rocks,
}

impl FeatureKind {
    /// All kinds in draw order.
    pub const ALL: [FeatureKind; 5] = [
        FeatureKind::Seabed,
        FeatureKind::Land,
        FeatureKind::Shore,
        FeatureKind::Shallows,
        FeatureKind::Rocks,
    ];

    /// Canonical layer name.
    pub fn name(self) -> &'static str {
        match self {
            FeatureKind::Seabed => "Seabed",
            FeatureKind::Land => "Land",
            FeatureKind::Shore => "Shore",
            FeatureKind::Shallows => "Shallows",
            FeatureKind::Rocks => "Rocks",
        }
    }

    /// Parse a canonical layer name.
    pub fn from_name(name: &str) -> SeaResult<Self> {
        Self::ALL
            .into_iter()
            .find(|k| k.name() == name)
            .ok_or_else(|| {
                SeaError::config(format!(
                    "feature '{name}' not supported, possible candidates are: {}",
                    supported_names()
                ))
            })
    }
}

/// Comma separated list of supported layer names.
pub fn supported_names() -> String {
    FeatureKind::ALL
        .iter()
        .map(|k| k.name())
        .collect::<Vec<_>>()
        .join(", ")
}

/// One static feature layer: geometry in chart coordinates plus its display color.
#[derive(Clone, Debug)]
pub struct Layer {
    kind: FeatureKind,
    color: Rgba8Premul,
    polygons: Vec<Vec<Point>>,
    points: Vec<Point>,
}

impl Layer {
    /// Build a layer; the color is derived from the kind's name.
    pub fn new(kind: FeatureKind, polygons: Vec<Vec<Point>>, points: Vec<Point>) -> Self {
        Self {
            kind,
            color: color(kind.name()),
            polygons,
            points,
        }
    }

    /// Layer kind.
    pub fn kind(&self) -> FeatureKind {
        self.kind
    }

    /// Layer name.
    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    /// Display color.
    pub fn color(&self) -> Rgba8Premul {
        self.color
    }

    /// Exterior rings (holes are not represented).
    pub fn polygons(&self) -> &[Vec<Point>] {
        &self.polygons
    }

    /// Point features.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    fn retain_within(&mut self, bbox: BoundingBox) {
        self.polygons
            .retain(|ring| ring_bounds(ring).is_some_and(|r| bbox.intersects(r)));
        self.points.retain(|p| bbox.contains(*p));
    }
}

/// Ordered, immutable collection of static feature layers.
#[derive(Clone, Debug, Default)]
pub struct Environment {
    layers: Vec<Layer>,
}

#[derive(Deserialize)]
struct EnvironmentDef {
    layers: Vec<LayerDef>,
}

#[derive(Deserialize)]
struct LayerDef {
    name: String,
    #[serde(default)]
    polygons: Vec<Vec<[f64; 2]>>,
    #[serde(default)]
    points: Vec<[f64; 2]>,
}

impl Environment {
    /// Build from layers; they are sorted into draw order and deduplicated by kind.
    pub fn new(mut layers: Vec<Layer>) -> Self {
        layers.sort_by_key(|l| l.kind);
        layers.dedup_by_key(|l| l.kind);
        Self { layers }
    }

    /// Load the requested layers from a JSON feature file, clipped to `bbox`.
    ///
    /// Requested kinds missing from the file become empty layers. Layers in the file that were not
    /// requested are ignored.
    #[tracing::instrument(skip(kinds))]
    pub fn load(path: &Path, kinds: &[FeatureKind], bbox: BoundingBox) -> SeaResult<Self> {
        let f = File::open(path).map_err(|e| {
            SeaError::config(format!("open environment '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f), kinds, bbox)
    }

    /// Same as [`Environment::load`], from any reader.
    pub fn from_reader<R: std::io::Read>(
        r: R,
        kinds: &[FeatureKind],
        bbox: BoundingBox,
    ) -> SeaResult<Self> {
        let def: EnvironmentDef = serde_json::from_reader(r)
            .map_err(|e| SeaError::serde(format!("parse environment JSON: {e}")))?;

        let mut layers = Vec::with_capacity(kinds.len());
        for &kind in kinds {
            let mut layer = Layer::new(kind, Vec::new(), Vec::new());
            for d in def.layers.iter().filter(|d| d.name == kind.name()) {
                layer.polygons.extend(
                    d.polygons
                        .iter()
                        .filter(|ring| ring.len() >= 3)
                        .map(|ring| ring.iter().map(|&[x, y]| Point::new(x, y)).collect()),
                );
                layer
                    .points
                    .extend(d.points.iter().map(|&[x, y]| Point::new(x, y)));
            }
            layer.retain_within(bbox);
            tracing::debug!(
                layer = kind.name(),
                polygons = layer.polygons.len(),
                points = layer.points.len(),
                "loaded feature layer"
            );
            layers.push(layer);
        }
        for d in &def.layers {
            if FeatureKind::from_name(&d.name).is_err() {
                tracing::warn!(layer = %d.name, "ignoring unsupported feature layer");
            }
        }
        Ok(Self::new(layers))
    }

    /// All layers, bottom first.
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Layer of the given kind, if loaded.
    pub fn layer(&self, kind: FeatureKind) -> Option<&Layer> {
        self.layers.iter().find(|l| l.kind == kind)
    }

    /// Bottom (seabed) layer. Its geometry is never drawn; its color is the base fill.
    pub fn bottom(&self) -> Option<&Layer> {
        self.layer(FeatureKind::Seabed)
    }

    /// Layers drawn as geometry on top of the base fill, bottom first.
    pub fn drawn_layers(&self) -> impl Iterator<Item = &Layer> {
        self.layers
            .iter()
            .filter(|l| l.kind != FeatureKind::Seabed)
    }

    /// Return `true` when no layers are loaded.
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

fn ring_bounds(ring: &[Point]) -> Option<Rect> {
    let first = ring.first()?;
    let mut r = Rect::from_points(*first, *first);
    for p in &ring[1..] {
        r = r.union_pt(*p);
    }
    Some(r)
}

#[cfg(test)]
#[path = "../../tests/unit/scene/environment.rs"]
mod tests;
