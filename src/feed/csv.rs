use crate::config::ChartConfig;
use crate::encode::frames::ensure_parent_dir;
use crate::feed::PoseFeed;
use crate::foundation::error::{SeaError, SeaResult};
use crate::scene::pose::{Pose, PoseRecord};
use std::io::Write as _;
use std::path::{Path, PathBuf};

const HEADER: &str = "x_position,y_position,heading";

/// Pose feed backed by the ships CSV file.
///
/// The file is re-read on every call. Any failure (missing file, file locked by the writer, torn
/// rows) is reported as "no update".
#[derive(Debug, Clone)]
pub struct CsvPoseFeed {
    path: PathBuf,
    ship_scale: f64,
}

impl CsvPoseFeed {
    /// Feed reading `path`, deriving hulls at `ship_scale`.
    pub fn new(path: impl Into<PathBuf>, ship_scale: f64) -> Self {
        Self {
            path: path.into(),
            ship_scale,
        }
    }

    /// Feed for the configured ships file.
    pub fn from_config(cfg: &ChartConfig) -> Self {
        Self::new(cfg.paths.ships.clone(), cfg.display.ship_scale)
    }

    /// Source path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PoseFeed for CsvPoseFeed {
    fn read(&mut self) -> Option<Vec<Pose>> {
        match read_poses(&self.path) {
            Ok(records) => Some(
                records
                    .into_iter()
                    .map(|r| Pose::ship(r, self.ship_scale))
                    .collect(),
            ),
            Err(e) => {
                tracing::debug!(path = %self.path.display(), error = %e, "pose source unavailable");
                None
            }
        }
    }
}

/// Read every record from a ships CSV file.
pub fn read_poses(path: &Path) -> SeaResult<Vec<PoseRecord>> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| SeaError::config(format!("read poses '{}': {e}", path.display())))?;
    parse_poses(&text)
}

/// Parse ships CSV text: a header row followed by `x,y,heading[,id]` rows.
pub fn parse_poses(text: &str) -> SeaResult<Vec<PoseRecord>> {
    let mut lines = text.lines();
    if lines.next().is_none() {
        return Err(SeaError::config("pose source has no header row"));
    }
    lines
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| parse_row(line).map_err(|e| SeaError::config(format!("row {}: {e}", i + 2))))
        .collect()
}

fn parse_row(line: &str) -> Result<PoseRecord, String> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    if !(3..=4).contains(&fields.len()) {
        return Err(format!("expected 3 or 4 fields, found {}", fields.len()));
    }
    let num = |s: &str| -> Result<f64, String> {
        s.parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| format!("invalid number '{s}'"))
    };
    let mut record = PoseRecord::new(num(fields[0])?, num(fields[1])?, num(fields[2])?);
    if let Some(id) = fields.get(3).filter(|s| !s.is_empty()) {
        record.id = Some(id.parse().map_err(|_| format!("invalid id '{id}'"))?);
    }
    Ok(record)
}

/// Replace the ships file with `records`. An empty slice clears all entities.
///
/// The content goes to a sibling temp file first and is renamed into place, so a concurrent
/// reader observes either the previous or the new snapshot.
pub fn write_poses(path: &Path, records: &[PoseRecord]) -> SeaResult<()> {
    ensure_parent_dir(path)?;

    let with_ids = records.iter().any(|r| r.id.is_some());
    let mut out = String::from(HEADER);
    if with_ids {
        out.push_str(",id");
    }
    out.push('\n');
    for r in records {
        out.push_str(&format!("{},{},{}", r.x, r.y, r.heading));
        if with_ids {
            out.push(',');
            if let Some(id) = r.id {
                out.push_str(&id.to_string());
            }
        }
        out.push('\n');
    }

    let mut tmp_name = path.file_name().unwrap_or_default().to_os_string();
    tmp_name.push(".tmp");
    let tmp = path.with_file_name(tmp_name);
    let write = || -> std::io::Result<()> {
        let mut f = std::fs::File::create(&tmp)?;
        f.write_all(out.as_bytes())?;
        f.sync_all()?;
        std::fs::rename(&tmp, path)
    };
    write().map_err(|e| SeaError::capture(format!("write poses '{}': {e}", path.display())))
}

#[cfg(test)]
#[path = "../../tests/unit/feed/csv.rs"]
mod tests;
