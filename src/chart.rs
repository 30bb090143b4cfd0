//! Top-level chart handle.
//!
//! [`Chart`] loads the configuration and the static environment once and exposes the operations a
//! simulation driver needs: publishing ship poses, running or spawning a display session, taking
//! snapshots and assembling the recorded frames into an animation.

use crate::config::ChartConfig;
use crate::encode::frames::FramePattern;
use crate::encode::gif::{AnimationStats, assemble_gif};
use crate::feed::PoseFeed;
use crate::feed::csv::{CsvPoseFeed, write_poses};
use crate::foundation::error::{SeaError, SeaResult};
use crate::render::cpu::ChartRenderer;
use crate::render::registry::PatchRegistry;
use crate::scene::environment::{Environment, FeatureKind, Layer};
use crate::scene::pose::PoseRecord;
use crate::session::controller::{Session, SessionOpts, SessionStats};
use crate::session::window::Window;
use std::path::{Path, PathBuf};
use std::process::{Child, Command};

/// A loaded sea chart.
#[derive(Clone, Debug)]
pub struct Chart {
    config: ChartConfig,
    config_path: Option<PathBuf>,
    environment: Environment,
}

impl Chart {
    /// Validate `config`, load the configured environment layers and create the frames directory.
    #[tracing::instrument(skip_all)]
    pub fn open(config: ChartConfig) -> SeaResult<Self> {
        config.validate()?;
        let environment = Environment::load(
            &config.paths.environment,
            &config.feature_kinds()?,
            config.bounding_box()?,
        )?;
        let frames_dir = &config.paths.frames_dir;
        std::fs::create_dir_all(frames_dir).map_err(|e| {
            SeaError::capture(format!("create frames dir '{}': {e}", frames_dir.display()))
        })?;
        tracing::info!(layers = environment.layers().len(), "chart opened");
        Ok(Self {
            config,
            config_path: None,
            environment,
        })
    }

    /// Load the configuration file at `path`, then [`Chart::open`] it.
    ///
    /// The path is remembered so that [`Chart::spawn_display`] can hand it to a child process.
    pub fn from_path(path: impl AsRef<Path>) -> SeaResult<Self> {
        let path = path.as_ref();
        let mut chart = Self::open(ChartConfig::from_path(path)?)?;
        chart.config_path = Some(path.to_path_buf());
        Ok(chart)
    }

    /// Active configuration.
    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    /// Static feature layers.
    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    /// Layer of the given kind, if it was requested.
    pub fn layer(&self, kind: FeatureKind) -> Option<&Layer> {
        self.environment.layer(kind)
    }

    /// Frame file pattern.
    pub fn frames(&self) -> SeaResult<FramePattern> {
        FramePattern::new(self.config.paths.frame_files.clone())
    }

    /// Publish a new complete set of ship poses to the pose source.
    pub fn show_ships(&self, ships: &[PoseRecord]) -> SeaResult<()> {
        write_poses(&self.config.paths.ships, ships)?;
        tracing::debug!(ships = ships.len(), "ships published");
        Ok(())
    }

    /// Publish an empty pose set.
    pub fn clear(&self) -> SeaResult<()> {
        self.show_ships(&[])
    }

    /// Assemble the recorded frames into the configured GIF, then delete them and clear the ships.
    ///
    /// The first and last frames are held for one second each.
    pub fn save(&self) -> SeaResult<AnimationStats> {
        let frames = self.frames()?;
        let fps = self.config.display.fps;
        let stats = assemble_gif(&frames, &self.config.paths.simulation, fps, fps as usize)?;
        let removed = frames.clear()?;
        tracing::debug!(removed, "past frames removed");
        self.clear()?;
        Ok(stats)
    }

    /// Render the static chart with the current ships once and store it as the snapshot `name`.
    pub fn snapshot(&self, name: &str) -> SeaResult<PathBuf> {
        let mut renderer = ChartRenderer::new(&self.config)?;
        renderer.load_environment(&self.environment)?;
        let mut registry = PatchRegistry::new(self.config.display.identity);
        let mut feed = CsvPoseFeed::from_config(&self.config);
        registry.reconcile(&feed.read().unwrap_or_default());
        renderer.repaint(&registry)?;
        renderer.save(name)
    }

    /// Run a display session on `window` in this thread until the window goes away.
    pub fn run_display<W: Window>(&self, window: W) -> SeaResult<SessionStats> {
        let mut session = Session::new(
            &self.config,
            self.environment.clone(),
            CsvPoseFeed::from_config(&self.config),
            window,
            SessionOpts::from_config(&self.config),
        )?;
        session.run()
    }

    /// Start an independent display process: `<exe> display --config <config path>`.
    ///
    /// Requires a chart opened with [`Chart::from_path`].
    pub fn spawn_display(&self, exe: &Path) -> SeaResult<Child> {
        let config_path = self.config_path.as_ref().ok_or_else(|| {
            SeaError::config("spawn_display needs a chart opened from a config file")
        })?;
        let child = Command::new(exe)
            .arg("display")
            .arg("--config")
            .arg(config_path)
            .spawn()
            .map_err(|e| SeaError::config(format!("spawn '{}': {e}", exe.display())))?;
        tracing::info!(pid = child.id(), "display process started");
        Ok(child)
    }
}
