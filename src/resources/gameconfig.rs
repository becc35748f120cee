//! Engine configuration.
//!
//! Settings loaded from an INI file. Defaults are safe to run with, and any
//! key missing from the file keeps its current value.
//!
//! # Configuration File Format
//!
//! ```ini
//! [time]
//! ; fixed or actual
//! mode = fixed
//! fixed_timestep = 0.016666668
//! time_scale = 1.0
//!
//! [physics]
//! gravity_x = 0.0
//! gravity_y = -9.81
//!
//! [render]
//! meter = 32.0
//!
//! [debug]
//! draw = false
//! ```

use std::path::PathBuf;

use configparser::ini::Ini;
use log::{info, warn};
use nalgebra::Vector2;

use crate::error::EngineError;
use crate::resources::physics::DEFAULT_GRAVITY_Y;

/// Default safe values for startup
const DEFAULT_FIXED_TIMESTEP: f32 = 1.0 / 60.0;
const DEFAULT_TIME_SCALE: f32 = 1.0;
const DEFAULT_METER: f32 = 32.0;
const DEFAULT_DEBUG_DRAW: bool = false;
const DEFAULT_CONFIG_PATH: &str = "./config.ini";

/// How the engine picks the dt of a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DtMode {
    /// Always step by `fixed_timestep`.
    #[default]
    Fixed,
    /// Step by the measured frame time.
    Actual,
}

impl DtMode {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "fixed" => Some(DtMode::Fixed),
            "actual" | "variable" => Some(DtMode::Actual),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DtMode::Fixed => "fixed",
            DtMode::Actual => "actual",
        }
    }
}

/// Engine configuration.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub dt_mode: DtMode,
    /// Seconds per frame in [`DtMode::Fixed`].
    pub fixed_timestep: f32,
    pub time_scale: f32,
    pub gravity: Vector2<f32>,
    /// Pixels per meter, only used at the render boundary.
    pub meter: f32,
    pub debug_draw: bool,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl EngineConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            dt_mode: DtMode::Fixed,
            fixed_timestep: DEFAULT_FIXED_TIMESTEP,
            time_scale: DEFAULT_TIME_SCALE,
            gravity: Vector2::new(0.0, DEFAULT_GRAVITY_Y),
            meter: DEFAULT_METER,
            debug_draw: DEFAULT_DEBUG_DRAW,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), EngineError> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| EngineError::Config(format!("Failed to load config file: {}", e)))?;

        // [time] section
        if let Some(mode) = config.get("time", "mode") {
            match DtMode::parse(&mode) {
                Some(mode) => self.dt_mode = mode,
                None => warn!("Unknown time mode '{}', keeping {}", mode, self.dt_mode.as_str()),
            }
        }
        if let Some(step) = get_f32(&config, "time", "fixed_timestep") {
            if step > 0.0 {
                self.fixed_timestep = step;
            } else {
                warn!("Ignoring non-positive fixed_timestep {}", step);
            }
        }
        if let Some(scale) = get_f32(&config, "time", "time_scale") {
            self.time_scale = scale;
        }

        // [physics] section
        if let Some(x) = get_f32(&config, "physics", "gravity_x") {
            self.gravity.x = x;
        }
        if let Some(y) = get_f32(&config, "physics", "gravity_y") {
            self.gravity.y = y;
        }

        // [render] section
        if let Some(meter) = get_f32(&config, "render", "meter") {
            self.meter = meter;
        }

        // [debug] section
        if let Some(draw) = config.getbool("debug", "draw").ok().flatten() {
            self.debug_draw = draw;
        }

        info!(
            "Loaded config: mode={}, step={}, scale={}, gravity=({}, {}), meter={}, debug_draw={}",
            self.dt_mode.as_str(),
            self.fixed_timestep,
            self.time_scale,
            self.gravity.x,
            self.gravity.y,
            self.meter,
            self.debug_draw
        );

        Ok(())
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), EngineError> {
        let mut config = Ini::new();

        config.set("time", "mode", Some(self.dt_mode.as_str().to_string()));
        config.set("time", "fixed_timestep", Some(self.fixed_timestep.to_string()));
        config.set("time", "time_scale", Some(self.time_scale.to_string()));

        config.set("physics", "gravity_x", Some(self.gravity.x.to_string()));
        config.set("physics", "gravity_y", Some(self.gravity.y.to_string()));

        config.set("render", "meter", Some(self.meter.to_string()));

        config.set("debug", "draw", Some(self.debug_draw.to_string()));

        config
            .write(&self.config_path)
            .map_err(|e| EngineError::io(&self.config_path, e))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }
}

fn get_f32(config: &Ini, section: &str, key: &str) -> Option<f32> {
    match config.getfloat(section, key) {
        Ok(value) => value.map(|v| v as f32),
        Err(e) => {
            warn!("Bad value for [{}] {}: {}", section, key, e);
            None
        }
    }
}
