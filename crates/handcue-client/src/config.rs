//! Controller configuration.
//!
//! Sources, highest priority first: command line, environment, TOML file,
//! built-in defaults.

use clap::Parser;
use handcue_core::{LayoutError, Zone, ZoneLayout};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Parser)]
#[command(name = "handcue")]
#[command(about = "Drive a remote game session with hand gestures")]
#[command(version)]
pub struct Cli {
    /// TOML config file
    #[arg(long, env = "HANDCUE_CONFIG")]
    pub config: Option<PathBuf>,

    /// WebSocket endpoint of the game server
    #[arg(long, env = "HANDCUE_SERVER_URL")]
    pub server_url: Option<String>,

    /// Minimum time between two fist triggers
    #[arg(long, env = "HANDCUE_FIST_COOLDOWN_MS")]
    pub fist_cooldown_ms: Option<u64>,

    /// How long the fingertip must rest on a zone to select it
    #[arg(long, env = "HANDCUE_HOVER_TIME_MS")]
    pub hover_time_ms: Option<u64>,

    /// Pause between frames
    #[arg(long, env = "HANDCUE_FRAME_INTERVAL_MS")]
    pub frame_interval_ms: Option<u64>,

    /// Give up connecting after this long
    #[arg(long, env = "HANDCUE_CONNECT_TIMEOUT_MS")]
    pub connect_timeout_ms: Option<u64>,

    /// Consecutive unreadable frames tolerated before giving up
    #[arg(long, env = "HANDCUE_MAX_FRAME_ERRORS")]
    pub max_frame_errors: Option<u32>,

    /// Camera frame width in pixels
    #[arg(long, env = "HANDCUE_FRAME_WIDTH")]
    pub frame_width: Option<i32>,

    /// Camera frame height in pixels
    #[arg(long, env = "HANDCUE_FRAME_HEIGHT")]
    pub frame_height: Option<i32>,

    /// Zone names, left to right (e.g. A,B,C,D)
    #[arg(long, env = "HANDCUE_ZONES", value_delimiter = ',')]
    pub zones: Option<Vec<String>>,
}

/// Resolved controller settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server_url: String,
    pub fist_cooldown_ms: u64,
    pub hover_time_ms: u64,
    pub frame_interval_ms: u64,
    pub connect_timeout_ms: Option<u64>,
    pub max_frame_errors: u32,
    pub frame_width: i32,
    pub frame_height: i32,
    pub zones: ZoneLayout,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: "ws://localhost:3000/ws".to_string(),
            fist_cooldown_ms: 2000,
            hover_time_ms: 800,
            frame_interval_ms: 10,
            connect_timeout_ms: None,
            max_frame_errors: 100,
            frame_width: 640,
            frame_height: 480,
            zones: ZoneLayout::default(),
        }
    }
}

/// Why a configuration could not be used.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("{0} must be greater than zero")]
    Zero(&'static str),
    #[error("server_url must be a ws:// or wss:// URL, got {0}")]
    Url(String),
    #[error(transparent)]
    Layout(#[from] LayoutError),
}

impl Config {
    /// Resolve the full configuration for a command line.
    pub fn resolve(cli: &Cli) -> Result<Self, ConfigError> {
        let base = match &cli.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        let config = base.with_overrides(cli);
        config.validate()?;
        Ok(config)
    }

    /// Read a TOML file. Keys it leaves out keep their defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }

    /// Parse TOML text.
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Apply command line and environment values on top.
    pub fn with_overrides(mut self, cli: &Cli) -> Self {
        if let Some(url) = &cli.server_url {
            self.server_url = url.clone();
        }
        if let Some(ms) = cli.fist_cooldown_ms {
            self.fist_cooldown_ms = ms;
        }
        if let Some(ms) = cli.hover_time_ms {
            self.hover_time_ms = ms;
        }
        if let Some(ms) = cli.frame_interval_ms {
            self.frame_interval_ms = ms;
        }
        if cli.connect_timeout_ms.is_some() {
            self.connect_timeout_ms = cli.connect_timeout_ms;
        }
        if let Some(max) = cli.max_frame_errors {
            self.max_frame_errors = max;
        }
        if let Some(width) = cli.frame_width {
            self.frame_width = width;
        }
        if let Some(height) = cli.frame_height {
            self.frame_height = height;
        }
        if let Some(names) = &cli.zones {
            self.zones.names = names.clone();
        }
        self
    }

    /// Check ranges and that the zone layout builds.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.server_url.starts_with("ws://") || self.server_url.starts_with("wss://")) {
            return Err(ConfigError::Url(self.server_url.clone()));
        }
        if self.fist_cooldown_ms == 0 {
            return Err(ConfigError::Zero("fist_cooldown_ms"));
        }
        if self.hover_time_ms == 0 {
            return Err(ConfigError::Zero("hover_time_ms"));
        }
        if self.connect_timeout_ms == Some(0) {
            return Err(ConfigError::Zero("connect_timeout_ms"));
        }
        if self.frame_width <= 0 || self.frame_height <= 0 {
            return Err(ConfigError::Zero("frame_width/frame_height"));
        }
        self.build_zones()?;
        Ok(())
    }

    /// Zones for the configured frame width.
    pub fn build_zones(&self) -> Result<Vec<Zone>, LayoutError> {
        self.zones.build(self.frame_width)
    }

    pub fn fist_cooldown(&self) -> Duration {
        Duration::from_millis(self.fist_cooldown_ms)
    }

    pub fn hover_time(&self) -> Duration {
        Duration::from_millis(self.hover_time_ms)
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }

    pub fn connect_timeout(&self) -> Option<Duration> {
        self.connect_timeout_ms.map(Duration::from_millis)
    }
}
