use crate::consts;
use crate::game::Bounds;
use crate::screen::Palette;
use ratatui::layout::Size;
use serde::Deserialize;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Program configuration read from a configuration file
#[derive(Clone, Deserialize, Debug, Default, Eq, PartialEq)]
pub(crate) struct Config {
    /// Board & timing settings
    #[serde(default)]
    pub(crate) game: GameConfig,

    /// Colours used to draw the board
    #[serde(default)]
    pub(crate) colors: Palette,

    /// Where & how much to log
    #[serde(default)]
    pub(crate) logging: LogConfig,
}

impl Config {
    /// Return the default configuration file path
    pub(crate) fn default_path() -> Result<PathBuf, ConfigError> {
        dirs::config_local_dir()
            .map(|p| p.join("gridsnake").join("config.toml"))
            .ok_or(ConfigError::NoPath)
    }

    /// Read configuration from a file on disk.  If the file does not exist and
    /// `allow_missing` is true, a default `Config` value is returned.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the file could not be read or if the file's contents
    /// could not be deserialized.
    pub(crate) fn load(path: &Path, allow_missing: bool) -> Result<Config, ConfigError> {
        let content = match fs_err::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && allow_missing => {
                return Ok(Config::default())
            }
            Err(e) => return Err(ConfigError::Read(e)),
        };
        toml::from_str(&content).map_err(Into::into)
    }
}

#[derive(Clone, Copy, Deserialize, Debug, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub(crate) struct GameConfig {
    /// Board width in cells
    pub(crate) width: u16,

    /// Board height in cells
    pub(crate) height: u16,

    /// Number of segments the snake starts with
    pub(crate) initial_length: NonZeroUsize,

    /// Edge length, in device pixels, of the block drawn for each cell
    pub(crate) scale: u16,

    /// Pause after each frame, in milliseconds
    pub(crate) frame_delay_ms: u64,
}

impl GameConfig {
    pub(crate) fn bounds(&self) -> Bounds {
        Bounds::from(self.size())
    }

    pub(crate) fn size(&self) -> Size {
        Size {
            width: self.width,
            height: self.height,
        }
    }

    pub(crate) fn frame_delay(&self) -> Duration {
        Duration::from_millis(self.frame_delay_ms)
    }

    /// Check that a game can be started with these settings.
    ///
    /// The snake starts with its head in the middle of the board and its body
    /// trailing westwards, so the whole body has to fit between the left edge
    /// and the middle.  There must also be at least one free cell for food.
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "board must be at least 1x1, got {}x{}",
                self.width, self.height
            )));
        }
        if self.scale == 0 {
            return Err(ConfigError::Invalid(String::from(
                "scale must be at least 1",
            )));
        }
        let max_length = usize::from(self.bounds().center().x) + 1;
        if self.initial_length.get() > max_length {
            return Err(ConfigError::Invalid(format!(
                "initial length {} does not fit on a board {} cells wide (maximum {max_length})",
                self.initial_length, self.width
            )));
        }
        if self.initial_length.get() >= self.bounds().area() {
            return Err(ConfigError::Invalid(String::from(
                "the initial snake leaves no room for food",
            )));
        }
        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> GameConfig {
        GameConfig {
            width: consts::DEFAULT_WIDTH,
            height: consts::DEFAULT_HEIGHT,
            initial_length: NonZeroUsize::new(consts::DEFAULT_INITIAL_LENGTH)
                .unwrap_or(NonZeroUsize::MIN),
            scale: consts::DEFAULT_SCALE,
            frame_delay_ms: consts::DEFAULT_FRAME_DELAY_MS,
        }
    }
}

#[derive(Clone, Deserialize, Debug, Eq, PartialEq)]
#[serde(default)]
pub(crate) struct LogConfig {
    /// File to write log messages to.  Nothing is logged if this is unset,
    /// as the game itself occupies the terminal.
    pub(crate) file: Option<PathBuf>,

    /// `tracing-subscriber` filter directives, e.g. `"info"` or
    /// `"gridsnake=debug"`.  Overridden by `RUST_LOG`.
    pub(crate) level: String,
}

impl Default for LogConfig {
    fn default() -> LogConfig {
        LogConfig {
            file: None,
            level: String::from("info"),
        }
    }
}

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("failed to determine path to local configuration directory")]
    NoPath,
    #[error("failed to read configuration file")]
    Read(#[from] std::io::Error),
    #[error("failed to parse configuration file")]
    Parse(#[from] toml::de::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}
