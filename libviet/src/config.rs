//! Host-facing configuration.
//!
//! The host integration shares a one-line, comma-separated record with the
//! engine:
//!
//! ```text
//! <tag>,<backspace_us>,<wait_us>,<text_us>
//! ```
//!
//! `<tag>` names the input scheme (`telex`, `vni`), a platform profile
//! (`electron`, `terminal`, ...) or both as `platform/scheme`. The three
//! numbers are injection delays in microseconds. The record lives in the
//! user's own configuration directory and is replaced atomically.
//!
//! The full option set, including the core composition options, can also
//! be stored as TOML.

use crate::error::ConfigError;
use etcetera::{choose_base_strategy, BaseStrategy};
use libviet_core::InputScheme;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

/// Environment variable overriding the configuration directory.
pub const CONFIG_DIR_ENV: &str = "LIBVIET_CONFIG_DIR";

const APP_DIR: &str = "libviet";
const RECORD_FILE: &str = "config";
const DEFAULT_PLATFORM: &str = "default";

/// Delays the host waits between injected events, in microseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Delays {
    /// After each synthesized backspace
    pub backspace_us: u32,
    /// Between the last backspace and the first inserted character
    pub wait_us: u32,
    /// After each inserted character
    pub text_us: u32,
}

impl Default for Delays {
    fn default() -> Self {
        Self {
            backspace_us: 1000,
            wait_us: 3000,
            text_us: 1000,
        }
    }
}

impl Delays {
    pub fn backspace(&self) -> Duration {
        Duration::from_micros(u64::from(self.backspace_us))
    }

    pub fn wait(&self) -> Duration {
        Duration::from_micros(u64::from(self.wait_us))
    }

    pub fn text(&self) -> Duration {
        Duration::from_micros(u64::from(self.text_us))
    }
}

/// Engine configuration: core composition options plus host settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct VietConfig {
    /// Composition options (tone placement, foreign words, restore)
    #[serde(flatten)]
    pub base: libviet_core::Config,

    pub scheme: InputScheme,

    /// Host profile the delays were tuned for
    pub platform: String,

    pub delays: Delays,
}

impl Default for VietConfig {
    fn default() -> Self {
        Self {
            base: libviet_core::Config::default(),
            scheme: InputScheme::Telex,
            platform: DEFAULT_PLATFORM.to_string(),
            delays: Delays::default(),
        }
    }
}

impl VietConfig {
    pub fn base(&self) -> &libviet_core::Config {
        &self.base
    }

    pub fn base_mut(&mut self) -> &mut libviet_core::Config {
        &mut self.base
    }

    pub fn into_base(self) -> libviet_core::Config {
        self.base
    }

    // ========== Record Format ==========

    /// Parse a `<tag>,<backspace_us>,<wait_us>,<text_us>` record.
    ///
    /// Options the record does not carry keep their defaults.
    pub fn parse_record(line: &str) -> Result<Self, ConfigError> {
        let fields: Vec<&str> = line.trim().split(',').map(str::trim).collect();
        let [tag, backspace, wait, text] = fields.as_slice() else {
            return Err(ConfigError::FieldCount {
                found: fields.len(),
            });
        };
        if tag.is_empty() {
            return Err(ConfigError::EmptyTag);
        }

        let mut config = Self::default();
        for part in tag.split('/').map(str::trim).filter(|p| !p.is_empty()) {
            match part.parse::<InputScheme>() {
                Ok(scheme) => config.scheme = scheme,
                Err(_) => config.platform = part.to_string(),
            }
        }

        config.delays = Delays {
            backspace_us: parse_delay("backspace", backspace)?,
            wait_us: parse_delay("wait", wait)?,
            text_us: parse_delay("text", text)?,
        };
        Ok(config)
    }

    /// Format as a single record line (no trailing newline).
    pub fn to_record(&self) -> String {
        let tag = if self.platform == DEFAULT_PLATFORM || self.platform.is_empty() {
            self.scheme.to_string()
        } else {
            format!("{}/{}", self.platform, self.scheme)
        };
        format!(
            "{},{},{},{}",
            tag, self.delays.backspace_us, self.delays.wait_us, self.delays.text_us
        )
    }

    // ========== Locations ==========

    /// Private per-user directory holding the configuration.
    pub fn default_dir() -> Result<PathBuf, ConfigError> {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV).filter(|d| !d.is_empty()) {
            return Ok(PathBuf::from(dir));
        }
        let strategy = choose_base_strategy().map_err(|_| ConfigError::NoConfigDir)?;
        Ok(strategy.config_dir().join(APP_DIR))
    }

    pub fn default_path() -> Result<PathBuf, ConfigError> {
        Ok(Self::default_dir()?.join(RECORD_FILE))
    }

    // ========== Load / Save ==========

    /// Load a record file, or TOML when the path ends in `.toml`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        if path.extension().is_some_and(|ext| ext == "toml") {
            return Ok(Self::from_toml_str(&content)?);
        }

        let line = content
            .lines()
            .map(str::trim)
            .find(|l| !l.is_empty() && !l.starts_with('#'))
            .unwrap_or("");
        Self::parse_record(line)
    }

    /// Load, falling back to defaults when the file is missing or malformed.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(config) => config,
            Err(ConfigError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no configuration file, using defaults");
                Self::default()
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "invalid configuration, using defaults");
                Self::default()
            }
        }
    }

    /// Load from the user's configuration directory.
    pub fn load_user() -> Self {
        match Self::default_path() {
            Ok(path) => Self::load_or_default(path),
            Err(e) => {
                warn!(error = %e, "configuration directory unavailable, using defaults");
                Self::default()
            }
        }
    }

    /// Write the record atomically.
    ///
    /// The content is staged in an unpredictably named file inside the
    /// target directory (mode 0600 on Unix) and renamed over `path`.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let mut line = self.to_record();
        line.push('\n');
        write_atomic(path.as_ref(), line.as_bytes())
    }

    /// Save to the user's configuration directory and return the path.
    pub fn save_user(&self) -> Result<PathBuf, ConfigError> {
        let path = Self::default_path()?;
        self.save(&path)?;
        Ok(path)
    }

    /// Load configuration from a TOML file.
    pub fn load_toml<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Ok(Self::from_toml_str(&content)?)
    }

    /// Save configuration to a TOML file.
    pub fn save_toml<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = self.to_toml_string()?;
        write_atomic(path.as_ref(), content.as_bytes())
    }

    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

fn parse_delay(field: &'static str, value: &str) -> Result<u32, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidDelay {
        field,
        value: value.to_string(),
    })
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), ConfigError> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        Some(_) => PathBuf::from("."),
        None => return Err(ConfigError::NoParent(path.to_path_buf())),
    };

    if !dir.exists() {
        fs::create_dir_all(&dir)?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&dir, fs::Permissions::from_mode(0o700))?;
        }
    }

    let mut staged = tempfile::NamedTempFile::new_in(&dir)?;
    staged.write_all(bytes)?;
    staged.as_file().sync_all()?;
    staged.persist(path).map_err(|e| ConfigError::Io(e.error))?;
    Ok(())
}
