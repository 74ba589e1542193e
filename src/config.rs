//! Stored service credentials.
//!
//! Credentials live in a TOML file, by default `~/.config/mlwcli/config.toml`:
//!
//! ```toml
//! [miniflux]
//! endpoint = "https://miniflux.example.com"
//! api_key = "..."
//!
//! [wallabag]
//! endpoint = "https://wallabag.example.com"
//! client_id = "..."
//! client_secret = "..."
//! username = "..."
//! password = "..."
//! ```

use crate::error::{Error, Result};
use directories::BaseDirs;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::str::FromStr;

const CONFIG_DIR: &str = "mlwcli";
const CONFIG_FILENAME: &str = "config.toml";

/// A supported remote service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    Miniflux,
    Linkding,
    Wallabag,
}

impl Service {
    pub fn name(self) -> &'static str {
        match self {
            Service::Miniflux => "miniflux",
            Service::Linkding => "linkding",
            Service::Wallabag => "wallabag",
        }
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Service {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "miniflux" => Ok(Service::Miniflux),
            "linkding" => Ok(Service::Linkding),
            "wallabag" => Ok(Service::Wallabag),
            other => Err(Error::UnknownService(other.to_string())),
        }
    }
}

/// Endpoint and API key for token-authenticated services.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiKeyConfig {
    #[serde(default)]
    pub endpoint: String,
    #[serde(default)]
    pub api_key: String,
}

impl ApiKeyConfig {
    pub fn is_configured(&self) -> bool {
        !self.endpoint.is_empty()
    }
}

/// OAuth client and user credentials for Wallabag.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WallabagConfig {
    #[serde(default)]
    pub endpoint: String,
    #[serde(default)]
    pub client_id: String,
    #[serde(default)]
    pub client_secret: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl WallabagConfig {
    pub fn is_configured(&self) -> bool {
        !self.endpoint.is_empty()
    }
}

// Keep secrets out of debug logs.
impl fmt::Debug for ApiKeyConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiKeyConfig")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

impl fmt::Debug for WallabagConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WallabagConfig")
            .field("endpoint", &self.endpoint)
            .field("client_id", &self.client_id)
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

/// All stored credentials.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "is_default")]
    pub miniflux: ApiKeyConfig,
    #[serde(default, skip_serializing_if = "is_default")]
    pub linkding: ApiKeyConfig,
    #[serde(default, skip_serializing_if = "is_default")]
    pub wallabag: WallabagConfig,
}

fn is_default<T: Default + PartialEq>(value: &T) -> bool {
    *value == T::default()
}

impl Config {
    /// Default location of the config file.
    pub fn default_path() -> Result<PathBuf> {
        let base = BaseDirs::new().ok_or(Error::NoConfigDir)?;
        Ok(base
            .home_dir()
            .join(".config")
            .join(CONFIG_DIR)
            .join(CONFIG_FILENAME))
    }

    /// Load the config at `path`. A missing file yields an empty config.
    pub fn load(path: &Path) -> Result<Self> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using empty config");
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(Error::ConfigIo {
                    path: path.to_path_buf(),
                    source: e,
                });
            }
        };

        toml::from_str(&content).map_err(|e| Error::ConfigParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Write the config to `path`, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        let io_err = |source| Error::ConfigIo {
            path: path.to_path_buf(),
            source,
        };

        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).map_err(io_err)?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| Error::ConfigParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        write_private(path, &content).map_err(io_err)?;

        tracing::debug!(path = %path.display(), "config saved");
        Ok(())
    }

    /// Whether credentials for `service` are present.
    pub fn is_configured(&self, service: Service) -> bool {
        match service {
            Service::Miniflux => self.miniflux.is_configured(),
            Service::Linkding => self.linkding.is_configured(),
            Service::Wallabag => self.wallabag.is_configured(),
        }
    }

    /// Fail with [`Error::NotConfigured`] unless `service` has credentials.
    pub fn require(&self, service: Service) -> Result<()> {
        if self.is_configured(service) {
            Ok(())
        } else {
            Err(Error::NotConfigured(service.to_string()))
        }
    }

    /// Forget the credentials for `service`.
    pub fn clear(&mut self, service: Service) {
        match service {
            Service::Miniflux => self.miniflux = ApiKeyConfig::default(),
            Service::Linkding => self.linkding = ApiKeyConfig::default(),
            Service::Wallabag => self.wallabag = WallabagConfig::default(),
        }
    }

    /// Whether no service has credentials.
    pub fn is_empty(&self) -> bool {
        [Service::Miniflux, Service::Linkding, Service::Wallabag]
            .into_iter()
            .all(|s| !self.is_configured(s))
    }
}

/// Remove `service` from the config file at `path`.
///
/// The file is deleted once no service remains. A missing file is left alone.
pub fn remove_service(path: &Path, service: Service) -> Result<()> {
    if !path.exists() {
        return Ok(());
    }

    let mut config = Config::load(path)?;
    config.clear(service);

    if config.is_empty() {
        tracing::debug!(path = %path.display(), "no services left, removing config file");
        return fs::remove_file(path).map_err(|e| Error::ConfigIo {
            path: path.to_path_buf(),
            source: e,
        });
    }

    config.save(path)
}

/// Write `content` to a file only the owner can read.
///
/// New files are created with mode 0600; an existing file is narrowed to
/// 0600 before the secrets go in.
#[cfg(unix)]
fn write_private(path: &Path, content: &str) -> std::io::Result<()> {
    use std::io::Write;
    use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

    let mut file = fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?;
    file.set_permissions(fs::Permissions::from_mode(0o600))?;
    file.write_all(content.as_bytes())
}

#[cfg(not(unix))]
fn write_private(path: &Path, content: &str) -> std::io::Result<()> {
    fs::write(path, content)
}
