use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{CLIENT_NAME, FEED_LIMIT, IDLE_TIMEOUT};
use crate::error::{CoreError, CoreResult};

const CONFIG_FILE_NAME: &str = "config.json";

/// Filesystem locations used by the client.
#[derive(Debug, Clone)]
pub struct CoreConfig {
    pub data_dir: PathBuf,
    pub config_path: PathBuf,
}

impl CoreConfig {
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Self {
        let data_dir = data_dir.as_ref().to_path_buf();
        Self {
            config_path: data_dir.join(CONFIG_FILE_NAME),
            data_dir,
        }
    }

    /// Use an explicit config file; its directory becomes the data dir.
    pub fn with_config_path<P: AsRef<Path>>(config_path: P) -> Self {
        let config_path = config_path.as_ref().to_path_buf();
        let data_dir = config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        Self {
            data_dir,
            config_path,
        }
    }

    pub fn log_path(&self) -> PathBuf {
        self.data_dir.join(format!("{}.log", CLIENT_NAME))
    }
}

impl Default for CoreConfig {
    fn default() -> Self {
        let base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        Self::new(base.join(CLIENT_NAME))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayPolicy {
    pub read: bool,
    pub write: bool,
}

impl Default for RelayPolicy {
    fn default() -> Self {
        Self {
            read: true,
            write: true,
        }
    }
}

impl fmt::Display for RelayPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match (self.read, self.write) {
            (true, true) => "rw",
            (true, false) => "r",
            (false, true) => "w",
            (false, false) => "-",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Follow {
    pub key: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
}

/// Persisted user configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub relays: BTreeMap<String, RelayPolicy>,
    /// Followed pubkeys (hex) keyed by the same hex
    pub following: BTreeMap<String, Follow>,
    /// Hex-encoded secret key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub private_key: Option<String>,
    pub allow_image_preview: bool,
    pub idle_timeout_ms: u64,
    pub feed_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            relays: BTreeMap::new(),
            following: BTreeMap::new(),
            private_key: None,
            allow_image_preview: false,
            idle_timeout_ms: IDLE_TIMEOUT.as_millis() as u64,
            feed_limit: FEED_LIMIT,
        }
    }
}

impl Config {
    /// Load from `path`; a missing file yields the defaults.
    pub fn load(path: &Path) -> CoreResult<Self> {
        match std::fs::read_to_string(path) {
            Ok(raw) => serde_json::from_str(&raw)
                .map_err(|e| CoreError::Config(format!("{}: {}", path.display(), e))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn save(&self, path: &Path) -> CoreResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn idle_timeout(&self) -> Duration {
        Duration::from_millis(self.idle_timeout_ms.max(1))
    }

    /// Relay URLs that are enabled for reading or writing.
    pub fn active_relays(&self) -> Vec<String> {
        self.relays
            .iter()
            .filter(|(_, policy)| policy.read || policy.write)
            .map(|(url, _)| url.clone())
            .collect()
    }

    pub fn add_relay(&mut self, url: &str) {
        self.relays
            .insert(url.trim().to_string(), RelayPolicy::default());
    }

    pub fn remove_relay(&mut self, url: &str) -> bool {
        self.relays.remove(url).is_some()
    }

    pub fn follow(&mut self, key_hex: String) {
        self.following
            .entry(key_hex.clone())
            .or_insert(Follow {
                key: key_hex,
                name: String::new(),
            });
    }
}
