// ── Configuration ─────────────────────────────────────────────────────────────
//
// Two layers:
//   • `ProbeConfig` – the registry root, resolved once at startup from the
//     process bit-width and handed to the probe explicitly.
//   • `BridgeConfig` – optional user settings read from
//     `%APPDATA%\VsBridge\config.json`.  Missing or unreadable files yield
//     defaults; nothing here is fatal.

use std::{
    fs, io,
    path::{Path, PathBuf},
    time::Duration,
};

use serde::{Deserialize, Serialize};

// ── Registry root ─────────────────────────────────────────────────────────────

/// Vendor root used by 64-bit processes and WOW64-hosted 32-bit processes.
pub const REGISTRY_ROOT_NATIVE: &str = r"SOFTWARE\Microsoft";

/// Vendor root used by 32-bit processes on a 32-bit host.
pub const REGISTRY_ROOT_WOW6432: &str = r"SOFTWARE\Wow6432Node\Microsoft";

/// Where the version probe looks for installed editors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeConfig {
    /// Key path below `HKEY_LOCAL_MACHINE`, without a trailing separator.
    pub registry_root: String,
}

impl ProbeConfig {
    pub fn new(registry_root: impl Into<String>) -> Self {
        Self {
            registry_root: registry_root.into(),
        }
    }

    /// Pick the registry root from the bit-width of the running process.
    pub fn detect() -> Self {
        Self::for_bitness(is_64bit_process())
    }

    pub fn for_bitness(is_64bit: bool) -> Self {
        if is_64bit {
            Self::new(REGISTRY_ROOT_NATIVE)
        } else {
            Self::new(REGISTRY_ROOT_WOW6432)
        }
    }
}

#[cfg(windows)]
fn is_64bit_process() -> bool {
    cfg!(target_pointer_width = "64") || crate::platform::win32::process::is_wow64()
}

#[cfg(not(windows))]
fn is_64bit_process() -> bool {
    cfg!(target_pointer_width = "64")
}

// ── Readiness wait ────────────────────────────────────────────────────────────

/// Default interval between "is the IDE ready yet" polls.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Default ceiling on the readiness wait after launching an IDE.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Shortest interval the readiness wait will actually sleep for.
pub const MIN_POLL_INTERVAL: Duration = Duration::from_millis(1);

/// Bounded polling schedule used after launching a new session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitPolicy {
    pub poll_interval: Duration,
    pub timeout: Duration,
}

impl Default for WaitPolicy {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

// ── On-disk settings ──────────────────────────────────────────────────────────

const CONFIG_VERSION: u32 = 1;

/// Root of the JSON settings file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgeConfig {
    pub version: u32,
    /// Overrides the bit-width detected registry root when set.
    #[serde(default)]
    pub registry_root: Option<String>,
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Editor label used by `open` when none is given on the command line.
    #[serde(default)]
    pub default_editor: Option<String>,
}

fn default_poll_interval_ms() -> u64 {
    DEFAULT_POLL_INTERVAL.as_millis() as u64
}

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT.as_millis() as u64
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            registry_root: None,
            poll_interval_ms: default_poll_interval_ms(),
            timeout_ms: default_timeout_ms(),
            default_editor: None,
        }
    }
}

impl BridgeConfig {
    pub fn wait_policy(&self) -> WaitPolicy {
        WaitPolicy {
            poll_interval: Duration::from_millis(self.poll_interval_ms).max(MIN_POLL_INTERVAL),
            timeout: Duration::from_millis(self.timeout_ms),
        }
    }

    pub fn probe_config(&self) -> ProbeConfig {
        match &self.registry_root {
            Some(root) => ProbeConfig::new(root.trim_end_matches('\\')),
            None => ProbeConfig::detect(),
        }
    }
}

// ── Path ──────────────────────────────────────────────────────────────────────

/// Return the path to the settings file: `%APPDATA%\VsBridge\config.json`.
///
/// Returns `None` if the `APPDATA` environment variable is not set.
pub fn config_path() -> Option<PathBuf> {
    let appdata = std::env::var_os("APPDATA")?;
    let mut p = PathBuf::from(appdata);
    p.push("VsBridge");
    p.push("config.json");
    Some(p)
}

// ── Load / save ───────────────────────────────────────────────────────────────

/// Read the settings file from its default location.
///
/// Returns `None` on any error: variable unset, file missing, JSON parse
/// failure, or an unrecognised version number.
pub fn load() -> Option<BridgeConfig> {
    load_from(&config_path()?)
}

pub fn load_from(path: &Path) -> Option<BridgeConfig> {
    let data = fs::read(path).ok()?;
    let cfg: BridgeConfig = match serde_json::from_slice(&data) {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable config");
            return None;
        }
    };
    if cfg.version != CONFIG_VERSION {
        tracing::warn!(version = cfg.version, "ignoring config with unknown version");
        return None;
    }
    Some(cfg)
}

/// Write `cfg` to `path`, creating the parent directory if needed.
pub fn save_to(path: &Path, cfg: &BridgeConfig) -> io::Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let file = fs::File::create(path)?;
    serde_json::to_writer_pretty(file, cfg).map_err(io::Error::other)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
