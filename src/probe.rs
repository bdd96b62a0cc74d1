// ── Installed version probe ───────────────────────────────────────────────────
//
// Walks the static version table and asks a hierarchical key/value store
// (the registry on Windows) which of those versions are installed.  Absence
// at any level silently drops the version; nothing here returns an error.

use std::{collections::BTreeMap, path::PathBuf};

use crate::{config::ProbeConfig, version::VisualStudioVersion};

/// Registry value holding the IDE install directory (with trailing `\`).
pub const INSTALL_DIR_VALUE: &str = "InstallDir";

/// Registry value holding the automation class identifier of this version.
pub const CLASS_ID_VALUE: &str = "ThisVersionDTECLSID";

// ── Store abstraction ─────────────────────────────────────────────────────────

/// Read-only access to a hierarchical configuration namespace.
pub trait ConfigStore {
    type Key: StoreKey;

    /// Open `path` for reading. `None` when the key does not exist or cannot
    /// be opened.
    fn open_key(&self, path: &str) -> Option<Self::Key>;
}

/// An opened key; closed when dropped.
pub trait StoreKey {
    /// Read a string value. `None` when absent or not a string.
    fn string_value(&self, name: &str) -> Option<String>;
}

// ── Result record ─────────────────────────────────────────────────────────────

/// Launch metadata for one installed Visual Studio.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstalledVersionInfo {
    pub version: VisualStudioVersion,
    pub label: String,
    pub executable_path: PathBuf,
    /// Class identifier text as stored, e.g. `{1A5AC6AE-...}`. May be empty.
    pub class_id: String,
}

// ── Probe ─────────────────────────────────────────────────────────────────────

/// Enumerate installed versions, keyed by display label.
pub fn list_installed_versions<S: ConfigStore>(
    store: &S,
    config: &ProbeConfig,
) -> BTreeMap<String, InstalledVersionInfo> {
    let mut found = BTreeMap::new();

    for version in VisualStudioVersion::ALL {
        let meta = version.metadata();
        let key_path = format!("{}\\{}", config.registry_root, meta.registry_key);

        let Some(key) = store.open_key(&key_path) else {
            tracing::debug!(%version, key = %key_path, "registry key absent");
            continue;
        };

        let install_dir = key.string_value(INSTALL_DIR_VALUE).unwrap_or_default();
        if install_dir.is_empty() {
            tracing::debug!(%version, "no install directory recorded");
            continue;
        }

        let class_id = key.string_value(CLASS_ID_VALUE).unwrap_or_default();

        let info = InstalledVersionInfo {
            version,
            label: meta.display_name.to_owned(),
            executable_path: executable_path(&install_dir, meta.executable),
            class_id,
        };
        tracing::debug!(label = %info.label, exe = %info.executable_path.display(), "found installed version");
        found.insert(info.label.clone(), info);
    }

    found
}

/// `InstallDir` normally ends in a separator; add one when it does not.
fn executable_path(install_dir: &str, executable: &str) -> PathBuf {
    let mut path = install_dir.to_owned();
    if !path.ends_with(['\\', '/']) {
        path.push('\\');
    }
    path.push_str(executable);
    PathBuf::from(path)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
