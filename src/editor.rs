// ── Editor registry ───────────────────────────────────────────────────────────
//
// Snapshot of installed Visual Studio versions taken once at construction,
// and the per-version editor handle used to navigate to source lines.

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use crate::{
    automation::{ClassId, SessionHost},
    config::{ProbeConfig, WaitPolicy},
    error::{BridgeError, Result},
    locator, navigation,
    probe::{self, ConfigStore, InstalledVersionInfo},
    render::{model::windows_path, SolutionDescriptor},
    version::VisualStudioVersion,
};

/// Installed editors keyed by display label. Never refreshed after creation.
#[derive(Debug, Clone)]
pub struct EditorRegistry {
    versions: BTreeMap<String, InstalledVersionInfo>,
    wait: WaitPolicy,
}

impl EditorRegistry {
    /// Probe `store` for installed versions.
    pub fn new<S: ConfigStore>(store: &S, config: &ProbeConfig, wait: WaitPolicy) -> Self {
        Self::from_versions(probe::list_installed_versions(store, config), wait)
    }

    pub fn from_versions(versions: BTreeMap<String, InstalledVersionInfo>, wait: WaitPolicy) -> Self {
        Self { versions, wait }
    }

    /// Labels of every installed editor, sorted.
    pub fn available_editors(&self) -> Vec<&str> {
        self.versions.keys().map(String::as_str).collect()
    }

    pub fn create(&self, label: &str) -> Option<VsEditor> {
        let info = self.versions.get(label)?;
        Some(VsEditor {
            version: info.version,
            executable_path: info.executable_path.clone(),
            class_id: info.class_id.clone(),
            wait: self.wait,
        })
    }

    /// Like [`create`](Self::create) but reports a miss as an error, for
    /// callers that need to tell the user which label was wrong.
    pub fn require(&self, label: &str) -> Result<VsEditor> {
        self.create(label)
            .ok_or_else(|| BridgeError::UnknownEditor(label.to_owned()))
    }

    /// Newest installed editor. Labels sort by release year.
    pub fn newest(&self) -> Option<VsEditor> {
        let label = self.versions.keys().next_back()?;
        self.create(label)
    }

    /// Pick the editor for a navigation request.
    ///
    /// An `explicit` label must be installed. A `configured` label that is no
    /// longer installed falls back to the newest editor, as does no label at
    /// all. `Ok(None)` means nothing is installed.
    pub fn select(&self, explicit: Option<&str>, configured: Option<&str>) -> Result<Option<VsEditor>> {
        if let Some(label) = explicit {
            return self.require(label).map(Some);
        }
        if let Some(label) = configured {
            match self.create(label) {
                Some(editor) => return Ok(Some(editor)),
                None => tracing::warn!(label, "configured editor is not installed"),
            }
        }
        Ok(self.newest())
    }
}

/// Handle bound to one installed Visual Studio version.
#[derive(Debug, Clone)]
pub struct VsEditor {
    version: VisualStudioVersion,
    executable_path: PathBuf,
    class_id: String,
    wait: WaitPolicy,
}

impl VsEditor {
    pub fn version(&self) -> VisualStudioVersion {
        self.version
    }

    pub fn executable_path(&self) -> &Path {
        &self.executable_path
    }

    /// Open `file` at `line` in a session that has `workspace` loaded,
    /// launching one if necessary.
    ///
    /// Best effort: returns `false` when the class identifier is unusable,
    /// no session could be obtained, or the file could not be opened.
    pub fn open_file<H: SessionHost>(&self, host: &H, workspace: &Path, file: &Path, line: u32) -> bool {
        let Some(class) = ClassId::parse(&self.class_id) else {
            tracing::debug!(class_id = %self.class_id, "unusable class identifier");
            return false;
        };

        let workspace = windows_path(workspace);
        let Some(session) = locator::find_or_open(host, &class, &workspace, &self.wait) else {
            tracing::debug!(%workspace, "no editor session");
            return false;
        };

        navigation::open_file(host, &session, &windows_path(file), line)
    }

    /// Regenerate the solution inside a live session.
    pub fn sync_solution(&self, solution: &SolutionDescriptor, output: &Path) -> Result<()> {
        tracing::debug!(solution = %solution.name, output = %output.display(), "solution sync requested");
        Err(BridgeError::NotSupported("solution sync"))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        automation::fake::{FakeHost, FakeSession},
        probe::tests::{store_with_vs2013, MemoryStore, VS2013_CLSID},
    };
    use std::time::Duration;

    const SLN: &str = r"C:\Game\MyGame.sln";

    fn wait() -> WaitPolicy {
        WaitPolicy {
            poll_interval: Duration::from_millis(1),
            timeout: Duration::from_millis(10),
        }
    }

    fn registry() -> EditorRegistry {
        EditorRegistry::new(&store_with_vs2013(), &ProbeConfig::for_bitness(true), wait())
    }

    fn class() -> ClassId {
        ClassId::parse(VS2013_CLSID).unwrap()
    }

    #[test]
    fn lists_probed_editors() {
        assert_eq!(registry().available_editors(), ["Visual Studio 2013"]);
    }

    #[test]
    fn empty_store_has_no_editors() {
        let reg = EditorRegistry::new(&MemoryStore::default(), &ProbeConfig::for_bitness(true), wait());
        assert!(reg.available_editors().is_empty());
        assert!(reg.create("Visual Studio 2013").is_none());
    }

    #[test]
    fn create_binds_version_metadata() {
        let editor = registry().create("Visual Studio 2013").expect("editor");
        assert_eq!(editor.version(), VisualStudioVersion::Vs2013);
        assert_eq!(editor.executable_path(), Path::new(r"C:\VS12\Common7\IDE\devenv.exe"));
    }

    fn registry_with_two_versions() -> EditorRegistry {
        let store = store_with_vs2013().with_key(
            r"SOFTWARE\Microsoft\VisualStudio\10.0",
            &[
                ("InstallDir", r"C:\VS10\Common7\IDE"),
                ("ThisVersionDTECLSID", "{656D8328-93F5-41A7-A48C-B42858161F25}"),
            ],
        );
        EditorRegistry::new(&store, &ProbeConfig::for_bitness(true), wait())
    }

    #[test]
    fn explicit_label_wins() {
        let reg = registry_with_two_versions();
        let editor = reg
            .select(Some("Visual Studio 2010"), Some("Visual Studio 2013"))
            .unwrap()
            .expect("editor");
        assert_eq!(editor.version(), VisualStudioVersion::Vs2010);
    }

    #[test]
    fn missing_explicit_label_is_an_error() {
        let reg = registry_with_two_versions();
        assert!(matches!(
            reg.select(Some("Visual Studio 2015"), Some("Visual Studio 2010")),
            Err(BridgeError::UnknownEditor(label)) if label == "Visual Studio 2015"
        ));
    }

    #[test]
    fn configured_label_used_without_explicit() {
        let reg = registry_with_two_versions();
        let editor = reg.select(None, Some("Visual Studio 2010")).unwrap().expect("editor");
        assert_eq!(editor.version(), VisualStudioVersion::Vs2010);
    }

    #[test]
    fn stale_configured_label_falls_back_to_newest() {
        let reg = registry_with_two_versions();
        let editor = reg.select(None, Some("Visual Studio 2008")).unwrap().expect("editor");
        assert_eq!(editor.version(), VisualStudioVersion::Vs2013);
    }

    #[test]
    fn no_label_selects_newest() {
        let reg = registry_with_two_versions();
        let editor = reg.select(None, None).unwrap().expect("editor");
        assert_eq!(editor.version(), VisualStudioVersion::Vs2013);
    }

    #[test]
    fn nothing_installed_selects_nothing() {
        let reg = EditorRegistry::new(&MemoryStore::default(), &ProbeConfig::for_bitness(true), wait());
        assert!(reg.select(None, Some("Visual Studio 2013")).unwrap().is_none());
    }

    #[test]
    fn unknown_label_misses() {
        let reg = registry();
        assert!(reg.create("Visual Studio 2015").is_none());
        assert!(matches!(
            reg.require("Visual Studio 2015"),
            Err(BridgeError::UnknownEditor(label)) if label == "Visual Studio 2015"
        ));
    }

    #[test]
    fn open_file_reuses_running_session() {
        let running = FakeSession::ready(SLN);
        let host = FakeHost {
            running: vec![(class(), running.clone())],
            ..FakeHost::default()
        };
        let editor = registry().create("Visual Studio 2013").unwrap();
        assert!(editor.open_file(&host, Path::new(SLN), Path::new(r"C:\Game\Player.cs"), 12));

        let st = running.state.borrow();
        assert_eq!(st.opened_documents, [r"C:\Game\Player.cs"]);
        assert_eq!(st.goto_lines, [12]);
        assert_eq!(*host.launches.borrow(), 0);
    }

    #[test]
    fn open_file_without_session_is_false() {
        let host = FakeHost::default();
        let editor = registry().create("Visual Studio 2013").unwrap();
        assert!(!editor.open_file(&host, Path::new(SLN), Path::new("a.cs"), 1));
    }

    #[test]
    fn bad_class_id_is_false_without_touching_host() {
        let store = MemoryStore::default().with_key(
            r"SOFTWARE\Microsoft\VisualStudio\12.0",
            &[(probe::INSTALL_DIR_VALUE, r"C:\VS12\")],
        );
        let reg = EditorRegistry::new(&store, &ProbeConfig::for_bitness(true), wait());
        let host = FakeHost {
            launch: Some(FakeSession::ready(SLN)),
            ..FakeHost::default()
        };
        let editor = reg.create("Visual Studio 2013").unwrap();
        assert!(!editor.open_file(&host, Path::new(SLN), Path::new("a.cs"), 1));
        assert_eq!(*host.launches.borrow(), 0);
    }

    #[test]
    fn sync_solution_is_not_supported() {
        let editor = registry().create("Visual Studio 2013").unwrap();
        let result = editor.sync_solution(&SolutionDescriptor::default(), Path::new("out"));
        assert!(matches!(result, Err(BridgeError::NotSupported(_))));
    }
}
