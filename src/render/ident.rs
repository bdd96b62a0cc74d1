// ── Derived identifiers ───────────────────────────────────────────────────────
//
// Solution and project files need GUIDs.  Random ones would make every
// regeneration a diff, so they are derived from the name instead: MD5 over
// the UTF-16LE code units of a namespaced name, shown as 8-4-4-4-12 lowercase
// hex groups.

use std::fmt;

use md5::{Digest, Md5};
use uuid::Uuid;

const SOLUTION_PREFIX: &str = "SLN_";
const PROJECT_PREFIX: &str = "PRJ_";

/// A name-derived, GUID-shaped identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DerivedId(Uuid);

impl DerivedId {
    /// Hash `namespaced` as-is. Prefer [`solution_id`] / [`project_id`].
    pub fn derive(namespaced: &str) -> Self {
        let mut hasher = Md5::new();
        for unit in namespaced.encode_utf16() {
            hasher.update(unit.to_le_bytes());
        }
        let mut bytes = [0u8; 16];
        bytes.copy_from_slice(&hasher.finalize());
        Self(Uuid::from_bytes(bytes))
    }
}

impl fmt::Display for DerivedId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0.hyphenated(), f)
    }
}

pub fn solution_id(solution_name: &str) -> DerivedId {
    DerivedId::derive(&format!("{SOLUTION_PREFIX}{solution_name}"))
}

pub fn project_id(project_name: &str) -> DerivedId {
    DerivedId::derive(&format!("{PROJECT_PREFIX}{project_name}"))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
