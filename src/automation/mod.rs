//! Capability surface required of an out-of-process IDE session.
//!
//! The locator and navigation layers only ever see these traits; the COM
//! implementation lives in `platform::win32::dte` and never leaks outward.
//! Any automation host that can answer these calls is a valid substitute.

use std::fmt;

use thiserror::Error;
use uuid::Uuid;

#[cfg(test)]
pub(crate) mod fake;

// ── Errors ────────────────────────────────────────────────────────────────────

/// Why a single automation call failed. Always recoverable; callers log it
/// and degrade.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AutomationError {
    #[error("automation is unavailable: {0}")]
    Unavailable(&'static str),

    #[error("{operation} failed (HRESULT {code:#010x})")]
    Call { operation: &'static str, code: u32 },

    #[error("session has no active document")]
    NoActiveDocument,
}

pub type AutomationResult<T> = std::result::Result<T, AutomationError>;

// ── Class identifier ──────────────────────────────────────────────────────────

/// Concrete automation class identifier resolved from registry text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClassId(Uuid);

impl ClassId {
    /// Accepts braced (`{xxxxxxxx-...}`) or bare hyphenated text.
    pub fn parse(text: &str) -> Option<Self> {
        Uuid::parse_str(text.trim()).ok().map(Self)
    }

    pub fn as_u128(&self) -> u128 {
        self.0.as_u128()
    }
}

impl fmt::Display for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}", self.0.hyphenated().encode_upper(&mut Uuid::encode_buffer()))
    }
}

// ── Views and handles ─────────────────────────────────────────────────────────

/// Which view a document is opened in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Primary,
}

impl ViewKind {
    /// Vendor identifier text for the view kind.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Primary => "{00000000-0000-0000-0000-000000000000}",
        }
    }
}

/// Opaque native window handle as reported by the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NativeHandle(pub isize);

// ── Capabilities ──────────────────────────────────────────────────────────────

/// The session's top-level window.
pub trait MainWindow {
    fn activate(&self) -> AutomationResult<()>;
    fn native_handle(&self) -> AutomationResult<NativeHandle>;
}

/// One live IDE instance. Dropping it releases the underlying reference.
pub trait Session {
    type Window: MainWindow;

    /// Full path of the workspace (solution) currently loaded.
    fn workspace_path(&self) -> AutomationResult<String>;
    fn open_workspace(&self, path: &str) -> AutomationResult<()>;
    fn set_user_visible(&self, visible: bool) -> AutomationResult<()>;
    fn main_window(&self) -> AutomationResult<Self::Window>;
    fn open_document(&self, path: &str, view: ViewKind) -> AutomationResult<()>;
    /// Move the active document's selection to `line` (1-based).
    fn goto_line(&self, line: u32) -> AutomationResult<()>;
}

/// Process-wide access to running and new sessions.
pub trait SessionHost {
    type Session: Session;

    /// Registered live objects of class `class`, in table order.
    fn running_sessions(&self, class: &ClassId) -> AutomationResult<Vec<Self::Session>>;
    /// Start a new out-of-process instance of `class`.
    fn create_instance(&self, class: &ClassId) -> AutomationResult<Self::Session>;
    /// Bring a native window to the foreground. Best effort.
    fn set_foreground(&self, handle: NativeHandle) -> bool;
}

// ── Tests ─────────────────────────────────────────────────────────────────────
