// ── Central error type ────────────────────────────────────────────────────────
//
// Hard failures only: file I/O, model parsing, unknown CLI arguments.
// Editor discovery and navigation never produce a `BridgeError`; they degrade
// to `None` / `false` and log the reason (see `locator` and `navigation`).

use thiserror::Error;

/// Every hard error that vsbridge can produce.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// A Win32 API call returned a failure code.
    #[error("{function} failed (error {code:#010x})")]
    Win32 {
        /// The name of the failing function, for display purposes.
        function: &'static str,
        /// The raw Win32 error code or HRESULT bits.
        code: u32,
    },

    /// A standard I/O error (model read, descriptor write, …).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The solution model or configuration file is not valid JSON.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// No installed editor carries this label.
    #[error("no installed editor named {0:?}")]
    UnknownEditor(String),

    /// The version tag is not one of the known Visual Studio versions.
    #[error("unknown Visual Studio version {0:?}")]
    UnknownVersion(String),

    /// The solution model has no project with this name.
    #[error("solution has no project named {0:?}")]
    UnknownProject(String),

    /// The operation exists on the API surface but has no implementation.
    #[error("{0} is not supported")]
    NotSupported(&'static str),
}

// Convert a windows-crate error (HRESULT) directly into a BridgeError so that
// `?` can be used on `windows::core::Result<T>` in the platform module.
#[cfg(windows)]
impl From<windows::core::Error> for BridgeError {
    fn from(e: windows::core::Error) -> Self {
        // Win32 errors appear as 0x8007xxxx HRESULTs.
        Self::Win32 {
            function: "windows",
            code: e.code().0 as u32,
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, BridgeError>;
