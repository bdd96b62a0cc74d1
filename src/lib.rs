//! Visual Studio integration for external tools.
//!
//! * Discover installed Visual Studio versions ([`probe`], [`editor`]).
//! * Open a file at a line in a live IDE session, reusing one that already
//!   has the workspace loaded or launching a new one ([`locator`],
//!   [`navigation`]).
//! * Render deterministic `.sln` / `.csproj` text from an in-memory project
//!   model ([`render`]).
//!
//! Discovery and navigation are best effort: failures degrade to `None` or
//! `false` and are logged through `tracing`, never raised.

// ── Safety policy ────────────────────────────────────────────────────────────
// Unsafe code is forbidden everywhere except `platform::win32` (Win32 / COM
// FFI).  Each unsafe block in that module MUST carry a `// SAFETY:` comment.
#![deny(unsafe_code)]

pub mod automation;
pub mod config;
pub mod editor;
pub mod error;
pub mod locator;
pub mod navigation;
pub mod platform;
pub mod probe;
pub mod render;
pub mod version;

pub use editor::{EditorRegistry, VsEditor};
pub use error::{BridgeError, Result};
pub use version::VisualStudioVersion;
