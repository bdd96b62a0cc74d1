// ── Platform abstraction layer ────────────────────────────────────────────────
//
// The rest of the codebase talks to the OS through the `probe::ConfigStore`
// and `automation::SessionHost` traits.  No `unsafe` lives here; all Win32 and
// COM FFI is confined to the `win32` sub-module and never leaks outward.

#[cfg(windows)]
pub mod win32;
