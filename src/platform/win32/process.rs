#![allow(unsafe_code)]

use windows::Win32::{
    Foundation::BOOL,
    System::Threading::{GetCurrentProcess, IsWow64Process},
};

/// `true` when this 32-bit process runs under WOW64 on a 64-bit host.
/// Falls back to `false` when the query fails.
pub(crate) fn is_wow64() -> bool {
    let mut wow64 = BOOL::default();
    // SAFETY: GetCurrentProcess returns a pseudo-handle that is always valid
    // for the calling process; `wow64` is a live out-parameter.
    let ok = unsafe { IsWow64Process(GetCurrentProcess(), &mut wow64) };
    ok.is_ok() && wow64.as_bool()
}
