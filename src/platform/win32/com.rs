#![allow(unsafe_code)]

use windows::Win32::System::Com::{CoInitializeEx, CoUninitialize, COINIT_APARTMENTTHREADED};

use crate::error::{BridgeError, Result};

/// RAII guard for a single-threaded COM apartment on the current thread.
///
/// Every COM interface obtained while the guard is alive must be released
/// before it drops.
pub struct ComApartment {
    _not_send: std::marker::PhantomData<*const ()>,
}

impl ComApartment {
    pub fn init() -> Result<Self> {
        // SAFETY: no reserved pointer; paired with CoUninitialize in Drop on
        // the same thread (the guard is !Send).
        let hr = unsafe { CoInitializeEx(None, COINIT_APARTMENTTHREADED) };
        if hr.is_err() {
            return Err(BridgeError::Win32 {
                function: "CoInitializeEx",
                code: hr.0 as u32,
            });
        }
        Ok(Self {
            _not_send: std::marker::PhantomData,
        })
    }
}

impl Drop for ComApartment {
    fn drop(&mut self) {
        // SAFETY: balances the successful CoInitializeEx in `init`.
        unsafe { CoUninitialize() };
    }
}
