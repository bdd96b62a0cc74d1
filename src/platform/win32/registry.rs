// ── Registry store ────────────────────────────────────────────────────────────
//
// `probe::ConfigStore` over `HKEY_LOCAL_MACHINE`, read-only.  Keys are closed
// when the `RegistryKey` is dropped.

#![allow(unsafe_code)]

use windows::{
    core::PCWSTR,
    Win32::{
        Foundation::ERROR_SUCCESS,
        System::Registry::{
            RegCloseKey, RegOpenKeyExW, RegQueryValueExW, HKEY, HKEY_LOCAL_MACHINE, KEY_READ,
            REG_EXPAND_SZ, REG_SZ, REG_VALUE_TYPE,
        },
    },
};

use super::wide;
use crate::probe::{ConfigStore, StoreKey};

/// Value buffer size in `WCHAR`s; registry paths and GUID strings fit easily.
const VALUE_BUF_LEN: usize = 512;

/// The local machine hive.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalMachine;

impl ConfigStore for LocalMachine {
    type Key = RegistryKey;

    fn open_key(&self, path: &str) -> Option<RegistryKey> {
        let path_w = wide(path);
        let mut hkey = HKEY::default();
        // SAFETY: path_w is a valid null-terminated UTF-16 string that outlives
        // the call; `hkey` is a live out-parameter.
        let status = unsafe {
            RegOpenKeyExW(HKEY_LOCAL_MACHINE, PCWSTR(path_w.as_ptr()), 0, KEY_READ, &mut hkey)
        };
        if status != ERROR_SUCCESS {
            return None;
        }
        Some(RegistryKey(hkey))
    }
}

/// RAII handle to an opened registry key.
pub struct RegistryKey(HKEY);

impl StoreKey for RegistryKey {
    fn string_value(&self, name: &str) -> Option<String> {
        let name_w = wide(name);
        let mut buf = [0u16; VALUE_BUF_LEN];
        let mut size = std::mem::size_of_val(&buf) as u32;
        let mut kind = REG_VALUE_TYPE::default();

        // SAFETY: self.0 is an open key owned by this struct; `buf` is
        // `size` bytes long and both outlive the call.
        let status = unsafe {
            RegQueryValueExW(
                self.0,
                PCWSTR(name_w.as_ptr()),
                None,
                Some(&mut kind as *mut _),
                Some(buf.as_mut_ptr().cast()),
                Some(&mut size as *mut _),
            )
        };
        if status != ERROR_SUCCESS || (kind != REG_SZ && kind != REG_EXPAND_SZ) {
            return None;
        }

        // `size` is in bytes and may or may not include the terminator.
        let units = (size as usize / 2).min(VALUE_BUF_LEN);
        let len = buf[..units].iter().position(|&c| c == 0).unwrap_or(units);
        Some(String::from_utf16_lossy(&buf[..len]))
    }
}

impl Drop for RegistryKey {
    fn drop(&mut self) {
        // SAFETY: the key was opened by RegOpenKeyExW and is closed exactly once.
        unsafe {
            let _ = RegCloseKey(self.0);
        }
    }
}
