//! Run-at-login registration via the HKCU Run registry key.
//!
//! Enabling writes a `TaskbarGone` value under
//! `HKEY_CURRENT_USER\Software\Microsoft\Windows\CurrentVersion\Run`
//! holding the quoted executable path. Disabling deletes it. HKCU is
//! per-user, so no elevation is needed.

use taskbar_gone_core::PRODUCT_NAME;
use windows::Win32::Foundation::ERROR_FILE_NOT_FOUND;
use windows::Win32::System::Registry::{
    HKEY, HKEY_CURRENT_USER, KEY_SET_VALUE, REG_SAM_FLAGS, REG_SZ, RegCloseKey, RegDeleteValueW,
    RegOpenKeyExW, RegSetValueExW,
};
use windows::core::PCWSTR;

const RUN_KEY: &str = r"Software\Microsoft\Windows\CurrentVersion\Run";

/// Adds or removes the run-at-login entry.
pub fn set_enabled(enabled: bool) -> Result<(), String> {
    if enabled { enable() } else { disable() }
}

/// Registers the running executable to start at logon.
pub fn enable() -> Result<(), String> {
    let value = quoted_exe_path()?;
    with_run_key(KEY_SET_VALUE, |key| set_string_value(key, &value))
}

/// Removes the entry. A missing entry is not an error.
pub fn disable() -> Result<(), String> {
    with_run_key(KEY_SET_VALUE, delete_value)
}

fn quoted_exe_path() -> Result<String, String> {
    let exe = std::env::current_exe().map_err(|e| format!("could not resolve exe path: {e}"))?;
    Ok(format!("\"{}\"", exe.display()))
}

fn wide(s: &str) -> Vec<u16> {
    s.encode_utf16().chain(std::iter::once(0)).collect()
}

/// Opens the Run key, hands it to `f`, and always closes it again.
fn with_run_key<T>(
    access: REG_SAM_FLAGS,
    f: impl FnOnce(HKEY) -> Result<T, String>,
) -> Result<T, String> {
    let wide_key = wide(RUN_KEY);
    let mut key = HKEY::default();
    // SAFETY: RegOpenKeyExW gets a valid NUL-terminated path and a local
    // out-pointer; the key is closed below.
    let status = unsafe {
        RegOpenKeyExW(
            HKEY_CURRENT_USER,
            PCWSTR(wide_key.as_ptr()),
            None,
            access,
            &mut key,
        )
    };
    if status.is_err() {
        return Err(format!("could not open registry key: {status:?}"));
    }

    let result = f(key);
    // SAFETY: `key` was opened above and is not used afterwards.
    let _ = unsafe { RegCloseKey(key) };
    result
}

fn set_string_value(key: HKEY, value: &str) -> Result<(), String> {
    let wide_name = wide(PRODUCT_NAME);
    let wide_value = wide(value);
    let bytes: Vec<u8> = wide_value.iter().flat_map(|c| c.to_le_bytes()).collect();
    // SAFETY: REG_SZ data is the UTF-16 string including its terminator.
    let status =
        unsafe { RegSetValueExW(key, PCWSTR(wide_name.as_ptr()), None, REG_SZ, Some(&bytes)) };
    if status.is_err() {
        return Err(format!("could not write registry value: {status:?}"));
    }
    Ok(())
}

fn delete_value(key: HKEY) -> Result<(), String> {
    let wide_name = wide(PRODUCT_NAME);
    // SAFETY: RegDeleteValueW on a key we opened with KEY_SET_VALUE.
    let status = unsafe { RegDeleteValueW(key, PCWSTR(wide_name.as_ptr())) };
    if status.is_err() && status != ERROR_FILE_NOT_FOUND {
        return Err(format!("could not delete registry value: {status:?}"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wide_is_nul_terminated() {
        // Act
        let w = wide("Run");

        // Assert
        assert_eq!(w, vec![b'R' as u16, b'u' as u16, b'n' as u16, 0]);
    }

    #[test]
    fn exe_path_is_quoted() {
        let value = quoted_exe_path().unwrap();

        assert!(value.starts_with('"'));
        assert!(value.ends_with('"'));
    }
}
