use windows::Win32::Foundation::HWND;
use windows::Win32::UI::WindowsAndMessaging::{MB_ICONERROR, MB_OK, MessageBoxW};
use windows::core::HSTRING;

/// Shows a blocking error box owned by `owner` (or the desktop).
///
/// The box runs its own message loop; anything the main window receives
/// meanwhile is queued as a command and handled after it closes.
pub fn show_error(owner: Option<HWND>, title: &str, message: &str) {
    // SAFETY: both strings outlive the modal call.
    unsafe {
        MessageBoxW(
            owner,
            &HSTRING::from(message),
            &HSTRING::from(title),
            MB_OK | MB_ICONERROR,
        );
    }
}
