use taskbar_gone_core::{PRODUCT_NAME, log_warn};
use windows::Win32::Foundation::HWND;
use windows::Win32::UI::Shell::{
    NIF_ICON, NIF_MESSAGE, NIF_TIP, NIM_ADD, NIM_DELETE, NOTIFYICONDATAW, Shell_NotifyIconW,
};
use windows::Win32::UI::WindowsAndMessaging::{IDI_APPLICATION, LoadIconW, WM_APP};

/// Callback message the shell posts to the main window for tray clicks.
/// The mouse message is in the low word of `lParam`.
pub const WM_TRAYICON: u32 = WM_APP + 1;

const TRAY_ID: u32 = 1;

/// The notification area icon, present only while the window is sent to
/// the tray.
pub struct TrayIcon {
    hwnd: HWND,
    visible: bool,
}

impl TrayIcon {
    pub fn new(hwnd: HWND) -> Self {
        Self {
            hwnd,
            visible: false,
        }
    }

    pub fn show(&mut self) {
        if self.visible {
            return;
        }
        let mut nid = self.data();
        nid.uFlags = NIF_MESSAGE | NIF_ICON | NIF_TIP;
        nid.uCallbackMessage = WM_TRAYICON;
        // SAFETY: IDI_APPLICATION is a stock icon; no module handle needed.
        nid.hIcon = unsafe { LoadIconW(None, IDI_APPLICATION) }.unwrap_or_default();
        copy_tip(&mut nid.szTip, PRODUCT_NAME);

        // SAFETY: `nid` is fully initialised and sized via `data()`.
        if unsafe { Shell_NotifyIconW(NIM_ADD, &nid) }.as_bool() {
            self.visible = true;
        } else {
            log_warn!("Could not add tray icon");
        }
    }

    pub fn hide(&mut self) {
        if !self.visible {
            return;
        }
        let nid = self.data();
        // SAFETY: deletes the icon we added with the same hWnd/uID pair.
        let _ = unsafe { Shell_NotifyIconW(NIM_DELETE, &nid) };
        self.visible = false;
    }

    fn data(&self) -> NOTIFYICONDATAW {
        NOTIFYICONDATAW {
            cbSize: std::mem::size_of::<NOTIFYICONDATAW>() as u32,
            hWnd: self.hwnd,
            uID: TRAY_ID,
            ..Default::default()
        }
    }
}

impl Drop for TrayIcon {
    fn drop(&mut self) {
        self.hide();
    }
}

/// Copies `text` into a fixed tooltip buffer, truncating and keeping the
/// terminating NUL.
fn copy_tip(buf: &mut [u16], text: &str) {
    let max = buf.len().saturating_sub(1);
    let mut len = 0;
    for (slot, unit) in buf.iter_mut().zip(text.encode_utf16().take(max)) {
        *slot = unit;
        len += 1;
    }
    if let Some(end) = buf.get_mut(len) {
        *end = 0;
    }
}
