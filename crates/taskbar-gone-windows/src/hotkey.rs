use taskbar_gone_core::{HOTKEY_ID, Hotkey, Modifier, WindowResult, log_debug};
use windows::Win32::Foundation::HWND;
use windows::Win32::UI::Input::KeyboardAndMouse::{
    HOT_KEY_MODIFIERS, MOD_ALT, MOD_CONTROL, MOD_NOREPEAT, MOD_SHIFT, MOD_WIN, RegisterHotKey,
    UnregisterHotKey,
};

use crate::keys;

/// The application's one global hotkey.
///
/// Bound to slot [`HOTKEY_ID`] of a window (or of the calling thread when
/// no window is given), so `WM_HOTKEY` arrives through that thread's
/// message pump. Re-registering releases the previous combination first,
/// and dropping the registration releases it too. Drop it before the
/// owning window is destroyed.
pub struct HotkeyRegistration {
    hwnd: Option<HWND>,
    active: Option<Hotkey>,
}

impl HotkeyRegistration {
    pub fn new(hwnd: Option<HWND>) -> Self {
        Self { hwnd, active: None }
    }

    /// The combination currently held, if any.
    pub fn active(&self) -> Option<&Hotkey> {
        self.active.as_ref()
    }

    /// Registers `hotkey`, replacing whatever this registration held.
    pub fn register(&mut self, hotkey: &Hotkey) -> WindowResult<()> {
        self.unregister();

        let vk = keys::vk_from_name(&hotkey.key)
            .ok_or_else(|| format!("no virtual key for {:?}", hotkey.key))?;
        let modifiers = hotkey
            .modifiers
            .iter()
            .fold(MOD_NOREPEAT, |flags, m| flags | modifier_to_flag(*m));

        // SAFETY: RegisterHotKey only records the combination against our
        // window or thread; it fails if another process already owns it.
        unsafe { RegisterHotKey(self.hwnd, HOTKEY_ID, modifiers, vk)? };

        log_debug!("Registered hotkey {hotkey} (vk=0x{vk:02X})");
        self.active = Some(hotkey.clone());
        Ok(())
    }

    /// Releases the hotkey. Calling it with nothing registered is fine.
    pub fn unregister(&mut self) {
        if let Some(hotkey) = self.active.take() {
            // SAFETY: UnregisterHotKey removes our own registration.
            let _ = unsafe { UnregisterHotKey(self.hwnd, HOTKEY_ID) };
            log_debug!("Unregistered hotkey {hotkey}");
        }
    }
}

impl Drop for HotkeyRegistration {
    fn drop(&mut self) {
        self.unregister();
    }
}

/// Converts a platform-agnostic modifier to a Win32 hotkey flag.
fn modifier_to_flag(modifier: Modifier) -> HOT_KEY_MODIFIERS {
    match modifier {
        Modifier::Alt => MOD_ALT,
        Modifier::Ctrl => MOD_CONTROL,
        Modifier::Shift => MOD_SHIFT,
        Modifier::Win => MOD_WIN,
    }
}
