use taskbar_gone_core::{Command, OptionItem, SettingsData, ToggleState, WindowResult};
use windows::Win32::Foundation::{HWND, POINT};
use windows::Win32::UI::WindowsAndMessaging::{
    AppendMenuW, CheckMenuItem, CreateMenu, CreatePopupMenu, DestroyMenu, DrawMenuBar, GetCursorPos,
    GetMenu, HMENU, MF_BYCOMMAND, MF_CHECKED, MF_POPUP, MF_SEPARATOR, MF_STRING, MF_UNCHECKED,
    PostMessageW, SetForegroundWindow, SetMenu, TPM_BOTTOMALIGN, TPM_RIGHTBUTTON, TrackPopupMenu,
    WM_NULL,
};
use windows::core::{HSTRING, PCWSTR};

fn id(command: Command) -> usize {
    command.menu_id().map_or(0, usize::from)
}

fn append(menu: HMENU, command: Command, label: &str) -> WindowResult<()> {
    // SAFETY: `menu` is a live menu we created; the label outlives the call.
    unsafe { AppendMenuW(menu, MF_STRING, id(command), &HSTRING::from(label))? };
    Ok(())
}

fn separator(menu: HMENU) -> WindowResult<()> {
    // SAFETY: separators carry no id or text.
    unsafe { AppendMenuW(menu, MF_SEPARATOR, 0, PCWSTR::null())? };
    Ok(())
}

/// Builds the File and Options menus and attaches them to `hwnd`.
pub fn attach_menu_bar(hwnd: HWND) -> WindowResult<()> {
    // SAFETY: the menus are handed to the window with SetMenu, which
    // takes ownership and destroys them together with the window.
    unsafe {
        let file = CreatePopupMenu()?;
        append(file, Command::MinimizeToTray, "&Minimize to tray")?;
        separator(file)?;
        append(file, Command::Exit, "E&xit")?;

        let options = CreatePopupMenu()?;
        for item in OptionItem::ALL {
            append(options, Command::ToggleOption(item), item.label())?;
        }

        let bar = CreateMenu()?;
        AppendMenuW(bar, MF_POPUP, file.0 as usize, &HSTRING::from("&File"))?;
        AppendMenuW(bar, MF_POPUP, options.0 as usize, &HSTRING::from("&Options"))?;
        SetMenu(hwnd, Some(bar))?;
    }
    Ok(())
}

/// Updates the Options check marks from the settings.
pub fn sync_checks(hwnd: HWND, settings: &SettingsData) {
    // SAFETY: GetMenu returns the bar attached in `attach_menu_bar`, or
    // null, in which case CheckMenuItem simply fails.
    unsafe {
        let bar = GetMenu(hwnd);
        for item in OptionItem::ALL {
            let check = if settings.option(item) {
                MF_CHECKED
            } else {
                MF_UNCHECKED
            };
            let _ = CheckMenuItem(
                bar,
                id(Command::ToggleOption(item)) as u32,
                (MF_BYCOMMAND | check).0,
            );
        }
        let _ = DrawMenuBar(hwnd);
    }
}

/// Shows the tray context menu at the cursor.
///
/// The chosen entry arrives as an ordinary `WM_COMMAND`.
pub fn show_tray_menu(hwnd: HWND, state: ToggleState) -> WindowResult<()> {
    // SAFETY: the popup lives only for this call and is destroyed below.
    unsafe {
        let menu = CreatePopupMenu()?;
        append(menu, Command::RestoreWindow, "&Show window")?;
        append(menu, Command::ToggleTaskbar, state.menu_label())?;
        separator(menu)?;
        append(menu, Command::Exit, "E&xit")?;

        let mut pt = POINT::default();
        let _ = GetCursorPos(&mut pt);

        // The popup only dismisses on outside clicks when our window is
        // in the foreground, and needs a follow-up message afterwards.
        let _ = SetForegroundWindow(hwnd);
        let _ = TrackPopupMenu(
            menu,
            TPM_RIGHTBUTTON | TPM_BOTTOMALIGN,
            pt.x,
            pt.y,
            None,
            hwnd,
            None,
        );
        let _ = PostMessageW(Some(hwnd), WM_NULL, Default::default(), Default::default());
        DestroyMenu(menu)?;
    }
    Ok(())
}
