use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use super::*;
use crate::WindowResult;

const TASKBAR: usize = 0x10;
const START: usize = 0x20;

/// One recorded `place` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Placement {
    hwnd: usize,
    x: i32,
    y: i32,
    state: ToggleState,
}

/// In-memory shell: windows are just rects keyed by handle.
#[derive(Default)]
struct FakeShell {
    taskbar: Cell<Option<usize>>,
    start_button: Cell<Option<usize>>,
    rects: RefCell<HashMap<usize, Rect>>,
    placements: RefCell<Vec<Placement>>,
    repaints: RefCell<Vec<usize>>,
    rect_queries: Cell<usize>,
    refuse_moves: Cell<bool>,
}

impl FakeShell {
    fn with_taskbar(rect: Rect) -> Self {
        let shell = Self::default();
        shell.taskbar.set(Some(TASKBAR));
        shell.rects.borrow_mut().insert(TASKBAR, rect);
        shell
    }

    fn with_start_button(self, rect: Rect) -> Self {
        self.start_button.set(Some(START));
        self.rects.borrow_mut().insert(START, rect);
        self
    }

    fn rect_of(&self, hwnd: usize) -> Rect {
        self.rects.borrow()[&hwnd]
    }
}

impl ShellWindows for FakeShell {
    fn find_taskbar(&self) -> Option<usize> {
        self.taskbar.get()
    }

    fn find_start_button(&self) -> Option<usize> {
        self.start_button.get()
    }

    fn window_rect(&self, hwnd: usize) -> WindowResult<Rect> {
        self.rect_queries.set(self.rect_queries.get() + 1);
        self.rects
            .borrow()
            .get(&hwnd)
            .copied()
            .ok_or_else(|| "invalid window handle".into())
    }

    fn place(&self, hwnd: usize, x: i32, y: i32, state: ToggleState) -> WindowResult<()> {
        if self.refuse_moves.get() {
            return Err("access denied".into());
        }
        self.placements.borrow_mut().push(Placement { hwnd, x, y, state });
        if let Some(rect) = self.rects.borrow_mut().get_mut(&hwnd) {
            let (w, h) = (rect.right - rect.left, rect.bottom - rect.top);
            *rect = Rect::new(x, y, x + w, y + h);
        }
        Ok(())
    }

    fn repaint(&self, hwnd: usize) {
        self.repaints.borrow_mut().push(hwnd);
    }
}

fn bottom_taskbar() -> Rect {
    Rect::new(0, 1040, 1920, 1080)
}

fn start_button_rect() -> Rect {
    Rect::new(0, 1040, 48, 1080)
}

#[test]
fn new_controller_is_unresolved_and_shown() {
    // Act
    let controller = TaskbarController::new(FakeShell::with_taskbar(bottom_taskbar()));

    // Assert
    assert_eq!(controller.resolution(), Resolution::Unresolved);
    assert_eq!(controller.state(), ToggleState::Shown);
    assert_eq!(controller.shell().rect_queries.get(), 0);
}

#[test]
fn resolve_captures_taskbar_and_start_button() {
    // Arrange
    let shell = FakeShell::with_taskbar(bottom_taskbar()).with_start_button(start_button_rect());
    let mut controller = TaskbarController::new(shell);

    // Act
    let resolved = controller.resolve();

    // Assert
    assert!(resolved);
    assert_eq!(
        controller.resolution(),
        Resolution::Resolved {
            taskbar: ShellTarget {
                hwnd: TASKBAR,
                rect: bottom_taskbar()
            },
            start_button: Some(ShellTarget {
                hwnd: START,
                rect: start_button_rect()
            }),
        }
    );
}

#[test]
fn resolve_is_idempotent() {
    // Arrange
    let shell = FakeShell::with_taskbar(bottom_taskbar()).with_start_button(start_button_rect());
    let mut controller = TaskbarController::new(shell);
    controller.resolve();
    let first = controller.resolution();

    // Act
    for _ in 0..5 {
        controller.resolve();
    }

    // Assert
    assert_eq!(controller.resolution(), first);
}

#[test]
fn resolve_keeps_cached_rect_after_window_moves() {
    // Arrange
    let mut controller = TaskbarController::new(FakeShell::with_taskbar(bottom_taskbar()));
    controller.resolve();
    controller
        .shell()
        .rects
        .borrow_mut()
        .insert(TASKBAR, Rect::new(0, 0, 1920, 40));

    // Act
    controller.resolve();

    // Assert
    let Resolution::Resolved { taskbar, .. } = controller.resolution() else {
        panic!("expected resolved");
    };
    assert_eq!(taskbar.rect, bottom_taskbar());
}

#[test]
fn resolve_follows_a_new_taskbar_handle() {
    // Arrange
    let mut controller = TaskbarController::new(FakeShell::with_taskbar(bottom_taskbar()));
    controller.resolve();
    controller.shell().taskbar.set(Some(0x99));

    // Act
    controller.resolve();

    // Assert
    let Resolution::Resolved { taskbar, .. } = controller.resolution() else {
        panic!("expected resolved");
    };
    assert_eq!(taskbar.hwnd, 0x99);
    assert_eq!(taskbar.rect, bottom_taskbar());
}

#[test]
fn zero_rect_counts_as_resolved() {
    // Arrange
    let mut controller = TaskbarController::new(FakeShell::with_taskbar(Rect::default()));
    controller.resolve();
    let queries = controller.shell().rect_queries.get();

    // Act
    controller.resolve();

    // Assert: the zero rect is not mistaken for "not yet captured".
    assert!(matches!(
        controller.resolution(),
        Resolution::Resolved { taskbar, .. } if taskbar.rect == Rect::default()
    ));
    assert_eq!(controller.shell().rect_queries.get(), queries);
}

#[test]
fn missing_taskbar_leaves_controller_unresolved() {
    // Arrange
    let mut controller = TaskbarController::new(FakeShell::default());

    // Act
    let resolved = controller.resolve();

    // Assert
    assert!(!resolved);
    assert_eq!(controller.resolution(), Resolution::Unresolved);
}

#[test]
fn missing_taskbar_makes_hide_and_show_silent_no_ops() {
    // Arrange
    let mut controller = TaskbarController::new(FakeShell::default());

    // Act
    controller.hide();
    controller.show();

    // Assert
    assert!(controller.shell().placements.borrow().is_empty());
    assert!(controller.shell().repaints.borrow().is_empty());
    assert_eq!(controller.last_error(), None);
    assert_eq!(controller.state(), ToggleState::Shown);
}

#[test]
fn taskbar_found_later_is_resolved_on_next_toggle() {
    // Arrange
    let mut controller = TaskbarController::new(FakeShell::default());
    controller.toggle();
    controller.shell().taskbar.set(Some(TASKBAR));
    controller
        .shell()
        .rects
        .borrow_mut()
        .insert(TASKBAR, bottom_taskbar());

    // Act
    controller.toggle();

    // Assert
    assert!(matches!(controller.resolution(), Resolution::Resolved { .. }));
}

#[test]
fn hide_parks_windows_below_the_screen() {
    // Arrange
    let shell = FakeShell::with_taskbar(bottom_taskbar()).with_start_button(start_button_rect());
    let mut controller = TaskbarController::new(shell);

    // Act
    controller.hide();

    // Assert
    assert_eq!(
        *controller.shell().placements.borrow(),
        vec![
            Placement {
                hwnd: TASKBAR,
                x: 0,
                y: 2080,
                state: ToggleState::Hidden
            },
            Placement {
                hwnd: START,
                x: 0,
                y: 2080,
                state: ToggleState::Hidden
            },
        ]
    );
    assert_eq!(controller.state(), ToggleState::Hidden);
}

#[test]
fn hide_then_show_restores_the_captured_rects() {
    // Arrange
    let shell = FakeShell::with_taskbar(bottom_taskbar()).with_start_button(start_button_rect());
    let mut controller = TaskbarController::new(shell);

    // Act
    controller.hide();
    controller.show();

    // Assert
    assert_eq!(controller.shell().rect_of(TASKBAR), bottom_taskbar());
    assert_eq!(controller.shell().rect_of(START), start_button_rect());
    assert_eq!(controller.state(), ToggleState::Shown);
}

#[test]
fn show_repaints_the_start_button() {
    // Arrange
    let shell = FakeShell::with_taskbar(bottom_taskbar()).with_start_button(start_button_rect());
    let mut controller = TaskbarController::new(shell);
    controller.hide();

    // Act
    controller.show();

    // Assert
    assert_eq!(*controller.shell().repaints.borrow(), vec![START]);
}

#[test]
fn works_without_a_start_button() {
    // Arrange
    let mut controller = TaskbarController::new(FakeShell::with_taskbar(bottom_taskbar()));

    // Act
    controller.hide();
    controller.show();

    // Assert
    let placements = controller.shell().placements.borrow();
    assert_eq!(placements.len(), 2);
    assert!(placements.iter().all(|p| p.hwnd == TASKBAR));
    assert!(controller.shell().repaints.borrow().is_empty());
}

#[test]
fn toggle_alternates_strictly() {
    // Arrange
    let mut controller = TaskbarController::new(FakeShell::with_taskbar(bottom_taskbar()));
    let mut expected = ToggleState::Shown;

    for _ in 0..7 {
        // Act
        let state = controller.toggle();

        // Assert
        expected = expected.flipped();
        assert_eq!(state, expected);
    }
}

#[test]
fn toggle_flips_state_even_when_moves_fail() {
    // Arrange
    let mut controller = TaskbarController::new(FakeShell::with_taskbar(bottom_taskbar()));
    controller.shell().refuse_moves.set(true);

    // Act
    let state = controller.toggle();

    // Assert
    assert_eq!(state, ToggleState::Hidden);
    assert!(controller.last_error().unwrap().contains("access denied"));
}

#[test]
fn last_error_is_cleared_by_a_successful_toggle() {
    // Arrange
    let mut controller = TaskbarController::new(FakeShell::with_taskbar(bottom_taskbar()));
    controller.shell().refuse_moves.set(true);
    controller.toggle();
    controller.shell().refuse_moves.set(false);

    // Act
    controller.toggle();

    // Assert
    assert_eq!(controller.last_error(), None);
}

#[test]
fn restore_only_acts_when_hidden() {
    // Arrange
    let mut controller = TaskbarController::new(FakeShell::with_taskbar(bottom_taskbar()));

    // Act
    controller.restore();

    // Assert
    assert!(controller.shell().placements.borrow().is_empty());

    // Arrange
    controller.hide();

    // Act
    controller.restore();

    // Assert
    assert_eq!(controller.state(), ToggleState::Shown);
    assert_eq!(controller.shell().rect_of(TASKBAR), bottom_taskbar());
}

#[test]
fn labels_follow_state() {
    assert_eq!(ToggleState::Shown.button_label(), "&Enable");
    assert_eq!(ToggleState::Hidden.button_label(), "&Disable");
    assert_eq!(ToggleState::Hidden.menu_label(), "&Show taskbar");
}

#[test]
fn late_start_button_is_captured_and_its_rect_kept() {
    // Arrange
    let shell = FakeShell::with_taskbar(bottom_taskbar());
    let mut controller = TaskbarController::new(shell);
    controller.resolve();
    let relaunched = START + 1;

    // Act: the Start button appears after the taskbar was resolved...
    let shell = controller.shell();
    shell.start_button.set(Some(START));
    shell.rects.borrow_mut().insert(START, start_button_rect());
    controller.resolve();

    // ...then comes back under a new handle somewhere else.
    let shell = controller.shell();
    shell.start_button.set(Some(relaunched));
    shell
        .rects
        .borrow_mut()
        .insert(relaunched, Rect::new(100, 0, 148, 40));
    controller.resolve();

    // Assert
    let Resolution::Resolved { start_button, .. } = controller.resolution() else {
        panic!("expected resolved");
    };
    assert_eq!(
        start_button,
        Some(ShellTarget {
            hwnd: relaunched,
            rect: start_button_rect(),
        })
    );
}
