/// A screen-space rectangle in the Win32 `RECT` layout.
///
/// Unlike a position-and-size rect, the right and bottom edges are
/// stored directly, which is what `GetWindowRect` hands back.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Where a window with this rect is parked while hidden.
    ///
    /// The window is pushed down by twice its own top coordinate, which
    /// moves a bottom-docked taskbar below the screen. Some shells re-show
    /// a taskbar that was only flagged hidden, so the move is kept even
    /// though the hide flag is applied as well.
    pub fn parked_origin(&self) -> (i32, i32) {
        (0, self.top.saturating_mul(2))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parked_origin_doubles_top() {
        // Arrange
        let rect = Rect::new(12, 1040, 1920, 1080);

        // Act
        let origin = rect.parked_origin();

        // Assert
        assert_eq!(origin, (0, 2080));
    }

    #[test]
    fn parked_origin_saturates_instead_of_overflowing() {
        let rect = Rect::new(0, i32::MAX - 1, 10, i32::MAX);

        assert_eq!(rect.parked_origin(), (0, i32::MAX));
    }
}
