//! Header buttons.

use super::layout::Rect;

/// What a header button does.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ButtonKind {
    /// Start a new game.
    Reset,
    /// Close the window.
    Exit,
}
impl ButtonKind {
    /// Returns the text shown on the button.
    pub fn label(self) -> &'static str {
        match self {
            ButtonKind::Reset => "RESET",
            ButtonKind::Exit => "EXIT",
        }
    }
}

/// Visual state of a button.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ButtonLook {
    /// Cursor elsewhere.
    Idle,
    /// Cursor over the button.
    Hovered,
    /// Cursor over the button with the primary button held.
    Pressed,
}

/// Clickable button in the header.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Button {
    /// Action triggered by the button.
    pub kind: ButtonKind,
    /// Area covered by the button.
    pub rect: Rect,
    /// Whether the current press has already fired.
    handled: bool,
}
impl Button {
    /// Returns a button that has not been pressed yet.
    pub fn new(kind: ButtonKind, rect: Rect) -> Self {
        Self {
            kind,
            rect,
            handled: false,
        }
    }

    /// Returns how the button should be drawn.
    pub fn look(self, cursor: Option<(u32, u32)>, primary_down: bool) -> ButtonLook {
        match cursor {
            Some(pixel) if self.rect.contains(pixel) => {
                if primary_down {
                    ButtonLook::Pressed
                } else {
                    ButtonLook::Hovered
                }
            }
            _ => ButtonLook::Idle,
        }
    }

    /// Updates the button for this frame and returns its kind if it fired.
    /// A button fires once per press, while the cursor is over it.
    pub fn update(&mut self, cursor: Option<(u32, u32)>, primary_down: bool) -> Option<ButtonKind> {
        match self.look(cursor, primary_down) {
            ButtonLook::Idle => None,
            ButtonLook::Hovered => {
                self.handled = false;
                None
            }
            ButtonLook::Pressed if self.handled => None,
            ButtonLook::Pressed => {
                self.handled = true;
                Some(self.kind)
            }
        }
    }
}
