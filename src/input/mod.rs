use glium::glutin::event::{ElementState, MouseButton, WindowEvent};

/// Action requested by a mouse click on the board.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Click {
    /// Primary button: uncover the cell.
    Reveal,
    /// Secondary button: toggle the flag on the cell.
    Mark,
}
impl Click {
    /// Returns the board action bound to a mouse button, if any.
    pub fn from_button(button: MouseButton) -> Option<Self> {
        match button {
            MouseButton::Left => Some(Click::Reveal),
            MouseButton::Right => Some(Click::Mark),
            MouseButton::Middle | MouseButton::Other(_) => None,
        }
    }
}

/// Mouse state accumulated from window events.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct Mouse {
    /// Position of the mouse cursor, or `None` if it is outside the window.
    pub cursor: Option<(u32, u32)>,
    /// Whether the primary button is held.
    pub primary_down: bool,
}
impl Mouse {
    /// Updates mouse state and returns the board action triggered by the
    /// event, if any.
    pub fn handle_event(&mut self, ev: &WindowEvent<'_>) -> Option<Click> {
        match ev {
            WindowEvent::CursorMoved { position, .. } => {
                self.move_to((position.x as u32, position.y as u32));
                None
            }
            WindowEvent::CursorLeft { .. } => {
                self.leave();
                None
            }
            WindowEvent::MouseInput { state, button, .. } => match state {
                ElementState::Pressed => self.press(*button),
                ElementState::Released => {
                    self.release(*button);
                    None
                }
            },
            _ => None,
        }
    }

    /// Records the cursor position.
    pub fn move_to(&mut self, pixel: (u32, u32)) {
        self.cursor = Some(pixel);
    }
    /// Forgets the cursor once it leaves the window, releasing the button.
    pub fn leave(&mut self) {
        self.cursor = None;
        self.primary_down = false;
    }
    /// Registers a button press. Clicks act on press, not release.
    pub fn press(&mut self, button: MouseButton) -> Option<Click> {
        if button == MouseButton::Left {
            self.primary_down = true;
        }
        self.cursor?;
        Click::from_button(button)
    }
    /// Registers a button release.
    pub fn release(&mut self, button: MouseButton) {
        if button == MouseButton::Left {
            self.primary_down = false;
        }
    }
}
