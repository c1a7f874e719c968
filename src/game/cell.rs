use super::GridError;

/// Largest possible hint: a cell has at most 8 neighbors.
pub const MAX_HINT: u8 = 8;

const BOMB_BIT: u8 = 0x80;
const STATE_SHIFT: u8 = 4;
const HINT_MASK: u8 = 0x0F;

/// Cell in the Minesweeper grid, packed into a single byte.
///
/// Layout is `B0SS_HHHH`: bomb bit, two state bits, four hint bits. The hint
/// bits are always zero for bombs.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub(super) struct PackedCell(u8);
impl PackedCell {
    /// Unpacks the `Cell` from a single byte.
    pub(super) fn unpack(self) -> Cell {
        Cell {
            bomb: self.0 & BOMB_BIT != 0,
            hint: self.0 & HINT_MASK,
            state: CellState::from(self.0 >> STATE_SHIFT),
        }
    }
}

/// Visibility of a cell to the player.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum CellState {
    /// Covered, with no player annotation.
    Hidden = 0,
    /// Covered, with a flag placed by the player.
    Marked = 1,
    /// Uncovered. There is no way back from this state.
    Revealed = 2,
}
impl Default for CellState {
    fn default() -> Self {
        CellState::Hidden
    }
}
impl From<u8> for CellState {
    fn from(x: u8) -> Self {
        match x & 0b11 {
            0 => CellState::Hidden,
            1 => CellState::Marked,
            2 => CellState::Revealed,
            _ => panic!("Invalid CellState"),
        }
    }
}

/// Cell in the Minesweeper grid.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Cell {
    bomb: bool,
    hint: u8,
    state: CellState,
}
impl Cell {
    /// Returns a hidden safe cell with a hint of zero.
    pub fn safe() -> Self {
        Self::default()
    }
    /// Returns a hidden bomb.
    pub fn bomb() -> Self {
        Self {
            bomb: true,
            ..Self::default()
        }
    }

    /// Packs the cell into a single byte.
    pub(super) fn pack(self) -> PackedCell {
        let bomb = if self.bomb { BOMB_BIT } else { 0 };
        let hint = if self.bomb { 0 } else { self.hint & HINT_MASK };
        PackedCell(bomb | (self.state as u8) << STATE_SHIFT | hint)
    }

    /// Returns the cell with its hint set to `hint`.
    ///
    /// Bombs do not carry a hint, so the value is validated but ignored for
    /// them.
    pub fn with_hint(self, hint: u8) -> Result<Self, GridError> {
        if hint > MAX_HINT {
            return Err(GridError::InvalidHint(hint));
        }
        Ok(Self {
            hint: if self.bomb { 0 } else { hint },
            ..self
        })
    }

    /// Returns `true` if the cell contains a bomb.
    pub fn is_bomb(self) -> bool {
        self.bomb
    }
    /// Returns the number of neighboring bombs, or `None` for a bomb.
    pub fn hint(self) -> Option<u8> {
        if self.bomb {
            None
        } else {
            Some(self.hint)
        }
    }
    /// Returns the visibility of the cell.
    pub fn state(self) -> CellState {
        self.state
    }
    /// Returns `true` if the cell has been uncovered.
    pub fn is_revealed(self) -> bool {
        self.state == CellState::Revealed
    }

    /// Uncovers the cell.
    #[must_use = "this returns the result of the operation, without modifying the original"]
    pub fn reveal(self) -> Self {
        Self {
            state: CellState::Revealed,
            ..self
        }
    }
    /// Toggles the flag on a covered cell. Revealed cells are unchanged.
    #[must_use = "this returns the result of the operation, without modifying the original"]
    pub fn toggle_mark(self) -> Self {
        let state = match self.state {
            CellState::Hidden => CellState::Marked,
            CellState::Marked => CellState::Hidden,
            CellState::Revealed => CellState::Revealed,
        };
        Self { state, ..self }
    }
}

/// What the player is allowed to see of a cell.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum CellView {
    /// Covered cell.
    Hidden,
    /// Covered cell with a flag.
    Marked,
    /// Revealed safe cell with no neighboring bombs.
    Empty,
    /// Revealed safe cell with 1 to 8 neighboring bombs.
    Hint(u8),
    /// Revealed bomb; the one that ended the game.
    Detonated,
    /// Covered bomb, shown once the game is lost.
    Bomb,
}
impl CellView {
    /// Returns the view of a cell. Covered bombs are only shown if
    /// `expose_bombs` is `true`.
    pub fn of(cell: Cell, expose_bombs: bool) -> Self {
        match cell.state() {
            CellState::Revealed => match cell.hint() {
                None => CellView::Detonated,
                Some(0) => CellView::Empty,
                Some(n) => CellView::Hint(n),
            },
            _ if expose_bombs && cell.is_bomb() => CellView::Bomb,
            CellState::Hidden => CellView::Hidden,
            CellState::Marked => CellView::Marked,
        }
    }
}
