//! Window geometry.

use cgmath::Matrix4;

use crate::config::{CELL_SIZE, HEADER_HEIGHT, PADDING};
use crate::game::CellPos;

/// Minimum target width & height, to avoid divide-by-zero errors.
const MIN_TARGET_SIZE: u32 = 10;
/// Minimum window width, so that the timer and buttons fit above small
/// boards.
const MIN_WINDOW_WIDTH: u32 = 300;

/// Distance between the left edges of two adjacent cells.
const CELL_STRIDE: u32 = CELL_SIZE + PADDING;

const BUTTON_WIDTH: u32 = 80;
const BUTTON_HEIGHT: u32 = 30;
const BUTTON_MARGIN: u32 = 10;

/// Axis-aligned rectangle in window pixels, measured from the top-left
/// corner.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Rect {
    /// Left edge.
    pub x: u32,
    /// Top edge.
    pub y: u32,
    /// Width.
    pub w: u32,
    /// Height.
    pub h: u32,
}
impl Rect {
    /// Returns a rectangle from its top-left corner and size.
    pub fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }
    /// Returns `true` if the pixel lies inside the rectangle.
    pub fn contains(self, (x, y): (u32, u32)) -> bool {
        self.x <= x && x < self.x + self.w && self.y <= y && y < self.y + self.h
    }
}

/// Placement of the board and header in the window.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Layout {
    rows: usize,
    cols: usize,
    /// Width and height of the render target.
    target_dimensions: (u32, u32),
}
impl Layout {
    /// Returns the layout for a board of the given size.
    pub fn new(rows: usize, cols: usize) -> Self {
        let mut ret = Self {
            rows,
            cols,
            target_dimensions: (MIN_TARGET_SIZE, MIN_TARGET_SIZE),
        };
        ret.set_target_dimensions(ret.window_size());
        ret
    }

    /// Returns the width and height of the render target.
    pub fn target_dimensions(self) -> (u32, u32) {
        self.target_dimensions
    }
    /// Sets the width and height of the render target.
    pub fn set_target_dimensions(&mut self, (target_w, target_h): (u32, u32)) {
        self.target_dimensions = (
            std::cmp::max(MIN_TARGET_SIZE, target_w),
            std::cmp::max(MIN_TARGET_SIZE, target_h),
        );
    }

    /// Returns the width and height the window needs to show everything.
    pub fn window_size(self) -> (u32, u32) {
        let board = self.board_rect();
        (
            std::cmp::max(MIN_WINDOW_WIDTH, board.w),
            HEADER_HEIGHT + board.h,
        )
    }
    /// Returns the area covered by the board, including its outer padding.
    pub fn board_rect(self) -> Rect {
        Rect::new(
            0,
            HEADER_HEIGHT,
            PADDING + self.cols as u32 * CELL_STRIDE,
            PADDING + self.rows as u32 * CELL_STRIDE,
        )
    }
    /// Returns the area covered by a single cell.
    pub fn cell_rect(self, pos: CellPos) -> Rect {
        let board = self.board_rect();
        Rect::new(
            board.x + PADDING + pos.col as u32 * CELL_STRIDE,
            board.y + PADDING + pos.row as u32 * CELL_STRIDE,
            CELL_SIZE,
            CELL_SIZE,
        )
    }
    /// Returns the cell containing a pixel, or `None` if the pixel is
    /// outside the board or in the gap between cells.
    pub fn pixel_to_cell(self, pixel: (u32, u32)) -> Option<CellPos> {
        let board = self.board_rect();
        if !board.contains(pixel) {
            return None;
        }
        let x = (pixel.0 - board.x).checked_sub(PADDING)?;
        let y = (pixel.1 - board.y).checked_sub(PADDING)?;
        if x % CELL_STRIDE >= CELL_SIZE || y % CELL_STRIDE >= CELL_SIZE {
            return None;
        }
        let pos = CellPos::new((y / CELL_STRIDE) as usize, (x / CELL_STRIDE) as usize);
        if pos.row < self.rows && pos.col < self.cols {
            Some(pos)
        } else {
            None
        }
    }

    /// Returns the left edge and vertical center of the timer text.
    pub fn timer_origin(self) -> (u32, u32) {
        (20, HEADER_HEIGHT / 2)
    }
    /// Returns the area of the n-th header button, counting from the right
    /// edge of the window.
    pub fn button_rect(self, n_from_right: u32) -> Rect {
        let (w, _) = self.window_size();
        let x = w - (n_from_right + 1) * (BUTTON_WIDTH + BUTTON_MARGIN);
        Rect::new(x, BUTTON_MARGIN, BUTTON_WIDTH, BUTTON_HEIGHT)
    }

    /// Returns the orthographic projection from window pixels, with the
    /// origin at the top left, to normalized device coordinates.
    pub fn gl_matrix(self) -> Matrix4<f32> {
        let (target_w, target_h) = self.target_dimensions;
        cgmath::ortho(0.0, target_w as f32, target_h as f32, 0.0, -1.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use cgmath::{Point3, Transform};

    use super::*;

    #[test]
    fn test_window_size() {
        // The default board is 20 columns by 14 rows.
        let layout = Layout::new(14, 20);
        assert_eq!(layout.board_rect(), Rect::new(0, 50, 421, 295));
        assert_eq!(layout.window_size(), (421, 345));
        assert_eq!(Layout::new(2, 2).window_size(), (300, 50 + 43));
    }

    #[test]
    fn test_pixel_to_cell() {
        let layout = Layout::new(14, 20);
        assert_eq!(layout.pixel_to_cell((1, 51)), Some(CellPos::new(0, 0)));
        assert_eq!(layout.pixel_to_cell((20, 70)), Some(CellPos::new(0, 0)));
        assert_eq!(layout.pixel_to_cell((22, 72)), Some(CellPos::new(1, 1)));
        assert_eq!(layout.pixel_to_cell((419, 343)), Some(CellPos::new(13, 19)));

        // Padding, header and outside of the window.
        assert_eq!(layout.pixel_to_cell((0, 60)), None);
        assert_eq!(layout.pixel_to_cell((21, 60)), None);
        assert_eq!(layout.pixel_to_cell((10, 50)), None);
        assert_eq!(layout.pixel_to_cell((10, 20)), None);
        assert_eq!(layout.pixel_to_cell((420, 60)), None);
        assert_eq!(layout.pixel_to_cell((10, 500)), None);

        for pos in [CellPos::new(3, 7), CellPos::new(13, 0)].iter() {
            let r = layout.cell_rect(*pos);
            assert_eq!(layout.pixel_to_cell((r.x, r.y)), Some(*pos));
            assert_eq!(layout.pixel_to_cell((r.x + r.w - 1, r.y + r.h - 1)), Some(*pos));
        }
    }

    #[test]
    fn test_buttons_fit_in_header() {
        let layout = Layout::new(1, 1);
        let (w, _) = layout.window_size();
        let exit = layout.button_rect(0);
        let reset = layout.button_rect(1);
        assert!(exit.x + exit.w <= w);
        assert!(reset.x + reset.w <= exit.x);
        assert!(exit.y + exit.h <= HEADER_HEIGHT);
    }

    #[test]
    fn test_gl_matrix_maps_corners() {
        let layout = Layout::new(14, 20);
        let (w, h) = layout.target_dimensions();
        let m = layout.gl_matrix();
        let top_left = m.transform_point(Point3::new(0.0, 0.0, 0.0));
        let bottom_right = m.transform_point(Point3::new(w as f32, h as f32, 0.0));
        assert!((top_left.x + 1.0).abs() < 1e-6 && (top_left.y - 1.0).abs() < 1e-6);
        assert!((bottom_right.x - 1.0).abs() < 1e-6 && (bottom_right.y + 1.0).abs() < 1e-6);
    }
}
