//! Builds the quads for one frame from game and UI state.

use std::time::Duration;

use super::batch::{Batch, Rgb};
use super::font::{self, Sprite, GLYPH_HEIGHT};
use crate::config::CELL_SIZE;
use crate::game::{CellPos, CellView, Game, GameStatus};
use crate::gui::layout::{Layout, Rect};
use crate::gui::timer::format_elapsed;
use crate::gui::widgets::{Button, ButtonLook};
use crate::input::Mouse;

/// Window background color.
pub const BACKGROUND: Rgb = [221, 255, 153];
const BOARD: Rgb = [71, 209, 71];
const WHITE: Rgb = [255, 255, 255];
const BLACK: Rgb = [0, 0, 0];
const GREY: Rgb = [217, 217, 217];
const DARK_GREY: Rgb = [179, 179, 179];
const BLUE: Rgb = [51, 153, 255];
const RED: Rgb = [255, 0, 0];

const TIMER_SCALE: u32 = 3;
const BUTTON_TEXT_SCALE: u32 = 2;
const MAX_BANNER_SCALE: u32 = 5;

/// Scale of hints and sprites inside a cell.
fn cell_content_scale() -> u32 {
    std::cmp::max(1, CELL_SIZE / 10)
}

/// Returns the cell under the cursor, if it should be highlighted.
pub fn hovered_cell(game: &Game, layout: &Layout, mouse: &Mouse) -> Option<CellPos> {
    if game.status().is_over() {
        return None;
    }
    mouse.cursor.and_then(|pixel| layout.pixel_to_cell(pixel))
}

/// Returns the background color and foreground for a cell.
fn cell_look(view: CellView, hovered: bool) -> (Rgb, Option<Content>) {
    let covered = if hovered { GREY } else { WHITE };
    match view {
        CellView::Hidden => (covered, None),
        CellView::Marked => (covered, Some(Content::Sprite(Sprite::Flag, RED))),
        CellView::Empty => (BLUE, None),
        CellView::Hint(n) => (BLUE, Some(Content::Digit(n))),
        CellView::Detonated => (RED, Some(Content::Sprite(Sprite::Bomb, BLACK))),
        CellView::Bomb => (BLACK, Some(Content::Sprite(Sprite::Bomb, WHITE))),
    }
}

enum Content {
    Digit(u8),
    Sprite(Sprite, Rgb),
}

/// Builds everything drawn in a frame, other than the background clear.
pub fn build(
    game: &Game,
    layout: &Layout,
    mouse: &Mouse,
    buttons: &[Button],
    elapsed: Duration,
) -> Batch {
    let mut batch = Batch::new();
    draw_header(&mut batch, layout, mouse, buttons, elapsed);
    draw_board(&mut batch, game, layout, hovered_cell(game, layout, mouse));
    draw_banner(&mut batch, game.status(), layout.board_rect());
    batch
}

fn draw_header(
    batch: &mut Batch,
    layout: &Layout,
    mouse: &Mouse,
    buttons: &[Button],
    elapsed: Duration,
) {
    let (x, center_y) = layout.timer_origin();
    let y = center_y.saturating_sub(GLYPH_HEIGHT * TIMER_SCALE / 2);
    batch.push_text((x, y), TIMER_SCALE, &format_elapsed(elapsed), BLACK);

    for button in buttons {
        let fill = match button.look(mouse.cursor, mouse.primary_down) {
            ButtonLook::Idle => GREY,
            ButtonLook::Hovered => DARK_GREY,
            ButtonLook::Pressed => BOARD,
        };
        batch.push_rect(button.rect, fill);
        batch.push_border(button.rect, BLACK);
        batch.push_text_centered(button.rect, BUTTON_TEXT_SCALE, button.kind.label(), BLACK);
    }
}

fn draw_board(batch: &mut Batch, game: &Game, layout: &Layout, hovered: Option<CellPos>) {
    batch.push_rect(layout.board_rect(), BOARD);
    let scale = cell_content_scale();
    for pos in game.grid().positions() {
        let view = match game.cell_view(pos) {
            Ok(v) => v,
            Err(_) => continue,
        };
        let rect = layout.cell_rect(pos);
        let (bg, content) = cell_look(view, hovered == Some(pos));
        batch.push_rect(rect, bg);
        match content {
            None => (),
            Some(Content::Digit(n)) => {
                batch.push_text_centered(rect, scale, &n.to_string(), BLACK)
            }
            Some(Content::Sprite(sprite, rgb)) => {
                batch.push_sprite_centered(rect, sprite, scale, rgb)
            }
        }
    }
}

fn draw_banner(batch: &mut Batch, status: GameStatus, board: Rect) {
    let (text, rgb) = match status {
        GameStatus::InProgress => return,
        GameStatus::Lost => ("GAME OVER!", RED),
        GameStatus::Won => ("YOU WON!", BLUE),
    };
    // Shrink the text for boards too narrow to fit it.
    let fit = board.w * 9 / 10 / font::text_width(text);
    let scale = fit.min(MAX_BANNER_SCALE).max(1);
    batch.push_text_centered(board, scale, text, rgb);
}
