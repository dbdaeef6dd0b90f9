use macroquad::prelude::*;

use crate::config::GameProfile;
use crate::grid::{Cell, Grid};
use crate::position::Position;

const PADDING: f32 = 8.0;
const HUD_HEIGHT: f32 = 40.0;
const FOOTER_HEIGHT: f32 = 40.0;
const DIALOG_MIN_WIDTH: f32 = 340.0;
const DIALOG_PADDING: f32 = 24.0;
const LINE_HEIGHT: f32 = 36.0;

const BACKGROUND: Color = Color::new(0.0, 0.0, 0.25, 1.0);
const PANEL: Color = Color::new(0.05, 0.05, 0.12, 1.0);
const PANEL_BORDER: Color = Color::new(0.35, 0.35, 0.55, 1.0);
const TEXT: Color = Color::new(0.85, 0.85, 0.95, 1.0);

pub(crate) struct Hud {
    pub(crate) score: u32,
    pub(crate) bonus: u32,
    pub(crate) stage: u32,
    pub(crate) lives: u32,
}

/// A cell mid-flight between two squares; `progress` is already eased.
pub(crate) struct MovingCell {
    pub(crate) cell: Cell,
    pub(crate) from: Position,
    pub(crate) to: Position,
    pub(crate) progress: f32,
}

fn measure(text: &str, size: u16) -> TextDimensions {
    measure_text(text, None, size, 1.0)
}

fn draw_centered(text: &str, center_x: f32, y: f32, size: u16, color: Color) {
    let dims = measure(text, size);
    draw_text(text, center_x - dims.width / 2.0, y, size as f32, color);
}

pub(crate) fn render_background() {
    clear_background(BACKGROUND);
}

pub(crate) fn render_title(profile: GameProfile, best_total: u32) {
    render_background();

    let center_x = screen_width() / 2.0;
    draw_centered("MORDICUS", center_x, 120.0, 72, GOLD);

    let mode = match profile {
        GameProfile::Remake => "MODE: REMAKE",
        GameProfile::Original => "MODE: ORIGINAL",
    };
    draw_centered(mode, center_x, 190.0, 32, TEXT);
    draw_centered(
        &format!("MEILLEUR SCORE: {:0>6}", best_total),
        center_x,
        230.0,
        28,
        TEXT,
    );
    draw_centered("POUR COMMENCER, ESPACE", center_x, 300.0, 32, SKYBLUE);
    draw_centered("O - CHANGER DE MODE", center_x, 340.0, 24, GRAY);
}

/// A centered dialog box over whatever is already drawn, one line per entry.
pub(crate) fn render_dialog(lines: &[&str]) {
    let width = lines
        .iter()
        .map(|line| measure(line, 32).width)
        .fold(DIALOG_MIN_WIDTH, f32::max)
        + DIALOG_PADDING * 2.0;
    let height = lines.len() as f32 * LINE_HEIGHT + DIALOG_PADDING * 2.0;
    let x = (screen_width() - width) / 2.0;
    let y = (screen_height() - height) / 2.0;

    draw_rectangle(x, y, width, height, PANEL);
    draw_rectangle_lines(x, y, width, height, 3.0, PANEL_BORDER);

    let mut line_y = y + DIALOG_PADDING + LINE_HEIGHT * 0.75;
    for line in lines {
        draw_centered(line, screen_width() / 2.0, line_y, 32, TEXT);
        line_y += LINE_HEIGHT;
    }
}

pub(crate) fn render_level(grid: &Grid, moving: &[MovingCell], hud: &Hud) {
    render_background();

    let cell = cell_size(grid);
    let (offset_x, offset_y) = grid_offset(grid);
    let grid_w = grid.width() as f32 * cell;
    let grid_h = grid.height() as f32 * cell;

    // HUD above the grid, stage and lives below, as the arcade laid it out.
    draw_text(
        &format!("POINTS {:0>6}", hud.score),
        PADDING,
        28.0,
        32.0,
        TEXT,
    );
    let bonus = format!("BONI {:0>4}", hud.bonus);
    let bonus_dims = measure(&bonus, 32);
    draw_text(
        &bonus,
        screen_width() - bonus_dims.width - PADDING,
        28.0,
        32.0,
        TEXT,
    );
    let footer_y = screen_height() - 12.0;
    draw_text(
        &format!("NIVEAU {:0>3}", hud.stage),
        PADDING,
        footer_y,
        32.0,
        TEXT,
    );
    let lives = format!("VIES {:0>2}", hud.lives);
    let lives_dims = measure(&lives, 32);
    draw_text(
        &lives,
        screen_width() - lives_dims.width - PADDING,
        footer_y,
        32.0,
        TEXT,
    );

    for i in 0..=grid.width() {
        let x = offset_x + i as f32 * cell;
        draw_line(x, offset_y, x, offset_y + grid_h, 1.0, DARKGRAY);
    }
    for i in 0..=grid.height() {
        let y = offset_y + i as f32 * cell;
        draw_line(offset_x, y, offset_x + grid_w, y, 1.0, DARKGRAY);
    }

    for (pos, grid_cell) in grid.entries() {
        if moving.iter().any(|m| m.from == pos) {
            continue;
        }
        draw_cell(
            grid_cell,
            offset_x + pos.x as f32 * cell,
            offset_y + pos.y as f32 * cell,
            cell,
        );
    }

    for m in moving {
        let x = m.from.x as f32 + (m.to.x - m.from.x) as f32 * m.progress;
        let y = m.from.y as f32 + (m.to.y - m.from.y) as f32 * m.progress;
        draw_cell(m.cell, offset_x + x * cell, offset_y + y * cell, cell);
    }
}

fn draw_cell(cell: Cell, px: f32, py: f32, size: f32) {
    let inset = size * 0.08;
    let inner = size - inset * 2.0;

    let (color, glyph) = match cell {
        Cell::Empty => return,
        Cell::Player => (GOLD, Some('M')),
        Cell::Coin => {
            draw_circle(px + size / 2.0, py + size / 2.0, inner / 2.0, YELLOW);
            draw_circle_lines(px + size / 2.0, py + size / 2.0, inner / 2.0, 2.0, ORANGE);
            return;
        }
        Cell::Banana => (Color::new(0.95, 0.85, 0.25, 1.0), Some('b')),
        Cell::RedGorilla => (Color::new(0.75, 0.15, 0.15, 1.0), Some('G')),
        Cell::BlueGorilla => (Color::new(0.25, 0.35, 0.85, 1.0), Some('G')),
        Cell::SatiatedGorilla => (Color::new(0.45, 0.45, 0.55, 1.0), Some('G')),
        Cell::GreenBlock => (DARKGREEN, None),
        Cell::RedBlock => (MAROON, None),
        Cell::Arrow(_) => (LIGHTGRAY, Some(cell.symbol())),
    };

    draw_rectangle(px + inset, py + inset, inner, inner, color);
    if let Some(glyph) = glyph {
        let text = glyph.to_string();
        let font_size = (size * 0.7) as u16;
        let dims = measure(&text, font_size);
        draw_text(
            &text,
            px + (size - dims.width) / 2.0,
            py + (size + dims.height) / 2.0,
            font_size as f32,
            BLACK,
        );
    }
}

fn cell_size(grid: &Grid) -> f32 {
    let width = screen_width() - PADDING * 2.0;
    let height = screen_height() - HUD_HEIGHT - FOOTER_HEIGHT - PADDING * 2.0;
    let cell_w = width / grid.width() as f32;
    let cell_h = height / grid.height() as f32;
    cell_w.min(cell_h)
}

fn grid_offset(grid: &Grid) -> (f32, f32) {
    let cell = cell_size(grid);
    let grid_w = grid.width() as f32 * cell;
    let grid_h = grid.height() as f32 * cell;
    let usable_h = screen_height() - HUD_HEIGHT - FOOTER_HEIGHT;
    (
        (screen_width() - grid_w) / 2.0,
        HUD_HEIGHT + (usable_h - grid_h) / 2.0,
    )
}
