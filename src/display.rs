/// Rendering layer.  All terminal I/O lives here.
///
/// `TerminalSurface` implements the core's drawing surface on a cell buffer:
/// logical field coordinates are scaled onto the terminal grid, and
/// `present` translates the buffer into crossterm commands.  `SpriteSheet`
/// plays the image loader, resolving asset paths to built-in glyph sprites.

use std::collections::HashMap;
use std::io::Write;
use std::path::Path;

use crossterm::{
    cursor,
    style::{self, Print},
    QueueableCommand,
};
use log::warn;
use viper_shooter::surface::{Bounds, Color, ImageHandle, ImageLoader, Readiness, Surface};

// ── Sprites ───────────────────────────────────────────────────────────────────

struct Sprite {
    /// Asset file stem this sprite stands in for.
    stem: &'static str,
    rows: &'static [&'static str],
    color: Color,
}

const SPRITES: &[Sprite] = &[
    Sprite { stem: "viper", rows: &["▶═╗", "▶═╝"], color: Color::rgb(0xee, 0xee, 0xff) },
    Sprite { stem: "viper_shot", rows: &["━"], color: Color::rgb(0x00, 0xff, 0xff) },
    Sprite { stem: "viper_single_shot", rows: &["·"], color: Color::rgb(0x66, 0xcc, 0xff) },
    Sprite { stem: "enemy_small", rows: &["«◎"], color: Color::rgb(0x33, 0xff, 0x33) },
    Sprite { stem: "enemy_shot", rows: &["•"], color: Color::rgb(0xff, 0x33, 0xcc) },
];

/// Resolves image paths to glyph sprites.  Loads settle on the next `pump`,
/// so readiness is observed the same way a real asynchronous loader's would
/// be.
#[derive(Default)]
pub struct SpriteSheet {
    loaded: HashMap<String, ImageHandle>,
    pending: Vec<ImageHandle>,
}

impl SpriteSheet {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ImageLoader for SpriteSheet {
    fn load(&mut self, path: &str) -> ImageHandle {
        if let Some(handle) = self.loaded.get(path) {
            return handle.clone();
        }
        let stem = Path::new(path).file_stem().and_then(|s| s.to_str()).unwrap_or_default();
        let sprite = SPRITES.iter().position(|s| s.stem == stem).unwrap_or(usize::MAX);
        let handle = ImageHandle::pending(path, sprite);
        self.loaded.insert(path.to_string(), handle.clone());
        self.pending.push(handle.clone());
        handle
    }

    fn pump(&mut self) {
        for handle in self.pending.drain(..) {
            if handle.sprite() < SPRITES.len() {
                handle.settle(Readiness::Ready);
            } else {
                warn!("no sprite for `{}`", handle.path());
                handle.settle(Readiness::Failed);
            }
        }
    }
}

// ── Cell buffer ───────────────────────────────────────────────────────────────

#[derive(Clone, Copy, PartialEq)]
struct Cell {
    ch: char,
    fg: Color,
    bg: Color,
}

const BLANK: Cell = Cell { ch: ' ', fg: Color::WHITE, bg: Color::BLACK };

pub struct TerminalSurface {
    field: Bounds,
    cols: u16,
    rows: u16,
    alpha: f32,
    cells: Vec<Cell>,
}

impl TerminalSurface {
    pub fn new(field: Bounds, cols: u16, rows: u16) -> Self {
        let mut surface = Self { field, cols: 0, rows: 0, alpha: 1.0, cells: Vec::new() };
        surface.resize(cols, rows);
        surface
    }

    pub fn resize(&mut self, cols: u16, rows: u16) {
        if cols == self.cols && rows == self.rows {
            return;
        }
        self.cols = cols.max(1);
        self.rows = rows.max(1);
        self.cells = vec![BLANK; self.cols as usize * self.rows as usize];
    }

    /// Logical field position → cell column/row (may fall off-grid).
    fn to_cell(&self, x: f32, y: f32) -> (i32, i32) {
        let col = (x / self.field.width * self.cols as f32).floor() as i32;
        let row = (y / self.field.height * self.rows as f32).floor() as i32;
        (col, row)
    }

    fn cell_mut(&mut self, col: i32, row: i32) -> Option<&mut Cell> {
        if col < 0 || row < 0 || col >= self.cols as i32 || row >= self.rows as i32 {
            return None;
        }
        let index = row as usize * self.cols as usize + col as usize;
        self.cells.get_mut(index)
    }

    fn shade(&self, color: Color) -> Color {
        let scale = |c: u8| (c as f32 * self.alpha.clamp(0.0, 1.0)) as u8;
        Color::rgb(scale(color.r), scale(color.g), scale(color.b))
    }

    /// Render one complete frame.
    pub fn present<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        let mut current: Option<(Color, Color)> = None;
        for row in 0..self.rows {
            out.queue(cursor::MoveTo(0, row))?;
            let start = row as usize * self.cols as usize;
            for cell in &self.cells[start..start + self.cols as usize] {
                if current != Some((cell.fg, cell.bg)) {
                    out.queue(style::SetForegroundColor(to_term(cell.fg)))?;
                    out.queue(style::SetBackgroundColor(to_term(cell.bg)))?;
                    current = Some((cell.fg, cell.bg));
                }
                out.queue(Print(cell.ch))?;
            }
        }

        // Park cursor in a harmless spot and flush
        out.queue(style::ResetColor)?;
        out.queue(cursor::MoveTo(0, self.rows.saturating_sub(1)))?;
        out.flush()?;
        Ok(())
    }
}

impl Surface for TerminalSurface {
    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color) {
        let color = self.shade(color);
        let (c0, r0) = self.to_cell(x, y);
        let (c1, r1) = self.to_cell(x + w, y + h);

        // Anything thinner than a cell becomes a single dot glyph.
        if c1 <= c0 || r1 <= r0 {
            let (col, row) = self.to_cell(x + w / 2.0, y + h / 2.0);
            if let Some(cell) = self.cell_mut(col, row) {
                *cell = Cell { ch: '·', fg: color, bg: cell.bg };
            }
            return;
        }
        for row in r0..r1 {
            for col in c0..c1 {
                if let Some(cell) = self.cell_mut(col, row) {
                    *cell = Cell { ch: ' ', fg: color, bg: color };
                }
            }
        }
    }

    fn draw_image(&mut self, image: &ImageHandle, x: f32, y: f32, w: f32, h: f32) {
        let Some(sprite) = SPRITES.get(image.sprite()) else {
            return;
        };
        let fg = self.shade(sprite.color);
        let (cx, cy) = self.to_cell(x + w / 2.0, y + h / 2.0);
        let top = cy - sprite.rows.len() as i32 / 2;
        for (dy, line) in sprite.rows.iter().enumerate() {
            let left = cx - line.chars().count() as i32 / 2;
            for (dx, ch) in line.chars().enumerate() {
                if let Some(cell) = self.cell_mut(left + dx as i32, top + dy as i32) {
                    *cell = Cell { ch, fg, bg: cell.bg };
                }
            }
        }
    }

    fn set_global_alpha(&mut self, alpha: f32) {
        self.alpha = alpha;
    }

    fn bounds(&self) -> Bounds {
        self.field
    }
}

fn to_term(color: Color) -> style::Color {
    style::Color::Rgb { r: color.r, g: color.g, b: color.b }
}
