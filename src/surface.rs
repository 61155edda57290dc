/// Seams to the outside world: the drawing surface, the image loader and the
/// polled key-state map.  The core only talks to these types.

use std::cell::Cell;
use std::collections::HashMap;
use std::rc::Rc;

use serde::Deserialize;

// ── Drawing surface ───────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Size of the play field in logical units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

pub trait Surface {
    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color);
    fn draw_image(&mut self, image: &ImageHandle, x: f32, y: f32, w: f32, h: f32);
    fn set_global_alpha(&mut self, alpha: f32);
    fn bounds(&self) -> Bounds;
}

// ── Images ────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Readiness {
    Loading,
    Ready,
    Failed,
}

/// A drawable handle whose readiness settles exactly once.
///
/// Clones share the same readiness cell, so every entity holding the handle
/// observes the load completing at the same moment.
#[derive(Clone, Debug)]
pub struct ImageHandle {
    path: Rc<str>,
    sprite: usize,
    readiness: Rc<Cell<Readiness>>,
}

impl ImageHandle {
    /// A handle in the `Loading` state.  `sprite` is an opaque index the
    /// surface that draws it understands.
    pub fn pending(path: &str, sprite: usize) -> Self {
        Self {
            path: Rc::from(path),
            sprite,
            readiness: Rc::new(Cell::new(Readiness::Loading)),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn sprite(&self) -> usize {
        self.sprite
    }

    pub fn readiness(&self) -> Readiness {
        self.readiness.get()
    }

    pub fn is_ready(&self) -> bool {
        self.readiness.get() == Readiness::Ready
    }

    /// Settle the load.  Only the first call has any effect.
    pub fn settle(&self, outcome: Readiness) {
        if self.readiness.get() == Readiness::Loading && outcome != Readiness::Loading {
            self.readiness.set(outcome);
        }
    }
}

pub trait ImageLoader {
    /// Start loading `path`; the returned handle reports `Loading` until a
    /// later `pump` settles it.
    fn load(&mut self, path: &str) -> ImageHandle;

    /// Advance pending loads.
    fn pump(&mut self);
}

// ── Input ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Fire,
}

/// Held state per logical key.  Written by the input layer, read by the core.
#[derive(Clone, Debug, Default)]
pub struct InputState {
    held: HashMap<Key, bool>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: Key) {
        self.held.insert(key, true);
    }

    pub fn release(&mut self, key: Key) {
        self.held.insert(key, false);
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.get(&key).copied().unwrap_or(false)
    }
}
