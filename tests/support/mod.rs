#![allow(dead_code)]

use std::collections::HashSet;

use viper_shooter::entities::{Character, Heading};
use viper_shooter::pool::Pool;
use viper_shooter::surface::{Bounds, Color, ImageHandle, ImageLoader, Readiness, Surface};

/// Every call a `RecordingSurface` received, in order.
#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    Fill { x: f32, y: f32, w: f32, h: f32, color: Color },
    Image { path: String, x: f32, y: f32, w: f32, h: f32, alpha: f32 },
    Alpha(f32),
}

pub struct RecordingSurface {
    pub bounds: Bounds,
    pub alpha: f32,
    pub calls: Vec<Call>,
}

impl RecordingSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self { bounds: Bounds { width, height }, alpha: 1.0, calls: Vec::new() }
    }

    pub fn images(&self) -> Vec<&Call> {
        self.calls.iter().filter(|c| matches!(c, Call::Image { .. })).collect()
    }

    pub fn image_count(&self) -> usize {
        self.images().len()
    }
}

impl Surface for RecordingSurface {
    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color) {
        self.calls.push(Call::Fill { x, y, w, h, color });
    }

    fn draw_image(&mut self, image: &ImageHandle, x: f32, y: f32, w: f32, h: f32) {
        self.calls.push(Call::Image { path: image.path().to_string(), x, y, w, h, alpha: self.alpha });
    }

    fn set_global_alpha(&mut self, alpha: f32) {
        self.alpha = alpha;
        self.calls.push(Call::Alpha(alpha));
    }

    fn bounds(&self) -> Bounds {
        self.bounds
    }
}

/// Loader whose loads settle on `pump`; paths listed in `failing` fail.
#[derive(Default)]
pub struct ManualLoader {
    pub failing: HashSet<String>,
    pub pending: Vec<ImageHandle>,
    pub requested: Vec<String>,
    pub pumps: usize,
    /// Number of `pump` calls before loads settle.
    pub settle_after: usize,
}

impl ImageLoader for ManualLoader {
    fn load(&mut self, path: &str) -> ImageHandle {
        let handle = ImageHandle::pending(path, self.requested.len());
        self.requested.push(path.to_string());
        self.pending.push(handle.clone());
        handle
    }

    fn pump(&mut self) {
        self.pumps += 1;
        if self.pumps <= self.settle_after {
            return;
        }
        for handle in self.pending.drain(..) {
            if self.failing.contains(handle.path()) {
                handle.settle(Readiness::Failed);
            } else {
                handle.settle(Readiness::Ready);
            }
        }
    }
}

pub fn ready_image(path: &str) -> ImageHandle {
    let handle = ImageHandle::pending(path, 0);
    handle.settle(Readiness::Ready);
    handle
}

pub fn shot_pool(capacity: usize, width: f32, speed: f32, heading: Heading) -> Pool {
    let image = ready_image("shot.png");
    Pool::filled(capacity, || Character::shot(width, width, image.clone(), speed, heading))
}

pub fn enemy_pool(capacity: usize) -> Pool {
    let image = ready_image("enemy.png");
    Pool::filled(capacity, || Character::enemy(48.0, 48.0, image.clone(), 5.0))
}
