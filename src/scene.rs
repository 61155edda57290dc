/// Cooperative scene scheduler.
///
/// Named phases are plain closures over a shared context `C` (the game
/// world).  One phase is active at a time; it is called once per `update`
/// with the seconds elapsed since it became active.

use std::collections::HashMap;

use log::{info, warn};

/// Frame value right after a switch: the next `update` observes frame 0.
pub const BEFORE_FIRST_FRAME: i64 = -1;

/// What a phase sees on each call, and its way to request a switch.
#[derive(Debug)]
pub struct Cue {
    elapsed: f32,
    frame: i64,
    request: Option<String>,
}

impl Cue {
    /// Seconds since the phase became active.
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Updates since the phase became active, starting at 0.
    pub fn frame(&self) -> i64 {
        self.frame
    }

    /// Switch phases as soon as the current call returns.  Requesting the
    /// running phase restarts it.
    pub fn use_scene(&mut self, name: impl Into<String>) {
        self.request = Some(name.into());
    }
}

pub type Phase<C> = Box<dyn FnMut(&mut Cue, &mut C)>;

pub struct Scene<C> {
    phases: HashMap<String, Phase<C>>,
    active: Option<String>,
    start_time: f64,
    frame: i64,
}

impl<C> Default for Scene<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> Scene<C> {
    pub fn new() -> Self {
        Self {
            phases: HashMap::new(),
            active: None,
            start_time: 0.0,
            frame: BEFORE_FIRST_FRAME,
        }
    }

    pub fn add(&mut self, name: impl Into<String>, phase: impl FnMut(&mut Cue, &mut C) + 'static) {
        self.phases.insert(name.into(), Box::new(phase));
    }

    /// Activate `name` at `now_ms`.  Unknown names are ignored and `false` is
    /// returned.
    pub fn use_scene(&mut self, name: &str, now_ms: f64) -> bool {
        if !self.phases.contains_key(name) {
            warn!("scene `{name}` is not registered");
            return false;
        }
        info!("scene -> {name}");
        self.active = Some(name.to_string());
        self.start_time = now_ms;
        self.frame = BEFORE_FIRST_FRAME;
        true
    }

    /// Run the active phase once.  No-op when nothing is active.
    pub fn update(&mut self, now_ms: f64, ctx: &mut C) {
        let Some(phase) = self.active.as_deref().and_then(|name| self.phases.get_mut(name)) else {
            return;
        };
        if self.frame == BEFORE_FIRST_FRAME {
            self.frame = 0;
        }
        let mut cue = Cue {
            elapsed: ((now_ms - self.start_time) / 1000.0) as f32,
            frame: self.frame,
            request: None,
        };
        phase(&mut cue, ctx);
        self.frame += 1;

        if let Some(next) = cue.request {
            self.use_scene(&next, now_ms);
        }
    }

    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn frame(&self) -> i64 {
        self.frame
    }

    pub fn start_time(&self) -> f64 {
        self.start_time
    }
}
