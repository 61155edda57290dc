/// Game entity types: pure data, behaviour lives in `compute` and `player`.
///
/// Every character shares one `Body`; what a character *is* lives in its
/// `Role`, which only carries the fields that role adds.

use crate::surface::{Color, ImageHandle};
use crate::vector::Vector2;

// ── Shared state ──────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Body {
    /// Centre of the character.
    pub position: Vector2,
    /// Travel direction, scaled by the role's speed each tick.
    pub vector: Vector2,
    pub width: f32,
    pub height: f32,
    /// `> 0` alive, `<= 0` inactive and recyclable.
    pub life: i32,
    pub image: ImageHandle,
}

impl Body {
    pub fn new(width: f32, height: f32, image: ImageHandle) -> Self {
        Self {
            position: Vector2::default(),
            vector: Vector2::default(),
            width,
            height,
            life: 0,
            image,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.life > 0
    }

    pub fn is_ready(&self) -> bool {
        self.image.is_ready()
    }

    /// Overwrites both components; unlike `Vector2::set` nothing is kept.
    pub fn set_vector(&mut self, x: f32, y: f32) {
        self.vector = Vector2::new(x, y);
    }
}

// ── Roles ─────────────────────────────────────────────────────────────────────

/// Which field edge retires a shot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Heading {
    Rightward,
    Leftward,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ShotState {
    pub speed: f32,
    /// Life taken from whatever the shot hits.
    pub power: i32,
    pub heading: Heading,
}

/// Enemy behaviour tag.  Only `Default` has a behaviour table today.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnemyType {
    Default,
}

#[derive(Clone, Debug, PartialEq)]
pub struct EnemyState {
    pub kind: EnemyType,
    /// Ticks since spawn; the first tick after spawn sees 0.
    pub frame: u32,
    pub speed: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerPhase {
    Entering,
    Active,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PlayerState {
    pub is_coming: bool,
    /// Timestamp (ms) at which the entry animation started.
    pub coming_start: f64,
    pub coming_origin_x: f32,
    pub coming_end_position: Vector2,
    pub entry_speed: f32,
    pub speed: f32,
    /// Signed cooldown: firing is allowed once this reaches 0.
    pub shot_check_counter: i32,
    pub shot_interval: i32,
}

impl PlayerState {
    pub fn phase(&self) -> PlayerPhase {
        if self.is_coming {
            PlayerPhase::Entering
        } else {
            PlayerPhase::Active
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Role {
    Shot(ShotState),
    Enemy(EnemyState),
    Player(PlayerState),
}

#[derive(Clone, Debug)]
pub struct Character {
    pub body: Body,
    pub role: Role,
}

impl Character {
    pub fn shot(width: f32, height: f32, image: ImageHandle, speed: f32, heading: Heading) -> Self {
        let mut body = Body::new(width, height, image);
        body.vector = match heading {
            Heading::Rightward => Vector2::new(1.0, 0.0),
            Heading::Leftward => Vector2::new(-1.0, 0.0),
        };
        Self {
            body,
            role: Role::Shot(ShotState { speed, power: 1, heading }),
        }
    }

    pub fn enemy(width: f32, height: f32, image: ImageHandle, speed: f32) -> Self {
        Self {
            body: Body::new(width, height, image),
            role: Role::Enemy(EnemyState { kind: EnemyType::Default, frame: 0, speed }),
        }
    }

    pub fn player(width: f32, height: f32, image: ImageHandle, speed: f32, shot_interval: i32) -> Self {
        Self {
            body: Body::new(width, height, image),
            role: Role::Player(PlayerState {
                is_coming: false,
                coming_start: 0.0,
                coming_origin_x: 0.0,
                coming_end_position: Vector2::default(),
                entry_speed: 50.0,
                speed,
                shot_check_counter: 0,
                shot_interval,
            }),
        }
    }

    pub fn as_shot_mut(&mut self) -> Option<(&mut Body, &mut ShotState)> {
        match &mut self.role {
            Role::Shot(state) => Some((&mut self.body, state)),
            _ => None,
        }
    }

    pub fn as_enemy_mut(&mut self) -> Option<(&mut Body, &mut EnemyState)> {
        match &mut self.role {
            Role::Enemy(state) => Some((&mut self.body, state)),
            _ => None,
        }
    }

    pub fn as_player_mut(&mut self) -> Option<(&mut Body, &mut PlayerState)> {
        match &mut self.role {
            Role::Player(state) => Some((&mut self.body, state)),
            _ => None,
        }
    }

    pub fn player_state(&self) -> Option<&PlayerState> {
        match &self.role {
            Role::Player(state) => Some(state),
            _ => None,
        }
    }

    pub fn enemy_state(&self) -> Option<&EnemyState> {
        match &self.role {
            Role::Enemy(state) => Some(state),
            _ => None,
        }
    }
}

// ── Background ────────────────────────────────────────────────────────────────

/// Scrolling starfield particle.  Wraps instead of dying.
#[derive(Clone, Debug)]
pub struct BackgroundStar {
    pub position: Vector2,
    pub size: f32,
    pub speed: f32,
    pub color: Color,
}
