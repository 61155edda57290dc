/// Per-frame game logic for shots, enemies and the starfield.
///
/// Every function mutates the characters it is handed in place; nothing here
/// owns state.  The only randomness (star placement) comes through an injected
/// RNG so tests can seed it.

use log::{debug, info};
use rand::Rng;

use crate::config::StarConfig;
use crate::entities::{BackgroundStar, Body, Character, EnemyType, Heading, Role};
use crate::pool::Pool;
use crate::surface::{Bounds, Surface};
use crate::vector::Vector2;

// ── Shared kinematics ─────────────────────────────────────────────────────────

/// `position += vector * speed`
pub fn advance(body: &mut Body, speed: f32) {
    body.position.x += body.vector.x * speed;
    body.position.y += body.vector.y * speed;
}

/// Draw the body's image centred on its position.  Dead or not-yet-loaded
/// bodies are skipped.
pub fn draw_body<S: Surface + ?Sized>(body: &Body, surface: &mut S) {
    if !body.is_alive() || !body.is_ready() {
        return;
    }
    surface.draw_image(
        &body.image,
        body.position.x - body.width / 2.0,
        body.position.y - body.height / 2.0,
        body.width,
        body.height,
    );
}

fn left_field(body: &Body) -> bool {
    body.position.x + body.width < 0.0
}

/// Enemies retire as soon as their right edge reaches the left border.
fn enemy_left_field(body: &Body) -> bool {
    body.position.x + body.width <= 0.0
}

// ── Shots ─────────────────────────────────────────────────────────────────────

/// Place an inactive shot at `(x, y)` and bring it to life.  Already-active
/// shots are left untouched.
pub fn activate_shot(shot: &mut Character, x: f32, y: f32) {
    if shot.body.is_alive() {
        return;
    }
    shot.body.position.set(Some(x), Some(y));
    shot.body.life = 1;
}

pub fn set_velocity(shot: &mut Character, vx: f32, vy: f32) {
    shot.body.set_vector(vx, vy);
}

pub fn shot_out_of_bounds(body: &Body, heading: Heading, bounds: Bounds) -> bool {
    match heading {
        Heading::Rightward => body.position.x + body.width > bounds.width,
        Heading::Leftward => left_field(body),
    }
}

/// Fire one shot from `pool` at `(x, y)` travelling along `(vx, vy)`.
/// Returns `false` when the pool is exhausted.
pub fn fire(pool: &mut Pool, x: f32, y: f32, vx: f32, vy: f32) -> bool {
    pool.allocate(|shot| {
        activate_shot(shot, x, y);
        set_velocity(shot, vx, vy);
    })
    .is_some()
}

/// One shot tick: bound check, then move, then hit test, then draw.
pub fn tick_shot<S: Surface + ?Sized>(shot: &mut Character, surface: &mut S, targets: &mut [Character]) {
    let bounds = surface.bounds();
    let Some((body, state)) = shot.as_shot_mut() else {
        return;
    };
    if !body.is_alive() {
        return;
    }
    if shot_out_of_bounds(body, state.heading, bounds) {
        body.life = 0;
        return;
    }
    advance(body, state.speed);

    for target in targets.iter_mut() {
        if !target.body.is_alive() {
            continue;
        }
        // A ship still flying in is untouchable.
        if let Role::Player(player) = &target.role {
            if player.is_coming {
                continue;
            }
        }
        let reach = (body.width + target.body.width) / 4.0;
        if body.position.distance(&target.body.position) <= reach {
            target.body.life = (target.body.life - state.power).max(0);
            body.life = 0;
            debug!(
                "shot hit target at ({:.1}, {:.1}), target life {}",
                target.body.position.x, target.body.position.y, target.body.life
            );
            if !target.body.is_alive() && matches!(target.role, Role::Player(_)) {
                info!(
                    "player destroyed at ({:.1}, {:.1})",
                    target.body.position.x, target.body.position.y
                );
            }
            break;
        }
    }

    draw_body(body, surface);
}

pub fn tick_shots<S: Surface + ?Sized>(pool: &mut Pool, surface: &mut S, targets: &mut [Character]) {
    for shot in pool.iter_mut() {
        tick_shot(shot, surface, targets);
    }
}

// ── Enemies ───────────────────────────────────────────────────────────────────

/// Firing schedule of an enemy type.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Behaviour {
    /// Frame (ticks since spawn) at which the single shot is emitted.
    pub fire_frame: u32,
    pub shot_vector: Vector2,
    pub shot_speed: f32,
}

pub fn behaviour(kind: EnemyType) -> Behaviour {
    match kind {
        EnemyType::Default => Behaviour {
            fire_frame: 50,
            shot_vector: Vector2::new(-1.0, 0.0),
            shot_speed: 10.0,
        },
    }
}

/// Place an enemy and reset its frame counter.
pub fn spawn_enemy(enemy: &mut Character, x: f32, y: f32, life: i32, kind: EnemyType) {
    let Some((body, state)) = enemy.as_enemy_mut() else {
        return;
    };
    body.position.set(Some(x), Some(y));
    body.life = life;
    state.kind = kind;
    state.frame = 0;
}

/// One enemy tick: scheduled fire, move, retire when off the left edge, draw.
/// The frame counter advances on every tick of a live enemy.
pub fn tick_enemy<S: Surface + ?Sized>(enemy: &mut Character, surface: &mut S, shots: &mut Pool) {
    let Some((body, state)) = enemy.as_enemy_mut() else {
        return;
    };
    if !body.is_alive() {
        return;
    }

    let plan = behaviour(state.kind);
    if state.frame == plan.fire_frame {
        let (x, y) = (body.position.x, body.position.y);
        let fired = shots
            .allocate(|shot| {
                activate_shot(shot, x, y);
                set_velocity(shot, plan.shot_vector.x, plan.shot_vector.y);
                if let Role::Shot(s) = &mut shot.role {
                    s.speed = plan.shot_speed;
                }
            })
            .is_some();
        if fired {
            debug!("enemy fired at ({x:.1}, {y:.1})");
        }
    }

    advance(body, state.speed);
    if enemy_left_field(body) {
        body.life = 0;
    }
    draw_body(body, surface);
    state.frame += 1;
}

pub fn tick_enemies<S: Surface + ?Sized>(pool: &mut Pool, surface: &mut S, shots: &mut Pool) {
    for enemy in pool.iter_mut() {
        tick_enemy(enemy, surface, shots);
    }
}

// ── Starfield ─────────────────────────────────────────────────────────────────

/// Scatter `cfg.count` stars across the field.  Stars drift leftward so the
/// ship appears to fly right.
pub fn scatter_stars(cfg: &StarConfig, bounds: Bounds, rng: &mut impl Rng) -> Vec<BackgroundStar> {
    let max_size = cfg.max_size.max(1.0);
    let max_speed = cfg.max_speed.max(1.0);
    (0..cfg.count)
        .map(|_| BackgroundStar {
            position: Vector2::new(
                rng.gen_range(0.0..bounds.width),
                rng.gen_range(0.0..bounds.height),
            ),
            size: rng.gen_range(1.0..=max_size),
            speed: -rng.gen_range(1.0..=max_speed),
            color: cfg.color,
        })
        .collect()
}

/// Move, draw, and wrap a star around the horizontal bound.
pub fn tick_star<S: Surface + ?Sized>(star: &mut BackgroundStar, surface: &mut S) {
    let bounds = surface.bounds();
    star.position.x += star.speed;
    surface.fill_rect(
        star.position.x - star.size / 2.0,
        star.position.y - star.size / 2.0,
        star.size,
        star.size,
        star.color,
    );
    if star.speed >= 0.0 && star.position.x + star.size > bounds.width {
        star.position.x = star.size;
    } else if star.speed < 0.0 && star.position.x + star.size < 0.0 {
        star.position.x = bounds.width - star.size;
    }
}
