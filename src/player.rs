/// The player's ship: timed entry animation, then keyboard-driven movement and
/// a cooldown-gated gun.

use log::{debug, info};

use crate::compute::{draw_body, fire};
use crate::entities::Character;
use crate::pool::Pool;
use crate::surface::{InputState, Key, Surface};
use crate::vector::Vector2;

/// Spread pair directions, fired alongside the straight shot.
const SPREAD_VECTORS: [(f32, f32); 2] = [(1.0, -0.2), (1.0, 0.2)];

/// Opacity of the blinking cue shown while the ship flies in.
const ENTRY_BLINK_ALPHA: f32 = 0.5;

/// Shot pools the player fires into.
pub struct Armory<'a> {
    pub shots: &'a mut Pool,
    pub spread: Option<&'a mut Pool>,
}

/// Start the entry animation from `(start_x, start_y)` towards
/// `(end_x, end_y)`.  Only the horizontal component is animated.
pub fn set_coming(
    player: &mut Character,
    start_x: f32,
    start_y: f32,
    end_x: f32,
    end_y: f32,
    now_ms: f64,
) {
    let Some((body, state)) = player.as_player_mut() else {
        return;
    };
    state.is_coming = true;
    state.coming_start = now_ms;
    state.coming_origin_x = start_x;
    state.coming_end_position = Vector2::new(end_x, end_y);
    body.position.set(Some(start_x), Some(start_y));
}

/// One player frame.  Leaves the surface fully opaque on return.
pub fn tick_player<S: Surface + ?Sized>(
    player: &mut Character,
    surface: &mut S,
    input: &InputState,
    now_ms: f64,
    armory: Armory<'_>,
) {
    let bounds = surface.bounds();
    let Some((body, state)) = player.as_player_mut() else {
        return;
    };
    if !body.is_alive() {
        return;
    }

    if state.is_coming {
        let elapsed = ((now_ms - state.coming_start) / 1000.0) as f32;
        let mut x = state.coming_origin_x + elapsed * state.entry_speed;
        if x >= state.coming_end_position.x {
            state.is_coming = false;
            x = state.coming_end_position.x;
            info!("player entry finished after {elapsed:.2}s");
        }
        body.position.set(Some(x), None);

        if (now_ms.floor() as i64).rem_euclid(100) < 50 {
            surface.set_global_alpha(ENTRY_BLINK_ALPHA);
        }
    } else {
        if input.is_held(Key::Left) {
            body.position.x -= state.speed;
        }
        if input.is_held(Key::Right) {
            body.position.x += state.speed;
        }
        if input.is_held(Key::Up) {
            body.position.y -= state.speed;
        }
        if input.is_held(Key::Down) {
            body.position.y += state.speed;
        }
        body.position.x = body.position.x.clamp(0.0, bounds.width);
        body.position.y = body.position.y.clamp(0.0, bounds.height);

        if input.is_held(Key::Fire) && state.shot_check_counter >= 0 {
            let (x, y) = (body.position.x, body.position.y);
            let mut fired = fire(armory.shots, x, y, 1.0, 0.0);
            if let Some(spread) = armory.spread {
                // One first-fit slot per direction.
                for (vx, vy) in SPREAD_VECTORS {
                    fired |= fire(spread, x, y, vx, vy);
                }
            }
            if fired {
                state.shot_check_counter = -state.shot_interval;
                debug!("player fired at ({x:.1}, {y:.1})");
            }
        }
        state.shot_check_counter += 1;
    }

    draw_body(body, surface);
    surface.set_global_alpha(1.0);
}
