/// The frame driver: owns every pool, the player and the scene scheduler, and
/// advances them once per frame in a fixed order.

use std::thread;
use std::time::Duration;

use log::{debug, info, warn};
use rand::Rng;

use crate::compute::{scatter_stars, spawn_enemy, tick_enemies, tick_shots, tick_star};
use crate::config::GameConfig;
use crate::entities::{BackgroundStar, Character, EnemyType, Heading, Role};
use crate::error::GameError;
use crate::player::{set_coming, tick_player, Armory};
use crate::pool::Pool;
use crate::scene::Scene;
use crate::surface::{Bounds, Color, ImageHandle, ImageLoader, InputState, Readiness, Surface};

/// Scene names registered by [`Game::new`].
pub const INTRO_SCENE: &str = "intro";
pub const INVADE_SCENE: &str = "invade";

/// Seconds the intro lasts before the first wave.
const INTRO_SECS: f32 = 2.0;
/// Frame of the invade phase at which it restarts itself.
const INVADE_LOOP_FRAME: i64 = 100;
/// How far past the right edge new enemies appear.
const ENEMY_SPAWN_MARGIN: f32 = 48.0;

/// Everything the scene phases may touch.
pub struct World {
    pub field: Bounds,
    pub player: Character,
    pub shots: Pool,
    pub spread_shots: Pool,
    pub enemies: Pool,
    pub enemy_shots: Pool,
    pub stars: Vec<BackgroundStar>,
    enemy_life: i32,
    entry: (f32, f32),
}

impl World {
    /// Spawn one default enemy at `(x, y)` flying left.  Dropped silently when
    /// the enemy pool is full.
    pub fn spawn_enemy(&mut self, x: f32, y: f32) -> bool {
        let life = self.enemy_life;
        let spawned = self
            .enemies
            .allocate(|enemy| {
                spawn_enemy(enemy, x, y, life, EnemyType::Default);
                enemy.body.set_vector(-1.0, 0.0);
            })
            .is_some();
        if spawned {
            debug!("enemy spawned at ({x:.1}, {y:.1})");
        }
        spawned
    }

    fn bodies(&self) -> impl Iterator<Item = &Character> {
        std::iter::once(&self.player)
            .chain(self.shots.iter())
            .chain(self.spread_shots.iter())
            .chain(self.enemies.iter())
            .chain(self.enemy_shots.iter())
    }
}

pub struct Game {
    pub world: World,
    pub scene: Scene<World>,
}

impl Game {
    /// Allocate every pool and request every image.  Nothing moves until
    /// [`Game::start`].
    pub fn new(config: &GameConfig, loader: &mut impl ImageLoader, rng: &mut impl Rng) -> Self {
        let field = config.field.bounds();
        let assets = &config.assets;
        let shot_cfg = &config.shots;

        let mut player = Character::player(
            config.player.width,
            config.player.height,
            loader.load(&assets.player),
            config.player.speed,
            config.player.shot_interval,
        );
        player.body.life = config.player.life;
        if let Role::Player(state) = &mut player.role {
            state.entry_speed = config.player.entry_speed;
        }

        let player_shot = loader.load(&assets.player_shot);
        let shot = |image| {
            let mut shot =
                Character::shot(shot_cfg.width, shot_cfg.height, image, shot_cfg.speed, Heading::Rightward);
            if let Role::Shot(state) = &mut shot.role {
                state.power = shot_cfg.power;
            }
            shot
        };
        let shots = Pool::filled(shot_cfg.capacity, || shot(player_shot.clone()));
        let spread_image = loader.load(&assets.spread_shot);
        let spread_shots = Pool::filled(shot_cfg.spread_capacity, || shot(spread_image.clone()));

        let enemy_image = loader.load(&assets.enemy);
        let enemies = Pool::filled(config.enemy.capacity, || {
            Character::enemy(config.enemy.width, config.enemy.height, enemy_image.clone(), config.enemy.speed)
        });

        let enemy_shot_image = loader.load(&assets.enemy_shot);
        let enemy_shots = Pool::filled(shot_cfg.enemy_capacity, || {
            Character::shot(
                shot_cfg.enemy_width,
                shot_cfg.enemy_height,
                enemy_shot_image.clone(),
                shot_cfg.enemy_speed,
                Heading::Leftward,
            )
        });

        let world = World {
            field,
            player,
            shots,
            spread_shots,
            enemies,
            enemy_shots,
            stars: scatter_stars(&config.stars, field, rng),
            enemy_life: config.enemy.life,
            entry: (config.player.entry_origin_x, config.player.entry_end_x),
        };

        let mut scene = Scene::new();
        scene.add(INTRO_SCENE, |cue, _world: &mut World| {
            if cue.elapsed() > INTRO_SECS {
                cue.use_scene(INVADE_SCENE);
            }
        });
        scene.add(INVADE_SCENE, |cue, world: &mut World| {
            if cue.frame() == 0 {
                let (x, y) = (world.field.width + ENEMY_SPAWN_MARGIN, world.field.height / 2.0);
                world.spawn_enemy(x, y);
            }
            if cue.frame() == INVADE_LOOP_FRAME {
                cue.use_scene(INVADE_SCENE);
            }
        });

        Self { world, scene }
    }

    /// Combined readiness of every image the game holds.  `Failed` wins over
    /// `Loading`.
    pub fn readiness(&self) -> Readiness {
        let mut readiness = Readiness::Ready;
        for character in self.world.bodies() {
            match character.body.image.readiness() {
                Readiness::Failed => return Readiness::Failed,
                Readiness::Loading => readiness = Readiness::Loading,
                Readiness::Ready => {}
            }
        }
        readiness
    }

    fn failed_image(&self) -> Option<&ImageHandle> {
        let world = &self.world;
        let player = &world.player.body.image;
        if player.readiness() == Readiness::Failed {
            return Some(player);
        }
        [&world.shots, &world.spread_shots, &world.enemies, &world.enemy_shots]
            .into_iter()
            .find_map(|pool| pool.first_failed())
    }

    /// Pump `loader` and re-check every `poll_interval` until all images are
    /// ready.  There is no timeout; a failed image ends the wait with an error.
    pub fn wait_until_ready(
        &self,
        loader: &mut impl ImageLoader,
        poll_interval: Duration,
    ) -> Result<(), GameError> {
        loop {
            loader.pump();
            match self.readiness() {
                Readiness::Ready => {
                    info!("all images ready");
                    return Ok(());
                }
                Readiness::Failed => {
                    let path = self
                        .failed_image()
                        .map(|image| image.path().to_string())
                        .unwrap_or_default();
                    warn!("image `{path}` failed to load");
                    return Err(GameError::AssetLoad { path });
                }
                Readiness::Loading => thread::sleep(poll_interval),
            }
        }
    }

    /// Begin the player's entry animation and the intro scene.
    pub fn start(&mut self, now_ms: f64) {
        let (origin_x, end_x) = self.world.entry;
        let y = self.world.field.height / 2.0;
        set_coming(&mut self.world.player, origin_x, y, end_x, y, now_ms);
        self.scene.use_scene(INTRO_SCENE, now_ms);
    }

    /// Advance and draw one frame.
    pub fn frame<S: Surface + ?Sized>(&mut self, surface: &mut S, input: &InputState, now_ms: f64) {
        let bounds = surface.bounds();
        surface.set_global_alpha(1.0);
        surface.fill_rect(0.0, 0.0, bounds.width, bounds.height, Color::BLACK);

        let world = &mut self.world;
        for star in &mut world.stars {
            tick_star(star, surface);
        }

        self.scene.update(now_ms, world);

        tick_player(
            &mut world.player,
            surface,
            input,
            now_ms,
            Armory {
                shots: &mut world.shots,
                spread: Some(&mut world.spread_shots),
            },
        );
        tick_enemies(&mut world.enemies, surface, &mut world.enemy_shots);
        tick_shots(&mut world.shots, surface, world.enemies.as_mut_slice());
        tick_shots(&mut world.spread_shots, surface, world.enemies.as_mut_slice());
        tick_shots(&mut world.enemy_shots, surface, std::slice::from_mut(&mut world.player));
    }
}
