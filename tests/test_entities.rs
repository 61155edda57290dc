mod support;

use support::ready_image;
use viper_shooter::entities::{Body, Character, EnemyType, Heading, PlayerPhase, Role};
use viper_shooter::surface::{ImageHandle, InputState, Key, Readiness};
use viper_shooter::vector::Vector2;

#[test]
fn vector_set_leaves_missing_components_alone() {
    let mut v = Vector2::new(3.0, 4.0);
    v.set(None, Some(9.0));
    assert_eq!(v, Vector2::new(3.0, 9.0));
    v.set(Some(-1.0), None);
    assert_eq!(v, Vector2::new(-1.0, 9.0));
    v.set(None, None);
    assert_eq!(v, Vector2::new(-1.0, 9.0));
}

#[test]
fn vector_distance() {
    let a = Vector2::new(0.0, 0.0);
    let b = Vector2::new(3.0, 4.0);
    assert_eq!(a.distance(&b), 5.0);
    assert_eq!(b.distance(&a), 5.0);
}

#[test]
fn body_set_vector_overwrites_both_components() {
    let mut body = Body::new(10.0, 10.0, ready_image("x.png"));
    body.set_vector(1.0, 2.0);
    body.set_vector(0.0, -1.0);
    assert_eq!(body.vector, Vector2::new(0.0, -1.0));
}

#[test]
fn new_bodies_start_inactive() {
    let body = Body::new(10.0, 10.0, ready_image("x.png"));
    assert_eq!(body.life, 0);
    assert!(!body.is_alive());
}

#[test]
fn image_settles_exactly_once() {
    let image = ImageHandle::pending("a.png", 0);
    let shared = image.clone();
    assert_eq!(image.readiness(), Readiness::Loading);
    assert!(!image.is_ready());

    image.settle(Readiness::Ready);
    assert!(shared.is_ready());

    // Later outcomes are ignored.
    shared.settle(Readiness::Failed);
    assert_eq!(image.readiness(), Readiness::Ready);
}

#[test]
fn settle_with_loading_is_ignored() {
    let image = ImageHandle::pending("a.png", 0);
    image.settle(Readiness::Loading);
    image.settle(Readiness::Failed);
    assert_eq!(image.readiness(), Readiness::Failed);
}

#[test]
fn role_constructors_carry_only_their_fields() {
    let shot = Character::shot(8.0, 8.0, ready_image("s.png"), 7.0, Heading::Leftward);
    match &shot.role {
        Role::Shot(state) => {
            assert_eq!(state.speed, 7.0);
            assert_eq!(state.power, 1);
            assert_eq!(state.heading, Heading::Leftward);
        }
        other => panic!("unexpected role {other:?}"),
    }
    assert_eq!(shot.body.vector, Vector2::new(-1.0, 0.0));

    let mut enemy = Character::enemy(48.0, 48.0, ready_image("e.png"), 5.0);
    let state = enemy.enemy_state().expect("enemy role");
    assert_eq!(state.kind, EnemyType::Default);
    assert_eq!(state.frame, 0);
    assert!(enemy.as_shot_mut().is_none());
    assert!(enemy.as_player_mut().is_none());

    let player = Character::player(64.0, 64.0, ready_image("p.png"), 3.0, 10);
    let state = player.player_state().expect("player role");
    assert_eq!(state.phase(), PlayerPhase::Active);
    assert_eq!(state.shot_check_counter, 0);
    assert_eq!(state.shot_interval, 10);
}

#[test]
fn input_state_tracks_press_and_release() {
    let mut input = InputState::new();
    assert!(!input.is_held(Key::Fire));
    input.press(Key::Fire);
    input.press(Key::Up);
    assert!(input.is_held(Key::Fire));
    assert!(input.is_held(Key::Up));
    input.release(Key::Fire);
    assert!(!input.is_held(Key::Fire));
    assert!(input.is_held(Key::Up));
}
