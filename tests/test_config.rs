use std::time::Duration;

use viper_shooter::config::GameConfig;
use viper_shooter::error::GameError;
use viper_shooter::surface::Color;

#[test]
fn defaults_match_the_reference_tuning() {
    let config = GameConfig::default();
    assert_eq!(config.field.width, 640.0);
    assert_eq!(config.field.height, 480.0);
    assert_eq!(config.player.entry_speed, 50.0);
    assert_eq!(config.player.entry_origin_x, -50.0);
    assert_eq!(config.player.entry_end_x, 32.0);
    assert_eq!(config.shots.speed, 7.0);
    assert_eq!(config.shots.enemy_speed, 10.0);
    assert_eq!(config.enemy.speed, 5.0);
    assert_eq!(config.frame_interval(), Duration::from_millis(16));
}

#[test]
fn partial_file_keeps_other_defaults() {
    let config = GameConfig::from_toml(
        r#"
        frame_ms = 20

        [player]
        shot_interval = 6

        [stars]
        color = { r = 1, g = 2, b = 3 }
        "#,
    )
    .expect("valid config");
    assert_eq!(config.frame_ms, 20);
    assert_eq!(config.player.shot_interval, 6);
    assert_eq!(config.player.speed, 3.0);
    assert_eq!(config.stars.color, Color::rgb(1, 2, 3));
    assert_eq!(config.stars.count, 100);
}

#[test]
fn odd_spread_capacity_is_accepted() {
    let config = GameConfig::from_toml("[shots]\nspread_capacity = 3\n").unwrap();
    assert_eq!(config.shots.spread_capacity, 3);
}

#[test]
fn malformed_toml_is_a_config_error() {
    let err = GameConfig::from_toml("frame_ms = \"fast\"").unwrap_err();
    assert!(matches!(err, GameError::Config(_)));
    assert!(err.to_string().starts_with("invalid config"));
}

#[test]
fn missing_file_is_an_io_error() {
    let err = GameConfig::from_file("/definitely/not/here.toml").unwrap_err();
    assert!(matches!(err, GameError::Io(_)));
}
