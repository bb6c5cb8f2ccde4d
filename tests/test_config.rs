use std::io::Write;

use crossterm::event::KeyCode;
use platformer::config::{GameConfig, KeyConfig, DEFAULT_FIRE_RATE_MS};
use platformer::error::ConfigError;
use platformer::input::{parse_key, Action, FrameInput, KeyBindings};

fn config_file(json: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(json.as_bytes()).unwrap();
    file
}

// ── Config loading ────────────────────────────────────────────────────────────

#[test]
fn partial_file_keeps_defaults() {
    let file = config_file(r#"{ "fire_rate_ms": 100, "keys": { "shoot": ["x", "space"] } }"#);
    let config = GameConfig::load(file.path()).unwrap();
    assert_eq!(config.fire_rate_ms, 100);
    assert_eq!(config.frame_ms, GameConfig::default().frame_ms);
    assert_eq!(config.keys.shoot, vec!["x".to_string(), "space".to_string()]);
    assert_eq!(config.keys.up, KeyConfig::default().up);
}

#[test]
fn no_path_means_defaults() {
    let config = GameConfig::load_or_default(None).unwrap();
    assert_eq!(config, GameConfig::default());
    assert_eq!(config.fire_rate_ms, DEFAULT_FIRE_RATE_MS);
}

#[test]
fn unknown_field_is_rejected() {
    let file = config_file(r#"{ "fire_rate": 100 }"#);
    assert!(matches!(GameConfig::load(file.path()), Err(ConfigError::Parse { .. })));
}

#[test]
fn bad_key_name_is_rejected() {
    let file = config_file(r#"{ "keys": { "up": ["hyperspace"] } }"#);
    match GameConfig::load(file.path()) {
        Err(ConfigError::UnknownKey { action, name }) => {
            assert_eq!(action, "up");
            assert_eq!(name, "hyperspace");
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn unbound_action_is_rejected() {
    let file = config_file(r#"{ "keys": { "shoot": [] } }"#);
    assert!(matches!(GameConfig::load(file.path()), Err(ConfigError::UnboundAction(_))));
}

#[test]
fn non_positive_scale_is_rejected() {
    let file = config_file(r#"{ "scale": { "px_per_col": 0, "px_per_row": 20 } }"#);
    assert!(matches!(GameConfig::load(file.path()), Err(ConfigError::BadScale { .. })));
}

#[test]
fn non_positive_cell_size_is_rejected() {
    for json in [r#"{ "cell_size": 0 }"#, r#"{ "cell_size": -80 }"#] {
        let file = config_file(json);
        assert!(matches!(GameConfig::load(file.path()), Err(ConfigError::BadCellSize(_))));
    }
}

#[test]
fn zero_frame_time_is_rejected() {
    let file = config_file(r#"{ "frame_ms": 0 }"#);
    assert!(matches!(GameConfig::load(file.path()), Err(ConfigError::ZeroFrameTime)));
}

#[test]
fn missing_file_is_a_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = GameConfig::load(&dir.path().join("absent.json"));
    assert!(matches!(result, Err(ConfigError::Read { .. })));
}

// ── Key bindings ──────────────────────────────────────────────────────────────

#[test]
fn key_names() {
    assert_eq!(parse_key("Up"), Some(KeyCode::Up));
    assert_eq!(parse_key("space"), Some(KeyCode::Char(' ')));
    assert_eq!(parse_key("W"), Some(KeyCode::Char('w')));
    assert_eq!(parse_key("return"), Some(KeyCode::Enter));
    assert_eq!(parse_key("ab"), None);
    assert_eq!(parse_key(""), None);
}

#[test]
fn default_bindings_cover_arrows_and_wasd() {
    let keys = KeyBindings::default();
    assert!(keys.matches(Action::Up, &KeyCode::Up));
    assert!(keys.matches(Action::Up, &KeyCode::Char('w')));
    assert!(keys.matches(Action::Left, &KeyCode::Char('a')));
    assert!(keys.matches(Action::Shoot, &KeyCode::Char(' ')));
    assert!(!keys.matches(Action::Shoot, &KeyCode::Char('w')));
}

#[test]
fn default_bindings_match_default_key_config() {
    let built = KeyBindings::default();
    let parsed = KeyBindings::from_config(&KeyConfig::default()).unwrap();
    for action in Action::ALL {
        assert_eq!(built.keys(action), parsed.keys(action), "{}", action.name());
        assert!(!built.keys(action).is_empty());
    }
}

#[test]
fn bindings_ignore_letter_case() {
    let keys = KeyBindings::default();
    assert!(keys.matches(Action::Up, &KeyCode::Char('W')));
    assert_eq!(keys.actions_for(&KeyCode::Char('D')), vec![Action::Right]);
}

#[test]
fn frame_input_axes() {
    let mut input = FrameInput::default();
    input.set(Action::Left);
    input.set(Action::Up);
    input.set(Action::Shoot);
    assert_eq!((input.horizontal(), input.vertical()), (-1, -1));
    input.set(Action::Right);
    assert_eq!(input.horizontal(), 0);
}
