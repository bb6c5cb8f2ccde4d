/// Input bindings: semantic actions mapped onto physical keys.

use crossterm::event::KeyCode;

use crate::config::KeyConfig;
use crate::error::ConfigError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    Up,
    Down,
    Left,
    Right,
    Shoot,
}

impl Action {
    pub const ALL: [Action; 5] = [Action::Up, Action::Down, Action::Left, Action::Right, Action::Shoot];

    pub fn name(&self) -> &'static str {
        match self {
            Action::Up => "up",
            Action::Down => "down",
            Action::Left => "left",
            Action::Right => "right",
            Action::Shoot => "shoot",
        }
    }
}

/// Parse a key name such as `"up"`, `"space"` or `"w"`.
pub fn parse_key(name: &str) -> Option<KeyCode> {
    let lower = name.trim().to_ascii_lowercase();
    let code = match lower.as_str() {
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "space" => KeyCode::Char(' '),
        "enter" | "return" => KeyCode::Enter,
        "tab" => KeyCode::Tab,
        "backspace" => KeyCode::Backspace,
        _ => {
            let mut chars = lower.chars();
            match (chars.next(), chars.next()) {
                (Some(ch), None) if !ch.is_whitespace() => KeyCode::Char(ch),
                _ => return None,
            }
        }
    };
    Some(code)
}

#[derive(Clone, Debug)]
pub struct KeyBindings {
    bindings: Vec<(Action, Vec<KeyCode>)>,
}

impl KeyBindings {
    pub fn from_config(keys: &KeyConfig) -> Result<KeyBindings, ConfigError> {
        let mut bindings = Vec::with_capacity(Action::ALL.len());
        for action in Action::ALL {
            let names = keys.names(action);
            if names.is_empty() {
                return Err(ConfigError::UnboundAction(action.name().to_string()));
            }
            let codes = names
                .iter()
                .map(|name| {
                    parse_key(name).ok_or_else(|| ConfigError::UnknownKey {
                        action: action.name().to_string(),
                        name: name.clone(),
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            bindings.push((action, codes));
        }
        Ok(KeyBindings { bindings })
    }

    pub fn keys(&self, action: Action) -> &[KeyCode] {
        self.bindings
            .iter()
            .find(|(a, _)| *a == action)
            .map(|(_, codes)| codes.as_slice())
            .unwrap_or(&[])
    }

    /// Letter keys match regardless of case, so Caps Lock does not break
    /// movement.
    pub fn matches(&self, action: Action, code: &KeyCode) -> bool {
        let folded = fold_case(code);
        self.keys(action).iter().any(|k| fold_case(k) == folded)
    }

    pub fn actions_for(&self, code: &KeyCode) -> Vec<Action> {
        Action::ALL
            .into_iter()
            .filter(|a| self.matches(*a, code))
            .collect()
    }
}

/// Arrow keys plus WASD, and space to shoot.  Mirrors `KeyConfig::default`.
impl Default for KeyBindings {
    fn default() -> Self {
        KeyBindings {
            bindings: vec![
                (Action::Up, vec![KeyCode::Up, KeyCode::Char('w')]),
                (Action::Down, vec![KeyCode::Down, KeyCode::Char('s')]),
                (Action::Left, vec![KeyCode::Left, KeyCode::Char('a')]),
                (Action::Right, vec![KeyCode::Right, KeyCode::Char('d')]),
                (Action::Shoot, vec![KeyCode::Char(' ')]),
            ],
        }
    }
}

fn fold_case(code: &KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => *other,
    }
}

/// Directional actions held during one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl FrameInput {
    pub fn set(&mut self, action: Action) {
        match action {
            Action::Up => self.up = true,
            Action::Down => self.down = true,
            Action::Left => self.left = true,
            Action::Right => self.right = true,
            Action::Shoot => {}
        }
    }

    /// Horizontal intent: -1, 0 or 1.  Opposite keys cancel out.
    pub fn horizontal(&self) -> i8 {
        self.right as i8 - self.left as i8
    }

    pub fn vertical(&self) -> i8 {
        self.down as i8 - self.up as i8
    }
}
