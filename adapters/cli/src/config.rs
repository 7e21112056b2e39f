//! Optional TOML overrides for the window and both entities.

use evade_core::{Aabb, Command, EntityColor, EntitySnapshot, Position, Size};
use evade_world::{query, World};
use serde::Deserialize;
use thiserror::Error;

const DEFAULT_WINDOW_WIDTH: u32 = 800;
const DEFAULT_WINDOW_HEIGHT: u32 = 600;

/// Settings loaded from `--config`. Every key is optional.
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct GameConfig {
    pub(crate) window: WindowConfig,
    pub(crate) player: EntityOverrides,
    pub(crate) enemy: EntityOverrides,
}

/// Initial window extent in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct WindowConfig {
    pub(crate) width: u32,
    pub(crate) height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WINDOW_WIDTH,
            height: DEFAULT_WINDOW_HEIGHT,
        }
    }
}

/// Per-entity values replacing the world's defaults when present.
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct EntityOverrides {
    origin: Option<Position>,
    size: Option<Size>,
    speed: Option<f32>,
    color: Option<EntityColor>,
}

/// Reasons a configuration file is rejected.
#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    /// The file is not valid TOML or does not match the expected layout.
    #[error("failed to parse configuration")]
    Parse(#[from] toml::de::Error),
    /// A dimension or speed is zero or negative.
    #[error("`{field}` must be positive (received {value})")]
    NonPositive { field: String, value: f32 },
    /// A value is NaN or infinite.
    #[error("`{field}` must be finite (received {value})")]
    NonFinite { field: String, value: f32 },
    /// The window would open with no area.
    #[error("window size must be positive (received {width}x{height})")]
    EmptyWindow { width: u32, height: u32 },
}

impl GameConfig {
    /// Parses and validates a configuration document.
    pub(crate) fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let WindowConfig { width, height } = self.window;
        if width == 0 || height == 0 {
            return Err(ConfigError::EmptyWindow { width, height });
        }
        self.player.validate("player")?;
        self.enemy.validate("enemy")
    }

    /// Commands that install the configured entities into a fresh world.
    pub(crate) fn entity_commands(&self) -> Vec<Command> {
        let defaults = World::new();
        vec![
            self.player.configure(&query::player(&defaults)),
            self.enemy.configure(&query::enemy(&defaults)),
        ]
    }
}

impl EntityOverrides {
    fn validate(&self, section: &str) -> Result<(), ConfigError> {
        if let Some(origin) = self.origin {
            finite(section, "origin.x", origin.x())?;
            finite(section, "origin.y", origin.y())?;
        }
        if let Some(size) = self.size {
            positive(section, "size.width", size.width())?;
            positive(section, "size.height", size.height())?;
        }
        if let Some(speed) = self.speed {
            positive(section, "speed", speed)?;
        }
        Ok(())
    }

    fn configure(&self, defaults: &EntitySnapshot) -> Command {
        let origin = self.origin.unwrap_or_else(|| defaults.bounds.origin());
        let size = self.size.unwrap_or_else(|| defaults.bounds.size());
        Command::ConfigureEntity {
            kind: defaults.kind,
            bounds: Aabb::new(origin, size),
            speed: self.speed.unwrap_or(defaults.speed),
            color: self.color.unwrap_or(defaults.color),
        }
    }
}

fn finite(section: &str, key: &str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonFinite {
            field: format!("{section}.{key}"),
            value,
        })
    }
}

fn positive(section: &str, key: &str, value: f32) -> Result<(), ConfigError> {
    finite(section, key, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive {
            field: format!("{section}.{key}"),
            value,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use evade_core::EntityKind;

    fn configured(command: &Command) -> (EntityKind, Aabb, f32, EntityColor) {
        match command {
            Command::ConfigureEntity {
                kind,
                bounds,
                speed,
                color,
            } => (*kind, *bounds, *speed, *color),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn empty_document_keeps_defaults() {
        let config = GameConfig::from_toml("").expect("empty config is valid");

        assert_eq!(config, GameConfig::default());
        let commands = config.entity_commands();
        let (kind, bounds, speed, color) = configured(&commands[0]);
        assert_eq!(kind, EntityKind::Player);
        assert_eq!(bounds, Aabb::from_rect(400.0, 300.0, 50.0, 50.0));
        assert_eq!(speed, 300.0);
        assert_eq!(color, EntityColor::from_rgb(255, 50, 50));
        let (kind, bounds, speed, _) = configured(&commands[1]);
        assert_eq!(kind, EntityKind::Enemy);
        assert_eq!(bounds, Aabb::from_rect(100.0, 100.0, 50.0, 50.0));
        assert_eq!(speed, 150.0);
    }

    #[test]
    fn partial_overrides_merge_with_defaults() {
        let config = GameConfig::from_toml(
            r#"
            [window]
            width = 1024

            [enemy]
            speed = 220.0
            size = { width = 30.0, height = 40.0 }
            color = { red = 0, green = 200, blue = 0 }
            "#,
        )
        .expect("partial config is valid");

        assert_eq!(config.window.width, 1024);
        assert_eq!(config.window.height, DEFAULT_WINDOW_HEIGHT);
        let commands = config.entity_commands();
        let (_, bounds, speed, color) = configured(&commands[1]);
        assert_eq!(bounds, Aabb::from_rect(100.0, 100.0, 30.0, 40.0));
        assert_eq!(speed, 220.0);
        assert_eq!(color, EntityColor::from_rgb(0, 200, 0));
    }

    #[test]
    fn rejects_non_positive_speed() {
        let error = GameConfig::from_toml("[player]\nspeed = 0.0\n")
            .expect_err("zero speed must be rejected");

        assert!(matches!(
            error,
            ConfigError::NonPositive { ref field, .. } if field == "player.speed"
        ));
    }

    #[test]
    fn rejects_non_finite_values() {
        let error = GameConfig::from_toml("[enemy]\norigin = { x = nan, y = 0.0 }\n")
            .expect_err("nan origin must be rejected");
        assert!(matches!(
            error,
            ConfigError::NonFinite { ref field, .. } if field == "enemy.origin.x"
        ));

        let error = GameConfig::from_toml("[player]\nsize = { width = inf, height = 10.0 }\n")
            .expect_err("infinite size must be rejected");
        assert!(matches!(
            error,
            ConfigError::NonFinite { ref field, .. } if field == "player.size.width"
        ));
    }

    #[test]
    fn rejects_empty_window() {
        let error = GameConfig::from_toml("[window]\nheight = 0\n")
            .expect_err("zero height must be rejected");

        assert!(matches!(
            error,
            ConfigError::EmptyWindow {
                width: 800,
                height: 0
            }
        ));
    }

    #[test]
    fn rejects_unknown_keys() {
        let error = GameConfig::from_toml("[player]\nvelocity = 3.0\n")
            .expect_err("unknown keys must be rejected");

        assert!(matches!(error, ConfigError::Parse(_)));
    }
}
