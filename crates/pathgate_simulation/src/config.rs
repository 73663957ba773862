//! MovementConfig — тюнинг контроллера и headless stand-in'ов
//!
//! Загружается из JSON (все поля опциональны, отсутствующие берутся из Default).

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Окно cooldown'а после старта door interaction (секунды)
pub const DOOR_COOLDOWN_SECS: f32 = 1.4;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not parse movement config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("movement config field `{field}` must be positive and finite, got {value}")]
    OutOfRange { field: &'static str, value: f64 },

    /// Аватар, ждущий снаружи trigger volume, после resume заходит в него заново
    #[error(
        "door wait point ({wait_distance} + stopping distance {stopping_distance}) \
         must stay inside the trigger volume (half extent {half_extent})"
    )]
    WaitPointOutsideTrigger {
        wait_distance: f32,
        stopping_distance: f32,
        half_extent: f32,
    },
}

/// Параметры движения и door interaction
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    /// Сколько секунд повторный вход в door trigger игнорируется
    pub door_cooldown_secs: f32,
    /// Радиус "прибыл" вокруг goal (метры)
    pub stopping_distance: f32,
    /// Скорость steering агента (м/с)
    pub move_speed: f32,
    /// Насколько перед дверью аватар ждёт анимацию (метры от центра двери)
    pub door_wait_distance: f32,
    /// Длительность анимации открытия двери (секунды)
    pub door_animation_secs: f32,
    /// Half extents trigger volume двери
    pub door_trigger_half_extents: [f32; 3],
    /// Частота FixedUpdate (Hz)
    pub fixed_hz: f64,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            door_cooldown_secs: DOOR_COOLDOWN_SECS,
            stopping_distance: 0.1,
            move_speed: 3.5,
            door_wait_distance: 0.3,
            door_animation_secs: 2.0,
            door_trigger_half_extents: [0.75, 1.0, 0.75],
            fixed_hz: 60.0,
        }
    }
}

impl MovementConfig {
    pub fn from_json(source: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let checks: [(&'static str, f64); 6] = [
            ("door_cooldown_secs", self.door_cooldown_secs as f64),
            ("stopping_distance", self.stopping_distance as f64),
            ("move_speed", self.move_speed as f64),
            ("door_wait_distance", self.door_wait_distance as f64),
            ("door_animation_secs", self.door_animation_secs as f64),
            ("fixed_hz", self.fixed_hz),
        ];

        for (field, value) in checks {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::OutOfRange { field, value });
            }
        }

        for extent in self.door_trigger_half_extents {
            if !extent.is_finite() || extent <= 0.0 {
                return Err(ConfigError::OutOfRange {
                    field: "door_trigger_half_extents",
                    value: extent as f64,
                });
            }
        }

        // Wait point лежит в плоскости XZ; аватар паркуется до stopping_distance от него
        let [half_x, _, half_z] = self.door_trigger_half_extents;
        let half_extent = half_x.min(half_z);
        if self.door_wait_distance + self.stopping_distance >= half_extent {
            return Err(ConfigError::WaitPointOutsideTrigger {
                wait_distance: self.door_wait_distance,
                stopping_distance: self.stopping_distance,
                half_extent,
            });
        }

        Ok(())
    }

    pub fn trigger_half_extents(&self) -> Vec3 {
        Vec3::from_array(self.door_trigger_half_extents)
    }
}
