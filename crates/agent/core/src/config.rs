//! Agent tuning parameters.
//!
//! Every archetype starts from the `DEFAULT_*` constants below and overrides
//! what makes it distinct. Catalogs loaded by `agent-content` deserialize
//! straight into [`AgentConfig`] when the `serde` feature is enabled.

use crate::env::Layers;

/// Agent archetype. Selects which branches the preset tree contains.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Archetype {
    /// Chases and shoots once it has spotted the target, idles otherwise.
    #[default]
    Grunt,
    /// Walks a waypoint route until it spots the target.
    Patroller,
    /// Heavy enemy that may retreat when badly hurt.
    Boss,
    /// Squad member that shields its most wounded ally.
    Support,
}

/// Which health value the fallback threshold is a fraction of.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HealthBasis {
    /// `health <= threshold * health`.
    ///
    /// Compares current health against a fraction of itself, which only holds
    /// once health reaches zero. Kept as the default because it is how the
    /// shipped behavior reads; switch to [`HealthBasis::Maximum`] once the
    /// intended trigger is confirmed.
    #[default]
    Current,
    /// `health <= threshold * max_health`.
    Maximum,
}

/// One field-of-view detector.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DetectorConfig {
    /// Maximum detection distance.
    pub radius: f32,
    /// Half of the view cone's opening angle, in degrees.
    pub half_angle_degrees: f32,
    /// Whether the detector is armed as soon as the agent spawns.
    pub armed_on_spawn: bool,
}

impl DetectorConfig {
    pub const DEFAULT_RADIUS: f32 = 15.0;
    pub const DEFAULT_HALF_ANGLE_DEGREES: f32 = 60.0;
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            radius: Self::DEFAULT_RADIUS,
            half_angle_degrees: Self::DEFAULT_HALF_ANGLE_DEGREES,
            armed_on_spawn: true,
        }
    }
}

/// Low-health retreat parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FallbackConfig {
    /// Probability of retreating on a tick where the threshold holds.
    pub chance: f32,
    /// Radius around the agent in which a retreat point is sampled.
    pub radius: f32,
    /// Fraction of [`FallbackConfig::basis`] at or below which retreat is considered.
    pub threshold: f32,
    pub basis: HealthBasis,
}

impl FallbackConfig {
    pub const DEFAULT_CHANCE: f32 = 0.3;
    pub const DEFAULT_RADIUS: f32 = 10.0;
    pub const DEFAULT_THRESHOLD: f32 = 0.1;
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            chance: Self::DEFAULT_CHANCE,
            radius: Self::DEFAULT_RADIUS,
            threshold: Self::DEFAULT_THRESHOLD,
            basis: HealthBasis::default(),
        }
    }
}

/// Tunable parameters of one agent archetype.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AgentConfig {
    pub archetype: Archetype,
    pub max_health: f32,
    /// Distance at which the agent stops advancing and starts shooting.
    pub weapon_range: f32,
    /// Distance at which a patrol waypoint counts as reached.
    pub waypoint_offset: f32,
    /// Seconds spent idling at each waypoint.
    pub idle_time: f32,
    /// How fast the agent turns to face its target, in radians per second.
    pub turn_speed: f32,
    pub move_speed: f32,
    pub angular_speed: f32,
    pub acceleration: f32,
    /// Categories that block sight and shots.
    pub occlusion_mask: Layers,
    pub detectors: Vec<DetectorConfig>,
    /// Retreat behavior; `None` disables the fallback branch.
    pub fallback: Option<FallbackConfig>,
    /// Enables the protect-most-vulnerable-ally branch.
    pub can_protect: bool,
}

impl AgentConfig {
    pub const DEFAULT_MAX_HEALTH: f32 = 100.0;
    pub const DEFAULT_WEAPON_RANGE: f32 = 5.0;
    pub const DEFAULT_WAYPOINT_OFFSET: f32 = 0.5;
    pub const DEFAULT_IDLE_TIME: f32 = 2.0;
    pub const DEFAULT_TURN_SPEED: f32 = std::f32::consts::PI;
    pub const DEFAULT_MOVE_SPEED: f32 = 3.5;
    pub const DEFAULT_ANGULAR_SPEED: f32 = 2.0 * std::f32::consts::PI;
    pub const DEFAULT_ACCELERATION: f32 = 8.0;

    /// Defaults for `archetype`.
    pub fn new(archetype: Archetype) -> Self {
        let base = Self {
            archetype,
            max_health: Self::DEFAULT_MAX_HEALTH,
            weapon_range: Self::DEFAULT_WEAPON_RANGE,
            waypoint_offset: Self::DEFAULT_WAYPOINT_OFFSET,
            idle_time: Self::DEFAULT_IDLE_TIME,
            turn_speed: Self::DEFAULT_TURN_SPEED,
            move_speed: Self::DEFAULT_MOVE_SPEED,
            angular_speed: Self::DEFAULT_ANGULAR_SPEED,
            acceleration: Self::DEFAULT_ACCELERATION,
            occlusion_mask: Layers::DEFAULT_OCCLUSION,
            detectors: vec![DetectorConfig::default()],
            fallback: None,
            can_protect: false,
        };

        match archetype {
            Archetype::Grunt | Archetype::Patroller => base,
            Archetype::Boss => Self {
                max_health: 400.0,
                weapon_range: 8.0,
                fallback: Some(FallbackConfig::default()),
                ..base
            },
            Archetype::Support => Self {
                can_protect: true,
                ..base
            },
        }
    }

    /// Checks that every numeric parameter is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("max_health", self.max_health)?;
        positive("weapon_range", self.weapon_range)?;
        non_negative("waypoint_offset", self.waypoint_offset)?;
        non_negative("idle_time", self.idle_time)?;
        positive("turn_speed", self.turn_speed)?;
        non_negative("move_speed", self.move_speed)?;
        non_negative("angular_speed", self.angular_speed)?;
        non_negative("acceleration", self.acceleration)?;

        for detector in &self.detectors {
            positive("detector.radius", detector.radius)?;
            if !(0.0..=180.0).contains(&detector.half_angle_degrees) {
                return Err(ConfigError::HalfAngle(detector.half_angle_degrees));
            }
        }

        if let Some(fallback) = &self.fallback {
            if !(0.0..=1.0).contains(&fallback.chance) {
                return Err(ConfigError::Probability(fallback.chance));
            }
            positive("fallback.radius", fallback.radius)?;
            if !(0.0..=1.0).contains(&fallback.threshold) {
                return Err(ConfigError::Probability(fallback.threshold));
            }
        }

        Ok(())
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self::new(Archetype::default())
    }
}

/// Rejected configuration values.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("{field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: f32 },

    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f32 },

    #[error("detector half angle must be within 0..=180 degrees, got {0}")]
    HalfAngle(f32),

    #[error("fraction must be within 0..=1, got {0}")]
    Probability(f32),
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { field, value })
    }
}
