use std::fmt;

use glam::Vec3;

use crate::env::ColliderId;
use crate::math;

/// Unique identifier for an agent and, by extension, its blackboard.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AgentId(pub u32);

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "agent#{}", self.0)
    }
}

/// Identifier of something agents chase and perceive (usually the player).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TargetId(pub u32);

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "target#{}", self.0)
    }
}

/// Room (or squad group) an agent is registered in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct RoomId(pub u32);

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "room#{}", self.0)
    }
}

/// Position plus heading around the vertical axis.
///
/// A yaw of zero faces +Z; positive yaw turns toward +X.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Pose {
    pub position: Vec3,
    pub yaw: f32,
}

impl Pose {
    pub fn new(position: Vec3, yaw: f32) -> Self {
        Self { position, yaw }
    }

    /// Unit vector the agent is facing, on the ground plane.
    #[inline]
    pub fn forward(&self) -> Vec3 {
        math::forward(self.yaw)
    }
}

/// Health meter tracked per agent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Health {
    pub current: f32,
    pub maximum: f32,
}

impl Health {
    pub fn new(current: f32, maximum: f32) -> Self {
        Self { current, maximum }
    }

    pub fn full(maximum: f32) -> Self {
        Self::new(maximum, maximum)
    }

    #[inline]
    pub fn is_depleted(&self) -> bool {
        self.current <= 0.0
    }
}

/// Physical presence of an agent in the world.
#[derive(Clone, Debug)]
pub struct AgentBody {
    pub pose: Pose,
    pub health: Health,
    pub room: RoomId,
    pub collider: Option<ColliderId>,
}

/// A shared target. Agents only ever read it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Target {
    pub collider: ColliderId,
    pub position: Vec3,
}
