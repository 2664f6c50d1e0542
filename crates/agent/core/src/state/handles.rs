//! Intent records the core writes and external engine systems consume.
//!
//! The decision engine never moves, animates or shoots anything itself. It
//! leaves requests on these handles and the navigation, animation and weapon
//! systems pick them up after the tick.

use std::fmt;

use glam::Vec3;

/// Speed parameters of a navigation agent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Motion {
    pub speed: f32,
    pub angular_speed: f32,
    pub acceleration: f32,
}

impl Motion {
    pub fn new(speed: f32, angular_speed: f32, acceleration: f32) -> Self {
        Self {
            speed,
            angular_speed,
            acceleration,
        }
    }

    /// Returns a copy with every field multiplied by `factor`.
    pub fn scaled(self, factor: f32) -> Self {
        Self {
            speed: self.speed * factor,
            angular_speed: self.angular_speed * factor,
            acceleration: self.acceleration * factor,
        }
    }
}

/// Navigation requests for one agent.
///
/// `set_destination` is idempotent from the navigation service's point of
/// view, but every call is counted so callers can tell a fresh request from
/// an unchanged one.
#[derive(Clone, Debug, PartialEq)]
pub struct NavAgent {
    destination: Option<Vec3>,
    stopped: bool,
    requests: u64,
    /// Current motion parameters, rewritten by time effects.
    pub motion: Motion,
    base: Motion,
}

impl NavAgent {
    pub fn new(motion: Motion) -> Self {
        Self {
            destination: None,
            stopped: true,
            requests: 0,
            motion,
            base: motion,
        }
    }

    pub fn set_destination(&mut self, destination: Vec3) {
        self.destination = Some(destination);
        self.requests += 1;
    }

    pub fn stop(&mut self) {
        self.stopped = true;
    }

    pub fn resume(&mut self) {
        self.stopped = false;
    }

    pub fn destination(&self) -> Option<Vec3> {
        self.destination
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Number of destination requests issued so far.
    pub fn requests(&self) -> u64 {
        self.requests
    }

    /// Motion parameters the agent was spawned with.
    pub fn base_motion(&self) -> Motion {
        self.base
    }

    /// Replaces the live motion with the spawn motion scaled by `factor`.
    pub fn scale_motion(&mut self, factor: f32) {
        self.motion = self.base.scaled(factor);
    }

    pub fn restore_motion(&mut self) {
        self.motion = self.base;
    }
}

/// Animation cues for one agent. Fire-and-forget.
#[derive(Clone, Debug, PartialEq)]
pub struct Animator {
    walking: bool,
    stunned: bool,
    playback_speed: f32,
}

impl Animator {
    pub fn is_walking(&self) -> bool {
        self.walking
    }

    pub fn set_walking(&mut self, walking: bool) {
        self.walking = walking;
    }

    pub fn is_stunned(&self) -> bool {
        self.stunned
    }

    pub fn set_stunned(&mut self, stunned: bool) {
        self.stunned = stunned;
    }

    pub fn playback_speed(&self) -> f32 {
        self.playback_speed
    }

    pub fn set_playback_speed(&mut self, speed: f32) {
        self.playback_speed = speed;
    }
}

impl Default for Animator {
    fn default() -> Self {
        Self {
            walking: false,
            stunned: false,
            playback_speed: 1.0,
        }
    }
}

/// Zero-argument callback invoked whenever the agent fires.
pub type FireCallback = Box<dyn FnMut() + Send + Sync>;

/// Weapon trigger. Cooldowns and ballistics live with the weapon system.
#[derive(Default)]
pub struct Weapon {
    trigger: Option<FireCallback>,
    shots: u64,
}

impl Weapon {
    pub fn new(trigger: FireCallback) -> Self {
        Self {
            trigger: Some(trigger),
            shots: 0,
        }
    }

    pub fn set_trigger(&mut self, trigger: FireCallback) {
        self.trigger = Some(trigger);
    }

    pub fn fire(&mut self) {
        self.shots += 1;
        if let Some(trigger) = self.trigger.as_mut() {
            trigger();
        }
    }

    /// Number of times the trigger was pulled.
    pub fn shots(&self) -> u64 {
        self.shots
    }
}

impl fmt::Debug for Weapon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Weapon")
            .field("armed", &self.trigger.is_some())
            .field("shots", &self.shots)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    use super::*;

    #[test]
    fn motion_scales_from_the_spawn_values() {
        let mut nav = NavAgent::new(Motion::new(4.0, 2.0, 8.0));

        nav.scale_motion(0.5);
        nav.scale_motion(0.5);
        assert_eq!(nav.motion, Motion::new(2.0, 1.0, 4.0));

        nav.restore_motion();
        assert_eq!(nav.motion, nav.base_motion());
    }

    #[test]
    fn every_destination_request_is_counted() {
        let mut nav = NavAgent::new(Motion::new(1.0, 1.0, 1.0));
        assert!(nav.is_stopped());

        nav.set_destination(Vec3::X);
        nav.set_destination(Vec3::X);
        nav.resume();
        assert_eq!(nav.requests(), 2);
        assert_eq!(nav.destination(), Some(Vec3::X));
        assert!(!nav.is_stopped());
    }

    #[test]
    fn fire_invokes_the_trigger() {
        let pulls = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&pulls);
        let mut weapon = Weapon::new(Box::new(move || {
            counter.fetch_add(1, Ordering::Relaxed);
        }));

        weapon.fire();
        weapon.fire();
        assert_eq!(weapon.shots(), 2);
        assert_eq!(pulls.load(Ordering::Relaxed), 2);
    }

    #[test]
    fn unarmed_weapon_still_counts_shots() {
        let mut weapon = Weapon::default();
        weapon.fire();
        assert_eq!(weapon.shots(), 1);
    }
}
