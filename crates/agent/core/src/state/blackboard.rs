//! Per-agent node data.

use bitflags::bitflags;
use glam::Vec3;

use crate::config::AgentConfig;
use crate::env::Layers;
use crate::state::{AgentId, Animator, Motion, NavAgent, TargetId, Weapon};

bitflags! {
    /// Boolean state shared by every node of one agent's tree.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct AgentFlags: u8 {
        const DEAD         = 1 << 0;
        const STUNNED      = 1 << 1;
        const CAN_ATTACK   = 1 << 2;
        const CAN_SHOOT    = 1 << 3;
        const TARGET_FOUND = 1 << 4;
        const PATROLLER    = 1 << 5;
        const CAN_PROTECT  = 1 << 6;
    }
}

/// Mutable state consumed and mutated by one agent's behavior nodes.
///
/// Exactly one blackboard exists per agent. It is created at spawn, lives in
/// the [`World`](crate::World) arena and is addressed by the owner's
/// [`AgentId`]. There is no validation beyond types: callers are responsible
/// for sensible values. Writes are visible immediately to every node.
#[derive(Debug)]
pub struct Blackboard {
    owner: AgentId,
    nav: NavAgent,
    animator: Animator,
    weapon: Weapon,
    target: Option<TargetId>,
    weapon_range: f32,
    waypoint_offset: f32,
    flags: AgentFlags,
    waypoints: Vec<Vec3>,
    current_waypoint: usize,
    occlusion_mask: Layers,
    most_vulnerable: Option<AgentId>,
}

impl Blackboard {
    /// Creates the blackboard for `owner` from its archetype configuration.
    ///
    /// Agents start able to attack and shoot, with no target found.
    pub fn new(owner: AgentId, config: &AgentConfig) -> Self {
        let mut flags = AgentFlags::CAN_ATTACK | AgentFlags::CAN_SHOOT;
        flags.set(AgentFlags::CAN_PROTECT, config.can_protect);

        Self {
            owner,
            nav: NavAgent::new(Motion::new(
                config.move_speed,
                config.angular_speed,
                config.acceleration,
            )),
            animator: Animator::default(),
            weapon: Weapon::default(),
            target: None,
            weapon_range: config.weapon_range,
            waypoint_offset: config.waypoint_offset,
            flags,
            waypoints: Vec::new(),
            current_waypoint: 0,
            occlusion_mask: config.occlusion_mask,
            most_vulnerable: None,
        }
    }

    /// The agent this blackboard belongs to.
    pub fn owner(&self) -> AgentId {
        self.owner
    }

    // ========================================================================
    // Collaborator handles
    // ========================================================================

    pub fn nav(&self) -> &NavAgent {
        &self.nav
    }

    pub fn nav_mut(&mut self) -> &mut NavAgent {
        &mut self.nav
    }

    pub fn animator(&self) -> &Animator {
        &self.animator
    }

    pub fn animator_mut(&mut self) -> &mut Animator {
        &mut self.animator
    }

    pub fn weapon(&self) -> &Weapon {
        &self.weapon
    }

    pub fn weapon_mut(&mut self) -> &mut Weapon {
        &mut self.weapon
    }

    // ========================================================================
    // Target and ranges
    // ========================================================================

    pub fn target(&self) -> Option<TargetId> {
        self.target
    }

    pub fn set_target(&mut self, target: Option<TargetId>) {
        self.target = target;
    }

    pub fn weapon_range(&self) -> f32 {
        self.weapon_range
    }

    pub fn set_weapon_range(&mut self, range: f32) {
        self.weapon_range = range;
    }

    /// Distance at which a waypoint counts as reached.
    pub fn waypoint_offset(&self) -> f32 {
        self.waypoint_offset
    }

    pub fn set_waypoint_offset(&mut self, offset: f32) {
        self.waypoint_offset = offset;
    }

    pub fn occlusion_mask(&self) -> Layers {
        self.occlusion_mask
    }

    pub fn set_occlusion_mask(&mut self, mask: Layers) {
        self.occlusion_mask = mask;
    }

    // ========================================================================
    // Flags
    // ========================================================================

    pub fn flags(&self) -> AgentFlags {
        self.flags
    }

    pub fn is_dead(&self) -> bool {
        self.flags.contains(AgentFlags::DEAD)
    }

    pub fn set_dead(&mut self, dead: bool) {
        self.flags.set(AgentFlags::DEAD, dead);
    }

    pub fn is_stunned(&self) -> bool {
        self.flags.contains(AgentFlags::STUNNED)
    }

    pub fn set_stunned(&mut self, stunned: bool) {
        self.flags.set(AgentFlags::STUNNED, stunned);
    }

    pub fn can_attack(&self) -> bool {
        self.flags.contains(AgentFlags::CAN_ATTACK)
    }

    pub fn set_can_attack(&mut self, can_attack: bool) {
        self.flags.set(AgentFlags::CAN_ATTACK, can_attack);
    }

    pub fn can_shoot(&self) -> bool {
        self.flags.contains(AgentFlags::CAN_SHOOT)
    }

    pub fn set_can_shoot(&mut self, can_shoot: bool) {
        self.flags.set(AgentFlags::CAN_SHOOT, can_shoot);
    }

    pub fn target_found(&self) -> bool {
        self.flags.contains(AgentFlags::TARGET_FOUND)
    }

    pub fn set_target_found(&mut self, found: bool) {
        self.flags.set(AgentFlags::TARGET_FOUND, found);
    }

    pub fn is_patroller(&self) -> bool {
        self.flags.contains(AgentFlags::PATROLLER)
    }

    pub fn set_patroller(&mut self, patroller: bool) {
        self.flags.set(AgentFlags::PATROLLER, patroller);
    }

    pub fn can_protect(&self) -> bool {
        self.flags.contains(AgentFlags::CAN_PROTECT)
    }

    pub fn set_can_protect(&mut self, can_protect: bool) {
        self.flags.set(AgentFlags::CAN_PROTECT, can_protect);
    }

    // ========================================================================
    // Waypoints
    // ========================================================================

    pub fn waypoints(&self) -> &[Vec3] {
        &self.waypoints
    }

    /// Replaces the patrol route and restarts it from the first waypoint.
    pub fn set_waypoints(&mut self, waypoints: Vec<Vec3>) {
        self.waypoints = waypoints;
        self.current_waypoint = 0;
    }

    pub fn current_waypoint(&self) -> usize {
        self.current_waypoint
    }

    pub fn set_current_waypoint(&mut self, index: usize) {
        self.current_waypoint = index;
    }

    /// Position of the current waypoint, or `None` with an empty route.
    pub fn current_waypoint_position(&self) -> Option<Vec3> {
        if self.waypoints.is_empty() {
            return None;
        }
        self.waypoints
            .get(self.current_waypoint % self.waypoints.len())
            .copied()
    }

    /// Moves to the next waypoint, wrapping around at the end of the route.
    pub fn advance_waypoint(&mut self) {
        if !self.waypoints.is_empty() {
            self.current_waypoint = (self.current_waypoint + 1) % self.waypoints.len();
        }
    }

    // ========================================================================
    // Squad support
    // ========================================================================

    /// Lowest-health ally recorded by the last vulnerability scan.
    pub fn most_vulnerable(&self) -> Option<AgentId> {
        self.most_vulnerable
    }

    pub fn set_most_vulnerable(&mut self, ally: Option<AgentId>) {
        self.most_vulnerable = ally;
    }
}
