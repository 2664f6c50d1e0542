//! Room-scoped agent registry.

use std::collections::HashMap;

use crate::state::{AgentId, RoomId};

/// Which agents are registered in which room.
///
/// Entries are not removed when an agent dies or despawns; readers must
/// check each id against the [`World`](crate::World) and skip stale ones.
/// [`World::prune_rooms`](crate::World::prune_rooms) drops them in bulk.
#[derive(Clone, Debug, Default)]
pub struct RoomRegistry {
    rooms: HashMap<RoomId, Vec<AgentId>>,
}

impl RoomRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `agent` in `room`. Registering twice is a no-op.
    pub fn register(&mut self, room: RoomId, agent: AgentId) {
        let members = self.rooms.entry(room).or_default();
        if !members.contains(&agent) {
            members.push(agent);
        }
    }

    pub fn unregister(&mut self, room: RoomId, agent: AgentId) -> bool {
        let Some(members) = self.rooms.get_mut(&room) else {
            return false;
        };
        let before = members.len();
        members.retain(|&member| member != agent);
        before != members.len()
    }

    /// Agents registered in `room`, possibly including stale entries.
    pub fn agents_in_room(&self, room: RoomId) -> &[AgentId] {
        self.rooms.get(&room).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn rooms(&self) -> impl Iterator<Item = RoomId> + '_ {
        self.rooms.keys().copied()
    }

    /// Keeps only the entries for which `keep` returns `true`.
    pub fn retain(&mut self, mut keep: impl FnMut(AgentId) -> bool) {
        for members in self.rooms.values_mut() {
            members.retain(|&agent| keep(agent));
        }
    }
}
