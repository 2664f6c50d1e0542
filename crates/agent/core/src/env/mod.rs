//! Contracts with the surrounding engine.
//!
//! The decision engine treats physics and navigation as query services:
//!
//! - [`SpatialQuery`]: overlap and line-of-sight queries
//! - [`NavMesh`]: navigable point sampling
//! - [`RoomRegistry`]: which agents share a room
//!
//! [`ColliderSet`] and [`OpenGround`] are simple in-process implementations.
pub mod colliders;
pub mod navmesh;
pub mod rooms;
pub mod spatial;

pub use colliders::{ColliderSet, Shape};
pub use navmesh::{NavMesh, OpenGround};
pub use rooms::RoomRegistry;
pub use spatial::{ColliderId, Layers, RayHit, SpatialQuery, line_of_sight};
