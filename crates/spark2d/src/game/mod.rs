//! Game module - entities and the world that simulates them

pub mod entity;
pub mod world;

pub use entity::{Body, Entity, Motion};
pub use world::{BoxedEntity, UpdateContext, World};
