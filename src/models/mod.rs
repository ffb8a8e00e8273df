//! Core data models for match event aggregation.

mod event;
mod fixture;
mod grid;
mod ids;
mod log;
mod pitch;
mod shot;
mod stats;
mod team;

pub use event::*;
pub use fixture::*;
pub use grid::*;
pub use ids::*;
pub use log::*;
pub use pitch::*;
pub use shot::*;
pub use stats::*;
pub use team::*;
