//! The Entity-Component-System (ECS) module.
//!
//! This module contains all the ECS-related logic, including components, systems,
//! and resources.

pub mod adversary;
pub mod collision;
pub mod components;
pub mod level;
pub mod movement;
pub mod player;
pub mod render;
pub mod state;

pub use self::adversary::*;
pub use self::collision::*;
pub use self::components::*;
pub use self::level::*;
pub use self::movement::*;
pub use self::player::*;
pub use self::render::*;
pub use self::state::*;
