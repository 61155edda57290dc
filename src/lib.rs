//! Core of a side-scrolling arcade shooter: entity pools, kinematics, the
//! player state machine, a cooperative scene scheduler and the frame driver
//! that ties them together.
//!
//! Rendering, image loading and keyboard capture are reached only through the
//! seams in [`surface`]; the terminal front end in `main.rs` implements them.

pub mod compute;
pub mod config;
pub mod driver;
pub mod entities;
pub mod error;
pub mod player;
pub mod pool;
pub mod scene;
pub mod surface;
pub mod vector;
