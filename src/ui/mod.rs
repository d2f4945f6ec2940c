//! Terminal user interface: rendering, input handling, and screen gating.

pub mod guard;
pub mod input;
pub mod render;
pub mod screens;
pub mod styles;
