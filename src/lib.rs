//! Tetrasphere application library
//!
//! Configuration, input mapping, scene construction and the window,
//! render and simulation systems driven by `main.rs`.

pub mod config;
pub mod input;
pub mod scene;
pub mod systems;
