//! Integration tests for the DriveLab shell
//!
//! These tests drive the App through keys and background events and check
//! the navigation core and the rendered screen together.

#[path = "../common/mod.rs"]
pub mod common;

pub mod cli;
pub mod navigation_flow;
pub mod playback_flow;
pub mod shell_render;
