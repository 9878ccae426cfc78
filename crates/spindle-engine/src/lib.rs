//! Spindle engine crate.
//!
//! This crate owns the platform + GPU runtime pieces used by the demo
//! binaries: the winit event loop, the wgpu device/surface layer, frame
//! timing, logging, and content (shader/image) loading.

pub mod core;
pub mod device;
pub mod render;
pub mod time;
pub mod window;

pub mod content;
pub mod logging;
