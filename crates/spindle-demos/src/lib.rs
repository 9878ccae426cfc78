//! Rotating-cube demo scenes.
//!
//! The `cube` and `skybox` binaries share everything in this crate: static
//! geometry, the GPU resource set, the pipeline builder, the background asset
//! uploader, and the frame renderer. Each binary is a thin parameterization of
//! [`scene::SceneApp`].

pub mod geometry;
pub mod pipeline;
pub mod plan;
pub mod renderer;
pub mod resources;
pub mod scene;
pub mod transforms;
pub mod uploader;
