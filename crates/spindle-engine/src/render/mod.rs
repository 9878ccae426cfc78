//! Renderer-facing context types.
//!
//! Renderers receive these from `FrameCtx::render` and issue GPU commands via
//! wgpu. Each renderer is responsible for its own GPU resources (pipelines,
//! buffers, textures).

mod ctx;

pub use ctx::{RenderCtx, RenderTarget};
