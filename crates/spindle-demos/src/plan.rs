//! Renderer-agnostic frame plan.
//!
//! Planning is pure: given the load state, logical time, and aspect ratio, it
//! produces the clear color and the draw stream for one frame. Execution
//! (UBO writes, pass encoding) consumes the plan separately, so the plan is
//! testable without a GPU.

use glam::Mat4;

/// Which pipeline/resources a draw call binds.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum DrawKind {
    Cube,
    Skybox,
}

/// One indexed draw against the shared index buffer.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DrawCall {
    pub kind: DrawKind,
    pub view_proj: Mat4,
    pub index_count: u32,
}

/// Everything one frame renders.
#[derive(Debug, Clone, PartialEq)]
pub struct FramePlan {
    /// Clear color for the frame, linear RGBA.
    pub clear: [f64; 4],
    /// Draws issued this frame, in order. Empty while assets load.
    pub draws: Vec<DrawCall>,
}

impl FramePlan {
    /// Total triangles this plan rasterizes.
    pub fn triangle_count(&self) -> u32 {
        self.draws.iter().map(|d| d.index_count / 3).sum()
    }

    pub fn clear_color(&self) -> wgpu::Color {
        wgpu::Color {
            r: self.clear[0],
            g: self.clear[1],
            b: self.clear[2],
            a: self.clear[3],
        }
    }
}
