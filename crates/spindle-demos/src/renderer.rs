//! Per-frame scene renderer.
//!
//! Two halves: a pure planning step (state machine, matrices, clear color)
//! and a wgpu execution step (UBO writes, pass encoding, draws). The split
//! keeps every frame-loop invariant testable without a device.

use spindle_engine::render::{RenderCtx, RenderTarget};

use crate::geometry;
use crate::pipeline::ScenePipelines;
use crate::plan::{DrawCall, DrawKind, FramePlan};
use crate::resources::{SceneResources, SceneUniform};
use crate::transforms;

/// Asset load state. The transition is a one-way latch: once `Ready`, the
/// renderer never returns to `Loading`.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum LoadState {
    Loading,
    Ready,
}

/// Background color once the scene is drawing.
const READY_CLEAR: [f64; 4] = [0.03, 0.03, 0.05, 1.0];

pub struct SceneRenderer {
    state: LoadState,
    has_skybox: bool,
}

impl SceneRenderer {
    pub fn new(has_skybox: bool) -> Self {
        Self {
            state: LoadState::Loading,
            has_skybox,
        }
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    /// Latches the `Loading → Ready` transition. Idempotent; there is no way
    /// back.
    pub fn mark_ready(&mut self) {
        if self.state == LoadState::Loading {
            self.state = LoadState::Ready;
            log::info!("scene ready, drawing geometry");
        }
    }

    /// Plans one frame from logical time and the drawable aspect ratio.
    ///
    /// While loading: no draws, grayscale `|sin t|` heartbeat clear. Once
    /// ready: the cube draw (rotating view-projection) followed by the skybox
    /// draw (static view-projection), both over the shared index buffer.
    pub fn plan(&self, elapsed: f32, aspect: f32) -> FramePlan {
        match self.state {
            LoadState::Loading => {
                let pulse = transforms::loading_pulse(elapsed) as f64;
                FramePlan {
                    clear: [pulse, pulse, pulse, 1.0],
                    draws: Vec::new(),
                }
            }
            LoadState::Ready => {
                let mut draws = vec![DrawCall {
                    kind: DrawKind::Cube,
                    view_proj: transforms::cube_view_proj(elapsed, aspect),
                    index_count: geometry::INDEX_COUNT as u32,
                }];

                if self.has_skybox {
                    draws.push(DrawCall {
                        kind: DrawKind::Skybox,
                        view_proj: transforms::sky_view_proj(aspect),
                        index_count: geometry::INDEX_COUNT as u32,
                    });
                }

                FramePlan {
                    clear: READY_CLEAR,
                    draws,
                }
            }
        }
    }

    /// Encodes a planned frame.
    ///
    /// Uniform writes happen before the pass; the pass loads the already
    /// cleared color target and clears the depth target. An empty plan
    /// encodes nothing — the loading heartbeat is entirely the clear pass.
    pub fn execute(
        &self,
        plan: &FramePlan,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        resources: &SceneResources,
        pipelines: &ScenePipelines,
    ) {
        if plan.draws.is_empty() {
            return;
        }

        for draw in &plan.draws {
            let uniform = SceneUniform {
                view_proj: draw.view_proj.to_cols_array_2d(),
            };
            let ubo = match draw.kind {
                DrawKind::Cube => &resources.cube_ubo,
                DrawKind::Skybox => match resources.skybox.as_ref() {
                    Some(sky) => &sky.ubo,
                    None => continue,
                },
            };
            ctx.queue.write_buffer(ubo, 0, bytemuck::bytes_of(&uniform));
        }

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("scene pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &resources.depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Discard,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_index_buffer(resources.index_buffer.slice(..), wgpu::IndexFormat::Uint16);

        for draw in &plan.draws {
            match draw.kind {
                DrawKind::Cube => {
                    rpass.set_pipeline(&pipelines.cube);
                    rpass.set_bind_group(0, &resources.cube_bind_group, &[]);
                    rpass.set_vertex_buffer(0, resources.cube_vbo.slice(..));
                }
                DrawKind::Skybox => {
                    let (Some(pipeline), Some(sky)) =
                        (pipelines.skybox.as_ref(), resources.skybox.as_ref())
                    else {
                        continue;
                    };
                    rpass.set_pipeline(pipeline);
                    rpass.set_bind_group(0, &sky.bind_group, &[]);
                    rpass.set_vertex_buffer(0, sky.vbo.slice(..));
                }
            }

            rpass.draw_indexed(0..draw.index_count, 0, 0..1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transforms;

    const ASPECT: f32 = 640.0 / 480.0;

    #[test]
    fn loading_frames_issue_no_draws() {
        let r = SceneRenderer::new(true);
        for i in 0..100 {
            let t = i as f32 * 0.016;
            let plan = r.plan(t, ASPECT);
            assert!(plan.draws.is_empty());
            assert_eq!(plan.triangle_count(), 0);
        }
    }

    #[test]
    fn loading_clear_is_abs_sin_heartbeat() {
        let r = SceneRenderer::new(false);
        for t in [0.0f32, 0.25, 1.0, 2.5, 3.14159, 40.0] {
            let plan = r.plan(t, ASPECT);
            let expected = t.sin().abs() as f64;
            assert_eq!(plan.clear[0], expected);
            assert_eq!(plan.clear[1], expected);
            assert_eq!(plan.clear[2], expected);
            assert_eq!(plan.clear[3], 1.0);
            assert!((0.0..=1.0).contains(&plan.clear[0]));
        }
    }

    #[test]
    fn upload_never_completing_stays_loading() {
        let r = SceneRenderer::new(true);
        let mut total_draws = 0;
        for frame in 0..1000 {
            let plan = r.plan(frame as f32 / 60.0, ASPECT);
            total_draws += plan.draws.len();
        }
        assert_eq!(total_draws, 0);
        assert_eq!(r.state(), LoadState::Loading);
    }

    #[test]
    fn cube_only_scene_draws_twelve_triangles() {
        let mut r = SceneRenderer::new(false);
        r.mark_ready();

        let plan = r.plan(1.0, ASPECT);
        assert_eq!(plan.draws.len(), 1);
        assert_eq!(plan.draws[0].kind, DrawKind::Cube);
        assert_eq!(plan.draws[0].index_count, 36);
        assert_eq!(plan.triangle_count(), 12);
    }

    #[test]
    fn skybox_scene_draws_twenty_four_triangles() {
        let mut r = SceneRenderer::new(true);
        r.mark_ready();

        let plan = r.plan(1.0, ASPECT);
        assert_eq!(plan.draws.len(), 2);
        assert_eq!(plan.draws[0].kind, DrawKind::Cube);
        assert_eq!(plan.draws[1].kind, DrawKind::Skybox);
        assert_eq!(plan.triangle_count(), 24);
    }

    #[test]
    fn ready_never_reverts() {
        let mut r = SceneRenderer::new(true);
        r.mark_ready();
        r.mark_ready(); // idempotent

        for frame in 0..1000 {
            let plan = r.plan(frame as f32 / 60.0, ASPECT);
            assert_eq!(plan.draws.len(), 2);
        }
        assert_eq!(r.state(), LoadState::Ready);
    }

    #[test]
    fn cube_uniform_rotates_skybox_uniform_does_not() {
        let mut r = SceneRenderer::new(true);
        r.mark_ready();

        let t = 0.8;
        let plan = r.plan(t, ASPECT);

        assert_eq!(plan.draws[0].view_proj, transforms::cube_view_proj(t, ASPECT));
        assert_eq!(plan.draws[1].view_proj, transforms::sky_view_proj(ASPECT));

        // The skybox term is time-invariant; the cube term is not.
        let later = r.plan(t + 1.0, ASPECT);
        assert_eq!(later.draws[1].view_proj, plan.draws[1].view_proj);
        assert_ne!(later.draws[0].view_proj, plan.draws[0].view_proj);
    }
}
