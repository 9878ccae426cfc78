//! Demo application glue.
//!
//! [`SceneApp`] implements the engine's `App` contract for both demo
//! binaries. Scene setup is lazy: GPU resources, pipelines, and the upload
//! thread are created on the first frame, once a device exists; pipeline
//! construction never waits for the upload to finish.

use std::path::PathBuf;

use anyhow::{Context, Result};

use spindle_engine::content;
use spindle_engine::core::{App, AppControl, FrameCtx};

use crate::pipeline::ScenePipelines;
use crate::renderer::{LoadState, SceneRenderer};
use crate::resources::{SceneResources, SkyboxPaths};
use crate::uploader::{self, UploadJob, UploadStatus, UploadTask};

/// Content-relative configuration for one demo variant.
#[derive(Debug, Clone)]
pub struct SceneConfig {
    pub cube_shader: &'static str,
    pub skybox: Option<SkyboxConfig>,
}

#[derive(Debug, Clone)]
pub struct SkyboxConfig {
    pub shader: &'static str,
    /// Face files in layer order +X, -X, +Y, -Y, +Z, -Z.
    pub faces: [&'static str; 6],
}

struct Scene {
    resources: SceneResources,
    pipelines: ScenePipelines,
    uploader: UploadTask,
    renderer: SceneRenderer,
}

pub struct SceneApp {
    config: SceneConfig,
    scene: Option<Scene>,
}

impl SceneApp {
    pub fn new(config: SceneConfig) -> Self {
        Self {
            config,
            scene: None,
        }
    }
}

impl App for SceneApp {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        if self.scene.is_none() {
            match Scene::create(ctx, &self.config) {
                Ok(scene) => self.scene = Some(scene),
                Err(e) => {
                    log::error!("scene setup failed: {e:#}");
                    return AppControl::Exit;
                }
            }
        }

        let Some(scene) = self.scene.as_mut() else {
            return AppControl::Exit;
        };

        if scene.renderer.state() == LoadState::Loading {
            match scene.uploader.poll() {
                UploadStatus::Pending => {}
                UploadStatus::Ready => scene.renderer.mark_ready(),
                UploadStatus::Failed(reason) => {
                    log::error!("asset upload failed, exiting: {reason}");
                    return AppControl::Exit;
                }
            }
        }

        scene
            .resources
            .ensure_depth_size(ctx.gpu.device(), ctx.gpu.size());

        let plan = scene
            .renderer
            .plan(ctx.time.elapsed, ctx.aspect_ratio());

        ctx.render(plan.clear_color(), |rctx, target| {
            scene
                .renderer
                .execute(&plan, rctx, target, &scene.resources, &scene.pipelines);
        })
    }
}

impl Scene {
    fn create(ctx: &FrameCtx<'_, '_>, config: &SceneConfig) -> Result<Self> {
        let device = ctx.gpu.device();

        let cube_shader_path =
            content::content_path(config.cube_shader).context("cube shader path")?;
        let cube_shader = content::load_shader(device, &cube_shader_path)?;

        let skybox_paths = config
            .skybox
            .as_ref()
            .map(|sky| -> Result<SkyboxPaths> {
                let mut faces: [PathBuf; 6] = Default::default();
                for (slot, face) in faces.iter_mut().zip(sky.faces) {
                    *slot = content::content_path(face).context("cubemap face path")?;
                }
                Ok(SkyboxPaths { faces })
            })
            .transpose()?;

        let sky_shader = config
            .skybox
            .as_ref()
            .map(|sky| -> Result<wgpu::ShaderModule> {
                let path = content::content_path(sky.shader).context("sky shader path")?;
                content::load_shader(device, &path)
            })
            .transpose()?;

        let resources = SceneResources::create(device, ctx.gpu.size(), skybox_paths.as_ref())
            .context("failed to create scene resources")?;

        let pipelines = ScenePipelines::create(
            device,
            ctx.gpu.surface_format(),
            &resources,
            &cube_shader,
            sky_shader.as_ref(),
        );

        let job = UploadJob {
            queue: ctx.gpu.queue().clone(),
            cube_vbo: resources.cube_vbo.clone(),
            index_buffer: resources.index_buffer.clone(),
            skybox: resources.skybox.as_ref().zip(skybox_paths).map(
                |(sky, paths)| uploader::SkyboxUpload {
                    vbo: sky.vbo.clone(),
                    texture: sky.texture.clone(),
                    faces: paths.faces,
                },
            ),
        };
        let uploader = UploadTask::spawn(move || uploader::run_upload(job));

        let renderer = SceneRenderer::new(config.skybox.is_some());

        Ok(Self {
            resources,
            pipelines,
            uploader,
            renderer,
        })
    }
}
