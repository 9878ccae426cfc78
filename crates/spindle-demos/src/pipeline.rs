//! Data-driven pipeline construction.
//!
//! The cube and skybox pipelines differ only in shader, vertex layout, cull
//! state, and depth behavior, so both are built from one descriptor through
//! [`build_pipeline`].

use crate::geometry::{CubeVertex, SkyVertex};
use crate::resources::{DEPTH_FORMAT, SceneResources};

/// Everything that varies between the scene's pipelines.
pub struct PipelineParams<'a> {
    pub label: &'a str,
    pub shader: &'a wgpu::ShaderModule,
    pub vertex_layout: wgpu::VertexBufferLayout<'static>,
    pub bind_layout: &'a wgpu::BindGroupLayout,
    pub front_face: wgpu::FrontFace,
    pub cull_mode: Option<wgpu::Face>,
    pub depth_write: bool,
    pub depth_compare: wgpu::CompareFunction,
    pub color_format: wgpu::TextureFormat,
}

/// Builds one immutable render pipeline from `params`.
pub fn build_pipeline(
    device: &wgpu::Device,
    params: &PipelineParams<'_>,
) -> wgpu::RenderPipeline {
    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some(params.label),
        bind_group_layouts: &[params.bind_layout],
        immediate_size: 0,
    });

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(params.label),
        layout: Some(&layout),

        vertex: wgpu::VertexState {
            module: params.shader,
            entry_point: Some("vs_main"),
            compilation_options: Default::default(),
            buffers: &[params.vertex_layout.clone()],
        },

        fragment: Some(wgpu::FragmentState {
            module: params.shader,
            entry_point: Some("fs_main"),
            compilation_options: Default::default(),
            targets: &[Some(wgpu::ColorTargetState {
                format: params.color_format,
                blend: None,
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),

        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: params.front_face,
            cull_mode: params.cull_mode,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },

        depth_stencil: Some(wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: params.depth_write,
            depth_compare: params.depth_compare,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),

        multisample: wgpu::MultisampleState::default(),
        multiview_mask: None,
        cache: None,
    })
}

/// The scene's fixed pipelines.
pub struct ScenePipelines {
    pub cube: wgpu::RenderPipeline,
    pub skybox: Option<wgpu::RenderPipeline>,
}

impl ScenePipelines {
    /// Builds the cube pipeline and, when the scene has one, the skybox
    /// pipeline.
    ///
    /// Cull state is a correctness requirement, not a style choice: the cube
    /// winds clockwise from outside and culls back faces; the skybox is seen
    /// from inside, so culling must stay off or the box disappears. The skybox
    /// also keeps depth writes off and tests `LessEqual` so it never occludes
    /// the cube.
    pub fn create(
        device: &wgpu::Device,
        color_format: wgpu::TextureFormat,
        resources: &SceneResources,
        cube_shader: &wgpu::ShaderModule,
        sky_shader: Option<&wgpu::ShaderModule>,
    ) -> Self {
        let cube = build_pipeline(
            device,
            &PipelineParams {
                label: "cube pipeline",
                shader: cube_shader,
                vertex_layout: CubeVertex::layout(),
                bind_layout: &resources.cube_bind_layout,
                front_face: wgpu::FrontFace::Cw,
                cull_mode: Some(wgpu::Face::Back),
                depth_write: true,
                depth_compare: wgpu::CompareFunction::Less,
                color_format,
            },
        );

        let skybox = match (sky_shader, resources.skybox.as_ref()) {
            (Some(shader), Some(sky)) => Some(build_pipeline(
                device,
                &PipelineParams {
                    label: "sky pipeline",
                    shader,
                    vertex_layout: SkyVertex::layout(),
                    bind_layout: &sky.bind_layout,
                    front_face: wgpu::FrontFace::Cw,
                    cull_mode: None,
                    depth_write: false,
                    depth_compare: wgpu::CompareFunction::LessEqual,
                    color_format,
                },
            )),
            _ => None,
        };

        Self { cube, skybox }
    }
}
