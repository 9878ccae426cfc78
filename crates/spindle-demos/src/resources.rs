//! GPU resource set for the demo scenes.
//!
//! Everything here is created once at startup, sized exactly for the static
//! geometry, and never resized — except the depth target, which tracks the
//! window. Buffer contents are written by the background uploader; this module
//! only allocates.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use bytemuck::{Pod, Zeroable};
use winit::dpi::PhysicalSize;

use spindle_engine::content;

use crate::geometry::{self, CubeVertex, SkyVertex};

pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;
pub const CUBEMAP_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8UnormSrgb;

/// Per-draw uniform block: one view-projection matrix.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub struct SceneUniform {
    pub view_proj: [[f32; 4]; 4],
}

/// Cubemap face files in layer order +X, -X, +Y, -Y, +Z, -Z.
#[derive(Debug, Clone)]
pub struct SkyboxPaths {
    pub faces: [PathBuf; 6],
}

/// Buffers, textures, samplers, and bind groups owned by a scene.
pub struct SceneResources {
    pub cube_vbo: wgpu::Buffer,
    pub cube_ubo: wgpu::Buffer,
    pub cube_bind_layout: wgpu::BindGroupLayout,
    pub cube_bind_group: wgpu::BindGroup,

    /// Shared by the cube and the skybox; both meshes use the same 24-vertex,
    /// 36-index face pattern.
    pub index_buffer: wgpu::Buffer,

    pub depth_view: wgpu::TextureView,
    depth_size: PhysicalSize<u32>,

    pub skybox: Option<SkyboxResources>,
}

pub struct SkyboxResources {
    pub vbo: wgpu::Buffer,
    pub ubo: wgpu::Buffer,
    pub texture: wgpu::Texture,
    pub sampler: wgpu::Sampler,
    pub bind_layout: wgpu::BindGroupLayout,
    pub bind_group: wgpu::BindGroup,
}

impl SceneResources {
    /// Allocates all GPU resources for a scene.
    ///
    /// `skybox` face images are not decoded here — only their headers are read
    /// to size the cubemap; pixel upload happens on the uploader thread.
    pub fn create(
        device: &wgpu::Device,
        surface_size: PhysicalSize<u32>,
        skybox: Option<&SkyboxPaths>,
    ) -> Result<Self> {
        let cube_vbo = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("cube vbo"),
            size: geometry::cube_vertex_buffer_size(),
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let index_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("cube ibo"),
            size: geometry::index_buffer_size(),
            usage: wgpu::BufferUsages::INDEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let cube_ubo = create_scene_ubo(device, "cube ubo");
        let cube_bind_layout = create_uniform_bind_layout(device, "cube bgl");
        let cube_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("cube bind group"),
            layout: &cube_bind_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: cube_ubo.as_entire_binding(),
            }],
        });

        let (depth_view, depth_size) = create_depth_target(device, surface_size);

        let skybox = skybox
            .map(|paths| SkyboxResources::create(device, paths))
            .transpose()?;

        Ok(Self {
            cube_vbo,
            cube_ubo,
            cube_bind_layout,
            cube_bind_group,
            index_buffer,
            depth_view,
            depth_size,
            skybox,
        })
    }

    /// Recreates the depth target if the drawable size changed.
    ///
    /// wgpu requires all attachments of a pass to share extents, so a stale
    /// depth target after a resize would fail validation on every frame.
    pub fn ensure_depth_size(&mut self, device: &wgpu::Device, surface_size: PhysicalSize<u32>) {
        if surface_size == self.depth_size
            || surface_size.width == 0
            || surface_size.height == 0
        {
            return;
        }

        let (view, size) = create_depth_target(device, surface_size);
        self.depth_view = view;
        self.depth_size = size;
        log::debug!("depth target recreated at {}x{}", size.width, size.height);
    }
}

impl SkyboxResources {
    fn create(device: &wgpu::Device, paths: &SkyboxPaths) -> Result<Self> {
        let (face_width, face_height) = cubemap_face_size(&paths.faces)?;

        let vbo = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("sky vbo"),
            size: geometry::sky_vertex_buffer_size(),
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let ubo = create_scene_ubo(device, "sky ubo");

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("sky cubemap"),
            size: wgpu::Extent3d {
                width: face_width,
                height: face_height,
                depth_or_array_layers: 6,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: CUBEMAP_FORMAT,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        let view = texture.create_view(&wgpu::TextureViewDescriptor {
            dimension: Some(wgpu::TextureViewDimension::Cube),
            ..Default::default()
        });

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("sky sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        let bind_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("sky bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: std::num::NonZeroU64::new(
                            std::mem::size_of::<SceneUniform>() as u64,
                        ),
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::Cube,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("sky bind group"),
            layout: &bind_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: ubo.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
            ],
        });

        Ok(Self {
            vbo,
            ubo,
            texture,
            sampler,
            bind_layout,
            bind_group,
        })
    }
}

fn create_scene_ubo(device: &wgpu::Device, label: &str) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some(label),
        size: std::mem::size_of::<SceneUniform>() as u64,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

fn create_uniform_bind_layout(device: &wgpu::Device, label: &str) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some(label),
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: std::num::NonZeroU64::new(
                    std::mem::size_of::<SceneUniform>() as u64,
                ),
            },
            count: None,
        }],
    })
}

fn create_depth_target(
    device: &wgpu::Device,
    surface_size: PhysicalSize<u32>,
) -> (wgpu::TextureView, PhysicalSize<u32>) {
    let size = PhysicalSize::new(surface_size.width.max(1), surface_size.height.max(1));

    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("scene depth"),
        size: wgpu::Extent3d {
            width: size.width,
            height: size.height,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });

    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
    (view, size)
}

/// Reads all six face headers and checks they agree on a square size.
fn cubemap_face_size(faces: &[PathBuf; 6]) -> Result<(u32, u32)> {
    let first = read_face_size(&faces[0])?;
    anyhow::ensure!(
        first.0 == first.1,
        "cubemap face {} is not square ({}x{})",
        faces[0].display(),
        first.0,
        first.1
    );

    for path in &faces[1..] {
        let dims = read_face_size(path)?;
        anyhow::ensure!(
            dims == first,
            "cubemap face {} is {}x{}, expected {}x{}",
            path.display(),
            dims.0,
            dims.1,
            first.0,
            first.1
        );
    }

    Ok(first)
}

fn read_face_size(path: &Path) -> Result<(u32, u32)> {
    content::image_dimensions(path)
        .with_context(|| format!("failed to size cubemap face {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_block_is_one_matrix() {
        assert_eq!(std::mem::size_of::<SceneUniform>(), 64);
    }

    #[test]
    fn uniform_block_round_trips() {
        let m = glam::Mat4::perspective_rh(1.3, 1.5, 0.1, 100.0);
        let u = SceneUniform {
            view_proj: m.to_cols_array_2d(),
        };
        let bytes = bytemuck::bytes_of(&u);
        let back: SceneUniform = *bytemuck::from_bytes(bytes);
        assert_eq!(back.view_proj, u.view_proj);
    }
}
