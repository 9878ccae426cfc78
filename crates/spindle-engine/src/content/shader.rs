use std::path::Path;

use anyhow::{Context, Result};

/// Loads a shader module from a file.
///
/// `.wgsl` files are compiled from source; `.spv` files are consumed as
/// precompiled SPIR-V binaries.
pub fn load_shader(device: &wgpu::Device, path: &Path) -> Result<wgpu::ShaderModule> {
    let label = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("shader")
        .to_string();

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    let module = match ext {
        "wgsl" => {
            let source = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read shader source {}", path.display()))?;
            device.create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some(&label),
                source: wgpu::ShaderSource::Wgsl(source.into()),
            })
        }
        "spv" => {
            let bytes = std::fs::read(path)
                .with_context(|| format!("failed to read shader binary {}", path.display()))?;
            device.create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some(&label),
                source: wgpu::util::make_spirv(&bytes),
            })
        }
        other => anyhow::bail!(
            "unsupported shader extension {:?} for {}",
            other,
            path.display()
        ),
    };

    Ok(module)
}
