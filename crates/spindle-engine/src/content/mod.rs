//! Content loading.
//!
//! Assets (shaders, textures) live in a `content/` directory shipped next to
//! the executable. During development `cargo run` executes from the target
//! directory, so a fallback to the crate's source `content/` directory keeps
//! the demos runnable from the source tree.

mod image;
mod shader;

pub use self::image::{RgbaImageData, image_dimensions, load_rgba8};
pub use self::shader::load_shader;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Resolves the content root directory.
///
/// Order: `content/` next to the running executable, then
/// `$CARGO_MANIFEST_DIR/content` (set by cargo for `cargo run`).
pub fn content_root() -> Result<PathBuf> {
    if let Ok(exe) = std::env::current_exe() {
        if let Some(dir) = exe.parent() {
            let candidate = dir.join("content");
            if candidate.is_dir() {
                return Ok(candidate);
            }
        }
    }

    if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
        let candidate = PathBuf::from(manifest_dir).join("content");
        if candidate.is_dir() {
            return Ok(candidate);
        }
    }

    anyhow::bail!("no content directory found next to the executable or the manifest")
}

/// Resolves a path relative to the content root.
pub fn content_path(relative: impl AsRef<Path>) -> Result<PathBuf> {
    let root = content_root().context("failed to resolve content root")?;
    Ok(root.join(relative))
}
