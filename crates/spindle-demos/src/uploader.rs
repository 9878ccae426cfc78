//! Background asset upload.
//!
//! A one-shot worker thread writes the static geometry and the cubemap faces
//! through the queue, flushes with an empty submit, and then publishes
//! completion. The render thread observes progress through [`UploadTask::poll`]
//! and never blocks on the thread.
//!
//! Handoff: the error slot is written before the `done` flag; the flag is
//! stored with `Release` and read with `Acquire`, so once `poll` sees the
//! flag, it also sees the final error state and the queue writes that
//! preceded it.

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};
use std::thread::JoinHandle;

use anyhow::{Context, Result};

use spindle_engine::content;

use crate::geometry;

/// Observable state of the upload task.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum UploadStatus {
    Pending,
    Ready,
    Failed(String),
}

struct Shared {
    done: AtomicBool,
    error: Mutex<Option<String>>,
}

/// Handle to the one-shot upload thread.
///
/// The join handle is owned but never joined on the render path; the thread
/// either finishes or the process exits.
pub struct UploadTask {
    shared: Arc<Shared>,
    _handle: JoinHandle<()>,
}

impl UploadTask {
    /// Spawns the upload job on a worker thread.
    pub fn spawn<F>(job: F) -> Self
    where
        F: FnOnce() -> Result<()> + Send + 'static,
    {
        let shared = Arc::new(Shared {
            done: AtomicBool::new(false),
            error: Mutex::new(None),
        });

        log::info!("asset upload started");

        let worker_shared = Arc::clone(&shared);
        let handle = std::thread::spawn(move || {
            let result = job();

            if let Err(e) = &result {
                log::error!("asset upload failed: {e:#}");
                *worker_shared
                    .error
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner) = Some(format!("{e:#}"));
            } else {
                log::info!("asset upload complete");
            }

            // Publish after the error slot is final.
            worker_shared.done.store(true, Ordering::Release);
        });

        Self {
            shared,
            _handle: handle,
        }
    }

    /// Non-blocking status check.
    pub fn poll(&self) -> UploadStatus {
        if !self.shared.done.load(Ordering::Acquire) {
            return UploadStatus::Pending;
        }

        let error = self
            .shared
            .error
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        match error.as_ref() {
            Some(reason) => UploadStatus::Failed(reason.clone()),
            None => UploadStatus::Ready,
        }
    }
}

/// Skybox upload inputs: destination handles plus the face files, in layer
/// order +X, -X, +Y, -Y, +Z, -Z.
pub struct SkyboxUpload {
    pub vbo: wgpu::Buffer,
    pub texture: wgpu::Texture,
    pub faces: [PathBuf; 6],
}

/// Everything the upload thread needs. All handles are cheap clones of the
/// render thread's resources; the buffers and texture are written here once
/// and only read afterwards.
pub struct UploadJob {
    pub queue: wgpu::Queue,
    pub cube_vbo: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub skybox: Option<SkyboxUpload>,
}

/// Writes all static assets and flushes the queue.
pub fn run_upload(job: UploadJob) -> Result<()> {
    job.queue.write_buffer(
        &job.cube_vbo,
        0,
        bytemuck::cast_slice(&geometry::CUBE_VERTICES),
    );
    job.queue.write_buffer(
        &job.index_buffer,
        0,
        bytemuck::cast_slice(&geometry::CUBE_INDICES),
    );

    if let Some(sky) = &job.skybox {
        job.queue
            .write_buffer(&sky.vbo, 0, bytemuck::cast_slice(&geometry::SKY_VERTICES));

        let expected = (sky.texture.width(), sky.texture.height());

        for (layer, path) in sky.faces.iter().enumerate() {
            // Scoped: the decode buffer is released at the end of each
            // iteration, right after its single copy.
            let face = content::load_rgba8(path)
                .with_context(|| format!("cubemap face {layer}"))?;

            anyhow::ensure!(
                (face.width, face.height) == expected,
                "cubemap face {} is {}x{}, texture expects {}x{}",
                path.display(),
                face.width,
                face.height,
                expected.0,
                expected.1
            );

            job.queue.write_texture(
                wgpu::TexelCopyTextureInfo {
                    texture: &sky.texture,
                    mip_level: 0,
                    origin: wgpu::Origin3d {
                        x: 0,
                        y: 0,
                        z: layer as u32,
                    },
                    aspect: wgpu::TextureAspect::All,
                },
                &face.pixels,
                wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(4 * face.width),
                    rows_per_image: Some(face.height),
                },
                wgpu::Extent3d {
                    width: face.width,
                    height: face.height,
                    depth_or_array_layers: 1,
                },
            );
        }
    }

    // The submission is the visibility boundary: every write above is
    // GPU-visible before any draw that binds these resources.
    job.queue.submit(std::iter::empty());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;
    use std::time::Duration;

    fn wait_done(task: &UploadTask) -> UploadStatus {
        for _ in 0..500 {
            match task.poll() {
                UploadStatus::Pending => std::thread::sleep(Duration::from_millis(1)),
                done => return done,
            }
        }
        panic!("upload task never completed");
    }

    #[test]
    fn successful_job_becomes_ready() {
        let task = UploadTask::spawn(|| Ok(()));
        assert_eq!(wait_done(&task), UploadStatus::Ready);
        // Status is stable once published.
        assert_eq!(task.poll(), UploadStatus::Ready);
    }

    #[test]
    fn failing_job_reports_the_reason() {
        let task = UploadTask::spawn(|| anyhow::bail!("missing face image"));
        match wait_done(&task) {
            UploadStatus::Failed(reason) => assert!(reason.contains("missing face image")),
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[test]
    fn pending_until_the_job_finishes() {
        let (release, gate) = mpsc::channel::<()>();
        let task = UploadTask::spawn(move || {
            gate.recv().ok();
            Ok(())
        });

        for _ in 0..10 {
            assert_eq!(task.poll(), UploadStatus::Pending);
        }

        release.send(()).ok();
        assert_eq!(wait_done(&task), UploadStatus::Ready);
    }
}
