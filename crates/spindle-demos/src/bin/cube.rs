//! Rotating per-face-colored cube.

use anyhow::Result;
use winit::dpi::LogicalSize;

use spindle_demos::scene::{SceneApp, SceneConfig};
use spindle_engine::device::GpuInit;
use spindle_engine::logging::{self, LoggingConfig};
use spindle_engine::window::{Runtime, RuntimeConfig, WindowMode};

fn main() -> Result<()> {
    logging::init_logging(LoggingConfig::default());

    let config = SceneConfig {
        cube_shader: "shaders/cube.wgsl",
        skybox: None,
    };

    Runtime::run(
        RuntimeConfig {
            title: "Cube".to_string(),
            initial_size: LogicalSize::new(640.0, 480.0),
            mode: WindowMode::Windowed,
        },
        GpuInit {
            present_mode: wgpu::PresentMode::FifoRelaxed,
            ..Default::default()
        },
        SceneApp::new(config),
    )
}
