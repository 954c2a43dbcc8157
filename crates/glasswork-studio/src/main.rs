//! Glass refraction demo.
//!
//! ```text
//! glasswork-studio [shape.svg] [params.json]
//! ```
//!
//! Without a shape file the built-in logo is extruded. Keys: Up/Down
//! roundness, Left/Right depth, H high-res bevels, B background content,
//! R refraction quality, Esc quit. The mouse wheel, PageUp/PageDown and
//! Home/End scroll the background.

mod app;
mod content;
mod controls;
mod params;
mod scroll;

use std::path::PathBuf;

use anyhow::{Context, Result};
use winit::dpi::LogicalSize;

use glasswork_engine::device::GpuInit;
use glasswork_engine::logging::{init_logging, LoggingConfig};
use glasswork_engine::window::{Runtime, RuntimeConfig};
use glasswork_geometry::{load_svg, parse_svg, PathSet};

use app::GlassApp;
use params::Params;

const BUILTIN_SHAPE: &str = include_str!("../assets/shape.svg");

const FONT_PATHS: &[&str] = &[
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/noto/NotoSans-Regular.ttf",
    "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

fn main() {
    init_logging(LoggingConfig::default());

    if let Err(e) = run() {
        log::error!("{e:#}");
        eprintln!("glasswork error: {e:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let mut args = std::env::args_os().skip(1).map(PathBuf::from);
    let shape_path = args.next();
    let params_path = args.next();

    let params = match params_path {
        Some(path) => Params::load(&path)?,
        None => Params::default(),
    };

    let shape = load_shape(shape_path)?;
    log::info!("shape source: {} filled paths", shape.len());

    let app = GlassApp::new(params, shape, FONT_PATHS);
    let config = RuntimeConfig {
        title: "glasswork".to_string(),
        initial_size: LogicalSize::new(1280.0, 800.0),
    };
    Runtime::run(config, GpuInit::default(), app)
}

fn load_shape(path: Option<PathBuf>) -> Result<PathSet> {
    match path {
        Some(path) => load_svg(&path).with_context(|| format!("failed to load shape {}", path.display())),
        None => parse_svg(BUILTIN_SHAPE.as_bytes()).context("built-in shape is invalid"),
    }
}
