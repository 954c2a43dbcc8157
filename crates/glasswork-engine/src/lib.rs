//! Glasswork engine crate.
//!
//! Owns the platform + GPU runtime (window loop, device, input, timing) and
//! the 3D rendering pieces built on it: camera, draw lists, renderers and the
//! dual-scene compositor that feeds an offscreen capture to the glass
//! material.

pub mod device;
pub mod window;
pub mod input;
pub mod time;
pub mod core;

pub mod logging;
pub mod coords;
pub mod camera;
pub mod paint;
pub mod scene;
pub mod render;
pub mod text;
pub mod composite;
