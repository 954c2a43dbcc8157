//! Scene (draw stream) types.
//!
//! Responsibilities:
//! - store renderer-agnostic draw commands for one scene
//! - provide deterministic ordering (render order + insertion order)

mod cmd;
mod key;
mod list;
mod order;

pub use cmd::{BackdropCmd, DrawCmd, GlassCmd, GridCmd, PlaneCmd};
pub use key::SortKey;
pub use list::{DrawItem, DrawList};
pub use order::RenderOrder;
