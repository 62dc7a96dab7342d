//! Terminal presentation: view models derived from controller snapshots and
//! their plain-text rendering.

pub mod render;
pub mod vm;

pub use render::{render, render_lines};
pub use vm::Screen;
