//! The engine's single output artifact.
//!
//! `model` assembles every section into one serializable `Report`;
//! `render` turns it into the human text form. Formatting only; all
//! computation happens upstream in `analysis`.

pub mod model;
pub mod render;

pub use model::Report;
pub use render::render_text;
