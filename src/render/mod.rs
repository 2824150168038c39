//! Serialization of option trees into script literals.
//!
//! The output of [`render`] is a JSON object literal in which every
//! [`JsExpr`](crate::core::JsExpr) leaf appears verbatim, ready to be passed to
//! a chart constructor.

mod option_renderer;

pub use option_renderer::{OptionRenderer, RenderLayout, render, render_value};
