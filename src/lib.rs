//! highchart-rs: build Highcharts option trees and render them as script.
//!
//! Options are assembled in an auto-vivifying [`OptionNode`] tree, raw
//! callbacks are embedded as [`JsExpr`] leaves, and the renderer emits a
//! literal ready for `new Highcharts.Chart(...)`.

pub mod api;
pub mod core;
pub mod error;
pub mod render;
pub mod telemetry;

pub use crate::api::{ChartKind, ChartRenderOptions, Highchart, JsEngine, ScriptConfig};
pub use crate::core::{JsExpr, OptionKey, OptionNode, OptionValue, Scalar};
pub use crate::error::{ChartError, ChartResult};
pub use crate::render::{render, render_value};
