//! Chart-level glue around the option tree: constructor statements, global
//! options and the list of scripts a page must load.

mod chart;
mod script_config;
mod scripts;

pub use chart::{ChartKind, ChartRenderOptions, DEFAULT_SCRIPT_TAG, Highchart, JsEngine};
pub use script_config::{ScriptConfig, ScriptLocation};
