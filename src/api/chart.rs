use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{JsExpr, OptionKey, OptionNode, OptionValue};
use crate::error::{ChartError, ChartResult};
use crate::render::render;

use super::ScriptConfig;

pub const DEFAULT_SCRIPT_TAG: &str = "<script type=\"text/javascript\">%s</script>";

const SCRIPT_TAG_PLACEHOLDER: &str = "%s";

/// Chart flavour; selects the constructor and the library script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ChartKind {
    /// Regular `Highcharts.Chart`.
    #[default]
    Chart,
    /// Highstock `Highcharts.StockChart`.
    StockChart,
    /// Highmaps `Highcharts.Map`.
    Map,
}

impl ChartKind {
    #[must_use]
    pub fn constructor_name(self) -> &'static str {
        match self {
            Self::Chart => "Chart",
            Self::StockChart => "StockChart",
            Self::Map => "Map",
        }
    }
}

/// Javascript framework loaded before the charting library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum JsEngine {
    #[default]
    JQuery,
    Mootools,
    Prototype,
}

/// Knobs for [`Highchart::render`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChartRenderOptions {
    pub var_name: Option<String>,
    pub callback: Option<JsExpr>,
    pub with_script_tag: bool,
}

impl ChartRenderOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Assigns the created chart to a script variable.
    #[must_use]
    pub fn with_var_name(mut self, var_name: impl Into<String>) -> Self {
        self.var_name = Some(var_name.into());
        self
    }

    /// Passes a load callback as second constructor argument.
    #[must_use]
    pub fn with_callback(mut self, callback: impl Into<JsExpr>) -> Self {
        self.callback = Some(callback.into());
        self
    }

    #[must_use]
    pub fn with_script_tag(mut self, with_script_tag: bool) -> Self {
        self.with_script_tag = with_script_tag;
        self
    }
}

/// A chart definition: option tree plus what is needed to emit its script.
///
/// Top-level options are reached through the same auto-vivifying accessors as
/// [`OptionNode`]:
///
/// ```
/// use highchart_rs::api::{ChartRenderOptions, Highchart};
/// use highchart_rs::core::OptionNode;
///
/// let mut chart = Highchart::default();
/// chart["chart"]["renderTo"] = OptionNode::new("container");
/// chart.get("series").push().set("data", [1, 2, 3]);
///
/// let script = chart
///     .render(&ChartRenderOptions::new().with_var_name("chart1"))
///     .expect("render");
/// assert_eq!(
///     script,
///     r#"chart1 = new Highcharts.Chart({"chart":{"renderTo":"container"},"series":[{"data":[1,2,3]}]});"#
/// );
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Highchart {
    kind: ChartKind,
    engine: JsEngine,
    options: OptionNode,
    pub(super) config: ScriptConfig,
    pub(super) extra_scripts: Vec<String>,
    script_tag: String,
}

impl Default for Highchart {
    fn default() -> Self {
        Self::new(ChartKind::default(), JsEngine::default())
    }
}

impl Highchart {
    #[must_use]
    pub fn new(kind: ChartKind, engine: JsEngine) -> Self {
        Self {
            kind,
            engine,
            options: OptionNode::default(),
            config: ScriptConfig::default(),
            extra_scripts: Vec::new(),
            script_tag: DEFAULT_SCRIPT_TAG.to_owned(),
        }
    }

    /// Replaces the script locations used by [`scripts`](Self::scripts).
    #[must_use]
    pub fn with_config(mut self, config: ScriptConfig) -> Self {
        self.config = config;
        self
    }

    /// Resets script locations to the defaults overridden by `overrides`.
    ///
    /// `overrides` has the same shape as the serialized [`ScriptConfig`];
    /// only the values it mentions change, e.g.
    /// `{"jQuery": {"name": "jquery-1.9.js"}}`.
    pub fn set_configurations(&mut self, overrides: &str) -> ChartResult<()> {
        self.config = ScriptConfig::default().with_overrides_json(overrides)?;
        Ok(())
    }

    #[must_use]
    pub fn kind(&self) -> ChartKind {
        self.kind
    }

    #[must_use]
    pub fn engine(&self) -> JsEngine {
        self.engine
    }

    #[must_use]
    pub fn config(&self) -> &ScriptConfig {
        &self.config
    }

    #[must_use]
    pub fn options(&self) -> &OptionNode {
        &self.options
    }

    pub fn options_mut(&mut self) -> &mut OptionNode {
        &mut self.options
    }

    /// Returns the top-level option at `key`, creating it when absent.
    pub fn get(&mut self, key: impl Into<OptionKey>) -> &mut OptionNode {
        self.options.get(key)
    }

    pub fn set(
        &mut self,
        key: impl Into<OptionKey>,
        value: impl Into<OptionValue>,
    ) -> &mut OptionNode {
        self.options.set(key, value)
    }

    #[must_use]
    pub fn has(&self, key: impl Into<OptionKey>) -> bool {
        self.options.has(key)
    }

    pub fn remove(&mut self, key: impl Into<OptionKey>) -> Option<OptionNode> {
        self.options.remove(key)
    }

    #[must_use]
    pub fn script_tag(&self) -> &str {
        &self.script_tag
    }

    /// Replaces the wrapper used when rendering with a script tag.
    ///
    /// The template must contain `%s` where the chart script goes.
    pub fn set_script_tag(&mut self, script_tag: impl Into<String>) -> ChartResult<&mut Self> {
        let script_tag = script_tag.into();
        if !script_tag.contains(SCRIPT_TAG_PLACEHOLDER) {
            return Err(ChartError::InvalidConfig(format!(
                "script tag template must contain {SCRIPT_TAG_PLACEHOLDER}"
            )));
        }
        self.script_tag = script_tag;
        Ok(self)
    }

    /// Renders only the options literal.
    pub fn render_options(&self) -> ChartResult<String> {
        render(&self.options)
    }

    /// Renders the statement that creates the chart.
    pub fn render(&self, options: &ChartRenderOptions) -> ChartResult<String> {
        let mut script = String::new();
        if let Some(var_name) = &options.var_name {
            script.push_str(var_name);
            script.push_str(" = ");
        }
        script.push_str("new Highcharts.");
        script.push_str(self.kind.constructor_name());
        script.push('(');
        script.push_str(&self.render_options()?);
        if let Some(callback) = &options.callback {
            script.push_str(", ");
            script.push_str(callback.expression());
        }
        script.push_str(");");

        debug!(
            kind = ?self.kind,
            with_script_tag = options.with_script_tag,
            bytes = script.len(),
            "rendered chart constructor"
        );

        if options.with_script_tag {
            script = self.script_tag.replacen(SCRIPT_TAG_PLACEHOLDER, &script, 1);
        }
        Ok(script)
    }

    /// Renders the statement that applies options to every chart on the page.
    ///
    /// Options such as `lang` or `global` cannot be set per chart and go
    /// through `Highcharts.setOptions` instead.
    pub fn set_options_script(options: &OptionNode) -> ChartResult<String> {
        Ok(format!("Highcharts.setOptions({});", render(options)?))
    }
}

impl<K: Into<OptionKey>> Index<K> for Highchart {
    type Output = OptionNode;

    fn index(&self, key: K) -> &OptionNode {
        &self.options[key]
    }
}

impl<K: Into<OptionKey>> IndexMut<K> for Highchart {
    fn index_mut(&mut self, key: K) -> &mut OptionNode {
        self.options.get(key)
    }
}
