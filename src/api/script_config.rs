use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::{ChartError, ChartResult};

/// Location of one script file: `path` is a URL prefix, `name` the file name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptLocation {
    pub path: String,
    pub name: String,
}

impl ScriptLocation {
    #[must_use]
    pub fn new(path: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
        }
    }

    #[must_use]
    pub fn url(&self) -> String {
        format!("{}{}", self.path, self.name)
    }
}

/// Script locations used when listing the files a chart page must include.
///
/// This type is serializable so host applications can keep their CDN or
/// self-hosted layout in a JSON file. Field names follow the keys of the
/// classic `config.php` layout (`jQuery`, `highchartsMootoolsAdapter`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScriptConfig {
    #[serde(rename = "jQuery", default = "default_jquery")]
    pub jquery: ScriptLocation,
    #[serde(default = "default_mootools")]
    pub mootools: ScriptLocation,
    #[serde(default = "default_prototype")]
    pub prototype: ScriptLocation,
    #[serde(default = "default_highcharts")]
    pub highcharts: ScriptLocation,
    #[serde(default = "default_highcharts_mootools_adapter")]
    pub highcharts_mootools_adapter: ScriptLocation,
    #[serde(default = "default_highcharts_prototype_adapter")]
    pub highcharts_prototype_adapter: ScriptLocation,
    #[serde(default = "default_highstock")]
    pub highstock: ScriptLocation,
    #[serde(default = "default_highstock_mootools_adapter")]
    pub highstock_mootools_adapter: ScriptLocation,
    #[serde(default = "default_highstock_prototype_adapter")]
    pub highstock_prototype_adapter: ScriptLocation,
    #[serde(default = "default_highmaps")]
    pub highmaps: ScriptLocation,
    #[serde(default = "default_extra")]
    pub extra: IndexMap<String, ScriptLocation>,
}

impl Default for ScriptConfig {
    fn default() -> Self {
        Self {
            jquery: default_jquery(),
            mootools: default_mootools(),
            prototype: default_prototype(),
            highcharts: default_highcharts(),
            highcharts_mootools_adapter: default_highcharts_mootools_adapter(),
            highcharts_prototype_adapter: default_highcharts_prototype_adapter(),
            highstock: default_highstock(),
            highstock_mootools_adapter: default_highstock_mootools_adapter(),
            highstock_prototype_adapter: default_highstock_prototype_adapter(),
            highmaps: default_highmaps(),
            extra: default_extra(),
        }
    }
}

impl ScriptConfig {
    /// Registers (or replaces) an extra script under `key`.
    #[must_use]
    pub fn with_extra_script(mut self, key: impl Into<String>, location: ScriptLocation) -> Self {
        self.extra.insert(key.into(), location);
        self
    }

    /// Overrides selected values, keeping everything the overrides do not mention.
    ///
    /// Objects are merged key by key at every depth, so
    /// `{"jQuery": {"name": "jquery.js"}}` only swaps the jQuery file name.
    pub fn with_overrides(self, overrides: Value) -> ChartResult<Self> {
        let mut merged = serde_json::to_value(&self).map_err(|e| {
            ChartError::InvalidConfig(format!("failed to serialize script config: {e}"))
        })?;
        merge_replace(&mut merged, overrides);
        let config: Self = serde_json::from_value(merged).map_err(|e| {
            ChartError::InvalidConfig(format!("failed to apply script config overrides: {e}"))
        })?;
        debug!(extra_scripts = config.extra.len(), "applied script config overrides");
        Ok(config)
    }

    /// Same as [`with_overrides`](Self::with_overrides) with the overrides given as JSON text.
    pub fn with_overrides_json(self, input: &str) -> ChartResult<Self> {
        let overrides: Value = serde_json::from_str(input).map_err(|e| {
            ChartError::InvalidConfig(format!("failed to parse script config overrides: {e}"))
        })?;
        self.with_overrides(overrides)
    }

    /// Serializes config to pretty JSON for config files.
    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            ChartError::InvalidConfig(format!("failed to serialize script config: {e}"))
        })
    }

    /// Deserializes config from JSON; missing entries take their default location.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidConfig(format!("failed to parse script config: {e}")))
    }
}

fn merge_replace(base: &mut Value, overrides: Value) {
    match (base, overrides) {
        (Value::Object(base_entries), Value::Object(override_entries)) => {
            for (key, value) in override_entries {
                match base_entries.get_mut(&key) {
                    Some(slot) => merge_replace(slot, value),
                    None => {
                        base_entries.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => *slot = value,
    }
}

fn default_jquery() -> ScriptLocation {
    ScriptLocation::new("https://ajax.googleapis.com/ajax/libs/jquery/1.8.3/", "jquery.min.js")
}

fn default_mootools() -> ScriptLocation {
    ScriptLocation::new(
        "https://ajax.googleapis.com/ajax/libs/mootools/1.4.5/",
        "mootools-yui-compressed.js",
    )
}

fn default_prototype() -> ScriptLocation {
    ScriptLocation::new(
        "https://ajax.googleapis.com/ajax/libs/prototype/1.7.1.0/",
        "prototype.js",
    )
}

fn default_highcharts() -> ScriptLocation {
    ScriptLocation::new("https://code.highcharts.com/", "highcharts.js")
}

fn default_highcharts_mootools_adapter() -> ScriptLocation {
    ScriptLocation::new("https://code.highcharts.com/adapters/", "mootools-adapter.js")
}

fn default_highcharts_prototype_adapter() -> ScriptLocation {
    ScriptLocation::new("https://code.highcharts.com/adapters/", "prototype-adapter.js")
}

fn default_highstock() -> ScriptLocation {
    ScriptLocation::new("https://code.highcharts.com/stock/", "highstock.js")
}

fn default_highstock_mootools_adapter() -> ScriptLocation {
    ScriptLocation::new(
        "https://code.highcharts.com/stock/adapters/",
        "mootools-adapter.js",
    )
}

fn default_highstock_prototype_adapter() -> ScriptLocation {
    ScriptLocation::new(
        "https://code.highcharts.com/stock/adapters/",
        "prototype-adapter.js",
    )
}

fn default_highmaps() -> ScriptLocation {
    ScriptLocation::new("https://code.highcharts.com/maps/", "highmaps.js")
}

fn default_extra() -> IndexMap<String, ScriptLocation> {
    let mut extra = IndexMap::new();
    extra.insert(
        "highcharts-more".to_owned(),
        ScriptLocation::new("https://code.highcharts.com/", "highcharts-more.js"),
    );
    extra.insert(
        "exporting".to_owned(),
        ScriptLocation::new("https://code.highcharts.com/modules/", "exporting.js"),
    );
    extra
}
