use tracing::{trace, warn};

use crate::error::{ChartError, ChartResult};

use super::{ChartKind, Highchart, JsEngine, ScriptLocation};

impl Highchart {
    /// Lists the script URLs a page needs for this chart, in load order.
    ///
    /// Order: the javascript engine, its charting adapter (Mootools and
    /// Prototype only), the library for the chart kind, then the selected extras.
    pub fn scripts(&self) -> ChartResult<Vec<String>> {
        let config = &self.config;
        let stock_flavour = self.kind() != ChartKind::Chart;
        let mut scripts = Vec::with_capacity(3 + self.extra_scripts.len());

        match self.engine() {
            JsEngine::JQuery => scripts.push(config.jquery.url()),
            JsEngine::Mootools => {
                scripts.push(config.mootools.url());
                scripts.push(if stock_flavour {
                    config.highstock_mootools_adapter.url()
                } else {
                    config.highcharts_mootools_adapter.url()
                });
            }
            JsEngine::Prototype => {
                scripts.push(config.prototype.url());
                scripts.push(if stock_flavour {
                    config.highstock_prototype_adapter.url()
                } else {
                    config.highcharts_prototype_adapter.url()
                });
            }
        }

        scripts.push(match self.kind() {
            ChartKind::Chart => config.highcharts.url(),
            ChartKind::StockChart => config.highstock.url(),
            ChartKind::Map => config.highmaps.url(),
        });

        for key in &self.extra_scripts {
            let Some(location) = config.extra.get(key) else {
                warn!(key = %key, "extra script is not configured");
                return Err(ChartError::UnknownScript(key.clone()));
            };
            scripts.push(location.url());
        }

        trace!(count = scripts.len(), "resolved chart scripts");
        Ok(scripts)
    }

    /// Renders one `<script src=...>` tag per entry of [`scripts`](Self::scripts).
    pub fn print_scripts(&self) -> ChartResult<String> {
        Ok(self
            .scripts()?
            .iter()
            .map(|src| format!("<script type=\"text/javascript\" src=\"{src}\"></script>"))
            .collect())
    }

    /// Registers an extra script location under `key`.
    ///
    /// The script is only listed once selected via
    /// [`include_extra_scripts`](Self::include_extra_scripts).
    pub fn add_extra_script(
        &mut self,
        key: impl Into<String>,
        path: impl Into<String>,
        name: impl Into<String>,
    ) {
        self.config
            .extra
            .insert(key.into(), ScriptLocation::new(path, name));
    }

    /// Selects extra scripts by key; an empty selection includes every configured extra.
    pub fn include_extra_scripts<I, S>(&mut self, keys: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let keys: Vec<String> = keys.into_iter().map(Into::into).collect();
        self.extra_scripts = if keys.is_empty() {
            self.config.extra.keys().cloned().collect()
        } else {
            keys
        };
        trace!(count = self.extra_scripts.len(), "selected extra scripts");
    }
}
