use std::fmt;

use crate::core::text::normalize_utf8;

/// Raw script expression rendered verbatim (unquoted) in option output.
///
/// Typical use is a callback such as a tooltip formatter:
///
/// ```
/// use highchart_rs::core::JsExpr;
///
/// let formatter = JsExpr::new("function() { return this.y + ' %'; }");
/// assert_eq!(formatter.expression(), "function() { return this.y + ' %'; }");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JsExpr {
    expression: String,
}

impl JsExpr {
    #[must_use]
    pub fn new(expression: impl Into<String>) -> Self {
        Self {
            expression: expression.into(),
        }
    }

    /// Builds an expression from bytes of unknown encoding, converting them to UTF-8.
    #[must_use]
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            expression: normalize_utf8(bytes).into_owned(),
        }
    }

    #[must_use]
    pub fn expression(&self) -> &str {
        &self.expression
    }

    #[must_use]
    pub fn into_expression(self) -> String {
        self.expression
    }
}

impl fmt::Display for JsExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.expression)
    }
}

impl From<&str> for JsExpr {
    fn from(expression: &str) -> Self {
        Self::new(expression)
    }
}

impl From<String> for JsExpr {
    fn from(expression: String) -> Self {
        Self::new(expression)
    }
}
