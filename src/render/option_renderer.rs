use tracing::{debug, trace};

use crate::core::{JsExpr, OptionNode, OptionValue, Scalar};
use crate::error::{ChartError, ChartResult};

const MARKER_PREFIX: &str = "__hcjs_expr_";
const MARKER_SUFFIX: &str = "__";

/// Layout of the emitted literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderLayout {
    #[default]
    Compact,
    Pretty,
}

/// Turns option trees into script object literals.
///
/// Rendering runs in four steps:
/// 1. resolve the tree to a plain [`OptionValue`], keeping [`JsExpr`] leaves
/// 2. swap every expression for a unique quoted marker string
/// 3. encode the structure as JSON
/// 4. replace each quoted marker with the raw expression text
///
/// Marker numbering restarts on every call, so rendering is deterministic.
#[derive(Debug, Clone, Copy, Default)]
pub struct OptionRenderer {
    layout: RenderLayout,
}

impl OptionRenderer {
    #[must_use]
    pub fn new(layout: RenderLayout) -> Self {
        Self { layout }
    }

    #[must_use]
    pub fn layout(self) -> RenderLayout {
        self.layout
    }

    /// Renders a tree; an empty tree renders as `{}`.
    pub fn render(self, options: &OptionNode) -> ChartResult<String> {
        if options.is_empty() {
            return Ok("{}".to_owned());
        }
        self.render_value(options.value())
    }

    pub fn render_value(self, value: OptionValue) -> ChartResult<String> {
        let mut expressions = Vec::new();
        let value = extract_expressions(value, &mut expressions);
        let json = to_json_value(&value)?;
        let encoded = match self.layout {
            RenderLayout::Compact => serde_json::to_string(&json),
            RenderLayout::Pretty => serde_json::to_string_pretty(&json),
        }
        .map_err(|e| ChartError::Encoding(e.to_string()))?;

        let output = substitute_expressions(&encoded, &expressions);
        debug!(
            expressions = expressions.len(),
            bytes = output.len(),
            "rendered chart options"
        );
        Ok(output)
    }
}

/// Renders `options` as a compact literal.
pub fn render(options: &OptionNode) -> ChartResult<String> {
    OptionRenderer::default().render(options)
}

/// Renders a plain value as a compact literal.
pub fn render_value(value: impl Into<OptionValue>) -> ChartResult<String> {
    OptionRenderer::default().render_value(value.into())
}

fn marker(index: usize) -> String {
    format!("{MARKER_PREFIX}{index}{MARKER_SUFFIX}")
}

fn extract_expressions(value: OptionValue, expressions: &mut Vec<JsExpr>) -> OptionValue {
    match value {
        OptionValue::Expr(expr) => {
            let key = marker(expressions.len());
            trace!(marker = %key, "extracted script expression");
            expressions.push(expr);
            OptionValue::Scalar(Scalar::Str(key))
        }
        OptionValue::Array(items) => OptionValue::Array(
            items
                .into_iter()
                .map(|item| extract_expressions(item, expressions))
                .collect(),
        ),
        OptionValue::Object(entries) => OptionValue::Object(
            entries
                .into_iter()
                .map(|(key, item)| (key, extract_expressions(item, expressions)))
                .collect(),
        ),
        scalar @ OptionValue::Scalar(_) => scalar,
    }
}

fn to_json_value(value: &OptionValue) -> ChartResult<serde_json::Value> {
    Ok(match value {
        OptionValue::Scalar(Scalar::Null) => serde_json::Value::Null,
        OptionValue::Scalar(Scalar::Bool(flag)) => serde_json::Value::Bool(*flag),
        OptionValue::Scalar(Scalar::Int(int)) => serde_json::Value::from(*int),
        OptionValue::Scalar(Scalar::Float(float)) => serde_json::Number::from_f64(*float)
            .map(serde_json::Value::Number)
            .ok_or_else(|| {
                ChartError::Encoding(format!("non-finite number {float} cannot be encoded"))
            })?,
        OptionValue::Scalar(Scalar::Str(text)) => serde_json::Value::String(text.clone()),
        OptionValue::Expr(expr) => {
            return Err(ChartError::Encoding(format!(
                "unextracted script expression: {}",
                expr.expression()
            )));
        }
        OptionValue::Array(items) => serde_json::Value::Array(
            items
                .iter()
                .map(to_json_value)
                .collect::<ChartResult<Vec<_>>>()?,
        ),
        OptionValue::Object(entries) => serde_json::Value::Object(
            entries
                .iter()
                .map(|(key, item)| Ok((key.clone(), to_json_value(item)?)))
                .collect::<ChartResult<serde_json::Map<_, _>>>()?,
        ),
    })
}

/// Replaces quoted markers in one left-to-right pass.
///
/// Expression text is copied to the output and never scanned again, so an
/// expression that happens to contain marker-like text is left untouched.
fn substitute_expressions(encoded: &str, expressions: &[JsExpr]) -> String {
    if expressions.is_empty() {
        return encoded.to_owned();
    }

    let opening = format!("\"{MARKER_PREFIX}");
    let extra: usize = expressions.iter().map(|e| e.expression().len()).sum();
    let mut output = String::with_capacity(encoded.len() + extra);
    let mut rest = encoded;
    while let Some(start) = rest.find(&opening) {
        output.push_str(&rest[..start]);
        let tail = &rest[start + opening.len()..];
        match parse_marker_tail(tail, expressions.len()) {
            Some((index, consumed)) => {
                output.push_str(expressions[index].expression());
                rest = &tail[consumed..];
            }
            None => {
                output.push_str(&opening);
                rest = tail;
            }
        }
    }
    output.push_str(rest);
    output
}

/// Parses `<index>__"` and returns the index with the number of bytes consumed.
fn parse_marker_tail(tail: &str, count: usize) -> Option<(usize, usize)> {
    let digits = tail.bytes().take_while(u8::is_ascii_digit).count();
    let number = &tail[..digits];
    if number.is_empty() || (number.len() > 1 && number.starts_with('0')) {
        return None;
    }
    let index: usize = number.parse().ok()?;
    let closing = &tail[digits..];
    if index >= count || !closing.starts_with(MARKER_SUFFIX) {
        return None;
    }
    if !closing[MARKER_SUFFIX.len()..].starts_with('"') {
        return None;
    }
    Some((index, digits + MARKER_SUFFIX.len() + 1))
}

#[cfg(test)]
mod tests {
    use super::{
        MARKER_PREFIX, OptionRenderer, RenderLayout, marker, parse_marker_tail,
        substitute_expressions,
    };
    use crate::core::{JsExpr, OptionNode, OptionValue};

    #[test]
    fn markers_are_unique_per_position() {
        assert_ne!(marker(1), marker(11));
        assert!(marker(3).starts_with(MARKER_PREFIX));
    }

    #[test]
    fn marker_tail_rejects_partial_or_padded_numbers() {
        assert_eq!(parse_marker_tail("0__\",", 1), Some((0, 4)));
        assert_eq!(parse_marker_tail("01__\"", 2), None);
        assert_eq!(parse_marker_tail("1__\"", 1), None);
        assert_eq!(parse_marker_tail("0__\\\"", 1), None);
        assert_eq!(parse_marker_tail("__\"", 1), None);
    }

    #[test]
    fn expression_text_that_looks_like_a_marker_is_not_rescanned() {
        let expressions = vec![
            JsExpr::new(format!("\"{}\"", marker(1))),
            JsExpr::new("second"),
        ];
        let encoded = format!("[\"{}\",\"{}\"]", marker(0), marker(1));
        let output = substitute_expressions(&encoded, &expressions);
        assert_eq!(output, format!("[\"{}\",second]", marker(1)));
    }

    #[test]
    fn escaped_quotes_around_marker_text_are_left_alone() {
        let mut options = OptionNode::default();
        options.set("title", format!("say \"{}\"", marker(0)));
        options.set("formatter", JsExpr::new("f"));

        let output = OptionRenderer::default().render(&options).expect("render");
        assert_eq!(
            output,
            format!("{{\"title\":\"say \\\"{}\\\"\",\"formatter\":f}}", marker(0))
        );
    }

    #[test]
    fn pretty_layout_still_substitutes_expressions() {
        let mut options = OptionNode::default();
        options.get("tooltip").set("formatter", JsExpr::new("function(){}"));

        let output = OptionRenderer::new(RenderLayout::Pretty)
            .render(&options)
            .expect("render");
        assert!(output.contains("\"formatter\": function(){}"));
        assert!(output.contains('\n'));
        assert!(!output.contains(MARKER_PREFIX));
    }

    #[test]
    fn non_finite_float_is_an_encoding_error() {
        let err = OptionRenderer::default()
            .render_value(OptionValue::from(vec![1.0, f64::NAN]))
            .expect_err("nan must fail");
        assert!(format!("{err}").contains("non-finite"));
    }
}
