//! Option tree model: nodes, keys, plain values and raw script expressions.

pub mod js_expr;
pub mod option_node;
pub mod primitives;
pub mod text;
pub mod value;

pub use js_expr::JsExpr;
pub use option_node::{OptionKey, OptionNode};
pub use text::{TextEncoding, detect_encoding, normalize_utf8};
pub use value::{OptionValue, Scalar};
