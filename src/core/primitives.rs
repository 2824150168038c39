use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::core::value::Scalar;

/// Integral decimals stay exact; everything else goes through `f64`.
///
/// A decimal that `f64` cannot hold maps to `NaN`, which the renderer rejects
/// as unencodable instead of silently emitting `null`.
#[must_use]
pub fn decimal_to_number(value: Decimal) -> Scalar {
    if value.fract().is_zero() {
        if let Some(int) = value.to_i64() {
            return Scalar::Int(int);
        }
    }
    Scalar::Float(value.to_f64().unwrap_or(f64::NAN))
}

#[must_use]
pub fn datetime_to_unix_millis(time: DateTime<Utc>) -> i64 {
    time.timestamp_millis()
}
