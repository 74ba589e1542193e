//! Text rendering for formatter output.

use crate::error::Result;
use serde::Serialize;
use serde_json::{Number, Value as JsonValue};

/// Render any value as indented JSON.
pub fn render_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Render one jq result as a single output block.
///
/// Scalars print bare, `null` prints as an empty line, and records and
/// sequences print as indented JSON.
pub fn render_query_value(value: &JsonValue) -> Result<String> {
    match value {
        JsonValue::Null => Ok(String::new()),
        JsonValue::String(s) => Ok(s.clone()),
        JsonValue::Number(n) => Ok(render_number(n)),
        JsonValue::Bool(b) => Ok(b.to_string()),
        JsonValue::Array(_) | JsonValue::Object(_) => render_json(value),
    }
}

/// jq arithmetic yields floats; whole ones print like integers (`1`, not `1.0`).
fn render_number(n: &Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < MAX_EXACT_INTEGER => {
            format!("{}", f as i64)
        }
        _ => n.to_string(),
    }
}

// Beyond 2^53 not every integer is representable as f64
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;
