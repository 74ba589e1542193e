//! Output formatting module.
//!
//! Every list command ends by handing its result to [`print_output`], which
//! applies the `--json` field projection and the `--jq` query before writing
//! to stdout:
//!
//! 1. With fields, the result is projected (see [`FieldList::project`]).
//! 2. With a query, the value is run through the [`QueryEngine`] and each
//!    result is printed on its own. A wrapper's `items` are queried instead
//!    of the wrapper itself.
//! 3. Otherwise the (projected) value is printed as indented JSON.

mod fields;
mod render;

pub use fields::{FieldList, ITEMS_KEY, Shape};
pub use render::{render_json, render_query_value};

use crate::error::{Error, Result};
use crate::query::{JqEngine, QueryEngine};
use serde::Serialize;
use serde_json::Value as JsonValue;
use std::io::{self, Write};

/// Format `result` and print it to stdout using the jq engine.
pub fn print_output<T: Serialize + ?Sized>(result: &T, fields: &str, query: &str) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_output(&mut out, &JqEngine::new(), result, fields, query)
}

/// Format `result` into `out`.
///
/// Nothing is written when projection, querying or rendering fails.
pub fn write_output<W, E, T>(
    out: &mut W,
    engine: &E,
    result: &T,
    fields: &str,
    query: &str,
) -> Result<()>
where
    W: Write,
    E: QueryEngine,
    T: Serialize + ?Sized,
{
    let text = format_output(engine, result, fields, query)?;
    out.write_all(text.as_bytes()).map_err(Error::Output)?;
    out.flush().map_err(Error::Output)
}

/// Format `result` into the exact text the CLI prints.
pub fn format_output<E, T>(engine: &E, result: &T, fields: &str, query: &str) -> Result<String>
where
    E: QueryEngine,
    T: Serialize + ?Sized,
{
    // Only plain JSON types from here on
    let value = serde_json::to_value(result)?;

    // A non-empty field string projects even when every name in it is blank
    let working = if fields.is_empty() {
        value
    } else {
        let field_list = FieldList::parse(fields);
        let projected = field_list.project(&value);
        tracing::debug!(fields = ?field_list.names(), "projected result");
        projected
    };

    if query.is_empty() {
        let mut text = render_json(&working)?;
        text.push('\n');
        return Ok(text);
    }

    let target = query_target(working);
    let parsed = engine.parse(query)?;
    let results = engine.run(&parsed, target)?;

    let mut text = String::new();
    for value in &results {
        text.push_str(&render_query_value(value)?);
        text.push('\n');
    }
    Ok(text)
}

/// The value a query runs against: a wrapper's `items`, or the value itself.
fn query_target(value: JsonValue) -> JsonValue {
    match value {
        JsonValue::Object(mut map) if map.contains_key(ITEMS_KEY) => {
            if let Some(total) = map.get("total") {
                tracing::debug!(%total, "querying wrapped items");
            }
            map.remove(ITEMS_KEY).unwrap_or(JsonValue::Null)
        }
        other => other,
    }
}
