//! Query evaluation for `--jq` expressions.
//!
//! The formatter only depends on the [`QueryEngine`] trait; [`JqEngine`] is the
//! implementation shipped with the CLI.

mod jq;

pub use jq::JqEngine;

use crate::error::Result;
use serde_json::Value as JsonValue;

/// A JSON query language that can be plugged into the formatter.
pub trait QueryEngine {
    /// A parsed, ready-to-run query.
    type Query;

    /// Parse an expression.
    ///
    /// Fails with [`crate::Error::QuerySyntax`] when the expression is malformed.
    fn parse(&self, expr: &str) -> Result<Self::Query>;

    /// Run a parsed query against `input`, collecting every output value.
    ///
    /// The first runtime error aborts the whole run with
    /// [`crate::Error::QueryEvaluation`].
    fn run(&self, query: &Self::Query, input: JsonValue) -> Result<Vec<JsonValue>>;
}
