//! jq support backed by the `jaq` crates.

use crate::error::{Error, Result};
use crate::query::QueryEngine;
use jaq_interpret::{Ctx, Filter, FilterT, ParseCtx, RcIter, Val};
use serde_json::Value as JsonValue;

/// jq engine with the core and standard filter libraries loaded.
#[derive(Debug, Default, Clone, Copy)]
pub struct JqEngine;

impl JqEngine {
    pub fn new() -> Self {
        JqEngine
    }
}

impl QueryEngine for JqEngine {
    type Query = Filter;

    fn parse(&self, expr: &str) -> Result<Filter> {
        let (main, errs) = jaq_parse::parse(expr, jaq_parse::main());
        if !errs.is_empty() {
            let messages: Vec<String> = errs.iter().map(|e| e.to_string()).collect();
            return Err(Error::QuerySyntax(messages.join("; ")));
        }
        let main = main.ok_or_else(|| Error::QuerySyntax(format!("cannot parse '{}'", expr)))?;

        let mut defs = ParseCtx::new(Vec::new());
        defs.insert_natives(jaq_core::core());
        defs.insert_defs(jaq_std::std());

        let filter = defs.compile(main);
        if !defs.errs.is_empty() {
            // Undefined filters or variables
            return Err(Error::QuerySyntax(format!(
                "{} undefined symbol(s) in '{}'",
                defs.errs.len(),
                expr
            )));
        }

        Ok(filter)
    }

    fn run(&self, query: &Filter, input: JsonValue) -> Result<Vec<JsonValue>> {
        let inputs = RcIter::new(core::iter::empty());
        let outputs = query.run((Ctx::new([], &inputs), Val::from(input)));

        let mut results = Vec::new();
        for output in outputs {
            let value = output.map_err(|e| Error::QueryEvaluation(e.to_string()))?;
            results.push(JsonValue::from(value));
        }

        tracing::debug!(results = results.len(), "jq query finished");
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn eval(expr: &str, input: JsonValue) -> Result<Vec<JsonValue>> {
        let engine = JqEngine::new();
        let query = engine.parse(expr)?;
        engine.run(&query, input)
    }

    #[test]
    fn test_identity() {
        let input = json!({"id": 1, "tags": ["a", "b"]});
        assert_eq!(eval(".", input.clone()).unwrap(), vec![input]);
    }

    #[test]
    fn test_iterate_field() {
        let input = json!([{"id": 1}, {"id": 2}]);
        assert_eq!(eval(".[].id", input).unwrap(), vec![json!(1), json!(2)]);
    }

    #[test]
    fn test_std_filters_available() {
        let input = json!([{"id": 1, "starred": true}, {"id": 2, "starred": false}]);
        let results = eval("map(select(.starred)) | length", input).unwrap();
        assert_eq!(results, vec![json!(1)]);
    }

    #[test]
    fn test_empty_output() {
        assert!(eval("empty", json!(null)).unwrap().is_empty());
    }

    #[test]
    fn test_unmatched_bracket_is_syntax_error() {
        let err = eval(".items[", json!({})).unwrap_err();
        assert!(matches!(err, Error::QuerySyntax(_)));
    }

    #[test]
    fn test_undefined_filter_is_syntax_error() {
        let err = eval("no_such_filter", json!({})).unwrap_err();
        assert!(matches!(err, Error::QuerySyntax(_)));
    }

    #[test]
    fn test_runtime_error() {
        let err = eval(r#"error("boom")"#, json!(1)).unwrap_err();
        assert!(matches!(err, Error::QueryEvaluation(_)));
    }

    #[test]
    fn test_index_array_with_string_fails() {
        let err = eval(".items", json!([1, 2])).unwrap_err();
        assert!(matches!(err, Error::QueryEvaluation(_)));
    }
}
