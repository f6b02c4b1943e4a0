//! Union semantics: first match wins, options run once.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use assay::{safe_parse, Assay, ParseInfo, Parsed, Reason, Schema, ValueSchema};
use serde_json::{json, Value};

/// Wraps a schema and counts how many times it is parsed.
struct Counting<S> {
    calls: Arc<AtomicUsize>,
    inner: S,
}

impl<S: Schema> Schema for Counting<S> {
    type Output = Value;

    fn kind(&self) -> &'static str {
        Schema::kind(&self.inner)
    }

    fn reason(&self) -> Reason {
        Schema::reason(&self.inner)
    }

    fn parse(&self, input: &Value, info: &ParseInfo) -> Parsed<Value> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.parse_to_value(input, info)
    }

    fn parse_to_value(&self, input: &Value, info: &ParseInfo) -> Parsed<Value> {
        self.parse(input, info)
    }
}

#[test]
fn test_winning_option_parses_exactly_once() {
    let calls = Arc::new(AtomicUsize::new(0));
    let schema = Assay::union(vec![Box::new(Counting {
        calls: Arc::clone(&calls),
        inner: Assay::string(),
    }) as Box<dyn ValueSchema>]);

    let result = safe_parse(&schema, &json!("hello"));
    assert!(result.is_success());
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_options_after_the_winner_never_run() {
    let later_calls = Arc::new(AtomicUsize::new(0));
    let schema = Assay::union(vec![
        Box::new(Assay::string()) as Box<dyn ValueSchema>,
        Box::new(Counting {
            calls: Arc::clone(&later_calls),
            inner: Assay::string(),
        }) as Box<dyn ValueSchema>,
    ]);

    let result = safe_parse(&schema, &json!("hello"));
    assert!(result.is_success());
    assert_eq!(later_calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_output_is_first_successful_options_output() {
    // The second option would also match but must not influence the output.
    let schema = Assay::union(vec![
        Box::new(Assay::string().trim()) as Box<dyn ValueSchema>,
        Box::new(Assay::string().lowercase()) as Box<dyn ValueSchema>,
    ]);

    let output = safe_parse(&schema, &json!("  ADA  "))
        .into_result()
        .unwrap();
    assert_eq!(output, json!("ADA"));
}

#[test]
fn test_every_option_runs_once_on_exhaustion() {
    let first = Arc::new(AtomicUsize::new(0));
    let second = Arc::new(AtomicUsize::new(0));
    let schema = Assay::union(vec![
        Box::new(Counting {
            calls: Arc::clone(&first),
            inner: Assay::number(),
        }) as Box<dyn ValueSchema>,
        Box::new(Counting {
            calls: Arc::clone(&second),
            inner: Assay::boolean(),
        }) as Box<dyn ValueSchema>,
    ]);

    let result = safe_parse(&schema, &json!("neither"));
    assert!(result.is_failure());
    assert_eq!(first.load(Ordering::SeqCst), 1);
    assert_eq!(second.load(Ordering::SeqCst), 1);
}

#[test]
fn test_union_inside_object_keeps_paths() {
    let schema = Assay::object().entry(
        "id",
        Assay::union(vec![
            Box::new(Assay::string()) as Box<dyn ValueSchema>,
            Box::new(Assay::number()) as Box<dyn ValueSchema>,
        ]),
    );

    assert!(safe_parse(&schema, &json!({ "id": "abc" })).is_success());
    assert!(safe_parse(&schema, &json!({ "id": 7 })).is_success());

    let issues = safe_parse(&schema, &json!({ "id": true }))
        .into_result()
        .unwrap_err();
    let issue = issues.first();
    assert_eq!(issue.validation, "union");
    assert_eq!(issue.path.to_string(), "id");
    for sub in issue.issues.as_ref().unwrap() {
        assert_eq!(sub.path.to_string(), "id");
    }
}
