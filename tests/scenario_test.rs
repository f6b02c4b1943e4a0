//! End-to-end scenarios over the sync schemas.

use assay::{safe_parse, safe_parse_with, Assay, Origin, ParseInfo, Reason, Schema, ValueSchema};
use serde_json::{json, Value};

fn user_schema() -> assay::ObjectSchema {
    Assay::object()
        .entry("name", Assay::string())
        .entry("age", Assay::number().min(0.0))
}

#[test]
fn test_valid_object_drops_unknown_keys() {
    let result = safe_parse(
        &user_schema(),
        &json!({ "name": "Ada", "age": 30, "extra": "x" }),
    );

    let output = result.into_result().unwrap();
    assert_eq!(Value::Object(output), json!({ "name": "Ada", "age": 30 }));
}

#[test]
fn test_invalid_object_reports_both_entries() {
    let result = safe_parse(&user_schema(), &json!({ "name": 42, "age": -1 }));
    let issues = result.into_result().unwrap_err();

    assert_eq!(issues.len(), 2);

    let name_issue = &issues.with_validation("string")[0];
    assert_eq!(name_issue.path.to_string(), "name");
    assert_eq!(name_issue.input, json!(42));

    let age_issue = &issues.with_validation("min_value")[0];
    assert_eq!(age_issue.path.to_string(), "age");
    assert_eq!(age_issue.input, json!(-1.0));
}

#[test]
fn test_abort_early_yields_exactly_one_issue() {
    let result = safe_parse_with(
        &user_schema(),
        &json!({ "name": 42, "age": -1 }),
        &ParseInfo::new().with_abort_early(true),
    );

    let issues = result.into_result().unwrap_err();
    assert_eq!(issues.len(), 1);
}

#[test]
fn test_array_issue_carries_index_path() {
    let schema = Assay::array(Assay::string().min_len(2));
    let result = safe_parse(&schema, &json!(["hi", "a", "ok"]));

    let issues = result.into_result().unwrap_err();
    assert_eq!(issues.len(), 1);
    let issue = issues.first();
    assert_eq!(issue.validation, "min_length");
    assert_eq!(issue.path.to_string(), "[1]");
    assert_eq!(issue.input, json!("a"));
}

#[test]
fn test_union_exhaustion_nests_alternative_issues() {
    let schema = Assay::union(vec![
        Box::new(Assay::literal("a")) as Box<dyn ValueSchema>,
        Box::new(Assay::literal("b")) as Box<dyn ValueSchema>,
    ]);
    let result = safe_parse(&schema, &json!("c"));

    let issues = result.into_result().unwrap_err();
    assert_eq!(issues.len(), 1);

    let issue = issues.first();
    assert_eq!(issue.validation, "union");
    assert_eq!(issue.reason, Reason::Type);

    let nested = issue.issues.as_ref().unwrap();
    assert_eq!(nested.len(), 2);
    for sub in nested {
        assert_eq!(sub.validation, "literal");
        assert_eq!(sub.input, json!("c"));
    }
}

#[test]
fn test_record_ignores_pollution_keys() {
    let schema = Assay::record(Assay::string(), Assay::number());
    let result = safe_parse(&schema, &json!({ "__proto__": 1, "a": 2 }));

    let output = result.into_result().unwrap();
    assert_eq!(Value::Object(output), json!({ "a": 2 }));
}

#[test]
fn test_record_origin_tags() {
    let schema = Assay::record(Assay::string().min_len(3), Assay::number());
    let result = safe_parse(&schema, &json!({ "ab": true }));

    let issues = result.into_result().unwrap_err();
    assert_eq!(issues.len(), 2);
    assert_eq!(
        issues.with_validation("min_length")[0].origin,
        Some(Origin::Key)
    );
    assert_eq!(issues.with_validation("number")[0].origin, Some(Origin::Value));
}

#[test]
fn test_deeply_mixed_nesting() {
    let schema = Assay::object().entry(
        "teams",
        Assay::array(
            Assay::object()
                .entry("name", Assay::string().min_len(1))
                .entry("members", Assay::set(Assay::string().email())),
        ),
    );

    let input = json!({
        "teams": [
            { "name": "core", "members": ["ada@x.io", "grace@x.io"] },
            { "name": "", "members": ["not-an-email"] }
        ]
    });

    let issues = safe_parse(&schema, &input).into_result().unwrap_err();
    assert_eq!(issues.len(), 2);

    let paths: Vec<_> = issues.iter().map(|i| i.path.to_string()).collect();
    assert!(paths.contains(&"teams[1].name".to_string()));
    assert!(paths.contains(&"teams[1].members[0]".to_string()));
}

#[test]
fn test_wrappers_in_object_shapes() {
    let schema = Assay::object()
        .entry("nickname", Assay::optional(Assay::string()))
        .entry("role", Assay::nullable(Assay::string()).default("user"))
        .entry("id", Assay::non_nullable(Assay::number()));

    let output = schema
        .parse(&json!({ "role": null, "id": 7 }), &ParseInfo::new())
        .into_result()
        .unwrap();
    assert_eq!(
        Value::Object(output),
        json!({ "nickname": null, "role": "user", "id": 7 })
    );

    let issues = schema
        .parse(&json!({ "role": "x", "id": null }), &ParseInfo::new())
        .into_result()
        .unwrap_err();
    assert_eq!(issues.first().validation, "non_nullable");
    assert_eq!(issues.first().path.to_string(), "id");
}

#[test]
fn test_map_with_non_string_keys() {
    let schema = Assay::map(Assay::number().min(0.0), Assay::string());
    let result = safe_parse(&schema, &json!([[1, "one"], [-2, 5]]));

    let issues = result.into_result().unwrap_err();
    assert_eq!(issues.len(), 2);

    let key_issue = &issues.with_validation("min_value")[0];
    assert_eq!(key_issue.origin, Some(Origin::Key));
    assert_eq!(key_issue.path.to_string(), "[1].key");

    let value_issue = &issues.with_validation("string")[0];
    assert_eq!(value_issue.origin, Some(Origin::Value));
    assert_eq!(value_issue.path.to_string(), "[1].value");
}

#[test]
fn test_tuple_with_rest() {
    let schema = Assay::tuple(vec![
        Box::new(Assay::string()) as Box<dyn ValueSchema>,
        Box::new(Assay::number()) as Box<dyn ValueSchema>,
    ])
    .rest(Assay::boolean());

    assert!(safe_parse(&schema, &json!(["id", 1, true, false])).is_success());

    let issues = safe_parse(&schema, &json!(["id", 1, true, 3]))
        .into_result()
        .unwrap_err();
    assert_eq!(issues.first().path.to_string(), "[3]");
    assert_eq!(issues.first().validation, "boolean");
}
