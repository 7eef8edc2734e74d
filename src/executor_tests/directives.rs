use serde_json::json;

use crate::meta::{Field, ObjectMeta};
use crate::{execute, InputValue, SchemaType, Type, Value, Variables};

fn schema() -> SchemaType<()> {
    SchemaType::new(
        "Query",
        None,
        None,
        vec![ObjectMeta::new("Query")
            .field(Field::new("a", Type::named("String")).resolve(|_, _, _| Ok(Value::string("a"))))
            .field(Field::new("b", Type::named("String")).resolve(|_, _, _| Ok(Value::string("b"))))
            .into_meta()],
    )
    .expect("valid schema")
}

fn run(query: &str) -> serde_json::Value {
    run_with_vars(query, Variables::new())
}

fn run_with_vars(query: &str, variables: Variables) -> serde_json::Value {
    let schema = schema();
    let (data, errors) =
        execute(query, None, &schema, &variables, &()).expect("request should execute");

    assert!(errors.is_empty(), "unexpected errors: {errors:#?}");
    serde_json::to_value(&data).expect("serialization failed")
}

#[test]
fn skip_true_removes_the_field() {
    assert_eq!(run("{ a @skip(if: true) b }"), json!({"b": "b"}));
}

#[test]
fn skip_false_keeps_the_field() {
    assert_eq!(run("{ a @skip(if: false) b }"), json!({"a": "a", "b": "b"}));
}

#[test]
fn include_true_keeps_the_field() {
    assert_eq!(run("{ a @include(if: true) b }"), json!({"a": "a", "b": "b"}));
}

#[test]
fn include_false_removes_the_field() {
    assert_eq!(run("{ a @include(if: false) b }"), json!({"b": "b"}));
}

#[test]
fn skip_wins_over_include() {
    // A selection is kept iff `include.if != false` and `skip.if != true`.
    assert_eq!(run("{ a @skip(if: true) @include(if: true) b }"), json!({"b": "b"}));
    assert_eq!(run("{ a @skip(if: true) @include(if: false) b }"), json!({"b": "b"}));
    assert_eq!(run("{ a @skip(if: false) @include(if: false) b }"), json!({"b": "b"}));
    assert_eq!(
        run("{ a @skip(if: false) @include(if: true) b }"),
        json!({"a": "a", "b": "b"})
    );
}

#[test]
fn directive_conditions_read_variables() {
    let vars = [
        ("skipA".to_owned(), InputValue::boolean(true)),
        ("includeB".to_owned(), InputValue::boolean(false)),
    ]
    .into_iter()
    .collect();

    assert_eq!(
        run_with_vars(
            "query Q($skipA: Boolean!, $includeB: Boolean!) {
                a @skip(if: $skipA)
                b @include(if: $includeB)
            }",
            vars
        ),
        json!({})
    );
}

#[test]
fn directives_apply_to_inline_fragments() {
    assert_eq!(
        run("{ a ... @skip(if: true) { b } }"),
        json!({"a": "a"})
    );
    assert_eq!(
        run("{ a ... @include(if: true) { b } }"),
        json!({"a": "a", "b": "b"})
    );
}

#[test]
fn directives_apply_to_fragment_spreads() {
    assert_eq!(
        run("{ a ...bField @skip(if: true) } fragment bField on Query { b }"),
        json!({"a": "a"})
    );
    assert_eq!(
        run("{ a ...bField @include(if: true) } fragment bField on Query { b }"),
        json!({"a": "a", "b": "b"})
    );
}
