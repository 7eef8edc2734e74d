use serde_json::json;

use crate::meta::{Argument, Field, InputObjectMeta, ObjectMeta};
use crate::{
    coerce_input_value, execute, ExecutionError, InputValue, SchemaType, Type, Value, Variables,
};

fn echo_schema() -> SchemaType<()> {
    SchemaType::new(
        "Query",
        None,
        None,
        vec![
            InputObjectMeta::new("Point")
                .field(Argument::new("x", Type::non_null("Int")))
                .field(Argument::new("y", Type::non_null("Int")))
                .field(Argument::new("label", Type::named("String")).default_value(InputValue::string("origin")))
                .into_meta(),
            ObjectMeta::new("Query")
                .field(
                    Field::new("greet", Type::named("String"))
                        .argument(Argument::new("name", Type::named("String")))
                        .resolve(|_, args, _| {
                            Ok(match args.get::<String>("name") {
                                Some(name) => Value::String(format!("Hello, {name}!")),
                                None => Value::string("Hello, nobody!"),
                            })
                        }),
                )
                .field(
                    Field::new("greetWithDefault", Type::named("String"))
                        .argument(
                            Argument::new("name", Type::named("String"))
                                .default_value(InputValue::string("stranger")),
                        )
                        .resolve(|_, args, _| {
                            Ok(match args.get::<String>("name") {
                                Some(name) => Value::String(format!("Hello, {name}!")),
                                None => Value::Null,
                            })
                        }),
                )
                .field(
                    Field::new("echoInt", Type::named("Int"))
                        .argument(Argument::new("value", Type::named("Int")))
                        .resolve(|_, args, _| {
                            Ok(args
                                .get::<i64>("value")
                                .map_or(Value::Null, Value::Int))
                        }),
                )
                .field(
                    Field::new("echoFloat", Type::named("Float"))
                        .argument(Argument::new("value", Type::named("Float")))
                        .resolve(|_, args, _| {
                            Ok(args
                                .get::<f64>("value")
                                .map_or(Value::Null, Value::Float))
                        }),
                )
                .field(
                    Field::new("echoList", Type::list(Type::named("String")))
                        .argument(Argument::new("values", Type::list(Type::named("String"))))
                        .resolve(|_, args, _| {
                            Ok(args
                                .get::<Vec<String>>("values")
                                .map_or(Value::Null, |values| {
                                    Value::List(values.into_iter().map(Value::String).collect())
                                }))
                        }),
                )
                .field(
                    Field::new("describePoint", Type::named("String"))
                        .argument(Argument::new("point", Type::named("Point")))
                        .resolve(|_, args, _| {
                            let point = args.get_input("point").cloned().unwrap_or(InputValue::Null);
                            Ok(Value::String(point.to_string()))
                        }),
                )
                .into_meta(),
        ],
    )
    .expect("valid schema")
}

fn run_with_vars(
    schema: &SchemaType<()>,
    query: &str,
    vars: serde_json::Value,
) -> (Value, Vec<ExecutionError>) {
    let variables: Variables = serde_json::from_value::<std::collections::HashMap<String, InputValue>>(vars)
        .expect("variables should deserialize");

    execute(query, None, schema, &variables, &())
        .unwrap_or_else(|e| panic!("Request failed before execution: {e:#?}"))
}

fn run_json(schema: &SchemaType<()>, query: &str, vars: serde_json::Value) -> serde_json::Value {
    let (data, errors) = run_with_vars(schema, query, vars);
    assert!(errors.is_empty(), "unexpected errors: {errors:#?}");
    serde_json::to_value(&data).expect("serialization failed")
}

#[test]
fn string_variable_is_passed_through() {
    let schema = echo_schema();

    assert_eq!(
        run_json(
            &schema,
            "query G($n: String) { greet(name: $n) }",
            json!({"n": "Bob"})
        ),
        json!({"greet": "Hello, Bob!"})
    );
}

#[test]
fn missing_nullable_variable_is_unset() {
    let schema = echo_schema();

    assert_eq!(
        run_json(&schema, "query G($n: String) { greet(name: $n) }", json!({})),
        json!({"greet": "Hello, nobody!"})
    );
}

#[test]
fn default_variable_value_applies_when_absent() {
    let schema = echo_schema();

    assert_eq!(
        run_json(
            &schema,
            r#"query G($n: String = "default") { greet(name: $n) }"#,
            json!({})
        ),
        json!({"greet": "Hello, default!"})
    );

    assert_eq!(
        run_json(
            &schema,
            r#"query G($n: String = "default") { greet(name: $n) }"#,
            json!({"n": "provided"})
        ),
        json!({"greet": "Hello, provided!"})
    );
}

#[test]
fn missing_required_variable_is_an_error() {
    let schema = echo_schema();
    let (data, errors) = run_with_vars(
        &schema,
        "query G($n: String!) { greet(name: $n) }",
        json!({}),
    );

    assert_eq!(data, Value::Null);
    assert_eq!(errors.len(), 1);
    assert_eq!(
        errors[0].message(),
        "Variable $n is required but not provided"
    );
}

#[test]
fn mistyped_variable_is_an_error() {
    let schema = echo_schema();
    let (data, errors) = run_with_vars(
        &schema,
        "query G($v: Int) { echoInt(value: $v) }",
        json!({"v": "not an int"}),
    );

    assert_eq!(data, Value::Null);
    assert_eq!(errors.len(), 1);
    assert!(
        errors[0]
            .message()
            .starts_with("Invalid value for variable $v"),
        "unexpected message: {}",
        errors[0].message()
    );
}

#[test]
fn int_variables_widen_to_float() {
    let schema = echo_schema();

    assert_eq!(
        run_json(
            &schema,
            "query G($v: Float) { echoFloat(value: $v) }",
            json!({"v": 3})
        ),
        json!({"echoFloat": 3.0})
    );
}

#[test]
fn single_values_lift_to_lists() {
    let schema = echo_schema();

    assert_eq!(
        run_json(
            &schema,
            "query G($vs: [String]) { echoList(values: $vs) }",
            json!({"vs": "alone"})
        ),
        json!({"echoList": ["alone"]})
    );

    assert_eq!(
        run_json(
            &schema,
            "query G($vs: [String]) { echoList(values: $vs) }",
            json!({"vs": ["a", "b"]})
        ),
        json!({"echoList": ["a", "b"]})
    );
}

#[test]
fn input_object_coercion() {
    let schema = echo_schema();

    // Unknown keys are dropped, declared fields keep declaration order, and
    // the declared default fills the missing field.
    assert_eq!(
        run_json(
            &schema,
            "query G($p: Point) { describePoint(point: $p) }",
            json!({"p": {"y": 2, "x": 1, "extra": true}})
        ),
        json!({"describePoint": "{x: 1, y: 2, label: \"origin\"}"})
    );
}

#[test]
fn input_object_missing_required_field_is_an_error() {
    let schema = echo_schema();
    let (data, errors) = run_with_vars(
        &schema,
        "query G($p: Point) { describePoint(point: $p) }",
        json!({"p": {"x": 1}}),
    );

    assert_eq!(data, Value::Null);
    assert_eq!(errors.len(), 1);
    assert!(
        errors[0]
            .message()
            .starts_with("Invalid value for variable $p"),
        "unexpected message: {}",
        errors[0].message()
    );
}

#[test]
fn literal_argument_defaults_apply() {
    let schema = echo_schema();
    let (data, errors) = execute(
        "{ greetWithDefault }",
        None,
        &schema,
        &Variables::new(),
        &(),
    )
    .unwrap();

    assert!(errors.is_empty());
    assert_eq!(
        serde_json::to_value(&data).unwrap(),
        json!({"greetWithDefault": "Hello, stranger!"})
    );
}

#[test]
fn scalar_coercion_is_idempotent() {
    let schema = echo_schema();

    for (type_name, value) in [
        ("Int", InputValue::int(42)),
        ("Float", InputValue::int(3)),
        ("String", InputValue::string("x")),
        ("Boolean", InputValue::boolean(true)),
        ("ID", InputValue::int(7)),
    ] {
        let ty = Type::named(type_name);
        let once = coerce_input_value(&schema, &ty, &value).expect("first coercion");
        let twice = coerce_input_value(&schema, &ty, &once).expect("second coercion");
        assert!(
            once.unlocated_eq(&twice),
            "coercion through {type_name} is not idempotent: {once:#?} vs {twice:#?}"
        );
    }
}
