use serde_json::json;

use crate::meta::{Field, InterfaceMeta, ObjectMeta, UnionMeta};
use crate::{execute, ExecutionError, GraphQLError, SchemaType, Type, Value, Variables};

fn run(schema: &SchemaType<()>, query: &str) -> (Value, Vec<ExecutionError>) {
    execute(query, None, schema, &Variables::new(), &())
        .unwrap_or_else(|e| panic!("Request failed before execution: {e:#?}"))
}

fn run_json(schema: &SchemaType<()>, query: &str) -> serde_json::Value {
    let (data, errors) = run(schema, query);
    assert!(errors.is_empty(), "unexpected errors: {errors:#?}");
    serde_json::to_value(&data).expect("serialization failed")
}

fn obj(fields: Vec<(&str, Value)>) -> Value {
    Value::Object(fields.into_iter().collect())
}

fn hello_schema() -> SchemaType<()> {
    SchemaType::new(
        "Query",
        None,
        None,
        vec![ObjectMeta::new("Query")
            .field(
                Field::new("hello", Type::named("String"))
                    .resolve(|_, _, _| Ok(Value::string("World"))),
            )
            .into_meta()],
    )
    .expect("valid schema")
}

fn user_schema() -> SchemaType<()> {
    SchemaType::new(
        "Query",
        None,
        None,
        vec![
            ObjectMeta::new("User")
                .field(Field::new("id", Type::non_null("ID")))
                .field(Field::new("name", Type::named("String")))
                .into_meta(),
            ObjectMeta::new("Query")
                .field(Field::new("user", Type::named("User")).resolve(|_, _, _| {
                    Ok(obj(vec![
                        ("id", Value::string("1")),
                        ("name", Value::string("T")),
                    ]))
                }))
                .field(
                    Field::new("userWithNullName", Type::named("User")).resolve(|_, _, _| {
                        Ok(obj(vec![
                            ("id", Value::string("1")),
                            ("name", Value::Null),
                        ]))
                    }),
                )
                .into_meta(),
        ],
    )
    .expect("valid schema")
}

#[test]
fn scalar_field_resolution() {
    let schema = hello_schema();

    assert_eq!(
        run_json(&schema, "{ hello }"),
        json!({"hello": "World"})
    );
}

#[test]
fn unknown_field_is_a_validation_error() {
    let schema = hello_schema();
    let error = execute("{ goodbye }", None, &schema, &Variables::new(), &())
        .expect_err("expected a validation error");

    match error {
        GraphQLError::ValidationError(errors) => {
            assert_eq!(errors.len(), 1);
            assert_eq!(
                errors[0].message(),
                "Field 'goodbye' does not exist on type 'Query'"
            );
        }
        other => panic!("Expected a validation error, got {other:#?}"),
    }
}

#[test]
fn object_field_with_typename_and_alias() {
    let schema = user_schema();

    assert_eq!(
        run_json(&schema, "{ user { __typename id } }"),
        json!({"user": {"__typename": "User", "id": "1"}})
    );

    assert_eq!(
        run_json(&schema, "{ account: user { key: id } }"),
        json!({"account": {"key": "1"}})
    );
}

#[test]
fn nullable_field_resolving_to_null() {
    let schema = user_schema();

    assert_eq!(
        run_json(&schema, "{ userWithNullName { name } }"),
        json!({"userWithNullName": {"name": null}})
    );
}

#[test]
fn mutation_operations() {
    let schema = SchemaType::new(
        "Query",
        Some("Mutation"),
        None,
        vec![
            ObjectMeta::new("User")
                .field(Field::new("id", Type::non_null("ID")))
                .into_meta(),
            ObjectMeta::new("Query")
                .field(Field::new("noop", Type::named("Boolean")))
                .into_meta(),
            ObjectMeta::new("Mutation")
                .field(
                    Field::new("createUser", Type::named("User"))
                        .argument(crate::meta::Argument::new("name", Type::named("String")))
                        .argument(crate::meta::Argument::new("email", Type::named("String")))
                        .resolve(|_, args, _| {
                            assert_eq!(args.get::<String>("name").as_deref(), Some("C"));
                            assert_eq!(args.get::<String>("email").as_deref(), Some("c@x"));
                            Ok(obj(vec![("id", Value::string("999"))]))
                        }),
                )
                .into_meta(),
        ],
    )
    .expect("valid schema");

    assert_eq!(
        run_json(
            &schema,
            r#"mutation { createUser(name: "C", email: "c@x") { id } }"#
        ),
        json!({"createUser": {"id": "999"}})
    );
}

#[test]
fn subscriptions_execute_like_queries() {
    let schema = SchemaType::new(
        "Query",
        None,
        Some("Subscription"),
        vec![
            ObjectMeta::new("Query")
                .field(Field::new("noop", Type::named("Boolean")))
                .into_meta(),
            ObjectMeta::new("Subscription")
                .field(
                    Field::new("watched", Type::named("String"))
                        .resolve(|_, _, _| Ok(Value::string("tick"))),
                )
                .into_meta(),
        ],
    )
    .expect("valid schema");

    assert_eq!(
        run_json(&schema, "subscription { watched }"),
        json!({"watched": "tick"})
    );
}

#[test]
fn response_keys_preserve_first_appearance_order() {
    let schema = SchemaType::new(
        "Query",
        None,
        None,
        vec![ObjectMeta::new("Query")
            .field(Field::new("a", Type::named("Int")).resolve(|_, _, _| Ok(Value::Int(1))))
            .field(Field::new("b", Type::named("Int")).resolve(|_, _, _| Ok(Value::Int(2))))
            .field(Field::new("c", Type::named("Int")).resolve(|_, _, _| Ok(Value::Int(3))))
            .into_meta()],
    )
    .expect("valid schema");

    let (data, errors) = run(&schema, "{ c a b }");
    assert!(errors.is_empty());

    let keys = data
        .as_object_value()
        .expect("object result")
        .iter()
        .map(|(k, _)| k.as_str())
        .collect::<Vec<_>>();
    assert_eq!(keys, vec!["c", "a", "b"]);

    let (data, errors) = run(
        &schema,
        "{ x: b ...rest y: a } fragment rest on Query { y: a c }",
    );
    assert!(errors.is_empty());

    let keys = data
        .as_object_value()
        .expect("object result")
        .iter()
        .map(|(k, _)| k.as_str())
        .collect::<Vec<_>>();
    assert_eq!(keys, vec!["x", "y", "c"]);
}

#[test]
fn resolver_errors_become_execution_errors() {
    let schema = SchemaType::new(
        "Query",
        None,
        None,
        vec![ObjectMeta::new("Query")
            .field(
                Field::new("broken", Type::named("String"))
                    .resolve(|_, _, _| Err("the database is on fire".into())),
            )
            .field(Field::new("fine", Type::named("Int")).resolve(|_, _, _| Ok(Value::Int(7))))
            .into_meta()],
    )
    .expect("valid schema");

    let (data, errors) = run(&schema, "{ broken fine }");

    assert_eq!(
        serde_json::to_value(&data).unwrap(),
        json!({"broken": null, "fine": 7})
    );
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].message(), "the database is on fire");
    assert_eq!(errors[0].path().to_vec(), vec!["broken".to_owned()]);
}

#[test]
fn non_null_field_returning_null_nullifies_data() {
    let schema = SchemaType::new(
        "Query",
        None,
        None,
        vec![ObjectMeta::new("Query")
            .field(
                Field::new("required", Type::non_null("String"))
                    .resolve(|_, _, _| Ok(Value::Null)),
            )
            .into_meta()],
    )
    .expect("valid schema");

    let (data, errors) = run(&schema, "{ required }");

    assert_eq!(data, Value::Null);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].message(), "Cannot return null for non-null field");
}

#[test]
fn null_propagates_to_the_nearest_nullable_ancestor() {
    let schema = SchemaType::new(
        "Query",
        None,
        None,
        vec![
            ObjectMeta::new("Inner")
                .field(Field::new("value", Type::non_null("String")))
                .into_meta(),
            ObjectMeta::new("Query")
                .field(
                    Field::new("inner", Type::named("Inner"))
                        .resolve(|_, _, _| Ok(obj(vec![("value", Value::Null)]))),
                )
                .field(
                    Field::new("sibling", Type::named("Int"))
                        .resolve(|_, _, _| Ok(Value::Int(1))),
                )
                .into_meta(),
        ],
    )
    .expect("valid schema");

    let (data, errors) = run(&schema, "{ inner { value } sibling }");

    assert_eq!(
        serde_json::to_value(&data).unwrap(),
        json!({"inner": null, "sibling": 1})
    );
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].message(), "Cannot return null for non-null field");
    assert_eq!(
        errors[0].path().to_vec(),
        vec!["inner".to_owned(), "value".to_owned()]
    );
}

#[test]
fn null_in_non_null_list_item_collapses_the_list() {
    let schema = SchemaType::new(
        "Query",
        None,
        None,
        vec![ObjectMeta::new("Query")
            .field(
                Field::new("requiredItems", Type::list(Type::non_null("String"))).resolve(
                    |_, _, _| {
                        Ok(Value::List(vec![
                            Value::string("a"),
                            Value::Null,
                            Value::string("c"),
                        ]))
                    },
                ),
            )
            .field(
                Field::new("optionalItems", Type::list(Type::named("String"))).resolve(
                    |_, _, _| {
                        Ok(Value::List(vec![
                            Value::string("a"),
                            Value::Null,
                            Value::string("c"),
                        ]))
                    },
                ),
            )
            .into_meta()],
    )
    .expect("valid schema");

    let (data, errors) = run(&schema, "{ requiredItems optionalItems }");

    assert_eq!(
        serde_json::to_value(&data).unwrap(),
        json!({"requiredItems": null, "optionalItems": ["a", null, "c"]})
    );
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].message(), "Cannot return null for non-null field");
}

#[test]
fn non_list_value_in_list_position_is_an_error() {
    let schema = SchemaType::new(
        "Query",
        None,
        None,
        vec![ObjectMeta::new("Query")
            .field(
                Field::new("items", Type::list(Type::named("String")))
                    .resolve(|_, _, _| Ok(Value::string("not-a-list"))),
            )
            .into_meta()],
    )
    .expect("valid schema");

    let (data, errors) = run(&schema, "{ items }");

    assert_eq!(serde_json::to_value(&data).unwrap(), json!({"items": null}));
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].message(), "Expected list but got string");
}

#[test]
fn interface_values_resolve_through_the_typename_tag() {
    let schema = pet_schema();

    assert_eq!(
        run_json(
            &schema,
            r#"
            {
              pets {
                __typename
                name
                ... on Dog { barkVolume }
                ... on Cat { meowVolume }
              }
            }
            "#
        ),
        json!({"pets": [
            {"__typename": "Dog", "name": "Rex", "barkVolume": 7},
            {"__typename": "Cat", "name": "Whiskers", "meowVolume": 3},
        ]})
    );
}

#[test]
fn union_values_resolve_through_the_resolve_type_callback() {
    let schema = pet_schema();

    assert_eq!(
        run_json(
            &schema,
            r#"
            {
              favorite {
                ... on Dog { name barkVolume }
                ... on Cat { name meowVolume }
              }
            }
            "#
        ),
        json!({"favorite": {"name": "Rex", "barkVolume": 7}})
    );
}

#[test]
fn fragment_spreads_narrow_on_type_conditions() {
    let schema = pet_schema();

    assert_eq!(
        run_json(
            &schema,
            r#"
            {
              pets {
                name
                ...dogDetails
                ...catDetails
              }
            }
            fragment dogDetails on Dog { barkVolume }
            fragment catDetails on Cat { meowVolume }
            "#
        ),
        json!({"pets": [
            {"name": "Rex", "barkVolume": 7},
            {"name": "Whiskers", "meowVolume": 3},
        ]})
    );
}

#[test]
fn operation_selection() {
    let schema = hello_schema();

    let (data, errors) = execute(
        "query A { hello } query B { hello }",
        Some("B"),
        &schema,
        &Variables::new(),
        &(),
    )
    .unwrap();
    assert!(errors.is_empty());
    assert_eq!(
        serde_json::to_value(&data).unwrap(),
        json!({"hello": "World"})
    );

    let (data, errors) = execute(
        "query A { hello } query B { hello }",
        None,
        &schema,
        &Variables::new(),
        &(),
    )
    .unwrap();
    assert_eq!(data, Value::Null);
    assert_eq!(
        errors[0].message(),
        "Must provide operation name if query contains multiple operations"
    );

    let (data, errors) = execute(
        "query A { hello }",
        Some("Missing"),
        &schema,
        &Variables::new(),
        &(),
    )
    .unwrap();
    assert_eq!(data, Value::Null);
    assert_eq!(errors[0].message(), "No operation found");
}

#[test]
fn int_and_float_serialization() {
    let schema = SchemaType::new(
        "Query",
        None,
        None,
        vec![ObjectMeta::new("Query")
            .field(Field::new("int", Type::named("Int")).resolve(|_, _, _| Ok(Value::Int(42))))
            .field(
                Field::new("intFromFloat", Type::named("Int"))
                    .resolve(|_, _, _| Ok(Value::Float(42.0))),
            )
            .field(
                Field::new("float", Type::named("Float")).resolve(|_, _, _| Ok(Value::Int(3))),
            )
            .field(
                Field::new("idFromInt", Type::named("ID")).resolve(|_, _, _| Ok(Value::Int(7))),
            )
            .into_meta()],
    )
    .expect("valid schema");

    assert_eq!(
        run_json(&schema, "{ int intFromFloat float idFromInt }"),
        json!({"int": 42, "intFromFloat": 42, "float": 3.0, "idFromInt": "7"})
    );
}

#[test]
fn serialization_failures_are_execution_errors() {
    let schema = SchemaType::new(
        "Query",
        None,
        None,
        vec![ObjectMeta::new("Query")
            .field(
                Field::new("int", Type::named("Int"))
                    .resolve(|_, _, _| Ok(Value::string("not a number"))),
            )
            .into_meta()],
    )
    .expect("valid schema");

    let (data, errors) = run(&schema, "{ int }");

    assert_eq!(serde_json::to_value(&data).unwrap(), json!({"int": null}));
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].message(), "Int cannot represent string value");
}

fn pet_schema() -> SchemaType<()> {
    SchemaType::new(
        "Query",
        None,
        None,
        vec![
            InterfaceMeta::new("Pet")
                .field(Field::new("name", Type::non_null("String")))
                .into_meta(),
            ObjectMeta::new("Dog")
                .interfaces(&["Pet"])
                .field(Field::new("name", Type::non_null("String")))
                .field(Field::new("barkVolume", Type::named("Int")))
                .into_meta(),
            ObjectMeta::new("Cat")
                .interfaces(&["Pet"])
                .field(Field::new("name", Type::non_null("String")))
                .field(Field::new("meowVolume", Type::named("Int")))
                .into_meta(),
            UnionMeta::new("CatOrDog", &["Cat", "Dog"])
                .resolve_type(|value| {
                    value
                        .as_object_value()
                        .and_then(|o| o.get_field_value("barkVolume"))
                        .map(|_| "Dog".to_owned())
                        .or(Some("Cat".to_owned()))
                })
                .into_meta(),
            ObjectMeta::new("Query")
                .field(
                    Field::new("pets", Type::list(Type::non_null("Pet"))).resolve(|_, _, _| {
                        Ok(Value::List(vec![
                            obj(vec![
                                ("__typename", Value::string("Dog")),
                                ("name", Value::string("Rex")),
                                ("barkVolume", Value::Int(7)),
                            ]),
                            obj(vec![
                                ("__typename", Value::string("Cat")),
                                ("name", Value::string("Whiskers")),
                                ("meowVolume", Value::Int(3)),
                            ]),
                        ]))
                    }),
                )
                .field(
                    Field::new("favorite", Type::named("CatOrDog")).resolve(|_, _, _| {
                        Ok(obj(vec![
                            ("name", Value::string("Rex")),
                            ("barkVolume", Value::Int(7)),
                        ]))
                    }),
                )
                .into_meta(),
        ],
    )
    .expect("valid schema")
}
