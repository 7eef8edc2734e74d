use pretty_assertions::assert_eq;
use serde_json::json;

use crate::meta::{Argument, EnumMeta, EnumValue, Field, InterfaceMeta, ObjectMeta, UnionMeta};
use crate::{execute, InputValue, SchemaType, Type, Value, Variables};

fn sample_schema() -> SchemaType<()> {
    SchemaType::new(
        "Query",
        Some("Mutation"),
        None,
        vec![
            EnumMeta::new("Episode")
                .description("One of the films in the trilogy")
                .value(EnumValue::new("NEW_HOPE"))
                .value(EnumValue::new("EMPIRE"))
                .value(EnumValue::new("JEDI").deprecated("We do not talk about it"))
                .into_meta(),
            InterfaceMeta::new("Character")
                .field(Field::new("id", Type::non_null("ID")))
                .field(Field::new("name", Type::named("String")))
                .into_meta(),
            ObjectMeta::new("Human")
                .description("A humanoid creature in the Star Wars universe")
                .interfaces(&["Character"])
                .field(Field::new("id", Type::non_null("ID")))
                .field(Field::new("name", Type::named("String")))
                .field(Field::new("homePlanet", Type::named("String")).deprecated("Moved"))
                .into_meta(),
            ObjectMeta::new("Droid")
                .interfaces(&["Character"])
                .field(Field::new("id", Type::non_null("ID")))
                .field(Field::new("name", Type::named("String")))
                .field(Field::new("primaryFunction", Type::named("String")))
                .into_meta(),
            UnionMeta::new("SearchResult", &["Human", "Droid"]).into_meta(),
            ObjectMeta::new("Query")
                .field(
                    Field::new("hero", Type::named("Character"))
                        .argument(
                            Argument::new("episode", Type::named("Episode"))
                                .default_value(InputValue::enum_value("NEW_HOPE")),
                        )
                        .resolve(|_, _, _| Ok(Value::Null)),
                )
                .field(Field::new(
                    "appearsIn",
                    Type::non_null_list(Type::non_null("Episode")),
                ))
                .into_meta(),
            ObjectMeta::new("Mutation")
                .field(Field::new("noop", Type::named("Boolean")))
                .into_meta(),
        ],
    )
    .expect("valid schema")
}

fn run(query: &str) -> serde_json::Value {
    let schema = sample_schema();
    let (data, errors) =
        execute(query, None, &schema, &Variables::new(), &()).expect("request should execute");

    assert!(errors.is_empty(), "unexpected errors: {errors:#?}");
    serde_json::to_value(&data).expect("serialization failed")
}

#[test]
fn schema_root_types() {
    assert_eq!(
        run(r#"
        {
          __schema {
            queryType { name kind }
            mutationType { name }
            subscriptionType { name }
          }
        }
        "#),
        json!({"__schema": {
            "queryType": {"name": "Query", "kind": "OBJECT"},
            "mutationType": {"name": "Mutation"},
            "subscriptionType": null,
        }})
    );
}

#[test]
fn schema_types_include_builtins_and_meta_types() {
    let data = run("{ __schema { types { name } } }");

    let names = data["__schema"]["types"]
        .as_array()
        .expect("types should be a list")
        .iter()
        .map(|t| t["name"].as_str().expect("names are strings").to_owned())
        .collect::<Vec<_>>();

    for expected in [
        "Int", "Float", "String", "Boolean", "ID", "Episode", "Character", "Human", "Droid",
        "SearchResult", "Query", "Mutation", "__Schema", "__Type", "__Field", "__InputValue",
        "__EnumValue", "__Directive", "__TypeKind", "__DirectiveLocation",
    ] {
        assert!(names.iter().any(|n| n == expected), "missing type {expected}");
    }
}

#[test]
fn type_by_name() {
    assert_eq!(
        run(r#"{ __type(name: "Human") { name kind description } }"#),
        json!({"__type": {
            "name": "Human",
            "kind": "OBJECT",
            "description": "A humanoid creature in the Star Wars universe",
        }})
    );
}

#[test]
fn unknown_type_resolves_to_null() {
    assert_eq!(
        run(r#"{ __type(name: "Starship") { name } }"#),
        json!({"__type": null})
    );
}

#[test]
fn typename_of_the_query_root() {
    assert_eq!(run("{ __typename }"), json!({"__typename": "Query"}));
}

#[test]
fn object_fields_and_wrapped_types() {
    assert_eq!(
        run(r#"
        {
          __type(name: "Query") {
            fields {
              name
              type { kind name ofType { kind name ofType { kind name ofType { kind name } } } }
            }
          }
        }
        "#),
        json!({"__type": {"fields": [
            {
                "name": "hero",
                "type": {"kind": "INTERFACE", "name": "Character", "ofType": null},
            },
            {
                "name": "appearsIn",
                "type": {
                    "kind": "NON_NULL",
                    "name": null,
                    "ofType": {
                        "kind": "LIST",
                        "name": null,
                        "ofType": {
                            "kind": "NON_NULL",
                            "name": null,
                            "ofType": {"kind": "ENUM", "name": "Episode"},
                        },
                    },
                },
            },
        ]}})
    );
}

#[test]
fn meta_fields_are_not_listed() {
    let data = run(r#"{ __type(name: "Query") { fields { name } } }"#);

    let names = data["__type"]["fields"]
        .as_array()
        .expect("fields should be a list")
        .iter()
        .map(|f| f["name"].as_str().expect("names are strings"))
        .collect::<Vec<_>>();

    assert!(!names.contains(&"__schema"));
    assert!(!names.contains(&"__type"));
    assert!(!names.contains(&"__typename"));
}

#[test]
fn deprecated_fields_are_hidden_by_default() {
    assert_eq!(
        run(r#"{ __type(name: "Human") { fields { name } } }"#),
        json!({"__type": {"fields": [
            {"name": "id"},
            {"name": "name"},
        ]}})
    );

    assert_eq!(
        run(r#"
        {
          __type(name: "Human") {
            fields(includeDeprecated: true) { name isDeprecated deprecationReason }
          }
        }
        "#),
        json!({"__type": {"fields": [
            {"name": "id", "isDeprecated": false, "deprecationReason": null},
            {"name": "name", "isDeprecated": false, "deprecationReason": null},
            {"name": "homePlanet", "isDeprecated": true, "deprecationReason": "Moved"},
        ]}})
    );
}

#[test]
fn enum_values_and_deprecation() {
    assert_eq!(
        run(r#"{ __type(name: "Episode") { enumValues { name } } }"#),
        json!({"__type": {"enumValues": [
            {"name": "NEW_HOPE"},
            {"name": "EMPIRE"},
        ]}})
    );

    assert_eq!(
        run(r#"{ __type(name: "Episode") { enumValues(includeDeprecated: true) { name } } }"#),
        json!({"__type": {"enumValues": [
            {"name": "NEW_HOPE"},
            {"name": "EMPIRE"},
            {"name": "JEDI"},
        ]}})
    );
}

#[test]
fn interfaces_and_possible_types() {
    assert_eq!(
        run(r#"{ __type(name: "Human") { interfaces { name kind } } }"#),
        json!({"__type": {"interfaces": [{"name": "Character", "kind": "INTERFACE"}]}})
    );

    assert_eq!(
        run(r#"{ __type(name: "Character") { possibleTypes { name } } }"#),
        json!({"__type": {"possibleTypes": [{"name": "Human"}, {"name": "Droid"}]}})
    );

    assert_eq!(
        run(r#"{ __type(name: "SearchResult") { kind possibleTypes { name } } }"#),
        json!({"__type": {
            "kind": "UNION",
            "possibleTypes": [{"name": "Human"}, {"name": "Droid"}],
        }})
    );
}

#[test]
fn field_arguments_and_default_values() {
    assert_eq!(
        run(r#"
        {
          __type(name: "Query") {
            fields {
              name
              args { name defaultValue type { kind name } }
            }
          }
        }
        "#),
        json!({"__type": {"fields": [
            {
                "name": "hero",
                "args": [{
                    "name": "episode",
                    "defaultValue": "NEW_HOPE",
                    "type": {"kind": "ENUM", "name": "Episode"},
                }],
            },
            {"name": "appearsIn", "args": []},
        ]}})
    );
}

#[test]
fn directives_are_exposed() {
    let data = run("{ __schema { directives { name locations args { name type { kind ofType { name } } } } } }");

    let directives = data["__schema"]["directives"]
        .as_array()
        .expect("directives should be a list");

    assert_eq!(directives.len(), 2);

    for directive in directives {
        assert_eq!(
            directive["locations"],
            json!(["FIELD", "FRAGMENT_SPREAD", "INLINE_FRAGMENT"])
        );
        assert_eq!(
            directive["args"],
            json!([{
                "name": "if",
                "type": {"kind": "NON_NULL", "ofType": {"name": "Boolean"}},
            }])
        );
    }

    let names = directives
        .iter()
        .map(|d| d["name"].as_str().expect("names are strings"))
        .collect::<Vec<_>>();
    assert_eq!(names, vec!["skip", "include"]);
}

#[test]
fn introspecting_the_introspection_types() {
    assert_eq!(
        run(r#"{ __type(name: "__Schema") { kind fields { name } } }"#),
        json!({"__type": {
            "kind": "OBJECT",
            "fields": [
                {"name": "types"},
                {"name": "queryType"},
                {"name": "mutationType"},
                {"name": "subscriptionType"},
                {"name": "directives"},
            ],
        }})
    );
}
