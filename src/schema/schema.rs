//! The introspection overlay
//!
//! Applied at the end of schema construction: registers the `__Schema`,
//! `__Type`, `__Field`, `__InputValue`, `__EnumValue`, `__Directive`,
//! `__TypeKind`, and `__DirectiveLocation` types, and attaches the
//! `__schema` and `__type` fields to the query root. Introspection data is
//! materialized once into plain response values; named type references
//! inside the materialized data are stored as name markers and expanded one
//! level at a time by the meta-field resolvers, so the cyclic type graph is
//! only unfolded as deep as the query asks for.

use std::sync::Arc;

use indexmap::IndexMap;

use crate::ast::{InputValue, Type};
use crate::schema::meta::{
    Argument, EnumMeta, EnumValue, Field, InterfaceMeta, MetaType, ObjectMeta, ResolveFn,
    UnionMeta,
};
use crate::schema::model::{insert_unique, DirectiveType, SchemaError, SchemaType};
use crate::value::{Object, Value};

type TypeObjectMap = IndexMap<String, Value>;

pub(crate) fn attach_introspection<CtxT>(schema: &mut SchemaType<CtxT>) -> Result<(), SchemaError> {
    register_meta_types(schema)?;
    push_root_meta_fields(schema);

    let type_objects = Arc::new(build_type_objects(schema));
    let schema_object = build_schema_object(schema, &type_objects);

    set_resolver(
        schema,
        "__Type",
        "fields",
        Box::new(move |parent, args, _| {
            Ok(filtered_deprecation_list(
                field_value(parent, "fields"),
                args.get("includeDeprecated").unwrap_or(false),
            ))
        }),
    );

    set_resolver(
        schema,
        "__Type",
        "enumValues",
        Box::new(move |parent, args, _| {
            Ok(filtered_deprecation_list(
                field_value(parent, "enumValues"),
                args.get("includeDeprecated").unwrap_or(false),
            ))
        }),
    );

    let map = Arc::clone(&type_objects);
    set_resolver(
        schema,
        "__Type",
        "interfaces",
        Box::new(move |parent, _, _| Ok(expand_marker_list(&map, field_value(parent, "interfaces")))),
    );

    let map = Arc::clone(&type_objects);
    set_resolver(
        schema,
        "__Type",
        "possibleTypes",
        Box::new(move |parent, _, _| {
            Ok(expand_marker_list(&map, field_value(parent, "possibleTypes")))
        }),
    );

    let map = Arc::clone(&type_objects);
    set_resolver(
        schema,
        "__Type",
        "ofType",
        Box::new(move |parent, _, _| Ok(expand_marker(&map, field_value(parent, "ofType")))),
    );

    let map = Arc::clone(&type_objects);
    set_resolver(
        schema,
        "__Field",
        "type",
        Box::new(move |parent, _, _| Ok(expand_marker(&map, field_value(parent, "type")))),
    );

    let map = Arc::clone(&type_objects);
    set_resolver(
        schema,
        "__InputValue",
        "type",
        Box::new(move |parent, _, _| Ok(expand_marker(&map, field_value(parent, "type")))),
    );

    let query_type_name = schema.query_type_name().to_owned();

    set_resolver(
        schema,
        &query_type_name,
        "__schema",
        Box::new(move |_, _, _| Ok(schema_object.clone())),
    );

    let map = Arc::clone(&type_objects);
    set_resolver(
        schema,
        &query_type_name,
        "__type",
        Box::new(move |_, args, _| {
            Ok(args
                .get::<String>("name")
                .and_then(|name| map.get(&name).cloned())
                .unwrap_or(Value::Null))
        }),
    );

    Ok(())
}

fn register_meta_types<CtxT>(schema: &mut SchemaType<CtxT>) -> Result<(), SchemaError> {
    let include_deprecated_arg = || {
        Argument::new("includeDeprecated", Type::named("Boolean"))
            .default_value(InputValue::boolean(false))
    };

    let meta_types: Vec<MetaType<CtxT>> = vec![
        ObjectMeta::new("__Schema")
            .field(Field::new(
                "types",
                Type::non_null_list(Type::non_null("__Type")),
            ))
            .field(Field::new("queryType", Type::non_null("__Type")))
            .field(Field::new("mutationType", Type::named("__Type")))
            .field(Field::new("subscriptionType", Type::named("__Type")))
            .field(Field::new(
                "directives",
                Type::non_null_list(Type::non_null("__Directive")),
            ))
            .into_meta(),
        ObjectMeta::new("__Type")
            .field(Field::new("kind", Type::non_null("__TypeKind")))
            .field(Field::new("name", Type::named("String")))
            .field(Field::new("description", Type::named("String")))
            .field(
                Field::new("fields", Type::list(Type::non_null("__Field")))
                    .argument(include_deprecated_arg()),
            )
            .field(Field::new(
                "interfaces",
                Type::list(Type::non_null("__Type")),
            ))
            .field(Field::new(
                "possibleTypes",
                Type::list(Type::non_null("__Type")),
            ))
            .field(
                Field::new("enumValues", Type::list(Type::non_null("__EnumValue")))
                    .argument(include_deprecated_arg()),
            )
            .field(Field::new(
                "inputFields",
                Type::list(Type::non_null("__InputValue")),
            ))
            .field(Field::new("ofType", Type::named("__Type")))
            .into_meta(),
        ObjectMeta::new("__Field")
            .field(Field::new("name", Type::non_null("String")))
            .field(Field::new("description", Type::named("String")))
            .field(Field::new(
                "args",
                Type::non_null_list(Type::non_null("__InputValue")),
            ))
            .field(Field::new("type", Type::non_null("__Type")))
            .field(Field::new("isDeprecated", Type::non_null("Boolean")))
            .field(Field::new("deprecationReason", Type::named("String")))
            .into_meta(),
        ObjectMeta::new("__InputValue")
            .field(Field::new("name", Type::non_null("String")))
            .field(Field::new("description", Type::named("String")))
            .field(Field::new("type", Type::non_null("__Type")))
            .field(Field::new("defaultValue", Type::named("String")))
            .into_meta(),
        ObjectMeta::new("__EnumValue")
            .field(Field::new("name", Type::non_null("String")))
            .field(Field::new("description", Type::named("String")))
            .field(Field::new("isDeprecated", Type::non_null("Boolean")))
            .field(Field::new("deprecationReason", Type::named("String")))
            .into_meta(),
        ObjectMeta::new("__Directive")
            .field(Field::new("name", Type::non_null("String")))
            .field(Field::new("description", Type::named("String")))
            .field(Field::new(
                "locations",
                Type::non_null_list(Type::non_null("__DirectiveLocation")),
            ))
            .field(Field::new(
                "args",
                Type::non_null_list(Type::non_null("__InputValue")),
            ))
            .into_meta(),
        EnumMeta::new("__TypeKind")
            .value(EnumValue::new("SCALAR"))
            .value(EnumValue::new("OBJECT"))
            .value(EnumValue::new("INTERFACE"))
            .value(EnumValue::new("UNION"))
            .value(EnumValue::new("ENUM"))
            .value(EnumValue::new("INPUT_OBJECT"))
            .value(EnumValue::new("LIST"))
            .value(EnumValue::new("NON_NULL"))
            .into_meta(),
        EnumMeta::new("__DirectiveLocation")
            .value(EnumValue::new("QUERY"))
            .value(EnumValue::new("MUTATION"))
            .value(EnumValue::new("SUBSCRIPTION"))
            .value(EnumValue::new("FIELD"))
            .value(EnumValue::new("FRAGMENT_DEFINITION"))
            .value(EnumValue::new("FRAGMENT_SPREAD"))
            .value(EnumValue::new("INLINE_FRAGMENT"))
            .value(EnumValue::new("SCHEMA"))
            .value(EnumValue::new("SCALAR"))
            .value(EnumValue::new("OBJECT"))
            .value(EnumValue::new("FIELD_DEFINITION"))
            .value(EnumValue::new("ARGUMENT_DEFINITION"))
            .value(EnumValue::new("INTERFACE"))
            .value(EnumValue::new("UNION"))
            .value(EnumValue::new("ENUM"))
            .value(EnumValue::new("ENUM_VALUE"))
            .value(EnumValue::new("INPUT_OBJECT"))
            .value(EnumValue::new("INPUT_FIELD_DEFINITION"))
            .into_meta(),
    ];

    for meta_type in meta_types {
        insert_unique(&mut schema.types, meta_type)?;
    }

    Ok(())
}

fn push_root_meta_fields<CtxT>(schema: &mut SchemaType<CtxT>) {
    let query_type_name = schema.query_type_name().to_owned();

    if let Some(MetaType::Object(ObjectMeta { ref mut fields, .. })) =
        schema.types.get_mut(&query_type_name)
    {
        fields.push(Field::new("__schema", Type::non_null("__Schema")));
        fields.push(
            Field::new("__type", Type::named("__Type"))
                .argument(Argument::new("name", Type::non_null("String"))),
        );
    }
}

fn set_resolver<CtxT>(
    schema: &mut SchemaType<CtxT>,
    type_name: &str,
    field_name: &str,
    resolve: ResolveFn<CtxT>,
) {
    if let Some(
        MetaType::Object(ObjectMeta { ref mut fields, .. })
        | MetaType::Interface(InterfaceMeta { ref mut fields, .. }),
    ) = schema.types.get_mut(type_name)
    {
        if let Some(field) = fields.iter_mut().find(|f| f.name == field_name) {
            field.resolve = Some(resolve);
        }
    }
}

fn build_type_objects<CtxT>(schema: &SchemaType<CtxT>) -> TypeObjectMap {
    schema
        .types
        .iter()
        .map(|(name, meta_type)| (name.clone(), type_object(schema, meta_type)))
        .collect()
}

fn build_schema_object<CtxT>(schema: &SchemaType<CtxT>, type_objects: &TypeObjectMap) -> Value {
    let named_type = |name: Option<&str>| {
        name.and_then(|n| type_objects.get(n).cloned())
            .unwrap_or(Value::Null)
    };

    let mut obj = Object::with_capacity(5);
    obj.add_field(
        "types",
        Value::List(type_objects.values().cloned().collect()),
    );
    obj.add_field("queryType", named_type(Some(schema.query_type_name())));
    obj.add_field("mutationType", named_type(schema.mutation_type_name()));
    obj.add_field(
        "subscriptionType",
        named_type(schema.subscription_type_name()),
    );
    obj.add_field(
        "directives",
        Value::List(
            schema
                .directive_list()
                .into_iter()
                .map(directive_object)
                .collect(),
        ),
    );
    Value::Object(obj)
}

fn type_object<CtxT>(schema: &SchemaType<CtxT>, meta_type: &MetaType<CtxT>) -> Value {
    let mut obj = Object::with_capacity(9);
    obj.add_field("kind", Value::string(meta_type.type_kind().as_str()));
    obj.add_field(
        "name",
        Value::string(meta_type.name().expect("registered types are named")),
    );
    obj.add_field("description", opt_string(meta_type.description()));
    obj.add_field("fields", Value::Null);
    obj.add_field("interfaces", Value::Null);
    obj.add_field("possibleTypes", Value::Null);
    obj.add_field("enumValues", Value::Null);
    obj.add_field("inputFields", Value::Null);
    obj.add_field("ofType", Value::Null);

    match *meta_type {
        MetaType::Object(ObjectMeta {
            ref fields,
            ref interface_names,
            ..
        }) => {
            obj.add_field("fields", field_list(fields));
            obj.add_field(
                "interfaces",
                Value::List(
                    interface_names
                        .iter()
                        .map(|n| Value::string(n.clone()))
                        .collect(),
                ),
            );
        }
        MetaType::Interface(ref interface) => {
            obj.add_field("fields", field_list(&interface.fields));
            obj.add_field(
                "possibleTypes",
                Value::List(
                    schema
                        .possible_types(meta_type)
                        .into_iter()
                        .map(|t| Value::string(t.name().expect("registered types are named")))
                        .collect(),
                ),
            );
        }
        MetaType::Union(UnionMeta {
            ref of_type_names, ..
        }) => {
            obj.add_field(
                "possibleTypes",
                Value::List(
                    of_type_names
                        .iter()
                        .map(|n| Value::string(n.clone()))
                        .collect(),
                ),
            );
        }
        MetaType::Enum(ref enum_meta) => {
            obj.add_field(
                "enumValues",
                Value::List(enum_meta.values.iter().map(enum_value_object).collect()),
            );
        }
        MetaType::InputObject(ref input_object) => {
            obj.add_field(
                "inputFields",
                Value::List(
                    input_object
                        .input_fields
                        .iter()
                        .map(input_value_object)
                        .collect(),
                ),
            );
        }
        MetaType::Scalar(_) => {}
    }

    Value::Object(obj)
}

fn field_list<CtxT>(fields: &[Field<CtxT>]) -> Value {
    Value::List(
        fields
            .iter()
            .filter(|f| !f.name.starts_with("__"))
            .map(field_object)
            .collect(),
    )
}

fn field_object<CtxT>(field: &Field<CtxT>) -> Value {
    let mut obj = Object::with_capacity(6);
    obj.add_field("name", Value::string(&field.name));
    obj.add_field("description", opt_string(field.description.as_ref()));
    obj.add_field(
        "args",
        Value::List(
            field
                .arguments
                .as_deref()
                .unwrap_or_default()
                .iter()
                .map(input_value_object)
                .collect(),
        ),
    );
    obj.add_field("type", type_marker(&field.field_type));
    obj.add_field(
        "isDeprecated",
        Value::Boolean(field.deprecation_reason.is_some()),
    );
    obj.add_field(
        "deprecationReason",
        opt_string(field.deprecation_reason.as_ref()),
    );
    Value::Object(obj)
}

fn input_value_object(argument: &Argument) -> Value {
    let mut obj = Object::with_capacity(4);
    obj.add_field("name", Value::string(&argument.name));
    obj.add_field("description", opt_string(argument.description.as_ref()));
    obj.add_field("type", type_marker(&argument.arg_type));
    obj.add_field(
        "defaultValue",
        argument
            .default_value
            .as_ref()
            .map_or(Value::Null, |v| Value::string(v.to_string())),
    );
    Value::Object(obj)
}

fn enum_value_object(value: &EnumValue) -> Value {
    let mut obj = Object::with_capacity(4);
    obj.add_field("name", Value::string(&value.name));
    obj.add_field("description", opt_string(value.description.as_ref()));
    obj.add_field(
        "isDeprecated",
        Value::Boolean(value.deprecation_reason.is_some()),
    );
    obj.add_field(
        "deprecationReason",
        opt_string(value.deprecation_reason.as_ref()),
    );
    Value::Object(obj)
}

fn directive_object(directive: &DirectiveType) -> Value {
    let mut obj = Object::with_capacity(4);
    obj.add_field("name", Value::string(&directive.name));
    obj.add_field("description", opt_string(directive.description.as_ref()));
    obj.add_field(
        "locations",
        Value::List(
            directive
                .locations
                .iter()
                .map(|l| Value::string(l.as_str()))
                .collect(),
        ),
    );
    obj.add_field(
        "args",
        Value::List(directive.arguments.iter().map(input_value_object).collect()),
    );
    Value::Object(obj)
}

/// Encode a type literal as an introspection value.
///
/// Named types are stored as bare name markers and looked up in the
/// materialized type map when a query steps into them; wrappers become
/// `LIST`/`NON_NULL` objects whose `ofType` holds the encoding of the inner
/// type.
fn type_marker(t: &Type) -> Value {
    match *t {
        Type::Named(ref name) => Value::string(name),
        Type::NonNullNamed(ref name) => wrapper_object("NON_NULL", Value::string(name)),
        Type::List(ref inner) => wrapper_object("LIST", type_marker(inner)),
        Type::NonNullList(ref inner) => {
            wrapper_object("NON_NULL", wrapper_object("LIST", type_marker(inner)))
        }
    }
}

fn wrapper_object(kind: &str, of_type: Value) -> Value {
    let mut obj = Object::with_capacity(2);
    obj.add_field("kind", Value::string(kind));
    obj.add_field("ofType", of_type);
    Value::Object(obj)
}

fn field_value<'v>(parent: &'v Value, key: &str) -> Option<&'v Value> {
    parent.as_object_value().and_then(|o| o.get_field_value(key))
}

fn expand_marker(map: &TypeObjectMap, v: Option<&Value>) -> Value {
    match v {
        Some(Value::String(name)) => map.get(name).cloned().unwrap_or(Value::Null),
        Some(Value::Object(o)) => Value::Object(o.clone()),
        _ => Value::Null,
    }
}

fn expand_marker_list(map: &TypeObjectMap, v: Option<&Value>) -> Value {
    match v {
        Some(Value::List(items)) => Value::List(
            items
                .iter()
                .map(|item| expand_marker(map, Some(item)))
                .collect(),
        ),
        _ => Value::Null,
    }
}

fn filtered_deprecation_list(v: Option<&Value>, include_deprecated: bool) -> Value {
    match v {
        Some(Value::List(items)) => Value::List(
            items
                .iter()
                .filter(|item| {
                    include_deprecated
                        || field_value(item, "isDeprecated") != Some(&Value::Boolean(true))
                })
                .cloned()
                .collect(),
        ),
        _ => Value::Null,
    }
}

fn opt_string(s: Option<&String>) -> Value {
    s.map_or(Value::Null, Value::string)
}
