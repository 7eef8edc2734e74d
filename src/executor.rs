use std::collections::{HashMap, HashSet};

use fnv::FnvHashMap;
use indexmap::IndexMap;

use crate::ast::{
    Definition, Directive, Document, Field, Fragment, InputValue, OperationType, Selection, Type,
};
use crate::parser::{SourcePosition, Spanning};
use crate::schema::meta::MetaType;
use crate::schema::model::SchemaType;
use crate::types::base::Arguments;
use crate::value::{Object, Value};

/// The map of variable values supplied with a request
///
/// Keys are the bare variable names, without the `$` sigil. This is the only
/// key form the engine reads.
pub type Variables = HashMap<String, InputValue>;

/// The result of resolving an unspecified field
pub type ExecutionResult = Result<Value, String>;

/// Error type for errors that occur during query execution
///
/// All execution errors contain the source position in the query of the
/// field that failed to resolve, and the response path leading to it.
#[derive(Clone, Debug, Eq, Ord, PartialEq, PartialOrd)]
pub struct ExecutionError {
    location: SourcePosition,
    path: Vec<String>,
    message: String,
}

impl ExecutionError {
    #[doc(hidden)]
    pub fn new(location: SourcePosition, path: Vec<String>, message: String) -> ExecutionError {
        ExecutionError {
            location,
            path,
            message,
        }
    }

    /// Construct an error with the given message at the origin position,
    /// outside of any field
    pub fn at_origin(message: String) -> ExecutionError {
        ExecutionError {
            location: SourcePosition::new_origin(),
            path: Vec::new(),
            message,
        }
    }

    /// The error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The source location _in the query_ of the field that failed to resolve
    pub fn location(&self) -> &SourcePosition {
        &self.location
    }

    /// The path of response keys leading to the field that generated this
    /// error
    pub fn path(&self) -> &[String] {
        &self.path
    }
}

/// Marker for a null that crossed a non-null boundary.
///
/// The originating error has already been recorded when this is returned;
/// it unwinds completion up to the nearest nullable field or list element.
struct Propagated;

/// Query execution engine
///
/// The executor drives the execution of a single validated operation. It
/// keeps the coerced variables, the fragment definitions of the document,
/// the current field path, and the error accumulator.
pub struct Executor<'a, CtxT> {
    fragments: FnvHashMap<&'a str, &'a Fragment<'a>>,
    variables: Variables,
    schema: &'a SchemaType<CtxT>,
    context: &'a CtxT,
    errors: Vec<ExecutionError>,
    path: Vec<String>,
}

/// Execute a parsed and validated document against the provided schema
///
/// Selects the operation, coerces the request variables, and executes the
/// operation's selection set against the matching root type. Operation
/// selection and variable coercion failures produce a `null` data value
/// with a single error.
pub fn execute_validated_query<'a, CtxT>(
    document: &'a Document<'a>,
    operation_name: Option<&str>,
    schema: &'a SchemaType<CtxT>,
    variables: &Variables,
    context: &'a CtxT,
) -> (Value, Vec<ExecutionError>) {
    let mut fragments = FnvHashMap::default();
    let mut operation = None;

    for def in document {
        match *def {
            Definition::Operation(ref op) => {
                if operation_name.is_none() && operation.is_some() {
                    return null_with_error(
                        "Must provide operation name if query contains multiple operations",
                    );
                }

                let matches = operation_name.is_none()
                    || op.item.name.as_ref().map(|s| s.item) == operation_name;

                if matches {
                    operation = Some(op);
                }
            }
            Definition::Fragment(ref f) => {
                fragments.insert(f.item.name.item, &f.item);
            }
        };
    }

    let op = match operation {
        Some(op) => op,
        None => return null_with_error("No operation found"),
    };

    let root_type_name = match op.item.operation_type {
        OperationType::Query => Some(schema.query_type_name()),
        OperationType::Mutation => schema.mutation_type_name(),
        OperationType::Subscription => schema.subscription_type_name(),
    };
    let root_type_name = match root_type_name {
        Some(name) => name,
        None => {
            return null_with_error(&format!(
                "Schema does not support {}",
                op.item.operation_type
            ))
        }
    };
    let root_type = match schema.concrete_type_by_name(root_type_name) {
        Some(meta_type) => meta_type,
        None => return null_with_error(&format!("Root type '{root_type_name}' not found")),
    };

    let variables = match coerce_variable_values(schema, &op.item, variables) {
        Ok(coerced) => coerced,
        Err(e) => return (Value::Null, vec![e]),
    };

    let mut executor = Executor {
        fragments,
        variables,
        schema,
        context,
        errors: Vec::new(),
        path: Vec::new(),
    };

    let value = match executor.execute_selection_set(&op.item.selection_set, root_type, &Value::Null)
    {
        Ok(v) => v,
        Err(Propagated) => Value::Null,
    };

    let mut errors = executor.errors;
    errors.sort();

    (value, errors)
}

fn null_with_error(message: &str) -> (Value, Vec<ExecutionError>) {
    (Value::Null, vec![ExecutionError::at_origin(message.into())])
}

/// Coerce the supplied variable values against the operation's variable
/// definitions
///
/// Supplied values are coerced through [`coerce_input_value`]; absent
/// variables fall back to their default literal when one is declared, are
/// an error for non-null types, and are left unset otherwise.
fn coerce_variable_values<CtxT>(
    schema: &SchemaType<CtxT>,
    operation: &crate::ast::Operation,
    variables: &Variables,
) -> Result<Variables, ExecutionError> {
    let mut coerced = Variables::new();

    if let Some(ref definitions) = operation.variable_definitions {
        for (name, definition) in definitions.item.iter() {
            if let Some(provided) = variables.get(name.item) {
                match coerce_input_value(schema, &definition.var_type.item, provided) {
                    Ok(value) => {
                        coerced.insert(name.item.to_owned(), value);
                    }
                    Err(message) => {
                        return Err(ExecutionError::new(
                            name.span.start,
                            Vec::new(),
                            format!("Invalid value for variable ${}: {}", name.item, message),
                        ));
                    }
                }
            } else if let Some(ref default) = definition.default_value {
                match coerce_literal_value(schema, &definition.var_type.item, &default.item) {
                    Ok(value) => {
                        coerced.insert(name.item.to_owned(), value);
                    }
                    Err(message) => {
                        return Err(ExecutionError::new(
                            name.span.start,
                            Vec::new(),
                            format!(
                                "Invalid default value for variable ${}: {}",
                                name.item, message
                            ),
                        ));
                    }
                }
            } else if definition.var_type.item.is_non_null() {
                return Err(ExecutionError::new(
                    name.span.start,
                    Vec::new(),
                    format!("Variable ${} is required but not provided", name.item),
                ));
            }
        }
    }

    Ok(coerced)
}

/// Coerce an externally supplied runtime value against the given type
pub fn coerce_input_value<CtxT, N: AsRef<str>>(
    schema: &SchemaType<CtxT>,
    ty: &Type<N>,
    value: &InputValue,
) -> Result<InputValue, String> {
    coerce(schema, ty, value, false)
}

/// Coerce a query literal against the given type
///
/// The same rules as [`coerce_input_value`], except that scalars dispatch
/// to their literal parse function.
pub fn coerce_literal_value<CtxT, N: AsRef<str>>(
    schema: &SchemaType<CtxT>,
    ty: &Type<N>,
    value: &InputValue,
) -> Result<InputValue, String> {
    coerce(schema, ty, value, true)
}

fn coerce<CtxT, N: AsRef<str>>(
    schema: &SchemaType<CtxT>,
    ty: &Type<N>,
    value: &InputValue,
    literal: bool,
) -> Result<InputValue, String> {
    match *ty {
        Type::NonNullNamed(ref name) => {
            if value.is_null() {
                Err(format!(
                    "Expected non-null value of type {}!",
                    name.as_ref()
                ))
            } else {
                coerce_named(schema, name.as_ref(), value, literal)
            }
        }
        Type::Named(ref name) => {
            if value.is_null() {
                Ok(InputValue::Null)
            } else {
                coerce_named(schema, name.as_ref(), value, literal)
            }
        }
        Type::NonNullList(ref inner) => {
            if value.is_null() {
                Err(format!("Expected non-null value of type [{inner}]!"))
            } else {
                coerce_list(schema, inner, value, literal)
            }
        }
        Type::List(ref inner) => {
            if value.is_null() {
                Ok(InputValue::Null)
            } else {
                coerce_list(schema, inner, value, literal)
            }
        }
    }
}

fn coerce_list<CtxT, N: AsRef<str>>(
    schema: &SchemaType<CtxT>,
    inner: &Type<N>,
    value: &InputValue,
    literal: bool,
) -> Result<InputValue, String> {
    // Non-list values are lifted to a single-element list.
    let items = match value.to_list_value() {
        Some(items) => items,
        None => vec![value],
    };

    let coerced = items
        .into_iter()
        .map(|item| coerce(schema, inner, item, literal))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(InputValue::list(coerced))
}

fn coerce_named<CtxT>(
    schema: &SchemaType<CtxT>,
    name: &str,
    value: &InputValue,
    literal: bool,
) -> Result<InputValue, String> {
    let meta_type = schema
        .concrete_type_by_name(name)
        .ok_or_else(|| format!("Unknown type '{name}'"))?;

    match *meta_type {
        MetaType::Scalar(ref scalar) => {
            if literal {
                (scalar.parse_literal)(value)
            } else {
                (scalar.parse_value)(value)
            }
        }
        MetaType::Enum(_) => match *value {
            InputValue::String(ref s) => Ok(InputValue::String(s.clone())),
            InputValue::Enum(ref e) => Ok(InputValue::String(e.clone())),
            ref other => Err(format!("Enum '{name}' cannot represent value: {other}")),
        },
        MetaType::InputObject(ref input_object) => {
            let object = value
                .to_object_value()
                .ok_or_else(|| format!("Input object '{name}' must be an object value"))?;

            let mut fields = Vec::with_capacity(input_object.input_fields.len());

            for input_field in &input_object.input_fields {
                let coerced = match object.get(input_field.name.as_str()) {
                    Some(field_value) => {
                        coerce(schema, &input_field.arg_type, field_value, literal)?
                    }
                    None => match input_field.default_value {
                        Some(ref default) => default.clone(),
                        None => coerce(schema, &input_field.arg_type, &InputValue::Null, literal)?,
                    },
                };
                fields.push((input_field.name.clone(), coerced));
            }

            Ok(InputValue::object(fields))
        }
        _ => Err(format!("Type '{name}' is not an input type")),
    }
}

impl<'a, CtxT> Executor<'a, CtxT> {
    fn execute_selection_set(
        &mut self,
        selection_set: &'a [Selection<'a>],
        object_type: &'a MetaType<CtxT>,
        object_value: &Value,
    ) -> Result<Value, Propagated> {
        let mut grouped_fields = IndexMap::new();
        let mut visited_fragments = HashSet::new();

        self.collect_fields(
            selection_set,
            object_type,
            &mut grouped_fields,
            &mut visited_fragments,
        );

        let mut result = Object::with_capacity(grouped_fields.len());

        for (response_key, fields) in grouped_fields {
            let value = self.execute_field(object_type, object_value, response_key, &fields)?;
            result.add_field(response_key, value);
        }

        Ok(Value::Object(result))
    }

    /// Collect the fields of a selection set into an ordered mapping from
    /// response key to field group
    ///
    /// Applies `@skip`/`@include`, flattens inline fragments and fragment
    /// spreads whose type condition matches the concrete object type, and
    /// preserves the order of first appearance of each response key.
    fn collect_fields(
        &mut self,
        selection_set: &'a [Selection<'a>],
        object_type: &'a MetaType<CtxT>,
        grouped_fields: &mut IndexMap<&'a str, Vec<&'a Spanning<Field<'a>>>>,
        visited_fragments: &mut HashSet<&'a str>,
    ) {
        for selection in selection_set {
            match *selection {
                Selection::Field(ref field) => {
                    if self.is_excluded(&field.item.directives) {
                        continue;
                    }

                    let response_key = field.item.alias.as_ref().unwrap_or(&field.item.name).item;
                    grouped_fields
                        .entry(response_key)
                        .or_insert_with(Vec::new)
                        .push(field);
                }
                Selection::InlineFragment(ref fragment) => {
                    if self.is_excluded(&fragment.item.directives) {
                        continue;
                    }

                    if let Some(ref type_condition) = fragment.item.type_condition {
                        if !self.type_condition_applies(type_condition.item, object_type) {
                            continue;
                        }
                    }

                    self.collect_fields(
                        &fragment.item.selection_set,
                        object_type,
                        grouped_fields,
                        visited_fragments,
                    );
                }
                Selection::FragmentSpread(ref spread) => {
                    if self.is_excluded(&spread.item.directives) {
                        continue;
                    }

                    if !visited_fragments.insert(spread.item.name.item) {
                        continue;
                    }

                    let fragment = match self.fragments.get(spread.item.name.item).copied() {
                        Some(fragment) => fragment,
                        None => continue,
                    };

                    if !self.type_condition_applies(fragment.type_condition.item, object_type) {
                        continue;
                    }

                    self.collect_fields(
                        &fragment.selection_set,
                        object_type,
                        grouped_fields,
                        visited_fragments,
                    );
                }
            }
        }
    }

    fn type_condition_applies(
        &self,
        type_condition: &str,
        object_type: &MetaType<CtxT>,
    ) -> bool {
        match object_type.name() {
            Some(name) => {
                type_condition == name || self.schema.is_named_subtype(name, type_condition)
            }
            None => false,
        }
    }

    /// Evaluate the `@skip`/`@include` directives of a selection against
    /// the request variables
    ///
    /// A selection is kept iff `include.if != false` and `skip.if != true`.
    fn is_excluded(&self, directives: &Option<Vec<Spanning<Directive<'a>>>>) -> bool {
        if let Some(ref directives) = *directives {
            for directive in directives {
                let condition: Option<bool> = directive
                    .item
                    .arguments
                    .as_ref()
                    .and_then(|args| args.item.get("if"))
                    .and_then(|v| v.item.clone().into_const(&self.variables).convert());

                match (directive.item.name.item, condition) {
                    ("skip", Some(true)) => return true,
                    ("include", Some(false)) => return true,
                    _ => (),
                }
            }
        }

        false
    }

    fn execute_field(
        &mut self,
        object_type: &'a MetaType<CtxT>,
        object_value: &Value,
        response_key: &str,
        fields: &[&'a Spanning<Field<'a>>],
    ) -> Result<Value, Propagated> {
        // The first field of the group is authoritative for arguments and
        // sub-selections.
        let field = fields[0];
        let field_name = field.item.name.item;
        let position = field.item.name.span.start;

        if field_name == "__typename" {
            return Ok(Value::string(
                object_type.name().unwrap_or_default(),
            ));
        }

        let meta_field = match object_type.field_by_name(field_name) {
            Some(meta_field) => meta_field,
            None => return Ok(Value::Null),
        };

        let arguments = Arguments::new(
            field
                .item
                .arguments
                .as_ref()
                .map(|args| {
                    args.item
                        .iter()
                        .map(|(k, v)| {
                            (
                                k.item.to_owned(),
                                v.item.clone().into_const(&self.variables),
                            )
                        })
                        .collect()
                })
                .unwrap_or_default(),
            &meta_field.arguments,
        );

        self.path.push(response_key.to_owned());

        let resolved = match meta_field.resolve {
            Some(ref resolve) => resolve(object_value, &arguments, self.context),
            None => Ok(default_resolve(object_value, field_name)),
        };

        let completed = match resolved {
            Ok(value) => self.complete_value(
                &meta_field.field_type,
                value,
                field.item.selection_set.as_deref(),
                &position,
            ),
            Err(message) => {
                self.push_error(message, position);
                Err(Propagated)
            }
        };

        self.path.pop();

        match completed {
            Ok(value) => Ok(value),
            Err(Propagated) => {
                if meta_field.field_type.is_non_null() {
                    Err(Propagated)
                } else {
                    Ok(Value::Null)
                }
            }
        }
    }

    /// Complete a resolved value against its declared type
    fn complete_value(
        &mut self,
        field_type: &'a Type,
        value: Value,
        selection_set: Option<&'a [Selection<'a>]>,
        position: &SourcePosition,
    ) -> Result<Value, Propagated> {
        match *field_type {
            Type::NonNullNamed(ref name) => {
                if value.is_null() {
                    self.push_error("Cannot return null for non-null field".into(), *position);
                    Err(Propagated)
                } else {
                    self.complete_named_type(name, value, selection_set, position)
                }
            }
            Type::NonNullList(ref inner) => {
                if value.is_null() {
                    self.push_error("Cannot return null for non-null field".into(), *position);
                    Err(Propagated)
                } else {
                    self.complete_list(inner, value, selection_set, position)
                }
            }
            Type::Named(ref name) => {
                if value.is_null() {
                    Ok(Value::Null)
                } else {
                    self.complete_named_type(name, value, selection_set, position)
                }
            }
            Type::List(ref inner) => {
                if value.is_null() {
                    Ok(Value::Null)
                } else {
                    self.complete_list(inner, value, selection_set, position)
                }
            }
        }
    }

    fn complete_list(
        &mut self,
        inner_type: &'a Type,
        value: Value,
        selection_set: Option<&'a [Selection<'a>]>,
        position: &SourcePosition,
    ) -> Result<Value, Propagated> {
        let items = match value {
            Value::List(items) => items,
            other => {
                self.push_error(
                    format!("Expected list but got {}", other.type_name()),
                    *position,
                );
                return Err(Propagated);
            }
        };

        let mut completed = Vec::with_capacity(items.len());

        for item in items {
            match self.complete_value(inner_type, item, selection_set, position) {
                Ok(value) => completed.push(value),
                Err(Propagated) => {
                    // A null in a non-null item position collapses the
                    // whole list.
                    if inner_type.is_non_null() {
                        return Err(Propagated);
                    }
                    completed.push(Value::Null);
                }
            }
        }

        Ok(Value::List(completed))
    }

    fn complete_named_type(
        &mut self,
        name: &str,
        value: Value,
        selection_set: Option<&'a [Selection<'a>]>,
        position: &SourcePosition,
    ) -> Result<Value, Propagated> {
        let schema = self.schema;
        let meta_type = match schema.concrete_type_by_name(name) {
            Some(meta_type) => meta_type,
            None => {
                self.push_error(format!("Type '{name}' not found in schema"), *position);
                return Err(Propagated);
            }
        };

        match *meta_type {
            MetaType::Scalar(ref scalar) => match (scalar.serialize)(&value) {
                Ok(serialized) => Ok(serialized),
                Err(message) => {
                    self.push_error(message, *position);
                    Err(Propagated)
                }
            },
            MetaType::Enum(_) => match value {
                Value::String(s) => Ok(Value::String(s)),
                other => {
                    self.push_error(
                        format!("Expected enum value but got {}", other.type_name()),
                        *position,
                    );
                    Err(Propagated)
                }
            },
            MetaType::Object(_) => match selection_set {
                Some(selection_set) => {
                    self.execute_selection_set(selection_set, meta_type, &value)
                }
                None => {
                    self.push_error(
                        format!("Field of composite type '{name}' requires a selection set"),
                        *position,
                    );
                    Err(Propagated)
                }
            },
            MetaType::Interface(ref interface) => {
                let concrete_name = interface
                    .resolve_type
                    .as_ref()
                    .and_then(|resolve_type| resolve_type(&value))
                    .or_else(|| typename_tag(&value));
                self.complete_abstract_type(name, concrete_name, value, selection_set, position)
            }
            MetaType::Union(ref union) => {
                let concrete_name = union
                    .resolve_type
                    .as_ref()
                    .and_then(|resolve_type| resolve_type(&value))
                    .or_else(|| typename_tag(&value));
                self.complete_abstract_type(name, concrete_name, value, selection_set, position)
            }
            MetaType::InputObject(_) => {
                self.push_error(format!("Type '{name}' is not an output type"), *position);
                Err(Propagated)
            }
        }
    }

    fn complete_abstract_type(
        &mut self,
        abstract_name: &str,
        concrete_name: Option<String>,
        value: Value,
        selection_set: Option<&'a [Selection<'a>]>,
        position: &SourcePosition,
    ) -> Result<Value, Propagated> {
        let concrete_name = match concrete_name {
            Some(name) => name,
            None => {
                self.push_error(
                    format!(
                        "Could not determine the concrete type of a value of abstract type \
                         '{abstract_name}'"
                    ),
                    *position,
                );
                return Err(Propagated);
            }
        };

        if !self.schema.is_named_subtype(&concrete_name, abstract_name) {
            self.push_error(
                format!("Type '{concrete_name}' is not a possible type of '{abstract_name}'"),
                *position,
            );
            return Err(Propagated);
        }

        let concrete_type = match self.schema.concrete_type_by_name(&concrete_name) {
            Some(meta_type @ MetaType::Object(_)) => meta_type,
            _ => {
                self.push_error(
                    format!("Type '{concrete_name}' is not an object type"),
                    *position,
                );
                return Err(Propagated);
            }
        };

        match selection_set {
            Some(selection_set) => self.execute_selection_set(selection_set, concrete_type, &value),
            None => {
                self.push_error(
                    format!(
                        "Field of composite type '{abstract_name}' requires a selection set"
                    ),
                    *position,
                );
                Err(Propagated)
            }
        }
    }

    fn push_error(&mut self, message: String, location: SourcePosition) {
        self.errors.push(ExecutionError {
            location,
            path: self.path.clone(),
            message,
        });
    }
}

/// The fallback resolver: read the field's name as a key out of the parent
/// object value.
fn default_resolve(object_value: &Value, field_name: &str) -> Value {
    match *object_value {
        Value::Object(ref obj) => obj
            .get_field_value(field_name)
            .cloned()
            .unwrap_or(Value::Null),
        _ => Value::Null,
    }
}

/// Read the `"__typename"` tag out of an object value, the fallback used
/// to determine the concrete type of an abstract value when no
/// `resolve_type` function is registered.
fn typename_tag(value: &Value) -> Option<String> {
    value
        .as_object_value()
        .and_then(|obj| obj.get_field_value("__typename"))
        .and_then(Value::as_string_value)
        .map(ToOwned::to_owned)
}
