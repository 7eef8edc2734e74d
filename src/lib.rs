/*!

# GraphQL

[GraphQL][1] is a data query language developed by Facebook intended to
serve mobile and web application frontends. A server provides a schema,
containing types and fields that applications can query. Queries are
hierarchical, composable, and statically typed. Schemas are introspective,
which lets clients statically verify their queries against a server without
actually executing them.

This library is an embeddable GraphQL engine: a schema is described at
runtime through value-style builders, and incoming request documents are
parsed, validated, and executed against it. The engine carries the full
request pipeline - lexer, parser, validator, and executor - together with
the type system they read and the introspection schema it exposes.

## Describing a schema

Types are built from the metadata builders in the [`meta`] module and
registered on a [`SchemaType`]. Fields carry optional resolver functions;
fields without a resolver read their name as a key out of the parent
object value.

```rust
use graphlite::meta::{Field, ObjectMeta};
use graphlite::{execute, SchemaType, Type, Value, Variables};

let schema = SchemaType::new(
    "Query",
    None,
    None,
    vec![ObjectMeta::new("Query")
        .field(
            Field::new("hello", Type::named("String"))
                .resolve(|_, _, _: &()| Ok(Value::string("World"))),
        )
        .into_meta()],
)
.unwrap();

let (data, errors) = execute("{ hello }", None, &schema, &Variables::new(), &()).unwrap();

assert!(errors.is_empty());
assert_eq!(
    data.as_object_value().and_then(|o| o.get_field_value("hello")),
    Some(&Value::string("World"))
);
```

## Executing requests

The [`execute`] function drives the whole pipeline for one request: parse
errors and validation errors abort before execution and are returned in the
`Err` variant; execution errors accumulate next to the (possibly partially
`null`ed) data value. The [`http`] module provides serde-ready request and
response envelopes around the same entry point.

[1]: http://graphql.org

*/

#![warn(missing_docs)]

mod ast;
pub mod parser;
mod value;
mod types;
mod schema;
pub mod validation;
mod executor;
mod integrations;
pub mod http;

#[cfg(test)]
mod executor_tests;

use crate::parser::{parse_document_source, ParseError, Spanning};
use crate::validation::{visit_all_rules, RuleError, ValidatorContext};

pub use crate::ast::{
    FromInputValue, InputValue, OperationType, Selection, ToInputValue, Type,
};
pub use crate::executor::{
    coerce_input_value, coerce_literal_value, execute_validated_query, ExecutionError,
    ExecutionResult, Variables,
};
pub use crate::schema::meta;
pub use crate::schema::model::{DirectiveLocation, DirectiveType, SchemaError, SchemaType};
pub use crate::types::base::{Arguments, TypeKind};
pub use crate::types::scalars::ID;
pub use crate::value::{Object, Value};

/// An error that prevented query execution
#[derive(Debug, PartialEq)]
#[allow(missing_docs)]
pub enum GraphQLError {
    ParseError(Spanning<ParseError>),
    ValidationError(Vec<RuleError>),
}

/// Execute a query in a provided schema
///
/// Parses and validates the document, then executes the selected operation.
/// Variable values are read from `variables` under their bare names. A
/// parse or validation failure is returned as `Err`; execution failures are
/// accumulated next to the data value.
pub fn execute<CtxT>(
    document_source: &str,
    operation_name: Option<&str>,
    schema: &SchemaType<CtxT>,
    variables: &Variables,
    context: &CtxT,
) -> Result<(Value, Vec<ExecutionError>), GraphQLError> {
    let document = parse_document_source(document_source)?;

    {
        let mut ctx = ValidatorContext::new(schema, &document);
        visit_all_rules(&mut ctx, &document);

        if ctx.has_errors() {
            return Err(GraphQLError::ValidationError(ctx.into_errors()));
        }
    }

    Ok(execute_validated_query(
        &document,
        operation_name,
        schema,
        variables,
        context,
    ))
}

impl From<Spanning<ParseError>> for GraphQLError {
    fn from(f: Spanning<ParseError>) -> GraphQLError {
        GraphQLError::ParseError(f)
    }
}
