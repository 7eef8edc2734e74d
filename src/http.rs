//! Request and response wire shapes
//!
//! Serde-facing types for the standard GraphQL request and response JSON
//! envelopes. The engine itself carries no transport; embedders decode a
//! [`GraphQLRequest`] from whatever channel they serve, execute it, and
//! encode the returned [`GraphQLResponse`].

use serde::ser::{self, SerializeMap};
use serde::Deserialize;

use crate::ast::InputValue;
use crate::executor::{ExecutionError, Variables};
use crate::schema::model::SchemaType;
use crate::value::Value;
use crate::GraphQLError;

/// The expected structure of a decoded request document
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct GraphQLRequest {
    query: String,
    #[serde(rename = "operationName")]
    operation_name: Option<String>,
    variables: Option<InputValue>,
}

impl GraphQLRequest {
    /// Construct a new request from parts
    pub fn new(
        query: String,
        operation_name: Option<String>,
        variables: Option<InputValue>,
    ) -> GraphQLRequest {
        GraphQLRequest {
            query,
            operation_name,
            variables,
        }
    }

    /// The name of the operation to run, if provided
    pub fn operation_name(&self) -> Option<&str> {
        self.operation_name.as_deref()
    }

    /// The request variables as a variable map
    pub fn variables(&self) -> Variables {
        self.variables
            .as_ref()
            .and_then(|iv| {
                iv.to_object_value().map(|o| {
                    o.into_iter()
                        .map(|(k, v)| (k.to_owned(), v.clone()))
                        .collect()
                })
            })
            .unwrap_or_default()
    }

    /// Execute the request against the provided schema and context
    ///
    /// This is a simple wrapper around the [`execute`](crate::execute)
    /// function exposed at the top level of this crate.
    pub fn execute<CtxT>(&self, schema: &SchemaType<CtxT>, context: &CtxT) -> GraphQLResponse {
        GraphQLResponse(crate::execute(
            &self.query,
            self.operation_name(),
            schema,
            &self.variables(),
            context,
        ))
    }
}

/// Simple wrapper around the result of executing a GraphQL operation
///
/// Serializes to the response envelope: `{"data": …}` with an `"errors"`
/// key appended when execution errors occurred, or `{"errors": […]}` alone
/// when the request failed before execution started.
pub struct GraphQLResponse(Result<(Value, Vec<ExecutionError>), GraphQLError>);

impl GraphQLResponse {
    /// Wrap an execution result in a response
    pub fn from_result(r: Result<(Value, Vec<ExecutionError>), GraphQLError>) -> GraphQLResponse {
        GraphQLResponse(r)
    }

    /// Was the request successful or not?
    ///
    /// Note that there still might be errors in the response even though
    /// it's considered OK. This is by design in GraphQL.
    pub fn is_ok(&self) -> bool {
        self.0.is_ok()
    }
}

impl ser::Serialize for GraphQLResponse {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        match self.0 {
            Ok((ref res, ref err)) => {
                let mut map = serializer.serialize_map(None)?;

                map.serialize_entry("data", res)?;

                if !err.is_empty() {
                    map.serialize_entry("errors", err)?;
                }

                map.end()
            }
            Err(ref err) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("errors", err)?;
                map.end()
            }
        }
    }
}
