use indexmap::IndexMap;

use crate::ast::{FromInputValue, InputValue};
use crate::schema::meta::Argument;

/// GraphQL type kind
///
/// The GraphQL specification defines a number of type kinds - the meta type
/// of a type.
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub enum TypeKind {
    /// ## Scalar types
    ///
    /// Scalar types appear as the leaf nodes of GraphQL queries. Strings,
    /// numbers, and booleans are the built in types, and while it's possible
    /// to define your own, it's relatively uncommon.
    Scalar,

    /// ## Object types
    ///
    /// The most common type to be implemented by users. Objects have fields
    /// and can implement interfaces.
    Object,

    /// ## Interface types
    ///
    /// Interface types are used to represent overlapping fields between
    /// multiple types, and can be queried for their concrete type.
    Interface,

    /// ## Union types
    ///
    /// Unions are similar to interfaces but can not contain any fields on
    /// their own.
    Union,

    /// ## Enum types
    ///
    /// Like scalars, enum types appear as the leaf nodes of GraphQL queries.
    Enum,

    /// ## Input objects
    ///
    /// Represents complex values provided in queries _into_ the system.
    InputObject,

    /// ## List types
    ///
    /// Represent lists of other types. Lists arise from wrapping any other
    /// type in a list type literal.
    List,

    /// ## Non-null types
    ///
    /// In GraphQL, nullable types are the default. By putting a `!` after a
    /// type, it becomes non-nullable.
    NonNull,
}

impl TypeKind {
    /// The introspection name of the type kind, e.g. `INPUT_OBJECT`.
    pub fn as_str(&self) -> &'static str {
        match *self {
            TypeKind::Scalar => "SCALAR",
            TypeKind::Object => "OBJECT",
            TypeKind::Interface => "INTERFACE",
            TypeKind::Union => "UNION",
            TypeKind::Enum => "ENUM",
            TypeKind::InputObject => "INPUT_OBJECT",
            TypeKind::List => "LIST",
            TypeKind::NonNull => "NON_NULL",
        }
    }
}

/// Field argument container
///
/// Holds the evaluated arguments of a single field during execution, with
/// declared default values substituted for the ones not provided by the
/// query. Every argument declared on the field is present; arguments that
/// are neither provided nor defaulted hold `null`.
#[derive(Debug)]
pub struct Arguments {
    args: IndexMap<String, InputValue>,
}

impl Arguments {
    #[doc(hidden)]
    pub fn new(mut args: IndexMap<String, InputValue>, meta_args: &Option<Vec<Argument>>) -> Arguments {
        if let Some(meta_args) = meta_args {
            for arg in meta_args {
                if !args.contains_key(&arg.name) || args[&arg.name].is_null() {
                    if let Some(ref default_value) = arg.default_value {
                        args.insert(arg.name.clone(), default_value.clone());
                    } else {
                        args.insert(arg.name.clone(), InputValue::null());
                    }
                }
            }
        }

        Arguments { args }
    }

    /// Get and convert an argument into the desired type.
    ///
    /// If the argument is found, or a default argument has been provided,
    /// the [`InputValue`] is converted into the type `T`.
    ///
    /// Returns `Some` if the argument is present _and_ type conversion
    /// succeeds.
    pub fn get<T>(&self, key: &str) -> Option<T>
    where
        T: FromInputValue,
    {
        self.args.get(key).and_then(InputValue::convert)
    }

    /// Get the raw argument value, if present.
    pub fn get_input(&self, key: &str) -> Option<&InputValue> {
        self.args.get(key)
    }
}
