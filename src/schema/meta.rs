//! Types used to describe a GraphQL schema

use std::fmt;

use crate::ast::{InputValue, Type};
use crate::executor::ExecutionResult;
use crate::types::base::{Arguments, TypeKind};
use crate::value::Value;

/// Host-supplied function producing a field's value.
///
/// The canonical resolver signature: the parent object value, the evaluated
/// field arguments, and the opaque request context. Returning `Err` records
/// an execution error for the field and makes its value `null`, subject to
/// non-null propagation.
pub type ResolveFn<CtxT> =
    Box<dyn Fn(&Value, &Arguments, &CtxT) -> ExecutionResult + Send + Sync>;

/// Function resolving an abstract type's value into a concrete type name.
pub type ResolveTypeFn = Box<dyn Fn(&Value) -> Option<String> + Send + Sync>;

/// Function shaping a resolved output value into its wire form.
pub type ScalarSerializeFn = Box<dyn Fn(&Value) -> Result<Value, String> + Send + Sync>;

/// Function coercing an input value or query literal into its internal form.
pub type ScalarParseFn = Box<dyn Fn(&InputValue) -> Result<InputValue, String> + Send + Sync>;

/// Scalar type metadata
pub struct ScalarMeta {
    #[doc(hidden)]
    pub name: String,
    #[doc(hidden)]
    pub description: Option<String>,
    #[doc(hidden)]
    pub serialize: ScalarSerializeFn,
    #[doc(hidden)]
    pub parse_value: ScalarParseFn,
    #[doc(hidden)]
    pub parse_literal: ScalarParseFn,
}

/// Object type metadata
pub struct ObjectMeta<CtxT> {
    #[doc(hidden)]
    pub name: String,
    #[doc(hidden)]
    pub description: Option<String>,
    #[doc(hidden)]
    pub fields: Vec<Field<CtxT>>,
    #[doc(hidden)]
    pub interface_names: Vec<String>,
}

/// Enum type metadata
#[derive(Debug)]
pub struct EnumMeta {
    #[doc(hidden)]
    pub name: String,
    #[doc(hidden)]
    pub description: Option<String>,
    #[doc(hidden)]
    pub values: Vec<EnumValue>,
}

/// Interface type metadata
pub struct InterfaceMeta<CtxT> {
    #[doc(hidden)]
    pub name: String,
    #[doc(hidden)]
    pub description: Option<String>,
    #[doc(hidden)]
    pub fields: Vec<Field<CtxT>>,
    #[doc(hidden)]
    pub resolve_type: Option<ResolveTypeFn>,
}

/// Union type metadata
pub struct UnionMeta {
    #[doc(hidden)]
    pub name: String,
    #[doc(hidden)]
    pub description: Option<String>,
    #[doc(hidden)]
    pub of_type_names: Vec<String>,
    #[doc(hidden)]
    pub resolve_type: Option<ResolveTypeFn>,
}

/// Input object metadata
#[derive(Debug)]
pub struct InputObjectMeta {
    #[doc(hidden)]
    pub name: String,
    #[doc(hidden)]
    pub description: Option<String>,
    #[doc(hidden)]
    pub input_fields: Vec<Argument>,
}

/// Generic type metadata
pub enum MetaType<CtxT> {
    #[doc(hidden)]
    Scalar(ScalarMeta),
    #[doc(hidden)]
    Object(ObjectMeta<CtxT>),
    #[doc(hidden)]
    Enum(EnumMeta),
    #[doc(hidden)]
    Interface(InterfaceMeta<CtxT>),
    #[doc(hidden)]
    Union(UnionMeta),
    #[doc(hidden)]
    InputObject(InputObjectMeta),
}

/// Metadata for a field
pub struct Field<CtxT> {
    #[doc(hidden)]
    pub name: String,
    #[doc(hidden)]
    pub description: Option<String>,
    #[doc(hidden)]
    pub arguments: Option<Vec<Argument>>,
    #[doc(hidden)]
    pub field_type: Type,
    #[doc(hidden)]
    pub deprecation_reason: Option<String>,
    #[doc(hidden)]
    pub resolve: Option<ResolveFn<CtxT>>,
}

/// Metadata for an argument to a field
#[derive(Debug, Clone)]
pub struct Argument {
    #[doc(hidden)]
    pub name: String,
    #[doc(hidden)]
    pub description: Option<String>,
    #[doc(hidden)]
    pub arg_type: Type,
    #[doc(hidden)]
    pub default_value: Option<InputValue>,
}

/// Metadata for a single value in an enum
#[derive(Debug, Clone)]
pub struct EnumValue {
    /// The name of the enum value
    ///
    /// This is the string literal representation of the enum in responses.
    pub name: String,
    /// The optional description of the enum value.
    ///
    /// Note: this is not the description of the enum itself; it's the
    /// description of this enum _value_.
    pub description: Option<String>,
    /// The optional deprecation reason
    ///
    /// If this is `Some`, the value will be considered `isDeprecated`.
    pub deprecation_reason: Option<String>,
}

impl<CtxT> MetaType<CtxT> {
    /// Access the name of the type.
    ///
    /// All registered types are named; list and non-null wrappers are
    /// expressed through [`Type`] literals instead.
    pub fn name(&self) -> Option<&str> {
        match *self {
            MetaType::Scalar(ScalarMeta { ref name, .. })
            | MetaType::Object(ObjectMeta { ref name, .. })
            | MetaType::Enum(EnumMeta { ref name, .. })
            | MetaType::Interface(InterfaceMeta { ref name, .. })
            | MetaType::Union(UnionMeta { ref name, .. })
            | MetaType::InputObject(InputObjectMeta { ref name, .. }) => Some(name),
        }
    }

    /// Access the description of the type, if applicable
    pub fn description(&self) -> Option<&String> {
        match *self {
            MetaType::Scalar(ScalarMeta {
                ref description, ..
            })
            | MetaType::Object(ObjectMeta {
                ref description, ..
            })
            | MetaType::Enum(EnumMeta {
                ref description, ..
            })
            | MetaType::Interface(InterfaceMeta {
                ref description, ..
            })
            | MetaType::Union(UnionMeta {
                ref description, ..
            })
            | MetaType::InputObject(InputObjectMeta {
                ref description, ..
            }) => description.as_ref(),
        }
    }

    /// Construct a [`TypeKind`] for the type
    pub fn type_kind(&self) -> TypeKind {
        match *self {
            MetaType::Scalar(_) => TypeKind::Scalar,
            MetaType::Object(_) => TypeKind::Object,
            MetaType::Enum(_) => TypeKind::Enum,
            MetaType::Interface(_) => TypeKind::Interface,
            MetaType::Union(_) => TypeKind::Union,
            MetaType::InputObject(_) => TypeKind::InputObject,
        }
    }

    /// Access a field's meta data given its name
    ///
    /// Only objects and interfaces have fields. This method always returns
    /// `None` for other types.
    pub fn field_by_name(&self, name: &str) -> Option<&Field<CtxT>> {
        match *self {
            MetaType::Object(ObjectMeta { ref fields, .. })
            | MetaType::Interface(InterfaceMeta { ref fields, .. }) => {
                fields.iter().find(|f| f.name == name)
            }
            _ => None,
        }
    }

    /// Access an input field's meta data given its name
    ///
    /// Only input objects have input fields. This method always returns
    /// `None` for other types.
    pub fn input_field_by_name(&self, name: &str) -> Option<&Argument> {
        match *self {
            MetaType::InputObject(InputObjectMeta {
                ref input_fields, ..
            }) => input_fields.iter().find(|f| f.name == name),
            _ => None,
        }
    }

    /// Returns true if the type is a composite type
    ///
    /// Objects, interfaces, and unions are composite.
    pub fn is_composite(&self) -> bool {
        matches!(
            *self,
            MetaType::Object(_) | MetaType::Interface(_) | MetaType::Union(_)
        )
    }

    /// Returns true if the type can occur in leaf positions in queries
    ///
    /// Only enums and scalars are leaf types.
    pub fn is_leaf(&self) -> bool {
        matches!(*self, MetaType::Enum(_) | MetaType::Scalar(_))
    }

    /// Returns true if the type is abstract
    ///
    /// Only interfaces and unions are abstract types.
    pub fn is_abstract(&self) -> bool {
        matches!(*self, MetaType::Interface(_) | MetaType::Union(_))
    }

    /// Returns true if the type can be used in input positions, e.g.
    /// arguments or variables
    ///
    /// Only scalars, enums, and input objects are input types.
    pub fn is_input(&self) -> bool {
        matches!(
            *self,
            MetaType::Scalar(_) | MetaType::Enum(_) | MetaType::InputObject(_)
        )
    }
}

impl ScalarMeta {
    /// Build a new scalar type metadata with the specified name
    ///
    /// The default coercion functions pass values through unchanged; set
    /// them through the builder methods to implement custom scalars.
    pub fn new<S: Into<String>>(name: S) -> ScalarMeta {
        ScalarMeta {
            name: name.into(),
            description: None,
            serialize: Box::new(|v| Ok(v.clone())),
            parse_value: Box::new(|v| Ok(v.clone())),
            parse_literal: Box::new(|v| Ok(v.clone())),
        }
    }

    /// Set the description for the scalar type
    ///
    /// If a description already was set prior to calling this method, it
    /// will be overwritten.
    pub fn description(mut self, description: &str) -> ScalarMeta {
        self.description = Some(description.into());
        self
    }

    /// Set the output serialization function for the scalar
    pub fn serialize_fn<F>(mut self, f: F) -> ScalarMeta
    where
        F: Fn(&Value) -> Result<Value, String> + Send + Sync + 'static,
    {
        self.serialize = Box::new(f);
        self
    }

    /// Set the runtime input coercion function for the scalar
    pub fn parse_value_fn<F>(mut self, f: F) -> ScalarMeta
    where
        F: Fn(&InputValue) -> Result<InputValue, String> + Send + Sync + 'static,
    {
        self.parse_value = Box::new(f);
        self
    }

    /// Set the query literal coercion function for the scalar
    pub fn parse_literal_fn<F>(mut self, f: F) -> ScalarMeta
    where
        F: Fn(&InputValue) -> Result<InputValue, String> + Send + Sync + 'static,
    {
        self.parse_literal = Box::new(f);
        self
    }

    /// Wrap the scalar in a generic meta type
    pub fn into_meta<CtxT>(self) -> MetaType<CtxT> {
        MetaType::Scalar(self)
    }
}

impl<CtxT> ObjectMeta<CtxT> {
    /// Build a new object type with the specified name
    pub fn new<S: Into<String>>(name: S) -> ObjectMeta<CtxT> {
        ObjectMeta {
            name: name.into(),
            description: None,
            fields: Vec::new(),
            interface_names: Vec::new(),
        }
    }

    /// Set the description for the object
    ///
    /// If a description was provided prior to calling this method, it will
    /// be overwritten.
    pub fn description(mut self, description: &str) -> ObjectMeta<CtxT> {
        self.description = Some(description.into());
        self
    }

    /// Add a field to the object
    ///
    /// Fields are ordered and their insertion order is the introspection
    /// order.
    pub fn field(mut self, field: Field<CtxT>) -> ObjectMeta<CtxT> {
        self.fields.push(field);
        self
    }

    /// Set the interfaces this type implements, by name
    ///
    /// If a list of interfaces already was provided prior to calling this
    /// method, they will be overwritten.
    pub fn interfaces(mut self, interfaces: &[&str]) -> ObjectMeta<CtxT> {
        self.interface_names = interfaces.iter().map(|&n| n.into()).collect();
        self
    }

    /// Wrap this object type in a generic meta type
    pub fn into_meta(self) -> MetaType<CtxT> {
        MetaType::Object(self)
    }
}

impl EnumMeta {
    /// Build a new enum type with the specified name
    pub fn new<S: Into<String>>(name: S) -> EnumMeta {
        EnumMeta {
            name: name.into(),
            description: None,
            values: Vec::new(),
        }
    }

    /// Set the description of the type
    ///
    /// If a description was provided prior to calling this method, it will
    /// be overwritten
    pub fn description(mut self, description: &str) -> EnumMeta {
        self.description = Some(description.into());
        self
    }

    /// Add a possible value to the enum
    pub fn value(mut self, value: EnumValue) -> EnumMeta {
        self.values.push(value);
        self
    }

    /// Wrap this enum type in a generic meta type
    pub fn into_meta<CtxT>(self) -> MetaType<CtxT> {
        MetaType::Enum(self)
    }
}

impl<CtxT> InterfaceMeta<CtxT> {
    /// Build a new interface type with the specified name
    pub fn new<S: Into<String>>(name: S) -> InterfaceMeta<CtxT> {
        InterfaceMeta {
            name: name.into(),
            description: None,
            fields: Vec::new(),
            resolve_type: None,
        }
    }

    /// Set the description of the type
    ///
    /// If a description was provided prior to calling this method, it will
    /// be overwritten.
    pub fn description(mut self, description: &str) -> InterfaceMeta<CtxT> {
        self.description = Some(description.into());
        self
    }

    /// Add a field to the interface
    pub fn field(mut self, field: Field<CtxT>) -> InterfaceMeta<CtxT> {
        self.fields.push(field);
        self
    }

    /// Set the function resolving values of this interface into the name of
    /// a concrete object type
    ///
    /// Without it, execution falls back to reading a `"__typename"` string
    /// tag on the object value.
    pub fn resolve_type<F>(mut self, f: F) -> InterfaceMeta<CtxT>
    where
        F: Fn(&Value) -> Option<String> + Send + Sync + 'static,
    {
        self.resolve_type = Some(Box::new(f));
        self
    }

    /// Wrap this interface type in a generic meta type
    pub fn into_meta(self) -> MetaType<CtxT> {
        MetaType::Interface(self)
    }
}

impl UnionMeta {
    /// Build a new union type with the specified name and possible types
    pub fn new<S: Into<String>>(name: S, of_types: &[&str]) -> UnionMeta {
        UnionMeta {
            name: name.into(),
            description: None,
            of_type_names: of_types.iter().map(|&n| n.into()).collect(),
            resolve_type: None,
        }
    }

    /// Set the description of the type
    ///
    /// If a description was provided prior to calling this method, it will
    /// be overwritten.
    pub fn description(mut self, description: &str) -> UnionMeta {
        self.description = Some(description.into());
        self
    }

    /// Set the function resolving values of this union into the name of a
    /// concrete object type
    pub fn resolve_type<F>(mut self, f: F) -> UnionMeta
    where
        F: Fn(&Value) -> Option<String> + Send + Sync + 'static,
    {
        self.resolve_type = Some(Box::new(f));
        self
    }

    /// Wrap this union type in a generic meta type
    pub fn into_meta<CtxT>(self) -> MetaType<CtxT> {
        MetaType::Union(self)
    }
}

impl InputObjectMeta {
    /// Build a new input object type with the specified name
    pub fn new<S: Into<String>>(name: S) -> InputObjectMeta {
        InputObjectMeta {
            name: name.into(),
            description: None,
            input_fields: Vec::new(),
        }
    }

    /// Set the description of the type
    ///
    /// If a description was provided prior to calling this method, it will
    /// be overwritten.
    pub fn description(mut self, description: &str) -> InputObjectMeta {
        self.description = Some(description.into());
        self
    }

    /// Add an input field to the input object
    pub fn field(mut self, field: Argument) -> InputObjectMeta {
        self.input_fields.push(field);
        self
    }

    /// Wrap this input object type in a generic meta type
    pub fn into_meta<CtxT>(self) -> MetaType<CtxT> {
        MetaType::InputObject(self)
    }
}

impl<CtxT> Field<CtxT> {
    /// Construct a new field with the provided name and type
    pub fn new<S: Into<String>>(name: S, field_type: Type) -> Field<CtxT> {
        Field {
            name: name.into(),
            description: None,
            arguments: None,
            field_type,
            deprecation_reason: None,
            resolve: None,
        }
    }

    /// Set the description of the field
    ///
    /// This overwrites the description if any was previously set.
    pub fn description(mut self, description: &str) -> Field<CtxT> {
        self.description = Some(description.into());
        self
    }

    /// Add an argument to the field
    ///
    /// Arguments are ordered and can't contain duplicates by name.
    pub fn argument(mut self, argument: Argument) -> Field<CtxT> {
        match self.arguments {
            None => {
                self.arguments = Some(vec![argument]);
            }
            Some(ref mut args) => {
                args.push(argument);
            }
        };

        self
    }

    /// Set the deprecation reason
    ///
    /// This overwrites the deprecation reason if any was previously set.
    pub fn deprecated(mut self, reason: &str) -> Field<CtxT> {
        self.deprecation_reason = Some(reason.into());
        self
    }

    /// Set the resolver of the field
    ///
    /// Without a resolver, execution falls back to reading the field's name
    /// as a key out of the parent object value.
    pub fn resolve<F>(mut self, f: F) -> Field<CtxT>
    where
        F: Fn(&Value, &Arguments, &CtxT) -> ExecutionResult + Send + Sync + 'static,
    {
        self.resolve = Some(Box::new(f));
        self
    }
}

impl Argument {
    /// Construct a new argument with the provided name and type
    pub fn new<S: Into<String>>(name: S, arg_type: Type) -> Argument {
        Argument {
            name: name.into(),
            description: None,
            arg_type,
            default_value: None,
        }
    }

    /// Set the description of the argument
    ///
    /// This overwrites the description if any was previously set.
    pub fn description(mut self, description: &str) -> Argument {
        self.description = Some(description.into());
        self
    }

    /// Set the default value of the argument
    ///
    /// This overwrites the default value if any was previously set.
    pub fn default_value(mut self, default_value: InputValue) -> Argument {
        self.default_value = Some(default_value);
        self
    }
}

impl EnumValue {
    /// Construct a new enum value with the provided name
    pub fn new<S: Into<String>>(name: S) -> EnumValue {
        EnumValue {
            name: name.into(),
            description: None,
            deprecation_reason: None,
        }
    }

    /// Set the description of the enum value
    ///
    /// This overwrites the description if any was previously set.
    pub fn description(mut self, description: &str) -> EnumValue {
        self.description = Some(description.into());
        self
    }

    /// Set the deprecation reason for the enum value
    ///
    /// This overwrites the deprecation reason if any was previously set.
    pub fn deprecated(mut self, reason: &str) -> EnumValue {
        self.deprecation_reason = Some(reason.into());
        self
    }
}

impl fmt::Debug for ScalarMeta {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.debug_struct("ScalarMeta")
            .field("name", &self.name)
            .field("description", &self.description)
            .finish()
    }
}

impl<CtxT> fmt::Debug for ObjectMeta<CtxT> {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.debug_struct("ObjectMeta")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("fields", &self.fields)
            .field("interface_names", &self.interface_names)
            .finish()
    }
}

impl<CtxT> fmt::Debug for InterfaceMeta<CtxT> {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.debug_struct("InterfaceMeta")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("fields", &self.fields)
            .finish()
    }
}

impl fmt::Debug for UnionMeta {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.debug_struct("UnionMeta")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("of_type_names", &self.of_type_names)
            .finish()
    }
}

impl<CtxT> fmt::Debug for Field<CtxT> {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.debug_struct("Field")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("arguments", &self.arguments)
            .field("field_type", &self.field_type)
            .field("deprecation_reason", &self.deprecation_reason)
            .finish()
    }
}

impl<CtxT> fmt::Debug for MetaType<CtxT> {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            MetaType::Scalar(ref inner) => inner.fmt(fmt),
            MetaType::Object(ref inner) => inner.fmt(fmt),
            MetaType::Enum(ref inner) => inner.fmt(fmt),
            MetaType::Interface(ref inner) => inner.fmt(fmt),
            MetaType::Union(ref inner) => inner.fmt(fmt),
            MetaType::InputObject(ref inner) => inner.fmt(fmt),
        }
    }
}
