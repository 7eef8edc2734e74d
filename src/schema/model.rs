use derive_more::{Display, Error};
use indexmap::IndexMap;

use crate::ast::Type;
use crate::schema::meta::{Argument, MetaType, ObjectMeta, UnionMeta};
use crate::schema::schema::attach_introspection;

/// Error raised while constructing a schema
///
/// These are type-system failures: they indicate a broken schema
/// description, fail the schema build, and are never visible to clients.
#[derive(Clone, Debug, Display, Eq, Error, PartialEq)]
pub enum SchemaError {
    /// Two types were registered under the same name
    #[display("Type '{_0}' is registered more than once")]
    DuplicateType(#[error(not(source))] String),

    /// A field, argument, input field, or union member references a type
    /// name that is not registered
    #[display("Type '{_0}' referenced by '{_1}' is not registered")]
    UnresolvedType(String, String),

    /// An operation root names a type that is not registered
    #[display("Root type '{_0}' is not registered")]
    UnknownRootType(#[error(not(source))] String),

    /// An operation root names a type that is not an object type
    #[display("Root type '{_0}' is not an object type")]
    InvalidRootType(#[error(not(source))] String),
}

/// Metadata for a schema
///
/// Owns every named type of the schema, keyed by name, and is read-only once
/// constructed. Construction registers the built-in scalars, the supplied
/// types, and the introspection overlay, then verifies that every reachable
/// type reference resolves.
pub struct SchemaType<CtxT> {
    pub(crate) types: IndexMap<String, MetaType<CtxT>>,
    query_type_name: String,
    mutation_type_name: Option<String>,
    subscription_type_name: Option<String>,
    directives: IndexMap<String, DirectiveType>,
}

/// A schema-level directive
pub struct DirectiveType {
    #[doc(hidden)]
    pub name: String,
    #[doc(hidden)]
    pub description: Option<String>,
    #[doc(hidden)]
    pub locations: Vec<DirectiveLocation>,
    #[doc(hidden)]
    pub arguments: Vec<Argument>,
}

/// Locations a directive may be attached to
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[allow(missing_docs)]
pub enum DirectiveLocation {
    Query,
    Mutation,
    Subscription,
    Field,
    FragmentDefinition,
    FragmentSpread,
    InlineFragment,
    Schema,
    Scalar,
    Object,
    FieldDefinition,
    ArgumentDefinition,
    Interface,
    Union,
    Enum,
    EnumValue,
    InputObject,
    InputFieldDefinition,
}

impl<CtxT> SchemaType<CtxT> {
    /// Construct a new schema from the provided root type names and type
    /// metadata
    ///
    /// The built-in scalars and the introspection types are registered
    /// automatically, `__schema` and `__type` fields are attached to the
    /// query root, and every type reference reachable from a field,
    /// argument, input field, interface list, or union member list is
    /// verified to resolve.
    pub fn new(
        query_type_name: &str,
        mutation_type_name: Option<&str>,
        subscription_type_name: Option<&str>,
        user_types: Vec<MetaType<CtxT>>,
    ) -> Result<SchemaType<CtxT>, SchemaError> {
        let mut types = IndexMap::new();

        for meta_type in crate::types::scalars::builtin_scalars() {
            insert_unique(&mut types, meta_type)?;
        }

        for meta_type in user_types {
            insert_unique(&mut types, meta_type)?;
        }

        check_root_type(&types, query_type_name)?;
        if let Some(name) = mutation_type_name {
            check_root_type(&types, name)?;
        }
        if let Some(name) = subscription_type_name {
            check_root_type(&types, name)?;
        }

        let mut directives = IndexMap::new();
        directives.insert("skip".to_owned(), DirectiveType::new_skip());
        directives.insert("include".to_owned(), DirectiveType::new_include());

        let mut schema = SchemaType {
            types,
            query_type_name: query_type_name.into(),
            mutation_type_name: mutation_type_name.map(Into::into),
            subscription_type_name: subscription_type_name.map(Into::into),
            directives,
        };

        attach_introspection(&mut schema)?;

        schema.link_check()?;

        Ok(schema)
    }

    /// Verify that every type reference reachable from the registered types
    /// and directives resolves to a registered type.
    fn link_check(&self) -> Result<(), SchemaError> {
        for meta_type in self.types.values() {
            let owner = meta_type.name().unwrap_or("<unnamed>");

            match *meta_type {
                MetaType::Object(ObjectMeta {
                    ref fields,
                    ref interface_names,
                    ..
                }) => {
                    for field in fields {
                        self.check_field_references(owner, &field.field_type, &field.arguments)?;
                    }
                    for interface_name in interface_names {
                        self.check_reference(owner, interface_name)?;
                    }
                }
                MetaType::Interface(ref interface) => {
                    for field in &interface.fields {
                        self.check_field_references(owner, &field.field_type, &field.arguments)?;
                    }
                }
                MetaType::Union(UnionMeta {
                    ref of_type_names, ..
                }) => {
                    for member in of_type_names {
                        self.check_reference(owner, member)?;
                    }
                }
                MetaType::InputObject(ref input_object) => {
                    for input_field in &input_object.input_fields {
                        self.check_reference(owner, input_field.arg_type.innermost_name())?;
                    }
                }
                MetaType::Scalar(_) | MetaType::Enum(_) => {}
            }
        }

        for directive in self.directives.values() {
            for argument in &directive.arguments {
                self.check_reference(&directive.name, argument.arg_type.innermost_name())?;
            }
        }

        Ok(())
    }

    fn check_field_references(
        &self,
        owner: &str,
        field_type: &Type,
        arguments: &Option<Vec<Argument>>,
    ) -> Result<(), SchemaError> {
        self.check_reference(owner, field_type.innermost_name())?;

        if let Some(arguments) = arguments {
            for argument in arguments {
                self.check_reference(owner, argument.arg_type.innermost_name())?;
            }
        }

        Ok(())
    }

    fn check_reference(&self, owner: &str, name: &str) -> Result<(), SchemaError> {
        if self.types.contains_key(name) {
            Ok(())
        } else {
            Err(SchemaError::UnresolvedType(name.into(), owner.into()))
        }
    }

    /// Access a registered type by name
    pub fn concrete_type_by_name(&self, name: &str) -> Option<&MetaType<CtxT>> {
        self.types.get(name)
    }

    /// The name of the query root type
    pub fn query_type_name(&self) -> &str {
        &self.query_type_name
    }

    /// The name of the mutation root type, if any
    pub fn mutation_type_name(&self) -> Option<&str> {
        self.mutation_type_name.as_deref()
    }

    /// The name of the subscription root type, if any
    pub fn subscription_type_name(&self) -> Option<&str> {
        self.subscription_type_name.as_deref()
    }

    /// The query root type
    pub fn concrete_query_type(&self) -> &MetaType<CtxT> {
        self.types
            .get(&self.query_type_name)
            .expect("Query type does not exist in schema")
    }

    /// All registered types, in registration order
    pub fn concrete_type_list(&self) -> Vec<&MetaType<CtxT>> {
        self.types.values().collect()
    }

    /// All registered directives, in registration order
    pub fn directive_list(&self) -> Vec<&DirectiveType> {
        self.directives.values().collect()
    }

    /// Access a directive by name
    pub fn directive_by_name(&self, name: &str) -> Option<&DirectiveType> {
        self.directives.get(name)
    }

    /// The possible concrete object types of an abstract type
    ///
    /// For unions this is the declared member list; for interfaces it is
    /// every object type declaring the interface. Returns an empty list for
    /// concrete types.
    pub fn possible_types(&self, t: &MetaType<CtxT>) -> Vec<&MetaType<CtxT>> {
        match *t {
            MetaType::Union(UnionMeta {
                ref of_type_names, ..
            }) => of_type_names
                .iter()
                .flat_map(|t| self.concrete_type_by_name(t))
                .collect(),
            MetaType::Interface(ref interface) => {
                let name = &interface.name;
                self.types
                    .values()
                    .filter(|t| match **t {
                        MetaType::Object(ObjectMeta {
                            ref interface_names,
                            ..
                        }) => interface_names.iter().any(|iname| iname == name),
                        _ => false,
                    })
                    .collect()
            }
            _ => Vec::new(),
        }
    }

    /// Determines whether `possible_type` is a possible concrete type of
    /// the abstract type `abstract_type`
    pub fn is_possible_type(
        &self,
        abstract_type: &MetaType<CtxT>,
        possible_type: &MetaType<CtxT>,
    ) -> bool {
        self.possible_types(abstract_type)
            .into_iter()
            .any(|t| std::ptr::eq(t, possible_type))
    }

    /// Determines whether the type named `sub_type_name` can stand in for
    /// the type named `super_type_name`
    ///
    /// True when the names are equal, or when the super type is abstract
    /// and the sub type is one of its possible types.
    pub fn is_named_subtype(&self, sub_type_name: &str, super_type_name: &str) -> bool {
        if sub_type_name == super_type_name {
            true
        } else if let (Some(sub_type), Some(super_type)) = (
            self.concrete_type_by_name(sub_type_name),
            self.concrete_type_by_name(super_type_name),
        ) {
            super_type.is_abstract() && self.is_possible_type(super_type, sub_type)
        } else {
            false
        }
    }
}

pub(crate) fn insert_unique<CtxT>(
    types: &mut IndexMap<String, MetaType<CtxT>>,
    meta_type: MetaType<CtxT>,
) -> Result<(), SchemaError> {
    let name = meta_type
        .name()
        .expect("All registered types are named")
        .to_owned();

    if types.contains_key(&name) {
        return Err(SchemaError::DuplicateType(name));
    }

    types.insert(name, meta_type);
    Ok(())
}

fn check_root_type<CtxT>(
    types: &IndexMap<String, MetaType<CtxT>>,
    name: &str,
) -> Result<(), SchemaError> {
    match types.get(name) {
        Some(MetaType::Object(_)) => Ok(()),
        Some(_) => Err(SchemaError::InvalidRootType(name.into())),
        None => Err(SchemaError::UnknownRootType(name.into())),
    }
}

impl DirectiveType {
    /// Construct a new directive with the given name, valid locations, and
    /// arguments
    pub fn new(
        name: &str,
        locations: &[DirectiveLocation],
        arguments: &[Argument],
    ) -> DirectiveType {
        DirectiveType {
            name: name.into(),
            description: None,
            locations: locations.to_vec(),
            arguments: arguments.to_vec(),
        }
    }

    fn new_skip() -> DirectiveType {
        Self::new(
            "skip",
            &[
                DirectiveLocation::Field,
                DirectiveLocation::FragmentSpread,
                DirectiveLocation::InlineFragment,
            ],
            &[Argument::new("if", Type::non_null("Boolean"))],
        )
        .description("Directs the executor to skip this field or fragment when the `if` argument is true.")
    }

    fn new_include() -> DirectiveType {
        Self::new(
            "include",
            &[
                DirectiveLocation::Field,
                DirectiveLocation::FragmentSpread,
                DirectiveLocation::InlineFragment,
            ],
            &[Argument::new("if", Type::non_null("Boolean"))],
        )
        .description("Directs the executor to include this field or fragment only when the `if` argument is true.")
    }

    /// Set the description of the directive
    pub fn description(mut self, description: &str) -> DirectiveType {
        self.description = Some(description.into());
        self
    }
}


impl DirectiveLocation {
    /// The introspection name of the location, e.g. `FRAGMENT_SPREAD`.
    pub fn as_str(&self) -> &'static str {
        match *self {
            DirectiveLocation::Query => "QUERY",
            DirectiveLocation::Mutation => "MUTATION",
            DirectiveLocation::Subscription => "SUBSCRIPTION",
            DirectiveLocation::Field => "FIELD",
            DirectiveLocation::FragmentDefinition => "FRAGMENT_DEFINITION",
            DirectiveLocation::FragmentSpread => "FRAGMENT_SPREAD",
            DirectiveLocation::InlineFragment => "INLINE_FRAGMENT",
            DirectiveLocation::Schema => "SCHEMA",
            DirectiveLocation::Scalar => "SCALAR",
            DirectiveLocation::Object => "OBJECT",
            DirectiveLocation::FieldDefinition => "FIELD_DEFINITION",
            DirectiveLocation::ArgumentDefinition => "ARGUMENT_DEFINITION",
            DirectiveLocation::Interface => "INTERFACE",
            DirectiveLocation::Union => "UNION",
            DirectiveLocation::Enum => "ENUM",
            DirectiveLocation::EnumValue => "ENUM_VALUE",
            DirectiveLocation::InputObject => "INPUT_OBJECT",
            DirectiveLocation::InputFieldDefinition => "INPUT_FIELD_DEFINITION",
        }
    }
}
