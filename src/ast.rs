use std::{collections::HashMap, fmt, slice, vec};

use crate::executor::Variables;
use crate::parser::Spanning;

/// A type literal in the syntax tree
///
/// This enum carries no semantic information and might refer to types that do
/// not exist. The name parameter is borrowed (`&str`) in parsed documents and
/// owned (`String`) in schema metadata.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum Type<N = String> {
    /// A nullable named type, e.g. `String`
    Named(N),
    /// A nullable list type, e.g. `[String]`
    ///
    /// The list itself is what's nullable, the contained type might be non-null.
    List(Box<Type<N>>),
    /// A non-null named type, e.g. `String!`
    NonNullNamed(N),
    /// A non-null list type, e.g. `[String]!`.
    ///
    /// The list itself is what's non-null, the contained type might be null.
    NonNullList(Box<Type<N>>),
}

impl<N: AsRef<str>> Type<N> {
    /// Get the name of a named type.
    ///
    /// Only applies to named types; lists will return `None`.
    pub fn name(&self) -> Option<&str> {
        match *self {
            Type::Named(ref n) | Type::NonNullNamed(ref n) => Some(n.as_ref()),
            _ => None,
        }
    }

    /// Get the innermost name by unpacking lists
    ///
    /// All type literals contain exactly one named type.
    pub fn innermost_name(&self) -> &str {
        match *self {
            Type::Named(ref n) | Type::NonNullNamed(ref n) => n.as_ref(),
            Type::List(ref l) | Type::NonNullList(ref l) => l.innermost_name(),
        }
    }

    /// Determines if a type only can represent non-null values.
    pub fn is_non_null(&self) -> bool {
        matches!(*self, Type::NonNullNamed(_) | Type::NonNullList(_))
    }
}

impl<N: Into<String>> Type<N> {
    /// Convert the type literal into one owning its name.
    pub fn into_owned(self) -> Type {
        match self {
            Type::Named(n) => Type::Named(n.into()),
            Type::NonNullNamed(n) => Type::NonNullNamed(n.into()),
            Type::List(inner) => Type::List(Box::new(inner.into_owned())),
            Type::NonNullList(inner) => Type::NonNullList(Box::new(inner.into_owned())),
        }
    }
}

impl Type {
    /// Construct a nullable named type.
    pub fn named<S: Into<String>>(name: S) -> Type {
        Type::Named(name.into())
    }

    /// Construct a non-null named type.
    pub fn non_null<S: Into<String>>(name: S) -> Type {
        Type::NonNullNamed(name.into())
    }

    /// Construct a nullable list of the given type.
    pub fn list(of_type: Type) -> Type {
        Type::List(Box::new(of_type))
    }

    /// Construct a non-null list of the given type.
    pub fn non_null_list(of_type: Type) -> Type {
        Type::NonNullList(Box::new(of_type))
    }
}

impl<N: AsRef<str>> fmt::Display for Type<N> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Type::Named(ref n) => write!(f, "{}", n.as_ref()),
            Type::NonNullNamed(ref n) => write!(f, "{}!", n.as_ref()),
            Type::List(ref t) => write!(f, "[{t}]"),
            Type::NonNullList(ref t) => write!(f, "[{t}]!"),
        }
    }
}

/// A JSON-like value that can be passed into the query execution, either
/// out-of-band, or in-band as default variable values. These are _not_
/// constant and might contain variables.
///
/// List and object variants are _spanned_, i.e. they contain a reference to
/// their position in the source file, if available.
#[derive(Clone, PartialEq, Debug)]
#[allow(missing_docs)]
pub enum InputValue {
    Null,
    Int(i64),
    Float(f64),
    String(String),
    Boolean(bool),
    Enum(String),
    Variable(String),
    List(Vec<Spanning<InputValue>>),
    Object(Vec<(Spanning<String>, Spanning<InputValue>)>),
}

/// Parse an unstructured input value into a Rust data type.
///
/// The conversion _can_ fail, and must in that case return `None`. Used by
/// [`Arguments::get`](crate::Arguments::get) to hand resolver code typed
/// argument values.
pub trait FromInputValue: Sized {
    /// Performs the conversion.
    fn from_input_value(v: &InputValue) -> Option<Self>;
}

/// Losslessly clones a Rust data type into an [`InputValue`].
pub trait ToInputValue: Sized {
    /// Performs the conversion.
    fn to_input_value(&self) -> InputValue;
}

impl InputValue {
    /// Construct a null value.
    pub fn null() -> InputValue {
        InputValue::Null
    }

    /// Construct an integer value.
    pub fn int(i: i64) -> InputValue {
        InputValue::Int(i)
    }

    /// Construct a floating point value.
    pub fn float(f: f64) -> InputValue {
        InputValue::Float(f)
    }

    /// Construct a boolean value.
    pub fn boolean(b: bool) -> InputValue {
        InputValue::Boolean(b)
    }

    /// Construct a string value.
    pub fn string<T: AsRef<str>>(s: T) -> InputValue {
        InputValue::String(s.as_ref().to_owned())
    }

    /// Construct an enum value.
    pub fn enum_value<T: AsRef<str>>(s: T) -> InputValue {
        InputValue::Enum(s.as_ref().to_owned())
    }

    /// Construct a variable value.
    pub fn variable<T: AsRef<str>>(v: T) -> InputValue {
        InputValue::Variable(v.as_ref().to_owned())
    }

    /// Construct an unlocated list.
    ///
    /// Convenience function to make each [`InputValue`] in the input vector
    /// not contain any location information. Can be used from `ToInputValue`
    /// implementations, where no source code position information is
    /// available.
    pub fn list(l: Vec<InputValue>) -> InputValue {
        InputValue::List(l.into_iter().map(Spanning::unlocated).collect())
    }

    /// Construct a located list.
    pub fn parsed_list(l: Vec<Spanning<InputValue>>) -> InputValue {
        InputValue::List(l)
    }

    /// Construct an unlocated object.
    ///
    /// Similar to [`InputValue::list`], it makes each key and value in the
    /// given pair list not contain any location information.
    pub fn object<K>(o: Vec<(K, InputValue)>) -> InputValue
    where
        K: AsRef<str>,
    {
        InputValue::Object(
            o.into_iter()
                .map(|(k, v)| {
                    (
                        Spanning::unlocated(k.as_ref().to_owned()),
                        Spanning::unlocated(v),
                    )
                })
                .collect(),
        )
    }

    /// Construct a located object.
    pub fn parsed_object(o: Vec<(Spanning<String>, Spanning<InputValue>)>) -> InputValue {
        InputValue::Object(o)
    }

    /// Resolve all variables to their values.
    pub fn into_const(self, vars: &Variables) -> InputValue {
        match self {
            InputValue::Variable(v) => vars.get(&v).map_or_else(InputValue::null, Clone::clone),
            InputValue::List(l) => InputValue::List(
                l.into_iter()
                    .map(|s| s.map(|v| v.into_const(vars)))
                    .collect(),
            ),
            InputValue::Object(o) => InputValue::Object(
                o.into_iter()
                    .map(|(sk, sv)| (sk, sv.map(|v| v.into_const(vars))))
                    .collect(),
            ),
            v => v,
        }
    }

    /// Shorthand form of invoking [`FromInputValue::from_input_value`].
    pub fn convert<T>(&self) -> Option<T>
    where
        T: FromInputValue,
    {
        <T as FromInputValue>::from_input_value(self)
    }

    /// Does the value represent null?
    pub fn is_null(&self) -> bool {
        matches!(*self, InputValue::Null)
    }

    /// Does the value represent a variable?
    pub fn is_variable(&self) -> bool {
        matches!(*self, InputValue::Variable(_))
    }

    /// View the underlying enum value, if present.
    pub fn as_enum_value(&self) -> Option<&str> {
        match *self {
            InputValue::Enum(ref e) => Some(e),
            _ => None,
        }
    }

    /// View the underlying int value, if present.
    pub fn as_int_value(&self) -> Option<i64> {
        match *self {
            InputValue::Int(i) => Some(i),
            _ => None,
        }
    }

    /// View the underlying float value, if present.
    pub fn as_float_value(&self) -> Option<f64> {
        match *self {
            InputValue::Float(f) => Some(f),
            _ => None,
        }
    }

    /// View the underlying string value, if present.
    pub fn as_string_value(&self) -> Option<&str> {
        match *self {
            InputValue::String(ref s) => Some(s),
            _ => None,
        }
    }

    /// Convert the input value to an unlocated object value.
    ///
    /// This constructs a new hashmap that contains references to the keys
    /// and values in `self`.
    pub fn to_object_value(&self) -> Option<HashMap<&str, &InputValue>> {
        match *self {
            InputValue::Object(ref o) => Some(
                o.iter()
                    .map(|(sk, sv)| (sk.item.as_str(), &sv.item))
                    .collect(),
            ),
            _ => None,
        }
    }

    /// Convert the input value to an unlocated list value.
    ///
    /// This constructs a new vector that contains references to the values
    /// in `self`.
    pub fn to_list_value(&self) -> Option<Vec<&InputValue>> {
        match *self {
            InputValue::List(ref l) => Some(l.iter().map(|s| &s.item).collect()),
            _ => None,
        }
    }

    /// Compare equality with another [`InputValue`] ignoring any source
    /// position information.
    pub fn unlocated_eq(&self, other: &InputValue) -> bool {
        use crate::ast::InputValue::*;

        match (self, other) {
            (&Null, &Null) => true,
            (&Int(i1), &Int(i2)) => i1 == i2,
            (&Float(f1), &Float(f2)) => f1 == f2,
            (&String(ref s1), &String(ref s2))
            | (&Enum(ref s1), &Enum(ref s2))
            | (&Variable(ref s1), &Variable(ref s2)) => s1 == s2,
            (&Boolean(b1), &Boolean(b2)) => b1 == b2,
            (&List(ref l1), &List(ref l2)) => {
                l1.len() == l2.len()
                    && l1
                        .iter()
                        .zip(l2.iter())
                        .all(|(v1, v2)| v1.item.unlocated_eq(&v2.item))
            }
            (&Object(ref o1), &Object(ref o2)) => {
                o1.len() == o2.len()
                    && o1.iter().all(|(sk1, sv1)| {
                        o2.iter().any(|(sk2, sv2)| {
                            sk1.item == sk2.item && sv1.item.unlocated_eq(&sv2.item)
                        })
                    })
            }
            _ => false,
        }
    }
}

impl fmt::Display for InputValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            InputValue::Null => write!(f, "null"),
            InputValue::Int(i) => write!(f, "{i}"),
            InputValue::Float(v) => write!(f, "{v}"),
            InputValue::String(ref s) => {
                write!(f, "\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
            }
            InputValue::Boolean(b) => write!(f, "{b}"),
            InputValue::Enum(ref e) => write!(f, "{e}"),
            InputValue::Variable(ref v) => write!(f, "${v}"),
            InputValue::List(ref l) => {
                write!(f, "[")?;
                for (i, v) in l.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", v.item)?;
                }
                write!(f, "]")
            }
            InputValue::Object(ref o) => {
                write!(f, "{{")?;
                for (i, (k, v)) in o.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", k.item, v.item)?;
                }
                write!(f, "}}")
            }
        }
    }
}

#[derive(Clone, PartialEq, Debug)]
#[allow(missing_docs)]
pub struct VariableDefinition<'a> {
    pub var_type: Spanning<Type<&'a str>>,
    pub default_value: Option<Spanning<InputValue>>,
    pub directives: Option<Vec<Spanning<Directive<'a>>>>,
}

#[derive(Clone, PartialEq, Debug)]
#[allow(missing_docs)]
pub struct Arguments<'a> {
    pub items: Vec<(Spanning<&'a str>, Spanning<InputValue>)>,
}

#[derive(Clone, PartialEq, Debug)]
#[allow(missing_docs)]
pub struct VariableDefinitions<'a> {
    pub items: Vec<(Spanning<&'a str>, VariableDefinition<'a>)>,
}

#[derive(Clone, PartialEq, Debug)]
#[allow(missing_docs)]
pub struct Field<'a> {
    pub alias: Option<Spanning<&'a str>>,
    pub name: Spanning<&'a str>,
    pub arguments: Option<Spanning<Arguments<'a>>>,
    pub directives: Option<Vec<Spanning<Directive<'a>>>>,
    pub selection_set: Option<Vec<Selection<'a>>>,
}

#[derive(Clone, PartialEq, Debug)]
#[allow(missing_docs)]
pub struct FragmentSpread<'a> {
    pub name: Spanning<&'a str>,
    pub directives: Option<Vec<Spanning<Directive<'a>>>>,
}

#[derive(Clone, PartialEq, Debug)]
#[allow(missing_docs)]
pub struct InlineFragment<'a> {
    pub type_condition: Option<Spanning<&'a str>>,
    pub directives: Option<Vec<Spanning<Directive<'a>>>>,
    pub selection_set: Vec<Selection<'a>>,
}

/// Entry in a GraphQL selection set
///
/// This enum represents one of the three variants of a selection that exists
/// in GraphQL: a field, a fragment spread, or an inline fragment. Each of the
/// variants references their location in the query source.
///
/// ```text
/// {
///   field(withArg: 123) { subField }
///   ...fragmentSpread
///   ...on User {
///     inlineFragmentField
///   }
/// }
/// ```
#[derive(Clone, PartialEq, Debug)]
#[allow(missing_docs)]
pub enum Selection<'a> {
    Field(Spanning<Field<'a>>),
    FragmentSpread(Spanning<FragmentSpread<'a>>),
    InlineFragment(Spanning<InlineFragment<'a>>),
}

#[derive(Clone, PartialEq, Debug)]
#[allow(missing_docs)]
pub struct Directive<'a> {
    pub name: Spanning<&'a str>,
    pub arguments: Option<Spanning<Arguments<'a>>>,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[allow(missing_docs)]
pub enum OperationType {
    Query,
    Mutation,
    Subscription,
}

#[derive(Clone, PartialEq, Debug)]
#[allow(missing_docs)]
pub struct Operation<'a> {
    pub operation_type: OperationType,
    pub name: Option<Spanning<&'a str>>,
    pub variable_definitions: Option<Spanning<VariableDefinitions<'a>>>,
    pub directives: Option<Vec<Spanning<Directive<'a>>>>,
    pub selection_set: Vec<Selection<'a>>,
}

#[derive(Clone, PartialEq, Debug)]
#[allow(missing_docs)]
pub struct Fragment<'a> {
    pub name: Spanning<&'a str>,
    pub type_condition: Spanning<&'a str>,
    pub directives: Option<Vec<Spanning<Directive<'a>>>>,
    pub selection_set: Vec<Selection<'a>>,
}

#[derive(Clone, PartialEq, Debug)]
#[allow(missing_docs)]
pub enum Definition<'a> {
    Operation(Spanning<Operation<'a>>),
    Fragment(Spanning<Fragment<'a>>),
}

#[doc(hidden)]
pub type Document<'a> = Vec<Definition<'a>>;

impl fmt::Display for OperationType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match *self {
            OperationType::Query => "query",
            OperationType::Mutation => "mutation",
            OperationType::Subscription => "subscription",
        })
    }
}

impl<'a> Arguments<'a> {
    #[doc(hidden)]
    pub fn into_iter(self) -> vec::IntoIter<(Spanning<&'a str>, Spanning<InputValue>)> {
        self.items.into_iter()
    }

    #[doc(hidden)]
    pub fn iter(&self) -> slice::Iter<(Spanning<&'a str>, Spanning<InputValue>)> {
        self.items.iter()
    }

    #[doc(hidden)]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[doc(hidden)]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[doc(hidden)]
    pub fn get(&self, key: &str) -> Option<&Spanning<InputValue>> {
        self.items
            .iter()
            .filter(|&(k, _)| k.item == key)
            .map(|(_, v)| v)
            .next()
    }
}

impl<'a> VariableDefinitions<'a> {
    #[doc(hidden)]
    pub fn iter(&self) -> slice::Iter<(Spanning<&'a str>, VariableDefinition)> {
        self.items.iter()
    }
}
