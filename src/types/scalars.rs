use std::fmt;

use crate::ast::{FromInputValue, InputValue, ToInputValue};
use crate::schema::meta::{MetaType, ScalarMeta};
use crate::value::Value;

/// An ID as defined by the GraphQL specification
///
/// Represented as a string, but can be converted _from_ integer input values
/// as well.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct ID(String);

impl ID {
    /// Construct a new ID from anything implementing `Into<String>`
    pub fn new<S: Into<String>>(value: S) -> Self {
        ID(value.into())
    }
}

impl From<String> for ID {
    fn from(s: String) -> ID {
        ID(s)
    }
}

impl fmt::Display for ID {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromInputValue for ID {
    fn from_input_value(v: &InputValue) -> Option<ID> {
        match *v {
            InputValue::String(ref s) => Some(ID(s.clone())),
            InputValue::Int(i) => Some(ID(i.to_string())),
            _ => None,
        }
    }
}

impl ToInputValue for ID {
    fn to_input_value(&self) -> InputValue {
        InputValue::string(&self.0)
    }
}

impl FromInputValue for String {
    fn from_input_value(v: &InputValue) -> Option<String> {
        match *v {
            InputValue::String(ref s) => Some(s.clone()),
            _ => None,
        }
    }
}

impl ToInputValue for String {
    fn to_input_value(&self) -> InputValue {
        InputValue::string(self)
    }
}

impl FromInputValue for i64 {
    fn from_input_value(v: &InputValue) -> Option<i64> {
        v.as_int_value()
    }
}

impl ToInputValue for i64 {
    fn to_input_value(&self) -> InputValue {
        InputValue::int(*self)
    }
}

impl FromInputValue for f64 {
    fn from_input_value(v: &InputValue) -> Option<f64> {
        match *v {
            InputValue::Int(i) => Some(i as f64),
            InputValue::Float(f) => Some(f),
            _ => None,
        }
    }
}

impl ToInputValue for f64 {
    fn to_input_value(&self) -> InputValue {
        InputValue::float(*self)
    }
}

impl FromInputValue for bool {
    fn from_input_value(v: &InputValue) -> Option<bool> {
        match *v {
            InputValue::Boolean(b) => Some(b),
            _ => None,
        }
    }
}

impl ToInputValue for bool {
    fn to_input_value(&self) -> InputValue {
        InputValue::boolean(*self)
    }
}

impl<T: FromInputValue> FromInputValue for Option<T> {
    fn from_input_value(v: &InputValue) -> Option<Option<T>> {
        match *v {
            InputValue::Null => Some(None),
            ref v => T::from_input_value(v).map(Some),
        }
    }
}

impl<T: ToInputValue> ToInputValue for Option<T> {
    fn to_input_value(&self) -> InputValue {
        match *self {
            Some(ref v) => v.to_input_value(),
            None => InputValue::null(),
        }
    }
}

impl<T: FromInputValue> FromInputValue for Vec<T> {
    fn from_input_value(v: &InputValue) -> Option<Vec<T>> {
        match *v {
            InputValue::List(ref l) => l.iter().map(|e| T::from_input_value(&e.item)).collect(),
            // Single values are lifted to a single-element list.
            ref other => T::from_input_value(other).map(|e| vec![e]),
        }
    }
}

impl<T: ToInputValue> ToInputValue for Vec<T> {
    fn to_input_value(&self) -> InputValue {
        InputValue::list(self.iter().map(T::to_input_value).collect())
    }
}

/// Construct the metadata for the five built-in scalar types.
///
/// The returned metadata implements the contractual coercions of the
/// GraphQL specification: `serialize` shapes resolved output values,
/// `parse_value` coerces runtime input values, and `parse_literal` coerces
/// query literals.
pub fn builtin_scalars<CtxT>() -> Vec<MetaType<CtxT>> {
    vec![
        ScalarMeta::new("Int")
            .serialize_fn(|v| match *v {
                Value::Int(i) => Ok(Value::Int(i)),
                Value::Float(f) if f.fract() == 0.0 => Ok(Value::Int(f as i64)),
                ref other => Err(format!("Int cannot represent {} value", other.type_name())),
            })
            .parse_value_fn(|v| match *v {
                InputValue::Int(i) => Ok(InputValue::Int(i)),
                InputValue::Float(f) if f.fract() == 0.0 => Ok(InputValue::Int(f as i64)),
                ref other => Err(format!("Int cannot represent value: {other}")),
            })
            .parse_literal_fn(|v| match *v {
                InputValue::Int(i) => Ok(InputValue::Int(i)),
                ref other => Err(format!("Int cannot represent value: {other}")),
            })
            .into_meta(),
        ScalarMeta::new("Float")
            .serialize_fn(|v| match *v {
                Value::Int(i) => Ok(Value::Float(i as f64)),
                Value::Float(f) => Ok(Value::Float(f)),
                ref other => Err(format!("Float cannot represent {} value", other.type_name())),
            })
            .parse_value_fn(float_from_input)
            .parse_literal_fn(float_from_input)
            .into_meta(),
        ScalarMeta::new("String")
            .serialize_fn(|v| match *v {
                Value::String(ref s) => Ok(Value::String(s.clone())),
                Value::Int(i) => Ok(Value::String(i.to_string())),
                Value::Float(f) => Ok(Value::String(f.to_string())),
                Value::Boolean(b) => Ok(Value::String(b.to_string())),
                ref other => Err(format!("String cannot represent {} value", other.type_name())),
            })
            .parse_value_fn(string_from_input)
            .parse_literal_fn(string_from_input)
            .into_meta(),
        ScalarMeta::new("Boolean")
            .serialize_fn(|v| match *v {
                Value::Boolean(b) => Ok(Value::Boolean(b)),
                Value::Int(i) => Ok(Value::Boolean(i != 0)),
                ref other => Err(format!(
                    "Boolean cannot represent {} value",
                    other.type_name()
                )),
            })
            .parse_value_fn(boolean_from_input)
            .parse_literal_fn(boolean_from_input)
            .into_meta(),
        ScalarMeta::new("ID")
            .serialize_fn(|v| match *v {
                Value::String(ref s) => Ok(Value::String(s.clone())),
                Value::Int(i) => Ok(Value::String(i.to_string())),
                ref other => Err(format!("ID cannot represent {} value", other.type_name())),
            })
            .parse_value_fn(id_from_input)
            .parse_literal_fn(id_from_input)
            .into_meta(),
    ]
}

fn float_from_input(v: &InputValue) -> Result<InputValue, String> {
    match *v {
        InputValue::Int(i) => Ok(InputValue::Float(i as f64)),
        InputValue::Float(f) => Ok(InputValue::Float(f)),
        ref other => Err(format!("Float cannot represent value: {other}")),
    }
}

fn string_from_input(v: &InputValue) -> Result<InputValue, String> {
    match *v {
        InputValue::String(ref s) => Ok(InputValue::String(s.clone())),
        ref other => Err(format!("String cannot represent value: {other}")),
    }
}

fn boolean_from_input(v: &InputValue) -> Result<InputValue, String> {
    match *v {
        InputValue::Boolean(b) => Ok(InputValue::Boolean(b)),
        ref other => Err(format!("Boolean cannot represent value: {other}")),
    }
}

fn id_from_input(v: &InputValue) -> Result<InputValue, String> {
    match *v {
        InputValue::String(ref s) => Ok(InputValue::String(s.clone())),
        InputValue::Int(i) => Ok(InputValue::String(i.to_string())),
        ref other => Err(format!("ID cannot represent value: {other}")),
    }
}
