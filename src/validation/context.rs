use std::collections::HashSet;
use std::fmt;

use crate::ast::{Definition, Document};
use crate::parser::SourcePosition;
use crate::schema::model::SchemaType;

/// Query validation error
#[derive(Clone, Debug, Eq, Ord, PartialEq, PartialOrd)]
pub struct RuleError {
    locations: Vec<SourcePosition>,
    message: String,
}

impl RuleError {
    #[doc(hidden)]
    pub fn new(message: &str, locations: &[SourcePosition]) -> RuleError {
        RuleError {
            message: message.into(),
            locations: locations.to_vec(),
        }
    }

    /// Access the message for a validation error
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Access the positions of the validation error
    ///
    /// All validation errors contain at least one source position.
    pub fn locations(&self) -> &[SourcePosition] {
        &self.locations
    }
}

impl fmt::Display for RuleError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let locations = self
            .locations
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "{}. At {locations}", self.message)
    }
}

impl std::error::Error for RuleError {}

/// Accumulator state shared by the validation rules
#[doc(hidden)]
pub struct ValidatorContext<'a, CtxT> {
    /// The schema the document is validated against
    pub schema: &'a SchemaType<CtxT>,
    errors: Vec<RuleError>,
    fragment_names: HashSet<&'a str>,
}

impl<'a, CtxT> ValidatorContext<'a, CtxT> {
    #[doc(hidden)]
    pub fn new(schema: &'a SchemaType<CtxT>, document: &Document<'a>) -> ValidatorContext<'a, CtxT> {
        ValidatorContext {
            errors: Vec::new(),
            schema,
            fragment_names: document
                .iter()
                .filter_map(|def| match *def {
                    Definition::Fragment(ref frag) => Some(frag.item.name.item),
                    _ => None,
                })
                .collect(),
        }
    }

    #[doc(hidden)]
    pub fn report_error(&mut self, message: &str, locations: &[SourcePosition]) {
        self.errors.push(RuleError::new(message, locations))
    }

    #[doc(hidden)]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    #[doc(hidden)]
    pub fn into_errors(mut self) -> Vec<RuleError> {
        self.errors.sort();
        self.errors
    }

    #[doc(hidden)]
    pub fn is_known_fragment(&self, name: &str) -> bool {
        self.fragment_names.contains(name)
    }
}
