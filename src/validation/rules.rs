//! The validation rules
//!
//! The validator never fails fast: every rule reports into the shared
//! context and the walk continues, so a request surfaces all of its errors
//! at once. A non-empty error list suppresses execution.

use crate::ast::{
    Definition, Document, Field, Fragment, InlineFragment, Operation, OperationType, Selection,
};
use crate::parser::Spanning;
use crate::validation::ValidatorContext;

/// Validate the document against the schema, accumulating all rule errors
/// into the context
pub fn visit_all_rules<'a, CtxT>(ctx: &mut ValidatorContext<'a, CtxT>, document: &'a Document<'a>) {
    for definition in document {
        match *definition {
            Definition::Operation(ref operation) => validate_operation(ctx, operation),
            Definition::Fragment(ref fragment) => validate_fragment(ctx, fragment),
        }
    }
}

fn validate_operation<'a, CtxT>(
    ctx: &mut ValidatorContext<'a, CtxT>,
    operation: &'a Spanning<Operation<'a>>,
) {
    let root_type_name = match operation.item.operation_type {
        OperationType::Query => Some(ctx.schema.query_type_name().to_owned()),
        OperationType::Mutation => ctx.schema.mutation_type_name().map(ToOwned::to_owned),
        OperationType::Subscription => ctx.schema.subscription_type_name().map(ToOwned::to_owned),
    };

    let root_type_name = match root_type_name {
        Some(name) => name,
        None => {
            ctx.report_error(
                &format!("Schema does not support {}", operation.item.operation_type),
                &[operation.span.start],
            );
            return;
        }
    };

    if let Some(ref definitions) = operation.item.variable_definitions {
        for (name, definition) in definitions.item.iter() {
            let type_name = definition.var_type.item.innermost_name();
            if ctx.schema.concrete_type_by_name(type_name).is_none() {
                ctx.report_error(
                    &format!("Unknown type '{}' for variable '${}'", type_name, name.item),
                    &[definition.var_type.span.start],
                );
            }
        }
    }

    validate_selection_set(ctx, &operation.item.selection_set, &root_type_name);
}

fn validate_fragment<'a, CtxT>(
    ctx: &mut ValidatorContext<'a, CtxT>,
    fragment: &'a Spanning<Fragment<'a>>,
) {
    let type_condition = fragment.item.type_condition.item;

    if ctx.schema.concrete_type_by_name(type_condition).is_none() {
        ctx.report_error(
            &format!(
                "Unknown type '{}' in fragment '{}'",
                type_condition, fragment.item.name.item
            ),
            &[fragment.item.type_condition.span.start],
        );
        return;
    }

    validate_selection_set(ctx, &fragment.item.selection_set, type_condition);
}

fn validate_selection_set<'a, CtxT>(
    ctx: &mut ValidatorContext<'a, CtxT>,
    selection_set: &'a [Selection<'a>],
    parent_type_name: &str,
) {
    for selection in selection_set {
        match *selection {
            Selection::Field(ref field) => validate_field(ctx, field, parent_type_name),
            Selection::InlineFragment(ref fragment) => {
                validate_inline_fragment(ctx, fragment, parent_type_name)
            }
            Selection::FragmentSpread(ref spread) => {
                if !ctx.is_known_fragment(spread.item.name.item) {
                    ctx.report_error(
                        &format!("Unknown fragment '{}'", spread.item.name.item),
                        &[spread.item.name.span.start],
                    );
                }
            }
        }
    }
}

fn validate_inline_fragment<'a, CtxT>(
    ctx: &mut ValidatorContext<'a, CtxT>,
    fragment: &'a Spanning<InlineFragment<'a>>,
    parent_type_name: &str,
) {
    let target_type_name = match fragment.item.type_condition {
        Some(ref type_condition) => {
            if ctx
                .schema
                .concrete_type_by_name(type_condition.item)
                .is_none()
            {
                ctx.report_error(
                    &format!("Unknown type '{}'", type_condition.item),
                    &[type_condition.span.start],
                );
                return;
            }
            type_condition.item
        }
        None => parent_type_name,
    };

    validate_selection_set(ctx, &fragment.item.selection_set, target_type_name);
}

fn validate_field<'a, CtxT>(
    ctx: &mut ValidatorContext<'a, CtxT>,
    field: &'a Spanning<Field<'a>>,
    parent_type_name: &str,
) {
    let field_name = field.item.name.item;

    let parent_type = match ctx.schema.concrete_type_by_name(parent_type_name) {
        Some(parent_type) => parent_type,
        None => return,
    };

    let meta_field = match parent_type.field_by_name(field_name) {
        Some(meta_field) => meta_field,
        None => {
            // The introspection fields are allowed on any composite parent;
            // `__schema` and `__type` only resolve on the query root, where
            // they are registered as ordinary fields.
            if !is_introspection_field(field_name) {
                ctx.report_error(
                    &format!(
                        "Field '{}' does not exist on type '{}'",
                        field_name,
                        parent_type.name().unwrap_or("<unnamed>")
                    ),
                    &[field.item.name.span.start],
                );
            }
            return;
        }
    };

    if let Some(ref arguments) = field.item.arguments {
        for (name, _) in arguments.item.iter() {
            let known = meta_field
                .arguments
                .as_ref()
                .map(|meta_args| meta_args.iter().any(|a| a.name == name.item))
                .unwrap_or(false);

            if !known {
                ctx.report_error(
                    &format!(
                        "Unknown argument '{}' on field '{}'",
                        name.item, field_name
                    ),
                    &[name.span.start],
                );
            }
        }
    }

    if let Some(ref meta_args) = meta_field.arguments {
        for meta_arg in meta_args {
            if meta_arg.arg_type.is_non_null() {
                let provided = field
                    .item
                    .arguments
                    .as_ref()
                    .map(|args| args.item.get(&meta_arg.name).is_some())
                    .unwrap_or(false);

                if !provided {
                    ctx.report_error(
                        &format!(
                            "Missing required argument '{}' on field '{}'",
                            meta_arg.name, field_name
                        ),
                        &[field.item.name.span.start],
                    );
                }
            }
        }
    }

    let field_type_name = meta_field.field_type.innermost_name().to_owned();

    match ctx.schema.concrete_type_by_name(&field_type_name) {
        Some(target) if target.is_composite() => match field.item.selection_set {
            Some(ref selection_set) => {
                validate_selection_set(ctx, selection_set, &field_type_name);
            }
            None => {
                ctx.report_error(
                    &format!(
                        "Field '{field_name}' of type '{field_type_name}' must have a selection \
                         of subfields"
                    ),
                    &[field.item.name.span.start],
                );
            }
        },
        Some(target) if target.is_leaf() => {
            if field.item.selection_set.is_some() {
                ctx.report_error(
                    &format!(
                        "Field '{field_name}' must not have a selection since type \
                         '{field_type_name}' has no subfields"
                    ),
                    &[field.item.name.span.start],
                );
            }
        }
        _ => (),
    }
}

fn is_introspection_field(name: &str) -> bool {
    name == "__typename" || name == "__schema" || name == "__type"
}
