//! Collects `validator` failures into the [`ErrorDetail`] list carried by
//! [`AppError::validation`].

use validator::{Validate, ValidationErrors};

use crate::errors::{AppError, ErrorDetail};

/// Flattens field errors into details, ordered by field name.
pub fn collect_errors(errors: &ValidationErrors) -> Vec<ErrorDetail> {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .into_iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| {
                let message = error
                    .message
                    .as_ref()
                    .map(|msg| msg.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field));
                ErrorDetail::new(message)
            })
        })
        .collect()
}

pub fn validate_input<T: Validate>(input: &T) -> Result<(), AppError> {
    input
        .validate()
        .map_err(|errors| AppError::validation(collect_errors(&errors)))
}
