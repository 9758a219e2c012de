pub mod config;
pub mod logger;

use validator::ValidationErrors;

/// Flattens a `validator` error set into a single human-readable string
/// suitable for a 400 response body.
pub fn format_validation_errors(errors: &ValidationErrors) -> String {
    errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match e.message.as_ref() {
                Some(m) => m.to_string(),
                None => format!("{} is invalid", field),
            })
        })
        .collect::<Vec<_>>()
        .join("; ")
}
