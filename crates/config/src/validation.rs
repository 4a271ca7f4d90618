//! Field validation shared by all settings sections

pub use crate::error::ValidationError;
use std::fmt::Display;

/// A table in the settings file (`[app]`, `[reader]`, `[catalog]`)
pub trait ConfigSection: Default {
    /// Checks every field and reports all failures at once
    fn validate(&self) -> Result<(), Vec<ValidationError>>;

    /// Overwrites this section with `other`
    fn merge(&mut self, other: Self);

    /// Table name used in the settings file
    fn section_name(&self) -> &'static str;
}

pub struct Validator;

impl Validator {
    /// Inclusive range check
    pub fn in_range<T>(value: T, min: T, max: T, field: &str) -> Result<(), ValidationError>
    where
        T: PartialOrd + Display + Copy,
    {
        if value < min || value > max {
            return Err(ValidationError::with_value(
                field,
                format!("must be between {} and {}", min, max),
                value,
            ));
        }
        Ok(())
    }

    pub fn not_empty(value: &str, field: &str) -> Result<(), ValidationError> {
        if value.trim().is_empty() {
            return Err(ValidationError::new(field, "must not be empty"));
        }
        Ok(())
    }

    /// Accepts `value` only if it appears in `allowed`
    pub fn one_of<T>(value: &T, allowed: &[T], field: &str) -> Result<(), ValidationError>
    where
        T: PartialEq + Display,
    {
        if allowed.contains(value) {
            return Ok(());
        }

        let options = allowed
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        Err(ValidationError::with_value(
            field,
            format!("must be one of: {}", options),
            value,
        ))
    }

    /// Turns a list of field results into a section result
    pub fn collect_errors(
        results: impl IntoIterator<Item = Result<(), ValidationError>>,
    ) -> Result<(), Vec<ValidationError>> {
        let errors: Vec<_> = results.into_iter().filter_map(Result::err).collect();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
