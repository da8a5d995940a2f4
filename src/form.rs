//! Form bodies sent with POST requests
use core::fmt::Display;

use serde::Serialize;

use crate::error::InvalidArgument;

/// Ordered list of form fields. A name can appear several times (e.g. `scopes[]`).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Form(Vec<(String, String)>);

impl Form {
    /// Creates an empty [`Form`]
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Adds `name` to the form with the trimmed textual representation of `value`
    ///
    /// A `None` value is skipped unless `required` is set. A required value that is
    /// blank once trimmed is rejected the same way.
    ///
    /// # Errors
    ///
    /// [`InvalidArgument`] if `required` is set and `value` is `None` or blank.
    /// The form is left untouched.
    pub fn add_param<T: Display>(
        &mut self,
        name: &str,
        value: Option<T>,
        required: bool,
    ) -> Result<(), InvalidArgument> {
        let Some(value) = value else {
            return if required {
                Err(InvalidArgument {
                    name: name.to_owned(),
                })
            } else {
                Ok(())
            };
        };

        let text = value.to_string();
        let trimmed = text.trim();
        if required && trimmed.is_empty() {
            return Err(InvalidArgument {
                name: name.to_owned(),
            });
        }

        self.0.push((name.to_owned(), trimmed.to_owned()));
        Ok(())
    }

    /// Same as [`Form::add_param`] with `required` unset, which can't fail
    pub fn add_optional<T: Display>(&mut self, name: &str, value: Option<T>) {
        if let Some(value) = value {
            self.0.push((name.to_owned(), value.to_string().trim().to_owned()));
        }
    }

    /// Fields added so far
    #[must_use]
    pub fn fields(&self) -> &[(String, String)] {
        &self.0
    }

    /// `true` if no field has been added
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
