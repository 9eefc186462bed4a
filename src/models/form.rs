use crate::models::config::NameFields;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Which credential form is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AuthMode {
    #[default]
    SignIn,
    SignUp,
}

impl AuthMode {
    pub fn toggled(self) -> Self {
        match self {
            AuthMode::SignIn => AuthMode::SignUp,
            AuthMode::SignUp => AuthMode::SignIn,
        }
    }
}

/// Inputs that appear on the sign-in and sign-up forms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FormField {
    Name,
    FirstName,
    LastName,
    Email,
    PhoneNumber,
    Password,
    ConfirmPassword,
}

impl FormField {
    /// Field name as the form markup knows it
    pub fn as_str(self) -> &'static str {
        match self {
            FormField::Name => "name",
            FormField::FirstName => "firstName",
            FormField::LastName => "lastName",
            FormField::Email => "email",
            FormField::PhoneNumber => "phoneNumber",
            FormField::Password => "password",
            FormField::ConfirmPassword => "confirmPassword",
        }
    }

    pub fn is_secret(self) -> bool {
        matches!(self, FormField::Password | FormField::ConfirmPassword)
    }

    /// Fields rendered for `mode`, in display order
    pub fn fields_for(mode: AuthMode, name_fields: NameFields) -> Vec<FormField> {
        match mode {
            AuthMode::SignIn => vec![FormField::Email, FormField::Password],
            AuthMode::SignUp => {
                let mut fields = match name_fields {
                    NameFields::Split => vec![FormField::FirstName, FormField::LastName],
                    NameFields::Single => vec![FormField::Name],
                };
                fields.extend([
                    FormField::Email,
                    FormField::PhoneNumber,
                    FormField::Password,
                    FormField::ConfirmPassword,
                ]);
                fields
            }
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Current text of every input on the active form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFieldValues {
    values: IndexMap<FormField, String>,
}

impl FormFieldValues {
    /// All-empty values for the given field set
    pub fn empty(fields: &[FormField]) -> Self {
        Self {
            values: fields.iter().map(|f| (*f, String::new())).collect(),
        }
    }

    pub fn contains(&self, field: FormField) -> bool {
        self.values.contains_key(&field)
    }

    /// Value of `field`, or `""` when the field is not on this form
    pub fn get(&self, field: FormField) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or("")
    }

    /// Returns false when `field` is not on this form.
    pub fn set(&mut self, field: FormField, value: impl Into<String>) -> bool {
        match self.values.get_mut(&field) {
            Some(slot) => {
                *slot = value.into();
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        for value in self.values.values_mut() {
            value.clear();
        }
    }

    pub fn is_all_empty(&self) -> bool {
        self.values.values().all(String::is_empty)
    }

    pub fn fields(&self) -> impl Iterator<Item = FormField> + '_ {
        self.values.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FormField, &str)> {
        self.values.iter().map(|(f, v)| (*f, v.as_str()))
    }
}

/// A single field failing its validation rule
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{field}: {message}")]
pub struct FieldValidationError {
    pub field: FormField,
    pub message: String,
}

/// Field-level validation failures, keyed by field in form order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrorSet {
    errors: IndexMap<FormField, String>,
}

impl ValidationErrorSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, error: FieldValidationError) {
        self.errors.insert(error.field, error.message);
    }

    pub fn get(&self, field: FormField) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: FormField) -> bool {
        self.errors.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn fields(&self) -> Vec<FormField> {
        self.errors.keys().copied().collect()
    }

    /// Keep only errors whose field satisfies `keep`
    pub fn retain(&mut self, mut keep: impl FnMut(FormField) -> bool) {
        self.errors.retain(|field, _| keep(*field));
    }

    pub fn iter(&self) -> impl Iterator<Item = FieldValidationError> + '_ {
        self.errors.iter().map(|(field, message)| FieldValidationError {
            field: *field,
            message: message.clone(),
        })
    }
}

impl FromIterator<FieldValidationError> for ValidationErrorSet {
    fn from_iter<I: IntoIterator<Item = FieldValidationError>>(iter: I) -> Self {
        let mut set = Self::new();
        for error in iter {
            set.insert(error);
        }
        set
    }
}

/// Simulated submission lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Submitting,
    Success,
}

/// Validated values handed to the surrounding application
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub mode: AuthMode,
    pub values: FormFieldValues,
}
