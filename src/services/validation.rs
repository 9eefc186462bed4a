use crate::models::{
    AuthMode, AuthSettings, FieldValidationError, FormField, FormFieldValues, ValidationErrorSet,
};
use indexmap::IndexMap;
use regex::Regex;

/// A single declarative constraint on one field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    /// Non-empty after trimming whitespace
    Required,
    /// Looks like `local@domain.tld`
    Email,
    /// At least this many characters
    MinLength(usize),
    /// At least this many ASCII digits anywhere in the value
    MinDigits(usize),
    /// Equal to another field's value; the error belongs to the field holding the rule
    Matches(FormField),
}

#[derive(Debug, Clone)]
struct Check {
    rule: Rule,
    message: String,
}

/// Rule set for one form mode.
///
/// Rules on a field are checked in order and the first failure wins, so a
/// field carries at most one message at a time.
#[derive(Debug, Clone)]
pub struct Schema {
    mode: AuthMode,
    fields: IndexMap<FormField, Vec<Check>>,
}

impl Schema {
    /// Build the schema for `mode` from the configured minimums and name field set.
    pub fn for_mode(mode: AuthMode, settings: &AuthSettings) -> Self {
        let mut schema = Self {
            mode,
            fields: IndexMap::new(),
        };

        for field in FormField::fields_for(mode, settings.name_fields) {
            match field {
                FormField::Name => schema.rule(field, Rule::Required, "Name is required"),
                FormField::FirstName => {
                    schema.rule(field, Rule::Required, "First name is required")
                }
                FormField::LastName => schema.rule(field, Rule::Required, "Last name is required"),
                FormField::Email => schema.rule(field, Rule::Email, "Invalid email address"),
                FormField::PhoneNumber => schema.rule(
                    field,
                    Rule::MinDigits(settings.phone_min_digits),
                    &format!(
                        "Phone number must have at least {} digits",
                        settings.phone_min_digits
                    ),
                ),
                FormField::Password => schema.rule(
                    field,
                    Rule::MinLength(settings.password_min_length),
                    &format!(
                        "Password must be at least {} characters",
                        settings.password_min_length
                    ),
                ),
                FormField::ConfirmPassword => schema
                    .rule(field, Rule::Required, "Please confirm your password")
                    .rule(
                        field,
                        Rule::Matches(FormField::Password),
                        "Passwords don't match",
                    ),
            };
        }

        schema
    }

    fn rule(&mut self, field: FormField, rule: Rule, message: &str) -> &mut Self {
        self.fields.entry(field).or_default().push(Check {
            rule,
            message: message.to_string(),
        });
        self
    }

    pub fn mode(&self) -> AuthMode {
        self.mode
    }

    pub fn contains(&self, field: FormField) -> bool {
        self.fields.contains_key(&field)
    }

    /// Fields covered by this schema, in form order
    pub fn fields(&self) -> Vec<FormField> {
        self.fields.keys().copied().collect()
    }

    /// Rules attached to `field`, in evaluation order
    pub fn rules(&self, field: FormField) -> Vec<Rule> {
        self.fields
            .get(&field)
            .map(|checks| checks.iter().map(|c| c.rule.clone()).collect())
            .unwrap_or_default()
    }
}

/// Evaluates a [`Schema`] against form values.
///
/// The email pattern is compiled once at construction.
#[derive(Debug, Clone)]
pub struct SchemaValidator {
    email_pattern: Regex,
}

impl SchemaValidator {
    pub fn new() -> Self {
        Self {
            email_pattern: Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$")
                .expect("Invalid email regex"),
        }
    }

    /// First failing rule for `field`, if any
    pub fn validate_field(
        &self,
        schema: &Schema,
        field: FormField,
        values: &FormFieldValues,
    ) -> Option<FieldValidationError> {
        let checks = schema.fields.get(&field)?;
        let value = values.get(field);

        checks
            .iter()
            .find(|check| !self.passes(&check.rule, value, values))
            .map(|check| FieldValidationError {
                field,
                message: check.message.clone(),
            })
    }

    /// Errors for every field in the schema that currently fails
    pub fn validate(&self, schema: &Schema, values: &FormFieldValues) -> ValidationErrorSet {
        schema
            .fields
            .keys()
            .filter_map(|field| self.validate_field(schema, *field, values))
            .collect()
    }

    fn passes(&self, rule: &Rule, value: &str, values: &FormFieldValues) -> bool {
        match rule {
            Rule::Required => !value.trim().is_empty(),
            Rule::Email => self.email_pattern.is_match(value.trim()),
            Rule::MinLength(min) => value.chars().count() >= *min,
            Rule::MinDigits(min) => value.chars().filter(char::is_ascii_digit).count() >= *min,
            Rule::Matches(other) => value == values.get(*other),
        }
    }
}

impl Default for SchemaValidator {
    fn default() -> Self {
        Self::new()
    }
}
