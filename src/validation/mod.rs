//! Validation pipeline for submitted entity forms.
//!
//! A form is an ordered list of fields; each field is an ordered list of
//! rules, and each rule is a pure function from the current value to the next
//! value plus an optional error. Every rule of every field runs. A field
//! reports at most one error (its first), and all field errors are returned
//! together with the best-effort draft so a form can be re-rendered in one
//! pass.

pub mod forms;
pub mod rules;

use std::collections::HashMap;

use serde::Serialize;
use utoipa::ToSchema;

pub use forms::Form;
pub use rules::{Checked, Rule};

/// A raw submitted value: one occurrence of a key or several
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Scalar(String),
    List(Vec<String>),
}

/// Raw form submission: field name to submitted value(s)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Submission {
    fields: HashMap<String, FieldValue>,
}

impl Submission {
    /// Build from url-encoded pairs; a repeated key becomes a list
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut fields: HashMap<String, FieldValue> = HashMap::new();
        for (key, value) in pairs {
            let key = key.into();
            let value = value.into();
            let merged = match fields.remove(&key) {
                None => FieldValue::Scalar(value),
                Some(FieldValue::Scalar(first)) => FieldValue::List(vec![first, value]),
                Some(FieldValue::List(mut values)) => {
                    values.push(value);
                    FieldValue::List(values)
                }
            };
            fields.insert(key, merged);
        }
        Self { fields }
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// Single value of a field; the first one if several were sent
    pub fn scalar(&self, name: &str) -> Option<&str> {
        match self.fields.get(name)? {
            FieldValue::Scalar(value) => Some(value),
            FieldValue::List(values) => values.first().map(String::as_str),
        }
    }

    /// Canonical sequence: absent -> empty, scalar -> one element
    pub fn list(&self, name: &str) -> Vec<String> {
        match self.fields.get(name) {
            None => Vec::new(),
            Some(FieldValue::Scalar(value)) => vec![value.clone()],
            Some(FieldValue::List(values)) => values.clone(),
        }
    }
}

/// A failed field rule, as shown next to the form input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FieldError {
    pub field: String,
    pub message: String,
    /// Sanitized value the rule saw
    pub value: String,
}

impl FieldError {
    pub fn new(field: &str, message: &str, value: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
            value: value.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Scalar,
    /// Canonicalized to a sequence; rules apply to every element
    List,
}

/// Declarative rules for one field
pub struct Field {
    pub name: &'static str,
    pub shape: Shape,
    /// Empty input means "no value" and skips every rule
    pub optional: bool,
    pub rules: Vec<Rule>,
}

impl Field {
    pub fn scalar(name: &'static str, rules: Vec<Rule>) -> Self {
        Self {
            name,
            shape: Shape::Scalar,
            optional: false,
            rules,
        }
    }

    pub fn optional(name: &'static str, rules: Vec<Rule>) -> Self {
        Self {
            optional: true,
            ..Self::scalar(name, rules)
        }
    }

    pub fn list(name: &'static str, rules: Vec<Rule>) -> Self {
        Self {
            shape: Shape::List,
            ..Self::scalar(name, rules)
        }
    }

    /// Run every rule in order; keep the final value and the first error
    fn apply(&self, raw: String) -> Checked {
        if self.optional && raw.is_empty() {
            return Checked::ok(raw);
        }
        let mut value = raw;
        let mut first_error = None;
        for rule in &self.rules {
            let checked = rule(value);
            value = checked.value;
            if first_error.is_none() {
                first_error = checked.error;
            }
        }
        Checked {
            value,
            error: first_error,
        }
    }
}

/// Sanitized field values, after every rule ran
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sanitized {
    values: HashMap<&'static str, Vec<String>>,
}

impl Sanitized {
    /// Scalar value; empty when absent
    pub fn get(&self, name: &str) -> &str {
        self.values
            .get(name)
            .and_then(|v| v.first())
            .map(String::as_str)
            .unwrap_or_default()
    }

    pub fn list(&self, name: &str) -> &[String] {
        self.values.get(name).map(Vec::as_slice).unwrap_or_default()
    }
}

/// Outcome of validating a submission for entity type `T`
#[derive(Debug, Clone, PartialEq)]
pub enum Validated<T> {
    Valid(T),
    /// `draft` is the best-effort parse, used to re-populate the form
    Invalid { draft: T, errors: Vec<FieldError> },
}

impl<T> Validated<T> {
    pub fn is_valid(&self) -> bool {
        matches!(self, Validated::Valid(_))
    }

    pub fn entity(&self) -> &T {
        match self {
            Validated::Valid(entity) => entity,
            Validated::Invalid { draft, .. } => draft,
        }
    }

    pub fn errors(&self) -> &[FieldError] {
        match self {
            Validated::Valid(_) => &[],
            Validated::Invalid { errors, .. } => errors,
        }
    }
}

/// Run the form rules of `T` over a submission
pub fn validate<T: Form>(submission: &Submission) -> Validated<T> {
    let mut sanitized = Sanitized::default();
    let mut errors = Vec::new();

    for field in T::fields() {
        let raw = match field.shape {
            Shape::Scalar => vec![submission.scalar(field.name).unwrap_or_default().to_string()],
            Shape::List => submission.list(field.name),
        };

        let mut values = Vec::with_capacity(raw.len());
        let mut field_error: Option<FieldError> = None;
        for value in raw {
            let checked = field.apply(value);
            if field_error.is_none() {
                if let Some(message) = checked.error {
                    field_error = Some(FieldError::new(field.name, &message, &checked.value));
                }
            }
            values.push(checked.value);
        }

        errors.extend(field_error);
        sanitized.values.insert(field.name, values);
    }

    let entity = T::from_sanitized(&sanitized);
    for error in entity.cross_check() {
        if !errors.iter().any(|e| e.field == error.field) {
            errors.push(error);
        }
    }

    if errors.is_empty() {
        Validated::Valid(entity)
    } else {
        Validated::Invalid {
            draft: entity,
            errors,
        }
    }
}
