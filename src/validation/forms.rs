//! Form definitions for each entity type

use super::{
    rules::{alphanumeric, escape, iso_date, max_length, min_length, one_of, parse_date, trim},
    Field, FieldError, Sanitized,
};
use crate::models::{Author, Book, BookInstance, Genre, InstanceStatus};

/// An entity that can be built from a validated form submission
pub trait Form: Sized {
    /// Field rules, in display order
    fn fields() -> Vec<Field>;

    /// Best-effort entity from sanitized values (used even when invalid)
    fn from_sanitized(values: &Sanitized) -> Self;

    /// Rules spanning several fields; fields already in error are not repeated
    fn cross_check(&self) -> Vec<FieldError> {
        Vec::new()
    }
}

const STATUSES: &[&str] = &["Available", "Maintenance", "Loaned", "Reserved"];

impl Form for Genre {
    fn fields() -> Vec<Field> {
        vec![Field::scalar(
            "name",
            vec![
                trim(),
                min_length(1, "Genre name required"),
                max_length(100, "Genre name must be at most 100 characters"),
                escape(),
            ],
        )]
    }

    fn from_sanitized(values: &Sanitized) -> Self {
        Genre {
            name: values.get("name").to_string(),
        }
    }
}

impl Form for Author {
    fn fields() -> Vec<Field> {
        vec![
            Field::scalar(
                "first_name",
                vec![
                    trim(),
                    min_length(1, "First name must be specified."),
                    max_length(100, "First name must be at most 100 characters."),
                    escape(),
                    alphanumeric("First name has non-alphanumeric characters."),
                ],
            ),
            Field::scalar(
                "family_name",
                vec![
                    trim(),
                    min_length(1, "Family name must be specified."),
                    max_length(100, "Family name must be at most 100 characters."),
                    escape(),
                    alphanumeric("Family name has non-alphanumeric characters."),
                ],
            ),
            Field::optional("date_of_birth", vec![iso_date("Invalid date of birth")]),
            Field::optional("date_of_death", vec![iso_date("Invalid date of death")]),
        ]
    }

    fn from_sanitized(values: &Sanitized) -> Self {
        Author {
            first_name: values.get("first_name").to_string(),
            family_name: values.get("family_name").to_string(),
            date_of_birth: parse_date(values.get("date_of_birth")),
            date_of_death: parse_date(values.get("date_of_death")),
        }
    }
}

impl Form for Book {
    fn fields() -> Vec<Field> {
        vec![
            Field::scalar(
                "title",
                vec![trim(), min_length(1, "Title must not be empty."), escape()],
            ),
            Field::scalar(
                "author",
                vec![trim(), min_length(1, "Author must not be empty."), escape()],
            ),
            Field::scalar(
                "summary",
                vec![trim(), min_length(1, "Summary must not be empty."), escape()],
            ),
            Field::scalar(
                "isbn",
                vec![trim(), min_length(1, "ISBN must not be empty"), escape()],
            ),
            Field::list("genre", vec![escape()]),
        ]
    }

    fn from_sanitized(values: &Sanitized) -> Self {
        Book {
            title: values.get("title").to_string(),
            author: values.get("author").to_string(),
            summary: values.get("summary").to_string(),
            isbn: values.get("isbn").to_string(),
            genre: values.list("genre").to_vec(),
        }
    }
}

impl Form for BookInstance {
    fn fields() -> Vec<Field> {
        vec![
            Field::scalar(
                "book",
                vec![trim(), min_length(1, "Book must be specified"), escape()],
            ),
            Field::scalar(
                "imprint",
                vec![trim(), min_length(1, "Imprint must be specified"), escape()],
            ),
            Field::optional("status", vec![trim(), escape(), one_of(STATUSES, "Invalid status")]),
            Field::optional("due_back", vec![iso_date("Invalid date")]),
        ]
    }

    fn from_sanitized(values: &Sanitized) -> Self {
        BookInstance {
            book: values.get("book").to_string(),
            imprint: values.get("imprint").to_string(),
            status: InstanceStatus::parse(values.get("status")).unwrap_or_default(),
            due_back: parse_date(values.get("due_back")),
        }
    }

    fn cross_check(&self) -> Vec<FieldError> {
        match self.due_back {
            Some(due_back) if self.status == InstanceStatus::Available => vec![FieldError::new(
                "due_back",
                "Due date only applies to copies that are not available",
                &due_back.to_string(),
            )],
            _ => Vec::new(),
        }
    }
}
