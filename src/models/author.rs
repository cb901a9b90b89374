//! Author model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{format_date, Entity, Record};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Author {
    pub first_name: String,
    pub family_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
}

impl Entity for Author {
    const COLLECTION: &'static str = "authors";
    const LABEL: &'static str = "Author";
    const ROUTE: &'static str = "author";
    const LIST_URL: &'static str = "/catalog/authors";
}

impl Author {
    /// "Family, First"; empty when either part is missing
    pub fn name(&self) -> String {
        if self.first_name.is_empty() || self.family_name.is_empty() {
            return String::new();
        }
        format!("{}, {}", self.family_name, self.first_name)
    }

    /// "Birth - Death" with unknown parts left blank
    pub fn lifespan(&self) -> String {
        if self.date_of_birth.is_none() && self.date_of_death.is_none() {
            return String::new();
        }
        format!(
            "{} - {}",
            format_date(self.date_of_birth),
            format_date(self.date_of_death)
        )
        .trim()
        .to_string()
    }
}

/// Author as displayed in lists and detail pages
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuthorView {
    #[serde(flatten)]
    pub author: Record<Author>,
    pub name: String,
    pub lifespan: String,
    pub url: String,
}

impl From<Record<Author>> for AuthorView {
    fn from(author: Record<Author>) -> Self {
        Self {
            name: author.data.name(),
            lifespan: author.data.lifespan(),
            url: author.url(),
            author,
        }
    }
}
