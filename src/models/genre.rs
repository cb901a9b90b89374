//! Genre model

use serde::{Deserialize, Serialize};

use super::Entity;

/// Genre name is unique as stored (case-sensitive)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Genre {
    pub name: String,
}

impl Entity for Genre {
    const COLLECTION: &'static str = "genres";
    const LABEL: &'static str = "Genre";
    const ROUTE: &'static str = "genre";
    const LIST_URL: &'static str = "/catalog/genres";
}
