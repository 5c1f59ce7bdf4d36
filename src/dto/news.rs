use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::news::News;
use crate::dto::categories::CategoryDto;
use crate::forms::news::NewsForm;

/// News item as rendered by templates and the JSON API.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewsDto {
    pub id: i32,
    pub title: String,
    pub text: String,
    pub publication_date: NaiveDateTime,
    /// Publication date as `dd.mm.yyyy`.
    pub pretty_date: String,
    pub category: CategoryDto,
}

impl From<News> for NewsDto {
    fn from(value: News) -> Self {
        let pretty_date = value.pretty_date();
        Self {
            id: value.id.get(),
            title: value.title.into_inner(),
            text: value.text.into_inner(),
            publication_date: value.publication_date,
            pretty_date,
            category: value.category.into(),
        }
    }
}

/// Pre-fills the editor when an existing article is opened for editing.
impl From<News> for NewsForm {
    fn from(value: News) -> Self {
        Self {
            id: Some(value.id.get()),
            title: value.title.into_inner(),
            text: value.text.into_inner(),
            category_name: value.category.name.into_inner(),
        }
    }
}
