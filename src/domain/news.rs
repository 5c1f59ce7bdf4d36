use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::category::Category;
use crate::domain::types::{CategoryId, NewsId, NewsText, NewsTitle, SearchQuery};

/// A published news article together with its owning category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct News {
    pub id: NewsId,
    pub title: NewsTitle,
    pub text: NewsText,
    pub publication_date: NaiveDateTime,
    pub category: Category,
}

impl News {
    /// Publication date formatted as `dd.mm.yyyy`.
    pub fn pretty_date(&self) -> String {
        self.publication_date.format("%d.%m.%Y").to_string()
    }
}

/// Row data written on insert and on update of a [`News`] item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewNews {
    pub title: NewsTitle,
    pub text: NewsText,
    pub publication_date: NaiveDateTime,
    pub category_id: CategoryId,
}

/// Selection of news items to list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum NewsFilter {
    #[default]
    All,
    Category(CategoryId),
    Title(SearchQuery),
    Text(SearchQuery),
}

/// Validated editor submission for a news item.
///
/// `id` is present when an existing article is being edited.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewsDraft {
    pub id: Option<NewsId>,
    pub title: NewsTitle,
    pub text: NewsText,
}
