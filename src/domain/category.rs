use serde::{Deserialize, Serialize};

use crate::domain::types::{CategoryId, CategoryName};

/// Named grouping for news items.
///
/// Categories do not hold their news; the reverse view is a query on the
/// news store filtered by [`CategoryId`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    pub id: CategoryId,
    pub name: CategoryName,
}

/// Data required to insert a new [`Category`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewCategory {
    pub name: CategoryName,
}

impl NewCategory {
    pub fn new(name: CategoryName) -> Self {
        Self { name }
    }
}

/// Category reference submitted alongside a news draft, by name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryDraft {
    pub name: CategoryName,
}
