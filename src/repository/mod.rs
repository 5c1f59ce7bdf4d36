use crate::db::{DbConnection, DbPool};
use crate::domain::category::{Category, NewCategory};
use crate::domain::news::{NewNews, News};
use crate::domain::types::{CategoryId, CategoryName, NewsId};

pub mod category;
pub mod errors;
pub mod news;

pub use errors::{RepositoryError, RepositoryResult};

/// Repository implementation backed by Diesel and SQLite.
///
/// The underlying `r2d2::Pool` is cheap to clone, allowing the repository to
/// be passed around freely between handlers.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository from an established database pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get a pooled database connection.
    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Query parameters used when listing news.
///
/// Filters combine with `AND`. Title and text filters match when the column
/// contains the given string as a substring.
#[derive(Debug, Clone, Default)]
pub struct NewsListQuery {
    /// Filter by owning category.
    pub category_id: Option<CategoryId>,
    /// Substring the title must contain.
    pub title: Option<String>,
    /// Substring the text must contain.
    pub text: Option<String>,
}

impl NewsListQuery {
    pub fn category(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }
}

/// Read-only operations for category entities.
pub trait CategoryReader {
    /// List every category.
    fn list_categories(&self) -> RepositoryResult<Vec<Category>>;
    /// Retrieve a category by its identifier.
    fn get_category_by_id(&self, id: CategoryId) -> RepositoryResult<Option<Category>>;
    /// Retrieve a category whose name equals `name` exactly.
    fn get_category_by_name(&self, name: &CategoryName) -> RepositoryResult<Option<Category>>;
    /// Check whether a category with exactly this name exists.
    fn category_exists(&self, name: &CategoryName) -> RepositoryResult<bool>;
}

/// Write operations for category entities.
pub trait CategoryWriter {
    /// Persist a new category and return it with its generated id.
    ///
    /// Fails with [`RepositoryError::Conflict`] if the name is already taken.
    fn create_category(&self, category: &NewCategory) -> RepositoryResult<Category>;
}

/// Read-only operations for news entities.
pub trait NewsReader {
    /// List news matching the supplied query parameters.
    fn list_news(&self, query: NewsListQuery) -> RepositoryResult<Vec<News>>;
    /// Retrieve a news item by its identifier.
    fn get_news_by_id(&self, id: NewsId) -> RepositoryResult<Option<News>>;
}

/// Write operations for news entities.
pub trait NewsWriter {
    /// Persist a new news item and return it with its generated id.
    fn create_news(&self, news: &NewNews) -> RepositoryResult<News>;
    /// Overwrite all mutable columns of an existing news item.
    fn update_news(&self, id: NewsId, news: &NewNews) -> RepositoryResult<usize>;
    /// Delete a news item; returns the number of removed rows.
    fn delete_news(&self, id: NewsId) -> RepositoryResult<usize>;
}
