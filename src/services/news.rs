//! News use cases: listing, searching, saving and deleting articles.
//!
//! Saving resolves the category by name first (creating it when missing),
//! then either updates the addressed article in place or inserts a new one.
//! The publication date and category are overwritten on every save.

use chrono::Utc;

use crate::domain::category::CategoryDraft;
use crate::domain::news::{NewNews, News, NewsDraft, NewsFilter};
use crate::domain::types::{CategoryId, NewsId, SearchQuery};
use crate::repository::{CategoryReader, CategoryWriter, NewsListQuery, NewsReader, NewsWriter};

use super::categories::CategoryService;
use super::{ServiceError, ServiceResult};

/// Result of [`NewsService::add_news`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveNewsOutcome {
    /// The draft had no id and was inserted.
    Created(NewsId),
    /// The draft's id matched an article, which was updated in place.
    Updated(NewsId),
    /// The draft's id matched nothing; the draft was inserted under a new id.
    CreatedFallback { requested: NewsId, created: NewsId },
}

impl SaveNewsOutcome {
    pub fn id(self) -> NewsId {
        match self {
            Self::Created(id) | Self::Updated(id) => id,
            Self::CreatedFallback { created, .. } => created,
        }
    }
}

/// News use cases over a news store, with category resolution delegated to
/// [`CategoryService`].
pub struct NewsService<'a, R> {
    repo: &'a R,
    categories: CategoryService<'a, R>,
}

impl<'a, R> NewsService<'a, R>
where
    R: NewsReader + NewsWriter + CategoryReader + CategoryWriter,
{
    pub fn new(repo: &'a R) -> Self {
        Self {
            repo,
            categories: CategoryService::new(repo),
        }
    }

    pub fn find_all_news(&self) -> ServiceResult<Vec<News>> {
        self.list_query(NewsListQuery::default())
    }

    /// Absence is reported as `Ok(None)`, not as an error.
    pub fn find_by_id(&self, id: NewsId) -> ServiceResult<Option<News>> {
        match self.repo.get_news_by_id(id) {
            Ok(news) => Ok(news),
            Err(e) => {
                log::error!("Failed to get news {id}: {e}");
                Err(ServiceError::Internal)
            }
        }
    }

    pub fn find_by_category_id(&self, category_id: CategoryId) -> ServiceResult<Vec<News>> {
        self.list_query(NewsListQuery::default().category(category_id))
    }

    pub fn find_by_title(&self, query: &SearchQuery) -> ServiceResult<Vec<News>> {
        self.list_query(NewsListQuery::default().title(query.as_str()))
    }

    pub fn find_by_text(&self, query: &SearchQuery) -> ServiceResult<Vec<News>> {
        self.list_query(NewsListQuery::default().text(query.as_str()))
    }

    pub fn list(&self, filter: &NewsFilter) -> ServiceResult<Vec<News>> {
        match filter {
            NewsFilter::All => self.find_all_news(),
            NewsFilter::Category(category_id) => self.find_by_category_id(*category_id),
            NewsFilter::Title(query) => self.find_by_title(query),
            NewsFilter::Text(query) => self.find_by_text(query),
        }
    }

    /// Create a news item or update an existing one from an editor draft.
    ///
    /// A draft whose id no longer exists is saved as a new article and
    /// reported as [`SaveNewsOutcome::CreatedFallback`].
    pub fn add_news(
        &self,
        draft: NewsDraft,
        category: CategoryDraft,
    ) -> ServiceResult<SaveNewsOutcome> {
        let category = self.categories.find_or_add(&category.name)?;

        let news = NewNews {
            title: draft.title,
            text: draft.text,
            publication_date: Utc::now().naive_utc(),
            category_id: category.id,
        };

        let Some(requested) = draft.id else {
            let created = self.insert(&news)?;
            return Ok(SaveNewsOutcome::Created(created));
        };

        match self.repo.get_news_by_id(requested) {
            Ok(Some(existing)) => match self.repo.update_news(existing.id, &news) {
                Ok(_) => Ok(SaveNewsOutcome::Updated(existing.id)),
                Err(e) => {
                    log::error!("Failed to update news {requested}: {e}");
                    Err(ServiceError::Internal)
                }
            },
            Ok(None) => {
                log::warn!("News {requested} not found, saving the draft as a new article");
                let created = self.insert(&news)?;
                Ok(SaveNewsOutcome::CreatedFallback { requested, created })
            }
            Err(e) => {
                log::error!("Failed to get news {requested}: {e}");
                Err(ServiceError::Internal)
            }
        }
    }

    /// Delete a news item. Returns `false` if there was nothing to delete.
    pub fn delete_news(&self, id: NewsId) -> ServiceResult<bool> {
        match self.repo.delete_news(id) {
            Ok(0) => {
                log::info!("News {id} already absent, nothing deleted");
                Ok(false)
            }
            Ok(_) => Ok(true),
            Err(e) => {
                log::error!("Failed to delete news {id}: {e}");
                Err(ServiceError::Internal)
            }
        }
    }

    fn insert(&self, news: &NewNews) -> ServiceResult<NewsId> {
        match self.repo.create_news(news) {
            Ok(created) => Ok(created.id),
            Err(e) => {
                log::error!("Failed to create news: {e}");
                Err(ServiceError::Internal)
            }
        }
    }

    fn list_query(&self, query: NewsListQuery) -> ServiceResult<Vec<News>> {
        match self.repo.list_news(query) {
            Ok(news) => Ok(news),
            Err(e) => {
                log::error!("Failed to list news: {e}");
                Err(ServiceError::Internal)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::category::Category;
    use crate::domain::types::{CategoryName, NewsText, NewsTitle};
    use crate::repository::test::TestRepository;
    use chrono::{DateTime, Duration};

    fn sample_category(id: i32, name: &str) -> Category {
        Category {
            id: CategoryId::new(id).unwrap(),
            name: CategoryName::new(name).unwrap(),
        }
    }

    fn sample_news(id: i32, title: &str, text: &str, category: Category) -> News {
        News {
            id: NewsId::new(id).unwrap(),
            title: NewsTitle::new(title).unwrap(),
            text: NewsText::new(text).unwrap(),
            publication_date: DateTime::from_timestamp(0, 0).unwrap().naive_utc(),
            category,
        }
    }

    fn draft(id: Option<i32>, title: &str, text: &str) -> NewsDraft {
        NewsDraft {
            id: id.map(|id| NewsId::new(id).unwrap()),
            title: NewsTitle::new(title).unwrap(),
            text: NewsText::new(text).unwrap(),
        }
    }

    fn category_draft(name: &str) -> CategoryDraft {
        CategoryDraft {
            name: CategoryName::new(name).unwrap(),
        }
    }

    fn seeded_repo() -> TestRepository {
        let tech = sample_category(1, "Tech");
        let pets = sample_category(2, "Pets");
        TestRepository::new(vec![tech.clone(), pets.clone(), sample_category(3, "Empty")])
            .with_news(vec![
                sample_news(1, "Cat cafe opens", "Coffee with cats", pets.clone()),
                sample_news(2, "New CPU", "Faster than ever", tech.clone()),
                sample_news(3, "Dog show", "Catalogue of breeds", pets),
                sample_news(4, "Rust 2.0", "Scattered rumours", tech),
            ])
    }

    #[test]
    fn add_news_without_id_creates_article_and_category() {
        let repo = TestRepository::default();
        let service = NewsService::new(&repo);

        let before = Utc::now().naive_utc();
        let outcome = service
            .add_news(draft(None, "A", "B"), category_draft("Tech"))
            .unwrap();

        let SaveNewsOutcome::Created(id) = outcome else {
            panic!("expected a created outcome, got {outcome:?}");
        };
        let news = service.find_by_id(id).unwrap().unwrap();
        assert_eq!(news.title, "A");
        assert_eq!(news.text, "B");
        assert_eq!(news.category.name, "Tech");
        assert!(news.publication_date >= before - Duration::seconds(1));
        assert!(news.publication_date <= Utc::now().naive_utc() + Duration::seconds(1));
        assert_eq!(repo.category_count(), 1);
    }

    #[test]
    fn add_news_with_existing_id_updates_in_place() {
        let repo = seeded_repo();
        let service = NewsService::new(&repo);

        let outcome = service
            .add_news(draft(Some(2), "New Title", "New Text"), category_draft("Pets"))
            .unwrap();

        assert_eq!(outcome, SaveNewsOutcome::Updated(NewsId::new(2).unwrap()));
        assert_eq!(repo.news_count(), 4);

        let news = service.find_by_id(NewsId::new(2).unwrap()).unwrap().unwrap();
        assert_eq!(news.title, "New Title");
        assert_eq!(news.text, "New Text");
        assert_eq!(news.category.id, 2);
        assert!(news.publication_date > DateTime::from_timestamp(0, 0).unwrap().naive_utc());
    }

    #[test]
    fn add_news_with_stale_id_creates_new_article() {
        let repo = seeded_repo();
        let service = NewsService::new(&repo);

        let outcome = service
            .add_news(draft(Some(99), "Ghost", "Boo"), category_draft("Tech"))
            .unwrap();

        match outcome {
            SaveNewsOutcome::CreatedFallback { requested, created } => {
                assert_eq!(requested, 99);
                assert_ne!(created, 99);
            }
            other => panic!("expected a fallback outcome, got {other:?}"),
        }
        assert_eq!(repo.news_count(), 5);
        assert!(service.find_by_id(NewsId::new(99).unwrap()).unwrap().is_none());
    }

    #[test]
    fn find_by_id_reports_absence() {
        let repo = seeded_repo();
        let service = NewsService::new(&repo);

        assert!(service.find_by_id(NewsId::new(42).unwrap()).unwrap().is_none());
    }

    #[test]
    fn find_by_title_returns_only_matching_titles() {
        let repo = seeded_repo();
        let service = NewsService::new(&repo);

        let found = service
            .find_by_title(&SearchQuery::new("Cat").unwrap())
            .unwrap();

        let ids: Vec<i32> = found.iter().map(|n| n.id.get()).collect();
        assert_eq!(ids, vec![1]);
    }

    #[test]
    fn find_by_title_is_case_sensitive() {
        let repo = seeded_repo();
        let service = NewsService::new(&repo);

        let found = service
            .find_by_title(&SearchQuery::new("cat").unwrap())
            .unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn find_by_text_searches_body() {
        let repo = seeded_repo();
        let service = NewsService::new(&repo);

        let found = service
            .find_by_text(&SearchQuery::new("cat").unwrap())
            .unwrap();

        let mut ids: Vec<i32> = found.iter().map(|n| n.id.get()).collect();
        ids.sort();
        assert_eq!(ids, vec![1, 4]);
    }

    #[test]
    fn find_by_category_never_returns_foreign_news() {
        let repo = seeded_repo();
        let service = NewsService::new(&repo);

        let tech = service
            .find_by_category_id(CategoryId::new(1).unwrap())
            .unwrap();
        assert_eq!(tech.len(), 2);
        assert!(tech.iter().all(|n| n.category.id == 1));

        let empty = service
            .find_by_category_id(CategoryId::new(3).unwrap())
            .unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn list_dispatches_on_filter() {
        let repo = seeded_repo();
        let service = NewsService::new(&repo);

        assert_eq!(service.list(&NewsFilter::All).unwrap().len(), 4);
        assert_eq!(
            service
                .list(&NewsFilter::Category(CategoryId::new(2).unwrap()))
                .unwrap()
                .len(),
            2
        );
        assert_eq!(
            service
                .list(&NewsFilter::Title(SearchQuery::new("CPU").unwrap()))
                .unwrap()
                .len(),
            1
        );
    }

    #[test]
    fn delete_news_is_idempotent() {
        let repo = seeded_repo();
        let service = NewsService::new(&repo);
        let id = NewsId::new(1).unwrap();

        assert!(service.delete_news(id).unwrap());
        assert!(service.find_by_id(id).unwrap().is_none());
        assert!(!service.delete_news(id).unwrap());
        assert_eq!(repo.news_count(), 3);
    }
}
