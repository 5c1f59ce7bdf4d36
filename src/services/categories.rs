use crate::domain::category::{Category, NewCategory};
use crate::domain::types::{CategoryId, CategoryName};
use crate::repository::{CategoryReader, CategoryWriter, RepositoryError};

use super::{ServiceError, ServiceResult};

/// Category use cases over a category store.
pub struct CategoryService<'a, R> {
    repo: &'a R,
}

impl<'a, R> CategoryService<'a, R>
where
    R: CategoryReader + CategoryWriter,
{
    pub fn new(repo: &'a R) -> Self {
        Self { repo }
    }

    /// Every stored category. Callers must not rely on the ordering.
    pub fn find_all(&self) -> ServiceResult<Vec<Category>> {
        match self.repo.list_categories() {
            Ok(categories) => Ok(categories),
            Err(e) => {
                log::error!("Failed to list categories: {e}");
                Err(ServiceError::Internal)
            }
        }
    }

    pub fn find_by_id(&self, id: CategoryId) -> ServiceResult<Option<Category>> {
        match self.repo.get_category_by_id(id) {
            Ok(category) => Ok(category),
            Err(e) => {
                log::error!("Failed to get category {id}: {e}");
                Err(ServiceError::Internal)
            }
        }
    }

    /// Return the category named exactly `name`, creating it if needed.
    ///
    /// A conflicting insert means a concurrent caller created the same name
    /// between our lookup and insert; the winner's record is returned.
    pub fn find_or_add(&self, name: &CategoryName) -> ServiceResult<Category> {
        if let Some(category) = self.lookup(name)? {
            return Ok(category);
        }

        match self.repo.create_category(&NewCategory::new(name.clone())) {
            Ok(category) => {
                log::info!("Created category {} ({})", category.name, category.id);
                Ok(category)
            }
            Err(RepositoryError::Conflict(_)) => match self.lookup(name)? {
                Some(category) => Ok(category),
                None => {
                    log::error!("Category {name} reported as existing but cannot be found");
                    Err(ServiceError::Internal)
                }
            },
            Err(e) => {
                log::error!("Failed to create category {name}: {e}");
                Err(ServiceError::Internal)
            }
        }
    }

    fn lookup(&self, name: &CategoryName) -> ServiceResult<Option<Category>> {
        let exists = self.repo.category_exists(name).map_err(|e| {
            log::error!("Failed to check category {name}: {e}");
            ServiceError::Internal
        })?;
        if !exists {
            return Ok(None);
        }

        self.repo.get_category_by_name(name).map_err(|e| {
            log::error!("Failed to get category {name}: {e}");
            ServiceError::Internal
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::test::TestRepository;

    fn sample_category(id: i32, name: &str) -> Category {
        Category {
            id: CategoryId::new(id).unwrap(),
            name: CategoryName::new(name).unwrap(),
        }
    }

    #[test]
    fn find_all_returns_every_category() {
        let repo = TestRepository::new(vec![
            sample_category(1, "Tech"),
            sample_category(2, "Sport"),
        ]);
        let service = CategoryService::new(&repo);

        let categories = service.find_all().unwrap();
        assert_eq!(categories.len(), 2);
    }

    #[test]
    fn find_by_id_reports_absence() {
        let repo = TestRepository::new(vec![sample_category(4, "Sport")]);
        let service = CategoryService::new(&repo);

        let found = service.find_by_id(CategoryId::new(4).unwrap()).unwrap();
        assert_eq!(found, Some(sample_category(4, "Sport")));
        assert!(
            service
                .find_by_id(CategoryId::new(5).unwrap())
                .unwrap()
                .is_none()
        );
    }

    #[test]
    fn find_or_add_returns_existing_category_unchanged() {
        let repo = TestRepository::new(vec![sample_category(7, "Tech")]);
        let service = CategoryService::new(&repo);

        let category = service
            .find_or_add(&CategoryName::new("Tech").unwrap())
            .unwrap();
        assert_eq!(category, sample_category(7, "Tech"));
        assert_eq!(repo.category_count(), 1);
    }

    #[test]
    fn find_or_add_creates_missing_category_once() {
        let repo = TestRepository::default();
        let service = CategoryService::new(&repo);
        let name = CategoryName::new("Tech").unwrap();

        let first = service.find_or_add(&name).unwrap();
        let second = service.find_or_add(&name).unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(first.name, "Tech");
        assert_eq!(repo.category_count(), 1);
    }

    #[test]
    fn find_or_add_matches_names_exactly() {
        let repo = TestRepository::new(vec![sample_category(1, "Tech")]);
        let service = CategoryService::new(&repo);

        let lower = service
            .find_or_add(&CategoryName::new("tech").unwrap())
            .unwrap();
        let padded = service
            .find_or_add(&CategoryName::new("Tech ").unwrap())
            .unwrap();

        assert_ne!(lower.id, 1);
        assert_ne!(padded.id, 1);
        assert_eq!(repo.category_count(), 3);
    }

    #[test]
    fn find_or_add_recovers_from_concurrent_insert() {
        let repo = TestRepository::default().simulate_category_race();
        let service = CategoryService::new(&repo);

        let category = service
            .find_or_add(&CategoryName::new("Tech").unwrap())
            .unwrap();

        assert_eq!(category.name, "Tech");
        assert_eq!(repo.category_count(), 1);
    }
}
