use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::category::CategoryDraft;
use crate::domain::news::{NewsDraft, NewsFilter};
use crate::domain::types::{
    CategoryId, CategoryName, NewsId, NewsText, NewsTitle, SearchQuery, TypeConstraintError,
};

/// Hidden and optional inputs arrive as empty strings rather than missing keys.
fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => raw.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

/// A single rejected form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// News editor submission: the article fields plus its category name.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct NewsForm {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub id: Option<i32>,
    #[serde(default)]
    #[validate(length(min = 1, max = 20, message = "News title must be from 1 to 20 symbols!"))]
    pub title: String,
    #[serde(default)]
    #[validate(length(
        min = 1,
        max = 2000,
        message = "News text must be from 1 to 2000 symbols!"
    ))]
    pub text: String,
    #[serde(default)]
    #[validate(length(
        min = 1,
        max = 20,
        message = "Category name must be from 1 to 20 symbols!"
    ))]
    pub category_name: String,
}

/// Validated news editor submission.
#[derive(Debug, Clone, PartialEq)]
pub struct NewsFormPayload {
    pub draft: NewsDraft,
    pub category: CategoryDraft,
}

#[derive(Debug, Error)]
pub enum NewsFormError {
    #[error("News form validation failed: {}", summarize(.0))]
    Validation(Vec<FieldError>),
    #[error("News form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl NewsFormError {
    /// Field-level errors, empty for non-validation failures.
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            Self::Validation(errors) => errors,
            Self::TypeConstraint(_) => &[],
        }
    }
}

fn summarize(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}

impl From<ValidationErrors> for NewsFormError {
    fn from(value: ValidationErrors) -> Self {
        let mut errors: Vec<FieldError> = value
            .field_errors()
            .into_iter()
            .flat_map(|(field, errors)| {
                let field = field.to_string();
                errors.iter().map(move |error| FieldError {
                    field: field.clone(),
                    message: error
                        .message
                        .as_ref()
                        .map(ToString::to_string)
                        .unwrap_or_else(|| error.code.to_string()),
                })
            })
            .collect();
        errors.sort_by(|a, b| a.field.cmp(&b.field));
        Self::Validation(errors)
    }
}

impl From<TypeConstraintError> for NewsFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<NewsForm> for NewsFormPayload {
    type Error = NewsFormError;

    fn try_from(value: NewsForm) -> Result<Self, Self::Error> {
        value.validate()?;

        Ok(Self {
            draft: NewsDraft {
                id: value.id.map(NewsId::new).transpose()?,
                title: NewsTitle::new(value.title)?,
                text: NewsText::new(value.text)?,
            },
            category: CategoryDraft {
                name: CategoryName::new(value.category_name)?,
            },
        })
    }
}

/// Title or text search. An empty query lists every article.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchForm {
    #[serde(default)]
    pub query: Option<String>,
}

impl SearchForm {
    fn into_query(self) -> Option<SearchQuery> {
        self.query.and_then(|q| SearchQuery::new(q).ok())
    }

    pub fn into_title_filter(self) -> NewsFilter {
        self.into_query().map_or(NewsFilter::All, NewsFilter::Title)
    }

    pub fn into_text_filter(self) -> NewsFilter {
        self.into_query().map_or(NewsFilter::All, NewsFilter::Text)
    }
}

/// Category filter. A missing or zero id lists every article.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CategoryFilterForm {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub category_id: Option<i32>,
}

#[derive(Debug, Error)]
pub enum CategoryFilterFormError {
    #[error("Category filter contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<TypeConstraintError> for CategoryFilterFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<CategoryFilterForm> for NewsFilter {
    type Error = CategoryFilterFormError;

    fn try_from(value: CategoryFilterForm) -> Result<Self, Self::Error> {
        match value.category_id {
            None | Some(0) => Ok(NewsFilter::All),
            Some(id) => Ok(NewsFilter::Category(CategoryId::new(id)?)),
        }
    }
}

/// Query string of the JSON news listing.
///
/// `category_id` takes precedence over `title`, which takes precedence over
/// `text`; empty values are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewsQueryParams {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub category_id: Option<i32>,
    pub title: Option<String>,
    pub text: Option<String>,
}

impl TryFrom<NewsQueryParams> for NewsFilter {
    type Error = CategoryFilterFormError;

    fn try_from(value: NewsQueryParams) -> Result<Self, Self::Error> {
        let by_category: NewsFilter = CategoryFilterForm {
            category_id: value.category_id,
        }
        .try_into()?;
        if by_category != NewsFilter::All {
            return Ok(by_category);
        }

        let by_title = SearchForm { query: value.title }.into_title_filter();
        if by_title != NewsFilter::All {
            return Ok(by_title);
        }

        Ok(SearchForm { query: value.text }.into_text_filter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> NewsForm {
        NewsForm {
            id: None,
            title: "A".to_string(),
            text: "B".to_string(),
            category_name: "Tech".to_string(),
        }
    }

    #[test]
    fn accepts_valid_news_form() {
        let payload: NewsFormPayload = valid_form().try_into().unwrap();
        assert_eq!(payload.draft.id, None);
        assert_eq!(payload.draft.title, "A");
        assert_eq!(payload.category.name, "Tech");
    }

    #[test]
    fn keeps_existing_id() {
        let form = NewsForm {
            id: Some(5),
            ..valid_form()
        };
        let payload: NewsFormPayload = form.try_into().unwrap();
        assert_eq!(payload.draft.id, Some(NewsId::new(5).unwrap()));
    }

    #[test]
    fn reports_every_invalid_field() {
        let form = NewsForm {
            id: None,
            title: "x".repeat(21),
            text: String::new(),
            category_name: String::new(),
        };

        let err = NewsFormPayload::try_from(form).unwrap_err();
        let fields: Vec<&str> = err.field_errors().iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["category_name", "text", "title"]);
        assert_eq!(
            err.field_errors()[2].message,
            "News title must be from 1 to 20 symbols!"
        );
    }

    #[test]
    fn rejects_non_positive_id() {
        let form = NewsForm {
            id: Some(0),
            ..valid_form()
        };
        let err = NewsFormPayload::try_from(form).unwrap_err();
        assert!(matches!(err, NewsFormError::TypeConstraint(_)));
    }

    #[test]
    fn empty_search_lists_everything() {
        let form = SearchForm {
            query: Some(String::new()),
        };
        assert_eq!(form.into_title_filter(), NewsFilter::All);
        assert_eq!(SearchForm::default().into_text_filter(), NewsFilter::All);
    }

    #[test]
    fn search_keeps_query_verbatim() {
        let form = SearchForm {
            query: Some(" cat".to_string()),
        };
        assert_eq!(
            form.into_text_filter(),
            NewsFilter::Text(SearchQuery::new(" cat").unwrap())
        );
    }

    #[test]
    fn category_filter_zero_means_all() {
        let filter: NewsFilter = CategoryFilterForm {
            category_id: Some(0),
        }
        .try_into()
        .unwrap();
        assert_eq!(filter, NewsFilter::All);

        let filter: NewsFilter = CategoryFilterForm {
            category_id: Some(3),
        }
        .try_into()
        .unwrap();
        assert_eq!(filter, NewsFilter::Category(CategoryId::new(3).unwrap()));

        assert!(NewsFilter::try_from(CategoryFilterForm {
            category_id: Some(-1)
        })
        .is_err());
    }

    #[test]
    fn query_params_prefer_category() {
        let params = NewsQueryParams {
            category_id: Some(2),
            title: Some("cat".to_string()),
            text: None,
        };
        let filter: NewsFilter = params.try_into().unwrap();
        assert_eq!(filter, NewsFilter::Category(CategoryId::new(2).unwrap()));
    }
}
