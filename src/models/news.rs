use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::news::{NewNews as DomainNewNews, News as DomainNews};
use crate::domain::types::{NewsText, NewsTitle, TypeConstraintError};
use crate::models::category::Category;

/// Diesel model representing a row in the `news` table.
#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(belongs_to(Category))]
#[diesel(table_name = crate::schema::news)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct News {
    pub id: i32,
    pub title: String,
    pub text: String,
    pub publication_date: NaiveDateTime,
    pub category_id: i32,
}

/// Insertable/patchable form of [`News`].
#[derive(Debug, Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::news)]
pub struct NewNews<'a> {
    pub title: &'a str,
    pub text: &'a str,
    pub publication_date: NaiveDateTime,
    pub category_id: i32,
}

impl TryFrom<(News, Category)> for DomainNews {
    type Error = TypeConstraintError;

    fn try_from((news, category): (News, Category)) -> Result<Self, Self::Error> {
        Ok(Self {
            id: news.id.try_into()?,
            title: NewsTitle::new(news.title)?,
            text: NewsText::new(news.text)?,
            publication_date: news.publication_date,
            category: category.try_into()?,
        })
    }
}

impl<'a> From<&'a DomainNewNews> for NewNews<'a> {
    fn from(news: &'a DomainNewNews) -> Self {
        Self {
            title: news.title.as_str(),
            text: news.text.as_str(),
            publication_date: news.publication_date,
            category_id: news.category_id.get(),
        }
    }
}
