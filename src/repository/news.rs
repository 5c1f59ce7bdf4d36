use diesel::prelude::*;

use crate::domain::news::{NewNews, News};
use crate::domain::types::NewsId;
use crate::models::category::Category as DbCategory;
use crate::models::news::{NewNews as DbNewNews, News as DbNews};
use crate::repository::{
    DieselRepository, NewsListQuery, NewsReader, NewsWriter, RepositoryResult,
};

/// Build a `LIKE` pattern matching `needle` anywhere, with `\` as escape.
fn contains_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

fn load_news_by_id(
    conn: &mut SqliteConnection,
    id: i32,
) -> QueryResult<Option<(DbNews, DbCategory)>> {
    use crate::schema::{categories, news};

    news::table
        .inner_join(categories::table)
        .filter(news::id.eq(id))
        .select((DbNews::as_select(), DbCategory::as_select()))
        .first::<(DbNews, DbCategory)>(conn)
        .optional()
}

impl NewsReader for DieselRepository {
    fn list_news(&self, query: NewsListQuery) -> RepositoryResult<Vec<News>> {
        use crate::schema::{categories, news};

        let mut conn = self.conn()?;

        let mut items = news::table
            .inner_join(categories::table)
            .select((DbNews::as_select(), DbCategory::as_select()))
            .into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(category_id) = query.category_id {
            items = items.filter(news::category_id.eq(category_id.get()));
        }

        if let Some(title) = &query.title {
            items = items.filter(news::title.like(contains_pattern(title)).escape('\\'));
        }

        if let Some(text) = &query.text {
            items = items.filter(news::text.like(contains_pattern(text)).escape('\\'));
        }

        let items = items
            .order((news::publication_date.desc(), news::id.desc()))
            .load::<(DbNews, DbCategory)>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<News>, _>>()?;

        Ok(items)
    }

    fn get_news_by_id(&self, id: NewsId) -> RepositoryResult<Option<News>> {
        let mut conn = self.conn()?;

        let news = load_news_by_id(&mut conn, id.get())?;
        let news = news.map(TryInto::try_into).transpose()?;
        Ok(news)
    }
}

impl NewsWriter for DieselRepository {
    fn create_news(&self, news: &NewNews) -> RepositoryResult<News> {
        use crate::schema::news;

        let mut conn = self.conn()?;
        let db_news: DbNewNews = news.into();

        let row = conn.transaction(|conn| {
            let inserted = diesel::insert_into(news::table)
                .values(&db_news)
                .get_result::<DbNews>(conn)?;
            load_news_by_id(conn, inserted.id)?.ok_or(diesel::result::Error::NotFound)
        })?;

        Ok(row.try_into()?)
    }

    fn update_news(&self, id: NewsId, news: &NewNews) -> RepositoryResult<usize> {
        use crate::schema::news;

        let mut conn = self.conn()?;
        let db_news: DbNewNews = news.into();

        let affected = diesel::update(news::table.find(id.get()))
            .set(&db_news)
            .execute(&mut conn)?;

        Ok(affected)
    }

    fn delete_news(&self, id: NewsId) -> RepositoryResult<usize> {
        use crate::schema::news;

        let mut conn = self.conn()?;

        let affected = diesel::delete(news::table.find(id.get())).execute(&mut conn)?;

        Ok(affected)
    }
}
