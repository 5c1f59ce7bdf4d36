use actix_web::{HttpResponse, Responder, get, web};
use actix_web_flash_messages::IncomingFlashMessages;
use tera::Tera;

use crate::domain::news::NewsFilter;
use crate::dto::news::NewsDto;
use crate::repository::DieselRepository;
use crate::routes::{page_context, redirect, render_template};
use crate::services::categories::CategoryService;
use crate::services::news::NewsService;

#[get("/")]
pub async fn index(
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
) -> impl Responder {
    render_news_list(&NewsFilter::All, &flash_messages, repo.get_ref(), &tera)
}

#[get("/home")]
pub async fn home() -> impl Responder {
    redirect("/")
}

/// Render `news/index.html` for the given filter.
pub fn render_news_list(
    filter: &NewsFilter,
    flash_messages: &IncomingFlashMessages,
    repo: &DieselRepository,
    tera: &Tera,
) -> HttpResponse {
    let mut context = match page_context(flash_messages, "index", repo) {
        Ok(context) => context,
        Err(response) => return response,
    };

    let news = match NewsService::new(repo).list(filter) {
        Ok(news) => news.into_iter().map(NewsDto::from).collect::<Vec<_>>(),
        Err(err) => {
            log::error!("Failed to list news: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    context.insert("news_list", &news);
    match filter {
        NewsFilter::All => {}
        NewsFilter::Category(category_id) => {
            context.insert("selected_category_id", &category_id.get());
            match CategoryService::new(repo).find_by_id(*category_id) {
                Ok(Some(category)) => {
                    context.insert("selected_category_name", category.name.as_str())
                }
                Ok(None) => {}
                Err(err) => {
                    log::error!("Failed to load category {category_id}: {err}");
                    return HttpResponse::InternalServerError().finish();
                }
            }
        }
        NewsFilter::Title(query) => context.insert("title_query", query.as_str()),
        NewsFilter::Text(query) => context.insert("text_query", query.as_str()),
    }

    render_template(tera, "news/index.html", &context)
}
