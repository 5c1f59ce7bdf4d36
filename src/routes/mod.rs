use actix_web::http::header;
use actix_web::{HttpResponse, web};
use actix_web_flash_messages::{IncomingFlashMessages, Level};
use tera::{Context, Tera};

use crate::dto::categories::CategoryDto;
use crate::repository::DieselRepository;
use crate::services::categories::CategoryService;

pub mod api;
pub mod main;
pub mod news;

/// Register every route of the application.
///
/// `/news/new` is registered before `/news/{id}` so that it is not captured
/// by the id pattern.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(main::index)
        .service(main::home)
        .service(news::show_new_news_form)
        .service(news::save_news)
        .service(news::news_by_category)
        .service(news::news_by_title)
        .service(news::news_by_text)
        .service(news::show_news)
        .service(news::edit_news)
        .service(news::delete_news)
        .service(
            web::scope("/api")
                .service(api::api_v1_categories)
                .service(api::api_v1_news),
        );
}

pub fn alert_level_to_str(level: &Level) -> &'static str {
    match level {
        Level::Error => "danger",
        Level::Warning => "warning",
        Level::Success => "success",
        Level::Info => "info",
        _ => "secondary",
    }
}

pub fn render_template(tera: &Tera, template: &str, context: &Context) -> HttpResponse {
    HttpResponse::Ok().body(tera.render(template, context).unwrap_or_else(|e| {
        log::error!("Failed to render template '{template}': {e}");
        String::new()
    }))
}

pub fn render_not_found(tera: &Tera, context: &Context) -> HttpResponse {
    HttpResponse::NotFound().body(tera.render("main/not_found.html", context).unwrap_or_else(
        |e| {
            log::error!("Failed to render template 'main/not_found.html': {e}");
            String::new()
        },
    ))
}

pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

pub fn base_context(flash_messages: &IncomingFlashMessages, current_page: &str) -> Context {
    let alerts = flash_messages
        .iter()
        .map(|f| (f.content(), alert_level_to_str(&f.level())))
        .collect::<Vec<_>>();

    let mut context = Context::new();
    context.insert("alerts", &alerts);
    context.insert("current_page", current_page);
    context
}

/// [`base_context`] plus the category list every page shows in its sidebar.
pub fn page_context(
    flash_messages: &IncomingFlashMessages,
    current_page: &str,
    repo: &DieselRepository,
) -> Result<Context, HttpResponse> {
    let categories = match CategoryService::new(repo).find_all() {
        Ok(categories) => categories
            .into_iter()
            .map(CategoryDto::from)
            .collect::<Vec<_>>(),
        Err(err) => {
            log::error!("Failed to load categories for page '{current_page}': {err}");
            return Err(HttpResponse::InternalServerError().finish());
        }
    };

    let mut context = base_context(flash_messages, current_page);
    context.insert("categories", &categories);
    Ok(context)
}
