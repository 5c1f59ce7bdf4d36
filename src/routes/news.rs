use actix_web::http::StatusCode;
use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::{Context, Tera};

use crate::domain::news::NewsFilter;
use crate::domain::types::NewsId;
use crate::dto::news::NewsDto;
use crate::forms::news::{
    CategoryFilterForm, FieldError, NewsForm, NewsFormError, NewsFormPayload, SearchForm,
};
use crate::repository::DieselRepository;
use crate::routes::main::render_news_list;
use crate::routes::{page_context, redirect, render_not_found, render_template};
use crate::services::ServiceError;
use crate::services::news::{NewsService, SaveNewsOutcome};

fn render_form(
    tera: &Tera,
    mut context: Context,
    form: &NewsForm,
    errors: &[FieldError],
    status: StatusCode,
) -> HttpResponse {
    context.insert("form", form);
    context.insert("errors", errors);
    match tera.render("news/form.html", &context) {
        Ok(body) => HttpResponse::build(status).body(body),
        Err(e) => {
            log::error!("Failed to render template 'news/form.html': {e}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/news/new")]
pub async fn show_new_news_form(
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let context = match page_context(&flash_messages, "new_news", repo.get_ref()) {
        Ok(context) => context,
        Err(response) => return response,
    };

    render_form(&tera, context, &NewsForm::default(), &[], StatusCode::OK)
}

#[post("/news/new")]
pub async fn save_news(
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
    web::Form(form): web::Form<NewsForm>,
) -> impl Responder {
    let payload: NewsFormPayload = match form.clone().try_into() {
        Ok(payload) => payload,
        Err(err @ NewsFormError::Validation(_)) => {
            let context = match page_context(&flash_messages, "new_news", repo.get_ref()) {
                Ok(context) => context,
                Err(response) => return response,
            };
            return render_form(
                &tera,
                context,
                &form,
                err.field_errors(),
                StatusCode::UNPROCESSABLE_ENTITY,
            );
        }
        Err(err) => {
            FlashMessage::error(ServiceError::from(err).to_string()).send();
            return redirect("/news/new");
        }
    };

    let service = NewsService::new(repo.get_ref());
    match service.add_news(payload.draft, payload.category) {
        Ok(SaveNewsOutcome::Created(_)) => FlashMessage::success("Новость добавлена.").send(),
        Ok(SaveNewsOutcome::Updated(_)) => FlashMessage::success("Новость обновлена.").send(),
        Ok(SaveNewsOutcome::CreatedFallback { requested, .. }) => FlashMessage::warning(format!(
            "Новость с id = {requested} не найдена, сохранена как новая."
        ))
        .send(),
        Err(err) => {
            log::error!("Failed to save news: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    }

    redirect("/")
}

#[post("/news/by-category")]
pub async fn news_by_category(
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
    web::Form(form): web::Form<CategoryFilterForm>,
) -> impl Responder {
    let filter: NewsFilter = match form.try_into() {
        Ok(filter) => filter,
        Err(err) => {
            FlashMessage::error(ServiceError::from(err).to_string()).send();
            return redirect("/");
        }
    };

    render_news_list(&filter, &flash_messages, repo.get_ref(), &tera)
}

#[post("/news/by-title")]
pub async fn news_by_title(
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
    web::Form(form): web::Form<SearchForm>,
) -> impl Responder {
    render_news_list(
        &form.into_title_filter(),
        &flash_messages,
        repo.get_ref(),
        &tera,
    )
}

#[post("/news/by-text")]
pub async fn news_by_text(
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
    web::Form(form): web::Form<SearchForm>,
) -> impl Responder {
    render_news_list(
        &form.into_text_filter(),
        &flash_messages,
        repo.get_ref(),
        &tera,
    )
}

#[get("/news/{news_id}")]
pub async fn show_news(
    news_id: web::Path<i32>,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let mut context = match page_context(&flash_messages, "news", repo.get_ref()) {
        Ok(context) => context,
        Err(response) => return response,
    };

    let Ok(news_id) = NewsId::new(news_id.into_inner()) else {
        return render_not_found(&tera, &context);
    };

    match NewsService::new(repo.get_ref()).find_by_id(news_id) {
        Ok(Some(news)) => {
            context.insert("news", &NewsDto::from(news));
            render_template(&tera, "news/show.html", &context)
        }
        Ok(None) => render_not_found(&tera, &context),
        Err(err) => {
            log::error!("Failed to show news {news_id}: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/news/{news_id}/edit")]
pub async fn edit_news(
    news_id: web::Path<i32>,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let context = match page_context(&flash_messages, "edit_news", repo.get_ref()) {
        Ok(context) => context,
        Err(response) => return response,
    };

    let Ok(news_id) = NewsId::new(news_id.into_inner()) else {
        return render_not_found(&tera, &context);
    };

    match NewsService::new(repo.get_ref()).find_by_id(news_id) {
        Ok(Some(news)) => {
            render_form(&tera, context, &NewsForm::from(news), &[], StatusCode::OK)
        }
        Ok(None) => render_not_found(&tera, &context),
        Err(err) => {
            log::error!("Failed to load news {news_id} for editing: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/news/{news_id}/delete")]
pub async fn delete_news(
    news_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let news_id = match NewsId::new(news_id.into_inner()) {
        Ok(news_id) => news_id,
        Err(err) => {
            FlashMessage::error(ServiceError::from(err).to_string()).send();
            return redirect("/");
        }
    };

    match NewsService::new(repo.get_ref()).delete_news(news_id) {
        Ok(true) => FlashMessage::success("Новость удалена.").send(),
        Ok(false) => FlashMessage::info("Новость уже удалена.").send(),
        Err(err) => {
            log::error!("Failed to delete news {news_id}: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    }

    redirect("/")
}
