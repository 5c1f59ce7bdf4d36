use actix_web::{HttpResponse, Responder, get, web};

use crate::domain::news::NewsFilter;
use crate::dto::categories::CategoryDto;
use crate::dto::news::NewsDto;
use crate::forms::news::NewsQueryParams;
use crate::repository::DieselRepository;
use crate::services::ServiceError;
use crate::services::categories::CategoryService;
use crate::services::news::NewsService;

#[get("/v1/categories")]
pub async fn api_v1_categories(repo: web::Data<DieselRepository>) -> impl Responder {
    match CategoryService::new(repo.get_ref()).find_all() {
        Ok(categories) => HttpResponse::Ok().json(
            categories
                .into_iter()
                .map(CategoryDto::from)
                .collect::<Vec<_>>(),
        ),
        Err(err) => {
            log::error!("Failed to list categories: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/v1/news")]
pub async fn api_v1_news(
    params: web::Query<NewsQueryParams>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let filter: NewsFilter = match params.into_inner().try_into() {
        Ok(filter) => filter,
        Err(err) => return HttpResponse::BadRequest().body(ServiceError::from(err).to_string()),
    };

    match NewsService::new(repo.get_ref()).list(&filter) {
        Ok(news) => {
            HttpResponse::Ok().json(news.into_iter().map(NewsDto::from).collect::<Vec<_>>())
        }
        Err(err) => {
            log::error!("Failed to list news: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
