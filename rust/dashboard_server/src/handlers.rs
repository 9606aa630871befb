// src/handlers.rs

use crate::dashboard::{refresh, DashboardState};
use crate::error::DashboardError;
use crate::models::{ErrorResponse, OptionsResponse};
use crate::page::INDEX_HTML;
use actix_web::error::{InternalError, QueryPayloadError};
use actix_web::http::header::ContentType;
use actix_web::{get, web, HttpRequest, HttpResponse, Responder};
use stock_data::FilterSelection;
use tracing::error;

#[get("/")]
pub async fn index() -> impl Responder {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(INDEX_HTML)
}

#[get("/api/options")]
pub async fn filter_options(state: web::Data<DashboardState>) -> impl Responder {
    HttpResponse::Ok().json(OptionsResponse {
        options: state.options.clone(),
        default_selection: state.options.default_selection(),
    })
}

#[get("/api/dashboard")]
pub async fn dashboard(
    state: web::Data<DashboardState>,
    query: web::Query<FilterSelection>,
) -> impl Responder {
    let selection = query.into_inner();

    // CSV reads and the predictions write are blocking file IO
    let result = web::block(move || refresh(&state, &selection))
        .await
        .map_err(DashboardError::from)
        .and_then(|refreshed| refreshed);

    match result {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(err) if err.is_client_error() => {
            HttpResponse::BadRequest().json(ErrorResponse::new(err.to_string()))
        }
        Err(err) => {
            error!(error = %err, "dashboard refresh failed");
            HttpResponse::InternalServerError().json(ErrorResponse::new(err.to_string()))
        }
    }
}

/// Malformed query strings get the same JSON error body as rejected selections.
pub fn query_error(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let response = HttpResponse::BadRequest().json(ErrorResponse::new(err.to_string()));
    InternalError::from_response(err, response).into()
}

#[get("/health")]
pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().body("OK")
}
