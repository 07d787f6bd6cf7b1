use crate::catalog::{CatalogError, Item, NewItem};
use crate::{AppState, ErrorResponse};
use actix_web::{web, HttpResponse, Responder};
use log::{error, info};

#[utoipa::path(
    get,
    path = "/api/items",
    tag = "Catalog",
    responses(
        (status = 200, description = "All catalog items, newest first", body = Vec<Item>),
        (status = 500, description = "Internal Server Error", body = ErrorResponse)
    )
)]
pub async fn list_items(state: web::Data<AppState>) -> impl Responder {
    match state.catalog.list().await {
        Ok(items) => HttpResponse::Ok().json(items),
        Err(e) => {
            error!("Failed to list catalog items: {}", e);
            HttpResponse::InternalServerError().json(ErrorResponse::internal_error("Failed to list items"))
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/items",
    tag = "Catalog",
    request_body = NewItem,
    responses(
        (status = 201, description = "Item created", body = Item),
        (status = 400, description = "Invalid item", body = ErrorResponse),
        (status = 500, description = "Internal Server Error", body = ErrorResponse)
    )
)]
pub async fn create_item(state: web::Data<AppState>, item: web::Json<NewItem>) -> impl Responder {
    info!("Creating catalog item '{}'", item.title);

    match state.catalog.insert(item.into_inner()).await {
        Ok(created) => HttpResponse::Created().json(created),
        Err(CatalogError::Invalid(message)) => {
            HttpResponse::BadRequest().json(ErrorResponse::bad_request(&message))
        }
        Err(e) => {
            error!("Failed to create catalog item: {}", e);
            HttpResponse::InternalServerError().json(ErrorResponse::internal_error("Failed to create item"))
        }
    }
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/items")
            .route(web::get().to(list_items))
            .route(web::post().to(create_item)),
    );
}
