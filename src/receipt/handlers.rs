use actix_web::{
    error::InternalError,
    http::header::{ContentDisposition, DispositionParam, DispositionType},
    web, HttpResponse, Responder,
};
use log::{debug, error, info, warn};
use uuid::Uuid;

use super::models::CashMachineRequest;
use super::{ErrorClass, ReceiptError};
use crate::schema::BinaryBody;
use crate::{AppState, ErrorResponse};

/// Response header carrying the URL encoded in the QR code.
pub const RECEIPT_URL_HEADER: &str = "X-Receipt-Url";

#[utoipa::path(
    post,
    path = "/cash_machine",
    tag = "Receipts",
    request_body = CashMachineRequest,
    responses(
        (status = 200, description = "QR code linking to the generated receipt", content_type = "image/png", body = BinaryBody),
        (status = 400, description = "Item list missing or empty", body = ErrorResponse),
        (status = 404, description = "None of the items exist", body = ErrorResponse),
        (status = 500, description = "Receipt generation failed", body = ErrorResponse)
    )
)]
pub async fn cash_machine(state: web::Data<AppState>, body: web::Json<CashMachineRequest>) -> impl Responder {
    info!("Executing cash_machine handler");

    match state.receipts.clone().issue(body.into_inner()).await {
        Ok(issued) => {
            debug!("Receipt {} available at {}", issued.token, issued.url);
            HttpResponse::Ok()
                .content_type("image/png")
                .insert_header((RECEIPT_URL_HEADER, issued.url))
                .body(issued.qr_png)
        }
        Err(e) => receipt_error_response(&e),
    }
}

#[utoipa::path(
    get,
    path = "/media/",
    tag = "Receipts",
    responses(
        (status = 200, description = "Most recently issued receipt", content_type = "application/pdf", body = BinaryBody),
        (status = 404, description = "No receipt issued yet", body = ErrorResponse)
    )
)]
pub async fn download_latest_receipt(state: web::Data<AppState>) -> impl Responder {
    info!("Executing download_latest_receipt handler");

    match state.receipts.store().latest() {
        Some(token) => serve_receipt(&state, token).await,
        None => {
            warn!("No receipt has been issued yet");
            HttpResponse::NotFound().json(ErrorResponse::not_found(&format!(
                "File {} not found",
                state.config.pdf_name
            )))
        }
    }
}

#[utoipa::path(
    get,
    path = "/media/{token}",
    tag = "Receipts",
    params(
        ("token" = Uuid, Path, description = "Receipt token from the QR code URL")
    ),
    responses(
        (status = 200, description = "Receipt PDF", content_type = "application/pdf", body = BinaryBody),
        (status = 404, description = "Receipt not found", body = ErrorResponse)
    )
)]
pub async fn download_receipt(state: web::Data<AppState>, path: web::Path<Uuid>) -> impl Responder {
    let token = path.into_inner();
    info!("Executing download_receipt handler for token: {}", token);
    serve_receipt(&state, token).await
}

async fn serve_receipt(state: &web::Data<AppState>, token: Uuid) -> HttpResponse {
    let receipts = state.receipts.clone();
    let pdf_name = state.config.pdf_name.clone();

    match web::block(move || receipts.store().read(&token)).await {
        Ok(Ok(Some(pdf))) => HttpResponse::Ok()
            .content_type("application/pdf")
            .insert_header(ContentDisposition {
                disposition: DispositionType::Attachment,
                parameters: vec![DispositionParam::Filename(pdf_name)],
            })
            .body(pdf),
        Ok(Ok(None)) => {
            warn!("Receipt not found: {}", token);
            HttpResponse::NotFound().json(ErrorResponse::not_found(&format!("Receipt '{}' not found", token)))
        }
        Ok(Err(e)) => {
            error!("Failed to read receipt {}: {}", token, e);
            HttpResponse::InternalServerError().json(ErrorResponse::internal_error("Failed to read receipt"))
        }
        Err(e) => {
            error!("Receipt read task failed: {}", e);
            HttpResponse::InternalServerError().json(ErrorResponse::internal_error("Failed to read receipt"))
        }
    }
}

fn receipt_error_response(err: &ReceiptError) -> HttpResponse {
    match err.class() {
        ErrorClass::BadRequest => {
            debug!("Rejected receipt request: {}", err);
            HttpResponse::BadRequest().json(ErrorResponse::bad_request(&err.to_string()))
        }
        ErrorClass::NotFound => {
            warn!("Receipt request for unknown items: {}", err);
            HttpResponse::NotFound().json(ErrorResponse::not_found(&err.to_string()))
        }
        ErrorClass::Internal => {
            error!("Receipt generation failed: {}", err);
            HttpResponse::InternalServerError().json(ErrorResponse::internal_error(&err.to_string()))
        }
    }
}

/// JSON extractor settings: malformed bodies become 400 `ErrorResponse`s.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let message = err.to_string();
        debug!("Rejected JSON body: {}", message);
        InternalError::from_response(err, HttpResponse::BadRequest().json(ErrorResponse::bad_request(&message)))
            .into()
    })
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/cash_machine").route(web::post().to(cash_machine)))
        .service(web::resource("/media/").route(web::get().to(download_latest_receipt)))
        .service(web::resource("/media/{token}").route(web::get().to(download_receipt)));
}
