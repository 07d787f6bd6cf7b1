mod common;

use std::sync::Arc;

use actix_web::{http::StatusCode, test, web, App};
use cash_register_server::catalog::Item;
use cash_register_server::{configure, ErrorResponse};
use common::{test_state, BrokenCatalog, MockCatalog, StubConverter};
use rust_decimal::Decimal;
use serde_json::json;

#[actix_web::test]
async fn test_list_items_newest_first() {
    let media = tempfile::tempdir().unwrap();
    let state = test_state(
        media.path(),
        Arc::new(MockCatalog::with_sample_items()),
        Arc::new(StubConverter::new()),
    );
    let app = test::init_service(App::new().app_data(web::Data::new(state)).configure(configure)).await;

    let req = test::TestRequest::get().uri("/api/items").to_request();
    let items: Vec<Item> = test::call_and_read_body_json(&app, req).await;

    assert_eq!(items.iter().map(|i| i.id).collect::<Vec<_>>(), vec![2, 1]);
    assert_eq!(items[1].price, Decimal::new(1050, 2));
}

#[actix_web::test]
async fn test_create_item_then_use_in_receipt() {
    let media = tempfile::tempdir().unwrap();
    let converter = Arc::new(StubConverter::new());
    let state = test_state(media.path(), Arc::new(MockCatalog::with_sample_items()), converter.clone());
    let app = test::init_service(App::new().app_data(web::Data::new(state)).configure(configure)).await;

    let req = test::TestRequest::post()
        .uri("/api/items")
        .set_json(json!({"title": "Green tea", "price": "3.20"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Item = test::read_body_json(resp).await;
    assert_eq!(created.id, 3);
    assert_eq!(created.title, "Green tea");

    let req = test::TestRequest::post()
        .uri("/cash_machine")
        .set_json(json!({"items": [3, 3, 3]}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(converter.last_source().unwrap().contains(r#"total: "9.60","#));
}

#[actix_web::test]
async fn test_create_item_validation_error() {
    let media = tempfile::tempdir().unwrap();
    let state = test_state(
        media.path(),
        Arc::new(MockCatalog::new()),
        Arc::new(StubConverter::new()),
    );
    let app = test::init_service(App::new().app_data(web::Data::new(state)).configure(configure)).await;

    let req = test::TestRequest::post()
        .uri("/api/items")
        .set_json(json!({"title": "", "price": 0}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let error: ErrorResponse = test::read_body_json(resp).await;
    assert!(error.message.contains("[title]"));
    assert!(error.message.contains("[price]"));
}

#[actix_web::test]
async fn test_list_items_database_failure() {
    let media = tempfile::tempdir().unwrap();
    let state = test_state(media.path(), Arc::new(BrokenCatalog), Arc::new(StubConverter::new()));
    let app = test::init_service(App::new().app_data(web::Data::new(state)).configure(configure)).await;

    let req = test::TestRequest::get().uri("/api/items").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
