use actix_web::{http::StatusCode, test};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use serial_test::serial;

#[macro_use]
mod common;

use common::{TestContext, at, shift_body};

fn location_body(name: &str) -> Value {
    json!({
        "locationName": name,
        "address": { "city": "Chicago", "state": "IL", "postalCode": "60605" },
        "companyName": "CompanyC",
        "contact": {
            "contactName": "Charlie",
            "contactEmail": "charlie@companyC.com",
            "contactRole": "Clerk"
        },
        "instruction": {
            "instructionType": "Visitor",
            "instructionDescription": "Wear a helmet.",
            "instructionCreationTimestamp": "2023-01-05T00:00:00Z"
        }
    })
}

#[actix_web::test]
#[serial]
async fn test_location_crud() {
    common::setup_test_env();
    let ctx = TestContext::new().await.unwrap();
    let admin = ctx.create_user("admin", true).await.unwrap();
    let app = init_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/v1/location")
        .insert_header(ctx.bearer(&admin))
        .set_json(location_body("Warehouse"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: Value = test::read_body_json(resp).await;
    let id = body["data"]["id"].as_str().unwrap().to_string();
    assert_eq!(body["data"]["contacts"][0]["contactName"], "Charlie");
    assert_eq!(body["data"]["instructions"][0]["instructionType"], "Visitor");
    assert_eq!(body["data"]["isActive"], true);

    let mut update = location_body("Main Warehouse");
    update["isActive"] = json!(false);
    let req = test::TestRequest::put()
        .uri(&format!("/v1/location/{}", id))
        .insert_header(ctx.bearer(&admin))
        .set_json(update)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri(&format!("/v1/location/{}", id))
        .insert_header(ctx.bearer(&admin))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["locationName"], "Main Warehouse");
    assert_eq!(body["data"]["isActive"], false);
    assert_eq!(body["data"]["address"]["postalCode"], "60605");

    let req = test::TestRequest::get()
        .uri("/v1/location")
        .insert_header(ctx.bearer(&admin))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let req = test::TestRequest::delete()
        .uri(&format!("/v1/location/{}", id))
        .insert_header(ctx.bearer(&admin))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri(&format!("/v1/location/{}", id))
        .insert_header(ctx.bearer(&admin))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
#[serial]
async fn test_location_mutations_require_admin() {
    common::setup_test_env();
    let ctx = TestContext::new().await.unwrap();
    let staff = ctx.create_user("staff", false).await.unwrap();
    ctx.create_location("site-1").await.unwrap();
    let app = init_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/v1/location")
        .insert_header(ctx.bearer(&staff))
        .set_json(location_body("Warehouse"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::delete()
        .uri("/v1/location/site-1")
        .insert_header(ctx.bearer(&staff))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::get()
        .uri("/v1/location/site-1")
        .insert_header(ctx.bearer(&staff))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
#[serial]
async fn test_invalid_location_is_rejected() {
    common::setup_test_env();
    let ctx = TestContext::new().await.unwrap();
    let admin = ctx.create_user("admin", true).await.unwrap();
    let app = init_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/v1/location")
        .insert_header(ctx.bearer(&admin))
        .set_json(location_body("   "))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::post()
        .uri("/v1/location")
        .insert_header(ctx.bearer(&admin))
        .set_json(json!({ "locationName": "No address" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
}

#[actix_web::test]
#[serial]
async fn test_deleting_location_removes_its_shifts() {
    common::setup_test_env();
    let ctx = TestContext::new().await.unwrap();
    let admin = ctx.create_user("admin", true).await.unwrap();
    ctx.create_location("site-1").await.unwrap();
    let app = init_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/v1/shifts")
        .insert_header(ctx.bearer(&admin))
        .set_json(shift_body("s1", &admin.id, "site-1", at(2, 9), at(2, 17)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let req = test::TestRequest::delete()
        .uri("/v1/location/site-1")
        .insert_header(ctx.bearer(&admin))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    assert!(ctx.state.shift_repository.find_by_id("s1").await.unwrap().is_none());
}
