use actix_web::{App, http::StatusCode, test, web};
use serde_json::{Value, json};
use std::sync::Arc;
use uuid::Uuid;

use subscription_service::handlers::api_config;
use subscription_service::models::{CalculateCostResponse, SubscriptionResponse};
use subscription_service::repositories::InMemorySubscriptionRepository;
use subscription_service::services::SubscriptionService;

fn service() -> SubscriptionService {
    SubscriptionService::new(Arc::new(InMemorySubscriptionRepository::new()))
}

macro_rules! app {
    () => {
        test::init_service(
            App::new()
                .app_data(web::Data::new(service()))
                .configure(api_config),
        )
        .await
    };
}

macro_rules! create {
    ($app:expr, $body:expr) => {{
        let req = test::TestRequest::post()
            .uri("/api/v1/subscriptions")
            .set_json($body)
            .to_request();
        let resp = test::call_service(&$app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let created: SubscriptionResponse = test::read_body_json(resp).await;
        created
    }};
}

macro_rules! list {
    ($app:expr, $uri:expr) => {{
        let req = test::TestRequest::get().uri($uri).to_request();
        let resp = test::call_service(&$app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let rows: Vec<SubscriptionResponse> = test::read_body_json(resp).await;
        rows
    }};
}

#[actix_web::test]
async fn test_create_and_get_subscription() {
    let app = app!();
    let user_id = Uuid::new_v4();

    let created = create!(
        app,
        json!({
            "service_name": "Yandex Plus",
            "price": 400,
            "user_id": user_id,
            "start_date": "07-2025"
        })
    );
    assert_eq!(created.service_name, "Yandex Plus");
    assert_eq!(created.price, 400);
    assert_eq!(created.user_id, user_id);
    assert_eq!(created.start_date.to_string(), "07-2025");
    assert!(created.end_date.is_none());

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/subscriptions/{}", created.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let fetched: SubscriptionResponse = test::read_body_json(resp).await;
    assert_eq!(fetched.id, created.id);
    assert_eq!(fetched.service_name, created.service_name);
}

#[actix_web::test]
async fn test_create_rejects_bad_date_format() {
    let app = app!();
    let req = test::TestRequest::post()
        .uri("/api/v1/subscriptions")
        .set_json(json!({
            "service_name": "Netflix",
            "price": 700,
            "user_id": Uuid::new_v4(),
            "start_date": "2024-01"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(
        body["error"]["message"],
        "start_date must be in MM-YYYY format"
    );
}

#[actix_web::test]
async fn test_create_rejects_missing_field_and_bad_json() {
    let app = app!();

    let req = test::TestRequest::post()
        .uri("/api/v1/subscriptions")
        .set_json(json!({ "service_name": "Netflix", "price": 700 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::post()
        .uri("/api/v1/subscriptions")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[actix_web::test]
async fn test_get_unknown_and_invalid_ids() {
    let app = app!();

    let req = test::TestRequest::get()
        .uri("/api/v1/subscriptions/999")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["code"], "NOT_FOUND");

    let req = test::TestRequest::get()
        .uri("/api/v1/subscriptions/abc")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_list_with_filters() {
    let app = app!();
    let alice = Uuid::new_v4();
    let bob = Uuid::new_v4();
    for (user, name) in [(alice, "Spotify"), (alice, "YouTube Premium"), (bob, "Spotify")] {
        create!(
            app,
            json!({
                "service_name": name,
                "price": 199,
                "user_id": user,
                "start_date": "03-2024"
            })
        );
    }

    assert_eq!(list!(app, "/api/v1/subscriptions").len(), 3);
    assert_eq!(
        list!(app, &format!("/api/v1/subscriptions?user_id={alice}")).len(),
        2
    );
    assert_eq!(list!(app, "/api/v1/subscriptions?service_name=Spotify").len(), 2);
    let both = list!(
        app,
        &format!("/api/v1/subscriptions?user_id={alice}&service_name=Spotify")
    );
    assert_eq!(both.len(), 1);
    assert_eq!(both[0].user_id, alice);
    assert_eq!(both[0].service_name, "Spotify");

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/subscriptions?user_id=not-a-uuid")
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_partial_update_and_clear_end_date() {
    let app = app!();
    let created = create!(
        app,
        json!({
            "service_name": "Netflix",
            "price": 700,
            "user_id": Uuid::new_v4(),
            "start_date": "01-2024",
            "end_date": "06-2024"
        })
    );
    let uri = format!("/api/v1/subscriptions/{}", created.id);

    let req = test::TestRequest::put()
        .uri(&uri)
        .set_json(json!({ "price": 799 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: SubscriptionResponse = test::read_body_json(resp).await;
    assert_eq!(updated.price, 799);
    assert_eq!(updated.service_name, "Netflix");
    assert_eq!(updated.end_date.map(|p| p.to_string()).as_deref(), Some("06-2024"));

    let req = test::TestRequest::put()
        .uri(&uri)
        .set_json(json!({ "end_date": null }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let cleared: SubscriptionResponse = test::read_body_json(resp).await;
    assert!(cleared.end_date.is_none());
    assert_eq!(cleared.price, 799);
}

#[actix_web::test]
async fn test_update_errors() {
    let app = app!();

    let req = test::TestRequest::put()
        .uri("/api/v1/subscriptions/42")
        .set_json(json!({ "price": 100 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let created = create!(
        app,
        json!({
            "service_name": "Netflix",
            "price": 700,
            "user_id": Uuid::new_v4(),
            "start_date": "01-2024"
        })
    );
    let req = test::TestRequest::put()
        .uri(&format!("/api/v1/subscriptions/{}", created.id))
        .set_json(json!({ "end_date": "13-2024" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::put()
        .uri(&format!("/api/v1/subscriptions/{}", created.id))
        .set_json(json!({ "price": 0 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_price_above_limit_is_rejected() {
    let app = app!();
    let req = test::TestRequest::post()
        .uri("/api/v1/subscriptions")
        .set_json(json!({
            "service_name": "Netflix",
            "price": i64::MAX,
            "user_id": Uuid::new_v4(),
            "start_date": "01-2024"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(body["error"]["message"], "price must not exceed 2147483647");

    let created = create!(
        app,
        json!({
            "service_name": "Netflix",
            "price": 2147483647i64,
            "user_id": Uuid::new_v4(),
            "start_date": "01-2024"
        })
    );
    let req = test::TestRequest::put()
        .uri(&format!("/api/v1/subscriptions/{}", created.id))
        .set_json(json!({ "price": 2147483648i64 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/subscriptions/calculate?start_period=01-2024&end_period=02-2024")
            .to_request(),
    )
    .await;
    let cost: CalculateCostResponse = test::read_body_json(resp).await;
    assert_eq!(cost.total_cost, 2147483647 * 2);
}

#[actix_web::test]
async fn test_delete_subscription() {
    let app = app!();
    let created = create!(
        app,
        json!({
            "service_name": "Netflix",
            "price": 700,
            "user_id": Uuid::new_v4(),
            "start_date": "01-2024"
        })
    );
    let uri = format!("/api/v1/subscriptions/{}", created.id);

    let resp = test::call_service(&app, test::TestRequest::delete().uri(&uri).to_request()).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = test::call_service(&app, test::TestRequest::get().uri(&uri).to_request()).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = test::call_service(&app, test::TestRequest::delete().uri(&uri).to_request()).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_calculate_total_cost() {
    let app = app!();
    let user_a = Uuid::new_v4();
    let user_b = Uuid::new_v4();
    for (user, name, price, start) in [
        (user_a, "Netflix", 700, "01-2024"),
        (user_a, "Spotify", 199, "02-2024"),
        (user_b, "YouTube Premium", 299, "03-2024"),
    ] {
        create!(
            app,
            json!({
                "service_name": name,
                "price": price,
                "user_id": user,
                "start_date": start
            })
        );
    }

    let uri = format!(
        "/api/v1/subscriptions/calculate?user_id={user_a}&start_period=01-2024&end_period=12-2024"
    );
    let resp = test::call_service(&app, test::TestRequest::get().uri(&uri).to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let cost: CalculateCostResponse = test::read_body_json(resp).await;
    assert_eq!(cost.total_cost, 10589);

    let resp = test::call_service(&app, test::TestRequest::get().uri(&uri).to_request()).await;
    let again: CalculateCostResponse = test::read_body_json(resp).await;
    assert_eq!(again, cost);

    let uri = format!(
        "/api/v1/subscriptions/calculate?user_id={user_a}&service_name=Spotify&start_period=01-2024&end_period=12-2024"
    );
    let resp = test::call_service(&app, test::TestRequest::get().uri(&uri).to_request()).await;
    let cost: CalculateCostResponse = test::read_body_json(resp).await;
    assert_eq!(cost.total_cost, 199 * 11);

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/subscriptions/calculate?start_period=01-2024&end_period=12-2024")
            .to_request(),
    )
    .await;
    let cost: CalculateCostResponse = test::read_body_json(resp).await;
    assert_eq!(cost.total_cost, 700 * 12 + 199 * 11 + 299 * 10);
}

#[actix_web::test]
async fn test_calculate_with_bounded_subscription() {
    let app = app!();
    create!(
        app,
        json!({
            "service_name": "Netflix",
            "price": 100,
            "user_id": Uuid::new_v4(),
            "start_date": "06-2023",
            "end_date": "06-2024"
        })
    );

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/subscriptions/calculate?start_period=01-2024&end_period=12-2024")
            .to_request(),
    )
    .await;
    let cost: CalculateCostResponse = test::read_body_json(resp).await;
    assert_eq!(cost.total_cost, 600);

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/subscriptions/calculate?start_period=07-2024&end_period=12-2024")
            .to_request(),
    )
    .await;
    let cost: CalculateCostResponse = test::read_body_json(resp).await;
    assert_eq!(cost.total_cost, 0);
}

#[actix_web::test]
async fn test_calculate_rejects_bad_windows() {
    let app = app!();
    for uri in [
        "/api/v1/subscriptions/calculate?end_period=12-2024",
        "/api/v1/subscriptions/calculate?start_period=1-2024&end_period=12-2024",
        "/api/v1/subscriptions/calculate?start_period=12-2024&end_period=01-2024",
        "/api/v1/subscriptions/calculate?start_period=01-2024&end_period=12-2024&user_id=xyz",
    ] {
        let resp = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{uri}");
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR", "{uri}");
    }
}

#[actix_web::test]
async fn test_health() {
    let app = app!();
    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/v1/health").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["mode"], "memory");
}
