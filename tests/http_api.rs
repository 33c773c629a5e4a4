use std::time::Duration;

use pitwall::api::{ApiError, HttpApi, RaceApi};
use pitwall::constants::ERROR_GENERIC_OPERATION;
use pitwall::models::{CarPayload, PageRequest, PilotPayload, RacePayload};
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> HttpApi {
    HttpApi::new(&server.uri(), Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_list_sends_zero_based_page_and_size() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/pilots"))
        .and(query_param("page", "0"))
        .and(query_param("size", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "content": [
                {"id": 1, "name": "Lewis", "age": 40, "experience": 18, "cars": []},
                {"id": 2, "name": "George", "age": 27, "experience": 6}
            ],
            "page": {"size": 5, "number": 0, "totalElements": 2, "totalPages": 1}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let page = client(&mock_server).list_pilots(PageRequest::first(5)).await.unwrap();
    assert_eq!(page.content.len(), 2);
    assert_eq!(page.content[1].name, "George");
    assert!(page.content[1].cars.is_empty());
    assert_eq!(page.page.total_pages, 1);
}

#[tokio::test]
async fn test_list_cars_with_owner() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/cars"))
        .and(query_param("page", "2"))
        .and(query_param("size", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "content": [
                {"id": 8, "brand": "Ferrari", "model": "SF-24", "power": 950,
                 "owner": {"id": 3, "name": "Charles", "experience": 7}}
            ],
            "page": {"totalPages": 3}
        })))
        .mount(&mock_server)
        .await;

    let page = client(&mock_server).list_cars(PageRequest::new(2, 10)).await.unwrap();
    assert_eq!(page.content[0].owner.as_ref().map(|o| o.id), Some(3));
    assert_eq!(page.page.total_pages, 3);
}

#[tokio::test]
async fn test_create_posts_camel_case_payload() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/races"))
        .and(body_json(json!({
            "name": "Monza",
            "year": 2024,
            "pilotIds": [1, 2],
            "carIds": [5]
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 11})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let payload = RacePayload {
        name: "Monza".to_string(),
        year: 2024,
        pilot_ids: vec![1, 2],
        car_ids: vec![5],
    };
    client(&mock_server).create_race(&payload).await.unwrap();
}

#[tokio::test]
async fn test_update_puts_to_item_path() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/api/cars/4"))
        .and(body_json(json!({
            "brand": "McLaren",
            "model": "MCL38",
            "power": 900,
            "ownerId": 9
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let payload = CarPayload {
        brand: "McLaren".to_string(),
        model: "MCL38".to_string(),
        power: 900,
        owner_id: 9,
    };
    client(&mock_server).update_car(4, &payload).await.unwrap();
}

#[tokio::test]
async fn test_delete_hits_item_path() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/pilots/12"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    client(&mock_server).delete_pilot(12).await.unwrap();
}

#[tokio::test]
async fn test_error_body_message_is_surfaced() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/pilots/3"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "message": "Pilot still owns cars"
        })))
        .mount(&mock_server)
        .await;

    let err = client(&mock_server).delete_pilot(3).await.unwrap_err();
    assert_eq!(err.status(), Some(409));
    assert_eq!(err.user_message(), "Pilot still owns cars");
}

#[tokio::test]
async fn test_field_errors_are_joined() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/pilots"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "age": "must be at least 18"
        })))
        .mount(&mock_server)
        .await;

    let payload = PilotPayload {
        name: "Kid".to_string(),
        age: 12,
        experience: 0,
    };
    let err = client(&mock_server).create_pilot(&payload).await.unwrap_err();
    assert_eq!(err.user_message(), "must be at least 18");
}

#[tokio::test]
async fn test_unreadable_error_body_falls_back() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/races/1"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&mock_server)
        .await;

    let err = client(&mock_server).get_race(1).await.unwrap_err();
    assert!(matches!(err, ApiError::Http { status: 500, .. }));
    assert_eq!(err.user_message(), ERROR_GENERIC_OPERATION);
}

#[tokio::test]
async fn test_malformed_success_body_is_decode_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/cars/2"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&mock_server)
        .await;

    let err = client(&mock_server).get_car(2).await.unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
}

#[tokio::test]
async fn test_unreachable_server_is_network_error() {
    // Nothing listens on the discard port
    let api = HttpApi::new("http://127.0.0.1:9", Duration::from_secs(2)).unwrap();
    let err = api.list_races(PageRequest::first(5)).await.unwrap_err();
    assert!(matches!(err, ApiError::Network(_)));
}
