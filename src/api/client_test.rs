use super::client::api_error_message;
use crate::api::ApiClient;
use crate::config::ClientConfig;
use crate::error::{AppError, Result};
use crate::models::{StationInput, UserInput};
use mockito::{Matcher, Server, ServerGuard};
use reqwest::{Method, StatusCode};
use rstest::rstest;
use serde_json::{json, Value};

const TOKEN: &str = "test_token";

// Client pointed at `<mock server>/api`, so paths also prove the prefix is kept.
fn client_for(server: &ServerGuard, token: Option<&str>) -> ApiClient {
    let config = ClientConfig::new(
        format!("{}/api", server.url()),
        token.map(str::to_string),
    );
    ApiClient::new(config)
}

#[tokio::test]
async fn test_get_stations_success() -> Result<()> {
    let mut server = Server::new_async().await;
    let client = client_for(&server, Some(TOKEN));

    let body = json!([
        {"id": 1, "address": "Via Roma 1", "latitude": 45.46, "longitude": 9.19,
         "power_kw": 22.0, "nil": "Centro", "status": "active", "occupied": true},
        {"id": 2, "address": "Corso Como 5", "latitude": "45.48", "longitude": "9.18",
         "power_kw": "50.00", "nil": "Garibaldi", "status": "active", "occupied": false}
    ]);
    let m = server
        .mock("GET", "/api/stations")
        .match_header("authorization", "Bearer test_token")
        .match_header("content-type", "application/json")
        .match_body(Matcher::Exact(String::new()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body.to_string())
        .create_async()
        .await;

    let stations = client.get_stations().await?;

    m.assert_async().await;
    assert_eq!(stations.len(), 2);
    assert_eq!(stations[0].id, 1);
    assert_eq!(stations[0].occupied, Some(true));
    assert_eq!(stations[1].power_kw, Some(50.0));
    assert_eq!(stations[1].nil.as_deref(), Some("Garibaldi"));

    Ok(())
}

#[tokio::test]
async fn test_request_returns_json_unchanged() -> Result<()> {
    let mut server = Server::new_async().await;
    let client = client_for(&server, Some(TOKEN));

    let body = json!({"nested": {"list": [1, 2.5, "x", null, true]}, "empty": {}});
    let _m = server
        .mock("GET", "/api/anything")
        .with_status(200)
        .with_body(body.to_string())
        .create_async()
        .await;

    let value = client
        .request_value("/anything", Method::GET, None)
        .await?;
    assert_eq!(value, body);

    Ok(())
}

#[tokio::test]
async fn test_missing_token_is_sent_as_null() -> Result<()> {
    let mut server = Server::new_async().await;
    let client = client_for(&server, None);

    let m = server
        .mock("GET", "/api/vehicles")
        .match_header("authorization", "Bearer null")
        .with_status(200)
        .with_body(r#"[{"id": 7, "license_plate": "AB123CD"}]"#)
        .create_async()
        .await;

    let vehicles = client.get_vehicles().await?;

    m.assert_async().await;
    assert_eq!(vehicles, vec![json!({"id": 7, "license_plate": "AB123CD"})]);

    Ok(())
}

#[tokio::test]
async fn test_same_token_on_every_method() -> Result<()> {
    let mut server = Server::new_async().await;
    let client = client_for(&server, Some(TOKEN));

    let mut mocks = Vec::new();
    for (method, path) in [
        ("GET", "/api/users"),
        ("POST", "/api/stations"),
        ("PUT", "/api/stations/3"),
        ("DELETE", "/api/stations/3"),
    ] {
        let body = if method == "GET" { "[]" } else { r#"{"success": true}"# };
        mocks.push(
            server
                .mock(method, path)
                .match_header("authorization", "Bearer test_token")
                .with_status(200)
                .with_body(body)
                .create_async()
                .await,
        );
    }

    let input = StationInput {
        address: "Via Roma 1".into(),
        latitude: 45.0,
        longitude: 9.0,
        power_kw: 22.0,
        nil: "Centro".into(),
        status: Some("active".into()),
    };
    assert!(client.get_users().await?.is_empty());
    assert!(client.create_station(&input).await?.success);
    assert!(client.update_station(3, &input).await?.success);
    assert!(client.delete_station(3).await?.success);

    for m in mocks {
        m.assert_async().await;
    }

    Ok(())
}

#[tokio::test]
async fn test_get_station_detail() -> Result<()> {
    let mut server = Server::new_async().await;
    let client = client_for(&server, Some(TOKEN));

    let _m = server
        .mock("GET", "/api/stations/5")
        .with_status(200)
        .with_body(
            json!({
                "id": 5, "address": "Via Dante 2", "latitude": 45.1, "longitude": 9.1,
                "power_kw": 11, "nil": "Brera", "status": "active",
                "recent_sessions": [
                    {"id": 31, "user_id": 2, "vehicle_id": 8, "station_id": 5,
                     "start_time": "Wed, 01 May 2024 10:00:00 GMT",
                     "end_time": "Wed, 01 May 2024 11:00:00 GMT",
                     "energy_kwh": null, "cost_eur": null,
                     "name": "Anna", "surname": "Bianchi", "license_plate": "AB123CD"}
                ]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let detail = client.get_station(5).await?;
    assert_eq!(detail.station.id, 5);
    assert_eq!(detail.station.power_kw, Some(11.0));
    assert_eq!(detail.recent_sessions.len(), 1);
    assert_eq!(
        detail.recent_sessions[0].license_plate.as_deref(),
        Some("AB123CD")
    );

    Ok(())
}

#[tokio::test]
async fn test_book_station_default_duration() -> Result<()> {
    let mut server = Server::new_async().await;
    let client = client_for(&server, Some(TOKEN));

    let m = server
        .mock("POST", "/api/book")
        .match_header("content-type", "application/json")
        .match_body(Matcher::Exact(
            r#"{"station_id":"S1","vehicle_id":"V9","duration":60}"#.to_string(),
        ))
        .with_status(200)
        .with_body(
            r#"{"success": true, "start_time": "2024-05-01T10:00:00", "end_time": "2024-05-01T11:00:00"}"#,
        )
        .create_async()
        .await;

    let confirmation = client.book_station("S1", "V9").await?;

    m.assert_async().await;
    assert!(confirmation.success);
    assert_eq!(confirmation.booked_for(), Some(chrono::Duration::minutes(60)));

    Ok(())
}

#[tokio::test]
async fn test_book_station_custom_duration() -> Result<()> {
    let mut server = Server::new_async().await;
    let client = client_for(&server, Some(TOKEN));

    let m = server
        .mock("POST", "/api/book")
        .match_body(Matcher::Json(
            json!({"station_id": 4, "vehicle_id": 12, "duration": 90}),
        ))
        .with_status(200)
        .with_body(r#"{"success": true}"#)
        .create_async()
        .await;

    let confirmation = client.book_station_for(4, 12, 90).await?;

    m.assert_async().await;
    assert!(confirmation.success);
    assert_eq!(confirmation.start_time, None);

    Ok(())
}

#[tokio::test]
async fn test_delete_user_sends_no_body() -> Result<()> {
    let mut server = Server::new_async().await;
    let client = client_for(&server, Some(TOKEN));

    let m = server
        .mock("DELETE", "/api/users/42")
        .match_body(Matcher::Exact(String::new()))
        .with_status(200)
        .with_body(r#"{"success": true}"#)
        .create_async()
        .await;

    let ack = client.delete_user(42).await?;

    m.assert_async().await;
    assert!(ack.success);

    Ok(())
}

#[rstest]
#[case(Value::Null)]
#[case(json!(""))]
#[tokio::test]
async fn test_null_or_empty_body_sends_no_payload(#[case] body: Value) -> Result<()> {
    let mut server = Server::new_async().await;
    let client = client_for(&server, Some(TOKEN));

    let m = server
        .mock("POST", "/api/echo")
        .match_body(Matcher::Exact(String::new()))
        .with_status(200)
        .with_body(r#"{"success": true}"#)
        .create_async()
        .await;

    let value = client
        .request_value("/echo", Method::POST, Some(&body))
        .await?;

    m.assert_async().await;
    assert_eq!(value, json!({"success": true}));

    Ok(())
}

#[tokio::test]
async fn test_empty_object_body_is_still_sent() -> Result<()> {
    let mut server = Server::new_async().await;
    let client = client_for(&server, Some(TOKEN));

    let m = server
        .mock("POST", "/api/echo")
        .match_body(Matcher::Exact("{}".to_string()))
        .with_status(200)
        .with_body("{}")
        .create_async()
        .await;

    client
        .request_value("/echo", Method::POST, Some(&json!({})))
        .await?;

    m.assert_async().await;

    Ok(())
}

#[tokio::test]
async fn test_update_station_sends_status() -> Result<()> {
    let mut server = Server::new_async().await;
    let client = client_for(&server, Some(TOKEN));

    let m = server
        .mock("PUT", "/api/stations/3")
        .match_body(Matcher::PartialJson(json!({"status": "maintenance"})))
        .with_status(200)
        .with_body(r#"{"success": true}"#)
        .create_async()
        .await;

    let input = StationInput {
        address: "Via Roma 1".into(),
        latitude: 45.0,
        longitude: 9.0,
        power_kw: 22.0,
        nil: "Centro".into(),
        status: Some("maintenance".into()),
    };
    assert!(client.update_station(3, &input).await?.success);

    m.assert_async().await;

    Ok(())
}

#[tokio::test]
async fn test_base_url_keeps_api_prefix() {
    let server = Server::new_async().await;
    let client = client_for(&server, None);
    assert_eq!(client.base_url(), format!("{}/api", server.url()));
}

#[tokio::test]
async fn test_create_and_update_user_payloads() -> Result<()> {
    let mut server = Server::new_async().await;
    let client = client_for(&server, Some(TOKEN));

    let create = UserInput {
        name: "Luca".into(),
        surname: "Verdi".into(),
        email: "luca@example.com".into(),
        phone: Some("+39 333 000".into()),
        password: Some("s3cret".into()),
    };
    let update = UserInput {
        password: None,
        ..create.clone()
    };

    let m_create = server
        .mock("POST", "/api/users")
        .match_body(Matcher::Json(serde_json::to_value(&create).unwrap()))
        .with_status(200)
        .with_body(r#"{"success": true}"#)
        .create_async()
        .await;
    let m_update = server
        .mock("PUT", "/api/users/42")
        .match_body(Matcher::Json(json!({
            "name": "Luca", "surname": "Verdi",
            "email": "luca@example.com", "phone": "+39 333 000"
        })))
        .with_status(200)
        .with_body(r#"{"success": true}"#)
        .create_async()
        .await;

    assert!(client.create_user(&create).await?.success);
    assert!(client.update_user(42, &update).await?.success);

    m_create.assert_async().await;
    m_update.assert_async().await;

    Ok(())
}

#[tokio::test]
async fn test_get_stats_query_is_encoded() -> Result<()> {
    let mut server = Server::new_async().await;
    let client = client_for(&server, Some(TOKEN));

    let m = server
        .mock("GET", "/api/stats")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("neighborhood".into(), "Porta Romana".into()),
            Matcher::UrlEncoded("days".into(), "7".into()),
        ]))
        .with_status(200)
        .with_body(
            r#"[{"day": "Wed, 01 May 2024 00:00:00 GMT", "charges_count": 4},
                {"day": "Thu, 02 May 2024 00:00:00 GMT", "charges_count": 2}]"#,
        )
        .create_async()
        .await;

    let series = client.get_stats("Porta Romana", 7).await?;

    m.assert_async().await;
    assert_eq!(series.len(), 2);
    assert_eq!(series[0].charges_count, 4);
    assert_eq!(series[1].date(), chrono::NaiveDate::from_ymd_opt(2024, 5, 2));

    Ok(())
}

#[tokio::test]
async fn test_not_found_error_message() {
    let mut server = Server::new_async().await;
    let client = client_for(&server, Some(TOKEN));

    let _m = server
        .mock("GET", "/api/stations/99")
        .with_status(404)
        .with_body(r#"{"error":"not found"}"#)
        .create_async()
        .await;

    let err = client.get_station(99).await.unwrap_err();
    match &err {
        AppError::Api { status, message } => {
            assert_eq!(*status, StatusCode::NOT_FOUND);
            assert_eq!(message, "not found");
        },
        other => panic!("Expected AppError::Api, got {:?}", other),
    }
    assert_eq!(err.to_string(), "not found");
}

#[rstest]
#[case(403, json!({"error": "Non autorizzato"}), "Non autorizzato")]
#[case(400, json!({"success": false, "message": "Email e password obbligatorie"}), "Email e password obbligatorie")]
#[case(500, json!({"detail": "boom"}), "API error")]
#[tokio::test]
async fn test_failure_statuses_map_to_api_error(
    #[case] status: usize,
    #[case] body: Value,
    #[case] expected: &str,
) {
    let mut server = Server::new_async().await;
    let client = client_for(&server, Some(TOKEN));

    let _m = server
        .mock("GET", "/api/users")
        .with_status(status)
        .with_body(body.to_string())
        .create_async()
        .await;

    let err = client.get_users().await.unwrap_err();
    assert_eq!(err.status().map(|s| s.as_u16() as usize), Some(status));
    assert_eq!(err.to_string(), expected);
}

#[rstest]
#[case(json!({"error": "X"}), "X")]
#[case(json!({"message": "Y"}), "Y")]
#[case(json!({"error": "X", "message": "Y"}), "X")]
#[case(json!({"error": "", "message": "Y"}), "Y")]
#[case(json!({"error": null, "message": "Y"}), "Y")]
#[case(json!({"error": false, "message": ""}), "API error")]
#[case(json!({"error": {"code": 7}}), r#"{"code":7}"#)]
#[case(json!({}), "API error")]
#[case(json!(["error"]), "API error")]
#[case(json!("error"), "API error")]
fn test_api_error_message_resolution(#[case] body: Value, #[case] expected: &str) {
    assert_eq!(api_error_message(&body), expected);
}

#[tokio::test]
async fn test_non_json_success_body_is_parse_error() {
    let mut server = Server::new_async().await;
    let client = client_for(&server, Some(TOKEN));

    let _m = server
        .mock("GET", "/api/stations")
        .with_status(200)
        .with_body("<html>maintenance</html>")
        .create_async()
        .await;

    let err = client.get_stations().await.unwrap_err();
    assert!(matches!(err, AppError::JsonParse(_)), "got {:?}", err);
}

#[tokio::test]
async fn test_non_json_failure_body_is_parse_error() {
    let mut server = Server::new_async().await;
    let client = client_for(&server, Some(TOKEN));

    let _m = server
        .mock("DELETE", "/api/users/1")
        .with_status(502)
        .with_body("Bad Gateway")
        .create_async()
        .await;

    let err = client.delete_user(1).await.unwrap_err();
    assert!(matches!(err, AppError::JsonParse(_)), "got {:?}", err);
}

#[tokio::test]
async fn test_unexpected_shape_is_parse_error() {
    let mut server = Server::new_async().await;
    let client = client_for(&server, Some(TOKEN));

    let _m = server
        .mock("GET", "/api/users")
        .with_status(200)
        .with_body(r#"{"users": []}"#)
        .create_async()
        .await;

    let err = client.get_users().await.unwrap_err();
    assert!(matches!(err, AppError::JsonParse(_)), "got {:?}", err);
}

#[tokio::test]
async fn test_connection_refused_is_http_error() {
    // Port 1 is reserved; nothing listens there.
    let client = ApiClient::new(ClientConfig::new("http://127.0.0.1:1/api", None));

    let err = client.get_stations().await.unwrap_err();
    assert!(matches!(err, AppError::Http(_)), "got {:?}", err);
}

#[tokio::test]
async fn test_concurrent_requests_are_independent() -> Result<()> {
    let mut server = Server::new_async().await;
    let client = client_for(&server, Some(TOKEN));

    let _stations = server
        .mock("GET", "/api/stations")
        .with_status(200)
        .with_body("[]")
        .create_async()
        .await;
    let _users = server
        .mock("GET", "/api/users")
        .with_status(500)
        .with_body(r#"{"error": "db down"}"#)
        .create_async()
        .await;

    let other = client.clone();
    let (stations, users) = tokio::join!(client.get_stations(), other.get_users());

    assert!(stations?.is_empty());
    assert_eq!(users.unwrap_err().to_string(), "db down");

    Ok(())
}
