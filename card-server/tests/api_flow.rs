//! End-to-end API flow against the in-memory store

use std::net::SocketAddr;
use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::extract::connect_info::MockConnectInfo;
use card_server::analytics::{GeoError, GeoIpResolver, GeoLocation};
use card_server::store::MemoryStore;
use card_server::{Config, ServerState};
use http::{Method, Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

struct StubResolver;

#[async_trait]
impl GeoIpResolver for StubResolver {
    async fn resolve(&self, ip: &str) -> Result<GeoLocation, GeoError> {
        match ip {
            "203.0.113.7" => Ok(GeoLocation::new(Some("Lisbon"), Some("Portugal"))),
            _ => Err(GeoError::NoLocation(ip.to_string())),
        }
    }
}

struct TestApp {
    app: Router,
    token: String,
}

impl TestApp {
    fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        let state = ServerState::with_stores(
            Config::default(),
            store.clone(),
            store,
            Arc::new(StubResolver),
        );
        let token = state.jwt.create_token("user-1").unwrap();
        Self {
            app: card_server::api::build_app(state),
            token,
        }
    }

    async fn send(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
        authed: bool,
        extra: &[(&str, &str)],
    ) -> (StatusCode, http::HeaderMap, Vec<u8>) {
        let mut req = Request::builder().method(method).uri(uri);
        if authed {
            req = req.header(header::AUTHORIZATION, format!("Bearer {}", self.token));
        }
        for (k, v) in extra {
            req = req.header(*k, *v);
        }
        let req = match body {
            Some(json) => req
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => req.body(Body::empty()).unwrap(),
        };

        let res = self.app.clone().oneshot(req).await.unwrap();
        let status = res.status();
        let headers = res.headers().clone();
        let bytes = res.into_body().collect().await.unwrap().to_bytes();
        (status, headers, bytes.to_vec())
    }

    async fn json(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let (status, _, bytes) = self.send(method, uri, body, true, &[]).await;
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }
}

#[tokio::test]
async fn test_health_is_public() {
    let app = TestApp::new();
    let (status, headers, body) = app.send(Method::GET, "/health", None, false, &[]).await;
    assert_eq!(status, StatusCode::OK);
    assert!(headers.contains_key("x-request-id"));
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_owner_routes_require_token() {
    let app = TestApp::new();

    let (status, _, body) = app.send(Method::GET, "/api/cards", None, false, &[]).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["code"], 1001);

    let (status, _, _) = app
        .send(
            Method::GET,
            "/api/analytics",
            None,
            false,
            &[("authorization", "Bearer not-a-jwt")],
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_card_requires_complete_profile() {
    let app = TestApp::new();
    let (status, _) = app
        .json(Method::POST, "/api/cards", Some(json!({ "name": "Work" })))
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_profile_to_public_card_flow() {
    let app = TestApp::new();

    // Profile
    let (status, _) = app
        .json(
            Method::PUT,
            "/api/profile/personal",
            Some(json!({
                "full_name": "Jane Doe",
                "primary_email": "jane@example.com",
                "mobile_number": "+1 555 0199",
                "bio": "Builds things",
            })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, entry) = app
        .json(
            Method::POST,
            "/api/profile/professional",
            Some(json!({
                "designation": "CTO",
                "company_name": "Acme",
                "office_address": { "street": "1 Rua Augusta", "city": "Lisbon" },
                "office_email": "jane@acme.com",
                "office_phone": "+351 21 000 0000",
            })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let entry_id = entry["id"].as_str().unwrap().to_string();

    // Card: name, email and the entry with its phone only
    let (status, card) = app
        .json(
            Method::POST,
            "/api/cards",
            Some(json!({
                "name": "Work",
                "slug": "jane-doe",
                "fields_config": {
                    "full_name": true,
                    "primary_email": true,
                    "professionalIds": [entry_id],
                    "professional_phones": [entry_id],
                },
            })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(card["is_default"], true);
    let card_id = card["id"].as_str().unwrap().to_string();

    // Public fetch records a view
    let (status, _, body) = app
        .send(
            Method::GET,
            "/api/public/cards/jane-doe",
            None,
            false,
            &[
                ("x-forwarded-for", "203.0.113.7, 10.0.0.1"),
                ("referer", "https://www.linkedin.com/feed/"),
                ("user-agent", "integration-test"),
            ],
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let view: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(view["profile"]["personal"]["full_name"], "Jane Doe");
    assert_eq!(view["profile"]["personal"]["primary_email"], "jane@example.com");
    assert!(view["profile"]["personal"].get("mobile_number").is_none());
    assert!(view["profile"]["personal"].get("bio").is_none());
    assert_eq!(view["profile"]["featured"]["company_name"], "Acme");
    assert_eq!(view["display_address"], "1 Rua Augusta, Lisbon");
    assert_eq!(view["tagline"], "CTO");
    let professional = &view["profile"]["professional"][0];
    assert_eq!(professional["office_phone"], "+351 21 000 0000");
    assert!(professional.get("office_email").is_none());

    // vCard download does not count as a view
    let (status, headers, body) = app
        .send(Method::GET, "/api/public/cards/jane-doe/vcard", None, false, &[])
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::CONTENT_TYPE], "text/vcard; charset=utf-8");
    assert_eq!(
        headers[header::CONTENT_DISPOSITION],
        "attachment; filename=\"Jane Doe.vcf\""
    );
    let vcard = String::from_utf8(body).unwrap();
    assert!(vcard.starts_with("BEGIN:VCARD\r\nVERSION:3.0\r\nFN:Jane Doe\r\nN:Doe;Jane;;;\r\n"));
    assert!(vcard.contains("TEL;TYPE=WORK:+351 21 000 0000\r\n"));
    assert!(!vcard.contains("jane@acme.com"));
    assert!(vcard.ends_with("END:VCARD\r\n"));

    // Owner preview does not count either
    let (status, _) = app
        .json(Method::GET, &format!("/api/cards/{card_id}/preview"), None)
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, summary) = app.json(Method::GET, "/api/analytics?days=7", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["total_views"], 1);
    assert_eq!(summary["unique_visitors"], 1);
    assert_eq!(summary["views_by_card"][0]["card_name"], "Work");
    assert_eq!(summary["views_by_date"].as_array().unwrap().len(), 7);
    assert_eq!(summary["views_by_location"][0]["location"], "Lisbon, Portugal");
    assert_eq!(summary["top_referrers"][0]["referrer"], "www.linkedin.com");
    assert_eq!(summary["recent_views"][0]["ip_address"], "203.0.113.7");
}

#[tokio::test]
async fn test_deleting_entry_unselects_it_from_cards() {
    let app = TestApp::new();
    app.json(Method::PUT, "/api/profile/personal", Some(json!({ "full_name": "Jane" })))
        .await;
    let (_, entry) = app
        .json(
            Method::POST,
            "/api/profile/education",
            Some(json!({ "institution": "MIT", "degree_name": "BSc", "year_completed": 2010 })),
        )
        .await;
    let entry_id = entry["id"].as_str().unwrap().to_string();

    let (_, card) = app
        .json(
            Method::POST,
            "/api/cards",
            Some(json!({ "name": "Work", "fields_config": { "educationIds": [entry_id] } })),
        )
        .await;
    let card_id = card["id"].as_str().unwrap().to_string();

    let (status, _) = app
        .json(Method::DELETE, &format!("/api/profile/education/{entry_id}"), None)
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, card) = app.json(Method::GET, &format!("/api/cards/{card_id}"), None).await;
    assert_eq!(card["fields_config"]["educationIds"], json!([]));
}

#[tokio::test]
async fn test_slug_conflicts_and_inactive_cards() {
    let app = TestApp::new();
    app.json(Method::PUT, "/api/profile/personal", Some(json!({ "full_name": "Jane" })))
        .await;

    let (status, _) = app
        .json(
            Method::POST,
            "/api/cards",
            Some(json!({ "name": "Hidden", "slug": "jane", "is_active": false })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, err) = app
        .json(
            Method::POST,
            "/api/cards",
            Some(json!({ "name": "Again", "slug": "Jane" })),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(err["code"], 4002);

    let (_, availability) = app.json(Method::GET, "/api/cards/slug-available?slug=jane", None).await;
    assert_eq!(availability["available"], false);

    let (status, _, _) = app
        .send(Method::GET, "/api/public/cards/jane", None, false, &[])
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.json(Method::GET, "/api/analytics?days=0", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_view_without_proxy_headers_logs_peer_address() {
    let mut app = TestApp::new();
    let peer: SocketAddr = "203.0.113.7:40522".parse().unwrap();
    app.app = app.app.layer(MockConnectInfo(peer));

    app.json(Method::PUT, "/api/profile/personal", Some(json!({ "full_name": "Jane" })))
        .await;
    app.json(
        Method::POST,
        "/api/cards",
        Some(json!({ "name": "Work", "slug": "jane" })),
    )
    .await;

    let (status, _, _) = app
        .send(Method::GET, "/api/public/cards/jane", None, false, &[])
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, summary) = app.json(Method::GET, "/api/analytics", None).await;
    assert_eq!(summary["recent_views"][0]["ip_address"], "203.0.113.7");
    assert_eq!(summary["views_by_location"][0]["location"], "Lisbon, Portugal");
}
