//! HTTP API for the Onboard Bulk Mail back-office.
//!
//! Serves the public list of onboarding sections and an admin area, gated by
//! a bearer credential from [`bms_session::SessionGuard`], with CRUD and
//! reorder endpoints over the section and post stores.

pub mod auth;
pub mod config;
pub mod error;
pub mod handler;
pub mod router;
pub mod server;
pub mod state;
pub mod validation;

pub use auth::{AdminSession, Credentials};
pub use config::{AppSettings, ServerConfig};
pub use error::{ServerError, ServerResult};
pub use server::BmsServer;
pub use state::AppState;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode};
    use axum::Router;
    use serde_json::{json, Value};
    use tower::util::ServiceExt;

    fn app() -> Router {
        router::build_router(AppState::in_memory().unwrap())
    }

    async fn call(
        app: &Router,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {token}"));
        }
        let body = match body {
            Some(value) => {
                builder = builder.header("content-type", "application/json");
                Body::from(value.to_string())
            }
            None => Body::empty(),
        };
        let response = app
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    async fn login(app: &Router) -> String {
        let (status, body) = call(
            app,
            Method::POST,
            "/v1/session",
            None,
            Some(json!({ "email": "admin@example.com", "password": "admin123" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        body["token"].as_str().unwrap().to_string()
    }

    fn titles(items: &Value) -> Vec<String> {
        items
            .as_array()
            .unwrap()
            .iter()
            .map(|item| item["fields"]["title"].as_str().unwrap().to_string())
            .collect()
    }

    #[tokio::test]
    async fn health_endpoint() {
        let (status, body) = call(&app(), Method::GET, "/v1/health", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn info_endpoint() {
        let (status, body) = call(&app(), Method::GET, "/v1/info", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["app_name"], "Onboard Bulk Mail");
    }

    #[tokio::test]
    async fn login_with_wrong_password_is_unauthorized() {
        let (status, body) = call(
            &app(),
            Method::POST,
            "/v1/session",
            None,
            Some(json!({ "identifier": "admin@example.com", "secret": "nope" })),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "auth error: invalid credentials");
    }

    #[tokio::test]
    async fn admin_routes_require_credential() {
        let app = app();
        let (status, _) = call(&app, Method::GET, "/v1/admin/sections", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) =
            call(&app, Method::GET, "/v1/admin/dashboard", Some("forged"), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn public_onboard_lists_active_sections_only() {
        let app = app();
        let token = login(&app).await;
        let (_, sections) =
            call(&app, Method::GET, "/v1/admin/sections", Some(&token), None).await;
        let welcome = sections[0]["id"].as_str().unwrap().to_string();

        let (status, _) = call(
            &app,
            Method::PATCH,
            &format!("/v1/admin/sections/{welcome}"),
            Some(&token),
            Some(json!({ "active": false })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, public) = call(&app, Method::GET, "/v1/onboard", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(titles(&public), ["Profile Setup"]);
    }

    #[tokio::test]
    async fn create_reorder_delete_flow() {
        let app = app();
        let token = login(&app).await;

        let (status, created) = call(
            &app,
            Method::POST,
            "/v1/admin/sections",
            Some(&token),
            Some(json!({ "fields": { "title": "Learn", "icon": "learn" } })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["position"], 3);
        assert_eq!(created["fields"]["category"], "Getting Started");
        let id = created["id"].as_str().unwrap().to_string();

        let (status, ordered) = call(
            &app,
            Method::PUT,
            &format!("/v1/admin/sections/{id}/position"),
            Some(&token),
            Some(json!({ "position": 1 })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(titles(&ordered), ["Learn", "Welcome", "Profile Setup"]);

        let (status, _) = call(
            &app,
            Method::PUT,
            &format!("/v1/admin/sections/{id}/position"),
            Some(&token),
            Some(json!({ "position": 4 })),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let (status, _) = call(
            &app,
            Method::DELETE,
            &format!("/v1/admin/sections/{id}"),
            Some(&token),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (_, remaining) =
            call(&app, Method::GET, "/v1/admin/sections", Some(&token), None).await;
        assert_eq!(titles(&remaining), ["Welcome", "Profile Setup"]);
        assert_eq!(remaining[1]["position"], 2);
    }

    #[tokio::test]
    async fn missing_item_is_not_found() {
        let app = app();
        let token = login(&app).await;
        let (status, body) = call(
            &app,
            Method::PATCH,
            "/v1/admin/posts/missing-id",
            Some(&token),
            Some(json!({ "fields": { "title": "x" } })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["error"].as_str().unwrap().contains("missing-id"));
    }

    #[tokio::test]
    async fn invalid_post_is_rejected() {
        let app = app();
        let token = login(&app).await;
        let (status, _) = call(
            &app,
            Method::POST,
            "/v1/admin/posts",
            Some(&token),
            Some(json!({ "fields": { "title": "x", "category": "Gardening" } })),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let (_, posts) = call(&app, Method::GET, "/v1/admin/posts", Some(&token), None).await;
        assert_eq!(posts.as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn dashboard_counts() {
        let app = app();
        let token = login(&app).await;
        let (status, summary) =
            call(&app, Method::GET, "/v1/admin/dashboard", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            summary,
            json!({
                "total_posts": 2,
                "total_sections": 2,
                "active_sections": 2,
                "posts_this_week": 2,
            })
        );
    }

    #[tokio::test]
    async fn settings_round_trip() {
        let app = app();
        let token = login(&app).await;
        let (status, updated) = call(
            &app,
            Method::PUT,
            "/v1/admin/settings",
            Some(&token),
            Some(json!({ "app_name": "Bulk MS", "admin_email": "ops@example.com" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["app_name"], "Bulk MS");

        let (_, info) = call(&app, Method::GET, "/v1/info", None, None).await;
        assert_eq!(info["app_name"], "Bulk MS");
    }

    #[tokio::test]
    async fn logout_revokes_credential() {
        let app = app();
        let token = login(&app).await;

        let (status, me) = call(&app, Method::GET, "/v1/session", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(me["principal"]["role"], "admin");

        let (status, _) = call(&app, Method::DELETE, "/v1/session", Some(&token), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _) = call(&app, Method::GET, "/v1/admin/posts", Some(&token), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}
