use axum::routing::{get, post, put};
use axum::{Extension, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use bms_types::CollectionKind;

use crate::handler;
use crate::state::AppState;

/// Build the axum router with all back-office endpoints.
pub fn build_router(state: AppState) -> Router {
    let mut router = Router::new()
        .route("/v1/health", get(handler::health_handler))
        .route("/v1/info", get(handler::info_handler))
        .route(
            "/v1/session",
            post(handler::login_handler)
                .get(handler::whoami_handler)
                .delete(handler::logout_handler),
        )
        .route("/v1/onboard", get(handler::onboard_handler))
        .route("/v1/admin/dashboard", get(handler::dashboard_handler))
        .route(
            "/v1/admin/settings",
            get(handler::get_settings_handler).put(handler::put_settings_handler),
        );

    for kind in CollectionKind::ALL {
        router = router.nest(&format!("/v1/admin/{kind}"), collection_routes(kind));
    }

    router
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// CRUD and reorder routes for one collection.
fn collection_routes(kind: CollectionKind) -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handler::list_items_handler).post(handler::create_item_handler),
        )
        .route(
            "/:id",
            get(handler::get_item_handler)
                .patch(handler::update_item_handler)
                .delete(handler::delete_item_handler),
        )
        .route("/:id/position", put(handler::move_item_handler))
        .layer(Extension(kind))
}
