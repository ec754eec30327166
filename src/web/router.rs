use axum::{
    http::{header, HeaderName, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use std::path::Path;
use std::time::Duration;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    services::{ServeDir, ServeFile},
    set_header::SetResponseHeaderLayer,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::game;
use crate::players;
use crate::shared::{AppError, AppState};

const SECURITY_HEADERS: [(&str, &str); 6] = [
    ("content-security-policy", "default-src 'self'"),
    ("x-xss-protection", "1; mode=block"),
    ("x-frame-options", "sameorigin"),
    ("x-content-type-options", "nosniff"),
    ("x-permitted-cross-domain-policies", "none"),
    ("referrer-policy", "no-referrer-when-downgrade"),
];

/// Requests still running after this long are answered with 408.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Mirrors the request origin back, answering preflight requests itself.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::PUT,
            Method::POST,
            Method::DELETE,
            Method::HEAD,
        ])
        .allow_headers([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::CONTENT_LENGTH,
        ])
        .max_age(Duration::from_secs(86400))
}

async fn not_found() -> AppError {
    AppError::NotFound("no such route".to_string())
}

/// Builds the application router: game and player routes, static assets
/// from `assets_dir`, and the middleware stack.
pub fn router(state: AppState, assets_dir: &Path) -> Router {
    let app = Router::new()
        // home & game actions
        .route("/", get(game::home))
        .route("/game", get(game::get_game))
        .route("/game/start", post(game::start_game))
        .route("/game/pause", post(game::pause_game))
        .route("/game/resume", post(game::resume_game))
        .route("/game/end", post(game::end_game))
        .route("/game/reset", post(game::reset_game))
        // players
        .route("/players", get(players::list_players))
        .route("/players/reset", post(players::reset_players))
        .route("/players/set", post(players::set_players))
        .route("/players/:name/sub-on", post(players::sub_on_player))
        .route("/players/:name/sub-off", post(players::sub_off_player))
        // static assets
        .route_service("/robots.txt", ServeFile::new(assets_dir.join("robots.txt")))
        .route_service("/favicon.ico", ServeFile::new(assets_dir.join("favicon.ico")))
        .nest_service("/static", ServeDir::new(assets_dir))
        .fallback(not_found)
        .with_state(state);

    with_middleware(app, REQUEST_TIMEOUT)
}

fn with_middleware(app: Router, request_timeout: Duration) -> Router {
    let mut app = app.layer(TimeoutLayer::new(request_timeout));

    for (name, value) in SECURITY_HEADERS {
        app = app.layer(SetResponseHeaderLayer::if_not_present(
            HeaderName::from_static(name),
            HeaderValue::from_static(value),
        ));
    }

    app.layer(cors_layer()).layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_utils::AppStateBuilder;
    use axum::{body::Body, http::Request, http::StatusCode};
    use std::io::Write;
    use tower::ServiceExt; // for `oneshot`

    fn assets() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let mut robots = std::fs::File::create(dir.path().join("robots.txt")).unwrap();
        writeln!(robots, "User-agent: *").unwrap();
        std::fs::write(dir.path().join("app.css"), "body {}").unwrap();
        dir
    }

    #[tokio::test]
    async fn test_security_headers_are_set() {
        let dir = assets();
        let app = router(AppStateBuilder::new().build(), dir.path());

        let request = Request::builder().uri("/").body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        for (name, value) in SECURITY_HEADERS {
            assert_eq!(response.headers()[name], value);
        }
    }

    #[tokio::test]
    async fn test_cors_preflight() {
        let dir = assets();
        let app = router(AppStateBuilder::new().build(), dir.path());

        let request = Request::builder()
            .method("OPTIONS")
            .uri("/game/start")
            .header("origin", "http://scoreboard.local")
            .header("access-control-request-method", "POST")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert!(response.status().is_success());
        assert_eq!(
            response.headers()["access-control-allow-origin"],
            "http://scoreboard.local"
        );
        assert_eq!(response.headers()["access-control-allow-credentials"], "true");
    }

    #[tokio::test]
    async fn test_static_assets_served() {
        let dir = assets();
        let state = AppStateBuilder::new().build();

        let request = Request::builder()
            .uri("/robots.txt")
            .body(Body::empty())
            .unwrap();
        let response = router(state.clone(), dir.path())
            .oneshot(request)
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let request = Request::builder()
            .uri("/static/app.css")
            .body(Body::empty())
            .unwrap();
        let response = router(state.clone(), dir.path())
            .oneshot(request)
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let request = Request::builder()
            .uri("/static/missing.css")
            .body(Body::empty())
            .unwrap();
        let response = router(state, dir.path()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let dir = assets();
        let app = router(AppStateBuilder::new().build(), dir.path());

        let request = Request::builder()
            .uri("/scoreboard")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_slow_request_times_out() {
        let app = Router::new().route(
            "/slow",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                "done"
            }),
        );
        let app = with_middleware(app, Duration::from_millis(20));

        let request = Request::builder().uri("/slow").body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
        assert_eq!(response.headers()["x-frame-options"], "sameorigin");
    }
}
