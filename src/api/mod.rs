//! REST API over the device registry and the synthetic data generators.
//!
//! | Method | Path | Handler |
//! |---|---|---|
//! | GET | `/` | [`handlers::banner`] |
//! | GET | `/health` | [`handlers::health`] |
//! | GET | `/predictions` | [`handlers::get_predictions`] |
//! | GET | `/devices/sample` | [`handlers::list_devices`] |
//! | GET | `/analytics/summary` | [`handlers::get_analytics`] |
//! | POST | `/optimize` | [`handlers::optimize`] |
//! | POST | `/devices/add` | [`handlers::add_device`] |
//! | POST | `/devices/delete` | [`handlers::delete_device`] |
//! | POST | `/devices/toggle` | [`handlers::toggle_device`] |
//! | GET | `/frontend/index.html` | [`handlers::frontend_index`] |
//!
//! `OPTIONS` on any path is answered by the CORS layer. Everything else,
//! including a known path with the wrong method, is a JSON 404.

mod error;
pub mod handlers;
mod types;

use std::future::Future;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};

use axum::Router;
use axum::handler::Handler;
use axum::http::{Method, header};
use axum::routing::{MethodRouter, get, post};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use error::{ApiError, ServerError};
pub use types::ErrorResponse;

use crate::config::Config;
use crate::devices::DeviceRegistry;

/// Application state shared across all request handlers.
///
/// The registry carries its own lock; the random source sits behind a
/// separate mutex so generator calls never contend with registry writes.
pub struct AppState {
    /// Authoritative device records.
    pub registry: DeviceRegistry,
    /// Directory the frontend `index.html` is read from.
    pub frontend_dir: PathBuf,
    rng: Mutex<StdRng>,
}

impl AppState {
    /// Creates state from an explicit registry and random source.
    pub fn new(registry: DeviceRegistry, rng: StdRng, frontend_dir: impl Into<PathBuf>) -> Self {
        Self {
            registry,
            frontend_dir: frontend_dir.into(),
            rng: Mutex::new(rng),
        }
    }

    /// Seed devices plus a generator seeded from `seed`.
    pub fn seeded(seed: u64) -> Self {
        Self::new(
            DeviceRegistry::with_seed_devices(),
            StdRng::seed_from_u64(seed),
            "frontend",
        )
    }

    /// Builds state from the resolved configuration.
    pub fn from_config(config: &Config) -> Self {
        let rng = match config.generators.seed {
            Some(seed) => {
                tracing::info!(seed, "generators use a fixed seed");
                StdRng::seed_from_u64(seed)
            }
            None => StdRng::from_os_rng(),
        };
        Self::new(
            DeviceRegistry::with_seed_devices(),
            rng,
            config.server.frontend_dir.clone(),
        )
    }

    /// Replaces the frontend directory.
    pub fn with_frontend_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.frontend_dir = dir.into();
        self
    }

    /// Runs `f` with exclusive access to the random source.
    pub fn with_rng<T>(&self, f: impl FnOnce(&mut StdRng) -> T) -> T {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut rng)
    }
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

/// GET-only method router. HEAD is answered by the 404 handler rather than
/// by axum's implicit HEAD-from-GET.
fn get_only<H, T>(handler: H) -> MethodRouter<Arc<AppState>>
where
    H: Handler<T, Arc<AppState>>,
    T: 'static,
{
    get(handler)
        .head(handlers::not_found)
        .fallback(handlers::not_found)
}

/// Builds the axum router with all API routes.
///
/// # Arguments
///
/// * `state` - Shared application state
///
/// # Returns
///
/// Configured `Router` ready to serve.
pub fn router(state: Arc<AppState>) -> Router {
    use self::handlers::not_found;

    Router::new()
        .route("/", get_only(handlers::banner))
        .route("/health", get_only(handlers::health))
        .route("/predictions", get_only(handlers::get_predictions))
        .route("/devices/sample", get_only(handlers::list_devices))
        .route("/analytics/summary", get_only(handlers::get_analytics))
        .route("/optimize", post(handlers::optimize).fallback(not_found))
        .route(
            "/devices/add",
            post(handlers::add_device).fallback(not_found),
        )
        .route(
            "/devices/delete",
            post(handlers::delete_device).fallback(not_found),
        )
        .route(
            "/devices/toggle",
            post(handlers::toggle_device).fallback(not_found),
        )
        .route("/frontend/index.html", get_only(handlers::frontend_index))
        .fallback(not_found)
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Binds to `addr` and serves the API until `shutdown` resolves.
///
/// # Errors
///
/// Returns `ServerError::Bind` if the listener cannot bind, or
/// `ServerError::Serve` if the server fails while running.
pub async fn serve<F>(state: Arc<AppState>, addr: SocketAddr, shutdown: F) -> Result<(), ServerError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })?;
    serve_listener(state, listener, shutdown).await
}

/// Serves the API on an already bound listener until `shutdown` resolves.
///
/// # Errors
///
/// Returns `ServerError::Serve` if the server fails while running.
pub async fn serve_listener<F>(
    state: Arc<AppState>,
    listener: TcpListener,
    shutdown: F,
) -> Result<(), ServerError>
where
    F: Future<Output = ()> + Send + 'static,
{
    if let Ok(addr) = listener.local_addr() {
        tracing::info!("API server listening on http://{addr}");
    }
    axum::serve(listener, router(state))
        .with_graceful_shutdown(async move {
            shutdown.await;
            tracing::info!("API server shutting down gracefully");
        })
        .await
        .map_err(ServerError::Serve)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::util::ServiceExt;

    use super::*;

    #[tokio::test]
    async fn preflight_on_any_path() {
        for uri in ["/devices/add", "/nope"] {
            let app = router(Arc::new(AppState::seeded(1)));
            let req = Request::builder()
                .method(Method::OPTIONS)
                .uri(uri)
                .header(header::ORIGIN, "http://example.com")
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                .body(Body::empty())
                .unwrap();
            let resp = app.oneshot(req).await.unwrap();

            assert_eq!(resp.status(), StatusCode::OK);
            let headers = resp.headers();
            assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
            let methods = headers[header::ACCESS_CONTROL_ALLOW_METHODS]
                .to_str()
                .unwrap()
                .to_string();
            for m in ["GET", "POST", "OPTIONS"] {
                assert!(methods.contains(m), "{methods}");
            }
            assert!(
                headers[header::ACCESS_CONTROL_ALLOW_HEADERS]
                    .to_str()
                    .unwrap()
                    .eq_ignore_ascii_case("content-type")
            );

            let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
                .await
                .unwrap();
            assert!(body.is_empty());
        }
    }

    #[test]
    fn with_rng_is_reproducible() {
        let a = AppState::seeded(9);
        let b = AppState::seeded(9);
        let x: u64 = a.with_rng(|r| rand::Rng::random(r));
        let y: u64 = b.with_rng(|r| rand::Rng::random(r));
        assert_eq!(x, y);
    }

    #[tokio::test]
    async fn serve_reports_bind_failure() {
        let held = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = held.local_addr().unwrap();
        let err = serve(Arc::new(AppState::seeded(1)), addr, async {})
            .await
            .unwrap_err();
        assert!(matches!(err, ServerError::Bind { .. }));
    }

    #[tokio::test]
    async fn shutdown_signal_stops_server_and_frees_port() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = tokio::sync::oneshot::channel::<()>();

        let server = tokio::spawn(serve_listener(
            Arc::new(AppState::seeded(1)),
            listener,
            async move {
                rx.await.ok();
            },
        ));

        tx.send(()).unwrap();
        let result = server.await.unwrap();
        assert!(result.is_ok(), "{result:?}");

        let rebound = TcpListener::bind(addr).await;
        assert!(rebound.is_ok(), "port should be free after shutdown");
    }
}
