//! HTTP surface for the callback service.

use crate::domain::{CallbackError, CallbackQuery, GatewayConfig, GatewayError};
use crate::middleware::TracingLayer;
use crate::ports::CallbackApi;
use crate::service::CallbackService;
use axum::{
    extract::{DefaultBodyLimit, Query, State},
    http::header,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use std::sync::Arc;
use tokio::sync::oneshot;
use tower::ServiceBuilder;
use tower_http::timeout::TimeoutLayer;
use tracing::info;

/// Sends the graceful-shutdown signal to a running [`CallbackServer`].
#[derive(Debug)]
pub struct ShutdownHandle {
    tx: Option<oneshot::Sender<()>>,
}

impl ShutdownHandle {
    /// Trigger graceful shutdown. In-flight requests are allowed to finish.
    pub fn shutdown(&mut self) {
        if let Some(tx) = self.tx.take() {
            let _ = tx.send(());
        }
    }
}

/// Callback HTTP server
pub struct CallbackServer {
    config: GatewayConfig,
    service: Arc<CallbackService>,
    extra_routes: Vec<Router>,
    shutdown_rx: Option<oneshot::Receiver<()>>,
}

impl CallbackServer {
    /// Create a server for `service`.
    pub fn new(config: GatewayConfig, service: Arc<CallbackService>) -> Result<Self, GatewayError> {
        config.validate()?;

        Ok(Self {
            config,
            service,
            extra_routes: Vec::new(),
            shutdown_rx: None,
        })
    }

    /// Serve additional routes next to the callback (debug views and the
    /// like). They share the middleware stack.
    pub fn merge(mut self, routes: Router) -> Self {
        self.extra_routes.push(routes);
        self
    }

    /// Handle that stops [`run`](Self::run). Only the latest handle works.
    pub fn shutdown_handle(&mut self) -> ShutdownHandle {
        let (tx, rx) = oneshot::channel();
        self.shutdown_rx = Some(rx);
        ShutdownHandle { tx: Some(tx) }
    }

    /// Get configuration
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Build the router with middleware applied
    pub fn router(&self) -> Router {
        let state = AppState {
            service: Arc::clone(&self.service),
        };

        let middleware = ServiceBuilder::new()
            .layer(TracingLayer::new())
            .layer(TimeoutLayer::new(self.config.timeouts.request))
            .layer(DefaultBodyLimit::max(self.config.limits.max_body_size));

        let mut router = Router::new()
            .route(
                &self.config.callback.path,
                get(verify_url).post(receive_message),
            )
            .route("/", get(liveness))
            .route("/health", get(health_check))
            .route("/debug/metrics", get(metrics))
            .with_state(state);

        for routes in &self.extra_routes {
            router = router.merge(routes.clone());
        }

        router.layer(middleware)
    }

    /// Bind and serve until the shutdown handle fires.
    pub async fn run(mut self) -> Result<(), GatewayError> {
        let addr = self.config.http_addr();
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| GatewayError::Bind(format!("{}: {}", addr, e)))?;

        info!(
            addr = %addr,
            callback = %self.config.callback.path,
            corp_id = %self.service.corp_id(),
            "Callback gateway listening"
        );

        let router = self.router();
        let shutdown_rx = self.shutdown_rx.take();

        axum::serve(listener, router)
            .with_graceful_shutdown(async move {
                match shutdown_rx {
                    Some(rx) => {
                        let _ = rx.await;
                        info!("Received shutdown signal");
                    }
                    None => std::future::pending::<()>().await,
                }
            })
            .await?;

        info!("Callback gateway stopped");
        Ok(())
    }
}

/// Application state shared across handlers
#[derive(Clone)]
struct AppState {
    service: Arc<CallbackService>,
}

/// GET: ownership handshake
async fn verify_url(
    State(state): State<AppState>,
    Query(query): Query<CallbackQuery>,
) -> Result<String, CallbackError> {
    state.service.verify_url(&query).await
}

/// POST: encrypted message delivery
async fn receive_message(
    State(state): State<AppState>,
    Query(query): Query<CallbackQuery>,
    body: String,
) -> Result<impl IntoResponse, CallbackError> {
    let reply = state.service.handle_message(&query, &body).await?;
    Ok(([(header::CONTENT_TYPE, "application/xml")], reply))
}

async fn liveness() -> &'static str {
    "ok - Jarvis is alive"
}

/// Health check endpoint
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "callback-gateway",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

async fn metrics(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.service.metrics().to_json())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CallbackSecrets, InboundMessage};
    use crate::ports::MessageHandler;
    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    struct Echo;

    #[async_trait]
    impl MessageHandler for Echo {
        async fn handle(&self, message: &InboundMessage) -> String {
            message.content.clone()
        }
    }

    fn server(config: GatewayConfig) -> CallbackServer {
        let service = CallbackService::new(
            CallbackSecrets::new(
                "t1",
                "jWmYm7qr5nMoAUwZRjGtBxmz3KA1tkAj3ykkR6q2B2C",
                "wx5823bf96d3bd56c7",
            ),
            Arc::new(Echo),
        )
        .unwrap();
        CallbackServer::new(config, Arc::new(service)).unwrap()
    }

    async fn body_text(response: axum::response::Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_handshake_over_http() {
        let router = server(GatewayConfig::default()).router();
        let uri = "/wecom/callback?msg_signature=df53d25a07e6e2465cbce819eb966a038ac61669\
            &timestamp=1409659589&nonce=263014780\
            &echostr=sKqRbbiSUnDhFHOvPjtUMWzf2R8PrpMiTTPaicBgqZlYW%2FWsF6SiFd2z9CriX2YpWYzF1yrNNQ0SomM3ovdnfA%3D%3D";

        let response = router
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "1616140317555161061");
    }

    #[tokio::test]
    async fn test_missing_params_over_http() {
        let router = server(GatewayConfig::default()).router();
        let response = router
            .oneshot(Request::get("/wecom/callback").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_text(response).await, "missing params");
    }

    #[tokio::test]
    async fn test_empty_post_is_bad_request() {
        let router = server(GatewayConfig::default()).router();
        let response = router
            .oneshot(
                Request::post("/wecom/callback?msg_signature=a&timestamp=1&nonce=2")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_oversized_body_rejected() {
        let mut config = GatewayConfig::default();
        config.limits.max_body_size = 64;
        let router = server(config).router();

        let response = router
            .oneshot(
                Request::post("/wecom/callback?msg_signature=a&timestamp=1&nonce=2")
                    .body(Body::from("x".repeat(1024)))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn test_custom_path_and_health() {
        let mut config = GatewayConfig::default();
        config.callback.path = "/cb".into();
        let router = server(config).router();

        let response = router
            .clone()
            .oneshot(Request::get("/cb").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = router
            .clone()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = router
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(body_text(response).await, "ok - Jarvis is alive");
    }

    #[tokio::test]
    async fn test_metrics_endpoint_counts_rejections() {
        let server = server(GatewayConfig::default());
        let router = server.router();

        let _ = router
            .clone()
            .oneshot(Request::get("/wecom/callback").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let response = router
            .oneshot(Request::get("/debug/metrics").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(json["requests"]["rejected"], 1);
    }

    #[tokio::test]
    async fn test_merged_routes_are_served() {
        let extra = Router::new().route("/debug/items", get(|| async { "[]" }));
        let router = server(GatewayConfig::default()).merge(extra).router();

        let response = router
            .oneshot(Request::get("/debug/items").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "[]");
    }

    #[tokio::test]
    async fn test_run_stops_on_shutdown() {
        let mut config = GatewayConfig::default();
        config.http.host = std::net::IpAddr::V4(std::net::Ipv4Addr::LOCALHOST);
        config.http.port = 0;
        let mut server = server(config);
        let mut handle = server.shutdown_handle();

        let task = tokio::spawn(server.run());
        handle.shutdown();

        let result = tokio::time::timeout(std::time::Duration::from_secs(5), task)
            .await
            .unwrap()
            .unwrap();
        assert!(result.is_ok());
    }
}
