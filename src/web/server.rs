use axum::{
    http::{header, Method},
    Router,
};
use log::info;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
};

use crate::web::api::{create_router, AppState, DEFAULT_MAX_TRACE_NODES};

/// Configuration for the web server
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
    pub static_dir: String,
    pub enable_cors: bool,
    /// Upper bound on vertices accepted by graph creation endpoints
    pub max_nodes: usize,
    /// Upper bound on vertices for traced runs
    pub max_trace_nodes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 3005,
            static_dir: "web".to_string(),
            enable_cors: true,
            max_nodes: 100_000,
            max_trace_nodes: DEFAULT_MAX_TRACE_NODES,
        }
    }
}

impl ServerConfig {
    /// Overrides defaults from `RELAXA_HOST`, `RELAXA_PORT`, `RELAXA_STATIC_DIR`,
    /// `RELAXA_CORS`, `RELAXA_MAX_NODES` and `RELAXA_MAX_TRACE_NODES`.
    /// Unparsable values are ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a custom variable source
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(host) = lookup("RELAXA_HOST").and_then(|v| v.parse().ok()) {
            config.host = host;
        }
        if let Some(port) = lookup("RELAXA_PORT").and_then(|v| v.parse().ok()) {
            config.port = port;
        }
        if let Some(dir) = lookup("RELAXA_STATIC_DIR") {
            config.static_dir = dir;
        }
        if let Some(cors) = lookup("RELAXA_CORS").and_then(|v| v.parse().ok()) {
            config.enable_cors = cors;
        }
        if let Some(max_nodes) = lookup("RELAXA_MAX_NODES").and_then(|v| v.parse().ok()) {
            config.max_nodes = max_nodes;
        }
        if let Some(max_trace_nodes) =
            lookup("RELAXA_MAX_TRACE_NODES").and_then(|v| v.parse().ok())
        {
            config.max_trace_nodes = max_trace_nodes;
        }
        config
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Builds the application: API routes, static front-end files and optional CORS
pub fn build_app(config: &ServerConfig) -> Router {
    let app = Router::new()
        // API routes
        .merge(create_router())
        // Static file serving for the web frontend
        .fallback_service(ServeDir::new(&config.static_dir))
        .with_state(
            AppState::with_max_nodes(config.max_nodes)
                .with_max_trace_nodes(config.max_trace_nodes),
        );

    if config.enable_cors {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

        app.layer(ServiceBuilder::new().layer(cors).into_inner())
    } else {
        app
    }
}

/// Start the web server with custom configuration
pub async fn start_server_with_config(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let app = build_app(&config);
    let addr = config.addr();

    info!("Relaxa web server starting on http://{}", addr);
    info!("Serving static files from: {}", config.static_dir);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Start the web server on localhost with default settings
pub async fn start_server(port: u16) -> Result<(), Box<dyn std::error::Error>> {
    start_server_with_config(ServerConfig {
        port,
        ..Default::default()
    })
    .await
}
