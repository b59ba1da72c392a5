use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use log::{debug, info};
use ordered_float::OrderedFloat;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Instant;
use uuid::Uuid;

use crate::algorithm::engine::ShortestPathEngine;
use crate::algorithm::observer::{NoopObserver, TraceRecorder};
use crate::balancer::RoundRobin;
use crate::graph::generators::{generate_connected, guadalajara, GUADALAJARA_LAYOUT};
use crate::graph::{Graph, MutableGraph, WeightedGraph};
use crate::web::models::*;
use crate::Error;

const MAX_DISPATCH: usize = 100_000;

/// Default bound on vertices for traced runs; a trace holds one copy of every map per step
pub const DEFAULT_MAX_TRACE_NODES: usize = 1_000;

/// Status code and JSON body returned by failing handlers
pub type ApiError = (StatusCode, Json<ErrorResponse>);

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<Mutex<HashMap<Uuid, Session>>>,
    pub balancers: Arc<Mutex<HashMap<Uuid, BalancerSession>>>,
    /// Upper bound on vertices for generated graphs
    pub max_nodes: usize,
    /// Upper bound on vertices for runs with `trace: true`
    pub max_trace_nodes: usize,
}

impl AppState {
    pub fn new() -> Self {
        Self::with_max_nodes(100_000)
    }

    pub fn with_max_nodes(max_nodes: usize) -> Self {
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
            balancers: Arc::new(Mutex::new(HashMap::new())),
            max_nodes,
            max_trace_nodes: DEFAULT_MAX_TRACE_NODES,
        }
    }

    pub fn with_max_trace_nodes(mut self, max_trace_nodes: usize) -> Self {
        self.max_trace_nodes = max_trace_nodes;
        self
    }

    fn sessions(&self) -> MutexGuard<'_, HashMap<Uuid, Session>> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn balancers(&self) -> MutexGuard<'_, HashMap<Uuid, BalancerSession>> {
        self.balancers.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn insert_session(&self, session: Session) -> SessionSummary {
        let summary = session.summary();
        self.sessions().insert(session.id, session);
        summary
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

/// Create the API router
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/sessions", get(list_sessions))
        .route("/api/graphs", post(create_graph))
        .route("/api/graphs/random", post(create_random_graph))
        .route("/api/presets/:name", post(create_preset_graph))
        .route("/api/graphs/:session_id", get(get_graph))
        .route("/api/graphs/:session_id/shortest-paths", post(run_shortest_paths))
        .route("/api/graphs/:session_id/paths/:target", get(get_path))
        .route("/api/balancers", post(create_balancer))
        .route("/api/balancers/:balancer_id/requests", post(dispatch_requests))
        .route("/api/balancers/:balancer_id/stats", get(balancer_stats))
}

fn api_error(status: StatusCode, error: &str, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: error.to_string(),
            message: message.into(),
            details: None,
        }),
    )
}

fn from_engine_error(err: Error) -> ApiError {
    let (status, code) = match err {
        Error::InvalidEdge { .. } => (StatusCode::BAD_REQUEST, "invalid_edge"),
        Error::InvalidSource(_) => (StatusCode::BAD_REQUEST, "invalid_source"),
        Error::InvalidNode(_) => (StatusCode::BAD_REQUEST, "invalid_node"),
        Error::NotComputed => (StatusCode::CONFLICT, "not_computed"),
        Error::EmptyPool => (StatusCode::CONFLICT, "empty_pool"),
    };
    api_error(status, code, err.to_string())
}

fn session_not_found() -> ApiError {
    api_error(StatusCode::NOT_FOUND, "session_not_found", "Session not found")
}

/// Liveness probe
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// List all graph sessions
pub async fn list_sessions(State(state): State<AppState>) -> Json<Vec<Uuid>> {
    Json(state.sessions().keys().copied().collect())
}

/// Create a graph from labels and an edge list
pub async fn create_graph(
    State(state): State<AppState>,
    Json(request): Json<GraphCreationRequest>,
) -> Result<Json<SessionSummary>, ApiError> {
    if request.labels.len() > state.max_nodes {
        return Err(api_error(
            StatusCode::BAD_REQUEST,
            "graph_too_large",
            format!("At most {} vertices are allowed", state.max_nodes),
        ));
    }

    let mut graph = WeightedGraph::from_labels(request.labels);
    for (u, v, w) in request.edges {
        if !w.is_finite() {
            return Err(api_error(
                StatusCode::BAD_REQUEST,
                "invalid_edge",
                format!("Edge ({}, {}) has a non-finite weight", u, v),
            ));
        }
        graph
            .add_edge(u, v, OrderedFloat(w))
            .map_err(from_engine_error)?;
    }

    info!(
        "created graph with {} vertices and {} edges",
        graph.node_count(),
        graph.edge_count()
    );
    Ok(Json(state.insert_session(Session::new(graph, None))))
}

/// Create a graph from a built-in map
pub async fn create_preset_graph(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<SessionSummary>, ApiError> {
    let (graph, layout) = match name.as_str() {
        "guadalajara" => (
            guadalajara().map_weights(|w| OrderedFloat(f64::from(w))),
            GUADALAJARA_LAYOUT.to_vec(),
        ),
        _ => {
            return Err(api_error(
                StatusCode::NOT_FOUND,
                "unknown_preset",
                format!("Unknown preset: {}", name),
            ))
        }
    };

    info!("created preset graph '{}'", name);
    Ok(Json(state.insert_session(Session::new(graph, Some(layout)))))
}

/// Generate a connected random graph
pub async fn create_random_graph(
    State(state): State<AppState>,
    Json(request): Json<RandomGraphRequest>,
) -> Result<Json<SessionSummary>, ApiError> {
    if request.node_count == 0 || request.node_count > state.max_nodes {
        return Err(api_error(
            StatusCode::BAD_REQUEST,
            "invalid_node_count",
            format!("node_count must be between 1 and {}", state.max_nodes),
        ));
    }

    let mut rng = match request.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let graph = generate_connected(
        request.node_count,
        request.extra_edges,
        request.max_weight,
        &mut rng,
    )
    .map_weights(|w| OrderedFloat(w as f64));

    Ok(Json(state.insert_session(Session::new(graph, None))))
}

/// Get graph data for a session
pub async fn get_graph(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<SessionSummary>, ApiError> {
    let summary = state.sessions().get(&session_id).map(Session::summary);
    summary.map(Json).ok_or_else(session_not_found)
}

/// Run Dijkstra on a session graph, optionally recording every step
pub async fn run_shortest_paths(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<ShortestPathRequest>,
) -> Result<Json<ShortestPathResponse>, ApiError> {
    let graph = {
        let sessions = state.sessions();
        match sessions.get(&session_id) {
            Some(session) => session.graph.clone(),
            None => return Err(session_not_found()),
        }
    };

    if request.trace && graph.node_count() > state.max_trace_nodes {
        return Err(api_error(
            StatusCode::BAD_REQUEST,
            "trace_too_large",
            format!(
                "Tracing is limited to graphs with at most {} vertices",
                state.max_trace_nodes
            ),
        ));
    }

    let start_time = Instant::now();
    let mut engine = ShortestPathEngine::new(&graph);
    let mut recorder = TraceRecorder::new();
    let computed = if request.trace {
        engine.compute_observed(request.source, &mut recorder)
    } else {
        engine.compute_observed(request.source, &mut NoopObserver)
    };
    let result = computed.map_err(from_engine_error)?.clone();
    let execution_time = start_time.elapsed();

    debug!(
        "session {}: shortest paths from {} in {:?}",
        session_id, request.source, execution_time
    );

    let response = ShortestPathResponse::new(
        &result,
        recorder.into_snapshots(),
        execution_time.as_secs_f64() * 1000.0,
    );

    // Update session with result
    if let Some(session) = state.sessions().get_mut(&session_id) {
        session.last_result = Some(result);
    }

    Ok(Json(response))
}

/// Reconstruct the path from the last computed source to `target`
pub async fn get_path(
    State(state): State<AppState>,
    Path((session_id, target)): Path<(Uuid, usize)>,
) -> Result<Json<PathResponse>, ApiError> {
    let sessions = state.sessions();
    let session = sessions.get(&session_id).ok_or_else(session_not_found)?;
    let result = session
        .last_result
        .as_ref()
        .ok_or_else(|| from_engine_error(Error::NotComputed))?;

    let path = result.path_to(target).map_err(from_engine_error)?;
    let response = match path {
        Some(path) => PathResponse {
            source: result.source,
            target,
            found: true,
            distance: Some(path.distance.into_inner()),
            labels: path
                .nodes
                .iter()
                .map(|&n| session.graph.label(n).map(str::to_owned).unwrap_or_else(|| n.to_string()))
                .collect(),
            nodes: path.nodes,
        },
        None => PathResponse {
            source: result.source,
            target,
            found: false,
            distance: None,
            nodes: Vec::new(),
            labels: Vec::new(),
        },
    };

    Ok(Json(response))
}

/// Create a round-robin dispatcher
pub async fn create_balancer(
    State(state): State<AppState>,
    Json(request): Json<BalancerRequest>,
) -> Result<Json<BalancerStatsResponse>, ApiError> {
    if request.servers == 0 {
        return Err(from_engine_error(Error::EmptyPool));
    }

    let session = BalancerSession::new(RoundRobin::with_servers(request.servers));
    let stats = session.stats();
    state.balancers().insert(session.id, session);

    info!("created balancer {} with {} servers", stats.id, request.servers);
    Ok(Json(stats))
}

/// Dispatch `count` requests through a dispatcher
pub async fn dispatch_requests(
    State(state): State<AppState>,
    Path(balancer_id): Path<Uuid>,
    Json(request): Json<DispatchRequest>,
) -> Result<Json<DispatchResponse>, ApiError> {
    if request.count > MAX_DISPATCH {
        return Err(api_error(
            StatusCode::BAD_REQUEST,
            "too_many_requests",
            format!("At most {} requests can be dispatched per call", MAX_DISPATCH),
        ));
    }

    let mut balancers = state.balancers();
    let session = balancers.get_mut(&balancer_id).ok_or_else(session_not_found)?;

    let mut assignments = Vec::with_capacity(request.count);
    for _ in 0..request.count {
        let request_id = session.next_request_id;
        let server = session
            .balancer
            .process_request(request_id)
            .map_err(from_engine_error)?
            .to_owned();
        session.next_request_id += 1;
        assignments.push(Assignment { request_id, server });
    }

    Ok(Json(DispatchResponse {
        assignments,
        total_requests: session.balancer.total_requests(),
    }))
}

/// Per-server load statistics
pub async fn balancer_stats(
    State(state): State<AppState>,
    Path(balancer_id): Path<Uuid>,
) -> Result<Json<BalancerStatsResponse>, ApiError> {
    let stats = state.balancers().get(&balancer_id).map(BalancerSession::stats);
    stats.map(Json).ok_or_else(session_not_found)
}
