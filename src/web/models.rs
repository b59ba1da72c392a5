use chrono::{DateTime, Utc};
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::algorithm::observer::Snapshot;
use crate::algorithm::{SearchStats, ShortestPathResult};
use crate::balancer::{RoundRobin, ServerStats};
use crate::graph::{Graph, WeightedGraph};

/// Weight type used by every graph held by the server
pub type WebWeight = OrderedFloat<f64>;

/// Represents a node in the graph for web visualization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebNode {
    pub id: usize,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
}

/// Represents an edge in the graph for web visualization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebEdge {
    pub source: usize,
    pub target: usize,
    pub weight: f64,
}

/// Represents a complete graph for web visualization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebGraph {
    pub nodes: Vec<WebNode>,
    pub links: Vec<WebEdge>,
}

impl WebGraph {
    /// Converts a graph, attaching `layout` coordinates where provided
    pub fn from_graph(graph: &WeightedGraph<WebWeight>, layout: Option<&[(f64, f64)]>) -> Self {
        let nodes = (0..graph.node_count())
            .map(|id| {
                let position = layout.and_then(|l| l.get(id)).copied();
                WebNode {
                    id,
                    label: graph
                        .label(id)
                        .map(str::to_owned)
                        .unwrap_or_else(|| id.to_string()),
                    x: position.map(|p| p.0),
                    y: position.map(|p| p.1),
                }
            })
            .collect();
        let links = graph
            .edges()
            .iter()
            .map(|&(source, target, weight)| WebEdge {
                source,
                target,
                weight: weight.into_inner(),
            })
            .collect();
        WebGraph { nodes, links }
    }
}

/// Graph given inline by the client
#[derive(Debug, Deserialize)]
pub struct GraphCreationRequest {
    pub labels: Vec<String>,
    #[serde(default)]
    pub edges: Vec<(usize, usize, f64)>,
}

/// Parameters for random graph generation
#[derive(Debug, Deserialize)]
pub struct RandomGraphRequest {
    pub node_count: usize,
    #[serde(default)]
    pub extra_edges: usize,
    #[serde(default = "default_max_weight")]
    pub max_weight: u64,
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_max_weight() -> u64 {
    100
}

/// Parameters for a shortest path run
#[derive(Debug, Deserialize)]
pub struct ShortestPathRequest {
    pub source: usize,
    /// Record a snapshot of every finalization
    #[serde(default)]
    pub trace: bool,
}

/// Response containing algorithm execution results.
/// Unreachable distances are `null`.
#[derive(Debug, Clone, Serialize)]
pub struct ShortestPathResponse {
    pub execution_id: Uuid,
    pub source: usize,
    pub execution_time_ms: f64,
    pub distances: Vec<Option<f64>>,
    pub predecessors: Vec<Option<usize>>,
    pub settle_order: Vec<usize>,
    pub stats: SearchStats,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub trace: Vec<Snapshot<f64>>,
}

impl ShortestPathResponse {
    pub fn new(
        result: &ShortestPathResult<WebWeight>,
        trace: Vec<Snapshot<WebWeight>>,
        execution_time_ms: f64,
    ) -> Self {
        ShortestPathResponse {
            execution_id: Uuid::new_v4(),
            source: result.source,
            execution_time_ms,
            distances: to_plain(&result.distances),
            predecessors: result.predecessors.clone(),
            settle_order: result.settle_order.clone(),
            stats: result.stats,
            trace: trace
                .into_iter()
                .map(|s| Snapshot {
                    step: s.step,
                    source: s.source,
                    current: s.current,
                    distances: to_plain(&s.distances),
                    visited: s.visited,
                    predecessors: s.predecessors,
                    frontier_len: s.frontier_len,
                })
                .collect(),
        }
    }
}

fn to_plain(distances: &[Option<WebWeight>]) -> Vec<Option<f64>> {
    distances.iter().map(|d| d.map(|w| w.into_inner())).collect()
}

/// A reconstructed path, or `found: false` when the target is unreachable
#[derive(Debug, Clone, Serialize)]
pub struct PathResponse {
    pub source: usize,
    pub target: usize,
    pub found: bool,
    pub distance: Option<f64>,
    pub nodes: Vec<usize>,
    pub labels: Vec<String>,
}

/// Parameters for creating a dispatcher
#[derive(Debug, Deserialize)]
pub struct BalancerRequest {
    pub servers: usize,
}

/// Number of requests to dispatch in one call
#[derive(Debug, Deserialize)]
pub struct DispatchRequest {
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct Assignment {
    pub request_id: u64,
    pub server: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DispatchResponse {
    pub assignments: Vec<Assignment>,
    pub total_requests: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct BalancerStatsResponse {
    pub id: Uuid,
    pub total_requests: usize,
    pub servers: Vec<ServerStats>,
}

/// Error response for API
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub details: Option<serde_json::Value>,
}

/// Session containing a graph and the last completed run on it
#[derive(Debug, Clone)]
pub struct Session {
    pub id: Uuid,
    pub graph: WeightedGraph<WebWeight>,
    pub layout: Option<Vec<(f64, f64)>>,
    pub last_result: Option<ShortestPathResult<WebWeight>>,
    pub created_at: DateTime<Utc>,
}

impl Session {
    pub fn new(graph: WeightedGraph<WebWeight>, layout: Option<Vec<(f64, f64)>>) -> Self {
        Self {
            id: Uuid::new_v4(),
            graph,
            layout,
            last_result: None,
            created_at: Utc::now(),
        }
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            id: self.id,
            created_at: self.created_at,
            graph: WebGraph::from_graph(&self.graph, self.layout.as_deref()),
            last_source: self.last_result.as_ref().map(|r| r.source),
        }
    }
}

/// Serializable view of a [`Session`]
#[derive(Debug, Clone, Serialize)]
pub struct SessionSummary {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub graph: WebGraph,
    pub last_source: Option<usize>,
}

/// Dispatcher session
#[derive(Debug, Clone)]
pub struct BalancerSession {
    pub id: Uuid,
    pub balancer: RoundRobin,
    pub next_request_id: u64,
    pub created_at: DateTime<Utc>,
}

impl BalancerSession {
    pub fn new(balancer: RoundRobin) -> Self {
        Self {
            id: Uuid::new_v4(),
            balancer,
            next_request_id: 1,
            created_at: Utc::now(),
        }
    }

    pub fn stats(&self) -> BalancerStatsResponse {
        BalancerStatsResponse {
            id: self.id,
            total_requests: self.balancer.total_requests(),
            servers: self.balancer.statistics(),
        }
    }
}
