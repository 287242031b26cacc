//! Wire contract with the remote solver service plus the request builder.
//! The service speaks JSON over HTTP; one POST per submission, no retries.

use gloo::net::http::Request;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::GridState;

/// Same-origin proxy path that forwards to the solver backend.
pub const SOLVER_ENDPOINT: &str = "/api/proxy/solve";

pub struct AlgorithmSpec {
    pub id: &'static str,
    pub name: &'static str,
    pub needs_heuristic: bool,
    pub needs_beam_width: bool,
}

/// Closed set of algorithm identifiers the backend understands.
pub const ALGORITHMS: &[AlgorithmSpec] = &[
    AlgorithmSpec { id: "bfs", name: "BFS", needs_heuristic: false, needs_beam_width: false },
    AlgorithmSpec { id: "dfs", name: "DFS", needs_heuristic: false, needs_beam_width: false },
    AlgorithmSpec { id: "dijkstra", name: "Dijkstra", needs_heuristic: false, needs_beam_width: false },
    AlgorithmSpec { id: "astar", name: "A*", needs_heuristic: true, needs_beam_width: false },
    AlgorithmSpec { id: "iterative_deepening", name: "IDDFS", needs_heuristic: false, needs_beam_width: false },
    AlgorithmSpec { id: "bidirectional", name: "Bidirectional", needs_heuristic: false, needs_beam_width: false },
    AlgorithmSpec { id: "local_beam", name: "Local Beam", needs_heuristic: false, needs_beam_width: true },
    AlgorithmSpec { id: "rrt", name: "RRT", needs_heuristic: false, needs_beam_width: false },
    AlgorithmSpec { id: "greedy_best_first", name: "Greedy Best-First", needs_heuristic: true, needs_beam_width: false },
    AlgorithmSpec { id: "ucs", name: "UCS", needs_heuristic: false, needs_beam_width: false },
];

pub fn algorithm(id: &str) -> Option<&'static AlgorithmSpec> {
    ALGORITHMS.iter().find(|a| a.id == id)
}

pub fn display_name(id: &str) -> &str {
    algorithm(id).map(|a| a.name).unwrap_or(id)
}

/// Heuristic ids accepted by `astar` and `greedy_best_first`, indexed the way
/// the backend indexes them.
pub const HEURISTICS: &[&str] = &[
    "Manhattan",
    "Diagonal",
    "Euclidean",
    "Chebyshev",
    "Octile",
    "Squared Euclidean",
];

/// Algorithm parameters gathered from the controls panel.
#[derive(Clone, Debug, PartialEq)]
pub struct SolveOptions {
    pub algorithm: String,
    /// 4 = orthogonal neighbors only, 8 = include diagonals.
    pub directions: u8,
    pub heuristic_type: u8,
    pub beam_width: usize,
}

impl Default for SolveOptions {
    fn default() -> Self {
        Self {
            algorithm: "bfs".to_string(),
            directions: 4,
            heuristic_type: 0,
            beam_width: 5,
        }
    }
}

/// Immutable snapshot sent to the solver. Optional fields are omitted from
/// the JSON body when the selected algorithm or grid mode does not use them,
/// so older backend variants keep working.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SolveRequest {
    pub start: [usize; 2],
    pub end: [usize; 2],
    pub blocks: Vec<Vec<bool>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weights: Option<Vec<Vec<u8>>>,
    pub size: usize,
    pub directions: u8,
    pub algorithm: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heuristic_type: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub beam_width: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_weighted: Option<bool>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct SolveMetrics {
    #[serde(default)]
    pub explored_size: u32,
    #[serde(default)]
    pub frontier_size: u32,
    #[serde(default)]
    pub time_taken_ms: f64,
    #[serde(default)]
    pub path_length: u32,
    #[serde(default)]
    pub total_cost: Option<f64>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct SolveResponse {
    /// `None` means the solver found no path.
    #[serde(default)]
    pub path: Option<Vec<[usize; 2]>>,
    /// Cells in visitation order; never contains duplicates.
    #[serde(default)]
    pub exploration_order: Vec<[usize; 2]>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub metrics: SolveMetrics,
}

/// Malformed local input; blocks submission before any network traffic.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("beam width must be between 1 and {max} for this grid size (got {got})")]
    BeamWidth { max: usize, got: usize },
    #[error("unknown algorithm `{0}`")]
    UnknownAlgorithm(String),
}

/// Failure talking to the solver, as opposed to the solver reporting one.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("malformed solver response: {0}")]
    Decode(String),
}

/// Builds the request snapshot from the current grid and options. All local
/// validation happens here; nothing downstream re-checks.
pub fn build_request(
    grid: &GridState,
    opts: &SolveOptions,
) -> Result<SolveRequest, ValidationError> {
    let spec = algorithm(&opts.algorithm)
        .ok_or_else(|| ValidationError::UnknownAlgorithm(opts.algorithm.clone()))?;

    let beam_width = if spec.needs_beam_width {
        let max = grid.size.saturating_sub(1);
        if opts.beam_width < 1 || opts.beam_width > max {
            return Err(ValidationError::BeamWidth {
                max,
                got: opts.beam_width,
            });
        }
        Some(opts.beam_width)
    } else {
        None
    };

    Ok(SolveRequest {
        start: [grid.start.row, grid.start.col],
        end: [grid.goal.row, grid.goal.col],
        blocks: grid.blocks_rows(),
        weights: grid.weighting_enabled.then(|| grid.weights_rows()),
        size: grid.size,
        directions: if opts.directions == 8 { 8 } else { 4 },
        algorithm: spec.id.to_string(),
        heuristic_type: spec.needs_heuristic.then_some(opts.heuristic_type),
        beam_width,
        is_weighted: grid.weighting_enabled.then_some(true),
    })
}

/// Single best-effort call to the solver. Transport and decode failures are
/// reported separately so the caller can log them apart from solver-reported
/// "no path" results.
pub async fn solve(request: &SolveRequest) -> Result<SolveResponse, GatewayError> {
    let response = Request::post(SOLVER_ENDPOINT)
        .json(request)
        .map_err(|err| GatewayError::Transport(err.to_string()))?
        .send()
        .await
        .map_err(|err| GatewayError::Transport(err.to_string()))?;
    if !response.ok() {
        return Err(GatewayError::Transport(format!(
            "HTTP {} from solver",
            response.status()
        )));
    }
    response
        .json::<SolveResponse>()
        .await
        .map_err(|err| GatewayError::Decode(err.to_string()))
}
