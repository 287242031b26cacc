//! Result playback: turns a solver response into an ordered, cancelable
//! animation over the grid overlay. One session at a time; edits and new
//! submissions cancel the current one before doing anything else.

use std::cell::Cell;
use std::rc::Rc;

use gloo::timers::future::TimeoutFuture;
use yew::Callback;

use crate::model::Pos;
use crate::solver::{display_name, SolveMetrics, SolveResponse};

/// Delay between revealed cells, matching the solver service demo pacing.
pub const STEP_DELAY_MS: u32 = 10;

/// How a playback step paints a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellVisual {
    Explored,
    Path,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Frame {
    pub pos: Pos,
    pub visual: CellVisual,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Animating,
    Done,
}

/// Lets the UI cancel a session it no longer owns a `&mut` to. Cancellation
/// is observed at the next step boundary; frames already rendered stay.
#[derive(Clone)]
pub struct CancelHandle(Rc<Cell<bool>>);

impl CancelHandle {
    pub fn cancel(&self) {
        self.0.set(true);
    }
}

/// Monotonic submission counter shared between the UI and in-flight solve
/// tasks. Every edit or new submission moves the generation on; a task whose
/// token is no longer current drops its response instead of animating, so at
/// most one session ever reaches the overlay.
#[derive(Clone, Default)]
pub struct Generation(Rc<Cell<u64>>);

impl Generation {
    /// Advances the counter and returns the new token.
    pub fn bump(&self) -> u64 {
        let next = self.0.get() + 1;
        self.0.set(next);
        next
    }

    pub fn current(&self) -> u64 {
        self.0.get()
    }

    pub fn is_current(&self, token: u64) -> bool {
        self.0.get() == token
    }
}

/// Transient per-solve session: the frame sequence and a cursor into it.
pub struct PlaybackSession {
    frames: Vec<Frame>,
    cursor: usize,
    cancelled: Rc<Cell<bool>>,
    phase: Phase,
}

impl PlaybackSession {
    pub fn new(frames: Vec<Frame>) -> Self {
        Self {
            frames,
            cursor: 0,
            cancelled: Rc::new(Cell::new(false)),
            phase: Phase::Idle,
        }
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        CancelHandle(self.cancelled.clone())
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Advances the cursor by one frame. Returns `None` once the sequence is
    /// exhausted (phase becomes `Done`) or cancellation was observed (phase
    /// falls back to `Idle`).
    pub fn next_frame(&mut self) -> Option<Frame> {
        if self.phase == Phase::Done {
            return None;
        }
        if self.cancelled.get() {
            self.phase = Phase::Idle;
            return None;
        }
        match self.frames.get(self.cursor).copied() {
            Some(frame) => {
                self.cursor += 1;
                self.phase = Phase::Animating;
                Some(frame)
            }
            None => {
                self.phase = Phase::Done;
                None
            }
        }
    }
}

/// Raw solver metrics plus the derived figures the metrics panel shows.
#[derive(Clone, Debug, PartialEq)]
pub struct MetricsView {
    pub explored_size: u32,
    pub frontier_size: u32,
    pub time_taken_ms: f64,
    pub path_length: u32,
    pub total_cost: f64,
    /// explored cells per path step; 0 when there is no path length.
    pub exploration_efficiency: f64,
    /// milliseconds per path step; 0 when there is no path length.
    pub time_efficiency: f64,
    /// explored + frontier, the cells the search held in memory.
    pub memory_usage: u32,
}

impl MetricsView {
    pub fn derive(metrics: &SolveMetrics) -> Self {
        let path_length = metrics.path_length;
        let per_step = |value: f64| {
            if path_length > 0 {
                value / path_length as f64
            } else {
                0.0
            }
        };
        Self {
            explored_size: metrics.explored_size,
            frontier_size: metrics.frontier_size,
            time_taken_ms: metrics.time_taken_ms,
            path_length,
            total_cost: metrics.total_cost.unwrap_or(0.0),
            exploration_efficiency: per_step(metrics.explored_size as f64),
            time_efficiency: per_step(metrics.time_taken_ms),
            memory_usage: metrics.explored_size + metrics.frontier_size,
        }
    }
}

/// What a solve response amounts to: an animation plus metrics, or a single
/// user-visible failure alert.
pub enum Outcome {
    Failure(String),
    Animate {
        session: PlaybackSession,
        metrics: MetricsView,
    },
}

/// Classifies a response. A populated `error` or a missing path both mean no
/// animation at all, just the alert naming the attempted algorithm.
pub fn evaluate(response: &SolveResponse, start: Pos, goal: Pos, algorithm_id: &str) -> Outcome {
    if response.error.is_some() || response.path.is_none() {
        let reason = response
            .error
            .clone()
            .unwrap_or_else(|| "No path found".to_string());
        return Outcome::Failure(format!(
            "{reason}: couldn't get from (A) to (B) with {} in this maze configuration.",
            display_name(algorithm_id)
        ));
    }
    Outcome::Animate {
        session: PlaybackSession::new(build_frames(response, start, goal)),
        metrics: MetricsView::derive(&response.metrics),
    }
}

/// Exploration frames first, path frames second, both in response order and
/// both skipping the start and goal cells.
fn build_frames(response: &SolveResponse, start: Pos, goal: Pos) -> Vec<Frame> {
    let keep = |pos: &Pos| *pos != start && *pos != goal;
    let as_pos = |cell: &[usize; 2]| Pos::new(cell[0], cell[1]);
    let mut frames: Vec<Frame> = response
        .exploration_order
        .iter()
        .map(as_pos)
        .filter(keep)
        .map(|pos| Frame {
            pos,
            visual: CellVisual::Explored,
        })
        .collect();
    if let Some(path) = &response.path {
        frames.extend(path.iter().map(as_pos).filter(keep).map(|pos| Frame {
            pos,
            visual: CellVisual::Path,
        }));
    }
    frames
}

/// Per-cell visual markers painted by playback, cleared wholesale by edits.
#[derive(Clone, Debug, PartialEq)]
pub struct Overlay {
    size: usize,
    cells: Vec<Option<CellVisual>>,
}

impl Overlay {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![None; size * size],
        }
    }

    pub fn get(&self, pos: Pos) -> Option<CellVisual> {
        self.cells.get(pos.row * self.size + pos.col).copied().flatten()
    }

    pub fn set(&mut self, pos: Pos, visual: CellVisual) {
        if pos.row < self.size && pos.col < self.size {
            self.cells[pos.row * self.size + pos.col] = Some(visual);
        }
    }

    pub fn clear(&mut self) {
        self.cells.fill(None);
    }
}

/// Overlay updates arrive frame-by-frame from the async playback driver, so
/// they go through a reducer to always apply on top of the latest state.
#[derive(Clone, Debug)]
pub enum OverlayAction {
    /// Drop every marker, resizing to the given grid size.
    Reset(usize),
    Paint(Frame),
}

impl yew::Reducible for Overlay {
    type Action = OverlayAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        match action {
            OverlayAction::Reset(size) => {
                if size == self.size {
                    let mut next = (*self).clone();
                    next.clear();
                    Rc::new(next)
                } else {
                    Rc::new(Overlay::new(size))
                }
            }
            OverlayAction::Paint(frame) => {
                let mut next = (*self).clone();
                next.set(frame.pos, frame.visual);
                Rc::new(next)
            }
        }
    }
}

/// Drives a session to completion (or cancellation), yielding for the fixed
/// delay before each reveal. Returns the terminal phase so the caller knows
/// whether to publish metrics.
pub async fn run(mut session: PlaybackSession, render: Callback<Frame>) -> Phase {
    loop {
        TimeoutFuture::new(STEP_DELAY_MS).await;
        match session.next_frame() {
            Some(frame) => render.emit(frame),
            None => break,
        }
    }
    session.phase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_response() -> SolveResponse {
        SolveResponse {
            path: Some(vec![[0, 0], [0, 1], [1, 1]]),
            exploration_order: vec![[0, 1], [1, 1]],
            error: None,
            metrics: SolveMetrics {
                explored_size: 2,
                frontier_size: 1,
                time_taken_ms: 1.5,
                path_length: 2,
                total_cost: None,
            },
        }
    }

    #[test]
    fn frames_skip_anchors_and_keep_order() {
        let start = Pos::new(0, 0);
        let goal = Pos::new(1, 1);
        let frames = build_frames(&sample_response(), start, goal);
        assert_eq!(
            frames,
            vec![
                Frame { pos: Pos::new(0, 1), visual: CellVisual::Explored },
                Frame { pos: Pos::new(0, 1), visual: CellVisual::Path },
            ]
        );
    }

    #[test]
    fn session_walks_frames_in_strict_sequence() {
        let Outcome::Animate { mut session, .. } =
            evaluate(&sample_response(), Pos::new(0, 0), Pos::new(1, 1), "bfs")
        else {
            panic!("expected animation");
        };
        assert_eq!(session.phase(), Phase::Idle);
        let first = session.next_frame().unwrap();
        assert_eq!(first.visual, CellVisual::Explored);
        assert_eq!(session.phase(), Phase::Animating);
        let second = session.next_frame().unwrap();
        assert_eq!(second.visual, CellVisual::Path);
        assert!(session.next_frame().is_none());
        assert_eq!(session.phase(), Phase::Done);
        // exhausted sessions stay done
        assert!(session.next_frame().is_none());
        assert_eq!(session.phase(), Phase::Done);
    }

    #[test]
    fn cancellation_stops_at_the_next_step_boundary() {
        let mut session = PlaybackSession::new(vec![
            Frame { pos: Pos::new(0, 1), visual: CellVisual::Explored },
            Frame { pos: Pos::new(0, 2), visual: CellVisual::Explored },
            Frame { pos: Pos::new(0, 3), visual: CellVisual::Explored },
        ]);
        let handle = session.cancel_handle();
        assert!(session.next_frame().is_some());
        handle.cancel();
        assert!(session.next_frame().is_none());
        assert_eq!(session.phase(), Phase::Idle);
        assert!(session.next_frame().is_none());
    }

    #[test]
    fn missing_path_yields_one_failure_naming_the_algorithm() {
        let response = SolveResponse {
            path: None,
            exploration_order: vec![[0, 1], [0, 2]],
            error: None,
            metrics: SolveMetrics::default(),
        };
        match evaluate(&response, Pos::new(0, 0), Pos::new(2, 2), "astar") {
            Outcome::Failure(message) => {
                assert!(message.contains("A*"), "message was: {message}");
                assert!(message.contains("No path found"));
            }
            Outcome::Animate { .. } => panic!("no-path response must not animate"),
        }
    }

    #[test]
    fn solver_reported_error_carries_its_reason() {
        let response = SolveResponse {
            error: Some("beam width exceeded frontier".to_string()),
            ..SolveResponse::default()
        };
        match evaluate(&response, Pos::new(0, 0), Pos::new(2, 2), "local_beam") {
            Outcome::Failure(message) => {
                assert!(message.contains("beam width exceeded frontier"));
                assert!(message.contains("Local Beam"));
            }
            Outcome::Animate { .. } => panic!("errored response must not animate"),
        }
    }

    #[test]
    fn derived_metrics_divide_by_path_length() {
        let view = MetricsView::derive(&SolveMetrics {
            explored_size: 10,
            frontier_size: 4,
            time_taken_ms: 25.0,
            path_length: 5,
            total_cost: Some(12.0),
        });
        assert_eq!(view.exploration_efficiency, 2.0);
        assert_eq!(view.time_efficiency, 5.0);
        assert_eq!(view.memory_usage, 14);
        assert_eq!(view.total_cost, 12.0);
    }

    #[test]
    fn derived_metrics_default_to_zero_without_a_path() {
        let view = MetricsView::derive(&SolveMetrics {
            explored_size: 10,
            frontier_size: 2,
            time_taken_ms: 9.0,
            path_length: 0,
            total_cost: None,
        });
        assert_eq!(view.exploration_efficiency, 0.0);
        assert_eq!(view.time_efficiency, 0.0);
        assert_eq!(view.memory_usage, 12);
    }

    #[test]
    fn a_new_submission_supersedes_one_awaiting_its_response() {
        let generation = Generation::default();
        // the first submission's handle is only stored once its response
        // arrives, so the token is all that identifies it until then
        let first = generation.bump();
        let second = generation.bump();
        // the late first response must be dropped, not animated
        assert!(!generation.is_current(first));
        assert!(generation.is_current(second));

        // the second response still animates and, being current when it
        // finishes, may release the shared cancel slot
        let mut session = PlaybackSession::new(vec![Frame {
            pos: Pos::new(0, 1),
            visual: CellVisual::Explored,
        }]);
        assert!(session.next_frame().is_some());
        assert!(session.next_frame().is_none());
        assert_eq!(session.phase(), Phase::Done);
        assert!(generation.is_current(second));
    }

    #[test]
    fn an_edit_mid_animation_blocks_the_metrics_publish() {
        let generation = Generation::default();
        let token = generation.bump();
        let mut session = PlaybackSession::new(vec![
            Frame { pos: Pos::new(0, 1), visual: CellVisual::Explored },
            Frame { pos: Pos::new(0, 2), visual: CellVisual::Explored },
        ]);
        let handle = session.cancel_handle();
        assert!(session.next_frame().is_some());
        // an edit lands between frames: generation moves on, handle cancels
        generation.bump();
        handle.cancel();
        assert!(session.next_frame().is_none());
        assert_eq!(session.phase(), Phase::Idle);
        assert!(!generation.is_current(token));
    }

    #[test]
    fn overlay_tracks_and_clears_markers() {
        let mut overlay = Overlay::new(3);
        overlay.set(Pos::new(1, 2), CellVisual::Explored);
        overlay.set(Pos::new(2, 2), CellVisual::Path);
        assert_eq!(overlay.get(Pos::new(1, 2)), Some(CellVisual::Explored));
        assert_eq!(overlay.get(Pos::new(0, 0)), None);
        overlay.clear();
        assert_eq!(overlay.get(Pos::new(1, 2)), None);
        assert_eq!(overlay.get(Pos::new(2, 2)), None);
    }
}
