//! Core data model for the maze explorer.
//! The grid is the single source of truth for everything the solver sees;
//! visual overlays (explored/path markers) live outside it and are rebuilt
//! from each solve result.

use serde::{Deserialize, Serialize};
use std::rc::Rc;
use yew::Reducible;

pub const MIN_SIZE: usize = 1;
pub const MAX_SIZE: usize = 30;
pub const DEFAULT_SIZE: usize = 10;

pub const MIN_WEIGHT: u8 = 1;
pub const MAX_WEIGHT: u8 = 9;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub row: usize,
    pub col: usize,
}

impl Pos {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Active editing mode. Exactly one at a time; switching modes never touches
/// grid content.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditMode {
    PaintObstacle,
    PlaceStart,
    PlaceGoal,
    PaintWeight,
}

impl EditMode {
    /// Value used by the mode `<select>` element.
    pub fn value(self) -> &'static str {
        match self {
            EditMode::PaintObstacle => "blocks",
            EditMode::PlaceStart => "location",
            EditMode::PlaceGoal => "target",
            EditMode::PaintWeight => "weights",
        }
    }

    pub fn from_value(value: &str) -> Option<Self> {
        match value {
            "blocks" => Some(EditMode::PaintObstacle),
            "location" => Some(EditMode::PlaceStart),
            "target" => Some(EditMode::PlaceGoal),
            "weights" => Some(EditMode::PaintWeight),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            EditMode::PaintObstacle => "Walls",
            EditMode::PlaceStart => "Start (A)",
            EditMode::PlaceGoal => "Goal (B)",
            EditMode::PaintWeight => "Weights",
        }
    }
}

/// Authoritative grid state. `size` is immutable after construction; a grid
/// resize replaces the whole state. Start and goal are never blocked and
/// never coincide, and every mutating operation preserves that.
#[derive(Clone, Debug, PartialEq)]
pub struct GridState {
    pub size: usize,
    /// Row-major obstacle mask; length = size * size.
    blocked: Vec<bool>,
    /// Row-major traversal cost in [1,9]; meaningful only while
    /// `weighting_enabled` is set.
    weight: Vec<u8>,
    pub start: Pos,
    pub goal: Pos,
    pub weighting_enabled: bool,
}

impl GridState {
    pub fn new(size: usize) -> Self {
        let size = size.clamp(MIN_SIZE, MAX_SIZE);
        let cells = size * size;
        Self {
            size,
            blocked: vec![false; cells],
            weight: vec![MIN_WEIGHT; cells],
            start: Pos::new(0, 0),
            goal: Pos::new(size - 1, size - 1),
            weighting_enabled: false,
        }
    }

    fn idx(&self, pos: Pos) -> usize {
        pos.row * self.size + pos.col
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.row < self.size && pos.col < self.size
    }

    pub fn is_blocked(&self, pos: Pos) -> bool {
        self.in_bounds(pos) && self.blocked[self.idx(pos)]
    }

    /// Effective traversal cost: the stored weight while weighting is
    /// enabled, otherwise uniformly 1.
    pub fn weight_at(&self, pos: Pos) -> u8 {
        if self.weighting_enabled && self.in_bounds(pos) {
            self.weight[self.idx(pos)]
        } else {
            MIN_WEIGHT
        }
    }

    pub fn is_anchor(&self, pos: Pos) -> bool {
        pos == self.start || pos == self.goal
    }

    /// Flips the obstacle flag; no-op on the start or goal cell. Newly
    /// blocked cells drop their weight back to 1.
    pub fn toggle_blocked(&mut self, pos: Pos) {
        if !self.in_bounds(pos) || self.is_anchor(pos) {
            return;
        }
        let idx = self.idx(pos);
        self.blocked[idx] = !self.blocked[idx];
        if self.blocked[idx] {
            self.weight[idx] = MIN_WEIGHT;
        }
    }

    /// Stores a clamped weight; no-op on blocked cells, anchors, or while
    /// weighting is disabled.
    pub fn set_weight(&mut self, pos: Pos, value: u8) {
        if !self.weighting_enabled
            || !self.in_bounds(pos)
            || self.is_blocked(pos)
            || self.is_anchor(pos)
        {
            return;
        }
        let idx = self.idx(pos);
        self.weight[idx] = value.clamp(MIN_WEIGHT, MAX_WEIGHT);
    }

    /// Relocates the start anchor; no-op onto a blocked cell or the goal.
    /// The vacated cell keeps its block/weight state.
    pub fn move_start(&mut self, pos: Pos) {
        if self.in_bounds(pos) && !self.is_blocked(pos) && pos != self.goal {
            self.start = pos;
        }
    }

    pub fn move_goal(&mut self, pos: Pos) {
        if self.in_bounds(pos) && !self.is_blocked(pos) && pos != self.start {
            self.goal = pos;
        }
    }

    /// Toggling weighting off resets every stored weight to 1, so stale
    /// weights never resurface on re-enable.
    pub fn set_weighting_enabled(&mut self, enabled: bool) {
        self.weighting_enabled = enabled;
        if !enabled {
            self.weight.fill(MIN_WEIGHT);
        }
    }

    /// Assigns a uniform random weight in [1,9] to every non-blocked cell.
    /// `rng` yields samples in [0,1).
    pub fn randomize_weights(&mut self, mut rng: impl FnMut() -> f64) {
        if !self.weighting_enabled {
            return;
        }
        let span = (MAX_WEIGHT - MIN_WEIGHT + 1) as f64;
        for idx in 0..self.weight.len() {
            if !self.blocked[idx] {
                self.weight[idx] = MIN_WEIGHT + (rng() * span).floor().min(span - 1.0) as u8;
            }
        }
    }

    /// Obstacle mask as nested rows, the shape the wire contract wants.
    pub fn blocks_rows(&self) -> Vec<Vec<bool>> {
        self.blocked
            .chunks(self.size)
            .map(|row| row.to_vec())
            .collect()
    }

    pub fn weights_rows(&self) -> Vec<Vec<u8>> {
        self.weight
            .chunks(self.size)
            .map(|row| row.to_vec())
            .collect()
    }

    #[cfg(test)]
    pub fn invariants_hold(&self) -> bool {
        self.start != self.goal && !self.is_blocked(self.start) && !self.is_blocked(self.goal)
    }
}

// ---------------- Reducer & Actions -----------------
#[derive(Clone, Debug)]
pub enum GridAction {
    /// Replaces the whole grid; ignored when the size is out of range.
    Resize(usize),
    ToggleBlocked(Pos),
    SetWeight { pos: Pos, value: u8 },
    MoveStart(Pos),
    MoveGoal(Pos),
    SetWeightingEnabled(bool),
    RandomizeWeights,
}

fn edited(state: &GridState, edit: impl FnOnce(&mut GridState)) -> Rc<GridState> {
    let mut next = state.clone();
    edit(&mut next);
    Rc::new(next)
}

impl Reducible for GridState {
    type Action = GridAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        use GridAction::*;
        match action {
            Resize(size) if (MIN_SIZE..=MAX_SIZE).contains(&size) => {
                Rc::new(GridState::new(size))
            }
            Resize(_) => self,
            ToggleBlocked(pos) => edited(&self, |g| g.toggle_blocked(pos)),
            SetWeight { pos, value } => edited(&self, |g| g.set_weight(pos, value)),
            MoveStart(pos) => edited(&self, |g| g.move_start(pos)),
            MoveGoal(pos) => edited(&self, |g| g.move_goal(pos)),
            SetWeightingEnabled(enabled) => edited(&self, |g| g.set_weighting_enabled(enabled)),
            RandomizeWeights => edited(&self, |g| g.randomize_weights(|| js_sys::Math::random())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_grid_places_anchors_at_corners() {
        let g = GridState::new(5);
        assert_eq!(g.start, Pos::new(0, 0));
        assert_eq!(g.goal, Pos::new(4, 4));
        assert!(g.invariants_hold());
    }

    #[test]
    fn toggle_blocked_is_noop_on_anchors() {
        let mut g = GridState::new(4);
        let before = g.clone();
        g.toggle_blocked(g.start);
        g.toggle_blocked(g.goal);
        assert_eq!(g, before);
    }

    #[test]
    fn blocking_a_cell_resets_its_weight() {
        let mut g = GridState::new(4);
        g.set_weighting_enabled(true);
        let pos = Pos::new(1, 2);
        g.set_weight(pos, 7);
        assert_eq!(g.weight_at(pos), 7);
        g.toggle_blocked(pos);
        g.toggle_blocked(pos);
        assert_eq!(g.weight_at(pos), 1);
    }

    #[test]
    fn set_weight_clamps_and_skips_protected_cells() {
        let mut g = GridState::new(4);
        g.set_weighting_enabled(true);
        let pos = Pos::new(2, 2);
        g.set_weight(pos, 42);
        assert_eq!(g.weight_at(pos), MAX_WEIGHT);
        g.set_weight(pos, 0);
        assert_eq!(g.weight_at(pos), MIN_WEIGHT);

        g.set_weight(g.start, 5);
        assert_eq!(g.weight_at(g.start), 1);
        let blocked = Pos::new(3, 0);
        g.toggle_blocked(blocked);
        g.set_weight(blocked, 5);
        assert_eq!(g.weight_at(blocked), 1);
    }

    #[test]
    fn set_weight_is_noop_while_weighting_disabled() {
        let mut g = GridState::new(4);
        g.set_weight(Pos::new(1, 1), 5);
        g.set_weighting_enabled(true);
        assert_eq!(g.weight_at(Pos::new(1, 1)), 1);
    }

    #[test]
    fn weight_reads_as_one_while_disabled() {
        let mut g = GridState::new(4);
        g.set_weighting_enabled(true);
        g.set_weight(Pos::new(1, 1), 6);
        g.set_weighting_enabled(false);
        assert_eq!(g.weight_at(Pos::new(1, 1)), 1);
        // disabling wiped the stored value too
        g.set_weighting_enabled(true);
        assert_eq!(g.weight_at(Pos::new(1, 1)), 1);
    }

    #[test]
    fn anchors_never_collide_or_land_on_blocks() {
        let mut g = GridState::new(4);
        let wall = Pos::new(1, 1);
        g.toggle_blocked(wall);
        g.move_start(wall);
        assert_eq!(g.start, Pos::new(0, 0));
        g.move_start(g.goal);
        assert_eq!(g.start, Pos::new(0, 0));
        g.move_goal(g.start);
        assert_eq!(g.goal, Pos::new(3, 3));
        g.move_start(Pos::new(0, 2));
        assert_eq!(g.start, Pos::new(0, 2));
        assert!(g.invariants_hold());
    }

    #[test]
    fn moving_an_anchor_leaves_prior_cell_state_intact() {
        let mut g = GridState::new(4);
        g.set_weighting_enabled(true);
        let old = g.start;
        g.move_start(Pos::new(2, 1));
        assert!(!g.is_blocked(old));
        assert_eq!(g.weight_at(old), 1);
        // the vacated cell is editable again
        g.set_weight(old, 4);
        assert_eq!(g.weight_at(old), 4);
        g.toggle_blocked(old);
        assert!(g.is_blocked(old));
    }

    #[test]
    fn invariants_survive_an_edit_sequence() {
        let mut g = GridState::new(6);
        g.set_weighting_enabled(true);
        for i in 0..6 {
            g.toggle_blocked(Pos::new(i, i % 3));
            g.set_weight(Pos::new(i, 5 - i % 3), (i as u8 % 9) + 1);
            g.move_start(Pos::new(i, 0));
            g.move_goal(Pos::new(5 - i, 5));
            assert!(g.invariants_hold(), "broken after step {i}");
        }
    }

    #[test]
    fn randomize_weights_respects_blocks_and_range() {
        let mut g = GridState::new(4);
        g.set_weighting_enabled(true);
        let wall = Pos::new(1, 3);
        g.toggle_blocked(wall);
        let mut seq = [0.0, 0.999, 0.5, 0.25].iter().cycle().copied();
        g.randomize_weights(move || seq.next().unwrap());
        for row in 0..4 {
            for col in 0..4 {
                let pos = Pos::new(row, col);
                let w = g.weight_at(pos);
                assert!((MIN_WEIGHT..=MAX_WEIGHT).contains(&w));
                if pos == wall {
                    assert_eq!(w, 1);
                }
            }
        }
    }

    #[test]
    fn reduce_applies_edit_actions() {
        let g = Rc::new(GridState::new(4));
        let g = g.reduce(GridAction::ToggleBlocked(Pos::new(1, 1)));
        assert!(g.is_blocked(Pos::new(1, 1)));
        let g = g.reduce(GridAction::SetWeightingEnabled(true));
        let g = g.reduce(GridAction::SetWeight {
            pos: Pos::new(2, 2),
            value: 6,
        });
        assert_eq!(g.weight_at(Pos::new(2, 2)), 6);
        let g = g.reduce(GridAction::MoveGoal(Pos::new(0, 3)));
        assert_eq!(g.goal, Pos::new(0, 3));
    }

    #[test]
    fn resize_action_rejects_out_of_range_sizes() {
        let g = Rc::new(GridState::new(5));
        let same = g.clone().reduce(GridAction::Resize(0));
        assert_eq!(same.size, 5);
        let same = same.reduce(GridAction::Resize(MAX_SIZE + 1));
        assert_eq!(same.size, 5);
        let resized = same.reduce(GridAction::Resize(8));
        assert_eq!(resized.size, 8);
        assert_eq!(resized.goal, Pos::new(7, 7));
    }
}
