//! Interaction-mode state machine. Pointer events arrive from the grid view
//! and come out as `GridAction`s; the glue in `main.rs` cancels any running
//! playback before dispatching them.

use std::collections::HashSet;

use crate::model::{EditMode, GridAction, GridState, Pos};

/// One continuous pointer-down..pointer-up stroke. In obstacle mode every
/// distinct cell the stroke crosses toggles exactly once, no matter how many
/// times the pointer re-enters it.
#[derive(Default, Debug, Clone)]
pub struct DragGesture {
    active: bool,
    visited: HashSet<Pos>,
}

impl DragGesture {
    pub fn begin(&mut self) {
        self.active = true;
        self.visited.clear();
    }

    pub fn end(&mut self) {
        self.active = false;
        self.visited.clear();
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// True the first time `pos` is seen during the current stroke.
    fn admit(&mut self, pos: Pos) -> bool {
        self.active && self.visited.insert(pos)
    }
}

/// Interprets pointer events against the grid according to the active mode.
/// Mode changes happen only through `set_mode`, never as a side effect of a
/// gesture.
#[derive(Debug, Clone)]
pub struct Interaction {
    mode: EditMode,
    /// Weight painted by the brush in weight mode, kept in [1,9] by the
    /// controls panel.
    pub brush: u8,
    gesture: DragGesture,
}

impl Default for Interaction {
    fn default() -> Self {
        Self {
            mode: EditMode::PaintObstacle,
            brush: 1,
            gesture: DragGesture::default(),
        }
    }
}

impl Interaction {
    /// Switching modes never mutates grid content; an in-flight gesture is
    /// simply abandoned.
    pub fn set_mode(&mut self, mode: EditMode) {
        self.mode = mode;
        self.gesture.end();
    }

    pub fn pointer_down(&mut self, pos: Pos, grid: &GridState) -> Option<GridAction> {
        match self.mode {
            EditMode::PaintObstacle => {
                self.gesture.begin();
                self.gesture
                    .admit(pos)
                    .then_some(GridAction::ToggleBlocked(pos))
            }
            EditMode::PlaceStart => Some(GridAction::MoveStart(pos)),
            EditMode::PlaceGoal => Some(GridAction::MoveGoal(pos)),
            EditMode::PaintWeight => {
                if !grid.weighting_enabled {
                    return None;
                }
                self.gesture.begin();
                Some(GridAction::SetWeight {
                    pos,
                    value: self.brush,
                })
            }
        }
    }

    /// Pointer dragged into a cell while the button is held.
    pub fn pointer_enter(&mut self, pos: Pos, grid: &GridState) -> Option<GridAction> {
        if !self.gesture.is_active() {
            return None;
        }
        match self.mode {
            EditMode::PaintObstacle => self
                .gesture
                .admit(pos)
                .then_some(GridAction::ToggleBlocked(pos)),
            EditMode::PaintWeight => grid.weighting_enabled.then_some(GridAction::SetWeight {
                pos,
                value: self.brush,
            }),
            // start/goal placement is click-only
            EditMode::PlaceStart | EditMode::PlaceGoal => None,
        }
    }

    pub fn pointer_up(&mut self) {
        self.gesture.end();
    }
}

/// Maps a digit-key shortcut to an edit mode. Shortcuts are suppressed while
/// the key event targets a form field, so typing numbers into the size or
/// brush inputs never switches modes.
pub fn shortcut_mode(code: &str, typing_in_field: bool) -> Option<EditMode> {
    if typing_in_field {
        return None;
    }
    match code {
        "Digit1" => Some(EditMode::PaintObstacle),
        "Digit2" => Some(EditMode::PlaceStart),
        "Digit3" => Some(EditMode::PlaceGoal),
        "Digit4" => Some(EditMode::PaintWeight),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply(grid: &mut GridState, action: Option<GridAction>) {
        match action {
            Some(GridAction::ToggleBlocked(pos)) => grid.toggle_blocked(pos),
            Some(GridAction::SetWeight { pos, value }) => grid.set_weight(pos, value),
            Some(GridAction::MoveStart(pos)) => grid.move_start(pos),
            Some(GridAction::MoveGoal(pos)) => grid.move_goal(pos),
            Some(other) => panic!("unexpected action {other:?}"),
            None => {}
        }
    }

    #[test]
    fn drag_toggles_each_cell_at_most_once() {
        let mut grid = GridState::new(5);
        let mut ix = Interaction::default();
        let a = Pos::new(2, 1);
        let b = Pos::new(2, 2);

        let action = ix.pointer_down(a, &grid);
        apply(&mut grid, action);
        let action = ix.pointer_enter(b, &grid);
        apply(&mut grid, action);
        // wander back over both cells before releasing
        let action = ix.pointer_enter(a, &grid);
        apply(&mut grid, action);
        let action = ix.pointer_enter(b, &grid);
        apply(&mut grid, action);
        ix.pointer_up();

        assert!(grid.is_blocked(a));
        assert!(grid.is_blocked(b));
    }

    #[test]
    fn a_new_gesture_toggles_again() {
        let mut grid = GridState::new(5);
        let mut ix = Interaction::default();
        let pos = Pos::new(1, 1);

        let action = ix.pointer_down(pos, &grid);
        apply(&mut grid, action);
        ix.pointer_up();
        assert!(grid.is_blocked(pos));

        let action = ix.pointer_down(pos, &grid);
        apply(&mut grid, action);
        ix.pointer_up();
        assert!(!grid.is_blocked(pos));
    }

    #[test]
    fn enter_without_button_down_does_nothing() {
        let mut grid = GridState::new(5);
        let mut ix = Interaction::default();
        assert!(ix.pointer_enter(Pos::new(1, 1), &grid).is_none());
        assert!(!grid.is_blocked(Pos::new(1, 1)));
        apply(&mut grid, None);
    }

    #[test]
    fn clicks_place_anchors_in_their_modes() {
        let mut grid = GridState::new(5);
        let mut ix = Interaction::default();

        ix.set_mode(EditMode::PlaceStart);
        let action = ix.pointer_down(Pos::new(3, 3), &grid);
        apply(&mut grid, action);
        ix.pointer_up();
        assert_eq!(grid.start, Pos::new(3, 3));

        ix.set_mode(EditMode::PlaceGoal);
        let action = ix.pointer_down(Pos::new(0, 0), &grid);
        apply(&mut grid, action);
        ix.pointer_up();
        assert_eq!(grid.goal, Pos::new(0, 0));

        // dragging in anchor modes moves nothing
        let action = ix.pointer_down(Pos::new(1, 0), &grid);
        apply(&mut grid, action);
        assert!(ix.pointer_enter(Pos::new(2, 0), &grid).is_none());
    }

    #[test]
    fn weight_painting_requires_weighting_enabled() {
        let mut grid = GridState::new(5);
        let mut ix = Interaction::default();
        ix.set_mode(EditMode::PaintWeight);
        ix.brush = 7;

        assert!(ix.pointer_down(Pos::new(2, 2), &grid).is_none());

        grid.set_weighting_enabled(true);
        let action = ix.pointer_down(Pos::new(2, 2), &grid);
        apply(&mut grid, action);
        let action = ix.pointer_enter(Pos::new(2, 3), &grid);
        apply(&mut grid, action);
        ix.pointer_up();
        assert_eq!(grid.weight_at(Pos::new(2, 2)), 7);
        assert_eq!(grid.weight_at(Pos::new(2, 3)), 7);
    }

    #[test]
    fn digit_shortcuts_map_to_modes() {
        assert_eq!(shortcut_mode("Digit1", false), Some(EditMode::PaintObstacle));
        assert_eq!(shortcut_mode("Digit2", false), Some(EditMode::PlaceStart));
        assert_eq!(shortcut_mode("Digit3", false), Some(EditMode::PlaceGoal));
        assert_eq!(shortcut_mode("Digit4", false), Some(EditMode::PaintWeight));
        assert_eq!(shortcut_mode("KeyA", false), None);
        assert_eq!(shortcut_mode("Digit5", false), None);
    }

    #[test]
    fn shortcuts_are_ignored_while_typing_in_a_field() {
        assert_eq!(shortcut_mode("Digit1", true), None);
        assert_eq!(shortcut_mode("Digit4", true), None);
    }

    #[test]
    fn mode_change_abandons_the_gesture() {
        let mut grid = GridState::new(5);
        let mut ix = Interaction::default();
        let action = ix.pointer_down(Pos::new(1, 1), &grid);
        apply(&mut grid, action);
        ix.set_mode(EditMode::PaintObstacle);
        assert!(ix.pointer_enter(Pos::new(1, 2), &grid).is_none());
        assert!(!grid.is_blocked(Pos::new(1, 2)));
    }
}
