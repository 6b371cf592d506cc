//! Property tests for the drag state machine.

use proptest::prelude::*;
use springsize_runtime::host::{CaptureError, PointerCapture, PointerId};
use springsize_core::ResizeState;
use springsize_runtime::{Constraints, Direction, DragController, SizeBound, SnapConfig};

struct AcceptAll;

impl PointerCapture for AcceptAll {
    fn capture_pointer(&mut self, _: PointerId) -> Result<(), CaptureError> {
        Ok(())
    }

    fn release_pointer(&mut self, _: PointerId) -> Result<(), CaptureError> {
        Ok(())
    }
}

#[derive(Debug, Clone)]
enum Input {
    Down(Direction, f64, f64),
    Move(f64, f64),
    Up,
}

fn direction() -> impl Strategy<Value = Direction> {
    prop::sample::select(Direction::ALL.to_vec())
}

fn coord() -> impl Strategy<Value = f64> {
    -2_000.0..2_000.0_f64
}

fn input() -> impl Strategy<Value = Input> {
    prop_oneof![
        1 => (direction(), coord(), coord()).prop_map(|(d, x, y)| Input::Down(d, x, y)),
        4 => (coord(), coord()).prop_map(|(x, y)| Input::Move(x, y)),
        1 => Just(Input::Up),
    ]
}

proptest! {
    #[test]
    fn target_depends_only_on_last_move(
        dir in direction(),
        moves in prop::collection::vec((coord(), coord()), 1..20),
    ) {
        let mut drag = DragController::new();
        let mut state = ResizeState::new(320.0, 200.0);
        drag.pointer_down(dir, 1, 0.0, 0.0, &state, &mut AcceptAll);
        for &(x, y) in &moves {
            drag.pointer_move(x, y, &mut state, &SnapConfig::default(), &Constraints::none());
        }
        let &(x, y) = moves.last().unwrap();
        let expected = (320.0 + x * dir.width_sign(), 200.0 + y * dir.height_sign());
        prop_assert_eq!(state.targets(), expected);
        prop_assert_eq!(state.currents(), (320.0, 200.0));
    }

    #[test]
    fn bounded_targets_stay_in_bounds(
        inputs in prop::collection::vec(input(), 1..60),
    ) {
        let constraints = Constraints::none()
            .with_min(SizeBound::both(100.0, 80.0))
            .with_max(SizeBound::both(900.0, 700.0));
        let snap = SnapConfig::increment(8.0);
        let mut drag = DragController::new();
        let mut state = ResizeState::new(320.0, 200.0);
        for input in inputs {
            match input {
                Input::Down(d, x, y) => {
                    drag.pointer_down(d, 1, x, y, &state, &mut AcceptAll);
                }
                Input::Move(x, y) => {
                    drag.pointer_move(x, y, &mut state, &snap, &constraints);
                }
                Input::Up => {
                    drag.pointer_up(1, &mut AcceptAll);
                }
            }
            let (w, h) = state.targets();
            prop_assert!((100.0..=900.0).contains(&w), "width {}", w);
            prop_assert!((80.0..=700.0).contains(&h), "height {}", h);
        }
    }

    #[test]
    fn dragging_tracks_last_down_and_up(
        inputs in prop::collection::vec(input(), 0..60),
    ) {
        let mut drag = DragController::new();
        let mut state = ResizeState::new(320.0, 200.0);
        let mut expected: Option<Direction> = None;
        for input in inputs {
            let transition = match input {
                Input::Down(d, x, y) => {
                    expected = Some(d);
                    drag.pointer_down(d, 1, x, y, &state, &mut AcceptAll)
                }
                Input::Move(x, y) => drag.pointer_move(
                    x, y, &mut state, &SnapConfig::default(), &Constraints::none(),
                ),
                Input::Up => {
                    expected = None;
                    drag.pointer_up(1, &mut AcceptAll)
                }
            };
            prop_assert_eq!(transition.to, drag.state());
            prop_assert_eq!(drag.active_direction(), expected);
            prop_assert_eq!(drag.is_dragging(), expected.is_some());
        }
    }
}
