#![forbid(unsafe_code)]

//! Presentation glue for resize handles.
//!
//! The engine never decides what a handle looks like. It only reports a
//! [`HandleState`]; a [`HandleRenderer`] supplied by the presentation layer
//! turns that into whatever the host draws.

use serde::{Deserialize, Serialize};
use springsize_core::Direction;

use crate::engine::ResizeEngine;
use crate::host::Host;

/// Everything a renderer needs to draw one handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandleState {
    pub direction: Direction,
    /// Hovered, or the handle currently being dragged.
    pub active: bool,
    /// Whether this handle is the one being dragged.
    pub dragging: bool,
}

impl HandleState {
    /// Host cursor name for this handle.
    #[must_use]
    pub const fn cursor(&self) -> &'static str {
        self.direction.cursor()
    }
}

/// Produces a presentation for one handle.
pub trait HandleRenderer {
    type Output;

    fn render(&mut self, state: HandleState) -> Self::Output;
}

impl<F, O> HandleRenderer for F
where
    F: FnMut(HandleState) -> O,
{
    type Output = O;

    fn render(&mut self, state: HandleState) -> O {
        self(state)
    }
}

/// Render the handle for `direction` from the engine's current state.
pub fn render_handle<H: Host, R: HandleRenderer>(
    engine: &ResizeEngine<H>,
    direction: Direction,
    renderer: &mut R,
) -> R::Output {
    renderer.render(engine.handle_state(direction))
}
