use crate::coords::Point;
use crate::core::WindowSpec;
use crate::input::Event;
use crate::paint::Color;

use super::BackendError;

/// Immediate-mode drawing operations on a drawing surface.
///
/// Calls are synchronous. Nothing becomes visible until [`Canvas::present`].
pub trait Canvas {
    /// Sets the color used by subsequent `clear` and `draw_line` calls.
    fn set_draw_color(&mut self, color: Color);

    /// Fills the whole surface with the current draw color.
    fn clear(&mut self);

    /// Draws a line one logical pixel wide, both endpoint pixels lit.
    fn draw_line(&mut self, from: Point, to: Point);

    /// Shows everything drawn since the last `clear`.
    fn present(&mut self);
}

/// Queue of platform input events.
pub trait EventSource {
    /// Moves whatever the platform has pending into the queue. Must not block.
    fn pump_events(&mut self) {}

    /// Pops the next queued event, or `None` once the queue is empty.
    fn poll_event(&mut self) -> Option<Event>;
}

/// Windowing and graphics library consumed by the program.
///
/// Handles are plain owned values. Destroying one consumes it, so a handle can
/// never be released twice.
pub trait Backend: EventSource {
    /// Display surface (window).
    type Display;

    /// Drawing surface bound to a display surface.
    type Canvas: Canvas;

    fn create_display(&mut self, spec: &WindowSpec) -> Result<Self::Display, BackendError>;

    fn create_canvas(&mut self, display: &Self::Display) -> Result<Self::Canvas, BackendError>;

    fn destroy_canvas(&mut self, canvas: Self::Canvas);

    fn destroy_display(&mut self, display: Self::Display);

    /// Releases library-global state. Called once, after every handle is gone.
    fn shutdown(&mut self);
}
