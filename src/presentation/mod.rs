//! Presentation layer with views, the run loop and terminal I/O.

/// Render targets.
pub mod display;
/// Terminal input.
pub mod events;
/// Views and the run loop.
pub mod ui;
/// Reusable widgets.
pub mod widgets;

pub use display::{Display, TerminalDisplay};
pub use events::{InputSource, TerminalInput};
pub use ui::{RunLoop, RunLoopParts};
