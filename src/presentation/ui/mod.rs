//! UI screens and the run loop.

mod calls;
mod login_view;
mod message_view;
mod run_loop;
mod view;
mod view_state_machine;

pub use calls::{ClientState, builtin_registry};
pub use login_view::{LoginState, LoginView};
pub use message_view::MessageView;
pub use run_loop::{DEFAULT_TICK_RATE_HZ, RunLoop, RunLoopParts};
pub use view::{View, ViewContext, ViewRegistry};
pub use view_state_machine::{ViewState, ViewStateMachine};
