//! Symbolic identifiers for client screens.

use std::fmt;

/// Screen the client can switch to.
///
/// Kinds are resolved to constructors through the view registry built at
/// startup, so naming a kind never evaluates anything dynamically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewKind {
    /// Server and account entry.
    Login,
    /// Full-screen notice with a single message.
    Message,
    /// Running game table.
    Game,
    /// Lobby listing open games.
    Overview,
}

impl ViewKind {
    /// Returns the stable name of the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Message => "message",
            Self::Game => "game",
            Self::Overview => "overview",
        }
    }
}

impl fmt::Display for ViewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
