//! Sound playback port.

use std::borrow::Cow;

/// Sound asset groups stored as `<base>_1` .. `<base>_N`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundGroup {
    /// Card placed on the table.
    GameCard,
    /// Card drawn from the deck.
    GameDraw,
}

impl SoundGroup {
    /// Every group.
    pub const ALL: [Self; 2] = [Self::GameCard, Self::GameDraw];

    /// Asset base name.
    #[must_use]
    pub const fn base_name(self) -> &'static str {
        match self {
            Self::GameCard => "game_card",
            Self::GameDraw => "game_draw",
        }
    }

    /// Number of variants in the group.
    #[must_use]
    pub const fn count(self) -> usize {
        match self {
            Self::GameCard => 7,
            Self::GameDraw => 4,
        }
    }
}

/// Sound effect identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum Sound {
    ButtonDown,
    ButtonUp,
    Connect,
    Cursor,
    Error,
    GameChoose,
    GameCreated,
    GameDeleted,
    GameError,
    GameJoin,
    GameLeave,
    GameLose,
    GameScore,
    GameScoreOther,
    GameStart,
    GameTie,
    GameWin,
    Login,
    Start,
    SurfaceSwitch,
    Tap,
    TapDelete,
    /// One variant of a group, 1-based.
    Variant(SoundGroup, usize),
}

impl Sound {
    /// Every single (non-group) sound.
    pub const SINGLES: [Self; 22] = [
        Self::ButtonDown,
        Self::ButtonUp,
        Self::Connect,
        Self::Cursor,
        Self::Error,
        Self::GameChoose,
        Self::GameCreated,
        Self::GameDeleted,
        Self::GameError,
        Self::GameJoin,
        Self::GameLeave,
        Self::GameLose,
        Self::GameScore,
        Self::GameScoreOther,
        Self::GameStart,
        Self::GameTie,
        Self::GameWin,
        Self::Login,
        Self::Start,
        Self::SurfaceSwitch,
        Self::Tap,
        Self::TapDelete,
    ];

    /// Asset file stem.
    #[must_use]
    pub fn asset_name(self) -> Cow<'static, str> {
        let name = match self {
            Self::ButtonDown => "button_down",
            Self::ButtonUp => "button_up",
            Self::Connect => "connect",
            Self::Cursor => "cursor",
            Self::Error => "error",
            Self::GameChoose => "game_choose",
            Self::GameCreated => "game_created",
            Self::GameDeleted => "game_deleted",
            Self::GameError => "game_error",
            Self::GameJoin => "game_join",
            Self::GameLeave => "game_leave",
            Self::GameLose => "game_lose",
            Self::GameScore => "game_score",
            Self::GameScoreOther => "game_score_other",
            Self::GameStart => "game_start",
            Self::GameTie => "game_tie",
            Self::GameWin => "game_win",
            Self::Login => "login",
            Self::Start => "start",
            Self::SurfaceSwitch => "surface_switch",
            Self::Tap => "tap",
            Self::TapDelete => "tap_delete",
            Self::Variant(group, index) => {
                return Cow::Owned(format!("{}_{index}", group.base_name()));
            }
        };
        Cow::Borrowed(name)
    }
}

/// Plays sound effects.
pub trait AudioPort: Send + Sync {
    /// Starts playing `sound`; never blocks.
    fn play(&self, sound: Sound);

    /// Releases the audio device. Later `play` calls are ignored.
    fn release(&self);
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Records played sounds and releases.
    #[derive(Default)]
    pub struct MockAudio {
        played: Mutex<Vec<Sound>>,
        releases: AtomicUsize,
    }

    impl MockAudio {
        /// Creates recorder.
        pub fn new() -> Self {
            Self::default()
        }

        /// Returns sounds played so far.
        pub fn played(&self) -> Vec<Sound> {
            self.played.lock().clone()
        }

        /// Returns how many times `release` was called.
        pub fn release_count(&self) -> usize {
            self.releases.load(Ordering::SeqCst)
        }
    }

    impl AudioPort for MockAudio {
        fn play(&self, sound: Sound) {
            self.played.lock().push(sound);
        }

        fn release(&self) {
            self.releases.fetch_add(1, Ordering::SeqCst);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_asset_names_are_one_based() {
        assert_eq!(Sound::Variant(SoundGroup::GameCard, 1).asset_name(), "game_card_1");
        assert_eq!(Sound::Variant(SoundGroup::GameDraw, 4).asset_name(), "game_draw_4");
    }

    #[test]
    fn test_single_asset_names_are_unique() {
        let mut names: Vec<_> = Sound::SINGLES.iter().map(|s| s.asset_name()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), Sound::SINGLES.len());
    }
}
