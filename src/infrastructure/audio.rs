//! Sound assets from `<assets>/sound/<name>.ogg`.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, trace, warn};

use crate::domain::ports::{AudioPort, Sound, SoundGroup};

/// Resolved sound asset paths.
#[derive(Debug, Default)]
pub struct SoundBank {
    assets: HashMap<Sound, PathBuf>,
}

impl SoundBank {
    /// Resolves every known sound under `dir`.
    ///
    /// Missing files are logged and left out; playing them is a no-op.
    #[must_use]
    pub fn load(dir: &Path) -> Self {
        let group_variants = SoundGroup::ALL
            .into_iter()
            .flat_map(|group| (1..=group.count()).map(move |i| Sound::Variant(group, i)));

        let mut assets = HashMap::new();
        for sound in Sound::SINGLES.into_iter().chain(group_variants) {
            let path = dir.join(format!("{}.ogg", sound.asset_name()));
            if path.is_file() {
                assets.insert(sound, path);
            } else {
                warn!(path = ?path, "Sound asset missing");
            }
        }

        debug!(loaded = assets.len(), "Sound bank loaded");
        Self { assets }
    }

    /// Returns the asset path of `sound`.
    #[must_use]
    pub fn path(&self, sound: Sound) -> Option<&Path> {
        self.assets.get(&sound).map(PathBuf::as_path)
    }

    /// Returns the number of resolved assets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.assets.len()
    }

    /// Returns whether no asset was found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}

/// [`AudioPort`] that cues sounds from a [`SoundBank`].
///
/// Decoding and mixing are left to the host; the player records cues in the
/// log. Plays after `release` are ignored.
pub struct SoundPlayer {
    bank: SoundBank,
    released: AtomicBool,
}

impl SoundPlayer {
    /// Creates player.
    #[must_use]
    pub const fn new(bank: SoundBank) -> Self {
        Self {
            bank,
            released: AtomicBool::new(false),
        }
    }

    /// Returns whether `release` has been called.
    #[must_use]
    pub fn is_released(&self) -> bool {
        self.released.load(Ordering::Acquire)
    }
}

impl AudioPort for SoundPlayer {
    fn play(&self, sound: Sound) {
        if self.is_released() {
            return;
        }
        match self.bank.path(sound) {
            Some(path) => trace!(sound = %sound.asset_name(), path = ?path, "Playing sound"),
            None => trace!(sound = %sound.asset_name(), "Sound unavailable"),
        }
    }

    fn release(&self) {
        if !self.released.swap(true, Ordering::AcqRel) {
            debug!("Audio released");
        }
    }
}
