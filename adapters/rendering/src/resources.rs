//! Lazily populated asset caches with local fallbacks.
//!
//! Loading never fails from the caller's point of view: missing images are
//! replaced by a magenta placeholder, missing fonts by the backend's default
//! font and missing sounds are skipped. Every fallback is logged.

use std::{
    collections::HashMap,
    io,
    path::{Path, PathBuf},
};

use lane_defence_core::{AudioCue, AudioRequest, PixelSize, Soundtrack};
use thiserror::Error;
use tracing::warn;

use crate::Color;

/// Directory below the asset root holding images.
pub const IMAGE_DIR: &str = "images";

/// Directory below the asset root holding music and sound effects.
pub const SOUND_DIR: &str = "sounds";

/// Font used for every line of text, relative to the asset root.
pub const TEXT_FONT: &str = "fonts/fontsmsjh.ttf";

/// Size of the image substituted for one that failed to load.
pub const PLACEHOLDER_SIZE: PixelSize = PixelSize::new(80, 80);

/// Errors reported by an [`AssetSource`] while reading an asset.
#[derive(Debug, Error)]
pub enum AssetError {
    /// The asset file could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        /// File that was requested.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// The file was read but its contents were rejected.
    #[error("failed to decode {}: {reason}", .path.display())]
    Decode {
        /// File that was requested.
        path: PathBuf,
        /// Description of the decoding failure.
        reason: String,
    },
    /// The backend has no such asset available.
    #[error("{} is not available", .path.display())]
    Unavailable {
        /// File that was requested.
        path: PathBuf,
    },
}

/// Backend-specific loader and player of raw assets.
pub trait AssetSource {
    /// Handle to a decoded image.
    type Image: Clone;
    /// Handle to a font at a given size.
    type Font: Clone;
    /// Handle to a decoded sound.
    type Sound: Clone;

    /// Reads and decodes the image stored at `path`.
    fn read_image(&mut self, path: &Path) -> Result<Self::Image, AssetError>;

    /// Builds a solid image used in place of one that failed to load.
    fn placeholder_image(&mut self, size: PixelSize, color: Color) -> Self::Image;

    /// Reads the font stored at `path` for rendering at `size`.
    fn read_font(&mut self, path: &Path, size: u16) -> Result<Self::Font, AssetError>;

    /// Built-in font used when a font file cannot be loaded.
    fn default_font(&mut self, size: u16) -> Self::Font;

    /// Reads and decodes the sound stored at `path`.
    fn read_sound(&mut self, path: &Path) -> Result<Self::Sound, AssetError>;

    /// Starts playing `sound`, repeating it forever when `looped` is set.
    fn play_sound(&mut self, sound: &Self::Sound, looped: bool);

    /// Stops a sound started with [`AssetSource::play_sound`].
    fn stop_sound(&mut self, sound: &Self::Sound);
}

/// File name of a background track below [`SOUND_DIR`].
#[must_use]
pub const fn soundtrack_file(track: Soundtrack) -> &'static str {
    match track {
        Soundtrack::Background => "background_music.mp3",
    }
}

/// File name of a one-shot cue below [`SOUND_DIR`].
#[must_use]
pub const fn cue_file(cue: AudioCue) -> &'static str {
    match cue {
        AudioCue::HordeApproaching => "zombie_horde.mp3",
        AudioCue::Victory => "win_sound.mp3",
        AudioCue::Defeat => "lose_sound.mp3",
    }
}

/// Caches assets read through an [`AssetSource`].
pub struct ResourceManager<S: AssetSource> {
    source: S,
    root: PathBuf,
    images: HashMap<String, S::Image>,
    fonts: HashMap<(String, u16), S::Font>,
    sounds: HashMap<String, S::Sound>,
    music: Option<S::Sound>,
}

impl<S: AssetSource> ResourceManager<S> {
    /// Creates an empty manager reading assets below `root`.
    pub fn new(source: S, root: impl Into<PathBuf>) -> Self {
        Self {
            source,
            root: root.into(),
            images: HashMap::new(),
            fonts: HashMap::new(),
            sounds: HashMap::new(),
            music: None,
        }
    }

    /// Directory assets are resolved against.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Read-only access to the underlying source.
    #[must_use]
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Returns the image called `name`, or a cached placeholder if it cannot be loaded.
    pub fn load_image(&mut self, name: &str) -> S::Image {
        if let Some(image) = self.images.get(name) {
            return image.clone();
        }

        let path = self.root.join(IMAGE_DIR).join(name);
        let image = match self.source.read_image(&path) {
            Ok(image) => image,
            Err(error) => {
                warn!(%error, image = name, "using placeholder image");
                self.source.placeholder_image(PLACEHOLDER_SIZE, Color::PLACEHOLDER)
            }
        };
        let _ = self.images.insert(name.to_owned(), image.clone());
        image
    }

    /// Returns the font at `path` in `size`, falling back to the default font.
    pub fn load_font(&mut self, path: &str, size: u16) -> S::Font {
        let key = (path.to_owned(), size);
        if let Some(font) = self.fonts.get(&key) {
            return font.clone();
        }

        let font = match self.source.read_font(&self.root.join(path), size) {
            Ok(font) => font,
            Err(error) => {
                warn!(%error, font = path, size, "using default font");
                self.source.default_font(size)
            }
        };
        let _ = self.fonts.insert(key, font.clone());
        font
    }

    /// Returns the sound called `name`, or `None` if it cannot be loaded.
    ///
    /// Failures are not cached, so a later call retries the load.
    pub fn load_sound(&mut self, name: &str) -> Option<S::Sound> {
        if let Some(sound) = self.sounds.get(name) {
            return Some(sound.clone());
        }

        let path = self.root.join(SOUND_DIR).join(name);
        match self.source.read_sound(&path) {
            Ok(sound) => {
                let _ = self.sounds.insert(name.to_owned(), sound.clone());
                Some(sound)
            }
            Err(error) => {
                warn!(%error, sound = name, "sound unavailable");
                None
            }
        }
    }

    /// Replaces the current background track with `name`.
    pub fn play_music(&mut self, name: &str, looped: bool) {
        self.stop_music();
        if let Some(sound) = self.load_sound(name) {
            self.source.play_sound(&sound, looped);
            self.music = Some(sound);
        }
    }

    /// Stops the current background track, if any.
    pub fn stop_music(&mut self) {
        if let Some(sound) = self.music.take() {
            self.source.stop_sound(&sound);
        }
    }

    /// Plays the sound called `name` once.
    pub fn play_cue(&mut self, name: &str) {
        if let Some(sound) = self.load_sound(name) {
            self.source.play_sound(&sound, false);
        }
    }

    /// Carries out an audio request emitted by the game flow.
    pub fn handle_audio(&mut self, request: AudioRequest) {
        match request {
            AudioRequest::PlayMusic(track) => self.play_music(soundtrack_file(track), true),
            AudioRequest::StopMusic => self.stop_music(),
            AudioRequest::PlayCue(cue) => self.play_cue(cue_file(cue)),
        }
    }

    /// Stops music and drops every cached asset.
    pub fn clear(&mut self) {
        self.stop_music();
        self.images.clear();
        self.fonts.clear();
        self.sounds.clear();
    }
}
