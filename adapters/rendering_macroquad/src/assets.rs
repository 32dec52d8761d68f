//! Macroquad implementation of the asset source.

use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use lane_defence_core::PixelSize;
use lane_defence_rendering::{resources::AssetError, Color};
use macroquad::{text::Font, texture::Texture2D};

/// Font handle that may refer to macroquad's built-in font.
#[derive(Clone, Copy)]
pub(crate) enum FontHandle {
    Loaded(Font),
    Builtin,
}

impl FontHandle {
    pub(crate) fn font(self) -> Option<Font> {
        match self {
            Self::Loaded(font) => Some(font),
            Self::Builtin => None,
        }
    }
}

#[cfg(feature = "audio")]
pub(crate) type SoundHandle = macroquad::audio::Sound;

/// Without the `audio` feature no sound can ever be loaded.
#[cfg(not(feature = "audio"))]
#[derive(Clone, Copy)]
pub(crate) enum SoundHandle {}

/// Reads assets from disk and decodes them with macroquad.
#[derive(Default)]
pub(crate) struct MacroquadAssets {
    sounds: HashMap<PathBuf, SoundHandle>,
}

impl MacroquadAssets {
    /// Decodes every sound in `paths` ahead of time.
    ///
    /// Macroquad only decodes audio asynchronously, so sounds are loaded once
    /// inside the window future and looked up synchronously afterwards.
    #[cfg(feature = "audio")]
    pub(crate) async fn preload_sounds(&mut self, paths: &[PathBuf]) {
        for path in paths {
            let bytes = match fs::read(path) {
                Ok(bytes) => bytes,
                Err(error) => {
                    tracing::warn!(%error, path = %path.display(), "sound file unreadable");
                    continue;
                }
            };
            match macroquad::audio::load_sound_from_bytes(&bytes).await {
                Ok(sound) => {
                    let _ = self.sounds.insert(path.clone(), sound);
                }
                Err(error) => {
                    tracing::warn!(?error, path = %path.display(), "sound file undecodable");
                }
            }
        }
    }

    #[cfg(not(feature = "audio"))]
    pub(crate) async fn preload_sounds(&mut self, _paths: &[PathBuf]) {}
}

fn channel_to_u8(channel: f32) -> u8 {
    (channel.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Decoded image ready for upload as an RGBA8 texture.
#[derive(Debug)]
struct DecodedImage {
    width: u16,
    height: u16,
    pixels: Vec<u8>,
}

/// Decodes `bytes` on the CPU. Corrupt data yields [`AssetError::Decode`].
fn decode_rgba(path: &Path, bytes: &[u8]) -> Result<DecodedImage, AssetError> {
    let decode_error = |reason: String| AssetError::Decode {
        path: path.to_path_buf(),
        reason,
    };

    let image = image::load_from_memory(bytes)
        .map_err(|error| decode_error(error.to_string()))?
        .into_rgba8();
    let (width, height) = image.dimensions();
    let width = u16::try_from(width)
        .map_err(|_| decode_error(format!("width {width} exceeds texture limits")))?;
    let height = u16::try_from(height)
        .map_err(|_| decode_error(format!("height {height} exceeds texture limits")))?;

    Ok(DecodedImage {
        width,
        height,
        pixels: image.into_raw(),
    })
}

fn read_bytes(path: &Path) -> Result<Vec<u8>, AssetError> {
    fs::read(path).map_err(|source| AssetError::Io {
        path: path.to_path_buf(),
        source,
    })
}

impl lane_defence_rendering::resources::AssetSource for MacroquadAssets {
    type Image = Texture2D;
    type Font = FontHandle;
    type Sound = SoundHandle;

    fn read_image(&mut self, path: &Path) -> Result<Self::Image, AssetError> {
        let bytes = read_bytes(path)?;
        let image = decode_rgba(path, &bytes)?;
        Ok(Texture2D::from_rgba8(image.width, image.height, &image.pixels))
    }

    fn placeholder_image(&mut self, size: PixelSize, color: Color) -> Self::Image {
        let width = u16::try_from(size.width.max(1)).unwrap_or(u16::MAX);
        let height = u16::try_from(size.height.max(1)).unwrap_or(u16::MAX);
        let pixel = [
            channel_to_u8(color.red),
            channel_to_u8(color.green),
            channel_to_u8(color.blue),
            channel_to_u8(color.alpha),
        ];
        let bytes: Vec<u8> = pixel
            .iter()
            .copied()
            .cycle()
            .take(usize::from(width) * usize::from(height) * pixel.len())
            .collect();
        Texture2D::from_rgba8(width, height, &bytes)
    }

    fn read_font(&mut self, path: &Path, _size: u16) -> Result<Self::Font, AssetError> {
        let bytes = read_bytes(path)?;
        macroquad::text::load_ttf_font_from_bytes(&bytes)
            .map(FontHandle::Loaded)
            .map_err(|error| AssetError::Decode {
                path: path.to_path_buf(),
                reason: format!("{error:?}"),
            })
    }

    fn default_font(&mut self, _size: u16) -> Self::Font {
        FontHandle::Builtin
    }

    fn read_sound(&mut self, path: &Path) -> Result<Self::Sound, AssetError> {
        self.sounds
            .get(path)
            .copied()
            .ok_or_else(|| AssetError::Unavailable {
                path: path.to_path_buf(),
            })
    }

    #[cfg(feature = "audio")]
    fn play_sound(&mut self, sound: &Self::Sound, looped: bool) {
        macroquad::audio::play_sound(
            *sound,
            macroquad::audio::PlaySoundParams {
                looped,
                volume: 1.0,
            },
        );
    }

    #[cfg(not(feature = "audio"))]
    fn play_sound(&mut self, sound: &Self::Sound, _looped: bool) {
        match *sound {}
    }

    #[cfg(feature = "audio")]
    fn stop_sound(&mut self, sound: &Self::Sound) {
        macroquad::audio::stop_sound(*sound);
    }

    #[cfg(not(feature = "audio"))]
    fn stop_sound(&mut self, sound: &Self::Sound) {
        match *sound {}
    }
}
