#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Macroquad-backed rendering adapter for Lane Defence.
//!
//! Macroquad's optional audio stack depends on native ALSA development
//! libraries, which are unavailable in the containerised CI environment.
//! To keep `cargo test` usable everywhere this crate depends on macroquad
//! without its default `audio` feature. Enable this crate's `audio` feature
//! to get music and sound cues; without it every sound is reported as
//! unavailable and skipped.

mod assets;
mod surface;

use anyhow::Result;
use glam::Vec2;
use lane_defence_core::{
    tunables::{SCREEN_HEIGHT, SCREEN_WIDTH},
    AudioCue, PointerButton, PointerPress, Soundtrack,
};
use lane_defence_rendering::{
    resources::{cue_file, soundtrack_file, ResourceManager, SOUND_DIR},
    Color, Draw, FrameInput, Presentation, RenderingBackend, Scene, SpriteKey,
};
use macroquad::input::{
    is_key_pressed, is_mouse_button_pressed, is_quit_requested, mouse_position, prevent_quit,
    KeyCode, MouseButton,
};
use std::{
    path::{Path, PathBuf},
    time::Duration,
};
use tracing::info;

use self::{assets::MacroquadAssets, surface::MacroquadSurface};

#[doc(hidden)]
pub use self::surface::ScreenMetrics;

/// Directory assets are read from unless configured otherwise.
pub const DEFAULT_ASSET_ROOT: &str = "assets";

/// Rendering backend implemented on top of macroquad.
#[derive(Debug)]
pub struct MacroquadBackend {
    swap_interval: Option<i32>,
    asset_root: PathBuf,
}

impl Default for MacroquadBackend {
    fn default() -> Self {
        Self {
            swap_interval: None,
            asset_root: PathBuf::from(DEFAULT_ASSET_ROOT),
        }
    }
}

impl MacroquadBackend {
    /// Returns a backend that requests the platform's default swap interval.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the backend to request a specific swap interval from the platform.
    #[must_use]
    pub fn with_swap_interval(mut self, swap_interval: Option<i32>) -> Self {
        self.swap_interval = swap_interval;
        self
    }

    /// Configures the backend to either synchronise presentation with the display refresh rate
    /// or render as fast as possible.
    #[must_use]
    pub fn with_vsync(self, enabled: bool) -> Self {
        let swap_interval = if enabled { Some(1) } else { Some(0) };
        self.with_swap_interval(swap_interval)
    }

    /// Configures the directory holding the `images`, `sounds` and `fonts` folders.
    #[must_use]
    pub fn with_asset_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.asset_root = root.into();
        self
    }
}

/// Raw device state sampled once per frame.
#[doc(hidden)]
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameObservations {
    /// Cursor position in window pixels.
    pub cursor: Vec2,
    /// Left button went down this frame.
    pub left_pressed: bool,
    /// Right button went down this frame.
    pub right_pressed: bool,
    /// Middle button went down this frame.
    pub middle_pressed: bool,
    /// `Q` went down this frame.
    pub forfeit_pressed: bool,
    /// `Escape` went down or the window was asked to close.
    pub quit_requested: bool,
}

impl FrameObservations {
    fn poll() -> Self {
        let (cursor_x, cursor_y) = mouse_position();
        Self {
            cursor: Vec2::new(cursor_x, cursor_y),
            left_pressed: is_mouse_button_pressed(MouseButton::Left),
            right_pressed: is_mouse_button_pressed(MouseButton::Right),
            middle_pressed: is_mouse_button_pressed(MouseButton::Middle),
            forfeit_pressed: is_key_pressed(KeyCode::Q),
            quit_requested: is_key_pressed(KeyCode::Escape) || is_quit_requested(),
        }
    }
}

/// Translates raw observations into logical frame input.
///
/// Presses landing outside the letterboxed screen are dropped.
#[doc(hidden)]
#[must_use]
pub fn frame_input_from_observations(
    metrics: &ScreenMetrics,
    observations: FrameObservations,
) -> FrameInput {
    let mut input = FrameInput {
        forfeit: observations.forfeit_pressed,
        quit: observations.quit_requested,
        ..FrameInput::default()
    };

    if let Some(point) = metrics.to_logical(observations.cursor) {
        let buttons = [
            (observations.left_pressed, PointerButton::Primary),
            (observations.right_pressed, PointerButton::Secondary),
            (observations.middle_pressed, PointerButton::Middle),
        ];
        input.presses.extend(
            buttons
                .into_iter()
                .filter(|(pressed, _)| *pressed)
                .map(|(_, button)| PointerPress::new(point, button)),
        );
    }

    input
}

fn sound_paths(asset_root: &Path) -> Vec<PathBuf> {
    let directory = asset_root.join(SOUND_DIR);
    let cues = [AudioCue::HordeApproaching, AudioCue::Victory, AudioCue::Defeat];
    std::iter::once(soundtrack_file(Soundtrack::Background))
        .chain(cues.into_iter().map(cue_file))
        .map(|name| directory.join(name))
        .collect()
}

pub(crate) fn to_macroquad_color(color: Color) -> macroquad::color::Color {
    macroquad::color::Color::new(color.red, color.green, color.blue, color.alpha)
}

impl RenderingBackend for MacroquadBackend {
    fn run<F>(self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static,
    {
        let Self {
            swap_interval,
            asset_root,
        } = self;

        let Presentation {
            window_title,
            clear_color,
            scene,
        } = presentation;

        let mut config = macroquad::window::Conf {
            window_title,
            window_width: SCREEN_WIDTH,
            window_height: SCREEN_HEIGHT,
            ..macroquad::window::Conf::default()
        };
        if let Some(swap_interval) = swap_interval {
            config.platform.swap_interval = Some(swap_interval);
        }

        macroquad::Window::from_config(config, async move {
            prevent_quit();

            let mut scene = scene;
            let mut assets = MacroquadAssets::default();
            assets.preload_sounds(&sound_paths(&asset_root)).await;
            let mut resources = ResourceManager::new(assets, asset_root);
            for sprite in SpriteKey::ALL {
                let _ = resources.load_image(sprite.file_name());
            }

            let background = to_macroquad_color(clear_color);

            loop {
                macroquad::window::clear_background(background);

                let metrics = ScreenMetrics::fit(
                    macroquad::window::screen_width(),
                    macroquad::window::screen_height(),
                );
                let dt_seconds = macroquad::time::get_frame_time();
                let frame_dt = Duration::from_secs_f32(dt_seconds.max(0.0));
                let frame_input =
                    frame_input_from_observations(&metrics, FrameObservations::poll());

                update_scene(frame_dt, frame_input, &mut scene);

                for request in scene.audio.drain(..) {
                    resources.handle_audio(request);
                }
                if scene.exit_requested {
                    info!("closing window");
                    resources.clear();
                    break;
                }

                scene.draw(&mut MacroquadSurface::new(&mut resources, metrics));

                macroquad::window::next_frame().await;
            }
        });

        Ok(())
    }
}
