//! Letterboxed drawing of logical screen pixels onto the macroquad window.

use glam::Vec2;
use lane_defence_core::{
    tunables::{SCREEN_HEIGHT, SCREEN_WIDTH},
    PixelPoint, PixelRect,
};
use lane_defence_rendering::{
    resources::{ResourceManager, TEXT_FONT},
    Color, SpriteKey, Surface, TextAnchor, TextStyle,
};
use macroquad::{
    math::Vec2 as MacroquadVec2,
    shapes::draw_rectangle,
    text::{draw_text_ex, measure_text, TextParams},
    texture::{draw_texture_ex, DrawTextureParams},
};

use crate::{assets::MacroquadAssets, to_macroquad_color};

/// Uniform scale and offset mapping the logical screen into the window.
#[doc(hidden)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenMetrics {
    scale: f32,
    offset: Vec2,
}

impl ScreenMetrics {
    /// Fits the logical screen into a window of the given size, centring it.
    #[must_use]
    pub fn fit(window_width: f32, window_height: f32) -> Self {
        let logical = logical_size();
        let scale = (window_width / logical.x)
            .min(window_height / logical.y)
            .max(0.0);
        let window = Vec2::new(window_width, window_height);
        let offset = ((window - logical * scale) * 0.5).max(Vec2::ZERO);
        Self { scale, offset }
    }

    /// Window pixels per logical pixel.
    #[must_use]
    pub const fn scale(&self) -> f32 {
        self.scale
    }

    /// Converts a logical point into window coordinates.
    #[must_use]
    pub fn to_window(&self, point: PixelPoint) -> Vec2 {
        self.offset + Vec2::new(point.x as f32, point.y as f32) * self.scale
    }

    /// Converts a window position into a logical point, if it lies on the screen.
    #[must_use]
    pub fn to_logical(&self, cursor: Vec2) -> Option<PixelPoint> {
        if self.scale <= f32::EPSILON {
            return None;
        }

        let logical = (cursor - self.offset) / self.scale;
        let size = logical_size();
        if logical.x < 0.0 || logical.y < 0.0 || logical.x >= size.x || logical.y >= size.y {
            return None;
        }
        Some(PixelPoint::new(logical.x.floor() as i32, logical.y.floor() as i32))
    }

    fn to_window_size(&self, rect: PixelRect) -> Vec2 {
        Vec2::new(rect.size().width as f32, rect.size().height as f32) * self.scale
    }
}

fn logical_size() -> Vec2 {
    Vec2::new(SCREEN_WIDTH as f32, SCREEN_HEIGHT as f32)
}

/// [`Surface`] drawing through macroquad with assets from a resource manager.
pub(crate) struct MacroquadSurface<'a> {
    resources: &'a mut ResourceManager<MacroquadAssets>,
    metrics: ScreenMetrics,
}

impl<'a> MacroquadSurface<'a> {
    pub(crate) fn new(
        resources: &'a mut ResourceManager<MacroquadAssets>,
        metrics: ScreenMetrics,
    ) -> Self {
        Self { resources, metrics }
    }
}

impl Surface for MacroquadSurface<'_> {
    fn clear(&mut self, color: Color) {
        let origin = self.metrics.to_window(PixelPoint::new(0, 0));
        let size = logical_size() * self.metrics.scale;
        draw_rectangle(origin.x, origin.y, size.x, size.y, to_macroquad_color(color));
    }

    fn fill_rect(&mut self, rect: PixelRect, color: Color) {
        let origin = self.metrics.to_window(rect.origin());
        let size = self.metrics.to_window_size(rect);
        draw_rectangle(origin.x, origin.y, size.x, size.y, to_macroquad_color(color));
    }

    fn blit(&mut self, sprite: SpriteKey, rect: PixelRect) {
        let texture = self.resources.load_image(sprite.file_name());
        let origin = self.metrics.to_window(rect.origin());
        let size = self.metrics.to_window_size(rect);
        draw_texture_ex(
            texture,
            origin.x,
            origin.y,
            macroquad::color::WHITE,
            DrawTextureParams {
                dest_size: Some(MacroquadVec2::new(size.x, size.y)),
                ..DrawTextureParams::default()
            },
        );
    }

    fn text(&mut self, content: &str, anchor: TextAnchor, style: TextStyle) {
        let font = self.resources.load_font(TEXT_FONT, style.size).font();
        let font_size = (f32::from(style.size) * self.metrics.scale).round().max(1.0) as u16;
        let dimensions = measure_text(content, font, font_size, 1.0);

        let (origin, centred) = match anchor {
            TextAnchor::TopLeft(point) => (self.metrics.to_window(point), false),
            TextAnchor::Center(point) => (self.metrics.to_window(point), true),
        };
        let (x, top) = if centred {
            (
                origin.x - dimensions.width * 0.5,
                origin.y - dimensions.height * 0.5,
            )
        } else {
            (origin.x, origin.y)
        };

        let mut params = TextParams {
            font_size,
            color: to_macroquad_color(style.color),
            ..TextParams::default()
        };
        if let Some(font) = font {
            params.font = font;
        }
        draw_text_ex(content, x, top + dimensions.offset_y, params);
    }
}
