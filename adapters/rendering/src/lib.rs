#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Lane Defence adapters.
//!
//! A [`Scene`] is a plain description of one frame. Backends implement
//! [`Surface`] and let the scene draw itself through [`Draw`], so layer order
//! and screen layout live here rather than in any particular backend.

pub mod resources;

use anyhow::Result as AnyResult;
use lane_defence_core::{
    tunables::{rules_button, SCREEN_HEIGHT, SCREEN_WIDTH},
    AudioRequest, Outcome, PixelPoint, PixelRect, PixelSize, PlantKind, PointerPress,
};
use std::time::Duration;

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Opaque white.
    pub const WHITE: Self = Self::from_rgb_u8(255, 255, 255);
    /// Opaque black.
    pub const BLACK: Self = Self::from_rgb_u8(0, 0, 0);
    /// Opaque red used by the HUD.
    pub const RED: Self = Self::from_rgb_u8(255, 0, 0);
    /// Dark blue backdrop of the rules page.
    pub const NAVY: Self = Self::from_rgb_u8(0, 0, 50);
    /// Magenta substituted for images that failed to load.
    pub const PLACEHOLDER: Self = Self::from_rgb_u8(255, 0, 255);

    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }
}

/// Images a scene can ask a backend to draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpriteKey {
    /// Title screen backdrop.
    Start,
    /// Victory screen backdrop.
    Clear,
    /// Defeat screen backdrop.
    GameOver,
    /// Light checkerboard tile.
    GrassLight,
    /// Dark checkerboard tile.
    GrassDark,
    /// Sunflower plant.
    Sunflower,
    /// Peashooter plant.
    Peashooter,
    /// Pea projectile.
    Pea,
    /// Walking zombie.
    Zombie,
}

impl SpriteKey {
    /// Every sprite, in a stable order suitable for preloading.
    pub const ALL: [Self; 9] = [
        Self::Start,
        Self::Clear,
        Self::GameOver,
        Self::GrassLight,
        Self::GrassDark,
        Self::Sunflower,
        Self::Peashooter,
        Self::Pea,
        Self::Zombie,
    ];

    /// File name of the sprite below the image directory.
    #[must_use]
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Start => "start.png",
            Self::Clear => "CLEAR.png",
            Self::GameOver => "GAMEOVER.png",
            Self::GrassLight => "map1.png",
            Self::GrassDark => "map2.png",
            Self::Sunflower => "sunflower.png",
            Self::Peashooter => "peashooter.png",
            Self::Pea => "peabullet.png",
            Self::Zombie => "zombie.png",
        }
    }

    /// Tile sprite for a checkerboard shade.
    #[must_use]
    pub const fn for_shade(shade: u32) -> Self {
        if shade % 2 == 0 {
            Self::GrassLight
        } else {
            Self::GrassDark
        }
    }

    /// Sprite drawn for a plant kind.
    #[must_use]
    pub const fn for_plant(kind: PlantKind) -> Self {
        match kind {
            PlantKind::Sunflower => Self::Sunflower,
            PlantKind::Peashooter => Self::Peashooter,
        }
    }
}

/// Point a line of text is positioned against.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextAnchor {
    /// The text starts at the point.
    TopLeft(PixelPoint),
    /// The text is centred on the point.
    Center(PixelPoint),
}

/// Size and color of a line of text.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextStyle {
    /// Font size in logical pixels.
    pub size: u16,
    /// Fill color.
    pub color: Color,
}

impl TextStyle {
    /// Creates a new text style.
    #[must_use]
    pub const fn new(size: u16, color: Color) -> Self {
        Self { size, color }
    }
}

/// Drawing primitives a backend exposes in logical screen pixels.
pub trait Surface {
    /// Fills the whole surface with `color`.
    fn clear(&mut self, color: Color);

    /// Fills `rect` with `color`.
    fn fill_rect(&mut self, rect: PixelRect, color: Color);

    /// Draws `sprite` stretched over `rect`.
    fn blit(&mut self, sprite: SpriteKey, rect: PixelRect);

    /// Draws one line of text.
    fn text(&mut self, content: &str, anchor: TextAnchor, style: TextStyle);
}

/// Something that knows how to put itself on a [`Surface`].
pub trait Draw {
    /// Issues the drawing operations for `self`.
    fn draw(&self, surface: &mut dyn Surface);
}

/// Checkerboard tile of the planting grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TilePresentation {
    /// Screen area covered by the tile.
    pub bounds: PixelRect,
    /// Sprite used for the tile.
    pub sprite: SpriteKey,
}

impl TilePresentation {
    /// Creates a tile descriptor from its bounds and checkerboard shade.
    #[must_use]
    pub const fn new(bounds: PixelRect, shade: u32) -> Self {
        Self {
            bounds,
            sprite: SpriteKey::for_shade(shade),
        }
    }
}

impl Draw for TilePresentation {
    fn draw(&self, surface: &mut dyn Surface) {
        surface.blit(self.sprite, self.bounds);
    }
}

/// Live plant to draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlantPresentation {
    /// Kind of the plant.
    pub kind: PlantKind,
    /// Screen area covered by the plant.
    pub bounds: PixelRect,
}

impl PlantPresentation {
    /// Creates a new plant descriptor.
    #[must_use]
    pub const fn new(kind: PlantKind, bounds: PixelRect) -> Self {
        Self { kind, bounds }
    }
}

impl Draw for PlantPresentation {
    fn draw(&self, surface: &mut dyn Surface) {
        surface.blit(SpriteKey::for_plant(self.kind), self.bounds);
    }
}

/// Live pea to draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProjectilePresentation {
    /// Screen area covered by the pea.
    pub bounds: PixelRect,
}

impl ProjectilePresentation {
    /// Creates a new pea descriptor.
    #[must_use]
    pub const fn new(bounds: PixelRect) -> Self {
        Self { bounds }
    }
}

impl Draw for ProjectilePresentation {
    fn draw(&self, surface: &mut dyn Surface) {
        surface.blit(SpriteKey::Pea, self.bounds);
    }
}

/// Live zombie to draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ZombiePresentation {
    /// Screen area covered by the zombie.
    pub bounds: PixelRect,
}

impl ZombiePresentation {
    /// Creates a new zombie descriptor.
    #[must_use]
    pub const fn new(bounds: PixelRect) -> Self {
        Self { bounds }
    }
}

impl Draw for ZombiePresentation {
    fn draw(&self, surface: &mut dyn Surface) {
        surface.blit(SpriteKey::Zombie, self.bounds);
    }
}

/// Counters shown on top of the field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HudPresentation {
    /// Spendable currency.
    pub currency: u32,
    /// Current level.
    pub level: u32,
    /// Accumulated score.
    pub score: u32,
    /// Score still missing before the next level.
    pub score_to_next_level: i32,
}

const HUD_STYLE: TextStyle = TextStyle::new(26, Color::RED);

impl Draw for HudPresentation {
    fn draw(&self, surface: &mut dyn Surface) {
        surface.text(
            "Left click: sunflower   Right click: peashooter   Q: give up",
            TextAnchor::TopLeft(PixelPoint::new(5, 5)),
            HUD_STYLE,
        );
        surface.text(
            &format!(
                "Level {}   Score {}   Next level in {}",
                self.level, self.score, self.score_to_next_level
            ),
            TextAnchor::TopLeft(PixelPoint::new(5, 40)),
            HUD_STYLE,
        );
        surface.text(
            &format!("Money $: {}", self.currency),
            TextAnchor::TopLeft(PixelPoint::new(600, 40)),
            HUD_STYLE,
        );
    }
}

/// Screen a scene presents.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SceneScreen {
    /// Title screen.
    Start,
    /// Rules page.
    Rules,
    /// The field during a run.
    Playing,
    /// End-of-run page.
    GameOver {
        /// How the run ended.
        outcome: Outcome,
        /// Final score.
        score: u32,
    },
}

/// Lines of the rules page, top to bottom.
pub const RULES_TEXT: [&str; 9] = [
    "How to play",
    "Left click an empty tile to plant a sunflower ($30).",
    "Right click an empty tile to plant a peashooter ($50).",
    "Sunflowers earn $5 every few moments.",
    "Peashooters fire at zombies walking down their lane.",
    "Every zombie defeated is worth 20 points.",
    "Clear level 5 to win. A zombie reaching the house ends the run.",
    "Press Q to give up the current run.",
    "Click anywhere to return.",
];

const RULES_FIRST_LINE_Y: i32 = 150;
const RULES_LINE_SPACING: i32 = 30;

/// Everything needed to draw one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Screen to present.
    pub screen: SceneScreen,
    /// Grid tiles, drawn first.
    pub tiles: Vec<TilePresentation>,
    /// Live plants.
    pub plants: Vec<PlantPresentation>,
    /// Live peas.
    pub projectiles: Vec<ProjectilePresentation>,
    /// Live zombies.
    pub zombies: Vec<ZombiePresentation>,
    /// Counters drawn last.
    pub hud: HudPresentation,
    /// Audio requests the backend should carry out this frame.
    pub audio: Vec<AudioRequest>,
    /// Whether the backend should close after this frame.
    pub exit_requested: bool,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    /// Creates an empty scene showing the title screen.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            screen: SceneScreen::Start,
            tiles: Vec::new(),
            plants: Vec::new(),
            projectiles: Vec::new(),
            zombies: Vec::new(),
            hud: HudPresentation {
                currency: 0,
                level: 1,
                score: 0,
                score_to_next_level: 0,
            },
            audio: Vec::new(),
            exit_requested: false,
        }
    }

    fn draw_field(&self, surface: &mut dyn Surface) {
        surface.clear(Color::WHITE);
        for tile in &self.tiles {
            tile.draw(surface);
        }
        for plant in &self.plants {
            plant.draw(surface);
        }
        for projectile in &self.projectiles {
            projectile.draw(surface);
        }
        for zombie in &self.zombies {
            zombie.draw(surface);
        }
        self.hud.draw(surface);
    }
}

impl Draw for Scene {
    fn draw(&self, surface: &mut dyn Surface) {
        match self.screen {
            SceneScreen::Start => draw_start(surface),
            SceneScreen::Rules => draw_rules(surface),
            SceneScreen::Playing => self.draw_field(surface),
            SceneScreen::GameOver { outcome, score } => draw_game_over(surface, outcome, score),
        }
    }
}

/// Rectangle covering the whole logical screen.
#[must_use]
pub const fn full_screen() -> PixelRect {
    PixelRect::from_origin_and_size(
        PixelPoint::new(0, 0),
        PixelSize::new(SCREEN_WIDTH, SCREEN_HEIGHT),
    )
}

fn draw_start(surface: &mut dyn Surface) {
    surface.blit(SpriteKey::Start, full_screen());
    surface.text(
        "Click to start",
        TextAnchor::Center(PixelPoint::new(SCREEN_WIDTH / 2 + 75, SCREEN_HEIGHT / 2 - 15)),
        TextStyle::new(25, Color::BLACK),
    );
    let button = rules_button();
    surface.fill_rect(button, Color::NAVY);
    surface.text(
        "Rules",
        TextAnchor::Center(PixelPoint::new(
            button.origin().x + button.size().width / 2,
            button.origin().y + button.size().height / 2,
        )),
        TextStyle::new(25, Color::WHITE),
    );
}

fn draw_rules(surface: &mut dyn Surface) {
    surface.clear(Color::NAVY);
    let mut y = RULES_FIRST_LINE_Y;
    for line in RULES_TEXT {
        surface.text(
            line,
            TextAnchor::Center(PixelPoint::new(SCREEN_WIDTH / 2, y)),
            TextStyle::new(22, Color::WHITE),
        );
        y += RULES_LINE_SPACING;
    }
}

fn draw_game_over(surface: &mut dyn Surface, outcome: Outcome, score: u32) {
    let score_line = format!("Your score: {score}");
    match outcome {
        Outcome::Victory => {
            surface.blit(SpriteKey::Clear, full_screen());
            surface.text(
                &score_line,
                TextAnchor::TopLeft(PixelPoint::new(300, 320)),
                TextStyle::new(30, Color::WHITE),
            );
            surface.text(
                "Click to play again",
                TextAnchor::TopLeft(PixelPoint::new(320, 410)),
                TextStyle::new(25, Color::BLACK),
            );
        }
        Outcome::Defeat => {
            surface.blit(SpriteKey::GameOver, full_screen());
            surface.text(
                &score_line,
                TextAnchor::TopLeft(PixelPoint::new(500, 270)),
                TextStyle::new(30, Color::WHITE),
            );
            surface.text(
                "Retry",
                TextAnchor::TopLeft(PixelPoint::new(525, 360)),
                TextStyle::new(50, Color::WHITE),
            );
        }
    }
}

/// Input snapshot gathered by adapters before updating the scene.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct FrameInput {
    /// Pointer presses observed during the frame, in logical screen pixels.
    pub presses: Vec<PointerPress>,
    /// Whether the abort-run key was pressed.
    pub forfeit: bool,
    /// Whether the player asked to close the window.
    pub quit: bool,
}

/// Scene description combined with window configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Solid color used to clear each frame.
    pub clear_color: Color,
    /// Scene content that should be displayed.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, clear_color: Color, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            clear_color,
            scene,
        }
    }
}

/// Rendering backends capable of presenting Lane Defence scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until it is requested to exit.
    ///
    /// The provided `update_scene` closure receives the frame delta and the
    /// input captured by the adapter, and rewrites the scene before it is
    /// drawn. The backend carries out the scene's audio requests and stops
    /// once [`Scene::exit_requested`] is set.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static;
}
