//=========================================================================
// Scaffold Engine
//
// Main entry point: configuration, the game contract and the runtime.
//
// Architecture:
// ```text
//     EngineBuilder  ──build()──>  Engine  ──run(game, backend)──>  [Platform]
//         │                                                           │
//         ├─ with_title()                                             ├─ window
//         ├─ with_size()                                              ├─ FrameDriver
//         ├─ with_clear_color()                                       └─ blocks until exit
//         └─ with_transition_capacity()
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use log::info;

//=== Internal Dependencies ===============================================

use crate::core::graphics::{Color, ShapeTextures};
use crate::core::scene::{SceneError, SceneKey, SceneMap};
use crate::platform::{Backend, Platform};

//=== Game ================================================================

/// What an application provides: its scenes and where to start.
///
/// # Examples
///
/// ```no_run
/// use scaffold_engine::prelude::*;
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// enum Screen { Menu }
///
/// struct Menu;
///
/// impl Scene<Screen> for Menu {
///     fn reset(&mut self) {}
///     fn update(&mut self, _ctx: &mut SceneContext<'_, Screen>) {}
///     fn draw(&self, surface: &mut Surface<'_>, _time: &GameTime) {
///         shapes::stroked_circle(surface, Vec2::new(400.0, 300.0), 100.0, Color::WHITE);
///     }
/// }
///
/// struct Demo;
///
/// impl Game<Screen> for Demo {
///     fn register_scenes(&mut self, scenes: &mut SceneMap<Screen>, _textures: &ShapeTextures) {
///         scenes.register(Screen::Menu, Menu);
///     }
///
///     fn starting_scene(&self) -> Screen {
///         Screen::Menu
///     }
/// }
///
/// EngineBuilder::new()
///     .with_title("Demo")
///     .build()
///     .run(Demo, Canvas::new(800, 600))?;
/// # Ok::<(), EngineError>(())
/// ```
pub trait Game<S: SceneKey> {
    /// Registers every scene. Called once, after the shape textures exist.
    ///
    /// `scenes.transitions()` hands out senders for scenes that need to
    /// request transitions outside their own `update`.
    fn register_scenes(&mut self, scenes: &mut SceneMap<S>, textures: &ShapeTextures);

    /// Key of the scene shown first.
    fn starting_scene(&self) -> S;
}

//=== EngineError =========================================================

/// Fatal errors ending [`Engine::run`].
#[derive(Debug)]
pub enum EngineError {
    /// Failed to create event loop (rare, indicates OS-level issue).
    EventLoopCreation(winit::error::EventLoopError),

    /// Event loop execution error.
    EventLoopExecution(winit::error::EventLoopError),

    /// The OS refused to create the window.
    WindowCreation(winit::error::OsError),

    /// The scene manager was asked for an unregistered scene.
    Scene(SceneError),
}

//--- Trait Implementations -----------------------------------------------

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EventLoopCreation(e) => write!(f, "Event loop creation failed: {}", e),
            Self::EventLoopExecution(e) => write!(f, "Event loop error: {}", e),
            Self::WindowCreation(e) => write!(f, "Window creation failed: {}", e),
            Self::Scene(e) => write!(f, "Scene error: {}", e),
        }
    }
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::EventLoopCreation(e) | Self::EventLoopExecution(e) => Some(e),
            Self::WindowCreation(e) => Some(e),
            Self::Scene(e) => Some(e),
        }
    }
}

impl From<SceneError> for EngineError {
    fn from(error: SceneError) -> Self {
        Self::Scene(error)
    }
}

//=== EngineConfig ========================================================

/// Settings collected by [`EngineBuilder`].
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Window title.
    pub title: String,

    /// Initial inner size in logical pixels.
    pub width: u32,
    pub height: u32,

    /// Color each frame is cleared to before the active scene draws.
    pub clear_color: Color,

    /// Maximum pending transition requests; `None` is unbounded.
    pub transition_capacity: Option<usize>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            title: String::from("Scaffold Engine"),
            width: 800,
            height: 600,
            clear_color: Color::CORNFLOWER_BLUE,
            transition_capacity: None,
        }
    }
}

//=== EngineBuilder =======================================================

/// Builder for configuring and constructing an [`Engine`].
///
/// # Default Values
///
/// - **Title**: "Scaffold Engine"
/// - **Size**: 800x600
/// - **Clear color**: cornflower blue
/// - **Transition capacity**: unbounded
///
/// # Examples
///
/// ```
/// use scaffold_engine::prelude::*;
///
/// let engine = EngineBuilder::new()
///     .with_title("Shapes")
///     .with_size(1280, 720)
///     .with_clear_color(Color::BLACK)
///     .with_transition_capacity(8)
///     .build();
///
/// assert_eq!(engine.config().width, 1280);
/// ```
#[derive(Debug, Clone, Default)]
pub struct EngineBuilder {
    config: EngineConfig,
}

impl EngineBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the window title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.config.title = title.into();
        self
    }

    /// Sets the initial window size in logical pixels.
    ///
    /// Default: 800x600
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        assert!(
            width > 0 && height > 0,
            "Window size must be positive, got {}x{}",
            width,
            height
        );
        self.config.width = width;
        self.config.height = height;
        self
    }

    /// Sets the per-frame clear color.
    pub fn with_clear_color(mut self, color: Color) -> Self {
        self.config.clear_color = color;
        self
    }

    /// Bounds the transition queue. Requests beyond `capacity` pending ones
    /// are dropped with a warning.
    ///
    /// Default: unbounded
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_transition_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Transition capacity must be positive");
        self.config.transition_capacity = Some(capacity);
        self
    }

    /// Builds the engine instance.
    pub fn build(self) -> Engine {
        info!(
            "Building engine (\"{}\", {}x{}, transitions: {})",
            self.config.title,
            self.config.width,
            self.config.height,
            match self.config.transition_capacity {
                Some(capacity) => capacity.to_string(),
                None => String::from("unbounded"),
            }
        );

        Engine { config: self.config }
    }
}

//=== Engine ==============================================================

/// Scaffold Engine runtime.
///
/// Create via [`EngineBuilder`], then hand it a [`Game`] and a [`Backend`].
///
/// ```text
/// Engine::run (Main Thread)
///   └─► Platform (Event Loop)
///         ├─► Window
///         └─► FrameDriver: SceneManager update → draw
/// ```
#[derive(Debug, Clone)]
pub struct Engine {
    config: EngineConfig,
}

impl Engine {
    /// The settings this engine runs with.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Opens the window and runs `game` until the window closes.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError`] if the platform fails or the game's scene
    /// set is inconsistent (unknown starting scene or transition target).
    ///
    /// # Panics
    ///
    /// Panics if called off the main thread (macOS/iOS Winit requirement).
    pub fn run<S, G, B>(self, game: G, backend: B) -> Result<(), EngineError>
    where
        S: SceneKey,
        G: Game<S>,
        B: Backend,
    {
        info!("Starting engine runtime");

        let result = Platform::new(self.config, game, backend).run();

        match &result {
            Ok(()) => info!("Engine shutdown complete"),
            Err(e) => log::error!("Engine stopped: {}", e),
        }

        result
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    //=====================================================================
    // EngineBuilder Tests
    //=====================================================================

    #[test]
    fn builder_defaults() {
        let engine = EngineBuilder::new().build();
        let config = engine.config();

        assert_eq!(config.title, "Scaffold Engine");
        assert_eq!((config.width, config.height), (800, 600));
        assert_eq!(config.clear_color, Color::CORNFLOWER_BLUE);
        assert_eq!(config.transition_capacity, None);
    }

    #[test]
    fn builder_with_title() {
        let engine = EngineBuilder::new().with_title("Shapes").build();
        assert_eq!(engine.config().title, "Shapes");
    }

    #[test]
    fn builder_with_size() {
        let engine = EngineBuilder::new().with_size(1280, 720).build();
        assert_eq!((engine.config().width, engine.config().height), (1280, 720));
    }

    #[test]
    #[should_panic(expected = "Window size must be positive")]
    fn builder_with_size_panics_on_zero() {
        EngineBuilder::new().with_size(0, 600);
    }

    #[test]
    fn builder_with_clear_color() {
        let engine = EngineBuilder::new().with_clear_color(Color::BLACK).build();
        assert_eq!(engine.config().clear_color, Color::BLACK);
    }

    #[test]
    fn builder_with_transition_capacity() {
        let engine = EngineBuilder::new().with_transition_capacity(4).build();
        assert_eq!(engine.config().transition_capacity, Some(4));
    }

    #[test]
    #[should_panic(expected = "Transition capacity must be positive")]
    fn builder_with_transition_capacity_panics_on_zero() {
        EngineBuilder::new().with_transition_capacity(0);
    }

    #[test]
    fn builder_chaining() {
        let engine = EngineBuilder::new()
            .with_title("Chained")
            .with_size(320, 240)
            .with_transition_capacity(2)
            .build();

        assert_eq!(engine.config().title, "Chained");
        assert_eq!(engine.config().width, 320);
        assert_eq!(engine.config().transition_capacity, Some(2));
    }

    //=====================================================================
    // EngineError Tests
    //=====================================================================

    #[test]
    fn engine_error_is_error_trait() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn scene_error_converts_into_engine_error() {
        let error: EngineError = SceneError::UnknownScene {
            key: String::from("Play"),
        }
        .into();

        assert!(matches!(error, EngineError::Scene(_)));
        assert_eq!(
            error.to_string(),
            "Scene error: Can't find scene for Play, did you forget to register it?"
        );
        assert!(error.source().is_some());
    }
}
