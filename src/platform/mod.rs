//=========================================================================
// Platform Subsystem
//
// Hosts the game inside a winit window and drives one frame per redraw.
//
// Architecture:
// ```text
//  Main Thread:
//  ┌──────────────────────────────────────────┐
//  │  Winit Event Loop                        │
//  │   ↓                                      │
//  │  resumed()                               │
//  │   ├─ create window (lazily)              │
//  │   ├─ backend.attach(window)              │
//  │   └─ FrameDriver::start(game, backend)   │
//  │   ↓                                      │
//  │  RedrawRequested                         │
//  │   ├─ FrameDriver::frame(backend)         │
//  │   │    ├─ SceneManager::update           │
//  │   │    └─ backend.render → draw          │
//  │   └─ request_redraw()                    │
//  │   ↓                                      │
//  │  CloseRequested / scene error → exit     │
//  └──────────────────────────────────────────┘
// ```
//
// Key Design Decisions:
// - **RedrawRequested = frame boundary**: update then draw, once per redraw
// - **Lazy startup**: textures and scenes are built in `resumed()`, after
//   the backend has a window to render into
// - **First error wins**: a fatal error is stored, the loop exits, and
//   `run()` returns it
// - **Main thread requirement**: Winit mandates main thread on macOS/iOS,
//   so this runs on the thread that called `Engine::run()`
//
//=========================================================================

//=== Submodules ==========================================================

mod frame;

pub use frame::FrameDriver;

//=== External Crates =====================================================

use std::sync::Arc;

use log::*;
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowAttributes, WindowId},
};

//=== Internal Imports ====================================================

use crate::core::graphics::{Canvas, Color, GraphicsDevice, SpriteBatch};
use crate::core::scene::SceneKey;
use crate::engine::{EngineConfig, EngineError, Game};

//=== Backend =============================================================

/// The application's rendering layer.
///
/// The engine never talks to a GPU directly: textures are created through
/// the [`GraphicsDevice`] half, and every frame is drawn through the
/// [`SpriteBatch`] handed out by [`Backend::render`].
///
/// [`Canvas`](crate::core::graphics::Canvas) is a ready-made headless
/// backend.
pub trait Backend: GraphicsDevice {
    /// Called once the window exists, before any texture is created.
    fn attach(&mut self, _window: &Arc<Window>) {}

    /// Called when the window's inner size changes.
    fn resize(&mut self, _width: u32, _height: u32) {}

    /// Clears the target to `clear`, runs `frame` with a batch, presents.
    fn render(&mut self, clear: Color, frame: &mut dyn FnMut(&mut dyn SpriteBatch));
}

impl Backend for Canvas {
    fn render(&mut self, clear: Color, frame: &mut dyn FnMut(&mut dyn SpriteBatch)) {
        self.clear(clear);
        frame(self);
    }
}

//=== Platform ============================================================

/// Window owner and frame pump.
///
/// # Lifecycle
///
/// 1. **Construction**: `Platform::new(config, game, backend)`
/// 2. **Execution**: `platform.run()` blocks in the winit event loop
/// 3. **Startup**: first `resumed()` creates the window and the driver
/// 4. **Frames**: every `RedrawRequested` runs one update/draw pass
/// 5. **Shutdown**: close request or fatal error exits the loop
///
/// # Thread Safety
///
/// Not Send/Sync in general; it must remain on the main thread.
pub(crate) struct Platform<S: SceneKey, G: Game<S>, B: Backend> {
    config: EngineConfig,
    game: G,
    backend: B,

    /// OS window handle (None until `resumed()` called).
    window: Option<Arc<Window>>,

    /// Scene state (None until `resumed()` called).
    driver: Option<FrameDriver<S>>,

    /// First fatal error, returned from `run()`.
    error: Option<EngineError>,
}

impl<S: SceneKey, G: Game<S>, B: Backend> Platform<S, G, B> {
    //--- Construction -----------------------------------------------------

    /// Creates the platform. No window or scene exists yet.
    pub fn new(config: EngineConfig, game: G, backend: B) -> Self {
        info!(target: "platform", "Platform subsystem initialized");
        Self {
            config,
            game,
            backend,
            window: None,
            driver: None,
            error: None,
        }
    }

    //--- Execution --------------------------------------------------------

    /// Runs the event loop until the window closes or a frame fails.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError`] if the event loop cannot be created or fails,
    /// if the window cannot be created, or if the scene manager reports an
    /// unknown scene.
    ///
    /// # Panics
    ///
    /// Panics if called off the main thread (macOS/iOS Winit requirement).
    pub fn run(mut self) -> Result<(), EngineError> {
        debug!(target: "platform", "Starting Winit event loop");

        let event_loop = EventLoop::new().map_err(EngineError::EventLoopCreation)?;
        event_loop
            .run_app(&mut self)
            .map_err(EngineError::EventLoopExecution)?;

        info!(target: "platform", "Event loop exited");

        match self.error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    //--- Internal Helpers -------------------------------------------------

    /// Keeps the first fatal error and stops the loop.
    fn fail(&mut self, event_loop: &ActiveEventLoop, error: EngineError) {
        error!(target: "platform", "{}", error);
        if self.error.is_none() {
            self.error = Some(error);
        }
        event_loop.exit();
    }

    /// Starts the frame driver against the attached backend.
    fn start_driver(&mut self) -> Result<(), EngineError> {
        let driver = FrameDriver::start(
            &mut self.game,
            &mut self.backend,
            self.config.clear_color,
            self.config.transition_capacity,
        )?;
        self.driver = Some(driver);
        Ok(())
    }

    /// Runs one frame if the driver is up.
    fn redraw(&mut self) -> Result<(), EngineError> {
        if let Some(driver) = self.driver.as_mut() {
            driver.frame(&mut self.backend)?;
        }
        Ok(())
    }

    //--- Test Accessors ---------------------------------------------------

    #[cfg(test)]
    pub(crate) fn window(&self) -> Option<&Arc<Window>> {
        self.window.as_ref()
    }
}

//=== Winit Integration ===================================================

impl<S: SceneKey, G: Game<S>, B: Backend> ApplicationHandler for Platform<S, G, B> {
    /// Called when app becomes active (startup or mobile resume).
    ///
    /// Creates the window and starts the game the first time only.
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            debug!(target: "platform", "Window already exists (mobile resume?)");
            return;
        }

        let attrs = WindowAttributes::default()
            .with_title(self.config.title.as_str())
            .with_inner_size(LogicalSize::new(self.config.width, self.config.height));

        let window = match event_loop.create_window(attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                self.fail(event_loop, EngineError::WindowCreation(e));
                return;
            }
        };

        info!(
            target: "platform",
            "Window created: {}x{} @ {}x DPI",
            window.inner_size().width,
            window.inner_size().height,
            window.scale_factor()
        );

        self.backend.attach(&window);
        self.window = Some(Arc::clone(&window));

        if let Err(e) = self.start_driver() {
            self.fail(event_loop, e);
            return;
        }

        window.request_redraw();
    }

    /// Handles per-window events.
    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                info!(target: "platform", "Window close requested");
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                debug!(target: "platform", "Window resized to {}x{}", size.width, size.height);
                self.backend.resize(size.width, size.height);
            }

            WindowEvent::RedrawRequested => {
                if let Err(e) = self.redraw() {
                    self.fail(event_loop, e);
                    return;
                }

                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            _ => {}
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::graphics::{Bitmap, ShapeTextures, Sprite, Texture};
    use crate::core::scene::SceneMap;

    //--- Test Doubles -----------------------------------------------------

    struct Empty;

    impl Game<u8> for Empty {
        fn register_scenes(&mut self, _scenes: &mut SceneMap<u8>, _textures: &ShapeTextures) {}

        fn starting_scene(&self) -> u8 {
            0
        }
    }

    //=====================================================================
    // Backend Tests
    //=====================================================================

    #[test]
    fn canvas_is_a_backend() {
        fn assert_backend<T: Backend>() {}
        assert_backend::<Canvas>();
    }

    #[test]
    fn canvas_backend_clears_then_draws() {
        let mut canvas = Canvas::new(4, 4);
        let texture: Texture = canvas.create_texture(&Bitmap::pixel());
        let mut calls = 0;

        canvas.render(Color::BLUE, &mut |batch: &mut dyn SpriteBatch| {
            calls += 1;
            batch.draw(&texture, &Sprite::at(glam::Vec2::ZERO));
        });

        assert_eq!(calls, 1);
        assert_eq!(canvas.pixel(0, 0), Some(Color::WHITE));
        assert_eq!(canvas.pixel(3, 3), Some(Color::BLUE));
    }

    //=====================================================================
    // Platform Tests
    //=====================================================================

    #[test]
    fn platform_creation() {
        let platform = Platform::new(EngineConfig::default(), Empty, Canvas::new(8, 8));
        assert!(platform.window().is_none(), "Window should be created lazily");
        assert!(platform.driver.is_none(), "Scenes should be created lazily");
    }

    #[test]
    fn start_driver_reports_unknown_starting_scene() {
        let mut platform = Platform::new(EngineConfig::default(), Empty, Canvas::new(8, 8));

        let result = platform.start_driver();

        assert!(matches!(result, Err(EngineError::Scene(_))));
        assert!(platform.driver.is_none());
    }

    #[test]
    fn redraw_without_driver_is_noop() {
        let mut platform = Platform::new(EngineConfig::default(), Empty, Canvas::new(8, 8));
        assert!(platform.redraw().is_ok());
    }
}
