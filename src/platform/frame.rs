//=========================================================================
// Frame Driver
//
// Window-independent half of the host loop: builds the shared shape
// textures and the scene manager once the graphics backend exists, then
// runs update → draw for every frame.
//
// Lifecycle:
// ```text
//   start(game, backend)
//     ├─ ShapeTextures::create(backend)
//     ├─ game.register_scenes(map, textures)
//     └─ SceneManager::initialize(map, game.starting_scene())
//
//   frame(backend)
//     ├─ clock.tick()
//     ├─ manager.update(time)
//     └─ backend.render(clear, |batch| manager.draw(surface, time))
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{info, trace};

//=== Internal Dependencies ===============================================

use super::Backend;
use crate::core::graphics::{Color, ShapeTextures, SpriteBatch, Surface};
use crate::core::scene::{SceneError, SceneKey, SceneManager, SceneMap, TransitionQueue};
use crate::core::time::{GameClock, GameTime};
use crate::engine::Game;

//=== FrameDriver =========================================================

/// Owns everything a running game needs between frames.
pub struct FrameDriver<S: SceneKey> {
    clock: GameClock,
    textures: ShapeTextures,
    manager: SceneManager<S>,
    clear_color: Color,
}

impl<S: SceneKey> FrameDriver<S> {
    //--- Construction -----------------------------------------------------

    /// Creates the shape textures and scenes and activates the first scene.
    ///
    /// `transition_capacity` bounds the transition queue; `None` leaves it
    /// unbounded. The frame clock starts here.
    ///
    /// # Errors
    ///
    /// [`SceneError::UnknownScene`] if the game's starting scene was not
    /// registered.
    pub fn start<G, B>(
        game: &mut G,
        backend: &mut B,
        clear_color: Color,
        transition_capacity: Option<usize>,
    ) -> Result<Self, SceneError>
    where
        G: Game<S>,
        B: Backend,
    {
        let textures = ShapeTextures::create(backend);

        let queue = match transition_capacity {
            Some(capacity) => TransitionQueue::bounded(capacity),
            None => TransitionQueue::new(),
        };
        let mut scenes = SceneMap::with_queue(queue);
        game.register_scenes(&mut scenes, &textures);

        let manager = SceneManager::initialize(scenes, game.starting_scene())?;
        info!(target: "platform", "Frame driver started on scene {:?}", manager.active());

        Ok(Self {
            clock: GameClock::start(),
            textures,
            manager,
            clear_color,
        })
    }

    //--- Frame Loop -------------------------------------------------------

    /// Runs one frame at the current clock time.
    pub fn frame<B: Backend>(&mut self, backend: &mut B) -> Result<GameTime, SceneError> {
        let time = self.clock.tick();
        self.step(backend, time)?;
        Ok(time)
    }

    /// Runs one frame at an explicit time: update, then draw.
    pub fn step<B: Backend>(&mut self, backend: &mut B, time: GameTime) -> Result<(), SceneError> {
        trace!(
            target: "platform",
            "Frame at {:.1}ms (+{:.1}ms)",
            time.total_ms(),
            time.elapsed_ms()
        );

        self.manager.update(&time)?;

        let textures = &self.textures;
        let manager = &self.manager;
        backend.render(self.clear_color, &mut |batch: &mut dyn SpriteBatch| {
            let mut surface = Surface::new(batch, textures);
            manager.draw(&mut surface, &time);
        });

        Ok(())
    }

    //--- Accessors --------------------------------------------------------

    pub fn manager(&self) -> &SceneManager<S> {
        &self.manager
    }

    pub fn manager_mut(&mut self) -> &mut SceneManager<S> {
        &mut self.manager
    }

    pub fn textures(&self) -> &ShapeTextures {
        &self.textures
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
