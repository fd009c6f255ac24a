//=========================================================================
// Scene System
//=========================================================================
//
// Single-active-scene lifecycle with debounced transitions.
//
// Architecture:
//   SceneMap ──initialize(start)──> SceneManager
//                                     ├─ scenes: HashMap<S, Box<dyn Scene>>
//                                     ├─ active: S
//                                     ├─ last_transition: Duration
//                                     └─ queue: TransitionQueue<S>
//
// Flow (once per frame):
//   update(time) → [debounce] → Scene::update(ctx)
//                → apply queued transitions → apply scene requests
//   draw(surface, time) → Scene::draw()
//
//=========================================================================

//=== Module Declarations =================================================

mod scene_manager;
mod transition_queue;

//=== Public API ==========================================================

pub use scene_manager::{SceneError, SceneKey, SceneManager, SceneMap, DEBOUNCE_WINDOW};
pub use transition_queue::{TransitionQueue, TransitionSender};

//=== Internal Dependencies ===============================================

use crate::core::graphics::Surface;
use crate::core::time::GameTime;

//=== Scene Trait =========================================================

/// A self-contained screen with a reset/update/draw lifecycle.
///
/// Scenes are registered once in a [`SceneMap`] and live as long as the
/// [`SceneManager`] that owns them. Exactly one scene is active at a time.
///
/// ```rust
/// # use scaffold_engine::prelude::*;
/// struct Title {
///     blink: bool,
/// }
///
/// impl Scene<&'static str> for Title {
///     fn reset(&mut self) {
///         self.blink = false;
///     }
///
///     fn update(&mut self, ctx: &mut SceneContext<'_, &'static str>) {
///         self.blink = !self.blink;
///         if ctx.time().total_ms() > 5_000.0 {
///             ctx.transition_to("play");
///         }
///     }
///
///     fn draw(&self, surface: &mut Surface<'_>, _time: &GameTime) {
///         if self.blink {
///             shapes::filled_circle(surface, Vec2::new(64.0, 64.0), 8.0, Color::WHITE);
///         }
///     }
/// }
/// ```
pub trait Scene<S: SceneKey> {
    /// Returns the scene to its initial state.
    ///
    /// Called when the manager starts on this scene and on every transition
    /// into it, including transitions from the scene to itself. Must be safe
    /// to call repeatedly.
    fn reset(&mut self);

    /// Advances the scene by one frame.
    ///
    /// Skipped by the manager while inside the debounce window after a
    /// transition.
    fn update(&mut self, ctx: &mut SceneContext<'_, S>);

    /// Issues draw calls for the current state. Never debounced.
    fn draw(&self, surface: &mut Surface<'_>, time: &GameTime);
}

//=== SceneContext ========================================================

/// Per-update view handed to the active scene.
pub struct SceneContext<'a, S: SceneKey> {
    time: &'a GameTime,
    transitions: &'a TransitionSender<S>,
    requested: Vec<S>,
}

impl<'a, S: SceneKey> SceneContext<'a, S> {
    pub fn new(time: &'a GameTime, transitions: &'a TransitionSender<S>) -> Self {
        Self {
            time,
            transitions,
            requested: Vec::new(),
        }
    }

    /// The current frame's time.
    pub fn time(&self) -> &GameTime {
        self.time
    }

    /// Requests a transition, applied by the manager right after this update.
    ///
    /// Scene requests bypass the transition queue, so a bounded queue never
    /// drops them. They are applied after the requests already waiting in
    /// the queue, in the order made; the last one decides the active scene.
    pub fn transition_to(&mut self, key: S) {
        self.requested.push(key);
    }

    /// Transitions requested so far during this update.
    pub fn requested(&self) -> &[S] {
        &self.requested
    }

    /// Sender for requesting transitions from elsewhere (e.g. other threads).
    pub fn transitions(&self) -> &TransitionSender<S> {
        self.transitions
    }

    pub(crate) fn into_requests(self) -> Vec<S> {
        self.requested
    }
}
