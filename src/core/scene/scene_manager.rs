//=========================================================================
// Scene Manager
//=========================================================================
//
// Owns the registered scenes and the single active one.
//
// Scenes are stored in a HashMap by key and collected in a `SceneMap`
// before the manager exists. `SceneManager::initialize` consumes the map,
// so the set of scenes is fixed for the manager's lifetime.
//
// Transitions reset the target scene and start a debounce window during
// which `update()` is not forwarded, so the input that caused a
// transition is not consumed again by the scene it led to.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;
use std::fmt::{self, Debug};
use std::hash::Hash;
use std::time::Duration;

use log::{debug, info, trace, warn};

//=== Internal Dependencies ===============================================

use super::{Scene, SceneContext, TransitionQueue, TransitionSender};
use crate::core::graphics::Surface;
use crate::core::time::GameTime;

//=== Constants ===========================================================

/// Time after a transition during which scene updates are skipped.
///
/// An update is forwarded only once strictly more than this has passed.
pub const DEBOUNCE_WINDOW: Duration = Duration::from_millis(500);

//=== Scene Key Trait =====================================================

/// Identifier of a registered scene.
///
/// Implemented for every type that can key a `HashMap` and cross threads,
/// so `&'static str`, `String` and game-specific enums all work.
pub trait SceneKey: Clone + Eq + Hash + Debug + Send + 'static {}

impl<T: Clone + Eq + Hash + Debug + Send + 'static> SceneKey for T {}

//=== SceneError ==========================================================

/// Scene configuration errors.
///
/// These point at a programming or content mistake (a misspelled key, a
/// scene never registered) rather than a condition worth retrying.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    /// The requested key is not registered.
    UnknownScene { key: String },
}

impl SceneError {
    fn unknown<S: SceneKey>(key: &S) -> Self {
        Self::UnknownScene {
            key: format!("{:?}", key),
        }
    }
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownScene { key } => {
                write!(f, "Can't find scene for {}, did you forget to register it?", key)
            }
        }
    }
}

impl std::error::Error for SceneError {}

//=== Scene Map ===========================================================

/// Scenes collected before the manager starts.
///
/// # Example
///
/// ```rust
/// # use scaffold_engine::prelude::*;
/// # struct Menu;
/// # impl Scene<&'static str> for Menu {
/// #     fn reset(&mut self) {}
/// #     fn update(&mut self, _ctx: &mut SceneContext<'_, &'static str>) {}
/// #     fn draw(&self, _surface: &mut Surface<'_>, _time: &GameTime) {}
/// # }
/// let mut scenes = SceneMap::new();
/// scenes.register("menu", Menu);
///
/// let manager = SceneManager::initialize(scenes, "menu").unwrap();
/// assert_eq!(manager.active(), &"menu");
/// ```
pub struct SceneMap<S: SceneKey> {
    scenes: HashMap<S, Box<dyn Scene<S>>>,
    queue: TransitionQueue<S>,
}

impl<S: SceneKey> SceneMap<S> {
    /// Creates an empty map with an unbounded transition queue.
    pub fn new() -> Self {
        Self::with_queue(TransitionQueue::new())
    }

    /// Creates an empty map whose manager will use `queue`.
    pub fn with_queue(queue: TransitionQueue<S>) -> Self {
        Self {
            scenes: HashMap::new(),
            queue,
        }
    }

    /// Registers a scene under `key`.
    ///
    /// Registering a key twice replaces the earlier scene.
    pub fn register<T>(&mut self, key: S, scene: T) -> &mut Self
    where
        T: Scene<S> + 'static,
    {
        self.register_boxed(key, Box::new(scene))
    }

    /// Registers an already boxed scene under `key`.
    pub fn register_boxed(&mut self, key: S, scene: Box<dyn Scene<S>>) -> &mut Self {
        debug!(target: "scene", "Registering scene {:?}", key);
        if let Some(_replaced) = self.scenes.insert(key.clone(), scene) {
            warn!(target: "scene", "Scene {:?} was already registered and has been replaced", key);
        }
        self
    }

    /// Sender for the queue the manager will drain.
    ///
    /// Lets scenes hold a handle before the manager exists.
    pub fn transitions(&self) -> TransitionSender<S> {
        self.queue.sender()
    }

    pub fn contains(&self, key: &S) -> bool {
        self.scenes.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }
}

impl<S: SceneKey> Default for SceneMap<S> {
    fn default() -> Self {
        Self::new()
    }
}

//=== Scene Manager =======================================================

/// Single-active-scene state machine with an update debounce.
///
/// Exists only in the active state: construction through
/// [`SceneManager::initialize`] already selects and resets the first scene.
pub struct SceneManager<S: SceneKey> {
    scenes: HashMap<S, Box<dyn Scene<S>>>,
    active: S,
    last_transition: Duration,
    queue: TransitionQueue<S>,
    sender: TransitionSender<S>,
}

impl<S: SceneKey> SceneManager<S> {
    //--- Construction -----------------------------------------------------

    /// Takes ownership of the scenes and activates `start`.
    ///
    /// The starting scene is reset once. The last transition time starts at
    /// zero, so the first frames after startup may fall inside the debounce
    /// window; that only delays the first update.
    ///
    /// # Errors
    ///
    /// [`SceneError::UnknownScene`] if `start` is not registered.
    pub fn initialize(map: SceneMap<S>, start: S) -> Result<Self, SceneError> {
        let SceneMap { mut scenes, queue } = map;

        match scenes.get_mut(&start) {
            Some(scene) => scene.reset(),
            None => return Err(SceneError::unknown(&start)),
        }

        info!(target: "scene", "Starting scene manager with {} scenes, initial scene {:?}", scenes.len(), start);

        let sender = queue.sender();
        Ok(Self {
            scenes,
            active: start,
            last_transition: Duration::ZERO,
            queue,
            sender,
        })
    }

    //--- Transitions ------------------------------------------------------

    /// Switches to `target` and resets it.
    ///
    /// Always resets, even when `target` is already active. Records
    /// `time.total()` as the start of the debounce window.
    ///
    /// # Errors
    ///
    /// [`SceneError::UnknownScene`] if `target` is not registered; the active
    /// scene is left untouched.
    pub fn transition(&mut self, time: &GameTime, target: S) -> Result<(), SceneError> {
        let Some(scene) = self.scenes.get_mut(&target) else {
            return Err(SceneError::unknown(&target));
        };

        debug!(
            target: "scene",
            "Transition {:?} -> {:?} at {:.1}ms",
            self.active,
            target,
            time.total_ms()
        );

        scene.reset();
        self.active = target;
        self.last_transition = time.total();
        Ok(())
    }

    /// Applies queued transition requests in FIFO order.
    fn apply_queued(&mut self, time: &GameTime) -> Result<(), SceneError> {
        while let Some(target) = self.queue.pop() {
            self.transition(time, target)?;
        }
        Ok(())
    }

    //--- Frame Loop -------------------------------------------------------

    /// Forwards the frame to the active scene unless inside the debounce
    /// window, then applies transitions requested during the frame: first
    /// the transition queue, then the scene's own requests.
    ///
    /// # Errors
    ///
    /// [`SceneError::UnknownScene`] if a request names an unregistered
    /// scene. Queued requests after the failing one stay queued; the scene's
    /// requests from this update are discarded.
    pub fn update(&mut self, time: &GameTime) -> Result<(), SceneError> {
        let requested = if self.is_debounced(time) {
            trace!(
                target: "scene",
                "Update of {:?} debounced ({:?} since transition)",
                self.active,
                time.since(self.last_transition)
            );
            Vec::new()
        } else if let Some(scene) = self.scenes.get_mut(&self.active) {
            let mut ctx = SceneContext::new(time, &self.sender);
            scene.update(&mut ctx);
            ctx.into_requests()
        } else {
            Vec::new()
        };

        self.apply_queued(time)?;
        for target in requested {
            self.transition(time, target)?;
        }
        Ok(())
    }

    /// Draws the active scene. Never debounced.
    pub fn draw(&self, surface: &mut Surface<'_>, time: &GameTime) {
        if let Some(scene) = self.scenes.get(&self.active) {
            scene.draw(surface, time);
        }
    }

    //--- Queries ----------------------------------------------------------

    /// Key of the active scene.
    pub fn active(&self) -> &S {
        &self.active
    }

    /// Total time of the last transition (zero before the first one).
    pub fn last_transition(&self) -> Duration {
        self.last_transition
    }

    /// True while `time` is within [`DEBOUNCE_WINDOW`] of the last transition.
    pub fn is_debounced(&self, time: &GameTime) -> bool {
        time.since(self.last_transition) <= DEBOUNCE_WINDOW
    }

    /// Sender for requesting transitions from outside the active scene.
    pub fn transitions(&self) -> TransitionSender<S> {
        self.sender.clone()
    }

    /// Number of requests waiting for the next update.
    pub fn pending_transitions(&self) -> usize {
        self.queue.len()
    }

    pub fn contains(&self, key: &S) -> bool {
        self.scenes.contains_key(key)
    }

    pub fn scene_count(&self) -> usize {
        self.scenes.len()
    }
}

//=== Tests ===============================================================
