//=========================================================================
// Core Systems
//
// Everything the engine does between two frames, independent of any
// window or GPU:
//
// - `time`: frame clock and the `GameTime` snapshot
// - `graphics`: sprite primitives, generated textures, shape renderer,
//   headless canvas
// - `scene`: scene trait, registry and debounced transitions
//
//=========================================================================

//=== Module Declarations =================================================

pub mod graphics;
pub mod scene;
pub mod time;

//=== Public API ==========================================================

pub use graphics::{Color, Rect, ShapeTextures, Sprite, SpriteBatch, Surface};
pub use scene::{Scene, SceneContext, SceneError, SceneKey, SceneManager, SceneMap};
pub use time::{GameClock, GameTime};
