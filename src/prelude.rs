//=========================================================================
// Prelude
//
// `use scaffold_engine::prelude::*;` brings in what a game needs to define
// scenes, draw shapes and start the engine.
//
//=========================================================================

//=== Engine ==============================================================

pub use crate::engine::{Engine, EngineBuilder, EngineConfig, EngineError, Game};
pub use crate::platform::{Backend, FrameDriver};

//=== Scenes ==============================================================

pub use crate::core::scene::{
    Scene, SceneContext, SceneError, SceneKey, SceneManager, SceneMap, TransitionQueue,
    TransitionSender, DEBOUNCE_WINDOW,
};

//=== Time ================================================================

pub use crate::core::time::{GameClock, GameTime};

//=== Graphics ============================================================

pub use crate::core::graphics::{
    geometry, shapes, Bitmap, Canvas, Color, Flip, GraphicsDevice, Rect, ShapeTextures, Sprite,
    SpriteBatch, Surface, Texture, TextureId,
};

//=== Math ================================================================

pub use glam::Vec2;
