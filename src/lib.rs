//=========================================================================
// Scaffold Engine - Library Root
//
// A minimal game-loop scaffold: one active scene at a time with debounced
// transitions, and procedural 2D shapes drawn from two generated textures.
//
// Responsibilities:
// - Expose the engine facade (`EngineBuilder`, `Engine`, `Game`)
// - Expose the scene system and shape renderer under `core`
// - Expose the `Backend` seam the application's renderer plugs into
//
// Typical usage:
// ```no_run
// use scaffold_engine::prelude::*;
//
// EngineBuilder::new().build().run(MyGame, MyRenderer)?;
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` holds the frame clock, graphics primitives, shape renderer and
// scene system. It does not depend on winit and can be driven headless.
//
pub mod core;
pub mod prelude;

//--- Host Modules --------------------------------------------------------
//
// `platform` owns the winit integration; only the `Backend` trait and the
// window-independent `FrameDriver` are public.
//
// `engine` defines the entry point and configuration.
//
mod engine;
mod platform;

//--- Public Exports ------------------------------------------------------

pub use engine::{Engine, EngineBuilder, EngineConfig, EngineError, Game};
pub use platform::{Backend, FrameDriver};
