//! gridbot
//!
//! The logic core of a small 3D browser game: a robot walks a grid through
//! animated moves while level props are loaded, shadowed and highlighted.
//! The crate keeps its own minimal scene model so everything here runs
//! natively, in tests, or inside the browser through WASM.
//!
//! High-level modules
//! - `config`: game constants and JSON overrides
//! - `data_structures`: meshes, transforms, scene graph and registries
//! - `entities`: the robot (`Person`) and static props (`Kettle`)
//! - `error`: typed errors for loading, moving and driving
//! - `flow`: command programs and the loops that drive them
//! - `level`: composes a playable level from the config
//! - `resources`: mesh loading (glTF/GLB) and animation tracks
//!

pub mod config;
pub mod data_structures;
pub mod entities;
pub mod error;
pub mod flow;
pub mod level;
pub mod resources;
#[cfg(target_arch = "wasm32")]
pub mod web;

// Re-exports commonly used types for convenience in downstream code.
pub use cgmath::*;
