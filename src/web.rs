//! Browser bindings.
//!
//! The page loads a level once, then calls `tick` from its
//! `requestAnimationFrame` loop. Moves return promises that settle when the
//! robot came to rest.

use std::rc::Rc;

use instant::Duration;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;

use crate::{
    config::GameConfig, entities::person::Direction, error::MoveError, level::Level,
    resources::GltfLoader,
};

#[wasm_bindgen(start)]
pub fn init_logging() {
    console_log::init_with_level(log::Level::Info).unwrap_throw();
}

#[wasm_bindgen]
pub struct WebLevel {
    level: Rc<Level>,
}

/// Loads the level with the default configuration, or with the JSON
/// configuration passed in `config_json`.
#[wasm_bindgen]
pub async fn load_level(config_json: Option<String>) -> Result<WebLevel, JsValue> {
    let config = match config_json {
        Some(json) => GameConfig::from_json(&json).map_err(to_js)?,
        None => GameConfig::default(),
    };
    let level = Level::load(&GltfLoader, config).await.map_err(to_js)?;
    Ok(WebLevel {
        level: Rc::new(level),
    })
}

#[wasm_bindgen]
impl WebLevel {
    /// Advances animations by `dt_millis` of wall clock time.
    pub fn tick(&self, dt_millis: f64) {
        let dt = Duration::from_secs_f64((dt_millis / 1000.0).max(0.0));
        self.level.advance(dt);
    }

    pub fn move_forward(&self, count: u32) -> js_sys::Promise {
        self.spawn_move(Direction::Forward, count)
    }

    pub fn move_back(&self, count: u32) -> js_sys::Promise {
        self.spawn_move(Direction::Back, count)
    }

    pub fn move_left(&self, count: u32) -> js_sys::Promise {
        self.spawn_move(Direction::Left, count)
    }

    pub fn move_right(&self, count: u32) -> js_sys::Promise {
        self.spawn_move(Direction::Right, count)
    }

    pub fn reset_position(&self) -> Result<(), JsValue> {
        self.level.person.reset_position().map_err(to_js)
    }

    pub fn is_moving(&self) -> bool {
        self.level.person.state() == crate::entities::person::MotionState::Moving
    }

    /// Robot position as `[x, y, z]`.
    pub fn position(&self) -> Option<Vec<f32>> {
        self.level
            .person
            .position()
            .map(|p| vec![p.x, p.y, p.z])
    }

    fn spawn_move(&self, direction: Direction, count: u32) -> js_sys::Promise {
        let level = self.level.clone();
        future_to_promise(async move {
            level
                .person
                .move_with_animation(direction, count)
                .await
                .map(|_| JsValue::UNDEFINED)
                .map_err(|e: MoveError| to_js(e))
        })
    }
}

fn to_js(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}
