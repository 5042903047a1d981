//! Browser bindings
//!
//! The page owns the tick loop, the canvas and the chart; it drives a
//! [`WebSimulation`] and pulls JSON draw lists and samples out of it.

use wasm_bindgen::prelude::*;

use crate::renderer::{self, CanvasTransform};
use crate::settings::Settings;
use crate::sim::{SimState, tick};

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }
    log::info!("Circular motion module loaded");
}

fn js_error(e: impl std::fmt::Display) -> JsValue {
    js_sys::Error::new(&e.to_string()).into()
}

/// One simulation run exposed to JavaScript
#[wasm_bindgen]
pub struct WebSimulation {
    state: SimState,
}

#[wasm_bindgen]
impl WebSimulation {
    /// Build a run from settings JSON; empty input loads the stored settings
    #[wasm_bindgen(constructor)]
    pub fn new(settings_json: &str) -> Result<WebSimulation, JsValue> {
        let mut settings = if settings_json.trim().is_empty() {
            Settings::load()
        } else {
            Settings::from_json(settings_json).map_err(js_error)?
        };
        settings.clamp_to_ui();
        settings.validate().map_err(js_error)?;
        settings.save();

        let state = SimState::new(settings).map_err(js_error)?;
        Ok(Self { state })
    }

    /// Advance one tick
    pub fn step(&mut self) -> Result<(), JsValue> {
        tick(&mut self.state).map_err(js_error)
    }

    /// Start over with the same settings
    pub fn reset(&mut self) -> Result<(), JsValue> {
        self.state = SimState::new(self.state.settings.clone()).map_err(js_error)?;
        log::info!("Simulation reset");
        Ok(())
    }

    pub fn time_ticks(&self) -> u64 {
        self.state.time_ticks
    }

    /// Draw list in world coordinates, keyed by layer
    pub fn render_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&renderer::render(&self.state)).map_err(js_error)
    }

    /// Draw list already mapped to canvas pixels
    pub fn render_canvas_json(&self, width: u32, height: u32) -> Result<String, JsValue> {
        let transform = CanvasTransform::new(&self.state.space, width, height);
        let list = transform.draw_list(&renderer::render(&self.state));
        serde_json::to_string(&list).map_err(js_error)
    }

    /// Every chart sample so far
    pub fn samples_json(&self) -> Result<String, JsValue> {
        self.state.recorder.to_json().map_err(js_error)
    }

    /// Chart lines that carry data
    pub fn series_json(&self) -> Result<String, JsValue> {
        let series: Vec<_> = self.state.recorder.series().collect();
        serde_json::to_string(&series).map_err(js_error)
    }

    pub fn info_text(&self) -> String {
        renderer::info_text(&self.state)
    }
}
