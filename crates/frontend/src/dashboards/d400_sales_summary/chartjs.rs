use super::chart::{ChartConfig, ChartError, ChartSlot, ChartSurface};
use js_sys::{Array, Function, Reflect};
use serde::Serialize;
use serde_wasm_bindgen::Serializer;
use wasm_bindgen::{JsCast, JsValue};

fn js_err(e: JsValue) -> ChartError {
    ChartError::Library(format!("{:?}", e))
}

/// Chart.js (`window.Chart`) drawing into the slot canvases of the page
#[derive(Debug, Default)]
pub struct ChartJsSurface;

impl ChartSurface for ChartJsSurface {
    type Handle = JsValue;

    fn create(&mut self, slot: ChartSlot, config: &ChartConfig) -> Result<JsValue, ChartError> {
        let window =
            web_sys::window().ok_or_else(|| ChartError::Library("window not available".into()))?;
        let canvas = window
            .document()
            .and_then(|d| d.get_element_by_id(slot.canvas_id()))
            .ok_or(ChartError::SurfaceMissing(slot))?;

        let ctor = Reflect::get(&window, &JsValue::from_str("Chart")).map_err(js_err)?;
        if !ctor.is_function() {
            return Err(ChartError::Library("window.Chart is not loaded".into()));
        }
        let ctor: Function = ctor.dyn_into().map_err(js_err)?;

        let config_value = config
            .serialize(&Serializer::json_compatible())
            .map_err(|e| ChartError::Library(e.to_string()))?;

        let args = Array::of2(&canvas.into(), &config_value);
        Reflect::construct(&ctor, &args).map_err(js_err)
    }

    fn destroy(&mut self, handle: JsValue) {
        let destroy = Reflect::get(&handle, &JsValue::from_str("destroy"))
            .ok()
            .and_then(|f| f.dyn_into::<Function>().ok());
        match destroy {
            Some(f) => {
                if let Err(e) = f.call0(&handle) {
                    log::warn!("Chart destroy failed: {:?}", e);
                }
            }
            None => log::warn!("Chart handle has no destroy()"),
        }
    }
}
