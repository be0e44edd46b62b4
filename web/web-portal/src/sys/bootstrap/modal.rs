use wasm_bindgen::prelude::*;
use web_sys::Element;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_name = "bootstrap.Modal")]
    #[derive(Clone, Debug)]
    pub type Modal;

    /// Reuses the instance bootstrap already attached to `element`.
    #[wasm_bindgen(static_method_of = Modal, js_class = "bootstrap.Modal", js_name = getOrCreateInstance)]
    pub fn get_or_create_instance(element: &Element) -> Modal;

    #[wasm_bindgen(method)]
    pub fn show(this: &Modal);
}
