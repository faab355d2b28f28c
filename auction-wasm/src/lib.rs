mod api;
mod app;
mod components;
mod storage;

use app::App;
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    // Устанавливаем обработчик паники
    console_error_panic_hook::set_once();

    // Логи ядра (tracing -> log) идут в консоль браузера
    #[cfg(debug_assertions)]
    console_log::init_with_level(log::Level::Debug).unwrap_or_else(|e| {
        web_sys::console::log_1(&format!("Failed to init logger: {}", e).into());
    });

    #[cfg(not(debug_assertions))]
    console_log::init_with_level(log::Level::Warn).unwrap_or_else(|e| {
        web_sys::console::log_1(&format!("Failed to init logger: {}", e).into());
    });

    yew::Renderer::<App>::new().render();

    Ok(())
}
