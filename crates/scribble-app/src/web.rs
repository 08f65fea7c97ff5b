//! WebAssembly entry point and platform-specific code.

use scribble_core::Route;
use wasm_bindgen::prelude::*;

/// Read the route from the URL.
///
/// The hash (`#/draw/<id>`) takes precedence so the app works from a static
/// file server; otherwise the path is used.
pub fn get_route_from_url() -> Route {
    let Some(window) = web_sys::window() else {
        return Route::default();
    };
    let location = window.location();

    if let Ok(hash) = location.hash() {
        if hash.len() > 1 {
            return Route::parse(&hash);
        }
    }

    location
        .pathname()
        .map(|path| Route::parse(&path))
        .unwrap_or_default()
}

/// Reflect the current route in the URL hash.
pub fn set_route_in_url(route: &Route) {
    let Some(window) = web_sys::window() else {
        return;
    };
    if let Err(e) = window.location().set_hash(&route.to_path()) {
        log::warn!("Failed to update URL: {:?}", e);
    }
}

/// Initialize and run the WASM application.
#[wasm_bindgen(start)]
pub async fn run_wasm() {
    // Set up panic hook for better error messages
    console_error_panic_hook::set_once();

    if let Err(e) = console_log::init_with_level(log::Level::Info) {
        web_sys::console::error_1(&format!("Failed to initialize logger: {}", e).into());
    }

    log::info!("Starting Scribble (WASM)");

    let route = get_route_from_url();
    log::info!("Route from URL: {}", route);

    let config = crate::AppConfig {
        route,
        ..crate::AppConfig::default()
    };
    crate::App::run(config).await;
}
