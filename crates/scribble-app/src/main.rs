//! Main application entry point (native).

#[cfg(feature = "native")]
fn main() {
    env_logger::init();
    log::info!("Starting Scribble");

    let config = scribble_app::AppConfig {
        route: scribble_app::AppConfig::route_from_args(std::env::args().skip(1)),
        ..scribble_app::AppConfig::default()
    };
    pollster::block_on(scribble_app::App::run(config));
}

#[cfg(not(feature = "native"))]
fn main() {
    panic!("Native feature not enabled. Use `cargo run --features native`");
}
