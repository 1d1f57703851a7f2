//! Main application entry point (native).

#[cfg(feature = "native")]
fn main() {
    env_logger::init();
    log::info!("Starting GrabLabel");

    let result = grablabel_app::AppConfig::from_args(std::env::args())
        .and_then(|config| pollster::block_on(grablabel_app::App::run(config)));
    if let Err(e) = result {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(not(feature = "native"))]
fn main() {
    eprintln!("Native feature not enabled. Use `cargo run --features native`");
    std::process::exit(1);
}
