//! Main application entry point (native).

use shapepad_app::{App, AppConfig, ShortcutRegistry};

/// Environment variable naming a JSON configuration file.
const CONFIG_ENV: &str = "SHAPEPAD_CONFIG";

fn load_config() -> AppConfig {
    let Some(path) = std::env::var_os(CONFIG_ENV) else {
        log::info!("{} not set, using default configuration", CONFIG_ENV);
        return AppConfig::default();
    };

    match AppConfig::from_file(&path) {
        Ok(config) => {
            log::info!("Loaded configuration from {:?}", path);
            config
        }
        Err(e) => {
            log::warn!("Ignoring configuration {:?}: {}", path, e);
            AppConfig::default()
        }
    }
}

#[cfg(feature = "native")]
fn main() {
    env_logger::init();
    log::info!("Starting shapepad");
    ShortcutRegistry::log_all();

    if let Err(e) = App::run(load_config()) {
        log::error!("shapepad exited with an error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(not(feature = "native"))]
fn main() {
    eprintln!("Native feature not enabled. Use `cargo run --features native`");
    std::process::exit(1);
}
