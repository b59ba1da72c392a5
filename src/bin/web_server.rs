use relaxa::web::server::{start_server_with_config, ServerConfig};
use std::env;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Environment first, then an optional port argument
    let mut config = ServerConfig::from_env();
    if let Some(arg) = env::args().nth(1) {
        config.port = arg.parse()?;
    }

    log::info!("Configuration:");
    log::info!("  Address: {}", config.addr());
    log::info!("  Static files: {}", config.static_dir);
    log::info!("  CORS enabled: {}", config.enable_cors);
    log::info!("  Max vertices: {}", config.max_nodes);
    log::info!("  Max traced vertices: {}", config.max_trace_nodes);

    start_server_with_config(config).await
}
