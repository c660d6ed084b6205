//! Process bootstrap: tracing init, config load, `axum` server. Grounded on
//! the donor's `main.rs` startup sequence, generalized from a
//! warp+ncurses+watchdog stack into a single `axum` server task, since the
//! terminal UI and process-watchdog concerns are out of scope here.

use grandprix_sim::config::Config;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::from_env();
    let bind_addr = config.bind_addr.clone();

    let app = grandprix_sim::api::router(config);

    let listener = match tokio::net::TcpListener::bind(&bind_addr).await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!(%err, %bind_addr, "failed to bind listener");
            std::process::exit(1);
        }
    };

    tracing::info!(%bind_addr, "grandprix-sim listening");

    if let Err(err) = axum::serve(listener, app).await {
        tracing::error!(%err, "server exited with error");
    }
}
