use hokm_server::config::ServerConfig;
use hokm_server::services::game_flow::GameFlow;
use hokm_server::session::{lobby, table::Table};
use tokio::net::TcpListener;

mod telemetry;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Environment variables must be set by the runtime environment:
    // - Docker: set via env_file or docker run --env-file
    // - Local dev: export HOKM_HOST / HOKM_PORT before launching
    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("❌ {err}");
            std::process::exit(1);
        }
    };

    let listener = TcpListener::bind(config.addr()).await?;
    println!("🚀 Hokm server listening on {}", config.addr());

    let outcome = async {
        let players = lobby::seat_players(&listener).await?;
        let mut table = Table::new(players)?;
        table
            .broadcast("All players connected. Game starting...!")
            .await?;
        GameFlow::new(table)?.run().await
    }
    .await;

    if let Err(err) = outcome {
        eprintln!("❌ Match aborted: {err}");
        std::process::exit(1);
    }

    println!("✅ Match complete");
    Ok(())
}
