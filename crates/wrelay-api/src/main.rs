//! Widget relay CLI and server entry point.
//!
//! Binary name: `wrelay`
//!
//! Parses CLI arguments, loads configuration from the data directory, then
//! either starts the relay server or runs a client command against one.

mod cli;
mod http;
mod state;

use clap::Parser;
use clap_complete::generate;

use cli::{Cli, Commands, WidgetCommand};
use state::AppState;
use wrelay_infra::config::load_config;
use wrelay_infra::filesystem::resolve_data_dir;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up tracing based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info,wrelay=debug",
        _ => "trace",
    };
    wrelay_observe::tracing_setup::init_tracing(filter, cli.otel)
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    // Shell completions don't need config
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "wrelay", &mut std::io::stdout());
        return Ok(());
    }

    let data_dir = resolve_data_dir();
    let mut config = load_config(&data_dir).await;

    let result = match cli.command {
        Commands::Serve {
            port,
            host,
            provider,
        } => {
            if let Some(port) = port {
                config.server.port = port;
            }
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(kind) = provider {
                config.provider.kind = kind.parse().map_err(|e: String| anyhow::anyhow!(e))?;
            }
            serve(data_dir, config, cli.quiet).await
        }

        Commands::Send {
            text,
            server,
            stateless,
        } => cli::client::send(&data_dir, &config, &text, server, stateless, cli.json).await,

        Commands::Chat { server, stream } => {
            cli::client::chat(&data_dir, &config, server, stream, cli.quiet).await
        }

        Commands::History { server, widget_id } => {
            cli::client::history(&data_dir, &config, server, widget_id, cli.json).await
        }

        Commands::Identity { reset } => {
            cli::identity::identity(&data_dir, &config, reset, cli.json).await
        }

        Commands::Widget { action } => match action {
            WidgetCommand::Toggle => cli::identity::toggle(&data_dir, cli.json).await,
            WidgetCommand::Status => cli::identity::status(&data_dir, cli.json).await,
        },

        Commands::Completions { .. } => unreachable!("handled above"),
    };

    wrelay_observe::tracing_setup::shutdown_tracing();
    result
}

/// Bind the configured address and run the relay until Ctrl+C or SIGTERM.
async fn serve(
    data_dir: std::path::PathBuf,
    config: wrelay_types::config::RelayConfig,
    quiet: bool,
) -> anyhow::Result<()> {
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState::init(data_dir, config).await?;
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!(
        %addr,
        provider = state.relay_service.provider_name(),
        "Relay listening"
    );
    if !quiet {
        println!(
            "  {} Relay listening on {}",
            console::style("⚡").bold(),
            console::style(format!("http://{addr}")).cyan()
        );
        println!("  {}", console::style("Press Ctrl+C to stop").dim());
    }

    let router = http::router::build_router(state);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if !quiet {
        println!("\n  Server stopped.");
    }
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {err}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!("failed to install SIGTERM handler: {err}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
