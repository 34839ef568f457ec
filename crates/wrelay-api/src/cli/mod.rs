//! CLI command definitions for the `wrelay` binary.
//!
//! Uses clap derive macros for argument parsing. `serve` runs the relay;
//! the other commands are clients of a running relay or manage the local
//! widget state kept in the data directory.

pub mod client;
pub mod identity;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Relay between an embeddable chat widget and a chat backend.
#[derive(Parser)]
#[command(name = "wrelay", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Export tracing spans through OpenTelemetry (stdout exporter).
    #[arg(long, global = true)]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the relay server (HTTP routes and WebSocket endpoint).
    Serve {
        /// Port to listen on (default from config, 5000).
        #[arg(short, long, env = "WRELAY_PORT")]
        port: Option<u16>,

        /// Host to bind to (default from config, 127.0.0.1).
        #[arg(long, env = "WRELAY_HOST")]
        host: Option<String>,

        /// Reply provider: http or canned.
        #[arg(long, env = "WRELAY_PROVIDER")]
        provider: Option<String>,
    },

    /// Send one message through a running relay and print the reply.
    Send {
        /// Message text.
        text: String,

        /// Relay base URL (default from config).
        #[arg(long, env = "WRELAY_SERVER")]
        server: Option<String>,

        /// Use the stateless /send-message route (nothing is stored).
        #[arg(long)]
        stateless: bool,
    },

    /// Interactive chat with a running relay.
    Chat {
        /// Relay base URL (default from config).
        #[arg(long, env = "WRELAY_SERVER")]
        server: Option<String>,

        /// Use the WebSocket transport instead of HTTP request/response.
        #[arg(long)]
        stream: bool,
    },

    /// Show the stored transcript of a conversation.
    History {
        /// Relay base URL (default from config).
        #[arg(long, env = "WRELAY_SERVER")]
        server: Option<String>,

        /// Conversation to show (default: this client's conversation).
        #[arg(long)]
        widget_id: Option<String>,
    },

    /// Show this client's conversation id.
    Identity {
        /// Discard the current id and mint a new one.
        #[arg(long)]
        reset: bool,
    },

    /// Widget open/closed preference.
    Widget {
        #[command(subcommand)]
        action: WidgetCommand,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum WidgetCommand {
    /// Flip the widget between open and closed.
    Toggle,

    /// Show whether the widget is open.
    Status,
}
