//! Client commands against a running relay: send, chat, history.

use std::path::Path;

use anyhow::Result;
use console::style;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::task::JoinHandle;

use wrelay_core::identity::service::IdentityService;
use wrelay_core::transport::{ChatTransport, ReplyReceiver};
use wrelay_infra::config::identity_ttl;
use wrelay_infra::filesystem::identity::FileIdentityStorage;
use wrelay_infra::transport::http::HttpTransport;
use wrelay_infra::transport::ws::WsTransport;
use wrelay_types::config::RelayConfig;
use wrelay_types::envelope::Sender;

/// Identity service over `{data_dir}/identity.json`.
pub fn identity_service(
    data_dir: &Path,
    config: &RelayConfig,
) -> IdentityService<FileIdentityStorage> {
    IdentityService::new(
        FileIdentityStorage::in_data_dir(data_dir),
        identity_ttl(config),
    )
}

/// `--server` wins over `[client] server_url`.
fn server_url(server: Option<String>, config: &RelayConfig) -> String {
    server.unwrap_or_else(|| config.client.server_url.clone())
}

/// WebSocket URL for a relay base URL: `http` becomes `ws`, `https` becomes `wss`.
pub fn ws_url(server: &str) -> String {
    let base = server.trim_end_matches('/');
    let base = if let Some(rest) = base.strip_prefix("https://") {
        format!("wss://{rest}")
    } else if let Some(rest) = base.strip_prefix("http://") {
        format!("ws://{rest}")
    } else if base.starts_with("ws://") || base.starts_with("wss://") {
        base.to_string()
    } else {
        format!("ws://{base}")
    };
    format!("{base}/ws")
}

/// Send one message and print the reply.
///
/// ```bash
/// wrelay send "hello"
/// wrelay send "hello" --stateless
/// ```
pub async fn send(
    data_dir: &Path,
    config: &RelayConfig,
    text: &str,
    server: Option<String>,
    stateless: bool,
    json: bool,
) -> Result<()> {
    let (transport, _replies) = HttpTransport::new(server_url(server, config), None)?;

    if stateless {
        let reply = transport.send_plain(text).await?;
        if json {
            println!("{}", serde_json::json!({ "response": { "message": reply } }));
        } else {
            println!("{reply}");
        }
        return Ok(());
    }

    let widget_id = identity_service(data_dir, config)
        .get_or_create_conversation_id()
        .await;
    let reply = transport.send_envelope(&widget_id, text).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&reply)?);
    } else {
        println!("{}", reply.text);
    }
    Ok(())
}

/// Interactive chat. Lines read from stdin are sent as user messages;
/// replies are printed as they arrive.
pub async fn chat(
    data_dir: &Path,
    config: &RelayConfig,
    server: Option<String>,
    stream: bool,
    quiet: bool,
) -> Result<()> {
    let server = server_url(server, config);

    if stream {
        let url = ws_url(&server);
        let (transport, replies) = WsTransport::connect(&url).await?;
        print_banner(&url, transport.name(), quiet);

        let mut printer = spawn_printer(replies);
        let stdin = BufReader::new(tokio::io::stdin());
        match read_input(&transport, stdin, &mut printer).await? {
            InputEnd::Quit => {
                if let Err(err) = transport.close().await {
                    tracing::debug!("close after chat: {err}");
                }
                drop(transport);
                printer.await?;
            }
            InputEnd::Disconnected => {
                eprintln!(
                    "  {} Connection closed by the relay.",
                    style("i").blue().bold()
                );
            }
        }
    } else {
        let widget_id = identity_service(data_dir, config)
            .get_or_create_conversation_id()
            .await;
        let (transport, replies) = HttpTransport::new(&server, Some(widget_id))?;
        print_banner(&server, transport.name(), quiet);

        let mut printer = spawn_printer(replies);
        let stdin = BufReader::new(tokio::io::stdin());
        read_input(&transport, stdin, &mut printer).await?;
        drop(transport);
        printer.await?;
    }

    Ok(())
}

fn print_banner(url: &str, transport: &str, quiet: bool) {
    if quiet {
        return;
    }
    println!();
    println!(
        "  {} Connected to {} over {}",
        style("*").cyan().bold(),
        style(url).cyan(),
        transport
    );
    println!(
        "  {}",
        style("Type a message and press Enter. /quit or Ctrl+D to leave.").dim()
    );
    println!();
}

/// Print replies until the transport drops its end of the channel.
fn spawn_printer(mut replies: ReplyReceiver) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(reply) = replies.recv().await {
            println!("{} {reply}", style("bot>").green().bold());
        }
    })
}

/// Why the input loop stopped.
#[derive(Debug, PartialEq, Eq)]
enum InputEnd {
    /// End of input or `/quit`.
    Quit,
    /// The reply channel closed first; the printer has already finished.
    Disconnected,
}

/// Send input lines over any transport until input ends, `/quit`, or the
/// printer finishes because the transport closed its reply channel.
async fn read_input<T, R>(
    transport: &T,
    input: R,
    printer: &mut JoinHandle<()>,
) -> Result<InputEnd>
where
    T: ChatTransport,
    R: AsyncBufRead + Unpin,
{
    let mut lines = input.lines();
    loop {
        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = &mut *printer => return Ok(InputEnd::Disconnected),
        };
        let Some(line) = line else {
            return Ok(InputEnd::Quit);
        };

        let text = line.trim();
        if text.is_empty() {
            continue;
        }
        if text == "/quit" {
            return Ok(InputEnd::Quit);
        }
        if let Err(err) = transport.send(text).await {
            tracing::debug!(transport = transport.name(), "send failed: {err}");
            eprintln!("  {} {err}", style("error:").red().bold());
        }
    }
}

/// Print the stored transcript for a conversation.
pub async fn history(
    data_dir: &Path,
    config: &RelayConfig,
    server: Option<String>,
    widget_id: Option<String>,
    json: bool,
) -> Result<()> {
    let widget_id = match widget_id {
        Some(id) => id,
        None => {
            identity_service(data_dir, config)
                .get_or_create_conversation_id()
                .await
        }
    };

    let (transport, _replies) = HttpTransport::new(server_url(server, config), None)?;
    let messages = transport.history(&widget_id).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&messages)?);
        return Ok(());
    }

    if messages.is_empty() {
        println!();
        println!(
            "  {} No messages for {}",
            style("i").blue().bold(),
            style(&widget_id).dim()
        );
        println!();
        return Ok(());
    }

    println!();
    for message in &messages {
        let who = match message.sender {
            Sender::User => style("you>").yellow().bold(),
            Sender::Bot => style("bot>").green().bold(),
        };
        println!(
            "  {} {} {}",
            style(message.timestamp.format("%Y-%m-%d %H:%M:%S")).dim(),
            who,
            message.text
        );
    }
    println!();

    Ok(())
}
