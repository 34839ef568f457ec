//! Local widget state commands: identity, widget toggle/status.

use std::path::Path;

use anyhow::Result;
use console::style;

use wrelay_infra::filesystem::prefs::WidgetPrefsStore;
use wrelay_types::config::RelayConfig;

use super::client::identity_service;

/// Print this client's conversation id, minting one if needed.
///
/// ```bash
/// wrelay identity
/// wrelay identity --reset
/// ```
pub async fn identity(data_dir: &Path, config: &RelayConfig, reset: bool, json: bool) -> Result<()> {
    let service = identity_service(data_dir, config);
    let widget_id = if reset {
        service.reset().await
    } else {
        service.get_or_create_conversation_id().await
    };

    if json {
        println!(
            "{}",
            serde_json::json!({ "widgetId": widget_id, "reset": reset })
        );
    } else if reset {
        println!(
            "  {} New conversation id: {}",
            style("✓").green().bold(),
            style(&widget_id).bold()
        );
    } else {
        println!("{widget_id}");
    }

    Ok(())
}

/// Flip the widget open/closed flag.
pub async fn toggle(data_dir: &Path, json: bool) -> Result<()> {
    let prefs = WidgetPrefsStore::in_data_dir(data_dir).toggle().await?;
    print_prefs(prefs.widget_open, json)
}

/// Show the widget open/closed flag.
pub async fn status(data_dir: &Path, json: bool) -> Result<()> {
    let prefs = WidgetPrefsStore::in_data_dir(data_dir).load().await?;
    print_prefs(prefs.widget_open, json)
}

fn print_prefs(widget_open: bool, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::json!({ "widgetOpen": widget_open }));
    } else if widget_open {
        println!("  Widget is {}", style("open").green().bold());
    } else {
        println!("  Widget is {}", style("closed").dim());
    }
    Ok(())
}
