//! Status command implementation.
//!
//! Displays what exists inside an existing bundle.

use crate::bundler::Bundle;
use crate::cli::{Command, RuntimeConfig};
use crate::error::{MacAppError, Result};

/// Execute status command. Returns exit code 0 when the bundle is complete.
pub(super) async fn execute_status(command: &Command, config: &RuntimeConfig) -> Result<i32> {
    let Command::Status { path, json } = command else {
        unreachable!("execute_status called with non-Status command");
    };

    config.verbose_println(&format!("Inspecting {}", path.display()));
    let bundle = Bundle::open(path)?;
    let status = bundle.inspect().await;

    if *json {
        let json_output = serde_json::to_string_pretty(&status).map_err(MacAppError::Json)?;
        println!("{}", json_output);
    } else {
        config.println(&format!("📦 {}", status.path.display()));
        let descriptor = status
            .descriptor
            .as_ref()
            .and_then(|d| d.display_name.as_deref())
            .unwrap_or("missing");
        config.indent(&format!("descriptor: {}", descriptor));
        config.indent(&format!("executable: {}", size_label(status.binary_size)));
        config.indent(&format!("icon: {}", size_label(status.icon_size)));

        if status.is_complete() {
            config.success_println("Bundle is complete");
        } else {
            config.warning_println("Bundle is incomplete:");
            for item in status.missing() {
                config.indent(&format!("• {}", item));
            }
        }
    }

    Ok(if status.is_complete() { 0 } else { 1 })
}

fn size_label(size: Option<u64>) -> String {
    match size {
        Some(bytes) => format!("{} bytes", bytes),
        None => "missing".to_string(),
    }
}
