//! Command execution.

mod create;
mod status;

use crate::cli::{Args, Command, RuntimeConfig};
use crate::error::{CliError, Result};

use create::execute_create;
use status::execute_status;

/// Execute the main command based on parsed arguments
pub async fn execute_command(args: Args) -> Result<i32> {
    let config = RuntimeConfig::from(&args);

    let result: Result<i32> = match args.validate() {
        Err(reason) => Err(CliError::InvalidArguments { reason }.into()),
        Ok(()) => match &args.command {
            Command::Create { .. } => execute_create(&args.command, &config).await.map(|()| 0),
            Command::Status { .. } => execute_status(&args.command, &config).await,
        },
    };

    match result {
        Ok(exit_code) => Ok(exit_code),
        Err(e) => {
            config.error_println(&format!(
                "Command '{}' failed: {}",
                args.command.name(),
                e
            ));

            let suggestions = e.recovery_suggestions();
            if !suggestions.is_empty() {
                config.println("\n💡 Recovery suggestions:");
                for suggestion in suggestions {
                    config.println(&format!("  • {}", suggestion));
                }
            }

            Ok(1)
        }
    }
}
