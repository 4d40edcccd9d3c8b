//! kodegen_bundler_macapp - build minimal macOS `.app` bundles.

use kodegen_bundler_macapp::cli;
use kodegen_bundler_macapp::cli::OutputManager;
use std::process;

#[tokio::main]
async fn main() {
    env_logger::init();

    match cli::run().await {
        Ok(exit_code) => {
            process::exit(exit_code);
        }
        Err(e) => {
            // Never quiet for fatal errors
            let output = OutputManager::new(false, false);
            output.error(&format!("Fatal error: {e}"));

            let suggestions = e.recovery_suggestions();
            if !suggestions.is_empty() {
                let _ = output.println("\n💡 Recovery suggestions:");
                for suggestion in suggestions {
                    let _ = output.indent(&suggestion);
                }
            }

            process::exit(1);
        }
    }
}
