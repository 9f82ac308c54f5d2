//! ledger_core gateway binary
//!
//! ```text
//! ┌──────────┐    ┌──────────┐    ┌─────────────┐    ┌──────────────┐
//! │  Config  │───▶│ Gateway  │───▶│ Coordinator │───▶│ AccountStore │
//! │  (YAML)  │    │  (axum)  │    │ (lock pair) │    │  (DashMap)   │
//! └──────────┘    └──────────┘    └─────────────┘    └──────────────┘
//! ```

use std::sync::Arc;

use ledger_core::account::AccountStore;
use ledger_core::config::AppConfig;
use ledger_core::gateway::{self, state::AppState};
use ledger_core::notification::LogNotifier;

fn get_env() -> String {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if (args[i] == "--env" || args[i] == "-e") && i + 1 < args.len() {
            return args[i + 1].clone();
        }
    }
    "dev".to_string()
}

/// Get port override from command line (--port argument)
fn get_port_override() -> Option<u16> {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if args[i] == "--port" && i + 1 < args.len() {
            return args[i + 1].parse().ok();
        }
    }
    None
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env = get_env();
    let mut app_config = AppConfig::load(&env)?;
    if let Some(port) = get_port_override() {
        app_config.gateway.port = port;
    }
    let _log_guard = ledger_core::logging::init_logging(&app_config);

    tracing::info!("Starting ledger_core in {} mode", env);

    let store = Arc::new(AccountStore::new());
    let state = Arc::new(AppState::new(
        store,
        app_config.transfer.compensation_retries,
        Arc::new(LogNotifier),
    ));

    gateway::run_server(&app_config.gateway, state).await
}
