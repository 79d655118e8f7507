//! Application state shared by all handlers.

use intake_core::Config;
use intake_services::IntakeLedger;

#[derive(Clone)]
pub struct AppState {
    pub ledger: IntakeLedger,
    pub config: Config,
}

impl AppState {
    pub fn new(ledger: IntakeLedger, config: Config) -> Self {
        Self { ledger, config }
    }
}
