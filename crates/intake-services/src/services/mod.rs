pub mod ledger;

pub use ledger::IntakeLedger;
