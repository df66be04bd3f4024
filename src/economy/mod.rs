pub mod generation;
pub mod ledger;
pub mod warehouse;

pub use generation::PassiveGeneration;
pub use ledger::ResourceLedger;
pub use warehouse::Warehouse;
