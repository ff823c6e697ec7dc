//! Inventory ledger module.
//!
//! This crate contains the stock-keeping rules, implemented purely as
//! deterministic domain logic (no IO, no rendering, no storage). Whoever
//! holds a [`Ledger`] owns its lifetime.

pub mod ledger;
pub mod shortage;
pub mod targets;

pub use ledger::{
    AddOutcome, AddStock, ItemIntroduced, ItemRemoved, Ledger, LedgerCommand, LedgerEvent,
    RemoveOutcome, RemoveStock, StockIncreased, StockReduced,
};
pub use shortage::{ShortageRecord, ShortageReport};
pub use targets::TargetLevels;
