//! `stockroom-console` — line-oriented front end over the inventory ledger.
//!
//! Holds no stock rules of its own: it parses input, calls the ledger, and
//! renders what comes back.

pub mod action;
pub mod config;
pub mod notice;
pub mod render;
pub mod session;

pub use action::{Action, ParseError};
pub use config::{ConfigError, ConsoleConfig, Retention, Seed, SeedSource};
pub use notice::{Notice, Severity};
pub use session::{Reply, Session};
