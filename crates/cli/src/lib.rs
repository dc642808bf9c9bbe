//! `topics` binary support: configuration, service wiring and the demo
//! scenarios replayed by the `scenario` subcommand.

pub mod bootstrap;
pub mod config;
pub mod scenario;

pub use bootstrap::Services;
pub use config::{AppConfig, Cli, Command, ScenarioKind, StoreConfig};
