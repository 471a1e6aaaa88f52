//! chore-distributor: fair chore distribution for households
//!
//! Assigns chores to people so that everyone earns roughly the same amount,
//! while never pushing anyone past their effort capacity.
//!
//! - **Balancing**: greedy placement by descending reward, lowest earner first
//! - **Capacity**: optional per-person effort ceiling (0 = unlimited)
//! - **Randomization**: ties are broken randomly, so each run can differ
//! - **Publishing**: optional iMessage and Apple Notes delivery (macOS),
//!   with user-supplied message templates
//!
//! # Flow
//!
//! ```text
//!  config file ──► Config::load ──► distribute ──► format_distribution ──► stdout
//!                                       │
//!                                       └──► Publisher (notes, messages)
//! ```

pub mod cli;
pub mod config;
pub mod distributor;
pub mod error;
pub mod models;
pub mod notify;

pub use config::Config;
pub use distributor::{distribute, distribute_with_rng, Distribution};
pub use distributor::report::{format_distribution, PrintOptions};
pub use error::{ConfigError, NotifyError};
pub use models::{Chore, Person};
