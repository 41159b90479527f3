//! CLI command implementations.
//!
//! | Module     | Commands handled  |
//! |------------|-------------------|
//! | `serve`    | `Serve`           |
//! | `database` | `Init`, `Show`    |
//! | `config`   | `Config`          |

pub mod config;
pub mod database;
pub mod serve;

pub use config::cmd_config;
pub use database::{cmd_init, cmd_show};
pub use serve::cmd_serve;
