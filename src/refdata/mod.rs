//! Reference data — departments, categories, priorities and statuses.
//!
//! ## Module Map
//!
//! ```text
//! ┌──────────┐   HTTP   ┌──────────────────────────────────────────────┐
//! │  Client  │ ───────> │  server.rs  (axum Router, ServerConfig)      │
//! │  (React) │ <─────── │    └─ api.rs  (route handlers, AppState)     │
//! └──────────┘   JSON   │         │                                    │
//!                       │         │ Resolver::resolve(kind)            │
//!                       │         v                                    │
//!                       │  resolver.rs  (resolve_with, ReferenceStore) │
//!                       │         │                 │                  │
//!                       │         │ store.list()    │ on error/empty   │
//!                       │         v                 v                  │
//!                       │  db.rs (SQLite)     defaults.rs (built-in)   │
//!                       └──────────────────────────────────────────────┘
//! ```
//!
//! | Module     | Responsibility                                          |
//! |------------|---------------------------------------------------------|
//! | `models`   | `ReferenceKind`, `ReferenceItem`, `Resolved`, `Source`  |
//! | `defaults` | Built-in collections served on fallback and seeding     |
//! | `resolver` | `ReferenceStore` trait, `resolve_with`, `Resolver`      |
//! | `db`       | SQLite access via `DbHandle` (`Arc<Mutex<_>>`)          |
//! | `api`      | Route handlers and `ApiError`                           |
//! | `server`   | Router assembly, bind, graceful shutdown                |

pub mod api;
pub mod db;
pub mod defaults;
pub mod models;
pub mod resolver;
pub mod server;

#[cfg(test)]
pub(crate) mod testing;
