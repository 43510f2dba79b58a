//! Flatten, diff, ignore-filter, and apply engine for casper
//!
//! Turns a nested configuration document and a flat remote key space into
//! a deterministic change set, and applies that change set to a store.
//!
//! # Pipeline
//!
//! ```text
//!  rendered document        store.list("")
//!        |                        |
//!     flatten                  PairSet
//!        \                      /
//!         ChangeSet::compute (merge join)
//!                   |
//!             filter_ignored
//!                   |
//!          render_diff | apply
//! ```
//!
//! # Example
//!
//! ```
//! use casper_core::{MemoryStore, Reconciler, render_diff};
//!
//! let mut store = MemoryStore::with_pairs([("key1", "val1")].into_iter().collect());
//! let desired: serde_yaml::Value = serde_yaml::from_str("key1: val1a").unwrap();
//!
//! let reconciler = Reconciler::default();
//! let changes = reconciler.changes(&store, &desired, None).unwrap();
//! assert_eq!(render_diff(&changes, false).unwrap(), "-key1: val1\n\n+key1: val1a\n\n");
//!
//! reconciler.push(&changes, &mut store).unwrap();
//! assert_eq!(store.pairs().get("key1"), Some("val1a"));
//! ```

pub mod apply;
pub mod diff;
pub mod error;
pub mod flatten;
pub mod format;
pub mod ignore;
pub mod key;
pub mod pair;
pub mod reconcile;
pub mod render;
pub mod store;
pub mod unflatten;

pub use apply::apply;
pub use diff::{Change, ChangeSet, diff};
pub use error::{BackendError, Error, Result, StoreOp};
pub use flatten::flatten;
pub use format::Format;
pub use ignore::{DEFAULT_IGNORE_MARKER, filter_ignored};
pub use pair::{Pair, PairSet};
pub use reconcile::Reconciler;
pub use render::{no_changes, render, render_diff};
pub use store::{MemoryStore, Store};
pub use unflatten::{unflatten, unflatten_lenient};
