//! Synchronization engine for Vellum.
//!
//! This crate provides:
//! - [`Synchronizer`] - Batch application with snapshot isolation
//! - [`ErrorNotifier`] / [`ChangeObserver`] - Injected callback seams
//! - [`CommonTypeCache`] - Memoized lookup of frequently used types
//!
//! Reference resolution, alias chasing, cycle detection, and relinking
//! are internal to the batch and reachable only through
//! [`Synchronizer::synchronize`].

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod alias;
mod cache;
mod cycle;
mod notifier;
mod resolve;
mod sync;

pub use cache::CommonTypeCache;
pub use notifier::{
    ChangeObserver, CollectingNotifier, CollectingObserver, ErrorNotifier, NullNotifier,
    NullObserver,
};
pub use sync::Synchronizer;
