//! Core library for the season-stats command line application.
//!
//! The library scrapes five per-team statistics tables for a college
//! basketball season and reconciles them into one wide row per team. Markup and
//! network adapters live under [`io`], the table types inside [`model`], header
//! flattening in [`flatten`], column renaming in [`mapping`], row cleanup in
//! [`sanitize`], team identity in [`identity`], the reconciling merge under
//! [`merge`], and the end-to-end orchestration in [`pipeline`].

pub mod config;
pub mod error;
pub mod flatten;
pub mod identity;
pub mod io;
pub mod mapping;
pub mod merge;
pub mod model;
pub mod pipeline;
pub mod sanitize;
pub mod season;

pub use error::{Result, StatsError};
