//! context-keeper: maintenance pipeline for a library-documentation website
//!
//! Fetches repository candidates from the GitHub API, ranks them by stars per
//! topical domain, generates per-repository context files via an external
//! documentation tool, and synchronizes the resulting JSON data to the
//! directory served to the web frontend.

pub mod cli;
pub mod config;
pub mod docgen;
pub mod domain;
pub mod fetch;
pub mod merge;
pub mod pipeline;
pub mod store;
pub mod sync;
