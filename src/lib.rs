//! Schoolsite - public website and administrative dashboard for a school
//!
//! Content lives in a remote REST backend; this crate renders the public
//! pages, proxies dashboard edits with toast feedback, caches backend reads
//! and aggregates exam results from the result service.

pub mod api;
pub mod backend;
pub mod cache;
pub mod config;
pub mod models;
pub mod services;
pub mod theme;
