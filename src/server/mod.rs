//! Static File Server Module
//!
//! Serves a directory over HTTP so generated reports and the dashboard can be
//! viewed in a browser. Every response carries headers that disable caching,
//! so reloading always shows the latest report.

pub mod static_server;

pub use static_server::{bind_with_probe, router, ServerError, StaticServer};
