// --- File: crates/meetly_common/src/http.rs ---
//! HTTP client helpers shared by the integration crates.

pub mod client;
