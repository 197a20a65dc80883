//! Identity provider integration for Meetly.
//!
//! Provides [`IdentityClient`], the production [`meetly_common::AuthTokenProvider`].

pub mod client;

pub use client::{classify_error_response, IdentityClient, OAuthAccessToken};
