//! Request extractors that reject with [`crate::error::AppError`].
//!
//! - [`extract::ApiJson`] -- JSON body (`application/json` or `application/*+json`).
//! - [`extract::ApiPath`] -- Typed path parameters.
//! - [`extract::ApiQuery`] -- Typed query string.

pub mod extract;
