//! HTTP middleware for the web API.

pub mod request_id;
