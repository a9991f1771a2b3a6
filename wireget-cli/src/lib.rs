//! Wireget CLI library
//!
//! This library exposes the request builder and fetch orchestration for
//! integration tests and potential reuse.

pub mod fetch;
pub mod request;
