//! Crate test suite
//!
//! - `mocks`: scriptable suggestion providers
//! - `unit`: service and scheduler behaviour against mocked providers
//! - `integration`: the HTTP provider against a local mock server
//! - `property`: proptest invariants for keys, cache and batch verification
