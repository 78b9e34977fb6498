//! Cross-crate integration tests for Artifact Search
//!
//! The tests live under `tests/`; shared fixtures are in `tests/common`.
