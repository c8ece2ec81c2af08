// Library root: re-exports all modules so integration tests and the binary
// share the same public API.

pub mod app;
pub mod protocol;
pub mod submit;
pub mod tui;
