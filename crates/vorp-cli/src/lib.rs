// Command-line front end for the VORP draft engine.
//
// Library target so the binary and integration tests share the same
// loading, rendering, and command-loop code.

pub mod command;
pub mod config;
pub mod export;
pub mod projections;
pub mod render;
pub mod repl;
pub mod suggest;
