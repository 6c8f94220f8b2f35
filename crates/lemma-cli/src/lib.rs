pub mod args;
pub mod batch;
pub mod commands;
pub mod trace_init;
