pub mod cli;
pub mod config;
pub mod error;
pub mod exec;
pub mod flow;
pub mod history;
pub mod safety;
pub mod undo;
