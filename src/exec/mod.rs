pub mod shell;

pub use shell::{DEFAULT_SHELL, ExecResult, execute_shell, execute_shell_with};
