use std::process::Output;

use tokio::process::Command;

use crate::errors::*;

macro_rules! make_log_macro {
    (@wdoll $macro_name:ident, $block_name:literal, ($dol:tt)) => {
        #[allow(dead_code)]
        macro_rules! $macro_name {
            ($dol($args:tt)+) => {
                ::log::$macro_name!(target: $block_name, $dol($args)+);
            };
        }
    };
    ($macro_name:ident, $block_name:literal) => {
        make_log_macro!(@wdoll $macro_name, $block_name, ($));
    };
}

/// Run a command to completion and capture its output. A command that cannot
/// be launched at all surfaces as [`TogglebrightError::QueryUnavailable`].
pub(crate) async fn run_command(program: &str, args: &[&str]) -> Result<Output> {
    Command::new(program)
        .args(args)
        .output()
        .await
        .map_err(|e| TogglebrightError::QueryUnavailable(format!("{program}: {e}")))
}

/// Lossily decode a captured stream.
pub(crate) fn decode(stream: &[u8]) -> String {
    String::from_utf8_lossy(stream).trim_end().to_string()
}
