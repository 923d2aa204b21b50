use std::io::Write;

use anyhow::{Context as _, Result};
use clap::Args;
use clap_complete::{Shell, generate};

/// Arguments for `hoopnet completions`.
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Target shell for completion script generation.
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Write the completion script for `shell` to `out`.
///
/// # Errors
///
/// Returns an error if flushing `out` fails.
pub fn run_completions(shell: Shell, command: &mut clap::Command, out: &mut dyn Write) -> Result<()> {
    generate(shell, command, "hoopnet", out);
    out.flush().context("failed to write completion script")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command() -> clap::Command {
        clap::Command::new("hoopnet")
            .subcommand(clap::Command::new("metrics"))
            .subcommand(clap::Command::new("export"))
    }

    #[test]
    fn bash_script_names_the_binary() {
        let mut buf = Vec::new();
        run_completions(Shell::Bash, &mut command(), &mut buf).expect("generate");
        let script = String::from_utf8(buf).expect("utf8");
        assert!(script.contains("hoopnet"));
        assert!(script.contains("metrics"));
    }

    #[test]
    fn zsh_script_is_non_empty() {
        let mut buf = Vec::new();
        run_completions(Shell::Zsh, &mut command(), &mut buf).expect("generate");
        assert!(!buf.is_empty());
    }
}
