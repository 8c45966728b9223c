//! Shell completions command implementation.
//!
//! Generate shell completions for bash, zsh, fish, and powershell.

use std::io;

use clap::CommandFactory;
use clap_complete::{generate, Shell as ClapShell};

use crate::cli::{Cli, Shell};

/// Maps the CLI shell choice onto clap_complete's shell type.
fn to_clap_shell(shell: &Shell) -> ClapShell {
    match shell {
        Shell::Bash => ClapShell::Bash,
        Shell::Zsh => ClapShell::Zsh,
        Shell::Fish => ClapShell::Fish,
        Shell::Powershell => ClapShell::PowerShell,
    }
}

/// Generate shell completions for the given shell and write to stdout.
///
/// # Errors
///
/// Returns an error if writing to stdout fails.
pub fn execute(shell: &Shell) -> io::Result<()> {
    let mut cmd = Cli::command();
    generate(to_clap_shell(shell), &mut cmd, "pf", &mut io::stdout());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shell_mapping() {
        assert!(matches!(to_clap_shell(&Shell::Bash), ClapShell::Bash));
        assert!(matches!(to_clap_shell(&Shell::Zsh), ClapShell::Zsh));
        assert!(matches!(to_clap_shell(&Shell::Fish), ClapShell::Fish));
        assert!(matches!(
            to_clap_shell(&Shell::Powershell),
            ClapShell::PowerShell
        ));
    }

    #[test]
    fn test_generated_script_mentions_binary() {
        let mut cmd = Cli::command();
        let mut buf = Vec::new();
        generate(ClapShell::Bash, &mut cmd, "pf", &mut buf);
        let script = String::from_utf8(buf).unwrap();
        assert!(script.contains("pf"));
    }
}
