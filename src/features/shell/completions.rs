//! Shell completions generation.
//!
//! Generates shell completion scripts for bash, zsh, fish, elvish, and
//! PowerShell.

use clap::CommandFactory;
use clap_complete::Shell;

use crate::cli::args::Cli;
use crate::error::FocusError;

/// Binary name completions are generated for.
const BIN_NAME: &str = "focus-keeper";

/// Generate the completion script for `shell`.
///
/// # Errors
///
/// Returns an error if the generated script is not valid UTF-8.
pub fn generate_completions(shell: Shell) -> Result<String, FocusError> {
    let mut cmd = Cli::command();
    let mut buf = Vec::new();
    clap_complete::generate(shell, &mut cmd, BIN_NAME, &mut buf);
    String::from_utf8(buf)
        .map_err(|e| FocusError::InvalidArgument(format!("completion script is not UTF-8: {e}")))
}

/// Installation instructions for the completion script of `shell`.
#[must_use]
pub fn completion_install_instructions(shell: Shell) -> String {
    match shell {
        Shell::Bash => r"# Add to ~/.bashrc or ~/.bash_profile:
source <(focus-keeper completions bash)
"
        .to_string(),

        Shell::Zsh => r"# Save to your fpath:
focus-keeper completions zsh > ~/.zsh/completions/_focus-keeper
# Then add to ~/.zshrc:
fpath=(~/.zsh/completions $fpath)
autoload -Uz compinit && compinit
"
        .to_string(),

        Shell::Fish => r"# Save to fish completions directory:
focus-keeper completions fish > ~/.config/fish/completions/focus-keeper.fish
"
        .to_string(),

        Shell::PowerShell => r"# Add to your PowerShell profile ($PROFILE):
focus-keeper completions powershell | Out-String | Invoke-Expression
"
        .to_string(),

        Shell::Elvish => r"# Save to elvish completions directory:
focus-keeper completions elvish > ~/.elvish/lib/focus-keeper.elv
"
        .to_string(),

        _ => "Unknown shell".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_bash_completions() {
        let script = generate_completions(Shell::Bash).unwrap();
        assert!(script.contains("focus-keeper"));
        assert!(script.contains("complete"));
        assert!(script.contains("start"));
    }

    #[test]
    fn test_generate_zsh_completions() {
        let script = generate_completions(Shell::Zsh).unwrap();
        assert!(script.contains("focus-keeper"));
    }

    #[test]
    fn test_generate_fish_completions() {
        let script = generate_completions(Shell::Fish).unwrap();
        assert!(script.contains("focus-keeper"));
    }

    #[test]
    fn test_completion_instructions_not_empty() {
        assert!(completion_install_instructions(Shell::Bash).contains("bashrc"));
        assert!(!completion_install_instructions(Shell::Zsh).is_empty());
        assert!(!completion_install_instructions(Shell::Fish).is_empty());
    }
}
