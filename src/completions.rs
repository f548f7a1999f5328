//! Provides helpers to easily generate shell completions
use std::io::Write;

/// Available shells for completion generation
#[derive(Clone, Copy, clap::ValueEnum, PartialEq, Debug)]
pub enum Shell {
    /// Bourne Again SHell
    Bash,
    /// Elvish shell
    Elvish,
    /// Friendly Interactive SHell
    Fish,
    /// Nushell (nu)
    Nushell,
    /// PowerShell
    PowerShell,
    /// Zsh
    Zsh,
}

/// Generate the completion script of `cmd` for `sh` and write it to `output`
pub fn generate(sh: Shell, cmd: &mut clap::Command, bin_name: &str, output: &mut dyn Write) {
    use Shell::*;

    let clap_shell = match sh {
        Nushell => return clap_complete::generate(clap_complete_nushell::Nushell, cmd, bin_name, output),
        Bash => clap_complete::Shell::Bash,
        Elvish => clap_complete::Shell::Elvish,
        Fish => clap_complete::Shell::Fish,
        PowerShell => clap_complete::Shell::PowerShell,
        Zsh => clap_complete::Shell::Zsh,
    };
    clap_complete::generate(clap_shell, cmd, bin_name, output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripts_mention_the_binary() {
        let mut cmd = clap::Command::new("gylte").subcommand(clap::Command::new("search"));
        for shell in [Shell::Bash, Shell::Fish, Shell::Zsh, Shell::Nushell] {
            let mut out = Vec::new();
            generate(shell, &mut cmd, "gylte", &mut out);
            let script = String::from_utf8(out).unwrap();
            assert!(script.contains("gylte"), "{shell:?}");
        }
    }
}
