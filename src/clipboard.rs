//! Clipboard sinks.
//!
//! The system clipboard is reached through whichever provider program is
//! installed (`wl-copy`, `xclip`, `xsel`, `pbcopy`, `clip.exe`), or a command
//! given in the options. The text is written to the program's stdin.
use std::env;
use std::io::Write as _;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::sync::{Mutex, OnceLock, PoisonError};

use which::which;

use crate::error::{GylteError, Result};

/// Something that accepts copied text
pub trait ClipboardSink: Send + Sync {
    fn set_text(&self, text: &str) -> Result<()>;
}

/// Provider programs in lookup order, with the arguments that make them read stdin
const PROVIDERS: &[(&str, &[&str])] = &[
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
    ("xsel", &["--clipboard", "--input"]),
    ("pbcopy", &[]),
    ("clip.exe", &[]),
];

/// The system clipboard, driven through an external program
#[derive(Debug, Clone)]
pub struct SystemClipboard {
    program: PathBuf,
    args: Vec<String>,
}

impl SystemClipboard {
    /// Find the first installed provider. `wl-copy` is only considered under
    /// Wayland.
    pub fn detect() -> Result<Self> {
        let wayland = env::var_os("WAYLAND_DISPLAY").is_some();
        for (name, args) in PROVIDERS {
            if *name == "wl-copy" && !wayland {
                continue;
            }
            if let Ok(program) = which(name) {
                debug!("clipboard provider: {}", program.display());
                return Ok(Self {
                    program,
                    args: args.iter().map(|arg| arg.to_string()).collect(),
                });
            }
        }
        Err(GylteError::ClipboardUnavailable {
            tried: PROVIDERS.iter().map(|(name, _)| *name).collect::<Vec<_>>().join(", "),
        })
    }

    /// Use `cmd`, split like a shell would split it
    pub fn from_command(cmd: &str) -> Result<Self> {
        let mut words = shlex::split(cmd).unwrap_or_default().into_iter();
        let Some(program) = words.next() else {
            return Err(GylteError::Clipboard {
                command: cmd.to_string(),
                reason: "not a command".to_string(),
            });
        };
        Ok(Self {
            program: PathBuf::from(program),
            args: words.collect(),
        })
    }

    /// [`SystemClipboard::from_command`] when a command is given, detection otherwise
    pub fn from_options(clipboard_cmd: Option<&str>) -> Result<Self> {
        match clipboard_cmd {
            Some(cmd) => Self::from_command(cmd),
            None => Self::detect(),
        }
    }

    fn command_line(&self) -> String {
        std::iter::once(self.program.display().to_string())
            .chain(self.args.iter().cloned())
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn failure(&self, reason: impl ToString) -> GylteError {
        GylteError::Clipboard {
            command: self.command_line(),
            reason: reason.to_string(),
        }
    }
}

impl ClipboardSink for SystemClipboard {
    fn set_text(&self, text: &str) -> Result<()> {
        // providers like xclip keep running in the background to serve the
        // selection, so no output pipe may be left open
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|err| self.failure(err))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(text.as_bytes()).map_err(|err| self.failure(err))?;
        }
        let status = child.wait().map_err(|err| self.failure(err))?;
        if !status.success() {
            return Err(self.failure(status));
        }
        trace!("copied {} bytes with {}", text.len(), self.command_line());
        Ok(())
    }
}

//------------------------------------------------------------------------------
/// The system clipboard, resolved on first use.
///
/// A failed lookup is not remembered: the next copy tries again.
#[derive(Debug, Default)]
pub struct LazyClipboard {
    clipboard_cmd: Option<String>,
    resolved: OnceLock<SystemClipboard>,
}

impl LazyClipboard {
    pub fn new(clipboard_cmd: Option<String>) -> Self {
        Self {
            clipboard_cmd,
            resolved: OnceLock::new(),
        }
    }
}

impl ClipboardSink for LazyClipboard {
    fn set_text(&self, text: &str) -> Result<()> {
        let clipboard = match self.resolved.get() {
            Some(clipboard) => clipboard,
            None => {
                let clipboard = SystemClipboard::from_options(self.clipboard_cmd.as_deref())?;
                self.resolved.get_or_init(|| clipboard)
            }
        };
        clipboard.set_text(text)
    }
}

//------------------------------------------------------------------------------
/// Clipboard that keeps the last copied text, for tests and headless use
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    text: Mutex<Option<String>>,
}

impl MemoryClipboard {
    /// The last copied text
    pub fn contents(&self) -> Option<String> {
        self.text.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

impl ClipboardSink for MemoryClipboard {
    fn set_text(&self, text: &str) -> Result<()> {
        *self.text.lock().unwrap_or_else(PoisonError::into_inner) = Some(text.to_string());
        Ok(())
    }
}

impl<T: ClipboardSink + ?Sized> ClipboardSink for std::sync::Arc<T> {
    fn set_text(&self, text: &str) -> Result<()> {
        (**self).set_text(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_clipboard_keeps_last_text() {
        let clipboard = MemoryClipboard::default();
        assert_eq!(clipboard.contents(), None);
        clipboard.set_text("a").unwrap();
        clipboard.set_text("\u{eb99}").unwrap();
        assert_eq!(clipboard.contents().as_deref(), Some("\u{eb99}"));
    }

    #[test]
    fn command_receives_text_on_stdin() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("copied");
        let cmd = format!("sh -c 'cat > \"$0\"' '{}'", out.display());
        let clipboard = SystemClipboard::from_command(&cmd).unwrap();
        clipboard.set_text("glyph").unwrap();
        assert_eq!(std::fs::read_to_string(&out).unwrap(), "glyph");
    }

    #[test]
    fn failing_command_is_an_error() {
        let clipboard = SystemClipboard::from_command("sh -c 'exit 3'").unwrap();
        assert!(matches!(clipboard.set_text("x"), Err(GylteError::Clipboard { .. })));
        let missing = SystemClipboard::from_command("gylte-no-such-program").unwrap();
        assert!(matches!(missing.set_text("x"), Err(GylteError::Clipboard { .. })));
    }

    #[test]
    fn lazy_clipboard_resolves_on_first_copy() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("copied");
        let clipboard = LazyClipboard::new(Some(format!("sh -c 'cat > \"$0\"' '{}'", out.display())));
        assert!(clipboard.resolved.get().is_none());
        clipboard.set_text("one").unwrap();
        clipboard.set_text("two").unwrap();
        assert_eq!(std::fs::read_to_string(&out).unwrap(), "two");

        let broken = LazyClipboard::new(Some(String::new()));
        assert!(broken.set_text("x").is_err());
        assert!(broken.resolved.get().is_none());
    }

    #[test]
    fn empty_command_is_rejected() {
        assert!(SystemClipboard::from_command("   ").is_err());
        assert!(SystemClipboard::from_command("'unterminated").is_err());
    }
}
