use std::env;

use gylte::GylteError;
use gylte::clipboard::{ClipboardSink, SystemClipboard};
use serial_test::serial;

/// Run `f` with `PATH` set to `value`
fn with_path<T>(value: &str, f: impl FnOnce() -> T) -> T {
    let saved = env::var_os("PATH");
    // SAFETY: tests touching the environment are serialized
    unsafe { env::set_var("PATH", value) };
    let result = f();
    match saved {
        Some(path) => unsafe { env::set_var("PATH", path) },
        None => unsafe { env::remove_var("PATH") },
    }
    result
}

#[test]
#[serial]
fn no_provider_on_empty_path() {
    let err = with_path("", SystemClipboard::detect).unwrap_err();
    match err {
        GylteError::ClipboardUnavailable { tried } => assert!(tried.contains("xclip"), "{tried}"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
#[serial]
fn configured_command_wins_over_detection() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("out");
    let cmd = format!("sh -c 'cat > \"$0\"' {}", target.display());
    let clipboard = SystemClipboard::from_options(Some(&cmd)).unwrap();
    clipboard.set_text("\u{eb99}").unwrap();
    assert_eq!(std::fs::read_to_string(&target).unwrap(), "\u{eb99}");
}

#[test]
#[serial]
fn failing_command_is_an_error() {
    let clipboard = SystemClipboard::from_command("sh -c 'exit 3'").unwrap();
    assert!(matches!(clipboard.set_text("x"), Err(GylteError::Clipboard { .. })));
}
