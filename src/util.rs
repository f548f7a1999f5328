use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Read every line of `filename`, dropping blank ones
pub fn read_file_lines(filename: &Path) -> std::io::Result<Vec<String>> {
    let file = File::open(filename)?;
    BufReader::new(file)
        .lines()
        .filter(|line| line.as_ref().map_or(true, |l| !l.trim().is_empty()))
        .collect()
}

/// Like [`read_file_lines`], but a missing file reads as empty
pub fn read_file_lines_or_empty(filename: &Path) -> std::io::Result<Vec<String>> {
    match read_file_lines(filename) {
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
        other => other,
    }
}

fn partial_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(".part");
    path.with_file_name(name)
}

/// Replace the content of `path` through a sibling `.part` file and a rename,
/// so readers never see a half written file
pub fn write_atomic(path: &Path, write: impl FnOnce(&mut dyn Write) -> std::io::Result<()>) -> std::io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let partial = partial_path(path);
    let result = File::create(&partial).and_then(|file| {
        let mut out = BufWriter::new(file);
        write(&mut out)?;
        out.flush()?;
        out.into_inner().map_err(|err| err.into_error())?.sync_all()
    });
    let result = result.and_then(|()| fs::rename(&partial, path));
    if result.is_err() {
        let _ = fs::remove_file(&partial);
    }
    result
}

/// Write `lines` to `path`, one per line
pub fn write_lines<S: AsRef<str>>(path: &Path, lines: &[S]) -> std::io::Result<()> {
    write_atomic(path, |out| {
        for line in lines {
            writeln!(out, "{}", line.as_ref())?;
        }
        Ok(())
    })
}
