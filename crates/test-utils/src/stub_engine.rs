//! Shell scripts standing in for the analysis engine.
//!
//! Every stub skips the engine flags (`-n`, `-i`, `-d`, `-e <name>`) and
//! then behaves like the real engine with respect to positional arguments:
//! two paths means file to file, one path means file to stdout, none means
//! stdin to stdout.

#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

const SKIP_FLAGS: &str = r#"
while [ $# -gt 0 ]; do
  case "$1" in
    -e) shift 2 ;;
    -*) shift ;;
    *) break ;;
  esac
done
"#;

/// Write an executable `/bin/sh` script named `name` into `dir`.
pub fn write_stub_engine(dir: &Path, name: &str, body: &str) -> Result<PathBuf> {
    let path = dir.join(name);
    let script = format!("#!/bin/sh\n{body}\n");
    fs::write(&path, script).with_context(|| format!("writing stub engine {}", path.display()))?;

    let mut perms = fs::metadata(&path)?.permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms)
        .with_context(|| format!("making stub engine {} executable", path.display()))?;

    Ok(path)
}

/// Echoes every input line prefixed with `marker`.
///
/// `marker` must not contain single quotes.
pub fn echo_engine(dir: &Path, marker: &str) -> Result<PathBuf> {
    let body = format!(
        r#"{SKIP_FLAGS}
echo_lines() {{
  while IFS= read -r line || [ -n "$line" ]; do
    printf '%s%s\n' '{marker}' "$line"
  done
}}
if [ $# -ge 2 ]; then
  echo_lines < "$1" > "$2"
elif [ $# -eq 1 ]; then
  echo_lines < "$1"
else
  echo_lines
fi"#
    );
    write_stub_engine(dir, "echo-engine", &body)
}

/// Prints each word of the input file on its own line.
pub fn word_per_line_engine(dir: &Path) -> Result<PathBuf> {
    let body = format!(
        r#"{SKIP_FLAGS}
tr -s ' ' '\n' < "$1""#
    );
    write_stub_engine(dir, "words-engine", &body)
}

/// Prints every argument it received, one per line.
pub fn argv_engine(dir: &Path) -> Result<PathBuf> {
    write_stub_engine(
        dir,
        "argv-engine",
        r#"for a in "$@"; do printf '%s\n' "$a"; done"#,
    )
}

/// Never finishes on its own.
pub fn sleeping_engine(dir: &Path) -> Result<PathBuf> {
    write_stub_engine(dir, "sleeping-engine", "exec sleep 30")
}

/// Floods stderr before printing `done`.
pub fn noisy_engine(dir: &Path) -> Result<PathBuf> {
    write_stub_engine(
        dir,
        "noisy-engine",
        r#"i=0
while [ $i -lt 20000 ]; do
  echo "warning: noise line $i" >&2
  i=$((i + 1))
done
echo done"#,
    )
}

/// Prints one line and exits with status 3.
pub fn failing_engine(dir: &Path) -> Result<PathBuf> {
    write_stub_engine(dir, "failing-engine", "echo partial\nexit 3")
}
