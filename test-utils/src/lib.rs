use std::{
    error::Error,
    fs,
    io::{self, Write},
    process::{Command, Output},
    str,
    sync::atomic::{AtomicU64, Ordering},
};

const SOXSH_PATH: &str = "./target/debug/soxsh";

static NEXT_SCRATCH_FILE: AtomicU64 = AtomicU64::new(0);

pub struct Expected<'a> {
    pub stdout: &'a str,
    pub stderr: &'a str,
}

impl<'a> Expected<'a> {
    fn assert_matches(self, output: &Output) -> Result<(), Box<dyn Error>> {
        assert_eq!(str::from_utf8(&output.stdout)?, self.stdout);
        assert_eq!(str::from_utf8(&output.stderr)?, self.stderr);
        Ok(())
    }
}

/// Writes `source` to a uniquely-named scratch file and runs it through
/// the built `soxsh` binary, the way an integration test would invoke
/// `soxsh path/to/script.sox` from a shell.
fn run_source(source: &str) -> Result<Output, io::Error> {
    let id = NEXT_SCRATCH_FILE.fetch_add(1, Ordering::Relaxed);
    let path = std::env::temp_dir().join(format!("soxsh-test-{}-{id}.sox", std::process::id()));
    let mut file = fs::File::create(&path)?;
    file.write_all(source.as_bytes())?;
    drop(file);

    let output = Command::new(SOXSH_PATH).arg(&path).output();
    let _ = fs::remove_file(&path);
    output
}

/// Runs `source` and asserts its captured stdout/stderr, plus a
/// successful exit status.
pub fn check_source(source: &str, expected: Expected) -> Result<(), Box<dyn Error>> {
    let output = run_source(source)?;
    expected.assert_matches(&output)?;
    assert!(output.status.success(), "soxsh exited with status {:?}", output.status.code());
    Ok(())
}

/// Runs `source` and asserts it fails, with `stdout` containing
/// `expected_message` — the language's own error reports are part of a
/// program's stdout contract, not stderr.
pub fn check_source_fails(source: &str, expected_message: &str) -> Result<(), Box<dyn Error>> {
    let output = run_source(source)?;
    let stdout = str::from_utf8(&output.stdout)?;
    assert!(!output.status.success(), "expected soxsh to fail, stdout was: {stdout}");
    assert!(stdout.contains(expected_message), "stdout '{stdout}' did not contain '{expected_message}'");
    Ok(())
}
