use std::sync::Arc;
use std::time::Duration;

use pdfwrap::{BackendConfig, PdfBackend, PdfError};

use crate::cli::BackendArgs;

/// Build the backend selected on the command line.
///
/// Returns `Err(1)` with a message printed to stderr if the tool binary is
/// missing.
pub fn open_backend(args: &BackendArgs) -> Result<Arc<dyn PdfBackend>, i32> {
    let mut config =
        BackendConfig::new(args.backend.into()).with_timeout(Duration::from_secs(args.timeout));
    if let Some(binary) = &args.binary {
        config = config.with_binary(binary);
    }

    config.build().map_err(|e| {
        eprintln!("Error: {e}");
        eprintln!("Hint: pass --binary or set PDFWRAP_BINARY to the tool's location");
        1
    })
}

/// Print `err` and the tool's own output, then yield exit code 1.
pub fn report(err: PdfError) -> i32 {
    eprintln!("Error: {err}");
    if let Some(stderr) = err.backend_stderr() {
        for line in stderr.lines() {
            eprintln!("  {line}");
        }
    }
    1
}

/// Print `value` as a single line of JSON.
pub fn print_json(value: &serde_json::Value) -> Result<(), i32> {
    let json_str = serde_json::to_string(value).map_err(|e| {
        eprintln!("Error: failed to serialize output: {e}");
        1
    })?;
    println!("{json_str}");
    Ok(())
}

/// Print a user error and yield exit code 1.
pub fn usage_error(message: &str) -> i32 {
    eprintln!("Error: {message}");
    1
}
