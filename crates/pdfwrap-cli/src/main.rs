mod bookmarks_cmd;
mod cli;
mod join_cmd;
mod metadata_cmd;
mod page_range;
mod pages_cmd;
mod reorder_cmd;
mod shared;
mod split_cmd;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    let filter = log_filter(cli.verbose, std::env::var("RUST_LOG").ok().as_deref());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(code) = run(cli) {
        std::process::exit(code);
    }
}

/// `RUST_LOG` when set, otherwise debug with `-v` and warn without.
fn log_filter(verbose: u8, rust_log: Option<&str>) -> EnvFilter {
    match rust_log {
        Some(directives) if !directives.trim().is_empty() => EnvFilter::new(directives),
        _ if verbose > 0 => EnvFilter::new("debug"),
        _ => EnvFilter::new("warn"),
    }
}

fn run(cli: Cli) -> Result<(), i32> {
    let backend = shared::open_backend(&cli.backend)?;

    match cli.command {
        Commands::Join { ref files, ref output } => join_cmd::run(backend, files, output),
        Commands::JoinPattern {
            ref folder,
            ref pattern,
            ref output,
        } => join_cmd::run_pattern(backend, folder, pattern, output),
        Commands::Split {
            ref file,
            ref parts,
            ref output_dir,
        } => split_cmd::run(backend, file, parts, output_dir.as_deref()),
        Commands::Reorder {
            ref file,
            ref order,
            ref output,
        } => reorder_cmd::run(backend, file, order, output.as_deref()),
        Commands::Pages { ref file, ref format } => pages_cmd::run(backend, file, format),
        Commands::Bookmarks { ref file, ref format } => bookmarks_cmd::run(backend, file, format),
        Commands::SetBookmarks {
            ref file,
            ref bookmarks,
            ref output,
        } => bookmarks_cmd::run_set(backend, file, bookmarks, output.as_deref()),
        Commands::Metadata { ref file, ref format } => metadata_cmd::run(backend, file, format),
        Commands::SetMetadata {
            ref file,
            ref entries,
            ref output,
        } => metadata_cmd::run_set(backend, file, entries, output.as_deref()),
    }
}
