use anyhow::{Context, Result};
use clap::Parser;
use std::io::BufRead;
use tracemark::cli::{Action, Cli};
use tracemark::TraceMarker;
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber: info by default (RUST_LOG overrides), debug with --debug
fn init_tracing(debug: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let filter = if debug {
        filter.add_directive(tracing::Level::DEBUG.into())
    } else {
        filter
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn emit_message(marker: &TraceMarker, func: Option<&str>, text: &str) {
    match func {
        Some(func) => marker.log(func, format_args!("{}", text)),
        None => marker.mark_str(text),
    }
}

fn run(marker: &TraceMarker, action: Action) -> Result<()> {
    match action {
        Action::Check => {}
        Action::Entry(func) => marker.entry(&func),
        Action::Exit { func, ret } => marker.exit(&func, ret),
        Action::Message { func, text } => emit_message(marker, func.as_deref(), &text),
        Action::Stdin { func } => {
            let mut stdin = std::io::stdin().lock();
            let mut buf = Vec::new();
            loop {
                buf.clear();
                let read = stdin
                    .read_until(b'\n', &mut buf)
                    .context("Failed to read stdin")?;
                if read == 0 {
                    break;
                }
                let raw = buf.strip_suffix(b"\n").unwrap_or(&buf);
                if !raw.is_empty() {
                    // trace_marker takes any bytes; invalid UTF-8 becomes U+FFFD
                    emit_message(marker, func.as_deref(), &String::from_utf8_lossy(raw));
                }
            }
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Cli::parse();

    init_tracing(args.debug);

    let Some(action) = args.action() else {
        anyhow::bail!("Nothing to emit. Usage: tracemark MESSAGE..., --entry FUNC, --exit FUNC --ret N, --stdin or --check");
    };

    let marker = TraceMarker::new(args.marker_config()?);
    let path = marker.init()?;
    tracing::debug!(path = %path.display(), ?action, "trace_marker ready");

    if action == Action::Check {
        println!("{}", path.display());
    }

    let result = run(&marker, action);
    marker.cleanup();
    result
}
