//! CLI argument parsing for tracemark

use crate::config::MarkerConfig;
use crate::error::Result;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "tracemark")]
#[command(version)]
#[command(about = "Write userspace markers into the ftrace trace buffer", long_about = None)]
pub struct Cli {
    /// trace_marker path to try, in order (repeatable; replaces the built-in list)
    #[arg(short = 'p', long = "path", value_name = "PATH")]
    pub paths: Vec<PathBuf>,

    /// Maximum bytes per marker line, excluding the newline (1-511)
    #[arg(long = "max-len", value_name = "BYTES")]
    pub max_len: Option<usize>,

    /// Emit "<FUNC>: entry"
    #[arg(long = "entry", value_name = "FUNC", conflicts_with_all = ["exit", "stdin", "check"])]
    pub entry: Option<String>,

    /// Emit "<FUNC>: exit ret=<CODE>" (requires --ret)
    #[arg(long = "exit", value_name = "FUNC", requires = "ret", conflicts_with_all = ["stdin", "check"])]
    pub exit: Option<String>,

    /// Return code reported by --exit
    #[arg(long = "ret", value_name = "CODE", allow_negative_numbers = true, requires = "exit")]
    pub ret: Option<i64>,

    /// Prefix messages as "<FUNC>: <MESSAGE>"
    #[arg(long = "func", value_name = "FUNC", conflicts_with_all = ["entry", "exit", "check"])]
    pub func: Option<String>,

    /// Emit one marker per non-empty line read from stdin
    #[arg(long = "stdin", conflicts_with = "check")]
    pub stdin: bool,

    /// Only locate trace_marker and print the selected path
    #[arg(long = "check")]
    pub check: bool,

    /// Enable debug output on stderr
    #[arg(long = "debug")]
    pub debug: bool,

    /// Message to emit (words are joined with spaces)
    #[arg(value_name = "MESSAGE")]
    pub message: Vec<String>,
}

/// What a single invocation emits
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Check,
    Entry(String),
    Exit { func: String, ret: i64 },
    Stdin { func: Option<String> },
    Message { func: Option<String>, text: String },
}

impl Cli {
    /// Environment configuration with command-line overrides applied
    pub fn marker_config(&self) -> Result<MarkerConfig> {
        let mut config = MarkerConfig::from_env()?;
        if !self.paths.is_empty() {
            config = config.with_candidates(self.paths.iter().cloned());
        }
        if let Some(max_len) = self.max_len {
            config = config.with_max_len(max_len);
        }
        config.validate()?;
        Ok(config)
    }

    /// Resolve the flags into one action, or `None` when nothing was asked for
    pub fn action(&self) -> Option<Action> {
        if self.check {
            return Some(Action::Check);
        }
        if let Some(func) = &self.entry {
            return Some(Action::Entry(func.clone()));
        }
        if let (Some(func), Some(ret)) = (&self.exit, self.ret) {
            return Some(Action::Exit {
                func: func.clone(),
                ret,
            });
        }
        if self.stdin {
            return Some(Action::Stdin {
                func: self.func.clone(),
            });
        }
        if self.message.is_empty() {
            return None;
        }
        Some(Action::Message {
            func: self.func.clone(),
            text: self.message.join(" "),
        })
    }
}
