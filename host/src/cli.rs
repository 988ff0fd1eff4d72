//! Command-line interface definitions for the host binary.

use clap::{Parser, Subcommand, ValueEnum};

/// Top-level command-line interface definition.
#[derive(Debug, Parser)]
#[command(name = env!("CARGO_PKG_NAME"))]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = env!("CARGO_PKG_DESCRIPTION"))]
pub struct Cli {
    /// Path to a TOML configuration file. Built-in defaults are used when omitted.
    #[arg(short, long, global = true, env = "RANDOMKEY_CONFIG")]
    pub config: Option<String>,

    /// Output format of the diagnostic log on stderr.
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Single line per event.
    #[default]
    Compact,
    /// Newline-delimited JSON.
    Json,
    /// Multi-line, human-friendly.
    Pretty,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Resolve property names against the source chain and print `NAME=VALUE` lines.
    Lookup {
        /// Property names, e.g. `randomKey.key[32]`.
        #[arg(required = true)]
        names: Vec<String>,
    },

    /// Replace `${...}` placeholders in a template and print the result.
    Resolve {
        template: String,
    },

    /// List the registered property sources in lookup order.
    Sources,

    /// Serve the resolved demo values over HTTP at `GET /test`.
    DemoService {
        /// Optional override for the listen port (overrides `demo.port` in config)
        #[arg(long)]
        port: Option<u16>,
        /// Optional override for the bind address (overrides `demo.bind` in config)
        #[arg(long)]
        bind: Option<String>,
    },
}
