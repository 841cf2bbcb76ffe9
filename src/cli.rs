//! Command-line interface for LocalPulse, parsed with clap.

use clap::{Parser, Subcommand};

/// LocalPulse - local business monitoring
/// Landing page, demo dashboard and waitlist API in one binary
#[derive(Parser)]
#[command(name = "localpulse")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the web server until interrupted
    #[command(alias = "daemon", alias = "-d", alias = "--daemon")]
    Serve,

    /// Create default config file
    #[command(alias = "--init")]
    Init,

    /// Insert the demo dataset into the store
    Seed,

    /// List waitlist signups
    #[command(alias = "wl")]
    Waitlist,

    /// List tracked areas
    Areas,

    /// Show version, and row counts per table
    Status,
}
