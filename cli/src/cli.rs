use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(version, about, propagate_version = true)]
pub struct Arguments {
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generates the initial-state artifact for a `Parameters` file.
    Init {
        /// Path to a whitespace-token `Parameters` file.
        #[arg(short, long)]
        params: PathBuf,

        /// Where to write the Initial-State artifact.
        #[arg(short, long, default_value = "initial_state.bin")]
        output: PathBuf,
    },
    /// Evolves an Initial-State artifact and writes the Evolution
    /// artifact.
    Evolve {
        #[arg(short, long)]
        params: PathBuf,

        /// Initial-State artifact to evolve; defaults to generating one
        /// from `params` on the fly if omitted.
        #[arg(short, long)]
        input: Option<PathBuf>,

        #[arg(short, long, default_value = "evolution.bin")]
        output: PathBuf,
    },
}
