use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "gitfolio")]
#[command(about = "Generate portfolio websites from GitHub profiles", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Option<Commands>,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    #[command(about = "Start an interactive chat session")]
    Chat,
    #[command(about = "Generate a portfolio for a GitHub user and exit")]
    Generate {
        #[arg(value_name = "USERNAME")]
        username: String,
        #[arg(short = 'o', long, help = "Directory to write the portfolio into")]
        output: Option<PathBuf>,
    },
}
