use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "vellum")]
#[command(about = "Upload resumes to the parsing service and score them against a job description", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose (debug) logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Base URL of the resume service (overrides VELLUM_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Upload resume files and render the parsed results
    Parse {
        /// Resume files (PDF, PNG, JPEG)
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Also show the formatted text of every parsed result
        #[arg(short, long)]
        formatted: bool,

        /// Write the raw results array to a JSON file
        #[arg(short, long)]
        save: Option<PathBuf>,
    },

    /// Upload resume files, then score each parsed result against a job description
    Score {
        /// Resume files (PDF, PNG, JPEG)
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Job description text
        #[arg(long, conflicts_with = "jd_file")]
        jd: Option<String>,

        /// Read the job description from a file
        #[arg(long)]
        jd_file: Option<PathBuf>,

        /// Also show the formatted text of every parsed result
        #[arg(short, long)]
        formatted: bool,

        /// Write the raw results array to a JSON file
        #[arg(short, long)]
        save: Option<PathBuf>,
    },

    /// Check that the resume service is up
    Health,
}
