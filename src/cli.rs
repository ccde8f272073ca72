use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "file-console")]
#[command(about = "Upload, download and delete files on a file manager web app")]
#[command(version = "1.0")]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// File manager base URL (overrides env FILE_MANAGER_URL)
    #[arg(long, global = true)]
    pub url: Option<String>,

    /// CSRF token to send instead of reading it from the page (overrides env FILE_MANAGER_CSRF_TOKEN)
    #[arg(long, global = true)]
    pub csrf_token: Option<String>,

    /// Answer yes to every confirmation
    #[arg(short, long, global = true)]
    pub yes: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Upload a file
    Upload { file_path: String },

    /// Download a file
    Download {
        file_name: String,
        #[arg(long)]
        output: Option<String>,
    },

    /// Delete a file after confirmation
    Delete { file_name: String },
}
