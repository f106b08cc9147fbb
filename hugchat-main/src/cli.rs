use clap::Parser;
use clap_complete::Shell;
use std::path::PathBuf;

/// CLI arguments for hugchat
#[derive(Parser, Debug)]
#[command(name = "hugchat")]
#[command(about = "hugchat - chat with Hugging Face hosted models from the terminal")]
#[command(version = "0.1.0")]
pub struct Cli {
    /// Print debug information about every request and response
    #[arg(short, long)]
    pub debug: bool,

    /// Write every request and response to ~/.hugchat/logs
    #[arg(long)]
    pub log_requests: bool,

    /// Path to the YAML configuration (default: ~/.clai/huggingface.yaml)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// API token, overrides the configuration file
    #[arg(long, value_name = "TOKEN", env = "HF_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Model name, overrides the configuration file
    #[arg(long, value_name = "MODEL", env = "HUGCHAT_MODEL")]
    pub model: Option<String>,

    /// Chat completions endpoint, overrides the configuration file
    #[arg(long, value_name = "URL", env = "HUGCHAT_BASE_URL")]
    pub base_url: Option<String>,

    /// Send a single message, print the reply and exit
    #[arg(short, long, value_name = "TEXT")]
    pub message: Option<String>,

    /// List models available on the Hugging Face hub and exit
    #[arg(long)]
    pub list_models: bool,

    /// Only list models matching this term (with --list-models)
    #[arg(long, value_name = "TERM", requires = "list_models")]
    pub search: Option<String>,

    /// Maximum number of models to list (with --list-models)
    #[arg(long, value_name = "N", requires = "list_models")]
    pub limit: Option<usize>,

    /// Generate shell completions
    #[arg(long, value_enum)]
    pub generate: Option<Shell>,
}
