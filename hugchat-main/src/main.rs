use anyhow::Result;
use clap::{CommandFactory, Parser};
use std::io;

use hugchat_llm_api::ModelQuery;

mod app;
mod cli;
mod config;

use app::{run_one_shot, run_repl_mode, LoggerSettings};
use cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file if it exists
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    if let Some(shell) = cli.generate {
        clap_complete::generate(shell, &mut Cli::command(), "hugchat", &mut io::stdout());
        return Ok(());
    }

    let client_config = config::resolve_config(&cli)?;
    let loggers = LoggerSettings::new(cli.debug, cli.log_requests)?;

    if cli.list_models {
        let query = ModelQuery {
            search: cli.search.clone(),
            limit: cli.limit,
        };
        return app::list_models(&client_config.token, &query, loggers.build().as_ref()).await;
    }

    config::ensure_chat_ready(&client_config)?;

    if let Some(text) = cli.message.as_deref() {
        return run_one_shot(&client_config, &loggers, text).await;
    }

    run_repl_mode(client_config, loggers).await
}
