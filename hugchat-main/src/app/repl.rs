use anyhow::Result;
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use hugchat_chat::ChatSession;
use hugchat_llm_api::{ClientConfig, ModelQuery};
use hugchat_models::Role;

use super::{create_session, list_models, report_chat_error, LoggerSettings};

/// Models shown by `/models` when no limit is given
const REPL_MODEL_LIMIT: usize = 20;

/// One line of REPL input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Exit,
    History,
    Clear,
    Help,
    Models(Option<String>),
    Debug,
    Unknown(String),
    Empty,
    Message(String),
}

impl ReplCommand {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();

        if line.is_empty() {
            return ReplCommand::Empty;
        }
        if line == "exit" || line == "quit" {
            return ReplCommand::Exit;
        }
        if !line.starts_with('/') {
            return ReplCommand::Message(line.to_string());
        }

        let (command, rest) = match line.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (line, ""),
        };

        match command {
            "/exit" | "/quit" => ReplCommand::Exit,
            "/history" => ReplCommand::History,
            "/clear" => ReplCommand::Clear,
            "/help" => ReplCommand::Help,
            "/debug" => ReplCommand::Debug,
            "/models" => ReplCommand::Models((!rest.is_empty()).then(|| rest.to_string())),
            _ => ReplCommand::Unknown(command.to_string()),
        }
    }
}

fn print_help() {
    println!("{}", "Commands:".bright_cyan().bold());
    println!("  /history          show the conversation so far");
    println!("  /clear            forget the conversation");
    println!("  /models [search]  list models on the Hugging Face hub");
    println!("  /debug            toggle debug output");
    println!("  /help             show this help");
    println!("  /exit             quit (also: exit, quit, Ctrl-D)");
}

fn print_history(session: &ChatSession) {
    if session.history().is_empty() {
        println!("{}", "History is empty".bright_black());
        return;
    }

    for message in session.history() {
        let label = match message.role {
            Role::User => "You:".bright_green().bold(),
            Role::Assistant => "Assistant:".bright_blue().bold(),
            _ => message.role.as_str().bright_black().bold(),
        };
        println!("{} {}", label, message.content);
    }
}

/// Run interactive REPL mode
pub async fn run_repl_mode(config: ClientConfig, mut loggers: LoggerSettings) -> Result<()> {
    println!("{}", "🤗 hugchat".bright_cyan().bold());
    println!("{}", format!("Model: {}", config.model).bright_black());
    println!("{}", "Type /help for commands, 'exit' or 'quit' to exit\n".bright_black());

    let mut session = create_session(&config, &loggers)?;
    let mut rl = DefaultEditor::new()?;

    loop {
        let readline = rl.readline("> ");

        match readline {
            Ok(line) => match ReplCommand::parse(&line) {
                ReplCommand::Empty => continue,
                ReplCommand::Exit => {
                    println!("{}", "Goodbye!".bright_cyan());
                    break;
                }
                ReplCommand::Help => print_help(),
                ReplCommand::History => print_history(&session),
                ReplCommand::Clear => {
                    session.clear_history();
                    println!("{}", "🧹 History cleared".bright_green());
                }
                ReplCommand::Debug => {
                    loggers.debug = !loggers.debug;
                    session.set_logger(loggers.build());
                    let state = if loggers.debug { "on" } else { "off" };
                    println!("{} Debug output {}", "🔧".bright_cyan(), state);
                }
                ReplCommand::Models(search) => {
                    let query = ModelQuery {
                        search,
                        limit: Some(REPL_MODEL_LIMIT),
                    };
                    let logger = loggers.build();
                    if let Err(e) = list_models(&config.token, &query, logger.as_ref()).await {
                        eprintln!("{} {:#}", "Error:".bright_red().bold(), e);
                    }
                }
                ReplCommand::Unknown(command) => {
                    eprintln!(
                        "{} Unknown command '{}'. Type /help for commands.",
                        "❌".bright_red(),
                        command
                    );
                }
                ReplCommand::Message(text) => {
                    rl.add_history_entry(text.as_str())?;

                    match session.send_message(&text).await {
                        Ok(reply) => {
                            let assistant_label = "Assistant:".bright_blue().bold();
                            println!("\n{} {}\n", assistant_label, reply);
                            if loggers.debug {
                                if let Some(usage) = session.last_usage() {
                                    println!(
                                        "{}",
                                        format!(
                                            "tokens: {} prompt, {} completion, {} this session",
                                            usage.prompt_tokens,
                                            usage.completion_tokens,
                                            session.total_tokens_used()
                                        )
                                        .bright_black()
                                    );
                                }
                            }
                        }
                        Err(e) => report_chat_error(&e),
                    }
                }
            },
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                println!("{}", "Goodbye!".bright_cyan());
                break;
            }
            Err(err) => {
                eprintln!("{} {}", "Error:".bright_red().bold(), err);
                break;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::ReplCommand;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_exit_words() {
        assert_eq!(ReplCommand::parse("/exit"), ReplCommand::Exit);
        assert_eq!(ReplCommand::parse("exit"), ReplCommand::Exit);
        assert_eq!(ReplCommand::parse("  quit  "), ReplCommand::Exit);
    }

    #[test]
    fn test_simple_commands() {
        assert_eq!(ReplCommand::parse("/history"), ReplCommand::History);
        assert_eq!(ReplCommand::parse("/clear"), ReplCommand::Clear);
        assert_eq!(ReplCommand::parse("/help"), ReplCommand::Help);
        assert_eq!(ReplCommand::parse("/debug"), ReplCommand::Debug);
    }

    #[test]
    fn test_models_with_and_without_search() {
        assert_eq!(ReplCommand::parse("/models"), ReplCommand::Models(None));
        assert_eq!(
            ReplCommand::parse("/models  llama 3 "),
            ReplCommand::Models(Some("llama 3".to_string()))
        );
    }

    #[test]
    fn test_blank_line_is_empty() {
        assert_eq!(ReplCommand::parse("   "), ReplCommand::Empty);
    }

    #[test]
    fn test_unknown_slash_command() {
        assert_eq!(
            ReplCommand::parse("/save file.json"),
            ReplCommand::Unknown("/save".to_string())
        );
    }

    #[test]
    fn test_plain_text_is_message() {
        assert_eq!(
            ReplCommand::parse(" What is the capital of France? "),
            ReplCommand::Message("What is the capital of France?".to_string())
        );
    }
}
