//! Purpose: `quizmaster` CLI entry point and command dispatch.
//! Role: Binary crate root; parses args, runs the pipeline, prints results.
//! Invariants: Commands emit stable stdout formats (human or JSON by flag).
//! Invariants: Errors are emitted as a JSON envelope on stderr.
//! Invariants: Process exit code is derived from `api::to_exit_code`.
#![allow(clippy::result_large_err)]

use std::io;
use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::aot::Shell;
use serde_json::{Value, json};
use tracing_subscriber::EnvFilter;

use quizmaster::api::{
    DEFAULT_BASE_URL, Error, ErrorKind, QuizClient, QuizData, to_exit_code,
};
use quizmaster::store::history::{FileHistoryStore, HistoryStore, QuizResult};

#[derive(Parser)]
#[command(name = "quizmaster", version, about = "Fetch and validate generated quizzes")]
struct Cli {
    /// Directory for flat-file user data (defaults to ~/.quizmaster).
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Request one quiz from the backend and print it.
    Fetch {
        #[arg(long)]
        topic: String,
        #[arg(long, default_value_t = 5)]
        count: i64,
        #[arg(long, default_value = "medium")]
        difficulty: String,
        #[arg(long, default_value = DEFAULT_BASE_URL)]
        base_url: String,
        /// Emit the quiz as JSON instead of the human layout.
        #[arg(long)]
        json: bool,
    },
    /// Record or list stored quiz results.
    History {
        #[command(subcommand)]
        subcommand: HistoryCommand,
    },
    /// Generate shell completions.
    Completion { shell: Shell },
}

#[derive(Subcommand)]
enum HistoryCommand {
    Record {
        #[arg(long)]
        username: String,
        #[arg(long)]
        topic: String,
        #[arg(long, default_value = "medium")]
        difficulty: String,
        #[arg(long)]
        correct: u32,
        #[arg(long)]
        total: u32,
    },
    List {
        #[arg(long)]
        username: String,
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    init_tracing();
    let cli = Cli::parse();
    let exit_code = match run(cli) {
        Ok(()) => 0,
        Err(err) => {
            emit_error(&err);
            to_exit_code(err.kind())
        }
    };
    std::process::exit(exit_code);
}

fn run(cli: Cli) -> Result<(), Error> {
    let data_dir = cli.data_dir.unwrap_or_else(default_data_dir);
    match cli.command {
        Command::Fetch {
            topic,
            count,
            difficulty,
            base_url,
            json,
        } => {
            let client = QuizClient::new(base_url)?;
            let quiz = client.request_quiz(&topic, count, &difficulty)?;
            if json {
                println!("{}", to_pretty_json(&quiz)?);
            } else {
                print_quiz(&quiz);
            }
            Ok(())
        }
        Command::History { subcommand } => {
            let store = FileHistoryStore::open(data_dir.join("history.txt"))?;
            match subcommand {
                HistoryCommand::Record {
                    username,
                    topic,
                    difficulty,
                    correct,
                    total,
                } => {
                    let score_percent = if total > 0 { correct * 100 / total } else { 0 };
                    let result = QuizResult {
                        topic,
                        difficulty,
                        correct,
                        total,
                        score_percent,
                    };
                    store.record(&username, &result)
                }
                HistoryCommand::List { username, json } => {
                    let records = store.list(&username)?;
                    if json {
                        println!("{}", to_pretty_json(&json!({ "records": records }))?);
                    } else {
                        for record in &records {
                            println!(
                                "{}  {}  [{}]  {}/{} ({}%)",
                                record.time,
                                record.topic,
                                record.difficulty,
                                record.correct,
                                record.total,
                                record.score_percent
                            );
                        }
                    }
                    Ok(())
                }
            }
        }
        Command::Completion { shell } => {
            let mut cmd = Cli::command();
            clap_complete::aot::generate(shell, &mut cmd, "quizmaster", &mut io::stdout());
            Ok(())
        }
    }
}

fn print_quiz(quiz: &QuizData) {
    let topic = if quiz.topic().is_empty() {
        "(no topic)"
    } else {
        quiz.topic()
    };
    println!(
        "{topic} [{}], {} questions",
        quiz.difficulty(),
        quiz.questions().len()
    );
    for (number, question) in quiz.questions().iter().enumerate() {
        println!("{:2}. {}", number + 1, question.prompt());
        for (index, option) in question.options().iter().enumerate() {
            let marker = if index == question.correct_index() {
                '*'
            } else {
                ' '
            };
            let letter = letter_for(index);
            println!("   {marker} {letter}) {option}");
        }
    }
}

fn letter_for(index: usize) -> char {
    if index < 26 {
        (b'a' + index as u8) as char
    } else {
        '?'
    }
}

fn to_pretty_json(value: &impl serde::Serialize) -> Result<String, Error> {
    serde_json::to_string_pretty(value).map_err(|err| {
        Error::new(ErrorKind::Internal)
            .with_message("failed to encode output json")
            .with_source(err)
    })
}

fn default_data_dir() -> PathBuf {
    let home = std::env::var_os("HOME").unwrap_or_default();
    PathBuf::from(home).join(".quizmaster")
}

fn emit_error(err: &Error) {
    let mut fields = serde_json::Map::new();
    fields.insert("kind".to_string(), Value::from(format!("{:?}", err.kind())));
    if let Some(message) = err.message() {
        fields.insert("message".to_string(), Value::from(message));
    }
    if let Some(hint) = err.hint() {
        fields.insert("hint".to_string(), Value::from(hint));
    }
    if let Some(status) = err.status() {
        fields.insert("status".to_string(), Value::from(status));
    }
    if let Some(offset) = err.offset() {
        fields.insert("offset".to_string(), Value::from(offset as u64));
    }
    eprintln!("{}", json!({ "error": Value::Object(fields) }));
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .try_init();
}
