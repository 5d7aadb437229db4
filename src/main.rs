use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use chatsum::backend::http::HttpBackend;
use chatsum::backend::window::WindowMode;
use chatsum::backend::ModelTier;
use chatsum::config::{self, ChatsumConfig};
use chatsum::ingest::archive;
use chatsum::ingest::text::TranscriptStats;
use chatsum::ingest::{self, Transcript};
use chatsum::output::{json as json_out, table};
use chatsum::session::state::FlowStatus;
use chatsum::session::{RequestConfig, Session};
use chatsum::shell;

#[derive(Parser)]
#[command(name = "chatsum", version, about = "Chat Summarizer — summarize, question and analyze chat exports")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Backend base URL (default: CHATSUM_API_BASE, then config, then http://localhost:8000)
    #[arg(long, global = true)]
    api_base: Option<String>,

    /// Path to config file (default: ~/.chatsum/config.toml)
    #[arg(long, global = true, env = "CHATSUM_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Args)]
struct InputArgs {
    /// Chat transcript: a text file or a WhatsApp export .zip
    path: Option<PathBuf>,

    /// Read the chat from stdin
    #[arg(long, conflicts_with = "path")]
    stdin: bool,
}

#[derive(Args, Default)]
struct RequestArgs {
    /// Model tier: fast or accurate
    #[arg(long)]
    model: Option<String>,

    /// Only use the last N messages
    #[arg(long, conflicts_with = "all")]
    last: Option<String>,

    /// Use the whole chat
    #[arg(long)]
    all: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarize a chat into topics, decisions and action items
    Summarize {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        request: RequestArgs,

        /// Print the backend's text without section formatting
        #[arg(long)]
        raw: bool,

        /// Also write the summary to a file
        #[arg(long, num_args = 0..=1, default_missing_value = shell::DEFAULT_SUMMARY_FILE)]
        save: Option<PathBuf>,
    },

    /// Ask a question about a chat (summarizes it first)
    Ask {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        request: RequestArgs,

        /// The question to ask
        #[arg(long, short)]
        question: String,
    },

    /// Message counts, active times, top words and emojis
    Analyze {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Pull the chat transcript out of a WhatsApp export zip
    Extract {
        /// Path to the .zip export
        zip: PathBuf,

        /// Write the transcript here instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Show transcript statistics without contacting the backend
    Inspect {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Interactive session: load, summarize, ask and analyze
    Shell {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        request: RequestArgs,
    },

    /// Manage the config file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Write a config template if none exists
    Init,
    /// Print the effective configuration
    Show,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let json_output = cli.json;

    let config_path = match cli.config {
        Some(path) => path,
        None => config::default_config_path()?,
    };

    let cfg = ChatsumConfig::load(&config_path)?;
    let base_url = config::resolve_base_url(cli.api_base.as_deref(), &cfg);

    match cli.command {
        Commands::Summarize {
            input,
            request,
            raw,
            save,
        } => {
            let mut session = new_session(&cfg, &request, &input)?;
            let backend = HttpBackend::new(&base_url)?;

            eprintln!("Summarizing ({})...", describe_request(session.config()));
            if session.run_summarize(&backend) != FlowStatus::Succeeded {
                bail!("{}", failure_message(&session));
            }
            let summary = session.summary().unwrap_or_default();

            if json_output {
                json_out::print_json(&json_out::summary_value(summary))?;
            } else if raw {
                println!("{summary}");
            } else {
                println!("{}", table::render_summary(Some(summary), false));
            }

            if let Some(path) = save {
                shell::save_summary(summary, &path)?;
                eprintln!("Saved summary to {}", path.display());
            }
        }

        Commands::Ask {
            input,
            request,
            question,
        } => {
            if question.trim().is_empty() {
                bail!("Question is empty");
            }
            let mut session = new_session(&cfg, &request, &input)?;
            let backend = HttpBackend::new(&base_url)?;

            eprintln!("Summarizing ({})...", describe_request(session.config()));
            if session.run_summarize(&backend) != FlowStatus::Succeeded {
                bail!("{}", failure_message(&session));
            }
            session.set_question(question.as_str());
            if !session.can_ask() {
                bail!("The backend returned an empty summary; nothing to ask against");
            }
            eprintln!("Asking...");
            if session.run_ask(&backend) != FlowStatus::Succeeded {
                bail!("{}", failure_message(&session));
            }

            let qa = session.qa();
            if json_output {
                json_out::print_json(&serde_json::json!({
                    "question": qa.question,
                    "answer": qa.answer.unwrap_or_default(),
                    "summary": session.summary().unwrap_or_default(),
                }))?;
            } else {
                println!("{}", table::render_answer(&qa, false));
            }
        }

        Commands::Analyze { input } => {
            let mut session = new_session(&cfg, &RequestArgs::default(), &input)?;
            let backend = HttpBackend::new(&base_url)?;

            eprintln!("Analyzing...");
            if session.run_analyze(&backend) != FlowStatus::Succeeded {
                bail!("{}", failure_message(&session));
            }

            if json_output {
                json_out::print_json(&session.analytics())?;
            } else {
                println!("{}", table::render_analytics(session.analytics(), false));
            }
        }

        Commands::Extract { zip, output } => {
            let extracted = match archive::extract_transcript_from_path(&zip) {
                Ok(extracted) => extracted,
                Err(e) => {
                    let status = e.status_message();
                    return Err(anyhow::Error::new(e).context(format!("{status} ({})", zip.display())));
                }
            };

            if json_output {
                json_out::print_json(&serde_json::json!({
                    "entry": extracted.entry_name,
                    "chars": extracted.text.chars().count(),
                    "text": extracted.text,
                }))?;
            } else if let Some(path) = output {
                std::fs::write(&path, &extracted.text)
                    .with_context(|| format!("Failed to write: {}", path.display()))?;
                eprintln!("✅ Loaded: {}", extracted.entry_name);
                eprintln!("Wrote {}", path.display());
            } else {
                eprintln!("✅ Loaded: {}", extracted.entry_name);
                print!("{}", extracted.text);
            }
        }

        Commands::Inspect { input } => {
            let transcript = load_input(&input)?;
            let stats = TranscriptStats::compute(transcript.text());
            if json_output {
                json_out::print_json(&serde_json::json!({
                    "origin": transcript.origin().describe(),
                    "stats": stats,
                }))?;
            } else {
                println!("{}", table::render_stats(&transcript, &stats));
            }
        }

        Commands::Shell { input, request } => {
            if input.stdin {
                bail!("The shell reads commands from stdin; pass a path or use the 'paste' command");
            }
            let mut session = Session::new(request_config(&cfg, &request)?);
            if input.path.is_some() {
                session.load_transcript(load_input(&input)?)?;
            }
            let backend = HttpBackend::new(&base_url)?;
            let stdin = std::io::stdin();
            let mut stdout = std::io::stdout();
            shell::run(&mut session, &backend, stdin.lock(), &mut stdout)?;
        }

        Commands::Config { action } => match action {
            ConfigAction::Show => {
                println!("# {}", config_path.display());
                println!("{}", cfg.display(&base_url));
            }
            ConfigAction::Init => {
                if config::init_config(&config_path)? {
                    println!("Created {}", config_path.display());
                } else {
                    println!("Config already exists: {}", config_path.display());
                }
            }
        },
    }

    Ok(())
}

fn load_input(input: &InputArgs) -> Result<Transcript> {
    if input.stdin {
        ingest::load_stdin()
    } else if let Some(ref path) = input.path {
        ingest::load_path(path)
    } else {
        bail!("No chat provided. Pass a text file or .zip export, or use --stdin.");
    }
}

fn new_session(cfg: &ChatsumConfig, request: &RequestArgs, input: &InputArgs) -> Result<Session> {
    let mut session = Session::new(request_config(cfg, request)?);
    let transcript = load_input(input)?;
    if transcript.is_blank() {
        bail!("The chat is empty");
    }
    session.load_transcript(transcript)?;
    Ok(session)
}

fn request_config(cfg: &ChatsumConfig, request: &RequestArgs) -> Result<RequestConfig> {
    let mut rc = cfg.request_config();
    if let Some(ref model) = request.model {
        rc.model = ModelTier::from_str(model)
            .with_context(|| format!("Unknown model: {model}. Use: fast, accurate"))?;
    }
    if let Some(ref last) = request.last {
        rc.window_mode = WindowMode::Recent;
        rc.window_input = last.clone();
    } else if request.all {
        rc.window_mode = WindowMode::All;
    }
    Ok(rc)
}

fn describe_request(rc: &RequestConfig) -> String {
    match rc.effective_window() {
        0 => format!("{}, all messages", rc.model.as_str()),
        n => format!("{}, last {n} messages", rc.model.as_str()),
    }
}

fn failure_message(session: &Session) -> String {
    session
        .status()
        .unwrap_or("Request failed.")
        .to_string()
}
