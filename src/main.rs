use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::io::{self, BufRead, Read, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use voicemark::config::DEFAULT_CONFIG_PATH;
use voicemark::grammar::print_help;
use voicemark::{
    Config, DictationSession, EditorAdapter, Locale, ParseContext, SessionOutcome, TextBuffer,
    parse_mixed_dictation_to_ops, parse_transcript,
};

#[derive(Parser)]
#[command(name = "voicemark")]
#[command(about = "Compile dictation with spoken commands into document edits")]
struct Cli {
    /// Config file (TOML)
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Grammar locale: "default" or "alt"
    #[arg(long, global = true, value_parser = parse_locale)]
    locale: Option<Locale>,

    /// Trigger phrase; repeat to set several (replaces configured ones)
    #[arg(long = "prefix", global = true)]
    prefixes: Vec<String>,

    /// Log compiler decisions to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compile one utterance and print the result as JSON
    Compile {
        /// The finalized utterance
        text: String,
    },
    /// Compile a multi-sentence transcript (file or stdin) to JSON operations
    Transcript {
        /// Transcript file; reads stdin when omitted
        file: Option<PathBuf>,
    },
    /// Dictate line by line into a plain-text document
    Dictate,
    /// Print the voice command reference
    Commands,
}

fn parse_locale(s: &str) -> Result<Locale, String> {
    Locale::from_str(s).ok_or_else(|| format!("unknown locale '{}' (expected default or alt)", s))
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load(&cli.config);
    let mut ctx = config.parse_context();
    if !cli.prefixes.is_empty() {
        ctx = ParseContext::new(ctx.locale(), &cli.prefixes);
    }
    if let Some(locale) = cli.locale {
        ctx = ctx.with_locale(locale);
    }

    match cli.command {
        Command::Compile { text } => {
            let result = parse_mixed_dictation_to_ops(&text, &ctx);
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Command::Transcript { file } => {
            let text = match file {
                Some(path) => fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read {}", path.display()))?,
                None => {
                    let mut buf = String::new();
                    io::stdin()
                        .read_to_string(&mut buf)
                        .context("Failed to read transcript from stdin")?;
                    buf
                }
            };
            let ops = parse_transcript(&text, &ctx);
            println!("{}", serde_json::to_string_pretty(&ops)?);
        }
        Command::Dictate => run_dictate(ctx, config.editor.history_size)?,
        Command::Commands => print_help(&ctx),
    }

    Ok(())
}

fn run_dictate(ctx: ParseContext, history_size: usize) -> Result<()> {
    let trigger = ctx.prefixes().first().cloned().unwrap_or_default();
    let mut session = DictationSession::new(TextBuffer::new(history_size), ctx);

    eprintln!(
        "Dictate one utterance per line, e.g. \"hello {} comma world\" (Ctrl+D to finish)\n",
        trigger
    );

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    while let Some(line) = lines.next() {
        let line = line.context("Failed to read stdin")?;
        if line.trim().is_empty() {
            continue;
        }

        if let SessionOutcome::AwaitingConfirmation { prompt } = session.process_utterance(&line)? {
            let approved = ask_confirmation(&prompt, &mut lines, &mut io::stderr())?;
            session.resolve_confirmation(approved)?;
        }

        println!("{}", session.editor().text());
        println!("---");
    }

    Ok(())
}

/// Show `prompt` and read a yes/no answer from the next input line
fn ask_confirmation<I, W>(prompt: &str, lines: &mut I, out: &mut W) -> Result<bool>
where
    I: Iterator<Item = io::Result<String>>,
    W: Write,
{
    write!(out, "{} [y/N] ", prompt).context("Failed to write prompt")?;
    out.flush().context("Failed to flush prompt")?;

    let answer = lines
        .next()
        .transpose()
        .context("Failed to read confirmation")?
        .unwrap_or_default();
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}
