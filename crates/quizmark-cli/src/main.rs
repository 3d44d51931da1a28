//! quizmark CLI — take, score and compare competency quizzes from the terminal.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "quizmark", version, about = "Competency quiz scoring and eligibility reports")]
struct Cli {
    /// Config file path (default: ./quizmark.toml, then ~/.config/quizmark/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create starter config and example question bank
    Init,

    /// Validate question bank files
    Validate {
        /// Path to a bank file or directory (default: question_bank from config)
        #[arg(long)]
        bank: Option<PathBuf>,
    },

    /// Show one question with its options and saved answer
    Show {
        /// Question bank file
        #[arg(long)]
        bank: Option<PathBuf>,

        /// 1-based question number
        #[arg(long, default_value = "1")]
        question: usize,
    },

    /// Save an answer for a question
    Answer {
        /// Question bank file
        #[arg(long)]
        bank: Option<PathBuf>,

        /// 1-based question number
        #[arg(long)]
        question: usize,

        /// Option value to select (e.g. "B")
        #[arg(long)]
        value: String,
    },

    /// Show progress through the bank
    Status {
        /// Question bank file
        #[arg(long)]
        bank: Option<PathBuf>,

        /// Also score the answers saved so far
        #[arg(long)]
        live: bool,
    },

    /// Score the saved answers and write reports
    Score {
        /// Question bank file
        #[arg(long)]
        bank: Option<PathBuf>,

        /// Output directory (default: output_dir from config)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Output format: json, html, markdown, all (comma-separated)
        #[arg(long, default_value = "json")]
        format: String,

        /// Score even if some questions are unanswered
        #[arg(long)]
        allow_incomplete: bool,

        /// Keep the saved answers after scoring
        #[arg(long)]
        keep_answers: bool,
    },

    /// Clear all saved answers
    Reset,

    /// Compare two scored session archives
    Compare {
        /// Baseline session JSON
        #[arg(long)]
        baseline: PathBuf,

        /// Current session JSON
        #[arg(long)]
        current: PathBuf,

        /// Minimum change in percentage points to count as a regression or improvement
        #[arg(long, default_value = "5.0")]
        threshold: f64,

        /// Exit code 1 if regressions found
        #[arg(long)]
        fail_on_regression: bool,

        /// Output format: text, json, markdown
        #[arg(long, default_value = "text")]
        format: String,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("quizmark=info".parse().expect("static directive")),
        )
        .init();

    let cli = Cli::parse();
    let config = cli.config;

    let result = match cli.command {
        Commands::Init => commands::init::execute(),
        Commands::Validate { bank } => commands::validate::execute(config, bank),
        Commands::Show { bank, question } => commands::show::execute(config, bank, question),
        Commands::Answer {
            bank,
            question,
            value,
        } => commands::answer::execute(config, bank, question, value),
        Commands::Status { bank, live } => commands::status::execute(config, bank, live),
        Commands::Score {
            bank,
            output,
            format,
            allow_incomplete,
            keep_answers,
        } => commands::score::execute(
            config,
            bank,
            output,
            format,
            allow_incomplete,
            keep_answers,
        ),
        Commands::Reset => commands::reset::execute(config),
        Commands::Compare {
            baseline,
            current,
            threshold,
            fail_on_regression,
            format,
        } => commands::compare::execute(baseline, current, threshold, fail_on_regression, format),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
