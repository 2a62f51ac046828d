mod adapters;
mod config;
mod core;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "coderev")]
#[command(about = "Transforms critical code-review comments into supportive, educational feedback", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long, global = true)]
    model: Option<String>,

    #[arg(
        long,
        global = true,
        help = "Groq API key (falls back to GROQ_API_KEY; without either, the deterministic mock client is used)"
    )]
    api_key: Option<String>,

    #[arg(long, global = true)]
    temperature: Option<f32>,

    #[arg(long, global = true)]
    max_tokens: Option<usize>,

    #[arg(long, global = true, default_value = "markdown")]
    output_format: OutputFormat,

    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Transform review comments for a code snippet into empathetic feedback")]
    Review {
        #[arg(long, help = "File containing the code snippet under review")]
        code: PathBuf,

        #[arg(long, help = "File with one raw review comment per line")]
        comments: PathBuf,

        #[arg(long, help = "Override language detection (e.g. python, rust)")]
        language: Option<String>,

        #[arg(
            short,
            long,
            help = "Output file path (prints to stdout if not provided)"
        )]
        output: Option<PathBuf>,
    },
    #[command(about = "Run the pipeline on the built-in sample snippet and comments")]
    Sample {
        #[arg(
            short,
            long,
            help = "Output file path (prints to stdout if not provided)"
        )]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
enum OutputFormat {
    Markdown,
    Json,
}

const SAMPLE_CODE: &str = r#"def get_active_users(users):
    results = []
    for u in users:
        if u.is_active == True and u.profile_complete == True:
            results.append(u)
    return results"#;

const SAMPLE_COMMENTS: &[&str] = &[
    "This is inefficient. Don't loop twice conceptually.",
    "Variable 'u' is a bad name.",
    "Boolean comparison '== True' is redundant.",
];

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut config = config::Config::load().unwrap_or_default();
    config.merge_with_cli(
        cli.model.clone(),
        cli.api_key.clone(),
        cli.temperature,
        cli.max_tokens,
    );

    match cli.command {
        Commands::Review {
            code,
            comments,
            language,
            output,
        } => {
            review_command(config, code, comments, language, output, cli.output_format).await?;
        }
        Commands::Sample { output } => {
            sample_command(config, output, cli.output_format).await?;
        }
    }

    Ok(())
}

async fn review_command(
    config: config::Config,
    code_path: PathBuf,
    comments_path: PathBuf,
    language: Option<String>,
    output_path: Option<PathBuf>,
    format: OutputFormat,
) -> Result<()> {
    let code = tokio::fs::read_to_string(&code_path)
        .await
        .with_context(|| format!("failed to read code snippet {}", code_path.display()))?;

    let comments = read_comments(&comments_path).await?;
    if comments.is_empty() {
        println!("No review comments found in {}", comments_path.display());
        return Ok(());
    }

    let language_hint = language.or_else(|| config.language.clone());
    let report = run_pipeline(&config, &code, &comments, language_hint.as_deref()).await;

    output_report(&report, output_path, format).await
}

async fn sample_command(
    config: config::Config,
    output_path: Option<PathBuf>,
    format: OutputFormat,
) -> Result<()> {
    info!("reviewing built-in sample data");

    let comments: Vec<String> = SAMPLE_COMMENTS.iter().map(|c| c.to_string()).collect();
    let report = run_pipeline(&config, SAMPLE_CODE, &comments, None).await;

    output_report(&report, output_path, format).await
}

async fn run_pipeline(
    config: &config::Config,
    code: &str,
    comments: &[String],
    language_hint: Option<&str>,
) -> core::Report {
    let client = adapters::llm::create_client(&config.model_config());
    let prompt_builder = core::PromptBuilder::new(config.prompt_config());
    let pipeline = core::TransformationPipeline::new(client, prompt_builder);

    pipeline.run(code, comments, language_hint).await
}

async fn read_comments(path: &PathBuf) -> Result<Vec<String>> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read comments file {}", path.display()))?;

    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

async fn output_report(
    report: &core::Report,
    output_path: Option<PathBuf>,
    format: OutputFormat,
) -> Result<()> {
    let output = match format {
        OutputFormat::Markdown => report.to_markdown(),
        OutputFormat::Json => serde_json::to_string_pretty(report)?,
    };

    if let Some(path) = output_path {
        tokio::fs::write(&path, &output)
            .await
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        info!("report written to {}", path.display());
    } else {
        println!("{}", output);
    }

    Ok(())
}
