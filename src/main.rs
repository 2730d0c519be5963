//! CLI entry point for `emlmsg`.

use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::{CommandFactory, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};

use emlmsg::config::Config;
use emlmsg::container::{writer::output_path_for, MsgmWriter};
use emlmsg::export::{attachment, summary};

#[derive(Parser)]
#[command(
    name = "emlmsg",
    version,
    about = "Convert MIME (.eml) messages into message containers"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose logging (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert one or more .eml files
    Convert {
        #[arg(required = true, value_name = "FILES")]
        inputs: Vec<PathBuf>,
        /// Output directory (defaults to next to each input)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Overwrite existing output files
        #[arg(short, long)]
        force: bool,
    },
    /// Show what a message converts to
    Inspect {
        path: PathBuf,
        #[arg(long)]
        json: bool,
    },
    /// Convert a message and write its attachments to a directory
    Extract {
        path: PathBuf,
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Convert a message container back to .eml (not available)
    ToEml { input: PathBuf, output: PathBuf },
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
    /// Generate a man page
    Manpage,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = emlmsg::config::load_config();

    // Configure logging: stderr + optional log file
    let log_level = match cli.verbose {
        0 => config.general.log_level.as_str(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    setup_logging(log_level, &config);

    match cli.command {
        Commands::Convert {
            inputs,
            output,
            force,
        } => cmd_convert(&inputs, output.as_deref(), force, &config),
        Commands::Inspect { path, json } => cmd_inspect(&path, json),
        Commands::Extract { path, output } => cmd_extract(&path, &output),
        Commands::ToEml { input, output } => {
            emlmsg::convert_msg_to_eml(&input, &output)?;
            Ok(())
        }
        Commands::Completions { shell } => cmd_completions(shell),
        Commands::Manpage => cmd_manpage(),
    }
}

/// Set up tracing with stderr output and optional file logging.
fn setup_logging(level: &str, config: &Config) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    let stderr_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    let log_dir = emlmsg::config::log_dir(config);
    if std::fs::create_dir_all(&log_dir).is_ok() {
        let file_appender = tracing_appender::rolling::never(&log_dir, "emlmsg.log");
        let file_layer = tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_writer(file_appender);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(stderr_layer)
            .with(file_layer)
            .init();
        tracing::debug!(
            path = %emlmsg::config::log_file_path(config).display(),
            "File logging enabled"
        );
    } else {
        // Fall back to stderr only
        tracing_subscriber::registry()
            .with(env_filter)
            .with(stderr_layer)
            .init();
    }
}

/// Generate shell completions and print to stdout.
fn cmd_completions(shell: clap_complete::Shell) -> anyhow::Result<()> {
    let mut cmd = Cli::command();
    clap_complete::generate(shell, &mut cmd, "emlmsg", &mut std::io::stdout());
    Ok(())
}

/// Generate a man page and print to stdout.
fn cmd_manpage() -> anyhow::Result<()> {
    let cmd = Cli::command();
    let man = clap_mangen::Man::new(cmd);
    let mut buf = Vec::new();
    man.render(&mut buf)?;
    std::io::Write::write_all(&mut std::io::stdout(), &buf)?;
    Ok(())
}

/// Convert every input; stops at the first failure.
fn cmd_convert(
    inputs: &[PathBuf],
    output: Option<&Path>,
    force: bool,
    config: &Config,
) -> anyhow::Result<()> {
    let output_dir = output.or(config.output.output_dir.as_deref());
    if let Some(dir) = output_dir {
        std::fs::create_dir_all(dir)?;
    }
    let writer = MsgmWriter::new(force || config.output.overwrite);

    let pb = ProgressBar::new(inputs.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} Converting [{bar:40.cyan/blue}] {pos}/{len}")
            .expect("valid template")
            .progress_chars("#>-"),
    );
    if inputs.len() < 2 {
        pb.set_draw_target(indicatif::ProgressDrawTarget::hidden());
    }

    let start = Instant::now();
    let mut written = Vec::with_capacity(inputs.len());
    for input in inputs {
        let out_path = output_path_for(input, output_dir, &config.output.extension);
        emlmsg::convert_eml_to_msg(input, &out_path, &writer)
            .map_err(|e| anyhow::anyhow!("{}: {e}", input.display()))?;
        written.push(out_path);
        pb.inc(1);
    }
    pb.finish_and_clear();

    for path in &written {
        println!("  {}", path.display());
    }
    println!(
        "  Converted {} message(s) in {:.2?}",
        written.len(),
        start.elapsed()
    );
    Ok(())
}

/// Convert a message and print the resulting model.
fn cmd_inspect(path: &Path, json: bool) -> anyhow::Result<()> {
    let model = emlmsg::convert_eml_to_model(path)?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if json {
        summary::write_json(&model, &mut out)
    } else {
        summary::write_table(&model, &mut out)
    }
}

/// Convert a message and write all of its attachments.
fn cmd_extract(path: &Path, output: &Path) -> anyhow::Result<()> {
    let model = emlmsg::convert_eml_to_model(path)?;
    if model.attachments.is_empty() {
        println!("  No attachments found.");
        return Ok(());
    }

    let paths = attachment::export_all_attachments(&model, output)?;
    println!(
        "  Extracted {} attachment(s) to {}",
        paths.len(),
        output.display()
    );
    Ok(())
}
