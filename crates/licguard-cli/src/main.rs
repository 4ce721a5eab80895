//! CLI entry point for licguard.
//!
//! This module is intentionally thin: it handles argument parsing, logging setup, I/O, and exit
//! codes. All business logic lives in the `licguard-app` crate.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand, ValueEnum};
use licguard_app::{
    Session, SessionInput, TreeFormat, format_rows, markdown_from_json, open_session,
    report_markdown, run_allow, run_check, run_expand, run_tree, runtime_error_report,
    serialize_report, verdict_exit_code,
};
use licguard_settings::Overrides;
use licguard_types::LicguardReport;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "licguard",
    version,
    about = "License compatibility resolver for binary dependency graphs"
)]
struct Cli {
    /// Path to licguard config TOML (missing file means defaults).
    #[arg(short = 'c', long, default_value = "licguard.toml", global = true)]
    config: Utf8PathBuf,

    /// Directory holding the facts database (`facts.json`).
    #[arg(short = 'd', long, global = true)]
    database_dir: Option<Utf8PathBuf>,

    /// Extra `LIBRARY,APPLICABLE` signoff file (repeatable).
    #[arg(long = "signoff-file", global = true)]
    signoff_files: Vec<Utf8PathBuf>,

    /// Extra `LICENSE,COMPAT_LICENSE` override file (repeatable).
    #[arg(long = "license-compat-file", global = true)]
    license_compat_files: Vec<Utf8PathBuf>,

    /// Override profile (strict|warn|quick).
    #[arg(long, global = true)]
    profile: Option<String>,

    /// Override maximum findings to emit.
    #[arg(long, global = true)]
    max_findings: Option<u32>,

    /// Override maximum walk depth.
    #[arg(long, global = true)]
    max_depth: Option<u32>,

    /// Only log errors.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// More logging (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Trace-level logging for licguard itself.
    #[arg(long, global = true)]
    trace: bool,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Evaluate every root and write the JSON report.
    Check {
        /// Where to write the JSON report.
        #[arg(long, default_value = "artifacts/licguard/report.json")]
        report_out: Utf8PathBuf,

        /// Write a Markdown report alongside the JSON.
        #[arg(long)]
        write_markdown: bool,

        /// Where to write the Markdown report (if enabled).
        #[arg(long, default_value = "artifacts/licguard/comment.md")]
        markdown_out: Utf8PathBuf,
    },

    /// Render the full dependency walk of one artifact.
    Tree {
        /// Artifact basename, full path, or numeric id.
        artifact: String,

        #[arg(long, value_enum, default_value = "text")]
        format: FormatArg,

        /// Where to write the tree (if not specified, prints to stdout).
        #[arg(long, short)]
        output: Option<Utf8PathBuf>,
    },

    /// List roots, or the direct dependencies of one artifact.
    Expand {
        /// Artifact basename, full path, or numeric id.
        artifact: Option<String>,

        /// List every artifact as a root, not only those with dependencies.
        #[arg(long)]
        all: bool,
    },

    /// Allow COMPAT_LICENSE beneath LICENSE and save the override table.
    Allow {
        license: String,
        compat_license: String,

        /// Where to save the override table.
        #[arg(long, default_value = "OUTFILE.csv")]
        out: Utf8PathBuf,
    },

    /// Render markdown from an existing JSON report.
    Md {
        /// Path to the JSON report file.
        #[arg(long, default_value = "artifacts/licguard/report.json")]
        report: Utf8PathBuf,

        /// Where to write the Markdown output (if not specified, prints to stdout).
        #[arg(long, short)]
        output: Option<Utf8PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormatArg {
    Text,
    Html,
}

impl From<FormatArg> for TreeFormat {
    fn from(f: FormatArg) -> Self {
        match f {
            FormatArg::Text => TreeFormat::Text,
            FormatArg::Html => TreeFormat::Html,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli);

    match &cli.cmd {
        Commands::Check {
            report_out,
            write_markdown,
            markdown_out,
        } => cmd_check(&cli, report_out, *write_markdown, markdown_out),
        Commands::Tree {
            artifact,
            format,
            output,
        } => cmd_tree(&cli, artifact, (*format).into(), output.as_deref()),
        Commands::Expand { artifact, all } => cmd_expand(&cli, artifact.as_deref(), *all),
        Commands::Allow {
            license,
            compat_license,
            out,
        } => cmd_allow(&cli, license, compat_license, out),
        Commands::Md { report, output } => cmd_md(report, output.as_deref()),
    }
}

/// Install a stderr subscriber; `LICGUARD_LOG` wins over the verbosity flags.
fn init_tracing(cli: &Cli) {
    let filter = EnvFilter::try_from_env("LICGUARD_LOG").unwrap_or_else(|_| {
        let level = if cli.quiet {
            "error"
        } else {
            match cli.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        };
        if cli.trace {
            EnvFilter::new(format!("{level},licguard=trace"))
        } else {
            EnvFilter::new(level)
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}

fn overrides(cli: &Cli) -> Overrides {
    Overrides {
        profile: cli.profile.clone(),
        max_findings: cli.max_findings,
        max_depth: cli.max_depth,
    }
}

fn read_config(cli: &Cli) -> String {
    match std::fs::read_to_string(&cli.config) {
        Ok(text) => text,
        Err(_) => {
            tracing::debug!(path = %cli.config, "no config file; using defaults");
            String::new()
        }
    }
}

fn database_dir(cli: &Cli) -> anyhow::Result<&Utf8Path> {
    cli.database_dir
        .as_deref()
        .context("--database-dir is required for this command")
}

fn session_input<'a>(cli: &'a Cli, config_text: &'a str) -> anyhow::Result<SessionInput<'a>> {
    Ok(SessionInput {
        database_dir: database_dir(cli)?,
        config_text,
        config_dir: cli.config.parent(),
        overrides: overrides(cli),
        signoff_files: cli.signoff_files.clone(),
        license_compat_files: cli.license_compat_files.clone(),
    })
}

fn open(cli: &Cli) -> anyhow::Result<Session> {
    let config_text = read_config(cli);
    open_session(session_input(cli, &config_text)?)
}

fn cmd_check(
    cli: &Cli,
    report_out: &Utf8Path,
    write_markdown: bool,
    markdown_out: &Utf8Path,
) -> anyhow::Result<()> {
    let result = (|| -> anyhow::Result<i32> {
        let config_text = read_config(cli);
        let output = run_check(session_input(cli, &config_text)?)?;

        write_report_file(report_out, &output.report).context("write report json")?;
        if write_markdown {
            let md = report_markdown(&output.report);
            write_text_file(markdown_out, &md).context("write markdown")?;
        }

        Ok(verdict_exit_code(output.report.verdict))
    })();

    match result {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
            Ok(())
        }
        Err(err) => {
            let report = runtime_error_report(&format!("{err:#}"));
            if let Err(write_err) = write_report_file(report_out, &report) {
                tracing::warn!(error = %write_err, "could not write runtime error report");
            }
            eprintln!("licguard error: {err:#}");
            std::process::exit(1);
        }
    }
}

fn cmd_tree(
    cli: &Cli,
    artifact: &str,
    format: TreeFormat,
    output: Option<&Utf8Path>,
) -> anyhow::Result<()> {
    let session = open(cli)?;
    let text = run_tree(&session, artifact, format)?;
    match output {
        Some(path) => write_text_file(path, &text).context("write tree")?,
        None => print!("{text}"),
    }
    Ok(())
}

fn cmd_expand(cli: &Cli, artifact: Option<&str>, all: bool) -> anyhow::Result<()> {
    let session = open(cli)?;
    let rows = run_expand(&session, artifact, all)?;
    print!("{}", format_rows(&rows));
    Ok(())
}

fn cmd_allow(
    cli: &Cli,
    license: &str,
    compat_license: &str,
    out: &Utf8Path,
) -> anyhow::Result<()> {
    let session = open(cli)?;
    let outcome = run_allow(&session, license, compat_license, out)?;
    if outcome.added {
        println!("allowed {compat_license} beneath {license}");
    } else {
        println!("{compat_license} was already allowed beneath {license}");
    }
    println!("wrote {} pairs to {out}", outcome.pairs);
    Ok(())
}

fn cmd_md(report_path: &Utf8Path, output: Option<&Utf8Path>) -> anyhow::Result<()> {
    let report_text = std::fs::read_to_string(report_path)
        .with_context(|| format!("read report: {}", report_path))?;
    let md = markdown_from_json(&report_text)?;

    if let Some(out_path) = output {
        write_text_file(out_path, &md).context("write markdown output")?;
    } else {
        print!("{}", md);
    }

    Ok(())
}

fn write_report_file(path: &Utf8Path, report: &LicguardReport) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).with_context(|| format!("create directory: {}", parent))?;
    }
    let data = serialize_report(report).context("serialize report")?;
    std::fs::write(path, data).with_context(|| format!("write report: {}", path))?;
    Ok(())
}

fn write_text_file(path: &Utf8Path, text: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).with_context(|| format!("create directory: {}", parent))?;
    }
    std::fs::write(path, text).with_context(|| format!("write text: {}", path))?;
    Ok(())
}
