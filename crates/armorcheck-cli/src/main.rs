//! CLI entry point for armorcheck.
//!
//! This module is intentionally thin: it handles argument parsing, I/O, and exit codes.
//! All business logic lives in the `armorcheck-app` crate.

mod logging;

use anyhow::Context;
use armorcheck_app::{
    ExplainOutput, SchemaKind, VerifyInput, describer_for, format_explanation, format_not_found,
    parse_report_json, render_annotations, render_markdown, render_text, run_explain, run_schema,
    run_verify, runtime_error_report, serialize_report, to_renderable, verdict_exit_code,
};
use armorcheck_gcloud::Outputs;
use armorcheck_settings::Overrides;
use armorcheck_types::ArmorcheckReport;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand, ValueEnum};
use logging::LogFormat;
use tracing::error;

#[derive(Parser, Debug)]
#[command(
    name = "armorcheck",
    version,
    about = "Verify provisioned Cloud Armor security policies against a declarative suite"
)]
struct Cli {
    /// Override profile (strict|warn|audit).
    #[arg(long, global = true)]
    profile: Option<String>,

    /// Override maximum findings to emit.
    #[arg(long, global = true)]
    max_findings: Option<u32>,

    /// Log filter when RUST_LOG is unset (e.g. `debug`, `armorcheck_gcloud=debug`).
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Describe the policy and its rules and compare them with a suite.
    Verify {
        /// Suite file (TOML).
        #[arg(long)]
        suite: Utf8PathBuf,

        /// Provisioning outputs (`terraform output -json` or a flat JSON map).
        #[arg(long)]
        outputs: Option<Utf8PathBuf>,

        /// Set or override a provisioning output (`name=value`, repeatable).
        #[arg(long = "output", value_name = "NAME=VALUE")]
        output_overrides: Vec<String>,

        /// Read recorded describe output from this directory instead of running gcloud.
        #[arg(long)]
        fixtures: Option<Utf8PathBuf>,

        /// Where to write the JSON report.
        #[arg(long, default_value = "artifacts/armorcheck/report.json")]
        report_out: Utf8PathBuf,

        /// Write a Markdown report alongside the JSON.
        #[arg(long)]
        write_markdown: bool,

        /// Where to write the Markdown report (if enabled).
        #[arg(long, default_value = "artifacts/armorcheck/comment.md")]
        markdown_out: Utf8PathBuf,
    },

    /// Render markdown from an existing JSON report.
    Md {
        #[arg(long, default_value = "artifacts/armorcheck/report.json")]
        report: Utf8PathBuf,

        /// Where to write the Markdown output (if not specified, prints to stdout).
        #[arg(long, short)]
        output: Option<Utf8PathBuf>,
    },

    /// Render GitHub Actions annotations from an existing JSON report.
    Annotations {
        #[arg(long, default_value = "artifacts/armorcheck/report.json")]
        report: Utf8PathBuf,

        /// Maximum number of annotations to emit.
        #[arg(long, default_value = "10")]
        max: usize,
    },

    /// Print an existing JSON report as one line per failed assertion.
    Text {
        #[arg(long, default_value = "artifacts/armorcheck/report.json")]
        report: Utf8PathBuf,
    },

    /// Explain a check_id or code with remediation guidance.
    Explain {
        /// The check_id (e.g. "rule.match") or code (e.g. "ip_range_mismatch") to explain.
        identifier: String,
    },

    /// Print the JSON schema of the report or suite format.
    Schema {
        #[arg(value_enum)]
        kind: SchemaArg,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SchemaArg {
    Report,
    Suite,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_logging(&cli.log_level, cli.log_format);

    match &cli.cmd {
        Commands::Verify {
            suite,
            outputs,
            output_overrides,
            fixtures,
            report_out,
            write_markdown,
            markdown_out,
        } => cmd_verify(
            &cli,
            VerifyArgs {
                suite,
                outputs: outputs.as_deref(),
                output_overrides,
                fixtures: fixtures.as_deref(),
                report_out,
                markdown_out: write_markdown.then_some(markdown_out.as_path()),
            },
        ),
        Commands::Md { report, output } => cmd_md(report, output.as_deref()),
        Commands::Annotations { report, max } => cmd_annotations(report, *max),
        Commands::Text { report } => cmd_text(report),
        Commands::Explain { identifier } => cmd_explain(identifier),
        Commands::Schema { kind } => {
            let kind = match kind {
                SchemaArg::Report => SchemaKind::Report,
                SchemaArg::Suite => SchemaKind::Suite,
            };
            println!("{}", run_schema(kind)?);
            Ok(())
        }
    }
}

struct VerifyArgs<'a> {
    suite: &'a Utf8Path,
    outputs: Option<&'a Utf8Path>,
    output_overrides: &'a [String],
    fixtures: Option<&'a Utf8Path>,
    report_out: &'a Utf8Path,
    markdown_out: Option<&'a Utf8Path>,
}

fn cmd_verify(cli: &Cli, args: VerifyArgs<'_>) -> anyhow::Result<()> {
    let result = (|| -> anyhow::Result<i32> {
        let suite_text = std::fs::read_to_string(args.suite)
            .with_context(|| format!("read suite: {}", args.suite))?;

        let mut outputs = match args.outputs {
            Some(path) => Outputs::load(path)?,
            None => Outputs::new(),
        };
        outputs.apply_overrides(args.output_overrides)?;

        let describe = describer_for(args.fixtures);
        let output = run_verify(VerifyInput {
            suite_text: &suite_text,
            outputs: &outputs,
            describe: describe.as_ref(),
            overrides: Overrides {
                profile: cli.profile.clone(),
                max_findings: cli.max_findings,
            },
        })?;

        write_report_file(args.report_out, &output.report).context("write report json")?;

        let renderable = to_renderable(&output.report);
        if let Some(md_path) = args.markdown_out {
            write_text_file(md_path, &render_markdown(&renderable)).context("write markdown")?;
        }
        print!("{}", render_text(&renderable));

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
            let profile = runtime_profile(cli, args.suite);
            let report = runtime_error_report(&profile, &format!("{err:#}"));
            if let Err(write_err) = write_report_file(args.report_out, &report) {
                error!("could not write runtime error report: {write_err:#}");
            }
            eprintln!("armorcheck error: {err:#}");
            std::process::exit(1);
        }
    }
}

/// Profile label for a runtime error report: the CLI override, else the suite's own.
fn runtime_profile(cli: &Cli, suite: &Utf8Path) -> String {
    cli.profile
        .clone()
        .or_else(|| {
            let text = std::fs::read_to_string(suite).ok()?;
            armorcheck_settings::parse_suite_toml(&text).ok()?.profile
        })
        .unwrap_or_else(|| "strict".to_string())
}

fn write_report_file(path: &Utf8Path, report: &ArmorcheckReport) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).with_context(|| format!("create directory: {}", parent))?;
    }
    let data = serialize_report(report)?;
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

fn read_report(path: &Utf8Path) -> anyhow::Result<ArmorcheckReport> {
    let text = std::fs::read_to_string(path).with_context(|| format!("read report: {}", path))?;
    parse_report_json(&text)
}

fn cmd_md(report_path: &Utf8Path, output: Option<&Utf8Path>) -> anyhow::Result<()> {
    let renderable = to_renderable(&read_report(report_path)?);
    let md = render_markdown(&renderable);

    match output {
        Some(out_path) => write_text_file(out_path, &md).context("write markdown output")?,
        None => print!("{}", md),
    }
    Ok(())
}

fn cmd_annotations(report_path: &Utf8Path, max: usize) -> anyhow::Result<()> {
    let renderable = to_renderable(&read_report(report_path)?);
    for annotation in render_annotations(&renderable, max) {
        println!("{}", annotation);
    }
    Ok(())
}

fn cmd_text(report_path: &Utf8Path) -> anyhow::Result<()> {
    let renderable = to_renderable(&read_report(report_path)?);
    print!("{}", render_text(&renderable));
    Ok(())
}

fn cmd_explain(identifier: &str) -> anyhow::Result<()> {
    match run_explain(identifier) {
        ExplainOutput::Found {
            identifier,
            kind,
            explanation,
        } => {
            print!("{}", format_explanation(&identifier, kind, &explanation));
            Ok(())
        }
        ExplainOutput::NotFound {
            identifier,
            suggestions,
            available_check_ids,
            available_codes,
        } => {
            eprint!(
                "{}",
                format_not_found(&identifier, &suggestions, available_check_ids, available_codes)
            );
            std::process::exit(1);
        }
    }
}
