//! untag CLI - strip conditional template tags from DOCX files

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use untag::{process_file_with_options, process_files_parallel, ProcessOptions, ProcessReport};

#[derive(Parser)]
#[command(name = "untag")]
#[command(version)]
#[command(about = "Remove conditional template tags from DOCX files", long_about = None)]
struct Cli {
    /// Input DOCX file(s)
    #[arg(value_name = "FILE", required = true)]
    inputs: Vec<PathBuf>,

    /// Output file (single input) or directory (multiple inputs)
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Label whose regions and rows are removed
    #[arg(long, value_name = "LABEL", default_value = "0", env = "UNTAG_LABEL")]
    label: String,

    /// First-page sentinel phrase
    #[arg(long, value_name = "TEXT")]
    sentinel: Option<String>,

    /// Keep the first page even when it matches the sentinel
    #[arg(long)]
    no_first_page: bool,

    /// Print a JSON processing report to stdout
    #[arg(long)]
    report: bool,

    /// Name output files processed_<timestamp>.docx
    #[arg(long)]
    timestamp: bool,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    for input in &cli.inputs {
        if !input.is_file() {
            return Err(format!("input file not found: {}", input.display()).into());
        }
        if !input
            .extension()
            .map_or(false, |ext| ext.eq_ignore_ascii_case("docx"))
        {
            return Err(format!("not a .docx file: {}", input.display()).into());
        }
    }

    let mut options = ProcessOptions::new().with_label(cli.label.as_str());
    if let Some(sentinel) = &cli.sentinel {
        options = options.with_sentinel(sentinel.as_str());
    }
    if cli.no_first_page {
        options = options.without_first_page_rule();
    }
    options.validate()?;

    if cli.inputs.len() == 1 {
        process_single(cli, &cli.inputs[0], options)
    } else {
        process_batch(cli, options)
    }
}

fn process_single(
    cli: &Cli,
    input: &Path,
    options: ProcessOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let output = match &cli.output {
        Some(path) => path.clone(),
        None => output_name(input, cli.timestamp, None),
    };

    let report = process_file_with_options(input, &output, options)?;
    print_warnings(input, &report);

    if cli.report {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{} {}", "Saved to".green(), output.display());
        print_summary(&report);
    }
    Ok(())
}

fn process_batch(cli: &Cli, options: ProcessOptions) -> Result<(), Box<dyn std::error::Error>> {
    let output_dir = cli.output.clone().unwrap_or_else(|| PathBuf::from("."));
    fs::create_dir_all(&output_dir)?;

    let jobs: Vec<(PathBuf, PathBuf)> = cli
        .inputs
        .iter()
        .enumerate()
        .map(|(idx, input)| {
            let index = if cli.timestamp { Some(idx) } else { None };
            let output = output_dir.join(
                output_name(input, cli.timestamp, index)
                    .file_name()
                    .map(PathBuf::from)
                    .unwrap_or_else(|| PathBuf::from("processed.docx")),
            );
            (input.clone(), output)
        })
        .collect();

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb.set_message(format!("Processing {} files...", jobs.len()));

    let results = process_files_parallel(&jobs, &options);
    pb.finish_and_clear();

    let mut failures = 0;
    let mut reports = Vec::new();
    for ((input, output), result) in jobs.iter().zip(results) {
        match result {
            Ok(report) => {
                print_warnings(input, &report);
                if !cli.report {
                    println!(
                        "{} {} {} {}",
                        "Processed".green(),
                        input.display(),
                        "->".dimmed(),
                        output.display()
                    );
                }
                reports.push(report);
            }
            Err(e) => {
                failures += 1;
                eprintln!("{}: {}: {}", "Error".red().bold(), input.display(), e);
            }
        }
    }

    if cli.report {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        println!(
            "\n{} {} of {} file(s) processed",
            "Done!".green().bold(),
            jobs.len() - failures,
            jobs.len()
        );
    }

    if failures > 0 {
        return Err(format!("{} file(s) failed", failures).into());
    }
    Ok(())
}

/// Default output path next to the input. With `--timestamp` the name
/// follows the processed_<YYYYmmdd_HHMMSS>.docx convention instead.
fn output_name(input: &Path, timestamp: bool, index: Option<usize>) -> PathBuf {
    let name = if timestamp {
        let stamp = Local::now().format("%Y%m%d_%H%M%S");
        match index {
            Some(idx) => format!("processed_{}_{}.docx", stamp, idx),
            None => format!("processed_{}.docx", stamp),
        }
    } else {
        let stem = input.file_stem().unwrap_or_default().to_string_lossy();
        format!("{}_processed.docx", stem)
    };
    input.with_file_name(name)
}

fn print_warnings(input: &Path, report: &ProcessReport) {
    for warning in &report.warnings {
        match warning {
            untag::PipelineWarning::UnterminatedRegion { family } => {
                eprintln!(
                    "{}: {}: unterminated {} region, removed through end of document",
                    "Warning".yellow().bold(),
                    input.display(),
                    family
                );
            }
        }
    }
}

fn print_summary(report: &ProcessReport) {
    if report.is_noop() {
        println!("  {}", "no tagged content found".dimmed());
        return;
    }
    if report.first_page_removed {
        println!("  {} first page removed", "├─".dimmed());
    }
    println!(
        "  {} {} node(s) removed, {} trimmed",
        "├─".dimmed(),
        report.nodes_removed,
        report.nodes_trimmed
    );
    println!("  {} {} row(s) filtered", "├─".dimmed(), report.rows_removed);
    println!(
        "  {} {} tag(s) stripped",
        "├─".dimmed(),
        report.tags_stripped
    );
    println!(
        "  {} {} break(s) and {} empty paragraph(s) cleaned",
        "└─".dimmed(),
        report.breaks_removed,
        report.paragraphs_purged
    );
}
