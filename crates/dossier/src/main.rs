use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dossier_core::CvPipeline;

#[derive(Parser)]
#[command(name = "dossier", version, about = "Structured extraction from resume text")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract a structured record from a text file and print it as JSON
    Extract {
        /// Input text file, or "-" for stdin
        file: PathBuf,
        /// Write the JSON document here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Emit single-line JSON
        #[arg(long)]
        compact: bool,
    },
    /// Show the normalized text and detected sections for a text file
    Inspect {
        /// Input text file, or "-" for stdin
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Extract {
            file,
            output,
            compact,
        } => run_extract(&file, output.as_deref(), compact),
        Commands::Inspect { file } => run_inspect(&file),
    }
}

fn run_extract(file: &Path, output: Option<&Path>, compact: bool) -> Result<()> {
    let text = read_input(file)?;
    let pipeline = CvPipeline::new()?;
    let record = pipeline.extract(&text);

    let json = if compact {
        serde_json::to_string(&record)?
    } else {
        serde_json::to_string_pretty(&record)?
    };

    match output {
        Some(path) => fs::write(path, format!("{json}\n"))
            .with_context(|| format!("writing {}", path.display()))?,
        None => println!("{json}"),
    }

    Ok(())
}

fn run_inspect(file: &Path) -> Result<()> {
    let text = read_input(file)?;
    let pipeline = CvPipeline::new()?;
    let (normalized, sections) = pipeline.inspect(&text);

    println!("normalized ({} chars)", normalized.char_len());
    println!("---");
    println!("{normalized}");
    println!("---");
    for block in sections.blocks() {
        println!("[{}] {} line(s)", block.label, block.text.lines().count());
    }

    Ok(())
}

fn read_input(file: &Path) -> Result<String> {
    if file.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("reading stdin")?;
        Ok(buf)
    } else {
        fs::read_to_string(file).with_context(|| format!("reading {}", file.display()))
    }
}
