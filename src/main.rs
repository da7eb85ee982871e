//! Generate a command reference from a shell tool's sources.
//!
//! Reads the tool's main script for the command listing and aliases, analyzes
//! every `<tool>-<command>.sh` implementation file for usage text, options and
//! subcommands, and writes one page per command plus a categorized index:
//!
//! `cmdref -t mulle-sde -o dox/reference.generated src`

mod assemble;
mod error;
mod model;
mod parser;
mod render;
mod source;
mod taxonomy;

use anyhow::{Context, Result};
use clap::Parser;
use model::CommandFileAnalysis;
use rayon::prelude::*;
use source::{Layout, OutputDir};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use taxonomy::Taxonomy;
use tracing::{debug, info};

#[derive(Parser)]
#[command(
    name = "cmdref",
    about = "Generate command reference documentation from shell tool sources"
)]
struct Cli {
    /// Directory holding the `<tool>-<command>.sh` files
    #[arg(default_value = "src")]
    source: PathBuf,

    /// Tool name; command files are `<tool>-*.sh`
    #[arg(short = 't', long, default_value = "mulle-sde")]
    tool: String,

    /// Main script with the command listing (default: `<source>/../<tool>`)
    #[arg(short = 'm', long)]
    main_script: Option<PathBuf>,

    /// Output directory
    #[arg(short = 'o', long, default_value = "dox/reference.generated")]
    output: PathBuf,

    /// Output format: markdown (default), json
    #[arg(short = 'f', long, default_value = "markdown")]
    format: String,

    /// JSON category table replacing the built-in one
    #[arg(short = 'c', long)]
    categories: Option<PathBuf>,

    /// Template prepended to every command page. Supports ${name} substitution.
    #[arg(short = 'p', long)]
    prefix: Option<PathBuf>,

    /// Worker threads for file analysis (0 = one per core)
    #[arg(short = 'j', long, default_value_t = 0)]
    jobs: usize,

    /// Log level when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level)),
        )
        .init();

    run(&cli)
}

fn run(cli: &Cli) -> Result<()> {
    let layout = Layout::new(
        &cli.tool,
        cli.source.clone(),
        cli.main_script.clone(),
        cli.output.clone(),
    );
    layout.check()?;

    // Fail on configuration problems before touching the output directory
    let renderer = render::create_renderer(&cli.format, &layout.tool)?;
    let taxonomy = match cli.categories {
        Some(ref path) => Taxonomy::from_file(path)?,
        None => Taxonomy::builtin(),
    };
    let prefix = cli
        .prefix
        .as_deref()
        .map(read_prefix)
        .transpose()?;

    info!(
        main_script = %layout.main_script.display(),
        source = %layout.source_dir.display(),
        "generating reference"
    );

    let catalog = source::read_main_script(&layout.main_script)
        .map(|text| parser::catalog::extract(&text))
        .unwrap_or_default();
    let analyses = analyze_files(&layout, cli.jobs)?;
    let documents = assemble::assemble(catalog, analyses);

    let out = OutputDir::create(&layout.output_dir)?;
    let ext = renderer.file_extension();

    for doc in &documents {
        let mut page = String::new();
        if let Some(ref tpl) = prefix {
            page.push_str(&tpl.replace("${name}", doc.name()));
            page.push('\n');
        }
        page.push_str(&renderer.render_page(doc)?);

        let path = out.write(&format!("{}.{}", doc.name(), ext), &page)?;
        info!(path = %path.display(), "generated page");
    }

    let index = renderer.render_index(&documents, &taxonomy)?;
    let path = out.write(&format!("index.{}", ext), &index)?;
    info!(path = %path.display(), "generated index");

    info!(
        pages = documents.len(),
        output = %layout.output_dir.display(),
        "documentation complete"
    );
    Ok(())
}

/// Analyze every command file in parallel, keyed by derived command name.
///
/// Unreadable files are skipped. The map is ordered, so results do not depend
/// on scheduling.
fn analyze_files(layout: &Layout, jobs: usize) -> Result<BTreeMap<String, CommandFileAnalysis>> {
    let files = layout.command_files()?;
    debug!(count = files.len(), "discovered command files");

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(jobs)
        .build()
        .context("failed to build analysis thread pool")?;

    let results: Vec<(String, CommandFileAnalysis)> = pool.install(|| {
        files
            .par_iter()
            .filter_map(|path| {
                let name = layout.command_name(path)?;
                debug!(file = %path.display(), "analyzing");
                let text = source::read_command_file(path)?;
                let analysis = parser::analyze::analyze(&text, &name);
                Some((name, analysis))
            })
            .collect()
    });

    Ok(results.into_iter().collect())
}

/// Read a page prefix template.
fn read_prefix(path: &Path) -> Result<String> {
    fs::read_to_string(path)
        .with_context(|| format!("failed to read prefix file: {}", path.display()))
}
