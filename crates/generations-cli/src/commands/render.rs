//! Render command
//!
//! Usage: generations render <CONFIG> [--output <FILE>] [--anonymize]

use clap::Args;
use std::path::PathBuf;

use generations_core::ops::DEFAULT_CUTOFF_YEAR;
use generations_core::render::render_tree;
use generations_store::config::load_render_config;
use generations_store::themes::DEFAULT_THEME_DIR;
use generations_store::{load_databases, FileTemplates};

#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Render configuration file
    pub config: PathBuf,

    /// Output file path (default: the configured output file, else stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Anonymize recent persons before rendering
    #[arg(long)]
    pub anonymize: bool,

    /// Persons born in or after this year count as recent
    #[arg(long, default_value_t = DEFAULT_CUTOFF_YEAR)]
    pub cutoff: i32,

    /// Directory with template files overriding the bundled ones
    #[arg(long)]
    pub template_dir: Option<PathBuf>,

    /// Directory holding the level themes
    #[arg(long, default_value = DEFAULT_THEME_DIR)]
    pub theme_dir: PathBuf,
}

/// Execute render command
pub fn execute(args: RenderArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_render_config(&args.config)?;

    let engine = match &args.template_dir {
        Some(dir) => FileTemplates::from_dir(dir),
        None => FileTemplates::new(),
    }
    .merge(&config.templates);

    let mut document = String::new();
    for tree in &config.trees {
        let mut db = load_databases(&tree.databases)?;
        if args.anonymize {
            let changed = db.anonymize(args.cutoff);
            tracing::info!(changed, cutoff = args.cutoff, "persons anonymized");
        }

        let options = tree.render_options(&config.levels, &args.theme_dir)?;
        let proband = db.get(&tree.proband)?;
        let text = render_tree(proband, &options, &engine)?;

        document.push_str(&tree.pre_content);
        document.push_str(&text);
        document.push_str(&tree.post_content);
    }

    // Output
    match args.output.or(config.output_filename) {
        Some(output_path) => {
            std::fs::write(&output_path, document)?;
            println!("✓ Rendered {} tree(s) to {}", config.trees.len(), output_path.display());
        }
        None => print!("{}", document),
    }

    Ok(())
}
