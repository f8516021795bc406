use clap::Parser;
use log::info;
use og_thumbnail::render::{FontSet, ResvgBackend};
use og_thumbnail::{config, output, pipeline};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "og-thumbnail")]
#[command(about = "Generate Open Graph thumbnails for Markdown and MDX documents")]
#[command(long_about = "\
Generate Open Graph thumbnails for Markdown and MDX documents

Every .md/.mdx file whose front matter has a `title` gets a 1200x630
thumbnail.png written next to it: the title, centred in white, on a diagonal
blue-to-purple gradient.

  src/
  ├── posts/
  │   ├── hello/
  │   │   ├── index.mdx            # title: Hello World
  │   │   └── thumbnail.png        # ← generated
  │   └── draft/
  │       └── index.md             # no title → skipped
  ├── about.md                     # title: About
  └── thumbnail.png                # ← generated

Without FILE arguments the content root (default `src`) is scanned
recursively. With FILE arguments only those documents are processed.

Run 'og-thumbnail --print-config' to see a documented thumbnails.toml.")]
#[command(version)]
struct Cli {
    /// Documents to process instead of scanning the content root
    files: Vec<PathBuf>,

    /// Config file (optional; stock defaults when absent)
    #[arg(long, default_value = config::CONFIG_FILE)]
    config: PathBuf,

    /// Print a stock thumbnails.toml with all options documented
    #[arg(long)]
    print_config: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    let cli = Cli::parse();

    if cli.print_config {
        print!("{}", config::stock_config_toml());
        return Ok(());
    }

    let config = config::load_config(&cli.config)?;
    let fonts = FontSet::load(&config.font);
    output::print_font_status(&fonts);
    let backend = ResvgBackend::new(&fonts);

    let summary = if cli.files.is_empty() {
        let root = &config.content_root;
        let found = |count| println!("{}", output::format_found(count));
        match pipeline::run_scan(&backend, root, found, output::print_event)? {
            Some(summary) => summary,
            None => {
                println!("{}", output::format_missing_root(root));
                return Ok(());
            }
        }
    } else {
        info!("processing {} named file(s)", cli.files.len());
        pipeline::run_files(&backend, &cli.files, output::print_event)
    };

    output::print_summary(&summary);
    Ok(())
}
