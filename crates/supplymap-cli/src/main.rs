use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;
use supplymap_catalog::Catalog;
use supplymap_core::{CategoryFilter, CategoryId, EntityId, SeverityFilter, ViewKind};
use supplymap_events::{Event, EventBus};
use supplymap_graph::MapController;
use tracing_subscriber::EnvFilter;

mod report;
mod settings;

use settings::Settings;

#[derive(Parser, Debug)]
#[command(name = "supplymap", author, version, about, long_about = None)]
struct Cli {
    /// Settings file (defaults to <config dir>/supplymap/settings.json)
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Project a map and print the resulting scene
    Render(RenderArgs),
    /// Load a catalog file and report unresolved references
    Validate {
        file: PathBuf,
        /// Exit non-zero when any reference does not resolve
        #[arg(long)]
        strict: bool,
    },
    /// Print a built-in catalog as JSON
    Export {
        #[arg(short, long)]
        view: Option<ViewKind>,
    },
    /// Print the effective settings
    Settings {
        /// Write them to the settings file
        #[arg(long)]
        init: bool,
    },
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// partnership | products
    #[arg(short, long)]
    view: Option<ViewKind>,

    /// Catalog JSON to render instead of the built-in dataset
    #[arg(short, long)]
    catalog: Option<PathBuf>,

    #[arg(short, long)]
    search: Option<String>,

    /// Category id to keep
    #[arg(long)]
    category: Option<i64>,

    /// all | high | medium | low
    #[arg(long, default_value = "all")]
    severity: SeverityFilter,

    /// Entity id to click
    #[arg(long)]
    select: Option<i64>,

    /// Entity id under the pointer
    #[arg(long)]
    hover: Option<i64>,

    #[arg(long, default_value_t = 0)]
    zoom_in: u32,

    #[arg(long, default_value_t = 0)]
    zoom_out: u32,

    /// Show the data-source citations
    #[arg(long)]
    data_sources: bool,

    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    let settings = match &cli.settings {
        Some(path) => Settings::load_from(path),
        None => Settings::load(),
    };

    match cli.command {
        Command::Render(args) => render(&settings, args),
        Command::Validate { file, strict } => validate(file, strict),
        Command::Export { view } => export(view.unwrap_or(settings.default_view)),
        Command::Settings { init } => show_settings(&settings, cli.settings, init),
    }
}

fn render(settings: &Settings, args: RenderArgs) -> Result<()> {
    let view = args.view.unwrap_or(settings.default_view);
    let catalog = match &args.catalog {
        Some(path) => {
            Catalog::load(path).with_context(|| format!("Failed to load catalog {path:?}"))?
        }
        None => Catalog::builtin(view).context("Failed to build the built-in catalog")?,
    };

    let mut controller =
        MapController::new(catalog, settings.profile(view), settings.zoom_bounds());
    let bus = EventBus::new();

    if let Some(term) = args.search {
        bus.publish(Event::SetSearchTerm { term });
    }
    bus.publish(Event::SetCategoryFilter(CategoryFilter::from(
        args.category.map(CategoryId),
    )));
    bus.publish(Event::SetSeverityFilter(args.severity));
    for _ in 0..args.zoom_in {
        bus.publish(Event::ZoomIn);
    }
    for _ in 0..args.zoom_out {
        bus.publish(Event::ZoomOut);
    }
    if let Some(id) = args.select {
        bus.publish(Event::SelectEntity { id: EntityId(id) });
    }
    if let Some(id) = args.hover {
        bus.publish(Event::HoverEntity {
            id: Some(EntityId(id)),
        });
    }
    if args.data_sources {
        bus.publish(Event::ToggleDataSources);
    }

    let applied = controller.pump(&bus);
    tracing::debug!("Applied {} events", applied);

    let scene = controller.scene();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if args.json || settings.json_output {
        serde_json::to_writer_pretty(&mut out, &scene).context("Failed to write scene")?;
        writeln!(out)?;
    } else {
        report::write_scene(&mut out, &scene).context("Failed to write scene")?;
    }
    Ok(())
}

fn validate(file: PathBuf, strict: bool) -> Result<()> {
    let catalog =
        Catalog::load(&file).with_context(|| format!("Failed to load catalog {file:?}"))?;
    let issues = catalog.validate();

    println!(
        "{:?}: {} categories, {} entities, {} connections",
        file,
        catalog.categories().len(),
        catalog.entities().len(),
        catalog.connections().len()
    );
    for issue in &issues {
        println!("  warning: {issue}");
    }

    if strict && !issues.is_empty() {
        anyhow::bail!("{} unresolved references", issues.len());
    }
    Ok(())
}

fn export(view: ViewKind) -> Result<()> {
    let catalog = Catalog::builtin(view).context("Failed to build the built-in catalog")?;
    println!("{}", catalog.to_json_pretty()?);
    Ok(())
}

fn show_settings(settings: &Settings, path: Option<PathBuf>, init: bool) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(settings)?);
    if init {
        let path = path
            .or_else(Settings::default_path)
            .context("No config directory available")?;
        settings
            .save_to(&path)
            .with_context(|| format!("Failed to write settings to {path:?}"))?;
        tracing::info!("Settings written to {:?}", path);
    }
    Ok(())
}
