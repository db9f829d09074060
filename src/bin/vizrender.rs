use std::{
    collections::BTreeMap,
    fs::File,
    io::{BufReader, Write as _},
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "vizrender", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render an object and write the payload to stdout.
    Render(RenderArgs),
    /// Print the display options computed for an object.
    Size(SizeArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input object JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output format (`html`, `json`, `scrubber`, `widgets`, `auto`, `none`).
    /// Defaults to the configured format for the object's mode.
    #[arg(long)]
    format: Option<String>,

    /// Renderer config JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Plot options JSON (`{"types": {...}, "objects": {...}}`).
    #[arg(long)]
    options: Option<PathBuf>,

    /// Print payload metadata to stderr.
    #[arg(long, default_value_t = false)]
    meta: bool,
}

#[derive(Parser, Debug)]
struct SizeArgs {
    /// Input object JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Display size in percent.
    #[arg(long, default_value_t = 100)]
    percent: u32,

    /// Plot options JSON (`{"types": {...}, "objects": {...}}`).
    #[arg(long)]
    options: Option<PathBuf>,
}

#[derive(serde::Deserialize, Debug, Default)]
#[serde(default)]
struct OptionsFile {
    types: BTreeMap<String, vizrender::OptionsMapping>,
    objects: BTreeMap<String, vizrender::OptionsMapping>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Size(args) => cmd_size(args),
    }
}

fn read_option_store(path: Option<&Path>) -> anyhow::Result<vizrender::InMemoryOptionStore> {
    let mut store = vizrender::InMemoryOptionStore::new();
    let Some(path) = path else {
        return Ok(store);
    };
    let f = File::open(path).with_context(|| format!("open options '{}'", path.display()))?;
    let file: OptionsFile =
        serde_json::from_reader(BufReader::new(f)).with_context(|| "parse options JSON")?;
    for (tag, opts) in file.types {
        for (name, value) in opts {
            store.set_type_option(tag.clone(), name, value);
        }
    }
    for (id, opts) in file.objects {
        for (name, value) in opts {
            store.set_object_option(id.clone(), name, value);
        }
    }
    Ok(store)
}

fn make_renderer(
    config: Option<&Path>,
    options: Option<&Path>,
) -> anyhow::Result<vizrender::Renderer> {
    let config = match config {
        Some(path) => vizrender::RendererConfig::from_path(path)?,
        None => vizrender::RendererConfig::default(),
    };
    Ok(
        vizrender::Renderer::new(Arc::new(vizrender::DocumentRuntime::new()))
            .with_config(config)
            .with_option_store(read_option_store(options)?),
    )
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let object = vizrender::VisualizableObject::from_path(&args.in_path)?;
    let renderer = make_renderer(args.config.as_deref(), args.options.as_deref())?;
    renderer.ensure_backend_ready(&vizrender::OptionsMapping::new())?;

    let Some(result) = renderer.render(&object, args.format.as_deref())? else {
        eprintln!("render skipped");
        return Ok(());
    };

    if args.meta {
        let meta = result.metadata();
        eprintln!("file-ext: {}", meta.file_ext);
        eprintln!("mime-type: {}", meta.mime_type);
    }
    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(result.payload().as_bytes())
        .with_context(|| "write payload")?;
    stdout.write_all(b"\n").with_context(|| "write payload")?;
    Ok(())
}

fn cmd_size(args: SizeArgs) -> anyhow::Result<()> {
    let object = vizrender::VisualizableObject::from_path(&args.in_path)?;
    let renderer = make_renderer(None, args.options.as_deref())?;
    let options = renderer.compute_options(&object, args.percent)?;
    println!(
        "{}",
        serde_json::to_string_pretty(&options).with_context(|| "serialize options")?
    );
    Ok(())
}
