use std::{
    fs,
    io::Write as _,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "linefig", version)]
struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compile a stored figure configuration and a dataset into chart JSON.
    Compile(CompileArgs),
    /// Print the editor field tree for a dataset as JSON.
    Schema(SchemaArgs),
    /// Apply line-style defaults to a stored configuration.
    Merge(MergeArgs),
    /// Print summary statistics for one dataset column.
    Stats(StatsArgs),
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false, id = "source")]
struct DataSourceArgs {
    /// Dataset JSON file.
    #[arg(long)]
    data: Option<PathBuf>,

    /// Dataset URL, fetched over HTTP.
    #[arg(long)]
    data_url: Option<String>,
}

#[derive(Parser, Debug)]
struct CompileArgs {
    /// Persisted configuration (JSON pairs array).
    #[arg(long)]
    config: PathBuf,

    #[command(flatten)]
    source: DataSourceArgs,

    /// Output path; stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Pretty-print the JSON.
    #[arg(long)]
    pretty: bool,
}

#[derive(Parser, Debug)]
struct SchemaArgs {
    /// Dataset JSON file, providing the column choices.
    #[arg(long)]
    data: PathBuf,

    /// Persisted configuration used to repopulate values.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct MergeArgs {
    /// Persisted configuration (JSON pairs array).
    #[arg(long)]
    config: PathBuf,

    /// Defaults document: pairs array, JSON object or `k=v;k2=v2`.
    #[arg(long)]
    defaults: PathBuf,

    /// Lines to restyle; defaults to the saved line count.
    #[arg(long)]
    lines: Option<u32>,
}

#[derive(Parser, Debug)]
struct StatsArgs {
    /// Dataset JSON file.
    #[arg(long)]
    data: PathBuf,

    /// Column to summarize.
    #[arg(long)]
    column: String,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.cmd {
        Command::Compile(args) => cmd_compile(args).await,
        Command::Schema(args) => cmd_schema(args),
        Command::Merge(args) => cmd_merge(args),
        Command::Stats(args) => cmd_stats(args),
    }
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)),
        )
        .init();
}

fn read_text(path: &Path, what: &str) -> anyhow::Result<String> {
    fs::read_to_string(path).with_context(|| format!("read {what} '{}'", path.display()))
}

fn read_config(path: &Path) -> anyhow::Result<linefig::ConfigStore> {
    Ok(linefig::ConfigStore::decode(&read_text(path, "configuration")?))
}

fn read_dataset(path: &Path) -> anyhow::Result<linefig::Dataset> {
    linefig::Dataset::from_path(path).with_context(|| format!("load dataset '{}'", path.display()))
}

async fn load_dataset(source: &DataSourceArgs) -> anyhow::Result<linefig::Dataset> {
    match (&source.data, &source.data_url) {
        (Some(path), _) => read_dataset(path),
        (None, Some(url)) => {
            let client = linefig::DatasetClient::new(linefig::FetchOpts::default())?;
            client
                .fetch(url)
                .await
                .with_context(|| format!("fetch dataset '{url}'"))
        }
        (None, None) => anyhow::bail!("one of --data or --data-url is required"),
    }
}

fn emit(out: Option<&Path>, text: &str) -> anyhow::Result<()> {
    match out {
        Some(path) => {
            fs::write(path, text).with_context(|| format!("write '{}'", path.display()))?;
            eprintln!("wrote {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{text}").context("write stdout")?;
        }
    }
    Ok(())
}

async fn cmd_compile(args: CompileArgs) -> anyhow::Result<()> {
    let store = read_config(&args.config)?;
    let data = load_dataset(&args.source).await?;

    let spec = linefig::FigureSpec::from_config(&store)?;
    let set = linefig::assemble(&spec, &data, &linefig::AssembleOpts::default())?;
    tracing::info!(traces = set.data.len(), "compiled figure");

    emit(args.out.as_deref(), &set.to_json(args.pretty)?)
}

fn cmd_schema(args: SchemaArgs) -> anyhow::Result<()> {
    let data = read_dataset(&args.data)?;
    let store = match &args.config {
        Some(path) => read_config(path)?,
        None => linefig::ConfigStore::new(),
    };

    let tree = linefig::generate_from_store(&data.column_names(), &store)?;
    let json = serde_json::to_string_pretty(&tree).context("serialize field tree")?;
    emit(None, &json)
}

fn cmd_merge(args: MergeArgs) -> anyhow::Result<()> {
    let store = read_config(&args.config)?;
    let defaults = linefig::parse_defaults(&read_text(&args.defaults, "defaults")?);
    let lines = args
        .lines
        .unwrap_or_else(|| linefig::saved_line_count(&store));

    let merged = linefig::merge(&store, &defaults, lines);
    emit(None, &merged.encode()?)
}

fn cmd_stats(args: StatsArgs) -> anyhow::Result<()> {
    let data = read_dataset(&args.data)?;
    let values = data
        .numbers(&args.column)
        .with_context(|| format!("no column '{}' in dataset", args.column))?;
    let summary = linefig::Summary::of(&values)
        .with_context(|| format!("column '{}' has no numeric values", args.column))?;

    let json = serde_json::to_string_pretty(&summary).context("serialize summary")?;
    emit(None, &json)
}
