use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use sheetviz::chart::{ChartGeometry, ColorPalette, GeometrySet, format_legend, legend_entries};
use sheetviz::export::{export_all, export_text};
use sheetviz::insights::{HttpInsightClient, InsightProvider};
use sheetviz::source::{
    DatasetSource, DirectoryHistory, FileSource, HttpUploadHistory, UploadHistory,
};
use sheetviz::{AxisMode, AxisSelection, RenderConfig, RenderingSession, SurfaceGrid};

#[derive(Parser, Debug)]
#[command(
    name = "sheetviz",
    version,
    about = "Chart spreadsheet columns as line, bar, pie, doughnut & radar PNGs"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the selectable columns of a CSV/JSON dataset.
    Columns {
        /// Dataset file (.csv or .json)
        file: PathBuf,
    },
    /// Render charts for a dataset and export them as PNG files.
    Render(RenderArgs),
    /// List stored uploads, newest first.
    History(HistoryArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ModeArg {
    Normal,
    OnlyX,
    OnlyY,
}

impl From<ModeArg> for AxisMode {
    fn from(m: ModeArg) -> Self {
        match m {
            ModeArg::Normal => AxisMode::Normal,
            ModeArg::OnlyX => AxisMode::OnlyX,
            ModeArg::OnlyY => AxisMode::OnlyY,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ChartArg {
    All,
    Line,
    Bar,
    Pie,
    Doughnut,
    Radar,
}

impl From<ChartArg> for GeometrySet {
    fn from(c: ChartArg) -> Self {
        match c {
            ChartArg::All => GeometrySet::All,
            ChartArg::Line => GeometrySet::Single(ChartGeometry::Line),
            ChartArg::Bar => GeometrySet::Single(ChartGeometry::Bar),
            ChartArg::Pie => GeometrySet::Single(ChartGeometry::Pie),
            ChartArg::Doughnut => GeometrySet::Single(ChartGeometry::Doughnut),
            ChartArg::Radar => GeometrySet::Single(ChartGeometry::Radar),
        }
    }
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// Dataset file (.csv or .json)
    file: PathBuf,
    /// X column (defaults to the first column)
    #[arg(long)]
    x: Option<String>,
    /// Y column (defaults to the second column)
    #[arg(long)]
    y: Option<String>,
    /// Axis mode: chart both columns, or one column against the row index.
    #[arg(long, value_enum, default_value_t = ModeArg::Normal)]
    mode: ModeArg,
    /// Which chart(s) to draw.
    #[arg(long, value_enum, default_value_t = ChartArg::Line)]
    chart: ChartArg,
    /// Output directory for PNG files (created if missing).
    #[arg(long, default_value = ".")]
    out: PathBuf,
    /// Width of each chart (default 1000).
    #[arg(long, default_value_t = 1000)]
    width: u32,
    /// Height of each chart (default 600).
    #[arg(long, default_value_t = 600)]
    height: u32,
    /// Comma-separated hex colours replacing the default palette (e.g. "#ff6384,#36a2eb").
    #[arg(long)]
    palette: Option<String>,
    /// Locale for number formatting (en, de, fr, es, it, pt, nl).
    #[arg(long, default_value = "en")]
    locale: String,
    /// Print the stats line (sum, average, min, max) to stdout.
    #[arg(long, default_value_t = false)]
    stats: bool,
    /// Print the built chart specs as JSON to stdout.
    #[arg(long, default_value_t = false)]
    spec_json: bool,
    /// Base URL of the insight service; writes ai-insights.txt when given.
    #[arg(long)]
    insights_url: Option<String>,
}

#[derive(Args, Debug)]
struct HistoryArgs {
    /// Directory of stored uploads (defaults to the platform data dir).
    #[arg(long, conflicts_with = "url")]
    dir: Option<PathBuf>,
    /// Base URL of the upload service instead of a local directory.
    #[arg(long)]
    url: Option<String>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Columns { file } => cmd_columns(file),
        Command::Render(args) => cmd_render(args),
        Command::History(args) => cmd_history(args),
    }
}

fn cmd_columns(file: PathBuf) -> Result<()> {
    let loaded = FileSource::new(&file)
        .load()
        .with_context(|| format!("load {}", file.display()))?;
    for col in loaded.dataset.columns() {
        println!("{col}");
    }
    Ok(())
}

fn cmd_render(args: RenderArgs) -> Result<()> {
    if args.width == 0 || args.height == 0 {
        bail!("--width and --height must be positive");
    }
    let loaded = FileSource::new(&args.file)
        .load()
        .with_context(|| format!("load {}", args.file.display()))?;
    let dataset = loaded.dataset;

    let defaults = AxisSelection::default_for(&dataset);
    let selection = AxisSelection::new(
        args.x.or(defaults.x_column).unwrap_or_default(),
        args.y.or(defaults.y_column).unwrap_or_default(),
        args.mode.into(),
    );

    let mut config = RenderConfig::default()
        .with_size(args.width, args.height)
        .with_locale(args.locale);
    if let Some(p) = args.palette.as_deref() {
        config = config.with_palette(ColorPalette::parse_list(p).context("invalid --palette")?);
    }

    let grid = SurfaceGrid::uniform(config.width, config.height);
    let mut session = RenderingSession::new(grid, config);
    let report = session.update(&dataset, &selection, args.chart.into());

    let Some(plan) = session.last_plan() else {
        bail!("no render plan");
    };
    if plan.is_empty() {
        eprintln!(
            "Nothing to chart: select {} from: {}",
            match selection.mode {
                AxisMode::Normal => "an X and a Y column",
                AxisMode::OnlyX => "an X column",
                AxisMode::OnlyY => "a Y column",
            },
            dataset.columns().join(", ")
        );
        return Ok(());
    }

    if args.stats {
        if let Some(stats) = plan.stats {
            println!("{}", stats.display_line(&session.config().locale));
        }
    }
    if args.spec_json {
        let specs: Vec<_> = plan.slots.iter().map(|s| &s.spec).collect();
        println!("{}", serde_json::to_string_pretty(&specs)?);
    }
    for slot in &plan.slots {
        let entries = legend_entries(&slot.spec);
        if !entries.is_empty() {
            println!("{} legend:\n{}", slot.spec.geometry.title(), format_legend(&entries));
        }
    }
    for slot in &report.failed {
        eprintln!("Chart in slot {slot} failed to render (see RUST_LOG=warn)");
    }

    std::fs::create_dir_all(&args.out)
        .with_context(|| format!("create {}", args.out.display()))?;
    for (slot, blob) in export_all(&session) {
        match blob.and_then(|b| b.save_in(&args.out)) {
            Ok(path) => eprintln!("Wrote chart to {}", path.display()),
            Err(e) => eprintln!("Export of slot {slot} failed: {e}"),
        }
    }

    if let Some(url) = args.insights_url {
        let result = HttpInsightClient::new(url).and_then(|c| c.generate(&dataset));
        match result {
            Ok(report) => {
                // The file holds the insight text verbatim.
                let path = export_text(&report.insights).save_in(&args.out)?;
                eprintln!("Wrote insights to {}", path.display());
            }
            Err(e) => eprintln!("Failed to generate AI insights: {e}"),
        }
    }

    Ok(())
}

fn cmd_history(args: HistoryArgs) -> Result<()> {
    let uploads = match (args.url, args.dir) {
        (Some(url), _) => HttpUploadHistory::new(url)?.list()?,
        (None, Some(dir)) => DirectoryHistory::new(dir).list()?,
        (None, None) => {
            let Some(dir) = DirectoryHistory::default_dir() else {
                bail!("no data directory on this platform; pass --dir");
            };
            DirectoryHistory::new(dir).list()?
        }
    };
    if uploads.is_empty() {
        eprintln!("No uploads found.");
    }
    for u in uploads {
        println!(
            "{}  {}  ({} rows)",
            u.uploaded_at.format("%Y-%m-%d %H:%M"),
            u.name,
            u.dataset.len()
        );
    }
    Ok(())
}
