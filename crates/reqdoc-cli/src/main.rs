use futures::executor::block_on;
use reqdoc::render::raster::ProjectChartRenderer;
use reqdoc::render::{
    ChartImage, ChartKind, ChartSource, HeadlessError, RenderOptions, SuppliedCharts,
    generate_report, layout_project_sync,
};
use reqdoc::{MemoryProjectStore, Project, ProjectStorage, ProjectSummary, ReportConfig};
use serde::Serialize;
use serde_json::Value;
use std::io::Read;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "REQDOC_LOG";

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Project(reqdoc::Error),
    Render(reqdoc_render::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Project(err) => write!(f, "{err}"),
            CliError::Render(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<reqdoc::Error> for CliError {
    fn from(value: reqdoc::Error) -> Self {
        Self::Project(value)
    }
}

impl From<reqdoc_render::Error> for CliError {
    fn from(value: reqdoc_render::Error) -> Self {
        Self::Render(value)
    }
}

impl From<HeadlessError> for CliError {
    fn from(value: HeadlessError) -> Self {
        match value {
            HeadlessError::Project(err) => Self::Project(err),
            HeadlessError::Render(err) => Self::Render(err),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum Command {
    #[default]
    Render,
    Validate,
    Summary,
    Layout,
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    pretty: bool,
    built_in_charts: bool,
    pie: Option<String>,
    bar: Option<String>,
    patch: Option<String>,
    config: Option<String>,
    page_size: Option<String>,
    date: Option<String>,
    text_measurer: Option<String>,
    out: Option<String>,
}

fn usage() -> &'static str {
    "reqdoc-cli\n\
\n\
USAGE:\n\
  reqdoc-cli validate [<path>|-]\n\
  reqdoc-cli summary [--pretty] [<path>|-]\n\
  reqdoc-cli layout [--pretty] [RENDER OPTIONS] [<path>|-]\n\
  reqdoc-cli [render] [RENDER OPTIONS] [--out <path>] [<path>|-]\n\
\n\
RENDER OPTIONS:\n\
  --config <file.json>                 report config (page.*, chart.maxHeight, text.measurer, document.date)\n\
  --page-size a4|letter                overrides page.size\n\
  --date <YYYY-MM-DD>                  overrides document.date\n\
  --text-measurer helvetica|deterministic\n\
  --charts                             draw the built-in analysis charts\n\
  --pie <file.png> / --bar <file.png>  embed externally rendered charts\n\
  --patch <file.json>                  apply a partial update before rendering\n\
\n\
NOTES:\n\
  - If <path> is omitted or '-', the project payload is read from stdin.\n\
  - render writes <Project-Name>-Requirements.pdf in the current directory unless --out is given.\n\
  - Set REQDOC_LOG (e.g. REQDOC_LOG=debug) to control log output on stderr.\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        let mut value = || -> Result<String, CliError> {
            it.next().cloned().ok_or(CliError::Usage(usage()))
        };
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "validate" => args.command = Command::Validate,
            "summary" => args.command = Command::Summary,
            "layout" => args.command = Command::Layout,
            "render" => args.command = Command::Render,
            "--pretty" => args.pretty = true,
            "--charts" => args.built_in_charts = true,
            "--pie" => args.pie = Some(value()?),
            "--bar" => args.bar = Some(value()?),
            "--patch" => args.patch = Some(value()?),
            "--config" => args.config = Some(value()?),
            "--page-size" => args.page_size = Some(value()?),
            "--date" => args.date = Some(value()?),
            "--text-measurer" => args.text_measurer = Some(value()?),
            "--out" => args.out = Some(value()?),
            "-" if args.input.is_none() => args.input = Some("-".to_string()),
            other if other.starts_with('-') => return Err(CliError::Usage(usage())),
            path => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(path.to_string());
            }
        }
    }

    Ok(args)
}

fn read_input(input: Option<&str>) -> Result<String, CliError> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

fn write_json(value: &impl Serialize, pretty: bool) -> Result<(), CliError> {
    if pretty {
        serde_json::to_writer_pretty(std::io::stdout().lock(), value)?;
    } else {
        serde_json::to_writer(std::io::stdout().lock(), value)?;
    }
    println!();
    Ok(())
}

fn init_logging() {
    let default_level = "warn";
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(LOG_ENV)
                .or_else(|_| EnvFilter::try_new(default_level))
                .unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

/// Submits the payload through a store the way the wizard does: create, then optionally patch.
fn load_project(args: &Args, store: &mut MemoryProjectStore) -> Result<Project, CliError> {
    let payload: Value = serde_json::from_str(&read_input(args.input.as_deref())?)?;
    let insert = reqdoc::parse_insert_payload(&payload)?;
    let project = store.create(insert);

    let Some(path) = args.patch.as_deref() else {
        return Ok(project);
    };
    let patch: Value = serde_json::from_str(&std::fs::read_to_string(path)?)?;
    let patch = reqdoc::parse_patch_payload(&patch)?;
    let Some(updated) = store.update(&project.id, patch) else {
        return Ok(project);
    };
    reqdoc::validate_project(&updated)?;
    Ok(updated)
}

fn build_options(args: &Args) -> Result<RenderOptions, CliError> {
    let mut config = match args.config.as_deref() {
        Some(path) => ReportConfig::from_json_str(&std::fs::read_to_string(path)?)?,
        None => ReportConfig::empty_object(),
    };
    for (key, value) in [
        ("page.size", &args.page_size),
        ("document.date", &args.date),
        ("text.measurer", &args.text_measurer),
    ] {
        if let Some(value) = value {
            config.set_value(key, Value::String(value.clone()));
        }
    }
    Ok(RenderOptions::from_config(&config)?)
}

/// Turns the derived report name into a plain file name in the working directory.
fn output_file_name(filename: &str) -> String {
    filename
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '-',
            c if c.is_control() => '-',
            c => c,
        })
        .collect()
}

/// Externally rendered images win over the built-in charts for the same kind.
struct CliCharts<'a> {
    supplied: SuppliedCharts,
    built_in: Option<ProjectChartRenderer<'a>>,
}

impl ChartSource for CliCharts<'_> {
    fn chart(&self, kind: ChartKind) -> Option<ChartImage> {
        self.supplied
            .chart(kind)
            .or_else(|| self.built_in.as_ref().and_then(|r| r.chart(kind)))
    }
}

fn build_charts<'a>(args: &Args, project: &'a Project) -> Result<CliCharts<'a>, CliError> {
    let mut supplied = SuppliedCharts::new();
    for (kind, path) in [(ChartKind::Pie, &args.pie), (ChartKind::Bar, &args.bar)] {
        if let Some(path) = path {
            let bytes = std::fs::read(path)?;
            supplied = supplied.with(ChartImage::from_png(kind, &bytes)?);
        }
    }
    Ok(CliCharts {
        supplied,
        built_in: args
            .built_in_charts
            .then(|| ProjectChartRenderer::new(project)),
    })
}

fn run(args: Args) -> Result<(), CliError> {
    let mut store = MemoryProjectStore::new();
    let project = load_project(&args, &mut store)?;

    match args.command {
        Command::Validate => {
            println!("valid: {}", project.name);
            Ok(())
        }
        Command::Summary => write_json(&ProjectSummary::of(&project), args.pretty),
        Command::Layout => {
            let options = build_options(&args)?;
            let charts = build_charts(&args, &project)?;
            let layout = layout_project_sync(&project, &charts, &options)?;
            write_json(&layout, args.pretty)
        }
        Command::Render => {
            let options = build_options(&args)?;
            let charts = build_charts(&args, &project)?;
            let doc = block_on(generate_report(&project, &charts, &options))?;
            let out = args
                .out
                .clone()
                .unwrap_or_else(|| output_file_name(&doc.filename));
            std::fs::write(&out, &doc.bytes)?;
            tracing::info!(path = %out, pages = doc.layout.pages.len(), "report written");
            println!("{out}");
            Ok(())
        }
    }
}

fn main() {
    init_logging();

    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    if let Err(err) = run(args) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_file_name_strips_path_separators() {
        assert_eq!(
            output_file_name("../../tmp/x-Requirements.pdf"),
            "..-..-tmp-x-Requirements.pdf"
        );
        assert_eq!(
            output_file_name("R&D-/-Ops-Requirements.pdf"),
            "R&D---Ops-Requirements.pdf"
        );
        assert_eq!(
            output_file_name("C:\\a*b?-Requirements.pdf"),
            "C--a-b--Requirements.pdf"
        );
        assert_eq!(
            output_file_name("Customer-Portal-Redesign-Requirements.pdf"),
            "Customer-Portal-Redesign-Requirements.pdf"
        );
    }
}
