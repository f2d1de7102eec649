use chart_vibe::api::{ChartConfig, ChartHost, ChartStyle};
use chart_vibe::core::Viewport;
use chart_vibe::export::{self, ExportFormat};
use chart_vibe::interaction::PointerEvent;
use chart_vibe::render::SvgRenderer;
use serde::Deserialize;
use std::cell::Cell;
use std::fs;
use std::path::PathBuf;
use std::rc::Rc;

const USAGE: &str = "usage: session_replay_tool --input <session.json> [--output <path>] [--format json|csv] [--svg <path>]";

/// Recorded authoring session: a chart setup and the pointer events to replay.
#[derive(Debug, Deserialize)]
struct SessionFile {
    config: ChartConfig,
    viewport: Viewport,
    #[serde(default)]
    style: ChartStyle,
    #[serde(default)]
    events: Vec<PointerEvent>,
}

#[derive(Debug)]
struct CliArgs {
    input: PathBuf,
    output: PathBuf,
    format: ExportFormat,
    svg: Option<PathBuf>,
}

fn main() {
    let _ = chart_vibe::telemetry::init_default_tracing();
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args = parse_args()?;
    let raw = fs::read_to_string(&args.input)
        .map_err(|err| format!("failed to read `{}`: {err}", args.input.display()))?;
    let session: SessionFile =
        serde_json::from_str(&raw).map_err(|err| format!("invalid session json: {err}"))?;

    let last_sum = Rc::new(Cell::new(None::<f64>));
    let sink = Rc::clone(&last_sum);
    let mut host = ChartHost::new(session.config, session.style, |_| Ok(SvgRenderer::new()))
        .map_err(|err| format!("invalid chart setup: {err}"))?
        .with_sum_listener(move |total| sink.set(Some(total)));
    host.resize(session.viewport)
        .map_err(|err| format!("failed to build chart: {err}"))?;

    let mut changes = 0usize;
    for (index, event) in session.events.iter().enumerate() {
        let changed = host
            .handle_pointer(*event)
            .map_err(|err| format!("event #{index} failed: {err}"))?;
        if changed {
            changes += 1;
        }
    }

    let document = host
        .export_document()
        .ok_or_else(|| "no chart was built".to_owned())?;
    let contents = document
        .render(args.format)
        .map_err(|err| format!("failed to export dataset: {err}"))?;
    fs::write(&args.output, contents)
        .map_err(|err| format!("failed to write `{}`: {err}", args.output.display()))?;

    if let Some(svg_path) = &args.svg {
        let svg = host
            .chart()
            .map(|chart| chart.surface().document().to_owned())
            .unwrap_or_default();
        fs::write(svg_path, svg)
            .map_err(|err| format!("failed to write `{}`: {err}", svg_path.display()))?;
    }
    host.destroy()
        .map_err(|err| format!("failed to tear chart down: {err}"))?;

    println!(
        "replayed {} events, {changes} changed the dataset, {} entries exported to {}",
        session.events.len(),
        document.points.len(),
        args.output.display()
    );
    if let Some(total) = last_sum.get() {
        println!("final bar total: {total}");
    }
    Ok(())
}

fn parse_args() -> Result<CliArgs, String> {
    let mut args = std::env::args().skip(1);
    let mut input = None::<PathBuf>;
    let mut output = None::<PathBuf>;
    let mut format = ExportFormat::Json;
    let mut svg = None::<PathBuf>;

    while let Some(flag) = args.next() {
        match flag.as_str() {
            "--input" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --input".to_owned())?;
                input = Some(PathBuf::from(value));
            }
            "--output" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --output".to_owned())?;
                output = Some(PathBuf::from(value));
            }
            "--format" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --format".to_owned())?;
                format = ExportFormat::parse(&value)
                    .ok_or_else(|| format!("unsupported format `{value}`"))?;
            }
            "--svg" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --svg".to_owned())?;
                svg = Some(PathBuf::from(value));
            }
            "--help" | "-h" => return Err(USAGE.to_owned()),
            _ => return Err(format!("unknown argument `{flag}`")),
        }
    }

    let input = input.ok_or_else(|| USAGE.to_owned())?;
    let output = match output {
        Some(output) => output,
        None => PathBuf::from(export::default_file_name(format, chrono::Utc::now())),
    };
    Ok(CliArgs {
        input,
        output,
        format,
        svg,
    })
}
