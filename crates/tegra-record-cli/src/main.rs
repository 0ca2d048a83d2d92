#![forbid(unsafe_code)]

use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tegra_record::{
    build_results, report, CaptureFile, EngineKind, EngineMask, Filter, FrameResults, RecordConfig,
    ResultRow,
};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(about = "Decode a captured GPU register-write trace into per-draw register state")]
struct Args {
    /// Capture file (JSON) to decode.
    capture: PathBuf,

    /// Capture settings (JSON: `engines`, `num_frames`, `hide_unknown`).
    ///
    /// Without a config every engine and every frame in the capture is decoded.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Comma-separated engines to decode (FERMI2D, MAXWELL, KEPLERC, KEPLERI, MAXWDMA).
    #[arg(long, value_delimiter = ',')]
    engines: Option<Vec<EngineKind>>,

    /// Decode at most N frames.
    #[arg(long)]
    frames: Option<u32>,

    /// Hide reserved `unk_` registers.
    #[arg(long)]
    hide_unknown: bool,

    /// Print flattened rows matching a filter (e.g. `eng:maxwell meth:blend`) instead of the report.
    #[arg(long, conflicts_with = "json")]
    filter: Option<String>,

    /// Print the state inherited by draw N of each frame instead of the report.
    #[arg(long, conflicts_with = "json")]
    state_at_draw: Option<usize>,

    /// Print decoded results as JSON.
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Some(
            RecordConfig::from_path(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
        ),
        None => None,
    };

    let engines = match (&args.engines, &config) {
        (Some(engines), _) => engines.iter().copied().collect(),
        (None, Some(config)) => config.engines,
        (None, None) => EngineMask::all(),
    };
    let frame_limit = args.frames.or(config.as_ref().map(|c| c.num_frames));
    let hide_unknown = args.hide_unknown || config.as_ref().is_some_and(|c| c.hide_unknown);

    if frame_limit == Some(0) {
        bail!("--frames must be at least 1");
    }

    let capture = CaptureFile::from_path(&args.capture)
        .with_context(|| format!("failed to load capture {}", args.capture.display()))?;

    let mut frames = capture.replay(engines);
    if let Some(limit) = frame_limit {
        frames.truncate(limit as usize);
    }
    tracing::info!(
        frames = frames.len(),
        engines = ?engines,
        "decoding {}",
        args.capture.display()
    );

    let results: Vec<FrameResults> = frames.iter().map(build_results).collect();

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    if args.json {
        serde_json::to_writer_pretty(&mut out, &results).context("failed to encode results")?;
        writeln!(out)?;
    } else if let Some(draw) = args.state_at_draw {
        let filter = Filter::parse(args.filter.as_deref().unwrap_or(""));
        for frame in &results {
            writeln!(out, "Frame {} draw {draw}", frame.frame_number)?;
            let Some(rows) = frame.state_at_draw(draw, hide_unknown) else {
                tracing::warn!(
                    frame = frame.frame_number,
                    draws = frame.draw_count(),
                    "draw {draw} out of range"
                );
                continue;
            };
            write_rows(&mut out, filter.apply(&rows))?;
        }
    } else if let Some(text) = &args.filter {
        let filter = Filter::parse(text);
        for frame in &results {
            writeln!(out, "Frame {}", frame.frame_number)?;
            let rows: Vec<ResultRow> = frame
                .rows()
                .into_iter()
                .filter(|row| !(hide_unknown && row.method.starts_with(tegra_record::UNKNOWN_PREFIX)))
                .collect();
            write_rows(&mut out, filter.apply(&rows))?;
        }
    } else {
        out.write_all(report::render_capture(&results, hide_unknown).as_bytes())?;
        writeln!(out)?;
    }

    out.flush().context("failed to write output")?;
    Ok(())
}

fn write_rows<'a>(out: &mut impl Write, rows: impl Iterator<Item = &'a ResultRow>) -> Result<()> {
    for row in rows {
        writeln!(
            out,
            "{}\t{}\t{}\t{}\t{}",
            row.time, row.engine, row.reg, row.method, row.argument
        )?;
    }
    Ok(())
}
