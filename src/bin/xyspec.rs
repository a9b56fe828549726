use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;
use xyspec::{CanvasDimensions, spec, stats, storage};

#[derive(Parser, Debug)]
#[command(
    name = "xyspec",
    version,
    about = "Build interactive Vega scatter-plot specs for MDS/PCA coordinates"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build a spec from plot parameters and a row table.
    Build(BuildArgs),
}

#[derive(Args, Debug)]
struct BuildArgs {
    /// Plot parameters as JSON (x, y, title, cols, status_colours, counts).
    #[arg(short, long)]
    params: PathBuf,
    /// Row table (.json array of objects or .csv with header).
    #[arg(short, long)]
    rows: PathBuf,
    /// Width of the hosting container in pixels (default 1000).
    #[arg(long, default_value_t = 1000.0)]
    width: f64,
    /// Height of the hosting container in pixels (default 600).
    #[arg(long, default_value_t = 600.0)]
    height: f64,
    /// Write the Vega JSON to this file instead of stdout.
    #[arg(long)]
    out: Option<PathBuf>,
    /// Reject malformed parameters or rows instead of passing them through.
    #[arg(long, default_value_t = false)]
    strict: bool,
    /// Print row statistics to stderr.
    #[arg(long, default_value_t = false)]
    stats: bool,
}

fn fmt_opt(v: Option<f64>) -> String {
    match v {
        Some(x) if x.is_finite() => {
            let s = format!("{:.4}", x);
            s.trim_end_matches('0').trim_end_matches('.').to_string()
        }
        _ => "NA".to_string(),
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Build(args) => cmd_build(args),
    }
}

fn cmd_build(args: BuildArgs) -> Result<()> {
    let params = storage::load_params(&args.params)?;
    let rows = storage::load_rows(&args.rows)?;
    let dims = CanvasDimensions::new(args.width, args.height);

    let vis = if args.strict {
        spec::build_checked(&params, &rows, dims)?
    } else {
        spec::build(&params, &rows, dims)
    };

    match args.out.as_ref() {
        Some(path) => {
            storage::save_spec(&vis, path)?;
            eprintln!("Wrote spec for {} rows to {}", rows.len(), path.display());
        }
        None => {
            let mut out = std::io::stdout().lock();
            serde_json::to_writer_pretty(&mut out, &vis)?;
            writeln!(out)?;
        }
    }

    if args.stats {
        let s = stats::summarize(&params, &rows);
        eprintln!("rows={} missing_status={}", s.rows, s.missing_status);
        for (status, count) in &s.status_counts {
            eprintln!("  status {:>2}: {}", status, count);
        }
        for e in [&s.x, &s.y] {
            eprintln!(
                "  {}  count={} missing={}  min={} max={}",
                e.field,
                e.count,
                e.missing,
                fmt_opt(e.min),
                fmt_opt(e.max)
            );
        }
    }
    Ok(())
}
