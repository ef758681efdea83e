use clap::{Args, Parser, Subcommand};
use sl_core::Catalog;
use sl_lab::{Bench, ChartSource, ControlKind, ExperimentId, LabConfig, LabError, LabResult};
use sl_sweep::{TickOutcome, VirtualScheduler, WallClockScheduler};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser)]
#[command(name = "sl-cli")]
#[command(about = "semilab CLI - Virtual semiconductor laboratory", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List available experiments
    List,
    /// Show the controls of an experiment
    Controls {
        /// Experiment id (e.g., band-gap, diode-iv)
        experiment: String,
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Print the live readout at the given settings
    Eval {
        #[command(flatten)]
        bench: BenchArgs,
    },
    /// Record one point per --point (or one at the base settings)
    Record {
        #[command(flatten)]
        bench: BenchArgs,
        /// Comma-separated control settings for one recording, e.g. "field_t=0.5,current_ma=10"
        #[arg(long = "point")]
        points: Vec<String>,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Generate the experiment's full curve
    Curve {
        #[command(flatten)]
        bench: BenchArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Run the experiment's timed sweep from the current setting
    Sweep {
        #[command(flatten)]
        bench: BenchArgs,
        /// Wait out the real tick interval instead of a virtual clock
        #[arg(long)]
        realtime: bool,
        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(Args)]
struct BenchArgs {
    /// Experiment id (e.g., band-gap, diode-iv)
    experiment: String,
    /// Control setting, repeatable
    #[arg(long = "set", value_name = "NAME=VALUE")]
    settings: Vec<String>,
    /// Lab configuration YAML
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Args)]
struct OutputArgs {
    /// CSV output file or directory (optional, defaults to stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Print chart points for two column headers, e.g. "Voltage (V),Current (A)"
    #[arg(long, value_name = "X,Y")]
    chart: Option<String>,
    /// Chart only the curve whose key column matches, e.g. "Light Intensity (%)=30"
    #[arg(long, value_name = "HEADER=VALUE", requires = "chart")]
    curve: Option<String>,
    /// Export and chart the companion table (e.g. LDR resistance against intensity)
    #[arg(long, conflicts_with = "curve")]
    companion: bool,
}

fn main() -> LabResult<()> {
    // Logs go to stderr so CSV on stdout stays clean
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::List => cmd_list(),
        Commands::Controls { experiment, config } => cmd_controls(&experiment, config.as_deref()),
        Commands::Eval { bench } => cmd_eval(&bench),
        Commands::Record {
            bench,
            points,
            output,
        } => cmd_record(&bench, &points, &output),
        Commands::Curve { bench, output } => cmd_curve(&bench, &output),
        Commands::Sweep {
            bench,
            realtime,
            output,
        } => cmd_sweep(&bench, realtime, &output),
    }
}

fn load_config(path: Option<&Path>) -> LabResult<LabConfig> {
    match path {
        Some(path) => LabConfig::load_yaml(path),
        None => Ok(LabConfig::default()),
    }
}

fn split_assignment(raw: &str) -> LabResult<(&str, &str)> {
    raw.split_once('=')
        .map(|(name, value)| (name.trim(), value.trim()))
        .ok_or_else(|| LabError::InvalidValue {
            name: raw.to_string(),
            value: "expected NAME=VALUE".to_string(),
        })
}

fn apply_settings<'a>(
    bench: &mut Bench,
    settings: impl IntoIterator<Item = &'a str>,
) -> LabResult<()> {
    for raw in settings {
        let (name, value) = split_assignment(raw)?;
        bench.set(name, value)?;
    }
    Ok(())
}

fn open_bench(args: &BenchArgs) -> LabResult<Bench> {
    let config = load_config(args.config.as_deref())?;
    let id = ExperimentId::from_id(&args.experiment)?;
    let mut bench = Bench::new(id, &config)?;
    apply_settings(&mut bench, args.settings.iter().map(String::as_str))?;
    Ok(bench)
}

fn cmd_list() -> LabResult<()> {
    println!("Experiments:");
    for id in ExperimentId::ALL {
        println!("  {:<18} {}", id.id(), id.label());
    }
    Ok(())
}

fn cmd_controls(experiment: &str, config: Option<&Path>) -> LabResult<()> {
    let config = load_config(config)?;
    let bench = Bench::new(ExperimentId::from_id(experiment)?, &config)?;
    println!("Controls of {}:", bench.id().label());
    for spec in bench.controls().specs() {
        let current = bench
            .controls()
            .get(spec.name)
            .map(|v| v.to_string())
            .unwrap_or_default();
        let domain = match &spec.kind {
            ControlKind::Range { min, max, step } => {
                format!("{min} to {max} step {step} {}", spec.unit)
            }
            ControlKind::Choice { options, .. } => options
                .iter()
                .map(|(id, _)| *id)
                .collect::<Vec<_>>()
                .join(" | "),
            ControlKind::Toggle => "true | false".to_string(),
        };
        let domain = domain.trim_end();
        println!("  {:<24} = {current:<12} [{domain}]  {}", spec.name, spec.label);
    }
    Ok(())
}

fn cmd_eval(args: &BenchArgs) -> LabResult<()> {
    let bench = open_bench(args)?;
    print_readout(&bench)
}

fn cmd_record(args: &BenchArgs, points: &[String], output: &OutputArgs) -> LabResult<()> {
    let mut bench = open_bench(args)?;
    if points.is_empty() {
        bench.record()?;
    }
    for point in points {
        let settings = point.split(',').filter(|s| !s.trim().is_empty());
        apply_settings(&mut bench, settings)?;
        bench.record()?;
    }
    info!(experiment = %bench.id(), points = bench.series().len(), "recording done");
    finish(&bench, output)
}

fn cmd_curve(args: &BenchArgs, output: &OutputArgs) -> LabResult<()> {
    let mut bench = open_bench(args)?;
    let n = bench.generate_curve()?;
    info!(experiment = %bench.id(), points = n, "curve generated");
    finish(&bench, output)
}

fn cmd_sweep(args: &BenchArgs, realtime: bool, output: &OutputArgs) -> LabResult<()> {
    let mut bench = open_bench(args)?;
    let ticks = if realtime {
        let mut clock = WallClockScheduler::new();
        bench.start_sweep(&mut clock)?;
        let mut ticks = 0;
        while bench.is_sweeping() {
            let Some(timer) = clock.wait_next() else {
                break;
            };
            match bench.on_timer(timer, &mut clock)? {
                TickOutcome::Ignored => {}
                TickOutcome::Recorded { value, .. } | TickOutcome::Finished { value } => {
                    ticks += 1;
                    eprintln!("  recorded at {value}");
                }
            }
        }
        ticks
    } else {
        let mut clock = VirtualScheduler::new();
        bench.start_sweep(&mut clock)?;
        bench.run_sweep(&mut clock)?
    };
    info!(experiment = %bench.id(), ticks, "sweep complete");
    finish(&bench, output)
}

fn print_readout(bench: &Bench) -> LabResult<()> {
    println!("{}:", bench.id().label());
    for (name, value) in bench.settings() {
        println!("  {name} = {value}");
    }
    println!();
    for reading in bench.readout()? {
        println!("  {reading}");
    }
    Ok(())
}

fn chart_source(output: &OutputArgs) -> LabResult<ChartSource<'_>> {
    if output.companion {
        return Ok(ChartSource::Companion);
    }
    let Some(curve) = &output.curve else {
        return Ok(ChartSource::Series);
    };
    let invalid = || LabError::InvalidValue {
        name: "curve".to_string(),
        value: curve.clone(),
    };
    let (key_header, value) = curve.rsplit_once('=').ok_or_else(invalid)?;
    let value = value.trim().parse::<f64>().map_err(|_| invalid())?;
    Ok(ChartSource::Curve {
        key_header: key_header.trim(),
        value,
    })
}

fn finish(bench: &Bench, output: &OutputArgs) -> LabResult<()> {
    let summary = bench.summary()?;
    if !summary.is_empty() && !output.companion {
        eprintln!("Summary:");
        for reading in &summary {
            eprintln!("  {reading}");
        }
    }

    if let Some(chart) = &output.chart {
        let (x, y) = chart.split_once(',').ok_or_else(|| LabError::InvalidValue {
            name: "chart".to_string(),
            value: chart.clone(),
        })?;
        let source = chart_source(output)?;
        println!("{}", bench.chart_json_from(source, x.trim(), y.trim())?);
    }

    let (csv, filename, rows) = if output.companion {
        let rows = bench.companion().map_or(0, |table| table.len());
        (bench.export_companion_csv()?, bench.companion_filename()?, rows)
    } else {
        let csv = bench.export_csv_with_summary()?;
        (csv, bench.export_filename(), bench.series().len())
    };
    match &output.output {
        Some(path) => {
            let path = if path.is_dir() {
                path.join(filename)
            } else {
                path.clone()
            };
            std::fs::write(&path, csv)?;
            println!("✓ Exported {rows} data points to {}", path.display());
        }
        None if output.chart.is_none() => print!("{csv}"),
        None => {}
    }
    Ok(())
}
