use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "groovewheel", version)]
struct Cli {
    /// Log layout decisions and search statistics.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write one SVG per wheel of a loop.
    Wheels(WheelsArgs),
    /// Print the wheel layout per channel without writing anything.
    Check(CheckArgs),
    /// Write the calibration wheels.
    Calibrate(CalibrateArgs),
}

#[derive(Parser, Debug)]
struct WheelsArgs {
    /// Input loop JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output directory; existing SVG files in it are removed first.
    #[arg(long)]
    out: PathBuf,

    /// Wheel configuration JSON; defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Leave out channels that cannot be split instead of failing.
    #[arg(long)]
    skip_infeasible: bool,

    /// Worker threads for per-channel synthesis.
    #[arg(long)]
    threads: Option<usize>,
}

#[derive(Parser, Debug)]
struct CheckArgs {
    /// Input loop JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Wheel configuration JSON; defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct CalibrateArgs {
    /// Output directory.
    #[arg(long)]
    out: PathBuf,

    /// Wheel configuration JSON; defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match cli.cmd {
        Command::Wheels(args) => cmd_wheels(args),
        Command::Check(args) => cmd_check(args),
        Command::Calibrate(args) => cmd_calibrate(args),
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn read_config(path: Option<&Path>) -> anyhow::Result<groovewheel::WheelConfig> {
    let config = match path {
        Some(p) => groovewheel::WheelConfig::from_json_file(p)
            .with_context(|| format!("load config '{}'", p.display()))?,
        None => groovewheel::WheelConfig::default(),
    };
    config.validate()?;
    Ok(config)
}

fn read_loop(path: &Path) -> anyhow::Result<groovewheel::LoopSource> {
    groovewheel::LoopSource::from_json_file(path)
        .with_context(|| format!("load loop '{}'", path.display()))
}

/// Remove SVG files left from an earlier run; other files are kept.
fn clear_svgs(dir: &Path) -> anyhow::Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("create output dir '{}'", dir.display()))?;
    let entries =
        std::fs::read_dir(dir).with_context(|| format!("list output dir '{}'", dir.display()))?;
    for entry in entries {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|e| e == "svg") {
            std::fs::remove_file(&path)
                .with_context(|| format!("remove stale '{}'", path.display()))?;
        }
    }
    Ok(())
}

fn cmd_wheels(args: WheelsArgs) -> anyhow::Result<()> {
    let config = read_config(args.config.as_deref())?;
    let source = read_loop(&args.in_path)?;
    let threading = groovewheel::BuildThreading {
        parallel: true,
        threads: args.threads,
    };
    let channels = groovewheel::build_channels(&source, &config, &threading)?;

    let mut wheels = Vec::new();
    for channel in channels {
        match channel.result {
            Ok(built) => wheels.extend(built),
            Err(e @ groovewheel::GrooveError::Infeasible { .. }) if args.skip_infeasible => {
                tracing::warn!(channel = %channel.channel, "skipping channel: {e}");
            }
            Err(e) => {
                return Err(e).with_context(|| format!("build channel '{}'", channel.channel));
            }
        }
    }

    clear_svgs(&args.out)?;
    for wheel in &wheels {
        let out_path = args.out.join(format!("{}.svg", wheel.file_stem(&source)));
        groovewheel::WheelDocument::new(&wheel.spec, &wheel.path, wheel.labels(&source))
            .save(&out_path)?;
        tracing::info!(
            channel = %wheel.channel,
            triggers = wheel.spec.triggers.len(),
            "wrote {}",
            out_path.display()
        );
    }
    eprintln!("wrote {} wheels to {}", wheels.len(), args.out.display());
    Ok(())
}

fn cmd_check(args: CheckArgs) -> anyhow::Result<()> {
    let config = read_config(args.config.as_deref())?;
    let source = read_loop(&args.in_path)?;
    let timeline = source.timeline()?;

    println!("{} ({} bars, {:.2} rpm)", source.title, source.bars(), source.rpm());
    let mut failed = 0usize;
    for (channel, positions) in timeline.normalize_all(&source.channels)? {
        let label = source.label(&channel);
        match groovewheel::disentangle(&channel, &positions, &config) {
            Ok(layout) => {
                let sizes: Vec<String> = layout.wheels().iter().map(|w| w.len().to_string()).collect();
                println!(
                    "  {label}: {} wheel(s), triggers {}",
                    layout.wheel_count(),
                    sizes.join(" + ")
                );
            }
            Err(e) => {
                failed += 1;
                println!("  {label}: {e}");
            }
        }
    }
    if failed > 0 {
        anyhow::bail!("{failed} channel(s) cannot be cut");
    }
    Ok(())
}

fn cmd_calibrate(args: CalibrateArgs) -> anyhow::Result<()> {
    let config = read_config(args.config.as_deref())?;
    let wheels = groovewheel::standard_wheels(&config)?;
    for wheel in &wheels {
        let out_path = args.out.join(format!("{}.svg", wheel.name));
        groovewheel::WheelDocument::new(&wheel.spec, &wheel.path, wheel.labels.clone())
            .save(&out_path)?;
        tracing::info!("wrote {}", out_path.display());
    }
    eprintln!("wrote {} calibration wheels to {}", wheels.len(), args.out.display());
    Ok(())
}
