mod live;
mod reports;
mod simulation;
mod util;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use countdown_core::constants::{START_DATE, TARGET_DATE};
use countdown_core::{CelebrationPolicy, CountdownConfig};
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::PathBuf;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Celebrate {
    /// Launch the particle burst on the first completed tick only
    Once,
    /// Launch a fresh burst on every completed tick
    EveryTick,
}

impl From<Celebrate> for CelebrationPolicy {
    fn from(value: Celebrate) -> Self {
        match value {
            Celebrate::Once => Self::Once,
            Celebrate::EveryTick => Self::EveryTick,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    Console,
    Json,
    Markdown,
}

#[derive(Debug, Parser)]
#[command(name = "countdown-tester", version = "0.1.0")]
#[command(about = "Simulate the countdown on virtual time, or run it live in the terminal")]
struct Args {
    /// Instant the simulation starts at (RFC 3339 or YYYY-MM-DD[ HH:MM:SS], local); defaults to now
    #[arg(long)]
    at: Option<String>,

    /// Number of ticks to simulate after the initial render
    #[arg(long, default_value_t = 5)]
    ticks: u64,

    /// JSON countdown configuration; flags below override its fields
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the countdown target
    #[arg(long)]
    target: Option<String>,

    /// Override the progress start
    #[arg(long)]
    start: Option<String>,

    /// Celebration re-trigger policy [default: once]
    #[arg(long, value_enum)]
    celebrate: Option<Celebrate>,

    /// Seed for particle colours and positions
    #[arg(long)]
    seed: Option<u64>,

    /// Output report format
    #[arg(long, value_enum, default_value_t = ReportFormat::Console)]
    report: ReportFormat,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// Run against the wall clock instead of simulating
    #[arg(long)]
    live: bool,

    /// Stop live mode after this many seconds (default: until Ctrl-C)
    #[arg(long)]
    duration_secs: Option<u64>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = build_config(&args)?;

    if args.live {
        announce_banner();
        return live::run_live(config, args.duration_secs.map(Duration::from_secs)).await;
    }

    let at_ms = match args.at.as_deref() {
        Some(at) => util::parse_instant(at).context("parsing --at")?,
        None => util::now_ms(),
    };
    let started = Instant::now();
    let report = simulation::run_simulation(config, at_ms, args.ticks);

    let mut output_target = OutputTarget::new(args.output.clone())?;
    match args.report {
        ReportFormat::Json => reports::generate_json_report(&mut output_target, &report)?,
        ReportFormat::Markdown => reports::generate_markdown_report(&mut output_target, &report)?,
        ReportFormat::Console => {
            announce_banner();
            reports::generate_console_report(&mut output_target, &report)?;
            writeln!(&mut output_target, "🏁 Simulated in {:?}", started.elapsed())?;
        }
    }
    output_target.flush_inner()?;
    Ok(())
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
}

fn announce_banner() {
    println!("{}", "⏳ Countdown Tester".bright_cyan().bold());
    println!("{}", "===================".cyan());
}

fn build_config(args: &Args) -> Result<CountdownConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            CountdownConfig::from_json(&json).context("invalid countdown configuration")?
        }
        None => CountdownConfig::with_instants(
            util::local_midnight_ms(START_DATE.year, START_DATE.month, START_DATE.day)?,
            util::local_midnight_ms(TARGET_DATE.year, TARGET_DATE.month, TARGET_DATE.day)?,
        ),
    };
    if let Some(start) = args.start.as_deref() {
        config.start_ms = util::parse_instant(start).context("parsing --start")?;
    }
    if let Some(target) = args.target.as_deref() {
        config.target_ms = util::parse_instant(target).context("parsing --target")?;
    }
    if let Some(celebrate) = args.celebrate {
        config.celebration = celebrate.into();
    }
    if args.seed.is_some() {
        config.rng_seed = args.seed;
    }
    config.validate().context("invalid countdown configuration")?;
    Ok(config)
}

enum OutputTarget {
    Stdout(BufWriter<std::io::Stdout>),
    File(BufWriter<File>),
}

impl OutputTarget {
    fn new(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Self::File(BufWriter::new(file)))
        } else {
            Ok(Self::Stdout(BufWriter::new(stdout())))
        }
    }

    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Self::Stdout(w) => w,
            Self::File(w) => w,
        }
    }

    fn flush_inner(&mut self) -> std::io::Result<()> {
        match self {
            Self::Stdout(w) => w.flush(),
            Self::File(w) => w.flush(),
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.writer().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_args() -> Args {
        Args {
            at: None,
            ticks: 1,
            target: None,
            start: None,
            config: None,
            celebrate: None,
            seed: None,
            report: ReportFormat::Json,
            output: None,
            live: false,
            duration_secs: None,
            verbose: false,
        }
    }

    #[test]
    fn default_config_spans_the_default_window() {
        let config = build_config(&base_args()).unwrap();
        let days = config.total_span_ms() / 86_400_000;
        // 55 days, give or take a DST shift between the two midnights.
        assert!((54..=55).contains(&days), "{days}");
    }

    #[test]
    fn overrides_and_policy_flow_into_config() {
        let args = Args {
            start: Some("2030-01-01T00:00:00Z".to_string()),
            target: Some("2030-01-02T00:00:00Z".to_string()),
            celebrate: Some(Celebrate::EveryTick),
            seed: Some(99),
            ..base_args()
        };
        let config = build_config(&args).unwrap();
        assert_eq!(config.total_span_ms(), 86_400_000);
        assert_eq!(config.celebration, CelebrationPolicy::EveryTick);
        assert_eq!(config.rng_seed, Some(99));
    }

    #[test]
    fn inverted_window_is_rejected() {
        let args = Args {
            start: Some("2030-01-02".to_string()),
            target: Some("2030-01-01".to_string()),
            ..base_args()
        };
        let err = build_config(&args).unwrap_err();
        assert!(format!("{err:#}").contains("must come after start"));
    }

    #[test]
    fn config_file_supplies_fields_and_flags_override_them() {
        let path = std::env::temp_dir()
            .join(format!("countdown-config-{}.json", std::process::id()));
        std::fs::write(
            &path,
            r#"{ "start_ms": 0, "target_ms": 60000, "celebration": "every-tick", "particle_count": 3 }"#,
        )
        .unwrap();
        let from_file = build_config(&Args {
            config: Some(path.clone()),
            ..base_args()
        })
        .unwrap();
        assert_eq!(from_file.total_span_ms(), 60_000);
        assert_eq!(from_file.particle_count, 3);
        assert_eq!(from_file.celebration, CelebrationPolicy::EveryTick);

        let overridden = build_config(&Args {
            config: Some(path.clone()),
            celebrate: Some(Celebrate::Once),
            seed: Some(4),
            ..base_args()
        })
        .unwrap();
        assert_eq!(overridden.celebration, CelebrationPolicy::Once);
        assert_eq!(overridden.rng_seed, Some(4));
        assert_eq!(overridden.particle_count, 3);
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn malformed_config_file_is_rejected() {
        let path = std::env::temp_dir().join(format!("countdown-bad-{}.json", std::process::id()));
        std::fs::write(&path, "{ nope").unwrap();
        let err = build_config(&Args {
            config: Some(path.clone()),
            ..base_args()
        })
        .unwrap_err();
        assert!(format!("{err:#}").contains("invalid countdown configuration"));
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn output_target_writes_to_file() {
        let path = std::env::temp_dir().join(format!("countdown-out-{}", std::process::id()));
        let mut target = OutputTarget::new(Some(path.clone())).unwrap();
        writeln!(&mut target, "hello").unwrap();
        target.flush_inner().unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "hello\n");
        let _ = std::fs::remove_file(path);
    }
}
