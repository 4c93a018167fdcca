use anyhow::{Context, Result};
use biosim_lib::{
    error::HrvError,
    io::{
        fasta,
        heartbeat::{self, HeartbeatColumns},
    },
    pipeline::{run_hrv_pipeline, HrvPipelineResult},
    plot::{figure_from_atp, Figure, PlotBackend, Series},
    sim::{
        atp::{simulate_atp, AtpConfig, GaussianNoise},
        pcr::simulate_cycle,
    },
};
use clap::{Parser, Subcommand};
use log::info;
use plotters::prelude::*;
use std::path::{Path, PathBuf};

const DEFAULT_HRV_INPUT: &str = "simulated_heart_signal.csv";

#[derive(Parser)]
#[command(
    name = "biosim",
    version,
    about = "biosim: small simulations of biological processes"
)]
struct Cli {
    /// Defaults to `hrv` with its default arguments
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute SDNN/RMSSD from a CSV of timestamps and a binary beat signal
    Hrv {
        #[arg(long, default_value = DEFAULT_HRV_INPUT)]
        input: PathBuf,
        #[arg(long, default_value = heartbeat::DEFAULT_TIME_COLUMN)]
        time_col: String,
        #[arg(long, default_value = heartbeat::DEFAULT_SIGNAL_COLUMN)]
        signal_col: String,
        /// Print the full result as JSON instead of the text report
        #[arg(long)]
        json: bool,
    },
    /// Simulate ATP output of a mitochondria population over time
    Atp {
        /// Glucose availability (low / medium / high by default)
        #[arg(long)]
        glucose: String,
        /// Oxygen availability (low / normal by default)
        #[arg(long)]
        oxygen: String,
        #[arg(long, default_value_t = 500)]
        mitochondria: u32,
        #[arg(long, default_value_t = 10)]
        seconds: usize,
        /// Seed for the Gaussian noise; random when omitted
        #[arg(long)]
        seed: Option<u64>,
        /// TOML file overriding the efficiency tables and noise parameters
        #[arg(long)]
        config: Option<PathBuf>,
        /// Render the series to a PNG, one point per simulated second
        #[arg(long)]
        plot: Option<PathBuf>,
        #[arg(long)]
        json: bool,
    },
    /// Run one PCR cycle (denature, anneal, extend) over a FASTA sequence
    Pcr {
        #[arg(long, default_value = "example_input.fasta")]
        input: PathBuf,
        #[arg(long, default_value = "ATGC")]
        primer: String,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let command = cli.command.unwrap_or_else(|| Commands::Hrv {
        input: PathBuf::from(DEFAULT_HRV_INPUT),
        time_col: heartbeat::DEFAULT_TIME_COLUMN.into(),
        signal_col: heartbeat::DEFAULT_SIGNAL_COLUMN.into(),
        json: false,
    });
    match command {
        Commands::Hrv {
            input,
            time_col,
            signal_col,
            json,
        } => cmd_hrv(&input, time_col, signal_col, json)?,
        Commands::Atp {
            glucose,
            oxygen,
            mitochondria,
            seconds,
            seed,
            config,
            plot,
            json,
        } => cmd_atp(
            &glucose,
            &oxygen,
            mitochondria,
            seconds,
            seed,
            config.as_deref(),
            plot.as_deref(),
            json,
        )?,
        Commands::Pcr { input, primer } => cmd_pcr(&input, &primer)?,
    }
    Ok(())
}

fn cmd_hrv(input: &Path, time_col: String, signal_col: String, json: bool) -> Result<()> {
    let columns = HeartbeatColumns {
        time: time_col,
        signal: signal_col,
    };
    if !json {
        println!("Analyzing HRV from simulated heartbeat signal...");
    }
    let beats = heartbeat::load_beat_times(input, &columns)
        .with_context(|| format!("loading heartbeat data from {}", input.display()))?;
    match run_hrv_pipeline(beats) {
        Ok(result) if json => println!("{}", serde_json::to_string(&result)?),
        Ok(result) => print_hrv_report(&result),
        Err(HrvError::InsufficientBeats { found }) => {
            info!("only {found} beat(s) detected");
            if json {
                println!("{}", serde_json::json!({ "error": "insufficient_beats", "found": found }));
            } else {
                println!("Not enough beats to calculate HRV.");
            }
        }
    }
    Ok(())
}

fn print_hrv_report(result: &HrvPipelineResult) {
    let intervals: Vec<String> = result
        .rr
        .rounded(3)
        .iter()
        .map(|v| v.to_string())
        .collect();
    println!("Beats Detected: {}", result.beat_count);
    println!("RR Intervals (sec): [{}]", intervals.join(" "));
    println!("SDNN: {:.2} ms", result.hrv.sdnn);
    println!("RMSSD: {:.2} ms", result.hrv.rmssd);
}

#[allow(clippy::too_many_arguments)]
fn cmd_atp(
    glucose: &str,
    oxygen: &str,
    mitochondria: u32,
    seconds: usize,
    seed: Option<u64>,
    config: Option<&Path>,
    plot: Option<&Path>,
    json: bool,
) -> Result<()> {
    let cfg = match config {
        Some(path) => AtpConfig::load(path)?,
        None => AtpConfig::default(),
    };
    let mut noise = match seed {
        Some(seed) => GaussianNoise::seeded(cfg.noise, seed)?,
        None => GaussianNoise::from_entropy(cfg.noise)?,
    };
    let run = simulate_atp(&cfg, glucose, oxygen, mitochondria, seconds, &mut noise)?;
    if json {
        println!("{}", serde_json::to_string(&run)?);
    } else {
        println!("Total ATP Produced: {} molecules", run.total_molecules());
    }
    if let Some(path) = plot {
        let fig = figure_from_atp(&run);
        PngBackend::new(path)
            .draw(&fig)
            .with_context(|| format!("rendering plot to {}", path.display()))?;
        info!("wrote ATP plot to {}", path.display());
    }
    Ok(())
}

fn cmd_pcr(input: &Path, primer: &str) -> Result<()> {
    let dna = fasta::read_fasta(input)
        .with_context(|| format!("reading FASTA from {}", input.display()))?;
    let cycle = simulate_cycle(&dna, primer);
    println!("Original Dna: {}", cycle.template);
    println!("Primer Found: {}", cycle.annealed);
    println!(
        "Extended Strand: {}",
        cycle
            .extended
            .as_deref()
            .unwrap_or("Primer not found in sequence")
    );
    Ok(())
}

/// Renders figures to a PNG file via plotters.
struct PngBackend<'a> {
    path: &'a Path,
    size: (u32, u32),
}

impl<'a> PngBackend<'a> {
    fn new(path: &'a Path) -> Self {
        Self {
            path,
            size: (1000, 500),
        }
    }
}

impl PlotBackend for PngBackend<'_> {
    fn draw(&mut self, fig: &Figure) -> Result<()> {
        let root = BitMapBackend::new(self.path, self.size).into_drawing_area();
        root.fill(&WHITE)?;
        let (x_min, mut x_max, y_min, mut y_max) = fig.bounds().unwrap_or((0.0, 1.0, 0.0, 1.0));
        if x_max <= x_min {
            x_max = x_min + 1.0;
        }
        if y_max <= y_min {
            y_max = y_min + 1.0;
        }
        let mut chart = ChartBuilder::on(&root)
            .margin(10)
            .caption(
                fig.title.clone().unwrap_or_else(|| "Plot".into()),
                ("sans-serif", 24),
            )
            .x_label_area_size(40)
            .y_label_area_size(60)
            .build_cartesian_2d(x_min..x_max, y_min..y_max)?;
        chart
            .configure_mesh()
            .x_desc(fig.x.label.clone().unwrap_or_default())
            .y_desc(fig.y.label.clone().unwrap_or_default())
            .draw()?;
        for series in &fig.series {
            match series {
                Series::Line(line) => {
                    let (r, g, b) = line.style.color.rgb();
                    let color = RGBColor(r, g, b);
                    let stroke = color.stroke_width(line.style.width.round() as u32);
                    chart.draw_series(LineSeries::new(
                        line.points.iter().map(|p| (p[0], p[1])),
                        stroke,
                    ))?;
                    if line.style.marker {
                        chart.draw_series(
                            line.points
                                .iter()
                                .map(|p| Circle::new((p[0], p[1]), 3, color.filled())),
                        )?;
                    }
                }
            }
        }
        root.present()?;
        Ok(())
    }
}
