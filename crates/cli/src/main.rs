#![deny(unsafe_code)]
//! CLI binary for rendering the wave field offline.
//!
//! Subcommands:
//! - `render` runs N synthetic frames and writes a PNG
//! - `frame` prints the last frame's draw commands as JSON
//! - `noise` writes a grayscale PNG of the noise steering the lattice
//! - `defaults` prints the default options and their schema

mod error;

use clap::{Args, Parser, Subcommand};
use error::CliError;
use std::path::{Path, PathBuf};
use std::process;
use wave_field_core::{Drag, Frame, Seed, Viewport, WaveConfig, WaveField, WaveNoise};
use wave_field_raster::lattice_noise;
use wave_field_raster::snapshot::{write_noise_png, write_png};

#[derive(Parser)]
#[command(name = "wave-field", about = "Animated wave-field background renderer")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the field for N frames and write a PNG snapshot.
    Render {
        #[command(flatten)]
        run: RunArgs,

        /// Output file path.
        #[arg(short, long, default_value = "waves.png")]
        output: PathBuf,
    },
    /// Run the field for N frames and print the last frame's draw commands.
    Frame {
        #[command(flatten)]
        run: RunArgs,
    },
    /// Write a grayscale PNG of the noise the lattice samples at one instant.
    Noise {
        /// Image width in pixels.
        #[arg(short = 'W', long, default_value_t = 800)]
        width: usize,

        /// Image height in pixels.
        #[arg(short = 'H', long, default_value_t = 600)]
        height: usize,

        /// Noise seed. Values in (0, 1) are scaled up first.
        #[arg(long, default_value_t = 42.0)]
        seed: f64,

        /// Timestamp in milliseconds; the field drifts by the wave speeds.
        #[arg(short, long, default_value_t = 0.0)]
        time_ms: f64,

        /// Options as a JSON object with camelCase keys.
        #[arg(long, default_value = "{}")]
        params: String,

        /// Output file path.
        #[arg(short, long, default_value = "noise.png")]
        output: PathBuf,
    },
    /// Print the default options and the option schema.
    Defaults,
}

#[derive(Args)]
struct RunArgs {
    /// Viewport width in pixels.
    #[arg(short = 'W', long, default_value_t = 800.0)]
    width: f64,

    /// Viewport height in pixels.
    #[arg(short = 'H', long, default_value_t = 600.0)]
    height: f64,

    /// Noise seed. Values in (0, 1) are scaled up first.
    #[arg(long, default_value_t = 42.0)]
    seed: f64,

    /// Number of frames to run.
    #[arg(short, long, default_value_t = 60)]
    frames: usize,

    /// Milliseconds between frames.
    #[arg(long, default_value_t = 1000.0 / 60.0)]
    frame_ms: f64,

    /// Timestamp of the first frame in milliseconds.
    #[arg(long, default_value_t = 0.0)]
    start_ms: f64,

    /// Options as a JSON object with camelCase keys.
    #[arg(long, default_value = "{}")]
    params: String,

    /// Straight pointer drag over the run: "x0,y0,x1,y1".
    #[arg(long)]
    drag: Option<String>,

    /// Replay a seed file instead of the flags above.
    #[arg(long, conflicts_with_all = ["width", "height", "seed", "frames", "frame_ms", "start_ms", "params", "drag"])]
    seed_file: Option<PathBuf>,

    /// Also write the resolved seed as JSON to this path.
    #[arg(long)]
    save_seed: Option<PathBuf>,
}

/// Parses "x0,y0,x1,y1" into a [`Drag`].
fn parse_drag(s: &str) -> Result<Drag, CliError> {
    let values: Vec<f64> = s
        .split(',')
        .map(|v| v.trim().parse::<f64>())
        .collect::<Result<_, _>>()
        .map_err(|e| CliError::Input(format!("invalid --drag '{s}': {e}")))?;
    match values.as_slice() {
        &[x0, y0, x1, y1] => Ok(Drag {
            from: [x0, y0],
            to: [x1, y1],
        }),
        _ => Err(CliError::Input(format!(
            "invalid --drag '{s}': expected four comma-separated numbers"
        ))),
    }
}

/// Parses `--params` into validated options.
fn parse_params(text: &str) -> Result<WaveConfig, CliError> {
    let params: serde_json::Value = serde_json::from_str(text)
        .map_err(|e| CliError::Input(format!("invalid --params JSON: {e}")))?;
    if !params.is_object() {
        return Err(CliError::Input("--params must be a JSON object".into()));
    }
    Ok(WaveConfig::from_json(&params))
}

fn read_seed(path: &Path) -> Result<Seed, CliError> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| CliError::Io(format!("cannot read {}: {e}", path.display())))?;
    serde_json::from_str(&text)
        .map_err(|e| CliError::Input(format!("invalid seed file {}: {e}", path.display())))
}

impl RunArgs {
    /// Resolves the flags (or the seed file) into a [`Seed`].
    fn to_seed(&self) -> Result<Seed, CliError> {
        if let Some(path) = &self.seed_file {
            return read_seed(path);
        }
        let mut seed = Seed::new(self.width, self.height, self.seed);
        seed.config = parse_params(&self.params)?;
        seed.frames = self.frames;
        seed.frame_ms = self.frame_ms;
        seed.start_ms = self.start_ms;
        seed.drag = self.drag.as_deref().map(parse_drag).transpose()?;
        Ok(seed)
    }

    fn replay(&self) -> Result<(Seed, WaveField, Frame), CliError> {
        let seed = self.to_seed()?;
        if let Some(path) = &self.save_seed {
            let json = serde_json::to_string_pretty(&seed)?;
            std::fs::write(path, json)
                .map_err(|e| CliError::Io(format!("cannot write {}: {e}", path.display())))?;
            log::info!("saved seed to {}", path.display());
        }
        let (field, frame) = seed.replay()?;
        Ok((seed, field, frame))
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Defaults => {
            let params = WaveConfig::default().params();
            if cli.json {
                let info = serde_json::json!({
                    "params": params,
                    "schema": WaveConfig::param_schema(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else if let Some(map) = params.as_object() {
                println!("Options:");
                for (name, value) in map {
                    println!("  {name} = {value}");
                }
            }
        }
        Command::Frame { run } => {
            let (_, _, frame) = run.replay()?;
            println!("{}", serde_json::to_string_pretty(&frame)?);
        }
        Command::Noise {
            width,
            height,
            seed,
            time_ms,
            params,
            output,
        } => {
            let config = parse_params(&params)?.validated()?;
            // Same side limits as a live background.
            Viewport::new(width as f64, height as f64)?;
            let source = lattice_noise(WaveNoise::new(seed), &config, time_ms);
            write_noise_png(&source, width, height, &output)?;
            if cli.json {
                let info = serde_json::json!({
                    "width": width,
                    "height": height,
                    "seed": seed,
                    "timeMs": time_ms,
                    "output": output.display().to_string(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                eprintln!("noise {width}x{height} (seed {seed}, t {time_ms} ms) -> {}", output.display());
            }
        }
        Command::Render { run, output } => {
            let (seed, field, frame) = run.replay()?;
            let width = seed.width.ceil() as usize;
            let height = seed.height.ceil() as usize;
            write_png(
                &frame,
                width,
                height,
                field.config().background_color,
                &output,
            )?;

            if cli.json {
                let info = serde_json::json!({
                    "width": width,
                    "height": height,
                    "frames": seed.frames,
                    "seed": seed.seed,
                    "lines": field.grid().line_count(),
                    "points": field.grid().point_count(),
                    "output": output.display().to_string(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                eprintln!(
                    "rendered {width}x{height} ({} frames, seed {}) -> {}",
                    seed.frames,
                    seed.seed,
                    output.display()
                );
            }
        }
    }

    Ok(())
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
