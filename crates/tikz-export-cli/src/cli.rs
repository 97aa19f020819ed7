//! Command-line interface for the tikz-export utility
//!
//! Reads a JSON-serialized scene and converts it into PGF/TikZ markup.

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use tracing::{debug, info};

use tikz_export::core::logging::init_logging;
use tikz_export::elements::TikzPicture;
use tikz_export::scene::{NodeTag, Scene};
use tikz_export::ExportConfig;

/// tikz-export - Convert plot scenes to PGF/TikZ
#[derive(Parser)]
#[command(name = "tikz-export")]
#[command(about = "Convert serialized plot scenes into PGF/TikZ (pgfplots) markup")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Set log level (trace|debug|info|warn|error)
    #[arg(long, value_enum, default_value_t = LogLevel::Warn)]
    pub log_level: LogLevel,

    /// Set log format (compact|pretty|json)
    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

/// Log level options
#[derive(Copy, Clone, Debug, clap::ValueEnum, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Log format options
#[derive(Copy, Clone, Debug, clap::ValueEnum, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Compact => "compact",
            LogFormat::Pretty => "pretty",
            LogFormat::Json => "json",
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert a scene to TikZ
    Convert {
        /// Input file containing the JSON scene (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output file for the TikZ markup (use - for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Axis width in millimeters (0 selects the default)
        #[arg(long, default_value_t = 0)]
        width: u32,

        /// Axis height in millimeters (0 selects the default)
        #[arg(long, default_value_t = 0)]
        height: u32,

        /// pgfplots compatibility level, e.g. 1.18
        #[arg(long)]
        compat: Option<String>,
    },

    /// Show supported scene node types
    Types {
        /// Show in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Check that a scene loads and binds
    Validate {
        /// Input file to validate (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
}

#[derive(Serialize)]
struct NodeTypeInfo {
    name: &'static str,
    description: &'static str,
    plot: bool,
}

fn describe(tag: NodeTag) -> &'static str {
    match tag {
        NodeTag::Group => "Plain container",
        NodeTag::AxisContainer => "Axes holding plots, legend and title",
        NodeTag::LinePlot => "2D polyline with optional markers",
        NodeTag::Surface => "3D surface on a dense grid",
        NodeTag::FastSurface => "3D surface from a flat vertex list",
        NodeTag::ErrorBarPlot => "Line plot with y error bars",
        NodeTag::Legend => "Legend of the axis",
        NodeTag::LegendItem => "Caption of one plot",
        NodeTag::Title => "Axis title",
    }
}

/// Main CLI application
pub struct TikzExportApp;

impl TikzExportApp {
    pub fn new() -> Self {
        Self
    }

    /// Run the application with the given CLI arguments
    pub fn run(&mut self, cli: Cli) -> Result<()> {
        // Environment variables take precedence over flags
        let log_level_str = std::env::var("TIKZ_EXPORT_LOG_LEVEL")
            .ok()
            .or_else(|| std::env::var("RUST_LOG").ok())
            .or_else(|| Some(cli.log_level.as_str().to_string()));

        let log_format_str = std::env::var("TIKZ_EXPORT_LOG_FORMAT")
            .ok()
            .or_else(|| Some(cli.log_format.as_str().to_string()));

        if let Err(e) = init_logging(log_level_str.as_deref(), log_format_str.as_deref()) {
            eprintln!("Warning: Failed to initialize logging: {}", e);
        }

        if cli.verbose {
            eprintln!("tikz-export v{}", env!("CARGO_PKG_VERSION"));
        }

        match cli.command {
            Commands::Convert {
                input,
                output,
                width,
                height,
                compat,
            } => {
                let mut config = ExportConfig::new().with_canvas_size(width, height);
                if let Some(version) = compat {
                    config = config.with_compat(version);
                }
                self.convert_command(input, output, &config, cli.verbose)
            }
            Commands::Types { json } => self.types_command(json, cli.verbose),
            Commands::Validate { input } => self.validate_command(input, cli.verbose),
        }
    }

    /// Handle the convert command
    fn convert_command(
        &self,
        input: Option<PathBuf>,
        output: Option<PathBuf>,
        config: &ExportConfig,
        verbose: bool,
    ) -> Result<()> {
        let scene = self.read_scene(input, verbose)?;

        let mut writer = io::BufWriter::new(self.open_output(output.as_ref())?);
        tikz_export::export(&scene, &mut writer, config)?;
        writer.flush()?;

        if verbose {
            match output {
                Some(path) if path.to_string_lossy() != "-" => {
                    eprintln!("Wrote TikZ to {}", path.display())
                }
                _ => eprintln!("Wrote TikZ to stdout"),
            }
        }

        Ok(())
    }

    /// Handle the types command
    pub fn types_command(&self, json: bool, verbose: bool) -> Result<()> {
        if verbose {
            eprintln!("Listing supported node types");
        }

        let types: Vec<NodeTypeInfo> = NodeTag::ALL
            .iter()
            .map(|tag| NodeTypeInfo {
                name: tag.name(),
                description: describe(*tag),
                plot: tag.is_plot(),
            })
            .collect();

        if json {
            let listing = serde_json::json!({
                "supported_types": types,
                "total": types.len(),
            });
            println!("{}", serde_json::to_string_pretty(&listing)?);
        } else {
            println!("Supported node types:");
            for info in &types {
                let marker = if info.plot { "*" } else { " " };
                println!("  {} {:<15} - {}", marker, info.name, info.description);
            }
            println!();
            println!("Total: {} node types (* = drawn as a plot)", types.len());
        }

        Ok(())
    }

    /// Handle the validate command
    fn validate_command(&self, input: Option<PathBuf>, verbose: bool) -> Result<()> {
        let scene = self.read_scene(input, verbose)?;

        let result = match TikzPicture::bind(&scene, &ExportConfig::default()) {
            Ok(picture) => {
                let plots = picture.axis().map_or(0, |axis| axis.plots().len());
                if picture.is_empty() {
                    println!("✓ Valid scene (nothing to draw)");
                } else {
                    println!("✓ Valid scene with {} plot(s)", plots);
                }
                info!(plots, "Scene validated");
                Ok(())
            }
            Err(e) => {
                println!("✗ Invalid scene: {}", e);
                Err(e.into())
            }
        };
        result
    }

    fn read_scene(&self, input: Option<PathBuf>, verbose: bool) -> Result<Scene> {
        let content = self.read_input(input)?;
        if verbose {
            eprintln!("Read {} bytes of input", content.len());
        }

        let scene = Scene::from_json(&content)?;
        debug!(nodes = scene.nodes().count(), "Scene loaded");
        Ok(scene)
    }

    /// Read input from file or stdin
    pub fn read_input(&self, input: Option<PathBuf>) -> Result<String> {
        match input {
            Some(path) if path.to_string_lossy() != "-" => fs::read_to_string(&path)
                .map_err(|e| anyhow!("Failed to read input file '{}': {}", path.display(), e)),
            _ => {
                let mut content = String::new();
                io::stdin().read_to_string(&mut content)?;
                Ok(content)
            }
        }
    }

    /// Open the output file, or stdout
    pub fn open_output(&self, output: Option<&PathBuf>) -> Result<Box<dyn Write>> {
        match output {
            Some(path) if path.to_string_lossy() != "-" => {
                let file = fs::File::create(path).map_err(|e| {
                    anyhow!("Failed to write output file '{}': {}", path.display(), e)
                })?;
                Ok(Box::new(file))
            }
            _ => Ok(Box::new(io::stdout().lock())),
        }
    }
}

impl Default for TikzExportApp {
    fn default() -> Self {
        Self::new()
    }
}
