//! Region mask command line.
//!
//! Builds a gridded `AREA` mask from a GeoJSON boundary and renders the
//! diagnostic plots:
//! - `build`: boundary → grid → mask → NetCDF, optionally zoom plot
//! - `plot-mask`: zoomed view of an existing mask file
//! - `plot-concentration`: concentration map of any lat/lon field

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use mask_common::bbox::parse_extent;
use mask_common::{BoundingBox, AREA_VARIABLE};
use region_mask::{build, plot_concentration_file, plot_mask_file, PipelineConfig};
use renderer::basemap::BORDER_COLOR;
use renderer::{Color, ConcentrationMapOptions, OverlayLayer, ZoomPlotOptions};
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "region-mask")]
#[command(about = "Rasterize region boundaries onto model grids and plot the result")]
struct Args {
    /// Log level
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    log_json: bool,

    /// TrueType font for figure text
    #[arg(long, global = true, env = "REGION_MASK_FONT")]
    font: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build a mask file from a boundary document
    Build {
        /// YAML configuration file
        #[arg(short, long, env = "REGION_MASK_CONFIG")]
        config: Option<PathBuf>,

        /// GeoJSON boundary document
        #[arg(long)]
        input: Option<PathBuf>,

        /// NetCDF output path
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Mask variable name
        #[arg(long)]
        variable: Option<String>,

        /// Render the zoom plot to this PNG
        #[arg(long)]
        plot: Option<PathBuf>,

        /// Export the cleaned polygons as GeoJSON
        #[arg(long)]
        cleaned_geojson: Option<PathBuf>,
    },

    /// Plot a zoomed view of a mask file
    PlotMask {
        /// NetCDF mask file
        input: PathBuf,

        /// PNG output path
        #[arg(short, long)]
        output: PathBuf,

        #[arg(long, default_value = AREA_VARIABLE)]
        variable: String,

        /// Longitude padding around the nonzero extent (degrees)
        #[arg(long, default_value = "0.2")]
        padding_lon: f64,

        /// Latitude padding around the nonzero extent (degrees)
        #[arg(long, default_value = "0.1")]
        padding_lat: f64,

        #[arg(long)]
        title: Option<String>,

        #[arg(long, default_value = "Greens")]
        cmap: String,
    },

    /// Plot a concentration field on a fixed extent
    PlotConcentration {
        /// NetCDF file holding the field
        input: PathBuf,

        /// PNG output path
        #[arg(short, long)]
        output: PathBuf,

        #[arg(long)]
        variable: String,

        #[arg(long, default_value = "")]
        title: String,

        #[arg(long, default_value = "RdBu_r")]
        cmap: String,

        /// Colour bar label
        #[arg(long, default_value = "ΔConcentration (μg/m³)")]
        label: String,

        /// Map extent as west,east,south,north
        #[arg(long, value_parser = parse_extent, default_value = "-8.5,2.5,49.5,60.0")]
        extent: BoundingBox,

        /// GeoJSON coastline lines, replacing the built-in coastlines
        #[arg(long)]
        coastlines: Option<PathBuf>,

        /// GeoJSON border lines, replacing the built-in borders
        #[arg(long)]
        borders: Option<PathBuf>,

        /// Draw neither coastlines nor borders
        #[arg(long)]
        no_overlays: bool,
    },
}

fn init_tracing(log_level: &str, json: bool) -> Result<()> {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_thread_ids(true);

    if json {
        tracing::subscriber::set_global_default(builder.json().finish())?;
    } else {
        tracing::subscriber::set_global_default(builder.finish())?;
    }
    Ok(())
}

fn main() -> Result<()> {
    // Load environment from .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();
    init_tracing(&args.log_level, args.log_json)?;

    match args.command {
        Command::Build {
            config,
            input,
            output,
            variable,
            plot,
            cleaned_geojson,
        } => {
            let mut pipeline = match &config {
                Some(path) => PipelineConfig::load(path)?,
                None => PipelineConfig::default(),
            };

            // Command line flags override the config file
            if let Some(input) = input {
                pipeline.input = input;
            }
            if let Some(output) = output {
                pipeline.output = output;
            }
            if let Some(variable) = variable {
                pipeline.variable = variable;
            }
            if plot.is_some() {
                pipeline.plot.output = plot;
            }
            if cleaned_geojson.is_some() {
                pipeline.cleaned_geojson = cleaned_geojson;
            }
            if args.font.is_some() {
                pipeline.plot.font = args.font;
            }
            pipeline.validate()?;

            info!(
                input = %pipeline.input.display(),
                output = %pipeline.output.display(),
                "Building region mask"
            );
            let outcome = build(&pipeline)?;
            info!(
                output = %outcome.output.display(),
                cells = outcome.cells,
                polygons = outcome.report.retained,
                "Mask written"
            );
            if let Some(png) = outcome.plot {
                info!(path = %png.display(), "Zoom plot written");
            }
        }

        Command::PlotMask {
            input,
            output,
            variable,
            padding_lon,
            padding_lat,
            title,
            cmap,
        } => {
            let options = ZoomPlotOptions {
                variable,
                padding_lon,
                padding_lat,
                title,
                colormap: cmap,
                font: args.font,
                ..ZoomPlotOptions::default()
            };
            if !plot_mask_file(&input, &output, &options)? {
                warn!(input = %input.display(), "Nothing plotted");
            }
        }

        Command::PlotConcentration {
            input,
            output,
            variable,
            title,
            cmap,
            label,
            extent,
            coastlines,
            borders,
            no_overlays,
        } => {
            let mut options = ConcentrationMapOptions {
                title,
                colormap: cmap,
                colorbar_label: label,
                extent,
                font: args.font,
                ..ConcentrationMapOptions::default()
            };
            if let Some(path) = coastlines {
                options.coastlines = Some(OverlayLayer::from_path(path, Color::BLACK)?);
            }
            if let Some(path) = borders {
                options.borders = Some(OverlayLayer::from_path(path, BORDER_COLOR)?);
            }
            if no_overlays {
                options.coastlines = None;
                options.borders = None;
            }
            plot_concentration_file(&input, &variable, &output, &options)?;
            info!(path = %output.display(), "Concentration map written");
        }
    }

    Ok(())
}
