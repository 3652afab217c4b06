//! Boundary → grid → mask → NetCDF pipeline and the plotting entry points.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use boundary_loader::{write_geojson, BoundaryLoader, LoadReport};
use mask_common::grid::GridSpec;
use mask_common::LabeledArray;
use netcdf_io::{read_labeled_array, write_labeled_mask};
use rasterizer::rasterize_mask;
use renderer::{plot_dataset_mask, plot_concentration_map, ConcentrationMapOptions, ZoomPlotOptions};
use tracing::{info, warn};

use crate::config::PipelineConfig;

/// Summary of a completed [`build`] run.
#[derive(Debug, Clone)]
pub struct BuildOutcome {
    pub report: LoadReport,
    pub grid: GridSpec,
    /// Cells set to 1
    pub cells: usize,
    pub output: PathBuf,
    /// Zoom plot, when one was requested and the mask was not empty
    pub plot: Option<PathBuf>,
}

/// Run the full pipeline described by `config`.
///
/// Every stage aborts the run on failure; nothing is retried.
pub fn build(config: &PipelineConfig) -> Result<BuildOutcome> {
    let mut loader = BoundaryLoader::new();
    if let Some(crs) = config.default_crs()? {
        loader = loader.with_default_crs(crs);
    }

    let boundaries = loader.load_path(&config.input).with_context(|| {
        format!("Failed to load boundaries from {}", config.input.display())
    })?;
    let report = *boundaries.report();
    info!(input = %config.input.display(), "{}", report);

    if let Some(path) = &config.cleaned_geojson {
        write_geojson(&boundaries, path)
            .with_context(|| format!("Failed to export cleaned geometry to {}", path.display()))?;
        info!(path = %path.display(), "Exported cleaned geometry");
    }

    let grid = config.grid.to_grid_spec()?;
    let mask = rasterize_mask(boundaries.polygons(), &grid).context("Rasterization failed")?;
    let cells = mask.count_nonzero();
    if cells == 0 {
        warn!(
            polygons = boundaries.len(),
            "No grid cell centre falls inside the boundary; the mask is all zero"
        );
    }
    info!(
        nx = grid.nx,
        ny = grid.ny,
        cells,
        "Rasterized {} polygons",
        boundaries.len()
    );

    let labeled = LabeledArray::from_mask(config.variable.as_str(), &grid, &mask)
        .context("Mask does not match grid axes")?;
    write_labeled_mask(&config.output, &labeled, &config.metadata.to_dataset_metadata())
        .with_context(|| format!("Failed to write {}", config.output.display()))?;

    let plot = match &config.plot.output {
        Some(png) => {
            let options = config.plot.zoom_options(&config.variable);
            plot_mask_file(&config.output, png, &options)?.then(|| png.clone())
        }
        None => None,
    };

    Ok(BuildOutcome {
        report,
        grid,
        cells,
        output: config.output.clone(),
        plot,
    })
}

/// Render the zoom plot of a mask file to `png`.
///
/// Returns `false`, writing nothing, when the mask has no nonzero cell.
pub fn plot_mask_file(dataset: &Path, png: &Path, options: &ZoomPlotOptions) -> Result<bool> {
    let figure = plot_dataset_mask(dataset, options)
        .with_context(|| format!("Failed to plot {} from {}", options.variable, dataset.display()))?;

    match figure {
        Some(figure) => {
            figure
                .save(png)
                .with_context(|| format!("Failed to save {}", png.display()))?;
            Ok(true)
        }
        None => Ok(false),
    }
}

/// Render `variable` from a NetCDF file as a concentration map.
pub fn plot_concentration_file(
    dataset: &Path,
    variable: &str,
    png: &Path,
    options: &ConcentrationMapOptions,
) -> Result<()> {
    let field = read_labeled_array(dataset, variable)
        .with_context(|| format!("Failed to read {} from {}", variable, dataset.display()))?;
    let figure = plot_concentration_map(&field, options).context("Failed to render map")?;
    figure
        .save(png)
        .with_context(|| format!("Failed to save {}", png.display()))?;
    Ok(())
}
