//! Pipeline configuration.
//!
//! Configuration is a YAML document in which `${VAR}` and `${VAR:-default}`
//! references are replaced from the environment before parsing. Every field
//! has a default, so an empty document builds the SHERPA Europe `AREA` mask
//! from `eer.geojson`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use mask_common::grid::{presets, GridSpec, RowOrder};
use mask_common::{Crs, AREA_VARIABLE};
use netcdf_io::DatasetMetadata;
use renderer::{Colormap, ZoomPlotOptions};
use serde::{Deserialize, Serialize};

/// Top-level pipeline configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// GeoJSON boundary document
    pub input: PathBuf,
    /// NetCDF file to write
    pub output: PathBuf,
    /// Name of the mask variable
    pub variable: String,
    /// CRS assumed when the document carries no `crs` member
    pub assume_crs: Option<String>,
    /// Export the cleaned polygons here when set
    pub cleaned_geojson: Option<PathBuf>,
    pub grid: GridConfig,
    pub metadata: MetadataConfig,
    pub plot: PlotConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("eer.geojson"),
            output: PathBuf::from("emiRedOn_01033_CustomRegion_FUA.nc"),
            variable: AREA_VARIABLE.to_string(),
            assume_crs: None,
            cleaned_geojson: None,
            grid: GridConfig::default(),
            metadata: MetadataConfig::default(),
            plot: PlotConfig::default(),
        }
    }
}

/// Target grid: either a named preset or an explicit extent and step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub preset: Option<String>,
    /// `[west, east, south, north]`, both ends inclusive
    pub extent: Option<[f64; 4]>,
    /// `[dlon, dlat]` in degrees
    pub step: Option<[f64; 2]>,
    pub row_order: RowOrder,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            preset: Some("sherpa_europe".to_string()),
            extent: None,
            step: None,
            row_order: RowOrder::SouthToNorth,
        }
    }
}

impl GridConfig {
    /// Resolve the configured grid.
    ///
    /// An explicit extent takes precedence over the preset.
    pub fn to_grid_spec(&self) -> Result<GridSpec> {
        if let Some([west, east, south, north]) = self.extent {
            let [dx, dy] = self
                .step
                .ok_or_else(|| anyhow!("grid.extent requires grid.step"))?;
            let grid = GridSpec::from_extent(west, east, dx, south, north, dy, self.row_order)
                .context("Invalid grid extent")?;
            return Ok(grid);
        }

        let name = self
            .preset
            .as_deref()
            .ok_or_else(|| anyhow!("grid needs either a preset or an extent and step"))?;
        let mut grid =
            presets::by_name(name).ok_or_else(|| anyhow!("Unknown grid preset: {}", name))?;
        grid.row_order = self.row_order;
        Ok(grid)
    }
}

/// Global attributes of the written dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetadataConfig {
    pub title: String,
    pub source: String,
}

impl Default for MetadataConfig {
    fn default() -> Self {
        let defaults = DatasetMetadata::default();
        Self {
            title: defaults.title,
            source: defaults.source,
        }
    }
}

impl MetadataConfig {
    pub fn to_dataset_metadata(&self) -> DatasetMetadata {
        DatasetMetadata {
            title: self.title.clone(),
            source: self.source.clone(),
        }
    }
}

/// Zoom plot rendered after the dataset is written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    /// PNG path; no plot is rendered when unset
    pub output: Option<PathBuf>,
    pub padding_lon: f64,
    pub padding_lat: f64,
    pub title: Option<String>,
    pub colormap: String,
    pub width: u32,
    pub height: u32,
    pub font: Option<PathBuf>,
}

impl Default for PlotConfig {
    fn default() -> Self {
        let defaults = ZoomPlotOptions::default();
        Self {
            output: None,
            padding_lon: defaults.padding_lon,
            padding_lat: defaults.padding_lat,
            title: defaults.title,
            colormap: defaults.colormap,
            width: defaults.width,
            height: defaults.height,
            font: defaults.font,
        }
    }
}

impl PlotConfig {
    /// Zoom plot options for `variable`.
    pub fn zoom_options(&self, variable: &str) -> ZoomPlotOptions {
        ZoomPlotOptions {
            variable: variable.to_string(),
            padding_lon: self.padding_lon,
            padding_lat: self.padding_lat,
            title: self.title.clone(),
            colormap: self.colormap.clone(),
            colorbar_label: None,
            width: self.width,
            height: self.height,
            font: self.font.clone(),
        }
    }
}

impl PipelineConfig {
    /// Load and validate a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_yaml_str(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }

    /// Parse and validate a YAML document after environment expansion.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let expanded = expand_env_vars(content)?;
        let config: Self = if expanded.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml::from_str(&expanded).context("Failed to parse YAML")?
        };
        config.validate()?;
        Ok(config)
    }

    /// The CRS to assign to documents without a `crs` member.
    pub fn default_crs(&self) -> Result<Option<Crs>> {
        self.assume_crs
            .as_deref()
            .map(|name| Crs::parse(name).with_context(|| format!("Invalid assume_crs: {}", name)))
            .transpose()
    }

    pub fn validate(&self) -> Result<()> {
        anyhow::ensure!(
            !self.input.as_os_str().is_empty(),
            "input path cannot be empty"
        );
        anyhow::ensure!(
            !self.output.as_os_str().is_empty(),
            "output path cannot be empty"
        );
        anyhow::ensure!(
            !self.variable.trim().is_empty(),
            "variable name cannot be empty"
        );

        if let Some(step) = self.grid.step {
            anyhow::ensure!(
                step.iter().all(|s| s.is_finite() && *s > 0.0),
                "grid.step must be positive, got {:?}",
                step
            );
        }
        if let Some([west, east, south, north]) = self.grid.extent {
            anyhow::ensure!(
                west <= east && south <= north,
                "grid.extent must be ordered [west, east, south, north], got {:?}",
                [west, east, south, north]
            );
        }
        self.grid.to_grid_spec()?;
        self.default_crs()?;

        anyhow::ensure!(
            self.plot.padding_lon >= 0.0 && self.plot.padding_lat >= 0.0,
            "plot padding cannot be negative"
        );
        anyhow::ensure!(
            self.plot.width > 0 && self.plot.height > 0,
            "plot size must be positive"
        );
        Colormap::by_name(&self.plot.colormap)?;

        Ok(())
    }
}

/// Replace `${VAR}` and `${VAR:-default}` references with environment values.
pub fn expand_env_vars(content: &str) -> Result<String> {
    let mut result = String::with_capacity(content.len());
    let mut chars = content.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '$' && chars.peek() == Some(&'{') {
            chars.next();
            let mut expr = String::new();
            let mut depth = 1;
            for c in chars.by_ref() {
                match c {
                    '{' => depth += 1,
                    '}' => {
                        depth -= 1;
                        if depth == 0 {
                            break;
                        }
                    }
                    _ => {}
                }
                expr.push(c);
            }
            if depth != 0 {
                bail!("Unclosed variable substitution: ${{{}", expr);
            }
            result.push_str(&resolve_var_expr(&expr)?);
        } else {
            result.push(c);
        }
    }

    Ok(result)
}

fn resolve_var_expr(expr: &str) -> Result<String> {
    match expr.split_once(":-") {
        Some((name, default)) => match std::env::var(name) {
            Ok(value) if !value.is_empty() => Ok(value),
            _ => Ok(default.to_string()),
        },
        None => std::env::var(expr)
            .map_err(|_| anyhow!("Environment variable {} not set", expr)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = PipelineConfig::from_yaml_str("").unwrap();
        assert_eq!(config, PipelineConfig::default());
        assert_eq!(config.input, PathBuf::from("eer.geojson"));
        assert_eq!(config.variable, "AREA");

        let grid = config.grid.to_grid_spec().unwrap();
        assert_eq!(grid, presets::sherpa_europe());
    }

    #[test]
    fn test_partial_config() {
        let yaml = r#"
input: boundaries/manchester.geojson
plot:
  output: zoom.png
  padding_lon: 0.5
"#;
        let config = PipelineConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.input, PathBuf::from("boundaries/manchester.geojson"));
        assert_eq!(config.plot.output, Some(PathBuf::from("zoom.png")));
        assert_eq!(config.plot.padding_lon, 0.5);
        assert_eq!(config.plot.padding_lat, 0.1);
        assert_eq!(config.output, PipelineConfig::default().output);
    }

    #[test]
    fn test_custom_grid() {
        let yaml = r#"
grid:
  extent: [-8.0, 2.0, 50.0, 60.0]
  step: [0.5, 0.25]
  row_order: north_to_south
"#;
        let config = PipelineConfig::from_yaml_str(yaml).unwrap();
        let grid = config.grid.to_grid_spec().unwrap();
        assert_eq!(grid.shape(), (41, 21));
        assert_eq!(grid.row_order, RowOrder::NorthToSouth);
    }

    #[test]
    fn test_validation_failures() {
        let bad = [
            "variable: \"\"",
            "grid:\n  extent: [2.0, -8.0, 50.0, 60.0]\n  step: [0.5, 0.25]",
            "grid:\n  extent: [-8.0, 2.0, 50.0, 60.0]\n  step: [0.0, 0.25]",
            "grid:\n  extent: [-8.0, 2.0, 50.0, 60.0]",
            "grid:\n  preset: conus",
            "assume_crs: not-a-crs",
            "plot:\n  colormap: rainbow",
            "plot:\n  padding_lat: -1.0",
        ];
        for yaml in bad {
            assert!(
                PipelineConfig::from_yaml_str(yaml).is_err(),
                "expected rejection of {:?}",
                yaml
            );
        }
    }

    #[test]
    fn test_assume_crs() {
        let config = PipelineConfig::from_yaml_str("assume_crs: EPSG:27700").unwrap();
        assert_eq!(config.default_crs().unwrap().map(|c| c.epsg()), Some(27700));
        assert_eq!(PipelineConfig::default().default_crs().unwrap(), None);
    }

    #[test]
    fn test_env_var_expansion() {
        std::env::set_var("REGION_MASK_TEST_INPUT", "/data/fua.geojson");
        let expanded = expand_env_vars("input: ${REGION_MASK_TEST_INPUT}").unwrap();
        assert_eq!(expanded, "input: /data/fua.geojson");
        std::env::remove_var("REGION_MASK_TEST_INPUT");
    }

    #[test]
    fn test_env_var_default() {
        std::env::remove_var("REGION_MASK_TEST_UNSET");
        let expanded = expand_env_vars("output: ${REGION_MASK_TEST_UNSET:-mask.nc}").unwrap();
        assert_eq!(expanded, "output: mask.nc");

        std::env::set_var("REGION_MASK_TEST_EMPTY", "");
        let expanded = expand_env_vars("${REGION_MASK_TEST_EMPTY:-fallback}").unwrap();
        assert_eq!(expanded, "fallback");
        std::env::remove_var("REGION_MASK_TEST_EMPTY");
    }

    #[test]
    fn test_env_var_errors() {
        std::env::remove_var("REGION_MASK_TEST_MISSING");
        assert!(expand_env_vars("${REGION_MASK_TEST_MISSING}").is_err());
        assert!(expand_env_vars("input: ${UNCLOSED").is_err());
        assert_eq!(expand_env_vars("cost: $5").unwrap(), "cost: $5");
    }
}
