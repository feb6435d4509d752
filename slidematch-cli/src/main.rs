use clap::Parser;
use serde::{Deserialize, Serialize};
use slidematch::io::{load_rgb_image, save_rgb_image};
use slidematch::{draw_box, surface_to_rgb, Boundary, Match, Metric, Rgb, SearchConfig, Searcher};
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const SCHEMA_JSON: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.schema.json"));
const EXAMPLE_JSON: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.example.json"));

const BOX_COLOR: Rgb = Rgb(0xFF0000);

#[derive(Parser, Debug)]
#[command(author, version, about = "SlideMatch CLI (JSON config driven)")]
struct Cli {
    /// Path to the JSON configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "config.json")]
    config: PathBuf,
    /// Print the JSON schema and exit.
    #[arg(long)]
    print_schema: bool,
    /// Print an example config and exit.
    #[arg(long)]
    print_example: bool,
    /// Enable tracing output for performance profiling.
    #[arg(long)]
    trace: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
enum MetricConfig {
    Mae,
    Ncc,
}

impl From<MetricConfig> for Metric {
    fn from(value: MetricConfig) -> Self {
        match value {
            MetricConfig::Mae => Metric::MeanAbsoluteError,
            MetricConfig::Ncc => Metric::NormalizedCrossCorrelation,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
enum BoundaryConfig {
    Valid,
    Wrap,
    Mirror,
}

impl From<BoundaryConfig> for Boundary {
    fn from(value: BoundaryConfig) -> Self {
        match value {
            BoundaryConfig::Valid => Boundary::Valid,
            BoundaryConfig::Wrap => Boundary::Wrap,
            BoundaryConfig::Mirror => Boundary::Mirror,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct SearchConfigJson {
    metric: MetricConfig,
    boundary: BoundaryConfig,
    topk: usize,
    nms_radius: usize,
    parallel: bool,
}

impl Default for SearchConfigJson {
    fn default() -> Self {
        let cfg = SearchConfig::default();
        Self {
            metric: MetricConfig::Mae,
            boundary: BoundaryConfig::Valid,
            topk: cfg.topk,
            nms_radius: cfg.nms_radius,
            parallel: cfg.parallel,
        }
    }
}

impl From<SearchConfigJson> for SearchConfig {
    fn from(value: SearchConfigJson) -> Self {
        Self {
            metric: value.metric.into(),
            boundary: value.boundary.into(),
            topk: value.topk,
            nms_radius: value.nms_radius,
            parallel: value.parallel,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct Config {
    image_path: String,
    pattern_path: String,
    output_path: Option<String>,
    surface_path: Option<String>,
    annotated_path: Option<String>,
    search: SearchConfigJson,
}

#[derive(Debug, Serialize)]
struct MatchRecord {
    row: usize,
    col: usize,
    score: f64,
}

impl From<Match> for MatchRecord {
    fn from(value: Match) -> Self {
        Self {
            row: value.row,
            col: value.col,
            score: value.score,
        }
    }
}

#[derive(Debug, Serialize)]
struct Output {
    metric: String,
    boundary: String,
    best: Option<MatchRecord>,
    matches: Vec<MatchRecord>,
}

/// Display range used when rendering a surface of the given metric.
fn surface_range(metric: Metric) -> (f64, f64) {
    match metric {
        Metric::MeanAbsoluteError => (0.0, 255.0),
        Metric::NormalizedCrossCorrelation => (-1.0, 1.0),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.trace {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive("slidematch=info".parse()?),
            )
            .with_target(false)
            .init();
    }

    if cli.print_schema {
        println!("{SCHEMA_JSON}");
        return Ok(());
    }
    if cli.print_example {
        println!("{EXAMPLE_JSON}");
        return Ok(());
    }

    let config_text = fs::read_to_string(&cli.config)?;
    let config: Config = serde_json::from_str(&config_text)?;
    if config.image_path.is_empty() || config.pattern_path.is_empty() {
        return Err("image_path and pattern_path must be set in the config".into());
    }
    if config.search.topk == 0 {
        return Err("topk must be at least 1".into());
    }

    let image = load_rgb_image(&config.image_path)?;
    let pattern = load_rgb_image(&config.pattern_path)?;
    let searcher = Searcher::new(config.search.into());
    let search_cfg = searcher.config().clone();
    tracing::info!(
        image_width = image.width(),
        image_height = image.height(),
        pattern_width = pattern.width(),
        pattern_height = pattern.height(),
        metric = search_cfg.metric.as_str(),
        boundary = search_cfg.boundary.as_str(),
        "loaded inputs"
    );

    let (surface, matches) = searcher.locate_with_surface(image.view(), pattern.view())?;

    if let Some(path) = &config.surface_path {
        let (min, max) = surface_range(search_cfg.metric);
        save_rgb_image(&surface_to_rgb(surface.view(), min, max)?, path)?;
    }

    if let Some(path) = &config.annotated_path {
        let mut annotated = image.clone();
        for m in &matches {
            draw_box(
                &mut annotated,
                m.row,
                m.col,
                pattern.width(),
                pattern.height(),
                BOX_COLOR,
            );
        }
        save_rgb_image(&annotated, path)?;
    }

    let best = matches.first().copied().map(MatchRecord::from);
    let output = Output {
        metric: search_cfg.metric.to_string(),
        boundary: search_cfg.boundary.to_string(),
        best,
        matches: matches.into_iter().map(MatchRecord::from).collect(),
    };
    let json = serde_json::to_string_pretty(&output)?;

    match config.output_path {
        Some(path) => fs::write(path, json)?,
        None => println!("{json}"),
    }

    Ok(())
}
