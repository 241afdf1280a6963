//! Command execution: ties configuration, cache, parsing and analysis together.

use crate::analysis::Analyzer;
use crate::cache::{CacheBackend, DiskCache};
use crate::cli::Cli;
use crate::config::{init_cache, AppConfig, CacheSettings};
use crate::error::AppResult;
use crate::geometry::BondRange;
use crate::models::load_xyz;
use crate::output::{render_json, render_text, Report, RunReport};

/// Strategy label reported for label-keyed runs.
pub const BY_SYMBOL_LABEL: &str = "by_symbol";

/// Cache settings after command line overrides.
pub fn cache_settings(cli: &Cli, config: &AppConfig) -> CacheSettings {
    let mut settings = CacheSettings::from(config);
    if let Some(dir) = &cli.cache_dir {
        settings.dir.clone_from(dir);
    }
    if cli.no_cache {
        settings.enabled = false;
    }
    settings
}

/// Bond window after command line overrides.
pub fn bond_range(cli: &Cli, config: &AppConfig) -> AppResult<BondRange> {
    BondRange::new(
        cli.min_length.unwrap_or(config.bond_min_length),
        cli.max_length.unwrap_or(config.bond_max_length),
    )
}

/// Wipes the disk cache at `settings.dir`, also when this run memoizes in memory only.
fn clear_cache(settings: &CacheSettings, backend: &mut dyn CacheBackend) -> AppResult<()> {
    if settings.enabled {
        return backend.clear();
    }
    if settings.dir.is_dir() {
        DiskCache::open(&settings.dir)?.clear()?;
    }
    Ok(())
}

/// Runs the analysis and returns the rendered report.
pub fn analyze(cli: &Cli, config: &AppConfig) -> AppResult<String> {
    let range = bond_range(cli, config)?;
    let precision = cli.precision.unwrap_or(config.precision);
    let settings = cache_settings(cli, config);

    let mut backend = init_cache(&settings)?;
    if cli.clear_cache {
        clear_cache(&settings, backend.as_mut())?;
    }

    let molecule = load_xyz(&cli.xyz_file)?;
    let mut analyzer = Analyzer::new(range, backend, settings.ttl_secs);

    let runs = if cli.by_symbol {
        let positions = molecule.to_symbol_positions();
        let bonds = analyzer.run_by_symbol(&positions)?;
        vec![RunReport::new(BY_SYMBOL_LABEL, "", &bonds)]
    } else {
        let mut runs = Vec::new();
        for strategy in cli.strategy.strategies() {
            let bonds = analyzer.run(&molecule, strategy)?;
            runs.push(RunReport::new(strategy.name(), strategy.heading(), &bonds));
        }
        runs
    };

    let stats = analyzer.cache_stats();
    tracing::info!(
        hits = stats.hits,
        misses = stats.misses,
        "Distance cache usage"
    );

    let report = Report {
        file: cli.xyz_file.display().to_string(),
        comment: molecule.comment,
        atoms: molecule.atoms.len(),
        runs,
        cache: stats,
    };

    if cli.json {
        render_json(&report)
    } else {
        Ok(render_text(&report, precision))
    }
}
