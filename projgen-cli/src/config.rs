//! Configuration file loading for projgen.
//!
//! Discovers and loads `projgen.toml` from the workspace root.
//! Merges config file settings with CLI arguments (CLI takes precedence).

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use projgen_core::settings::{DEFAULT_CACHE_DIR, DEFAULT_GRAPH_FILE, DEFAULT_OUT_DIR};
use projgen_graph::{CodeCoverageMode, TargetReference};
use serde::Deserialize;
use tracing::debug;

/// The config file name to search for.
pub const CONFIG_FILE_NAME: &str = "projgen.toml";

/// Top-level configuration from projgen.toml.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProjgenConfig {
    pub generation: GenerationConfig,
    pub cache: CacheConfig,
}

/// Generation section of the config.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Coverage policy for autogenerated schemes.
    pub code_coverage: Option<CoverageModeName>,

    /// `<project_path>=<target>` entries, used with `code_coverage = "targets"`.
    pub code_coverage_targets: Vec<String>,

    /// When false, the workspace keeps its own schemes.
    pub autogenerate_schemes: bool,

    /// Graph document, relative to the workspace root.
    pub graph: Option<Utf8PathBuf>,

    /// Output directory, relative to the workspace root.
    pub out_dir: Option<Utf8PathBuf>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            code_coverage: None,
            code_coverage_targets: Vec::new(),
            autogenerate_schemes: true,
            graph: None,
            out_dir: None,
        }
    }
}

/// Cache section of the config.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Local tier directories, in lookup order.
    pub dirs: Vec<Utf8PathBuf>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            dirs: vec![Utf8PathBuf::from(DEFAULT_CACHE_DIR)],
        }
    }
}

/// Coverage mode as spelled in config files and on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum CoverageModeName {
    Disabled,
    All,
    Relevant,
    Targets,
}

/// Discover the projgen.toml config file.
///
/// Returns `None` if no config file is found.
pub fn discover_config(root: &Utf8Path) -> Option<Utf8PathBuf> {
    let config_path = root.join(CONFIG_FILE_NAME);
    if config_path.exists() {
        debug!("found config file at {}", config_path);
        Some(config_path)
    } else {
        debug!("no config file found at {}", config_path);
        None
    }
}

/// Load and parse a projgen.toml config file.
pub fn load_config(path: &Utf8Path) -> anyhow::Result<ProjgenConfig> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read config file {}", path))?;
    parse_config(&contents).with_context(|| format!("parse config file {}", path))
}

/// Parse a config file from a string.
pub fn parse_config(contents: &str) -> anyhow::Result<ProjgenConfig> {
    let config: ProjgenConfig = toml::from_str(contents).context("invalid TOML")?;
    Ok(config)
}

/// Load config from the workspace root, or return default if not found.
pub fn load_or_default(root: &Utf8Path) -> anyhow::Result<ProjgenConfig> {
    match discover_config(root) {
        Some(path) => load_config(&path),
        None => Ok(ProjgenConfig::default()),
    }
}

/// Values given on the command line. `None` and empty lists defer to the config file.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub coverage: Option<CoverageModeName>,
    pub coverage_targets: Vec<String>,
    pub no_autogenerate_schemes: bool,
    pub graph: Option<Utf8PathBuf>,
    pub out_dir: Option<Utf8PathBuf>,
    pub cache_dirs: Vec<Utf8PathBuf>,
}

/// Merged configuration combining config file and CLI arguments.
#[derive(Debug, Clone)]
pub struct MergedConfig {
    pub code_coverage_mode: CodeCoverageMode,
    pub autogenerate_schemes: bool,
    pub graph: Utf8PathBuf,
    pub out_dir: Utf8PathBuf,
    pub cache_dirs: Vec<Utf8PathBuf>,
}

/// Builder for merging config file with CLI arguments.
pub struct ConfigMerger {
    config: ProjgenConfig,
}

impl ConfigMerger {
    pub fn new(config: ProjgenConfig) -> Self {
        Self { config }
    }

    /// CLI values replace config values; lists are replaced, not extended.
    ///
    /// Coverage targets without an explicit mode imply `targets`.
    pub fn merge(self, cli: &CliOverrides) -> anyhow::Result<MergedConfig> {
        let generation = self.config.generation;

        let target_entries = if cli.coverage_targets.is_empty() {
            generation.code_coverage_targets
        } else {
            cli.coverage_targets.clone()
        };

        let mode_name = match (cli.coverage, generation.code_coverage) {
            (Some(mode), _) => mode,
            (None, _) if !cli.coverage_targets.is_empty() => CoverageModeName::Targets,
            (None, Some(mode)) => mode,
            (None, None) => CoverageModeName::Disabled,
        };

        let code_coverage_mode = match mode_name {
            CoverageModeName::Disabled => CodeCoverageMode::Disabled,
            CoverageModeName::All => CodeCoverageMode::All,
            CoverageModeName::Relevant => CodeCoverageMode::Relevant,
            CoverageModeName::Targets => {
                CodeCoverageMode::Targets(parse_coverage_targets(&target_entries)?)
            }
        };
        if mode_name != CoverageModeName::Targets && !cli.coverage_targets.is_empty() {
            anyhow::bail!(
                "--coverage-target requires coverage mode `targets`, got `{}`",
                code_coverage_mode.label()
            );
        }

        let cache_dirs = if cli.cache_dirs.is_empty() {
            self.config.cache.dirs
        } else {
            cli.cache_dirs.clone()
        };

        Ok(MergedConfig {
            code_coverage_mode,
            autogenerate_schemes: generation.autogenerate_schemes && !cli.no_autogenerate_schemes,
            graph: cli
                .graph
                .clone()
                .or(generation.graph)
                .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_GRAPH_FILE)),
            out_dir: cli
                .out_dir
                .clone()
                .or(generation.out_dir)
                .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_OUT_DIR)),
            cache_dirs,
        })
    }
}

/// Parse coverage targets from `<project_path>=<target>` strings.
///
/// The split happens at the last `=`, so project paths may contain `=`.
pub fn parse_coverage_targets(entries: &[String]) -> anyhow::Result<Vec<TargetReference>> {
    let mut out = Vec::new();
    for entry in entries {
        let (path, name) = entry
            .rsplit_once('=')
            .ok_or_else(|| anyhow::anyhow!("invalid coverage target '{}': missing '='", entry))?;
        let path = path.trim();
        let name = name.trim();
        if path.is_empty() {
            anyhow::bail!("invalid coverage target '{}': missing project path", entry);
        }
        if name.is_empty() {
            anyhow::bail!("invalid coverage target '{}': missing target name", entry);
        }
        out.push(TargetReference::new(path, name));
    }
    Ok(out)
}
