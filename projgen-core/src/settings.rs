//! Clap-free settings for the generate pipeline and the artifact cache.

use camino::{Utf8Path, Utf8PathBuf};
use projgen_domain::GeneratorConfig;
use projgen_graph::CodeCoverageMode;

pub const DEFAULT_GRAPH_FILE: &str = "graph.json";
pub const DEFAULT_OUT_DIR: &str = ".projgen/generated";
pub const DEFAULT_CACHE_DIR: &str = ".projgen/cache";

/// Settings for the generate pipeline.
#[derive(Debug, Clone)]
pub struct GenerateSettings {
    pub root: Utf8PathBuf,
    pub graph_path: Utf8PathBuf,
    pub out_dir: Utf8PathBuf,

    pub code_coverage_mode: CodeCoverageMode,
    pub autogenerate_schemes: bool,
}

impl Default for GenerateSettings {
    fn default() -> Self {
        Self {
            root: Utf8PathBuf::from("."),
            graph_path: Utf8PathBuf::from(DEFAULT_GRAPH_FILE),
            out_dir: Utf8PathBuf::from(DEFAULT_OUT_DIR),
            code_coverage_mode: CodeCoverageMode::Disabled,
            autogenerate_schemes: true,
        }
    }
}

impl GenerateSettings {
    pub fn generator_config(&self) -> GeneratorConfig {
        GeneratorConfig {
            code_coverage_mode: self.code_coverage_mode.clone(),
            autogenerate_schemes: self.autogenerate_schemes,
        }
    }

    pub fn resolved_graph_path(&self) -> Utf8PathBuf {
        resolve(&self.root, &self.graph_path)
    }

    pub fn resolved_out_dir(&self) -> Utf8PathBuf {
        resolve(&self.root, &self.out_dir)
    }
}

/// Settings for the local cache tiers, in lookup order.
#[derive(Debug, Clone)]
pub struct CacheSettings {
    pub root: Utf8PathBuf,
    pub dirs: Vec<Utf8PathBuf>,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            root: Utf8PathBuf::from("."),
            dirs: vec![Utf8PathBuf::from(DEFAULT_CACHE_DIR)],
        }
    }
}

impl CacheSettings {
    pub fn resolved_dirs(&self) -> Vec<Utf8PathBuf> {
        self.dirs.iter().map(|d| resolve(&self.root, d)).collect()
    }
}

fn resolve(root: &Utf8Path, path: &Utf8Path) -> Utf8PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_paths_resolve_against_root() {
        let settings = GenerateSettings {
            root: "/ws".into(),
            ..Default::default()
        };
        assert_eq!(settings.resolved_graph_path(), Utf8PathBuf::from("/ws/graph.json"));
        assert_eq!(
            settings.resolved_out_dir(),
            Utf8PathBuf::from("/ws/.projgen/generated")
        );
    }

    #[test]
    fn absolute_paths_are_kept() {
        let cache = CacheSettings {
            root: "/ws".into(),
            dirs: vec!["/shared/cache".into(), "local".into()],
        };
        assert_eq!(
            cache.resolved_dirs(),
            vec![
                Utf8PathBuf::from("/shared/cache"),
                Utf8PathBuf::from("/ws/local")
            ]
        );
    }

    #[test]
    fn generator_config_mirrors_settings() {
        let settings = GenerateSettings {
            code_coverage_mode: CodeCoverageMode::Relevant,
            autogenerate_schemes: false,
            ..Default::default()
        };
        let config = settings.generator_config();
        assert_eq!(config.code_coverage_mode, CodeCoverageMode::Relevant);
        assert!(!config.autogenerate_schemes);
    }
}
