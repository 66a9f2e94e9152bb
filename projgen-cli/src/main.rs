mod config;

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand};
use config::{CliOverrides, ConfigMerger, CoverageModeName, MergedConfig};
use projgen_cache::{Cache, CacheStorage, DirectoryStorageProvider, validate_hash};
use projgen_core::adapters::{FsGraphSource, FsWritePort};
use projgen_core::pipeline::{run_generate, write_generate_artifacts};
use projgen_core::settings::{CacheSettings, GenerateSettings};
use projgen_core::SequentialWorkspaceMapper;
use projgen_graph::report::ToolInfo;
use std::process::ExitCode;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

/// Exit code for a cache lookup that found nothing.
const EXIT_CACHE_MISS: u8 = 2;

#[derive(Debug, Parser)]
#[command(
    name = "projgen",
    version,
    about = "Deterministic scheme generation and tiered artifact caching for project workspaces."
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate one shared scheme per platform from a resolved project graph.
    Generate(GenerateArgs),
    /// Query or populate the local artifact cache tiers.
    Cache(CacheArgs),
}

#[derive(Debug, Parser)]
struct GenerateArgs {
    /// Workspace root (default: current directory).
    #[arg(long, default_value = ".")]
    root: Utf8PathBuf,

    /// Graph document (default: <root>/graph.json).
    #[arg(long)]
    graph: Option<Utf8PathBuf>,

    /// Output directory for generated artifacts (default: <root>/.projgen/generated).
    #[arg(long)]
    out_dir: Option<Utf8PathBuf>,

    /// Code coverage policy for autogenerated test actions.
    #[arg(long, value_enum)]
    coverage: Option<CoverageModeName>,

    /// Coverage target as <project_path>=<target> (repeatable; implies --coverage targets).
    #[arg(long = "coverage-target", value_name = "PROJECT_PATH=TARGET")]
    coverage_targets: Vec<String>,

    /// Keep the workspace's own schemes instead of generating them.
    #[arg(long)]
    no_autogenerate_schemes: bool,
}

#[derive(Debug, Parser)]
struct CacheArgs {
    /// Workspace root (default: current directory).
    #[arg(long, default_value = ".", global = true)]
    root: Utf8PathBuf,

    /// Cache tier directory, in lookup order (repeatable; overrides projgen.toml).
    #[arg(long = "cache-dir", global = true)]
    cache_dirs: Vec<Utf8PathBuf>,

    #[command(subcommand)]
    cmd: CacheCommand,
}

#[derive(Debug, Subcommand)]
enum CacheCommand {
    /// Exit 0 if any tier holds the artifact, 2 otherwise.
    Exists { hash: String },
    /// Print the location of the artifact from the first tier that has it.
    Fetch { hash: String },
    /// Copy build products into every tier.
    Store {
        hash: String,
        #[arg(required = true)]
        paths: Vec<Utf8PathBuf>,
    },
}

fn main() -> ExitCode {
    match real_main() {
        Ok(code) => code,
        Err(e) => {
            error!("{:?}", e);
            ExitCode::from(1)
        }
    }
}

fn real_main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Generate(args) => cmd_generate(args).map(|()| ExitCode::SUCCESS),
        Command::Cache(args) => cmd_cache(args),
    }
}

fn load_merged(root: &Utf8Path, overrides: &CliOverrides) -> anyhow::Result<MergedConfig> {
    let file_config = config::load_or_default(root).context("load projgen.toml config")?;
    ConfigMerger::new(file_config).merge(overrides)
}

fn cmd_generate(args: GenerateArgs) -> anyhow::Result<()> {
    let root = args.root;
    let merged = load_merged(
        &root,
        &CliOverrides {
            coverage: args.coverage,
            coverage_targets: args.coverage_targets,
            no_autogenerate_schemes: args.no_autogenerate_schemes,
            graph: args.graph,
            out_dir: args.out_dir,
            cache_dirs: Vec::new(),
        },
    )?;

    debug!(
        "merged config: code_coverage={}, autogenerate_schemes={}",
        merged.code_coverage_mode.label(),
        merged.autogenerate_schemes
    );

    let settings = GenerateSettings {
        root,
        graph_path: merged.graph,
        out_dir: merged.out_dir,
        code_coverage_mode: merged.code_coverage_mode,
        autogenerate_schemes: merged.autogenerate_schemes,
    };
    let mapper = SequentialWorkspaceMapper::builtin(&settings.generator_config());
    let source = FsGraphSource::new(settings.resolved_graph_path());

    let outcome = run_generate(&settings, &source, &mapper, tool_info())?;
    let out_dir = settings.resolved_out_dir();
    write_generate_artifacts(&outcome, &out_dir, &FsWritePort)
        .with_context(|| format!("write artifacts to {}", out_dir))?;

    info!("wrote generated workspace to {}", out_dir);
    println!(
        "generated {} scheme(s) for {} in {}",
        outcome.report.schemes.len(),
        outcome.report.workspace,
        out_dir
    );
    Ok(())
}

fn cmd_cache(args: CacheArgs) -> anyhow::Result<ExitCode> {
    let merged = load_merged(
        &args.root,
        &CliOverrides {
            cache_dirs: args.cache_dirs,
            ..Default::default()
        },
    )?;
    let settings = CacheSettings {
        root: args.root,
        dirs: merged.cache_dirs,
    };
    let cache = Cache::from_provider(&DirectoryStorageProvider::new(settings.resolved_dirs()))?;
    debug!(tiers = ?settings.resolved_dirs(), "cache tiers");

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("start async runtime")?;

    runtime.block_on(run_cache_command(&cache, args.cmd))
}

async fn run_cache_command(cache: &Cache, cmd: CacheCommand) -> anyhow::Result<ExitCode> {
    let hash = match &cmd {
        CacheCommand::Exists { hash }
        | CacheCommand::Fetch { hash }
        | CacheCommand::Store { hash, .. } => hash,
    };
    validate_hash(hash)?;

    match cmd {
        CacheCommand::Exists { hash } => {
            if cache.exists(&hash).await? {
                println!("{}", hash);
                Ok(ExitCode::SUCCESS)
            } else {
                eprintln!("cache miss: {}", hash);
                Ok(ExitCode::from(EXIT_CACHE_MISS))
            }
        }
        CacheCommand::Fetch { hash } => match cache.fetch(&hash).await {
            Ok(location) => {
                println!("{}", location);
                Ok(ExitCode::SUCCESS)
            }
            Err(e) => {
                eprintln!("cache miss: {}", e);
                Ok(ExitCode::from(EXIT_CACHE_MISS))
            }
        },
        CacheCommand::Store { hash, paths } => {
            cache
                .store(&hash, &paths)
                .await
                .with_context(|| format!("store {}", hash))?;
            info!("stored {} into {} tier(s)", hash, cache.tier_names().len());
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn tool_info() -> ToolInfo {
    ToolInfo {
        name: "projgen".to_string(),
        version: Some(env!("CARGO_PKG_VERSION").to_string()),
    }
}
