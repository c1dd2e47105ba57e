use crate::compose::{define_router_contract, RouterContract};
use crate::config::ContractConfig;
use crate::linter::{has_errors, lint_contract, write_lint_issues, LintSeverity};
use crate::load::load_contract;
use crate::logging::{init_logging, LogConfig};
use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::info;

/// Inspect and lint route contracts
#[derive(Debug, Parser)]
#[command(name = "brrtcontract")]
#[command(about = "Route contract tools", long_about = None)]
pub struct Cli {
    /// Log at debug level
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Where the contract comes from and how it is composed
#[derive(Debug, Args)]
pub struct ContractArgs {
    /// Contract document (YAML or JSON)
    #[arg(short, long)]
    pub contract: PathBuf,

    /// Composition settings (YAML, TOML or JSON)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List every endpoint with its method, final path and dot path
    Paths {
        #[command(flatten)]
        contract: ContractArgs,

        /// Print the list as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Print the resolved route for a dot path
    Show {
        #[command(flatten)]
        contract: ContractArgs,

        /// Dot path of the endpoint, e.g. posts.getOne
        #[arg(short, long)]
        route: String,
    },
    /// Lint the composed contract
    Lint {
        #[command(flatten)]
        contract: ContractArgs,

        /// Show only errors (hide warnings and info)
        #[arg(long, default_value_t = false)]
        errors_only: bool,
    },
}

impl ContractArgs {
    /// Load, configure and compose the contract
    pub fn compose(&self) -> anyhow::Result<RouterContract> {
        let document = load_contract(&self.contract)?;
        let config = match &self.config {
            Some(path) => ContractConfig::from_file(path)?,
            None => ContractConfig::default(),
        }
        .with_env()?;

        let contract = define_router_contract(document.root, config.into_compose_options())
            .with_context(|| format!("failed to compose {}", self.contract.display()))?;
        info!(
            contract = %document.title.as_deref().unwrap_or("<untitled>"),
            endpoints = contract.routes().endpoint_count(),
            "Composed contract"
        );
        Ok(contract)
    }
}

/// Run a parsed command, writing its output to `out`
///
/// Returns the process exit code.
pub fn execute(cli: &Cli, out: &mut impl Write) -> anyhow::Result<i32> {
    match &cli.command {
        Commands::Paths { contract, json } => {
            let lookup = contract.compose()?.lookup();
            if *json {
                let listing: Vec<_> = lookup
                    .iter()
                    .map(|(dot_path, route)| {
                        serde_json::json!({
                            "route": dot_path,
                            "method": route.method.as_str(),
                            "path": route.path,
                        })
                    })
                    .collect();
                writeln!(out, "{}", serde_json::to_string_pretty(&listing)?)?;
            } else {
                let width = lookup.dot_paths().map(|p| p.as_str().len()).max().unwrap_or(0);
                for (dot_path, route) in &lookup {
                    writeln!(
                        out,
                        "{:<width$}  {:<7} {}",
                        dot_path.as_str(),
                        route.method.as_str(),
                        route.path
                    )?;
                }
            }
            Ok(0)
        }
        Commands::Show { contract, route } => {
            let lookup = contract.compose()?.lookup();
            let resolved = lookup.get(route)?;
            writeln!(out, "{}", serde_json::to_string_pretty(resolved)?)?;
            Ok(0)
        }
        Commands::Lint {
            contract,
            errors_only,
        } => {
            let mut issues = lint_contract(&contract.compose()?);
            if *errors_only {
                issues.retain(|i| i.severity == LintSeverity::Error);
            }
            write_lint_issues(out, &issues)?;
            Ok(if has_errors(&issues) { 1 } else { 0 })
        }
    }
}

/// Entry point of the `brrtcontract` binary
pub fn run_cli() -> anyhow::Result<i32> {
    let cli = Cli::parse();
    init_logging(&LogConfig::from_env().verbose(cli.verbose))?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    execute(&cli, &mut out)
}
