//! governance-cli: governor lookup for Abacus governance deployments.
//!
//! ## Usage
//!
//! ```bash
//! # Who governs the local deployment (dev nodes on 8545-8547)?
//! governance-cli governor
//!
//! # All governors of a deployment described in a file
//! governance-cli --env-file deploy/goerli.json --rpc goerli=https://rpc.example governors
//!
//! # No chain at all
//! governance-cli --offline --governor test2=0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed governor
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use abacus_governance::{
    AbacusGovernance, Address, ChainName, GovernanceApi, GovernanceConfig, InMemoryRouterFactory,
    JsonRpcRouterFactory, RouterFactory,
};

/// Query governance routers for their governors
#[derive(Parser, Debug)]
#[command(name = "governance-cli")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Bundled environment name (overrides GOV_ENVIRONMENT)
    #[arg(long)]
    env: Option<String>,

    /// Environment descriptor file (JSON)
    #[arg(long)]
    env_file: Option<PathBuf>,

    /// RPC endpoint for a chain, as chain=url (repeatable)
    #[arg(long = "rpc", value_parser = parse_chain_pair)]
    rpc: Vec<(ChainName, String)>,

    /// Answer from in-memory routers instead of RPC
    #[arg(long)]
    offline: bool,

    /// Governor reported in offline mode, as chain=address (repeatable)
    #[arg(long = "governor", requires = "offline", value_parser = parse_chain_pair)]
    governors: Vec<(ChainName, String)>,

    /// Print JSON instead of text
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    /// List registered domains
    Domains,
    /// List every non-zero governor
    Governors,
    /// Show the single governor; fails if there are several
    Governor,
}

/// Parse `chain=value`.
fn parse_chain_pair(s: &str) -> Result<(ChainName, String), String> {
    let (chain, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected chain=value, got '{}'", s))?;
    let chain = chain.parse::<ChainName>().map_err(|e| e.to_string())?;
    Ok((chain, value.trim().to_string()))
}

/// Settings from the environment, then command-line overrides.
fn build_config(args: &Args) -> GovernanceConfig {
    let mut config = GovernanceConfig::from_env();

    if let Some(env) = &args.env {
        config.environment = env.clone();
        config.environment_file = None;
    }
    if let Some(path) = &args.env_file {
        config.environment_file = Some(path.clone());
    }
    for (chain, url) in &args.rpc {
        config.rpc_urls.insert(*chain, url.clone());
    }

    config
}

fn build_factory(args: &Args, config: &GovernanceConfig) -> Result<Box<dyn RouterFactory>> {
    if !args.offline {
        return Ok(Box::new(JsonRpcRouterFactory::from_config(config)));
    }

    let mut factory = InMemoryRouterFactory::new();
    for (chain, address) in &args.governors {
        let address: Address = address
            .parse()
            .with_context(|| format!("Invalid governor address for {}", chain))?;
        factory = factory.with_governor(*chain, address);
    }
    Ok(Box::new(factory))
}

fn init_tracing(level: &str) -> Result<()> {
    let filter = EnvFilter::try_new(level).context("Invalid log level")?;
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

async fn run(command: Command, governance: &AbacusGovernance, json: bool) -> Result<String> {
    let output = match command {
        Command::Domains => {
            let domains = governance.domains();
            if json {
                serde_json::to_string_pretty(&domains)?
            } else {
                domains
                    .iter()
                    .map(|d| format!("{}\t{}", d.name, d.id))
                    .collect::<Vec<_>>()
                    .join("\n")
            }
        }
        Command::Governors => {
            let governors = governance
                .governors()
                .await
                .context("Failed to query governors")?;
            if json {
                serde_json::to_string_pretty(&governors)?
            } else {
                governors
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join("\n")
            }
        }
        Command::Governor => {
            let governor = governance
                .governor()
                .await
                .context("Failed to query governor")?;
            if json {
                serde_json::to_string_pretty(&governor)?
            } else {
                governor.to_string()
            }
        }
    };
    Ok(output)
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = build_config(&args);
    init_tracing(&config.log_level)?;

    let environment = config
        .load_environment()
        .context("Failed to load environment")?;
    info!(
        "Loaded environment with {} chain(s): {:?}",
        environment.len(),
        environment.chains()
    );

    let factory = build_factory(&args, &config)?;
    let governance = AbacusGovernance::from_environment(&environment, factory.as_ref())
        .context("Failed to register governance routers")?;

    let output = run(args.command, &governance, args.json).await?;
    println!("{}", output);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use abacus_governance::local_governance;

    #[test]
    fn test_parse_chain_pair() {
        let (chain, url) = parse_chain_pair("test1=http://127.0.0.1:9000").unwrap();
        assert_eq!(chain, ChainName::Test1);
        assert_eq!(url, "http://127.0.0.1:9000");

        assert!(parse_chain_pair("test1").is_err());
        assert!(parse_chain_pair("nowhere=http://x").is_err());
    }

    #[test]
    fn test_args_parse() {
        let args = Args::try_parse_from([
            "governance-cli",
            "--rpc",
            "test2=http://10.0.0.2:8545",
            "--json",
            "governors",
        ])
        .unwrap();

        assert_eq!(args.command, Command::Governors);
        assert!(args.json);
        assert_eq!(args.rpc.len(), 1);

        let config = build_config(&args);
        assert_eq!(
            config.rpc_urls.get(&ChainName::Test2).map(String::as_str),
            Some("http://10.0.0.2:8545")
        );
    }

    #[test]
    fn test_governor_flag_requires_offline() {
        let result = Args::try_parse_from([
            "governance-cli",
            "--governor",
            "test1=0x0000000000000000000000000000000000000001",
            "governor",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_offline_factory_rejects_bad_address() {
        let args = Args::try_parse_from([
            "governance-cli",
            "--offline",
            "--governor",
            "test1=0x01",
            "governor",
        ])
        .unwrap();
        let config = build_config(&args);
        assert!(build_factory(&args, &config).is_err());
    }

    #[tokio::test]
    async fn test_run_offline_governor() {
        let factory = InMemoryRouterFactory::new()
            .with_governor(ChainName::Test3, Address::new([0x42; 20]));
        let governance = local_governance(&factory).unwrap();

        let text = run(Command::Governor, &governance, false).await.unwrap();
        assert!(text.starts_with("domain 13373: 0x"));

        let json = run(Command::Governors, &governance, true).await.unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["domain"], 13373);

        let domains = run(Command::Domains, &governance, false).await.unwrap();
        assert_eq!(domains.lines().count(), 3);
        assert!(domains.starts_with("test1\t13371"));
    }

    #[tokio::test]
    async fn test_run_reports_no_governors() {
        let factory = InMemoryRouterFactory::new();
        let governance = local_governance(&factory).unwrap();

        let err = run(Command::Governor, &governance, false).await.unwrap_err();
        assert!(format!("{:#}", err).contains("no governors"));
    }
}
