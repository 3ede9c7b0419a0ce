//! `authctl`: compute authorization digests and recover signers off-ledger.
//!
//! The signing domain is read from the same YAML file the ledger is
//! configured with, so digests printed here match what the ledger verifies.

use std::path::PathBuf;
use std::process::ExitCode;

use alloy_primitives::{Address, Bytes, B256, U256};
use clap::{Args, Parser, Subcommand, ValueEnum};
use gasless_operations::{
    init_logging, init_logging_from_config, load_config, parse_level, AppConfig, ConfigError,
    LogFormat,
};
use gasless_tx_eth::{
    recover_signer, Authorization, AuthorizationKind, Cancellation, SignatureError,
    SignatureInput,
};
use thiserror::Error;

#[derive(Parser)]
#[command(name = "authctl")]
#[command(about = "Digests and signer recovery for transfer authorizations")]
#[command(version)]
struct Cli {
    /// Log level override (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the EIP-712 domain separator
    DomainSeparator(ConfigArgs),
    /// Print the digest an authorizer signs
    Digest(DigestArgs),
    /// Recover the signer of a digest from a 65-byte signature
    Recover(RecoverArgs),
}

#[derive(Args)]
struct ConfigArgs {
    /// Path to the ledger YAML configuration
    #[arg(long, short)]
    config: PathBuf,
}

#[derive(Clone, Copy, ValueEnum)]
enum DigestKind {
    Transfer,
    Receive,
    Cancel,
}

#[derive(Args)]
struct DigestArgs {
    #[command(flatten)]
    config: ConfigArgs,

    #[arg(long, value_enum, default_value = "transfer")]
    kind: DigestKind,

    #[arg(long)]
    authorizer: Address,

    /// Required for transfer and receive
    #[arg(long)]
    payee: Option<Address>,

    /// Decimal or 0x-prefixed hex
    #[arg(long, default_value = "0")]
    value: U256,

    #[arg(long, default_value = "0")]
    valid_after: U256,

    /// Defaults to never expiring
    #[arg(long)]
    valid_before: Option<U256>,

    #[arg(long)]
    nonce: B256,
}

#[derive(Args)]
struct RecoverArgs {
    #[arg(long)]
    digest: B256,

    /// Hex-encoded `r || s || v`
    #[arg(long, value_parser = parse_hex_bytes)]
    signature: Bytes,
}

/// `Bytes` also converts from `String`, which clap would otherwise prefer
/// and store the hex text itself.
fn parse_hex_bytes(input: &str) -> Result<Bytes, String> {
    input
        .parse::<Bytes>()
        .map_err(|e| format!("invalid hex '{input}': {e}"))
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to initialize logging: {0}")]
    Logging(String),

    #[error("--payee is required for {0} digests")]
    MissingPayee(&'static str),

    #[error(transparent)]
    Signature(#[from] SignatureError),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<String, CliError> {
    match cli.command {
        Commands::DomainSeparator(args) => {
            let config = load(&args, cli.log_level.as_deref())?;
            let domain = config.domain.signing_domain();
            tracing::debug!(name = domain.name(), chain_id = domain.chain_id(), "loaded domain");
            Ok(domain.separator().to_string())
        }
        Commands::Digest(args) => {
            let config = load(&args.config, cli.log_level.as_deref())?;
            digest(&config, &args).map(|d| d.to_string())
        }
        Commands::Recover(args) => {
            init_cli_logging(cli.log_level.as_deref())?;
            recover(&args).map(|signer| signer.to_string())
        }
    }
}

fn load(args: &ConfigArgs, log_level: Option<&str>) -> Result<AppConfig, CliError> {
    let config = load_config(&args.config)?;
    match log_level {
        Some(level) => init_cli_logging(Some(level))?,
        None => init_logging_from_config(&config.observability)
            .map_err(|e| CliError::Logging(e.to_string()))?,
    }
    Ok(config)
}

fn init_cli_logging(level: Option<&str>) -> Result<(), CliError> {
    init_logging(parse_level(level.unwrap_or("warn")), LogFormat::Pretty)
        .map_err(|e| CliError::Logging(e.to_string()))
}

fn digest(config: &AppConfig, args: &DigestArgs) -> Result<B256, CliError> {
    let domain = config.domain.signing_domain();
    let kind = match args.kind {
        DigestKind::Cancel => {
            let cancellation = Cancellation {
                authorizer: args.authorizer,
                nonce: args.nonce,
            };
            return Ok(cancellation.digest(&domain));
        }
        DigestKind::Transfer => AuthorizationKind::Transfer,
        DigestKind::Receive => AuthorizationKind::Receive,
    };

    let payee = args.payee.ok_or(CliError::MissingPayee(match kind {
        AuthorizationKind::Transfer => "transfer",
        AuthorizationKind::Receive => "receive",
    }))?;
    let authorization = Authorization {
        authorizer: args.authorizer,
        payee,
        value: args.value,
        valid_after: args.valid_after,
        valid_before: args.valid_before.unwrap_or(U256::MAX),
        nonce: args.nonce,
    };
    Ok(authorization.digest(kind, &domain))
}

fn recover(args: &RecoverArgs) -> Result<Address, CliError> {
    let signature = SignatureInput::Packed(args.signature.clone()).parse_ecdsa()?;
    Ok(recover_signer(args.digest, &signature)?)
}
