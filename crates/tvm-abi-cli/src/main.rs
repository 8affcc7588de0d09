//! `tvm-abi`: generate typed Rust bindings from TVM contract schemas.

mod config;
mod logging;

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use thiserror::Error;
use tvm_abi::{AbiContract, AbiError, AbiType};
use tvm_abi_gen::ir::{Inputs, Outputs};
use tvm_abi_gen::{ABI_SUFFIX, GenError, GenOptions, Generator, discover_contracts, naming};

use config::{Config, ConfigError};
use logging::LoggingError;

/// CLI-specific errors.
#[derive(Error, Debug)]
pub enum AppError {
    /// Schema or type descriptor error
    #[error(transparent)]
    Abi(#[from] AbiError),

    /// Binding generation error
    #[error(transparent)]
    Gen(#[from] GenError),

    /// Configuration file error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Logging setup error
    #[error(transparent)]
    Logging(#[from] LoggingError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Nothing to generate
    #[error("No .abi.json files found in {}", .0.display())]
    NoContracts(PathBuf),
}

#[derive(Parser)]
#[command(name = "tvm-abi")]
#[command(about = "Generate typed Rust bindings from TVM contract ABIs")]
struct Cli {
    /// Path to the configuration file (defaults to ./tvm-abi.toml when present)
    #[arg(short, long, global = true, env = "TVM_ABI_CONFIG")]
    config: Option<PathBuf>,

    /// Log filter, overriding the configuration file
    #[arg(long, global = true, env = "TVM_ABI_LOG")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate binding modules from <Contract>.abi.json files
    Generate {
        /// Directory holding the schemas
        #[arg(long)]
        abi_dir: Option<PathBuf>,

        /// Directory to write the bindings to
        #[arg(long)]
        out_dir: Option<PathBuf>,

        /// Crate path the bindings import their runtime from
        #[arg(long)]
        runtime_crate: Option<String>,

        /// Contracts to generate (all schemas in the ABI directory if omitted)
        contracts: Vec<String>,
    },

    /// Parse a type descriptor and show its Rust type
    InspectType {
        /// Type descriptor, e.g. "map(address,uint256)"
        descriptor: String,

        /// Map the type as a map key
        #[arg(long)]
        map_key: bool,
    },

    /// List the methods a schema generates
    InspectAbi {
        /// Path to the <Contract>.abi.json file
        file: PathBuf,
    },
}

/// Format an error for user-friendly display
fn format_error(err: &AppError) -> String {
    use std::io::IsTerminal;

    let use_colors = std::io::stderr().is_terminal();

    let (red, yellow, reset) = if use_colors {
        ("\x1b[0;31m", "\x1b[0;33m", "\x1b[0m")
    } else {
        ("", "", "")
    };

    let mut output = format!("{red}Error:{reset} {err}\n");

    if let Some(hint) = get_error_hint(err) {
        output.push_str(&format!("{yellow}Hint:{reset} {hint}\n"));
    }

    output
}

/// Get a helpful hint for common errors
fn get_error_hint(err: &AppError) -> Option<&'static str> {
    let abi = match err {
        AppError::Abi(e) | AppError::Gen(GenError::Abi(e)) => Some(e),
        _ => None,
    };
    match (err, abi) {
        (_, Some(AbiError::MissingComponents(_))) => {
            Some("Tuple components live in the schema; use 'tvm-abi inspect-abi <FILE>' instead")
        }
        (_, Some(e)) if e.is_unsupported_type() => Some(
            "Supported types: intN, uintN, varintN, varuintN, bool, string, bytes, fixedbytesN, \
             cell, address, address_std, T[], optional(T), map(K,V), tuple",
        ),
        (_, Some(AbiError::Schema(_))) => Some("Check that the file is a contract ABI in JSON form"),
        (AppError::Gen(GenError::MissingAbi { .. }) | AppError::NoContracts(_), _) => {
            Some("Compile the contracts first, or point --abi-dir at the directory holding the .abi.json files")
        }
        (AppError::Gen(GenError::NameCollision { .. }), _) => {
            Some("Two schema entries map to the same generated name; rename one of them")
        }
        (AppError::Config(ConfigError::Parse(_)), _) => {
            Some("Valid sections are [generate] (abi_dir, out_dir, contracts, runtime_crate) and [logging]")
        }
        _ => None,
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(err) = setup(&cli).and_then(|config| run(cli, config, &mut std::io::stdout())) {
        eprint!("{}", format_error(&err));
        std::process::exit(1);
    }
}

/// Load the configuration and install logging.
fn setup(cli: &Cli) -> Result<Config, AppError> {
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(level) = &cli.log_level {
        config.logging.level = level.clone();
    }
    logging::init(&config.logging)?;
    tracing::debug!(config = ?cli.config, "configuration loaded");
    Ok(config)
}

fn run(cli: Cli, config: Config, out: &mut impl Write) -> Result<(), AppError> {
    match cli.command {
        Commands::Generate {
            abi_dir,
            out_dir,
            runtime_crate,
            contracts,
        } => {
            let settings = config.generate;
            let abi_dir = abi_dir.unwrap_or(settings.abi_dir);
            let out_dir = out_dir.unwrap_or(settings.out_dir);
            let runtime_crate = runtime_crate.unwrap_or(settings.runtime_crate);
            let contracts = match (contracts.is_empty(), settings.contracts.is_empty()) {
                (false, _) => contracts,
                (true, false) => settings.contracts,
                (true, true) => discover_contracts(&abi_dir)?,
            };
            if contracts.is_empty() {
                return Err(AppError::NoContracts(abi_dir));
            }

            tracing::info!(abi_dir = %abi_dir.display(), count = contracts.len(), "generating bindings");
            let generator = Generator::new(GenOptions { runtime_crate });
            for path in generator.generate_to_dir(&abi_dir, &out_dir, &contracts)? {
                writeln!(out, "Generated {}", path.display())?;
            }
            Ok(())
        }
        Commands::InspectType {
            descriptor,
            map_key,
        } => {
            let ty = AbiType::parse(&descriptor, None)?;
            let rust = if map_key {
                if !ty.is_scalar_key() {
                    return Err(AbiError::UnsupportedMapKey(ty.to_string()).into());
                }
                tvm_abi_gen::rust_key_type(&ty)
            } else {
                tvm_abi_gen::rust_type(&ty)
            };
            writeln!(out, "descriptor: {ty}")?;
            writeln!(out, "ast: {ty:?}")?;
            writeln!(out, "rust: {rust}")?;
            Ok(())
        }
        Commands::InspectAbi { file } => inspect_abi(&file, out),
    }
}

fn contract_name(file: &Path) -> String {
    let name = file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    if let Some(stem) = name.strip_suffix(ABI_SUFFIX) {
        return stem.to_string();
    }
    file.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or(name)
}

fn inspect_abi(file: &Path, out: &mut impl Write) -> Result<(), AppError> {
    let abi = AbiContract::from_file(file)?;
    let contract = contract_name(file);
    let module = Generator::default().module(&contract, &abi)?;

    writeln!(out, "contract: {} ({})", module.contract, module.contract_path)?;
    writeln!(out, "constructor: {}", if module.has_constructor { "yes" } else { "no (sendDeploy)" })?;

    writeln!(out, "functions:")?;
    for f in &module.functions {
        writeln!(
            out,
            "  {} -> {}, {}, {}, {}{}",
            f.abi_name,
            f.send,
            f.body,
            f.body_external,
            f.send_external,
            describe_inputs(&f.inputs)
        )?;
    }

    writeln!(out, "getters:")?;
    for g in &module.getters {
        let returns = match &g.outputs {
            Outputs::None => "()".to_string(),
            Outputs::Single(field) => field.rust_type.clone(),
            Outputs::Struct(def) => def.name.clone(),
        };
        writeln!(
            out,
            "  {} -> {}{} -> {returns}",
            g.abi_name,
            g.method,
            describe_inputs(&g.inputs)
        )?;
    }

    writeln!(out, "fields:")?;
    for field in &module.state.fields {
        let init = if field.param.is_init() { " (init)" } else { "" };
        writeln!(
            out,
            "  {}: {}{init} -> {}",
            naming::identifier(&field.param.name),
            field.param.ty,
            field.rust_type
        )?;
    }
    Ok(())
}

fn describe_inputs(inputs: &Inputs) -> String {
    match inputs {
        Inputs::None => String::new(),
        Inputs::Single(field) => format!(" ({}: {})", field.ident, field.rust_type),
        Inputs::Struct(def) => format!(" ({})", def.name),
    }
}
