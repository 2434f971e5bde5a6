//! validate-pod - check a Pod manifest and report the first problem found

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use pod_validation::{
    ContainerNamePolicy, OsNamePolicy, OutputFormat, ProbePortPolicy, ValidationPolicy,
    WriterSink, validate_file,
};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Validate a v1 Pod manifest
#[derive(Parser, Debug)]
#[command(name = "validate-pod")]
#[command(version, about = "Validate a v1 Pod manifest", long_about = None)]
struct Args {
    /// Path to the YAML manifest to validate
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Print the diagnostic as a JSON object instead of text
    #[arg(long)]
    json_errors: bool,

    /// Accepted values for spec.os.name
    #[arg(long, value_enum, default_value_t = OsNameArg::Any)]
    os_name_policy: OsNameArg,

    /// Accepted shapes for containers[].name
    #[arg(long, value_enum, default_value_t = ContainerNameArg::SnakeCase)]
    container_name_policy: ContainerNameArg,

    /// Checks applied to probe httpGet.port
    #[arg(long, value_enum, default_value_t = ProbePortArg::RangeChecked)]
    probe_port_policy: ProbePortArg,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OsNameArg {
    /// Any string
    Any,
    /// linux or windows
    Restricted,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ContainerNameArg {
    /// Lowercase letters, digits and underscores
    SnakeCase,
    /// Any non-empty string
    NonEmpty,
    /// Any string
    Any,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ProbePortArg {
    /// 1 to 65535, like containerPort
    RangeChecked,
    /// Any integer
    Unchecked,
}

impl Args {
    fn policy(&self) -> ValidationPolicy {
        let os_name = match self.os_name_policy {
            OsNameArg::Any => OsNamePolicy::Any,
            OsNameArg::Restricted => OsNamePolicy::Restricted,
        };
        let container_name = match self.container_name_policy {
            ContainerNameArg::SnakeCase => ContainerNamePolicy::SnakeCase,
            ContainerNameArg::NonEmpty => ContainerNamePolicy::NonEmpty,
            ContainerNameArg::Any => ContainerNamePolicy::Any,
        };
        let probe_port = match self.probe_port_policy {
            ProbePortArg::RangeChecked => ProbePortPolicy::RangeChecked,
            ProbePortArg::Unchecked => ProbePortPolicy::Unchecked,
        };
        ValidationPolicy {
            os_name,
            container_name,
            probe_port,
        }
    }

    fn output_format(&self) -> OutputFormat {
        if self.json_errors {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let args = match Args::try_parse() {
        Ok(args) => args,
        // Usage errors exit with 1 like every other failure.
        Err(e) if e.use_stderr() => {
            let _ = e.print();
            process::exit(1);
        }
        Err(e) => e.exit(),
    };

    match run(&args) {
        Ok(true) => process::exit(0),
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    }
}

/// Returns whether the manifest is valid. The diagnostic for an invalid
/// manifest has already been written to stderr.
fn run(args: &Args) -> Result<bool> {
    let policy = args.policy();
    tracing::debug!(input = %args.input.display(), ?policy, "validating");

    let stderr = io::stderr();
    let mut sink = WriterSink::new(stderr.lock(), args.output_format());
    let outcome = validate_file(&args.input, policy, &mut sink);

    sink.into_inner()
        .flush()
        .context("Failed to flush diagnostics to stderr")?;

    Ok(outcome.is_ok())
}
