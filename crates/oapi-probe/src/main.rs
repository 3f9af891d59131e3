//! Automation Probe
//!
//! Issues one late-bound call against an automation object and prints the
//! status and every by-ref output.
//!
//! Run with:
//! ```text
//! oapi-probe --root Sap2000v15.SapObject --path SapModel.PointObj \
//!     --method GetCoordCartesian s:1 '&d' '&d' '&d' s:Global
//! ```
//!
//! `--dry-run` serves the call in-process with status 0, which checks the
//! argument syntax without the application.

mod args;

use std::sync::Arc;

use clap::{ArgAction, Parser};
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use oapi::{AutomationHost, Dispatcher, EnumRegistry, LoopbackHost};

use crate::args::ProbeArg;

#[derive(Parser)]
#[command(name = "oapi-probe")]
#[command(about = "Issue one late-bound automation call")]
struct Cli {
    /// Registered name of the root object
    #[arg(short, long, default_value = "Sap2000v15.SapObject")]
    root: String,

    /// Dotted member path below the root
    #[arg(short, long, default_value = "")]
    path: String,

    /// Method to invoke on the resolved object
    #[arg(short, long)]
    method: String,

    /// Serve the call in-process instead of binding the application
    #[arg(long)]
    dry_run: bool,

    /// Raise the log level (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Arguments: i:42 d:1.5 b:true s:text &i &d=2.5 &s &b &d[] &i[]=1,2,3
    #[arg(allow_hyphen_values = true)]
    args: Vec<ProbeArg>,
}

fn host(cli: &Cli) -> Result<Arc<dyn AutomationHost>, Box<dyn std::error::Error>> {
    if cli.dry_run {
        return Ok(Arc::new(LoopbackHost::new(cli.root.as_str()).with_fallback(|_| Ok(0))));
    }
    com_host()
}

#[cfg(all(windows, feature = "com"))]
fn com_host() -> Result<Arc<dyn AutomationHost>, Box<dyn std::error::Error>> {
    Ok(Arc::new(oapi::ComHost::new()))
}

#[cfg(not(all(windows, feature = "com")))]
fn com_host() -> Result<Arc<dyn AutomationHost>, Box<dyn std::error::Error>> {
    Err("binding the application requires Windows with the `com` feature; use --dry-run".into())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut cli = Cli::parse();

    let level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let host = host(&cli)?;
    debug!("Using host {}", host.describe());

    let dispatcher = Dispatcher::new(host, Arc::new(EnumRegistry::new()));
    let handle = oapi::resolve(&cli.root, &cli.path);
    info!("Calling {}.{} with {} argument(s)", handle, cli.method, cli.args.len());

    let status = {
        let mut call_args: Vec<_> = cli.args.iter_mut().map(ProbeArg::as_arg).collect();
        dispatcher.invoke(&handle, &cli.method, &mut call_args)?
    };

    println!("status: {}", status.code());
    for (index, arg) in cli.args.iter().enumerate() {
        if let Some(slot) = arg.slot() {
            println!("  [{}] {}", index, slot.render());
        }
    }
    Ok(())
}
