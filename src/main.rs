//! thumbgate - inspect thumbnail sizes under the configured limits.

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing::{debug, error};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use thumbgate::{
    config::{CheckArgs, Command, Config, SizesArgs},
    CropStrategy, GenerationGate, LimitPolicy, Size, Tier,
};

fn main() -> ExitCode {
    let config = Config::parse();

    init_logging(config.verbose);

    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        return ExitCode::FAILURE;
    }

    let policy = LimitPolicy::default();
    if let Err(e) = config.apply(&policy) {
        error!("Configuration error: {}", e);
        return ExitCode::FAILURE;
    }

    let thresholds = policy.thresholds();
    debug!(
        precached = thresholds.precached_limit(),
        uncached = thresholds.uncached_limit(),
        filter = %config.thumb_filter,
        "Loaded configuration"
    );

    let gate = GenerationGate::new(Arc::new(config.catalog()), Arc::new(policy));

    match config.command {
        Command::Sizes(ref args) => run_sizes(&gate, args),
        Command::Check(ref args) => run_check(&gate, args),
    }
}

// =============================================================================
// Sizes Command
// =============================================================================

fn run_sizes(gate: &GenerationGate, args: &SizesArgs) -> ExitCode {
    let sizes: Vec<&Size> = gate
        .catalog()
        .iter()
        .filter(|size| !args.public || size.public)
        .collect();

    if args.json {
        let rows: Vec<serde_json::Value> = sizes
            .iter()
            .map(|size| {
                serde_json::json!({
                    "size": size,
                    "tier": gate.can_generate(size).tier,
                    "support": gate.resample_params(size).support,
                })
            })
            .collect();

        match serde_json::to_string_pretty(&rows) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                error!("Failed to serialize sizes: {}", e);
                return ExitCode::FAILURE;
            }
        }
        return ExitCode::SUCCESS;
    }

    println!(
        "{:<10} {:>11} {:>10} {:<7} {:<8} {:>7}",
        "NAME", "BOX", "TIER", "CROP", "FILTER", "SUPPORT"
    );
    for size in sizes {
        let crop = match size.crop {
            CropStrategy::Fit => "fit",
            CropStrategy::Fill(_) => "fill",
            CropStrategy::Tile => "tile",
            CropStrategy::Resize => "resize",
        };
        println!(
            "{:<10} {:>11} {:>10} {:<7} {:<8} {:>7.1}",
            size.name,
            format!("{}x{}", size.width, size.height),
            gate.can_generate(size).tier,
            crop,
            size.filter,
            gate.resample_params(size).support
        );
    }

    ExitCode::SUCCESS
}

// =============================================================================
// Check Command
// =============================================================================

fn run_check(gate: &GenerationGate, args: &CheckArgs) -> ExitCode {
    let size = match gate.catalog().get(&args.name) {
        Ok(size) => size,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let decision = gate.can_generate(size);
    let kernel = gate.resample_params(size);

    println!("Size:      {} ({}x{})", size.name, size.width, size.height);
    println!("Footprint: {} px", size.footprint());
    println!("Tier:      {}", decision.tier);
    println!("Filter:    {} (support {:.1})", kernel.filter, kernel.support);

    match decision.tier {
        Tier::Precached => println!("Result:    allowed, generate eagerly and keep"),
        Tier::OnDemand => println!("Result:    allowed, generate per request"),
        Tier::Rejected => {
            let thresholds = gate.policy().thresholds();
            if let Err(e) = decision.into_result(size, &thresholds) {
                println!("Result:    denied, {}", e);
            }
            return ExitCode::FAILURE;
        }
    }

    ExitCode::SUCCESS
}

// =============================================================================
// Logging
// =============================================================================

/// Initialize the tracing/logging subsystem.
fn init_logging(verbose: bool) {
    let env_filter = if verbose {
        "thumbgate=debug"
    } else {
        "thumbgate=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| env_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
