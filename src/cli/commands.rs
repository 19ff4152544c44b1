//! Command implementations

use anyhow::{Context, Result};
use tracing::info;

use crate::adapters::toml_config::{AppConfig, TomlConfigAdapter};
use crate::app::{AppContainer, DefaultAppContainer, EncodePlan};
use crate::cli::{Cli, Commands, EncodeArgs, PlanArgs, ProbeArgs};
use crate::config_initialization::build_request;
use crate::utils::Utils;

/// Load configuration and dispatch the requested command
pub async fn run(cli: Cli) -> Result<()> {
    let config = TomlConfigAdapter::resolve(cli.config.as_deref())
        .context("Failed to load configuration")?;

    match cli.command {
        Commands::Encode(args) => encode(args, &config).await,
        Commands::Plan(args) => plan(args, &config).await,
        Commands::Probe(args) => probe(args, &config).await,
    }
}

/// Execute the encode command
pub async fn encode(args: EncodeArgs, config: &AppConfig) -> Result<()> {
    let container = DefaultAppContainer::new(&config.tools);
    let interactor = container.encode_interactor();

    let plan = interactor.plan(build_request(&args, &config.defaults)).await?;
    info!("Running: {}", plan.invocation);

    let report = interactor.run(&plan).await?;
    let size = std::fs::metadata(&report.output)
        .map(|m| Utils::format_file_size(m.len()))
        .unwrap_or_else(|_| "unknown size".to_string());

    println!(
        "Encoded {} ({}) at {} kbit/s video in {}",
        report.output,
        size,
        report.video_bitrate,
        Utils::format_duration(report.elapsed)
    );
    Ok(())
}

/// Execute the plan command
pub async fn plan(args: PlanArgs, config: &AppConfig) -> Result<()> {
    let container = DefaultAppContainer::new(&config.tools);
    let plan = container
        .encode_interactor()
        .plan(build_request(&args.encode, &config.defaults))
        .await?;

    if args.json {
        let json = serde_json::to_string_pretty(&plan)
            .context("Failed to serialize plan to JSON")?;
        println!("{}", json);
    } else {
        display_plan(&plan);
    }
    Ok(())
}

/// Execute the probe command
pub async fn probe(args: ProbeArgs, config: &AppConfig) -> Result<()> {
    let container = DefaultAppContainer::new(&config.tools);
    let duration = container.encode_interactor().probe(&args.input).await?;

    if args.json {
        let json = serde_json::json!({ "input": args.input, "duration": duration });
        println!("{}", json);
    } else {
        println!("{:.3}", duration);
    }
    Ok(())
}

/// Display an encode plan in human-readable format
fn display_plan(plan: &EncodePlan) {
    println!(
        "Duration:      {:.3}s (of {:.3}s)",
        plan.encoded_duration, plan.media_duration
    );
    if let Some(seek) = plan.request.seek {
        println!("Seek:          {}", seek);
    }
    if let Some(limit) = plan.request.duration_limit {
        println!("Limit:         {}", limit);
    }
    println!("Video bitrate: {} kbit/s", plan.video_bitrate);
    println!("Audio bitrate: {} kbit/s", plan.request.audio_bitrate);
    println!("Threads:       {}", plan.request.threads);
    println!();
    println!("{}", plan.invocation);
}
