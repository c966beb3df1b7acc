mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Args;
use lumen_renderer::{
    presets, AccumulationBuffer, ProgressiveRenderer, RenderConfig, SchedulerConfig,
};
use std::time::Instant;

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(args.log_level.into())
        .parse_default_env()
        .init();

    if args.list_worlds {
        for name in presets::names() {
            println!("{}", name);
        }
        return Ok(());
    }

    log::info!("Starting lumen");

    let mut scheduler = SchedulerConfig::default();
    if let Some(threads) = args.threads {
        scheduler.workers = threads.max(1);
        scheduler.max_in_flight = scheduler.workers;
    }

    let config = RenderConfig {
        samples_per_pass: args.samples_per_pass.max(1),
        max_depth: args.max_depth,
    };

    let target = AccumulationBuffer::new(args.width, args.height)
        .context("Failed to create accumulation buffer")?;
    let mut renderer = ProgressiveRenderer::with_presets(target, &args.world, config, scheduler)
        .with_context(|| format!("Failed to set up world '{}'", args.world))?;

    let start = Instant::now();
    for pass in 1..=args.passes {
        let pass_start = Instant::now();
        renderer.render_pass();
        log::debug!("Pass {}/{} in {:?}", pass, args.passes, pass_start.elapsed());
    }
    log::info!(
        "Rendered {} passes ({} spp) in {:?}",
        args.passes,
        args.passes as u64 * u64::from(renderer.samples_per_pass()),
        start.elapsed()
    );

    renderer
        .save(&args.output)
        .with_context(|| format!("Failed to save {}", args.output.display()))?;

    Ok(())
}
