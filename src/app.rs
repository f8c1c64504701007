//! Application orchestrator.
//! Loads the descriptor, applies CLI overrides, initializes logging, installs the
//! interrupt handler, validates, lists candidates, asks for confirmation, and runs
//! the selection.

use anyhow::{Context, Result};
use std::io;
use std::sync::{Arc, Mutex};
use tracing::{debug, error, info};

use pano_select::cli::Args;
use pano_select::config::{create_template_config, paths::config_path_from_env};
use pano_select::output as out;
use pano_select::{
    SamplingPlan, SeededSource, SelectConfig, SelectError, default_config_path, list_candidates,
    load_config_from_json_path, select_panoramics, shutdown,
};

use crate::logging::init_tracing;

/// Run the CLI application.
pub fn run(args: Args) -> Result<()> {
    let explicit = args.config.is_some();
    let cfg_path = match args.config.clone() {
        Some(p) => p,
        None => default_config_path()?,
    };

    if args.print_config {
        out::print_info(&format!("Config file:\n  {}\n", cfg_path.display()));
        if !cfg_path.exists() {
            out::print_info(
                "No config file exists there yet. Run without --print-config to create a template.",
            );
        }
        return Ok(());
    }

    // First run at the default location: write a template and stop.
    if !explicit && !config_path_from_env() && !cfg_path.exists() {
        create_template_config(&cfg_path)?;
        out::print_success(&format!("A template config was written to: {}", cfg_path.display()));
        out::print_info(
            "Edit `input_path`, `output_subfolder`, `percentage` and `fields`, then re-run.",
        );
        return Ok(());
    }

    let mut cfg: SelectConfig = load_config_from_json_path(&cfg_path).map_err(|e| {
        out::print_error(&format!("{e:#}"));
        e
    })?;
    args.apply_overrides(&mut cfg);

    let guard_opt = init_tracing(&cfg.log_level, cfg.log_file.as_deref(), args.json).map_err(|e| {
        out::print_error(&format!("Failed to initialize logging: {e}"));
        e
    })?;

    // Dropping the guard on interrupt flushes the file appender.
    let guard_slot = Arc::new(Mutex::new(guard_opt));
    {
        let guard_slot = Arc::clone(&guard_slot);
        ctrlc::set_handler(move || {
            shutdown::request();
            out::print_warn("Received interrupt; stopping after the current file...");
            if let Ok(mut g) = guard_slot.lock() {
                let _ = g.take();
            }
        })
        .context("install interrupt handler")?;
    }

    debug!("Starting pano_select: {:?}", args);
    out::print_user(
        "-- Select a percentage of panoramic files and move them to a review subfolder (it must be on the SAME partition). --",
    );

    let result = select(&cfg, args.yes);
    if let Err(e) = &result {
        log_failure(e);
    }

    if let Ok(mut g) = guard_slot.lock() {
        let _ = g.take();
    }
    result
}

fn select(cfg: &SelectConfig, assume_yes: bool) -> Result<()> {
    cfg.validate()?;

    let candidates = list_candidates(&cfg.input_path, &cfg.filter)?;
    out::print_user(&format!(
        "\tFound {} panoramics in {}",
        candidates.len(),
        cfg.input_path.display()
    ));

    let plan = SamplingPlan::new(candidates.len(), cfg.percentage);
    let question = format!(
        "Number of files to check : {} ({} perc.)\n\t ok to proceed ?",
        plan.estimated(),
        cfg.percentage.get()
    );
    if !assume_yes && !out::confirm(&question, &mut io::stdin().lock())? {
        out::print_info("Nothing moved.");
        return Ok(());
    }

    let mut rng = match cfg.seed {
        Some(seed) => SeededSource::from_seed(seed),
        None => SeededSource::from_entropy(),
    };
    info!(seed = rng.seed(), "Selection in progress");

    let report = select_panoramics(cfg, &candidates, &mut rng)?;
    out::print_user(&report.to_string());
    if report.interrupted {
        return Err(SelectError::Interrupted.into());
    }
    if report.failed > 0 {
        out::print_warn(&format!(
            "{} picks could not be moved; see log for details",
            report.failed
        ));
    }
    out::print_user("The end.");
    Ok(())
}

fn log_failure(e: &anyhow::Error) {
    match e.downcast_ref::<SelectError>() {
        Some(se @ SelectError::NotSameVolume { input, output, prefix }) => error!(
            code = se.code(),
            kind = "not_same_volume",
            input = %input.display(),
            output = %output.display(),
            %prefix,
            "Input and output path not on same partition"
        ),
        Some(se @ SelectError::Ledger { path, context }) => error!(
            code = se.code(),
            kind = "ledger",
            path = %path.display(),
            %context,
            "Ledger write failed"
        ),
        Some(se @ SelectError::Interrupted) => {
            error!(code = se.code(), kind = "interrupted", "Selection aborted by user")
        }
        Some(se) => error!(code = se.code(), error = %se, "Selection failed"),
        None => error!(error = ?e, "Selection failed"),
    }
    out::print_error(&format!("{e:#}"));
}
