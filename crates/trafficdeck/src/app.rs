//! Application entry point and dispatch.

use std::io::{IsTerminal, Write};

use anyhow::{bail, Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;

use trafficdeck_cli::completion::generate_completion;
use trafficdeck_cli::output::{curve_json, curve_text, format_duration, write_to_file};
use trafficdeck_cli::{ApplyRunner, CatalogPresenter, Styler};
use trafficdeck_core::cancel::CancellationToken;
use trafficdeck_core::workflow::interest_label;
use trafficdeck_core::{
    synthesize, CurveOptions, DashboardConfig, DashboardModel, DatasetGroup, DeckError,
    ScriptedSubmitter, SimulatedSubmitter, SubmissionWorkflow, SubmitCapability,
    VirtualScheduler, WorkflowConfig,
};
use trafficdeck_tui::TuiApp;

use crate::config::AppConfig;
use crate::logging;

/// Run the application.
pub fn run(config: &AppConfig) -> Result<()> {
    if let Some(shell) = config.completion {
        let mut cmd = <AppConfig as clap::CommandFactory>::command();
        generate_completion(&mut cmd, shell, &mut std::io::stdout());
        return Ok(());
    }

    if config.tui {
        return run_tui(config);
    }

    logging::init_stderr(config.verbose);

    if config.apply {
        return run_apply(config);
    }
    if !config.series.is_empty() {
        return run_series(config);
    }
    // --list is the default mode and conflicts with every other one.
    run_list(config)
}

/// The catalog from `--catalog`, or the built-in one.
fn load_catalog(config: &AppConfig) -> Result<DatasetGroup> {
    match &config.catalog {
        Some(path) => {
            let catalog = DatasetGroup::load(path)?;
            tracing::debug!(path = %path.display(), categories = catalog.len(), "catalog loaded");
            Ok(catalog)
        }
        None => Ok(DatasetGroup::builtin()),
    }
}

fn curve_options(config: &AppConfig) -> CurveOptions {
    CurveOptions::default().with_viewport(config.viewport)
}

fn submitter(config: &AppConfig) -> Box<dyn SubmitCapability> {
    match &config.fail_submissions {
        Some(reason) => Box::new(ScriptedSubmitter::failing(
            config.submit_latency,
            reason.clone(),
        )),
        None => Box::new(SimulatedSubmitter::new(config.submit_latency)),
    }
}

fn workflow(config: &AppConfig) -> SubmissionWorkflow<Box<dyn SubmitCapability>> {
    SubmissionWorkflow::with_submitter(
        submitter(config),
        WorkflowConfig {
            reset_after: config.reset_after,
        },
    )
}

fn run_series(config: &AppConfig) -> Result<()> {
    let curve = synthesize(&config.series, &curve_options(config))?;

    let text = if config.json {
        curve_json(&curve).context("serializing curve")?
    } else {
        curve_text(&curve, config.quiet)
    };
    println!("{text}");

    if let Some(path) = &config.output {
        write_to_file(path, &curve.path_data())
            .with_context(|| format!("writing {}", path.display()))?;
    }
    Ok(())
}

fn run_list(config: &AppConfig) -> Result<()> {
    let catalog = load_catalog(config)?;
    let only = config.category.as_deref();
    if let Some(key) = only {
        if !catalog.contains(key) {
            return Err(DeckError::UnknownCategory(key.to_string()).into());
        }
    }

    if config.json {
        let json = match only.and_then(|key| catalog.get(key)) {
            Some(cases) => serde_json::to_string_pretty(cases).context("serializing cases")?,
            None => catalog.to_json()?,
        };
        println!("{json}");
        return Ok(());
    }

    let presenter = CatalogPresenter::new(Styler::from_env(), config.quiet);
    if !config.quiet {
        let dashboard = DashboardModel::seeded(
            catalog.clone(),
            dashboard_config(config),
            config.seed.unwrap_or_default(),
        );
        println!("{}\n", presenter.render_state(&dashboard.state()));
    }
    let mut stdout = std::io::stdout().lock();
    write!(stdout, "{}", presenter.render(&catalog, only))?;
    Ok(())
}

fn run_apply(config: &AppConfig) -> Result<()> {
    let fields = config.application_fields();
    if !fields.interest.is_empty() && interest_label(&fields.interest).is_none() {
        return Err(DeckError::InvalidInput(format!(
            "unknown area of interest: {}",
            fields.interest
        ))
        .into());
    }

    let cancel = CancellationToken::new();
    ctrlc_handler(cancel.clone())?;

    let mut workflow = workflow(config);
    // indicatif hides the spinner itself when stderr is not a terminal.
    let runner = ApplyRunner::new(trafficdeck_cli::runner::DEFAULT_POLL, !config.quiet);
    let summary = runner.run(&mut workflow, &fields, &cancel)?;

    if !config.quiet {
        let styler = Styler::from_env();
        println!(
            "{}",
            styler.ok(&format!(
                "Access granted for {} ({}) in {}",
                summary.fields.name,
                summary.fields.contact,
                format_duration(summary.elapsed)
            ))
        );
    }
    Ok(())
}

fn dashboard_config(config: &AppConfig) -> DashboardConfig {
    DashboardConfig {
        tick_interval: config.tick_interval,
        ..DashboardConfig::default()
    }
}

fn run_tui(config: &AppConfig) -> Result<()> {
    if !std::io::stdout().is_terminal() {
        bail!("--tui needs an interactive terminal");
    }
    let (tx, rx) = crossbeam_channel::unbounded();
    logging::init_tui(tx, config.verbose);

    let catalog = load_catalog(config)?;
    let rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut dashboard = DashboardModel::new(
        catalog,
        dashboard_config(config),
        VirtualScheduler::new(),
        rng,
    );
    if let Some(key) = &config.category {
        dashboard.select_category(key)?;
    }

    let mut app = TuiApp::new(dashboard, workflow(config), curve_options(config), rx);
    app.run().context("terminal error")?;

    if app.cancelled {
        return Err(DeckError::Cancelled.into());
    }
    Ok(())
}

fn ctrlc_handler(cancel: CancellationToken) -> Result<()> {
    ctrlc::set_handler(move || cancel.cancel()).context("setting Ctrl+C handler")
}
