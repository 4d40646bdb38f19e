// Lendsuite onboarding wizard core
// Stepper persistence, dirty-state guards, navigation orchestration and the
// terminal-step approval flow shared by the onboarding wizards.

pub mod api;
pub mod guards;
pub mod models;
pub mod session;
pub mod stepper;
pub mod utils;
pub mod wizard;

pub use guards::{GuardState, GuardStore, Mode};
pub use stepper::StepProgress;
pub use wizard::{FooterAction, FooterContext, FormHost, NextOutcome, WizardStore};

/// Initialize logging with dual format (JSON + human-readable).
///
/// - JSON format to a `.log` file for structured parsing
/// - Human-readable format to a `.txt` file
/// - Optionally human-readable to stdout (hosts embedding a terminal UI
///   disable this to avoid corrupting their screen)
pub fn init_logging(with_stdout: bool) -> Result<(), Box<dyn std::error::Error>> {
    let log_dir = utils::path_resolver::resolve_log_folder()?;

    let timestamp = chrono::Utc::now().format("%Y-%m-%d-%H%M%S");
    let json_log_file = log_dir.join(format!("onboard-wizard-{}.log", timestamp));
    let txt_log_file = log_dir.join(format!("onboard-wizard-{}.txt", timestamp));

    let mut dispatch = fern::Dispatch::new().level(log::LevelFilter::Debug);

    if with_stdout {
        dispatch = dispatch.chain(
            fern::Dispatch::new()
                .format(move |out, message, record| {
                    let timestamp_local = chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
                    let message_str = format!("{}", message);
                    let (flow, step, cleaned) = utils::logging::parse_log_tags(&message_str);
                    let line = utils::logging::format_text_line(
                        &timestamp_local.to_string(),
                        record.level(),
                        record.target(),
                        &cleaned,
                        flow.as_deref(),
                        step.as_deref(),
                    );
                    out.finish(format_args!("{}", line));
                })
                .chain(std::io::stdout()),
        );
    }

    dispatch = dispatch
        .chain(
            fern::Dispatch::new()
                .format(move |out, message, record| {
                    let timestamp_utc = chrono::Utc::now().to_rfc3339();
                    let message_str = format!("{}", message);
                    let (flow, step, cleaned) = utils::logging::parse_log_tags(&message_str);
                    let line = utils::logging::format_json_line(
                        &timestamp_utc,
                        record.level(),
                        record.target(),
                        &cleaned,
                        flow.as_deref(),
                        step.as_deref(),
                    );
                    out.finish(format_args!("{}\n", line));
                })
                .chain(fern::log_file(json_log_file)?),
        )
        .chain(
            fern::Dispatch::new()
                .format(move |out, message, record| {
                    let timestamp_local = chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
                    let message_str = format!("{}", message);
                    let (flow, step, cleaned) = utils::logging::parse_log_tags(&message_str);
                    let line = utils::logging::format_text_line(
                        &timestamp_local.to_string(),
                        record.level(),
                        record.target(),
                        &cleaned,
                        flow.as_deref(),
                        step.as_deref(),
                    );
                    out.finish(format_args!("{}\n", line));
                })
                .chain(fern::log_file(txt_log_file)?),
        );

    dispatch.apply()?;
    Ok(())
}
