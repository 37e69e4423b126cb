//! Interactive driver for a meeting series
//!
//! Loops the series controller through its phases, prompting for
//! steering text between meetings and offering retry/abandon on errors.
//! Abandoning never discards persisted state; the printed resume hint
//! picks the series back up at the exact failed step.

use anyhow::{Result, bail};
use roundtable_application::{MeetingProgress, NoProgress, SeriesController};
use roundtable_domain::SeriesPhase;
use roundtable_infrastructure::{GeminiBackend, JsonFileProjectStore};
use roundtable_presentation::{ConsoleFormatter, ProgressReporter, input};

type Controller = SeriesController<GeminiBackend, JsonFileProjectStore>;

pub async fn run_series(mut controller: Controller, quiet: bool, no_input: bool) -> Result<()> {
    let progress: Box<dyn MeetingProgress> = if quiet {
        Box::new(NoProgress)
    } else {
        Box::new(ProgressReporter::new())
    };

    loop {
        match controller.phase() {
            SeriesPhase::InMeeting => {
                if let Err(e) = controller.run_meeting(progress.as_ref()).await {
                    recover_or_bail(&controller, quiet, &e.to_string())?;
                    continue;
                }
                if !quiet {
                    if let Some(result) = controller.project().meeting_results.last() {
                        println!();
                        println!(
                            "{}",
                            ConsoleFormatter::format_summary(&result.summary, &result.duration)
                        );
                    }
                }
            }

            SeriesPhase::AwaitingUserInput => {
                let next = controller.project().meeting_results.len();
                let total = controller.project().meeting_plan.len();
                let feedback = if no_input || quiet {
                    String::new()
                } else {
                    input::read_steering_input(next, total)?
                };
                controller.provide_feedback(feedback).await?;
            }

            SeriesPhase::FinalSynthesis => {
                if let Err(e) = controller.run_final_synthesis(progress.as_ref()).await {
                    recover_or_bail(&controller, quiet, &e.to_string())?;
                    continue;
                }
            }

            SeriesPhase::FinalComplete => {
                if let Some(report) = &controller.project().final_summary {
                    println!();
                    println!("{}", ConsoleFormatter::format_final_report(report));
                }
                println!(
                    "Project {} complete. Export it with: roundtable export {} report",
                    controller.project().id,
                    controller.project().id
                );
                return Ok(());
            }
        }
    }
}

/// On a turn failure: offer a retry of the exact same step, or abandon.
fn recover_or_bail(controller: &Controller, quiet: bool, message: &str) -> Result<()> {
    let resume_hint = format!(
        "the project is saved; continue later with: roundtable resume {}",
        controller.project().id
    );
    if quiet {
        bail!("{message} ({resume_hint})");
    }
    if input::confirm_retry(message)? {
        Ok(())
    } else {
        bail!("abandoned; {resume_hint}");
    }
}
