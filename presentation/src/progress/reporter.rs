//! Progress reporting for meeting execution

use std::sync::Mutex;

use colored::Colorize;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use roundtable_application::ports::progress::MeetingProgress;
use roundtable_domain::{Agent, RoundPhase};

/// Reports progress during meeting execution with progress bars
pub struct ProgressReporter {
    multi: MultiProgress,
    phase_bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            phase_bar: Mutex::new(None),
        }
    }

    fn phase_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("=>-")
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl MeetingProgress for ProgressReporter {
    fn on_meeting_start(&self, index: usize, total: usize, goal: &str, _roster: usize) {
        let _ = self.multi.println(format!(
            "\n{} {}",
            format!("Meeting {}/{}:", index + 1, total).bold().cyan(),
            goal
        ));
    }

    fn on_phase_start(&self, phase: RoundPhase, roster: usize) {
        let pb = self.multi.add(ProgressBar::new(roster as u64));
        pb.set_style(Self::phase_style());
        pb.set_prefix(phase.label());
        pb.set_message("Starting...");
        *self.phase_bar.lock().unwrap() = Some(pb);
    }

    fn on_turn_start(&self, _phase: RoundPhase, agent: &Agent) {
        if let Some(pb) = self.phase_bar.lock().unwrap().as_ref() {
            pb.set_message(format!("{} is thinking...", agent.name));
        }
    }

    fn on_turn_complete(&self, _phase: RoundPhase, agent: &Agent, generated: bool) {
        if let Some(pb) = self.phase_bar.lock().unwrap().as_ref() {
            let status = if generated {
                format!("{} {}", "v".green(), agent.name)
            } else {
                format!("{} {} (no questions)", "-".dimmed(), agent.name)
            };
            pb.set_message(status);
            pb.inc(1);
        }
    }

    fn on_phase_complete(&self, phase: RoundPhase) {
        if let Some(pb) = self.phase_bar.lock().unwrap().take() {
            pb.finish_with_message(format!("{} complete", phase.label().green()));
        }
    }

    fn on_meeting_complete(&self, _index: usize, duration: &str) {
        let _ = self.multi.println(format!(
            "{} {}",
            "Meeting complete in".green(),
            duration.bold()
        ));
    }

    fn on_final_synthesis_start(&self) {
        let _ = self
            .multi
            .println(format!("{}", "Synthesizing final project report...".cyan()));
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl MeetingProgress for SimpleProgress {
    fn on_meeting_start(&self, index: usize, total: usize, goal: &str, _roster: usize) {
        println!(
            "{} Meeting {}/{}: {}",
            "->".cyan(),
            index + 1,
            total,
            goal.bold()
        );
    }

    fn on_phase_start(&self, phase: RoundPhase, roster: usize) {
        println!("{} {} ({} participants)", "->".cyan(), phase.label().bold(), roster);
    }

    fn on_turn_start(&self, _phase: RoundPhase, _agent: &Agent) {}

    fn on_turn_complete(&self, _phase: RoundPhase, agent: &Agent, generated: bool) {
        if generated {
            println!("  {} {}", "v".green(), agent.name);
        } else {
            println!("  - {} (no questions)", agent.name);
        }
    }

    fn on_phase_complete(&self, _phase: RoundPhase) {
        println!();
    }

    fn on_meeting_complete(&self, _index: usize, duration: &str) {
        println!("{} ({})", "Meeting complete".green(), duration);
    }

    fn on_final_synthesis_start(&self) {
        println!("{}", "Synthesizing final project report...".cyan());
    }
}
