//! Interactive stdin prompts

use std::io::{self, BufRead, Write};

use colored::Colorize;

/// Ask for steering text between meetings. Empty input is valid and
/// means "no steering".
pub fn read_steering_input(next_meeting: usize, total: usize) -> io::Result<String> {
    println!(
        "\n{} Meeting {}/{} is up next.",
        "?".cyan().bold(),
        next_meeting + 1,
        total
    );
    print!("Any direction for the next meeting? (press Enter to skip): ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// After an error: retry the failed step, or abandon the run.
///
/// Abandoning never discards persisted project data; the series can be
/// resumed later.
pub fn confirm_retry(message: &str) -> io::Result<bool> {
    eprintln!("{} {}", "Error:".red().bold(), message);
    print!("Retry the same step? [Y/n] (project is saved; 'n' exits): ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    let answer = line.trim().to_lowercase();
    Ok(answer.is_empty() || answer == "y" || answer == "yes")
}

/// Plan review gate before the series starts.
pub fn confirm_plan() -> io::Result<bool> {
    print!("Start the meeting series with this plan? [Y/n]: ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    let answer = line.trim().to_lowercase();
    Ok(answer.is_empty() || answer == "y" || answer == "yes")
}
