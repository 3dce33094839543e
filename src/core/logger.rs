use colored::*;
use std::time::Duration;

use crate::core::manager::DispatchReport;
use crate::core::record::Action;

/// Small console helpers so the CLI and the dispatcher print consistently.
///
/// Warnings and errors go to stderr; everything else to stdout.
pub fn init() {
    // colored detects terminal support on its own; NO_COLOR / CLICOLOR are honored there.
}

/// Print the app header
pub fn header(version: &str) {
    let title = format!(" FANOUT — connector dispatch v{} ", version)
        .bold()
        .on_bright_blue()
        .white();
    let line = "════════════════════════════════════════════════════════════";
    println!("{}", title);
    println!("{}", line.bright_black());
}

/// Print a section header
pub fn section(name: &str) {
    let left = "⟦".bright_cyan();
    let right = "⟧".bright_cyan();
    let nm = format!(" {} ", name).bold().bright_white();
    println!();
    println!("{}{}{}", left, nm, right);
}

/// Print one connector's verdict
pub fn verdict(connector: &str, accepted: bool) {
    let arrow = "  →".bright_black();
    if accepted {
        println!("{} {}   {}", arrow, connector.white(), "accepted".bright_green().bold());
    } else {
        println!("{} {}   {}", arrow, connector.white(), "rejected".bright_red().bold());
    }
}

/// Print a whole dispatch: every verdict then the combined result
pub fn report(action: Action, rep: &DispatchReport) {
    info(&format!("action {}", action));
    for v in &rep.verdicts {
        verdict(&v.connector, v.accepted);
    }
    if rep.valid {
        println!("   {}", "✅ valid".bright_green().bold());
    } else {
        println!("   {}", "❌ invalid".bright_red().bold());
    }
}

/// Print an info line (used for details)
pub fn info(msg: &str) {
    println!("   {}", msg.dimmed());
}

/// Print a warning
pub fn warn(msg: &str) {
    let w = "⚠".yellow();
    eprintln!("{} {}", w, msg.yellow());
}

/// Print an error
pub fn error(msg: &str) {
    let e = "✖".red();
    eprintln!("{} {}", e, msg.red().bold());
}

/// Print the final summary footer with elapsed time
pub fn summary(elapsed: Duration) {
    let flag = "🏁".bright_blue();
    let footer = format!("Finished — {:.3}s", elapsed.as_secs_f64())
        .bold()
        .bright_white();
    println!();
    println!("{} {}", flag, footer.on_bright_black());
}
