//! Terminal rendering of the board.

use colored::{ColoredString, Colorize};
use taskboard::engine::resolver::short_id;
use taskboard::engine::stats::TaskStats;
use taskboard::engine::view::View;
use taskboard::engine::{Priority, Status, Task};

/// What a refresh prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    Silent,
    Summary,
    Board,
}

pub struct TerminalView {
    mode: RenderMode,
}

impl TerminalView {
    #[must_use]
    pub fn silent() -> Self {
        Self {
            mode: RenderMode::Silent,
        }
    }

    pub fn set_mode(&mut self, mode: RenderMode) {
        self.mode = mode;
    }
}

impl View for TerminalView {
    fn refresh(&mut self, visible: &[&Task], stats: &TaskStats) {
        match self.mode {
            RenderMode::Silent => {}
            RenderMode::Summary => print_stats(stats),
            RenderMode::Board => {
                if visible.is_empty() {
                    println!("   (no matching tasks)");
                }
                for task in visible {
                    print_card(task);
                }
                println!();
                print_stats(stats);
            }
        }
    }
}

pub fn print_card(task: &Task) {
    println!(
        "{} [{}] {} {} {}",
        swatch(task),
        short_id(task.id()).dimmed(),
        task.title().bold(),
        priority_label(task.priority()),
        task.status().to_string().dimmed()
    );
    if !task.description().is_empty() {
        println!("      {}", task.description().dimmed());
    }
}

pub fn print_stats(stats: &TaskStats) {
    let parts: Vec<String> = Status::ALL
        .iter()
        .map(|s| format!("{} {s}", stats.count(*s)))
        .collect();
    println!(
        "{} {} tasks: {}",
        "📋".cyan(),
        stats.total,
        parts.join(", ").dimmed()
    );
}

/// A colored dot in the task's status color.
pub fn swatch(task: &Task) -> ColoredString {
    match hex_rgb(task.color()) {
        Some((r, g, b)) => "●".truecolor(r, g, b),
        None => "●".normal(),
    }
}

fn priority_label(priority: Priority) -> ColoredString {
    match priority {
        Priority::High => "HIGH".red(),
        Priority::Medium => "MED".yellow(),
        Priority::Low => "LOW".dimmed(),
    }
}

fn hex_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}
