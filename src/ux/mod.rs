use colored::Colorize;
use humansize::{format_size, DECIMAL};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use crate::augment::required_paths;
use crate::pipeline::GenerationOutcome;
use crate::wire::{ApplicationCategory, CrudItem, HistoryEntry};

pub fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg} {elapsed}") {
        pb.set_style(style);
    }
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(120));
    pb
}

fn category_badge(category: ApplicationCategory) -> String {
    match category {
        ApplicationCategory::Crud => "[CRUD]".yellow().bold().to_string(),
        ApplicationCategory::Static => "[STATIC]".cyan().bold().to_string(),
    }
}

pub fn print_outcome(out: &GenerationOutcome) {
    println!("\n=== GENERATED {} {} ===", category_badge(out.category), out.id.dimmed());
    for &path in required_paths(out.category) {
        let size = out.augmented.get(path).map(str::len).unwrap_or(0);
        let label = if out.files.contains(path) {
            "[GENERATED]".green().bold()
        } else {
            "[DEFAULT]".dimmed()
        };
        println!("  {} {}  ({})", label, path, format_size(size, DECIMAL));
    }
    let extra: Vec<&str> = out
        .files
        .paths()
        .into_iter()
        .filter(|p| !required_paths(out.category).iter().any(|r| r == p))
        .collect();
    if !extra.is_empty() {
        println!("  {} {}", "not archived:".dimmed(), extra.join(", "));
    }
    println!(
        "\n{} {}  ({})  {}",
        "Archive:".bold(),
        out.archive.file_name,
        format_size(out.archive.bytes, DECIMAL),
        out.archive.path.display().to_string().dimmed()
    );
    println!("{} {}", "Download:".bold(), out.archive.download_path);
    if !out.history_recorded {
        println!("{}", "warning: history entry was not saved".yellow());
    }
}

pub fn print_history(entries: &[HistoryEntry]) {
    if entries.is_empty() {
        println!("(no history)");
        return;
    }
    for (i, e) in entries.iter().enumerate() {
        println!(
            "{}. {}  {}  {}",
            i + 1,
            e.created_at.format("%Y-%m-%d %H:%M:%S").to_string().dimmed(),
            format!("[{}]", e.kind).magenta().bold(),
            e.prompt
        );
        println!("   id {}  files: {}", e.id, e.generated_files.paths().join(", "));
    }
}

pub fn print_items(items: &[CrudItem]) {
    if items.is_empty() {
        println!("(no items)");
        return;
    }
    for item in items {
        let fields = serde_json::to_string(&item.fields).unwrap_or_default();
        let updated = item
            .updated_at
            .map(|t| format!("  updated {}", t.to_rfc3339()))
            .unwrap_or_default();
        println!("{}  {}{}", item.id.bold(), fields, updated.dimmed());
    }
}
