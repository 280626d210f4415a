use std::path::Path;

use anyhow::Result;
use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};

use crate::aggregate::{AggregateReport, Classified, StreamOutcome};
use crate::models::Stream;

/// Visible width of the text column inside the summary box.
const BOX_TEXT: usize = 49;

/// Render a colored terminal report.
pub fn render(report: &AggregateReport, path: &Path, verbose: bool, quiet: bool) -> Result<()> {
    let matched: usize = report.streams.iter().map(|s| s.matched.len()).sum();
    let unmatched: usize = report.streams.iter().map(|s| s.unmatched.len()).sum();
    let skipped: usize = report.streams.iter().map(|s| s.skipped.len()).sum();
    let failed = report.streams.iter().filter(|s| s.is_failed()).count();

    if quiet {
        println!(
            "Keys: {}  Matched: {}  Unmatched: {}  Skipped: {}  Failed streams: {}",
            report.result.len(),
            matched.to_string().green(),
            unmatched.to_string().yellow(),
            skipped,
            failed.to_string().red(),
        );
        return Ok(());
    }

    println!(
        "\n {} v{}",
        "stig-mapper".bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!(" Project: {}\n", path.display());

    // Summary box
    println!(" ┌────────────────────────────────────────────────────┐");
    println!(" │  {} │", format!("{:<width$}", "SUMMARY", width = BOX_TEXT).bold());
    for outcome in &report.streams {
        println!(" │  {} │", summary_line(outcome));
    }
    println!(
        " │  {:<width$} │",
        format!("Distinct keys with labels : {}", report.result.len()),
        width = BOX_TEXT
    );
    println!(" └────────────────────────────────────────────────────┘\n");

    for outcome in report.streams.iter().filter(|s| s.is_failed()) {
        println!(
            " {} {} stream: {}",
            "[ERROR]".red().bold(),
            outcome.stream,
            outcome.error.as_deref().unwrap_or("unknown error")
        );
    }

    if !report.result.is_empty() {
        println!(" {} Recognized technologies:\n", "[MATCH]".green().bold());
        render_matches(report, verbose);
        println!();
    }

    if verbose {
        for outcome in &report.streams {
            render_keys(outcome.stream, "unmatched", &outcome.unmatched);
            render_keys(outcome.stream, "skipped (no description)", &outcome.skipped);
        }
    }

    Ok(())
}

/// Print the checklist titles the catalog does not cover.
pub fn render_uncovered(titles: &[String], quiet: bool) {
    if quiet {
        println!("Uncovered checklists: {}", titles.len());
        return;
    }

    if titles.is_empty() {
        println!(" {} Every checklist title is covered by the catalog", "✓".green());
        return;
    }

    println!(
        " {} {} checklist titles not covered by the catalog:\n",
        "[WARN]".yellow().bold(),
        titles.len()
    );
    for title in titles {
        println!("   {} {}", "⚠".yellow(), title);
    }
    println!();
}

/// One summary-box row, [`BOX_TEXT`] columns wide once escape codes are
/// ignored. The text is padded before the glyph is colored.
fn summary_line(outcome: &StreamOutcome) -> String {
    let glyph = if outcome.is_failed() {
        "✗".red()
    } else {
        "✓".green()
    };
    format!("{} {:<width$}", glyph, summary_text(outcome), width = BOX_TEXT - 2)
}

fn summary_text(outcome: &StreamOutcome) -> String {
    if outcome.is_failed() {
        return format!("{:<12} failed", outcome.stream.to_string());
    }
    format!(
        "{:<12}{:>5} read{:>5} matched{:>4} skipped",
        outcome.stream.to_string(),
        outcome.total,
        outcome.matched.len(),
        outcome.skipped.len()
    )
}

fn render_matches(report: &AggregateReport, verbose: bool) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Key").add_attribute(Attribute::Bold),
            Cell::new("Source").add_attribute(Attribute::Bold),
            Cell::new("Technology versions").add_attribute(Attribute::Bold),
        ]);

    for (key, labels) in report.result.iter() {
        let hits: Vec<(Stream, &Classified)> = report
            .streams
            .iter()
            .flat_map(|s| {
                s.matched
                    .iter()
                    .filter(|c| &c.key == key)
                    .map(move |c| (s.stream, c))
            })
            .collect();

        let mut sources: Vec<String> = hits.iter().map(|(stream, _)| stream.to_string()).collect();
        sources.dedup();

        // In verbose mode, mark labels that were reached through a default.
        let rendered: Vec<String> = labels
            .iter()
            .map(|label| {
                let defaulted = hits.iter().flat_map(|(_, c)| c.resolutions.iter()).any(|r| {
                    &r.full_name == label && (r.type_fallback || r.version_fallback)
                });
                if verbose && defaulted {
                    format!("{} (default)", label)
                } else {
                    label.clone()
                }
            })
            .collect();

        table.add_row(vec![
            Cell::new(key),
            Cell::new(sources.join(", ")).fg(Color::DarkGrey),
            Cell::new(rendered.join("\n")).fg(Color::Green),
        ]);
    }

    println!("{}", table);
}

fn render_keys(stream: Stream, label: &str, keys: &[String]) {
    if keys.is_empty() {
        return;
    }
    println!(" {} {} {}:", "[INFO]".cyan().bold(), stream, label);
    println!("   {}\n", keys.join(", ").dimmed());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(error: Option<&str>) -> StreamOutcome {
        StreamOutcome {
            stream: Stream::Dependencies,
            total: 12,
            matched: Vec::new(),
            unmatched: Vec::new(),
            skipped: vec!["six".to_string()],
            error: error.map(str::to_string),
        }
    }

    fn visible_width(s: &str) -> usize {
        let mut width = 0;
        let mut in_escape = false;
        for c in s.chars() {
            match c {
                '\x1b' => in_escape = true,
                'm' if in_escape => in_escape = false,
                _ if in_escape => {}
                _ => width += 1,
            }
        }
        width
    }

    #[test]
    fn test_summary_text_is_plain() {
        let text = summary_text(&outcome(None));
        assert!(!text.contains('\x1b'));
        assert_eq!(text, "dependencies   12 read    0 matched   1 skipped");
    }

    #[test]
    fn test_summary_line_width_ignores_color() {
        colored::control::set_override(true);
        let ok = summary_line(&outcome(None));
        let failed = summary_line(&outcome(Some("not found")));
        colored::control::unset_override();

        assert!(ok.contains('\x1b'));
        assert_eq!(visible_width(&ok), BOX_TEXT);
        assert_eq!(visible_width(&failed), BOX_TEXT);
    }
}
