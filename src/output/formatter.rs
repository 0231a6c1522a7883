use std::io::IsTerminal;

use owo_colors::OwoColorize;

use crate::stats::Summary;

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

const SUFFIXES: [&str; 11] = ["", "k", "M", "G", "T", "P", "E", "Z", "Y", "R", "Q"];

/// Format a magnitude with three decimals and an SI-style suffix
/// ("200.000", "5.000k", "2.163M").
pub fn human_readable(value: f64) -> String {
    let mut scaled = value;
    let mut suffix_index = 0;
    while scaled > 1000.0 && suffix_index < SUFFIXES.len() - 1 {
        scaled /= 1000.0;
        suffix_index += 1;
    }
    format!("{:.3}{}", scaled, SUFFIXES[suffix_index])
}

/// Table title for one flag combination, e.g. "Follower/NonVIP".
pub fn combo_title(follower: bool, vip_or_mod: bool) -> String {
    let follower_str = if follower { "Follower" } else { "Nonfollower" };
    let vip_str = if vip_or_mod { "VIP" } else { "NonVIP" };
    format!("{follower_str}/{vip_str}")
}

/// Column label for one subscription tier.
pub fn tier_label(tier: u8) -> String {
    if tier == 0 {
        "Nonsub".to_string()
    } else {
        format!("T{tier}")
    }
}

/// Format summaries as a table: one column per tier, one row per statistic.
/// Label column: 5 chars, left-aligned. Value columns: 10 chars,
/// right-aligned, human-readable magnitudes.
pub fn format_summary_table(
    title: &str,
    columns: &[String],
    summaries: &[Summary],
    use_colors: bool,
) -> String {
    let label_width = 5;
    let column_width = 10;

    let mut lines = Vec::new();
    lines.push(if use_colors {
        title.bold().to_string()
    } else {
        title.to_string()
    });

    let mut header = " ".repeat(label_width);
    for column in columns {
        header.push_str(&format!("{column:>column_width$}"));
    }
    lines.push(if use_colors {
        header.cyan().to_string()
    } else {
        header
    });

    if let Some(first) = summaries.first() {
        for (row_index, (label, _)) in first.rows().iter().enumerate() {
            let mut line = format!("{label:<label_width$}");
            for summary in summaries {
                let (_, value) = summary.rows()[row_index];
                line.push_str(&format!("{:>column_width$}", human_readable(value)));
            }
            lines.push(line);
        }
    }

    lines.join("\n")
}
