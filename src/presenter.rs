// WHY: Terminal rendering for the CLI; the library types stay free of presentation concerns

use std::fmt::Write;

use crate::pipeline::DocumentComparison;
use crate::report::HistogramBin;

const BAR_WIDTH: usize = 40;
const BAR_CHAR: char = '#';

/// Render every section of a comparison as plain text
pub fn render_comparison(title: &str, comparison: &DocumentComparison) -> String {
    let mut out = String::new();
    let metrics = &comparison.metrics;

    // WHY: writing to a String cannot fail, so the fmt::Result is discarded throughout
    let _ = writeln!(out, "=== {title} ===");
    let _ = writeln!(
        out,
        "Characters: {} | Pages: {} | Line breaks: {}",
        metrics.char_count, metrics.page_count, metrics.newline_count
    );
    out.push('\n');

    render_table(&mut out, comparison);
    render_counts_chart(&mut out, comparison);
    render_sentence_stats(&mut out, comparison);
    render_sample(&mut out, comparison);
    render_histogram(&mut out, &comparison.histogram);
    out
}

fn render_table(out: &mut String, comparison: &DocumentComparison) {
    let _ = writeln!(out, "{:<18} {:>10} {:>12} {:>8}", "Method", "Sentences", "Avg Length", "Quality");
    for row in &comparison.report.rows {
        let _ = writeln!(
            out,
            "{:<18} {:>10} {:>12.1} {:>8}",
            row.method, row.sentence_count, row.avg_length, row.quality
        );
    }
    out.push('\n');
}

fn render_counts_chart(out: &mut String, comparison: &DocumentComparison) {
    let _ = writeln!(out, "Sentence count by method");
    let max = comparison
        .report
        .rows
        .iter()
        .map(|row| row.sentence_count)
        .max()
        .unwrap_or(0);
    for row in &comparison.report.rows {
        let _ = writeln!(
            out,
            "{:<18} {} {}",
            row.method,
            bar(row.sentence_count, max),
            row.sentence_count
        );
    }
    out.push('\n');
}

fn render_sentence_stats(out: &mut String, comparison: &DocumentComparison) {
    if comparison.report.sentence_stats.is_empty() {
        return;
    }
    let _ = writeln!(out, "First tokenized sentences");
    let _ = writeln!(out, "{:>3}  {:>6} {:>6}  Preview", "#", "Length", "Words");
    for stat in &comparison.report.sentence_stats {
        let _ = writeln!(
            out,
            "{:>3}  {:>6} {:>6}  {}",
            stat.index,
            stat.length,
            stat.word_count,
            single_line(&stat.preview)
        );
    }
    out.push('\n');
}

fn render_sample(out: &mut String, comparison: &DocumentComparison) {
    if comparison.sample.is_empty() {
        let _ = writeln!(out, "Sample window: not enough naive fragments\n");
        return;
    }
    let _ = writeln!(out, "Naive fragments in sample window");
    for fragment in &comparison.sample {
        let _ = writeln!(out, "[{}] {}...", fragment.index, single_line(&fragment.text));
    }
    let _ = writeln!(out, "\nSemantic chunks of the sample");
    for chunk in &comparison.sample_chunks {
        let _ = writeln!(out, "- {}", single_line(chunk));
    }
    out.push('\n');
}

fn render_histogram(out: &mut String, bins: &[HistogramBin]) {
    if bins.is_empty() {
        return;
    }
    let _ = writeln!(out, "Words per sentence");
    let max = bins.iter().map(|b| b.count).max().unwrap_or(0);
    for bin in bins.iter().filter(|b| b.count > 0) {
        let _ = writeln!(
            out,
            "{:>6.1} - {:>6.1} {} {}",
            bin.lower,
            bin.upper,
            bar(bin.count, max),
            bin.count
        );
    }
}

/// Bar scaled so that `max` spans the full width; non-zero values get at least one mark
fn bar(value: usize, max: usize) -> String {
    if value == 0 || max == 0 {
        return String::new();
    }
    let width = (value * BAR_WIDTH).div_ceil(max).max(1);
    std::iter::repeat(BAR_CHAR).take(width).collect()
}

fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
