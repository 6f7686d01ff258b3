//! Result formatting for text, JSON, YAML and Markdown output.

use colored::Colorize;
use serde::Serialize;

use crate::{
    analysis::{SourceAnalysis, TemplateAnalysis},
    batch::BatchReport,
    complexity::{
        CategoryScores, ComplexityResult, ComplexityTier, extract_features, normalize
    },
    template::{ConstructKind, MAX_DYNAMIC_COMPLEXITY}
};

/// Output format for results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Yaml,
    Markdown
}

/// Output options
#[derive(Debug, Clone)]
pub struct OutputOptions {
    pub format:  OutputFormat,
    pub colored: bool,
    pub verbose: bool
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            format:  OutputFormat::Text,
            colored: true,
            verbose: false
        }
    }
}

/// Single analysis together with the text it was computed from
#[derive(Debug, Serialize)]
pub struct AnalysisOutput<'a> {
    pub source:   &'a str,
    pub analysis: &'a SourceAnalysis
}

/// Format the analysis of one source text
pub fn format_analysis(source: &str, analysis: &SourceAnalysis, opts: &OutputOptions) -> String {
    let wrapped = AnalysisOutput {
        source,
        analysis
    };
    match opts.format {
        OutputFormat::Json => serde_json::to_string_pretty(&wrapped).unwrap_or_default(),
        OutputFormat::Yaml => serde_yaml::to_string(&wrapped).unwrap_or_default(),
        OutputFormat::Markdown => format_analysis_markdown(source, analysis),
        OutputFormat::Text => format_analysis_text(source, analysis, opts)
    }
}

/// Format a directory batch report
pub fn format_batch_report(report: &BatchReport, title: &str, opts: &OutputOptions) -> String {
    match opts.format {
        OutputFormat::Json => serde_json::to_string_pretty(report).unwrap_or_default(),
        OutputFormat::Yaml => serde_yaml::to_string(report).unwrap_or_default(),
        OutputFormat::Markdown => format_batch_markdown(report, title),
        OutputFormat::Text => format_batch_text(report, title, opts)
    }
}

/// Tier label padded to `width` before colouring, so columns line up.
fn tier_label(tier: ComplexityTier, width: usize, colored: bool) -> String {
    let label = format!("{:<width$}", tier.label());
    if !colored {
        return label;
    }
    match tier {
        ComplexityTier::VerySimple | ComplexityTier::Simple => label.green().to_string(),
        ComplexityTier::Moderate => label.yellow().to_string(),
        ComplexityTier::Complex => label.red().to_string(),
        ComplexityTier::VeryComplex | ComplexityTier::ExtremelyComplex => {
            label.red().bold().to_string()
        }
    }
}

fn heading(text: &str, colored: bool) -> String {
    if colored {
        text.bold().to_string()
    } else {
        text.to_string()
    }
}

fn push_categories(out: &mut String, categories: &CategoryScores) {
    for (category, score) in categories.iter() {
        out.push_str(&format!("  {:<28} {:.1} / {:.1}\n", category.key(), score, category.cap()));
    }
}

fn format_analysis_text(source: &str, analysis: &SourceAnalysis, opts: &OutputOptions) -> String {
    let mut output = String::new();
    output.push_str(&heading("=== SQL Migration Complexity ===", opts.colored));
    output.push_str("\n\n");
    output.push_str(&format!(
        "Score: {:.1}/10 ({})\n",
        analysis.score(),
        tier_label(analysis.tier(), 0, opts.colored)
    ));
    match analysis {
        SourceAnalysis::Query(result) => format_query_details(&mut output, source, result, opts),
        SourceAnalysis::Template(template) => {
            format_template_details(&mut output, template, opts)
        }
    }
    output
}

fn format_query_details(
    output: &mut String,
    source: &str,
    result: &ComplexityResult,
    opts: &OutputOptions
) {
    output.push_str("Type: SQL query\n\nCategories:\n");
    push_categories(output, &result.categories);
    if !opts.verbose {
        return;
    }
    let features = extract_features(&normalize(source));
    output.push_str("\nSignals:\n");
    output.push_str(&format!("  joins (estimated): {}\n", features.join_estimate));
    output.push_str(&format!("  subquery depth: {}\n", features.subquery_depth));
    output.push_str(&format!("  CTEs: {}\n", features.cte_count));
    output.push_str(&format!("  set operators: {}\n", features.set_operator_count));
    output.push_str(&format!("  analytic functions: {}\n", features.analytic_count));
    output.push_str(&format!(
        "  possible user-defined calls: {}\n",
        features.potential_udf_count.max(0)
    ));
    if !features.risky_syntax.is_empty() {
        output.push_str(&format!("  risky syntax: {}\n", features.risky_syntax.join(", ")));
    }
    if !features.risky_functions.is_empty() {
        output.push_str(&format!(
            "  risky functions: {}\n",
            features.risky_functions.join(", ")
        ));
    }
}

fn format_template_details(output: &mut String, template: &TemplateAnalysis, opts: &OutputOptions) {
    output.push_str("Type: MyBatis dynamic query\n");
    output.push_str(&format!("Base SQL score: {:.1}/10\n", template.base_score));
    output.push_str(&format!("Worst-case SQL score: {:.1}/10\n", template.worst_case_score));
    output.push_str(&format!(
        "Dynamic complexity: {:.1}/{:.1}\n\nCategories:\n",
        template.dynamic_complexity, MAX_DYNAMIC_COMPLEXITY
    ));
    push_categories(output, &template.categories);
    if !opts.verbose {
        return;
    }
    let constructs: Vec<String> = ConstructKind::ALL
        .iter()
        .filter(|k| template.tally.count(**k) > 0)
        .map(|k| format!("{}={}", k, template.tally.count(*k)))
        .collect();
    output.push_str(&format!(
        "\nConstructs: {}\nMax nesting depth: {}\n",
        if constructs.is_empty() { "none".to_string() } else { constructs.join(", ") },
        template.tally.max_depth
    ));
    output.push_str(&format!("\nBase SQL:\n{}\n", template.base_text));
    output.push_str(&format!("\nWorst-case SQL:\n{}\n", template.worst_case_text));
}

fn format_analysis_markdown(source: &str, analysis: &SourceAnalysis) -> String {
    let mut report = Vec::new();
    let fence = match analysis {
        SourceAnalysis::Query(_) => {
            report.push("# SQL Query Complexity Report".to_string());
            report.push(format!(
                "\n## Complexity score: {:.1}/10 - {}",
                analysis.score(),
                analysis.tier()
            ));
            "sql"
        }
        SourceAnalysis::Template(template) => {
            report.push("# MyBatis Dynamic Query Complexity Report".to_string());
            report.push(format!(
                "\n## Complexity score: {:.1}/10 - {}",
                template.final_score, template.tier
            ));
            report.push(format!("- Base SQL complexity: {:.1}/10", template.base_score));
            report.push(format!(
                "- Worst-case SQL complexity: {:.1}/10",
                template.worst_case_score
            ));
            report.push(format!(
                "- Dynamic complexity: {:.1}/{:.1}",
                template.dynamic_complexity, MAX_DYNAMIC_COMPLEXITY
            ));
            "xml"
        }
    };
    report.push("\n## Category breakdown".to_string());
    for (category, score) in analysis.categories().iter() {
        report.push(format!("- {}: {:.1}", category, score));
    }
    report.push("\n## Analyzed query".to_string());
    report.push(format!("```{}", fence));
    report.push(source.trim_end().to_string());
    report.push("```".to_string());
    report.join("\n")
}

fn format_batch_text(report: &BatchReport, title: &str, opts: &OutputOptions) -> String {
    let mut output = String::new();
    output.push_str(&heading(&format!("=== {} ===", title), opts.colored));
    output.push_str("\n\n");
    output.push_str(&format!(
        "Files: {} ({} MyBatis, {} SQL, {} errors)\n\n",
        report.files.len(),
        report.template_count,
        report.query_count,
        report.error_count
    ));
    for tier in ComplexityTier::ALL {
        if let Some(count) = report.tier_counts.get(&tier) {
            output.push_str(&format!(
                "  {} {:>4} ({:.1}%)\n",
                tier_label(tier, 18, opts.colored),
                count,
                report.tier_percentage(tier)
            ));
        }
    }
    output.push('\n');
    for file in &report.files {
        let Some(analysis) = file.analysis() else {
            continue;
        };
        let kind = if analysis.is_template() { "mybatis" } else { "sql" };
        output.push_str(&format!(
            "{:>5.1}  {} {:<8} {}\n",
            analysis.score(),
            tier_label(analysis.tier(), 18, opts.colored),
            kind,
            file.path.display()
        ));
        if opts.verbose {
            push_categories(&mut output, analysis.categories());
        }
    }
    let mut failed = report.failed().peekable();
    if failed.peek().is_some() {
        output.push_str(&format!("\n{}\n", heading("Errors:", opts.colored)));
        for file in failed {
            let message = file.error().unwrap_or_default();
            if opts.colored {
                output.push_str(&format!("  {}: {}\n", file.file_name, message.red()));
            } else {
                output.push_str(&format!("  {}: {}\n", file.file_name, message));
            }
        }
    }
    output
}

fn format_batch_markdown(report: &BatchReport, title: &str) -> String {
    let mut lines = Vec::new();
    lines.push(format!("# {}", title));
    lines.push(format!("\nAnalyzed files: {}", report.files.len()));
    lines.push("\n## Summary".to_string());
    lines.push(format!("- MyBatis dynamic queries: {}", report.template_count));
    lines.push(format!("- Plain SQL queries: {}", report.query_count));
    lines.push(format!("- Analysis errors: {}", report.error_count));
    lines.push("\n### Complexity distribution".to_string());
    for (tier, count) in &report.tier_counts {
        lines.push(format!(
            "- {}: {} ({:.1}%)",
            tier,
            count,
            report.tier_percentage(*tier)
        ));
    }
    lines.push("\n## Per-file analysis".to_string());
    for file in &report.files {
        let Some(analysis) = file.analysis() else {
            continue;
        };
        lines.push(format!(
            "\n### {} - {:.1}/10 ({})",
            file.file_name,
            analysis.score(),
            analysis.tier()
        ));
        match analysis {
            SourceAnalysis::Template(template) => {
                lines.push("- Type: MyBatis dynamic query".to_string());
                lines.push(format!("- Base SQL complexity: {:.1}/10", template.base_score));
                lines.push(format!(
                    "- Worst-case SQL complexity: {:.1}/10",
                    template.worst_case_score
                ));
                lines.push(format!(
                    "- Dynamic complexity: {:.1}/{:.1}",
                    template.dynamic_complexity, MAX_DYNAMIC_COMPLEXITY
                ));
            }
            SourceAnalysis::Query(_) => lines.push("- Type: plain SQL query".to_string())
        }
        lines.push("\nCategory breakdown:".to_string());
        for (category, score) in analysis.categories().iter() {
            lines.push(format!("- {}: {:.1}", category, score));
        }
    }
    if report.error_count > 0 {
        lines.push("\n## Files with errors".to_string());
        for file in report.failed() {
            lines.push(format!(
                "- {}: {}",
                file.file_name,
                file.error().unwrap_or_default()
            ));
        }
    }
    lines.join("\n")
}
