use std::{
    collections::{BTreeMap, HashMap},
    fs,
    path::{Path, PathBuf},
};

use crate::{
    error::{Result, StrengthError},
    models::{cmp_desc_nulls_last, read_ranking_csv, sort_ranking, FrequencyRow, IndustrySummaryRow, RankingRow},
    utils::Logger,
};

/// Rows considered for the breadth table
pub const TOP_N: usize = 20;

const REQUIRED_COLUMNS: [&str; 3] = ["Industry", "SMARatio", "EMARatio"];
const RULE_WIDTH: usize = 80;

/// Industry report file name for a constituent list and period
pub fn industry_report_file_name(list_stem: &str, period: usize) -> String {
    format!("Industrystrength_{}_{}period.txt", list_stem, period)
}

/// Outcome of the aggregation stage, which never propagates errors
#[derive(Debug, Clone, PartialEq)]
pub enum ReportStatus {
    Written { path: PathBuf, industries: usize },
    Failed { message: String },
}

impl ReportStatus {
    pub fn is_written(&self) -> bool {
        matches!(self, ReportStatus::Written { .. })
    }
}

/// Both tables of the industry report
#[derive(Debug, Clone, PartialEq)]
pub struct IndustryReport {
    pub summary: Vec<IndustrySummaryRow>,
    pub frequency: Vec<FrequencyRow>,
}

/// Mean of the present values, `None` when there are none
fn mean_present(values: impl Iterator<Item = Option<f64>>) -> Option<f64> {
    let (sum, count) = values
        .flatten()
        .filter(|v| v.is_finite())
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / count as f64)
}

/// Per-industry mean ratios, strongest mean SMA ratio first
pub fn summarize_industries(rows: &[RankingRow]) -> Vec<IndustrySummaryRow> {
    let mut groups: BTreeMap<&str, Vec<&RankingRow>> = BTreeMap::new();
    for row in rows {
        groups.entry(row.industry.as_str()).or_default().push(row);
    }

    let mut summary: Vec<IndustrySummaryRow> = groups
        .into_iter()
        .map(|(industry, members)| IndustrySummaryRow {
            industry: industry.to_string(),
            mean_sma_ratio: mean_present(members.iter().map(|r| r.sma_ratio)),
            mean_ema_ratio: mean_present(members.iter().map(|r| r.ema_ratio)),
        })
        .collect();

    summary.sort_by(|a, b| cmp_desc_nulls_last(a.mean_sma_ratio, b.mean_sma_ratio));
    summary
}

/// Industry counts among the `top_n` highest SMA ratio rows.
/// Ties keep the order in which industries first appear.
pub fn top_frequency(rows: &[RankingRow], top_n: usize) -> Vec<FrequencyRow> {
    let mut sorted = rows.to_vec();
    sort_ranking(&mut sorted);

    let mut order: Vec<String> = Vec::new();
    let mut counts: HashMap<String, usize> = HashMap::new();
    for row in sorted.iter().take(top_n) {
        let count = counts.entry(row.industry.clone()).or_insert(0);
        if *count == 0 {
            order.push(row.industry.clone());
        }
        *count += 1;
    }

    let mut frequency: Vec<FrequencyRow> = order
        .into_iter()
        .map(|industry| FrequencyRow {
            frequency: counts[&industry],
            industry,
        })
        .collect();
    frequency.sort_by(|a, b| b.frequency.cmp(&a.frequency));
    frequency
}

fn format_ratio(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:<15.4}", v),
        None => format!("{:<15}", "nan"),
    }
}

/// Fixed-width text rendering of both tables
pub fn render_report(report: &IndustryReport) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let mut lines: Vec<String> = vec![
        "Industry Strength Report (Based on Average SMARatio and EMARatio)".to_string(),
        rule.clone(),
        format!("{:<30} {:<15} {:<15}", "Industry", "Avg SMARatio", "Avg EMARatio"),
        rule.clone(),
    ];
    lines.extend(report.summary.iter().map(|row| {
        format!(
            "{:<30} {} {}",
            row.industry,
            format_ratio(row.mean_sma_ratio),
            format_ratio(row.mean_ema_ratio)
        )
    }));

    lines.push(String::new());
    lines.push(String::new());

    lines.push(format!("Industry Strength Based on Frequency in Top {} (SMARatio)", TOP_N));
    lines.push(rule.clone());
    lines.push(format!("{:<30} {:<10}", "Industry", "Frequency"));
    lines.push(rule);
    lines.extend(
        report
            .frequency
            .iter()
            .map(|row| format!("{:<30} {:<10}", row.industry, row.frequency)),
    );

    format!("{}\n", lines.join("\n"))
}

fn check_columns(ranking_path: &Path) -> Result<()> {
    let mut reader = csv::Reader::from_path(ranking_path)?;
    let headers = reader.headers()?;
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h.trim() == column) {
            return Err(StrengthError::Report(format!(
                "'{}' has no '{}' column",
                ranking_path.display(),
                column
            )));
        }
    }
    Ok(())
}

/// Read a ranking report and compute both industry tables
pub fn load_industry_report(ranking_path: &Path) -> Result<IndustryReport> {
    check_columns(ranking_path)?;
    let rows = read_ranking_csv(ranking_path)?;
    Ok(IndustryReport {
        summary: summarize_industries(&rows),
        frequency: top_frequency(&rows, TOP_N),
    })
}

/// Fallible form of [`build_industry_report`]
pub fn try_build_industry_report(ranking_path: &Path, output_path: &Path) -> Result<IndustryReport> {
    let report = load_industry_report(ranking_path)?;
    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(output_path, render_report(&report))?;
    Ok(report)
}

/// Write the industry report for a ranking file. Failures are logged and
/// returned as [`ReportStatus::Failed`].
pub fn build_industry_report(ranking_path: &Path, output_path: &Path) -> ReportStatus {
    let logger = Logger::new("AGGREGATOR");
    match try_build_industry_report(ranking_path, output_path) {
        Ok(report) => {
            logger.info(&format!(
                "Industry strength file '{}' created successfully ({} industries)",
                output_path.display(),
                report.summary.len()
            ));
            ReportStatus::Written {
                path: output_path.to_path_buf(),
                industries: report.summary.len(),
            }
        }
        Err(e) => {
            let message = format!("An error occurred: {}", e);
            logger.error(&message);
            ReportStatus::Failed { message }
        }
    }
}
