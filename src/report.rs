use crate::error::GapError;
use crate::input::host_of;
use crate::types::{SummaryRow, UrlReport};
use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};
use std::path::Path;
use tracing::{info, warn};

pub const SUMMARY_SHEET: &str = "Summary";

const DETAIL_HEADERS: [&str; 5] = ["URL", "Keyword", "Planteada", "Clicks", "Impressions"];
const SUMMARY_HEADERS: [&str; 7] = [
    "URL",
    "Keywords no presentes",
    "Impressions no presentes",
    "Clicks no presentes",
    "Keywords presentes",
    "Impressions presentes",
    "Clicks presentes",
];

/// Characters Excel does not allow in sheet names
const FORBIDDEN_SHEET_CHARS: [char; 7] = ['[', ']', ':', '*', '?', '/', '\\'];
const HOST_CHARS_IN_SHEET_NAME: usize = 20;

/// Per-URL sheet name: `URL_{position}_{host}`, host cut to 20 characters
pub fn sheet_name(position: usize, url: &str) -> String {
    let host: String = host_of(url)
        .chars()
        .take(HOST_CHARS_IN_SHEET_NAME)
        .map(|c| if FORBIDDEN_SHEET_CHARS.contains(&c) { '_' } else { c })
        .collect();

    format!("URL_{}_{}", position, host)
}

/// Collects per-URL reports and writes the workbook
#[derive(Debug, Default)]
pub struct ReportBuilder {
    reports: Vec<UrlReport>,
}

impl ReportBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reports without results are skipped
    pub fn add(&mut self, report: UrlReport) {
        if report.is_empty() {
            warn!(url = %report.url, "no results, leaving URL out of the report");
            return;
        }
        self.reports.push(report);
    }

    pub fn reports(&self) -> &[UrlReport] {
        &self.reports
    }

    pub fn summaries(&self) -> Vec<SummaryRow> {
        self.reports.iter().map(SummaryRow::from).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }

    /// One sheet per URL plus the `Summary` sheet
    pub fn write_xlsx(&self, path: &Path) -> Result<(), GapError> {
        if self.reports.is_empty() {
            warn!("no URL produced results, writing an empty summary");
        }

        self.build_workbook()
            .and_then(|mut workbook| workbook.save(path))
            .map_err(|e| GapError::Report(format!("{}: {}", path.display(), e)))?;

        info!(path = %path.display(), urls = self.reports.len(), "report written");
        Ok(())
    }

    fn build_workbook(&self) -> Result<Workbook, XlsxError> {
        let mut workbook = Workbook::new();
        let header = Format::new().set_bold();

        for report in &self.reports {
            let sheet = workbook.add_worksheet();
            sheet.set_name(sheet_name(report.position, &report.url))?;
            write_detail_sheet(sheet, report, &header)?;
        }

        let sheet = workbook.add_worksheet();
        sheet.set_name(SUMMARY_SHEET)?;
        write_summary_sheet(sheet, &self.summaries(), &header)?;

        Ok(workbook)
    }

    /// Console table of the summary rows
    pub fn print_summary(&self) {
        let summaries = self.summaries();

        println!("\n╔══════════════════════════════════════════════╗");
        println!("║           📊 Keyword gap summary            ║");
        println!("╠══════════════════════════════════════════════╣");
        if summaries.is_empty() {
            println!("║ No URL produced results                      ║");
        }
        for row in &summaries {
            println!("║ {}", row.url);
            println!("║   present: {:>6}  clicks: {:>8}  impr: {:>10}", row.count_present, row.clicks_present, row.impressions_present);
            println!("║   absent:  {:>6}  clicks: {:>8}  impr: {:>10}", row.count_absent, row.clicks_absent, row.impressions_absent);
        }
        println!("╚══════════════════════════════════════════════╝");
    }
}

fn write_headers(sheet: &mut Worksheet, headers: &[&str], format: &Format) -> Result<(), XlsxError> {
    for (col, title) in headers.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *title, format)?;
    }
    Ok(())
}

fn write_detail_sheet(sheet: &mut Worksheet, report: &UrlReport, header: &Format) -> Result<(), XlsxError> {
    write_headers(sheet, &DETAIL_HEADERS, header)?;

    for (i, result) in report.results.iter().enumerate() {
        let row = i as u32 + 1;
        sheet.write_string(row, 0, &report.url)?;
        sheet.write_string(row, 1, &result.keyword)?;
        sheet.write_boolean(row, 2, result.present)?;
        sheet.write_number(row, 3, result.clicks as f64)?;
        sheet.write_number(row, 4, result.impressions as f64)?;
    }

    sheet.set_column_width(0, 60)?;
    sheet.set_column_width(1, 40)?;
    Ok(())
}

fn write_summary_sheet(sheet: &mut Worksheet, summaries: &[SummaryRow], header: &Format) -> Result<(), XlsxError> {
    write_headers(sheet, &SUMMARY_HEADERS, header)?;

    for (i, summary) in summaries.iter().enumerate() {
        let row = i as u32 + 1;
        sheet.write_string(row, 0, &summary.url)?;
        sheet.write_number(row, 1, summary.count_absent as f64)?;
        sheet.write_number(row, 2, summary.impressions_absent as f64)?;
        sheet.write_number(row, 3, summary.clicks_absent as f64)?;
        sheet.write_number(row, 4, summary.count_present as f64)?;
        sheet.write_number(row, 5, summary.impressions_present as f64)?;
        sheet.write_number(row, 6, summary.clicks_present as f64)?;
    }

    sheet.set_column_width(0, 60)?;
    Ok(())
}
