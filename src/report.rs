/*!
 * Reporting functionality for catsel
 *
 * Provides functionality for generating formatted reports of export results
 * using the tabled library for clean, consistent table rendering.
 */

use std::time::Duration;

use tabled::{
    settings::{object::Columns, Alignment, Modify, Padding, Style},
    Table, Tabled,
};

use crate::types::BodyKind;

/// Information about a file in the report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReportInfo {
    /// Number of lines in the file
    pub lines: usize,
    /// Number of characters in the file
    pub chars: usize,
    /// What was written for the body
    pub kind: BodyKind,
}

impl FileReportInfo {
    /// Statistics for content copied verbatim
    pub fn for_text(content: &str) -> Self {
        Self {
            lines: content.lines().count(),
            chars: content.chars().count(),
            kind: BodyKind::Text,
        }
    }

    /// Statistics for a placeholder body
    pub fn placeholder(kind: BodyKind) -> Self {
        Self {
            lines: 0,
            chars: 0,
            kind,
        }
    }
}

/// Statistics for one export
#[derive(Debug, Clone)]
pub struct ExportReport {
    /// Output file path
    pub output_file: String,
    /// Time taken to resolve and write
    pub duration: Duration,
    /// Number of files written
    pub files_processed: usize,
    /// Total number of lines
    pub total_lines: usize,
    /// Total number of characters
    pub total_chars: usize,
    /// Details for each file, in bundle order
    pub file_details: Vec<(String, FileReportInfo)>,
}

impl ExportReport {
    pub fn new(
        output_file: String,
        duration: Duration,
        file_details: Vec<(String, FileReportInfo)>,
    ) -> Self {
        Self {
            output_file,
            duration,
            files_processed: file_details.len(),
            total_lines: file_details.iter().map(|(_, i)| i.lines).sum(),
            total_chars: file_details.iter().map(|(_, i)| i.chars).sum(),
            file_details,
        }
    }

    /// Files that got a placeholder instead of content
    pub fn placeholders(&self) -> usize {
        self.file_details
            .iter()
            .filter(|(_, i)| i.kind != BodyKind::Text)
            .count()
    }
}

/// Format of the report output
pub enum ReportFormat {
    /// Console table output
    ConsoleTable,
}

/// Report generator for export results
pub struct Reporter {
    format: ReportFormat,
}

impl Reporter {
    /// Create a new reporter
    pub fn new(format: ReportFormat) -> Self {
        Self { format }
    }

    /// Format a number with human-readable units
    fn format_number(&self, num: usize) -> String {
        if num >= 1_000_000 {
            format!("{:.1}M", num as f64 / 1_000_000.0)
        } else if num >= 1_000 {
            format!("{:.1}K", num as f64 / 1_000.0)
        } else {
            num.to_string()
        }
    }

    /// Generate a report string
    pub fn generate_report(&self, report: &ExportReport) -> String {
        match self.format {
            ReportFormat::ConsoleTable => self.generate_console_report(report),
        }
    }

    // Keep the tail of long paths
    fn format_path(&self, path: &str, max_len: usize) -> String {
        if path.chars().count() <= max_len {
            return path.to_string();
        }

        let mut segments = Vec::new();
        let mut current_len = 3; // "..."
        for part in path.split('/').rev() {
            let part_len = part.chars().count() + 1;
            if current_len + part_len > max_len {
                break;
            }
            segments.push(part);
            current_len += part_len;
        }

        if segments.is_empty() {
            let tail: String = path
                .chars()
                .rev()
                .take(max_len.saturating_sub(3))
                .collect::<Vec<_>>()
                .into_iter()
                .rev()
                .collect();
            return format!("...{}", tail);
        }

        let mut result = String::from("...");
        for part in segments.iter().rev() {
            result.push('/');
            result.push_str(part);
        }
        result
    }

    fn create_summary_table(&self, report: &ExportReport) -> String {
        #[derive(Tabled)]
        struct SummaryRow {
            #[tabled(rename = "Metric")]
            key: String,

            #[tabled(rename = "Value")]
            value: String,
        }

        let rows = vec![
            SummaryRow {
                key: "📂 Bundle".to_string(),
                value: report.output_file.clone(),
            },
            SummaryRow {
                key: "⏱️ Export Time".to_string(),
                value: format!("{:.4?}", report.duration),
            },
            SummaryRow {
                key: "📄 Files".to_string(),
                value: self.format_number(report.files_processed),
            },
            SummaryRow {
                key: "🚫 Placeholders".to_string(),
                value: self.format_number(report.placeholders()),
            },
            SummaryRow {
                key: "📝 Total Lines".to_string(),
                value: self.format_number(report.total_lines),
            },
            SummaryRow {
                key: "📦 LLM Tokens".to_string(),
                value: format!(
                    "{} tokens (estimated)",
                    self.format_number(report.total_chars / 4)
                ),
            },
        ];

        let mut table = Table::new(rows);
        table
            .with(Style::rounded())
            .with(Padding::new(1, 1, 0, 0))
            .with(Modify::new(Columns::new(..)).with(Alignment::left()));

        table.to_string()
    }

    fn create_files_table(&self, report: &ExportReport) -> String {
        #[derive(Tabled)]
        struct FileRow {
            #[tabled(rename = "File Path")]
            path: String,

            #[tabled(rename = "Lines")]
            lines: String,

            #[tabled(rename = "Body")]
            kind: String,
        }

        // Largest first
        let mut files: Vec<_> = report.file_details.iter().collect();
        files.sort_by(|(_, a), (_, b)| b.chars.cmp(&a.chars));

        let files_to_show = if files.len() > 15 {
            &files[0..10]
        } else {
            &files[..]
        };

        let rows: Vec<FileRow> = files_to_show
            .iter()
            .map(|(path, info)| FileRow {
                path: self.format_path(path, 60),
                lines: self.format_number(info.lines),
                kind: info.kind.to_string(),
            })
            .collect();

        let mut table = Table::new(rows);
        table
            .with(Style::rounded())
            .with(Padding::new(1, 1, 0, 0))
            .with(Modify::new(Columns::new(..)).with(Alignment::left()));

        table.to_string()
    }

    fn generate_console_report(&self, report: &ExportReport) -> String {
        let summary_table = self.create_summary_table(report);
        let files_table = self.create_files_table(report);

        let summary_title = "✅  EXPORT COMPLETE";
        let files_title = if report.file_details.len() > 15 {
            "📋  TOP 10 LARGEST FILES BY CHARACTER COUNT  📋"
        } else {
            "📋  EXPORTED FILES"
        };

        format!(
            "{}\n{}\n\n{}\n{}",
            files_title, files_table, summary_title, summary_table
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ExportReport {
        ExportReport::new(
            "/w/cs_deadbeef.txt".to_string(),
            Duration::from_millis(12),
            vec![
                ("a.txt".to_string(), FileReportInfo::for_text("hello\nworld\n")),
                (
                    "img.png".to_string(),
                    FileReportInfo::placeholder(BodyKind::Binary),
                ),
            ],
        )
    }

    #[test]
    fn test_totals() {
        let report = sample();
        assert_eq!(report.files_processed, 2);
        assert_eq!(report.total_lines, 2);
        assert_eq!(report.total_chars, 12);
        assert_eq!(report.placeholders(), 1);
    }

    #[test]
    fn test_console_report_mentions_files() {
        let text = Reporter::new(ReportFormat::ConsoleTable).generate_report(&sample());
        assert!(text.contains("EXPORTED FILES"));
        assert!(text.contains("a.txt"));
        assert!(text.contains("binary"));
        assert!(text.contains("cs_deadbeef.txt"));
    }

    #[test]
    fn test_format_path_keeps_tail() {
        let reporter = Reporter::new(ReportFormat::ConsoleTable);
        assert_eq!(reporter.format_path("a/b.txt", 60), "a/b.txt");
        let long = format!("{}/src/lib.rs", "x".repeat(80));
        assert_eq!(reporter.format_path(&long, 20), ".../src/lib.rs");
    }
}
