//! Comma- and tab-separated plan output

use csv::{QuoteStyle, WriterBuilder};

use super::{ExportFormat, ExportSettings, Exporter, table_headers, task_row};
use crate::error::{Result, ToolshedError};
use crate::plan::ProjectPlan;

/// UTF-8 byte-order mark, so spreadsheet apps detect the encoding
pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Writes one header row and one row per task
#[derive(Debug, Clone)]
pub struct DelimitedExporter {
    format: ExportFormat,
    delimiter: u8,
    bom: bool,
    include_dates: bool,
}

impl DelimitedExporter {
    /// Comma-separated, with byte-order mark unless disabled
    pub fn csv(settings: &ExportSettings) -> Self {
        Self {
            format: ExportFormat::Csv,
            delimiter: b',',
            bom: settings.csv_bom,
            include_dates: settings.include_date_columns,
        }
    }

    /// Tab-separated, no byte-order mark
    pub fn tsv(settings: &ExportSettings) -> Self {
        Self {
            format: ExportFormat::Txt,
            delimiter: b'\t',
            bom: false,
            include_dates: settings.include_date_columns,
        }
    }

    pub fn delimiter(&self) -> u8 {
        self.delimiter
    }
}

impl Exporter for DelimitedExporter {
    fn format(&self) -> ExportFormat {
        self.format
    }

    fn export(&self, plan: &ProjectPlan) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        if self.bom {
            buf.extend_from_slice(UTF8_BOM);
        }

        let mut writer = WriterBuilder::new()
            .delimiter(self.delimiter)
            .quote_style(QuoteStyle::Necessary)
            .from_writer(buf);

        writer.write_record(table_headers(self.include_dates))?;
        for task in &plan.tasks {
            writer.write_record(task_row(task, self.include_dates))?;
        }

        writer
            .into_inner()
            .map_err(|e| ToolshedError::Export(format!("Failed to flush {} output: {}", self.format, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Phase, PlanTask, ProjectMeta};
    use csv::ReaderBuilder;

    fn plan_with(tasks: Vec<PlanTask>) -> ProjectPlan {
        ProjectPlan {
            meta: ProjectMeta::new("Line 4", "Sam"),
            tasks,
        }
    }

    fn read_rows(bytes: &[u8], delimiter: u8) -> Vec<Vec<String>> {
        let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
        let mut reader = ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(false)
            .from_reader(body);
        reader
            .records()
            .map(|r| r.unwrap().iter().map(String::from).collect())
            .collect()
    }

    #[test]
    fn test_csv_has_bom_and_header() {
        let exporter = DelimitedExporter::csv(&ExportSettings::default());
        let bytes = exporter.export(&plan_with(vec![])).unwrap();
        assert!(bytes.starts_with(UTF8_BOM));

        let rows = read_rows(&bytes, b',');
        assert_eq!(rows.len(), 1);
        assert_eq!(
            rows[0],
            vec!["PDCA Phase", "Task Name", "Description", "Start Date", "Completion Date"]
        );
    }

    #[test]
    fn test_csv_without_bom() {
        let settings = ExportSettings {
            csv_bom: false,
            ..ExportSettings::default()
        };
        let bytes = DelimitedExporter::csv(&settings).export(&plan_with(vec![])).unwrap();
        assert!(bytes.starts_with(b"PDCA Phase,"));
    }

    #[test]
    fn test_csv_rows_match_tasks() {
        let tasks = vec![
            PlanTask::new(Phase::Plan, "5 Whys", "Root cause tool"),
            PlanTask::new(Phase::Do, "Gemba", "Go and see"),
            PlanTask::new(Phase::Act, "Unknown", ""),
        ];
        let bytes = DelimitedExporter::csv(&ExportSettings::default())
            .export(&plan_with(tasks.clone()))
            .unwrap();

        let rows = read_rows(&bytes, b',');
        assert_eq!(rows.len() - 1, tasks.len());
        for (row, task) in rows[1..].iter().zip(&tasks) {
            assert_eq!(row[0], task.phase.as_str());
            assert_eq!(row[1], task.task_name);
            assert_eq!(row[2], task.description);
            assert_eq!(row[3], "");
            assert_eq!(row[4], "");
        }
    }

    #[test]
    fn test_csv_quotes_delimiter() {
        let tasks = vec![PlanTask::new(Phase::Plan, "SIPOC", "Suppliers, inputs, \"process\"")];
        let bytes = DelimitedExporter::csv(&ExportSettings::default())
            .export(&plan_with(tasks))
            .unwrap();
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("\"Suppliers, inputs, \"\"process\"\"\""));

        let rows = read_rows(&bytes, b',');
        assert_eq!(rows[1][2], "Suppliers, inputs, \"process\"");
    }

    #[test]
    fn test_tsv_output() {
        let settings = ExportSettings {
            include_date_columns: false,
            ..ExportSettings::default()
        };
        let tasks = vec![PlanTask::new(Phase::Check, "Pareto", "Rank causes, biggest first")];
        let exporter = DelimitedExporter::tsv(&settings);
        assert_eq!(exporter.delimiter(), b'\t');
        assert_eq!(exporter.file_name(), "Project_Plan.txt");

        let bytes = exporter.export(&plan_with(tasks)).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "PDCA Phase\tTask Name\tDescription");
        assert_eq!(lines[1], "Check\tPareto\tRank causes, biggest first");
    }

    #[test]
    fn test_tsv_quotes_tabs() {
        let tasks = vec![PlanTask::new(Phase::Do, "Odd\tName", "x")];
        let bytes = DelimitedExporter::tsv(&ExportSettings::default())
            .export(&plan_with(tasks))
            .unwrap();
        let rows = read_rows(&bytes, b'\t');
        assert_eq!(rows[1][1], "Odd\tName");
    }
}
