//! Excel workbook output

use rust_xlsxwriter::{Format, Workbook, XlsxError};

use super::{ExportFormat, Exporter, table_headers, task_row};
use crate::error::{Result, ToolshedError};
use crate::plan::ProjectPlan;

pub const SHEET_NAME: &str = "Project Plan";

/// Column widths for phase, task name, description and the two dates
const COLUMN_WIDTHS: [f64; 5] = [12.0, 28.0, 60.0, 14.0, 16.0];

/// Single-sheet workbook with a bold header row
#[derive(Debug, Clone)]
pub struct XlsxExporter {
    include_dates: bool,
}

impl XlsxExporter {
    pub fn new(include_dates: bool) -> Self {
        Self { include_dates }
    }

    fn build(&self, plan: &ProjectPlan) -> std::result::Result<Vec<u8>, XlsxError> {
        let mut workbook = Workbook::new();
        let header_format = Format::new().set_bold();

        let worksheet = workbook.add_worksheet();
        worksheet.set_name(SHEET_NAME)?;

        let headers = table_headers(self.include_dates);
        for (col, header) in headers.iter().enumerate() {
            worksheet.write_string_with_format(0, col as u16, *header, &header_format)?;
            worksheet.set_column_width(col as u16, COLUMN_WIDTHS[col])?;
        }

        for (i, task) in plan.tasks.iter().enumerate() {
            let row = (i + 1) as u32;
            for (col, value) in task_row(task, self.include_dates).into_iter().enumerate() {
                worksheet.write_string(row, col as u16, value)?;
            }
        }

        workbook.save_to_buffer()
    }
}

impl Exporter for XlsxExporter {
    fn format(&self) -> ExportFormat {
        ExportFormat::Xlsx
    }

    fn export(&self, plan: &ProjectPlan) -> Result<Vec<u8>> {
        self.build(plan)
            .map_err(|e| ToolshedError::Export(format!("Excel export failed: {}", e)))
    }
}
