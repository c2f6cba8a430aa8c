//! PDF rendering of the plan document
//!
//! Uses the standard Helvetica faces with WinAnsiEncoding, so no fonts are
//! embedded. Text the encoding cannot represent is stripped or replaced.

use encoding_rs::WINDOWS_1252;
use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, ObjectId, Stream, dictionary};

use super::document::{FontStyle, Page, PdfOptions, layout_plan};
use super::{ExportFormat, Exporter};
use crate::error::{Result, ToolshedError};
use crate::plan::ProjectPlan;

/// Renders the plan layout to PDF bytes
#[derive(Debug, Clone, Default)]
pub struct PdfExporter {
    options: PdfOptions,
}

impl PdfExporter {
    pub fn new(options: PdfOptions) -> Self {
        Self { options }
    }
}

impl Exporter for PdfExporter {
    fn format(&self) -> ExportFormat {
        ExportFormat::Pdf
    }

    fn export(&self, plan: &ProjectPlan) -> Result<Vec<u8>> {
        let pages = layout_plan(plan, &self.options);
        log::debug!("Rendering {} page(s) for '{}'", pages.len(), plan.meta.display_name());
        render(&pages, self.options.replacement.as_deref())
    }
}

fn render(pages: &[Page], replacement: Option<&str>) -> Result<Vec<u8>> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let regular = add_font(&mut doc, "Helvetica");
    let bold = add_font(&mut doc, "Helvetica-Bold");
    let italic = add_font(&mut doc, "Helvetica-Oblique");
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => regular,
            "F2" => bold,
            "F3" => italic,
        },
    });

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for page in pages {
        let mut operations = Vec::with_capacity(page.lines.len() * 5);
        for line in &page.lines {
            operations.push(Operation::new("BT", vec![]));
            operations.push(Operation::new("Tf", vec![font_key(line.style).into(), line.size.into()]));
            operations.push(Operation::new("Td", vec![line.x.into(), line.y.into()]));
            operations.push(Operation::new(
                "Tj",
                vec![Object::string_literal(encode_win_ansi(&line.text, replacement))],
            ));
            operations.push(Operation::new("ET", vec![]));
        }

        let content = Content { operations }.encode().map_err(pdf_error)?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, content));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    let pages_dict = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => count,
        "Resources" => resources_id,
        "MediaBox" => vec![0.0f32.into(), 0.0f32.into(), PdfOptions::PAGE_WIDTH.into(), PdfOptions::PAGE_HEIGHT.into()],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buf = Vec::new();
    doc.save_to(&mut buf).map_err(pdf_error)?;
    Ok(buf)
}

fn add_font(doc: &mut Document, base_font: &str) -> ObjectId {
    doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => base_font,
        "Encoding" => "WinAnsiEncoding",
    })
}

fn font_key(style: FontStyle) -> &'static str {
    match style {
        FontStyle::Regular => "F1",
        FontStyle::Bold => "F2",
        FontStyle::Italic => "F3",
    }
}

fn pdf_error(e: impl std::fmt::Display) -> ToolshedError {
    ToolshedError::Export(format!("PDF rendering failed: {}", e))
}

/// Encode text as Windows-1252 for the base fonts.
///
/// Control characters are dropped. Characters outside the code page become
/// `replacement`, or are dropped when there is none (or it is unencodable too).
pub fn encode_win_ansi(text: &str, replacement: Option<&str>) -> Vec<u8> {
    let substitute: Vec<u8> = replacement
        .map(|r| {
            let (bytes, _, had_errors) = WINDOWS_1252.encode(r);
            if had_errors { Vec::new() } else { bytes.into_owned() }
        })
        .unwrap_or_default();

    let mut out = Vec::with_capacity(text.len());
    let mut buf = [0u8; 4];
    for c in text.chars() {
        if c.is_control() {
            continue;
        }
        let (bytes, _, had_errors) = WINDOWS_1252.encode(c.encode_utf8(&mut buf));
        if had_errors {
            out.extend_from_slice(&substitute);
        } else {
            out.extend_from_slice(&bytes);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Phase, PlanTask, ProjectMeta};

    fn contains(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|w| w == needle)
    }

    #[test]
    fn test_encode_ascii_passthrough() {
        assert_eq!(encode_win_ansi("Gemba - Go and see", None), b"Gemba - Go and see");
    }

    #[test]
    fn test_encode_latin1_and_cp1252() {
        assert_eq!(encode_win_ansi("café", None), b"caf\xE9");
        assert_eq!(encode_win_ansi("a\u{2013}b", None), b"a\x96b");
        assert_eq!(encode_win_ansi("\u{20AC}5", None), b"\x805");
    }

    #[test]
    fn test_encode_strips_unsupported() {
        assert_eq!(encode_win_ansi("\u{2705} Done \u{1F9F0}", None), b" Done ");
        assert_eq!(encode_win_ansi("\u{65E5}\u{672C}", None), b"");
    }

    #[test]
    fn test_encode_replacement() {
        assert_eq!(encode_win_ansi("\u{2705} ok", Some("?")), b"? ok");
        assert_eq!(encode_win_ansi("\u{2705} ok", Some("\u{2705}")), b" ok");
    }

    #[test]
    fn test_encode_drops_control_chars() {
        assert_eq!(encode_win_ansi("a\tb\nc", None), b"abc");
    }

    #[test]
    fn test_export_header() {
        let plan = ProjectPlan {
            meta: ProjectMeta::new("Scrap", "Dana"),
            tasks: vec![PlanTask::new(Phase::Plan, "5 Whys", "Root cause tool")],
        };
        let bytes = PdfExporter::default().export(&plan).unwrap();
        assert!(bytes.starts_with(b"%PDF-1.5"));
        assert!(contains(&bytes, b"(5 Whys - Root cause tool)"));
        assert!(contains(&bytes, b"Helvetica-Bold"));
        assert!(contains(&bytes, b"(Start Date: ______    Completion Date: ______)"));
    }

    #[test]
    fn test_export_empty_plan() {
        let plan = ProjectPlan {
            meta: ProjectMeta::new("", ""),
            tasks: vec![],
        };
        let bytes = PdfExporter::default().export(&plan).unwrap();
        assert!(contains(&bytes, b"(No tasks selected for this project plan.)"));
        assert!(!contains(&bytes, b"Phase)"));
    }

    #[test]
    fn test_export_unencodable_text_does_not_fail() {
        let plan = ProjectPlan {
            meta: ProjectMeta::new("\u{1F9F0} Toolshed", "\u{5F20}\u{4F1F}"),
            tasks: vec![PlanTask::new(Phase::Do, "\u{2705} Gemba", "Go and see \u{1F440}")],
        };
        let bytes = PdfExporter::default().export(&plan).unwrap();
        assert!(contains(&bytes, b"( Gemba - Go and see )"));
    }

    #[test]
    fn test_export_multiple_pages() {
        let tasks = (0..120)
            .map(|i| PlanTask::new(Phase::Check, format!("Check {}", i), "Measure"))
            .collect();
        let plan = ProjectPlan {
            meta: ProjectMeta::new("Big", "Ops"),
            tasks,
        };
        let bytes = PdfExporter::default().export(&plan).unwrap();
        let doc = Document::load_mem(&bytes).unwrap();
        assert!(doc.get_pages().len() > 1);
    }
}
