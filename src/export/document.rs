//! Page layout for the plan document
//!
//! Produces positioned text lines on A4 pages. Rendering to an actual file
//! format happens elsewhere; this module only decides what goes where and
//! when a new page starts.

use crate::domain::{Phase, PlanTask};
use crate::plan::ProjectPlan;

pub const NO_TASKS_LINE: &str = "No tasks selected for this project plan.";
pub const DATE_LINE: &str = "Start Date: ______    Completion Date: ______";

/// Average glyph width of the base fonts, as a fraction of the font size
const AVG_CHAR_WIDTH: f32 = 0.5;
const LINE_SPACING: f32 = 1.4;

/// Document layout and encoding options
#[derive(Debug, Clone, PartialEq)]
pub struct PdfOptions {
    /// Substitute for characters the font cannot encode; None strips them
    pub replacement: Option<String>,
    pub font_size: f32,
    pub header_size: f32,
    pub title_size: f32,
    pub margin: f32,
}

impl PdfOptions {
    /// A4 width in points
    pub const PAGE_WIDTH: f32 = 595.28;
    /// A4 height in points
    pub const PAGE_HEIGHT: f32 = 841.89;

    fn text_width(&self) -> f32 {
        Self::PAGE_WIDTH - 2.0 * self.margin
    }
}

impl Default for PdfOptions {
    fn default() -> Self {
        Self {
            replacement: None,
            font_size: 12.0,
            header_size: 14.0,
            title_size: 16.0,
            margin: 42.5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontStyle {
    Regular,
    Bold,
    Italic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
}

/// One line of text with its baseline position (origin bottom-left)
#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    pub text: String,
    pub style: FontStyle,
    pub size: f32,
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub lines: Vec<TextLine>,
}

struct Layout<'a> {
    options: &'a PdfOptions,
    pages: Vec<Page>,
    cursor: f32,
}

impl<'a> Layout<'a> {
    fn new(options: &'a PdfOptions) -> Self {
        Self {
            options,
            pages: vec![Page::default()],
            cursor: PdfOptions::PAGE_HEIGHT - options.margin,
        }
    }

    /// Place text, wrapping to the text width and breaking pages as needed
    fn text(&mut self, text: &str, style: FontStyle, size: f32, align: Align) {
        let max_chars = ((self.options.text_width() / (size * AVG_CHAR_WIDTH)) as usize).max(1);
        for line in wrap(text, max_chars) {
            self.place(line, style, size, align);
        }
    }

    /// Start a new page unless `height` still fits above the bottom margin
    fn ensure_room(&mut self, height: f32) {
        if self.cursor - height < self.options.margin && !self.current().lines.is_empty() {
            self.pages.push(Page::default());
            self.cursor = PdfOptions::PAGE_HEIGHT - self.options.margin;
        }
    }

    fn place(&mut self, text: String, style: FontStyle, size: f32, align: Align) {
        let height = size * LINE_SPACING;
        self.ensure_room(height);

        let x = match align {
            Align::Left => self.options.margin,
            Align::Center => {
                let width = text.chars().count() as f32 * size * AVG_CHAR_WIDTH;
                ((PdfOptions::PAGE_WIDTH - width) / 2.0).max(self.options.margin)
            }
        };
        let y = self.cursor - size;
        self.cursor -= height;
        self.current().lines.push(TextLine { text, style, size, x, y });
    }

    fn gap(&mut self, height: f32) {
        self.cursor -= height;
    }

    fn current(&mut self) -> &mut Page {
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }
}

/// Lay out a plan: title block, then one section per phase with tasks
pub fn layout_plan(plan: &ProjectPlan, options: &PdfOptions) -> Vec<Page> {
    let mut layout = Layout::new(options);
    let meta = &plan.meta;

    layout.text(
        &format!("Project Plan - {}", meta.display_name()),
        FontStyle::Bold,
        options.title_size,
        Align::Center,
    );
    layout.text(
        &format!("Owner: {}    Created: {}", meta.display_owner(), meta.created_display()),
        FontStyle::Regular,
        options.font_size,
        Align::Center,
    );
    layout.gap(options.title_size);

    if plan.is_empty() {
        layout.text(NO_TASKS_LINE, FontStyle::Italic, options.font_size, Align::Center);
        return layout.pages;
    }

    for phase in Phase::ALL {
        let tasks: Vec<&PlanTask> = plan.tasks_for(phase).collect();
        if tasks.is_empty() {
            continue;
        }
        // header stays with its first task and date line
        layout.ensure_room((options.header_size + 2.0 * options.font_size) * LINE_SPACING);
        layout.text(&format!("{} Phase", phase), FontStyle::Bold, options.header_size, Align::Left);
        for task in tasks {
            layout.text(&task_line(task), FontStyle::Regular, options.font_size, Align::Left);
            layout.text(DATE_LINE, FontStyle::Regular, options.font_size, Align::Left);
            layout.gap(options.font_size * 0.5);
        }
        layout.gap(options.font_size * 0.5);
    }

    layout.pages
}

/// "{name} - {description}" with placeholders for blanks
pub fn task_line(task: &PlanTask) -> String {
    let name = if task.task_name.trim().is_empty() {
        "Unnamed Task"
    } else {
        task.task_name.as_str()
    };
    let description = if task.description.trim().is_empty() {
        "No Description Available"
    } else {
        task.description.as_str()
    };
    format!("{} - {}", name, description)
}

/// Greedy wrap at spaces, keeping whitespace runs intact. Prefers a lone
/// space as the break point; words longer than a line are split.
fn wrap(text: &str, max_chars: usize) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= max_chars {
        return vec![text.to_string()];
    }

    let is_space = |i: usize| chars[i] == ' ';
    let is_lone_space = |i: usize| is_space(i) && !is_space(i - 1) && chars.get(i + 1) != Some(&' ');

    let mut lines = Vec::new();
    let mut start = 0;
    while chars.len() - start > max_chars {
        let end = start + max_chars;
        let split = (start + 1..=end)
            .rev()
            .find(|&i| is_lone_space(i))
            .or_else(|| (start + 1..=end).rev().find(|&i| is_space(i)));
        match split {
            Some(i) => {
                lines.push(chars[start..i].iter().collect());
                start = i + 1;
            }
            None => {
                lines.push(chars[start..end].iter().collect());
                start = end;
            }
        }
    }
    lines.push(chars[start..].iter().collect());
    lines
}
