// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Paginated plain-text documents for download.
//!
//! Layout follows an A4 page in millimetres: text is wrapped to the usable
//! width and a new page starts once the cursor passes the bottom margin.
//! The frontend turns the pages into a PDF; `render_text` gives a plain
//! fallback.

use serde::Serialize;
use std::fmt;

/// Heading printed at the top of the first page.
pub const DOCUMENT_TITLE: &str = "Eden AI Getaway Details";

/// Which document to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExportKind {
    Itinerary,
    PackingList,
    Reservation,
}

impl ExportKind {
    pub fn filename(self) -> &'static str {
        match self {
            ExportKind::Itinerary => "EdenAI_Itinerary.pdf",
            ExportKind::PackingList => "EdenAI_Packing_List.pdf",
            ExportKind::Reservation => "EdenAI_Reservation_Details.pdf",
        }
    }
}

impl fmt::Display for ExportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportKind::Itinerary => write!(f, "itinerary"),
            ExportKind::PackingList => write!(f, "packing list"),
            ExportKind::Reservation => write!(f, "reservation"),
        }
    }
}

/// Page geometry in millimetres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageLayout {
    pub page_width: f64,
    pub page_height: f64,
    pub margin: f64,
    /// Gap between the title baseline and the first body line
    pub title_gap: f64,
    pub line_height: f64,
    /// Average glyph advance of the 11pt body font
    pub char_width: f64,
}

impl Default for PageLayout {
    fn default() -> Self {
        Self {
            page_width: 210.0,
            page_height: 297.0,
            margin: 15.0,
            title_gap: 15.0,
            line_height: 7.0,
            char_width: 2.0,
        }
    }
}

impl PageLayout {
    /// Characters that fit on one line of body text.
    pub fn columns(&self) -> usize {
        let text_width = self.page_width - self.margin * 2.0;
        ((text_width / self.char_width).floor() as usize).max(1)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
    pub lines: Vec<String>,
}

/// A titled document split into pages.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    pub title: String,
    pub filename: String,
    pub pages: Vec<Page>,
}

impl Document {
    pub fn new(kind: ExportKind, content: &str) -> Self {
        Self::with_layout(kind, content, &PageLayout::default())
    }

    pub fn with_layout(kind: ExportKind, content: &str, layout: &PageLayout) -> Self {
        let lines = wrap_text(content, layout.columns());
        Self {
            title: DOCUMENT_TITLE.to_string(),
            filename: kind.filename().to_string(),
            pages: paginate(lines, layout),
        }
    }

    /// Plain-text rendering, pages separated by form feeds.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        out.push_str(&self.title);
        out.push_str("\n\n");
        for (i, page) in self.pages.iter().enumerate() {
            if i > 0 {
                out.push('\u{c}');
            }
            for line in &page.lines {
                out.push_str(line);
                out.push('\n');
            }
        }
        out
    }
}

/// Wrap every line of `content` to at most `columns` characters.
///
/// Breaks at whitespace where possible; words longer than a line are split.
/// Blank lines are kept.
pub fn wrap_text(content: &str, columns: usize) -> Vec<String> {
    let columns = columns.max(1);
    let mut wrapped = Vec::new();

    for raw_line in content.lines() {
        let line = raw_line.trim_end();
        if line.trim().is_empty() {
            wrapped.push(String::new());
            continue;
        }

        let mut current = String::new();
        let mut current_len = 0;
        for word in line.split_whitespace() {
            let mut word = word;
            let mut word_len = word.chars().count();

            if current_len > 0 && current_len + 1 + word_len > columns {
                wrapped.push(std::mem::take(&mut current));
                current_len = 0;
            }

            while word_len > columns {
                if current_len > 0 {
                    wrapped.push(std::mem::take(&mut current));
                    current_len = 0;
                }
                let split = word
                    .char_indices()
                    .nth(columns)
                    .map(|(idx, _)| idx)
                    .unwrap_or(word.len());
                wrapped.push(word[..split].to_string());
                word = &word[split..];
                word_len -= columns;
            }

            if word_len == 0 {
                continue;
            }
            if current_len > 0 {
                current.push(' ');
                current_len += 1;
            }
            current.push_str(word);
            current_len += word_len;
        }
        if current_len > 0 {
            wrapped.push(current);
        }
    }

    wrapped
}

/// Lay wrapped lines out on pages.
///
/// The first page starts below the title; each further page starts at the
/// top margin. A line is moved to a new page when the cursor has passed
/// `page_height - margin`.
pub fn paginate(lines: Vec<String>, layout: &PageLayout) -> Vec<Page> {
    let bottom = layout.page_height - layout.margin;
    let mut pages = vec![Page { lines: Vec::new() }];
    let mut cursor_y = layout.margin + layout.title_gap;

    for line in lines {
        if cursor_y > bottom {
            pages.push(Page { lines: Vec::new() });
            cursor_y = layout.margin;
        }
        if let Some(page) = pages.last_mut() {
            page.lines.push(line);
        }
        cursor_y += layout.line_height;
    }

    pages
}
