//! Minimal PDF 1.4 writer
//!
//! Produces A4 documents using the standard Helvetica fonts, which every
//! viewer provides, so no font data is embedded. Text is laid out top-down
//! with a cursor; tables break across pages automatically.

mod documents;

pub use documents::{booking_invoice, suppliers_report};

use std::io::Write;

use crate::error::{AppError, AppResult};

const PAGE_WIDTH: f32 = 595.0;
const PAGE_HEIGHT: f32 = 842.0;
const MARGIN: f32 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Font {
    Regular,
    Bold,
}

impl Font {
    fn resource(&self) -> &'static str {
        match self {
            Font::Regular => "F1",
            Font::Bold => "F2",
        }
    }
}

/// Table column: header label and width in points
pub struct Column<'a> {
    pub header: &'a str,
    pub width: f32,
}

pub struct PdfWriter {
    pages: Vec<String>,
    current: String,
    y: f32,
}

impl Default for PdfWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfWriter {
    pub fn new() -> Self {
        Self {
            pages: Vec::new(),
            current: String::new(),
            y: PAGE_HEIGHT - MARGIN,
        }
    }

    /// Remaining vertical space on the current page
    fn remaining(&self) -> f32 {
        self.y - MARGIN
    }

    pub fn new_page(&mut self) {
        let page = std::mem::take(&mut self.current);
        self.pages.push(page);
        self.y = PAGE_HEIGHT - MARGIN;
    }

    fn ensure_space(&mut self, height: f32) {
        if self.remaining() < height {
            self.new_page();
        }
    }

    /// Place text with its baseline at (x, y)
    pub fn text_at(&mut self, x: f32, y: f32, size: f32, font: Font, text: &str) {
        self.current.push_str(&format!(
            "BT /{} {} Tf {:.2} {:.2} Td ({}) Tj ET\n",
            font.resource(),
            size,
            x,
            y,
            escape_text(text)
        ));
    }

    pub fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32) {
        self.current.push_str(&format!(
            "0.5 w {:.2} {:.2} m {:.2} {:.2} l S\n",
            x1, y1, x2, y2
        ));
    }

    /// Write one line of text at the left margin and advance the cursor
    pub fn write_line(&mut self, size: f32, font: Font, text: &str) {
        let height = size * 1.4;
        self.ensure_space(height);
        self.y -= size;
        self.text_at(MARGIN, self.y, size, font, text);
        self.y -= height - size;
    }

    /// Centered title
    pub fn title(&mut self, text: &str) {
        let size = 18.0;
        self.ensure_space(size * 2.0);
        self.y -= size;
        let x = ((PAGE_WIDTH - text_width(text, size)) / 2.0).max(MARGIN);
        self.text_at(x, self.y, size, Font::Bold, text);
        self.y -= size;
    }

    pub fn heading(&mut self, text: &str) {
        self.spacer(6.0);
        self.write_line(13.0, Font::Bold, text);
        self.rule();
    }

    /// "Label: value" line with a bold label
    pub fn field(&mut self, label: &str, value: &str) {
        let size = 11.0;
        self.ensure_space(size * 1.5);
        self.y -= size;
        let label = format!("{}:", label);
        self.text_at(MARGIN, self.y, size, Font::Bold, &label);
        self.text_at(MARGIN + 140.0, self.y, size, Font::Regular, value);
        self.y -= size * 0.5;
    }

    /// Horizontal rule across the printable width
    pub fn rule(&mut self) {
        self.ensure_space(6.0);
        self.y -= 3.0;
        self.line(MARGIN, self.y, PAGE_WIDTH - MARGIN, self.y);
        self.y -= 3.0;
    }

    pub fn spacer(&mut self, height: f32) {
        self.y -= height;
        if self.remaining() < 0.0 {
            self.new_page();
        }
    }

    /// Table with a bold header row, repeated on every page it spans
    pub fn table(&mut self, columns: &[Column<'_>], rows: &[Vec<String>]) {
        let size = 10.0;
        let row_height = 18.0;

        self.ensure_space(row_height * 2.0);
        self.table_header(columns, size, row_height);

        for row in rows {
            if self.remaining() < row_height {
                self.new_page();
                self.table_header(columns, size, row_height);
            }
            self.y -= row_height;
            let mut x = MARGIN;
            for (column, cell) in columns.iter().zip(row) {
                let cell = fit_text(cell, column.width - 6.0, size);
                self.text_at(x + 3.0, self.y + 5.0, size, Font::Regular, &cell);
                x += column.width;
            }
            self.line(MARGIN, self.y, MARGIN + table_width(columns), self.y);
        }
    }

    fn table_header(&mut self, columns: &[Column<'_>], size: f32, row_height: f32) {
        let width = table_width(columns);
        self.line(MARGIN, self.y, MARGIN + width, self.y);
        self.y -= row_height;
        let mut x = MARGIN;
        for column in columns {
            let header = fit_text(column.header, column.width - 6.0, size);
            self.text_at(x + 3.0, self.y + 5.0, size, Font::Bold, &header);
            x += column.width;
        }
        self.line(MARGIN, self.y, MARGIN + width, self.y);
    }

    /// Serialize the document
    pub fn finish(mut self) -> AppResult<Vec<u8>> {
        if !self.current.is_empty() || self.pages.is_empty() {
            self.new_page();
        }
        serialize(&self.pages).map_err(|e| AppError::Internal(format!("Failed to render PDF: {}", e)))
    }
}

fn serialize(pages: &[String]) -> std::io::Result<Vec<u8>> {
    // 1 catalog, 2 pages, 3-4 fonts, then a page and a content stream per page
    let object_count = 4 + pages.len() * 2;
    let mut out: Vec<u8> = Vec::new();
    let mut offsets: Vec<usize> = Vec::with_capacity(object_count);

    out.write_all(b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n")?;

    offsets.push(out.len());
    write!(out, "1 0 obj\n<< /Type /Catalog /Pages 2 0 R >>\nendobj\n")?;

    let kids: Vec<String> = (0..pages.len()).map(|i| format!("{} 0 R", 5 + i * 2)).collect();
    offsets.push(out.len());
    write!(
        out,
        "2 0 obj\n<< /Type /Pages /Kids [{}] /Count {} >>\nendobj\n",
        kids.join(" "),
        pages.len()
    )?;

    offsets.push(out.len());
    write!(out, "3 0 obj\n<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>\nendobj\n")?;
    offsets.push(out.len());
    write!(out, "4 0 obj\n<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica-Bold /Encoding /WinAnsiEncoding >>\nendobj\n")?;

    for (i, content) in pages.iter().enumerate() {
        let page_id = 5 + i * 2;
        let content_id = page_id + 1;

        offsets.push(out.len());
        write!(
            out,
            "{} 0 obj\n<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {} {}] /Resources << /Font << /F1 3 0 R /F2 4 0 R >> >> /Contents {} 0 R >>\nendobj\n",
            page_id, PAGE_WIDTH, PAGE_HEIGHT, content_id
        )?;

        offsets.push(out.len());
        write!(out, "{} 0 obj\n<< /Length {} >>\nstream\n", content_id, content.len())?;
        out.write_all(content.as_bytes())?;
        write!(out, "endstream\nendobj\n")?;
    }

    let xref_offset = out.len();
    write!(out, "xref\n0 {}\n0000000000 65535 f \n", object_count + 1)?;
    for offset in &offsets {
        write!(out, "{:010} 00000 n \n", offset)?;
    }
    write!(
        out,
        "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
        object_count + 1,
        xref_offset
    )?;

    Ok(out)
}

/// Escape a string for a PDF literal. Characters outside ASCII are written as
/// octal WinAnsiEncoding codes; anything the encoding lacks becomes '?'.
pub fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '(' | ')' | '\\' => {
                escaped.push('\\');
                escaped.push(c);
            }
            ' '..='~' => escaped.push(c),
            _ => match win_ansi_code(c) {
                Some(code) => escaped.push_str(&format!("\\{:03o}", code)),
                None => escaped.push('?'),
            },
        }
    }
    escaped
}

/// WinAnsiEncoding byte for a non-ASCII character
fn win_ansi_code(c: char) -> Option<u8> {
    let code = match c {
        '\u{a0}'..='\u{ff}' => c as u32 as u8,
        '\u{20ac}' => 0x80,
        '\u{201a}' => 0x82,
        '\u{0192}' => 0x83,
        '\u{201e}' => 0x84,
        '\u{2026}' => 0x85,
        '\u{2020}' => 0x86,
        '\u{2021}' => 0x87,
        '\u{02c6}' => 0x88,
        '\u{2030}' => 0x89,
        '\u{0160}' => 0x8a,
        '\u{2039}' => 0x8b,
        '\u{0152}' => 0x8c,
        '\u{017d}' => 0x8e,
        '\u{2018}' => 0x91,
        '\u{2019}' => 0x92,
        '\u{201c}' => 0x93,
        '\u{201d}' => 0x94,
        '\u{2022}' => 0x95,
        '\u{2013}' => 0x96,
        '\u{2014}' => 0x97,
        '\u{02dc}' => 0x98,
        '\u{2122}' => 0x99,
        '\u{0161}' => 0x9a,
        '\u{203a}' => 0x9b,
        '\u{0153}' => 0x9c,
        '\u{017e}' => 0x9e,
        '\u{0178}' => 0x9f,
        _ => return None,
    };
    Some(code)
}

/// Rough Helvetica width estimate
fn text_width(text: &str, size: f32) -> f32 {
    text.chars().count() as f32 * size * 0.5
}

fn fit_text(text: &str, width: f32, size: f32) -> String {
    if text_width(text, size) <= width {
        return text.to_string();
    }
    let max_chars = ((width / (size * 0.5)) as usize).saturating_sub(2);
    let mut fitted: String = text.chars().take(max_chars).collect();
    fitted.push_str("..");
    fitted
}

fn table_width(columns: &[Column<'_>]) -> f32 {
    columns.iter().map(|c| c.width).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn as_text(bytes: &[u8]) -> String {
        String::from_utf8_lossy(bytes).to_string()
    }

    #[test]
    fn test_empty_document_is_valid_shell() {
        let bytes = PdfWriter::new().finish().unwrap();
        let text = as_text(&bytes);
        assert!(text.starts_with("%PDF-1.4"));
        assert!(text.trim_end().ends_with("%%EOF"));
        assert!(text.contains("/Count 1"));
    }

    #[test]
    fn test_xref_offsets_point_at_objects() {
        let mut pdf = PdfWriter::new();
        pdf.title("Report");
        pdf.field("Name", "Gas Co");
        let bytes = pdf.finish().unwrap();

        let marker = b"startxref\n";
        let tail = bytes.windows(marker.len()).rposition(|w| w == marker).unwrap() + marker.len();
        let xref_start: usize = std::str::from_utf8(&bytes[tail..])
            .unwrap()
            .lines()
            .next()
            .unwrap()
            .parse()
            .unwrap();
        let xref = std::str::from_utf8(&bytes[xref_start..]).unwrap();
        assert!(xref.starts_with("xref"));

        let entries: Vec<&str> = xref.lines().skip(3).take(6).collect();
        assert_eq!(entries.len(), 6);
        for (i, entry) in entries.iter().enumerate() {
            let offset: usize = entry[..10].parse().unwrap();
            assert!(bytes[offset..].starts_with(format!("{} 0 obj", i + 1).as_bytes()));
        }
    }

    #[test]
    fn test_escape_text() {
        assert_eq!(escape_text("a (b) \\ c"), "a \\(b\\) \\\\ c");
        assert_eq!(escape_text("Rs. 1000 \u{20b9}"), "Rs. 1000 ?");
        assert_eq!(escape_text("tab\there"), "tab?here");
        assert_eq!(escape_text("Jos\u{e9} M\u{fc}ller"), "Jos\\351 M\\374ller");
        assert_eq!(escape_text("\u{20ac}5 \u{2013} \u{2019}"), "\\2005 \\226 \\222");
    }

    #[test]
    fn test_long_table_breaks_pages() {
        let mut pdf = PdfWriter::new();
        let columns = [Column { header: "ID", width: 60.0 }, Column { header: "Name", width: 200.0 }];
        let rows: Vec<Vec<String>> = (0..120).map(|i| vec![i.to_string(), format!("Supplier {}", i)]).collect();
        pdf.table(&columns, &rows);
        let text = as_text(&pdf.finish().unwrap());

        assert!(text.contains("/Count 3"));
        assert!(text.contains("(Supplier 119) Tj"));
        // header repeated on each page
        assert_eq!(text.matches("/F2 10 Tf").count(), 6);
    }

    #[test]
    fn test_fit_text_truncates() {
        assert_eq!(fit_text("short", 100.0, 10.0), "short");
        let fitted = fit_text("a very long supplier name indeed", 60.0, 10.0);
        assert!(fitted.ends_with(".."));
        assert_eq!(fitted.chars().count(), 12);
    }
}
