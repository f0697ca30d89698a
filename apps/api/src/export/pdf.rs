//! # PDF Serializer
//!
//! Writes a paginated document as a PDF 1.7 file using only the standard
//! base-14 fonts, so no font files are embedded.
//!
//! ```text
//! %PDF-1.7
//! 1 0 obj  Catalog
//! 2 0 obj  Pages
//! 3 0 obj  regular font (/F1)
//! 4 0 obj  bold font (/F2)
//! …        per page: content stream, page dictionary
//! …        Info dictionary
//! xref / trailer / %%EOF
//! ```
//!
//! Text is encoded as WinAnsi (Windows-1252). Characters outside that set are
//! replaced with `?`.

use std::io::Write as IoWrite;

use chrono::{DateTime, Utc};
use miniz_oxide::deflate::compress_to_vec_zlib;

use crate::export::color::Rgb;
use crate::export::paginate::{PageLine, PaginatedDocument};

/// Document-level metadata written to the Info dictionary.
#[derive(Debug, Clone)]
pub struct Metadata {
    pub title: Option<String>,
    pub author: Option<String>,
    pub created: DateTime<Utc>,
}

impl Default for Metadata {
    fn default() -> Self {
        Self {
            title: None,
            author: None,
            created: Utc::now(),
        }
    }
}

const CATALOG_ID: usize = 1;
const PAGES_ID: usize = 2;
const REGULAR_FONT_ID: usize = 3;
const BOLD_FONT_ID: usize = 4;

#[derive(Debug, Default)]
pub struct PdfWriter;

impl PdfWriter {
    pub fn new() -> Self {
        Self
    }

    pub fn write(&self, document: &PaginatedDocument, metadata: &Metadata) -> Vec<u8> {
        // Index 0 is the free-list head; objects are 1-indexed.
        let mut objects: Vec<Vec<u8>> = vec![Vec::new(); BOLD_FONT_ID + 1];

        objects[REGULAR_FONT_ID] = font_dict(document.font.base_font(false));
        objects[BOLD_FONT_ID] = font_dict(document.font.base_font(true));

        let width = document.page_box.width_pt;
        let height = document.page_box.height_pt;
        let mut page_ids = Vec::with_capacity(document.pages.len());

        for page in &document.pages {
            let content = content_stream(&page.lines, document.background, width, height);
            let compressed = compress_to_vec_zlib(&content, 6);

            let content_id = objects.len();
            let mut stream: Vec<u8> = Vec::new();
            let _ = write!(
                stream,
                "<< /Length {} /Filter /FlateDecode >>\nstream\n",
                compressed.len()
            );
            stream.extend_from_slice(&compressed);
            stream.extend_from_slice(b"\nendstream");
            objects.push(stream);

            let page_id = objects.len();
            objects.push(
                format!(
                    "<< /Type /Page /Parent {PAGES_ID} 0 R /MediaBox [0 0 {width:.2} {height:.2}] \
                     /Contents {content_id} 0 R /Resources << /Font << /F1 {REGULAR_FONT_ID} 0 R \
                     /F2 {BOLD_FONT_ID} 0 R >> >> >>"
                )
                .into_bytes(),
            );
            page_ids.push(page_id);
        }

        objects[CATALOG_ID] = format!("<< /Type /Catalog /Pages {PAGES_ID} 0 R >>").into_bytes();
        let kids = page_ids
            .iter()
            .map(|id| format!("{id} 0 R"))
            .collect::<Vec<_>>()
            .join(" ");
        objects[PAGES_ID] =
            format!("<< /Type /Pages /Kids [{kids}] /Count {} >>", page_ids.len()).into_bytes();

        let info_id = objects.len();
        objects.push(info_dict(metadata));

        serialize(&objects, info_id)
    }
}

fn font_dict(base_font: &str) -> Vec<u8> {
    format!("<< /Type /Font /Subtype /Type1 /BaseFont /{base_font} /Encoding /WinAnsiEncoding >>")
        .into_bytes()
}

fn info_dict(metadata: &Metadata) -> Vec<u8> {
    let mut info: Vec<u8> = b"<< ".to_vec();
    if let Some(title) = &metadata.title {
        info.extend_from_slice(b"/Title (");
        info.extend_from_slice(&pdf_string(title));
        info.extend_from_slice(b") ");
    }
    if let Some(author) = &metadata.author {
        info.extend_from_slice(b"/Author (");
        info.extend_from_slice(&pdf_string(author));
        info.extend_from_slice(b") ");
    }
    let _ = write!(
        info,
        "/CreationDate (D:{}+00'00') /Producer (Folio) /Creator (Folio) >>",
        metadata.created.format("%Y%m%d%H%M%S")
    );
    info
}

/// Raw (uncompressed) content stream for one page.
fn content_stream(lines: &[PageLine], background: Rgb, width: f32, height: f32) -> Vec<u8> {
    let mut stream: Vec<u8> = Vec::new();
    if !background.is_white() {
        let _ = writeln!(
            stream,
            "q\n{:.3} {:.3} {:.3} rg\n0 0 {width:.2} {height:.2} re\nf\nQ",
            background.r, background.g, background.b
        );
    }
    for line in lines {
        let font = if line.bold { "F2" } else { "F1" };
        let _ = write!(
            stream,
            "BT\n{:.3} {:.3} {:.3} rg\n/{font} {:.1} Tf\n{:.2} {:.2} Td\n(",
            line.color.r,
            line.color.g,
            line.color.b,
            line.size,
            line.x,
            height - line.y
        );
        stream.extend_from_slice(&pdf_string(&line.text));
        stream.extend_from_slice(b") Tj\nET\n");
    }
    stream
}

/// WinAnsi-encodes `s` and escapes it for use inside a `( … )` literal.
fn pdf_string(s: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(s.len());
    for ch in s.chars() {
        let byte = unicode_to_winansi(ch).unwrap_or(b'?');
        if matches!(byte, b'\\' | b'(' | b')') {
            out.push(b'\\');
        }
        out.push(byte);
    }
    out
}

/// Maps a character to its Windows-1252 byte, if it has one.
fn unicode_to_winansi(ch: char) -> Option<u8> {
    let cp = ch as u32;
    if (0x20..=0x7E).contains(&cp) || (0xA0..=0xFF).contains(&cp) {
        return Some(cp as u8);
    }
    match cp {
        0x20AC => Some(0x80), // €
        0x201A => Some(0x82),
        0x0192 => Some(0x83),
        0x201E => Some(0x84),
        0x2026 => Some(0x85), // …
        0x2020 => Some(0x86),
        0x2021 => Some(0x87),
        0x02C6 => Some(0x88),
        0x2030 => Some(0x89),
        0x0160 => Some(0x8A),
        0x2039 => Some(0x8B),
        0x0152 => Some(0x8C),
        0x017D => Some(0x8E),
        0x2018 => Some(0x91),
        0x2019 => Some(0x92),
        0x201C => Some(0x93),
        0x201D => Some(0x94),
        0x2022 => Some(0x95), // bullet
        0x2013 => Some(0x96), // en dash
        0x2014 => Some(0x97), // em dash
        0x02DC => Some(0x98),
        0x2122 => Some(0x99),
        0x0161 => Some(0x9A),
        0x203A => Some(0x9B),
        0x0153 => Some(0x9C),
        0x017E => Some(0x9E),
        0x0178 => Some(0x9F),
        0x09 => Some(b' '),
        _ => None,
    }
}

fn serialize(objects: &[Vec<u8>], info_id: usize) -> Vec<u8> {
    let mut output: Vec<u8> = Vec::new();
    let mut offsets: Vec<usize> = vec![0; objects.len()];

    output.extend_from_slice(b"%PDF-1.7\n");
    output.extend_from_slice(b"%\xe2\xe3\xcf\xd3\n");

    for (id, data) in objects.iter().enumerate().skip(1) {
        offsets[id] = output.len();
        let _ = writeln!(output, "{id} 0 obj");
        output.extend_from_slice(data);
        output.extend_from_slice(b"\nendobj\n\n");
    }

    let xref_offset = output.len();
    let _ = write!(output, "xref\n0 {}\n", objects.len());
    output.extend_from_slice(b"0000000000 65535 f \n");
    for offset in offsets.iter().skip(1) {
        let _ = write!(output, "{offset:010} 00000 n \n");
    }
    let _ = writeln!(
        output,
        "trailer\n<< /Size {} /Root {CATALOG_ID} 0 R /Info {info_id} 0 R >>",
        objects.len()
    );
    let _ = write!(output, "startxref\n{xref_offset}\n%%EOF\n");
    output
}
