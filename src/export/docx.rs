//! Flow-layout DOCX renderer.
//!
//! Writes a minimal WordprocessingML package by hand. The entry order and
//! the timestamps inside the archive are fixed, so identical models give
//! identical bytes.

use crate::errors::{AppError, AppResult};
use crate::export::Renderer;
use crate::export::model::{DocumentModel, SummaryRow};
use std::io::{Cursor, Seek, Write};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

const FONT: &str = "Cordia New";
/// Half-points (15 pt).
const FONT_SIZE: u32 = 30;

/// Text width of an A4 page with 1" margins, in twips.
const TEXT_WIDTH: u32 = 9026;
const ENTRY_COLUMNS: [u32; 4] = [30, 20, 100, 30];
const SUMMARY_COLUMNS: [u32; 2] = [2448, 720];
const CELL_MARGINS: &str = r#"<w:tcMar><w:top w:w="50" w:type="dxa"/><w:left w:w="100" w:type="dxa"/><w:bottom w:w="50" w:type="dxa"/><w:right w:w="100" w:type="dxa"/></w:tcMar>"#;
const CELL_BORDERS: &str = r#"<w:tcBorders><w:top w:val="single" w:sz="4" w:space="0" w:color="000000"/><w:left w:val="single" w:sz="4" w:space="0" w:color="000000"/><w:bottom w:val="single" w:sz="4" w:space="0" w:color="000000"/><w:right w:val="single" w:sz="4" w:space="0" w:color="000000"/></w:tcBorders>"#;

const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
const R_NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

#[derive(Clone, Copy, PartialEq)]
enum Align {
    Left,
    Center,
}

impl Align {
    fn as_str(self) -> &'static str {
        match self {
            Align::Left => "left",
            Align::Center => "center",
        }
    }
}

/// Renders the document model as a `.docx` package.
#[derive(Debug, Default)]
pub struct DocxRenderer;

impl DocxRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for DocxRenderer {
    fn render(&self, model: &DocumentModel) -> AppResult<Vec<u8>> {
        let parts: [(&str, String); 6] = [
            ("[Content_Types].xml", content_types_xml()),
            ("_rels/.rels", root_rels_xml()),
            ("word/document.xml", document_xml(model)),
            ("word/styles.xml", styles_xml()),
            ("word/_rels/document.xml.rels", document_rels_xml()),
            ("docProps/app.xml", app_xml()),
        ];

        Ok(write_package(Cursor::new(Vec::new()), &parts)?.into_inner())
    }

    fn mime(&self) -> &'static str {
        DOCX_MIME
    }

    fn extension(&self) -> &'static str {
        "docx"
    }
}

/// Zip `parts` into `writer` in the given order. Any write failure is a
/// serialization failure.
pub fn write_package<W: Write + Seek>(writer: W, parts: &[(&str, String)]) -> AppResult<W> {
    let mut zip = ZipWriter::new(writer);
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(DateTime::default());

    for (name, xml) in parts {
        zip.start_file(*name, options).map_err(zip_error)?;
        zip.write_all(xml.as_bytes()).map_err(|e| {
            AppError::Serialization(format!("cannot write docx part '{name}': {e}"))
        })?;
    }

    zip.finish().map_err(zip_error)
}

fn zip_error(e: zip::result::ZipError) -> AppError {
    AppError::Serialization(format!("cannot write docx package: {e}"))
}

// ---------------------------
// Package parts
// ---------------------------

fn content_types_xml() -> String {
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/><Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/><Override PartName="/docProps/app.xml" ContentType="application/vnd.openxmlformats-officedocument.extended-properties+xml"/></Types>"#
        .to_string()
}

fn root_rels_xml() -> String {
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties" Target="docProps/app.xml"/></Relationships>"#
        .to_string()
}

fn document_rels_xml() -> String {
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/></Relationships>"#
        .to_string()
}

fn app_xml() -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties"><Application>{} {}</Application></Properties>"#,
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    )
}

fn styles_xml() -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:styles xmlns:w="{W_NS}"><w:docDefaults><w:rPrDefault><w:rPr><w:rFonts w:ascii="{FONT}" w:hAnsi="{FONT}" w:eastAsia="{FONT}" w:cs="{FONT}"/><w:sz w:val="{FONT_SIZE}"/><w:szCs w:val="{FONT_SIZE}"/><w:lang w:val="en-US" w:bidi="th-TH"/></w:rPr></w:rPrDefault><w:pPrDefault><w:pPr><w:spacing w:after="0" w:line="240" w:lineRule="auto"/></w:pPr></w:pPrDefault></w:docDefaults><w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/></w:style><w:style w:type="table" w:default="1" w:styleId="TableNormal"><w:name w:val="Normal Table"/><w:tblPr><w:tblCellMar><w:left w:w="108" w:type="dxa"/><w:right w:w="108" w:type="dxa"/></w:tblCellMar></w:tblPr></w:style></w:styles>"#
    )
}

// ---------------------------
// Body
// ---------------------------

fn document_xml(model: &DocumentModel) -> String {
    let mut body = String::new();

    body.push_str(&paragraph(&[model.title.title.as_str()], Align::Center, true, 0));
    body.push_str(&paragraph(&[model.title.department.as_str()], Align::Center, true, 0));
    body.push_str(&paragraph(&[model.title.sequence.as_str()], Align::Center, false, 0));
    body.push_str(&blank_paragraph());

    // Name and student id share a line, the institution gets its own.
    if let [name, student_id, rest @ ..] = model.identity.as_slice() {
        let line = format!("{}    {}", name.line(), student_id.line());
        body.push_str(&paragraph(&[line.as_str()], Align::Left, false, 0));
        for field in rest {
            body.push_str(&paragraph(&[field.line().as_str()], Align::Left, false, 0));
        }
    } else {
        for field in &model.identity {
            body.push_str(&paragraph(&[field.line().as_str()], Align::Left, false, 0));
        }
    }
    body.push_str(&blank_paragraph());

    body.push_str(&entries_table(model));
    body.push_str(&blank_paragraph());
    body.push_str(&summary_table(&model.summary));
    body.push_str(&blank_paragraph());

    let sig = &model.signature;
    body.push_str(&paragraph(&[sig.certification.as_str()], Align::Center, false, 0));
    body.push_str(&blank_paragraph());
    body.push_str(&paragraph(&[sig.signature_line.as_str()], Align::Center, false, 936));
    body.push_str(&paragraph(&[sig.supervisor_name.as_str()], Align::Left, false, 2016));
    body.push_str(&paragraph(&[sig.supervisor_position.as_str()], Align::Left, false, 2016));
    body.push_str(&paragraph(&[sig.date_line.as_str()], Align::Left, false, 2016));

    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="{W_NS}" xmlns:r="{R_NS}"><w:body>{body}<w:sectPr><w:pgSz w:w="11906" w:h="16838"/><w:pgMar w:top="1440" w:right="1440" w:bottom="1440" w:left="1440" w:header="708" w:footer="708" w:gutter="0"/></w:sectPr></w:body></w:document>"#
    )
}

fn entries_table(model: &DocumentModel) -> String {
    let total: u32 = ENTRY_COLUMNS.iter().sum();
    let widths: Vec<u32> = ENTRY_COLUMNS
        .iter()
        .map(|p| p * TEXT_WIDTH / total)
        .collect();

    let mut xml = table_start(&widths, Align::Center);

    // header row repeats on every page
    xml.push_str(r#"<w:tr><w:trPr><w:tblHeader/></w:trPr>"#);
    for (w, h) in widths.iter().zip(&model.entries.headers) {
        xml.push_str(&cell(*w, &[h.as_str()], Align::Center));
    }
    xml.push_str("</w:tr>");

    let aligns = [Align::Center, Align::Center, Align::Left, Align::Left];
    for row in &model.entries.rows {
        xml.push_str("<w:tr>");
        for ((w, text), align) in widths.iter().zip(row.cells()).zip(aligns) {
            xml.push_str(&cell(*w, &[text], align));
        }
        xml.push_str("</w:tr>");
    }

    xml.push_str("</w:tbl>");
    xml
}

fn summary_table(rows: &[SummaryRow]) -> String {
    let mut xml = table_start(&SUMMARY_COLUMNS, Align::Left);

    for row in rows {
        xml.push_str(r#"<w:tr><w:trPr><w:trHeight w:val="750" w:hRule="atLeast"/></w:trPr>"#);

        let lines: Vec<&str> = row
            .label_lines
            .iter()
            .map(String::as_str)
            .filter(|l| !l.is_empty())
            .collect();
        xml.push_str(&cell(SUMMARY_COLUMNS[0], &lines, Align::Left));
        xml.push_str(&cell(SUMMARY_COLUMNS[1], &[row.value.as_str()], Align::Center));
        xml.push_str("</w:tr>");
    }

    xml.push_str("</w:tbl>");
    xml
}

fn table_start(widths: &[u32], align: Align) -> String {
    let total: u32 = widths.iter().sum();
    let mut xml = format!(
        r#"<w:tbl><w:tblPr><w:tblW w:w="{total}" w:type="dxa"/><w:jc w:val="{}"/><w:tblLayout w:type="fixed"/></w:tblPr><w:tblGrid>"#,
        align.as_str()
    );
    for w in widths {
        xml.push_str(&format!(r#"<w:gridCol w:w="{w}"/>"#));
    }
    xml.push_str("</w:tblGrid>");
    xml
}

/// A table cell; every cell carries its own four borders.
fn cell(width: u32, lines: &[&str], align: Align) -> String {
    format!(
        r#"<w:tc><w:tcPr><w:tcW w:w="{width}" w:type="dxa"/>{CELL_BORDERS}{CELL_MARGINS}<w:vAlign w:val="center"/></w:tcPr>{}</w:tc>"#,
        paragraph(lines, align, false, 0)
    )
}

fn blank_paragraph() -> String {
    paragraph(&[" "], Align::Left, false, 0)
}

/// One paragraph; each element of `lines` after the first starts after a
/// line break inside the same paragraph.
fn paragraph(lines: &[&str], align: Align, bold: bool, indent_left: u32) -> String {
    let mut xml = String::from("<w:p><w:pPr>");
    if indent_left > 0 {
        xml.push_str(&format!(r#"<w:ind w:left="{indent_left}"/>"#));
    }
    xml.push_str(&format!(r#"<w:jc w:val="{}"/></w:pPr>"#, align.as_str()));

    for (i, line) in lines.iter().enumerate() {
        xml.push_str("<w:r>");
        if bold {
            xml.push_str("<w:rPr><w:b/><w:bCs/></w:rPr>");
        }
        if i > 0 {
            xml.push_str("<w:br/>");
        }
        xml.push_str(&run_content(line));
        xml.push_str("</w:r>");
    }

    xml.push_str("</w:p>");
    xml
}

/// Run body for `text`: tabs and line feeds become `<w:tab/>` and
/// `<w:br/>`, characters XML 1.0 cannot carry are dropped.
fn run_content(text: &str) -> String {
    let mut xml = String::new();
    let mut pending = String::new();

    let flush = |xml: &mut String, pending: &mut String| {
        if !pending.is_empty() {
            xml.push_str(&format!(
                r#"<w:t xml:space="preserve">{}</w:t>"#,
                escape_xml_text(pending)
            ));
            pending.clear();
        }
    };

    for c in text.chars() {
        match c {
            '\t' => {
                flush(&mut xml, &mut pending);
                xml.push_str("<w:tab/>");
            }
            '\n' => {
                flush(&mut xml, &mut pending);
                xml.push_str("<w:br/>");
            }
            '\u{FFFE}' | '\u{FFFF}' => {}
            c if (c as u32) < 0x20 => {}
            c => pending.push(c),
        }
    }
    flush(&mut xml, &mut pending);
    xml
}

fn escape_xml_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
