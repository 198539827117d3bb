mod common;
use common::{font_fixture, sample_profile, sample_report};
use internlog::core::export::{ExportRequest, export_report};
use internlog::errors::ErrorKind;
use internlog::export::{
    DocxRenderer, ExportFormat, ExportSink, FontAsset, MemorySink, PdfRenderer, Renderer,
    build_document_model, file_name,
};
use internlog::export::docx::write_package;
use internlog::models::Language;
use regex::Regex;
use std::io::{self, Cursor, Read, Seek, SeekFrom, Write};

fn request(language: Language, hours: &[&str]) -> ExportRequest {
    ExportRequest {
        report: Some(sample_report("1", hours)),
        profile: Some(sample_profile()),
        language,
        previous_total_hours: 16.0,
    }
}

fn docx_part(bytes: &[u8], name: &str) -> String {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).expect("open docx");
    let mut file = archive.by_name(name).expect("part present");
    let mut xml = String::new();
    file.read_to_string(&mut xml).expect("read part");
    xml
}

fn contains_bytes(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}

fn thai_font() -> FontAsset {
    FontAsset::load(&font_fixture("InternlogThai.ttf")).expect("load thai fixture font")
}

#[test]
fn test_file_names() {
    assert_eq!(
        file_name(Language::En, "1", ExportFormat::Pdf),
        "Internship_Report_1.pdf"
    );
    assert_eq!(
        file_name(Language::Th, "3", ExportFormat::Docx),
        "รายงานฝึกงาน_ฉบับที่_3.docx"
    );
}

#[test]
fn test_english_pdf_export() {
    let artifact = export_report(&request(Language::En, &["8", "x", "3.5", ""]), ExportFormat::Pdf, None)
        .unwrap();

    assert_eq!(artifact.file_name, "Internship_Report_1.pdf");
    assert_eq!(artifact.mime, "application/pdf");
    assert!(artifact.bytes.starts_with(b"%PDF"));
}

#[test]
fn test_pdf_is_deterministic() {
    let req = request(Language::En, &["8", "7.5", "4"]);

    let a = export_report(&req, ExportFormat::Pdf, None).unwrap();
    let b = export_report(&req, ExportFormat::Pdf, None).unwrap();
    assert_eq!(a.bytes, b.bytes);
}

#[test]
fn test_long_reports_span_more_pages() {
    let model_short = build_document_model(
        Some(&sample_report("1", &["8"; 3])),
        Some(&sample_profile()),
        Language::En,
        0.0,
    )
    .unwrap();
    let model_long = build_document_model(
        Some(&sample_report("1", &["8"; 100])),
        Some(&sample_profile()),
        Language::En,
        0.0,
    )
    .unwrap();

    let mut short = internlog::export::pdf::PdfManager::new(None).unwrap();
    short.write_document(&model_short);
    let mut long = internlog::export::pdf::PdfManager::new(None).unwrap();
    long.write_document(&model_long);

    assert!(short.page_count() >= 1);
    assert!(long.page_count() >= 3);
    assert!(long.page_count() > short.page_count());
}

#[test]
fn test_thai_pdf_without_font_is_font_load_failure() {
    let err = export_report(&request(Language::Th, &["8"]), ExportFormat::Pdf, None).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::FontLoadFailure);
}

#[test]
fn test_english_pdf_with_thai_text_needs_font() {
    let mut req = request(Language::En, &["8"]);
    if let Some(report) = req.report.as_mut() {
        report.entries[0].description = "ประชุมทีม".into();
    }

    let err = export_report(&req, ExportFormat::Pdf, None).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::FontLoadFailure);
}

#[test]
fn test_thai_pdf_embeds_the_font() {
    let font = thai_font();
    let artifact =
        export_report(&request(Language::Th, &["8", "4"]), ExportFormat::Pdf, Some(&font)).unwrap();

    assert_eq!(artifact.file_name, "รายงานฝึกงาน_ฉบับที่_1.pdf");
    assert!(artifact.bytes.starts_with(b"%PDF"));
    let names: [&[u8]; 6] = [
        b"/Type0",
        b"/CIDFontType2",
        b"/Identity-H",
        b"/ToUnicode",
        b"/FontFile2",
        b"/InternlogThai",
    ];
    for name in names {
        assert!(
            contains_bytes(&artifact.bytes, name),
            "missing {}",
            String::from_utf8_lossy(name)
        );
    }
    assert!(!contains_bytes(&artifact.bytes, b"/Helvetica"));
}

#[test]
fn test_thai_pdf_is_deterministic_with_same_font() {
    let req = request(Language::Th, &["8", "7.5"]);

    let a = export_report(&req, ExportFormat::Pdf, Some(&thai_font())).unwrap();
    let b = export_report(&req, ExportFormat::Pdf, Some(&thai_font())).unwrap();
    assert_eq!(a.bytes, b.bytes);
}

#[test]
fn test_font_without_thai_glyphs_is_rejected() {
    let latin = FontAsset::load(&font_fixture("InternlogLatin.ttf")).unwrap();

    let err = export_report(&request(Language::Th, &["8"]), ExportFormat::Pdf, Some(&latin))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::FontLoadFailure);
    assert!(err.to_string().contains("has no glyph for"));

    // the same font is fine for a Latin-1 report
    let ok = export_report(&request(Language::En, &["8"]), ExportFormat::Pdf, Some(&latin));
    assert!(ok.is_ok());
}

#[test]
fn test_uncovered_character_is_named() {
    let mut req = request(Language::Th, &["8"]);
    if let Some(report) = req.report.as_mut() {
        report.entries[0].description = "ประชุม 会議".into();
    }

    let err = export_report(&req, ExportFormat::Pdf, Some(&thai_font())).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::FontLoadFailure);
    assert!(err.to_string().contains("U+4F1A"));
}

#[test]
fn test_long_description_continues_on_next_pages() {
    let mut report = sample_report("1", &["8"]);
    report.entries[0].description = "word ".repeat(3000);
    let model =
        build_document_model(Some(&report), Some(&sample_profile()), Language::En, 0.0).unwrap();

    let mut pdf = internlog::export::pdf::PdfManager::new(None).unwrap();
    pdf.write_document(&model);
    assert!(pdf.page_count() >= 3);
    let bytes = pdf.finish();

    // every word is drawn, and no line sits below the bottom edge
    let text = String::from_utf8_lossy(&bytes);
    assert_eq!(text.matches("word").count(), 3000);

    let tm = Regex::new(r"1 0 0 1 (-?[0-9.]+) (-?[0-9.]+) Tm").unwrap();
    let mut lines = 0;
    for cap in tm.captures_iter(&text) {
        let y: f32 = cap[2].parse().unwrap();
        assert!(y > 0.0, "text drawn at y = {y}");
        lines += 1;
    }
    assert!(lines > 300);
}

#[test]
fn test_invalid_font_bytes_are_rejected() {
    let err = FontAsset::from_bytes("Broken", b"definitely not a font".to_vec()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::FontLoadFailure);
}

#[test]
fn test_missing_font_file_is_rejected() {
    let path = std::env::temp_dir().join("internlog_no_such_font.ttf");
    let err = FontAsset::load(&path).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::FontLoadFailure);
}

#[test]
fn test_missing_report_is_invalid_input() {
    let mut req = request(Language::En, &["8"]);
    req.report = None;

    let err = export_report(&req, ExportFormat::Docx, None).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
}

#[test]
fn test_docx_package_layout() {
    let artifact = export_report(&request(Language::Th, &["8", "4"]), ExportFormat::Docx, None)
        .unwrap();

    assert_eq!(artifact.file_name, "รายงานฝึกงาน_ฉบับที่_1.docx");
    assert_eq!(
        artifact.mime,
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
    );

    let archive = zip::ZipArchive::new(Cursor::new(&artifact.bytes)).unwrap();
    let names: Vec<&str> = archive.file_names().collect();
    for part in [
        "[Content_Types].xml",
        "_rels/.rels",
        "word/document.xml",
        "word/styles.xml",
        "word/_rels/document.xml.rels",
        "docProps/app.xml",
    ] {
        assert!(names.contains(&part), "missing {part}");
    }

    let styles = docx_part(&artifact.bytes, "word/styles.xml");
    assert!(styles.contains(r#"w:ascii="Cordia New""#));
    assert!(styles.contains(r#"<w:sz w:val="30"/>"#));
}

#[test]
fn test_docx_every_cell_has_four_borders() {
    let artifact = export_report(&request(Language::En, &["8"]), ExportFormat::Docx, None).unwrap();
    let xml = docx_part(&artifact.bytes, "word/document.xml");

    let cells = xml.matches("<w:tc>").count();
    // header + 15 body rows of 4 cells, 3 summary rows of 2 cells
    assert_eq!(cells, 16 * 4 + 3 * 2);

    for side in ["top", "left", "bottom", "right"] {
        let tag = format!(r#"<w:{side} w:val="single""#);
        assert_eq!(xml.matches(&tag).count(), cells, "{side} borders");
    }
}

#[test]
fn test_docx_contains_report_text() {
    let artifact = export_report(&request(Language::En, &["8", "3.5"]), ExportFormat::Docx, None)
        .unwrap();
    let xml = docx_part(&artifact.bytes, "word/document.xml");

    assert!(xml.contains("Internship Bi-weekly Report"));
    assert!(xml.contains("06/03/2024"));
    assert!(xml.contains("Task 2"));
    assert!(xml.contains("27.5"));
}

#[test]
fn test_docx_is_deterministic() {
    let req = request(Language::Th, &["8", "8", "6"]);

    let a = export_report(&req, ExportFormat::Docx, None).unwrap();
    let b = export_report(&req, ExportFormat::Docx, None).unwrap();
    assert_eq!(a.bytes, b.bytes);
}

#[test]
fn test_docx_escapes_markup() {
    let mut req = request(Language::En, &["8"]);
    if let Some(report) = req.report.as_mut() {
        report.entries[0].description = "fix <div> & test".into();
    }

    let artifact = export_report(&req, ExportFormat::Docx, None).unwrap();
    let xml = docx_part(&artifact.bytes, "word/document.xml");
    assert!(xml.contains("fix &lt;div&gt; &amp; test"));
}

#[test]
fn test_docx_control_characters() {
    let mut req = request(Language::En, &["8"]);
    if let Some(report) = req.report.as_mut() {
        report.entries[0].description = "tab\u{0B}vt\u{0C}ff\u{0}\tnext\r\nline".into();
    }

    let artifact = export_report(&req, ExportFormat::Docx, None).unwrap();
    let xml = docx_part(&artifact.bytes, "word/document.xml");

    assert!(!xml.chars().any(|c| (c as u32) < 0x20 && c != '\n'));
    assert!(xml.contains(r#"<w:t xml:space="preserve">tabvtff</w:t><w:tab/>"#));
    assert!(xml.contains(r#"<w:t xml:space="preserve">next</w:t><w:br/><w:t xml:space="preserve">line</w:t>"#));
}

/// Writer that fails once `limit` bytes have been written.
struct FullDisk {
    inner: Cursor<Vec<u8>>,
    limit: u64,
}

impl Write for FullDisk {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.inner.position() + buf.len() as u64 > self.limit {
            return Err(io::Error::other("disk full"));
        }
        self.inner.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Seek for FullDisk {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.inner.seek(pos)
    }
}

#[test]
fn test_docx_write_failure_is_serialization_failure() {
    let parts = [
        ("word/document.xml", "<w:document/>".repeat(2000)),
        ("word/styles.xml", "<w:styles/>".to_string()),
    ];

    for limit in [0, 32, 128] {
        let disk = FullDisk {
            inner: Cursor::new(Vec::new()),
            limit,
        };
        let err = write_package(disk, &parts).err().expect("write must fail");
        assert_eq!(err.kind(), ErrorKind::SerializationFailure, "limit {limit}");
    }
}

#[test]
fn test_renderers_share_the_model() {
    let model = build_document_model(
        Some(&sample_report("1", &["8"])),
        Some(&sample_profile()),
        Language::En,
        0.0,
    )
    .unwrap();

    let pdf = PdfRenderer::new(None);
    let docx = DocxRenderer::new();
    assert_eq!(pdf.extension(), "pdf");
    assert_eq!(docx.extension(), "docx");
    assert!(pdf.render(&model).is_ok());
    assert!(docx.render(&model).is_ok());
}

#[test]
fn test_memory_sink_keeps_artifacts() {
    let artifact = export_report(&request(Language::En, &["8"]), ExportFormat::Docx, None).unwrap();

    let mut sink = MemorySink::default();
    let path = sink.save(&artifact).unwrap();

    assert_eq!(path.to_string_lossy(), "Internship_Report_1.docx");
    assert_eq!(sink.files["Internship_Report_1.docx"], artifact.bytes);
}
