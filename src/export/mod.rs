// src/export/mod.rs

pub mod docx;
pub mod font;
mod fs_utils;
pub mod locale;
pub mod model;
pub mod pdf;

pub use docx::DocxRenderer;
pub use font::FontAsset;
pub use fs_utils::{DirectorySink, ExportSink, MemorySink};
pub use model::{DocumentModel, build_document_model};
pub use pdf::PdfRenderer;

use crate::errors::AppResult;
use crate::export::locale::labels;
use crate::models::Language;
use crate::ui::messages::success;
use clap::ValueEnum;
use std::path::Path;

/// Turns a document model into the bytes of one file format.
pub trait Renderer {
    fn render(&self, model: &DocumentModel) -> AppResult<Vec<u8>>;
    fn mime(&self) -> &'static str;
    fn extension(&self) -> &'static str;
}

/// A rendered file, ready to be handed to a sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub file_name: String,
    pub mime: &'static str,
    pub bytes: Vec<u8>,
}

/// Common completion message for exports.
pub(crate) fn notify_export_success(label: &str, path: &Path) {
    success(format!("{label} export completed: {}", path.display()));
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Pdf,
    Docx,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Pdf => "pdf",
            ExportFormat::Docx => "docx",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ExportFormat::Pdf => "PDF",
            ExportFormat::Docx => "DOCX",
        }
    }
}

/// `รายงานฝึกงาน_ฉบับที่_{id}.pdf` / `Internship_Report_{id}.docx`
pub fn file_name(language: Language, report_id: &str, format: ExportFormat) -> String {
    format!(
        "{}_{}.{}",
        labels(language).file_prefix,
        report_id,
        format.as_str()
    )
}
