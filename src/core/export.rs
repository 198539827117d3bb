use crate::core::hours::previous_total_hours;
use crate::errors::{AppError, AppResult};
use crate::export::{
    DocxRenderer, ExportArtifact, ExportFormat, ExportSink, FontAsset, PdfRenderer, Renderer,
    build_document_model, file_name,
};
use crate::models::{Language, Profile, Report, User};
use crate::store::InternshipStore;
use std::path::PathBuf;

/// Everything needed to render one report, captured up front so rendering
/// never touches the store.
#[derive(Debug, Clone)]
pub struct ExportRequest {
    pub report: Option<Report>,
    pub profile: Option<Profile>,
    pub language: Language,
    pub previous_total_hours: f64,
}

/// Render `request` in `format`.
///
/// The PDF renderer uses `font` for all text when it is given; the DOCX
/// renderer ignores it.
pub fn export_report(
    request: &ExportRequest,
    format: ExportFormat,
    font: Option<&FontAsset>,
) -> AppResult<ExportArtifact> {
    let model = build_document_model(
        request.report.as_ref(),
        request.profile.as_ref(),
        request.language,
        request.previous_total_hours,
    )?;

    let renderer: Box<dyn Renderer> = match format {
        ExportFormat::Pdf => Box::new(PdfRenderer::new(font.cloned())),
        ExportFormat::Docx => Box::new(DocxRenderer::new()),
    };

    let bytes = renderer.render(&model)?;

    Ok(ExportArtifact {
        file_name: file_name(request.language, &model.report_id, format),
        mime: renderer.mime(),
        bytes,
    })
}

/// Load a report of `user` from the store and build its export request.
pub fn request_for<S: InternshipStore>(
    store: &mut S,
    user: &User,
    report_id: &str,
    language: Language,
) -> AppResult<ExportRequest> {
    let reports = store.get_reports(&user.id)?;
    let report = reports
        .iter()
        .find(|r| r.id == report_id)
        .cloned()
        .ok_or_else(|| AppError::InvalidInput(format!("report '{report_id}' not found")))?;

    let profile = store.get_profile(&user.id)?;

    Ok(ExportRequest {
        previous_total_hours: previous_total_hours(&reports, report_id),
        report: Some(report),
        profile,
        language,
    })
}

/// Export a stored report and hand the result to `sink`.
pub fn export_by_id<S: InternshipStore, K: ExportSink>(
    store: &mut S,
    sink: &mut K,
    user: &User,
    report_id: &str,
    language: Language,
    format: ExportFormat,
    font: Option<&FontAsset>,
) -> AppResult<PathBuf> {
    let request = request_for(store, user, report_id, language)?;
    let artifact = export_report(&request, format, font)?;
    sink.save(&artifact)
}
