//! Renderer-agnostic description of an exported report.
//!
//! Both renderers consume exactly this structure, so the PDF and the DOCX
//! always carry the same text.

use crate::core::hours::{format_hours, report_total};
use crate::errors::{AppError, AppResult};
use crate::export::locale::{format_date, labels};
use crate::models::{Language, Profile, Report};
use serde::Serialize;

/// The entries table never has fewer body rows than this.
pub const MIN_TABLE_ROWS: usize = 15;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentModel {
    pub language: Language,
    pub report_id: String,
    pub title: TitleBlock,
    pub identity: Vec<LabeledField>,
    pub entries: EntriesTable,
    pub summary: Vec<SummaryRow>,
    pub signature: SignatureBlock,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TitleBlock {
    pub title: String,
    pub department: String,
    pub sequence: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabeledField {
    pub label: String,
    pub value: String,
}

impl LabeledField {
    pub fn line(&self) -> String {
        format!("{}: {}", self.label, self.value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntriesTable {
    pub headers: [String; 4],
    pub rows: Vec<EntryRow>,
}

impl EntriesTable {
    pub fn real_rows(&self) -> usize {
        self.rows.iter().filter(|r| !r.padding).count()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntryRow {
    pub date: String,
    pub hours: String,
    pub description: String,
    pub signature: String,
    pub padding: bool,
}

impl EntryRow {
    fn blank() -> Self {
        Self {
            date: String::new(),
            hours: String::new(),
            description: String::new(),
            signature: String::new(),
            padding: true,
        }
    }

    pub fn cells(&self) -> [&str; 4] {
        [&self.date, &self.hours, &self.description, &self.signature]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    /// Label split over two lines, as laid out in the summary table.
    pub label_lines: [String; 2],
    pub label: String,
    pub hours: f64,
    pub value: String,
}

impl SummaryRow {
    fn new(lines: [&str; 2], language: Language, hours: f64) -> Self {
        let joiner = language.pick("", " ");
        Self {
            label: format!("{}{}{}", lines[0], joiner, lines[1]),
            label_lines: [lines[0].to_string(), lines[1].to_string()],
            hours,
            value: format_hours(hours),
        }
    }

    pub fn line(&self) -> String {
        format!("{}: {}", self.label, self.value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignatureBlock {
    pub certification: String,
    pub signature_line: String,
    pub supervisor_name: String,
    pub supervisor_position: String,
    pub date_line: String,
}

impl SignatureBlock {
    pub fn lines(&self) -> [&str; 4] {
        [
            &self.signature_line,
            &self.supervisor_name,
            &self.supervisor_position,
            &self.date_line,
        ]
    }
}

impl DocumentModel {
    /// Every piece of text the renderers will draw.
    pub fn texts(&self) -> Vec<&str> {
        let mut out: Vec<&str> = vec![
            self.title.title.as_str(),
            self.title.department.as_str(),
            self.title.sequence.as_str(),
        ];

        for f in &self.identity {
            out.push(&f.label);
            out.push(&f.value);
        }

        out.extend(self.entries.headers.iter().map(String::as_str));
        for row in &self.entries.rows {
            out.extend(row.cells());
        }

        for s in &self.summary {
            out.extend(s.label_lines.iter().map(String::as_str));
            out.push(&s.value);
        }

        out.push(&self.signature.certification);
        out.extend(self.signature.lines());
        out
    }

    /// True when some text falls outside Latin-1 and therefore cannot be
    /// drawn with a built-in PDF font.
    pub fn needs_unicode_font(&self) -> bool {
        self.texts()
            .iter()
            .any(|t| t.chars().any(|c| c as u32 > 0xFF))
    }
}

/// Build the document model for one report.
///
/// Fails with `InvalidInput` when the report or the profile is missing.
pub fn build_document_model(
    report: Option<&Report>,
    profile: Option<&Profile>,
    language: Language,
    previous_total_hours: f64,
) -> AppResult<DocumentModel> {
    let report = report.ok_or_else(|| AppError::InvalidInput("no report to export".into()))?;
    let profile = profile.ok_or_else(|| AppError::InvalidInput("no profile available".into()))?;

    let l = labels(language);

    let title = TitleBlock {
        title: l.title.to_string(),
        department: profile.department.clone(),
        sequence: format!("{} {}", l.sequence_prefix, report.id),
    };

    let identity = vec![
        LabeledField {
            label: l.name.to_string(),
            value: profile.full_name(),
        },
        LabeledField {
            label: l.student_id.to_string(),
            value: profile.student_id.clone(),
        },
        LabeledField {
            label: l.institution.to_string(),
            value: profile.company_name.clone(),
        },
    ];

    let mut rows: Vec<EntryRow> = report
        .entries
        .iter()
        .map(|e| EntryRow {
            date: format_date(&e.date, language),
            hours: e.hours.trim().to_string(),
            description: e.description.clone(),
            signature: String::new(),
            padding: false,
        })
        .collect();

    while rows.len() < MIN_TABLE_ROWS {
        rows.push(EntryRow::blank());
    }

    let entries = EntriesTable {
        headers: [
            l.column_date.to_string(),
            l.column_hours.to_string(),
            l.column_description.to_string(),
            l.column_signature.to_string(),
        ],
        rows,
    };

    let this_report = report_total(&report.entries);
    let summary = vec![
        SummaryRow::new(l.this_report, language, this_report),
        SummaryRow::new(l.previous_reports, language, previous_total_hours),
        SummaryRow::new(
            l.current_total,
            language,
            this_report + previous_total_hours,
        ),
    ];

    let signature = SignatureBlock {
        certification: l.certification.to_string(),
        signature_line: l.supervisor_signature.to_string(),
        supervisor_name: format!("({})", profile.supervisor_name),
        supervisor_position: format!(
            "{} {}",
            l.supervisor_title_prefix, profile.supervisor_position
        ),
        date_line: l.date_line.to_string(),
    };

    Ok(DocumentModel {
        language,
        report_id: report.id.clone(),
        title,
        identity,
        entries,
        summary,
        signature,
    })
}
