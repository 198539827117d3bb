//! Fixed-page PDF renderer.
//!
//! Lays the document model out on A4 pages at fixed coordinates. Tables are
//! drawn as grids; long cell text wraps inside its column and the entries
//! table continues on a new page (with its header row repeated) when it
//! runs past the bottom margin.

use crate::errors::{AppError, AppResult};
use crate::export::Renderer;
use crate::export::font::{FaceMetrics, FontAsset, glyph_for};
use crate::export::model::DocumentModel;
use pdf_writer::types::{CidFontType, FontFlags, SystemInfo, UnicodeCmap};
use pdf_writer::{Content, Finish, Name, Pdf, Rect, Ref, Str};
use std::collections::BTreeMap;
use textwrap::{Options, WordSeparator};
use ttf_parser::Face;

/// Millimetres to PDF points.
const MM: f32 = 72.0 / 25.4;

/// Entries table column proportions (date, hours, description, signature).
const ENTRY_COLUMNS: [f32; 4] = [30.0, 20.0, 100.0, 30.0];
/// Summary table column proportions (label, value).
const SUMMARY_COLUMNS: [f32; 2] = [120.0, 40.0];

const IDENTITY_SYSTEM_INFO: SystemInfo = SystemInfo {
    registry: Str(b"Adobe"),
    ordering: Str(b"Identity"),
    supplement: 0,
};

#[derive(Clone, Copy, PartialEq)]
enum Align {
    Left,
    Center,
}

/// Font used for every string on the page.
enum PdfFont<'a> {
    /// Built-in Helvetica, WinAnsi encoded. Latin-1 only.
    Helvetica,
    /// Embedded TrueType font addressed by glyph id (Identity-H).
    Embedded {
        asset: &'a FontAsset,
        face: Face<'a>,
        /// glyph id → (first char mapped to it, advance)
        used: BTreeMap<u16, (char, f32)>,
    },
}

impl PdfFont<'_> {
    /// Width of `text` at `size`, in points.
    fn measure(&self, text: &str, size: f32) -> f32 {
        match self {
            // average Helvetica advance is roughly half an em
            PdfFont::Helvetica => text.chars().count() as f32 * size * 0.52,
            PdfFont::Embedded { face, .. } => {
                text.chars().map(|c| glyph_for(face, c).1).sum::<f32>() * size / 1000.0
            }
        }
    }

    /// Encode `text` for a `Tj` operator, recording used glyphs.
    fn encode(&mut self, text: &str) -> Vec<u8> {
        match self {
            PdfFont::Helvetica => text
                .chars()
                .filter(|c| !c.is_control())
                .map(|c| match c as u32 {
                    0x20..=0x7E | 0xA0..=0xFF => c as u8,
                    _ => b'?',
                })
                .collect(),
            PdfFont::Embedded { face, used, .. } => {
                let mut out = Vec::with_capacity(text.len() * 2);
                for c in text.chars().filter(|c| !c.is_control()) {
                    let (gid, advance) = glyph_for(face, c);
                    used.entry(gid).or_insert((c, advance));
                    out.extend_from_slice(&gid.to_be_bytes());
                }
                out
            }
        }
    }
}

pub struct PdfManager<'a> {
    pdf: Pdf,
    catalog_id: Ref,
    pages_id: Ref,
    font_id: Ref,
    page_refs: Vec<Ref>,
    current: Option<(Ref, Content)>,
    next_id: i32,
    font: PdfFont<'a>,

    page_w: f32,
    page_h: f32,
    margin: f32,
    row_h: f32,
    cell_pad: f32,
    line_h: f32,

    /// Distance from the top edge of the next thing to draw.
    cursor: f32,

    font_size: f32,
    info_font_size: f32,
    header_font_size: f32,
    title_font_size: f32,
}

impl<'a> PdfManager<'a> {
    /// The font is resolved here, before any page exists, so no text is
    /// ever drawn with a face that cannot show it.
    pub fn new(asset: Option<&'a FontAsset>) -> AppResult<Self> {
        let font = match asset {
            Some(asset) => PdfFont::Embedded {
                asset,
                face: asset.face()?,
                used: BTreeMap::new(),
            },
            None => PdfFont::Helvetica,
        };

        Ok(Self {
            pdf: Pdf::new(),
            catalog_id: Ref::new(1),
            pages_id: Ref::new(2),
            font_id: Ref::new(3),
            page_refs: Vec::new(),
            current: None,
            next_id: 4,
            font,

            page_w: 595.0,
            page_h: 842.0,
            margin: 15.0 * MM,
            row_h: 20.0,
            cell_pad: 4.0,
            line_h: 12.0,

            cursor: 0.0,

            font_size: 10.0,
            info_font_size: 11.0,
            header_font_size: 12.0,
            title_font_size: 16.0,
        })
    }

    /// Generate a fresh unique Ref.
    fn fresh_ref(&mut self) -> Ref {
        let id = self.next_id;
        self.next_id += 1;
        Ref::new(id)
    }

    fn content_width(&self) -> f32 {
        self.page_w - 2.0 * self.margin
    }

    /// Column widths in points for the given proportions.
    fn columns(&self, proportions: &[f32]) -> Vec<f32> {
        let total: f32 = ENTRY_COLUMNS.iter().sum();
        proportions
            .iter()
            .map(|p| p / total * self.content_width())
            .collect()
    }

    /// Close the current page (if any) and open a new one.
    fn new_page(&mut self) {
        self.finalize_page();

        let page_id = self.fresh_ref();
        let content_id = self.fresh_ref();
        self.page_refs.push(page_id);

        let mut page = self.pdf.page(page_id);
        page.parent(self.pages_id)
            .media_box(Rect::new(0.0, 0.0, self.page_w, self.page_h))
            .contents(content_id);
        page.resources().fonts().pair(Name(b"F1"), self.font_id);
        page.finish();

        self.current = Some((content_id, Content::new()));
        self.cursor = self.margin;
    }

    /// Write the content stream of the current page.
    fn finalize_page(&mut self) {
        if let Some((id, content)) = self.current.take() {
            self.pdf.stream(id, &content.finish());
        }
    }

    /// Start a new page when `height` points do not fit above the margin.
    fn ensure_space(&mut self, height: f32) -> bool {
        if self.cursor + height > self.page_h - self.margin {
            self.new_page();
            return true;
        }
        false
    }

    fn draw_text(&mut self, x: f32, top: f32, size: f32, text: &str) {
        if text.is_empty() {
            return;
        }
        let bytes = self.font.encode(text);
        let y = self.page_h - top;

        if let Some((_, content)) = self.current.as_mut() {
            content.begin_text();
            content.set_font(Name(b"F1"), size);
            content.set_text_matrix([1.0, 0.0, 0.0, 1.0, x, y]);
            content.show(Str(&bytes));
            content.end_text();
        }
    }

    fn draw_centered(&mut self, top: f32, size: f32, text: &str) {
        let w = self.font.measure(text, size);
        let x = ((self.page_w - w) / 2.0).max(self.margin);
        self.draw_text(x, top, size, text);
    }

    fn draw_cell(&mut self, x: f32, top: f32, w: f32, h: f32, fill: Option<f32>) {
        let y = self.page_h - top - h;
        if let Some((_, content)) = self.current.as_mut() {
            content.save_state();
            if let Some(gray) = fill {
                content.set_fill_gray(gray);
                content.rect(x, y, w, h);
                content.fill_nonzero();
            }
            content.set_stroke_gray(0.0);
            content.set_line_width(0.5);
            content.rect(x, y, w, h);
            content.stroke();
            content.restore_state();
        }
    }

    /// Wrap `text` so that every line fits `width` points.
    fn wrap(&self, text: &str, width: f32, size: f32) -> Vec<String> {
        if text.is_empty() {
            return vec![String::new()];
        }

        let mut cols = ((width / (size * 0.5)).floor() as usize).max(1);
        loop {
            let lines: Vec<String> = textwrap::wrap(
                text,
                Options::new(cols)
                    .word_separator(WordSeparator::AsciiSpace)
                    .break_words(true),
            )
                .into_iter()
                .map(|l| l.into_owned())
                .collect();

            let fits = lines.iter().all(|l| self.font.measure(l, size) <= width);
            if fits || cols == 1 {
                return lines;
            }
            cols -= 1;
        }
    }

    /// Draw one table row; returns its height.
    fn draw_row(
        &mut self,
        widths: &[f32],
        cells: &[Vec<String>],
        aligns: &[Align],
        size: f32,
        fill: Option<f32>,
    ) -> f32 {
        let height = self.row_height(cells);
        let top = self.cursor;

        let mut x = self.margin;
        for (i, w) in widths.iter().enumerate() {
            self.draw_cell(x, top, *w, height, fill);

            let cell_lines = cells.get(i).cloned().unwrap_or_default();
            let block = cell_lines.len() as f32 * self.line_h;
            let mut baseline = top + (height - block) / 2.0 + self.line_h * 0.8;

            for line in &cell_lines {
                let tx = match aligns.get(i).copied().unwrap_or(Align::Left) {
                    Align::Left => x + self.cell_pad,
                    Align::Center => x + (w - self.font.measure(line, size)) / 2.0,
                };
                self.draw_text(tx, baseline, size, line);
                baseline += self.line_h;
            }
            x += w;
        }

        self.cursor += height;
        height
    }

    fn wrap_cells(&self, widths: &[f32], texts: &[&str], size: f32) -> Vec<Vec<String>> {
        texts
            .iter()
            .zip(widths)
            .map(|(t, w)| self.wrap(t, w - 2.0 * self.cell_pad, size))
            .collect()
    }

    fn row_height(&self, cells: &[Vec<String>]) -> f32 {
        let lines = cells.iter().map(Vec::len).max().unwrap_or(1) as f32;
        (lines * self.line_h + 2.0 * self.cell_pad).max(self.row_h)
    }

    fn draw_header_block(&mut self, model: &DocumentModel) {
        self.draw_centered(20.0 * MM, self.title_font_size, &model.title.title);
        self.draw_centered(30.0 * MM, self.header_font_size, &model.title.department);
        self.draw_centered(40.0 * MM, self.header_font_size, &model.title.sequence);

        let mut top = 55.0 * MM;
        for field in &model.identity {
            self.draw_text(20.0 * MM, top, self.info_font_size, &field.line());
            top += 8.0 * MM;
        }

        self.cursor = 80.0 * MM;
    }

    fn draw_entries_table(&mut self, model: &DocumentModel) {
        let widths = self.columns(&ENTRY_COLUMNS);
        let aligns = [Align::Center, Align::Center, Align::Left, Align::Left];
        let header_aligns = [Align::Center; 4];

        let headers: Vec<&str> = model.entries.headers.iter().map(String::as_str).collect();
        let header_cells = self.wrap_cells(&widths, &headers, self.font_size);

        self.draw_row(&widths, &header_cells, &header_aligns, self.font_size, Some(0.88));

        let header_h = self.row_height(&header_cells);
        let page_room = self.page_h - 2.0 * self.margin - header_h;

        for row in &model.entries.rows {
            let cells = self.wrap_cells(&widths, &row.cells(), self.font_size);
            let height = self.row_height(&cells);

            if height > page_room {
                self.draw_split_row(&widths, &cells, &aligns, &header_cells);
                continue;
            }

            if self.ensure_space(height) {
                self.draw_row(&widths, &header_cells, &header_aligns, self.font_size, Some(0.88));
            }
            self.draw_row(&widths, &cells, &aligns, self.font_size, None);
        }
    }

    /// Draw a row taller than a page as consecutive pieces, each filling
    /// the room left on its page. Continuation pages repeat the header row.
    fn draw_split_row(
        &mut self,
        widths: &[f32],
        cells: &[Vec<String>],
        aligns: &[Align],
        header_cells: &[Vec<String>],
    ) {
        let total = cells.iter().map(Vec::len).max().unwrap_or(0);
        let mut offset = 0;

        while offset < total {
            let free = self.page_h - self.margin - self.cursor - 2.0 * self.cell_pad;
            let fits = (free / self.line_h).floor().max(0.0) as usize;

            if fits == 0 {
                self.new_page();
                self.draw_row(widths, header_cells, &[Align::Center; 4], self.font_size, Some(0.88));
                continue;
            }

            let end = (offset + fits).min(total);
            let piece: Vec<Vec<String>> = cells
                .iter()
                .map(|lines| {
                    let from = offset.min(lines.len());
                    let to = end.min(lines.len());
                    lines[from..to].to_vec()
                })
                .collect();

            self.draw_row(widths, &piece, aligns, self.font_size, None);
            offset = end;
        }
    }

    fn draw_summary_table(&mut self, model: &DocumentModel) {
        let widths = self.columns(&SUMMARY_COLUMNS);
        let aligns = [Align::Left, Align::Center];

        let rows: Vec<Vec<Vec<String>>> = model
            .summary
            .iter()
            .map(|s| {
                let label: Vec<String> = s
                    .label_lines
                    .iter()
                    .filter(|l| !l.is_empty())
                    .cloned()
                    .collect();
                vec![label, vec![s.value.clone()]]
            })
            .collect();

        let total: f32 = rows.iter().map(|r| self.row_height(r)).sum();
        self.cursor += 10.0 * MM;
        self.ensure_space(total);

        for cells in &rows {
            self.draw_row(&widths, cells, &aligns, self.font_size, None);
        }
    }

    fn draw_signature_block(&mut self, model: &DocumentModel) {
        let block_h = 38.0 * MM + self.line_h;
        self.cursor += 20.0 * MM;
        if self.ensure_space(block_h) {
            self.cursor += 10.0 * MM;
        }

        let top = self.cursor;
        let size = self.info_font_size;
        let sig = &model.signature;

        self.draw_centered(top, size, &sig.certification);
        for (offset, line) in [12.0_f32, 22.0, 30.0, 38.0].iter().zip(sig.lines()) {
            self.draw_centered(top + offset * MM, size, line);
        }
        self.cursor = top + block_h;
    }

    /// Write the font dictionaries referenced by every page.
    fn write_font(&mut self) {
        let font_id = self.font_id;

        let (asset, metrics, used) = match &self.font {
            PdfFont::Helvetica => {
                self.pdf
                    .type1_font(font_id)
                    .base_font(Name(b"Helvetica"))
                    .encoding_predefined(Name(b"WinAnsiEncoding"));
                return;
            }
            PdfFont::Embedded { asset, face, used } => {
                (*asset, FaceMetrics::of(face), used.clone())
            }
        };

        let cid_id = self.fresh_ref();
        let descriptor_id = self.fresh_ref();
        let file_id = self.fresh_ref();
        let cmap_id = self.fresh_ref();
        let base_font = Name(asset.name.as_bytes());

        self.pdf
            .type0_font(font_id)
            .base_font(base_font)
            .encoding_predefined(Name(b"Identity-H"))
            .descendant_font(cid_id)
            .to_unicode(cmap_id);

        let mut cid = self.pdf.cid_font(cid_id);
        cid.subtype(CidFontType::Type2)
            .base_font(base_font)
            .system_info(IDENTITY_SYSTEM_INFO)
            .font_descriptor(descriptor_id)
            .default_width(0.0)
            .cid_to_gid_map_predefined(Name(b"Identity"));
        {
            let mut widths = cid.widths();
            for (gid, (_, advance)) in &used {
                widths.consecutive(*gid, [*advance]);
            }
        }
        cid.finish();

        let [x0, y0, x1, y1] = metrics.bbox;
        self.pdf
            .font_descriptor(descriptor_id)
            .name(base_font)
            .flags(FontFlags::SYMBOLIC)
            .bbox(Rect::new(x0, y0, x1, y1))
            .italic_angle(metrics.italic_angle)
            .ascent(metrics.ascent)
            .descent(metrics.descent)
            .cap_height(metrics.cap_height)
            .stem_v(80.0)
            .font_file2(file_id);

        self.pdf
            .stream(file_id, &asset.data)
            .pair(Name(b"Length1"), asset.data.len() as i32);

        let mut cmap = UnicodeCmap::new(Name(b"Custom"), IDENTITY_SYSTEM_INFO);
        for (gid, (c, _)) in &used {
            cmap.pair(*gid, *c);
        }
        self.pdf.cmap(cmap_id, &cmap.finish());
    }

    /// Lay out the whole document.
    pub fn write_document(&mut self, model: &DocumentModel) {
        self.new_page();
        self.draw_header_block(model);
        self.draw_entries_table(model);
        self.draw_summary_table(model);
        self.draw_signature_block(model);
        self.finalize_page();
    }

    pub fn page_count(&self) -> usize {
        self.page_refs.len()
    }

    /// Finish the document and return the file bytes.
    pub fn finish(mut self) -> Vec<u8> {
        self.finalize_page();
        self.write_font();

        self.pdf.catalog(self.catalog_id).pages(self.pages_id);
        let count = self.page_refs.len() as i32;
        self.pdf
            .pages(self.pages_id)
            .kids(self.page_refs.iter().copied())
            .count(count);

        self.pdf.finish()
    }
}

/// Paginated printable renderer.
pub struct PdfRenderer {
    font: Option<FontAsset>,
}

impl PdfRenderer {
    pub fn new(font: Option<FontAsset>) -> Self {
        Self { font }
    }
}

impl Renderer for PdfRenderer {
    fn render(&self, model: &DocumentModel) -> AppResult<Vec<u8>> {
        match &self.font {
            Some(font) => font.ensure_covers(model.texts())?,
            None if model.needs_unicode_font() => {
                return Err(AppError::FontLoad(format!(
                    "report text in '{}' needs an embedded TrueType font (set font_path or pass --font)",
                    model.language
                )));
            }
            None => {}
        }

        let mut pdf = PdfManager::new(self.font.as_ref())?;
        pdf.write_document(model);
        Ok(pdf.finish())
    }

    fn mime(&self) -> &'static str {
        "application/pdf"
    }

    fn extension(&self) -> &'static str {
        "pdf"
    }
}
