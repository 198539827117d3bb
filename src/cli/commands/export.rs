use crate::cli::commands::open_session;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::export::export_by_id;
use crate::errors::AppResult;
use crate::export::{DirectorySink, ExportFormat, FontAsset, notify_export_success};
use crate::utils::path::expand_tilde;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        report,
        format,
        lang,
        out,
        font,
        force,
    } = cmd
    {
        let language = lang.unwrap_or(cfg.language);
        let out_dir = out
            .as_deref()
            .map(expand_tilde)
            .unwrap_or_else(|| cfg.output_path());

        // the font is read once, before anything is rendered
        let font_path = font.as_deref().map(expand_tilde).or_else(|| cfg.font_file());
        let asset = match (format, font_path) {
            (ExportFormat::Pdf, Some(path)) => Some(FontAsset::load(&path)?),
            _ => None,
        };

        let (mut store, user) = open_session(cfg)?;
        let mut sink = DirectorySink::new(out_dir, *force);

        let path = export_by_id(
            &mut store,
            &mut sink,
            &user,
            report,
            language,
            *format,
            asset.as_ref(),
        )?;

        notify_export_success(format.label(), &path);
    }

    Ok(())
}
