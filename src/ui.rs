use console::style;
use std::io::{self, Write};
use std::path::Path;

use crate::batch::{CleanupEvent, CleanupSummary};
use crate::directory::ScanSummary;
use crate::formatting::format_size;

const HEADER_WIDTH: usize = 74;

pub fn render_header() {
    let border = "─".repeat(HEADER_WIDTH - 2);
    println!("\n{}", style(format!("┌{}┐", border)).cyan());
    println!(
        "{}",
        style(format!(
            "│ {:^inner_width$} │",
            "▸ cleanphotos · Limpieza de metadata y datos ocultos ◂",
            inner_width = HEADER_WIDTH - 4
        ))
        .cyan()
        .bold()
    );
    println!("{}\n", style(format!("└{}┘", border)).cyan());
}

pub fn render_overwrite_warning() {
    println!(
        "{}",
        style("│ Los archivos originales se sobrescriben. Conserva una copia de lo que no quieras perder.")
            .yellow()
            .dim()
    );
    println!();
}

/// Pide la carpeta por entrada estándar. `None` si la entrada terminó.
pub fn prompt_for_folder() -> io::Result<Option<String>> {
    print!(
        "{} {} ",
        style("Carpeta con tus fotos").bold().cyan(),
        style("›").cyan()
    );
    io::stdout().flush()?;

    let mut buffer = String::new();
    let bytes_read = io::stdin().read_line(&mut buffer)?;
    if bytes_read == 0 {
        return Ok(None);
    }

    Ok(Some(buffer.trim().to_string()))
}

pub fn render_scan_summary(root: &Path, summary: &ScanSummary) {
    println!(
        "\n{}",
        style(format!(
            "┌─ {} imagen(es) encontrada(s) en {}",
            summary.total_files,
            root.display()
        ))
        .cyan()
    );
    for (extension, count) in &summary.extension_counts {
        println!("{}", style(format!("│   .{:<6} {}", extension, count)).cyan().dim());
    }
    println!("{}\n", style("└─").cyan());
}

pub fn render_no_files(root: &Path) {
    println!(
        "{}",
        style(format!(
            "│ No se encontraron imágenes en {}",
            root.display()
        ))
        .dim()
    );
}

/// Línea a mostrar para un evento del lote, si corresponde.
///
/// Los fallos y las omisiones se muestran siempre; el resto solo en modo
/// detallado, salvo las líneas de simulación.
pub fn event_line(event: &CleanupEvent, verbose: bool) -> Option<String> {
    match event {
        CleanupEvent::Processing { index, total, path } if verbose => Some(
            style(format!("│ [{index}/{total}] Procesando: {}", path.display()))
                .dim()
                .to_string(),
        ),
        CleanupEvent::WouldClean { path } => Some(
            style(format!("│ [SIMULACIÓN] Se limpiaría: {}", path.display()))
                .cyan()
                .to_string(),
        ),
        CleanupEvent::Cleaned { path, report } if verbose => {
            let mut line = format!(
                "│ Limpia: {} ({} → {})",
                path.display(),
                format_size(report.original_len as u64),
                format_size(report.final_len as u64)
            );
            if report.trailing_bytes_removed() > 0 {
                line.push_str(&format!(
                    ", {} bytes ocultos descartados",
                    report.trailing_bytes_removed()
                ));
            }
            Some(style(line).green().to_string())
        }
        CleanupEvent::Skipped { path, reason } => Some(
            style(format!("│ Omitida {}: {}", path.display(), reason))
                .yellow()
                .to_string(),
        ),
        CleanupEvent::Failed { path, error } => Some(
            style(format!("│ Error en {}: {}", path.display(), error))
                .red()
                .to_string(),
        ),
        _ => None,
    }
}

pub fn render_cleanup_summary(summary: &CleanupSummary, dry_run: bool) {
    println!("\n{}", style("┌─ Resumen ─").cyan());

    if dry_run {
        println!(
            "{}",
            style(format!("│ Imágenes que se limpiarían : {}", summary.planned)).cyan()
        );
        println!("{}", style("└─").cyan());
        println!(
            "\n{}",
            style("│ Esto fue una simulación. No se modificó ningún archivo.").yellow()
        );
        return;
    }

    println!(
        "{}",
        style(format!("│ Imágenes limpiadas        : {}", summary.cleaned)).green()
    );
    if summary.not_cleaned() > 0 {
        println!(
            "{}",
            style(format!(
                "│ No se pudieron limpiar    : {} ({} omitidas)",
                summary.not_cleaned(),
                summary.skipped
            ))
            .red()
        );
    } else {
        println!("{}", style("│ Sin errores.").green());
    }
    println!("{}", style("└─").cyan());
}
