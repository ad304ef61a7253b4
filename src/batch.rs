//! Limpieza secuencial de una lista de imágenes con eventos de progreso.

use std::path::PathBuf;
use tracing::info;

use crate::cleaner::{CleanOutcome, CleanReport, ImageCodec, ImageCrateCodec, clean_image_file_with};
use crate::error::CleanError;

/// Opciones de ejecución del lote.
#[derive(Clone, Copy, Debug, Default)]
pub struct CleanupOptions {
    /// Solo informa de lo que se limpiaría, sin tocar ningún archivo.
    pub dry_run: bool,
}

#[derive(Debug)]
pub enum CleanupEvent {
    Started { total: usize, dry_run: bool },
    Processing { index: usize, total: usize, path: PathBuf },
    WouldClean { path: PathBuf },
    Cleaned { path: PathBuf, report: CleanReport },
    Skipped { path: PathBuf, reason: CleanError },
    Failed { path: PathBuf, error: CleanError },
    Finished { summary: CleanupSummary },
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CleanupSummary {
    pub cleaned: usize,
    pub skipped: usize,
    pub failed: usize,
    /// Archivos que se habrían limpiado en modo simulación.
    pub planned: usize,
}

impl CleanupSummary {
    /// Omitidas y fallidas: todo lo que no quedó limpio.
    pub fn not_cleaned(&self) -> usize {
        self.skipped + self.failed
    }
}

pub fn run_cleanup<F>(files: Vec<PathBuf>, options: CleanupOptions, on_event: F) -> CleanupSummary
where
    F: FnMut(CleanupEvent),
{
    run_cleanup_with(files, options, &ImageCrateCodec, on_event)
}

/// Procesa `files` uno a uno. Los fallos de un archivo nunca detienen el lote.
pub fn run_cleanup_with<C, F>(
    files: Vec<PathBuf>,
    options: CleanupOptions,
    codec: &C,
    mut on_event: F,
) -> CleanupSummary
where
    C: ImageCodec + ?Sized,
    F: FnMut(CleanupEvent),
{
    let total = files.len();
    on_event(CleanupEvent::Started {
        total,
        dry_run: options.dry_run,
    });

    let mut summary = CleanupSummary::default();

    for (index, path) in files.into_iter().enumerate() {
        on_event(CleanupEvent::Processing {
            index: index + 1,
            total,
            path: path.clone(),
        });

        if options.dry_run {
            summary.planned += 1;
            on_event(CleanupEvent::WouldClean { path });
            continue;
        }

        match clean_image_file_with(&path, codec) {
            CleanOutcome::Cleaned(report) => {
                summary.cleaned += 1;
                on_event(CleanupEvent::Cleaned { path, report });
            }
            CleanOutcome::Skipped(reason) => {
                summary.skipped += 1;
                on_event(CleanupEvent::Skipped { path, reason });
            }
            CleanOutcome::Failed(error) => {
                summary.failed += 1;
                on_event(CleanupEvent::Failed { path, error });
            }
        }
    }

    info!(
        cleaned = summary.cleaned,
        skipped = summary.skipped,
        failed = summary.failed,
        planned = summary.planned,
        "lote terminado"
    );
    on_event(CleanupEvent::Finished { summary });
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
    use std::fs;
    use std::io::Cursor;
    use std::path::Path;
    use std::time::SystemTime;
    use tempfile::tempdir;

    fn write_sample(path: &Path, format: ImageFormat) -> Result<(), Box<dyn std::error::Error>> {
        let image = RgbImage::from_pixel(8, 8, Rgb([200, 100, 50]));
        let mut buffer = Cursor::new(Vec::new());
        DynamicImage::ImageRgb8(image).write_to(&mut buffer, format)?;
        let mut data = buffer.into_inner();
        data.extend_from_slice(b"datos ocultos");
        fs::write(path, data)?;
        Ok(())
    }

    fn snapshot(dir: &Path) -> Result<Vec<(PathBuf, Vec<u8>, SystemTime)>, std::io::Error> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            let modified = fs::metadata(&path)?.modified()?;
            entries.push((path.clone(), fs::read(&path)?, modified));
        }
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(entries)
    }

    #[test]
    fn dry_run_reports_every_candidate_without_touching_files()
    -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let files = vec![
            dir.path().join("uno.png"),
            dir.path().join("dos.jpg"),
            dir.path().join("tres.gif"),
        ];
        write_sample(&files[0], ImageFormat::Png)?;
        write_sample(&files[1], ImageFormat::Jpeg)?;
        write_sample(&files[2], ImageFormat::Png)?;

        let before = snapshot(dir.path())?;

        let mut planned = Vec::new();
        let summary = run_cleanup(files.clone(), CleanupOptions { dry_run: true }, |event| {
            if let CleanupEvent::WouldClean { path } = event {
                planned.push(path);
            }
        });

        assert_eq!(planned, files);
        assert_eq!(
            summary,
            CleanupSummary {
                planned: 3,
                ..CleanupSummary::default()
            }
        );
        assert_eq!(snapshot(dir.path())?, before);
        Ok(())
    }

    #[test]
    fn cleanup_emits_progress_and_tallies_outcomes() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let good = dir.path().join("buena.png");
        let bad = dir.path().join("mala.jpg");
        let missing = dir.path().join("perdida.webp");
        write_sample(&good, ImageFormat::Png)?;
        fs::write(&bad, b"no soy un jpeg")?;

        let mut events = Vec::new();
        let summary = run_cleanup(
            vec![good.clone(), bad.clone(), missing.clone()],
            CleanupOptions::default(),
            |event| events.push(event),
        );

        assert_eq!(
            summary,
            CleanupSummary {
                cleaned: 1,
                skipped: 1,
                failed: 1,
                planned: 0,
            }
        );
        assert_eq!(summary.not_cleaned(), 2);

        assert!(matches!(
            events.first(),
            Some(CleanupEvent::Started {
                total: 3,
                dry_run: false
            })
        ));
        assert!(events.iter().any(|event| matches!(
            event,
            CleanupEvent::Processing { index: 2, total: 3, .. }
        )));
        assert!(events.iter().any(
            |event| matches!(event, CleanupEvent::Cleaned { path, .. } if *path == good)
        ));
        assert!(events.iter().any(
            |event| matches!(event, CleanupEvent::Skipped { path, .. } if *path == bad)
        ));
        assert!(events.iter().any(|event| matches!(
            event,
            CleanupEvent::Failed { path, error: CleanError::Read(_) } if *path == missing
        )));
        assert!(matches!(
            events.last(),
            Some(CleanupEvent::Finished { summary: s }) if *s == summary
        ));

        assert_eq!(fs::read(&bad)?, b"no soy un jpeg");
        assert!(!fs::read(&good)?.ends_with(b"datos ocultos"));
        Ok(())
    }
}
