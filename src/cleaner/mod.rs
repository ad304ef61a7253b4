//! Limpieza de un único archivo: leer, recortar, decodificar, recodificar y
//! reemplazar el original de forma atómica.

mod codec;
mod utils;
mod verify;

pub use codec::{Decoded, ImageCodec, ImageCrateCodec, JPEG_QUALITY};
pub use verify::verify_metadata_clean;

use image::ImageFormat;
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use crate::error::{CleanError, CodecError};
use crate::trimmer::{FormatTag, trim_with_tag};
use utils::temp_file_beside;

/// Datos de una limpieza completada.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CleanReport {
    pub original_len: usize,
    pub trimmed_len: usize,
    pub final_len: usize,
    pub format: ImageFormat,
}

impl CleanReport {
    pub fn trailing_bytes_removed(&self) -> usize {
        self.original_len - self.trimmed_len
    }
}

/// Resultado de procesar un archivo.
#[derive(Debug)]
pub enum CleanOutcome {
    Cleaned(CleanReport),
    Skipped(CleanError),
    Failed(CleanError),
}

impl CleanOutcome {
    pub fn is_cleaned(&self) -> bool {
        matches!(self, CleanOutcome::Cleaned(_))
    }
}

impl From<Result<CleanReport, CleanError>> for CleanOutcome {
    fn from(result: Result<CleanReport, CleanError>) -> Self {
        match result {
            Ok(report) => CleanOutcome::Cleaned(report),
            Err(CleanError::Unidentifiable) => CleanOutcome::Skipped(CleanError::Unidentifiable),
            Err(error) => CleanOutcome::Failed(error),
        }
    }
}

/// Limpia `path` con el códec por defecto.
pub fn clean_image_file(path: &Path) -> CleanOutcome {
    clean_image_file_with(path, &ImageCrateCodec)
}

/// Limpia `path` con el códec indicado.
///
/// El original queda reemplazado por completo o intacto: la imagen se escribe
/// en un temporal del mismo directorio que solo se renombra sobre el original
/// al final, y que se borra en cualquier otra salida.
pub fn clean_image_file_with<C: ImageCodec + ?Sized>(path: &Path, codec: &C) -> CleanOutcome {
    let outcome = CleanOutcome::from(try_clean(path, codec));

    match &outcome {
        CleanOutcome::Cleaned(report) => info!(
            path = %path.display(),
            format = ?report.format,
            trailing_bytes = report.trailing_bytes_removed(),
            "imagen limpiada"
        ),
        CleanOutcome::Skipped(reason) => {
            warn!(path = %path.display(), reason = reason.kind(), "imagen omitida: {reason}")
        }
        CleanOutcome::Failed(error) => {
            warn!(path = %path.display(), reason = error.kind(), "fallo al limpiar: {error}")
        }
    }

    outcome
}

fn try_clean<C: ImageCodec + ?Sized>(path: &Path, codec: &C) -> Result<CleanReport, CleanError> {
    let raw = fs::read(path).map_err(CleanError::Read)?;

    let trimmed = trim_with_tag(&raw, FormatTag::from_path(path));
    if trimmed.len() < raw.len() {
        debug!(
            path = %path.display(),
            removed = raw.len() - trimmed.len(),
            "datos finales descartados"
        );
    }

    let decoded = codec.decode(trimmed).map_err(|error| match error {
        CodecError::Unidentifiable => CleanError::Unidentifiable,
        other => CleanError::Decode(other.to_string()),
    })?;

    let format = output_format(decoded.format, path);
    debug!(path = %path.display(), format = ?format, "recodificando");

    let mut temp = temp_file_beside(path).map_err(|e| CleanError::Save(e.to_string()))?;

    let encoded = codec
        .encode(&decoded.image, format)
        .map_err(|e| CleanError::Save(e.to_string()))?;

    if !verify_metadata_clean(&encoded, format).map_err(CleanError::Verify)? {
        return Err(CleanError::Verify(
            "la imagen recodificada conserva campos EXIF".to_string(),
        ));
    }

    temp.write_all(&encoded)
        .and_then(|()| temp.as_file().sync_all())
        .map_err(|e| CleanError::Save(e.to_string()))?;

    replace_original(temp, path)?;

    Ok(CleanReport {
        original_len: raw.len(),
        trimmed_len: trimmed.len(),
        final_len: encoded.len(),
        format,
    })
}

/// Copia los permisos del original y renombra el temporal encima de él.
fn replace_original(temp: NamedTempFile, path: &Path) -> Result<(), CleanError> {
    let permissions = fs::metadata(path).map_err(CleanError::Replace)?.permissions();
    fs::set_permissions(temp.path(), permissions).map_err(CleanError::Replace)?;

    // Si falla, el temporal viaja dentro del error y se borra al soltarse.
    temp.persist(path)
        .map_err(|error| CleanError::Replace(error.error))?;

    Ok(())
}

/// Formato de salida: el detectado por el códec o, en su defecto, el que
/// sugiere la extensión. PNG si la extensión no se reconoce.
pub fn output_format(detected: Option<ImageFormat>, path: &Path) -> ImageFormat {
    detected.unwrap_or_else(|| format_from_extension(path))
}

fn format_from_extension(path: &Path) -> ImageFormat {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match extension.as_str() {
        "jpg" | "jpeg" => ImageFormat::Jpeg,
        "png" => ImageFormat::Png,
        "gif" => ImageFormat::Gif,
        "tif" | "tiff" => ImageFormat::Tiff,
        "webp" => ImageFormat::WebP,
        _ => ImageFormat::Png,
    }
}
