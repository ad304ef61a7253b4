//! Verificación de que una imagen recodificada no conserva campos EXIF.

use image::ImageFormat;
use std::io::Cursor;

/// Comprueba que `data` carece de campos EXIF residuales.
///
/// Solo se inspeccionan JPEG, PNG y WebP, donde EXIF vive en un bloque
/// propio. En TIFF el lector interpretaría el IFD de la propia imagen como
/// EXIF, y GIF no tiene contenedor EXIF.
pub fn verify_metadata_clean(data: &[u8], format: ImageFormat) -> Result<bool, String> {
    if !matches!(
        format,
        ImageFormat::Jpeg | ImageFormat::Png | ImageFormat::WebP
    ) {
        return Ok(true);
    }

    match exif::Reader::new().read_from_container(&mut Cursor::new(data)) {
        Ok(exif) => Ok(exif.fields().next().is_none()),
        Err(exif::Error::NotFound(_)) => Ok(true),
        Err(error) => Err(format!(
            "no se pudo inspeccionar el EXIF de la imagen recodificada: {error}"
        )),
    }
}
