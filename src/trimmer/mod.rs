//! Recorte de datos añadidos después del marcador de fin de cada formato.
//!
//! Cada formato solo sabe localizar el desplazamiento donde termina su flujo
//! válido. La decisión de recortar se toma en un único punto: si no hay
//! desplazamiento o este cae fuera del buffer, se devuelve la entrada intacta.

mod gif;
mod jpeg;
mod png;
mod webp;

use std::path::Path;

/// Formato declarado a priori a partir de la extensión del archivo.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormatTag {
    Jpeg,
    Png,
    Gif,
    Webp,
    Other,
}

impl FormatTag {
    /// Interpreta una extensión con o sin punto inicial, sin distinguir mayúsculas.
    pub fn from_extension(extension: &str) -> Self {
        let extension = extension.trim_start_matches('.').to_ascii_lowercase();

        match extension.as_str() {
            "jpg" | "jpeg" => FormatTag::Jpeg,
            "png" => FormatTag::Png,
            "gif" => FormatTag::Gif,
            "webp" => FormatTag::Webp,
            _ => FormatTag::Other,
        }
    }

    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|e| e.to_str())
            .map(Self::from_extension)
            .unwrap_or(FormatTag::Other)
    }

    fn locate_end(self, data: &[u8]) -> Option<usize> {
        match self {
            FormatTag::Jpeg => jpeg::locate_end(data),
            FormatTag::Png => png::locate_end(data),
            FormatTag::Gif => gif::locate_end(data),
            FormatTag::Webp => webp::locate_end(data),
            // TIFF y RAW dependen solo de la recodificación.
            FormatTag::Other => None,
        }
    }
}

/// Devuelve el prefijo de `data` que constituye la imagen según `extension`.
pub fn trim_image_data<'a>(data: &'a [u8], extension: &str) -> &'a [u8] {
    trim_with_tag(data, FormatTag::from_extension(extension))
}

pub fn trim_with_tag(data: &[u8], tag: FormatTag) -> &[u8] {
    match tag.locate_end(data) {
        Some(end) if end <= data.len() => &data[..end],
        _ => data,
    }
}

/// Última aparición de `needle` en `haystack`.
fn rfind(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() || haystack.len() < needle.len() {
        return None;
    }
    haystack
        .windows(needle.len())
        .rposition(|window| window == needle)
}
