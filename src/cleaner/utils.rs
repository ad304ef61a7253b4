//! Archivos temporales junto al original.

use std::io;
use std::path::Path;
use tempfile::{Builder, NamedTempFile};

/// Caracteres del nombre original que se conservan en el temporal, para no
/// superar el límite de longitud de nombre del sistema de archivos.
const MAX_NAME_CHARS: usize = 32;
const MAX_EXTENSION_CHARS: usize = 16;

/// Crea un archivo temporal oculto en el mismo directorio que `path`, de modo
/// que el renombrado final ocurra dentro del mismo sistema de archivos.
///
/// El archivo se borra al soltarse salvo que se persista.
pub fn temp_file_beside(path: &Path) -> io::Result<NamedTempFile> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let stem: String = path
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy()
        .chars()
        .take(MAX_NAME_CHARS)
        .collect();
    let suffix = path
        .extension()
        .map(|e| {
            let extension: String = e
                .to_string_lossy()
                .chars()
                .take(MAX_EXTENSION_CHARS)
                .collect();
            format!(".{extension}")
        })
        .unwrap_or_default();

    Builder::new()
        .prefix(&format!(".{}_", stem))
        .suffix(&suffix)
        .tempfile_in(parent)
}
