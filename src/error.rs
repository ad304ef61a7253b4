//! Errores de la limpieza por archivo y del escaneo del directorio raíz.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Fallo de un paso de limpieza. Nunca se propaga más allá del archivo.
#[derive(Debug, Error)]
pub enum CleanError {
    #[error("no se pudo leer el archivo: {0}")]
    Read(#[source] io::Error),

    #[error("el contenido no es una imagen reconocible")]
    Unidentifiable,

    #[error("no se pudo decodificar la imagen: {0}")]
    Decode(String),

    #[error("no se pudo guardar la imagen limpia: {0}")]
    Save(String),

    #[error("la verificación de metadata falló: {0}")]
    Verify(String),

    #[error("no se pudo reemplazar el archivo original: {0}")]
    Replace(#[source] io::Error),
}

impl CleanError {
    /// Etiqueta corta usada en el resumen y en los logs.
    pub fn kind(&self) -> &'static str {
        match self {
            CleanError::Read(_) => "read error",
            CleanError::Unidentifiable => "unidentifiable",
            CleanError::Decode(_) => "decode error",
            CleanError::Save(_) => "save error",
            CleanError::Verify(_) => "verify error",
            CleanError::Replace(_) => "replace error",
        }
    }
}

/// Único error fatal para toda la ejecución: la raíz no es un directorio legible.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("la ruta '{}' no es un directorio legible", .0.display())]
    NotADirectory(PathBuf),

    #[error("no se pudo leer el directorio '{}': {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Errores del códec externo de imágenes.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("formato de imagen no reconocido")]
    Unidentifiable,

    #[error("{0}")]
    Decode(String),

    #[error("{0}")]
    Encode(String),
}
