//! Selección de las imágenes candidatas dentro de un directorio.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::error::ScanError;

pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "tif", "tiff", "webp"];

/// Opciones del recorrido.
#[derive(Clone, Copy, Debug)]
pub struct ScanOptions {
    pub recursive: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self { recursive: true }
    }
}

pub fn is_supported_image(path: &Path) -> bool {
    let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
        return false;
    };
    IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str())
}

/// Convierte la ruta escrita por el usuario en un directorio absoluto.
///
/// Expande `~` y resuelve enlaces. Falla si el resultado no es un directorio;
/// una entrada vacía también falla en vez de apuntar al directorio actual.
pub fn resolve_root(input: &str) -> Result<PathBuf, ScanError> {
    let expanded = expand_home(input.trim());
    let resolved = fs::canonicalize(&expanded).unwrap_or(expanded);

    if !resolved.is_dir() {
        return Err(ScanError::NotADirectory(resolved));
    }

    Ok(resolved)
}

fn expand_home(input: &str) -> PathBuf {
    if input == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    } else if let Some(rest) = input.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }

    PathBuf::from(input)
}

/// Recoge, ordenados, los archivos con extensión de imagen bajo `root`.
///
/// Solo es fatal que la raíz no pueda leerse. Los subdirectorios ilegibles
/// se registran y se omiten. Los enlaces simbólicos no se siguen.
pub fn collect_image_files(root: &Path, options: ScanOptions) -> Result<Vec<PathBuf>, ScanError> {
    if !root.is_dir() {
        return Err(ScanError::NotADirectory(root.to_path_buf()));
    }

    fs::read_dir(root).map_err(|source| ScanError::Unreadable {
        path: root.to_path_buf(),
        source,
    })?;

    let max_depth = if options.recursive { usize::MAX } else { 1 };

    let files: Vec<PathBuf> = WalkDir::new(root)
        .follow_links(false)
        .max_depth(max_depth)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(error) => {
                warn!("entrada omitida durante el recorrido: {error}");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file() && is_supported_image(entry.path()))
        .map(|entry| entry.into_path())
        .collect();

    debug!(root = %root.display(), count = files.len(), "candidatas encontradas");
    Ok(files)
}

/// Recuento de candidatas por extensión.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScanSummary {
    pub total_files: usize,
    pub extension_counts: Vec<(String, usize)>,
}

impl ScanSummary {
    pub fn from_files(files: &[PathBuf]) -> Self {
        let mut counts: BTreeMap<String, usize> = BTreeMap::new();
        for path in files {
            let key = path
                .extension()
                .and_then(|e| e.to_str())
                .map(|e| e.to_lowercase())
                .unwrap_or_default();
            *counts.entry(key).or_insert(0) += 1;
        }

        let mut extension_counts: Vec<_> = counts.into_iter().collect();
        extension_counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        Self {
            total_files: files.len(),
            extension_counts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn touch(path: &Path) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, b"x")
    }

    #[test]
    fn collects_only_image_extensions_recursively() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let root = dir.path();
        for name in [
            "a.jpg",
            "b.JPEG",
            "notas.txt",
            "sub/c.png",
            "sub/d.gif",
            "sub/deep/e.TIFF",
            "sub/deep/f.tif",
            "sub/deep/g.webp",
            "sub/deep/h.bmp",
            "sin_extension",
        ] {
            touch(&root.join(name))?;
        }

        let files = collect_image_files(root, ScanOptions::default())?;
        let names: Vec<String> = files
            .iter()
            .filter_map(|p| p.strip_prefix(root).ok())
            .map(|p| p.to_string_lossy().replace('\\', "/"))
            .collect();

        assert_eq!(
            names,
            vec![
                "a.jpg",
                "b.JPEG",
                "sub/c.png",
                "sub/d.gif",
                "sub/deep/e.TIFF",
                "sub/deep/f.tif",
                "sub/deep/g.webp",
            ]
        );
        Ok(())
    }

    #[test]
    fn non_recursive_scan_stays_at_top_level() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        touch(&dir.path().join("arriba.png"))?;
        touch(&dir.path().join("sub/abajo.png"))?;

        let files = collect_image_files(dir.path(), ScanOptions { recursive: false })?;
        assert_eq!(files, vec![dir.path().join("arriba.png")]);
        Ok(())
    }

    #[test]
    fn root_must_be_a_directory() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let file = dir.path().join("foto.jpg");
        touch(&file)?;

        assert!(matches!(
            collect_image_files(&file, ScanOptions::default()),
            Err(ScanError::NotADirectory(_))
        ));
        assert!(matches!(
            collect_image_files(&dir.path().join("no_existe"), ScanOptions::default()),
            Err(ScanError::NotADirectory(_))
        ));
        assert!(matches!(
            resolve_root(&file.to_string_lossy()),
            Err(ScanError::NotADirectory(_))
        ));
        Ok(())
    }

    #[test]
    fn empty_input_is_not_the_current_directory() {
        assert!(matches!(resolve_root(""), Err(ScanError::NotADirectory(_))));
        assert!(matches!(resolve_root("   "), Err(ScanError::NotADirectory(_))));
    }

    #[test]
    fn resolve_root_canonicalizes_directories() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let input = format!("  {}  ", dir.path().display());
        assert_eq!(resolve_root(&input)?, fs::canonicalize(dir.path())?);
        Ok(())
    }

    #[test]
    fn expand_home_handles_tilde_prefix() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_home("~"), home);
            assert_eq!(expand_home("~/Fotos"), home.join("Fotos"));
        }
        assert_eq!(expand_home("/tmp/~fotos"), PathBuf::from("/tmp/~fotos"));
    }

    #[test]
    fn summary_counts_extensions_case_insensitively() {
        let files = vec![
            PathBuf::from("a.JPG"),
            PathBuf::from("b.jpg"),
            PathBuf::from("c.png"),
        ];
        let summary = ScanSummary::from_files(&files);
        assert_eq!(summary.total_files, 3);
        assert_eq!(
            summary.extension_counts,
            vec![("jpg".to_string(), 2), ("png".to_string(), 1)]
        );
    }
}
