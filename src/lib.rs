//! Limpieza de imágenes: elimina metadata (EXIF, IPTC, XMP) y cualquier dato
//! añadido después del marcador de fin de cada formato, sobrescribiendo el
//! original de forma atómica.

pub mod batch;
pub mod cleaner;
pub mod directory;
pub mod error;
pub mod formatting;
pub mod trimmer;
pub mod ui;

pub use batch::{CleanupEvent, CleanupOptions, CleanupSummary, run_cleanup};
pub use cleaner::{CleanOutcome, CleanReport, clean_image_file};
pub use directory::{ScanOptions, collect_image_files};
pub use error::{CleanError, ScanError};
pub use trimmer::{FormatTag, trim_image_data};
