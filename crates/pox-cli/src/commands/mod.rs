//! CLI subcommands and the input handling they share.

pub mod batch;
pub mod config;
pub mod process;

use std::fs;
use std::path::Path;

use tracing::debug;

use pox_core::models::config::{PdfConfig, PoxConfig};

/// Extensions read as already-extracted text.
pub const TEXT_EXTENSIONS: [&str; 2] = ["txt", "text"];

/// Image extensions; these need OCR before pox can read them.
pub const IMAGE_EXTENSIONS: [&str; 7] = ["png", "jpg", "jpeg", "tiff", "tif", "bmp", "webp"];

/// Load configuration from `path`. Without one, the file written by
/// `pox config` is used when present, otherwise the defaults.
pub fn load_config(path: Option<&str>) -> anyhow::Result<PoxConfig> {
    match path {
        Some(path) => Ok(PoxConfig::from_file(Path::new(path))?),
        None => {
            let default_path = config::default_config_path();
            if default_path.exists() {
                debug!("Using configuration from {}", default_path.display());
                Ok(PoxConfig::from_file(&default_path)?)
            } else {
                Ok(PoxConfig::default())
            }
        }
    }
}

/// Lower-cased file extension, or an empty string.
pub fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

/// Whether `path` has an extension pox can read text from.
pub fn is_supported_input(path: &Path) -> bool {
    let extension = extension_of(path);
    extension == "pdf" || TEXT_EXTENSIONS.contains(&extension.as_str())
}

/// Whether `path` is an image that still needs OCR.
pub fn is_image(path: &Path) -> bool {
    IMAGE_EXTENSIONS.contains(&extension_of(path).as_str())
}

/// Read document text from a text file or the text layer of a PDF.
///
/// Failing to obtain any text is an error. Text that yields no line items
/// is not; that is reported as a partial extraction.
pub fn read_document_text(path: &Path, pdf: &PdfConfig) -> anyhow::Result<String> {
    let extension = extension_of(path);

    let text = match extension.as_str() {
        "pdf" => {
            let data = fs::read(path)?;
            let content = pox_core::pdf::read_text(&data, pdf)?;
            debug!("PDF has {} pages", content.page_count);
            content.text
        }
        ext if TEXT_EXTENSIONS.contains(&ext) => fs::read_to_string(path)?,
        ext if IMAGE_EXTENSIONS.contains(&ext) => anyhow::bail!(
            "Image input is not supported: run OCR on {} first and pass the extracted text",
            path.display()
        ),
        _ => anyhow::bail!("Unsupported file format: {}", extension),
    };

    if text.trim().is_empty() {
        anyhow::bail!("No text could be read from {}", path.display());
    }

    Ok(text)
}
