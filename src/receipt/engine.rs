//! Typst rendering engine.
//!
//! Writes Typst source to a temporary directory, invokes the compiler and
//! returns the output PDF.

use std::fs;
use std::process::Command;
use tempfile::{tempdir, TempDir};

use super::ConvertError;

const SOURCE_FILE: &str = "receipt.typ";
const OUTPUT_FILE: &str = "receipt.pdf";

/// Converts rendered document source into PDF bytes.
pub trait DocumentConverter: Send + Sync {
    fn convert(&self, source: &str) -> Result<Vec<u8>, ConvertError>;
}

/// Converter backed by the `typst` command line compiler.
pub struct TypstConverter {
    binary: String,
}

impl TypstConverter {
    pub fn new(binary: impl Into<String>) -> Self {
        Self { binary: binary.into() }
    }
}

impl Default for TypstConverter {
    fn default() -> Self {
        Self::new("typst")
    }
}

impl DocumentConverter for TypstConverter {
    fn convert(&self, source: &str) -> Result<Vec<u8>, ConvertError> {
        let temp_dir = tempdir().map_err(ConvertError::TempDir)?;
        let typ_path = temp_dir.path().join(SOURCE_FILE);
        fs::write(&typ_path, source).map_err(ConvertError::WriteSource)?;

        compile_typst_to_pdf(&self.binary, &temp_dir, SOURCE_FILE, OUTPUT_FILE)
    }
}

/// Compile a Typst source file to PDF.
fn compile_typst_to_pdf(
    binary: &str,
    temp_dir: &TempDir,
    typ_filename: &str,
    output_filename: &str,
) -> Result<Vec<u8>, ConvertError> {
    let typ_path = temp_dir.path().join(typ_filename);
    let output_path = temp_dir.path().join(output_filename);

    log::debug!("Compiling {} with {}", typ_path.display(), binary);
    let status = Command::new(binary)
        .arg("compile")
        .arg(&typ_path)
        .arg(&output_path)
        .current_dir(temp_dir.path())
        .status()
        .map_err(ConvertError::Spawn)?;

    if !status.success() {
        let code = status.code().unwrap_or(-1);
        return Err(ConvertError::Exit(code));
    }

    fs::read(&output_path).map_err(ConvertError::ReadPdf)
}
