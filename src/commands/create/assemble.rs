use std::fs;
use std::process::Command;

use super::*;

pub(super) trait OcrEngine {
    fn render_pdf(&self, image_list: &Path) -> Result<Vec<u8>>;
}

pub(super) struct TesseractCli {
    lang: String,
}

impl TesseractCli {
    pub(super) fn new(lang: &str) -> Self {
        Self {
            lang: lang.to_string(),
        }
    }
}

impl OcrEngine for TesseractCli {
    fn render_pdf(&self, image_list: &Path) -> Result<Vec<u8>> {
        let output = Command::new("tesseract")
            .arg(image_list)
            .arg("stdout")
            .arg("-l")
            .arg(&self.lang)
            .arg("pdf")
            .output()
            .with_context(|| format!("failed to execute tesseract for {}", image_list.display()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            bail!(
                "tesseract returned non-zero exit status for {}: {}",
                image_list.display(),
                stderr.trim()
            );
        }

        Ok(output.stdout)
    }
}

pub(super) fn assemble_pdf(
    layout: &OutputLayout,
    subject: &str,
    engine: &dyn OcrEngine,
) -> Result<PathBuf> {
    let manifest_path = layout.manifest_path(subject);
    let sorted_path = layout.sorted_manifest_path(subject);

    let page_count = write_sorted_manifest(&manifest_path, &sorted_path)?;
    if page_count == 0 {
        bail!(
            "no pages listed in {}, nothing to convert",
            manifest_path.display()
        );
    }
    info!(
        pages = page_count,
        manifest = %sorted_path.display(),
        "generating pdf output"
    );

    let pdf = engine.render_pdf(&sorted_path)?;
    if pdf.is_empty() {
        bail!("OCR produced an empty document for {}", sorted_path.display());
    }

    let pdf_path = layout.pdf_path(subject);
    fs::write(&pdf_path, &pdf)
        .with_context(|| format!("failed to write pdf: {}", pdf_path.display()))?;

    Ok(pdf_path)
}
