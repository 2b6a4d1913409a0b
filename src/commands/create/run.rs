use url::Url;

use super::*;

pub fn run(args: CreateArgs) -> Result<()> {
    let base_url = normalize_base_url(&args.base_url)?;
    let layout = OutputLayout::new(args.output_root.clone().unwrap_or_default());
    ensure_directory(layout.root())?;

    info!(
        base_url = %base_url,
        subject = %args.subject,
        chapter_prefix = %args.chapter_prefix,
        "starting create"
    );

    if !command_available("tesseract") {
        warn!("tesseract not found on PATH, pdf generation will fail after download");
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;

    let reports = runtime.block_on(download_subject(
        &base_url,
        &args.subject,
        &args.chapter_prefix,
        &layout,
        worker_count(),
    ))?;
    let pages: usize = reports.iter().map(|report| report.pages_downloaded).sum();
    info!(chapters = reports.len(), pages, "download phase complete");

    let engine = TesseractCli::new(&args.ocr_lang);
    let pdf_path = assemble_pdf(&layout, &args.subject, &engine)?;
    info!(path = %pdf_path.display(), "wrote pdf");

    Ok(())
}

pub(super) async fn download_subject(
    base_url: &str,
    subject: &str,
    chapter_prefix: &str,
    layout: &OutputLayout,
    workers: usize,
) -> Result<Vec<ChapterReport>> {
    let manifest = ManifestSink::open(&layout.manifest_path(subject)).await?;
    let fetcher = HttpPageFetcher::new(layout.clone())?;
    let scheduler = BatchScheduler::new(&fetcher, &manifest, base_url, workers);

    let reports = download_chapters(&scheduler, subject, chapter_prefix).await;
    info!(manifest = %manifest.path().display(), "manifest updated");

    Ok(reports)
}

pub(super) fn normalize_base_url(raw: &str) -> Result<String> {
    let parsed = Url::parse(raw).with_context(|| format!("invalid base URL: {raw}"))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        bail!("base URL must use http or https: {raw}");
    }

    let mut base = parsed.to_string();
    if !base.ends_with('/') {
        base.push('/');
    }
    Ok(base)
}
