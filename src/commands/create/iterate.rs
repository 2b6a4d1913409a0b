use super::*;

pub(super) async fn download_chapters<F: PageFetcher>(
    scheduler: &BatchScheduler<'_, F>,
    subject: &str,
    prefix: &str,
) -> Vec<ChapterReport> {
    let mut reports = Vec::new();

    for chapter in chapters(prefix) {
        info!(
            chapter = %chapter,
            workers = scheduler.workers(),
            "downloading chapter"
        );

        let report = scheduler.download_chapter(subject, &chapter).await;

        match report.stop {
            ChapterStop::RangeExhausted => info!(
                chapter = %report.chapter,
                pages = report.pages_downloaded,
                batches = report.batches_dispatched,
                "finished downloading chapter, page range exhausted"
            ),
            ChapterStop::BatchFailed {
                first_page,
                failed_pages,
            } => info!(
                chapter = %report.chapter,
                pages = report.pages_downloaded,
                batches = report.batches_dispatched,
                last_batch_start = first_page,
                failed_pages,
                "finished downloading chapter"
            ),
        }

        reports.push(report);
    }

    reports
}
