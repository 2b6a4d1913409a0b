use futures::future::join_all;

use super::*;

pub(super) const MAX_WORKERS: usize = 32;
const FALLBACK_WORKERS: usize = 8;

pub(super) fn worker_count() -> usize {
    std::thread::available_parallelism()
        .map(|count| count.get())
        .unwrap_or(FALLBACK_WORKERS)
        .clamp(1, MAX_WORKERS)
}

pub(super) struct BatchScheduler<'a, F> {
    fetcher: &'a F,
    manifest: &'a ManifestSink,
    base_url: &'a str,
    workers: usize,
}

impl<'a, F: PageFetcher> BatchScheduler<'a, F> {
    /// `base_url` must end with `/`.
    pub(super) fn new(
        fetcher: &'a F,
        manifest: &'a ManifestSink,
        base_url: &'a str,
        workers: usize,
    ) -> Self {
        Self {
            fetcher,
            manifest,
            base_url,
            workers: workers.max(1),
        }
    }

    pub(super) fn workers(&self) -> usize {
        self.workers
    }

    pub(super) async fn download_chapter(&self, subject: &str, chapter: &Chapter) -> ChapterReport {
        let chapter_url = format!("{}{}/{}/", self.base_url, subject, chapter.name);
        let mut report = ChapterReport {
            chapter: chapter.name.clone(),
            batches_dispatched: 0,
            pages_downloaded: 0,
            stop: ChapterStop::RangeExhausted,
        };

        for batch in page_batches(MAX_PAGE, self.workers) {
            let tasks: Vec<DownloadTask> = batch
                .pages
                .iter()
                .map(|&page| DownloadTask::for_page(&chapter_url, page, subject, &chapter.name))
                .collect();

            let outcomes = join_all(
                tasks
                    .iter()
                    .map(|task| self.fetcher.fetch(task, self.manifest)),
            )
            .await;
            report.batches_dispatched += 1;

            let downloaded = outcomes.iter().filter(|outcome| outcome.is_success()).count();
            report.pages_downloaded += downloaded;

            let failed_pages = outcomes.len() - downloaded;
            if failed_pages > 0 {
                report.stop = ChapterStop::BatchFailed {
                    first_page: batch.pages.first().copied().unwrap_or_default(),
                    failed_pages,
                };
                break;
            }
        }

        report
    }
}
