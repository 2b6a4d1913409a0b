use std::fmt;
use std::path::{Path, PathBuf};

pub const CHAPTER_COUNT: u32 = 19;

pub const MAX_PAGE: u32 = 999;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chapter {
    pub name: String,
}

impl Chapter {
    pub fn new(prefix: &str, index: u32) -> Self {
        Self {
            name: format!("{prefix}{index}"),
        }
    }
}

impl fmt::Display for Chapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

pub fn chapters(prefix: &str) -> Vec<Chapter> {
    (1..=CHAPTER_COUNT)
        .map(|index| Chapter::new(prefix, index))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageBatch {
    pub pages: Vec<u32>,
}

pub fn page_batches(max_page: u32, batch_size: usize) -> Vec<PageBatch> {
    let pages: Vec<u32> = (1..=max_page).collect();
    pages
        .chunks(batch_size.max(1))
        .map(|chunk| PageBatch {
            pages: chunk.to_vec(),
        })
        .collect()
}

pub fn page_filename(page: u32) -> String {
    format!("{page:03}.jpg")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadTask {
    pub url: String,
    pub page: u32,
    pub filename: String,
    pub subject: String,
    pub chapter: String,
}

impl DownloadTask {
    /// `chapter_url` must end with `/`.
    pub fn for_page(chapter_url: &str, page: u32, subject: &str, chapter: &str) -> Self {
        let filename = page_filename(page);
        Self {
            url: format!("{chapter_url}{filename}"),
            page,
            filename,
            subject: subject.to_string(),
            chapter: chapter.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageOutcome {
    Downloaded,
    NotFound,
    Failed,
}

impl PageOutcome {
    pub fn is_success(self) -> bool {
        matches!(self, Self::Downloaded)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChapterStop {
    RangeExhausted,
    BatchFailed { first_page: u32, failed_pages: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterReport {
    pub chapter: String,
    pub batches_dispatched: usize,
    pub pages_downloaded: usize,
    pub stop: ChapterStop,
}

#[derive(Debug, Clone, Default)]
pub struct OutputLayout {
    root: PathBuf,
}

impl OutputLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn chapter_dir(&self, subject: &str, chapter: &str) -> PathBuf {
        self.root.join(subject).join(chapter)
    }

    pub fn manifest_path(&self, subject: &str) -> PathBuf {
        self.root.join(format!("{subject}-pages.txt"))
    }

    pub fn sorted_manifest_path(&self, subject: &str) -> PathBuf {
        self.root.join(format!("{subject}-sorted-pages.txt"))
    }

    pub fn pdf_path(&self, subject: &str) -> PathBuf {
        self.root.join(format!("{subject}.pdf"))
    }
}
