use std::fs;

use regex::Regex;
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use super::*;

/// Each append writes one whole line under the lock; line order is unspecified.
pub(super) struct ManifestSink {
    path: PathBuf,
    file: Mutex<File>,
}

impl ManifestSink {
    pub(super) async fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            ensure_directory(parent)?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .await
            .with_context(|| format!("failed to open manifest: {}", path.display()))?;

        Ok(Self {
            path: path.to_path_buf(),
            file: Mutex::new(file),
        })
    }

    pub(super) fn path(&self) -> &Path {
        &self.path
    }

    pub(super) async fn append(&self, entry: &Path) -> std::io::Result<()> {
        let line = format!("{}\n", entry.display());
        let mut file = self.file.lock().await;
        file.write_all(line.as_bytes()).await?;
        file.flush().await
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum SortToken {
    Number(usize, String),
    Text(String),
}

fn natural_key(entry: &str, pattern: &Regex) -> Vec<SortToken> {
    pattern
        .find_iter(entry)
        .map(|token| {
            let text = token.as_str();
            if text.starts_with(|character: char| character.is_ascii_digit()) {
                let digits = text.trim_start_matches('0');
                SortToken::Number(digits.len(), digits.to_string())
            } else {
                SortToken::Text(text.to_string())
            }
        })
        .collect()
}

pub(super) fn sort_manifest_entries<I, S>(entries: I) -> Result<Vec<String>>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let pattern = Regex::new(r"\d+|\D+").context("failed to compile manifest sort regex")?;

    let mut keyed: Vec<(Vec<SortToken>, String)> = entries
        .into_iter()
        .map(|entry| -> String { entry.into() })
        .filter(|entry| !entry.trim().is_empty())
        .map(|entry| (natural_key(&entry, &pattern), entry))
        .collect();

    keyed.sort_by(|(left_key, left), (right_key, right)| {
        left_key.cmp(right_key).then_with(|| left.cmp(right))
    });

    let mut sorted: Vec<String> = keyed.into_iter().map(|(_, entry)| entry).collect();
    sorted.dedup();
    Ok(sorted)
}

pub(super) fn write_sorted_manifest(manifest_path: &Path, sorted_path: &Path) -> Result<usize> {
    let raw = fs::read_to_string(manifest_path)
        .with_context(|| format!("failed to read manifest: {}", manifest_path.display()))?;

    let sorted = sort_manifest_entries(raw.lines())?;

    fs::write(sorted_path, sorted.join("\n")).with_context(|| {
        format!(
            "failed to write sorted manifest: {}",
            sorted_path.display()
        )
    })?;

    Ok(sorted.len())
}
