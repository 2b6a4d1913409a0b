use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use tracing::{info, warn};

use crate::cli::CreateArgs;
use crate::model::{
    Chapter, ChapterReport, ChapterStop, DownloadTask, MAX_PAGE, OutputLayout, PageOutcome,
    chapters, page_batches,
};
use crate::util::{command_available, ensure_directory};

mod assemble;
mod fetch;
mod iterate;
mod manifest;
mod run;
mod schedule;

pub use run::run;

use assemble::*;
use fetch::*;
use iterate::*;
use manifest::*;
use schedule::*;
