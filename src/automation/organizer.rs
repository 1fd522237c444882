// Downloads organizer: loose files move into a folder per category.
// Unknown extensions and subdirectories are left alone.

use crate::core::{Automation, OrganizeReport};
use crate::error::{JarvisError, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

pub const CATEGORIES: &[(&str, &[&str])] = &[
    ("Images", &["jpg", "jpeg", "png", "gif", "webp", "svg"]),
    ("Documents", &["pdf", "docx", "txt", "xlsx", "pptx", "csv"]),
    ("Installers", &["exe", "msi", "dmg", "iso"]),
    ("Archives", &["zip", "rar", "7z", "tar", "gz"]),
    ("Video", &["mp4", "mkv", "mov", "avi"]),
    ("Audio", &["mp3", "wav", "flac"]),
];

/// Category folder for a file name, by lowercased extension.
pub fn category_for(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_lowercase();
    CATEGORIES
        .iter()
        .find(|(_, exts)| exts.contains(&ext.as_str()))
        .map(|(category, _)| *category)
}

pub struct DownloadsOrganizer {
    root: PathBuf,
}

impl DownloadsOrganizer {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    async fn move_into_category(&self, path: &Path, category: &str) -> Result<()> {
        let target_dir = self.root.join(category);
        tokio::fs::create_dir_all(&target_dir).await?;

        let file_name = path
            .file_name()
            .ok_or_else(|| JarvisError::Automation(format!("no file name: {}", path.display())))?;
        tokio::fs::rename(path, target_dir.join(file_name)).await?;
        Ok(())
    }
}

#[async_trait]
impl Automation for DownloadsOrganizer {
    async fn organize_downloads(&self) -> Result<OrganizeReport> {
        if !tokio::fs::try_exists(&self.root).await.unwrap_or(false) {
            return Err(JarvisError::Automation(format!(
                "downloads folder not found: {}",
                self.root.display()
            )));
        }

        let mut report = OrganizeReport::default();
        let mut entries = tokio::fs::read_dir(&self.root).await?;

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            let is_file = entry.file_type().await.map(|t| t.is_file()).unwrap_or(false);
            if !is_file {
                continue;
            }

            let Some(category) = category_for(&path) else {
                continue;
            };

            match self.move_into_category(&path, category).await {
                Ok(()) => {
                    debug!(file = %path.display(), category, "moved");
                    report.moved_count += 1;
                }
                Err(e) => {
                    warn!(file = %path.display(), error = %e, "move failed");
                    report.error_count += 1;
                }
            }
        }

        info!(
            moved = report.moved_count,
            errors = report.error_count,
            "organize complete"
        );
        Ok(report)
    }
}
