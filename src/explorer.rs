/// Filesystem browsing for the sidebar and directory listing.
use anyhow::{Context, Result};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use sysinfo::Disks;

/// One row in the directory listing.
#[derive(Debug, Clone)]
pub struct FsEntry {
    pub name: String,
    pub path: PathBuf,
    pub is_dir: bool,
}

/// A root the user can jump to from the sidebar: the home directory
/// plus every mounted volume.
#[derive(Debug, Clone)]
pub struct Volume {
    pub label: String,
    pub path: PathBuf,
}

/// List the entries of `dir`, directories first, then case-insensitive
/// by name. Dot-files are skipped.
pub fn list_directory(dir: &Path) -> Result<Vec<FsEntry>> {
    let read = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory {}", dir.display()))?;

    let mut entries: Vec<FsEntry> = read
        .filter_map(|e| e.ok())
        .filter_map(|e| {
            let name = e.file_name().to_string_lossy().to_string();
            if name.starts_with('.') {
                return None;
            }
            let path = e.path();
            let is_dir = path.is_dir();
            Some(FsEntry { name, path, is_dir })
        })
        .collect();

    entries.sort_by(|a, b| {
        b.is_dir
            .cmp(&a.is_dir)
            .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
    });

    Ok(entries)
}

/// Enumerate sidebar roots: home directory first, then mounted volumes,
/// deduplicated by mount point.
pub fn list_volumes() -> Vec<Volume> {
    let mut seen: HashSet<PathBuf> = HashSet::new();
    let mut volumes = Vec::new();

    if let Some(user_dirs) = directories::UserDirs::new() {
        let home = user_dirs.home_dir().to_path_buf();
        seen.insert(home.clone());
        volumes.push(Volume {
            label: "Home".to_string(),
            path: home,
        });
    }

    let disks = Disks::new_with_refreshed_list();
    for disk in disks.list() {
        let mount = disk.mount_point().to_path_buf();
        if !seen.insert(mount.clone()) {
            continue;
        }
        volumes.push(Volume {
            label: mount.display().to_string(),
            path: mount,
        });
    }

    tracing::debug!("found {} sidebar volumes", volumes.len());
    volumes
}
