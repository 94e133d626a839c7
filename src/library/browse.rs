use std::path::Path;

use walkdir::WalkDir;

use crate::error::Error;

use super::model::TrackMeta;
use super::tags::read_meta;

/// Suffixes the browser recognizes as playable. Matching is case-sensitive,
/// exactly as remote clients expect from the listing contract.
const AUDIO_SUFFIXES: [&str; 6] = [".mp3", ".m4a", ".mp4", ".aac", ".ogg", ".wav"];

/// One-level listing of a directory under the configured root.
#[derive(Debug, Clone)]
pub struct Listing {
    pub directories: Vec<String>,
    pub files: Vec<BrowseEntry>,
}

/// A playable file found while browsing, with freshly parsed metadata.
#[derive(Debug, Clone)]
pub struct BrowseEntry {
    pub name: String,
    pub meta: Option<TrackMeta>,
}

fn is_hidden(name: &str) -> bool {
    name.starts_with('.')
}

pub(crate) fn has_audio_suffix(name: &str) -> bool {
    AUDIO_SUFFIXES.iter().any(|s| name.ends_with(s))
}

/// List `rel` (resolved against `root`; empty means the root itself),
/// split into subdirectory names and playable files.
///
/// Dotfiles and non-audio files are excluded. Entries come back sorted so
/// listings are stable across filesystems.
pub fn list_dir(root: &Path, rel: &str) -> Result<Listing, Error> {
    let real = if rel.is_empty() {
        root.to_path_buf()
    } else {
        root.join(rel)
    };

    if !real.is_dir() {
        return Err(Error::DirectoryNotFound(real));
    }

    let mut directories: Vec<String> = Vec::new();
    let mut files: Vec<BrowseEntry> = Vec::new();

    for entry in WalkDir::new(&real)
        .follow_links(true)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(Result::ok)
    {
        let Some(name) = entry.file_name().to_str() else {
            continue;
        };
        if is_hidden(name) {
            continue;
        }

        if entry.file_type().is_dir() {
            directories.push(name.to_string());
        } else if entry.file_type().is_file() && has_audio_suffix(name) {
            files.push(BrowseEntry {
                name: name.to_string(),
                meta: read_meta(entry.path()),
            });
        }
    }

    directories.sort();
    files.sort_by(|a, b| a.name.cmp(&b.name));

    Ok(Listing { directories, files })
}
