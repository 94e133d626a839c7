use std::fmt;
use std::path::PathBuf;

/// One playlist entry: a resolved path plus whatever tags were readable
/// when it was added. `meta == None` means the file was accepted but its
/// tags could not be parsed.
#[derive(Debug, Clone)]
pub struct Track {
    pub path: PathBuf,
    pub meta: Option<TrackMeta>,
}

impl Track {
    /// Final path component, the name shown in status/playlist documents.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_string()
    }
}

/// Tag fields surfaced over the control surface. Every field is optional;
/// absent tags serialize as `null`.
#[derive(Debug, Clone, Default)]
pub struct TrackMeta {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub comment: Option<String>,
    pub genre: Option<String>,
    pub track: Option<u32>,
    pub year: Option<u32>,
    pub picture: Option<Picture>,
}

impl TrackMeta {
    /// Copy with the embedded picture dropped, for documents that never
    /// carry artwork (playlist listings).
    pub fn without_picture(&self) -> TrackMeta {
        TrackMeta {
            picture: None,
            ..self.clone()
        }
    }
}

/// Embedded artwork lifted out of the tag.
#[derive(Clone)]
pub struct Picture {
    pub data: Vec<u8>,
    pub mime: Option<String>,
}

impl fmt::Debug for Picture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Picture")
            .field("data", &format_args!("{} bytes", self.data.len()))
            .field("mime", &self.mime)
            .finish()
    }
}
