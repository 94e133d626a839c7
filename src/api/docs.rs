//! JSON documents served over the control surface.
//!
//! Builders only; every input is a snapshot already detached from the
//! player, so no lock is held while encoding (pictures can be large).

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde_json::{Value, json};

use crate::library::{Listing, TrackMeta};
use crate::player::{PlaylistEntry, StatusSnapshot};

/// Track object shared by the status, playlist and listing documents.
/// Absent tag fields serialize as `null`; the picture (and its mime type)
/// appears only when requested and present.
pub(super) fn track_doc(name: &str, meta: Option<&TrackMeta>, with_picture: bool) -> Value {
    let mut doc = json!({ "file": name });
    if let Some(meta) = meta {
        doc["title"] = json!(meta.title);
        doc["artist"] = json!(meta.artist);
        doc["album"] = json!(meta.album);
        doc["comment"] = json!(meta.comment);
        doc["genre"] = json!(meta.genre);
        doc["track"] = json!(meta.track);
        doc["year"] = json!(meta.year);
        if with_picture {
            if let Some(picture) = &meta.picture {
                doc["picture"] = json!(BASE64.encode(&picture.data));
                doc["mime"] = json!(picture.mime);
            }
        }
    }
    doc
}

/// `{"file": null}` when nothing is selected; otherwise the track object
/// plus position/length in whole seconds.
pub(super) fn status_doc(status: Option<&StatusSnapshot>, with_picture: bool) -> Value {
    let Some(status) = status else {
        return json!({ "file": null });
    };

    let mut doc = track_doc(&status.file, status.meta.as_ref(), with_picture);
    doc["pos"] = json!(status.position.as_secs());
    doc["length"] = json!(status.length.unwrap_or_default().as_secs());
    doc
}

/// One entry per track, in playlist order; never carries artwork.
pub(super) fn playlist_doc(entries: &[PlaylistEntry]) -> Value {
    Value::Array(
        entries
            .iter()
            .map(|e| track_doc(&e.file, e.meta.as_ref(), false))
            .collect(),
    )
}

/// `{directory: [...], file: [...]}` for one browsed directory; file
/// objects carry their artwork.
pub(super) fn listing_doc(listing: &Listing) -> Value {
    json!({
        "directory": listing.directories,
        "file": listing
            .files
            .iter()
            .map(|f| track_doc(&f.name, f.meta.as_ref(), true))
            .collect::<Vec<_>>(),
    })
}
