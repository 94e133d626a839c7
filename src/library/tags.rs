use std::path::Path;
use std::time::Duration;

use lofty::picture::PictureType;
use lofty::prelude::*;

use super::model::{Picture, TrackMeta};

/// Read tag metadata from an audio file, tolerating every failure mode.
///
/// A file that cannot be parsed (or carries no tag at all) simply yields
/// `None`; the caller decides whether that is acceptable.
pub(crate) fn read_meta(path: &Path) -> Option<TrackMeta> {
    let tagged = lofty::read_from_path(path).ok()?;
    let tag = tagged.primary_tag().or_else(|| tagged.first_tag())?;

    let text = |key: ItemKey| {
        tag.get_string(&key)
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(String::from)
    };
    // Track numbers frequently come as "3/12"; take the part before the slash.
    let number = |key: ItemKey| {
        tag.get_string(&key)
            .and_then(|v| v.split('/').next())
            .and_then(|v| v.trim().parse::<u32>().ok())
    };

    let picture = tag
        .pictures()
        .iter()
        .find(|p| p.pic_type() == PictureType::CoverFront)
        .or_else(|| tag.pictures().first())
        .map(|p| Picture {
            data: p.data().to_vec(),
            mime: p.mime_type().map(|m| m.as_str().to_string()),
        });

    Some(TrackMeta {
        title: text(ItemKey::TrackTitle),
        artist: text(ItemKey::TrackArtist),
        album: text(ItemKey::AlbumTitle),
        comment: text(ItemKey::Comment),
        genre: text(ItemKey::Genre),
        track: number(ItemKey::TrackNumber),
        year: number(ItemKey::Year),
        picture,
    })
}

/// Total duration from the file's audio properties, if it can be probed.
pub(crate) fn probe_duration(path: &Path) -> Option<Duration> {
    lofty::read_from_path(path)
        .ok()
        .map(|tagged| tagged.properties().duration())
}
