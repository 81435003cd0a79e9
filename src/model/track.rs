//! Track metadata and video-id extraction from external URLs.

/// One playable item's metadata and source URL.
///
/// Owned by the hosting page; the engine only reads it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Track {
    pub title: String,
    pub artist: String,
    /// Source-of-truth link, e.g. a video sharing URL.
    pub external_url: String,
    /// Human label for where the track belongs, e.g. a chapter reference.
    pub collection_label: String,
}

/// Video ids on the external service are exactly this long.
const VIDEO_ID_LEN: usize = 11;

/// URL shapes the product supports, in match order: canonical watch URL,
/// share-short URL, embed URL.
const URL_SHAPES: &[&str] = &["youtube.com/watch?v=", "youtu.be/", "youtube.com/embed/"];

/// Extract the stable 11-character video id from an external URL.
///
/// Returns `None` for anything unrecognized: the empty string, other
/// domains, and candidate ids with the wrong length or characters. Pure and
/// total; never panics.
pub fn extract_video_id(url: &str) -> Option<String> {
    for shape in URL_SHAPES {
        if let Some(pos) = url.find(shape) {
            let start = pos + shape.len();
            let candidate: String = url[start..]
                .chars()
                .take_while(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
                .collect();
            return (candidate.len() == VIDEO_ID_LEN).then_some(candidate);
        }
    }
    None
}
