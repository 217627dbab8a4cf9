//! Video record identity: extracting the id from stored watch-page URLs.

use url::Url;

/// One record of the batch: the extracted identifier plus the canonical
/// link that must end up in its description. Immutable for the whole run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoRecord {
    pub video_id: String,
    pub target_link: String,
}

/// Extracts the video identifier from a stored watch-page URL.
///
/// Both historical forms appear in the record list: the short
/// `youtu.be/{id}` form and the long `watch?v={id}` form. Anything else
/// yields `None` and the record is skipped as invalid.
pub fn extract_video_id(video_url: &str) -> Option<String> {
    let parsed = Url::parse(video_url).ok()?;
    match parsed.host_str()? {
        "youtu.be" => {
            let id = parsed.path_segments()?.next()?.to_string();
            (!id.is_empty()).then_some(id)
        }
        host if host == "youtube.com" || host.ends_with(".youtube.com") => parsed
            .query_pairs()
            .find(|(key, _)| key == "v")
            .map(|(_, value)| value.into_owned())
            .filter(|id| !id.is_empty()),
        _ => None,
    }
}

/// Builds the canonical article link for a video id.
pub fn target_link(article_base: &str, video_id: &str) -> String {
    format!("{article_base}?id={video_id}")
}
