use std::borrow::Cow;

use serde::Serialize;

/// What a single rate-limited request produced. `final_url` is the URL the
/// server actually served, which differs from the requested one after
/// redirects (the random-entry endpoint always redirects).
#[derive(Debug, Clone)]
pub struct FetchResult {
    pub final_url: String,
    pub body: Vec<u8>,
}

impl FetchResult {
    /// The body decoded as text for HTML parsing.
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }
}

/// An image link found on an entry page, not yet confirmed to have usable
/// licensing metadata. `href` is the site-relative detail-page target,
/// `index` its position among the page's candidates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub index: usize,
    pub href: String,
}

/// Everything known about a discovered image. Only constructed once the
/// image URL, uploader, and license have all been read from a single detail
/// page; the raw bytes and provenance are filled in afterwards.
#[derive(Debug, Serialize)]
pub struct ImageMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub choice: Option<ChoiceInfo>,
    pub image: ImageInfo,
    pub license: LicenseInfo,
    pub uploader: UploaderInfo,
}

#[derive(Debug, Serialize)]
pub struct ImageInfo {
    /// Raw image bytes, fetched as the final step. Never serialized;
    /// `data_base64` carries them in JSON output.
    #[serde(skip)]
    pub data: Option<Vec<u8>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_base64: Option<String>,
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct UploaderInfo {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct LicenseInfo {
    pub name: String,
    pub url: String,
}

/// Where the image came from: the entry page, the ordinal of the chosen
/// candidate on it, and the detail page the metadata was read from.
#[derive(Debug, Serialize)]
pub struct ChoiceInfo {
    pub base: String,
    pub base_index: usize,
    pub image_metadata: String,
}
