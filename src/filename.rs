use reqwest::Url;

use crate::model::ImageMetadata;

/// Suggests a filename that keeps the attribution visible: the image's
/// basename with license and uploader (spaces turned into hyphens) spliced
/// in before the extension, e.g. `Step-3.CC-BY-3.0.Jane-Doe.jpg`.
///
/// A basename without a `.` degrades gracefully: the license info ends up
/// prepended instead.
pub fn suggest_filename(metadata: &ImageMetadata) -> String {
    let basename = Url::parse(&metadata.image.url)
        .ok()
        .and_then(|url| {
            url.path_segments()
                .and_then(|mut segments| segments.next_back().map(str::to_string))
        })
        .unwrap_or_else(|| metadata.image.url.clone());

    let mut parts: Vec<String> = basename.split('.').map(str::to_string).collect();
    let extension = parts.pop().unwrap_or_default();
    parts.push(metadata.license.name.replace(' ', "-"));
    parts.push(metadata.uploader.name.replace(' ', "-"));
    parts.push(extension);
    parts.join(".")
}
