use log::debug;

use crate::error::ScrapeError;
use crate::license::guess_license;
use crate::model::{FetchResult, ImageInfo, ImageMetadata, LicenseInfo, UploaderInfo};
use crate::page::Page;

/// Detail pages carrying this marker have no reusable license.
const RIGHTS_RESERVED_MARKER: &str = "All rights reserved.";

// Structural queries against a detail page. Like the candidate selector,
// these track wikiHow's markup and break when it changes.
const IMAGE_SELECTOR: &str = "img[src]";
const UPLOADER_SELECTOR: &str = "div+p>a";
const LICENSE_SELECTOR: &str = "h3+p>a";

/// Reads image, uploader, and license data out of a fetched detail page.
///
/// `Ok(None)` means the page is unusable (all rights reserved) and discovery
/// should restart from a fresh entry page; no partial metadata is ever
/// produced. A wrong number of matches for any required query is a fatal
/// error, not a retry condition. `domain` resolves site-relative links.
pub fn extract(detail: &FetchResult, domain: &str) -> Result<Option<ImageMetadata>, ScrapeError> {
    let text = detail.text();
    if text.contains(RIGHTS_RESERVED_MARKER) {
        debug!("Detail page {} is all-rights-reserved", detail.final_url);
        return Ok(None);
    }

    let page = Page::parse(&text);
    let image = page.find_single(IMAGE_SELECTOR)?;
    let uploader = page.find_single(UPLOADER_SELECTOR)?;
    let license = page.find_single(LICENSE_SELECTOR)?;

    let image_url = require_attr(image.src, IMAGE_SELECTOR, "src")?;
    let uploader_href = require_attr(uploader.href, UPLOADER_SELECTOR, "href")?;
    let license_url = require_attr(license.href, LICENSE_SELECTOR, "href")?;
    let license_name = guess_license(&license_url).unwrap_or(license.text);

    Ok(Some(ImageMetadata {
        choice: None,
        image: ImageInfo {
            data: None,
            data_base64: None,
            url: image_url,
        },
        license: LicenseInfo {
            name: license_name,
            url: license_url,
        },
        uploader: UploaderInfo {
            name: uploader.text,
            url: format!("{domain}{uploader_href}"),
        },
    }))
}

fn require_attr(
    value: Option<String>,
    selector: &str,
    attribute: &str,
) -> Result<String, ScrapeError> {
    value.ok_or_else(|| ScrapeError::MissingAttribute {
        selector: selector.to_string(),
        attribute: attribute.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOMAIN: &str = "https://www.wikihow.com";

    fn detail_page(image_src: &str, license_href: &str, license_text: &str) -> String {
        format!(
            r#"<html><body>
                <h1>Image detail</h1>
                <img src="{image_src}">
                <div>Uploaded by</div>
                <p><a href="/User:Jane-Doe">Jane Doe</a></p>
                <h3>License</h3>
                <p><a href="{license_href}">{license_text}</a></p>
            </body></html>"#
        )
    }

    fn fetched(body: String) -> FetchResult {
        FetchResult {
            final_url: format!("{DOMAIN}/Image:Cook-Pasta-Step-3.jpg"),
            body: body.into_bytes(),
        }
    }

    #[test]
    fn test_extracts_complete_metadata() {
        let body = detail_page(
            "https://www.wikihow.com/images/Cook-Pasta-Step-3.jpg",
            "https://creativecommons.org/licenses/by-nc-sa/3.0/",
            "Creative Commons",
        );

        let metadata = extract(&fetched(body), DOMAIN).unwrap().unwrap();

        assert_eq!(
            metadata.image.url,
            "https://www.wikihow.com/images/Cook-Pasta-Step-3.jpg"
        );
        assert!(metadata.image.data.is_none());
        assert_eq!(metadata.uploader.name, "Jane Doe");
        assert_eq!(metadata.uploader.url, "https://www.wikihow.com/User:Jane-Doe");
        assert_eq!(metadata.license.name, "CC BY-NC-SA 3.0");
        assert_eq!(
            metadata.license.url,
            "https://creativecommons.org/licenses/by-nc-sa/3.0/"
        );
    }

    #[test]
    fn test_rights_reserved_marker_wins_over_valid_structure() {
        let mut body = detail_page(
            "https://www.wikihow.com/images/Cook-Pasta-Step-3.jpg",
            "https://creativecommons.org/licenses/by/3.0/",
            "Creative Commons",
        );
        body.push_str("<p>All rights reserved.</p>");

        assert!(extract(&fetched(body), DOMAIN).unwrap().is_none());
    }

    #[test]
    fn test_page_without_marker_is_parsed() {
        // "All rights" alone is not the marker.
        let mut body = detail_page(
            "https://www.wikihow.com/images/Cook-Pasta-Step-3.jpg",
            "https://creativecommons.org/licenses/by/3.0/",
            "Creative Commons",
        );
        body.push_str("<p>All rights granted.</p>");

        assert!(extract(&fetched(body), DOMAIN).unwrap().is_some());
    }

    #[test]
    fn test_unrecognized_license_falls_back_to_link_text() {
        let body = detail_page(
            "https://www.wikihow.com/images/Cook-Pasta-Step-3.jpg",
            "https://example.com/special-license",
            "Special License",
        );

        let metadata = extract(&fetched(body), DOMAIN).unwrap().unwrap();

        assert_eq!(metadata.license.name, "Special License");
        assert_eq!(metadata.license.url, "https://example.com/special-license");
    }

    #[test]
    fn test_missing_image_node_is_a_structure_error() {
        let body = r#"<html><body>
            <div></div><p><a href="/User:Jane-Doe">Jane Doe</a></p>
            <h3>License</h3><p><a href="https://creativecommons.org/licenses/by/3.0/">CC</a></p>
        </body></html>"#;

        let err = extract(&fetched(body.to_string()), DOMAIN).unwrap_err();

        match err {
            ScrapeError::StructureMismatch { selector, found } => {
                assert_eq!(selector, "img[src]");
                assert_eq!(found, 0);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_duplicate_uploader_links_are_a_structure_error() {
        let body = r#"<html><body>
            <img src="/images/a.jpg">
            <div></div><p><a href="/User:One">One</a></p>
            <div></div><p><a href="/User:Two">Two</a></p>
            <h3>License</h3><p><a href="https://creativecommons.org/licenses/by/3.0/">CC</a></p>
        </body></html>"#;

        let err = extract(&fetched(body.to_string()), DOMAIN).unwrap_err();

        match err {
            ScrapeError::StructureMismatch { selector, found } => {
                assert_eq!(selector, "div+p>a");
                assert_eq!(found, 2);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
