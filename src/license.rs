use log::warn;
use regex::Regex;

/// Attempts to turn a license URL into a short display name. Resolves
/// Creative Commons URLs like `https://creativecommons.org/licenses/by-nc-sa/3.0/`
/// to `CC BY-NC-SA 3.0`. Unrecognized URLs produce a warning and `None`;
/// callers fall back to the raw link text.
pub fn guess_license(license_url: &str) -> Option<String> {
    let cc_pattern =
        Regex::new(r"^https://creativecommons\.org/licenses/([a-z-]+)/([0-9.]+)/?$").unwrap();
    if let Some(captures) = cc_pattern.captures(license_url) {
        return Some(format!("CC {} {}", &captures[1], &captures[2]).to_uppercase());
    }

    // TODO: recognize more license registries as they show up in the wild.

    warn!("Could not recognize license URL: {license_url}");
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolves_creative_commons_urls() {
        assert_eq!(
            guess_license("https://creativecommons.org/licenses/by-nc-sa/3.0/").as_deref(),
            Some("CC BY-NC-SA 3.0")
        );
        assert_eq!(
            guess_license("https://creativecommons.org/licenses/by/4.0/").as_deref(),
            Some("CC BY 4.0")
        );
    }

    #[test]
    fn test_trailing_slash_is_optional() {
        assert_eq!(
            guess_license("https://creativecommons.org/licenses/by-sa/2.5").as_deref(),
            Some("CC BY-SA 2.5")
        );
    }

    #[test]
    fn test_unrecognized_urls_yield_none() {
        assert!(guess_license("https://example.com/my-own-license").is_none());
        assert!(guess_license("http://creativecommons.org/licenses/by/3.0/").is_none());
        assert!(
            guess_license("https://creativecommons.org/licenses/by/3.0/extra/segment").is_none()
        );
    }
}
