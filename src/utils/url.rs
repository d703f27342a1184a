// src/utils/url.rs

//! URL manipulation utilities.

/// Resolve a potentially relative URL against a base URL.
///
/// # Examples
/// ```
/// use statutebook::utils::url::resolve;
///
/// assert_eq!(
///     resolve("https://example.com/path/", "page.html"),
///     "https://example.com/path/page.html"
/// );
/// ```
pub fn resolve(base: &str, href: &str) -> String {
    // Already absolute
    if href.starts_with("http://") || href.starts_with("https://") {
        return href.to_string();
    }

    // Absolute path - combine with base domain
    if href.starts_with('/') {
        return resolve_absolute_path(base, href);
    }

    // Relative path - combine with base directory
    resolve_relative_path(base, href)
}

fn resolve_absolute_path(base: &str, href: &str) -> String {
    if let Some(scheme_end) = base.find("://") {
        let after_scheme = &base[scheme_end + 3..];
        if let Some(slash_idx) = after_scheme.find('/') {
            let domain = &base[..scheme_end + 3 + slash_idx];
            return format!("{domain}{href}");
        }
    }
    format!("{}{}", base.trim_end_matches('/'), href)
}

fn resolve_relative_path(base: &str, href: &str) -> String {
    // Drop any fragment from the base before locating its directory.
    let base = base.split('#').next().unwrap_or(base);
    let base_dir = if base.ends_with('/') {
        base.to_string()
    } else {
        match base.rfind('/') {
            Some(idx) => base[..=idx].to_string(),
            None => format!("{base}/"),
        }
    };

    format!("{base_dir}{href}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_absolute_url() {
        assert_eq!(
            resolve("https://www.irishstatutebook.ie/eli/1997/act/39/", "https://other.com/page"),
            "https://other.com/page"
        );
    }

    #[test]
    fn test_resolve_absolute_path() {
        assert_eq!(
            resolve(
                "https://www.irishstatutebook.ie/eli/1997/act/39/section/1/enacted/en/html",
                "/eli/1997/act/39/section/2/enacted/en/html"
            ),
            "https://www.irishstatutebook.ie/eli/1997/act/39/section/2/enacted/en/html"
        );
    }

    #[test]
    fn test_resolve_relative_from_file() {
        assert_eq!(
            resolve(
                "https://www.irishstatutebook.ie/1997/en/act/pub/0039/sec0001.html",
                "sec0002.html"
            ),
            "https://www.irishstatutebook.ie/1997/en/act/pub/0039/sec0002.html"
        );
    }

    #[test]
    fn test_resolve_ignores_base_fragment() {
        assert_eq!(
            resolve(
                "https://www.irishstatutebook.ie/eli/1997/act/39/section/1/enacted/en/html#part1",
                "print.html"
            ),
            "https://www.irishstatutebook.ie/eli/1997/act/39/section/1/enacted/en/print.html"
        );
    }

    #[test]
    fn test_resolve_relative_from_dir() {
        assert_eq!(
            resolve("https://example.com/path/", "page.html"),
            "https://example.com/path/page.html"
        );
    }
}
