//! API endpoint URL builders

/// Collection endpoint for a resource, e.g. `https://www.bv-brc.org/api/genome/`.
///
/// The trailing slash is part of the route; the service redirects without it
/// and POST bodies do not survive the redirect.
pub fn resource_url(base_url: &str, resource: &str) -> String {
    format!("{}/{}/", base_url.trim_end_matches('/'), resource)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_url() {
        assert_eq!(
            resource_url("https://www.bv-brc.org/api", "genome"),
            "https://www.bv-brc.org/api/genome/"
        );
    }

    #[test]
    fn test_resource_url_tolerates_trailing_slash() {
        assert_eq!(
            resource_url("http://localhost:3001/api/", "genome_feature"),
            "http://localhost:3001/api/genome_feature/"
        );
    }
}
