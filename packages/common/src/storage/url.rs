/// Maps object paths to the public URLs a store serves them under, and back.
///
/// Every URL has the shape `{public_base_url}/{bucket}/{object path}`. The
/// inverse mapping is a plain prefix match: URLs minted by a differently
/// configured store (old deployments, foreign hosts) yield `None`, which
/// callers treat as "nothing of ours to delete".
#[derive(Debug, Clone)]
pub struct PublicUrlResolver {
    prefix: String,
}

impl PublicUrlResolver {
    pub fn new(public_base_url: &str, bucket: &str) -> Self {
        let base = public_base_url.trim_end_matches('/');
        Self {
            prefix: format!("{base}/{bucket}/"),
        }
    }

    /// Public URL for the object at `path`.
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.prefix, path)
    }

    /// Object path for a URL this resolver serves, `None` for any other URL.
    pub fn path_for(&self, url: &str) -> Option<String> {
        url.strip_prefix(&self.prefix)
            .filter(|rest| !rest.is_empty())
            .map(str::to_string)
    }
}
