/// Top-level namespace an uploaded image lands in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Folder {
    Covers,
    Gallery,
}

impl Folder {
    pub fn as_str(self) -> &'static str {
        match self {
            Folder::Covers => "covers",
            Folder::Gallery => "gallery",
        }
    }
}

/// Replaces every character outside `[A-Za-z0-9._-]` with `_`.
///
/// Upload filenames come straight from browsers and may contain spaces,
/// unicode, or anything else; the sanitized form is safe to embed in an
/// object path without further quoting.
pub fn sanitize_file_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Builds the storage path for an upload:
/// `{folder}/{slug}/{unix millis}-{sanitized filename}`.
///
/// The timestamp prefix keeps two uploads of the same filename from
/// colliding within a project.
pub fn object_path(folder: Folder, slug: &str, file_name: &str) -> String {
    format!(
        "{}/{}/{}-{}",
        folder.as_str(),
        slug,
        chrono::Utc::now().timestamp_millis(),
        sanitize_file_name(file_name)
    )
}

/// Validates an object path before it is resolved against a filesystem root.
///
/// Paths we generate ourselves always pass; this guards paths recovered from
/// client-supplied URLs.
pub fn validate_object_path(path: &str) -> Result<&str, &'static str> {
    if path.is_empty() {
        return Err("Path cannot be empty");
    }

    if path.len() > 512 {
        return Err("Path exceeds maximum length of 512 characters");
    }

    if path.contains('\0') {
        return Err("Path must not contain null bytes");
    }

    if path.contains('\\') {
        return Err("Path must not contain backslashes");
    }

    if path.starts_with('/') || path.ends_with('/') {
        return Err("Path must not start or end with '/'");
    }

    if path.contains("//") {
        return Err("Path must not contain consecutive slashes");
    }

    for segment in path.split('/') {
        if segment.starts_with('.') {
            return Err("Path segments must not start with '.'");
        }
    }

    if !path
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '/' | '-' | '_' | '.'))
    {
        return Err("Path contains invalid characters (allowed: a-zA-Z0-9, /, -, _, .)");
    }

    Ok(path)
}
