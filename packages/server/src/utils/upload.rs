/// Largest accepted image upload, in bytes (5 MB).
pub const MAX_IMAGE_BYTES: usize = 5_242_880;

/// Content types accepted for cover and gallery images.
pub const ALLOWED_IMAGE_TYPES: [&str; 3] = ["image/jpeg", "image/png", "image/webp"];

/// Result of checking an uploaded image against the acceptance policy.
#[derive(Debug)]
pub enum ImagePolicyError {
    /// Content type is not one of the accepted image formats.
    UnsupportedType { file_name: String },
    /// File exceeds the size ceiling.
    TooLarge { file_name: String },
}

impl ImagePolicyError {
    /// Returns the message surfaced to the API caller.
    pub fn message(&self) -> String {
        match self {
            Self::UnsupportedType { file_name } => {
                format!("Invalid file type: {file_name}. Only JPEG, PNG, and WebP are allowed.")
            }
            Self::TooLarge { file_name } => {
                format!("File too large: {file_name}. Maximum size is 5MB.")
            }
        }
    }
}

/// Validates an uploaded image against the acceptance policy.
/// The content type check runs before the size check.
pub fn validate_image(
    file_name: &str,
    content_type: &str,
    size: usize,
) -> Result<(), ImagePolicyError> {
    if !ALLOWED_IMAGE_TYPES.contains(&content_type) {
        return Err(ImagePolicyError::UnsupportedType {
            file_name: file_name.to_string(),
        });
    }

    if size > MAX_IMAGE_BYTES {
        return Err(ImagePolicyError::TooLarge {
            file_name: file_name.to_string(),
        });
    }

    Ok(())
}
