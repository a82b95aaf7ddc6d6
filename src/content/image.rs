//! Image references with size-variant fallback

use std::collections::HashMap;

/// Named size variants a CMS media entry may provide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SizeVariant {
    Large,
    Medium,
    Small,
    Thumbnail,
}

impl SizeVariant {
    /// Degradation order: each requested size falls through toward smaller
    /// variants, with the original as the final fallback.
    const ORDER: [SizeVariant; 4] = [
        SizeVariant::Large,
        SizeVariant::Medium,
        SizeVariant::Small,
        SizeVariant::Thumbnail,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "large" => Some(SizeVariant::Large),
            "medium" => Some(SizeVariant::Medium),
            "small" => Some(SizeVariant::Small),
            "thumbnail" => Some(SizeVariant::Thumbnail),
            _ => None,
        }
    }
}

/// One concrete rendition of an image.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageSource {
    pub url: String,
    pub width: u32,
    pub height: u32,
}

/// A resolved CMS image: the original rendition plus whatever size variants
/// the CMS generated. The original is always present.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageReference {
    pub alt: String,
    pub caption: Option<String>,
    pub original: ImageSource,
    pub variants: HashMap<SizeVariant, ImageSource>,
}

impl ImageReference {
    pub fn new(alt: impl Into<String>, original: ImageSource) -> Self {
        Self {
            alt: alt.into(),
            caption: None,
            original,
            variants: HashMap::new(),
        }
    }

    /// Pick the best source for a requested size.
    ///
    /// Walks the order `large -> medium -> small -> thumbnail` starting at the
    /// requested variant; a request never upgrades to a larger rendition. When
    /// no listed variant exists, the original is returned.
    pub fn source_for(&self, requested: SizeVariant) -> &ImageSource {
        let start = SizeVariant::ORDER
            .iter()
            .position(|v| *v == requested)
            .unwrap_or(0);
        for variant in &SizeVariant::ORDER[start..] {
            if let Some(source) = self.variants.get(variant) {
                return source;
            }
        }
        &self.original
    }

    /// URL of the best source for a requested size.
    pub fn url_for(&self, requested: SizeVariant) -> &str {
        &self.source_for(requested).url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(url: &str) -> ImageSource {
        ImageSource {
            url: url.to_string(),
            width: 100,
            height: 100,
        }
    }

    #[test]
    fn test_exact_variant_preferred() {
        let mut image = ImageReference::new("avatar", source("orig.jpg"));
        image.variants.insert(SizeVariant::Large, source("large.jpg"));
        image.variants.insert(SizeVariant::Small, source("small.jpg"));
        assert_eq!(image.url_for(SizeVariant::Large), "large.jpg");
        assert_eq!(image.url_for(SizeVariant::Small), "small.jpg");
    }

    #[test]
    fn test_large_falls_through_to_thumbnail() {
        let mut image = ImageReference::new("avatar", source("orig.jpg"));
        image
            .variants
            .insert(SizeVariant::Thumbnail, source("thumb.jpg"));
        // Not the bare original: thumbnail is still a listed variant.
        assert_eq!(image.url_for(SizeVariant::Large), "thumb.jpg");
    }

    #[test]
    fn test_no_variants_yields_original() {
        let image = ImageReference::new("avatar", source("orig.jpg"));
        assert_eq!(image.url_for(SizeVariant::Medium), "orig.jpg");
    }

    #[test]
    fn test_request_never_upgrades() {
        let mut image = ImageReference::new("avatar", source("orig.jpg"));
        image.variants.insert(SizeVariant::Large, source("large.jpg"));
        // Small is absent and only larger variants exist: fall to the original.
        assert_eq!(image.url_for(SizeVariant::Small), "orig.jpg");
    }
}
