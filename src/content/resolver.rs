//! CMS content resolution with static fallback
//!
//! The resolver produces a complete view model for every page type. Live
//! content is fetched from the CMS, mapped onto the view-model shape and
//! rich-text-parsed; any failure along the way is logged and answered with
//! the static default instead. Callers never see an error.
//!
//! Fallback is all-or-nothing: a response that parses but is missing a
//! required field discards the whole record rather than producing a
//! partially-live page.

use super::{
    AboutView, ArticleCard, BlogView, HomeView, ImageReference, ImageSource, PageKind, PageView,
    SizeVariant, Skill, SocialLink, StaticContent, WorkEntry,
};
use crate::cms::schema::{
    AboutAttrs, ArticleAttrs, Entry, Envelope, HomeAttrs, MediaField, SkillAttrs, SocialLinkAttrs,
    WorkAttrs,
};
use crate::cms::{CmsClient, FetchError};
use crate::config::CmsConfig;
use crate::content::markdown;
use crate::locale::Locale;
use crate::richtext;
use std::collections::hash_map::Entry as MapEntry;
use std::collections::HashMap;

/// Ordinal display scale for skill proficiency labels.
///
/// The mapping is fixed: beginner=25, intermediate=50, advanced=75,
/// expert=100. Unknown labels map to 0.
pub fn skill_level(label: &str) -> u8 {
    match label.to_ascii_lowercase().as_str() {
        "beginner" => 25,
        "intermediate" => 50,
        "advanced" => 75,
        "expert" => 100,
        _ => 0,
    }
}

/// Stateless content resolver: an optional CMS client plus the static
/// fallback records.
pub struct ContentResolver {
    client: Option<CmsClient>,
    fallback: StaticContent,
}

impl ContentResolver {
    /// Build a resolver. When the CMS is not configured the resolver still
    /// works; every fetch serves fallback content.
    pub fn new(config: &CmsConfig, fallback: StaticContent) -> Self {
        let client = match CmsClient::from_config(config) {
            Ok(client) => Some(client),
            Err(err) => {
                tracing::warn!(error = %err, "CMS disabled, all pages will use static content");
                None
            }
        };
        Self { client, fallback }
    }

    /// Resolve one page. Never fails: any fetch or mapping error yields the
    /// page's static default with the cause logged.
    pub async fn fetch_safe(&self, page: PageKind, locale: Locale) -> PageView {
        match self.fetch_live(page, locale).await {
            Ok(view) => view,
            Err(err) => {
                tracing::warn!(
                    page = page.resource(),
                    locale = locale.code(),
                    error = %err,
                    "CMS fetch failed, serving static fallback"
                );
                self.fallback.view(page)
            }
        }
    }

    /// Open a per-render scope that deduplicates fetches by page type.
    pub fn scope(&self, locale: Locale) -> ResolverScope<'_> {
        ResolverScope {
            resolver: self,
            locale,
            cache: HashMap::new(),
        }
    }

    async fn fetch_live(&self, page: PageKind, locale: Locale) -> Result<PageView, FetchError> {
        let client = self
            .client
            .as_ref()
            .ok_or(FetchError::ConfigMissing("cms.base_url"))?;
        let raw = client.fetch(page.resource(), locale).await?;

        match page {
            PageKind::Home => {
                let envelope: Envelope<Entry<HomeAttrs>> = CmsClient::decode(raw)?;
                Ok(PageView::Home(map_home(envelope.data.attributes)?))
            }
            PageKind::About => {
                let envelope: Envelope<Entry<AboutAttrs>> = CmsClient::decode(raw)?;
                Ok(PageView::About(map_about(envelope.data.attributes)?))
            }
            PageKind::Blog => {
                let envelope: Envelope<Vec<Entry<ArticleAttrs>>> = CmsClient::decode(raw)?;
                Ok(PageView::Blog(map_blog(envelope.data)))
            }
        }
    }
}

/// One page render's view of the resolver: each page type is fetched at most
/// once per scope.
pub struct ResolverScope<'a> {
    resolver: &'a ContentResolver,
    locale: Locale,
    cache: HashMap<PageKind, PageView>,
}

impl ResolverScope<'_> {
    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// The resolved view for a page, fetching on first use.
    pub async fn view(&mut self, page: PageKind) -> &PageView {
        match self.cache.entry(page) {
            MapEntry::Occupied(entry) => entry.into_mut(),
            MapEntry::Vacant(slot) => {
                let view = self.resolver.fetch_safe(page, self.locale).await;
                slot.insert(view)
            }
        }
    }
}

/// Markdown rich text -> presentational nodes.
fn rich(markdown_text: &str) -> Vec<richtext::Node> {
    richtext::parse_fragment(&markdown::render(markdown_text))
}

fn map_home(attrs: HomeAttrs) -> Result<HomeView, FetchError> {
    Ok(HomeView {
        live: true,
        headline: attrs.headline,
        featured_badge: attrs.featured_badge,
        subline: rich(&attrs.subline),
        avatar: required_image(attrs.avatar, "home.avatar")?,
        social_links: attrs.social_links.into_iter().map(map_social_link).collect(),
    })
}

fn map_about(attrs: AboutAttrs) -> Result<AboutView, FetchError> {
    Ok(AboutView {
        live: true,
        title: attrs.title,
        intro: rich(&attrs.intro),
        portrait: required_image(attrs.portrait, "about.portrait")?,
        skills: attrs.skills.into_iter().map(map_skill).collect(),
        work_history: attrs.work_history.into_iter().map(map_work).collect(),
    })
}

fn map_blog(entries: Vec<Entry<ArticleAttrs>>) -> BlogView {
    let mut articles: Vec<ArticleCard> = entries
        .into_iter()
        .map(|entry| map_article(entry.attributes))
        .collect();
    articles.sort_by(|a, b| b.published_at.cmp(&a.published_at));

    BlogView {
        live: true,
        title: "Blog".to_string(),
        articles,
    }
}

fn map_article(attrs: ArticleAttrs) -> ArticleCard {
    let slug = attrs
        .slug
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| slug::slugify(&attrs.title));

    ArticleCard {
        title: attrs.title,
        slug,
        summary: rich(&attrs.summary),
        published_at: attrs.published_at,
        cover: attrs.cover.and_then(optional_image),
    }
}

fn map_skill(attrs: SkillAttrs) -> Skill {
    Skill {
        level: skill_level(&attrs.level),
        name: attrs.name,
    }
}

fn map_work(attrs: WorkAttrs) -> WorkEntry {
    WorkEntry {
        company: attrs.company,
        role: attrs.role,
        timeframe: attrs.timeframe,
        summary: rich(&attrs.summary),
    }
}

fn map_social_link(attrs: SocialLinkAttrs) -> SocialLink {
    SocialLink {
        label: attrs.label,
        url: attrs.url,
        icon: attrs.icon,
    }
}

/// A media field the page cannot render without. An unset relation is a
/// shape mismatch and discards the live record.
fn required_image(field: MediaField, name: &str) -> Result<ImageReference, FetchError> {
    optional_image(field).ok_or_else(|| FetchError::Shape(format!("{name} media is unset")))
}

fn optional_image(field: MediaField) -> Option<ImageReference> {
    let media = field.data?.attributes;

    let mut image = ImageReference::new(
        media.alternative_text.unwrap_or_default(),
        ImageSource {
            url: media.url,
            width: media.width,
            height: media.height,
        },
    );
    image.caption = media.caption;

    for (name, format) in media.formats.unwrap_or_default() {
        if let Some(variant) = SizeVariant::from_name(&name) {
            image.variants.insert(
                variant,
                ImageSource {
                    url: format.url,
                    width: format.width,
                    height: format.height,
                },
            );
        }
    }

    Some(image)
}
