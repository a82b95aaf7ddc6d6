//! Content module - view models, static fallback and CMS resolution

pub mod fallback;
pub mod image;
pub mod markdown;
pub mod resolver;

pub use fallback::StaticContent;
pub use image::{ImageReference, ImageSource, SizeVariant};
pub use resolver::{ContentResolver, ResolverScope};

use crate::richtext::Node;
use chrono::NaiveDate;

/// The page types the site renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageKind {
    Home,
    About,
    Blog,
}

impl PageKind {
    /// All page types, for diagnostics that walk every page.
    pub const ALL: [PageKind; 3] = [PageKind::Home, PageKind::About, PageKind::Blog];

    /// CMS resource name for this page type.
    pub fn resource(self) -> &'static str {
        match self {
            PageKind::Home => "home",
            PageKind::About => "about",
            PageKind::Blog => "articles",
        }
    }
}

/// A fully resolved, render-ready page.
#[derive(Debug, Clone, PartialEq)]
pub enum PageView {
    Home(HomeView),
    About(AboutView),
    Blog(BlogView),
}

impl PageView {
    /// Whether this view was sourced live from the CMS.
    pub fn live(&self) -> bool {
        match self {
            PageView::Home(view) => view.live,
            PageView::About(view) => view.live,
            PageView::Blog(view) => view.live,
        }
    }
}

/// Home page view model. Every field is defined at render time.
#[derive(Debug, Clone, PartialEq)]
pub struct HomeView {
    pub live: bool,
    pub headline: String,
    pub featured_badge: Option<String>,
    pub subline: Vec<Node>,
    pub avatar: ImageReference,
    pub social_links: Vec<SocialLink>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SocialLink {
    pub label: String,
    pub url: String,
    pub icon: Option<String>,
}

/// About page view model.
#[derive(Debug, Clone, PartialEq)]
pub struct AboutView {
    pub live: bool,
    pub title: String,
    pub intro: Vec<Node>,
    pub portrait: ImageReference,
    pub skills: Vec<Skill>,
    pub work_history: Vec<WorkEntry>,
}

/// A skill with its proficiency on the fixed 0..=100 ordinal scale.
#[derive(Debug, Clone, PartialEq)]
pub struct Skill {
    pub name: String,
    pub level: u8,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WorkEntry {
    pub company: String,
    pub role: String,
    pub timeframe: String,
    pub summary: Vec<Node>,
}

/// Blog listing view model.
#[derive(Debug, Clone, PartialEq)]
pub struct BlogView {
    pub live: bool,
    pub title: String,
    pub articles: Vec<ArticleCard>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArticleCard {
    pub title: String,
    pub slug: String,
    pub summary: Vec<Node>,
    pub published_at: NaiveDate,
    pub cover: Option<ImageReference>,
}
