//! Compiled-in static fallback content
//!
//! Whenever the CMS is unreachable or returns something unexpected, pages
//! render from these records instead. They are complete view models in their
//! own right, so the site never shows an error state, only less fresh
//! content. Built once at process start and passed into the resolver
//! explicitly.

use super::{
    AboutView, ArticleCard, BlogView, HomeView, ImageReference, ImageSource, PageKind, PageView,
    Skill, SocialLink, WorkEntry,
};
use crate::content::markdown;
use crate::richtext;
use chrono::NaiveDate;

/// Static default view models for every page type.
#[derive(Debug, Clone)]
pub struct StaticContent {
    pub home: HomeView,
    pub about: AboutView,
    pub blog: BlogView,
}

impl StaticContent {
    /// Build the compiled-in defaults.
    pub fn compiled() -> Self {
        Self {
            home: default_home(),
            about: default_about(),
            blog: default_blog(),
        }
    }

    /// The static view for a page type.
    pub fn view(&self, page: PageKind) -> PageView {
        match page {
            PageKind::Home => PageView::Home(self.home.clone()),
            PageKind::About => PageView::About(self.about.clone()),
            PageKind::Blog => PageView::Blog(self.blog.clone()),
        }
    }
}

/// Render a markdown snippet into presentational nodes.
fn rich(markdown_text: &str) -> Vec<richtext::Node> {
    richtext::parse_fragment(&markdown::render(markdown_text))
}

fn asset_image(alt: &str, path: &str, width: u32, height: u32) -> ImageReference {
    ImageReference::new(
        alt,
        ImageSource {
            url: path.to_string(),
            width,
            height,
        },
    )
}

fn default_home() -> HomeView {
    HomeView {
        live: false,
        headline: "Hola, soy Elena".to_string(),
        featured_badge: Some("Disponible para proyectos".to_string()),
        subline: rich(
            "Desarrolladora de software en Madrid. Construyo servicios web \
             **rápidos** y accesibles.",
        ),
        avatar: asset_image("Retrato de Elena", "/assets/avatar.jpg", 480, 480),
        social_links: vec![
            SocialLink {
                label: "GitHub".to_string(),
                url: "https://github.com/elena".to_string(),
                icon: Some("github".to_string()),
            },
            SocialLink {
                label: "LinkedIn".to_string(),
                url: "https://linkedin.com/in/elena".to_string(),
                icon: Some("linkedin".to_string()),
            },
        ],
    }
}

fn default_about() -> AboutView {
    AboutView {
        live: false,
        title: "Sobre mí".to_string(),
        intro: rich(
            "Llevo una década construyendo software, de *startups* a equipos \
             grandes. Me interesan los sistemas sencillos que duran.",
        ),
        portrait: asset_image("Retrato de Elena", "/assets/portrait.jpg", 640, 800),
        skills: vec![
            Skill {
                name: "Rust".to_string(),
                level: 75,
            },
            Skill {
                name: "TypeScript".to_string(),
                level: 100,
            },
            Skill {
                name: "PostgreSQL".to_string(),
                level: 50,
            },
        ],
        work_history: vec![
            WorkEntry {
                company: "Acme Estudio".to_string(),
                role: "Ingeniera de software sénior".to_string(),
                timeframe: "2021 — actualidad".to_string(),
                summary: rich("Plataforma de comercio, equipo de cuatro personas."),
            },
            WorkEntry {
                company: "Datamar".to_string(),
                role: "Ingeniera de software".to_string(),
                timeframe: "2017 — 2021".to_string(),
                summary: rich("Tuberías de datos y paneles internos."),
            },
        ],
    }
}

fn default_blog() -> BlogView {
    BlogView {
        live: false,
        title: "Blog".to_string(),
        articles: vec![ArticleCard {
            title: "Por qué este sitio funciona sin su CMS".to_string(),
            slug: "sitio-sin-cms".to_string(),
            summary: rich("Notas sobre contenido de respaldo y degradación elegante."),
            published_at: NaiveDate::from_ymd_opt(2025, 11, 3).unwrap_or_default(),
            cover: None,
        }],
    }
}
