//! HTML emission
//!
//! The only place markup is produced. Structure comes from presentational
//! node kinds and from these templates; every piece of content text passes
//! through `html_escape`, so CMS input can never contribute tags or
//! attributes to the output.

use crate::config::SiteConfig;
use crate::content::{AboutView, BlogView, HomeView, SizeVariant};
use crate::locale::Locale;
use crate::richtext::{Node, NodeKind};

/// Escape HTML special characters
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn tag_name(kind: NodeKind) -> &'static str {
    match kind {
        NodeKind::Paragraph => "p",
        NodeKind::Bold => "strong",
        NodeKind::Italic => "em",
        NodeKind::Code => "code",
        NodeKind::Underline => "u",
        NodeKind::BulletList => "ul",
        NodeKind::OrderedList => "ol",
        NodeKind::ListItem => "li",
    }
}

/// Emit a presentational node sequence as HTML.
pub fn render_nodes(nodes: &[Node]) -> String {
    let mut out = String::new();
    for node in nodes {
        match node {
            Node::Text(text) => out.push_str(&html_escape(text)),
            Node::Element { kind, children } => {
                let tag = tag_name(*kind);
                out.push_str(&format!("<{}>{}</{}>", tag, render_nodes(children), tag));
            }
        }
    }
    out
}

/// UI strings per locale.
fn nav_labels(locale: Locale) -> [&'static str; 3] {
    match locale {
        Locale::Es => ["Inicio", "Sobre mí", "Blog"],
        Locale::En => ["Home", "About", "Blog"],
    }
}

fn nav(locale: Locale) -> String {
    let prefix = locale.path_prefix();
    let [home, about, blog] = nav_labels(locale);
    format!(
        r#"<nav><a href="{prefix}/">{home}</a> <a href="{prefix}/about">{about}</a> <a href="{prefix}/blog">{blog}</a></nav>"#,
    )
}

/// Common document shell.
fn page(site: &SiteConfig, locale: Locale, title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="{lang}">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title} · {site_title}</title>
<link rel="stylesheet" href="/assets/site.css">
</head>
<body>
{nav}
<main>
{body}
</main>
<footer><p>{author}</p></footer>
</body>
</html>
"#,
        lang = locale.code(),
        title = html_escape(title),
        site_title = html_escape(&site.title),
        nav = nav(locale),
        body = body,
        author = html_escape(&site.author),
    )
}

fn image_tag(url: &str, alt: &str, class: &str) -> String {
    format!(
        r#"<img class="{}" src="{}" alt="{}">"#,
        class,
        html_escape(url),
        html_escape(alt)
    )
}

/// Render the home page.
pub fn home_page(site: &SiteConfig, locale: Locale, view: &HomeView) -> String {
    let badge = view
        .featured_badge
        .as_deref()
        .map(|text| format!(r#"<span class="badge">{}</span>"#, html_escape(text)))
        .unwrap_or_default();

    let social: String = view
        .social_links
        .iter()
        .map(|link| {
            format!(
                r#"<a class="social{}" href="{}">{}</a>"#,
                link.icon
                    .as_deref()
                    .map(|icon| format!(" social-{}", html_escape(icon)))
                    .unwrap_or_default(),
                html_escape(&link.url),
                html_escape(&link.label),
            )
        })
        .collect();

    let body = format!(
        r#"<section class="hero">
{avatar}
{badge}
<h1>{headline}</h1>
<div class="subline">{subline}</div>
<div class="links">{social}</div>
</section>"#,
        avatar = image_tag(
            view.avatar.url_for(SizeVariant::Medium),
            &view.avatar.alt,
            "avatar"
        ),
        badge = badge,
        headline = html_escape(&view.headline),
        subline = render_nodes(&view.subline),
        social = social,
    );

    page(site, locale, &view.headline, &body)
}

/// Render the about page.
pub fn about_page(site: &SiteConfig, locale: Locale, view: &AboutView) -> String {
    let skills: String = view
        .skills
        .iter()
        .map(|skill| {
            format!(
                r#"<li class="skill"><span>{}</span><div class="bar"><div class="fill" style="width:{}%"></div></div></li>"#,
                html_escape(&skill.name),
                skill.level,
            )
        })
        .collect();

    let work: String = view
        .work_history
        .iter()
        .map(|entry| {
            format!(
                r#"<article class="job"><h3>{} · {}</h3><p class="timeframe">{}</p>{}</article>"#,
                html_escape(&entry.role),
                html_escape(&entry.company),
                html_escape(&entry.timeframe),
                render_nodes(&entry.summary),
            )
        })
        .collect();

    let body = format!(
        r#"<section class="about">
{portrait}
<h1>{title}</h1>
<div class="intro">{intro}</div>
<ul class="skills">{skills}</ul>
<section class="work">{work}</section>
</section>"#,
        portrait = image_tag(
            view.portrait.url_for(SizeVariant::Small),
            &view.portrait.alt,
            "portrait"
        ),
        title = html_escape(&view.title),
        intro = render_nodes(&view.intro),
        skills = skills,
        work = work,
    );

    page(site, locale, &view.title, &body)
}

/// Render the blog listing page.
pub fn blog_page(site: &SiteConfig, locale: Locale, view: &BlogView) -> String {
    let articles: String = view
        .articles
        .iter()
        .map(|article| {
            let cover = article
                .cover
                .as_ref()
                .map(|image| image_tag(image.url_for(SizeVariant::Small), &image.alt, "cover"))
                .unwrap_or_default();
            format!(
                r#"<article class="card" id="{slug}">
{cover}
<h2>{title}</h2>
<time datetime="{date}">{date}</time>
<div class="summary">{summary}</div>
</article>"#,
                slug = html_escape(&article.slug),
                cover = cover,
                title = html_escape(&article.title),
                date = article.published_at.format("%Y-%m-%d"),
                summary = render_nodes(&article.summary),
            )
        })
        .collect();

    let body = format!(
        r#"<section class="blog">
<h1>{title}</h1>
{articles}
</section>"#,
        title = html_escape(&view.title),
        articles = articles,
    );

    page(site, locale, &view.title, &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::StaticContent;
    use crate::richtext;

    #[test]
    fn test_html_escape() {
        assert_eq!(html_escape("a < b & c"), "a &lt; b &amp; c");
    }

    #[test]
    fn test_render_nodes_escapes_text() {
        let nodes = richtext::parse_fragment("<p>1 < 2 <strong>bold</strong></p>");
        let html = render_nodes(&nodes);
        assert!(html.contains("1 &lt; 2"));
        assert!(html.contains("<strong>bold</strong>"));
    }

    #[test]
    fn test_script_input_cannot_become_markup() {
        let nodes = richtext::parse_fragment("<p><script>alert(1)</script></p>");
        let html = render_nodes(&nodes);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_home_page_contains_headline_and_nav() {
        let site = SiteConfig::default();
        let content = StaticContent::compiled();
        let html = home_page(&site, Locale::Es, &content.home);
        assert!(html.contains(&html_escape(&content.home.headline)));
        assert!(html.contains("Sobre mí"));
        assert!(html.contains(r#"lang="es""#));
    }

    #[test]
    fn test_about_page_renders_skill_widths() {
        let site = SiteConfig::default();
        let content = StaticContent::compiled();
        let html = about_page(&site, Locale::En, &content.about);
        assert!(html.contains("width:75%"));
        assert!(html.contains(r#"lang="en""#));
    }

    #[test]
    fn test_blog_page_lists_articles() {
        let site = SiteConfig::default();
        let content = StaticContent::compiled();
        let html = blog_page(&site, Locale::Es, &content.blog);
        for article in &content.blog.articles {
            assert!(html.contains(&html_escape(&article.title)));
        }
    }
}
