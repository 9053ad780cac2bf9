//! Page model and static HTML rendering.
//!
//! The page is rendered once per load from the fetched feed. Every element
//! the carousel or the entrance timeline touches gets an [`ElementHandle`]
//! here, and the handle id is written out as the element's `id` attribute.

use crate::models::CharacterEntry;
use crate::ui::handles::{CarouselHandles, ElementHandle, ElementIds, ElementRole};
use std::borrow::Cow;
use std::fmt::Write as _;

pub const SECTION_LABEL: &str = "Latest DBZ Characters";
pub const LOGO_SRC: &str = "/img/logo.png";
pub const LOGO_ALT: &str = "Logo Dragon Ball Guru";
const LOGO_WIDTH: u32 = 200;
const LOGO_HEIGHT: u32 = 130;
const SLIDE_IMAGE_WIDTH: u32 = 375;
const SLIDE_IMAGE_HEIGHT: u32 = 800;
const REPOSITORY_TITLE: &str = "Go to repo on GitHub";
const CREDIT_URL: &str = "https://dragonball.guru/";
const CREDIT_TITLE: &str = "Visit Dragon Ball Guru webpage";

const PAGE_TITLE: &str = "Unofficial Dragon Ball Characters Slider";
const PAGE_DESCRIPTION: &str = "Discover info about your favourite DBZ characters!";
const PAGE_THUMBNAIL: &str = "https://dbz-slider.vercel.app/thumbnail.png";

/// Attribute a `<meta>` entry is keyed by.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MetaKey {
    Name(String),
    Property(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MetaTag {
    pub key: MetaKey,
    pub content: String,
}

impl MetaTag {
    pub fn name(name: &str, content: &str) -> Self {
        Self {
            key: MetaKey::Name(name.to_string()),
            content: content.to_string(),
        }
    }

    pub fn property(property: &str, content: &str) -> Self {
        Self {
            key: MetaKey::Property(property.to_string()),
            content: content.to_string(),
        }
    }
}

/// Title and meta entries written into `<head>`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DocumentHead {
    pub title: String,
    pub meta: Vec<MetaTag>,
}

impl Default for DocumentHead {
    fn default() -> Self {
        Self {
            title: PAGE_TITLE.to_string(),
            meta: vec![
                MetaTag::name("description", PAGE_DESCRIPTION),
                MetaTag::name(
                    "keywords",
                    "capcom, game, steam, re4, monster hunter, Qwik",
                ),
                MetaTag::name("author", "Manuel Sanchez"),
                MetaTag::property("og:title", PAGE_TITLE),
                MetaTag::property("og:description", PAGE_DESCRIPTION),
                MetaTag::property("og:image", PAGE_THUMBNAIL),
                MetaTag::property("og:url", "https://dbz-slider.vercel.app/"),
                MetaTag::name("twitter:card", "summary_large_image"),
                MetaTag::name("twitter:site", "@manuelsandoble"),
                MetaTag::name("twitter:title", PAGE_TITLE),
                MetaTag::name("twitter:description", PAGE_DESCRIPTION),
                MetaTag::name("twitter:image", PAGE_THUMBNAIL),
            ],
        }
    }
}

impl DocumentHead {
    fn render_into(&self, out: &mut String) {
        let _ = writeln!(out, "<title>{}</title>", escape_html(&self.title));
        for tag in &self.meta {
            let (attribute, key) = match &tag.key {
                MetaKey::Name(name) => ("name", name),
                MetaKey::Property(property) => ("property", property),
            };
            let _ = writeln!(
                out,
                "<meta {}=\"{}\" content=\"{}\">",
                attribute,
                escape_html(key),
                escape_html(&tag.content)
            );
        }
    }
}

/// One slide of the list, derived from a [`CharacterEntry`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Slide {
    pub handle: ElementHandle,
    pub href: String,
    pub title: String,
    pub image_src: String,
    pub alt: String,
}

impl Slide {
    pub fn from_entry(handle: ElementHandle, entry: &CharacterEntry, base_url: &str) -> Self {
        Self {
            handle,
            href: entry.url.clone(),
            title: entry.link_title(),
            image_src: entry.image_src(base_url),
            alt: entry.name.clone(),
        }
    }
}

/// Everything rendered on the page, with a handle per addressable element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageModel {
    pub head: DocumentHead,
    pub container: ElementHandle,
    pub logo: ElementHandle,
    pub repository_link: ElementHandle,
    pub repository_url: String,
    pub slides: Vec<Slide>,
}

impl PageModel {
    /// Lay out the page for `characters`, preserving feed order.
    ///
    /// An empty feed still yields the container and the static chrome.
    pub fn build(
        characters: &[CharacterEntry],
        base_url: &str,
        repository_url: &str,
        ids: &ElementIds,
    ) -> Self {
        let container = ids.allocate(ElementRole::Container);
        let logo = ids.allocate(ElementRole::Logo);
        let repository_link = ids.allocate(ElementRole::RepositoryLink);
        let slides = characters
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                Slide::from_entry(ids.allocate(ElementRole::Slide(index)), entry, base_url)
            })
            .collect();

        Self {
            head: DocumentHead::default(),
            container,
            logo,
            repository_link,
            repository_url: repository_url.to_string(),
            slides,
        }
    }

    /// Handles the carousel controller works on.
    pub fn handles(&self) -> CarouselHandles {
        CarouselHandles {
            container: Some(self.container),
            slides: self.slides.iter().map(|slide| slide.handle).collect(),
            logo: self.logo,
            repository_link: self.repository_link,
        }
    }

    /// Render the full HTML document.
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(2048 + self.slides.len() * 384);

        out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
        out.push_str("<meta charset=\"utf-8\">\n");
        out.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
        self.head.render_into(&mut out);
        out.push_str("</head>\n<body>\n");

        let _ = writeln!(
            out,
            "<section id=\"{}\" class=\"splide\" aria-label=\"{}\">",
            self.container.id, SECTION_LABEL
        );
        let _ = writeln!(
            out,
            "<img id=\"{}\" class=\"logo\" src=\"{}\" alt=\"{}\" width=\"{}\" height=\"{}\">",
            self.logo.id, LOGO_SRC, LOGO_ALT, LOGO_WIDTH, LOGO_HEIGHT
        );
        let _ = writeln!(
            out,
            "<a id=\"{}\" class=\"github\" rel=\"noopener nofollow\" target=\"_blank\" title=\"{}\" href=\"{}\">GitHub</a>",
            self.repository_link.id,
            REPOSITORY_TITLE,
            escape_html(&self.repository_url)
        );

        out.push_str("<div class=\"splide__track\">\n<ul class=\"splide__list\">\n");
        for slide in &self.slides {
            render_slide(slide, &mut out);
        }
        out.push_str("</ul>\n</div>\n");

        let _ = writeln!(
            out,
            "<footer>All these images belong to <a title=\"{}\" rel=\"nofollow noopener\" target=\"_blank\" href=\"{}\">Dragon Ball Guru</a></footer>",
            CREDIT_TITLE, CREDIT_URL
        );
        out.push_str("</section>\n</body>\n</html>\n");

        out
    }
}

fn render_slide(slide: &Slide, out: &mut String) {
    let _ = writeln!(
        out,
        "<li id=\"{}\" class=\"splide__slide\"><a href=\"{}\" title=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\"><img height=\"{}\" width=\"{}\" src=\"{}\" alt=\"{}\"></a></li>",
        slide.handle.id,
        escape_html(&slide.href),
        escape_html(&slide.title),
        SLIDE_IMAGE_HEIGHT,
        SLIDE_IMAGE_WIDTH,
        escape_html(&slide.image_src),
        escape_html(&slide.alt)
    );
}

/// Escape text for use in element content and quoted attribute values.
pub fn escape_html(input: &str) -> Cow<'_, str> {
    if !input.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(input);
    }

    let mut escaped = String::with_capacity(input.len() + 16);
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DEFAULT_REPOSITORY_URL;

    fn entry(name: &str, url: &str, img: &str) -> CharacterEntry {
        CharacterEntry {
            name: name.to_string(),
            url: url.to_string(),
            img: img.to_string(),
        }
    }

    #[test]
    fn test_slide_mapping() {
        let ids = ElementIds::new();
        let page = PageModel::build(
            &[entry("Goku", "https://x", "/goku.png")],
            "https://cdn.test",
            DEFAULT_REPOSITORY_URL,
            &ids,
        );

        let slide = &page.slides[0];
        assert_eq!(slide.href, "https://x");
        assert_eq!(slide.image_src, "https://cdn.test/goku.png");
        assert_eq!(slide.alt, "Goku");
        assert_eq!(slide.handle.role, ElementRole::Slide(0));
    }

    #[test]
    fn test_handles_follow_feed_order() {
        let ids = ElementIds::new();
        let page = PageModel::build(
            &[
                entry("Goku", "https://a", "/a.png"),
                entry("Vegeta", "https://b", "/b.png"),
            ],
            "https://cdn.test",
            DEFAULT_REPOSITORY_URL,
            &ids,
        );

        let handles = page.handles();
        assert_eq!(handles.container, Some(page.container));
        let roles: Vec<_> = handles.slides.iter().map(|h| h.role).collect();
        assert_eq!(roles, vec![ElementRole::Slide(0), ElementRole::Slide(1)]);
    }

    #[test]
    fn test_empty_feed_renders_chrome() {
        let ids = ElementIds::new();
        let page = PageModel::build(&[], "https://cdn.test", DEFAULT_REPOSITORY_URL, &ids);
        let html = page.render();

        assert!(page.slides.is_empty());
        assert!(!html.contains("<li"));
        assert!(html.contains("aria-label=\"Latest DBZ Characters\""));
        assert!(html.contains("alt=\"Logo Dragon Ball Guru\""));
        assert!(html.contains("All these images belong to"));
        assert!(html.contains(DEFAULT_REPOSITORY_URL));
    }

    #[test]
    fn test_render_escapes_feed_values() {
        let ids = ElementIds::new();
        let page = PageModel::build(
            &[entry("<Cell>", "https://x?a=1&b=2", "/cell.png")],
            "https://cdn.test",
            DEFAULT_REPOSITORY_URL,
            &ids,
        );
        let html = page.render();

        assert!(html.contains("alt=\"&lt;Cell&gt;\""));
        assert!(html.contains("href=\"https://x?a=1&amp;b=2\""));
        assert!(html.contains("title=\"Check &quot;&lt;Cell&gt;&quot; characters Page\""));
        assert!(html.contains("rel=\"noopener noreferrer\""));
    }

    #[test]
    fn test_head() {
        let ids = ElementIds::new();
        let html = PageModel::build(&[], "", DEFAULT_REPOSITORY_URL, &ids).render();

        assert!(html.contains("<title>Unofficial Dragon Ball Characters Slider</title>"));
        assert!(html.contains("<meta property=\"og:url\" content=\"https://dbz-slider.vercel.app/\">"));
        assert!(html.contains("<meta name=\"twitter:card\" content=\"summary_large_image\">"));
    }

    #[test]
    fn test_escape_borrows_clean_input() {
        assert!(matches!(escape_html("Goku"), Cow::Borrowed(_)));
        assert_eq!(escape_html("a'b"), "a&#39;b");
    }
}
