use serde::{Deserialize, Serialize};

/// A single entry of the character data feed.
///
/// Entries are immutable once fetched. Their position in the feed is their
/// identity: array order is display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterEntry {
    pub name: String,
    /// External per-character page the slide links out to
    pub url: String,
    /// Image path relative to the base URL (e.g. `/img/goku.png`)
    pub img: String,
}

impl CharacterEntry {
    /// Resolve the image source against the configured base URL.
    ///
    /// This is plain concatenation, matching how the feed URL itself is built.
    pub fn image_src(&self, base_url: &str) -> String {
        format!("{}{}", base_url, self.img)
    }

    /// Tooltip shown on the slide link.
    pub fn link_title(&self) -> String {
        format!("Check \"{}\" characters Page", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn goku() -> CharacterEntry {
        CharacterEntry {
            name: "Goku".to_string(),
            url: "https://x".to_string(),
            img: "/goku.png".to_string(),
        }
    }

    #[test]
    fn test_image_src_concatenates_base_url() {
        assert_eq!(
            goku().image_src("https://cdn.example"),
            "https://cdn.example/goku.png"
        );
    }

    #[test]
    fn test_link_title() {
        assert_eq!(goku().link_title(), "Check \"Goku\" characters Page");
    }

    #[test]
    fn test_deserialize_feed_preserves_order() {
        let json = r#"[
            {"name": "Goku", "url": "https://a", "img": "/goku.png"},
            {"name": "Vegeta", "url": "https://b", "img": "/vegeta.png"}
        ]"#;

        let entries: Vec<CharacterEntry> = serde_json::from_str(json).unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name, "Goku");
        assert_eq!(entries[1].name, "Vegeta");
    }
}
