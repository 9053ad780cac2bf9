use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Slide-track behaviour of a carousel instance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CarouselKind {
    Slide,
    #[default]
    Loop,
    Fade,
}

/// Options a carousel instance is constructed with.
///
/// Only `per_page` changes at runtime (it follows the responsive slide
/// count). Everything else comes from settings and is fixed for the lifetime
/// of the process. A fresh value is built on every (re)mount via
/// [`CarouselOptions::with_per_page`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarouselOptions {
    #[serde(rename = "type", default)]
    pub kind: CarouselKind,

    #[serde(rename = "loop", default = "default_true")]
    pub loop_slides: bool,

    #[serde(default = "default_per_move")]
    pub per_move: u32,

    /// Filled in from the slide count at mount time
    #[serde(skip, default = "default_per_page")]
    pub per_page: u32,

    #[serde(default = "default_true")]
    pub autoplay: bool,

    #[serde(default = "default_true")]
    pub update_on_move: bool,

    #[serde(default = "default_true")]
    pub drag: bool,

    #[serde(rename = "interval_ms", with = "millis", default = "default_interval")]
    pub interval: Duration,

    #[serde(default)]
    pub pagination: bool,
}

impl Default for CarouselOptions {
    fn default() -> Self {
        Self {
            kind: CarouselKind::Loop,
            loop_slides: true,
            per_move: default_per_move(),
            per_page: default_per_page(),
            autoplay: true,
            update_on_move: true,
            drag: true,
            interval: default_interval(),
            pagination: false,
        }
    }
}

impl CarouselOptions {
    /// Copy of these options with the runtime slide count applied.
    pub fn with_per_page(&self, per_page: u32) -> Self {
        Self {
            per_page: per_page.max(1),
            ..self.clone()
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_per_move() -> u32 {
    1
}

fn default_per_page() -> u32 {
    1
}

fn default_interval() -> Duration {
    Duration::from_millis(2000)
}

mod millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = CarouselOptions::default();

        assert_eq!(options.kind, CarouselKind::Loop);
        assert!(options.loop_slides);
        assert_eq!(options.per_move, 1);
        assert!(options.autoplay);
        assert!(options.update_on_move);
        assert!(options.drag);
        assert_eq!(options.interval, Duration::from_millis(2000));
        assert!(!options.pagination);
    }

    #[test]
    fn test_with_per_page_only_changes_per_page() {
        let base = CarouselOptions::default();
        let options = base.with_per_page(3);

        assert_eq!(options.per_page, 3);
        assert_eq!(options, CarouselOptions { per_page: 3, ..base });
    }

    #[test]
    fn test_with_per_page_never_zero() {
        assert_eq!(CarouselOptions::default().with_per_page(0).per_page, 1);
    }

    #[test]
    fn test_yaml_keys() {
        let yaml = "type: slide\nloop: false\ninterval_ms: 3500\npagination: true\n";
        let options: CarouselOptions = serde_yaml_ng::from_str(yaml).unwrap();

        assert_eq!(options.kind, CarouselKind::Slide);
        assert!(!options.loop_slides);
        assert_eq!(options.interval, Duration::from_millis(3500));
        assert!(options.pagination);
        // Unspecified fields keep their defaults
        assert!(options.autoplay);
        assert_eq!(options.per_move, 1);
    }
}
