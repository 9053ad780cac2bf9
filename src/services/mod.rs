//! Services module - I/O the page depends on before it can render.
//!
//! - [`data_provider`]: Fetches the character feed, degrading to an empty list
//!   when the feed is unreachable or malformed
//!
//! # Usage Example
//!
//! ```ignore
//! use character_carousel::services::{HttpCharacterProvider, load_characters};
//!
//! let provider = HttpCharacterProvider::new()?;
//! let characters = load_characters(&provider, &env.base_url, &metrics).await;
//! ```

pub mod data_provider;

pub use data_provider::{
    CharacterSource, FEED_PATH, FetchError, HttpCharacterProvider, feed_url, load_characters,
};
