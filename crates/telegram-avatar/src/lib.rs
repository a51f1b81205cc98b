//! Telegram Avatar Resolver
//!
//! Resolves a Telegram user's current profile photo to a downloadable URL
//! through the Bot API (`getUserProfilePhotos` then `getFile`).
//! Results, including "this user has no photo", are kept in a moka cache
//! with a per-entry TTL so repeated lookups stay off the network.

pub mod cache;
pub mod error;
pub mod provider;
pub mod resolver;
pub mod types;

pub use cache::{AvatarCache, CacheStats, DEFAULT_CACHE_CAPACITY};
pub use error::{AvatarError, Result};
pub use provider::{AvatarProvider, TelegramClient, DEFAULT_API_URL};
pub use resolver::{AvatarResolver, DEFAULT_AVATAR_TTL};
