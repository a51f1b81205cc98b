pub mod migrate;
pub mod profiles;
pub mod store;
pub mod types;

pub use sqlx::postgres::PgPool;
pub use store::{PgProfileStore, ProfileStore};
pub use types::*;
