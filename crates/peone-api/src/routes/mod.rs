pub mod health;
pub mod nearby;
pub mod profile;
pub mod ws;
