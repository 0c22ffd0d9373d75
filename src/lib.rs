pub mod api;
pub mod http_cache;
pub mod http_client;
pub mod openings;
pub mod profile;
pub mod recent_games;
pub mod scout;
pub mod study;
