pub mod cache;
pub mod config;
pub mod error;
pub mod format;
pub mod models;
pub mod normalize;
pub mod projection;
pub mod sheet;
pub mod urls;
pub mod video_id;
