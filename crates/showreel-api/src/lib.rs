pub mod sheet;
pub mod traits;
pub mod youtube;
