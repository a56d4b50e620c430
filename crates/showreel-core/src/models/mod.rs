mod channel;
mod project;

pub use channel::ChannelInfo;
pub use project::{ProjectRecord, ProjectType};
