pub mod youtube;

pub use youtube::{YoutubeSearchTool, YOUTUBE_SEARCH};
