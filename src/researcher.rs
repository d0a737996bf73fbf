use std::sync::Arc;

use crate::config::Config;
use crate::crew::{Crew, Process};
use crate::error::Result;
use crate::task::Task;
use crate::tools::YoutubeSearchTool;
use crate::traits::Capability;
use crate::worker::Worker;

pub const ROLE: &str = "YouTube Trend Analyst";
pub const GOAL: &str = "Identify trending topics and video ideas for a specific niche on YouTube";
pub const BACKSTORY: &str = "You are an expert in analyzing YouTube trends. \
You use your skills to find out what's currently popular \
and suggest creative video ideas that have the potential to go viral.";

pub const TASK_DESCRIPTION: &str =
    "Search for trending topics and video ideas in the AI and automation niche on YouTube.";
pub const EXPECTED_OUTPUT: &str =
    "A list of 5-10 trending video ideas with a brief explanation for each.";

/// The trend analyst, equipped with YouTube search bound to the configured key.
pub fn build_researcher(config: &Config) -> Arc<Worker> {
    let youtube: Arc<dyn Capability> = Arc::new(YoutubeSearchTool::from_config(config));
    Arc::new(Worker::new(ROLE, GOAL, BACKSTORY, vec![youtube]))
}

pub fn research_task(worker: Arc<Worker>) -> Task {
    Task::new(TASK_DESCRIPTION, EXPECTED_OUTPUT, worker)
}

pub fn youtube_crew(config: &Config) -> Result<Crew> {
    let researcher = build_researcher(config);
    let task = research_task(researcher.clone());
    Crew::new(vec![researcher], vec![task], Process::Sequential)
}
