mod agent;
mod capability;
mod executor;

pub use agent::{Agent, ChatRequest, ChatResponse, Tool, ToolFunction};
pub use capability::Capability;
pub use executor::{Executor, Inputs};
