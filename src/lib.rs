use serde::{Deserialize, Serialize};

pub mod app;
pub mod config;
pub mod crew;
pub mod error;
pub mod queen;
pub mod researcher;
pub mod task;
pub mod tools;
pub mod traits;
pub mod worker;

pub use app::launch;
pub use config::{Config, Credential};
pub use crew::{Crew, Process};
pub use error::{HiveError, Result};
pub use queen::Queen;
pub use task::Task;
pub use traits::{Executor, Inputs};
pub use worker::Worker;

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct Message {
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<ToolCall>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_name: Option<String>,
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct ToolCall {
    pub function: FunctionCall,
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct FunctionCall {
    pub name: String,
    #[serde(default)]
    pub arguments: serde_json::Value,
}

impl Message {
    fn text(role: &str, content: String) -> Self {
        Message {
            role: role.to_string(),
            content: Some(content),
            tool_calls: None,
            tool_name: None,
        }
    }

    pub fn system(content: String) -> Self {
        Self::text("system", content)
    }

    pub fn user(content: String) -> Self {
        Self::text("user", content)
    }

    pub fn tool(name: &str, content: String) -> Self {
        Message {
            tool_name: Some(name.to_string()),
            ..Self::text("tool", content)
        }
    }
}
