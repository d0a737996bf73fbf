use std::fmt;
use std::sync::Arc;

use crate::task::fill_placeholders;
use crate::traits::{Capability, Tool};

/// A persona the queen drives through the chat loop. Immutable once built;
/// delegation to other workers is never allowed.
pub struct Worker {
    role: String,
    goal: String,
    backstory: String,
    allow_delegation: bool,
    tools: Vec<Arc<dyn Capability>>,
}

impl Worker {
    pub fn new(role: &str, goal: &str, backstory: &str, tools: Vec<Arc<dyn Capability>>) -> Self {
        Worker {
            role: role.to_string(),
            goal: goal.to_string(),
            backstory: backstory.to_string(),
            allow_delegation: false,
            tools,
        }
    }

    pub fn role(&self) -> &str {
        &self.role
    }

    pub fn goal(&self) -> &str {
        &self.goal
    }

    pub fn backstory(&self) -> &str {
        &self.backstory
    }

    pub fn allow_delegation(&self) -> bool {
        self.allow_delegation
    }

    pub fn tools(&self) -> &[Arc<dyn Capability>] {
        &self.tools
    }

    pub fn tool(&self, name: &str) -> Option<&Arc<dyn Capability>> {
        self.tools.iter().find(|tool| tool.name() == name)
    }

    pub fn tool_definitions(&self) -> Vec<Tool> {
        self.tools.iter().map(|tool| tool.definition()).collect()
    }

    pub fn system_prompt(&self) -> String {
        let tools = if self.tools.is_empty() {
            "None".to_string()
        } else {
            self.tools
                .iter()
                .map(|tool| format!("- {}: {}", tool.name(), tool.definition().function.description))
                .collect::<Vec<_>>()
                .join("\n")
        };

        fill_placeholders(SYSTEM_PROMPT, |key| match key {
            "ROLE" => Some(self.role.as_str()),
            "GOAL" => Some(self.goal.as_str()),
            "BACKSTORY" => Some(self.backstory.as_str()),
            "TOOLS" => Some(tools.as_str()),
            _ => None,
        })
    }
}

impl fmt::Debug for Worker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Worker")
            .field("role", &self.role)
            .field("allow_delegation", &self.allow_delegation)
            .field("tools", &self.tools.iter().map(|t| t.name()).collect::<Vec<_>>())
            .finish()
    }
}

const SYSTEM_PROMPT: &str = r#"You are {ROLE}. {BACKSTORY}

# Your Personal Goal
{GOAL}

# Available Tools
{TOOLS}

# Rules
1. Use your tools to gather real data before answering
2. Work on the task yourself, you cannot hand it to anyone else
3. When you have enough information, reply with your final answer only

# Response Format
Your final answer must satisfy the expected criteria given with the task."#;
