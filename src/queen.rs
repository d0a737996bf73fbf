use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::crew::{Crew, Process};
use crate::error::{HiveError, Result};
use crate::task::Task;
use crate::traits::{Agent, Executor, Inputs, Tool};
use crate::worker::Worker;
use crate::{Message, ToolCall};

/// Drives each task of a crew through an Ollama chat loop, dispatching the
/// model's tool calls to the assigned worker's capabilities.
pub struct Queen {
    client: Client,
    ollama_url: String,
    model: String,
    max_iterations: usize,
}

impl Agent for Queen {
    fn ollama_url(&self) -> &str {
        &self.ollama_url
    }
    fn model(&self) -> &str {
        &self.model
    }
    fn client(&self) -> &Client {
        &self.client
    }
}

impl Queen {
    pub fn new(config: &Config) -> Queen {
        Queen {
            client: Client::new(),
            ollama_url: config.ollama_url.clone(),
            model: config.ollama_model.clone(),
            max_iterations: config.max_iterations.max(1),
        }
    }

    pub async fn run_task(&self, task: &Task, inputs: &Inputs, context: Option<&str>) -> Result<String> {
        let worker = &task.worker;
        let definitions = worker.tool_definitions();
        let tools = (!definitions.is_empty()).then_some(definitions.as_slice());

        let mut messages = vec![
            Message::system(worker.system_prompt()),
            Message::user(task.prompt(inputs, context)),
        ];

        self.run_agentic_loop(worker, &mut messages, tools).await
    }

    async fn run_agentic_loop(
        &self,
        worker: &Worker,
        messages: &mut Vec<Message>,
        tools: Option<&[Tool]>,
    ) -> Result<String> {
        for iteration in 1..=self.max_iterations {
            debug!(iteration, worker = worker.role(), "agent iteration");

            let reply = self.make_request(messages.as_slice(), tools).await?;
            let calls = reply.tool_calls.clone().unwrap_or_default();

            if calls.is_empty() {
                let answer = reply.content.unwrap_or_default().trim().to_string();
                if answer.is_empty() {
                    return Err(HiveError::Agent(format!(
                        "'{}' returned an empty final answer",
                        worker.role()
                    )));
                }
                return Ok(answer);
            }

            messages.push(reply);
            for call in &calls {
                let result = self.execute_tool_call(worker, call).await;
                messages.push(Message::tool(&call.function.name, result));
            }
        }

        Err(HiveError::MaxIterations(self.max_iterations))
    }

    async fn execute_tool_call(&self, worker: &Worker, call: &ToolCall) -> String {
        let name = &call.function.name;
        // Some servers send arguments as an encoded JSON string
        let args = match &call.function.arguments {
            serde_json::Value::String(raw) => {
                serde_json::from_str(raw).unwrap_or_else(|_| call.function.arguments.clone())
            }
            other => other.clone(),
        };

        info!(worker = worker.role(), tool = %name, args = %args, "tool call");

        let Some(tool) = worker.tool(name) else {
            warn!(tool = %name, "model requested an unknown tool");
            return format!("Tool error: unknown tool '{}'", name);
        };

        match tool.call(&args).await {
            Ok(output) => output,
            Err(HiveError::Tool(message)) => format!("Tool error: {}", message),
            Err(e) => {
                warn!(tool = %name, error = %e, "tool call failed");
                format!("Tool error: {}", e)
            }
        }
    }
}

#[async_trait]
impl Executor for Queen {
    async fn execute(&self, crew: &Crew, inputs: &Inputs) -> Result<String> {
        match crew.process() {
            Process::Sequential => {
                let mut output: Option<String> = None;

                for (index, task) in crew.tasks().iter().enumerate() {
                    info!(task = index + 1, worker = task.worker.role(), "starting task");
                    let result = self.run_task(task, inputs, output.as_deref()).await?;
                    output = Some(result);
                }

                output.ok_or_else(|| HiveError::Plan("crew has no tasks".to_string()))
            }
        }
    }
}
