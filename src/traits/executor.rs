use std::collections::HashMap;

use async_trait::async_trait;

use crate::crew::Crew;
use crate::error::Result;

/// Values interpolated into `{key}` placeholders of task text
pub type Inputs = HashMap<String, String>;

#[async_trait]
pub trait Executor: Send + Sync {
    /// Run every task of the crew and return the final text
    async fn execute(&self, crew: &Crew, inputs: &Inputs) -> Result<String>;
}
