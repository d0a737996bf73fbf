use async_trait::async_trait;

use crate::error::Result;
use crate::traits::Tool;

#[async_trait]
pub trait Capability: Send + Sync {
    /// Name the model uses to call this capability
    fn name(&self) -> &'static str;

    /// Function definition advertised to the model
    fn definition(&self) -> Tool;

    /// Run the capability with the model-supplied arguments
    async fn call(&self, args: &serde_json::Value) -> Result<String>;
}
