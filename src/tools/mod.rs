//! Tool abstractions for host agents.
//!
//! Tools are data fetchers that provide context to an embedding agent.
//! The host decides when to invoke a tool and how to present its output.

pub mod crypto_price;

use anyhow::Result;
use async_trait::async_trait;

/// Output from a tool invocation.
#[derive(Debug, Clone)]
pub struct ToolOutput {
    /// Name of the tool
    pub name: String,
    /// JSON data from the tool
    pub data: String,
    /// Time taken to fetch (milliseconds)
    pub fetch_time_ms: u64,
}

/// Trait for tools that provide data to an agent.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Get the tool name.
    fn name(&self) -> &str;

    /// Invoke the tool with a free-form query string.
    ///
    /// Tools report their own domain-level failures inside `data`;
    /// an `Err` here means the tool could not produce output at all.
    async fn invoke(&self, query: &str) -> Result<ToolOutput>;
}
