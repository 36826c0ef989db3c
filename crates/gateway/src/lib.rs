//! Modelgate core — the tool contract, invocation handler, and provider
//! adapter shared by every transport binding.
//!
//! The crate is organized around one capability: ask the configured language
//! model a question and get its answer back as a value.
//!
//! - **`tool`**: the `queryModel` contract, the request/result types, and the
//!   handler both transports call into.
//! - **`provider`**: the outbound inference call, behind a [`Backend`] trait
//!   so transports and tests never depend on a concrete provider.
//!
//! Provider failures never escape as errors: the adapter normalizes every
//! network, API, and decoding failure into [`ToolResult::Failure`], so a
//! handler call always yields a result the binding can serialize.
//!
//! # Example
//!
//! ```ignore
//! use gateway::{HfBackend, ModelClient, QueryHandler, ToolRequest};
//!
//! let backend = HfBackend::builder("hf_...", "Qwen/Qwen3-14B").build();
//! let handler = QueryHandler::new(ModelClient::new(backend));
//!
//! # async {
//! let result = handler.handle(ToolRequest { prompt: "2+2".into() }).await;
//! # };
//! ```

mod provider;
mod tool;

pub use provider::{
    Backend, DEFAULT_PROVIDER, HfBackend, HfBackendBuilder, ModelClient, ProviderError,
};
pub use tool::{QUERY_TOOL_NAME, QueryHandler, ToolRequest, ToolResult, ToolSpec, query_model};
