//! LLM backend module
//!
//! Provides a client for OpenAI-compatible chat completion APIs.

pub mod chat_client;

pub use chat_client::{ChatClient, ChatCompletion, ChatMessage};
