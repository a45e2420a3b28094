//! Client-side pieces of the blog CLI: API client, models, session
//! handling, and terminal rendering.

pub mod api;
pub mod config;
pub mod models;
pub mod render;
pub mod session;
pub mod tags;
