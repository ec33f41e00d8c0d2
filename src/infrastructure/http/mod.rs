//! HTTP Infrastructure
//!
//! Axum HTTP 服务器、路由、处理器与错误映射

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use error::ApiError;
pub use server::{HttpServer, ServerConfig};
pub use state::AppState;
