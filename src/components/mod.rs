//! UI components.

pub mod chat;
pub mod dependency_graph;
pub mod navbar;
pub mod upload_form;
