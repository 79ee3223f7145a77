//! Flowpath Core Library
//!
//! Core domain logic for the flowpath CLI: BPMN diagram scanning, the
//! flow-node graph, breadth-first path search, and the engine client.

pub mod bpmn;
pub mod client;
pub mod error;
pub mod graph;
pub mod logging;
