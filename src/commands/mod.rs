//! Command implementations for flowpath

pub mod dispatch;
pub mod dump;
pub mod helpers;
pub mod nodes;
pub mod path;
