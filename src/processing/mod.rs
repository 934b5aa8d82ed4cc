//! Resume parsing, role scoring, reasoning and ranking

pub mod document;
pub mod roles;
pub mod matcher;
pub mod reasoning;
pub mod ranking;
pub mod analyzer;
