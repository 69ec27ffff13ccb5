//! UI module - small painting helpers shared by the views

pub mod components;
