// src/components/mod.rs
pub mod preview_overlay;
pub mod translation_state;
