// src/gui/components/mod.rs
pub mod card_list;
pub mod filter_bar;
pub mod message;
pub mod notice;
