// src/lib.rs
#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

pub mod config;
pub mod error;

pub mod sheet;
pub mod fetch;
pub mod loader;

pub mod card;
pub mod filter;
pub mod render;

pub mod bridge;
pub mod actions;

pub mod progress;
pub mod runner;

pub mod cli;
pub mod gui;
