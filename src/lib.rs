//! Vision to Values - drafting a company's strategy document with an LLM
//!
//! This crate crawls a company website, synthesizes the seven sections of a
//! Vision to Values document (vision, mission, strategy, objectives,
//! priorities, culture, values), and refines them section by section through
//! a coaching chat.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
