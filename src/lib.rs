//! SwipeNews - backend for a swipeable short-form news feed
//!
//! This library provides the core functionality for the SwipeNews backend.

pub mod api;
pub mod config;
pub mod db;
pub mod models;
pub mod services;
