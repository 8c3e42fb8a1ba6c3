//! Data models
//!
//! This module contains all data structures used throughout the SwipeNews backend.
//! Models represent:
//! - Database entities (User, News, PublisherRequest)
//! - Input types consumed by the service layer

mod news;
mod publisher_request;
mod user;

pub use news::{CreateNewsInput, News, UpdateNewsInput};
pub use publisher_request::{PublisherRequest, RequestStatus, SubmitRequestInput};
pub use user::User;
