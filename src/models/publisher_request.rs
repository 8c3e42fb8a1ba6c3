//! Publisher request model
//!
//! A publisher request is a reader's application for publishing rights.
//! It moves from pending to exactly one of approved or rejected and is
//! terminal after that; a user may hold at most one pending request.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Publisher application record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublisherRequest {
    /// Unique identifier
    pub id: i64,
    /// Id of the applying user
    pub user_id: i64,
    /// Applicant's legal name
    pub full_name: String,
    /// Contact email
    pub email: String,
    /// Contact phone number
    pub phone_number: String,
    /// National identity number
    pub national_id: String,
    /// Review status
    pub status: RequestStatus,
    /// Submission timestamp
    pub created_at: DateTime<Utc>,
}

/// Review status of a publisher request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    /// Awaiting admin decision
    #[default]
    Pending,
    /// Granted; the user's publisher flag was flipped
    Approved,
    /// Denied; no user mutation
    Rejected,
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestStatus::Pending => write!(f, "pending"),
            RequestStatus::Approved => write!(f, "approved"),
            RequestStatus::Rejected => write!(f, "rejected"),
        }
    }
}

impl FromStr for RequestStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(RequestStatus::Pending),
            "approved" => Ok(RequestStatus::Approved),
            "rejected" => Ok(RequestStatus::Rejected),
            _ => Err(format!("Invalid request status: {}", s)),
        }
    }
}

/// Input for submitting a publisher request
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitRequestInput {
    pub user_id: i64,
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    pub national_id: String,
}

impl PublisherRequest {
    /// Build an unsaved pending request from submission input.
    pub fn from_input(input: SubmitRequestInput) -> Self {
        Self {
            id: 0, // Will be set by the database
            user_id: input.user_id,
            full_name: input.full_name,
            email: input.email,
            phone_number: input.phone_number,
            national_id: input.national_id,
            status: RequestStatus::Pending,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_roundtrip() {
        for status in [
            RequestStatus::Pending,
            RequestStatus::Approved,
            RequestStatus::Rejected,
        ] {
            let parsed = RequestStatus::from_str(&status.to_string()).unwrap();
            assert_eq!(parsed, status);
        }
    }

    #[test]
    fn test_status_rejects_unknown() {
        assert!(RequestStatus::from_str("cancelled").is_err());
    }

    #[test]
    fn test_new_request_is_pending() {
        let request = PublisherRequest::from_input(SubmitRequestInput {
            user_id: 7,
            full_name: "Jane Reader".to_string(),
            email: "jane@example.com".to_string(),
            phone_number: "5550001111".to_string(),
            national_id: "123412341234".to_string(),
        });

        assert_eq!(request.status, RequestStatus::Pending);
        assert_eq!(request.user_id, 7);
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let json = serde_json::to_string(&RequestStatus::Approved).unwrap();
        assert_eq!(json, "\"approved\"");
    }
}
