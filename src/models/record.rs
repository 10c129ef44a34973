use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A stored record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Record {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub age: u8,
}

/// Request payload for creating a record.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewRecord {
    #[validate(length(min = 1, max = 64, message = "must be between 1 and 64 characters"))]
    pub name: String,
    #[validate(email(message = "must be a well-formed email address"))]
    pub email: String,
    #[validate(range(max = 150, message = "must be less than or equal to 150"))]
    pub age: u8,
}

impl NewRecord {
    pub fn into_record(self, id: Uuid) -> Record {
        Record {
            id,
            name: self.name,
            email: self.email,
            age: self.age,
        }
    }
}
