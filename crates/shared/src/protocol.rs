//! REST payloads exchanged with the remote user collection.

use serde::{Deserialize, Serialize};

use crate::domain::{NewUserRecord, UserId, UserRecord};

/// A user as the remote collection returns it.
///
/// The public placeholder service sends many more fields (address, phone, company, ...);
/// anything not modelled here is ignored. Echoed write responses may omit fields, so
/// everything but the id defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteUser {
    pub id: UserId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
}

impl From<RemoteUser> for UserRecord {
    fn from(value: RemoteUser) -> Self {
        Self {
            id: value.id,
            name: value.name,
            email: value.email,
            department: value.department,
        }
    }
}

impl From<UserRecord> for RemoteUser {
    fn from(value: UserRecord) -> Self {
        Self {
            id: value.id,
            name: value.name,
            email: value.email,
            department: value.department,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
}

impl From<&NewUserRecord> for CreateUserRequest {
    fn from(value: &NewUserRecord) -> Self {
        Self {
            name: value.name.clone(),
            email: value.email.clone(),
            department: value.department.clone(),
        }
    }
}

/// Full replacement body for `PUT /users/:id`.
pub type UpdateUserRequest = RemoteUser;
