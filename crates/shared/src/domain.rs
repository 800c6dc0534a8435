use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_newtype!(UserId);

/// A roster entry as the view sees it.
///
/// `name` always holds `"{first} {last}"`; first and last are never stored apart and are
/// recovered with [`UserRecord::first_name`] and [`UserRecord::last_name`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: UserId,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
}

impl UserRecord {
    pub fn first_name(&self) -> &str {
        split_name(&self.name).0
    }

    pub fn last_name(&self) -> Option<&str> {
        split_name(&self.name).1
    }
}

/// A record the operator assembled for creation; the id is assigned on reconciliation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUserRecord {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
}

impl NewUserRecord {
    pub fn with_id(self, id: UserId) -> UserRecord {
        UserRecord {
            id,
            name: self.name,
            email: self.email,
            department: self.department,
        }
    }
}

/// Splits a stored name on its first space. Zero or one token yields no last name.
pub fn split_name(name: &str) -> (&str, Option<&str>) {
    match name.split_once(' ') {
        Some((first, last)) if !last.is_empty() => (first, Some(last)),
        Some((first, _)) => (first, None),
        None => (name, None),
    }
}

pub fn join_name(first: &str, last: &str) -> String {
    format!("{first} {last}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_first_space_only() {
        assert_eq!(split_name("Ann Lee"), ("Ann", Some("Lee")));
        assert_eq!(split_name("Mary Ann Lee"), ("Mary", Some("Ann Lee")));
    }

    #[test]
    fn single_token_has_no_last_name() {
        let record = UserRecord {
            id: UserId(3),
            name: "Cher".to_string(),
            email: "cher@example.com".to_string(),
            department: None,
        };
        assert_eq!(record.first_name(), "Cher");
        assert_eq!(record.last_name(), None);
        assert_eq!(split_name(""), ("", None));
        assert_eq!(split_name("Cher "), ("Cher", None));
    }

    #[test]
    fn join_then_split_recovers_parts() {
        let name = join_name("Sam", "Kim");
        assert_eq!(name, "Sam Kim");
        assert_eq!(split_name(&name), ("Sam", Some("Kim")));
    }

    #[test]
    fn user_id_serializes_as_bare_integer() {
        let json = serde_json::to_string(&UserId(42)).expect("json");
        assert_eq!(json, "42");
    }
}
