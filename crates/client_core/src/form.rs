//! Draft behind the add/edit form.

use shared::domain::{join_name, NewUserRecord, UserRecord};

use crate::error::FormError;

/// Editable fields of the form. Only [`UserForm::assemble`] turns it into a record, so the
/// coordinator never sees a partial or invalid draft.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub department: String,
}

impl UserForm {
    pub fn blank() -> Self {
        Self::default()
    }

    pub fn from_record(record: &UserRecord) -> Self {
        Self {
            first_name: record.first_name().to_string(),
            last_name: record.last_name().unwrap_or_default().to_string(),
            email: record.email.clone(),
            department: record.department.clone().unwrap_or_default(),
        }
    }

    pub fn assemble(&self) -> Result<NewUserRecord, FormError> {
        let first = required("first name", &self.first_name)?;
        let last = required("last name", &self.last_name)?;
        let email = required("email", &self.email)?;

        if first.contains(char::is_whitespace) {
            return Err(FormError::FirstNameWhitespace);
        }
        if !looks_like_email(email) {
            return Err(FormError::InvalidEmail(email.to_string()));
        }

        let department = self.department.trim();
        Ok(NewUserRecord {
            name: join_name(first, last),
            email: email.to_string(),
            department: (!department.is_empty()).then(|| department.to_string()),
        })
    }
}

fn required<'a>(field: &'static str, value: &'a str) -> Result<&'a str, FormError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(FormError::MissingField(field));
    }
    Ok(value)
}

fn looks_like_email(value: &str) -> bool {
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && !domain.is_empty() && !value.contains(char::is_whitespace)
        }
        None => false,
    }
}
