use anyhow::Result;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::ids::CustomerId;

const INVALID_CUSTOMER: &str = "Customer is invalid";

/// `local@domain.tld`: no whitespace, exactly one `@`, a dot in the domain.
static EMAIL_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern compiles"));

/// A customer with a well-formed `local@domain.tld` email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CustomerRecord")]
pub struct Customer {
    id: CustomerId,
    name: String,
    email: String,
}

#[derive(Debug, Validate)]
struct CustomerDraft {
    #[validate(length(min = 1, message = "name must not be blank"))]
    name: String,

    #[validate(regex(path = *EMAIL_SHAPE, message = "email must look like local@domain.tld"))]
    email: String,
}

#[derive(Deserialize)]
struct CustomerRecord {
    id: CustomerId,
    name: String,
    email: String,
}

impl TryFrom<CustomerRecord> for Customer {
    type Error = anyhow::Error;

    fn try_from(record: CustomerRecord) -> Result<Self> {
        Customer::build(record.id, &record.name, &record.email)
    }
}

impl Customer {
    pub fn create(name: &str, email: &str) -> Result<Self> {
        Self::build(CustomerId::new(), name, email)
    }

    fn build(id: CustomerId, name: &str, email: &str) -> Result<Self> {
        let draft = CustomerDraft {
            name: name.trim().to_string(),
            email: email.trim().to_string(),
        };
        let mut errors = inn_schema::collect(&draft);
        if id.is_blank() {
            errors.push_field("id", "id must not be blank");
        }
        errors.into_result(INVALID_CUSTOMER)?;

        Ok(Self {
            id,
            name: draft.name,
            email: draft.email,
        })
    }

    /// Same customer under a new name.
    pub fn with_name(&self, name: &str) -> Result<Self> {
        Self::build(self.id.clone(), name, &self.email)
    }

    /// Same customer with a new email.
    pub fn with_email(&self, email: &str) -> Result<Self> {
        Self::build(self.id.clone(), &self.name, email)
    }

    pub fn id(&self) -> &CustomerId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inn_core::errors::{ErrorKind, InnError};
    use serde_json::json;

    #[test]
    fn create_valid_customer() {
        let c = Customer::create("Alice", " alice@example.com ").unwrap();
        assert_eq!(c.name(), "Alice");
        assert_eq!(c.email(), "alice@example.com");
    }

    #[test]
    fn email_shape_is_enforced() {
        let rejected = [
            "not-an-email",
            "no-at-sign",
            "a@b",
            "@example.com",
            "a@.com",
            "a@example.",
            "a b@example.com",
            "",
        ];
        for bad in rejected {
            let err = Customer::create("Bob", bad).unwrap_err();
            let inn = InnError::from_anyhow(&err).unwrap();
            assert_eq!(inn.kind, ErrorKind::Validation, "{bad}");
            assert!(inn.errors.as_ref().unwrap().get("email").is_some(), "{bad}");
        }
    }

    #[test]
    fn accented_and_underscored_addresses_are_accepted() {
        for ok in ["ana.pérez@example.mx", "José@correo.tec.mx", "user@exa_mple.com", "a@b.c"] {
            let c = Customer::create("N", ok).unwrap();
            assert_eq!(c.email(), ok);
        }
    }

    #[test]
    fn two_at_signs_are_rejected() {
        let err = Customer::create("N", "a@b@example.com").unwrap_err();
        assert_eq!(InnError::kind_of(&err), ErrorKind::Validation);
    }

    #[test]
    fn blank_name_is_rejected() {
        let err = Customer::create(" ", "a@b.com").unwrap_err();
        assert_eq!(InnError::kind_of(&err), ErrorKind::Validation);
    }

    #[test]
    fn replacements_keep_the_id_and_revalidate() {
        let c = Customer::create("Alice", "alice@example.com").unwrap();
        let renamed = c.with_name("Alicia").unwrap();

        assert_eq!(renamed.id(), c.id());
        assert_eq!(renamed.email(), "alice@example.com");
        assert!(c.with_email("nope").is_err());
    }

    #[test]
    fn deserialization_rejects_bad_email() {
        let bad = serde_json::from_value::<Customer>(json!({"id": "c1", "name": "C", "email": "c1"}));
        assert!(bad.is_err());
        let good: Customer =
            serde_json::from_value(json!({"id": "c1", "name": "C", "email": "c1@example.com"})).unwrap();
        assert_eq!(good.id(), &CustomerId::from("c1"));

        let accented: Customer =
            serde_json::from_value(json!({"id": "c2", "name": "Ana", "email": "ana.pérez@example.mx"})).unwrap();
        assert_eq!(accented.email(), "ana.pérez@example.mx");
    }
}
