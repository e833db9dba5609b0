#![forbid(unsafe_code)]

//! Domain records held by the store.

use booksmart_validate::schema::REGISTRATION;
use booksmart_validate::{FieldErrors, FieldValues};
use serde::{Deserialize, Serialize};

/// Identifier of a [`User`].
pub type UserId = u64;

/// A library user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique, assigned by the store.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Age in years.
    pub age: u32,
    /// Ten-digit phone number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// `Masculino` or `Femenino`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    /// Population registry key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub curp: Option<String>,
    /// Tax id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rfc: Option<String>,
}

/// A [`User`] before the store assigns its id.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub age: u32,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub curp: Option<String>,
    #[serde(default)]
    pub rfc: Option<String>,
}

impl NewUser {
    /// Minimal record with name, email and age.
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>, age: u32) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            age,
            ..Self::default()
        }
    }

    pub(crate) fn with_id(self, id: UserId) -> User {
        User {
            id,
            name: self.name,
            email: self.email,
            age: self.age,
            phone: self.phone,
            gender: self.gender,
            curp: self.curp,
            rfc: self.rfc,
        }
    }
}

/// Partial update; `None` leaves a field as it is.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub age: Option<u32>,
    pub phone: Option<String>,
    pub gender: Option<String>,
    pub curp: Option<String>,
    pub rfc: Option<String>,
}

impl UserPatch {
    /// Overwrite every field that is set.
    pub fn apply(self, user: &mut User) {
        if let Some(name) = self.name {
            user.name = name;
        }
        if let Some(email) = self.email {
            user.email = email;
        }
        if let Some(age) = self.age {
            user.age = age;
        }
        if self.phone.is_some() {
            user.phone = self.phone;
        }
        if self.gender.is_some() {
            user.gender = self.gender;
        }
        if self.curp.is_some() {
            user.curp = self.curp;
        }
        if self.rfc.is_some() {
            user.rfc = self.rfc;
        }
    }
}

/// The signed-in identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: UserId,
    pub name: String,
    pub email: String,
}

/// A sign-up request that has passed the registration schema.
///
/// The only constructor is [`RegisterData::from_values`], so holding one
/// means every field was certified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterData {
    first_name: String,
    last_name: String,
    email: String,
    phone: String,
    curp: String,
    rfc: String,
    #[serde(skip)]
    password: String,
}

impl RegisterData {
    /// Certify `values` against the registration schema.
    ///
    /// # Errors
    ///
    /// Every failing field, when the schema reports any.
    pub fn from_values(values: &(impl FieldValues + ?Sized)) -> Result<Self, FieldErrors> {
        REGISTRATION.certify(values)?;
        let get = |field: &str| values.value(field).to_string();
        Ok(Self {
            first_name: get("firstName"),
            last_name: get("lastName"),
            email: get("email"),
            phone: get("phone"),
            curp: get("curp"),
            rfc: get("rfc"),
            password: get("password"),
        })
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }

    /// `"<first> <last>"`.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub(crate) fn into_new_user(self, age: u32) -> NewUser {
        NewUser {
            name: self.full_name(),
            email: self.email,
            age,
            phone: Some(self.phone),
            gender: None,
            curp: Some(self.curp),
            rfc: Some(self.rfc),
        }
    }
}

/// Users present when a store starts with seeding enabled.
#[must_use]
pub fn seed_users() -> Vec<NewUser> {
    vec![
        NewUser::new("Juan Pérez", "juan@example.com", 30),
        NewUser::new("María García", "maria@example.com", 25),
        NewUser::new("Carlos López", "carlos@example.com", 35),
    ]
}
