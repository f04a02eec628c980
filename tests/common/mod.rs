//! Mutable payload types shared by the integration tests.

#![allow(dead_code)]

use immutable_queue::DeepCopy;

/// A user's postal address.
#[derive(Debug, Clone, PartialEq, Eq, DeepCopy)]
pub struct Address {
    pub country: String,
    pub city: Option<String>,
    pub zip_code: u32,
}

impl Address {
    pub fn new(country: &str, city: &str, zip_code: u32) -> Self {
        Self {
            country: country.to_string(),
            city: Some(city.to_string()),
            zip_code,
        }
    }
}

/// A user with an optional birth date (ISO `yyyy-mm-dd`) and address.
#[derive(Debug, Clone, PartialEq, Eq, DeepCopy)]
pub struct User {
    pub name: String,
    pub birth_date: Option<String>,
    pub address: Option<Address>,
}

impl User {
    pub fn new(name: &str, birth_date: Option<&str>, address: Option<Address>) -> Self {
        Self {
            name: name.to_string(),
            birth_date: birth_date.map(str::to_string),
            address,
        }
    }
}
