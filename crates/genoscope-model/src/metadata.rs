// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

pub const NAME_MAX_LEN: usize = 256;

/// Placeholder stored for any metadata field the caller did not supply.
pub const NA: &str = "NA";

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ParseError {
    Empty(&'static str),
    TooLong(&'static str, usize),
    InvalidFormat(&'static str),
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty(name) => write!(f, "{name} must not be empty"),
            Self::TooLong(name, max) => write!(f, "{name} exceeds max length {max}"),
            Self::InvalidFormat(msg) => f.write_str(msg),
        }
    }
}

impl std::error::Error for ParseError {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
#[non_exhaustive]
pub struct PatientName(String);

impl PatientName {
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ParseError::Empty("name"));
        }
        if trimmed.len() > NAME_MAX_LEN {
            return Err(ParseError::TooLong("name", NAME_MAX_LEN));
        }
        Ok(Self(trimmed.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
#[non_exhaustive]
pub struct Age(u32);

impl Age {
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ParseError::Empty("age"));
        }
        if !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseError::InvalidFormat(
                "age must be a non-negative integer",
            ));
        }
        let value = trimmed
            .parse::<u32>()
            .map_err(|_| ParseError::InvalidFormat("age out of range"))?;
        Ok(Self(value))
    }

    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum Sex {
    Male,
    Female,
    Other,
}

impl Sex {
    pub fn parse(raw: &str) -> Result<Self, ParseError> {
        match raw {
            "male" => Ok(Self::Male),
            "female" => Ok(Self::Female),
            "other" => Ok(Self::Other),
            _ => Err(ParseError::InvalidFormat(
                "sex must be one of 'male', 'female', 'other'",
            )),
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
            Self::Other => "other",
        }
    }
}

/// Metadata attached to a classification event. Every field falls back to the
/// literal "NA" when the caller has nothing to supply (batch uploads supply
/// none of them).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct PatientMetadata {
    pub name: String,
    pub age: String,
    pub sex: String,
    pub chronic_illnesses: String,
    pub symptoms: String,
}

impl Default for PatientMetadata {
    fn default() -> Self {
        Self {
            name: NA.to_string(),
            age: NA.to_string(),
            sex: NA.to_string(),
            chronic_illnesses: NA.to_string(),
            symptoms: NA.to_string(),
        }
    }
}

impl PatientMetadata {
    #[must_use]
    pub fn from_form(
        name: &PatientName,
        age: Age,
        sex: Sex,
        chronic_illnesses: &str,
        symptoms: &str,
    ) -> Self {
        Self {
            name: name.as_str().to_string(),
            age: age.value().to_string(),
            sex: sex.as_str().to_string(),
            chronic_illnesses: chronic_illnesses.trim().to_string(),
            symptoms: symptoms.trim().to_string(),
        }
    }
}
