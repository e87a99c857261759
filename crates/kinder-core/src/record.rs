//! Child record types and field validation

use crate::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Largest accepted age, inclusive
pub const MAX_AGE: u8 = 18;

/// Longest accepted name, in characters
pub const MAX_NAME_LEN: usize = 100;

/// Gender of a child
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
    #[serde(rename = "Otro")]
    Other,
}

impl Gender {
    /// Get the wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "M",
            Self::Female => "F",
            Self::Other => "Otro",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "M" => Ok(Self::Male),
            "F" => Ok(Self::Female),
            "Otro" => Ok(Self::Other),
            other => Err(CoreError::InvalidRecord(format!(
                "gender must be one of M, F, Otro (got {other:?})"
            ))),
        }
    }
}

/// A child record stored in the trees.
///
/// The identifier is fixed at construction; descriptive fields can only be
/// changed through [`RecordUpdate`]. Deserialization runs the same checks as
/// [`Record::new`], so an invalid record never reaches a tree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawRecord")]
pub struct Record {
    id: u64,
    name: String,
    age: u8,
    gender: Gender,
}

#[derive(Deserialize)]
struct RawRecord {
    id: u64,
    name: String,
    age: u8,
    gender: Gender,
}

impl TryFrom<RawRecord> for Record {
    type Error = CoreError;

    fn try_from(raw: RawRecord) -> Result<Self> {
        Record::new(raw.id, raw.name, raw.age, raw.gender)
    }
}

impl Record {
    /// Create a validated record
    pub fn new(id: u64, name: impl Into<String>, age: u8, gender: Gender) -> Result<Self> {
        let name = name.into();
        validate_id(id)?;
        validate_name(&name)?;
        validate_age(age)?;
        Ok(Self {
            id,
            name,
            age,
            gender,
        })
    }

    /// Unique identifier
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn age(&self) -> u8 {
        self.age
    }

    pub fn gender(&self) -> Gender {
        self.gender
    }
}

/// Partial update of a record's descriptive fields
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawRecordUpdate")]
pub struct RecordUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
}

#[derive(Deserialize)]
struct RawRecordUpdate {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    age: Option<u8>,
    #[serde(default)]
    gender: Option<Gender>,
}

impl TryFrom<RawRecordUpdate> for RecordUpdate {
    type Error = CoreError;

    fn try_from(raw: RawRecordUpdate) -> Result<Self> {
        let update = RecordUpdate {
            name: raw.name,
            age: raw.age,
            gender: raw.gender,
        };
        update.validate()?;
        Ok(update)
    }
}

impl RecordUpdate {
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_age(mut self, age: u8) -> Self {
        self.age = Some(age);
        self
    }

    pub fn with_gender(mut self, gender: Gender) -> Self {
        self.gender = Some(gender);
        self
    }

    /// True when no field is set
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.age.is_none() && self.gender.is_none()
    }

    /// Check every present field against the record rules
    pub fn validate(&self) -> Result<()> {
        if let Some(name) = &self.name {
            validate_name(name)?;
        }
        if let Some(age) = self.age {
            validate_age(age)?;
        }
        Ok(())
    }

    /// Copy of `record` with the present fields overwritten
    pub(crate) fn applied_to(&self, record: &Record) -> Record {
        let mut updated = record.clone();
        if let Some(name) = &self.name {
            updated.name = name.clone();
        }
        if let Some(age) = self.age {
            updated.age = age;
        }
        if let Some(gender) = self.gender {
            updated.gender = gender;
        }
        updated
    }
}

fn validate_id(id: u64) -> Result<()> {
    if id == 0 {
        return Err(CoreError::InvalidRecord("id must be greater than 0".into()));
    }
    Ok(())
}

fn validate_name(name: &str) -> Result<()> {
    let len = name.chars().count();
    if len == 0 {
        return Err(CoreError::InvalidRecord("name must not be empty".into()));
    }
    if len > MAX_NAME_LEN {
        return Err(CoreError::InvalidRecord(format!(
            "name must be at most {MAX_NAME_LEN} characters (got {len})"
        )));
    }
    Ok(())
}

fn validate_age(age: u8) -> Result<()> {
    if age > MAX_AGE {
        return Err(CoreError::InvalidRecord(format!(
            "age must be between 0 and {MAX_AGE} (got {age})"
        )));
    }
    Ok(())
}
