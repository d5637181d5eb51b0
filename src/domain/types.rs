//! Strongly-typed value objects used by domain entities.
//!
//! Identifiers are positive integers assigned by the backend, enumerations are
//! closed sets parsed from their wire spelling. Once a value reaches the domain
//! layer it can be treated as trusted.
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Errors produced when attempting to construct a constrained value object.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// Provided identifier is zero or negative.
    #[error("id must be greater than zero")]
    NonPositiveId,
    /// Provided string contained no non-whitespace characters.
    #[error("value cannot be empty")]
    EmptyString,
    /// Provided value is not a member of a closed enumeration.
    #[error("invalid value: {0}")]
    InvalidValue(String),
    /// Provided date could not be parsed.
    #[error("invalid date: {0}")]
    InvalidDate(String),
    /// Provided uuid failed format validation.
    #[error("invalid uuid value")]
    InvalidUuid,
}

/// Macro to generate lightweight newtypes for positive identifiers.
macro_rules! id_newtype {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(
            Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash,
        )]
        #[serde(try_from = "i32", into = "i32")]
        pub struct $name(i32);

        impl $name {
            /// Creates a new identifier ensuring it is greater than zero.
            pub fn new(value: i32) -> Result<Self, TypeConstraintError> {
                if value > 0 {
                    Ok(Self(value))
                } else {
                    Err(TypeConstraintError::NonPositiveId)
                }
            }

            /// Returns the raw `i32` backing this identifier.
            pub const fn get(self) -> i32 {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<i32> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: i32) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for i32 {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl FromStr for $name {
            type Err = TypeConstraintError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let raw = s
                    .trim()
                    .parse::<i32>()
                    .map_err(|_| TypeConstraintError::InvalidValue(s.to_string()))?;
                Self::new(raw)
            }
        }
    };
}

id_newtype!(ContactId, "Backend identifier of a contact.");
id_newtype!(CompanyId, "Backend identifier of a company.");
id_newtype!(DealId, "Backend identifier of a deal.");
id_newtype!(TaskId, "Backend identifier of a task.");
id_newtype!(ActivityId, "Backend identifier of an activity.");

/// Macro to generate closed enumerations with a fixed wire spelling.
///
/// The first variant listed is the default.
macro_rules! closed_enum {
    ($name:ident, $doc:expr, { $first:ident => $first_str:literal $(, $variant:ident => $str:literal)* $(,)? }) => {
        #[doc = $doc]
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "&'static str")]
        pub enum $name {
            #[default]
            $first,
            $($variant,)*
        }

        impl $name {
            /// Every member in declaration order.
            pub const ALL: &'static [$name] = &[$name::$first $(, $name::$variant)*];

            /// Wire spelling of the member.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $name::$first => $first_str,
                    $($name::$variant => $str,)*
                }
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = TypeConstraintError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_ascii_lowercase().as_str() {
                    $first_str => Ok($name::$first),
                    $($str => Ok($name::$variant),)*
                    _ => Err(TypeConstraintError::InvalidValue(s.to_string())),
                }
            }
        }

        impl TryFrom<String> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }

        impl TryFrom<&str> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                value.parse()
            }
        }

        impl From<$name> for &'static str {
            fn from(value: $name) -> Self {
                value.as_str()
            }
        }
    };
}

closed_enum!(ContactType, "Relationship of a contact to the business.", {
    Lead => "lead",
    Customer => "customer",
    Partner => "partner",
    Vendor => "vendor",
});

closed_enum!(ContactStatus, "Whether a contact is currently engaged.", {
    Active => "active",
    Inactive => "inactive",
});

closed_enum!(DealStage, "Position of a deal in the sales pipeline.", {
    Lead => "lead",
    Qualified => "qualified",
    Proposal => "proposal",
    Negotiation => "negotiation",
    Closed => "closed",
});

closed_enum!(TaskPriority, "Urgency of a task.", {
    Low => "low",
    Medium => "medium",
    High => "high",
    Urgent => "urgent",
});

closed_enum!(TaskCategory, "Kind of work a task represents.", {
    General => "general",
    Meeting => "meeting",
    FollowUp => "follow-up",
    Call => "call",
    Email => "email",
});

closed_enum!(TaskStatus, "Progress of a task.", {
    Pending => "pending",
    InProgress => "in-progress",
    Completed => "completed",
});

closed_enum!(ActivityType, "Kind of interaction recorded in the activity feed.", {
    Other => "other",
    Call => "call",
    Email => "email",
    Meeting => "meeting",
    Note => "note",
});

impl DealStage {
    /// Human readable column title.
    pub const fn label(self) -> &'static str {
        match self {
            DealStage::Lead => "Lead",
            DealStage::Qualified => "Qualified",
            DealStage::Proposal => "Proposal",
            DealStage::Negotiation => "Negotiation",
            DealStage::Closed => "Closed Won",
        }
    }

    /// Next stage in the pipeline, `None` once closed.
    pub fn next(self) -> Option<Self> {
        let index = Self::ALL.iter().position(|stage| *stage == self)?;
        Self::ALL.get(index + 1).copied()
    }

    /// Previous stage in the pipeline, `None` for leads.
    pub fn previous(self) -> Option<Self> {
        let index = Self::ALL.iter().position(|stage| *stage == self)?;
        index.checked_sub(1).and_then(|i| Self::ALL.get(i).copied())
    }

    /// Deals that are not closed are still being worked.
    pub const fn is_active(self) -> bool {
        !matches!(self, DealStage::Closed)
    }
}

impl TaskStatus {
    /// Completed tasks reopen as pending, everything else completes.
    pub const fn toggled(self) -> Self {
        match self {
            TaskStatus::Completed => TaskStatus::Pending,
            TaskStatus::Pending | TaskStatus::InProgress => TaskStatus::Completed,
        }
    }
}

/// Client-generated identifier for a record that has not been persisted yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DraftId(Uuid);

impl DraftId {
    /// Generate a new random draft id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Display for DraftId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for DraftId {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(
            Uuid::parse_str(s).map_err(|_| TypeConstraintError::InvalidUuid)?,
        ))
    }
}

impl Default for DraftId {
    fn default() -> Self {
        Self::new()
    }
}

/// Trims a required string, rejecting blank input.
pub fn non_empty<S: Into<String>>(value: S) -> Result<String, TypeConstraintError> {
    let trimmed = value.into().trim().to_string();
    if trimmed.is_empty() {
        return Err(TypeConstraintError::EmptyString);
    }
    Ok(trimmed)
}

/// Trims an optional string, collapsing blank input to `None`.
pub fn optional_text<S: Into<String>>(value: Option<S>) -> Option<String> {
    value
        .map(|s| s.into().trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Sanitizes user-entered free text that is rendered back as HTML.
pub fn sanitized_text<S: Into<String>>(value: Option<S>) -> Option<String> {
    optional_text(value).and_then(|s| optional_text(Some(ammonia::clean(&s))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_reject_non_positive_values() {
        assert_eq!(ContactId::new(0), Err(TypeConstraintError::NonPositiveId));
        assert_eq!(DealId::new(-4), Err(TypeConstraintError::NonPositiveId));
        assert_eq!(TaskId::new(7).map(TaskId::get), Ok(7));
        assert_eq!("12".parse::<CompanyId>().map(CompanyId::get), Ok(12));
        assert!("twelve".parse::<CompanyId>().is_err());
    }

    #[test]
    fn closed_enums_parse_their_wire_spelling_only() {
        assert_eq!("follow-up".parse(), Ok(TaskCategory::FollowUp));
        assert_eq!(" In-Progress ".parse(), Ok(TaskStatus::InProgress));
        assert_eq!(
            "prospect".parse::<ContactType>(),
            Err(TypeConstraintError::InvalidValue("prospect".to_string()))
        );
        assert_eq!(TaskPriority::Urgent.to_string(), "urgent");
    }

    #[test]
    fn closed_enums_round_trip_through_serde() {
        let json = serde_json::to_string(&TaskCategory::FollowUp).unwrap();
        assert_eq!(json, "\"follow-up\"");
        let parsed: TaskCategory = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, TaskCategory::FollowUp);
        assert!(serde_json::from_str::<DealStage>("\"won\"").is_err());
    }

    #[test]
    fn deal_stages_follow_pipeline_order() {
        assert_eq!(DealStage::Lead.next(), Some(DealStage::Qualified));
        assert_eq!(DealStage::Proposal.next(), Some(DealStage::Negotiation));
        assert_eq!(DealStage::Closed.next(), None);
        assert_eq!(DealStage::Lead.previous(), None);
        assert_eq!(DealStage::Closed.previous(), Some(DealStage::Negotiation));
        assert!(!DealStage::Closed.is_active());
        assert_eq!(DealStage::Closed.label(), "Closed Won");
    }

    #[test]
    fn task_status_toggle() {
        assert_eq!(TaskStatus::Completed.toggled(), TaskStatus::Pending);
        assert_eq!(TaskStatus::Pending.toggled(), TaskStatus::Completed);
        assert_eq!(TaskStatus::InProgress.toggled(), TaskStatus::Completed);
    }

    #[test]
    fn text_helpers_trim_and_sanitize() {
        assert_eq!(non_empty("  Jane "), Ok("Jane".to_string()));
        assert_eq!(non_empty("   "), Err(TypeConstraintError::EmptyString));
        assert_eq!(optional_text(Some("  ")), None);
        assert_eq!(
            sanitized_text(Some("Call back <script>alert(1)</script>")),
            Some("Call back".to_string())
        );
        assert_eq!(sanitized_text(Some("<script>x</script>")), None);
    }
}
