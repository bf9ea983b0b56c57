//! Result codes, severities and character change states
//!
//! Values come from the appendices of the Hero Lab Online API
//! documentation. `ResultCode` is an open newtype so codes the service adds
//! later pass through unmodified; `Severity` and `CharacterChangeStatus` are
//! closed sets and reject unknown values during deserialization.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Fine-grained reason code attached to every response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultCode(pub i64);

impl ResultCode {
    pub const SUCCESS: Self = Self(0);
    /// Request yielded no actual change or effect.
    pub const UNCHANGED: Self = Self(7000);
    /// Inputs were invalid, e.g. out-of-range values.
    pub const USAGE_ERROR: Self = Self(7011);
    /// A prerequisite or situational state precludes the request.
    pub const PRECLUDED: Self = Self(7022);
    /// The token is invalid, typically expired or revoked. Drives the
    /// one-shot refresh-and-retry.
    pub const BAD_API_TOKEN: Self = Self(7100);
    pub const BAD_TOOL_NAME: Self = Self(7101);
    pub const BAD_GAME_SERVER: Self = Self(7102);
    /// Element token is invalid, revoked or inaccessible.
    pub const BAD_ELEMENT_TOKEN: Self = Self(7110);
    pub const BAD_CAMPAIGN: Self = Self(7111);
    pub const BAD_CAST_MEMBER: Self = Self(7113);
    /// Shares its value with `BAD_CAST_MEMBER`.
    pub const BAD_CHARACTER: Self = Self(7113);
    /// Resource retired or trashed.
    pub const STATUS_INACCESSIBLE: Self = Self(7200);
    pub const NOT_SUBSCRIBED: Self = Self(7201);
    pub const DEMO_ACCOUNT: Self = Self(7210);
    /// Transient contention on the campaign, stage or characters.
    pub const CAMPAIGN_CONTENTION: Self = Self(7250);
    pub const CALLER_THROTTLED: Self = Self(7800);
    pub const CALLER_THROTTLED_OVERLAP: Self = Self(7801);
    pub const CALLER_LOCKOUT_TIER: Self = Self(7805);
    pub const OVERLAPPING_CLIENT_LOCKOUT: Self = Self(7810);
    pub const CONNECTION_LIMIT_EXCEEDED: Self = Self(7890);
    /// The public API is currently disabled.
    pub const NOT_ENABLED: Self = Self(7900);
    pub const INTERNAL_ERROR: Self = Self(7977);
    pub const UNSPECIFIED_ERROR: Self = Self(7999);

    /// Symbolic name for known codes.
    pub fn name(self) -> Option<&'static str> {
        let name = match self {
            Self::SUCCESS => "Success",
            Self::UNCHANGED => "Unchanged",
            Self::USAGE_ERROR => "UsageError",
            Self::PRECLUDED => "Precluded",
            Self::BAD_API_TOKEN => "BadApiToken",
            Self::BAD_TOOL_NAME => "BadToolName",
            Self::BAD_GAME_SERVER => "BadGameServer",
            Self::BAD_ELEMENT_TOKEN => "BadElementToken",
            Self::BAD_CAMPAIGN => "BadCampaign",
            Self::BAD_CAST_MEMBER => "BadCastMember",
            Self::STATUS_INACCESSIBLE => "StatusInaccessible",
            Self::NOT_SUBSCRIBED => "NotSubscribed",
            Self::DEMO_ACCOUNT => "DemoAccount",
            Self::CAMPAIGN_CONTENTION => "CampaignContention",
            Self::CALLER_THROTTLED => "CallerThrottled",
            Self::CALLER_THROTTLED_OVERLAP => "CallerThrottledOverlap",
            Self::CALLER_LOCKOUT_TIER => "CallerLockoutTier",
            Self::OVERLAPPING_CLIENT_LOCKOUT => "OverlappingClientLockout",
            Self::CONNECTION_LIMIT_EXCEEDED => "ConnectionLimitExceeded",
            Self::NOT_ENABLED => "NotEnabled",
            Self::INTERNAL_ERROR => "InternalError",
            Self::UNSPECIFIED_ERROR => "UnspecifiedError",
            _ => return None,
        };
        Some(name)
    }
}

impl fmt::Display for ResultCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{} ({name})", self.0),
            None => write!(f, "{}", self.0),
        }
    }
}

/// Outcome tier of a response. Variants are declared in ascending numeric
/// order, so the derived `Ord` matches the service's ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum Severity {
    /// Request completed successfully.
    Success = 1,
    /// Completed, with something worth flagging.
    Info = 50,
    /// Completed, with something probably unexpected.
    Warning = 100,
    /// Request failed.
    Error = 150,
    /// Failed with cascading implications for later requests.
    Failure = 200,
}

impl Severity {
    /// `Error` or worse.
    pub fn is_failure(self) -> bool {
        self >= Severity::Error
    }

    pub fn label(self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
            Severity::Failure => "failure",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl TryFrom<i64> for Severity {
    type Error = UnknownValue;

    fn try_from(value: i64) -> Result<Self, UnknownValue> {
        match value {
            1 => Ok(Severity::Success),
            50 => Ok(Severity::Info),
            100 => Ok(Severity::Warning),
            150 => Ok(Severity::Error),
            200 => Ok(Severity::Failure),
            other => Err(UnknownValue {
                kind: "severity",
                value: other,
            }),
        }
    }
}

impl From<Severity> for i64 {
    fn from(severity: Severity) -> Self {
        severity as i64
    }
}

/// State of a requested character relative to the caller's baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum CharacterChangeStatus {
    /// Invalid or inaccessible; no export.
    Missing = -1,
    /// No change since the baseline; no export.
    Unchanged = 0,
    /// Differential export relative to the baseline (possibly empty).
    Delta = 1,
    /// Full export.
    Complete = 2,
}

impl CharacterChangeStatus {
    /// Whether responses in this state may carry export data.
    pub fn carries_export(self) -> bool {
        matches!(
            self,
            CharacterChangeStatus::Delta | CharacterChangeStatus::Complete
        )
    }
}

impl TryFrom<i64> for CharacterChangeStatus {
    type Error = UnknownValue;

    fn try_from(value: i64) -> Result<Self, UnknownValue> {
        match value {
            -1 => Ok(CharacterChangeStatus::Missing),
            0 => Ok(CharacterChangeStatus::Unchanged),
            1 => Ok(CharacterChangeStatus::Delta),
            2 => Ok(CharacterChangeStatus::Complete),
            other => Err(UnknownValue {
                kind: "character status",
                value: other,
            }),
        }
    }
}

impl From<CharacterChangeStatus> for i64 {
    fn from(status: CharacterChangeStatus) -> Self {
        status as i64
    }
}

/// A numeric value outside a closed code table.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} value {value}")]
pub struct UnknownValue {
    pub kind: &'static str,
    pub value: i64,
}
