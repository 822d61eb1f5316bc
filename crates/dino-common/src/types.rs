//! Pageview record types and the labels the pageviews endpoint uses.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Client category a pageview was counted under.
///
/// `Mobile` never appears in API responses; it labels series that were
/// combined from `MobileApp` and `MobileWeb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Access {
    /// Desktop browsers.
    Desktop,
    /// The official Wikipedia mobile apps.
    MobileApp,
    /// Mobile browsers.
    MobileWeb,
    /// Union of `MobileApp` and `MobileWeb`.
    Mobile,
    /// Every access type together.
    AllAccess,
}

impl Access {
    /// Label used both in request paths and in records.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Desktop => "desktop",
            Self::MobileApp => "mobile-app",
            Self::MobileWeb => "mobile-web",
            Self::Mobile => "mobile",
            Self::AllAccess => "all-access",
        }
    }

    /// Whether the pageviews endpoint accepts this value in a request path.
    pub const fn is_requestable(self) -> bool {
        !matches!(self, Self::Mobile)
    }
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of agent that generated the views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Agent {
    /// Human readers.
    User,
    /// Self-identified crawlers.
    Spider,
    /// Traffic classified as automated.
    Automated,
    /// Every agent type together.
    AllAgents,
}

impl Agent {
    /// Label used both in request paths and in records.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Spider => "spider",
            Self::Automated => "automated",
            Self::AllAgents => "all-agents",
        }
    }
}

impl fmt::Display for Agent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Size of the time bucket views are aggregated into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    /// One bucket per day.
    Daily,
    /// One bucket per calendar month.
    Monthly,
}

impl Granularity {
    /// Label used both in request paths and in records.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Monthly => "monthly",
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One observation: views of one article, for one access type, in one bucket.
///
/// Field names and order match the items returned by the pageviews endpoint,
/// so the same type is used for decoding responses and for the files we write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageviewRecord {
    /// Wiki project, e.g. `en.wikipedia`.
    pub project: String,
    /// Article title as the endpoint spells it (underscores, not spaces).
    pub article: String,
    /// Bucket size.
    pub granularity: Granularity,
    /// `YYYYMMDDHH`.
    pub timestamp: String,
    /// Access type the views were counted under.
    pub access: Access,
    /// Agent type the views were counted under.
    pub agent: Agent,
    /// View count.
    pub views: u64,
}

impl PageviewRecord {
    /// Month label for this record, see [`crate::utils::month_label`].
    pub fn month_label(&self) -> &str {
        crate::utils::month_label(&self.timestamp)
    }
}

/// Ordered sequence of records for one article, increasing timestamp.
pub type ArticleSeries = Vec<PageviewRecord>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_match_endpoint_spelling() {
        assert_eq!(Access::MobileApp.to_string(), "mobile-app");
        assert_eq!(Access::AllAccess.as_str(), "all-access");
        assert_eq!(Agent::AllAgents.as_str(), "all-agents");
        assert_eq!(Granularity::Monthly.to_string(), "monthly");
    }

    #[test]
    fn test_combined_mobile_is_not_requestable() {
        assert!(!Access::Mobile.is_requestable());
        assert!(Access::Desktop.is_requestable());
        assert!(Access::AllAccess.is_requestable());
    }

    #[test]
    fn test_record_decodes_endpoint_item() {
        let json = r#"{
            "project": "en.wikipedia",
            "article": "Tyrannosaurus",
            "granularity": "monthly",
            "timestamp": "2015070100",
            "access": "mobile-web",
            "agent": "user",
            "views": 381212
        }"#;

        let record: PageviewRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.access, Access::MobileWeb);
        assert_eq!(record.agent, Agent::User);
        assert_eq!(record.granularity, Granularity::Monthly);
        assert_eq!(record.views, 381_212);
        assert_eq!(record.month_label(), "20150701");
    }

    #[test]
    fn test_record_rejects_negative_views() {
        let json = r#"{
            "project": "en.wikipedia", "article": "A", "granularity": "monthly",
            "timestamp": "2015070100", "access": "desktop", "agent": "user", "views": -3
        }"#;
        assert!(serde_json::from_str::<PageviewRecord>(json).is_err());
    }
}
