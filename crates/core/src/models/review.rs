//! Review model and purpose tags

use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Submission;

/// What a cafe is good for
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PurposeTag {
    GroupMeetups,
    SoloStudy,
    DateSpot,
    QuickCoffee,
    LongSessions,
    Meetings,
    CreativeWork,
    Networking,
}

impl PurposeTag {
    pub const ALL: [PurposeTag; 8] = [
        PurposeTag::GroupMeetups,
        PurposeTag::SoloStudy,
        PurposeTag::DateSpot,
        PurposeTag::QuickCoffee,
        PurposeTag::LongSessions,
        PurposeTag::Meetings,
        PurposeTag::CreativeWork,
        PurposeTag::Networking,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            PurposeTag::GroupMeetups => "group-meetups",
            PurposeTag::SoloStudy => "solo-study",
            PurposeTag::DateSpot => "date-spot",
            PurposeTag::QuickCoffee => "quick-coffee",
            PurposeTag::LongSessions => "long-sessions",
            PurposeTag::Meetings => "meetings",
            PurposeTag::CreativeWork => "creative-work",
            PurposeTag::Networking => "networking",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PurposeTag::GroupMeetups => "Group Meetups",
            PurposeTag::SoloStudy => "Solo Study",
            PurposeTag::DateSpot => "Date Spot",
            PurposeTag::QuickCoffee => "Quick Coffee",
            PurposeTag::LongSessions => "Long Study Sessions",
            PurposeTag::Meetings => "Professional Meetings",
            PurposeTag::CreativeWork => "Creative Work",
            PurposeTag::Networking => "Networking",
        }
    }

    pub fn from_id(id: &str) -> Option<PurposeTag> {
        PurposeTag::ALL.into_iter().find(|t| t.id() == id)
    }
}

impl fmt::Display for PurposeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Everything a user enters in the rating form
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewDraft {
    pub submission: Submission,
    pub review: String,
    pub tips: String,
    pub tags: BTreeSet<PurposeTag>,
}

impl ReviewDraft {
    pub fn new(submission: Submission) -> Self {
        Self {
            submission,
            review: String::new(),
            tips: String::new(),
            tags: BTreeSet::new(),
        }
    }

    pub fn with_review(mut self, review: impl Into<String>) -> Self {
        self.review = review.into();
        self
    }

    pub fn with_tips(mut self, tips: impl Into<String>) -> Self {
        self.tips = tips.into();
        self
    }

    pub fn with_tag(mut self, tag: PurposeTag) -> Self {
        self.tags.insert(tag);
        self
    }
}

/// One accepted rating submission, frozen at the time it was made
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    #[serde(flatten)]
    pub submission: Submission,
    #[serde(default)]
    pub review: String,
    #[serde(default)]
    pub tips: String,
    #[serde(default)]
    pub tags: BTreeSet<PurposeTag>,
    /// Milliseconds since the Unix epoch
    pub timestamp: i64,
}

impl Review {
    pub fn from_draft(draft: ReviewDraft, at: DateTime<Utc>) -> Self {
        Self {
            submission: draft.submission,
            review: draft.review,
            tips: draft.tips,
            tags: draft.tags,
            timestamp: at.timestamp_millis(),
        }
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.timestamp)
    }
}
