//! Chart snapshot models
//!
//! The same `ChartSnapshot` struct is used for the creation request body and
//! for decoding the server's response. Every field is optional and omitted
//! from the JSON when unset, so a request only carries what the caller
//! supplied and a response only fills in what the server returned.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A snapshot of a Librato chart
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<ChartSnapshotSubject>,
    /// Time span captured by the snapshot, in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u64>,
    /// Unix epoch seconds as a decimal string
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    /// Rendered image, assigned by the server
    #[serde(rename = "image_href", default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Snapshot resource URL, assigned by the server
    #[serde(rename = "href", default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// What a snapshot was taken of
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartSnapshotSubject {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chart: Option<ChartReference>,
}

/// Identifies a chart and the source stream it is rendered for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartReference {
    pub id: u64,
    pub source: String,
    #[serde(rename = "type")]
    pub chart_type: String,
}

impl ChartSnapshot {
    /// Build the creation payload for a chart.
    pub fn for_chart(
        chart: ChartReference,
        duration: u64,
        end_time: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            subject: Some(ChartSnapshotSubject { chart: Some(chart) }),
            duration: Some(duration),
            end_time: end_time.map(encode_end_time),
            image: None,
            url: None,
        }
    }

    /// The chart this snapshot captures, if the subject was populated.
    pub fn chart(&self) -> Option<&ChartReference> {
        self.subject.as_ref().and_then(|s| s.chart.as_ref())
    }

    /// Decode `end_time` back into a timestamp.
    ///
    /// Returns `None` when the field is absent or is not a decimal epoch value.
    pub fn end_time_utc(&self) -> Option<DateTime<Utc>> {
        self.end_time
            .as_deref()
            .and_then(|s| s.parse::<i64>().ok())
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
    }
}

impl ChartReference {
    pub fn new(id: u64, source: impl Into<String>, chart_type: impl Into<String>) -> Self {
        Self {
            id,
            source: source.into(),
            chart_type: chart_type.into(),
        }
    }
}

/// Encode a timestamp the way the snapshot API expects it: whole epoch seconds as a string.
pub fn encode_end_time(end_time: DateTime<Utc>) -> String {
    end_time.timestamp().to_string()
}
