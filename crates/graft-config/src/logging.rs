//! Logging configuration shared by every broker invocation.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Output format for the broker's log stream.
///
/// Build tools usually surface broker output on a developer console, so the
/// human-readable [`LogFormat::Compact`] form is the default. CI embedders
/// can opt into [`LogFormat::Json`] for ingestion by logging stacks.
#[derive(
    Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, EnumString, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum LogFormat {
    /// Structured JSON, one event per line.
    Json,
    /// Human-readable single line output.
    #[default]
    Compact,
}

/// Errors encountered while parsing a [`LogFormat`] from text.
pub type LogFormatParseError = strum::ParseError;
