use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// Parses wall-clock text (`HH:MM`, tolerating trailing seconds) into a
/// time of day. Returns `None` for anything else.
pub fn parse_clock_time(input: &str) -> Option<NaiveTime> {
    let trimmed = input.trim();
    NaiveTime::parse_from_str(trimmed, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M:%S"))
        .ok()
}

/// The kind of condition attached to an ancillary service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionKind {
    /// Surcharge active while the pickup time falls inside a clock window.
    TimeWindow,
    /// Surcharge triggered by the number of extra stops on the booking.
    AdditionalStops,
}

impl ConditionKind {
    /// Maps the wire value of a `condition_type` column to a kind.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "time_window" => Some(Self::TimeWindow),
            "additional_stops" => Some(Self::AdditionalStops),
            _ => None,
        }
    }
}

/// A daily clock window, possibly crossing midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    /// Inclusive start of the window.
    pub start: NaiveTime,
    /// Inclusive end of the window.
    pub end: NaiveTime,
}

impl TimeWindow {
    /// Construct a window from its inclusive bounds.
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self { start, end }
    }

    /// The fallback window (23:00-06:59) used when a time-window service
    /// carries no usable configuration.
    pub fn default_night() -> Self {
        Self {
            start: NaiveTime::from_hms_opt(23, 0, 0).unwrap_or(NaiveTime::MIN),
            end: NaiveTime::from_hms_opt(6, 59, 0).unwrap_or(NaiveTime::MIN),
        }
    }

    /// Whether `time` falls inside the window.
    ///
    /// A window whose start is later than its end crosses midnight, so
    /// membership is `time >= start || time <= end`.
    pub fn contains(&self, time: NaiveTime) -> bool {
        if self.start <= self.end {
            self.start <= time && time <= self.end
        } else {
            time >= self.start || time <= self.end
        }
    }
}

/// Typed condition configuration, parsed once when the pricing snapshot
/// is constructed rather than on every recompute pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionConfig {
    /// Active clock window for a time-window surcharge.
    TimeWindow(TimeWindow),
    /// Minimum extra-stop count before a stop surcharge activates.
    StopThreshold { trigger_count: u32 },
}

#[derive(Debug, Deserialize)]
struct TimeWindowPayload {
    start_time: String,
    end_time: String,
}

#[derive(Debug, Deserialize)]
struct StopThresholdPayload {
    trigger_count: Option<u32>,
}

impl ConditionConfig {
    /// Parse the raw JSON payload of an ancillary service.
    ///
    /// Malformed or incomplete payloads are logged and replaced by the
    /// hardcoded defaults (23:00-06:59 window, trigger count 0); they are
    /// never an error.
    pub fn parse(kind: ConditionKind, raw: &str, service_name: &str) -> Self {
        match kind {
            ConditionKind::TimeWindow => {
                match serde_json::from_str::<TimeWindowPayload>(raw) {
                    Ok(payload) => {
                        let start = parse_clock_time(&payload.start_time);
                        let end = parse_clock_time(&payload.end_time);
                        match (start, end) {
                            (Some(start), Some(end)) => {
                                Self::TimeWindow(TimeWindow::new(start, end))
                            }
                            _ => {
                                log::warn!(
                                    "ancillary service `{service_name}` has unusable window bounds, using default window"
                                );
                                Self::TimeWindow(TimeWindow::default_night())
                            }
                        }
                    }
                    Err(err) => {
                        log::warn!(
                            "ancillary service `{service_name}` has malformed condition config ({err}), using default window"
                        );
                        Self::TimeWindow(TimeWindow::default_night())
                    }
                }
            }
            ConditionKind::AdditionalStops => {
                match serde_json::from_str::<StopThresholdPayload>(raw) {
                    Ok(payload) => Self::StopThreshold {
                        trigger_count: payload.trigger_count.unwrap_or(0),
                    },
                    Err(err) => {
                        log::warn!(
                            "ancillary service `{service_name}` has malformed condition config ({err}), using trigger count 0"
                        );
                        Self::StopThreshold { trigger_count: 0 }
                    }
                }
            }
        }
    }

    /// The kind this configuration belongs to.
    pub fn kind(&self) -> ConditionKind {
        match self {
            Self::TimeWindow(_) => ConditionKind::TimeWindow,
            Self::StopThreshold { .. } => ConditionKind::AdditionalStops,
        }
    }
}

/// Raw ancillary service row as supplied by the external collaborator,
/// with its condition configuration still JSON-encoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AncillaryServiceRecord {
    /// Unique identifier of the ancillary service.
    pub id: i32,
    /// Human-readable name of the surcharge.
    pub name: String,
    /// Wire value of the condition type (`time_window`, `additional_stops`).
    pub condition_type: String,
    /// JSON payload describing when the surcharge applies.
    pub condition_config: String,
    /// Whether the surcharge scales with the occurrence count.
    pub is_per_occurrence: bool,
}

impl AncillaryServiceRecord {
    /// Construct a raw ancillary service row.
    pub fn new(
        id: i32,
        name: impl Into<String>,
        condition_type: impl Into<String>,
        condition_config: impl Into<String>,
        is_per_occurrence: bool,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            condition_type: condition_type.into(),
            condition_config: condition_config.into(),
            is_per_occurrence,
        }
    }
}

/// An ancillary service definition with its condition parsed into a
/// typed configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AncillaryService {
    /// Unique identifier; also the service key in the pricing tiers.
    pub id: i32,
    /// Human-readable name of the surcharge.
    pub name: String,
    /// Parsed condition configuration.
    pub config: ConditionConfig,
    /// Whether the surcharge scales with the occurrence count.
    pub is_per_occurrence: bool,
}

impl AncillaryService {
    /// Parse a raw row into a typed definition.
    ///
    /// Returns `None` for unknown condition types; those rows cannot
    /// participate in any calculation.
    pub fn from_record(record: AncillaryServiceRecord) -> Option<Self> {
        let kind = match ConditionKind::parse(&record.condition_type) {
            Some(kind) => kind,
            None => {
                log::warn!(
                    "ancillary service `{}` has unknown condition type `{}`, skipping",
                    record.name,
                    record.condition_type
                );
                return None;
            }
        };

        let config = ConditionConfig::parse(kind, &record.condition_config, &record.name);

        Some(Self {
            id: record.id,
            name: record.name,
            config,
            is_per_occurrence: record.is_per_occurrence,
        })
    }

    /// The kind of condition this service is gated on.
    pub fn condition_kind(&self) -> ConditionKind {
        self.config.kind()
    }
}
