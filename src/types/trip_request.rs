use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{AssistantError, Result};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Everything the traveller tells us about a trip. Built once per planning call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripRequest {
    /// Departure city
    pub origin: String,
    /// Destination city or region
    pub destination: String,
    /// First day of the trip (YYYY-MM-DD)
    pub start_date: String,
    /// Last day of the trip (YYYY-MM-DD)
    pub end_date: String,
    #[serde(default = "default_travelers")]
    pub travelers: u32,
    #[serde(default)]
    pub preferences: Vec<String>,
    #[serde(default)]
    pub budget: Option<String>,
    #[serde(default)]
    pub special_requirements: Option<String>,
    #[serde(default)]
    pub additional_context: String,
}

fn default_travelers() -> u32 {
    1
}

impl TripRequest {
    pub fn new(
        origin: impl Into<String>,
        destination: impl Into<String>,
        start_date: impl Into<String>,
        end_date: impl Into<String>,
    ) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
            start_date: start_date.into(),
            end_date: end_date.into(),
            travelers: default_travelers(),
            preferences: Vec::new(),
            budget: None,
            special_requirements: None,
            additional_context: String::new(),
        }
    }

    pub fn with_travelers(mut self, travelers: u32) -> Self {
        self.travelers = travelers;
        self
    }

    pub fn with_preferences<I, S>(mut self, preferences: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.preferences = preferences.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_budget(mut self, budget: impl Into<String>) -> Self {
        self.budget = Some(budget.into());
        self
    }

    pub fn with_special_requirements(mut self, requirements: impl Into<String>) -> Self {
        self.special_requirements = Some(requirements.into());
        self
    }

    pub fn with_additional_context(mut self, context: impl Into<String>) -> Self {
        self.additional_context = context.into();
        self
    }

    /// Every calendar day from start to end, inclusive.
    pub fn trip_dates(&self) -> Result<Vec<String>> {
        let (start, end) = self.date_range()?;
        Ok(start
            .iter_days()
            .take_while(|day| *day <= end)
            .map(|day| day.format(DATE_FORMAT).to_string())
            .collect())
    }

    /// Number of days covered by the trip, counting both ends.
    pub fn duration_days(&self) -> Result<u32> {
        let (start, end) = self.date_range()?;
        let days = (end - start).num_days() + 1;
        u32::try_from(days).map_err(|_| {
            AssistantError::Validation(format!("trip duration of {days} days is out of range"))
        })
    }

    fn date_range(&self) -> Result<(NaiveDate, NaiveDate)> {
        let start = parse_date("start_date", &self.start_date)?;
        let end = parse_date("end_date", &self.end_date)?;
        if end < start {
            return Err(AssistantError::Validation(format!(
                "end_date {} is before start_date {}",
                self.end_date, self.start_date
            )));
        }
        Ok((start, end))
    }
}

fn parse_date(field: &str, value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|err| {
        AssistantError::Validation(format!("{field} '{value}' is not a YYYY-MM-DD date: {err}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn goa_trip() -> TripRequest {
        TripRequest::new("Delhi", "Goa", "2025-09-15", "2025-09-20")
            .with_travelers(2)
            .with_preferences(["beach"])
    }

    #[test]
    fn test_trip_dates_are_inclusive() {
        let dates = goa_trip().trip_dates().unwrap();
        assert_eq!(dates.len(), 6);
        assert_eq!(dates.first().unwrap(), "2025-09-15");
        assert_eq!(dates.last().unwrap(), "2025-09-20");
    }

    #[test]
    fn test_duration_days() {
        assert_eq!(goa_trip().duration_days().unwrap(), 6);
    }

    #[test]
    fn test_reversed_range_is_rejected() {
        let trip = TripRequest::new("Delhi", "Goa", "2025-09-20", "2025-09-15");
        assert!(trip.trip_dates().is_err());
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let trip: TripRequest = serde_json::from_str(
            r#"{"origin":"Delhi","destination":"Goa","start_date":"2025-09-15","end_date":"2025-09-20"}"#,
        )
        .unwrap();
        assert_eq!(trip.travelers, 1);
        assert!(trip.preferences.is_empty());
        assert!(trip.budget.is_none());
    }
}
