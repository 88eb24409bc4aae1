use crate::error::{FormField, ValidationError, ValidationErrorKind};
use crate::models::{PredictionContext, PredictionRequest, RuntimeEnv, ServiceType, TimeSlot};
use chrono::{NaiveDateTime, SecondsFormat, TimeZone, Utc};
use std::str::FromStr;
use uuid::Uuid;

/// Format produced by a `datetime-local` input.
pub const FORM_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M";
const FORM_TIMESTAMP_WITH_SECONDS: &str = "%Y-%m-%dT%H:%M:%S";

/// Raw prediction form exactly as the inputs hold it.
#[derive(Debug, Clone, PartialEq)]
pub struct ContextForm {
    pub service_id: String,
    pub metric_name: String,
    pub timestamp: String,
    pub service_type: String,
    pub runtime_env: String,
    pub time_slot: String,
    pub weight: String,
    pub expected_users: String,
}

impl ContextForm {
    pub fn with_defaults(now_local: NaiveDateTime) -> Self {
        Self {
            service_id: "svc-01".to_string(),
            metric_name: "cpu_usage".to_string(),
            timestamp: now_local.format(FORM_TIMESTAMP_FORMAT).to_string(),
            service_type: ServiceType::default().to_string(),
            runtime_env: RuntimeEnv::default().to_string(),
            time_slot: TimeSlot::default().to_string(),
            weight: "1.0".to_string(),
            expected_users: "100".to_string(),
        }
    }

    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::ServiceId => &self.service_id,
            FormField::MetricName => &self.metric_name,
            FormField::Timestamp => &self.timestamp,
            FormField::ServiceType => &self.service_type,
            FormField::RuntimeEnv => &self.runtime_env,
            FormField::TimeSlot => &self.time_slot,
            FormField::Weight => &self.weight,
            FormField::ExpectedUsers => &self.expected_users,
            _ => "",
        }
    }

    pub fn set(&mut self, field: FormField, value: String) {
        match field {
            FormField::ServiceId => self.service_id = value,
            FormField::MetricName => self.metric_name = value,
            FormField::Timestamp => self.timestamp = value,
            FormField::ServiceType => self.service_type = value,
            FormField::RuntimeEnv => self.runtime_env = value,
            FormField::TimeSlot => self.time_slot = value,
            FormField::Weight => self.weight = value,
            FormField::ExpectedUsers => self.expected_users = value,
            other => log::warn!("Prediction form has no field {}", other),
        }
    }
}

/// Turns a `ContextForm` into a validated request. The builder carries the
/// operator's time zone so the wall-clock minute they picked is sent with the
/// offset in force on that date.
#[derive(Debug, Clone, Copy)]
pub struct ContextBuilder<Tz: TimeZone = Utc> {
    zone: Tz,
}

impl ContextBuilder<Utc> {
    pub fn utc() -> Self {
        Self::new(Utc)
    }
}

impl<Tz: TimeZone> ContextBuilder<Tz> {
    pub fn new(zone: Tz) -> Self {
        Self { zone }
    }

    pub fn zone(&self) -> &Tz {
        &self.zone
    }

    pub fn build_context(&self, form: &ContextForm) -> Result<PredictionContext, ValidationError> {
        let context = PredictionContext {
            context_id: Uuid::new_v4(),
            timestamp: self.timestamp(&form.timestamp)?,
            service_type: parse_choice(FormField::ServiceType, &form.service_type)?,
            runtime_env: parse_choice(FormField::RuntimeEnv, &form.runtime_env)?,
            time_slot: parse_choice(FormField::TimeSlot, &form.time_slot)?,
            weight: parse_weight(&form.weight)?,
            expected_users: parse_count(FormField::ExpectedUsers, &form.expected_users)?,
        };
        log::debug!("Built prediction context {}", context.context_id);
        Ok(context)
    }

    pub fn build_request(&self, form: &ContextForm) -> Result<PredictionRequest, ValidationError> {
        self.try_build_request(form).inspect_err(|err| {
            log::warn!("Prediction form rejected: {}", err);
        })
    }

    fn try_build_request(&self, form: &ContextForm) -> Result<PredictionRequest, ValidationError> {
        Ok(PredictionRequest {
            service_id: require(FormField::ServiceId, &form.service_id)?,
            metric_name: require(FormField::MetricName, &form.metric_name)?,
            context: self.build_context(form)?,
        })
    }

    /// Minute-precision local input to RFC 3339 with seconds and the offset
    /// of that instant. A repeated hour resolves to its first occurrence.
    fn timestamp(&self, raw: &str) -> Result<String, ValidationError> {
        let raw = require(FormField::Timestamp, raw)?;
        let naive = NaiveDateTime::parse_from_str(&raw, FORM_TIMESTAMP_FORMAT)
            .or_else(|_| NaiveDateTime::parse_from_str(&raw, FORM_TIMESTAMP_WITH_SECONDS))
            .map_err(|_| {
                ValidationError::new(
                    FormField::Timestamp,
                    ValidationErrorKind::InvalidTimestamp(raw.clone()),
                )
            })?;
        let local = self
            .zone
            .from_local_datetime(&naive)
            .earliest()
            .ok_or_else(|| {
                ValidationError::new(
                    FormField::Timestamp,
                    ValidationErrorKind::NonexistentLocalTime(raw.clone()),
                )
            })?;
        Ok(local.to_rfc3339_opts(SecondsFormat::Secs, true))
    }
}

impl Default for ContextBuilder<Utc> {
    fn default() -> Self {
        Self::utc()
    }
}

pub(crate) fn require(field: FormField, raw: &str) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        Err(ValidationError::missing(field))
    } else {
        Ok(trimmed.to_string())
    }
}

fn parse_choice<T: FromStr>(field: FormField, raw: &str) -> Result<T, ValidationError> {
    let raw = require(field, raw)?;
    T::from_str(&raw)
        .map_err(|_| ValidationError::new(field, ValidationErrorKind::UnknownVariant(raw.clone())))
}

pub(crate) fn parse_weight(raw: &str) -> Result<f64, ValidationError> {
    let raw = require(FormField::Weight, raw)?;
    let weight = raw
        .parse::<f64>()
        .ok()
        .filter(|w| w.is_finite())
        .ok_or_else(|| {
            ValidationError::new(FormField::Weight, ValidationErrorKind::NotANumber(raw.clone()))
        })?;
    if weight < 0.0 {
        return Err(ValidationError::new(FormField::Weight, ValidationErrorKind::Negative));
    }
    // collapse -0.0
    Ok(weight + 0.0)
}

pub(crate) fn parse_count(field: FormField, raw: &str) -> Result<u64, ValidationError> {
    let raw = require(field, raw)?;
    match raw.parse::<u64>() {
        Ok(count) => Ok(count),
        Err(_) if raw.parse::<i64>().is_ok() => {
            Err(ValidationError::new(field, ValidationErrorKind::Negative))
        }
        Err(_) => Err(ValidationError::new(
            field,
            ValidationErrorKind::NotAnInteger(raw.clone()),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{
        DateTime, Datelike, Duration, FixedOffset, LocalResult, NaiveDate, Timelike, Weekday,
    };
    use std::collections::HashSet;

    fn form() -> ContextForm {
        let now = NaiveDate::from_ymd_opt(2025, 3, 1)
            .unwrap()
            .and_hms_opt(9, 30, 42)
            .unwrap();
        ContextForm::with_defaults(now)
    }

    #[test]
    fn defaults_match_the_dashboard() {
        let form = form();
        assert_eq!(form.timestamp, "2025-03-01T09:30");
        assert_eq!(form.service_type, "web");
        assert_eq!(form.runtime_env, "prod");
        assert_eq!(form.time_slot, "peak");
        assert_eq!(form.get(FormField::Weight), "1.0");
    }

    #[test]
    fn builds_a_typed_request() {
        let request = ContextBuilder::utc().build_request(&form()).unwrap();
        assert_eq!(request.service_id, "svc-01");
        assert_eq!(request.metric_name, "cpu_usage");
        assert_eq!(request.context.timestamp, "2025-03-01T09:30:00Z");
        assert_eq!(request.context.service_type, ServiceType::Web);
        assert_eq!(request.context.runtime_env, RuntimeEnv::Prod);
        assert_eq!(request.context.time_slot, TimeSlot::Peak);
        assert_eq!(request.context.weight, 1.0);
        assert_eq!(request.context.expected_users, 100);
    }

    #[test]
    fn context_ids_are_fresh_per_build() {
        let builder = ContextBuilder::utc();
        let form = form();
        let ids: HashSet<_> = (0..64)
            .map(|_| builder.build_context(&form).unwrap().context_id)
            .collect();
        assert_eq!(ids.len(), 64);
    }

    #[test]
    fn timestamp_keeps_the_local_minute_under_any_offset() {
        let mut form = form();
        form.set(FormField::Timestamp, "2025-12-31T23:59".into());
        // UTC+05:30, UTC-08:00, UTC+00:45
        for east_secs in [19_800, -28_800, 2_700] {
            let zone = FixedOffset::east_opt(east_secs).unwrap();
            let context = ContextBuilder::new(zone).build_context(&form).unwrap();
            let parsed = DateTime::parse_from_rfc3339(&context.timestamp).unwrap();
            assert_eq!(parsed.minute(), 59);
            assert_eq!(parsed.hour(), 23);
            assert_eq!(parsed.second(), 0);
            assert_eq!(parsed.offset(), &zone);
        }
        let zone = FixedOffset::east_opt(19_800).unwrap();
        let context = ContextBuilder::new(zone).build_context(&form).unwrap();
        assert_eq!(context.timestamp, "2025-12-31T23:59:00+05:30");
    }

    /// Central European rules: UTC+1, UTC+2 from 01:00 UTC on the last Sunday
    /// of March until 01:00 UTC on the last Sunday of October.
    #[derive(Debug, Clone, Copy)]
    struct CentralEurope;

    impl CentralEurope {
        fn hours(h: i32) -> FixedOffset {
            FixedOffset::east_opt(h * 3600).unwrap()
        }

        fn last_sunday(year: i32, month: u32) -> NaiveDateTime {
            let mut day = NaiveDate::from_ymd_opt(year, month, 31).unwrap();
            while day.weekday() != Weekday::Sun {
                day = day.pred_opt().unwrap();
            }
            day.and_hms_opt(1, 0, 0).unwrap()
        }
    }

    impl TimeZone for CentralEurope {
        type Offset = FixedOffset;

        fn from_offset(_: &FixedOffset) -> Self {
            CentralEurope
        }

        fn offset_from_local_date(&self, local: &NaiveDate) -> LocalResult<FixedOffset> {
            self.offset_from_local_datetime(&local.and_hms_opt(12, 0, 0).unwrap())
        }

        fn offset_from_local_datetime(&self, local: &NaiveDateTime) -> LocalResult<FixedOffset> {
            let valid: Vec<_> = [2, 1]
                .into_iter()
                .map(Self::hours)
                .filter(|offset| {
                    let utc = *local - Duration::seconds(offset.local_minus_utc() as i64);
                    self.offset_from_utc_datetime(&utc) == *offset
                })
                .collect();
            match valid.as_slice() {
                [] => LocalResult::None,
                [only] => LocalResult::Single(*only),
                [first, second, ..] => LocalResult::Ambiguous(*first, *second),
            }
        }

        fn offset_from_utc_date(&self, utc: &NaiveDate) -> FixedOffset {
            self.offset_from_utc_datetime(&utc.and_hms_opt(12, 0, 0).unwrap())
        }

        fn offset_from_utc_datetime(&self, utc: &NaiveDateTime) -> FixedOffset {
            let summer = Self::last_sunday(utc.year(), 3)..Self::last_sunday(utc.year(), 10);
            if summer.contains(utc) {
                Self::hours(2)
            } else {
                Self::hours(1)
            }
        }
    }

    #[test]
    fn offset_follows_the_chosen_date_across_daylight_saving() {
        let builder = ContextBuilder::new(CentralEurope);
        let mut form = form();
        for (raw, expected) in [
            ("2025-07-01T12:00", "2025-07-01T12:00:00+02:00"),
            ("2025-01-15T12:00", "2025-01-15T12:00:00+01:00"),
            ("2025-03-30T03:00", "2025-03-30T03:00:00+02:00"),
            ("2025-10-26T02:30", "2025-10-26T02:30:00+02:00"),
            ("2025-10-26T03:30", "2025-10-26T03:30:00+01:00"),
        ] {
            form.set(FormField::Timestamp, raw.into());
            assert_eq!(builder.build_context(&form).unwrap().timestamp, expected, "{}", raw);
        }
    }

    #[test]
    fn spring_forward_gap_is_rejected() {
        let mut form = form();
        form.set(FormField::Timestamp, "2025-03-30T02:30".into());
        let err = ContextBuilder::new(CentralEurope)
            .build_request(&form)
            .unwrap_err();
        assert_eq!(
            err,
            ValidationError::new(
                FormField::Timestamp,
                ValidationErrorKind::NonexistentLocalTime("2025-03-30T02:30".into())
            )
        );
    }

    #[test]
    fn accepts_seconds_in_timestamp_input() {
        let mut form = form();
        form.set(FormField::Timestamp, "2025-03-01T09:30:15".into());
        let context = ContextBuilder::utc().build_context(&form).unwrap();
        assert_eq!(context.timestamp, "2025-03-01T09:30:15Z");
    }

    #[test]
    fn numeric_strings_parse_to_equal_values() {
        for (raw, expected) in [("0", 0.0), ("2.5", 2.5), (" 10 ", 10.0), ("1e2", 100.0)] {
            assert_eq!(parse_weight(raw).unwrap(), expected);
        }
        for (raw, expected) in [("0", 0), ("42", 42), ("18446744073709551615", u64::MAX)] {
            assert_eq!(parse_count(FormField::ExpectedUsers, raw).unwrap(), expected);
        }
    }

    #[test]
    fn non_numeric_weight_is_rejected_not_zeroed() {
        for raw in ["abc", "1,5", "NaN", "inf"] {
            let mut form = form();
            form.set(FormField::Weight, raw.into());
            let err = ContextBuilder::utc().build_request(&form).unwrap_err();
            assert_eq!(
                err,
                ValidationError::new(FormField::Weight, ValidationErrorKind::NotANumber(raw.into()))
            );
        }
    }

    #[test]
    fn negative_and_fractional_counts_are_rejected() {
        let err = parse_count(FormField::ExpectedUsers, "-3").unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::Negative);
        let err = parse_count(FormField::ExpectedUsers, "1.5").unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::NotAnInteger("1.5".into()));
        let err = parse_weight("-0.1").unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::Negative);
    }

    #[test]
    fn out_of_enum_choices_are_errors() {
        let mut form = form();
        form.set(FormField::RuntimeEnv, "staging".into());
        let err = ContextBuilder::utc().build_context(&form).unwrap_err();
        assert_eq!(err.field, FormField::RuntimeEnv);
        assert_eq!(err.kind, ValidationErrorKind::UnknownVariant("staging".into()));
    }

    #[test]
    fn missing_fields_are_reported() {
        let mut form = form();
        form.set(FormField::MetricName, "   ".into());
        let err = ContextBuilder::utc().build_request(&form).unwrap_err();
        assert_eq!(err, ValidationError::missing(FormField::MetricName));

        let mut form = self::form();
        form.set(FormField::Timestamp, "yesterday".into());
        let err = ContextBuilder::utc().build_request(&form).unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::InvalidTimestamp("yesterday".into()));
    }
}
