//! Historical event listing with category and date-range filters.

use chrono::{DateTime, NaiveDate, Utc};
use tabled::Tabled;

use giga_api::{Event, EventsQuery};
use giga_core::Session;

use crate::cli::{EventsArgs, GlobalOpts};
use crate::error::CliError;
use crate::output;

/// Limit used when a date range is given; the range itself bounds the
/// result set.
const RANGE_LIMIT: u32 = 999;

/// Parse an inclusive `DD/MM/YYYY` pair into a `[from_ts, to_ts)`
/// millisecond window. Validated before any network call so a typo
/// fails fast.
pub fn parse_date_range(dates: Option<&[String]>) -> Result<Option<(i64, i64)>, CliError> {
    let Some([from, to]) = dates else {
        return Ok(None);
    };
    let parse = |input: &str| {
        NaiveDate::parse_from_str(input, "%d/%m/%Y").map_err(|_| CliError::Validation {
            field: "date".into(),
            reason: format!("'{input}' is not a DD/MM/YYYY date"),
        })
    };
    let from = parse(from)?;
    let to = parse(to)?;

    let start = from
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| CliError::Validation {
            field: "date".into(),
            reason: "invalid start of day".into(),
        })?
        .and_utc()
        .timestamp_millis();
    // End of the last day: start of the next day.
    let end = (to + chrono::Days::new(1))
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| CliError::Validation {
            field: "date".into(),
            reason: "invalid end of day".into(),
        })?
        .and_utc()
        .timestamp_millis();

    if end <= start {
        return Err(CliError::Validation {
            field: "date".into(),
            reason: "end date lies before begin date".into(),
        });
    }
    Ok(Some((start, end)))
}

#[derive(Tabled)]
struct EventRow {
    #[tabled(rename = "Time")]
    time: String,
    #[tabled(rename = "Type")]
    event_type: String,
    #[tabled(rename = "Source")]
    source: String,
}

fn to_row(event: &Event) -> EventRow {
    let time = DateTime::<Utc>::from_timestamp_millis(event.ts)
        .map(|dt| dt.format("%m/%d/%Y %H:%M:%S").to_string())
        .unwrap_or_else(|| event.ts.to_string());
    EventRow {
        time,
        event_type: event.event_type.clone().unwrap_or_default(),
        source: event
            .origin
            .as_ref()
            .and_then(|o| o.friendly_name.clone())
            .unwrap_or_else(|| "system".into()),
    }
}

pub async fn handle(
    session: &Session,
    args: EventsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let range = parse_date_range(args.date.as_deref())?;

    let query = match range {
        Some((from_ts, to_ts)) => EventsQuery {
            limit: Some(RANGE_LIMIT),
            from_ts: Some(from_ts),
            to_ts: Some(to_ts),
            group: args.group.map(|g| g.as_str().to_string()),
        },
        None => EventsQuery {
            limit: Some(args.limit),
            group: args.group.map(|g| g.as_str().to_string()),
            ..Default::default()
        },
    };

    let page = session.client().list_events(&query).await?;

    if !global.quiet && matches!(global.output, crate::cli::OutputFormat::Table) {
        match range {
            Some(_) => println!("Showing {} event(s) in range", page.events.len()),
            None => println!("Showing last {} event(s)", page.events.len()),
        }
    }

    let rendered = output::render_list(&global.output, &page.events, to_row, |e| e.id.clone());
    output::print_output(&rendered, global.quiet);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dates(from: &str, to: &str) -> Vec<String> {
        vec![from.to_string(), to.to_string()]
    }

    #[test]
    fn no_dates_means_no_range() {
        assert!(parse_date_range(None).expect("ok").is_none());
    }

    #[test]
    fn range_covers_both_days_inclusive() {
        let (start, end) = parse_date_range(Some(&dates("01/02/2026", "02/02/2026")))
            .expect("valid range")
            .expect("range present");
        // 1 Feb 00:00 UTC to 3 Feb 00:00 UTC, two full days.
        assert_eq!(end - start, 2 * 24 * 60 * 60 * 1000);
    }

    #[test]
    fn malformed_dates_are_rejected() {
        let err = parse_date_range(Some(&dates("2026-02-01", "02/02/2026")))
            .expect_err("not DD/MM/YYYY");
        assert!(matches!(err, CliError::Validation { .. }));

        let err = parse_date_range(Some(&dates("31/02/2026", "01/03/2026")))
            .expect_err("no 31 Feb");
        assert!(matches!(err, CliError::Validation { .. }));
    }

    #[test]
    fn inverted_range_is_rejected() {
        let err = parse_date_range(Some(&dates("02/02/2026", "01/02/2026")))
            .expect_err("end before begin");
        assert!(matches!(err, CliError::Validation { .. }));
    }
}
