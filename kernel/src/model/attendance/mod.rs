use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use strum::{AsRefStr, EnumString};

use crate::model::{
    event::Event,
    id::{EventId, UserId},
};

pub mod event;

/// A registration only ever moves forward, `Registered` to `Attended`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, EnumString, AsRefStr)]
pub enum AttendanceStatus {
    #[default]
    Registered,
    Attended,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendanceRecord {
    pub event_id: EventId,
    pub user_id: UserId,
    pub registered_at: DateTime<Utc>,
    pub status: AttendanceStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttendanceSummary {
    pub event_id: EventId,
    pub registered_count: u64,
    pub attended_count: u64,
}

impl AttendanceSummary {
    fn empty(event_id: EventId) -> Self {
        Self {
            event_id,
            registered_count: 0,
            attended_count: 0,
        }
    }

    pub fn total(&self) -> u64 {
        self.registered_count + self.attended_count
    }
}

/// One attendee of one event, joined with whatever is known about the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendanceDetail {
    pub event_id: EventId,
    pub user_id: UserId,
    pub user_name: String,
    pub full_name: String,
    pub email: String,
    pub status: AttendanceStatus,
    pub registered_at: DateTime<Utc>,
}

/// A spreadsheet line: the attendee detail plus the event it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendanceExportRow {
    pub event_name: String,
    pub event_date: NaiveDate,
    pub detail: AttendanceDetail,
}

/// Rolls records up into one summary per requested event, in request order.
///
/// Each record lands in exactly one bucket: `Attended` is counted as
/// attended, everything else as registered. Records for events that were not
/// requested are ignored, and requested events without records get zeroes.
pub fn summarize_attendance(
    event_ids: &[EventId],
    records: &[AttendanceRecord],
) -> Vec<AttendanceSummary> {
    let mut summaries: HashMap<EventId, AttendanceSummary> = event_ids
        .iter()
        .map(|id| (*id, AttendanceSummary::empty(*id)))
        .collect();

    for record in records {
        let Some(summary) = summaries.get_mut(&record.event_id) else {
            continue;
        };
        match record.status {
            AttendanceStatus::Attended => summary.attended_count += 1,
            AttendanceStatus::Registered => summary.registered_count += 1,
        }
    }

    let mut ordered = Vec::with_capacity(event_ids.len());
    for id in event_ids {
        if let Some(summary) = summaries.remove(id) {
            ordered.push(summary);
        }
    }
    ordered
}

/// Pairs attendee details with their events, following the order of
/// `events` and then registration time. Details of unknown events are
/// dropped.
pub fn export_rows(events: &[Event], details: Vec<AttendanceDetail>) -> Vec<AttendanceExportRow> {
    let position: HashMap<EventId, usize> =
        events.iter().enumerate().map(|(i, e)| (e.id, i)).collect();

    let mut rows: Vec<(usize, AttendanceExportRow)> = details
        .into_iter()
        .filter_map(|detail| {
            let index = *position.get(&detail.event_id)?;
            let event = &events[index];
            Some((
                index,
                AttendanceExportRow {
                    event_name: event.event_name.clone(),
                    event_date: event.event_date,
                    detail,
                },
            ))
        })
        .collect();
    rows.sort_by(|(a, ra), (b, rb)| {
        a.cmp(b)
            .then(ra.detail.registered_at.cmp(&rb.detail.registered_at))
    });
    rows.into_iter().map(|(_, row)| row).collect()
}
