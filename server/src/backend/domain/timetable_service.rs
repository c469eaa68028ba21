//! # Timetable Service
//!
//! Weekly class timetable and classroom bookings. A demo week is generated at
//! startup; bookings are appended as extra entries and block their room and
//! period on that weekday.

use chrono::NaiveDate;
use log::{info, warn};
use std::sync::Arc;

use crate::backend::domain::errors::{DomainError, DomainResult};
use crate::backend::domain::models::User;
use crate::backend::storage::TimetableStorage;
use shared::{BookingRequest, BookingResponse, TimetableEntry, UnavailableSlotsResponse};

pub const SCHOOL_DAYS: [&str; 6] = ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday"];
pub const PERIODS: [&str; 5] = ["08:00", "10:00", "12:00", "14:00", "16:00"];
pub const SUBJECTS: [&str; 7] = ["Math", "Science", "English", "History", "Art", "PE", "Music"];
const ROOM_COUNT: usize = 10;

/// Build the demo week. Assignments are a fixed function of (day, period) so the
/// same teachers always yield the same timetable.
pub fn generate_weekly_timetable(teachers: &[String]) -> Vec<TimetableEntry> {
    let mut entries = Vec::with_capacity(SCHOOL_DAYS.len() * PERIODS.len());
    for (d, day) in SCHOOL_DAYS.iter().enumerate() {
        for (p, period) in PERIODS.iter().enumerate() {
            let slot = d * PERIODS.len() + p;
            let teacher = if teachers.is_empty() {
                None
            } else {
                Some(teachers[slot % teachers.len()].clone())
            };
            entries.push(TimetableEntry {
                day: day.to_string(),
                period: period.to_string(),
                subject: SUBJECTS[(slot * 3 + d) % SUBJECTS.len()].to_string(),
                teacher,
                classroom: format!("Room {}", (slot * 7 + d) % ROOM_COUNT + 1),
            });
        }
    }
    entries
}

/// Weekday name for a `YYYY-MM-DD` date. Anything unparseable is used as-is,
/// so callers may also pass a weekday name directly.
pub fn weekday_name(date: &str) -> String {
    match NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d") {
        Ok(parsed) => parsed.format("%A").to_string(),
        Err(_) => date.trim().to_string(),
    }
}

#[derive(Clone)]
pub struct TimetableService {
    timetable: Arc<dyn TimetableStorage>,
}

impl TimetableService {
    pub fn new(timetable: Arc<dyn TimetableStorage>) -> Self {
        Self { timetable }
    }

    /// Store the generated demo week, once
    pub async fn seed_week(&self, teachers: &[String]) -> DomainResult<usize> {
        if !self.timetable.list_entries().await?.is_empty() {
            return Ok(0);
        }
        let entries = generate_weekly_timetable(teachers);
        let count = entries.len();
        for entry in entries {
            self.timetable.store_entry(entry).await?;
        }
        info!("Generated {} timetable entries", count);
        Ok(count)
    }

    pub async fn list(&self) -> DomainResult<Vec<TimetableEntry>> {
        Ok(self.timetable.list_entries().await?)
    }

    pub async fn unavailable_slots(&self, classroom: &str, date: &str) -> DomainResult<UnavailableSlotsResponse> {
        let weekday = weekday_name(date);
        let entries = self.timetable.list_entries_for(classroom, &weekday).await?;

        Ok(UnavailableSlotsResponse {
            classroom: classroom.to_string(),
            date: date.to_string(),
            weekday,
            unavailable_slots: entries.into_iter().map(|e| e.period).collect(),
        })
    }

    pub async fn book(&self, user: &User, request: BookingRequest) -> DomainResult<BookingResponse> {
        let required = [
            request.event_title.as_deref(),
            request.event_date.as_deref(),
            request.time_slot.as_deref(),
            request.duration.as_deref(),
            request.classroom.name.as_deref(),
        ];
        let fields: Vec<&str> = required
            .iter()
            .filter_map(|f| f.map(str::trim).filter(|f| !f.is_empty()))
            .collect();
        let [title, date, slot, _duration, classroom] = fields[..] else {
            warn!("Rejected booking from {}: missing fields", user.username);
            return Err(DomainError::Validation("Missing required booking information".to_string()));
        };

        let weekday = weekday_name(date);
        let teacher = request
            .classroom
            .kind
            .clone()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| user.username.clone());
        let entry = TimetableEntry {
            day: weekday,
            period: slot.to_string(),
            subject: title.to_string(),
            teacher: Some(teacher),
            classroom: classroom.to_string(),
        };
        if !self.timetable.book_entry_if_free(entry.clone()).await? {
            return Err(DomainError::Conflict(format!(
                "{} is already booked on {} at {}",
                entry.classroom, entry.day, entry.period
            )));
        }
        info!(
            "{} booked {} on {} at {} for '{}'",
            user.username, entry.classroom, entry.day, entry.period, entry.subject
        );

        Ok(BookingResponse {
            success: true,
            message: "Classroom booked successfully!".to_string(),
            entry,
        })
    }
}
