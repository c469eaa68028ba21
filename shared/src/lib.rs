use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Charts
// ---------------------------------------------------------------------------

/// Kind of chart a [`ChartSpec`] describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Line,
    Bar,
}

/// Display styling for one series. Colours are CSS colour strings
/// (`#rrggbb`, `rgb(..)`, `rgba(..)`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesStyle {
    pub border_color: Option<String>,
    pub background_color: Option<String>,
    /// Curve tension for line charts (0.0 = straight segments)
    pub tension: f64,
    /// Fill the area under a line series
    pub fill: bool,
}

impl Default for SeriesStyle {
    fn default() -> Self {
        Self {
            border_color: None,
            background_color: None,
            tension: 0.0,
            fill: false,
        }
    }
}

/// A named sequence of values, one per chart label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub name: String,
    pub values: Vec<f64>,
    pub style: SeriesStyle,
}

/// Axis and legend options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartOptions {
    pub begin_at_zero: bool,
    /// Fixed upper bound of the value axis
    pub y_max: Option<f64>,
    pub show_legend: bool,
    pub responsive: bool,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            begin_at_zero: true,
            y_max: None,
            show_legend: true,
            responsive: true,
        }
    }
}

/// Declarative description of a static chart.
///
/// Built once at page load and never mutated; the chart presenter only reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub labels: Vec<String>,
    pub series: Vec<ChartSeries>,
    pub options: ChartOptions,
}

/// One plotted value together with its category label
#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint<'a> {
    pub index: usize,
    pub label: &'a str,
    pub value: f64,
}

impl ChartSpec {
    /// Monthly bookings trend shown on the analytics page
    pub fn bookings_trend() -> Self {
        Self {
            kind: ChartKind::Line,
            labels: ["Jan", "Feb", "Mar", "Apr", "May", "Jun"]
                .iter()
                .map(|l| l.to_string())
                .collect(),
            series: vec![ChartSeries {
                name: "Bookings".to_string(),
                values: vec![120.0, 150.0, 180.0, 220.0, 190.0, 240.0],
                style: SeriesStyle {
                    border_color: Some("#667eea".to_string()),
                    background_color: Some("rgba(102,126,234,0.1)".to_string()),
                    tension: 0.4,
                    fill: true,
                },
            }],
            options: ChartOptions {
                begin_at_zero: true,
                y_max: None,
                show_legend: false,
                responsive: true,
            },
        }
    }

    /// Utilization percentage per classroom
    pub fn classroom_utilization() -> Self {
        Self {
            kind: ChartKind::Bar,
            labels: ["Room A", "Room B", "Lab 101", "Lab 102", "Hall A"]
                .iter()
                .map(|l| l.to_string())
                .collect(),
            series: vec![ChartSeries {
                name: "Utilization %".to_string(),
                values: vec![94.0, 87.0, 92.0, 78.0, 85.0],
                style: SeriesStyle {
                    background_color: Some("#a5b4fc".to_string()),
                    ..SeriesStyle::default()
                },
            }],
            options: ChartOptions {
                begin_at_zero: true,
                y_max: Some(100.0),
                show_legend: false,
                responsive: true,
            },
        }
    }

    /// Points of one series in declared order. Values are passed through untouched;
    /// surplus labels or values are dropped.
    pub fn points(&self, series_index: usize) -> Vec<ChartPoint<'_>> {
        let Some(series) = self.series.get(series_index) else {
            return Vec::new();
        };

        self.labels
            .iter()
            .zip(series.values.iter())
            .enumerate()
            .map(|(index, (label, value))| ChartPoint {
                index,
                label: label.as_str(),
                value: *value,
            })
            .collect()
    }

    /// Bounds of the value axis across all series.
    ///
    /// With `begin_at_zero` the lower bound is `min(0, smallest value)`, so
    /// negative data still fits. The upper bound is `y_max` or the largest
    /// value padded by a tenth of the span.
    pub fn value_range(&self) -> (f64, f64) {
        let values = self.series.iter().flat_map(|s| s.values.iter().copied());
        let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
        let (min, max) = if min.is_finite() { (min, max) } else { (0.0, 0.0) };

        let lower = if self.options.begin_at_zero { min.min(0.0) } else { min };
        let upper = match self.options.y_max {
            Some(y_max) => y_max,
            None => max + (max - lower).abs() * 0.1,
        };

        if upper - lower < 1.0 {
            (lower, lower + 1.0)
        } else {
            (lower, upper)
        }
    }
}

// ---------------------------------------------------------------------------
// Messaging dialog
// ---------------------------------------------------------------------------

/// What a user typed into the "message a teacher" dialog
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MessageDraft {
    pub recipient: String,
    pub subject: String,
    pub body: String,
    pub priority: String,
}

impl MessageDraft {
    /// Names of required fields that are blank
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("recipient", &self.recipient),
            ("subject", &self.subject),
            ("message", &self.body),
            ("priority", &self.priority),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
    }
}

/// Severity tag of a transient notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Info,
    Warning,
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Auto-dismissing user feedback
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
}

impl Notification {
    pub fn new(message: impl Into<String>, severity: Severity) -> Self {
        Self {
            message: message.into(),
            severity,
        }
    }
}

// ---------------------------------------------------------------------------
// Auth
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Teacher,
    Student,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Role::Admin => "admin",
            Role::Teacher => "teacher",
            Role::Student => "student",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: u32,
    pub name: String,
    pub email: String,
    pub role: Role,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserProfile,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignupRequest {
    pub username: String,
    pub password: String,
    pub role: Role,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthStatusResponse {
    pub authenticated: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<UserProfile>,
}

// ---------------------------------------------------------------------------
// Student dashboard
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub id: u32,
    pub title: String,
    /// Local due date-time (ISO 8601 without offset)
    pub due_date: String,
    pub course: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub id: u32,
    pub name: String,
    pub teacher_name: String,
    /// Completion in percent
    pub progress: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentStats {
    pub completed_assignments: u32,
    pub pending_assignments: u32,
    pub average_grade: u32,
    pub total_courses: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleItem {
    pub id: u32,
    pub title: String,
    pub start_time: String,
    pub location: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Announcement {
    pub id: u32,
    pub title: String,
    pub content: String,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeacherContact {
    pub id: u32,
    pub name: String,
    pub email: String,
}

// ---------------------------------------------------------------------------
// Messaging API
// ---------------------------------------------------------------------------

/// Student -> teacher message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SendMessageRequest {
    pub receiver_id: u32,
    pub message: String,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SendMessageResponse {
    pub success: bool,
    pub message: String,
    pub message_id: u32,
}

/// Teacher -> student message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeacherSendMessageRequest {
    pub student_id: u32,
    pub content: String,
}

/// Entry of a teacher's inbox
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InboxMessage {
    pub id: u32,
    pub sender_name: String,
    pub sender_id: u32,
    pub subject: Option<String>,
    pub priority: Option<String>,
    pub message: String,
    pub read: bool,
    /// RFC 3339
    pub timestamp: String,
}

/// Which side of a teacher/student conversation wrote a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConversationSide {
    Teacher,
    Student,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationMessage {
    pub id: u32,
    pub sender: ConversationSide,
    pub content: String,
    pub timestamp: String,
    pub read: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkMessageReadRequest {
    pub message_id: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkConversationReadRequest {
    pub student_id: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkReadResponse {
    pub success: bool,
    pub message: String,
}

/// Student row in the teacher messaging sidebar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentContact {
    pub id: u32,
    pub name: String,
    pub class: String,
    pub unread: u32,
    pub online: bool,
}

// ---------------------------------------------------------------------------
// Notifications
// ---------------------------------------------------------------------------

/// Server-side notification addressed to one user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserNotification {
    pub id: u32,
    pub message: String,
    pub read: bool,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationListResponse {
    pub notifications: Vec<UserNotification>,
}

// ---------------------------------------------------------------------------
// Timetable & bookings
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimetableEntry {
    /// Weekday name, e.g. "Monday"
    pub day: String,
    /// Start of the period, e.g. "08:00"
    pub period: String,
    pub subject: String,
    pub teacher: Option<String>,
    pub classroom: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BookedClassroom {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

/// Booking form payload (camelCase on the wire)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    #[serde(default)]
    pub event_title: Option<String>,
    /// YYYY-MM-DD
    #[serde(default)]
    pub event_date: Option<String>,
    #[serde(default)]
    pub time_slot: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub classroom: BookedClassroom,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub equipment: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingResponse {
    pub success: bool,
    pub message: String,
    pub entry: TimetableEntry,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnavailableSlotsResponse {
    pub classroom: String,
    pub date: String,
    pub weekday: String,
    pub unavailable_slots: Vec<String>,
}

// ---------------------------------------------------------------------------
// Admin
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeacherStatus {
    pub id: u32,
    pub username: String,
    pub is_absent: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkAbsentRequest {
    pub teacher_username: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkAbsentResponse {
    pub success: bool,
    pub message: String,
    pub notified_students: u32,
}

// ---------------------------------------------------------------------------
// Analytics & logging
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsChartsResponse {
    pub booking_trends: ChartSpec,
    pub classroom_utilization: ChartSpec,
}

/// Log line forwarded by the frontend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub level: String,
    pub message: String,
    pub component: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogResponse {
    pub success: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bookings_trend_points_keep_declared_order() {
        let spec = ChartSpec::bookings_trend();
        let points = spec.points(0);

        assert_eq!(points.len(), 6);
        let labels: Vec<&str> = points.iter().map(|p| p.label).collect();
        assert_eq!(labels, vec!["Jan", "Feb", "Mar", "Apr", "May", "Jun"]);
        let values: Vec<f64> = points.iter().map(|p| p.value).collect();
        assert_eq!(values, vec![120.0, 150.0, 180.0, 220.0, 190.0, 240.0]);
        assert!(points.iter().enumerate().all(|(i, p)| p.index == i));
    }

    #[test]
    fn test_points_truncate_to_shorter_side() {
        let mut spec = ChartSpec::classroom_utilization();
        spec.series[0].values.truncate(3);

        assert_eq!(spec.points(0).len(), 3);
        assert!(spec.points(1).is_empty(), "unknown series has no points");
    }

    #[test]
    fn test_value_range_honours_fixed_max() {
        let spec = ChartSpec::classroom_utilization();
        assert_eq!(spec.value_range(), (0.0, 100.0));
    }

    #[test]
    fn test_value_range_pads_open_max() {
        let spec = ChartSpec::bookings_trend();
        let (lower, upper) = spec.value_range();
        assert_eq!(lower, 0.0);
        assert!((upper - 264.0).abs() < 1e-9);
    }

    #[test]
    fn test_value_range_without_zero_baseline() {
        let mut spec = ChartSpec::bookings_trend();
        spec.options.begin_at_zero = false;
        let (lower, _) = spec.value_range();
        assert_eq!(lower, 120.0);
    }

    #[test]
    fn test_value_range_keeps_negative_lower_bound() {
        let mut spec = ChartSpec::bookings_trend();
        for series in &mut spec.series {
            series.values = vec![-20.0, 10.0, 30.0];
        }
        let (lower, upper) = spec.value_range();
        assert_eq!(lower, -20.0);
        assert!((upper - 35.0).abs() < 1e-9);
    }

    #[test]
    fn test_value_range_empty_spec() {
        let spec = ChartSpec {
            kind: ChartKind::Bar,
            labels: vec![],
            series: vec![],
            options: ChartOptions::default(),
        };
        assert_eq!(spec.value_range(), (0.0, 1.0));
    }

    #[test]
    fn test_missing_fields() {
        let draft = MessageDraft {
            recipient: "Ms. Rivera".to_string(),
            subject: "   ".to_string(),
            body: String::new(),
            priority: "normal".to_string(),
        };
        assert_eq!(draft.missing_fields(), vec!["subject", "message"]);
        assert_eq!(MessageDraft::default().missing_fields().len(), 4);
    }

    #[test]
    fn test_wire_formats() {
        let json = serde_json::to_string(&Severity::Success).unwrap();
        assert_eq!(json, "\"success\"");

        let booking: BookingRequest = serde_json::from_str(
            r#"{"eventTitle":"Chess club","eventDate":"2024-12-16","timeSlot":"10:00",
                "duration":"1h","classroom":{"name":"Room 3","type":"teacher1"}}"#,
        )
        .unwrap();
        assert_eq!(booking.event_title.as_deref(), Some("Chess club"));
        assert_eq!(booking.classroom.kind.as_deref(), Some("teacher1"));
        assert!(booking.equipment.is_empty());

        let status = AuthStatusResponse { authenticated: false, user: None };
        assert_eq!(serde_json::to_string(&status).unwrap(), r#"{"authenticated":false}"#);
    }
}
