//! Read-only dashboard content: the student overview cards and the analytics
//! charts. The data is static demo content; no other service writes it.

use shared::{
    AnalyticsChartsResponse, Announcement, Assignment, ChartSpec, Course, ScheduleItem, StudentStats,
};

#[derive(Clone, Default)]
pub struct DashboardService;

impl DashboardService {
    pub fn new() -> Self {
        Self
    }

    pub fn assignments(&self) -> Vec<Assignment> {
        [
            (1, "Mathematics Quiz", "2024-12-20T23:59:00", "Mathematics"),
            (2, "History Essay", "2024-12-22T23:59:00", "History"),
            (3, "Science Lab Report", "2024-12-25T23:59:00", "Science"),
        ]
        .into_iter()
        .map(|(id, title, due_date, course)| Assignment {
            id,
            title: title.to_string(),
            due_date: due_date.to_string(),
            course: course.to_string(),
        })
        .collect()
    }

    pub fn courses(&self) -> Vec<Course> {
        [
            (1, "Mathematics", "Mrs. Johnson", 75),
            (2, "Science", "Dr. Smith", 60),
            (3, "History", "Mr. Davis", 85),
            (4, "English", "Ms. Wilson", 90),
        ]
        .into_iter()
        .map(|(id, name, teacher_name, progress)| Course {
            id,
            name: name.to_string(),
            teacher_name: teacher_name.to_string(),
            progress,
        })
        .collect()
    }

    pub fn stats(&self) -> StudentStats {
        StudentStats {
            completed_assignments: 12,
            pending_assignments: 5,
            average_grade: 87,
            total_courses: 6,
        }
    }

    pub fn schedule(&self) -> Vec<ScheduleItem> {
        [
            (1, "Mathematics", "2024-12-19T09:00:00", "Room 101"),
            (2, "Science", "2024-12-19T10:30:00", "Lab 205"),
            (3, "History", "2024-12-19T13:00:00", "Room 203"),
            (4, "English", "2024-12-19T14:30:00", "Room 105"),
        ]
        .into_iter()
        .map(|(id, title, start_time, location)| ScheduleItem {
            id,
            title: title.to_string(),
            start_time: start_time.to_string(),
            location: location.to_string(),
        })
        .collect()
    }

    pub fn announcements(&self) -> Vec<Announcement> {
        vec![
            Announcement {
                id: 1,
                title: "Library Hours Extended".to_string(),
                content: "The library will be open until 10 PM during exam week.".to_string(),
                created_at: "2024-12-19T10:00:00".to_string(),
            },
            Announcement {
                id: 2,
                title: "Exam Schedule Released".to_string(),
                content: "Final exam schedules are now available in your student portal.".to_string(),
                created_at: "2024-12-18T14:30:00".to_string(),
            },
        ]
    }

    pub fn analytics_charts(&self) -> AnalyticsChartsResponse {
        AnalyticsChartsResponse {
            booking_trends: ChartSpec::bookings_trend(),
            classroom_utilization: ChartSpec::classroom_utilization(),
        }
    }
}
