//! Aggregate views computed over a [`Store`].
//!
//! These are read-only projections; nothing here mutates state. Each view
//! takes the store by reference so callers decide how it is shared.

use std::collections::BTreeMap;

use serde::Serialize;

use dojo_auth::Role;
use dojo_core::{ClassId, UserId};
use dojo_domain::Schedule;

use crate::store::Store;

/// Headline numbers for the admin dashboard.
///
/// Field names follow the dashboard's wire contract, hence the camelCase
/// renames.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DojoStats {
    #[serde(rename = "totalStudents")]
    pub total_students: u64,
    #[serde(rename = "totalClasses")]
    pub total_classes: u64,
    #[serde(rename = "totalEnrollments")]
    pub total_enrollments: u64,
    #[serde(rename = "activeInstructors")]
    pub active_instructors: u64,
}

pub fn dojo_stats(store: &dyn Store) -> DojoStats {
    DojoStats {
        total_students: store.count_users_with_role(Role::Student),
        total_classes: store.count_classes(),
        total_enrollments: store.count_enrollments(),
        active_instructors: store.count_users_with_role(Role::Instructor),
    }
}

/// One row of the enrollment report: a class and how many enrollments it has.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassEnrollmentCount {
    pub name: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnrollmentReport {
    pub total_enrollments: u64,
    pub class_summary: Vec<ClassEnrollmentCount>,
}

/// Enrollment counts per class, busiest first. Ties break alphabetically so
/// the report is stable run to run. Classes with zero enrollments are
/// omitted.
pub fn enrollment_report(store: &dyn Store) -> EnrollmentReport {
    let mut per_class: BTreeMap<ClassId, u64> = BTreeMap::new();
    for enrollment in store.list_enrollments() {
        *per_class.entry(enrollment.class_id).or_default() += 1;
    }

    let mut class_summary: Vec<ClassEnrollmentCount> = per_class
        .into_iter()
        .filter_map(|(class_id, count)| {
            store.get_class(class_id).map(|class| ClassEnrollmentCount {
                name: class.name,
                count,
            })
        })
        .collect();
    class_summary.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));

    EnrollmentReport {
        total_enrollments: store.count_enrollments(),
        class_summary,
    }
}

/// Every schedule slot for the classes a student is enrolled in. A student
/// enrolled twice in the same class sees its slots twice; the view mirrors
/// the enrollment rows rather than de-duplicating them.
pub fn student_schedule(store: &dyn Store, student_id: UserId) -> Vec<Schedule> {
    store
        .list_enrollments_for_student(student_id)
        .into_iter()
        .flat_map(|enrollment| store.list_schedules_for_class(enrollment.class_id))
        .collect()
}
