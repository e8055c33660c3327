//! In-memory storage engine.

use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;

use dojo_auth::Role;
use dojo_core::{ClassId, DomainError, DomainResult, EnrollmentId, PaymentId, ScheduleId, UserId};
use dojo_domain::{
    ClassPatch, DojoClass, Enrollment, NewDojoClass, NewEnrollment, NewPayment, NewSchedule,
    NewUser, Payment, Schedule, SchedulePatch, User, UserPatch,
};

use crate::store::Store;

// ─────────────────────────────────────────────────────────────────────────────
// Tables
// ─────────────────────────────────────────────────────────────────────────────

/// All tables behind one lock, so uniqueness checks and cascade deletes are
/// single critical sections. `BTreeMap` keeps listings in id (creation)
/// order.
#[derive(Debug, Default)]
struct Tables {
    users: BTreeMap<UserId, User>,
    classes: BTreeMap<ClassId, DojoClass>,
    schedules: BTreeMap<ScheduleId, Schedule>,
    enrollments: BTreeMap<EnrollmentId, Enrollment>,
    payments: BTreeMap<PaymentId, Payment>,

    next_user_id: i64,
    next_class_id: i64,
    next_schedule_id: i64,
    next_enrollment_id: i64,
    next_payment_id: i64,
}

impl Tables {
    fn username_taken(&self, username: &str, exclude: Option<UserId>) -> bool {
        self.users
            .values()
            .any(|u| u.username == username && Some(u.id) != exclude)
    }

    fn ensure_instructor(&self, id: UserId) -> DomainResult<()> {
        match self.users.get(&id) {
            Some(u) if u.role == Role::Instructor => Ok(()),
            Some(_) => Err(DomainError::validation(
                "instructor_id must reference a user with the instructor role",
            )),
            None => Err(DomainError::validation(format!("unknown instructor id {id}"))),
        }
    }

    fn ensure_user(&self, id: UserId) -> DomainResult<()> {
        if self.users.contains_key(&id) {
            Ok(())
        } else {
            Err(DomainError::validation(format!("unknown user id {id}")))
        }
    }

    fn ensure_class(&self, id: ClassId) -> DomainResult<()> {
        if self.classes.contains_key(&id) {
            Ok(())
        } else {
            Err(DomainError::validation(format!("unknown class id {id}")))
        }
    }

    fn ensure_enrollment(&self, id: EnrollmentId) -> DomainResult<()> {
        if self.enrollments.contains_key(&id) {
            Ok(())
        } else {
            Err(DomainError::validation(format!("unknown enrollment id {id}")))
        }
    }

    // Cascades. Children first, then the record itself.

    fn drop_enrollment(&mut self, id: EnrollmentId) {
        self.payments.retain(|_, p| p.enrollment_id != id);
        self.enrollments.remove(&id);
    }

    fn drop_class(&mut self, id: ClassId) {
        self.schedules.retain(|_, s| s.class_id != id);
        let enrolled: Vec<EnrollmentId> = self
            .enrollments
            .values()
            .filter(|e| e.class_id == id)
            .map(|e| e.id)
            .collect();
        for enrollment_id in enrolled {
            self.drop_enrollment(enrollment_id);
        }
        self.classes.remove(&id);
    }

    fn drop_user(&mut self, id: UserId) {
        let taught: Vec<ClassId> = self
            .classes
            .values()
            .filter(|c| c.instructor_id == id)
            .map(|c| c.id)
            .collect();
        for class_id in taught {
            self.drop_class(class_id);
        }
        let enrolled: Vec<EnrollmentId> = self
            .enrollments
            .values()
            .filter(|e| e.student_id == id)
            .map(|e| e.id)
            .collect();
        for enrollment_id in enrolled {
            self.drop_enrollment(enrollment_id);
        }
        self.users.remove(&id);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Store
// ─────────────────────────────────────────────────────────────────────────────

/// In-memory [`Store`] for dev and tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    // Lock poisoning carries no meaning for plain tables; recover the guard.

    fn read(&self) -> RwLockReadGuard<'_, Tables> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Tables> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }
}

impl Store for MemoryStore {
    // ─── Users ───────────────────────────────────────────────────────────────

    fn create_user(&self, new: NewUser) -> DomainResult<User> {
        let mut t = self.write();
        let user = User {
            id: UserId::from_i64(t.next_user_id + 1),
            username: new.username,
            email: new.email,
            password_hash: new.password_hash,
            first_name: new.first_name,
            last_name: new.last_name,
            role: new.role,
        };
        user.validate()?;
        if t.username_taken(&user.username, None) {
            return Err(DomainError::conflict(format!(
                "username '{}' is already taken",
                user.username
            )));
        }
        t.next_user_id += 1;
        t.users.insert(user.id, user.clone());
        Ok(user)
    }

    fn get_user(&self, id: UserId) -> Option<User> {
        self.read().users.get(&id).cloned()
    }

    fn get_user_by_username(&self, username: &str) -> Option<User> {
        self.read()
            .users
            .values()
            .find(|u| u.username == username)
            .cloned()
    }

    fn list_users(&self, role: Option<Role>) -> Vec<User> {
        self.read()
            .users
            .values()
            .filter(|u| role.map_or(true, |r| u.role == r))
            .cloned()
            .collect()
    }

    fn update_user(&self, id: UserId, patch: UserPatch) -> DomainResult<User> {
        let mut t = self.write();
        let Some(existing) = t.users.get(&id) else {
            return Err(DomainError::not_found());
        };

        let mut updated = existing.clone();
        if let Some(username) = patch.username {
            updated.username = username;
        }
        if let Some(email) = patch.email {
            updated.email = email;
        }
        if let Some(hash) = patch.password_hash {
            updated.password_hash = hash;
        }
        if let Some(first_name) = patch.first_name {
            updated.first_name = first_name;
        }
        if let Some(last_name) = patch.last_name {
            updated.last_name = last_name;
        }
        if let Some(role) = patch.role {
            updated.role = role;
        }

        updated.validate()?;
        if t.username_taken(&updated.username, Some(id)) {
            return Err(DomainError::conflict(format!(
                "username '{}' is already taken",
                updated.username
            )));
        }
        t.users.insert(id, updated.clone());
        Ok(updated)
    }

    fn delete_user(&self, id: UserId) -> DomainResult<()> {
        let mut t = self.write();
        if !t.users.contains_key(&id) {
            return Err(DomainError::not_found());
        }
        t.drop_user(id);
        Ok(())
    }

    // ─── Classes ─────────────────────────────────────────────────────────────

    fn create_class(&self, new: NewDojoClass) -> DomainResult<DojoClass> {
        let mut t = self.write();
        let class = DojoClass {
            id: ClassId::from_i64(t.next_class_id + 1),
            name: new.name,
            description: new.description,
            instructor_id: new.instructor_id,
            schedule: new.schedule,
            capacity: new.capacity,
        };
        class.validate()?;
        t.ensure_instructor(class.instructor_id)?;
        t.next_class_id += 1;
        t.classes.insert(class.id, class.clone());
        Ok(class)
    }

    fn get_class(&self, id: ClassId) -> Option<DojoClass> {
        self.read().classes.get(&id).cloned()
    }

    fn list_classes(&self) -> Vec<DojoClass> {
        self.read().classes.values().cloned().collect()
    }

    fn update_class(&self, id: ClassId, patch: ClassPatch) -> DomainResult<DojoClass> {
        let mut t = self.write();
        let Some(existing) = t.classes.get(&id) else {
            return Err(DomainError::not_found());
        };

        let mut updated = existing.clone();
        if let Some(name) = patch.name {
            updated.name = name;
        }
        if let Some(description) = patch.description {
            updated.description = description;
        }
        if let Some(instructor_id) = patch.instructor_id {
            updated.instructor_id = instructor_id;
        }
        if let Some(schedule) = patch.schedule {
            updated.schedule = schedule;
        }
        if let Some(capacity) = patch.capacity {
            updated.capacity = capacity;
        }

        updated.validate()?;
        t.ensure_instructor(updated.instructor_id)?;
        t.classes.insert(id, updated.clone());
        Ok(updated)
    }

    fn delete_class(&self, id: ClassId) -> DomainResult<()> {
        let mut t = self.write();
        if !t.classes.contains_key(&id) {
            return Err(DomainError::not_found());
        }
        t.drop_class(id);
        Ok(())
    }

    // ─── Schedules ───────────────────────────────────────────────────────────

    fn create_schedule(&self, new: NewSchedule) -> DomainResult<Schedule> {
        let mut t = self.write();
        let schedule = Schedule {
            id: ScheduleId::from_i64(t.next_schedule_id + 1),
            class_id: new.class_id,
            weekday: new.weekday,
            start_time: new.start_time,
            end_time: new.end_time,
            location: new.location,
        };
        schedule.validate()?;
        t.ensure_class(schedule.class_id)?;
        t.next_schedule_id += 1;
        t.schedules.insert(schedule.id, schedule.clone());
        Ok(schedule)
    }

    fn get_schedule(&self, id: ScheduleId) -> Option<Schedule> {
        self.read().schedules.get(&id).cloned()
    }

    fn list_schedules(&self) -> Vec<Schedule> {
        self.read().schedules.values().cloned().collect()
    }

    fn list_schedules_for_class(&self, class_id: ClassId) -> Vec<Schedule> {
        self.read()
            .schedules
            .values()
            .filter(|s| s.class_id == class_id)
            .cloned()
            .collect()
    }

    fn update_schedule(&self, id: ScheduleId, patch: SchedulePatch) -> DomainResult<Schedule> {
        let mut t = self.write();
        let Some(existing) = t.schedules.get(&id) else {
            return Err(DomainError::not_found());
        };

        let mut updated = existing.clone();
        if let Some(class_id) = patch.class_id {
            updated.class_id = class_id;
        }
        if let Some(weekday) = patch.weekday {
            updated.weekday = weekday;
        }
        if let Some(start_time) = patch.start_time {
            updated.start_time = start_time;
        }
        if let Some(end_time) = patch.end_time {
            updated.end_time = end_time;
        }
        if let Some(location) = patch.location {
            updated.location = location;
        }

        updated.validate()?;
        t.ensure_class(updated.class_id)?;
        t.schedules.insert(id, updated.clone());
        Ok(updated)
    }

    fn delete_schedule(&self, id: ScheduleId) -> DomainResult<()> {
        let mut t = self.write();
        if t.schedules.remove(&id).is_none() {
            return Err(DomainError::not_found());
        }
        Ok(())
    }

    // ─── Enrollments ─────────────────────────────────────────────────────────

    fn create_enrollment(&self, new: NewEnrollment) -> DomainResult<Enrollment> {
        let mut t = self.write();
        t.ensure_user(new.student_id)?;
        t.ensure_class(new.class_id)?;
        let enrollment = Enrollment {
            id: EnrollmentId::from_i64(t.next_enrollment_id + 1),
            student_id: new.student_id,
            class_id: new.class_id,
            date_enrolled: Utc::now().date_naive(),
        };
        t.next_enrollment_id += 1;
        t.enrollments.insert(enrollment.id, enrollment.clone());
        Ok(enrollment)
    }

    fn get_enrollment(&self, id: EnrollmentId) -> Option<Enrollment> {
        self.read().enrollments.get(&id).cloned()
    }

    fn list_enrollments(&self) -> Vec<Enrollment> {
        self.read().enrollments.values().cloned().collect()
    }

    fn list_enrollments_for_student(&self, student_id: UserId) -> Vec<Enrollment> {
        self.read()
            .enrollments
            .values()
            .filter(|e| e.student_id == student_id)
            .cloned()
            .collect()
    }

    fn delete_enrollment(&self, id: EnrollmentId) -> DomainResult<()> {
        let mut t = self.write();
        if !t.enrollments.contains_key(&id) {
            return Err(DomainError::not_found());
        }
        t.drop_enrollment(id);
        Ok(())
    }

    // ─── Payments ────────────────────────────────────────────────────────────

    fn create_payment(&self, new: NewPayment) -> DomainResult<Payment> {
        let mut t = self.write();
        let payment = Payment {
            id: PaymentId::from_i64(t.next_payment_id + 1),
            enrollment_id: new.enrollment_id,
            amount: new.amount,
            date: Utc::now().date_naive(),
            status: new.status,
        };
        payment.validate()?;
        t.ensure_enrollment(payment.enrollment_id)?;
        t.next_payment_id += 1;
        t.payments.insert(payment.id, payment.clone());
        Ok(payment)
    }

    fn get_payment(&self, id: PaymentId) -> Option<Payment> {
        self.read().payments.get(&id).cloned()
    }

    fn list_payments(&self) -> Vec<Payment> {
        self.read().payments.values().cloned().collect()
    }

    // ─── Aggregate counts ────────────────────────────────────────────────────

    fn count_users_with_role(&self, role: Role) -> u64 {
        self.read().users.values().filter(|u| u.role == role).count() as u64
    }

    fn count_classes(&self) -> u64 {
        self.read().classes.len() as u64
    }

    fn count_enrollments(&self) -> u64 {
        self.read().enrollments.len() as u64
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
