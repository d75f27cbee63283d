use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use slateroom_core::AppError;
use slateroom_models::ids::{ClassId, ScheduleId, SchoolId, SubjectId, TeacherId};

use crate::modules::schedules::model::{
    CreateScheduleDto, Schedule, ScheduleWithNames, UpdateScheduleDto,
};

const SCHEDULE_COLUMNS: &str =
    "id, school_id, teacher_id, subject_id, class_id, start_time, end_time, created_at";

const SCHEDULE_WITH_NAMES: &str = r#"SELECT
        sc.id, sc.school_id, sc.teacher_id, sc.subject_id, sc.class_id,
        t.name AS teacher_name,
        su.subject_name,
        c.class_text,
        sc.start_time, sc.end_time, sc.created_at
       FROM schedules sc
       JOIN teachers t ON t.id = sc.teacher_id
       JOIN subjects su ON su.id = sc.subject_id
       JOIN classes c ON c.id = sc.class_id"#;

pub struct ScheduleService;

impl ScheduleService {
    /// Check if two half-open time intervals overlap.
    ///
    /// Touching endpoints are not an overlap, so back-to-back bookings are
    /// allowed, and a zero-duration interval overlaps nothing.
    fn times_overlap(
        start1: DateTime<Utc>,
        end1: DateTime<Utc>,
        start2: DateTime<Utc>,
        end2: DateTime<Utc>,
    ) -> bool {
        start1 < end2 && start2 < end1
    }

    /// Whether any existing booking for this class collides with
    /// `[start, end)`. `exclude` skips the booking being updated.
    async fn check_overlap(
        db: &PgPool,
        school_id: SchoolId,
        class_id: ClassId,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
        exclude_schedule_id: Option<ScheduleId>,
    ) -> Result<bool, AppError> {
        let existing = sqlx::query_as::<_, Schedule>(&format!(
            "SELECT {SCHEDULE_COLUMNS} FROM schedules WHERE school_id = $1 AND class_id = $2",
        ))
        .bind(school_id)
        .bind(class_id)
        .fetch_all(db)
        .await?;

        for schedule in existing {
            if let Some(exclude_id) = exclude_schedule_id
                && schedule.id == exclude_id
            {
                continue;
            }

            if Self::times_overlap(
                start_time,
                end_time,
                schedule.start_time,
                schedule.end_time,
            ) {
                return Ok(true);
            }
        }

        Ok(false)
    }

    async fn validate_references(
        db: &PgPool,
        school_id: SchoolId,
        teacher_id: TeacherId,
        subject_id: SubjectId,
        class_id: ClassId,
    ) -> Result<(), AppError> {
        let teacher_ok = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM teachers WHERE id = $1 AND school_id = $2)",
        )
        .bind(teacher_id)
        .bind(school_id)
        .fetch_one(db)
        .await?;
        if !teacher_ok {
            return Err(AppError::not_found(anyhow::anyhow!("Teacher not found")));
        }

        let subject_ok = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM subjects WHERE id = $1 AND school_id = $2)",
        )
        .bind(subject_id)
        .bind(school_id)
        .fetch_one(db)
        .await?;
        if !subject_ok {
            return Err(AppError::not_found(anyhow::anyhow!("Subject not found")));
        }

        let class_ok = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM classes WHERE id = $1 AND school_id = $2)",
        )
        .bind(class_id)
        .bind(school_id)
        .fetch_one(db)
        .await?;
        if !class_ok {
            return Err(AppError::not_found(anyhow::anyhow!("Class not found")));
        }

        Ok(())
    }

    /// Book a time slot for a class.
    #[instrument(skip(db, dto))]
    pub async fn create_schedule(
        db: &PgPool,
        school_id: SchoolId,
        dto: CreateScheduleDto,
    ) -> Result<Schedule, AppError> {
        Self::validate_references(db, school_id, dto.teacher_id, dto.subject_id, dto.class_id)
            .await?;

        if Self::check_overlap(
            db,
            school_id,
            dto.class_id,
            dto.start_time,
            dto.end_time,
            None,
        )
        .await?
        {
            return Err(AppError::conflict(anyhow::anyhow!(
                "Schedule overlaps with an existing booking for this class"
            )));
        }

        let schedule = sqlx::query_as::<_, Schedule>(&format!(
            r#"INSERT INTO schedules (school_id, teacher_id, subject_id, class_id, start_time, end_time)
               VALUES ($1, $2, $3, $4, $5, $6)
               RETURNING {SCHEDULE_COLUMNS}"#,
        ))
        .bind(school_id)
        .bind(dto.teacher_id)
        .bind(dto.subject_id)
        .bind(dto.class_id)
        .bind(dto.start_time)
        .bind(dto.end_time)
        .fetch_one(db)
        .await?;

        Ok(schedule)
    }

    /// All bookings for one class, soonest first.
    #[instrument(skip(db))]
    pub async fn list_by_class(
        db: &PgPool,
        school_id: SchoolId,
        class_id: ClassId,
    ) -> Result<Vec<ScheduleWithNames>, AppError> {
        let schedules = sqlx::query_as::<_, ScheduleWithNames>(&format!(
            "{SCHEDULE_WITH_NAMES} WHERE sc.school_id = $1 AND sc.class_id = $2 ORDER BY sc.start_time ASC",
        ))
        .bind(school_id)
        .bind(class_id)
        .fetch_all(db)
        .await?;

        Ok(schedules)
    }

    /// The calling teacher's own bookings, soonest first.
    #[instrument(skip(db))]
    pub async fn list_for_teacher(
        db: &PgPool,
        school_id: SchoolId,
        teacher_id: TeacherId,
    ) -> Result<Vec<ScheduleWithNames>, AppError> {
        let schedules = sqlx::query_as::<_, ScheduleWithNames>(&format!(
            "{SCHEDULE_WITH_NAMES} WHERE sc.school_id = $1 AND sc.teacher_id = $2 ORDER BY sc.start_time ASC",
        ))
        .bind(school_id)
        .bind(teacher_id)
        .fetch_all(db)
        .await?;

        Ok(schedules)
    }

    #[instrument(skip(db))]
    pub async fn get_schedule(
        db: &PgPool,
        school_id: SchoolId,
        schedule_id: ScheduleId,
    ) -> Result<ScheduleWithNames, AppError> {
        let schedule = sqlx::query_as::<_, ScheduleWithNames>(&format!(
            "{SCHEDULE_WITH_NAMES} WHERE sc.id = $1 AND sc.school_id = $2",
        ))
        .bind(schedule_id)
        .bind(school_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Schedule not found")))?;

        Ok(schedule)
    }

    /// Move or reassign a booking, re-running the overlap guard against
    /// every booking except the one being updated.
    #[instrument(skip(db, dto))]
    pub async fn update_schedule(
        db: &PgPool,
        school_id: SchoolId,
        schedule_id: ScheduleId,
        dto: UpdateScheduleDto,
    ) -> Result<Schedule, AppError> {
        let existing = sqlx::query_as::<_, Schedule>(&format!(
            "SELECT {SCHEDULE_COLUMNS} FROM schedules WHERE id = $1 AND school_id = $2",
        ))
        .bind(schedule_id)
        .bind(school_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Schedule not found")))?;

        let teacher_id = dto.teacher_id.unwrap_or(existing.teacher_id);
        let subject_id = dto.subject_id.unwrap_or(existing.subject_id);
        let class_id = dto.class_id.unwrap_or(existing.class_id);
        let start_time = dto.start_time.unwrap_or(existing.start_time);
        let end_time = dto.end_time.unwrap_or(existing.end_time);

        Self::validate_references(db, school_id, teacher_id, subject_id, class_id).await?;

        // Overlap is checked against the target class, which may differ
        // from the class the booking currently belongs to.
        if Self::check_overlap(
            db,
            school_id,
            class_id,
            start_time,
            end_time,
            Some(schedule_id),
        )
        .await?
        {
            return Err(AppError::conflict(anyhow::anyhow!(
                "Schedule overlaps with an existing booking for this class"
            )));
        }

        let schedule = sqlx::query_as::<_, Schedule>(&format!(
            r#"UPDATE schedules
               SET teacher_id = $1, subject_id = $2, class_id = $3, start_time = $4, end_time = $5
               WHERE id = $6 AND school_id = $7
               RETURNING {SCHEDULE_COLUMNS}"#,
        ))
        .bind(teacher_id)
        .bind(subject_id)
        .bind(class_id)
        .bind(start_time)
        .bind(end_time)
        .bind(schedule_id)
        .bind(school_id)
        .fetch_one(db)
        .await?;

        Ok(schedule)
    }

    #[instrument(skip(db))]
    pub async fn delete_schedule(
        db: &PgPool,
        school_id: SchoolId,
        schedule_id: ScheduleId,
    ) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM schedules WHERE id = $1 AND school_id = $2")
            .bind(schedule_id)
            .bind(school_id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Schedule not found")));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use chrono::TimeZone;

    fn at(hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 9, 1, hour, minute, 0).unwrap()
    }

    #[test]
    fn test_overlap_is_symmetric() {
        let overlaps_ab =
            ScheduleService::times_overlap(at(9, 0), at(10, 0), at(9, 30), at(10, 30));
        let overlaps_ba =
            ScheduleService::times_overlap(at(9, 30), at(10, 30), at(9, 0), at(10, 0));

        assert!(overlaps_ab);
        assert_eq!(overlaps_ab, overlaps_ba);
    }

    #[test]
    fn test_touching_intervals_do_not_overlap() {
        assert!(!ScheduleService::times_overlap(
            at(9, 0),
            at(10, 0),
            at(10, 0),
            at(11, 0)
        ));
        assert!(!ScheduleService::times_overlap(
            at(10, 0),
            at(11, 0),
            at(9, 0),
            at(10, 0)
        ));
    }

    #[test]
    fn test_containment_overlaps() {
        assert!(ScheduleService::times_overlap(
            at(9, 0),
            at(12, 0),
            at(10, 0),
            at(11, 0)
        ));
        assert!(ScheduleService::times_overlap(
            at(10, 0),
            at(11, 0),
            at(9, 0),
            at(12, 0)
        ));
    }

    #[test]
    fn test_zero_duration_never_overlaps() {
        assert!(!ScheduleService::times_overlap(
            at(10, 0),
            at(10, 0),
            at(9, 0),
            at(11, 0)
        ));
        assert!(!ScheduleService::times_overlap(
            at(9, 0),
            at(11, 0),
            at(10, 0),
            at(10, 0)
        ));
    }

    #[test]
    fn test_disjoint_intervals_do_not_overlap() {
        assert!(!ScheduleService::times_overlap(
            at(9, 0),
            at(10, 0),
            at(11, 0),
            at(12, 0)
        ));
    }

    struct Roster {
        school_id: SchoolId,
        teacher_id: TeacherId,
        subject_id: SubjectId,
        class_id: ClassId,
    }

    async fn seed_roster(pool: &PgPool, email_prefix: &str) -> Roster {
        let school_id = sqlx::query_scalar::<_, SchoolId>(
            r#"INSERT INTO schools (name, owner_name, email, password)
               VALUES ('Test School', 'Owner', $1, 'not-a-real-hash')
               RETURNING id"#,
        )
        .bind(format!("{email_prefix}@test.edu"))
        .fetch_one(pool)
        .await
        .unwrap();

        let teacher_id = sqlx::query_scalar::<_, TeacherId>(
            r#"INSERT INTO teachers (school_id, name, email, qualification, age, gender, password)
               VALUES ($1, 'T', $2, 'BEd', 30, 'Male', 'hash')
               RETURNING id"#,
        )
        .bind(school_id)
        .bind(format!("{email_prefix}-t@test.edu"))
        .fetch_one(pool)
        .await
        .unwrap();

        let subject_id = sqlx::query_scalar::<_, SubjectId>(
            r#"INSERT INTO subjects (school_id, subject_name, subject_code)
               VALUES ($1, 'Math', 'MATH-101')
               RETURNING id"#,
        )
        .bind(school_id)
        .fetch_one(pool)
        .await
        .unwrap();

        let class_id = sqlx::query_scalar::<_, ClassId>(
            r#"INSERT INTO classes (school_id, class_text, class_num)
               VALUES ($1, 'Grade 5', 5)
               RETURNING id"#,
        )
        .bind(school_id)
        .fetch_one(pool)
        .await
        .unwrap();

        Roster {
            school_id,
            teacher_id,
            subject_id,
            class_id,
        }
    }

    fn booking(roster: &Roster, start: DateTime<Utc>, end: DateTime<Utc>) -> CreateScheduleDto {
        CreateScheduleDto {
            teacher_id: roster.teacher_id,
            subject_id: roster.subject_id,
            class_id: roster.class_id,
            start_time: start,
            end_time: end,
        }
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_create_rejects_overlap(pool: PgPool) {
        let roster = seed_roster(&pool, "s1").await;

        ScheduleService::create_schedule(&pool, roster.school_id, booking(&roster, at(9, 0), at(10, 0)))
            .await
            .unwrap();

        let err = ScheduleService::create_schedule(
            &pool,
            roster.school_id,
            booking(&roster, at(9, 30), at(10, 30)),
        )
        .await
        .unwrap_err();

        assert_eq!(err.status, StatusCode::CONFLICT);
        assert!(err.error.to_string().contains("overlap"));
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_back_to_back_bookings_allowed(pool: PgPool) {
        let roster = seed_roster(&pool, "s2").await;

        ScheduleService::create_schedule(&pool, roster.school_id, booking(&roster, at(9, 0), at(10, 0)))
            .await
            .unwrap();
        ScheduleService::create_schedule(&pool, roster.school_id, booking(&roster, at(10, 0), at(11, 0)))
            .await
            .unwrap();

        let schedules =
            ScheduleService::list_by_class(&pool, roster.school_id, roster.class_id)
                .await
                .unwrap();
        assert_eq!(schedules.len(), 2);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_update_excludes_self_from_overlap_check(pool: PgPool) {
        let roster = seed_roster(&pool, "s3").await;

        let schedule = ScheduleService::create_schedule(
            &pool,
            roster.school_id,
            booking(&roster, at(9, 0), at(10, 0)),
        )
        .await
        .unwrap();

        // Shrinking inside its own slot must not self-conflict
        let updated = ScheduleService::update_schedule(
            &pool,
            roster.school_id,
            schedule.id,
            UpdateScheduleDto {
                teacher_id: None,
                subject_id: None,
                class_id: None,
                start_time: Some(at(9, 15)),
                end_time: Some(at(9, 45)),
            },
        )
        .await
        .unwrap();

        assert_eq!(updated.start_time, at(9, 15));
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_update_still_conflicts_with_others(pool: PgPool) {
        let roster = seed_roster(&pool, "s4").await;

        ScheduleService::create_schedule(&pool, roster.school_id, booking(&roster, at(9, 0), at(10, 0)))
            .await
            .unwrap();
        let second = ScheduleService::create_schedule(
            &pool,
            roster.school_id,
            booking(&roster, at(11, 0), at(12, 0)),
        )
        .await
        .unwrap();

        let err = ScheduleService::update_schedule(
            &pool,
            roster.school_id,
            second.id,
            UpdateScheduleDto {
                teacher_id: None,
                subject_id: None,
                class_id: None,
                start_time: Some(at(9, 30)),
                end_time: Some(at(10, 30)),
            },
        )
        .await
        .unwrap_err();

        assert_eq!(err.status, StatusCode::CONFLICT);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_update_moves_booking_to_another_class(pool: PgPool) {
        let roster = seed_roster(&pool, "mv").await;

        let other_class_id = sqlx::query_scalar::<_, ClassId>(
            r#"INSERT INTO classes (school_id, class_text, class_num)
               VALUES ($1, 'Grade 6', 6)
               RETURNING id"#,
        )
        .bind(roster.school_id)
        .fetch_one(&pool)
        .await
        .unwrap();

        let schedule = ScheduleService::create_schedule(
            &pool,
            roster.school_id,
            booking(&roster, at(9, 0), at(10, 0)),
        )
        .await
        .unwrap();

        let moved = ScheduleService::update_schedule(
            &pool,
            roster.school_id,
            schedule.id,
            UpdateScheduleDto {
                teacher_id: None,
                subject_id: None,
                class_id: Some(other_class_id),
                start_time: None,
                end_time: None,
            },
        )
        .await
        .unwrap();
        assert_eq!(moved.class_id, other_class_id);

        let old_class = ScheduleService::list_by_class(&pool, roster.school_id, roster.class_id)
            .await
            .unwrap();
        assert!(old_class.is_empty());
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_update_conflicts_in_target_class(pool: PgPool) {
        let roster = seed_roster(&pool, "mc").await;

        let other_class_id = sqlx::query_scalar::<_, ClassId>(
            r#"INSERT INTO classes (school_id, class_text, class_num)
               VALUES ($1, 'Grade 6', 6)
               RETURNING id"#,
        )
        .bind(roster.school_id)
        .fetch_one(&pool)
        .await
        .unwrap();

        // 09:00-10:00 already booked in the target class
        ScheduleService::create_schedule(
            &pool,
            roster.school_id,
            CreateScheduleDto {
                teacher_id: roster.teacher_id,
                subject_id: roster.subject_id,
                class_id: other_class_id,
                start_time: at(9, 0),
                end_time: at(10, 0),
            },
        )
        .await
        .unwrap();

        let schedule = ScheduleService::create_schedule(
            &pool,
            roster.school_id,
            booking(&roster, at(9, 0), at(10, 0)),
        )
        .await
        .unwrap();

        let err = ScheduleService::update_schedule(
            &pool,
            roster.school_id,
            schedule.id,
            UpdateScheduleDto {
                teacher_id: None,
                subject_id: None,
                class_id: Some(other_class_id),
                start_time: None,
                end_time: None,
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::CONFLICT);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_update_rejects_class_from_another_school(pool: PgPool) {
        let roster_a = seed_roster(&pool, "fca").await;
        let roster_b = seed_roster(&pool, "fcb").await;

        let schedule = ScheduleService::create_schedule(
            &pool,
            roster_a.school_id,
            booking(&roster_a, at(9, 0), at(10, 0)),
        )
        .await
        .unwrap();

        let err = ScheduleService::update_schedule(
            &pool,
            roster_a.school_id,
            schedule.id,
            UpdateScheduleDto {
                teacher_id: None,
                subject_id: None,
                class_id: Some(roster_b.class_id),
                start_time: None,
                end_time: None,
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_identical_slots_in_different_schools(pool: PgPool) {
        let roster_a = seed_roster(&pool, "sa").await;
        let roster_b = seed_roster(&pool, "sb").await;

        ScheduleService::create_schedule(
            &pool,
            roster_a.school_id,
            booking(&roster_a, at(9, 0), at(10, 0)),
        )
        .await
        .unwrap();

        // Same wall-clock slot, different tenant: no conflict
        ScheduleService::create_schedule(
            &pool,
            roster_b.school_id,
            booking(&roster_b, at(9, 0), at(10, 0)),
        )
        .await
        .unwrap();
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_cross_tenant_update_and_delete_not_found(pool: PgPool) {
        let roster_a = seed_roster(&pool, "xa").await;
        let roster_b = seed_roster(&pool, "xb").await;

        let schedule = ScheduleService::create_schedule(
            &pool,
            roster_a.school_id,
            booking(&roster_a, at(9, 0), at(10, 0)),
        )
        .await
        .unwrap();

        let err = ScheduleService::update_schedule(
            &pool,
            roster_b.school_id,
            schedule.id,
            UpdateScheduleDto {
                teacher_id: None,
                subject_id: None,
                class_id: None,
                start_time: Some(at(13, 0)),
                end_time: Some(at(14, 0)),
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);

        let err = ScheduleService::delete_schedule(&pool, roster_b.school_id, schedule.id)
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_list_for_teacher_only_their_bookings(pool: PgPool) {
        let roster = seed_roster(&pool, "lt").await;

        let other_teacher_id = sqlx::query_scalar::<_, TeacherId>(
            r#"INSERT INTO teachers (school_id, name, email, qualification, age, gender, password)
               VALUES ($1, 'Other', 'lt-o@test.edu', 'BEd', 35, 'Female', 'hash')
               RETURNING id"#,
        )
        .bind(roster.school_id)
        .fetch_one(&pool)
        .await
        .unwrap();

        ScheduleService::create_schedule(&pool, roster.school_id, booking(&roster, at(9, 0), at(10, 0)))
            .await
            .unwrap();
        ScheduleService::create_schedule(
            &pool,
            roster.school_id,
            CreateScheduleDto {
                teacher_id: other_teacher_id,
                subject_id: roster.subject_id,
                class_id: roster.class_id,
                start_time: at(10, 0),
                end_time: at(11, 0),
            },
        )
        .await
        .unwrap();

        let own = ScheduleService::list_for_teacher(&pool, roster.school_id, roster.teacher_id)
            .await
            .unwrap();
        assert_eq!(own.len(), 1);
        assert_eq!(own[0].teacher_id, roster.teacher_id);
    }
}
