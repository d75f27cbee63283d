use sqlx::PgPool;
use tracing::instrument;

use slateroom_core::AppError;
use slateroom_models::ids::{ClassId, FeeId, SchoolId, StudentId};

use crate::modules::fees::model::{
    AssignFeesResponse, CreateFeeTemplateDto, Fee, FeeTemplate, FeeWithDetails, RecordPaymentDto,
};

const TEMPLATE_COLUMNS: &str =
    "id, school_id, class_id, title, amount, due_date, created_at";

const FEE_COLUMNS: &str = "id, school_id, student_id, class_id, template_id, status, \
     payment_date, payment_ref, created_at";

const FEE_WITH_DETAILS: &str = r#"SELECT
        f.id, f.student_id,
        s.name AS student_name,
        f.class_id,
        t.title, t.amount, t.due_date,
        f.status, f.payment_date, f.payment_ref
       FROM fees f
       JOIN fee_templates t ON t.id = f.template_id
       JOIN students s ON s.id = f.student_id"#;

pub struct FeeService;

impl FeeService {
    /// Create the template and fan out one pending fee per student currently
    /// enrolled in the class. Template and fees land together or not at all.
    #[instrument(skip(db, dto))]
    pub async fn assign_template(
        db: &PgPool,
        school_id: SchoolId,
        dto: CreateFeeTemplateDto,
    ) -> Result<AssignFeesResponse, AppError> {
        let class_ok = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM classes WHERE id = $1 AND school_id = $2)",
        )
        .bind(dto.class_id)
        .bind(school_id)
        .fetch_one(db)
        .await?;
        if !class_ok {
            return Err(AppError::not_found(anyhow::anyhow!("Class not found")));
        }

        let mut tx = db.begin().await?;

        let template = sqlx::query_as::<_, FeeTemplate>(&format!(
            r#"INSERT INTO fee_templates (school_id, class_id, title, amount, due_date)
               VALUES ($1, $2, $3, $4, $5)
               RETURNING {TEMPLATE_COLUMNS}"#,
        ))
        .bind(school_id)
        .bind(dto.class_id)
        .bind(&dto.title)
        .bind(dto.amount)
        .bind(dto.due_date)
        .fetch_one(&mut *tx)
        .await?;

        let result = sqlx::query(
            r#"INSERT INTO fees (school_id, student_id, class_id, template_id)
               SELECT $1, id, $2, $3 FROM students
               WHERE school_id = $1 AND class_id = $2"#,
        )
        .bind(school_id)
        .bind(dto.class_id)
        .bind(template.id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(AssignFeesResponse {
            template,
            assigned: result.rows_affected(),
        })
    }

    #[instrument(skip(db))]
    pub async fn list_fees(
        db: &PgPool,
        school_id: SchoolId,
        class_id: Option<ClassId>,
    ) -> Result<Vec<FeeWithDetails>, AppError> {
        let fees = sqlx::query_as::<_, FeeWithDetails>(&format!(
            r#"{FEE_WITH_DETAILS}
               WHERE f.school_id = $1
                 AND ($2::uuid IS NULL OR f.class_id = $2)
               ORDER BY t.due_date ASC, s.name ASC"#,
        ))
        .bind(school_id)
        .bind(class_id)
        .fetch_all(db)
        .await?;

        Ok(fees)
    }

    #[instrument(skip(db))]
    pub async fn list_for_student(
        db: &PgPool,
        school_id: SchoolId,
        student_id: StudentId,
    ) -> Result<Vec<FeeWithDetails>, AppError> {
        let fees = sqlx::query_as::<_, FeeWithDetails>(&format!(
            r#"{FEE_WITH_DETAILS}
               WHERE f.school_id = $1 AND f.student_id = $2
               ORDER BY t.due_date ASC"#,
        ))
        .bind(school_id)
        .bind(student_id)
        .fetch_all(db)
        .await?;

        Ok(fees)
    }

    /// Boundary operation invoked by the payment gateway callback. Marks a
    /// pending fee paid and records the gateway reference. The partial
    /// unique index on `payment_ref` rejects a replayed reference.
    #[instrument(skip(db, dto))]
    pub async fn record_payment(db: &PgPool, dto: RecordPaymentDto) -> Result<Fee, AppError> {
        let fee = sqlx::query_as::<_, Fee>(&format!(
            r#"UPDATE fees
               SET status = 'paid', payment_date = NOW(), payment_ref = $1
               WHERE id = $2 AND status = 'pending'
               RETURNING {FEE_COLUMNS}"#,
        ))
        .bind(&dto.payment_ref)
        .bind(dto.fee_id)
        .fetch_optional(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_unique_violation()
            {
                return AppError::conflict(anyhow::anyhow!(
                    "Payment reference has already been recorded"
                ));
            }
            e.into()
        })?;

        match fee {
            Some(fee) => Ok(fee),
            None => {
                let exists =
                    sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM fees WHERE id = $1)")
                        .bind(dto.fee_id)
                        .fetch_one(db)
                        .await?;
                if exists {
                    Err(AppError::conflict(anyhow::anyhow!(
                        "Fee is not pending payment"
                    )))
                } else {
                    Err(AppError::not_found(anyhow::anyhow!("Fee not found")))
                }
            }
        }
    }

    pub async fn get_fee(db: &PgPool, fee_id: FeeId) -> Result<Fee, AppError> {
        sqlx::query_as::<_, Fee>(&format!("SELECT {FEE_COLUMNS} FROM fees WHERE id = $1"))
            .bind(fee_id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Fee not found")))
    }
}
