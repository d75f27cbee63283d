use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use slateroom_core::{PaginationMeta, PaginationParams};
use slateroom_models::{AttendanceStatus, FeeStatus, NoticeAudience, UserRole};

use crate::modules::assignments::model::{Assignment, AssignmentWithClass, CreateAssignmentDto};
use crate::modules::attendance::model::{
    AttendanceCheckResponse, AttendanceEntry, AttendanceRecord, MarkAttendanceDto,
    MarkAttendanceResponse,
};
use crate::modules::classes::model::{Class, ClassWithStats, CreateClassDto, UpdateClassDto};
use crate::modules::examinations::model::{CreateExamDto, Exam, ExamWithNames, UpdateExamDto};
use crate::modules::fees::model::{
    AssignFeesResponse, CreateFeeTemplateDto, Fee, FeeFilterParams, FeeTemplate, FeeWithDetails,
    RecordPaymentDto,
};
use crate::modules::notices::model::{CreateNoticeDto, Notice, UpdateNoticeDto};
use crate::modules::results::model::{
    ResultEntry, ResultRecord, UploadResultsDto, UploadResultsResponse,
};
use crate::modules::schedules::model::{
    CreateScheduleDto, Schedule, ScheduleWithNames, UpdateScheduleDto,
};
use crate::modules::schools::model::{
    LoginDto, LoginResponse, MessageResponse, RegisterSchoolDto, School, SchoolListEntry,
    SendOtpDto, UpdateSchoolDto, VerifyOtpDto,
};
use crate::modules::students::model::{
    CreateStudentDto, PaginatedStudentsResponse, Student, StudentFilterParams, UpdateStudentDto,
};
use crate::modules::subjects::model::{CreateSubjectDto, Subject};
use crate::modules::teachers::model::{
    CreateTeacherDto, PaginatedTeachersResponse, Teacher, TeacherFilterParams, UpdateTeacherDto,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::schools::controller::send_otp,
        crate::modules::schools::controller::verify_otp,
        crate::modules::schools::controller::register,
        crate::modules::schools::controller::login,
        crate::modules::schools::controller::me,
        crate::modules::schools::controller::update_me,
        crate::modules::schools::controller::all_schools,
        crate::modules::teachers::controller::register_teacher,
        crate::modules::teachers::controller::login,
        crate::modules::teachers::controller::list_teachers,
        crate::modules::teachers::controller::get_teacher,
        crate::modules::teachers::controller::update_teacher,
        crate::modules::teachers::controller::delete_teacher,
        crate::modules::students::controller::register_student,
        crate::modules::students::controller::login,
        crate::modules::students::controller::list_students,
        crate::modules::students::controller::get_student,
        crate::modules::students::controller::update_student,
        crate::modules::students::controller::delete_student,
        crate::modules::classes::controller::create_class,
        crate::modules::classes::controller::list_classes,
        crate::modules::classes::controller::get_class,
        crate::modules::classes::controller::update_class,
        crate::modules::classes::controller::delete_class,
        crate::modules::subjects::controller::create_subject,
        crate::modules::subjects::controller::list_subjects,
        crate::modules::subjects::controller::delete_subject,
        crate::modules::schedules::controller::create_schedule,
        crate::modules::schedules::controller::list_class_schedules,
        crate::modules::schedules::controller::list_own_schedules,
        crate::modules::schedules::controller::get_schedule,
        crate::modules::schedules::controller::update_schedule,
        crate::modules::schedules::controller::delete_schedule,
        crate::modules::attendance::controller::mark_attendance,
        crate::modules::attendance::controller::student_history,
        crate::modules::attendance::controller::my_history,
        crate::modules::attendance::controller::check_taken_today,
        crate::modules::examinations::controller::create_exam,
        crate::modules::examinations::controller::list_exams,
        crate::modules::examinations::controller::list_class_exams,
        crate::modules::examinations::controller::update_exam,
        crate::modules::examinations::controller::delete_exam,
        crate::modules::results::controller::upload_results,
        crate::modules::results::controller::exam_results,
        crate::modules::results::controller::my_result,
        crate::modules::notices::controller::create_notice,
        crate::modules::notices::controller::list_notices,
        crate::modules::notices::controller::update_notice,
        crate::modules::notices::controller::delete_notice,
        crate::modules::assignments::controller::create_assignment,
        crate::modules::assignments::controller::list_assignments,
        crate::modules::assignments::controller::my_assignments,
        crate::modules::assignments::controller::delete_assignment,
        crate::modules::fees::controller::assign_fees,
        crate::modules::fees::controller::list_fees,
        crate::modules::fees::controller::my_fees,
        crate::modules::fees::controller::record_payment,
    ),
    components(
        schemas(
            UserRole,
            NoticeAudience,
            AttendanceStatus,
            FeeStatus,
            School,
            SchoolListEntry,
            SendOtpDto,
            VerifyOtpDto,
            RegisterSchoolDto,
            LoginDto,
            UpdateSchoolDto,
            LoginResponse,
            MessageResponse,
            Teacher,
            CreateTeacherDto,
            UpdateTeacherDto,
            TeacherFilterParams,
            PaginatedTeachersResponse,
            Student,
            CreateStudentDto,
            UpdateStudentDto,
            StudentFilterParams,
            PaginatedStudentsResponse,
            Class,
            ClassWithStats,
            CreateClassDto,
            UpdateClassDto,
            Subject,
            CreateSubjectDto,
            Schedule,
            ScheduleWithNames,
            CreateScheduleDto,
            UpdateScheduleDto,
            AttendanceRecord,
            AttendanceEntry,
            MarkAttendanceDto,
            MarkAttendanceResponse,
            AttendanceCheckResponse,
            Exam,
            ExamWithNames,
            CreateExamDto,
            UpdateExamDto,
            ResultRecord,
            ResultEntry,
            UploadResultsDto,
            UploadResultsResponse,
            Notice,
            CreateNoticeDto,
            UpdateNoticeDto,
            Assignment,
            AssignmentWithClass,
            CreateAssignmentDto,
            FeeTemplate,
            Fee,
            FeeWithDetails,
            CreateFeeTemplateDto,
            AssignFeesResponse,
            FeeFilterParams,
            RecordPaymentDto,
            PaginationMeta,
            PaginationParams,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Schools", description = "School registration, login and profile"),
        (name = "Teachers", description = "Teacher roster and login"),
        (name = "Students", description = "Student roster and login"),
        (name = "Classes", description = "Class roster"),
        (name = "Subjects", description = "Subject roster"),
        (name = "Schedules", description = "Class time-slot bookings"),
        (name = "Attendance", description = "Per-day attendance"),
        (name = "Examinations", description = "Exam planning"),
        (name = "Results", description = "Per-exam result sheets"),
        (name = "Notices", description = "Noticeboard"),
        (name = "Assignments", description = "Class assignments"),
        (name = "Fees", description = "Fee collection")
    ),
    info(
        title = "Slateroom API",
        version = "0.1.0",
        description = "A multi-tenant school-management REST API built with Rust, Axum, and PostgreSQL.",
        contact(
            name = "API Support",
            email = "support@slateroom.app"
        ),
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
