use sea_orm::{ConnectionTrait, EntityTrait};

use crate::entity::{
    exam_record, qualification, schedule, school_day, student, teacher_group, teaching_block, year,
};
use crate::error::AppError;

/// Look up a student by ID, returning 404 if not found.
pub async fn find_student<C: ConnectionTrait>(db: &C, id: i32) -> Result<student::Model, AppError> {
    student::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Student not found".into()))
}

/// Look up a teacher group (assignment) by ID, returning 404 if not found.
pub async fn find_teacher_group<C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<teacher_group::Model, AppError> {
    teacher_group::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Teacher group not found".into()))
}

pub async fn find_teaching_block<C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<teaching_block::Model, AppError> {
    teaching_block::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Teaching block not found".into()))
}

pub async fn find_year<C: ConnectionTrait>(db: &C, id: i32) -> Result<year::Model, AppError> {
    year::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Year not found".into()))
}

pub async fn find_schedule<C: ConnectionTrait>(db: &C, id: i32) -> Result<schedule::Model, AppError> {
    schedule::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Schedule not found".into()))
}

pub async fn find_school_day<C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<school_day::Model, AppError> {
    school_day::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("School day not found".into()))
}

pub async fn find_qualification<C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<qualification::Model, AppError> {
    qualification::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Qualification not found".into()))
}

pub async fn find_exam_record<C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<exam_record::Model, AppError> {
    exam_record::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Exam record not found".into()))
}
