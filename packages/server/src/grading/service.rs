use std::collections::HashMap;

use chrono::Utc;
use common::{AnnualAverageValues, BlockAverageValues, BlockSlots, ExamKind, GradeWeights};
use sea_orm::sea_query::{OnConflict, Query as SeaQuery};
use sea_orm::*;
use tracing::{debug, info, instrument, warn};

use super::query::blocks_in_year;
use super::{BlockKey, GradingError, YearKey};
use crate::entity::{
    annual_average, block_average, exam_record, qualification, schedule, student, teacher_group,
    teaching_block, year,
};

/// Computes and persists block and annual averages.
///
/// Generic over the connection so handlers can run a save inside a transaction
/// while previews read straight from the pool.
pub struct GradingService<'a, C: ConnectionTrait> {
    conn: &'a C,
    weights: GradeWeights,
}

impl<'a, C: ConnectionTrait> GradingService<'a, C> {
    pub fn new(conn: &'a C, weights: GradeWeights) -> Self {
        Self { conn, weights }
    }

    /// Compute the block average for `key` from its active signals. Nothing is written.
    #[instrument(skip(self))]
    pub async fn compute_block_average(
        &self,
        key: BlockKey,
    ) -> Result<BlockAverageValues, GradingError> {
        let group = self.require_teacher_group(key.teacher_group_id).await?;
        self.require_student(key.student_id).await?;
        let block = self.require_teaching_block(key.teaching_block_id).await?;
        if block.year_id != group.year_id {
            return Err(GradingError::Validation(
                "Teaching block does not belong to the assignment's year".into(),
            ));
        }

        let ratings = self.daily_ratings(&key, &group).await?;
        let practices = self.exam_scores(&key, ExamKind::Practice).await?;
        let exams = self.exam_scores(&key, ExamKind::Exam).await?;

        debug!(
            ratings = ratings.len(),
            practices = practices.len(),
            exams = exams.len(),
            "Collected block signals"
        );

        Ok(BlockAverageValues::compute(
            &ratings,
            &practices,
            &exams,
            &self.weights,
        ))
    }

    /// Compute and upsert the block average for `key`.
    ///
    /// Recomputing with unchanged signals rewrites the same values onto the same row.
    #[instrument(skip(self))]
    pub async fn save_block_average(
        &self,
        key: BlockKey,
    ) -> Result<block_average::Model, GradingError> {
        let values = self.compute_block_average(key).await?;

        let row = block_average::ActiveModel {
            student_id: Set(key.student_id),
            teacher_group_id: Set(key.teacher_group_id),
            teaching_block_id: Set(key.teaching_block_id),
            daily_average: Set(values.daily_average),
            practice_average: Set(values.practice_average),
            exam_average: Set(values.exam_average),
            block_average: Set(values.block_average),
            status: Set(true),
            updated_at: Set(Utc::now()),
            ..Default::default()
        };

        block_average::Entity::insert(row)
            .on_conflict(
                OnConflict::columns([
                    block_average::Column::StudentId,
                    block_average::Column::TeacherGroupId,
                    block_average::Column::TeachingBlockId,
                ])
                .update_columns([
                    block_average::Column::DailyAverage,
                    block_average::Column::PracticeAverage,
                    block_average::Column::ExamAverage,
                    block_average::Column::BlockAverage,
                    block_average::Column::Status,
                    block_average::Column::UpdatedAt,
                ])
                .to_owned(),
            )
            .exec_without_returning(self.conn)
            .await?;

        let saved = block_average::Entity::find()
            .filter(block_average::Column::StudentId.eq(key.student_id))
            .filter(block_average::Column::TeacherGroupId.eq(key.teacher_group_id))
            .filter(block_average::Column::TeachingBlockId.eq(key.teaching_block_id))
            .one(self.conn)
            .await?
            .ok_or_else(|| {
                GradingError::Store(DbErr::RecordNotFound(
                    "block_average missing after upsert".into(),
                ))
            })?;

        info!(
            block_average_id = saved.id,
            block_average = saved.block_average,
            "Block average saved"
        );
        Ok(saved)
    }

    /// Roll the stored block averages of a year into slot values and a course average.
    /// Nothing is written.
    #[instrument(skip(self))]
    pub async fn compute_annual_average(
        &self,
        key: YearKey,
    ) -> Result<AnnualAverageValues, GradingError> {
        self.require_teacher_group(key.teacher_group_id).await?;
        self.require_student(key.student_id).await?;
        self.require_year(key.year_id).await?;

        let rows: Vec<(i32, f64)> = block_average::Entity::find()
            .select_only()
            .column(block_average::Column::TeachingBlockId)
            .column(block_average::Column::BlockAverage)
            .filter(block_average::Column::StudentId.eq(key.student_id))
            .filter(block_average::Column::TeacherGroupId.eq(key.teacher_group_id))
            .filter(block_average::Column::Status.eq(true))
            .filter(block_average::Column::TeachingBlockId.in_subquery(blocks_in_year(key.year_id)))
            .into_tuple()
            .all(self.conn)
            .await?;

        if rows.is_empty() {
            return Err(GradingError::NotFound(
                "No block averages found for this year".into(),
            ));
        }

        let block_ids: Vec<i32> = rows.iter().map(|(id, _)| *id).collect();
        let ordinals: HashMap<i32, i32> = teaching_block::Entity::find()
            .select_only()
            .column(teaching_block::Column::Id)
            .column(teaching_block::Column::Ordinal)
            .filter(teaching_block::Column::Id.is_in(block_ids))
            .into_tuple::<(i32, i32)>()
            .all(self.conn)
            .await?
            .into_iter()
            .collect();

        let mut slots = BlockSlots::new();
        for (block_id, value) in rows {
            match ordinals.get(&block_id) {
                Some(&ordinal) if slots.set(ordinal, value) => {}
                Some(&ordinal) => {
                    warn!(block_id, ordinal, "Teaching block ordinal out of range, ignoring");
                }
                None => warn!(block_id, "Teaching block vanished during aggregation"),
            }
        }

        AnnualAverageValues::from_slots(&slots).ok_or_else(|| {
            GradingError::Validation("No valid block averages to compute an annual average".into())
        })
    }

    /// Compute and upsert the annual average for `key`.
    #[instrument(skip(self))]
    pub async fn save_annual_average(
        &self,
        key: YearKey,
    ) -> Result<annual_average::Model, GradingError> {
        let values = self.compute_annual_average(key).await?;

        let row = annual_average::ActiveModel {
            student_id: Set(key.student_id),
            teacher_group_id: Set(key.teacher_group_id),
            year_id: Set(key.year_id),
            block1_average: Set(values.block1_average),
            block2_average: Set(values.block2_average),
            block3_average: Set(values.block3_average),
            block4_average: Set(values.block4_average),
            course_average: Set(values.course_average),
            status: Set(true),
            updated_at: Set(Utc::now()),
            ..Default::default()
        };

        annual_average::Entity::insert(row)
            .on_conflict(
                OnConflict::columns([
                    annual_average::Column::StudentId,
                    annual_average::Column::TeacherGroupId,
                    annual_average::Column::YearId,
                ])
                .update_columns([
                    annual_average::Column::Block1Average,
                    annual_average::Column::Block2Average,
                    annual_average::Column::Block3Average,
                    annual_average::Column::Block4Average,
                    annual_average::Column::CourseAverage,
                    annual_average::Column::Status,
                    annual_average::Column::UpdatedAt,
                ])
                .to_owned(),
            )
            .exec_without_returning(self.conn)
            .await?;

        let saved = annual_average::Entity::find()
            .filter(annual_average::Column::StudentId.eq(key.student_id))
            .filter(annual_average::Column::TeacherGroupId.eq(key.teacher_group_id))
            .filter(annual_average::Column::YearId.eq(key.year_id))
            .one(self.conn)
            .await?
            .ok_or_else(|| {
                GradingError::Store(DbErr::RecordNotFound(
                    "annual_average missing after upsert".into(),
                ))
            })?;

        info!(
            annual_average_id = saved.id,
            course_average = saved.course_average,
            "Annual average saved"
        );
        Ok(saved)
    }

    /// Non-null ratings of active qualifications in sessions that belong to the
    /// group's grade, section and course.
    async fn daily_ratings(
        &self,
        key: &BlockKey,
        group: &teacher_group::Model,
    ) -> Result<Vec<f64>, DbErr> {
        let ratings: Vec<Option<f64>> = qualification::Entity::find()
            .select_only()
            .column(qualification::Column::Rating)
            .filter(qualification::Column::StudentId.eq(key.student_id))
            .filter(qualification::Column::TeachingBlockId.eq(key.teaching_block_id))
            .filter(qualification::Column::Status.eq(true))
            .filter(
                qualification::Column::ScheduleId.in_subquery(
                    SeaQuery::select()
                        .column(schedule::Column::Id)
                        .from(schedule::Entity)
                        .and_where(schedule::Column::GradeId.eq(group.grade_id))
                        .and_where(schedule::Column::SectionId.eq(group.section_id))
                        .and_where(schedule::Column::CourseId.eq(group.course_id))
                        .to_owned(),
                ),
            )
            .into_tuple()
            .all(self.conn)
            .await?;

        Ok(ratings.into_iter().flatten().collect())
    }

    async fn exam_scores(&self, key: &BlockKey, kind: ExamKind) -> Result<Vec<f64>, DbErr> {
        exam_record::Entity::find()
            .select_only()
            .column(exam_record::Column::Score)
            .filter(exam_record::Column::StudentId.eq(key.student_id))
            .filter(exam_record::Column::TeacherGroupId.eq(key.teacher_group_id))
            .filter(exam_record::Column::TeachingBlockId.eq(key.teaching_block_id))
            .filter(exam_record::Column::Kind.eq(kind))
            .filter(exam_record::Column::Status.eq(true))
            .into_tuple()
            .all(self.conn)
            .await
    }

    async fn require_teacher_group(&self, id: i32) -> Result<teacher_group::Model, GradingError> {
        teacher_group::Entity::find_by_id(id)
            .one(self.conn)
            .await?
            .ok_or_else(|| GradingError::NotFound("Teacher group not found".into()))
    }

    async fn require_student(&self, id: i32) -> Result<student::Model, GradingError> {
        student::Entity::find_by_id(id)
            .one(self.conn)
            .await?
            .ok_or_else(|| GradingError::NotFound("Student not found".into()))
    }

    async fn require_teaching_block(&self, id: i32) -> Result<teaching_block::Model, GradingError> {
        teaching_block::Entity::find_by_id(id)
            .one(self.conn)
            .await?
            .ok_or_else(|| GradingError::NotFound("Teaching block not found".into()))
    }

    async fn require_year(&self, id: i32) -> Result<year::Model, GradingError> {
        year::Entity::find_by_id(id)
            .one(self.conn)
            .await?
            .ok_or_else(|| GradingError::NotFound("Year not found".into()))
    }
}
