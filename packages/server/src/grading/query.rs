//! Read side of the pipeline: filtered listings of stored averages with
//! descriptive attributes batch-loaded alongside.

use std::collections::{BTreeSet, HashMap};

use sea_orm::sea_query::{Query as SeaQuery, SelectStatement};
use sea_orm::*;

use super::GradingError;
use crate::entity::{
    annual_average, block_average, course, grade, section, student, teacher_group, teaching_block,
    year,
};
use crate::models::average::{AnnualAverageView, AssignmentInfo, BlockAverageView};

/// Filter over active block averages. Set fields are AND-combined.
#[derive(Debug, Clone, Default)]
pub struct BlockAverageFilter {
    pub student_id: Option<i32>,
    pub teacher_group_id: Option<i32>,
    pub teaching_block_id: Option<i32>,
    /// Matches averages whose teaching block belongs to this year.
    pub year_id: Option<i32>,
}

impl BlockAverageFilter {
    fn condition(&self) -> Condition {
        let mut cond = Condition::all().add(block_average::Column::Status.eq(true));
        if let Some(id) = self.student_id {
            cond = cond.add(block_average::Column::StudentId.eq(id));
        }
        if let Some(id) = self.teacher_group_id {
            cond = cond.add(block_average::Column::TeacherGroupId.eq(id));
        }
        if let Some(id) = self.teaching_block_id {
            cond = cond.add(block_average::Column::TeachingBlockId.eq(id));
        }
        if let Some(year_id) = self.year_id {
            cond = cond.add(block_average::Column::TeachingBlockId.in_subquery(blocks_in_year(year_id)));
        }
        cond
    }
}

/// Filter over active annual averages. Set fields are AND-combined.
#[derive(Debug, Clone, Default)]
pub struct AnnualAverageFilter {
    pub student_id: Option<i32>,
    pub teacher_group_id: Option<i32>,
    pub year_id: Option<i32>,
}

impl AnnualAverageFilter {
    fn condition(&self) -> Condition {
        let mut cond = Condition::all().add(annual_average::Column::Status.eq(true));
        if let Some(id) = self.student_id {
            cond = cond.add(annual_average::Column::StudentId.eq(id));
        }
        if let Some(id) = self.teacher_group_id {
            cond = cond.add(annual_average::Column::TeacherGroupId.eq(id));
        }
        if let Some(id) = self.year_id {
            cond = cond.add(annual_average::Column::YearId.eq(id));
        }
        cond
    }
}

/// `SELECT id FROM teaching_block WHERE year_id = ?`
pub(crate) fn blocks_in_year(year_id: i32) -> SelectStatement {
    SeaQuery::select()
        .column(teaching_block::Column::Id)
        .from(teaching_block::Entity)
        .and_where(teaching_block::Column::YearId.eq(year_id))
        .to_owned()
}

/// List block averages matching `filter`, ordered by block ordinal then ID.
pub async fn list_block_averages<C: ConnectionTrait>(
    db: &C,
    filter: &BlockAverageFilter,
) -> Result<Vec<BlockAverageView>, GradingError> {
    let rows = block_average::Entity::find()
        .filter(filter.condition())
        .order_by_asc(block_average::Column::Id)
        .all(db)
        .await?;
    if rows.is_empty() {
        return Ok(Vec::new());
    }

    let blocks: HashMap<i32, teaching_block::Model> = teaching_block::Entity::find()
        .filter(teaching_block::Column::Id.is_in(distinct(rows.iter().map(|r| r.teaching_block_id))))
        .all(db)
        .await?
        .into_iter()
        .map(|b| (b.id, b))
        .collect();

    let labels = Labels::load(
        db,
        rows.iter().map(|r| r.student_id),
        rows.iter().map(|r| r.teacher_group_id),
        blocks.values().map(|b| b.year_id),
    )
    .await?;

    let mut views: Vec<BlockAverageView> = rows
        .into_iter()
        .filter_map(|row| {
            let block = blocks.get(&row.teaching_block_id)?;
            Some(BlockAverageView {
                id: row.id,
                student_id: row.student_id,
                student_name: labels.student(row.student_id),
                assignment: labels.assignment(row.teacher_group_id),
                teaching_block_id: row.teaching_block_id,
                teaching_block_name: block.name.clone(),
                teaching_block_ordinal: block.ordinal,
                year_id: block.year_id,
                year_label: labels.year(block.year_id),
                daily_average: row.daily_average,
                practice_average: row.practice_average,
                exam_average: row.exam_average,
                block_average: row.block_average,
                updated_at: row.updated_at,
            })
        })
        .collect();

    views.sort_by_key(|v| (v.teaching_block_ordinal, v.id));
    Ok(views)
}

/// List annual averages matching `filter`, ordered by ID.
pub async fn list_annual_averages<C: ConnectionTrait>(
    db: &C,
    filter: &AnnualAverageFilter,
) -> Result<Vec<AnnualAverageView>, GradingError> {
    let rows = annual_average::Entity::find()
        .filter(filter.condition())
        .order_by_asc(annual_average::Column::Id)
        .all(db)
        .await?;
    if rows.is_empty() {
        return Ok(Vec::new());
    }

    let labels = Labels::load(
        db,
        rows.iter().map(|r| r.student_id),
        rows.iter().map(|r| r.teacher_group_id),
        rows.iter().map(|r| r.year_id),
    )
    .await?;

    Ok(rows
        .into_iter()
        .map(|row| AnnualAverageView {
            id: row.id,
            student_id: row.student_id,
            student_name: labels.student(row.student_id),
            assignment: labels.assignment(row.teacher_group_id),
            year_id: row.year_id,
            year_label: labels.year(row.year_id),
            block1_average: row.block1_average,
            block2_average: row.block2_average,
            block3_average: row.block3_average,
            block4_average: row.block4_average,
            course_average: row.course_average,
            updated_at: row.updated_at,
        })
        .collect())
}

fn distinct(ids: impl Iterator<Item = i32>) -> Vec<i32> {
    ids.collect::<BTreeSet<_>>().into_iter().collect()
}

/// Display names for the rows of one listing, loaded with one query per table.
struct Labels {
    students: HashMap<i32, String>,
    assignments: HashMap<i32, AssignmentInfo>,
    years: HashMap<i32, String>,
}

impl Labels {
    async fn load<C: ConnectionTrait>(
        db: &C,
        student_ids: impl Iterator<Item = i32>,
        group_ids: impl Iterator<Item = i32>,
        year_ids: impl Iterator<Item = i32>,
    ) -> Result<Self, DbErr> {
        let students = student::Entity::find()
            .filter(student::Column::Id.is_in(distinct(student_ids)))
            .all(db)
            .await?
            .into_iter()
            .map(|s| (s.id, s.full_name()))
            .collect();

        let groups = teacher_group::Entity::find()
            .filter(teacher_group::Column::Id.is_in(distinct(group_ids)))
            .all(db)
            .await?;

        let courses: HashMap<i32, String> = course::Entity::find()
            .select_only()
            .column(course::Column::Id)
            .column(course::Column::Name)
            .filter(course::Column::Id.is_in(distinct(groups.iter().map(|g| g.course_id))))
            .into_tuple::<(i32, String)>()
            .all(db)
            .await?
            .into_iter()
            .collect();
        let grades: HashMap<i32, String> = grade::Entity::find()
            .select_only()
            .column(grade::Column::Id)
            .column(grade::Column::Name)
            .filter(grade::Column::Id.is_in(distinct(groups.iter().map(|g| g.grade_id))))
            .into_tuple::<(i32, String)>()
            .all(db)
            .await?
            .into_iter()
            .collect();
        let sections: HashMap<i32, String> = section::Entity::find()
            .select_only()
            .column(section::Column::Id)
            .column(section::Column::Name)
            .filter(section::Column::Id.is_in(distinct(groups.iter().map(|g| g.section_id))))
            .into_tuple::<(i32, String)>()
            .all(db)
            .await?
            .into_iter()
            .collect();

        let assignments = groups
            .into_iter()
            .map(|g| {
                let info = AssignmentInfo {
                    id: g.id,
                    course: courses.get(&g.course_id).cloned().unwrap_or_default(),
                    grade: grades.get(&g.grade_id).cloned().unwrap_or_default(),
                    section: sections.get(&g.section_id).cloned().unwrap_or_default(),
                };
                (g.id, info)
            })
            .collect();

        let years = year::Entity::find()
            .select_only()
            .column(year::Column::Id)
            .column(year::Column::Label)
            .filter(year::Column::Id.is_in(distinct(year_ids)))
            .into_tuple::<(i32, String)>()
            .all(db)
            .await?
            .into_iter()
            .collect();

        Ok(Self {
            students,
            assignments,
            years,
        })
    }

    fn student(&self, id: i32) -> String {
        self.students.get(&id).cloned().unwrap_or_default()
    }

    fn assignment(&self, id: i32) -> AssignmentInfo {
        self.assignments.get(&id).cloned().unwrap_or(AssignmentInfo {
            id,
            course: String::new(),
            grade: String::new(),
            section: String::new(),
        })
    }

    fn year(&self, id: i32) -> String {
        self.years.get(&id).cloned().unwrap_or_default()
    }
}
