use sea_orm::sea_query::{Index, OnConflict, PostgresQueryBuilder};
use sea_orm::*;
use tracing::{info, warn};

use crate::entity::{exam_record, qualification, role, role_permission};

/// Default roles seeded on startup.
const DEFAULT_ROLES: &[&str] = &["admin", "teacher", role::DEFAULT_ROLE];

/// Default role-permission mappings seeded on startup.
const DEFAULT_MAPPINGS: &[(&str, &str)] = &[
    // Admin: all permissions
    ("admin", "grade:compute"),
    ("admin", "grade:view"),
    ("admin", "signal:record"),
    // Teacher
    ("teacher", "grade:compute"),
    ("teacher", "grade:view"),
    ("teacher", "signal:record"),
    // Staff
    (role::DEFAULT_ROLE, "grade:view"),
];

/// Seed the `role` and `role_permission` tables with defaults.
pub async fn seed_role_permissions(db: &DatabaseConnection) -> Result<(), DbErr> {
    let mut roles_inserted = 0u32;
    for &name in DEFAULT_ROLES {
        let model = role::ActiveModel {
            name: Set(name.to_string()),
        };

        let result = role::Entity::insert(model)
            .on_conflict(OnConflict::column(role::Column::Name).do_nothing().to_owned())
            .exec_without_returning(db)
            .await;

        match result {
            Ok(n) if n > 0 => roles_inserted += 1,
            Ok(_) | Err(DbErr::RecordNotInserted) => {}
            Err(e) => return Err(e),
        }
    }

    if roles_inserted > 0 {
        info!("Seeded {} new roles", roles_inserted);
    }

    let mut perms_inserted = 0u32;
    for &(role, permission) in DEFAULT_MAPPINGS {
        let model = role_permission::ActiveModel {
            role: Set(role.to_string()),
            permission: Set(permission.to_string()),
        };

        let result = role_permission::Entity::insert(model)
            .on_conflict(
                OnConflict::columns([
                    role_permission::Column::Role,
                    role_permission::Column::Permission,
                ])
                .do_nothing()
                .to_owned(),
            )
            .exec_without_returning(db)
            .await;

        match result {
            Ok(n) if n > 0 => perms_inserted += 1,
            Ok(_) | Err(DbErr::RecordNotInserted) => {}
            Err(e) => return Err(e),
        }
    }

    if perms_inserted > 0 {
        info!("Seeded {} new role-permission mappings", perms_inserted);
    }

    Ok(())
}

/// Ensure the composite lookup indexes used by the averaging queries exist.
///
/// Schema sync only creates single-column and unique indexes.
pub async fn ensure_indexes(db: &DatabaseConnection) -> Result<(), DbErr> {
    // Daily signal lookup:
    // SELECT rating FROM qualification WHERE student_id = ? AND teaching_block_id = ? AND status
    let qualification_idx = Index::create()
        .if_not_exists()
        .name("idx_qualification_student_block")
        .table(qualification::Entity)
        .col(qualification::Column::StudentId)
        .col(qualification::Column::TeachingBlockId)
        .to_string(PostgresQueryBuilder);

    // Practice and exam lookup:
    // SELECT score FROM exam_record WHERE student_id = ? AND teacher_group_id = ? AND teaching_block_id = ?
    let exam_idx = Index::create()
        .if_not_exists()
        .name("idx_exam_record_student_group_block")
        .table(exam_record::Entity)
        .col(exam_record::Column::StudentId)
        .col(exam_record::Column::TeacherGroupId)
        .col(exam_record::Column::TeachingBlockId)
        .to_string(PostgresQueryBuilder);

    for (name, stmt) in [
        ("idx_qualification_student_block", qualification_idx),
        ("idx_exam_record_student_group_block", exam_idx),
    ] {
        match db.execute_unprepared(&stmt).await {
            Ok(_) => info!("Ensured index {} exists", name),
            Err(e) => warn!("Failed to create index {}: {}", name, e),
        }
    }

    Ok(())
}
