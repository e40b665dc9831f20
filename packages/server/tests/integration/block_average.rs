use gradebook_server::entity::block_average;
use sea_orm::{EntityTrait, PaginatorTrait};
use serde_json::json;

use crate::common::{Roster, TestApp, routes};

fn key(roster: &Roster, block: usize) -> serde_json::Value {
    json!({
        "student_id": roster.student_id,
        "assignment_id": roster.group_id,
        "teaching_block_id": roster.block_ids[block],
    })
}

/// Qualifications [6, 8], practice [10], exams [5, 5] in the first block.
async fn record_reference_signals(app: &TestApp, token: &str, roster: &Roster) {
    let block = roster.block_ids[0];
    app.record_qualification(token, roster, block, Some(6.0)).await;
    app.record_qualification(token, roster, block, Some(8.0)).await;
    app.record_exam(token, roster, block, "Practice", 10.0).await;
    app.record_exam(token, roster, block, "Exam", 5.0).await;
    app.record_exam(token, roster, block, "Exam", 5.0).await;
}

mod computation {
    use super::*;

    #[tokio::test]
    async fn weighted_composite_of_reference_signals() {
        let app = TestApp::spawn().await;
        let roster = app.seed_roster().await;
        let token = app.teacher_token().await;
        record_reference_signals(&app, &token, &roster).await;

        let res = app
            .post_with_token(routes::BLOCK_PREVIEW, &key(&roster, 0), &token)
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["daily_average"], 7.0);
        assert_eq!(res.body["practice_average"], 10.0);
        assert_eq!(res.body["exam_average"], 5.0);
        assert_eq!(res.body["block_average"], 7.1);
    }

    #[tokio::test]
    async fn no_signals_yield_all_zero_components() {
        let app = TestApp::spawn().await;
        let roster = app.seed_roster().await;
        let token = app.teacher_token().await;

        let res = app
            .post_with_token(routes::BLOCK_PREVIEW, &key(&roster, 0), &token)
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["daily_average"], 0.0);
        assert_eq!(res.body["practice_average"], 0.0);
        assert_eq!(res.body["exam_average"], 0.0);
        assert_eq!(res.body["block_average"], 0.0);
    }

    #[tokio::test]
    async fn unrated_and_deactivated_qualifications_are_ignored() {
        let app = TestApp::spawn().await;
        let roster = app.seed_roster().await;
        let token = app.teacher_token().await;
        let block = roster.block_ids[0];

        app.record_qualification(&token, &roster, block, Some(9.0)).await;
        app.record_qualification(&token, &roster, block, None).await;
        let dropped = app
            .record_qualification(&token, &roster, block, Some(1.0))
            .await;
        let res = app
            .delete_with_token(&routes::qualification(dropped), &token)
            .await;
        assert_eq!(res.status, 204);

        let res = app
            .post_with_token(routes::BLOCK_PREVIEW, &key(&roster, 0), &token)
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["daily_average"], 9.0);
        assert_eq!(res.body["block_average"], 2.7);
    }

    #[tokio::test]
    async fn signals_outside_the_scope_are_ignored() {
        let app = TestApp::spawn().await;
        let roster = app.seed_roster().await;
        let token = app.teacher_token().await;
        let block = roster.block_ids[0];

        app.record_qualification(&token, &roster, block, Some(10.0)).await;
        // Another course in the same grade and section.
        let res = app
            .post_with_token(
                routes::QUALIFICATIONS,
                &json!({
                    "student_id": roster.student_id,
                    "schedule_id": roster.other_course_schedule_id,
                    "school_day_id": roster.school_day_id,
                    "teaching_block_id": block,
                    "rating": 2.0,
                }),
                &token,
            )
            .await;
        assert_eq!(res.status, 201, "{}", res.text);
        // Another block.
        app.record_exam(&token, &roster, roster.block_ids[1], "Exam", 20.0)
            .await;

        let res = app
            .post_with_token(routes::BLOCK_PREVIEW, &key(&roster, 0), &token)
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["daily_average"], 10.0);
        assert_eq!(res.body["exam_average"], 0.0);
        assert_eq!(res.body["block_average"], 3.0);
    }

    #[tokio::test]
    async fn preview_persists_nothing() {
        let app = TestApp::spawn().await;
        let roster = app.seed_roster().await;
        let token = app.teacher_token().await;
        record_reference_signals(&app, &token, &roster).await;

        let res = app
            .post_with_token(routes::BLOCK_PREVIEW, &key(&roster, 0), &token)
            .await;
        assert_eq!(res.status, 200);

        let rows = block_average::Entity::find().count(&app.db).await.unwrap();
        assert_eq!(rows, 0);
    }
}

mod saving {
    use super::*;

    #[tokio::test]
    async fn save_returns_the_persisted_record() {
        let app = TestApp::spawn().await;
        let roster = app.seed_roster().await;
        let token = app.teacher_token().await;
        record_reference_signals(&app, &token, &roster).await;

        let res = app
            .post_with_token(routes::BLOCKS, &key(&roster, 0), &token)
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert!(res.body["id"].is_number());
        assert_eq!(res.body["student_id"], roster.student_id);
        assert_eq!(res.body["assignment_id"], roster.group_id);
        assert_eq!(res.body["teaching_block_id"], roster.block_ids[0]);
        assert_eq!(res.body["block_average"], 7.1);
        assert_eq!(res.body["status"], true);

        let stored = block_average::Entity::find_by_id(res.id())
            .one(&app.db)
            .await
            .unwrap()
            .expect("block average should be stored");
        assert_eq!(stored.block_average, 7.1);
        assert_eq!(stored.daily_average, 7.0);
    }

    #[tokio::test]
    async fn saving_twice_keeps_one_row_per_key() {
        let app = TestApp::spawn().await;
        let roster = app.seed_roster().await;
        let token = app.teacher_token().await;
        record_reference_signals(&app, &token, &roster).await;

        let first = app
            .post_with_token(routes::BLOCKS, &key(&roster, 0), &token)
            .await;
        let second = app
            .post_with_token(routes::BLOCKS, &key(&roster, 0), &token)
            .await;

        assert_eq!(first.status, 200, "{}", first.text);
        assert_eq!(second.status, 200, "{}", second.text);
        assert_eq!(first.id(), second.id());
        assert_eq!(first.body["block_average"], second.body["block_average"]);

        let rows = block_average::Entity::find().count(&app.db).await.unwrap();
        assert_eq!(rows, 1);
    }

    #[tokio::test]
    async fn recomputing_after_new_signals_updates_in_place() {
        let app = TestApp::spawn().await;
        let roster = app.seed_roster().await;
        let token = app.teacher_token().await;
        let block = roster.block_ids[0];

        app.record_exam(&token, &roster, block, "Exam", 10.0).await;
        let first = app
            .post_with_token(routes::BLOCKS, &key(&roster, 0), &token)
            .await;
        assert_eq!(first.body["block_average"], 4.0);

        app.record_exam(&token, &roster, block, "Exam", 20.0).await;
        let second = app
            .post_with_token(routes::BLOCKS, &key(&roster, 0), &token)
            .await;

        assert_eq!(second.status, 200, "{}", second.text);
        assert_eq!(second.id(), first.id());
        assert_eq!(second.body["exam_average"], 15.0);
        assert_eq!(second.body["block_average"], 6.0);
    }
}

mod validation {
    use super::*;

    #[tokio::test]
    async fn missing_identifier_is_rejected() {
        let app = TestApp::spawn().await;
        let roster = app.seed_roster().await;
        let token = app.teacher_token().await;

        let res = app
            .post_with_token(
                routes::BLOCKS,
                &json!({"student_id": roster.student_id, "assignment_id": roster.group_id}),
                &token,
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
        assert_eq!(res.body["message"], "teaching_block_id is required");
    }

    #[tokio::test]
    async fn non_positive_identifier_is_rejected() {
        let app = TestApp::spawn().await;
        let token = app.teacher_token().await;

        let res = app
            .post_with_token(
                routes::BLOCK_PREVIEW,
                &json!({"student_id": 0, "assignment_id": 1, "teaching_block_id": 1}),
                &token,
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn unknown_assignment_is_not_found_and_nothing_is_written() {
        let app = TestApp::spawn().await;
        let roster = app.seed_roster().await;
        let token = app.teacher_token().await;

        let res = app
            .post_with_token(
                routes::BLOCKS,
                &json!({
                    "student_id": roster.student_id,
                    "assignment_id": 9999,
                    "teaching_block_id": roster.block_ids[0],
                }),
                &token,
            )
            .await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");
        assert_eq!(res.body["message"], "Teacher group not found");

        let rows = block_average::Entity::find().count(&app.db).await.unwrap();
        assert_eq!(rows, 0);
    }

    #[tokio::test]
    async fn block_from_another_year_is_rejected_and_nothing_is_written() {
        let app = TestApp::spawn().await;
        let roster = app.seed_roster().await;
        let token = app.teacher_token().await;
        let next_year = app.insert_year("2026").await;
        let foreign_block = app.insert_teaching_block(next_year, 1).await;

        let res = app
            .post_with_token(
                routes::BLOCKS,
                &json!({
                    "student_id": roster.student_id,
                    "assignment_id": roster.group_id,
                    "teaching_block_id": foreign_block,
                }),
                &token,
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
        assert_eq!(
            res.body["message"],
            "Teaching block does not belong to the assignment's year"
        );

        let rows = block_average::Entity::find().count(&app.db).await.unwrap();
        assert_eq!(rows, 0);
    }

    #[tokio::test]
    async fn unknown_teaching_block_is_not_found() {
        let app = TestApp::spawn().await;
        let roster = app.seed_roster().await;
        let token = app.teacher_token().await;

        let res = app
            .post_with_token(
                routes::BLOCK_PREVIEW,
                &json!({
                    "student_id": roster.student_id,
                    "assignment_id": roster.group_id,
                    "teaching_block_id": 9999,
                }),
                &token,
            )
            .await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");
    }
}

mod access {
    use super::*;

    #[tokio::test]
    async fn staff_cannot_compute_averages() {
        let app = TestApp::spawn().await;
        let roster = app.seed_roster().await;
        let token = app.create_authenticated_user("clerk", "password123").await;

        let res = app
            .post_with_token(routes::BLOCKS, &key(&roster, 0), &token)
            .await;

        assert_eq!(res.status, 403);
        assert_eq!(res.body["code"], "PERMISSION_DENIED");
    }

    #[tokio::test]
    async fn computing_requires_a_token() {
        let app = TestApp::spawn().await;
        let roster = app.seed_roster().await;

        let res = app
            .post_without_token(routes::BLOCK_PREVIEW, &key(&roster, 0))
            .await;

        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "TOKEN_MISSING");
    }
}
