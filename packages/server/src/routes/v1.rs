use utoipa_axum::{router::OpenApiRouter, routes};

use crate::handlers;
use crate::state::AppState;

pub fn routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .nest("/auth", auth_routes())
        .nest("/averages", average_routes())
        .merge(signal_routes())
        .merge(teaching_block_routes())
}

fn auth_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::auth::register))
        .routes(routes!(handlers::auth::login))
        .routes(routes!(handlers::auth::me))
        .routes(routes!(handlers::auth::logout))
}

fn average_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::average::preview_block_average))
        .routes(routes!(
            handlers::average::save_block_average,
            handlers::average::lookup_block_averages
        ))
        .routes(routes!(handlers::average::list_student_block_averages))
        .routes(routes!(handlers::average::list_group_block_averages))
        .routes(routes!(handlers::average::list_teaching_block_averages))
        .routes(routes!(handlers::average::preview_annual_average))
        .routes(routes!(handlers::average::save_annual_average))
        .routes(routes!(handlers::average::list_student_annual_averages))
        .routes(routes!(handlers::average::list_group_annual_averages))
        .routes(routes!(handlers::average::list_year_group_annual_averages))
}

fn signal_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::signal::create_qualification))
        .routes(routes!(handlers::signal::deactivate_qualification))
        .routes(routes!(handlers::signal::create_exam_record))
        .routes(routes!(handlers::signal::deactivate_exam_record))
}

fn teaching_block_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(
        handlers::teaching_block::create_teaching_block,
        handlers::teaching_block::list_teaching_blocks
    ))
}
