use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::state::AppState;

pub fn routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .nest("/auth", auth_routes())
        .nest("/projects", project_routes())
        .nest("/admin/projects", admin_project_routes())
}

fn auth_routes() -> OpenApiRouter<AppState> {
    use crate::handlers::auth::*;

    OpenApiRouter::new()
        .routes(routes!(login))
        .routes(routes!(logout))
        .routes(routes!(session))
}

fn project_routes() -> OpenApiRouter<AppState> {
    use crate::handlers::project::*;

    OpenApiRouter::new()
        .routes(routes!(list_projects))
        .routes(routes!(get_project))
}

fn admin_project_routes() -> OpenApiRouter<AppState> {
    use crate::handlers::project::*;

    OpenApiRouter::new()
        .routes(routes!(create_project))
        .routes(routes!(update_project, delete_project))
        .layer(project_upload_body_limit())
}
