use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::Config;
use crate::middleware::{metrics_handler, metrics_middleware, require_admin, require_auth};
use crate::routes::{
    admin, auth, business_memberships, businesses, chat_messages, health, milestones, permissions,
    project_memberships, projects, role_permissions, roles, team_memberships, teams,
};
use crate::services::{EmailService, UploadStore};

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<Config>,
    pub email: EmailService,
    pub uploads: UploadStore,
}

pub fn create_app(config: Config, pool: PgPool) -> Router {
    let email = EmailService::new(config.email.clone());
    let uploads = UploadStore::new(&config.uploads);
    let config = Arc::new(config);

    let state = AppState {
        pool,
        config: config.clone(),
        email,
        uploads,
    };

    // Build CORS layer based on configuration
    let cors = if config.security.cors_origins.is_empty() {
        // Default: allow any origin (for development)
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        // Production: only allow specified origins
        use tower_http::cors::AllowOrigin;
        let origins: Vec<_> = config
            .security
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    // Public routes (no authentication required)
    let public_routes = Router::new()
        .route("/api/auth/signup", post(auth::signup))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/forgot-password", post(auth::forgot_password))
        .route("/api/auth/verify-otp", post(auth::verify_otp))
        .route("/api/auth/reset-password", post(auth::reset_password))
        .route("/api/health", get(health::health_check))
        .route("/metrics", get(metrics_handler));

    // Admin routes (require the global admin role)
    let admin_routes = Router::new()
        .route("/api/admin/set-role", put(admin::set_role))
        .route("/api/businesses", post(businesses::create_business))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));

    // Authenticated resource routes
    let protected_routes = Router::new()
        // Businesses
        .route("/api/businesses", get(businesses::list_businesses))
        .route(
            "/api/businesses/:id",
            get(businesses::get_business)
                .put(businesses::update_business)
                .delete(businesses::delete_business),
        )
        // Business memberships
        .route(
            "/api/business-memberships",
            post(business_memberships::create_business_membership)
                .get(business_memberships::list_business_memberships),
        )
        .route(
            "/api/business-memberships/:id",
            get(business_memberships::get_business_membership)
                .put(business_memberships::update_business_membership)
                .delete(business_memberships::delete_business_membership),
        )
        // Teams
        .route("/api/teams", post(teams::create_team).get(teams::list_teams))
        .route(
            "/api/teams/:id",
            get(teams::get_team)
                .put(teams::update_team)
                .delete(teams::delete_team),
        )
        // Team memberships
        .route(
            "/api/team-memberships",
            post(team_memberships::create_team_membership)
                .get(team_memberships::list_team_memberships),
        )
        .route(
            "/api/team-memberships/:id",
            get(team_memberships::get_team_membership)
                .put(team_memberships::update_team_membership)
                .delete(team_memberships::delete_team_membership),
        )
        // Roles
        .route("/api/roles", post(roles::create_role).get(roles::list_roles))
        .route(
            "/api/roles/:id",
            put(roles::update_role).delete(roles::delete_role),
        )
        // Permissions
        .route(
            "/api/permissions",
            post(permissions::create_permission).get(permissions::list_permissions),
        )
        .route(
            "/api/permissions/:id",
            get(permissions::get_permission)
                .put(permissions::update_permission)
                .delete(permissions::delete_permission),
        )
        // Role permissions
        .route(
            "/api/role-permissions",
            post(role_permissions::create_role_permission)
                .get(role_permissions::list_role_permissions),
        )
        .route(
            "/api/role-permissions/:id",
            get(role_permissions::get_role_permission)
                .put(role_permissions::update_role_permission)
                .delete(role_permissions::delete_role_permission),
        )
        // Projects
        .route(
            "/api/projects",
            post(projects::create_project).get(projects::list_projects),
        )
        .route(
            "/api/projects/:id",
            get(projects::get_project)
                .put(projects::update_project)
                .delete(projects::delete_project),
        )
        // Project memberships
        .route(
            "/api/project-memberships",
            post(project_memberships::create_project_membership)
                .get(project_memberships::list_project_memberships),
        )
        .route(
            "/api/project-memberships/:id",
            get(project_memberships::get_project_membership)
                .put(project_memberships::update_project_membership)
                .delete(project_memberships::delete_project_membership),
        )
        // Milestones
        .route(
            "/api/milestones",
            post(milestones::create_milestone).get(milestones::list_milestones),
        )
        .route(
            "/api/milestones/:id",
            put(milestones::update_milestone).delete(milestones::delete_milestone),
        )
        // Chat messages
        .route(
            "/api/chat-messages",
            post(chat_messages::send_message).get(chat_messages::get_messages),
        )
        .route(
            "/api/chat-messages/business/:businessId",
            get(chat_messages::get_business_messages),
        )
        .route(
            "/api/chat-messages/:id",
            delete(chat_messages::delete_message),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .merge(public_routes)
        .merge(admin_routes)
        .merge(protected_routes)
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(CompressionLayer::new())
        .layer(DefaultBodyLimit::max(config.server.max_body_size))
        .layer(cors)
        .with_state(state)
}
