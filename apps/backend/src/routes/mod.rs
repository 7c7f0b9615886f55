use actix_web::web;

pub mod auth;
pub mod games;
pub mod health;
pub mod sports;
pub mod users;

/// Register every application route.
///
/// Shared by `main.rs` and the test app builder; middleware is wrapped by
/// the caller.
pub fn configure(cfg: &mut web::ServiceConfig) {
    // Health check routes: /health
    cfg.configure(health::configure_routes);

    // Auth routes: /api/auth/**
    cfg.service(web::scope("/api/auth").configure(auth::configure_routes));

    // Games routes: /api/games/**
    cfg.service(web::scope("/api/games").configure(games::configure_routes));

    // Sports reference data: /api/sports
    cfg.service(web::scope("/api/sports").configure(sports::configure_routes));

    // Users and profiles: /api/users/**, /api/profile
    cfg.service(web::scope("/api/users").configure(users::configure_user_routes));
    cfg.service(web::scope("/api/profile").configure(users::configure_profile_routes));
}
