pub mod solver;

use actix_web::web;

/// Register every HTTP route on an app.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(solver::solver_head)
        .service(solver::solve_grid)
        .service(solver::get_langs);
}
