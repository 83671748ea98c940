//! Resource routes, mounted under /api.
//! The static `/inscripciones/detalles` segment wins over `/inscripciones/:id`.

use crate::handlers::{cursos, estudiantes, inscripciones, prueba};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn records_routes(state: AppState) -> Router {
    Router::new()
        .route("/prueba", get(prueba))
        .route("/estudiantes", get(estudiantes::list).post(estudiantes::create))
        .route(
            "/estudiantes/:id",
            get(estudiantes::read)
                .put(estudiantes::update)
                .delete(estudiantes::delete),
        )
        .route("/cursos", get(cursos::list).post(cursos::create))
        .route(
            "/cursos/:id",
            get(cursos::read).put(cursos::update).delete(cursos::delete),
        )
        .route("/inscripciones", get(inscripciones::list).post(inscripciones::create))
        .route("/inscripciones/detalles", get(inscripciones::detalles))
        .route(
            "/inscripciones/:id",
            get(inscripciones::read)
                .put(inscripciones::update)
                .delete(inscripciones::delete),
        )
        .with_state(state)
}
