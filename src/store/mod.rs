//! Storage access: one method per query the API issues.
//!
//! Handlers only see `Arc<dyn Store>`; `PgStore` talks to PostgreSQL and
//! `MemoryStore` keeps everything in process for tests and local runs.

mod memory;
mod pg;

pub use memory::MemoryStore;
pub use pg::PgStore;

use crate::error::StoreError;
use crate::models::{
    Curso, CursoInput, Estudiante, EstudianteInput, Inscripcion, InscripcionDetalle, InscripcionInput,
};
use async_trait::async_trait;

pub type StoreResult<T> = Result<T, StoreError>;

/// Update and delete return the number of rows affected; zero means the id did not exist.
#[async_trait]
pub trait Store: Send + Sync {
    /// Short backend name reported by `/ready`.
    fn backend(&self) -> &'static str;

    async fn ping(&self) -> StoreResult<()>;

    async fn list_estudiantes(&self) -> StoreResult<Vec<Estudiante>>;
    async fn get_estudiante(&self, id: i64) -> StoreResult<Option<Estudiante>>;
    async fn insert_estudiante(&self, input: &EstudianteInput) -> StoreResult<()>;
    async fn update_estudiante(&self, id: i64, input: &EstudianteInput) -> StoreResult<u64>;
    async fn delete_estudiante(&self, id: i64) -> StoreResult<u64>;

    async fn list_cursos(&self) -> StoreResult<Vec<Curso>>;
    async fn get_curso(&self, id: i64) -> StoreResult<Option<Curso>>;
    async fn insert_curso(&self, input: &CursoInput) -> StoreResult<()>;
    async fn update_curso(&self, id: i64, input: &CursoInput) -> StoreResult<u64>;
    async fn delete_curso(&self, id: i64) -> StoreResult<u64>;

    async fn list_inscripciones(&self) -> StoreResult<Vec<Inscripcion>>;
    async fn get_inscripcion(&self, id: i64) -> StoreResult<Option<Inscripcion>>;
    /// Advisory only: nothing stops a concurrent insert between this read and the write.
    async fn enrollment_exists(&self, estudiante_id: i64, curso_id: i64) -> StoreResult<bool>;
    async fn insert_inscripcion(&self, input: &InscripcionInput) -> StoreResult<()>;
    async fn update_inscripcion(&self, id: i64, input: &InscripcionInput) -> StoreResult<u64>;
    async fn delete_inscripcion(&self, id: i64) -> StoreResult<u64>;

    /// Enrollments joined with student and course names, newest first.
    async fn list_inscripcion_detalles(&self) -> StoreResult<Vec<InscripcionDetalle>>;
}
