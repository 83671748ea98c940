//! PostgreSQL-backed store. Columns are cast in SQL so decoding does not depend on
//! whether ids were declared `serial` or `bigserial`.

use super::{Store, StoreResult};
use crate::db::{Db, SqlParam};
use crate::error::StoreError;
use crate::models::{
    Curso, CursoInput, Estudiante, EstudianteInput, Inscripcion, InscripcionDetalle, InscripcionInput,
};
use async_trait::async_trait;

const SELECT_ESTUDIANTES: &str = "SELECT id::int8 AS id, nombre, correo FROM estudiantes";
const SELECT_CURSOS: &str = "SELECT id::int8 AS id, nombre, creditos::int4 AS creditos FROM cursos";
const SELECT_INSCRIPCIONES: &str = "SELECT id::int8 AS id, estudiante_id::int8 AS estudiante_id, \
     curso_id::int8 AS curso_id, fecha_inscripcion::date AS fecha_inscripcion FROM inscripciones";

const SELECT_DETALLES: &str = r#"
    SELECT
        inscripciones.id::int8 AS inscripcion_id,
        estudiantes.nombre AS estudiante,
        cursos.nombre AS curso,
        cursos.creditos::int4 AS creditos,
        inscripciones.fecha_inscripcion::date AS fecha_inscripcion
    FROM inscripciones
    INNER JOIN estudiantes ON inscripciones.estudiante_id = estudiantes.id
    INNER JOIN cursos ON inscripciones.curso_id = cursos.id
    ORDER BY inscripciones.fecha_inscripcion DESC
"#;

#[derive(Clone)]
pub struct PgStore {
    db: Db,
}

impl PgStore {
    pub fn new(db: Db) -> Self {
        PgStore { db }
    }

    async fn all<T>(&self, sql: &str, params: Vec<SqlParam>) -> StoreResult<Vec<T>>
    where
        T: for<'r> sqlx::FromRow<'r, sqlx::postgres::PgRow> + Send + Unpin,
    {
        self.db.fetch_all(sql, params).await.map_err(StoreError::from_sqlx)
    }

    async fn one<T>(&self, sql: &str, params: Vec<SqlParam>) -> StoreResult<Option<T>>
    where
        T: for<'r> sqlx::FromRow<'r, sqlx::postgres::PgRow> + Send + Unpin,
    {
        self.db.fetch_optional(sql, params).await.map_err(StoreError::from_sqlx)
    }

    async fn write(&self, sql: &str, params: Vec<SqlParam>) -> StoreResult<u64> {
        self.db.execute(sql, params).await.map_err(StoreError::from_sqlx)
    }
}

#[async_trait]
impl Store for PgStore {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn ping(&self) -> StoreResult<()> {
        self.db.ping().await.map_err(StoreError::from_sqlx)
    }

    async fn list_estudiantes(&self) -> StoreResult<Vec<Estudiante>> {
        self.all(SELECT_ESTUDIANTES, vec![]).await
    }

    async fn get_estudiante(&self, id: i64) -> StoreResult<Option<Estudiante>> {
        let sql = format!("{} WHERE id = $1", SELECT_ESTUDIANTES);
        self.one(&sql, vec![id.into()]).await
    }

    async fn insert_estudiante(&self, input: &EstudianteInput) -> StoreResult<()> {
        self.write(
            "INSERT INTO estudiantes (nombre, correo) VALUES ($1, $2)",
            vec![input.nombre.as_str().into(), input.correo.as_str().into()],
        )
        .await?;
        Ok(())
    }

    async fn update_estudiante(&self, id: i64, input: &EstudianteInput) -> StoreResult<u64> {
        self.write(
            "UPDATE estudiantes SET nombre = $1, correo = $2 WHERE id = $3",
            vec![input.nombre.as_str().into(), input.correo.as_str().into(), id.into()],
        )
        .await
    }

    async fn delete_estudiante(&self, id: i64) -> StoreResult<u64> {
        self.write("DELETE FROM estudiantes WHERE id = $1", vec![id.into()]).await
    }

    async fn list_cursos(&self) -> StoreResult<Vec<Curso>> {
        self.all(SELECT_CURSOS, vec![]).await
    }

    async fn get_curso(&self, id: i64) -> StoreResult<Option<Curso>> {
        let sql = format!("{} WHERE id = $1", SELECT_CURSOS);
        self.one(&sql, vec![id.into()]).await
    }

    async fn insert_curso(&self, input: &CursoInput) -> StoreResult<()> {
        self.write(
            "INSERT INTO cursos (nombre, creditos) VALUES ($1, $2)",
            vec![input.nombre.as_str().into(), input.creditos.into()],
        )
        .await?;
        Ok(())
    }

    async fn update_curso(&self, id: i64, input: &CursoInput) -> StoreResult<u64> {
        self.write(
            "UPDATE cursos SET nombre = $1, creditos = $2 WHERE id = $3",
            vec![input.nombre.as_str().into(), input.creditos.into(), id.into()],
        )
        .await
    }

    async fn delete_curso(&self, id: i64) -> StoreResult<u64> {
        self.write("DELETE FROM cursos WHERE id = $1", vec![id.into()]).await
    }

    async fn list_inscripciones(&self) -> StoreResult<Vec<Inscripcion>> {
        self.all(SELECT_INSCRIPCIONES, vec![]).await
    }

    async fn get_inscripcion(&self, id: i64) -> StoreResult<Option<Inscripcion>> {
        let sql = format!("{} WHERE id = $1", SELECT_INSCRIPCIONES);
        self.one(&sql, vec![id.into()]).await
    }

    async fn enrollment_exists(&self, estudiante_id: i64, curso_id: i64) -> StoreResult<bool> {
        let found: Option<(i32,)> = self
            .one(
                "SELECT 1::int4 FROM inscripciones WHERE estudiante_id = $1 AND curso_id = $2 LIMIT 1",
                vec![estudiante_id.into(), curso_id.into()],
            )
            .await?;
        Ok(found.is_some())
    }

    async fn insert_inscripcion(&self, input: &InscripcionInput) -> StoreResult<()> {
        self.write(
            "INSERT INTO inscripciones (estudiante_id, curso_id, fecha_inscripcion) VALUES ($1, $2, $3)",
            vec![
                input.estudiante_id.into(),
                input.curso_id.into(),
                input.fecha_inscripcion.into(),
            ],
        )
        .await?;
        Ok(())
    }

    async fn update_inscripcion(&self, id: i64, input: &InscripcionInput) -> StoreResult<u64> {
        self.write(
            "UPDATE inscripciones SET estudiante_id = $1, curso_id = $2, fecha_inscripcion = $3 WHERE id = $4",
            vec![
                input.estudiante_id.into(),
                input.curso_id.into(),
                input.fecha_inscripcion.into(),
                id.into(),
            ],
        )
        .await
    }

    async fn delete_inscripcion(&self, id: i64) -> StoreResult<u64> {
        self.write("DELETE FROM inscripciones WHERE id = $1", vec![id.into()]).await
    }

    async fn list_inscripcion_detalles(&self) -> StoreResult<Vec<InscripcionDetalle>> {
        self.all(SELECT_DETALLES, vec![]).await
    }
}
