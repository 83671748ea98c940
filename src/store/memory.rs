//! In-memory store for tests and running without a database.

use super::{Store, StoreResult};
use crate::error::StoreError;
use crate::models::{
    Curso, CursoInput, Estudiante, EstudianteInput, Inscripcion, InscripcionDetalle, InscripcionInput,
};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::RwLock;

/// Rows per table in insertion order, plus the next id for each.
#[derive(Default)]
struct Tables {
    estudiantes: Vec<Estudiante>,
    cursos: Vec<Curso>,
    inscripciones: Vec<Inscripcion>,
    next_estudiante: i64,
    next_curso: i64,
    next_inscripcion: i64,
}

fn next_id(counter: &mut i64) -> i64 {
    *counter += 1;
    *counter
}

#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
    calls: AtomicUsize,
    failing: AtomicBool,
    unique_enrollments: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject duplicate (estudiante_id, curso_id) pairs the way a unique index would.
    pub fn with_unique_enrollments(mut self) -> Self {
        self.unique_enrollments = true;
        self
    }

    /// Make every subsequent call fail with `StoreError::Unavailable`.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Number of store calls made so far, including failed ones.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn enter(&self) -> StoreResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("memory store set to fail".into()));
        }
        Ok(())
    }

    fn read(&self) -> StoreResult<std::sync::RwLockReadGuard<'_, Tables>> {
        self.tables
            .read()
            .map_err(|_| StoreError::Unavailable("memory store lock poisoned".into()))
    }

    fn write(&self) -> StoreResult<std::sync::RwLockWriteGuard<'_, Tables>> {
        self.tables
            .write()
            .map_err(|_| StoreError::Unavailable("memory store lock poisoned".into()))
    }

    fn check_unique(&self, t: &Tables, input: &InscripcionInput, skip_id: Option<i64>) -> StoreResult<()> {
        if !self.unique_enrollments {
            return Ok(());
        }
        let clash = t.inscripciones.iter().any(|i| {
            Some(i.id) != skip_id && i.estudiante_id == input.estudiante_id && i.curso_id == input.curso_id
        });
        if clash {
            return Err(StoreError::UniqueViolation(format!(
                "duplicate enrollment ({}, {})",
                input.estudiante_id, input.curso_id
            )));
        }
        Ok(())
    }
}

/// Replace the row with matching id; returns rows affected.
fn replace_where<T>(rows: &mut [T], id: i64, id_of: impl Fn(&T) -> i64, new_row: T) -> u64 {
    match rows.iter_mut().find(|r| id_of(r) == id) {
        Some(slot) => {
            *slot = new_row;
            1
        }
        None => 0,
    }
}

fn remove_where<T>(rows: &mut Vec<T>, id: i64, id_of: impl Fn(&T) -> i64) -> u64 {
    let before = rows.len();
    rows.retain(|r| id_of(r) != id);
    (before - rows.len()) as u64
}

#[async_trait]
impl Store for MemoryStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn ping(&self) -> StoreResult<()> {
        self.enter()
    }

    async fn list_estudiantes(&self) -> StoreResult<Vec<Estudiante>> {
        self.enter()?;
        Ok(self.read()?.estudiantes.clone())
    }

    async fn get_estudiante(&self, id: i64) -> StoreResult<Option<Estudiante>> {
        self.enter()?;
        Ok(self.read()?.estudiantes.iter().find(|e| e.id == id).cloned())
    }

    async fn insert_estudiante(&self, input: &EstudianteInput) -> StoreResult<()> {
        self.enter()?;
        let mut t = self.write()?;
        let id = next_id(&mut t.next_estudiante);
        t.estudiantes.push(Estudiante {
            id,
            nombre: input.nombre.clone(),
            correo: input.correo.clone(),
        });
        Ok(())
    }

    async fn update_estudiante(&self, id: i64, input: &EstudianteInput) -> StoreResult<u64> {
        self.enter()?;
        let row = Estudiante {
            id,
            nombre: input.nombre.clone(),
            correo: input.correo.clone(),
        };
        Ok(replace_where(&mut self.write()?.estudiantes, id, |e| e.id, row))
    }

    async fn delete_estudiante(&self, id: i64) -> StoreResult<u64> {
        self.enter()?;
        Ok(remove_where(&mut self.write()?.estudiantes, id, |e| e.id))
    }

    async fn list_cursos(&self) -> StoreResult<Vec<Curso>> {
        self.enter()?;
        Ok(self.read()?.cursos.clone())
    }

    async fn get_curso(&self, id: i64) -> StoreResult<Option<Curso>> {
        self.enter()?;
        Ok(self.read()?.cursos.iter().find(|c| c.id == id).cloned())
    }

    async fn insert_curso(&self, input: &CursoInput) -> StoreResult<()> {
        self.enter()?;
        let mut t = self.write()?;
        let id = next_id(&mut t.next_curso);
        t.cursos.push(Curso {
            id,
            nombre: input.nombre.clone(),
            creditos: input.creditos,
        });
        Ok(())
    }

    async fn update_curso(&self, id: i64, input: &CursoInput) -> StoreResult<u64> {
        self.enter()?;
        let row = Curso {
            id,
            nombre: input.nombre.clone(),
            creditos: input.creditos,
        };
        Ok(replace_where(&mut self.write()?.cursos, id, |c| c.id, row))
    }

    async fn delete_curso(&self, id: i64) -> StoreResult<u64> {
        self.enter()?;
        Ok(remove_where(&mut self.write()?.cursos, id, |c| c.id))
    }

    async fn list_inscripciones(&self) -> StoreResult<Vec<Inscripcion>> {
        self.enter()?;
        Ok(self.read()?.inscripciones.clone())
    }

    async fn get_inscripcion(&self, id: i64) -> StoreResult<Option<Inscripcion>> {
        self.enter()?;
        Ok(self.read()?.inscripciones.iter().find(|i| i.id == id).cloned())
    }

    async fn enrollment_exists(&self, estudiante_id: i64, curso_id: i64) -> StoreResult<bool> {
        self.enter()?;
        Ok(self
            .read()?
            .inscripciones
            .iter()
            .any(|i| i.estudiante_id == estudiante_id && i.curso_id == curso_id))
    }

    async fn insert_inscripcion(&self, input: &InscripcionInput) -> StoreResult<()> {
        self.enter()?;
        let mut t = self.write()?;
        self.check_unique(&t, input, None)?;
        let id = next_id(&mut t.next_inscripcion);
        t.inscripciones.push(Inscripcion {
            id,
            estudiante_id: input.estudiante_id,
            curso_id: input.curso_id,
            fecha_inscripcion: input.fecha_inscripcion,
        });
        Ok(())
    }

    async fn update_inscripcion(&self, id: i64, input: &InscripcionInput) -> StoreResult<u64> {
        self.enter()?;
        let mut t = self.write()?;
        if !t.inscripciones.iter().any(|i| i.id == id) {
            return Ok(0);
        }
        self.check_unique(&t, input, Some(id))?;
        let row = Inscripcion {
            id,
            estudiante_id: input.estudiante_id,
            curso_id: input.curso_id,
            fecha_inscripcion: input.fecha_inscripcion,
        };
        Ok(replace_where(&mut t.inscripciones, id, |i| i.id, row))
    }

    async fn delete_inscripcion(&self, id: i64) -> StoreResult<u64> {
        self.enter()?;
        Ok(remove_where(&mut self.write()?.inscripciones, id, |i| i.id))
    }

    async fn list_inscripcion_detalles(&self) -> StoreResult<Vec<InscripcionDetalle>> {
        self.enter()?;
        let t = self.read()?;
        // inner join: rows whose student or course is gone drop out
        let mut rows: Vec<InscripcionDetalle> = t
            .inscripciones
            .iter()
            .filter_map(|i| {
                let estudiante = t.estudiantes.iter().find(|e| e.id == i.estudiante_id)?;
                let curso = t.cursos.iter().find(|c| c.id == i.curso_id)?;
                Some(InscripcionDetalle {
                    inscripcion_id: i.id,
                    estudiante: estudiante.nombre.clone(),
                    curso: curso.nombre.clone(),
                    creditos: curso.creditos,
                    fecha_inscripcion: i.fecha_inscripcion,
                })
            })
            .collect();
        rows.sort_by(|a, b| b.fecha_inscripcion.cmp(&a.fecha_inscripcion));
        Ok(rows)
    }
}
