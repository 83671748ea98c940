//! Per-resource field lists and the messages returned to API clients.

use crate::error::{AppError, StoreError};

pub struct Resource {
    /// Fields that must be present and truthy on create and update.
    pub required: &'static [&'static str],
    pub label: &'static str,
    pub missing_fields: &'static str,
    pub not_found: &'static str,
    pub created: &'static str,
    pub updated: &'static str,
    /// Past participle agreeing with the label ("eliminado" / "eliminada").
    pub deleted_word: &'static str,
    pub list_failed: &'static str,
    pub read_failed: &'static str,
    pub create_failed: &'static str,
    pub update_failed: &'static str,
    pub delete_failed: &'static str,
}

impl Resource {
    pub fn deleted(&self, id: i64) -> String {
        format!("{} con ID {} {}", self.label, id, self.deleted_word)
    }

    pub fn check_found(&self, rows_affected: u64) -> Result<(), AppError> {
        if rows_affected == 0 {
            Err(AppError::NotFound(self.not_found))
        } else {
            Ok(())
        }
    }
}

pub const ESTUDIANTES: Resource = Resource {
    required: &["nombre", "correo"],
    label: "Estudiante",
    missing_fields: "Nombre y correo son obligatorios",
    not_found: "Estudiante no encontrado",
    created: "Estudiante creado correctamente",
    updated: "Estudiante actualizado correctamente",
    deleted_word: "eliminado",
    list_failed: "Error al consultar estudiantes",
    read_failed: "Error al consultar estudiante",
    create_failed: "Error al crear estudiante",
    update_failed: "Error al actualizar estudiante",
    delete_failed: "Error al eliminar estudiante",
};

pub const CURSOS: Resource = Resource {
    required: &["nombre", "creditos"],
    label: "Curso",
    missing_fields: "Nombre y créditos son obligatorios",
    not_found: "Curso no encontrado",
    created: "Curso registrado correctamente",
    updated: "Curso actualizado correctamente",
    deleted_word: "eliminado",
    list_failed: "Error al consultar cursos",
    read_failed: "Error al consultar curso",
    create_failed: "Error al registrar curso",
    update_failed: "Error al actualizar curso",
    delete_failed: "Error al eliminar curso",
};

pub const INSCRIPCIONES: Resource = Resource {
    required: &["estudiante_id", "curso_id", "fecha_inscripcion"],
    label: "Inscripción",
    missing_fields: "Todos los campos son obligatorios",
    not_found: "Inscripción no encontrada",
    created: "Inscripción creada correctamente",
    updated: "Inscripción actualizada correctamente",
    deleted_word: "eliminada",
    list_failed: "Error al consultar inscripciones",
    read_failed: "Error al consultar inscripción",
    create_failed: "Error al crear inscripción",
    update_failed: "Error al actualizar inscripción",
    delete_failed: "Error al eliminar inscripción",
};

pub const DETALLES_FAILED: &str = "Error al obtener detalles de inscripciones";

/// Writes to inscripciones: a unique-index violation is the same client error as the pre-check.
pub fn enrollment_write_error(message: &'static str) -> impl FnOnce(StoreError) -> AppError {
    move |err| match err {
        StoreError::UniqueViolation(_) => AppError::DuplicateEnrollment,
        other => AppError::Storage { message, source: other },
    }
}
