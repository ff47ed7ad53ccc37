//! Utilidades de validación
//!
//! Funciones custom que los derives de `validator` no cubren.

use validator::ValidationError;

/// Validar que un string no esté vacío (espacios solos no cuentan).
/// Los derives de longitud aceptan "   "; los nombres no.
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_blank");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_not_blank() {
        assert!(validate_not_blank("Garcia").is_ok());
        assert!(validate_not_blank("").is_err());
        assert!(validate_not_blank("   ").is_err());
    }
}
