//! Maps `Box<dyn Error>` from the `StepSource` boundary to typed `PedoError`.
//!
//! The trait in `pedo_traits` uses `Box<dyn Error + Send + Sync>` so sources
//! outside this crate can plug in; this module converts those errors back.

use crate::error::PedoError;

/// Map a trait-boundary error to a typed `PedoError`.
///
/// Downcasts to `PedoError` first, then falls back to the error's message.
pub fn map_source_error(e: &(dyn std::error::Error + 'static)) -> PedoError {
    if let Some(pe) = e.downcast_ref::<PedoError>() {
        return pe.clone();
    }
    PedoError::Source(e.to_string())
}

#[inline]
pub(crate) fn map_source_error_dyn(e: &(dyn std::error::Error + Send + Sync + 'static)) -> PedoError {
    map_source_error(e)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_errors_survive_the_boundary() {
        let boxed: Box<dyn std::error::Error + Send + Sync> =
            Box::new(PedoError::InvalidReading(f64::NAN));
        assert!(matches!(
            map_source_error_dyn(&*boxed),
            PedoError::InvalidReading(v) if v.is_nan()
        ));
    }

    #[test]
    fn foreign_errors_become_source_errors() {
        let boxed: Box<dyn std::error::Error + Send + Sync> = "sensor unplugged".into();
        assert_eq!(
            map_source_error_dyn(&*boxed),
            PedoError::Source("sensor unplugged".to_string())
        );
    }
}
