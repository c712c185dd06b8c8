//! Authentication gate consumed by the frame operations.
//!
//! The core performs no credential logic of its own; it only asks a gate
//! whether the current user is logged in before exposing the collection.

use crate::error::CoreError;

/// Anything that can answer "is somebody logged in?".
pub trait AuthGate {
    fn is_authenticated(&self) -> bool;
}

/// Fail with [`CoreError::Unauthorized`] unless `gate` reports a login.
pub fn require_authenticated<G: AuthGate + ?Sized>(gate: &G) -> Result<(), CoreError> {
    if gate.is_authenticated() {
        Ok(())
    } else {
        Err(CoreError::Unauthorized(
            "log in before working with the storyboard".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    struct FixedGate(bool);

    impl AuthGate for FixedGate {
        fn is_authenticated(&self) -> bool {
            self.0
        }
    }

    #[test]
    fn logged_in_gate_passes() {
        assert!(require_authenticated(&FixedGate(true)).is_ok());
    }

    #[test]
    fn logged_out_gate_is_unauthorized() {
        assert_matches!(
            require_authenticated(&FixedGate(false)),
            Err(CoreError::Unauthorized(_))
        );
    }

    #[test]
    fn works_through_trait_objects() {
        let gate: Box<dyn AuthGate> = Box::new(FixedGate(true));
        assert!(require_authenticated(gate.as_ref()).is_ok());
    }
}
