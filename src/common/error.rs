// Fault types for the validation layer
//
// Invalid input is never an error value: it is reported through
// `ValidationResult`. Only timeouts and faulted external checks cross the
// public boundary as `Err`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationFault {
    #[error("Validation timeout")]
    Timeout,
    #[error("validation check failed: {0}")]
    Check(#[from] anyhow::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_message_is_stable() {
        assert_eq!(ValidationFault::Timeout.to_string(), "Validation timeout");
    }

    #[test]
    fn check_fault_keeps_cause() {
        let fault = ValidationFault::from(anyhow::anyhow!("registry lookup refused"));
        assert!(fault.to_string().contains("registry lookup refused"));
    }
}
