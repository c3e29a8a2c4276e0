use thiserror::Error;

// ============================================================================
// Main Error Enum
// ============================================================================

/// Error enum shared by the launchpad crates
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LaunchpadError {
    // ========================================================================
    // Math Errors
    // ========================================================================

    /// Arithmetic overflow occurred
    #[error("Math overflow in '{operation}' with values: {values:?}")]
    MathOverflow { operation: String, values: Vec<String> },

    /// Arithmetic underflow occurred
    #[error("Math underflow in '{operation}' with values: {values:?}")]
    MathUnderflow { operation: String, values: Vec<String> },

    /// Division by zero
    #[error("Division by zero in context: {context}")]
    DivisionByZero { context: String },

    // ========================================================================
    // Validation Errors
    // ========================================================================

    /// Amount string could not be parsed
    #[error("Invalid amount '{input}': {reason}")]
    InvalidAmount { input: String, reason: String },

    /// Invalid parameter
    #[error("Invalid parameter '{parameter}': got '{value}', expected '{expected}'")]
    InvalidParameter { parameter: String, value: String, expected: String },

    // ========================================================================
    // Network and Contract Errors
    // ========================================================================

    /// JSON-RPC error returned by the node
    #[error("RPC error (code {code:?}): {message}")]
    RpcError { message: String, code: Option<i64> },

    /// Call or transaction reverted on-chain
    #[error("Execution reverted: {reason}")]
    Reverted { reason: String },

    /// HTTP or connection failure before a JSON-RPC response was read
    #[error("Transport error: {0}")]
    Transport(String),

    /// Return data or log could not be decoded
    #[error("Failed to decode {context}: {reason}")]
    Decode { context: String, reason: String },

    // ========================================================================
    // Configuration Errors
    // ========================================================================

    /// Invalid configuration
    #[error("Invalid configuration for '{component}': {reason}")]
    InvalidConfiguration { component: String, reason: String },

    // ========================================================================
    // General Errors
    // ========================================================================

    /// Generic error with optional context
    #[error("Error: {message}")]
    Generic { message: String, context: Option<String> },
}

impl LaunchpadError {
    /// Create a math overflow error with context
    pub fn math_overflow(operation: &str, values: &[&str]) -> Self {
        Self::MathOverflow {
            operation: operation.to_string(),
            values: values.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Create a math underflow error with context
    pub fn math_underflow(operation: &str, values: &[&str]) -> Self {
        Self::MathUnderflow {
            operation: operation.to_string(),
            values: values.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Create an invalid amount error
    pub fn invalid_amount(input: &str, reason: &str) -> Self {
        Self::InvalidAmount {
            input: input.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Create an invalid parameter error
    pub fn invalid_parameter(parameter: &str, value: &str, expected: &str) -> Self {
        Self::InvalidParameter {
            parameter: parameter.to_string(),
            value: value.to_string(),
            expected: expected.to_string(),
        }
    }

    /// Create an RPC error
    pub fn rpc_error(message: &str, code: Option<i64>) -> Self {
        Self::RpcError {
            message: message.to_string(),
            code,
        }
    }

    /// Create a revert error
    pub fn reverted(reason: &str) -> Self {
        Self::Reverted {
            reason: reason.to_string(),
        }
    }

    /// Create a decode error
    pub fn decode_error(context: &str, reason: &str) -> Self {
        Self::Decode {
            context: context.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Create an invalid configuration error
    pub fn invalid_configuration(component: &str, reason: &str) -> Self {
        Self::InvalidConfiguration {
            component: component.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Create a generic error
    pub fn generic(message: &str) -> Self {
        Self::Generic {
            message: message.to_string(),
            context: None,
        }
    }

    /// Create a generic error with context
    pub fn generic_with_context(message: &str, context: &str) -> Self {
        Self::Generic {
            message: message.to_string(),
            context: Some(context.to_string()),
        }
    }

    /// True when the node reported an on-chain revert rather than a transport problem
    pub fn is_revert(&self) -> bool {
        matches!(self, Self::Reverted { .. })
    }
}

/// Result type alias using the shared error type
pub type LaunchpadResult<T> = std::result::Result<T, LaunchpadError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = LaunchpadError::invalid_parameter("symbol", "", "non-empty string");
        assert_eq!(
            err.to_string(),
            "Invalid parameter 'symbol': got '', expected 'non-empty string'"
        );

        let err = LaunchpadError::rpc_error("header not found", Some(-32000));
        assert_eq!(err.to_string(), "RPC error (code Some(-32000)): header not found");
    }

    #[test]
    fn test_revert_classification() {
        assert!(LaunchpadError::reverted("Token graduated").is_revert());
        assert!(!LaunchpadError::Transport("connection refused".into()).is_revert());
    }
}
