//! # Error Types
//!
//! Domain-specific error types for poke-core.
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (the offending item name)
//! 3. Errors are enum variants, never String

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These represent domain rule violations. The service layer translates them
/// into protocol responses for the offending client.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The item name does not match any catalog entry.
    #[error("item type '{0}' does not exist")]
    UnknownItemType(String),
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::UnknownItemType("masterball".to_string());
        assert_eq!(err.to_string(), "item type 'masterball' does not exist");
    }
}
