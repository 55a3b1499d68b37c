// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Error types for scene analysis

use thiserror::Error;

/// Result alias for analysis operations
pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Errors raised while analyzing a scene
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    /// Index buffer length is not a multiple of 3
    #[error("submesh {submesh}: index buffer length {len} is not a multiple of 3")]
    IndexCountNotMultipleOfThree { submesh: usize, len: usize },

    /// Un-indexed vertex buffer cannot be read as a triangle list
    #[error("submesh {submesh}: triangle soup length {len} is not a multiple of 3")]
    SoupCountNotMultipleOfThree { submesh: usize, len: usize },

    /// Index references a vertex past the end of the vertex buffer
    #[error("submesh {submesh}: index {index} out of range for {vertex_count} vertices")]
    IndexOutOfRange {
        submesh: usize,
        index: u32,
        vertex_count: usize,
    },

    /// Scene exceeds the configured triangle ceiling
    #[error("scene has {triangles} triangles, limit is {limit}")]
    TooLarge { triangles: usize, limit: usize },
}

impl AnalysisError {
    /// Whether this error describes a malformed submesh buffer
    pub fn is_structural(&self) -> bool {
        !matches!(self, Self::TooLarge { .. })
    }

    /// Submesh the error refers to, if any
    pub fn submesh(&self) -> Option<usize> {
        match self {
            Self::IndexCountNotMultipleOfThree { submesh, .. }
            | Self::SoupCountNotMultipleOfThree { submesh, .. }
            | Self::IndexOutOfRange { submesh, .. } => Some(*submesh),
            Self::TooLarge { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AnalysisError::IndexCountNotMultipleOfThree { submesh: 2, len: 7 };
        let message = err.to_string();
        assert!(message.contains("submesh 2"));
        assert!(message.contains('7'));

        let err = AnalysisError::TooLarge {
            triangles: 10,
            limit: 5,
        };
        assert!(err.to_string().contains("limit is 5"));
    }

    #[test]
    fn test_structural_classification() {
        let err = AnalysisError::IndexOutOfRange {
            submesh: 0,
            index: 9,
            vertex_count: 3,
        };
        assert!(err.is_structural());
        assert_eq!(err.submesh(), Some(0));

        let err = AnalysisError::TooLarge {
            triangles: 1,
            limit: 0,
        };
        assert!(!err.is_structural());
        assert_eq!(err.submesh(), None);
    }
}
