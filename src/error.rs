//! Error types for mesh volume extraction
//!
//! Only geometry input can fail. Estimation parameters never produce an error:
//! out-of-range values are clamped and non-finite values fall back to documented
//! defaults (see [`crate::params`]).
//!
//! # Error Codes
//!
//! Error codes follow the pattern: `E<category><number>`
//!
//! Categories:
//! - **E1xxx**: Mesh geometry errors
//!
//! ## Error Codes
//!
//! - `E1001`: Malformed vertex or index buffer
//! - `E1002`: Triangle index references a missing vertex
//! - `E1003`: Operation needs at least one triangle

use thiserror::Error;

/// Result type for mesh operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when extracting geometry from a mesh
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Vertex or index buffer has an invalid length
    ///
    /// **Error Code**: E1001
    ///
    /// **Common Causes**:
    /// - Position buffer length not a multiple of 3 (x, y, z per vertex)
    /// - Non-indexed mesh whose vertex count is not a multiple of 3
    /// - Index buffer length not a multiple of 3
    /// - NaN or infinite coordinates, or coordinates so large the volume overflows
    ///
    /// **Suggestions**:
    /// - Verify the loader decoded the whole file
    /// - Check that the mesh is a triangle list, not a strip or fan
    #[error("[E1001] Malformed mesh: {0}")]
    MalformedMesh(String),

    /// Index buffer references a vertex that does not exist
    ///
    /// **Error Code**: E1002
    #[error("[E1002] Index out of range: triangle {triangle} references vertex {index}, but the mesh has {vertex_count} vertices")]
    IndexOutOfRange {
        /// Triangle position in the index buffer
        triangle: usize,
        /// Offending vertex index
        index: usize,
        /// Number of vertices in the position buffer
        vertex_count: usize,
    },

    /// Operation requires at least one triangle
    ///
    /// **Error Code**: E1003
    ///
    /// Volume extraction never returns this; an empty mesh has volume 0.
    #[error("[E1003] Empty mesh: {0}")]
    EmptyMesh(String),
}

impl Error {
    /// Create a MalformedMesh error describing a buffer whose length is not a multiple of 3
    ///
    /// # Arguments
    /// * `buffer` - Which buffer is malformed (e.g., "position buffer")
    /// * `len` - The offending length
    ///
    /// # Example
    /// ```
    /// use printquote::Error;
    ///
    /// let err = Error::not_multiple_of_three("index buffer", 7);
    /// assert!(err.to_string().contains("[E1001]"));
    /// ```
    pub fn not_multiple_of_three(buffer: &str, len: usize) -> Self {
        Error::MalformedMesh(format!(
            "{} length {} is not a multiple of 3",
            buffer, len
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_in_messages() {
        let malformed = Error::MalformedMesh("test".to_string());
        assert!(malformed.to_string().contains("[E1001]"));

        let out_of_range = Error::IndexOutOfRange {
            triangle: 0,
            index: 9,
            vertex_count: 3,
        };
        assert!(out_of_range.to_string().contains("[E1002]"));

        let empty = Error::EmptyMesh("no triangles".to_string());
        assert!(empty.to_string().contains("[E1003]"));
    }

    #[test]
    fn test_not_multiple_of_three_helper() {
        let err = Error::not_multiple_of_three("position buffer", 10);
        assert!(err.to_string().contains("position buffer"));
        assert!(err.to_string().contains("length 10"));
        assert!(err.to_string().contains("not a multiple of 3"));
    }

    #[test]
    fn test_index_out_of_range_message() {
        let err = Error::IndexOutOfRange {
            triangle: 4,
            index: 12,
            vertex_count: 8,
        };
        let message = err.to_string();
        assert!(message.contains("triangle 4"));
        assert!(message.contains("vertex 12"));
        assert!(message.contains("8 vertices"));
    }
}
