// Copyright 2026 the candela authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Error types for the rendering pipeline.
//!
//! Steady-state per-light failures (degenerate caster bounds, declined
//! shadow matrices) are never errors; they are encoded as data (empty
//! cascade slots, zeroed shadow strength) per the pipeline's design. These
//! types cover the genuinely exceptional paths: GPU resource allocation and
//! host-device failures.

use std::fmt;

/// An error while creating, writing, or destroying a GPU resource.
#[derive(Debug)]
pub enum ResourceError {
    /// The handle or ID used to reference a resource is invalid.
    InvalidHandle,
    /// The device could not allocate the requested resource.
    AllocationFailed(String),
    /// An error originating from the host's graphics backend.
    BackendError(String),
}

impl fmt::Display for ResourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceError::InvalidHandle => write!(f, "Invalid resource handle or ID."),
            ResourceError::AllocationFailed(msg) => {
                write!(f, "GPU resource allocation failed: {msg}")
            }
            ResourceError::BackendError(msg) => {
                write!(f, "Backend-specific resource error: {msg}")
            }
        }
    }
}

impl std::error::Error for ResourceError {}

/// A high-level error from rendering one camera's frame.
#[derive(Debug)]
pub enum RenderError {
    /// An error occurred while managing a per-frame GPU resource.
    ResourceError(ResourceError),
    /// An unexpected or internal error occurred.
    Internal(String),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::ResourceError(err) => write!(f, "Render resource error: {err}"),
            RenderError::Internal(msg) => write!(f, "Internal render error: {msg}"),
        }
    }
}

impl std::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RenderError::ResourceError(err) => Some(err),
            RenderError::Internal(_) => None,
        }
    }
}

impl From<ResourceError> for RenderError {
    fn from(err: ResourceError) -> Self {
        RenderError::ResourceError(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_formats() {
        let err = RenderError::from(ResourceError::AllocationFailed("out of memory".into()));
        let msg = err.to_string();
        assert!(msg.contains("out of memory"));
    }

    #[test]
    fn test_source_chain() {
        use std::error::Error;
        let err = RenderError::from(ResourceError::InvalidHandle);
        assert!(err.source().is_some());
    }
}
