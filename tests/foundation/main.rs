//! Integration tests for Layer 0: Foundation
//!
//! Tests for core types: Error, NodeId, and the persistent Row and Grid.

mod ids;
