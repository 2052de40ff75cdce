//! Property-based tests for escaping and term groups.
