//! Tests for the account lifecycle service
