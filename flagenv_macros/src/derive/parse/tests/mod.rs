//! Unit tests for derive attribute parsing.

mod type_utils;
