//! Integration tests for swapi-loader

mod pipeline_tests;
