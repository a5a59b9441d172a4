//! Integration tests for the tree table pipeline, parameter store, and CLI

mod cli_commands;
mod navigation_history;
mod pipeline_scenarios;
mod properties;
mod support;
