//! Configuration management for the N-Queens search

pub mod settings;

pub use settings::{
    BoardConfig, BoardModel, CliOverrides, OutputConfig, OutputFormat, SearchConfig, Settings,
    Strategy,
};
