// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Stored-Procedure Call - CLI
//!
//! Library half of the `sproc-call` binary: configuration and the
//! parse → lookup → bind pipeline that produces a printable [`CallReport`].

pub mod config;
pub mod pipeline;

pub use config::{CliConfig, ConfigError, DEFAULT_LOG_FILTER, OutputFormat};
pub use pipeline::{BindingReport, BoundParameter, CallReport, PipelineError, run};
