// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Call pipeline
//!
//! ```text
//! call text → parse_call → catalog lookup → bind → CallReport
//! ```
//!
//! Without a catalog the pipeline stops after parsing. Any error aborts the
//! whole run; nothing partially bound is reported.

use serde::Serialize;
use sproc_call_binder::{BindingError, BindingResult, BoundValue, bind};
use sproc_call_catalog::{CatalogError, ParameterCatalog};
use sproc_call_ir::{ParameterDirection, ParseResult, SlotKind};
use sproc_call_parser::{ParseError, parse_call};
use std::collections::BTreeMap;
use std::fmt;
use tracing::{debug, info, instrument};

use crate::config::OutputFormat;

/// Errors from any stage of the pipeline
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("Binding failed for {procedure}: {source}")]
    Binding {
        procedure: String,
        #[source]
        source: BindingError,
    },

    #[error("Failed to serialize report: {0}")]
    Serialization(String),
}

impl PipelineError {
    /// Render the error for a terminal, highlighting the offending token
    /// of a parse error inside `call_text`
    pub fn render(&self, call_text: &str) -> String {
        match self {
            PipelineError::Parse(err) => err.render(call_text),
            other => other.to_string(),
        }
    }
}

/// One slot and the declared parameter it feeds
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoundParameter {
    pub slot_index: usize,
    pub kind: SlotKind,
    pub parameter: String,
    pub direction: ParameterDirection,
    pub value: BoundValue,
    pub is_output: bool,
}

/// Owned summary of a [`BindingResult`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BindingReport {
    pub parameters: Vec<BoundParameter>,
    /// Caller variable → declared parameter name
    pub variables: BTreeMap<String, String>,
    pub return_parameter: Option<String>,
}

impl From<&BindingResult<'_>> for BindingReport {
    fn from(binding: &BindingResult<'_>) -> Self {
        let parameters = binding
            .slot_bindings
            .iter()
            .map(|b| BoundParameter {
                slot_index: b.slot_index,
                kind: b.kind,
                parameter: b.parameter.name.clone(),
                direction: b.parameter.direction,
                value: b.value.clone(),
                is_output: b.is_output,
            })
            .collect();

        let variables = binding
            .variable_parameters
            .iter()
            .map(|(variable, param)| (variable.clone(), param.name.clone()))
            .collect();

        Self {
            parameters,
            variables,
            return_parameter: binding.return_parameter.map(|p| p.name.clone()),
        }
    }
}

/// Everything the CLI reports about one call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CallReport {
    pub call: ParseResult,
    /// Present when a catalog was available
    pub binding: Option<BindingReport>,
}

impl CallReport {
    /// Render the report in the requested format
    pub fn render(&self, format: OutputFormat) -> Result<String, PipelineError> {
        match format {
            OutputFormat::Json => serde_json::to_string_pretty(self)
                .map_err(|e| PipelineError::Serialization(e.to_string())),
            OutputFormat::Yaml => {
                serde_yaml::to_string(self).map_err(|e| PipelineError::Serialization(e.to_string()))
            }
            OutputFormat::Text => Ok(self.to_string()),
        }
    }
}

impl fmt::Display for CallReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "procedure: {}", self.call.procedure_name)?;
        if let Some(variable) = &self.call.return_variable {
            writeln!(f, "return variable: {}", variable)?;
        }

        writeln!(f, "slots:")?;
        for (index, slot) in self.call.slots.iter().enumerate() {
            let output = if slot.is_output { " OUTPUT" } else { "" };
            match &slot.name {
                Some(name) => writeln!(f, "  [{}] @{} = {}{}", index, name, slot.raw_value, output)?,
                None => writeln!(f, "  [{}] {}{}", index, slot.raw_value, output)?,
            }
        }

        if let Some(binding) = &self.binding {
            writeln!(f, "binding:")?;
            for param in &binding.parameters {
                write!(f, "  [{}] {} ({}) <- ", param.slot_index, param.parameter, param.direction)?;
                match &param.value {
                    BoundValue::Literal(literal) => writeln!(f, "{}", literal)?,
                    BoundValue::Variable(variable) => writeln!(f, "{}", variable)?,
                }
            }
            for (variable, parameter) in &binding.variables {
                writeln!(f, "  {} <- {}", variable, parameter)?;
            }
        }
        Ok(())
    }
}

/// Parse a call and, when a catalog is given, bind it to the declared
/// parameters of its procedure
#[instrument(skip_all)]
pub async fn run(
    call_text: &str,
    catalog: Option<&dyn ParameterCatalog>,
) -> Result<CallReport, PipelineError> {
    let call = parse_call(call_text)?;

    let Some(catalog) = catalog else {
        debug!(procedure = %call.procedure_name, "No catalog configured, skipping bind");
        return Ok(CallReport { call, binding: None });
    };

    let declared = catalog.procedure_parameters(&call.procedure_name).await?;
    let binding = bind(&call, &declared).map_err(|source| PipelineError::Binding {
        procedure: call.procedure_name.clone(),
        source,
    })?;
    let report = BindingReport::from(&binding);

    info!(
        procedure = %call.procedure_name,
        parameters = report.parameters.len(),
        "Call bound"
    );

    Ok(CallReport {
        call,
        binding: Some(report),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use sproc_call_ir::{LiteralValue, ParameterSlot};

    fn sample_report() -> CallReport {
        CallReport {
            call: ParseResult::new("dbo.P")
                .with_return_variable("@rc")
                .with_slots(vec![
                    ParameterSlot::positional("1", false),
                    ParameterSlot::named("B", "@b", true),
                ]),
            binding: Some(BindingReport {
                parameters: vec![
                    BoundParameter {
                        slot_index: 0,
                        kind: SlotKind::Positional,
                        parameter: "@A".to_string(),
                        direction: ParameterDirection::Input,
                        value: BoundValue::Literal(LiteralValue::Integer(1)),
                        is_output: false,
                    },
                    BoundParameter {
                        slot_index: 1,
                        kind: SlotKind::Named,
                        parameter: "@B".to_string(),
                        direction: ParameterDirection::InputOutput,
                        value: BoundValue::Variable("@b".to_string()),
                        is_output: true,
                    },
                ],
                variables: BTreeMap::from([
                    ("@b".to_string(), "@B".to_string()),
                    ("@rc".to_string(), "@RETURN_VALUE".to_string()),
                ]),
                return_parameter: Some("@RETURN_VALUE".to_string()),
            }),
        }
    }

    #[test]
    fn test_render_text() {
        let text = sample_report().render(OutputFormat::Text).unwrap();
        assert_eq!(
            text,
            "procedure: dbo.P\n\
             return variable: @rc\n\
             slots:\n  [0] 1\n  [1] @B = @b OUTPUT\n\
             binding:\n  [0] @A (input) <- 1\n  [1] @B (input_output) <- @b\n\
             \x20 @b <- @B\n  @rc <- @RETURN_VALUE\n"
        );
    }

    #[test]
    fn test_display_without_binding() {
        let report = CallReport {
            call: ParseResult::new("dbo.Ping")
                .with_slots(vec![ParameterSlot::positional("'x'", false)]),
            binding: None,
        };
        assert_eq!(report.to_string(), "procedure: dbo.Ping\nslots:\n  [0] 'x'\n");
        assert_eq!(report.render(OutputFormat::Text).unwrap(), report.to_string());
    }

    #[test]
    fn test_render_json() {
        let json = sample_report().render(OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["call"]["procedure_name"], "dbo.P");
        assert_eq!(value["binding"]["parameters"][1]["direction"], "input_output");
        assert_eq!(value["binding"]["variables"]["@rc"], "@RETURN_VALUE");
    }

    #[test]
    fn test_render_yaml() {
        let yaml = sample_report().render(OutputFormat::Yaml).unwrap();
        assert!(yaml.contains("procedure_name: dbo.P"));
        assert!(yaml.contains("return_parameter:"));
        let value: serde_yaml::Value = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(value["binding"]["return_parameter"].as_str(), Some("@RETURN_VALUE"));
    }
}
