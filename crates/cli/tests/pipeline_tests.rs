// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Integration tests for the CLI pipeline

use sproc_call_binder::{BindingError, BoundValue};
use sproc_call_catalog::{CatalogError, ParameterCatalog, StaticCatalog};
use sproc_call_cli::{OutputFormat, PipelineError, run};
use sproc_call_ir::LiteralValue;
use sproc_call_test_utils::{Fixtures, MockCatalogBuilder};
use std::io::Write;

#[tokio::test]
async fn test_parse_only_without_catalog() {
    let report = run(Fixtures::get_user_call(), None).await.unwrap();
    assert_eq!(report.call.procedure_name, "dbo.GetUser");
    assert_eq!(report.call.return_variable.as_deref(), Some("@ret"));
    assert_eq!(report.call.slots.len(), 2);
    assert!(report.binding.is_none());
}

#[tokio::test]
async fn test_bind_with_mock_catalog() {
    let catalog = MockCatalogBuilder::new().with_standard_procedures().build();
    let report = run(Fixtures::transfer_call(), Some(&catalog)).await.unwrap();
    assert_eq!(catalog.lookups(), 1);

    let binding = report.binding.unwrap();
    let names: Vec<&str> = binding
        .parameters
        .iter()
        .map(|p| p.parameter.as_str())
        .collect();
    assert_eq!(names, vec!["@From", "@To", "@Amount", "@Memo", "@Receipt"]);
    assert_eq!(
        binding.parameters[0].value,
        BoundValue::Literal(LiteralValue::Integer(1))
    );
    assert_eq!(binding.variables["@receipt"], "@Receipt");
    assert_eq!(binding.return_parameter.as_deref(), Some("@RETURN_VALUE"));
}

#[tokio::test]
async fn test_unknown_procedure() {
    let catalog = MockCatalogBuilder::new().build();
    let err = run("EXEC dbo.Missing 1", Some(&catalog)).await.unwrap_err();
    assert!(matches!(
        err,
        PipelineError::Catalog(CatalogError::ProcedureNotFound(_))
    ));
}

#[tokio::test]
async fn test_binding_error_names_procedure() {
    let catalog = MockCatalogBuilder::new().with_standard_procedures().build();
    let err = run("EXEC dbo.TwoInputs 1, 2, 3", Some(&catalog))
        .await
        .unwrap_err();
    match &err {
        PipelineError::Binding { procedure, source } => {
            assert_eq!(procedure, "dbo.TwoInputs");
            assert!(matches!(
                source,
                BindingError::InsufficientPositionalParameters { slot_index: 2, .. }
            ));
        }
        other => panic!("Expected binding error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_parse_error_renders_highlight() {
    let call = "EXEC dbo.TwoInputs 5OUTPUT";
    let err = run(call, None).await.unwrap_err();
    assert!(matches!(err, PipelineError::Parse(_)));

    let rendered = err.render(call);
    assert!(rendered.ends_with("EXEC dbo.TwoInputs »5OUTPUT«"));
}

#[tokio::test]
async fn test_static_catalog_file_end_to_end() {
    let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    write!(
        file,
        "procedures:\n  dbo.GetUser:\n    - {{ name: \"@RETURN_VALUE\", direction: return_value }}\n    - {{ name: \"@Id\", position: 1 }}\n    - {{ name: \"@Name\", position: 2, direction: input_output }}\n"
    )
    .unwrap();

    let catalog = StaticCatalog::from_file(file.path()).unwrap();
    let catalog: &dyn ParameterCatalog = &catalog;
    let report = run(Fixtures::get_user_call(), Some(catalog)).await.unwrap();

    let json = report.render(OutputFormat::Json).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["binding"]["parameters"][0]["parameter"], "@Id");
    assert_eq!(
        value["binding"]["parameters"][1]["value"]["Literal"]["String"],
        "Bob"
    );
    assert_eq!(value["binding"]["variables"]["@ret"], "@RETURN_VALUE");

    let text = report.render(OutputFormat::Text).unwrap();
    assert!(text.contains("[1] @Name (input_output) <- 'Bob'"));
}
