//! Schema builder tests

use data_modelling_codefirst::engine::{EngineError, MappingEngine};
use data_modelling_codefirst::export::{DocumentFormat, ExportResult};
use data_modelling_codefirst::models::{
    AuxiliaryObject, Member, ModelType, Primitive, Property, TypeCatalog, TypeRef,
};
use data_modelling_codefirst::{
    Access, BuildError, BuildRequest, BuilderConfig, ComponentRules, InMemoryEngine,
    MatchEntities, SchemaBuilder,
};
use std::sync::{Arc, Mutex};

fn order_catalog() -> TypeCatalog {
    TypeCatalog::new()
        .with_type(
            ModelType::new("Order")
                .with_member(Member::primitive("Id", Primitive::Int))
                .with_member(Member::primitive("Version", Primitive::Int))
                .with_member(Member::new("ShippingAddress", TypeRef::model("Address")).embedded()),
        )
        .with_type(
            ModelType::new("Address")
                .with_member(Member::primitive("Street", Primitive::String))
                .with_member(Member::primitive("City", Primitive::String)),
        )
}

fn builder() -> SchemaBuilder {
    SchemaBuilder::new(order_catalog()).with_component_rules(ComponentRules::defaults())
}

/// Engine that logs every call into a shared list
struct RecordingEngine {
    calls: Arc<Mutex<Vec<String>>>,
}

impl MappingEngine for RecordingEngine {
    type Handle = usize;

    fn add_mapping(&mut self, mapping: &ExportResult) -> Result<(), EngineError> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("mapping:{}", mapping.format));
        Ok(())
    }

    fn add_auxiliary_object(&mut self, object: &AuxiliaryObject) -> Result<(), EngineError> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("aux:{}", object.name));
        Ok(())
    }

    fn finish(self) -> Result<usize, EngineError> {
        let mut calls = self.calls.lock().unwrap();
        calls.push("finish".to_string());
        Ok(calls.len())
    }
}

mod end_to_end_tests {
    use super::*;

    #[test]
    fn test_order_with_embedded_address() {
        let document = builder()
            .build_document(BuildRequest::new(["Order"]))
            .unwrap();

        assert_eq!(document.classes.len(), 1);
        let order = &document.classes[0];
        assert_eq!(order.name.as_str(), "Order");
        assert_eq!(order.table, "Orders");

        let version = order.version.as_ref().unwrap();
        assert_eq!(version.name, "Version");
        assert_eq!(version.column, "Version");

        assert_eq!(order.components.len(), 1);
        let shipping = &order.components[0];
        assert_eq!(shipping.name, "ShippingAddress");
        let columns: Vec<&str> = shipping.properties.iter().map(|p| p.column.as_str()).collect();
        assert_eq!(columns, vec!["ShippingAddress_Street", "ShippingAddress_City"]);

        // Identity and version are not repeated as plain properties
        assert!(order.properties.is_empty());
        assert_eq!(order.identity.as_ref().unwrap().column, "Id");
    }

    #[test]
    fn test_engine_receives_rendered_xml() {
        let configuration = builder()
            .build(BuildRequest::new(["Order"]), InMemoryEngine::new())
            .unwrap();

        let xml = configuration.mapping(DocumentFormat::Xml).unwrap();
        assert!(xml.contains("<class name=\"Order\" table=\"Orders\">"));
        assert!(xml.contains("column=\"ShippingAddress_City\""));
        assert!(!xml.contains("Address\" table"));
    }

    #[test]
    fn test_output_format_from_config() {
        let configuration = builder()
            .with_config(BuilderConfig::new().with_output_format(DocumentFormat::Json))
            .build(BuildRequest::new(["Order"]), InMemoryEngine::new())
            .unwrap();

        let json = configuration.mapping(DocumentFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(json).unwrap();
        assert_eq!(value["classes"][0]["table"], "Orders");
    }

    #[test]
    fn test_independent_builds_are_byte_identical() {
        let render = || {
            builder()
                .build(
                    BuildRequest::new(["Order"]).matching(MatchEntities::all()),
                    InMemoryEngine::new(),
                )
                .unwrap()
        };
        let first = render();
        let second = render();
        assert_eq!(first, second);
        assert_eq!(
            first.mapping(DocumentFormat::Xml),
            second.mapping(DocumentFormat::Xml)
        );
    }

    #[test]
    fn test_custom_naming_service() {
        struct Prefixed;
        impl data_modelling_codefirst::NamingService for Prefixed {
            fn pluralize(&self, name: &str) -> String {
                format!("tbl_{}", name.to_lowercase())
            }
        }

        let document = builder()
            .with_naming(Prefixed)
            .build_document(BuildRequest::new(["Order"]))
            .unwrap();
        assert_eq!(document.classes[0].table, "tbl_order");
    }
}

mod failure_tests {
    use super::*;

    #[test]
    fn test_finishing_transform_runs_last() {
        let document = builder()
            .build_document(BuildRequest::new(["Order"]).with_finish(|document| {
                let order = document
                    .classes
                    .first_mut()
                    .ok_or_else(|| anyhow::anyhow!("no classes"))?;
                order.table = format!("sales.{}", order.table);
                Ok(())
            }))
            .unwrap();
        assert_eq!(document.classes[0].table, "sales.Orders");
    }

    #[test]
    fn test_finishing_transform_error_skips_engine() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let engine = RecordingEngine {
            calls: Arc::clone(&calls),
        };

        let err = builder()
            .build(
                BuildRequest::new(["Order"])
                    .with_finish(|_| Err(anyhow::anyhow!("schema locked"))),
                engine,
            )
            .unwrap_err();

        assert!(matches!(err, BuildError::Transform(_)));
        assert!(err.to_string().contains("schema locked"));
        assert!(calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_engine_call_order() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let engine = RecordingEngine {
            calls: Arc::clone(&calls),
        };

        let count = builder()
            .build(BuildRequest::new(["Order"]), engine)
            .unwrap();
        assert_eq!(count, 2);
        assert_eq!(
            *calls.lock().unwrap(),
            vec!["mapping:xml".to_string(), "finish".to_string()]
        );
    }

    #[test]
    fn test_duplicate_columns_fail_before_handoff() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let engine = RecordingEngine {
            calls: Arc::clone(&calls),
        };

        let err = builder()
            .build(
                BuildRequest::new(["Order"]).with_finish(|document| {
                    document.classes[0].properties.push(Property {
                        name: "Street".to_string(),
                        column: "ShippingAddress_Street".to_string(),
                        access: Access::Property,
                    });
                    Ok(())
                }),
                engine,
            )
            .unwrap_err();

        match err {
            BuildError::DuplicateColumns(result) => {
                assert_eq!(result.duplicate_columns.len(), 1);
                assert_eq!(result.duplicate_columns[0].column, "ShippingAddress_Street");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_column_validation_can_be_disabled() {
        let document = builder()
            .with_config(BuilderConfig::new().with_column_validation(false))
            .build_document(BuildRequest::new(["Order"]).with_finish(|document| {
                document.classes[0].properties.push(Property {
                    name: "Id".to_string(),
                    column: "Id".to_string(),
                    access: Access::Property,
                });
                Ok(())
            }))
            .unwrap();
        assert_eq!(document.classes[0].columns().len(), 5);
    }
}

mod config_tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_config_loaded_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
column_separator = "."
version_member = "RowVersion"
output_format = "yaml"
"#
        )
        .unwrap();

        let config = BuilderConfig::from_file(file.path()).unwrap();
        assert_eq!(config.output_format, DocumentFormat::Yaml);

        let catalog = TypeCatalog::new().with_type(
            ModelType::new("Order")
                .with_member(Member::primitive("Id", Primitive::Int))
                .with_member(Member::primitive("RowVersion", Primitive::Long))
                .with_member(Member::new("Billing", TypeRef::model("Address")).embedded()),
        )
        .with_type(
            ModelType::new("Address").with_member(Member::primitive("Zip", Primitive::String)),
        );

        let configuration = SchemaBuilder::new(catalog)
            .with_config(config)
            .with_component_rules(ComponentRules::defaults())
            .build(BuildRequest::new(["Order"]), InMemoryEngine::new())
            .unwrap();

        let yaml = configuration.mapping(DocumentFormat::Yaml).unwrap();
        assert!(yaml.contains("column: Billing.Zip"));
        assert!(yaml.contains("name: RowVersion"));
    }

    #[test]
    fn test_missing_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = BuilderConfig::from_file(dir.path().join("absent.toml"));
        assert!(matches!(
            result,
            Err(data_modelling_codefirst::ConfigError::IoError(_))
        ));
    }
}
