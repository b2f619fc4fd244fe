use std::fs;
use std::path::{Path, PathBuf};

use ddlgen_core::{
    Column, ColumnRef, DataModel, Dbms, DdlGenerator, Entity, GenerateOptions, GenerateOutcome,
    ModelElement, RelationshipEnd,
};

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn load_model(name: &str) -> ModelElement {
    let path = fixture(name);
    let contents =
        fs::read_to_string(&path).unwrap_or_else(|_| panic!("missing json at {}", path.display()));
    serde_json::from_str(&contents).expect("parse model")
}

fn temp_path(label: &str) -> PathBuf {
    std::env::temp_dir()
        .join(format!("ddlgen_{label}_{}", uuid::Uuid::new_v4()))
        .join("out.sql")
}

fn pk(name: &str) -> Column {
    let mut column = Column::new(name, "INTEGER");
    column.primary_key = true;
    column
}

fn customer_order_model() -> ModelElement {
    let mut customer_id = Column::new("customer_id", "INTEGER");
    customer_id.foreign_key = true;
    customer_id.reference_to = Some(ColumnRef::new("Customer", "id"));

    ModelElement::DataModel(DataModel {
        name: "Shop".to_string(),
        entities: vec![
            Entity {
                name: "Customer".to_string(),
                columns: vec![pk("id"), Column::new("name", "VARCHAR")],
                relationship_ends: Vec::new(),
            },
            Entity {
                name: "Order".to_string(),
                columns: vec![pk("id"), customer_id],
                relationship_ends: vec![RelationshipEnd::new("1", "Customer")],
            },
        ],
    })
}

fn plain_mysql() -> GenerateOptions {
    GenerateOptions {
        quote_identifiers: false,
        drop_table: false,
        dbms: Dbms::Mysql,
        ..GenerateOptions::default()
    }
}

#[test]
fn customer_order_scenario_emits_tables_then_foreign_key() {
    let generator = DdlGenerator::new(plain_mysql());
    let script = generator
        .render(&customer_order_model())
        .expect("data model renders");

    let expected = "\
CREATE TABLE Customer (
    id INTEGER NOT NULL,
    name VARCHAR,
    PRIMARY KEY (id)
);

CREATE TABLE Order (
    id INTEGER NOT NULL,
    customer_id INTEGER,
    PRIMARY KEY (id)
);

ALTER TABLE Order ADD FOREIGN KEY (customer_id) REFERENCES Customer(id);
";
    assert_eq!(script, expected);
}

#[test]
fn fixture_matches_golden_mysql_script() {
    let model = load_model("shop.model.json");
    let golden = fs::read_to_string(fixture("shop.mysql.sql")).expect("read golden script");

    let script = DdlGenerator::new(GenerateOptions::default())
        .render(&model)
        .expect("data model renders");
    assert_eq!(script, golden);
}

#[test]
fn creates_precede_foreign_keys_for_forward_references() {
    let model = load_model("shop.model.json");
    let script = DdlGenerator::new(plain_mysql())
        .render(&model)
        .expect("data model renders");

    let last_create = script.rfind("CREATE TABLE").expect("has create");
    let first_alter = script.find("ALTER TABLE").expect("has alter");
    assert!(last_create < first_alter);
    assert_eq!(script.matches("FOREIGN KEY").count(), 3);
}

#[test]
fn oracle_script_uses_cascade_drops_and_double_quotes() {
    let model = load_model("shop.model.json");
    let options = GenerateOptions {
        dbms: Dbms::Oracle,
        use_tab: true,
        ..GenerateOptions::default()
    };
    let script = DdlGenerator::new(options)
        .render(&model)
        .expect("data model renders");

    assert!(script.starts_with("DROP TABLE \"Customer\" CASCADE CONSTRAINTS;\n"));
    assert!(!script.contains("FOREIGN_KEY_CHECKS"));
    assert!(script.contains("CREATE TABLE \"Product\" (\n\t\"sku\" VARCHAR(32) NOT NULL,\n"));
}

#[test]
fn generation_is_idempotent() {
    let model = load_model("shop.model.json");
    let generator = DdlGenerator::new(GenerateOptions::default());

    let path_a = temp_path("run_a");
    let path_b = temp_path("run_b");
    generator.generate(&model, &path_a).expect("generate A");
    generator.generate(&model, &path_b).expect("generate B");

    let bytes_a = fs::read(&path_a).expect("read A");
    let bytes_b = fs::read(&path_b).expect("read B");
    assert_eq!(bytes_a, bytes_b);

    for path in [path_a, path_b] {
        if let Some(dir) = path.parent() {
            let _ = fs::remove_dir_all(dir);
        }
    }
}

#[test]
fn generate_reports_written_bytes() {
    let model = customer_order_model();
    let path = temp_path("written");
    let outcome = DdlGenerator::new(plain_mysql())
        .generate(&model, &path)
        .expect("generate");

    let written = fs::read_to_string(&path).expect("read script");
    assert_eq!(
        outcome,
        GenerateOutcome::Written {
            path: path.clone(),
            bytes: written.len(),
        }
    );

    if let Some(dir) = path.parent() {
        let _ = fs::remove_dir_all(dir);
    }
}

#[test]
fn other_elements_generate_nothing() {
    let element: ModelElement =
        serde_json::from_str(r#"{"kind": "other", "name": "ERDDiagram"}"#).expect("parse");
    let generator = DdlGenerator::default();
    assert!(generator.render(&element).is_none());

    let path = temp_path("other");
    let outcome = generator.generate(&element, &path).expect("no-op success");
    assert_eq!(outcome, GenerateOutcome::Skipped { kind: "other" });
    assert!(!path.exists());
}

#[test]
fn unwritable_target_surfaces_io_error() {
    let blocker = std::env::temp_dir().join(format!("ddlgen_blocker_{}", uuid::Uuid::new_v4()));
    fs::write(&blocker, "not a directory").expect("create blocker file");

    let path = blocker.join("schema.sql");
    let err = DdlGenerator::default()
        .generate(&customer_order_model(), &path)
        .expect_err("parent is a file");
    assert!(matches!(err, ddlgen_core::Error::Io(_)));

    let _ = fs::remove_file(&blocker);
}
