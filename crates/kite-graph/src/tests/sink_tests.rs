//! Sinks fed by real analysis results.

use super::helpers::Fixture;
use crate::{GraphSink, JsonFileSink, MemorySink};

fn fixture() -> Fixture {
    let fixture = Fixture::package("sinks");
    fixture
        .file("src/a.ts", "export class A { go() { this.stop(); } stop() {} }")
        .file("src/b.ts", "export interface B { id: string }\nexport class C {}");
    fixture
}

#[tokio::test]
async fn test_memory_sink_upserts_are_idempotent() {
    let fixture = fixture();
    let result = fixture.analyze().await;
    let sink = MemorySink::new();

    let first = sink.write(&result).await.unwrap();
    assert!(first.inserted > 0);
    assert_eq!(first.skipped, 0);

    let again = fixture.analyze().await;
    let second = sink.write(&again).await.unwrap();
    assert_eq!(second.inserted, 0);
    assert_eq!(second.skipped, first.inserted);

    assert_eq!(sink.module_count(), 2);
    assert_eq!(sink.class_count(), 2);
    assert_eq!(sink.symbol_reference_count(), 1);
}

#[tokio::test]
async fn test_memory_sink_module_lookup() {
    let fixture = fixture();
    let result = fixture.analyze().await;
    let sink = MemorySink::new();
    sink.write(&result).await.unwrap();

    let b = result.module_by_path("src/b.ts").unwrap();
    let declarations = sink.module_declarations(b.id);
    let classes: Vec<_> = declarations.classes.iter().map(|c| c.name.as_str()).collect();
    let interfaces: Vec<_> = declarations.interfaces.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(classes, vec!["C"]);
    assert_eq!(interfaces, vec!["B"]);
}

#[tokio::test]
async fn test_json_sink_writes_result() {
    let fixture = fixture();
    let result = fixture.analyze().await;
    let out = fixture.path("graph.json");

    let report = JsonFileSink::new(&out).write(&result).await.unwrap();
    assert!(report.inserted > 0);

    let written: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(written["package"]["name"], "sinks");
    assert_eq!(written["classes"].as_array().unwrap().len(), 2);
    assert!(written["report"]["class_extends"].is_object());
}
