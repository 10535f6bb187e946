//! Relationship and symbol resolution across files.

use super::helpers::Fixture;
use crate::model::{ResolutionStatus, TargetKind};

#[tokio::test]
async fn test_duplicate_parent_names_stay_unresolved() {
    let fixture = Fixture::package("ambiguous");
    fixture
        .file("src/a/base.ts", "export class Base {}")
        .file("src/b/base.ts", "export class Base {}")
        .file("src/child.ts", "class Child extends Base {}");

    let result = fixture.analyze().await;

    assert_eq!(result.classes_named("Base").count(), 2);
    let child = result.classes_named("Child").next().unwrap();
    assert_eq!(child.extends_id, None);

    let extends = &result.class_extends[0];
    assert_eq!(extends.class_id, child.id);
    assert_eq!(extends.parent_name, "Base");
    assert_eq!(extends.parent_id, None);
    assert_eq!(extends.status, ResolutionStatus::Ambiguous);
    assert_eq!(result.report.class_extends.ambiguous, 1);
    assert_eq!(result.report.class_extends.resolved, 0);
}

#[tokio::test]
async fn test_unique_names_resolve_across_files() {
    let fixture = Fixture::package("unique");
    fixture
        .file("src/base.ts", "export abstract class Base {}")
        .file(
            "src/repo.ts",
            "export interface Entity { id: string }\nexport interface Repo extends Entity { find(id: string): void }",
        )
        .file(
            "src/user.ts",
            "import { Base } from './base';\nimport type { Repo } from './repo';\nexport class User extends Base implements Repo { id = ''; find(id: string) {} }",
        );

    let result = fixture.analyze().await;

    let base = result.classes_named("Base").next().unwrap();
    let user = result.classes_named("User").next().unwrap();
    let repo = result.interfaces.iter().find(|i| i.name == "Repo").unwrap();
    let entity = result.interfaces.iter().find(|i| i.name == "Entity").unwrap();

    assert_eq!(result.class_extends[0].parent_id, Some(base.id));
    assert_eq!(result.class_extends[0].status, ResolutionStatus::Resolved);
    assert_eq!(user.extends_id, Some(base.id));

    assert_eq!(result.class_implements[0].class_id, user.id);
    assert_eq!(result.class_implements[0].interface_id, Some(repo.id));

    assert_eq!(result.interface_extends[0].interface_id, repo.id);
    assert_eq!(result.interface_extends[0].extended_id, Some(entity.id));

    let report = result.report;
    assert_eq!(report.class_extends.resolved, 1);
    assert_eq!(report.class_implements.resolved, 1);
    assert_eq!(report.interface_extends.resolved, 1);
}

#[tokio::test]
async fn test_missing_parent_is_unresolved() {
    let fixture = Fixture::package("external");
    fixture.file(
        "src/widget.ts",
        "import { Component } from 'framework';\nexport class Widget extends Component {}",
    );

    let result = fixture.analyze().await;
    assert_eq!(result.class_extends[0].status, ResolutionStatus::Unresolved);
    assert_eq!(result.report.class_extends.unresolved, 1);
}

#[tokio::test]
async fn test_member_access_resolution() {
    let fixture = Fixture::package("members");
    fixture
        .file(
            "src/logger.ts",
            r#"
            export class Logger {
                static create() { return new Logger(); }
                write(message: string) {}
            }
            "#,
        )
        .file(
            "src/service.ts",
            r#"
            import { Logger } from './logger';
            export class Service {
                private logger = Logger.create();
                name = 'svc';
                run() {
                    this.logger.write(this.name);
                    console.log(this.name);
                }
            }
            export function boot(service: Service) {
                service.run();
            }
            "#,
        );

    let result = fixture.analyze().await;
    let method = |parent: &str, name: &str| {
        let parent = result.classes_named(parent).next().unwrap();
        result
            .methods
            .iter()
            .find(|m| m.parent_id == parent.id && m.name == name)
            .unwrap()
    };
    let run = method("Service", "run");
    let write = method("Logger", "write");
    let name = result.properties.iter().find(|p| p.name == "name").unwrap();
    let boot = result.functions.iter().find(|f| f.name == "boot").unwrap();

    let targets_of = |source: crate::EntityId| {
        let mut targets: Vec<_> = result
            .symbol_references
            .iter()
            .filter(|r| r.source_symbol_id == source)
            .map(|r| (r.target_kind, r.target_name.as_str(), r.target_symbol_id))
            .collect();
        targets.sort_by_key(|(_, n, _)| *n);
        targets
    };

    // `logger` resolves through `this`, `write` by its unique name;
    // `console.log` has no target and is dropped
    let logger = result.properties.iter().find(|p| p.name == "logger").unwrap();
    assert_eq!(
        targets_of(run.id),
        vec![
            (TargetKind::Property, "logger", logger.id),
            (TargetKind::Property, "name", name.id),
            (TargetKind::Method, "write", write.id),
        ]
    );

    // `service.run()` from a module-level function resolves by unique name
    assert_eq!(
        targets_of(boot.id),
        vec![(TargetKind::Method, "run", run.id)]
    );
    assert!(result.report.symbol_usages.dropped >= 1);
}
