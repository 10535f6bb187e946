//! Component files through the full pipeline.

use super::helpers::{Fixture, module_paths};
use crate::model::SpecifierKind;

#[tokio::test]
async fn test_template_only_component_is_an_empty_module() {
    let fixture = Fixture::package("vue-template");
    fixture.file(
        "src/Banner.vue",
        "<template>\n  <div class=\"banner\">{{ title }}</div>\n</template>\n\n<style>\n.banner { color: red; }\n</style>\n",
    );

    let result = fixture.analyze().await;

    assert_eq!(module_paths(&result), vec!["src/Banner.vue"]);
    assert!(result.is_complete());
    assert!(result.imports.is_empty());
    assert!(result.classes.is_empty());
    assert!(result.exports.is_empty());
    assert_eq!(result.modules[0].name, "src/Banner");
}

#[tokio::test]
async fn test_script_setup_import_points_at_local_module() {
    let fixture = Fixture::package("vue-setup");
    fixture
        .file(
            "src/format.ts",
            "export function formatPrice(value: number): string { return value.toFixed(2); }",
        )
        .file(
            "src/Price.vue",
            r#"<script setup lang="ts">
import { formatPrice } from './format';
const props = defineProps<{ value: number }>();
const label: string = formatPrice(props.value);
</script>

<template>
  <span>{{ label }}</span>
</template>
"#,
        );

    let result = fixture.analyze().await;
    assert!(result.is_complete());

    let component = result.module_by_path("src/Price.vue").unwrap();
    let format = result.module_by_path("src/format.ts").unwrap();

    let import = result
        .imports
        .iter()
        .find(|i| i.module_id == component.id)
        .unwrap();
    assert_eq!(import.source, "./format");
    assert_eq!(import.target_module_id, Some(format.id));
    assert_eq!(import.specifiers[0].name, "formatPrice");
    assert_eq!(import.specifiers[0].kind, SpecifierKind::Value);
}

#[tokio::test]
async fn test_both_script_blocks_and_external_sources() {
    let fixture = Fixture::package("vue-both");
    fixture
        .file(
            "src/Panel.vue",
            r#"<script lang="ts">
export interface PanelProps { open: boolean }
export default class Panel { toggle() { this.open = !this.open; } open = false; }
</script>
<script setup lang="ts">
import { ref } from 'vue';
const count = ref(0);
</script>
<template><div /></template>
"#,
        )
        .file(
            "src/Remote.vue",
            "<script src=\"./remote.js\"></script>\n<template><p /></template>\n",
        );

    let result = fixture.analyze().await;
    assert!(result.is_complete());

    let panel = result.module_by_path("src/Panel.vue").unwrap();
    assert!(result.interfaces.iter().any(|i| i.name == "PanelProps" && i.module_id == panel.id));
    assert!(result.classes.iter().any(|c| c.name == "Panel" && c.module_id == panel.id));
    assert!(result.imports.iter().any(|i| i.source == "vue"));

    let remote = result.module_by_path("src/Remote.vue").unwrap();
    assert!(result.imports.iter().all(|i| i.module_id != remote.id));
}
