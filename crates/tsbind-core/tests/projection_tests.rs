//! End-to-end projection tests over a small manifest fixture.

use tsbind_core::{Artifact, Compiler, Settings};
use tsbind_model::ManifestModel;

fn fixture() -> ManifestModel {
    let text = serde_json::json!({
        "module": "@demo/bridge",
        "exposed": ["demo.app.ClassA", "demo.app.ClassB", "demo.lua.GlobalObject"],
        "classes": [
            {
                "name": "demo.app.ClassA",
                "methods": [
                    {
                        "name": "foo",
                        "params": [{"name": "value", "type": "int"}],
                        "returns": "java.lang.String"
                    },
                    {
                        "name": "foo",
                        "params": [
                            {"name": "value", "type": "int"},
                            {"name": "count", "type": "int"}
                        ],
                        "returns": "java.lang.String"
                    },
                    {"name": "secret", "returns": "void"}
                ]
            },
            {
                "name": "demo.app.ClassB",
                "enum": true,
                "constants": ["X", "Y"]
            },
            {
                "name": "demo.lua.GlobalObject",
                "methods": [
                    {
                        "name": "getText",
                        "static": true,
                        "params": [{"name": "id", "type": "java.lang.String"}],
                        "returns": "java.lang.String"
                    }
                ]
            }
        ]
    })
    .to_string();
    ManifestModel::from_str(&text).unwrap()
}

fn settings() -> Settings {
    let mut settings = Settings {
        module_name: "@demo/bridge".to_string(),
        global_class: Some("demo.lua.GlobalObject".to_string()),
        ..Settings::default()
    };
    settings
        .blacklist
        .insert("demo.app.ClassA#secret".to_string());
    settings
}

fn run(model: &ManifestModel) -> Vec<Artifact> {
    let mut compiler = Compiler::new(settings(), model);
    compiler.add_all(model.exposed().iter().map(|s| s.as_str()));
    compiler.walk();
    compiler.render()
}

fn artifact<'a>(artifacts: &'a [Artifact], path: &str) -> &'a Artifact {
    artifacts
        .iter()
        .find(|a| a.path == std::path::Path::new(path))
        .unwrap_or_else(|| panic!("missing artifact {path}"))
}

#[test]
fn declaration_file_contains_unioned_overload_signature() {
    let model = fixture();
    let artifacts = run(&model);
    let decl = artifact(&artifacts, "decl/demo.d.ts");

    assert!(decl.text.starts_with("/** @noSelfInFile */\n"));
    assert!(decl.text.contains("declare module '@demo/bridge' {"));
    assert!(decl.text.contains("export namespace demo {"));
    assert!(decl.text.contains("export class ClassA {"));
    // Two overloads, one declaration: slot 1 optional past min param count.
    assert!(
        decl.text.contains("foo(arg0: number, arg1?: number): string;"),
        "{}",
        decl.text
    );
}

#[test]
fn enum_declaration_lists_members_in_declared_order() {
    let model = fixture();
    let artifacts = run(&model);
    let decl = artifact(&artifacts, "decl/demo.d.ts");

    let enum_pos = decl.text.find("export enum ClassB {").unwrap();
    let x = decl.text[enum_pos..].find("X,").unwrap();
    let y = decl.text[enum_pos..].find("Y,").unwrap();
    assert!(x < y);
}

#[test]
fn mention_only_types_become_opaque_aliases() {
    let model = fixture();
    let artifacts = run(&model);
    // java.lang.String is reached only in signature position and is not in
    // the manifest, so it degrades to an alias.
    let decl = artifact(&artifacts, "decl/java.d.ts");
    assert!(decl.text.contains("export type String = any;"), "{}", decl.text);
}

#[test]
fn blacklisted_member_never_appears_in_any_artifact() {
    let model = fixture();
    for a in run(&model) {
        assert!(
            !a.text.contains("secret"),
            "blacklisted member leaked into {}",
            a.path.display()
        );
    }
}

#[test]
fn reference_file_lists_namespace_files_sorted_with_markers() {
    let model = fixture();
    let artifacts = run(&model);
    let reference = artifact(&artifacts, "reference.partial.d.ts");

    assert!(reference.text.starts_with("// [PARTIAL:START]\n"));
    assert!(reference.text.ends_with("// [PARTIAL:STOP]\n"));
    let demo = reference.text.find("decl/demo.d.ts").unwrap();
    let java = reference.text.find("decl/java.d.ts").unwrap();
    assert!(demo < java);
}

#[test]
fn umbrella_reexports_top_level_names_and_free_functions() {
    let model = fixture();
    let artifacts = run(&model);
    let umbrella = artifact(&artifacts, "api.partial.d.ts");

    assert!(umbrella.text.contains("/** @customConstructor ClassA.new */"));
    assert!(
        umbrella.text.contains("export class ClassA extends demo.app.ClassA {}"),
        "{}",
        umbrella.text
    );
    assert!(umbrella.text.contains("export class ClassB extends demo.app.ClassB {}"));
    assert!(
        umbrella.text.contains("export function getText(arg0: string): string;"),
        "{}",
        umbrella.text
    );
    assert!(umbrella.text.contains("export function addEventListener(id: string, listener: any): void;"));
}

#[test]
fn shim_binds_top_level_classes_and_global_functions() {
    let model = fixture();
    let artifacts = run(&model);
    let shim = artifact(&artifacts, "bridge.lua");

    assert!(shim.text.starts_with("local Exports = {}\n-- [PARTIAL:START]\n"));
    assert!(shim.text.contains("function Exports.getText(id) return getText(id) end"));
    assert!(shim.text.contains("Exports.ClassA = loadstring(\"return _G['ClassA']\")()"));
    assert!(shim.text.contains("Exports.ClassB = loadstring(\"return _G['ClassB']\")()"));
    assert!(shim.text.ends_with("-- [PARTIAL:STOP]\nreturn Exports\n"));
}

#[test]
fn reserved_word_namespace_segments_are_sanitized() {
    let text = serde_json::json!({
        "module": "@demo/kahlua",
        "exposed": [
            "se.krka.kahlua.integration.function.LuaClosure",
            "demo.Caller"
        ],
        "classes": [
            {"name": "se.krka.kahlua.integration.function.LuaClosure"},
            {
                "name": "demo.Caller",
                "methods": [{
                    "name": "call",
                    "params": [{
                        "name": "fn",
                        "type": "se.krka.kahlua.integration.function.LuaClosure"
                    }]
                }]
            }
        ]
    })
    .to_string();
    let model = ManifestModel::from_str(&text).unwrap();
    let mut compiler = Compiler::new(
        Settings {
            module_name: "@demo/kahlua".to_string(),
            ..Settings::default()
        },
        &model,
    );
    compiler.add_all(model.exposed().iter().map(|s| s.as_str()));
    compiler.walk();
    let artifacts = compiler.render();

    let decl = artifact(&artifacts, "decl/se.d.ts");
    assert!(decl.text.contains("export namespace _function_ {"), "{}", decl.text);
    assert!(!decl.text.contains("export namespace function {"), "{}", decl.text);

    // References and umbrella targets point at the sanitized path.
    let caller = artifact(&artifacts, "decl/demo.d.ts");
    assert!(
        caller
            .text
            .contains("call(arg0: se.krka.kahlua.integration._function_.LuaClosure): void;"),
        "{}",
        caller.text
    );
    let umbrella = artifact(&artifacts, "api.partial.d.ts");
    assert!(
        umbrella.text.contains(
            "export class LuaClosure extends se.krka.kahlua.integration._function_.LuaClosure {}"
        ),
        "{}",
        umbrella.text
    );
}

#[test]
fn two_runs_produce_byte_identical_artifacts() {
    let model = fixture();
    let first = run(&model);
    let second = run(&model);

    assert_eq!(first.len(), second.len());
    for (a, b) in first.iter().zip(&second) {
        assert_eq!(a.path, b.path);
        assert_eq!(a.text, b.text, "artifact {} differs", a.path.display());
    }
}
