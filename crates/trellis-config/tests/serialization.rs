//! Tests for the JSON shape handed to the bundler engine.

use serde_json::{Value, json};
use trellis_config::{BuildContext, ConfigFactory, MemoryFs, PathSet, Settings};

fn config_json(context: BuildContext) -> Value {
    let fs = MemoryFs::new("/app")
        .with_dir("/app/Features")
        .with_dir("/app/Components");
    let settings = Settings {
        title: "Ledger".to_string(),
        base_url: "/ledger/".to_string(),
        ..Settings::default()
    };
    let paths = PathSet::resolve(&settings, &fs).expect("resolve paths");
    let config = ConfigFactory::new(paths)
        .with_access(fs)
        .build(&context)
        .expect("build configuration");

    let text = config.to_json().expect("serialize");
    serde_json::from_str(&text).expect("valid json")
}

#[test]
fn top_level_keys_match_bundler_schema() {
    let value = config_json(BuildContext::development());
    let object = value.as_object().expect("object");

    let keys: Vec<_> = object.keys().map(String::as_str).collect();
    assert_eq!(
        keys,
        vec![
            "resolve",
            "entry",
            "mode",
            "devtool",
            "output",
            "performance",
            "module",
            "plugins"
        ]
    );
    assert_eq!(value["mode"], json!("development"));
    assert_eq!(value["devtool"], json!("nosources-source-map"));
    assert_eq!(value["performance"], json!({ "hints": false }));
}

#[test]
fn entry_order_is_preserved() {
    let value = config_json(BuildContext::development());
    assert_eq!(
        value["entry"],
        json!({ "app": ["aurelia-bootstrapper"], "vendor": ["bluebird"] })
    );
    let names: Vec<_> = value["entry"]
        .as_object()
        .unwrap()
        .keys()
        .cloned()
        .collect();
    assert_eq!(names, vec!["app", "vendor"]);
}

#[test]
fn output_section_uses_camel_case() {
    let value = config_json(BuildContext::production());
    assert_eq!(
        value["output"],
        json!({
            "path": "/app/wwwroot",
            "publicPath": "/ledger/",
            "filename": "[name].[chunkhash].bundle.js",
            "sourceMapFilename": "[name].[chunkhash].bundle.map",
            "chunkFilename": "[name].[chunkhash].chunk.js"
        })
    );
}

#[test]
fn rules_serialize_patterns_and_handlers() {
    let value = config_json(BuildContext::development());
    let rules = value["module"]["rules"].as_array().expect("rules");

    assert_eq!(
        rules[0],
        json!({
            "test": "/\\.scss$/",
            "use": [
                { "loader": "style-loader" },
                { "loader": "css-loader" },
                { "loader": "sass-loader" }
            ],
            "issuer": "/\\.[tj]s$/i"
        })
    );
    assert_eq!(
        rules[2],
        json!({ "test": "/\\.html$/i", "use": [{ "loader": "html-loader" }] })
    );
    assert_eq!(rules[3]["exclude"], json!("/app/node_modules"));
    assert_eq!(
        rules[4],
        json!({ "test": "/\\.json$/i", "use": [{ "loader": "json-loader" }] })
    );
    assert_eq!(
        rules[5]["use"],
        json!([{ "loader": "expose-loader", "options": { "exposes": "Promise" } }])
    );
}

#[test]
fn plugins_serialize_kind_and_options() {
    let value = config_json(BuildContext::production().with_server(true));
    let plugins = value["plugins"].as_array().expect("plugins");

    assert_eq!(
        plugins[0],
        json!({
            "plugin": "CleanWebpackPlugin",
            "options": { "paths": ["/app/wwwroot"], "root": "/app" }
        })
    );
    assert_eq!(plugins[1], json!({ "plugin": "AureliaPlugin" }));
    assert_eq!(
        plugins[2],
        json!({ "plugin": "ProvidePlugin", "options": { "Promise": "bluebird" } })
    );
    assert_eq!(
        plugins[3],
        json!({
            "plugin": "ModuleDependenciesPlugin",
            "options": { "aurelia-testing": ["./compile-spy", "./view-spy"] }
        })
    );
    assert_eq!(
        plugins[4],
        json!({
            "plugin": "HtmlWebpackPlugin",
            "options": {
                "template": "index.ejs",
                "minify": { "removeComments": true, "collapseWhitespace": true },
                "metadata": { "title": "Ledger", "server": true, "baseUrl": "/ledger/" }
            }
        })
    );
    assert_eq!(
        plugins[5],
        json!({
            "plugin": "CopyWebpackPlugin",
            "options": [{ "from": "static/favicon.ico", "to": "favicon.ico" }]
        })
    );
}
