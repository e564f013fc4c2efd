//! End-to-end export runs against a mock version service, a mock listfile
//! host and an in-process export tool.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use async_trait::async_trait;
use cascette_protocol::{HttpConfig, Product, Region};
use cascette_ui_export::{
    BuildDescriptor, ExportConfig, ExportError, ExportTool, MANIFESTS, Pipeline,
};
use pretty_assertions::assert_eq;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::TempDir;
use url::Url;
use walkdir::WalkDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const VERSIONS: &str = "Region!STRING:0|BuildConfig!HEX:16|CDNConfig!HEX:16|KeyRing!HEX:16|BuildId!DEC:4|VersionsName!String:0|ProductConfig!HEX:16
## seqn = 3020098
eu|eeee0000eeee0000eeee0000eeee0000|eeee1111eeee1111eeee1111eeee1111||61000|11.1.0.61000|
us|be2bb98dc28aee05bbee519393696cdb|fac77b9ca52c84ac28ad83a7dbe1c829||61559|11.1.5.61559|53020d32e1a25648c8e1eafd5771935f
";

const LISTFILE: &str = "\
42;interface/addons/foo.lua
7;interface/framexml/uiparent.lua
99;interface/addons/foo/foo.toc
5;world/maps/azeroth/azeroth.wdt
";

/// Writes canned manifest contents and a stub for every other listed file,
/// recording each listing it receives.
#[derive(Default)]
struct FakeTool {
    manifests: HashMap<&'static str, &'static str>,
    fail_on_call: Option<usize>,
    listings: Mutex<Vec<Vec<String>>>,
    builds: Mutex<Vec<BuildDescriptor>>,
}

impl FakeTool {
    fn with_manifests(contents: [&'static str; 3]) -> Self {
        Self {
            manifests: MANIFESTS
                .iter()
                .zip(contents)
                .map(|(manifest, content)| (manifest.name, content))
                .collect(),
            ..Self::default()
        }
    }

    fn listings(&self) -> Vec<Vec<String>> {
        self.listings.lock().unwrap().clone()
    }
}

#[async_trait]
impl ExportTool for FakeTool {
    async fn export(
        &self,
        listing: &Path,
        build: &BuildDescriptor,
        output_dir: &Path,
    ) -> cascette_ui_export::Result<()> {
        let lines: Vec<String> = std::fs::read_to_string(listing)
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect();
        let call = {
            let mut listings = self.listings.lock().unwrap();
            listings.push(lines.clone());
            listings.len()
        };
        self.builds.lock().unwrap().push(build.clone());

        if self.fail_on_call == Some(call) {
            return Err(ExportError::ExportToolFailure(
                "exit status: 3".to_string(),
            ));
        }

        for line in lines {
            let (_, name) = line.split_once(';').unwrap();
            let content = self.manifests.get(name).copied().unwrap_or("-- exported\n");
            if content.is_empty() {
                // Simulate the tool silently skipping a file
                continue;
            }
            let path = output_dir.join(name);
            std::fs::create_dir_all(path.parent().unwrap()).unwrap();
            std::fs::write(path, content).unwrap();
        }
        Ok(())
    }
}

fn standard_tool() -> FakeTool {
    FakeTool::with_manifests([
        "Interface/AddOns/Foo.lua\nInterface\\FrameXML\\UIParent.lua\nInterface/AddOns/Unknown.lua\n",
        "Interface/AddOns/Foo/Foo.toc\n",
        "interface/addons/foo.lua\n",
    ])
}

async fn mock_upstreams() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/wow/versions"))
        .respond_with(ResponseTemplate::new(200).set_body_string(VERSIONS))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/community-listfile.csv"))
        .respond_with(ResponseTemplate::new(200).set_body_string(LISTFILE))
        .mount(&server)
        .await;
    server
}

fn config(server: &MockServer, output: &Path) -> ExportConfig {
    let mut config = ExportConfig::new(Product::Wow, output);
    config.versions_url = Some(Url::parse(&server.uri()).unwrap());
    config.listfile_url =
        Url::parse(&format!("{}/community-listfile.csv", server.uri())).unwrap();
    config
}

/// Files under `root`, relative and with `/` separators, sorted
fn files_under(root: &Path) -> Vec<String> {
    let mut files: Vec<String> = WalkDir::new(root)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| {
            entry
                .path()
                .strip_prefix(root)
                .unwrap()
                .to_string_lossy()
                .replace('\\', "/")
        })
        .collect();
    files.sort();
    files
}

fn output_dir() -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("ui");
    (dir, output)
}

#[tokio::test]
async fn test_full_run_exports_resolved_files() {
    let server = mock_upstreams().await;
    let (_dir, output) = output_dir();
    let tool = Arc::new(standard_tool());

    let mut config = config(&server, &output);
    config.export_version = true;
    let summary = Pipeline::new(config, tool.clone())
        .unwrap()
        .run()
        .await
        .expect("run should succeed");

    assert_eq!(summary.build.region, Region::US);
    assert_eq!(summary.build.build_config, "be2bb98dc28aee05bbee519393696cdb");
    assert_eq!(summary.candidates, 5);
    assert_eq!(summary.resolved, 3);
    assert_eq!(summary.unmatched, 1);
    assert_eq!(summary.exported, 3);

    let listings = tool.listings();
    assert_eq!(listings.len(), 2, "one batch for manifests, one for sources");
    assert_eq!(
        listings[0],
        vec![
            "6067012;Interface/ui-code-list.txt",
            "6076661;Interface/ui-toc-list.txt",
            "6139026;Interface/ui-gen-addon-list.txt",
        ]
    );
    assert_eq!(
        listings[1],
        vec![
            "7;Interface/FrameXML/UIParent.lua",
            "42;Interface/AddOns/Foo.lua",
            "99;Interface/AddOns/Foo/Foo.toc",
        ]
    );

    // Both batches use the resolved build coordinates
    assert!(tool.builds.lock().unwrap().iter().all(|b| b.cdn_config
        == "fac77b9ca52c84ac28ad83a7dbe1c829"));

    assert_eq!(
        std::fs::read_to_string(output.join("version.txt")).unwrap(),
        "11.1.5.61559"
    );
    assert_eq!(
        files_under(&output),
        vec![
            "Interface/AddOns/Foo.lua",
            "Interface/AddOns/Foo/Foo.toc",
            "Interface/FrameXML/UIParent.lua",
            "version.txt",
        ]
    );
}

#[tokio::test]
async fn test_keep_manifests_leaves_exactly_three() {
    let server = mock_upstreams().await;
    let (_dir, output) = output_dir();
    let tool = Arc::new(standard_tool());

    let mut config = config(&server, &output);
    config.keep_manifests = true;
    Pipeline::new(config, tool).unwrap().run().await.unwrap();

    let manifests: Vec<String> = files_under(&output)
        .into_iter()
        .filter(|name| name.ends_with(".txt"))
        .collect();
    assert_eq!(
        manifests,
        vec![
            "Interface/ui-code-list.txt",
            "Interface/ui-gen-addon-list.txt",
            "Interface/ui-toc-list.txt",
        ]
    );
    assert!(!output.join("version.txt").exists());
}

#[tokio::test]
async fn test_region_not_found_aborts_before_export() {
    let server = mock_upstreams().await;
    let (_dir, output) = output_dir();
    let tool = Arc::new(standard_tool());

    let mut config = config(&server, &output);
    config.region = Region::KR;
    let err = Pipeline::new(config, tool.clone())
        .unwrap()
        .run()
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ExportError::RegionNotFound {
            region: Region::KR,
            rows: 2
        }
    ));
    assert!(tool.listings().is_empty());
    assert!(!output.exists());
}

#[tokio::test]
async fn test_version_service_failure_is_upstream_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/wow/versions"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    let (_dir, output) = output_dir();
    let tool = Arc::new(standard_tool());

    let err = Pipeline::new(config(&server, &output), tool.clone())
        .unwrap()
        .run()
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ExportError::UpstreamUnavailable {
            source_name: "versions",
            ..
        }
    ));
    assert!(tool.listings().is_empty());
}

#[tokio::test]
async fn test_listfile_failure_is_upstream_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/wow/versions"))
        .respond_with(ResponseTemplate::new(200).set_body_string(VERSIONS))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/community-listfile.csv"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    let (_dir, output) = output_dir();

    let err = Pipeline::new(config(&server, &output), Arc::new(standard_tool()))
        .unwrap()
        .run()
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ExportError::UpstreamUnavailable {
            source_name: "listfile",
            ..
        }
    ));
}

#[tokio::test]
async fn test_slow_listfile_download_is_not_cut_off() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/wow/versions"))
        .respond_with(ResponseTemplate::new(200).set_body_string(VERSIONS))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/community-listfile.csv"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(LISTFILE)
                .set_delay(Duration::from_millis(600)),
        )
        .mount(&server)
        .await;
    let (_dir, output) = output_dir();
    let http = HttpConfig {
        timeout: Some(Duration::from_millis(300)),
        ..HttpConfig::default()
    };

    let summary = Pipeline::with_http(config(&server, &output), Arc::new(standard_tool()), &http)
        .unwrap()
        .run()
        .await
        .expect("listfile download should not be bounded by the request timeout");

    assert_eq!(summary.resolved, 3);
}

#[tokio::test]
async fn test_missing_manifest_is_fatal() {
    let server = mock_upstreams().await;
    let (_dir, output) = output_dir();
    // Empty content makes the fake tool skip the generated-addon manifest
    let tool = Arc::new(FakeTool::with_manifests([
        "Interface/AddOns/Foo.lua\n",
        "Interface/AddOns/Foo/Foo.toc\n",
        "",
    ]));

    let err = Pipeline::new(config(&server, &output), tool.clone())
        .unwrap()
        .run()
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ExportError::IncompleteManifest {
            name: "ui-gen-addon-list",
            ..
        }
    ));
    assert_eq!(tool.listings().len(), 1, "source batch must not run");
}

#[tokio::test]
async fn test_tool_failure_on_source_batch_propagates() {
    let server = mock_upstreams().await;
    let (_dir, output) = output_dir();
    let tool = Arc::new(FakeTool {
        fail_on_call: Some(2),
        ..standard_tool()
    });

    let mut config = config(&server, &output);
    config.export_version = true;
    let err = Pipeline::new(config, tool.clone())
        .unwrap()
        .run()
        .await
        .unwrap_err();

    assert!(matches!(err, ExportError::ExportToolFailure(_)));
    assert_eq!(tool.listings().len(), 2);
    // Later stages never ran
    assert!(!output.join("version.txt").exists());
    assert!(MANIFESTS.iter().all(|m| m.path(&output).exists()));
}
