use shrinkray::core::interfaces::BuildService;
use shrinkray::core::models::{AssetKind, BuildConfig};
use shrinkray::core::services::TreeProcessorService;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

const LOGO_BYTES: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a, 0x00, 0xff, 0x10, 0x80];

fn write(root: &Path, relative: &str, content: &[u8]) {
    let path = root.join(relative);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}

/// A small site with every handler and a few levels of nesting
fn create_site(src: &Path) {
    write(
        src,
        "index.html",
        b"<!DOCTYPE html>\n<html>\n  <head>\n    <title>Home</title>\n  </head>\n  <body>\n    <!-- comment -->\n    <p>  hi  </p>\n  </body>\n</html>\n",
    );
    write(src, "css/style.css", b"/* c */ .a { color: red; }\n\n.b {\n  margin: 0px;\n}\n");
    write(
        src,
        "js/app.js",
        b"// entry\nconsole.log(\"x\");\nfunction foo() {}\nexport function visible(value) {\n  return value + 1;\n}\n",
    );
    write(src, "img/logo.png", LOGO_BYTES);
    write(src, "fonts/empty/.keep", b"");
    write(src, "docs/deep/nested/readme.txt", b"keep   this   spacing\n");
    std::fs::create_dir_all(src.join("empty-dir")).unwrap();
}

fn relative_paths(root: &Path) -> BTreeSet<PathBuf> {
    fn collect(root: &Path, dir: &Path, out: &mut BTreeSet<PathBuf>) {
        for entry in std::fs::read_dir(dir).unwrap() {
            let path = entry.unwrap().path();
            out.insert(path.strip_prefix(root).unwrap().to_path_buf());
            if path.is_dir() {
                collect(root, &path, out);
            }
        }
    }

    let mut out = BTreeSet::new();
    collect(root, root, &mut out);
    out
}

async fn run(config: &BuildConfig) -> shrinkray::Result<shrinkray::BuildResult> {
    TreeProcessorService::from_config(config).build(config).await
}

#[tokio::test]
async fn test_structure_is_preserved() {
    let temp = tempfile::tempdir().unwrap();
    let src = temp.path().join("src");
    let dist = temp.path().join("dist");
    create_site(&src);

    let result = run(&BuildConfig::new(&src, &dist)).await.unwrap();

    assert_eq!(relative_paths(&src), relative_paths(&dist));
    assert_eq!(result.files.len(), 6);
    assert_eq!(result.count(AssetKind::Html), 1);
    assert_eq!(result.count(AssetKind::Css), 1);
    assert_eq!(result.count(AssetKind::Js), 1);
    assert_eq!(result.count(AssetKind::Other), 3);
}

#[tokio::test]
async fn test_html_comments_removed() {
    let temp = tempfile::tempdir().unwrap();
    let src = temp.path().join("src");
    let dist = temp.path().join("dist");
    write(&src, "index.html", b"<!-- comment --><p>  hi  </p>");

    run(&BuildConfig::new(&src, &dist)).await.unwrap();

    let html = std::fs::read_to_string(dist.join("index.html")).unwrap();
    assert!(!html.contains("<!--"));
    assert!(!html.contains("comment"));
    assert!(html.contains("hi"));
}

#[tokio::test]
async fn test_css_comments_removed() {
    let temp = tempfile::tempdir().unwrap();
    let src = temp.path().join("src");
    let dist = temp.path().join("dist");
    write(&src, "style.css", b"/* c */ .a { color: red; }");

    run(&BuildConfig::new(&src, &dist)).await.unwrap();

    let css = std::fs::read_to_string(dist.join("style.css")).unwrap();
    assert!(!css.contains("/* c */"));
    assert!(css.contains(".a"));
}

#[tokio::test]
async fn test_console_calls_removed() {
    let temp = tempfile::tempdir().unwrap();
    let src = temp.path().join("src");
    let dist = temp.path().join("dist");
    write(&src, "app.js", b"console.log(\"x\"); function foo(){}");

    run(&BuildConfig::new(&src, &dist)).await.unwrap();

    let js = std::fs::read_to_string(dist.join("app.js")).unwrap();
    assert!(!js.contains("console.log"));
}

#[tokio::test]
async fn test_binary_copied_exactly() {
    let temp = tempfile::tempdir().unwrap();
    let src = temp.path().join("src");
    let dist = temp.path().join("dist");
    write(&src, "logo.png", LOGO_BYTES);

    let result = run(&BuildConfig::new(&src, &dist)).await.unwrap();

    let copied = std::fs::read(dist.join("logo.png")).unwrap();
    assert_eq!(copied, LOGO_BYTES);
    assert_eq!(result.files[0].output_size, LOGO_BYTES.len() as u64);
}

#[tokio::test]
async fn test_minified_outputs_do_not_grow() {
    let temp = tempfile::tempdir().unwrap();
    let src = temp.path().join("src");
    let dist = temp.path().join("dist");
    create_site(&src);

    let result = run(&BuildConfig::new(&src, &dist)).await.unwrap();

    for file in result.files.iter().filter(|f| f.kind.is_minified()) {
        assert!(
            file.output_size <= file.input_size,
            "{} grew from {} to {}",
            file.source.display(),
            file.input_size,
            file.output_size
        );
    }
}

#[tokio::test]
async fn test_rerun_is_idempotent() {
    let temp = tempfile::tempdir().unwrap();
    let src = temp.path().join("src");
    let dist = temp.path().join("dist");
    create_site(&src);
    let config = BuildConfig::new(&src, &dist);

    run(&config).await.unwrap();
    let first: Vec<Vec<u8>> = ["index.html", "css/style.css", "js/app.js", "img/logo.png"]
        .iter()
        .map(|p| std::fs::read(dist.join(p)).unwrap())
        .collect();

    let second_result = run(&config).await.unwrap();
    let second: Vec<Vec<u8>> = ["index.html", "css/style.css", "js/app.js", "img/logo.png"]
        .iter()
        .map(|p| std::fs::read(dist.join(p)).unwrap())
        .collect();

    assert_eq!(first, second);
    // Every directory already existed on the second pass
    assert_eq!(second_result.directories_created, 0);
}

#[tokio::test]
async fn test_concurrent_run_matches_sequential() {
    let temp = tempfile::tempdir().unwrap();
    let src = temp.path().join("src");
    create_site(&src);
    for i in 0..20 {
        write(
            &src,
            &format!("many/page{}.html", i),
            format!("<div>\n   <p> page {} </p>\n</div>", i).as_bytes(),
        );
    }

    let sequential = temp.path().join("dist-seq");
    let concurrent = temp.path().join("dist-par");
    run(&BuildConfig::new(&src, &sequential)).await.unwrap();
    let result = run(&BuildConfig::new(&src, &concurrent).with_jobs(4))
        .await
        .unwrap();

    assert_eq!(relative_paths(&sequential), relative_paths(&concurrent));
    for file in &result.files {
        let relative = file.source.strip_prefix(&src).unwrap();
        assert_eq!(
            std::fs::read(sequential.join(relative)).unwrap(),
            std::fs::read(concurrent.join(relative)).unwrap()
        );
    }
}

#[tokio::test]
async fn test_invalid_js_aborts_run() {
    let temp = tempfile::tempdir().unwrap();
    let src = temp.path().join("src");
    let dist = temp.path().join("dist");
    write(&src, "a.txt", b"written before the failure");
    write(&src, "b.js", b"function ( {");
    write(&src, "c.txt", b"never reached");

    let err = run(&BuildConfig::new(&src, &dist)).await.unwrap_err();

    assert!(err.is_parse());
    assert!(err.format_detailed().contains("b.js"));
    // No rollback and no further progress
    assert!(dist.join("a.txt").exists());
    assert!(!dist.join("b.js").exists());
    assert!(!dist.join("c.txt").exists());
}

#[tokio::test]
async fn test_invalid_js_aborts_concurrent_run() {
    let temp = tempfile::tempdir().unwrap();
    let src = temp.path().join("src");
    let dist = temp.path().join("dist");
    create_site(&src);
    write(&src, "js/vendor/broken.js", b"const = ;");
    for i in 0..8 {
        write(&src, &format!("js/vendor/ok{i}.js"), b"export const value = 1 + 2;");
    }

    let err = run(&BuildConfig::new(&src, &dist).with_jobs(4))
        .await
        .unwrap_err();

    assert!(err.is_parse());
    assert!(err.format_detailed().contains("broken.js"));
    assert!(!dist.join("js/vendor/broken.js").exists());
}

#[tokio::test]
async fn test_invalid_css_aborts_run() {
    let temp = tempfile::tempdir().unwrap();
    let src = temp.path().join("src");
    let dist = temp.path().join("dist");
    write(&src, "broken.css", b".a..b { color: red }");

    let err = run(&BuildConfig::new(&src, &dist)).await.unwrap_err();

    assert!(err.is_parse());
}

#[tokio::test]
async fn test_missing_source_root_is_fs_error() {
    let temp = tempfile::tempdir().unwrap();

    let err = run(&BuildConfig::new(temp.path().join("src"), temp.path().join("dist")))
        .await
        .unwrap_err();

    assert!(err.is_file_system());
}

#[tokio::test]
async fn test_uppercase_extension_is_minified() {
    let temp = tempfile::tempdir().unwrap();
    let src = temp.path().join("src");
    let dist = temp.path().join("dist");
    write(&src, "LEGACY.CSS", b"/* old */\n.a {\n  color: red;\n}\n");

    let result = run(&BuildConfig::new(&src, &dist)).await.unwrap();

    assert_eq!(result.files[0].kind, AssetKind::Css);
    let css = std::fs::read_to_string(dist.join("LEGACY.CSS")).unwrap();
    assert!(!css.contains("old"));
}
