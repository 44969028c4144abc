use std::fs;
use std::process::Command;

fn litemark_bin() -> &'static str {
    env!("CARGO_BIN_EXE_litemark")
}

#[test]
fn converts_single_file_to_stdout() {
    let temp = tempfile::tempdir().unwrap();
    let input = temp.path().join("doc.md");
    fs::write(&input, "# Hello\n").unwrap();

    let output = Command::new(litemark_bin())
        .arg(&input)
        .output()
        .expect("failed to run litemark");

    assert!(output.status.success());
    assert_eq!(String::from_utf8(output.stdout).unwrap(), "<h1>Hello</h1>");
}

#[test]
fn converts_single_file_to_out_path() {
    let temp = tempfile::tempdir().unwrap();
    let input = temp.path().join("doc.md");
    let out = temp.path().join("doc.html");
    fs::write(&input, "hello *world*").unwrap();

    let status = Command::new(litemark_bin())
        .arg(&input)
        .arg("--out")
        .arg(&out)
        .status()
        .expect("failed to run litemark");

    assert!(status.success());
    let html = fs::read_to_string(&out).unwrap();
    assert_eq!(html, "<p>hello <em>world</em></p>");
}

#[test]
fn batch_converts_a_directory() {
    let temp = tempfile::tempdir().unwrap();
    let src = temp.path().join("notes");
    fs::create_dir_all(src.join("sub")).unwrap();
    fs::write(src.join("a.md"), "# A").unwrap();
    fs::write(src.join("sub/b.md"), "# B").unwrap();

    let status = Command::new(litemark_bin())
        .arg("--batch")
        .arg(&src)
        .status()
        .expect("failed to run litemark");

    assert!(status.success());
    assert_eq!(fs::read_to_string(src.join("a.html")).unwrap(), "<h1>A</h1>");
    assert_eq!(
        fs::read_to_string(src.join("sub/b.html")).unwrap(),
        "<h1>B</h1>"
    );
}

#[test]
fn batch_converts_to_separate_output_directory() {
    let temp = tempfile::tempdir().unwrap();
    let src = temp.path().join("notes");
    let out = temp.path().join("html-out");
    fs::create_dir_all(&src).unwrap();
    fs::write(src.join("a.md"), "# A").unwrap();

    let status = Command::new(litemark_bin())
        .arg("--batch")
        .arg(&src)
        .arg("--out")
        .arg(&out)
        .status()
        .expect("failed to run litemark");

    assert!(status.success());
    assert_eq!(fs::read_to_string(out.join("a.html")).unwrap(), "<h1>A</h1>");
}
