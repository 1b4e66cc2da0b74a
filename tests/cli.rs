//! 命令行入口测试

use assert_cmd::Command;

#[test]
fn test_help_lists_overrides() {
    let output = Command::cargo_bin("hackernews-zh-web")
        .unwrap()
        .arg("--help")
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    for flag in ["--bind", "--port", "--static-dir", "--env-docs"] {
        assert!(stdout.contains(flag), "missing {} in help", flag);
    }
}

#[test]
fn test_env_docs_lists_variables() {
    let output = Command::cargo_bin("hackernews-zh-web")
        .unwrap()
        .arg("--env-docs")
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    for name in [
        "HNZH_PAGE_SIZE",
        "HNZH_CACHE_TTL",
        "HNZH_TRANSLATION_PROVIDER",
        "HNZH_WEB_PORT",
    ] {
        assert!(stdout.contains(name), "missing {} in env docs", name);
    }
}

#[test]
fn test_invalid_page_size_is_rejected() {
    let output = Command::cargo_bin("hackernews-zh-web")
        .unwrap()
        .env("HNZH_PAGE_SIZE", "0")
        .output()
        .unwrap();

    assert!(!output.status.success());
}

#[test]
fn test_blank_api_key_is_rejected() {
    let output = Command::cargo_bin("hackernews-zh-web")
        .unwrap()
        .env("HNZH_TRANSLATION_API_KEY", "  ")
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("HNZH_TRANSLATION_API_KEY"), "stderr: {}", stderr);
}
