//! Drive the binary end to end with a JSON descriptor.

use assert_cmd::Command;
use assert_cmd::cargo;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn write_cfg(path: &Path, input: &Path, output: &Path, percentage: u32) {
    let json = serde_json::json!({
        "input_path": input,
        "output_subfolder": output,
        "percentage": percentage,
        "fields": "file,keep",
        "log_level": "quiet",
    });
    fs::write(path, json.to_string()).unwrap();
}

fn populate(dir: &Path, n: usize) {
    fs::create_dir_all(dir).unwrap();
    for i in 0..n {
        fs::write(dir.join(format!("IMG_{i:04}.JPG")), b"x").unwrap();
    }
}

#[test]
fn moves_files_and_reports_estimate() {
    let td = tempdir().unwrap();
    let base = fs::canonicalize(td.path()).unwrap();
    let input = base.join("pano");
    let output = input.join("VISU");
    populate(&input, 120);
    let cfg = base.join("config.json");
    write_cfg(&cfg, &input, &output, 100);

    let out = Command::new(cargo::cargo_bin!("pano_select"))
        .arg(&cfg)
        .args(["--yes", "--seed", "42"])
        .output()
        .expect("spawn binary");
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Found 120 panoramics"), "{stdout}");
    assert!(stdout.contains("(estimated 120)"), "{stdout}");

    let ledger = fs::read_to_string(output.join("panoramics.csv")).unwrap();
    let rows = ledger.lines().count() - 1;
    let moved = fs::read_dir(&output)
        .unwrap()
        .filter_map(Result::ok)
        .filter(|e| e.file_name().to_string_lossy().ends_with(".JPG"))
        .count();
    assert!(ledger.starts_with("file,keep\n"));
    assert_eq!(rows, moved);
    assert!(stdout.contains(&format!("Picked files : {moved} ")), "{stdout}");
}

#[test]
fn declined_prompt_moves_nothing() {
    let td = tempdir().unwrap();
    let base = fs::canonicalize(td.path()).unwrap();
    let input = base.join("pano");
    let output = input.join("VISU");
    populate(&input, 10);
    let cfg = base.join("config.json");
    write_cfg(&cfg, &input, &output, 50);

    Command::new(cargo::cargo_bin!("pano_select"))
        .arg(&cfg)
        .write_stdin("n\n")
        .assert()
        .success();
    assert!(!output.exists());
    assert_eq!(fs::read_dir(&input).unwrap().count(), 10);
}

#[test]
fn different_partition_prefix_fails() {
    let td = tempdir().unwrap();
    let base = fs::canonicalize(td.path()).unwrap();
    let input = base.join("pano");
    populate(&input, 5);
    let cfg = base.join("config.json");
    write_cfg(&cfg, &input, Path::new("Z:/elsewhere"), 50);

    let out = Command::new(cargo::cargo_bin!("pano_select"))
        .arg(&cfg)
        .arg("--yes")
        .output()
        .unwrap();
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("same partition"), "{stderr}");
    assert_eq!(fs::read_dir(&input).unwrap().count(), 5);
}

#[test]
fn missing_explicit_config_fails() {
    let td = tempdir().unwrap();
    let out = Command::new(cargo::cargo_bin!("pano_select"))
        .arg(td.path().join("nope.json"))
        .output()
        .unwrap();
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("Config file not found"));
}

#[test]
fn print_config_names_default_location_without_creating_it() {
    let td = tempdir().unwrap();
    let out = Command::new(cargo::cargo_bin!("pano_select"))
        .env_remove("PANO_SELECT_CONFIG")
        .env("XDG_CONFIG_HOME", td.path())
        .env("HOME", td.path())
        .arg("--print-config")
        .output()
        .unwrap();
    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stdout).contains("config.json"));
    assert!(!td.path().join("pano_select").exists());
}

#[cfg(target_os = "linux")]
#[test]
fn first_run_writes_template_and_exits() {
    let td = tempdir().unwrap();
    let out = Command::new(cargo::cargo_bin!("pano_select"))
        .env_remove("PANO_SELECT_CONFIG")
        .env("XDG_CONFIG_HOME", td.path())
        .output()
        .unwrap();
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    let template = td.path().join("pano_select").join("config.json");
    let body = fs::read_to_string(&template).expect("template written");
    assert!(body.contains("\"output_subfolder\""));
}

#[test]
fn env_config_is_used_when_no_argument() {
    let td = tempdir().unwrap();
    let base = fs::canonicalize(td.path()).unwrap();
    let input = base.join("pano");
    let output = input.join("VISU");
    populate(&input, 3);
    let cfg = base.join("run.json");
    write_cfg(&cfg, &input, &output, 0);

    let out = Command::new(cargo::cargo_bin!("pano_select"))
        .env("PANO_SELECT_CONFIG", &cfg)
        .arg("--yes")
        .output()
        .unwrap();
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    assert!(String::from_utf8_lossy(&out.stdout).contains("Picked files : 0 (estimated 0)"));
    assert_eq!(fs::read_to_string(output.join("panoramics.csv")).unwrap(), "file,keep\n");
}
