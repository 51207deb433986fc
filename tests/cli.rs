use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use ulid::Ulid;

fn data_file() -> PathBuf {
    let dir = std::env::temp_dir().join(format!("datebook_cli_test_{}", Ulid::new()));
    fs::create_dir_all(&dir).unwrap();
    dir.join("appointments.json")
}

fn datebook(file: &Path, args: &[&str], stdin: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_datebook"))
        .arg("--file")
        .arg(file)
        .args(args)
        .env_remove("DATEBOOK_FILE")
        .env_remove("DATEBOOK_HORIZON_DAYS")
        .env_remove("DATEBOOK_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    // The child may exit before reading everything.
    let _ = child.stdin.take().unwrap().write_all(stdin.as_bytes());
    child.wait_with_output().unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn one_shot_add_and_conflict_exit_codes() {
    let file = data_file();
    let add = |title: &str, start: &str, end: &str, extra: &[&str]| {
        let mut args = vec![
            "add", "--title", title, "--date", "2030-01-15", "--start", start, "--end", end,
        ];
        args.extend_from_slice(extra);
        datebook(&file, &args, "")
    };

    let first = add("Dentist", "09:00", "10:00", &[]);
    assert_eq!(first.status.code(), Some(0));
    assert_eq!(stdout(&first).trim().len(), 26);

    let clash = add("Gym", "09:30", "10:30", &[]);
    assert_eq!(clash.status.code(), Some(1));
    let warning = "Warning: this appointment conflicts with:";
    assert!(stdout(&clash).contains(warning));
    let stderr = String::from_utf8_lossy(&clash.stderr);
    assert!(stderr.contains("error: conflicts with 1 appointment(s)"));

    let forced = add("Gym", "09:30", "10:30", &["--force"]);
    assert_eq!(forced.status.code(), Some(0));

    let listing = datebook(&file, &["date", "2030-01-15"], "");
    assert_eq!(listing.status.code(), Some(0));
    let text = stdout(&listing);
    let dentist = text.find("Dentist").unwrap();
    let gym = text.find("Gym").unwrap();
    assert!(dentist < gym);
}

#[test]
fn usage_errors_exit_2() {
    let file = data_file();
    let output = datebook(&file, &["date", "tomorrow-ish"], "");
    assert_eq!(output.status.code(), Some(2));
    assert!(!file.exists());
}

#[test]
fn piped_session_runs_to_goodbye() {
    let file = data_file();
    let output = datebook(&file, &[], "add\nCall\n2030-01-15\n14:00\n30m\n\n\nquit\n");
    assert_eq!(output.status.code(), Some(0));
    let text = stdout(&output);
    assert!(text.contains("Appointment 'Call' added with id"));
    assert!(text.trim_end().ends_with("Goodbye!"));

    let saved = fs::read_to_string(&file).unwrap();
    assert!(saved.contains("\"start_time\": \"14:00\""));
    assert!(saved.contains("\"end_time\": \"14:30\""));
}

#[test]
fn corrupt_file_declined_exits_1() {
    let file = data_file();
    fs::write(&file, "{").unwrap();
    let output = datebook(&file, &[], "n\n");
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(fs::read_to_string(&file).unwrap(), "{");
}
