use assert_cmd::Command;
use predicates::str::{contains, is_empty};
use tempfile::TempDir;

// Runs the binary with an isolated config location and no SPOT_* overrides.
fn spot(config_home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("spot").unwrap();
    cmd.env("XDG_CONFIG_HOME", config_home.path())
        .env("NO_COLOR", "1")
        .env_remove("SPOT_HOURS")
        .env_remove("SPOT_LOG");
    cmd
}

#[test]
fn help_lists_query_flags() {
    let home = TempDir::new().unwrap();
    spot(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("--region"))
        .stdout(contains("--instance-type"))
        .stdout(contains("--hours"));
}

#[test]
fn missing_region_is_a_usage_error() {
    let home = TempDir::new().unwrap();
    spot(&home)
        .args(["--instance-type", "m5.large"])
        .assert()
        .code(2)
        .stderr(contains("--region"));
}

#[test]
fn zero_hours_is_invalid_argument() {
    let home = TempDir::new().unwrap();
    spot(&home)
        .args(["--region", "us-east-1", "--instance-type", "m5.large", "--hours", "0"])
        .assert()
        .code(2)
        .stderr(contains("Invalid argument"))
        .stderr(contains("--hours must be a positive integer"));
}

#[test]
fn negative_hours_is_invalid_argument() {
    let home = TempDir::new().unwrap();
    spot(&home)
        .args(["--region", "us-east-1", "--instance-type", "m5.large", "--hours", "-12"])
        .assert()
        .code(2)
        .stderr(contains("Invalid argument"));
}

#[test]
fn non_numeric_hours_is_rejected() {
    let home = TempDir::new().unwrap();
    spot(&home)
        .args(["--region", "us-east-1", "--instance-type", "m5.large", "--hours", "twelve"])
        .assert()
        .code(2);
}

#[test]
fn availability_zone_outside_region_is_rejected() {
    let home = TempDir::new().unwrap();
    spot(&home)
        .args([
            "--region",
            "us-east-1",
            "--instance-type",
            "m5.large",
            "--availability-zone",
            "eu-west-1a",
        ])
        .assert()
        .code(2)
        .stderr(contains("not in region"));
}

#[test]
fn unknown_product_description_is_rejected() {
    let home = TempDir::new().unwrap();
    spot(&home)
        .args([
            "--region",
            "us-east-1",
            "--instance-type",
            "m5.large",
            "--product-description",
            "Plan9",
        ])
        .assert()
        .code(2);
}

#[test]
fn missing_config_file_fails() {
    let home = TempDir::new().unwrap();
    let missing = home.path().join("absent.toml");
    spot(&home)
        .args(["--region", "us-east-1", "--instance-type", "m5.large", "--config"])
        .arg(&missing)
        .assert()
        .code(1)
        .stderr(contains("config"));
}

#[test]
fn invalid_hours_in_config_file_is_invalid_argument() {
    let home = TempDir::new().unwrap();
    let config = home.path().join("spot.toml");
    std::fs::write(&config, "hours = -4\n").unwrap();

    spot(&home)
        .args(["--region", "us-east-1", "--instance-type", "m5.large", "--config"])
        .arg(&config)
        .assert()
        .code(2)
        .stderr(contains("--hours must be a positive integer"));
}

#[test]
fn status_lines_stay_off_stdout() {
    let home = TempDir::new().unwrap();
    let missing = home.path().join("missing");
    spot(&home)
        .env("AWS_CONFIG_FILE", &missing)
        .env("AWS_SHARED_CREDENTIALS_FILE", &missing)
        .env("AWS_EC2_METADATA_DISABLED", "true")
        .env_remove("AWS_ACCESS_KEY_ID")
        .env_remove("AWS_SECRET_ACCESS_KEY")
        .env_remove("AWS_SESSION_TOKEN")
        .env_remove("AWS_PROFILE")
        .env_remove("AWS_WEB_IDENTITY_TOKEN_FILE")
        .env_remove("AWS_ROLE_ARN")
        .env_remove("AWS_CONTAINER_CREDENTIALS_RELATIVE_URI")
        .env_remove("AWS_CONTAINER_CREDENTIALS_FULL_URI")
        .args([
            "--region",
            "us-east-1",
            "--instance-type",
            "m5.large",
            "--timeout-secs",
            "5",
        ])
        .assert()
        .failure()
        .stdout(is_empty())
        .stderr(contains("[INFO]"))
        .stderr(contains("Fetching spot price history for m5.large in us-east-1"));
}

#[test]
fn verbose_logs_configuration_source() {
    let home = TempDir::new().unwrap();
    let config = home.path().join("spot.toml");
    std::fs::write(&config, "hours = 0\n").unwrap();

    spot(&home)
        .args([
            "--region",
            "us-east-1",
            "--instance-type",
            "m5.large",
            "--verbose",
            "--config",
        ])
        .arg(&config)
        .assert()
        .code(2)
        .stdout(is_empty())
        .stderr(contains("Loaded configuration"))
        .stderr(contains("spot.toml"));
}
