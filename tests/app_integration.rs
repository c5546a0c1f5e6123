use anyhow::Result;
use fxconv::core::PreferenceStore;
use fxconv::core::prefs::{FOR_CURRENCY, HOM_CURRENCY};
use fxconv::store::disk::DiskPreferences;
use std::fs;
use std::path::Path;
use tempfile::TempDir;
use tracing::info;

mod test_utils {
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    pub const LATEST_RESPONSE: &str = r#"{
        "disclaimer": "Usage subject to terms",
        "license": "https://openexchangerates.org/license",
        "timestamp": 1700000000,
        "base": "USD",
        "rates": {
            "CNY": 6.5,
            "EUR": 0.9,
            "GBP": 0.8,
            "USD": 1
        }
    }"#;

    pub async fn create_mock_server() -> MockServer {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/latest.json"))
            .and(query_param("app_id", "integration-key"))
            .respond_with(ResponseTemplate::new(200).set_body_string(LATEST_RESPONSE))
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/currencies.json"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"CNY": "Chinese Yuan", "EUR": "Euro", "GBP": "British Pound Sterling", "USD": "United States Dollar"}"#,
            ))
            .mount(&mock_server)
            .await;

        mock_server
    }
}

/// Writes a config and key file into `dir`, returning the config path.
fn write_config(dir: &Path, base_url: &str, key: Option<&str>) -> Result<String> {
    let key_path = dir.join("keys.properties");
    if let Some(key) = key {
        fs::write(&key_path, format!("# test key\nopen_key={key}\n"))?;
    }

    let config_path = dir.join("config.yaml");
    let config_content = format!(
        r#"
        providers:
          openexchangerates:
            base_url: {}
        key_file: {}
        data_path: {}
    "#,
        base_url,
        key_path.display(),
        dir.join("data").display()
    );
    fs::write(&config_path, config_content)?;
    Ok(config_path.to_string_lossy().into_owned())
}

fn stored(dir: &Path, key: &str) -> Result<Option<String>> {
    let prefs = DiskPreferences::open(&dir.join("data"))?;
    prefs.get_string(key)
}

#[test_log::test(tokio::test)]
async fn test_convert_flow_persists_selection() -> Result<()> {
    let mock_server = test_utils::create_mock_server().await;
    let dir = TempDir::new()?;
    let config_path = write_config(dir.path(), &mock_server.uri(), Some("integration-key"))?;

    let result = fxconv::run_command(
        fxconv::AppCommand::Convert {
            amount: "100".to_string(),
            from: Some("EUR".to_string()),
            to: Some("GBP".to_string()),
        },
        Some(&config_path),
        false,
    )
    .await;
    assert!(result.is_ok(), "Convert failed with: {:?}", result.err());

    assert_eq!(stored(dir.path(), FOR_CURRENCY)?.as_deref(), Some("EUR"));
    assert_eq!(stored(dir.path(), HOM_CURRENCY)?.as_deref(), Some("GBP"));
    Ok(())
}

#[test_log::test(tokio::test)]
async fn test_first_run_seeds_default_pair() -> Result<()> {
    let mock_server = test_utils::create_mock_server().await;
    let dir = TempDir::new()?;
    let config_path = write_config(dir.path(), &mock_server.uri(), Some("integration-key"))?;

    fxconv::run_command(
        fxconv::AppCommand::Convert {
            amount: "1".to_string(),
            from: None,
            to: None,
        },
        Some(&config_path),
        false,
    )
    .await?;

    assert_eq!(stored(dir.path(), FOR_CURRENCY)?.as_deref(), Some("USD"));
    assert_eq!(stored(dir.path(), HOM_CURRENCY)?.as_deref(), Some("CNY"));
    Ok(())
}

#[test_log::test(tokio::test)]
async fn test_conversion_errors_are_reported_not_fatal() -> Result<()> {
    let mock_server = test_utils::create_mock_server().await;
    let dir = TempDir::new()?;
    let config_path = write_config(dir.path(), &mock_server.uri(), Some("integration-key"))?;

    for (amount, to) in [("not-a-number", "CNY"), ("5", "JPY")] {
        info!(amount, to, "Running failing conversion");
        let result = fxconv::run_command(
            fxconv::AppCommand::Convert {
                amount: amount.to_string(),
                from: None,
                to: Some(to.to_string()),
            },
            Some(&config_path),
            true,
        )
        .await;
        assert!(result.is_ok(), "Expected a reported error, got {result:?}");
    }

    // Ephemeral runs leave nothing behind
    assert!(stored(dir.path(), HOM_CURRENCY)?.is_none());
    Ok(())
}

#[test_log::test(tokio::test)]
async fn test_missing_key_file_fails() -> Result<()> {
    let mock_server = test_utils::create_mock_server().await;
    let dir = TempDir::new()?;
    let config_path = write_config(dir.path(), &mock_server.uri(), None)?;

    let result = fxconv::run_command(
        fxconv::AppCommand::Convert {
            amount: "1".to_string(),
            from: None,
            to: None,
        },
        Some(&config_path),
        true,
    )
    .await;

    let err = result.expect_err("conversion without a key should fail");
    assert!(format!("{err:#}").contains("fxconv setup"));
    Ok(())
}

#[test_log::test(tokio::test)]
async fn test_select_and_invert_across_runs() -> Result<()> {
    let dir = TempDir::new()?;
    // Selection never touches the network
    let config_path = write_config(dir.path(), "http://127.0.0.1:9", None)?;

    fxconv::run_command(
        fxconv::AppCommand::Select {
            from: Some("gbp".to_string()),
            to: Some("EUR".to_string()),
        },
        Some(&config_path),
        false,
    )
    .await?;
    fxconv::run_command(fxconv::AppCommand::Invert, Some(&config_path), false).await?;

    assert_eq!(stored(dir.path(), FOR_CURRENCY)?.as_deref(), Some("EUR"));
    assert_eq!(stored(dir.path(), HOM_CURRENCY)?.as_deref(), Some("GBP"));
    Ok(())
}

#[test_log::test(tokio::test)]
async fn test_currencies_listing() -> Result<()> {
    let mock_server = test_utils::create_mock_server().await;
    let dir = TempDir::new()?;
    let config_path = write_config(dir.path(), &mock_server.uri(), Some("integration-key"))?;

    let result =
        fxconv::run_command(fxconv::AppCommand::Currencies, Some(&config_path), true).await;
    assert!(result.is_ok(), "Listing failed with: {:?}", result.err());
    Ok(())
}
