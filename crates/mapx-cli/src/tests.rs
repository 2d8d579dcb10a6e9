use super::*;

#[test]
fn no_command_is_interactive() {
    let cli = Cli::try_parse_from(["mapx-cli"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
    assert!(!cli.no_location);
}

#[test]
fn parses_multi_word_ask_prompt() {
    let cli = Cli::try_parse_from(["mapx-cli", "ask", "best", "ramen", "nearby"])
        .expect("expected valid cli args");

    match cli.command {
        Some(Commands::Ask { prompt, json }) => {
            assert_eq!(prompt.join(" "), "best ramen nearby");
            assert!(!json);
        }
        other => panic!("expected ask command, got {other:?}"),
    }
}

#[test]
fn parses_ask_json_flag() {
    let cli = Cli::try_parse_from(["mapx-cli", "ask", "--json", "coffee"]).unwrap();
    assert!(matches!(cli.command, Some(Commands::Ask { json: true, .. })));
}

#[test]
fn ask_requires_a_prompt() {
    assert!(Cli::try_parse_from(["mapx-cli", "ask"]).is_err());
}

#[test]
fn parses_negative_coordinates() {
    let cli = Cli::try_parse_from([
        "mapx-cli", "--lat", "-33.8688", "--lng", "151.2093", "ask", "beaches",
    ])
    .unwrap();
    assert_eq!(cli.lat, Some(-33.8688));
    assert_eq!(cli.lng, Some(151.2093));
}

#[test]
fn lat_without_lng_is_rejected() {
    assert!(Cli::try_parse_from(["mapx-cli", "--lat", "10"]).is_err());
}

#[test]
fn no_location_conflicts_with_coordinates() {
    assert!(
        Cli::try_parse_from(["mapx-cli", "--no-location", "--lat", "1", "--lng", "2"]).is_err()
    );
}

fn empty_config() -> AppConfig {
    AppConfig {
        env: mapx_core::Environment::Test,
        log_level: "info".to_string(),
        gemini_base_url: "http://localhost".to_string(),
        user_agent: "mapx-test".to_string(),
        fixed_location: None,
        geolocation_url: None,
        location_timeout_ms: 10_000,
    }
}

#[test]
fn cli_coordinates_override_config() {
    let cli = Cli::try_parse_from(["mapx-cli", "--lat", "1.5", "--lng", "2.5"]).unwrap();
    let mut config = empty_config();
    config.geolocation_url = Some("http://localhost/locate".to_string());

    let geolocator = select_geolocator(&cli, &config).unwrap();
    assert!(matches!(geolocator, Some(DeviceGeolocator::Fixed(_))));
}

#[test]
fn out_of_range_cli_coordinates_are_rejected() {
    let cli = Cli::try_parse_from(["mapx-cli", "--lat", "95", "--lng", "0"]).unwrap();
    assert!(select_geolocator(&cli, &empty_config()).is_err());
}

#[test]
fn no_configured_capability_yields_none() {
    let cli = Cli::try_parse_from(["mapx-cli"]).unwrap();
    assert!(select_geolocator(&cli, &empty_config()).unwrap().is_none());
}
