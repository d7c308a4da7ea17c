//! Focused unit tests covering configuration resolution.

use super::helpers::{Workspace, write_utf8};
use super::*;
use crate::cheapest::CheapestConfig;
use crate::inputs::{ParamOverrides, RequestSource};
use crate::logging::default_directive;
use crate::plan::{PlanConfig, config_from_layers_for_test};
use camino::Utf8PathBuf;
use ortho_config::MergeComposer;
use refuel_core::{DEFAULT_CHEAPEST_LIMIT, PlanParameters, Strategy, TieBreak};
use rstest::rstest;
use serde_json::json;

#[rstest]
#[case::no_route(None, Some("stations.json"), ARG_ROUTE, ENV_PLAN_ROUTE)]
#[case::no_stations(Some("route.json"), None, ARG_STATIONS, ENV_PLAN_STATIONS)]
fn plan_without_request_needs_both_files(
    #[case] route: Option<&str>,
    #[case] stations: Option<&str>,
    #[case] expected_field: &'static str,
    #[case] expected_env: &'static str,
) {
    let args = PlanArgs {
        route: route.map(Utf8PathBuf::from),
        stations: stations.map(Utf8PathBuf::from),
        ..PlanArgs::default()
    };
    let err = PlanConfig::try_from(args).expect_err("missing input should error");
    match err {
        CliError::MissingArgument { field, env } => {
            assert_eq!(field, expected_field);
            assert_eq!(env, expected_env);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
fn request_file_keeps_optional_replacements() {
    let args = PlanArgs {
        request_path: Some(Utf8PathBuf::from("request.json")),
        stations: Some(Utf8PathBuf::from("today.json")),
        strategy: Some(Strategy::Greedy),
        ..PlanArgs::default()
    };
    let config = PlanConfig::try_from(args).expect("config should build");
    assert_eq!(
        config.source,
        RequestSource::Request {
            path: Utf8PathBuf::from("request.json"),
            route: None,
            stations: Some(Utf8PathBuf::from("today.json")),
        }
    );
    assert_eq!(config.overrides.strategy, Some(Strategy::Greedy));
}

#[rstest]
fn cheapest_uses_the_default_limit() {
    let args = CheapestArgs {
        route: Some(Utf8PathBuf::from("route.json")),
        stations: Some(Utf8PathBuf::from("stations.json")),
        ..CheapestArgs::default()
    };
    let config = CheapestConfig::try_from(args).expect("config should build");
    assert_eq!(config.limit, DEFAULT_CHEAPEST_LIMIT);
    assert_eq!(config.overrides, ParamOverrides::default());
}

#[rstest]
fn overrides_only_touch_set_values() {
    let mut params = PlanParameters::default();
    ParamOverrides {
        tank_capacity_l: Some(70.0),
        include_restricted: Some(true),
        tie_break: Some(TieBreak::Nearest),
        ..ParamOverrides::default()
    }
    .apply(&mut params);

    let expected = PlanParameters {
        tank_capacity_l: 70.0,
        include_restricted: true,
        tie_break: TieBreak::Nearest,
        ..PlanParameters::default()
    };
    assert_eq!(params, expected);
}

#[rstest]
#[case(0, "warn")]
#[case(1, "info")]
#[case(2, "debug")]
#[case(7, "debug")]
fn verbosity_selects_the_log_level(#[case] verbosity: u8, #[case] expected: &str) {
    assert_eq!(default_directive(verbosity), expected);
}

#[rstest]
fn validate_sources_reports_missing_files() {
    let workspace = Workspace::new();
    let route = workspace.write_route("route.json");
    let stations = workspace.path("stations.json");
    let source = RequestSource::Parts {
        route,
        stations: stations.clone(),
    };

    let err = source.validate_sources().expect_err("missing stations");
    match err {
        CliError::MissingSourceFile { field, path } => {
            assert_eq!(field, ARG_STATIONS);
            assert_eq!(path, stations);
        }
        other => panic!("expected MissingSourceFile, found {other:?}"),
    }
}

#[rstest]
fn validate_sources_reports_not_file() {
    let workspace = Workspace::new();
    let request = workspace.path("request.json");
    std::fs::create_dir(request.as_std_path()).expect("request directory");
    let source = RequestSource::Request {
        path: request.clone(),
        route: None,
        stations: None,
    };

    let err = source.validate_sources().expect_err("directory is not a file");
    match err {
        CliError::SourcePathNotFile { field, path } => {
            assert_eq!(field, ARG_REQUEST);
            assert_eq!(path, request);
        }
        other => panic!("expected SourcePathNotFile, found {other:?}"),
    }
}

#[rstest]
fn malformed_station_files_name_the_input() {
    let workspace = Workspace::new();
    let route = workspace.write_route("route.json");
    let stations = workspace.path("stations.json");
    write_utf8(&stations, b"{ not json");
    let source = RequestSource::Parts {
        route,
        stations: stations.clone(),
    };

    let err = source
        .load(ParamOverrides::default())
        .expect_err("invalid station file");
    match err {
        CliError::LoadInput { field, path, .. } => {
            assert_eq!(field, ARG_STATIONS);
            assert_eq!(path, stations);
        }
        other => panic!("expected LoadInput, found {other:?}"),
    }
}

#[rstest]
fn merge_layers_maps_configuration_errors() {
    let mut composer = MergeComposer::new();
    composer.push_cli(json!({ "request_path": 42 }));

    let err = config_from_layers_for_test(composer.layers())
        .expect_err("invalid config layer should map to CliError::Configuration");
    match err {
        CliError::Configuration(_) => {}
        other => panic!("expected CliError::Configuration, found {other:?}"),
    }
}

#[rstest]
fn merge_layers_honours_precedence() {
    let mut composer = MergeComposer::new();
    composer.push_file(
        json!({
            "tank_capacity": 40.0,
            "strategy": "greedy",
            "stations": "from-file-stations.json",
        }),
        None,
    );
    composer.push_environment(json!({
        "route": "from-env-route.json",
        "tank_capacity": 45.0,
    }));
    composer.push_cli(json!({
        "tank_capacity": 55.0,
    }));

    let config =
        config_from_layers_for_test(composer.layers()).expect("merged config should build");
    assert_eq!(
        config.source,
        RequestSource::Parts {
            route: Utf8PathBuf::from("from-env-route.json"),
            stations: Utf8PathBuf::from("from-file-stations.json"),
        }
    );
    assert_eq!(config.overrides.tank_capacity_l, Some(55.0));
    assert_eq!(config.overrides.strategy, Some(Strategy::Greedy));
    assert_eq!(config.overrides.current_fuel_percent, None);
}
