use super::*;

#[test]
fn parses_features_with_filters() {
    let cli = Cli::try_parse_from([
        "evads",
        "features",
        "--vehicle",
        "VW ID.4",
        "--market",
        "Germany",
    ])
    .expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Commands::Features {
            vehicle: Some(ref v),
            market: Some(ref m),
        } if v == "VW ID.4" && m == "Germany"
    ));
}

#[test]
fn parses_mentions_category_by_display_name() {
    let cli = Cli::try_parse_from(["evads", "mentions", "--category", "range & charging"])
        .expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Commands::Mentions {
            category: FeatureCategory::RangeCharging,
            vehicle: None,
            all: false,
        }
    ));
}

#[test]
fn mentions_rejects_unknown_category() {
    let result = Cli::try_parse_from(["evads", "mentions", "--category", "Horsepower"]);
    assert!(result.is_err());
}

#[test]
fn mentions_requires_category() {
    let result = Cli::try_parse_from(["evads", "mentions", "--all"]);
    assert!(result.is_err());
}

#[test]
fn global_data_and_taxonomy_flags_follow_subcommand() {
    let cli = Cli::try_parse_from([
        "evads",
        "markets",
        "--data",
        "/tmp/chunks",
        "--taxonomy",
        "config/taxonomy.yaml",
    ])
    .expect("expected valid cli args");

    assert_eq!(cli.data, Some(PathBuf::from("/tmp/chunks")));
    assert_eq!(cli.taxonomy, Some(PathBuf::from("config/taxonomy.yaml")));
    assert!(matches!(cli.command, Commands::Markets { market: None }));
}

#[test]
fn parses_vehicle_detail_request() {
    let cli = Cli::try_parse_from(["evads", "vehicles", "--vehicle", "Tesla Model Y"])
        .expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Commands::Vehicles {
            market: None,
            vehicle: Some(_),
        }
    ));
}

#[test]
fn parses_report_and_export_paths() {
    let report = Cli::try_parse_from(["evads", "report", "--out", "report.md"])
        .expect("expected valid cli args");
    assert!(matches!(report.command, Commands::Report { out: Some(_) }));

    let export = Cli::try_parse_from(["evads", "export"]).expect("expected valid cli args");
    assert!(matches!(export.command, Commands::Export { dir: None }));
}

#[test]
fn parses_themes() {
    let cli = Cli::try_parse_from(["evads", "themes"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Commands::Themes));
}

#[test]
fn subcommand_is_required() {
    assert!(Cli::try_parse_from(["evads"]).is_err());
}

#[test]
fn filter_suffix_describes_active_filters() {
    assert_eq!(session::filter_suffix(None, None), "");
    assert_eq!(
        session::filter_suffix(Some("VW ID.4"), Some("Portugal")),
        " for vehicle VW ID.4 in market Portugal"
    );
}
