use super::*;

#[test]
fn parses_search_with_defaults() {
    let cli = Cli::try_parse_from(["tpscrape", "search", "burger"]).expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Commands::Search {
            ref query,
            count: 10,
            country: None,
            ref require,
            reviews: None,
        } if query == "burger" && require.is_empty()
    ));
}

#[test]
fn parses_search_with_all_options() {
    let cli = Cli::try_parse_from([
        "tpscrape",
        "search",
        "city: Oslo, country: Norway",
        "--count",
        "3",
        "--country",
        "norge",
        "--require",
        "email,Phone",
        "--reviews",
        "5",
    ])
    .expect("expected valid cli args");

    let Commands::Search {
        query,
        count,
        country,
        require,
        reviews,
    } = cli.command
    else {
        panic!("expected search command");
    };
    assert_eq!(query, "city: Oslo, country: Norway");
    assert_eq!(count, 3);
    assert_eq!(country.as_deref(), Some("norge"));
    assert_eq!(
        require,
        vec![RequiredAttribute::Email, RequiredAttribute::Phone]
    );
    assert_eq!(reviews, Some(5));
}

#[test]
fn rejects_unknown_required_attribute() {
    let result = Cli::try_parse_from(["tpscrape", "search", "burger", "--require", "fax"]);
    assert!(result.is_err());
}

#[test]
fn parses_company_command() {
    let cli = Cli::try_parse_from([
        "tpscrape",
        "company",
        "https://no.trustpilot.com/review/burger-bangs.no?languages=all",
        "--reviews",
        "2",
    ])
    .expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Commands::Company {
            ref source,
            reviews: Some(2),
        } if source.ends_with("burger-bangs.no?languages=all")
    ));
}

#[test]
fn parses_company_command_from_saved_page() {
    let cli = Cli::try_parse_from(["tpscrape", "company", "saved/burger-bangs.html"])
        .expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Commands::Company { ref source, reviews: None } if source == "saved/burger-bangs.html"
    ));
}

#[test]
fn parses_reviews_command_with_default_count() {
    let cli =
        Cli::try_parse_from(["tpscrape", "reviews", "saved/page.html"]).expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Commands::Reviews { ref source, count: 20 } if source == "saved/page.html"
    ));
}

#[test]
fn parses_countries_command() {
    let cli = Cli::try_parse_from(["tpscrape", "countries"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Commands::Countries));
}

#[test]
fn subcommand_is_required() {
    assert!(Cli::try_parse_from(["tpscrape"]).is_err());
}
