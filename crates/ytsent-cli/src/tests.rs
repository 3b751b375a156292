use super::*;

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["ytsent"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn parses_fetch_with_defaults() {
    let cli = Cli::try_parse_from(["ytsent", "fetch", "--url", "https://youtu.be/abc"])
        .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Fetch {
            ref url,
            max_results: None,
            output: None,
        }) if url == "https://youtu.be/abc"
    ));
}

#[test]
fn parses_fetch_with_limit_and_output() {
    let cli = Cli::try_parse_from([
        "ytsent",
        "fetch",
        "--url",
        "https://www.youtube.com/watch?v=abc",
        "--max-results",
        "250",
        "--output",
        "out.json",
    ])
    .unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Fetch {
            max_results: Some(250),
            output: Some(ref p),
            ..
        }) if p == &PathBuf::from("out.json")
    ));
}

#[test]
fn fetch_requires_url() {
    assert!(Cli::try_parse_from(["ytsent", "fetch"]).is_err());
}

#[test]
fn parses_analyze_from_file() {
    let cli = Cli::try_parse_from(["ytsent", "analyze", "--file", "comments.json"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Analyze {
            file: Some(_),
            url: None,
            coefficient: None,
            label_set: None,
            verbose: false,
            export: false,
            ..
        })
    ));
}

#[test]
fn parses_analyze_with_all_options() {
    let cli = Cli::try_parse_from([
        "ytsent",
        "analyze",
        "--url",
        "https://youtu.be/abc",
        "--max-results",
        "50",
        "--coefficient",
        "0.9",
        "--label-set",
        "five-star",
        "--verbose",
        "--export",
    ])
    .unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Analyze {
            file: None,
            url: Some(_),
            max_results: Some(50),
            coefficient: Some(c),
            label_set: Some(LabelSet::FiveStar),
            verbose: true,
            export: true,
        }) if (c - 0.9).abs() < f64::EPSILON
    ));
}

#[test]
fn analyze_requires_a_source() {
    assert!(Cli::try_parse_from(["ytsent", "analyze"]).is_err());
}

#[test]
fn analyze_rejects_both_sources() {
    let result = Cli::try_parse_from([
        "ytsent",
        "analyze",
        "--file",
        "comments.json",
        "--url",
        "https://youtu.be/abc",
    ]);
    assert!(result.is_err());
}

#[test]
fn analyze_rejects_unknown_label_set() {
    let result = Cli::try_parse_from([
        "ytsent",
        "analyze",
        "--file",
        "c.json",
        "--label-set",
        "binary",
    ]);
    assert!(result.is_err());
}

#[test]
fn parses_classify() {
    let cli = Cli::try_parse_from(["ytsent", "classify"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Classify { label_set: None })
    ));
}

#[test]
fn parses_convert() {
    let cli = Cli::try_parse_from([
        "ytsent",
        "convert",
        "--input",
        "list.txt",
        "--output",
        "list.json",
    ])
    .unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Convert { ref input, ref output })
            if input == &PathBuf::from("list.txt") && output == &PathBuf::from("list.json")
    ));
}

#[test]
fn cli_definition_is_consistent() {
    Cli::command().debug_assert();
}
