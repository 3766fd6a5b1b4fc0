use super::*;

fn game(winner: Option<Side>) -> GameRecord {
    GameRecord {
        black: "Hard".to_string(),
        white: "Normal".to_string(),
        moves: vec!["f5".to_string(), "d6".to_string()],
        opening_plies: 0,
        black_discs: 40,
        white_discs: 24,
        winner,
        forfeit: None,
    }
}

#[test]
fn test_match_score() {
    let mut result = MatchResult::new();
    assert_eq!(result.score(), 0.5);
    result.record(GameResult::Win);
    result.record(GameResult::Win);
    result.record(GameResult::Draw);
    result.record(GameResult::Loss);
    assert_eq!(result.total_games(), 4);
    assert!((result.score() - 0.625).abs() < 1e-9);
}

#[test]
fn test_result_for_each_side() {
    let won = game(Some(Side::Black));
    assert_eq!(won.result_for(Side::Black), GameResult::Win);
    assert_eq!(won.result_for(Side::White), GameResult::Loss);
    assert_eq!(game(None).result_for(Side::White), GameResult::Draw);
    assert_eq!(GameResult::Loss.reverse(), GameResult::Win);
}

#[test]
fn test_report_round_trips_through_json() {
    let mut report = MatchReport::new("Hard", "Normal", MatchConfig::default());
    report.games.push(game(Some(Side::Black)));
    report.result.record(GameResult::Win);

    let path = std::env::temp_dir().join(format!("othello-report-{}.json", std::process::id()));
    report.save(&path).expect("save report");
    let loaded = MatchReport::load(&path).expect("load report");
    let _ = std::fs::remove_file(&path);

    assert_eq!(loaded.games, report.games);
    assert_eq!(loaded.result, report.result);
    assert_eq!(loaded.config.num_games, report.config.num_games);

    let text = loaded.generate_report();
    assert!(text.contains("Hard vs Normal"));
    assert!(text.contains("1 wins, 0 losses, 0 draws"));
}

#[test]
fn test_load_reports_missing_file() {
    let err = MatchReport::load(Path::new("/nonexistent/report.json")).unwrap_err();
    assert!(err.to_string().contains("failed to read"));
}
