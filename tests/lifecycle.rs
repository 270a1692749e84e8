//! Integration tests for the tournament lifecycle: registration, generation,
//! regeneration and result validation through the service.

use tournament_brackets::{
    BracketType, ErrorKind, MatchKey, MemoryStore, NewTournament, Seeder, SlotState, TeamId,
    TournamentError, TournamentId, TournamentService,
};
use uuid::Uuid;

fn service() -> TournamentService<MemoryStore> {
    TournamentService::new(MemoryStore::new(), Seeder::with_seed(5))
}

fn tournament_with_teams(
    service: &TournamentService<MemoryStore>,
    bracket_type: BracketType,
    n: usize,
) -> (TournamentId, Vec<TeamId>) {
    let t = service
        .create_tournament(NewTournament::new("Cup", bracket_type, 16))
        .unwrap();
    let teams: Vec<TeamId> = (0..n).map(|_| Uuid::new_v4()).collect();
    for &team in &teams {
        service.register_team(t.id, team).unwrap();
    }
    (t.id, teams)
}

#[test]
fn one_team_is_too_few() {
    let s = service();
    let (id, _) = tournament_with_teams(&s, BracketType::SingleElimination, 1);
    let err = s.generate_bracket(id).unwrap_err();
    assert!(matches!(
        err,
        TournamentError::TooFewParticipants { registered: 1 }
    ));
    assert_eq!(err.kind(), ErrorKind::Precondition);
    assert!(s.matches(id).unwrap().is_empty());
    assert!(!s.tournament(id).unwrap().is_started);
}

#[test]
fn generating_twice_is_rejected() {
    let s = service();
    let (id, _) = tournament_with_teams(&s, BracketType::SingleElimination, 4);
    s.generate_bracket(id).unwrap();
    let before = s.matches(id).unwrap();

    assert!(matches!(
        s.generate_bracket(id),
        Err(TournamentError::AlreadyStarted)
    ));
    assert_eq!(s.matches(id).unwrap(), before);
}

#[test]
fn generation_marks_started_and_snapshots_structure() {
    let s = service();
    let (id, _) = tournament_with_teams(&s, BracketType::SingleElimination, 4);
    let structure = s.generate_bracket(id).unwrap();

    let t = s.tournament(id).unwrap();
    assert!(t.is_started);
    assert!(!t.is_completed);
    assert_eq!(t.bracket_structure.as_ref(), Some(&structure));
    assert_eq!(s.bracket(id).unwrap(), structure);
}

#[test]
fn regenerate_replaces_the_whole_bracket() {
    let s = service();
    let (id, _) = tournament_with_teams(&s, BracketType::SingleElimination, 8);
    s.generate_bracket(id).unwrap();
    let first: Vec<Uuid> = s.matches(id).unwrap().iter().map(|m| m.id).collect();

    s.regenerate_bracket(id).unwrap();
    let second = s.matches(id).unwrap();
    assert_eq!(second.len(), first.len());
    assert!(second.iter().all(|m| !first.contains(&m.id)));
    assert!(s.tournament(id).unwrap().is_started);
}

#[test]
fn regenerate_after_a_result_is_rejected() {
    let s = service();
    let (id, _) = tournament_with_teams(&s, BracketType::SingleElimination, 4);
    s.generate_bracket(id).unwrap();
    let m = s.get_match(id, MatchKey::winners(1, 1)).unwrap();
    s.report_winner(id, m.id, m.team_1.team().unwrap()).unwrap();
    let before = s.matches(id).unwrap();

    let err = s.regenerate_bracket(id).unwrap_err();
    assert!(matches!(err, TournamentError::ResultsAlreadyReported));
    assert_eq!(err.kind(), ErrorKind::Precondition);
    assert_eq!(s.matches(id).unwrap(), before);
}

#[test]
fn byes_do_not_block_regeneration() {
    let s = service();
    let (id, _) = tournament_with_teams(&s, BracketType::SingleElimination, 5);
    s.generate_bracket(id).unwrap();
    assert!(s.matches(id).unwrap().iter().any(|m| m.is_completed));
    s.regenerate_bracket(id).unwrap();
}

#[test]
fn registration_rules() {
    let s = service();
    let t = s
        .create_tournament(NewTournament::new("Small", BracketType::RoundRobin, 2))
        .unwrap();
    let a = Uuid::new_v4();
    let b = Uuid::new_v4();

    s.register_team(t.id, a).unwrap();
    let dup = s.register_team(t.id, a).unwrap_err();
    assert!(matches!(dup, TournamentError::AlreadyRegistered(team) if team == a));
    assert_eq!(dup.kind(), ErrorKind::Conflict);

    s.register_team(t.id, b).unwrap();
    assert!(matches!(
        s.register_team(t.id, Uuid::new_v4()),
        Err(TournamentError::TournamentFull { capacity: 2 })
    ));
    assert_eq!(s.participants(t.id).unwrap().len(), 2);
}

#[test]
fn registration_closes_once_started() {
    let s = service();
    let (id, _) = tournament_with_teams(&s, BracketType::RoundRobin, 3);
    s.generate_bracket(id).unwrap();
    assert!(matches!(
        s.register_team(id, Uuid::new_v4()),
        Err(TournamentError::AlreadyStarted)
    ));
}

#[test]
fn csv_import_is_all_or_nothing() {
    let s = service();
    let (id, teams) = tournament_with_teams(&s, BracketType::SingleElimination, 1);
    let fresh = Uuid::new_v4();
    let csv = format!("team_id\n{fresh}\n{}\n", teams[0]);

    assert!(matches!(
        s.import_participants_csv(id, csv.as_bytes()),
        Err(TournamentError::AlreadyRegistered(team)) if team == teams[0]
    ));
    assert_eq!(s.participants(id).unwrap().len(), 1);

    let ok = format!("team_id\n{fresh}\n{}\n", Uuid::new_v4());
    assert_eq!(s.import_participants_csv(id, ok.as_bytes()).unwrap().len(), 2);
    assert_eq!(s.participants(id).unwrap().len(), 3);
}

#[test]
fn completed_match_cannot_be_reported_again() {
    let s = service();
    let (id, _) = tournament_with_teams(&s, BracketType::SingleElimination, 4);
    s.generate_bracket(id).unwrap();
    let m = s.get_match(id, MatchKey::winners(1, 1)).unwrap();
    let (one, two) = m.teams().unwrap();
    s.report_winner(id, m.id, one).unwrap();
    let before = s.matches(id).unwrap();

    let err = s.report_winner(id, m.id, two).unwrap_err();
    assert!(matches!(err, TournamentError::AlreadyCompleted(mid) if mid == m.id));
    assert_eq!(s.matches(id).unwrap(), before);
}

#[test]
fn winner_must_be_playing_in_the_match() {
    let s = service();
    let (id, teams) = tournament_with_teams(&s, BracketType::SingleElimination, 4);
    s.generate_bracket(id).unwrap();
    let m = s.get_match(id, MatchKey::winners(1, 1)).unwrap();
    let outsider = teams
        .iter()
        .copied()
        .find(|&t| m.position_of(t).is_none())
        .unwrap();

    assert!(matches!(
        s.report_winner(id, m.id, outsider),
        Err(TournamentError::InvalidWinner { team, .. }) if team == outsider
    ));
    assert!(matches!(
        s.report_winner(id, m.id, Uuid::new_v4()),
        Err(TournamentError::InvalidWinner { .. })
    ));
}

#[test]
fn match_waiting_for_an_opponent_is_not_ready() {
    let s = service();
    let (id, _) = tournament_with_teams(&s, BracketType::SingleElimination, 4);
    s.generate_bracket(id).unwrap();
    let first = s.get_match(id, MatchKey::winners(1, 1)).unwrap();
    let winner = first.team_1.team().unwrap();
    s.report_winner(id, first.id, winner).unwrap();

    let final_match = s.get_match(id, MatchKey::winners(2, 1)).unwrap();
    assert_eq!(final_match.team_2, SlotState::Pending);
    assert!(matches!(
        s.report_winner(id, final_match.id, winner),
        Err(TournamentError::MatchNotReady(mid)) if mid == final_match.id
    ));
}

#[test]
fn unknown_ids_are_not_found() {
    let s = service();
    let (id, teams) = tournament_with_teams(&s, BracketType::SingleElimination, 2);
    s.generate_bracket(id).unwrap();

    let err = s.tournament(Uuid::new_v4()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert!(matches!(
        s.report_winner(id, Uuid::new_v4(), teams[0]),
        Err(TournamentError::MatchNotFound(_))
    ));
    assert!(matches!(
        s.get_match(id, MatchKey::winners(5, 1)),
        Err(TournamentError::MatchKeyNotFound(_))
    ));
}

#[test]
fn invalid_tournament_requests_are_rejected() {
    let s = service();
    assert_eq!(
        s.create_tournament(NewTournament::new("", BracketType::RoundRobin, 4))
            .unwrap_err()
            .kind(),
        ErrorKind::Validation
    );
    assert_eq!(
        s.create_tournament(NewTournament::new("Solo", BracketType::RoundRobin, 1))
            .unwrap_err()
            .kind(),
        ErrorKind::Validation
    );
    assert!(s.tournaments().unwrap().is_empty());
}

#[test]
fn double_elimination_rejects_odd_field_at_generation() {
    let s = service();
    let (id, _) = tournament_with_teams(&s, BracketType::DoubleElimination, 6);
    let err = s.generate_bracket(id).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Configuration);
    assert!(!s.tournament(id).unwrap().is_started);
    assert!(s.matches(id).unwrap().is_empty());
}

#[test]
fn schedule_overflow_is_rejected_without_poisoning_the_tournament() {
    let s = service();
    let mut req = NewTournament::new("Forever", BracketType::SingleElimination, 8);
    req.round_spacing_hours = u32::MAX;
    let t = s.create_tournament(req).unwrap();
    for _ in 0..4 {
        s.register_team(t.id, Uuid::new_v4()).unwrap();
    }

    let err = s.generate_bracket(t.id).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);

    let after = s.tournament(t.id).unwrap();
    assert!(!after.is_started);
    assert!(s.matches(t.id).unwrap().is_empty());
    s.register_team(t.id, Uuid::new_v4()).unwrap();
    assert_eq!(s.participants(t.id).unwrap().len(), 5);
}
