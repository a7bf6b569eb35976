//! Tests for the game session: turns, multi-jumps, terminal states, saving.

use strictly_checkers::rules::WinReason;
use strictly_checkers::{
    Board, Cell, GameSession, GameStatus, Move, MoveError, Outcome, Position, SaveError,
    SavedMatch, SessionConfig, SessionSnapshot, Side, TurnOutcome,
};

fn fixture(rows: [&str; 8]) -> Board {
    Board::from_rows(&rows).expect("valid fixture")
}

fn started(config: SessionConfig, board: Board, to_move: Side) -> GameSession {
    let mut session = GameSession::with_board(config, board, to_move);
    session.start().unwrap();
    session
}

/// Red (6,1) jumps (5,2) then (3,4); red (7,6) is a bystander.
fn double_jump() -> Board {
    fixture([
        "._._._.b",
        "_._._._.",
        "._._._._",
        "_._.b._.",
        "._._._._",
        "_.b._._.",
        ".r._._._",
        "_._._.r.",
    ])
}

/// Plays three hops that include a capture by each side.
fn opening(session: &mut GameSession) {
    for text in ["(5,0)->(4,1)", "(2,3)->(3,2)", "(4,1)->(2,3)", "(1,2)->(3,4)"] {
        session.make_move(text.parse().unwrap()).unwrap();
    }
}

#[test]
fn test_legal_move_passes_turn_to_black() {
    let mut session = GameSession::new(SessionConfig::two_player());
    session.start().unwrap();
    let outcome = session.make_move(Move::between((5, 0), (4, 1))).unwrap();
    assert_eq!(outcome, TurnOutcome::Passed { next: Side::Black });
    assert_eq!(session.to_move(), Side::Black);
    assert!(session.board().is_empty_at(Position::at(5, 0)));
    assert_eq!(session.board().get(Position::at(4, 1)), Cell::RedMan);
    assert_eq!(session.records().len(), 1);
    assert_eq!(session.records()[0].side, Side::Red);
}

#[test]
fn test_rejected_moves_leave_session_unchanged() {
    let mut session = GameSession::new(SessionConfig::two_player());
    session.start().unwrap();
    let before = session.snapshot();

    assert_eq!(
        session.make_move(Move::between((6, 1), (5, 0))),
        Err(MoveError::IllegalMove(Move::between((6, 1), (5, 0))))
    );
    assert_eq!(
        session.make_move(Move::between((4, 1), (3, 2))),
        Err(MoveError::EmptySquare(Position::at(4, 1)))
    );
    assert!(matches!(
        session.make_move(Move::between((2, 1), (3, 2))),
        Err(MoveError::NotYourPiece { .. })
    ));
    assert_eq!(session.snapshot(), before);
}

#[test]
fn test_multi_jump_keeps_the_turn() {
    let mut session = started(SessionConfig::two_player(), double_jump(), Side::Red);
    assert_eq!(
        session.legal_moves(),
        vec![Move::between((6, 1), (4, 3))],
        "capture is mandatory"
    );

    let outcome = session.make_move(Move::between((6, 1), (4, 3))).unwrap();
    assert_eq!(
        outcome,
        TurnOutcome::Continue {
            from: Position::at(4, 3),
            captures: vec![Move::between((4, 3), (2, 5))],
        }
    );
    assert_eq!(session.to_move(), Side::Red);
    assert_eq!(session.pending_continuation(), Some(Position::at(4, 3)));

    assert_eq!(
        session.make_move(Move::between((7, 6), (6, 5))),
        Err(MoveError::ContinuationRequired(Position::at(4, 3)))
    );
    assert_eq!(
        session.make_move(Move::between((4, 3), (3, 2))),
        Err(MoveError::IllegalMove(Move::between((4, 3), (3, 2))))
    );
    assert!(session.legal_moves_at(Position::at(7, 6)).is_empty());

    let outcome = session.make_move(Move::between((4, 3), (2, 5))).unwrap();
    assert_eq!(outcome, TurnOutcome::Passed { next: Side::Black });
    assert_eq!(session.board().count(Side::Black), 1);
    assert_eq!(
        session.snapshot().history,
        vec!["Turn 1 R: (6,1)->(4,3) | (4,3)->(2,5)".to_string()]
    );
}

#[test]
fn test_skip_extra_hops_ends_turn() {
    let mut session = started(SessionConfig::two_player(), double_jump(), Side::Red);
    assert_eq!(session.skip_extra_hops(), Err(MoveError::NoContinuation));

    session.make_move(Move::between((6, 1), (4, 3))).unwrap();
    let outcome = session.skip_extra_hops().unwrap();
    assert_eq!(outcome, TurnOutcome::Passed { next: Side::Black });
    assert_eq!(session.pending_continuation(), None);
    assert_eq!(session.board().count(Side::Black), 2);
}

#[test]
fn test_promotion_ends_the_turn() {
    // The new king on (0,3) could jump (1,4), but the turn is over.
    let board = fixture([
        "._._._._",
        "_.b.b._.",
        ".r._._._",
        "_._._._.",
        "._._._._",
        "_._._._.",
        "._._._._",
        "_._._._.",
    ]);
    let mut session = started(SessionConfig::two_player(), board, Side::Red);
    let outcome = session.make_move(Move::between((2, 1), (0, 3))).unwrap();
    assert_eq!(outcome, TurnOutcome::Passed { next: Side::Black });
    assert_eq!(session.board().get(Position::at(0, 3)), Cell::RedKing);
}

#[test]
fn test_capturing_last_piece_completes_game() {
    let board = fixture([
        "._._._._",
        "_._._._.",
        "._._._._",
        "_.b._._.",
        ".r._._._",
        "_._._._.",
        "._._._._",
        "_._._._.",
    ]);
    let mut session = started(SessionConfig::two_player(), board, Side::Red);
    let outcome = session.make_move(Move::between((4, 1), (2, 3))).unwrap();
    let expected = Outcome::Winner {
        side: Side::Red,
        reason: WinReason::NoPieces,
    };
    assert_eq!(outcome, TurnOutcome::GameOver(expected));
    assert_eq!(session.status(), GameStatus::Completed);
    assert_eq!(session.outcome(), Some(expected));
    assert_eq!(
        session.snapshot().history,
        vec!["Turn 1 R: (4,1)->(2,3)".to_string(), "Turn 1 B: --".to_string()]
    );
    assert!(matches!(
        session.make_move(Move::between((2, 3), (1, 2))),
        Err(MoveError::GameNotActive(GameStatus::Completed))
    ));
}

#[test]
fn test_immobile_side_loses() {
    let board = fixture([
        ".b._._._",
        "r._._._.",
        "._._._._",
        "_._._._.",
        "._._._._",
        "_._._._.",
        "._._._._",
        "_._._._.",
    ]);
    let session = started(SessionConfig::two_player(), board, Side::Red);
    assert_eq!(session.status(), GameStatus::Completed);
    assert_eq!(
        session.outcome(),
        Some(Outcome::Winner {
            side: Side::Black,
            reason: WinReason::NoMoves
        })
    );
}

#[test]
fn test_start_without_opponent_pieces_completes_game() {
    let board = Board::with_pieces(&[(Position::at(5, 2), Cell::RedMan)]).unwrap();
    let session = started(SessionConfig::two_player(), board, Side::Red);
    assert_eq!(session.status(), GameStatus::Completed);
    assert_eq!(
        session.outcome(),
        Some(Outcome::Winner {
            side: Side::Red,
            reason: WinReason::NoPieces
        })
    );
    assert!(session.legal_moves().is_empty());
}

#[test]
fn test_engine_continues_multi_jump() {
    let config = SessionConfig::default().with_engine_side(Some(Side::Red));
    let mut session = started(config, double_jump(), Side::Red);
    assert!(session.is_engine_turn());
    let turn = session.play_engine_turn().unwrap();
    assert_eq!(
        turn.hops,
        vec![Move::between((6, 1), (4, 3)), Move::between((4, 3), (2, 5))]
    );
    assert_eq!(turn.outcome, TurnOutcome::Passed { next: Side::Black });
    assert!(!session.is_engine_turn());
}

#[test]
fn test_engine_first() {
    let config = SessionConfig::default()
        .with_engine_side(Some(Side::Red))
        .with_search_depth(2);
    let mut session = GameSession::new(config);
    session.start().unwrap();
    assert!(session.is_engine_turn());
    let turn = session.play_engine_turn().unwrap();
    assert_eq!(turn.side, Side::Red);
    assert_eq!(session.to_move(), Side::Black);
}

#[test]
fn test_save_and_load_round_trip() {
    let mut session = GameSession::new(SessionConfig::two_player());
    session.start().unwrap();
    opening(&mut session);
    assert_eq!(session.turn_number(), 3);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("match.txt");
    session.save_to_path(&path).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert_eq!(
        text,
        "Turn 1 R: (5,0)->(4,1)\n\
         Turn 1 B: (2,3)->(3,2)\n\
         Turn 2 R: (4,1)->(2,3)\n\
         Turn 2 B: (1,2)->(3,4)\n"
    );

    let loaded = GameSession::load_from_path(SessionConfig::two_player(), &path).unwrap();
    assert_eq!(loaded.board(), session.board());
    assert_eq!(loaded.to_move(), Side::Red);
    assert_eq!(loaded.status(), GameStatus::Active);
    assert_eq!(loaded.turn_number(), 3);
    assert_eq!(loaded.history(), session.history());
    assert_eq!(loaded.saved_match(), session.saved_match());
    assert_eq!(loaded.records().len(), 4);
}

#[test]
fn test_load_half_played_turn() {
    let saved = SavedMatch::parse("Turn 1 R: (5,0)->(4,1)\n").unwrap();
    let session = GameSession::load(SessionConfig::two_player(), &saved).unwrap();
    assert_eq!(session.to_move(), Side::Black);
    assert_eq!(session.turn_number(), 1);
    assert_eq!(session.saved_match(), saved);
}

#[test]
fn test_load_rejects_bad_replay() {
    let saved = SavedMatch::parse("Turn 1 R: (2,1)->(3,0)\n").unwrap();
    assert!(matches!(
        GameSession::load(SessionConfig::two_player(), &saved),
        Err(SaveError::Replay { .. })
    ));
}

#[test]
fn test_load_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = GameSession::load_from_path(SessionConfig::two_player(), dir.path().join("nope.txt"))
        .unwrap_err();
    assert!(matches!(
        err,
        SaveError::Io {
            kind: std::io::ErrorKind::NotFound,
            ..
        }
    ));
}

#[test]
fn test_snapshot_serializes() {
    let mut session = GameSession::new(SessionConfig::two_player());
    session.start().unwrap();
    opening(&mut session);
    let json = serde_json::to_string(&session.snapshot()).unwrap();
    let back: SessionSnapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(back, session.snapshot());
    assert_eq!(back.history.len(), 4);
}
