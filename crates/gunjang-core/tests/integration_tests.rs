//! Integration tests for the Gunjang rules engine.
//!
//! These drive full move/battle sequences through the public API, the way
//! the session layer does.

use gunjang_core::*;

fn pos(x: f64, y: f64) -> Position {
    Position::new(x, y)
}

/// RED general takes a BLUE scout: the capture succeeds and the general
/// is permanently revealed.
#[test]
fn general_takes_scout_and_is_revealed() {
    let mut board = Board::new();
    board.pieces.push(Piece::at("R1", PlayerColor::Red, PieceType::General, pos(4.0, 3.0)));
    board.pieces.push(Piece::at("B1", PlayerColor::Blue, PieceType::Scout, pos(5.0, 3.0)));

    assert!(board.move_piece(&pos(4.0, 3.0), &pos(5.0, 3.0)));

    let general = board.piece_by_id("R1").unwrap();
    let scout = board.piece_by_id("B1").unwrap();
    assert!(scout.captured);
    assert!(!general.captured);
    assert!(general.revealed);
    assert_eq!(general.position, Some(pos(5.0, 3.0)));
    assert_eq!(board.current_turn, PlayerColor::Blue);
}

/// Two generals collide: both die and the contested cell ends up empty.
#[test]
fn mirrored_generals_annihilate() {
    let mut board = Board::new();
    board.pieces.push(Piece::at("R1", PlayerColor::Red, PieceType::General, pos(4.0, 3.0)));
    board.pieces.push(Piece::at("B1", PlayerColor::Blue, PieceType::General, pos(5.0, 3.0)));

    assert!(board.move_piece(&pos(4.0, 3.0), &pos(5.0, 3.0)));

    assert!(board.piece_by_id("R1").unwrap().captured);
    assert!(board.piece_by_id("B1").unwrap().captured);
    assert!(board.piece_at(&pos(5.0, 3.0)).is_none());

    // Both armies gone: the game ends with no winner.
    assert!(board.is_game_over());
    assert_eq!(board.winner(), None);
}

/// The engineer is the one rank that clears mines.
#[test]
fn engineer_clears_a_mine() {
    let mut board = Board::new();
    board.pieces.push(Piece::at("R1", PlayerColor::Red, PieceType::Engineer, pos(4.0, 3.0)));
    board.pieces.push(Piece::at("B1", PlayerColor::Blue, PieceType::Mine, pos(5.0, 3.0)));

    assert!(board.move_piece(&pos(4.0, 3.0), &pos(5.0, 3.0)));

    let engineer = board.piece_by_id("R1").unwrap();
    assert!(board.piece_by_id("B1").unwrap().captured);
    assert!(!engineer.captured);
    assert_eq!(engineer.position, Some(pos(5.0, 3.0)));
}

/// Anyone else walking into a mine dies where the mine sits.
#[test]
fn mine_destroys_non_engineer_attacker() {
    let mut board = Board::new();
    board.pieces.push(Piece::at("R1", PlayerColor::Red, PieceType::Tank, pos(4.0, 3.0)));
    board.pieces.push(Piece::at("B1", PlayerColor::Blue, PieceType::Mine, pos(5.0, 3.0)));

    assert!(board.move_piece(&pos(4.0, 3.0), &pos(5.0, 3.0)));

    assert!(board.piece_by_id("R1").unwrap().captured);
    let mine = board.piece_by_id("B1").unwrap();
    assert!(!mine.captured);
    assert_eq!(mine.position, Some(pos(5.0, 3.0)));
}

/// A raid through a crossing point ends the game by elimination.
#[test]
fn crossing_raid_to_elimination() {
    let mut board = Board::new();
    board.pieces.push(Piece::at("R1", PlayerColor::Red, PieceType::General, pos(5.0, 1.0)));
    board.pieces.push(Piece::at("B1", PlayerColor::Blue, PieceType::Private, pos(8.0, 2.0)));
    board.pieces.push(Piece::at("B2", PlayerColor::Blue, PieceType::Corporal, pos(8.0, 1.0)));

    // Red steps onto the crossing; blue shuffles.
    assert!(board.move_piece(&pos(5.0, 1.0), &pos(6.5, 1.5)));
    assert!(board.move_piece(&pos(8.0, 2.0), &pos(9.0, 2.0)));

    // Red drops onto the blue grid and takes the corporal.
    assert!(board.move_piece(&pos(6.5, 1.5), &pos(8.0, 1.0)));
    assert!(board.piece_by_id("B2").unwrap().captured);
    assert!(!board.is_game_over());

    // Blue comes back; red finishes the last defender.
    assert!(board.move_piece(&pos(9.0, 2.0), &pos(8.0, 2.0)));
    assert!(board.move_piece(&pos(8.0, 1.0), &pos(8.0, 2.0)));

    assert!(board.is_game_over());
    assert_eq!(board.winner(), Some(PlayerColor::Red));
    assert_eq!(board.surviving(PlayerColor::Blue), 0);
}

/// Turn alternation holds across accepted moves and is untouched by
/// rejected ones.
#[test]
fn turn_alternates_only_on_accepted_moves() {
    let mut board = Board::new();
    board.pieces.push(Piece::at("R1", PlayerColor::Red, PieceType::Private, pos(0.0, 0.0)));
    board.pieces.push(Piece::at("B1", PlayerColor::Blue, PieceType::Private, pos(13.0, 6.0)));

    assert_eq!(board.current_turn, PlayerColor::Red);
    assert!(!board.move_piece(&pos(0.0, 0.0), &pos(2.0, 0.0)));
    assert_eq!(board.current_turn, PlayerColor::Red);

    assert!(board.move_piece(&pos(0.0, 0.0), &pos(1.0, 0.0)));
    assert_eq!(board.current_turn, PlayerColor::Blue);

    assert!(!board.move_piece(&pos(1.0, 0.0), &pos(1.0, 1.0))); // red piece, blue's turn
    assert_eq!(board.current_turn, PlayerColor::Blue);

    assert!(board.move_piece(&pos(13.0, 6.0), &pos(12.0, 6.0)));
    assert_eq!(board.current_turn, PlayerColor::Red);
}

/// The full template can be laid out onto a side's five setup columns.
#[test]
fn full_template_fills_setup_columns() {
    let mut board = Board::new();
    board.pieces.extend(Board::initial_pieces(PlayerColor::Red));

    let mut idx = 0;
    for x in 0..=4 {
        for y in 0..=6 {
            let id = format!("R{}", idx + 1);
            assert!(board.place_piece(&id, Some(pos(x as f64, y as f64))));
            idx += 1;
        }
    }

    assert_eq!(idx, PIECES_PER_SIDE);
    for x in 0..=4 {
        for y in 0..=6 {
            assert!(board.piece_at(&pos(x as f64, y as f64)).is_some());
        }
    }
    // The front-line column stays free at setup.
    for y in 0..=6 {
        assert!(board.piece_at(&pos(5.0, y as f64)).is_none());
    }
}
