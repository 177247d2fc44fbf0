use rstest::rstest;

use scratch_card::{
    CellConfig, CellSpec, CellState, GameSession, GameState, ImageId, MaskLayer, PointerEvent,
    Position, ScratchCell,
};

const CELL: i32 = 90;

fn cells_for(game: &GameSession) -> Vec<ScratchCell> {
    game.cell_specs()
        .map(|spec| {
            let mut cell = ScratchCell::new(spec, ImageId::for_answer(spec.is_winning), CellConfig::default());
            cell.layout(CELL, CELL);
            cell
        })
        .collect()
}

/// press, two moves to the right, release
fn scratch(cell: &mut ScratchCell, game: &mut GameSession) {
    cell.handle(PointerEvent::Press(Position::new(0.0, 0.0)), &mut *game);
    cell.handle(PointerEvent::Move(Position::new(10.0, 0.0)), &mut *game);
    cell.handle(PointerEvent::Move(Position::new(20.0, 0.0)), &mut *game);
    cell.handle(PointerEvent::Release(Position::new(20.0, 0.0)), &mut *game);
}

fn indices(game: &GameSession, winning: bool) -> Vec<usize> {
    game.answers()
        .iter()
        .enumerate()
        .filter(|(_, w)| **w == winning)
        .map(|(i, _)| i)
        .collect()
}

#[test]
fn three_checks_first_wins_and_stays_won() {
    let mut game = GameSession::seeded(2024);
    let mut cells = cells_for(&game);
    let winners = indices(&game, true);
    let losers = indices(&game, false);
    assert_eq!(winners.len(), 3);

    for (n, &i) in winners.iter().enumerate() {
        assert_eq!(game.state(), GameState::Running, "decided too early at reveal {n}");
        scratch(&mut cells[i], &mut game);
    }
    assert_eq!(game.state(), GameState::Win);

    for &i in &losers[..2] {
        scratch(&mut cells[i], &mut game);
    }
    assert_eq!(game.state(), GameState::Win);
    assert_eq!(game.scratch_count(), 3);
}

#[test]
fn three_blanks_first_loses() {
    let mut game = GameSession::seeded(77);
    let mut cells = cells_for(&game);
    for &i in &indices(&game, false)[..3] {
        scratch(&mut cells[i], &mut game);
    }
    assert_eq!(game.state(), GameState::Lose);
}

#[rstest]
#[case(1)]
#[case(2)]
fn mixed_three_reveals_lose(#[case] checks: usize) {
    let mut game = GameSession::seeded(5);
    let mut cells = cells_for(&game);
    let mut order: Vec<usize> = indices(&game, true)[..checks].to_vec();
    order.extend_from_slice(&indices(&game, false)[..3 - checks]);

    for &i in &order {
        scratch(&mut cells[i], &mut game);
    }
    assert_eq!(game.state(), GameState::Lose);
    assert_eq!(game.success_count(), checks);
}

#[test]
fn rescratching_a_cell_reports_once() {
    let mut game = GameSession::seeded(13);
    let mut cells = cells_for(&game);
    let loser = indices(&game, false)[0];

    let mut reports = Vec::new();
    let mut sink = |spec: CellSpec| reports.push(spec);
    for _ in 0..4 {
        let cell = &mut cells[loser];
        cell.handle(PointerEvent::Press(Position::new(40.0, 40.0)), &mut sink);
        cell.handle(PointerEvent::Move(Position::new(60.0, 40.0)), &mut sink);
        cell.handle(PointerEvent::Release(Position::new(60.0, 40.0)), &mut sink);
    }
    assert_eq!(reports, vec![CellSpec::new(loser, false)]);
    assert_eq!(cells[loser].state(), CellState::Revealed);
}

#[test]
fn new_round_resets_every_cell() {
    let mut game = GameSession::seeded(31);
    let mut cells = cells_for(&game);
    for cell in cells.iter_mut().take(3) {
        scratch(cell, &mut game);
    }
    assert_ne!(game.state(), GameState::Running);

    game.reset();
    for (cell, spec) in cells.iter_mut().zip(game.cell_specs()) {
        cell.start_round(spec, ImageId::for_answer(spec.is_winning));
    }

    assert_eq!(game.state(), GameState::Running);
    for (cell, &win) in cells.iter().zip(game.answers()) {
        assert_eq!(cell.state(), CellState::Idle);
        assert!(cell.stroke().is_empty());
        assert!(cell.mask().unwrap().is_fully_opaque());
        assert_eq!(cell.spec().is_winning, win);
    }

    // the new round plays normally
    for &i in &indices(&game, true) {
        scratch(&mut cells[i], &mut game);
    }
    assert_eq!(game.state(), GameState::Win);
}

#[test]
fn mask_only_loses_opacity_under_a_long_drag() {
    let mut cell = ScratchCell::new(CellSpec::new(0, true), ImageId::Check, CellConfig::default());
    cell.layout(CELL, CELL);
    let mut sink = |_: CellSpec| {};

    let mut previous = cell.mask().map(MaskLayer::opaque_pixel_count).unwrap();
    cell.handle(PointerEvent::Press(Position::new(5.0, 5.0)), &mut sink);
    for step in 0..60 {
        let t = step as f32 / 60.0;
        let p = Position::new(5.0 + 80.0 * t, 45.0 + 40.0 * (t * 12.0).sin());
        cell.handle(PointerEvent::Move(p), &mut sink);
        let now = cell.mask().map(MaskLayer::opaque_pixel_count).unwrap();
        assert!(now <= previous);
        previous = now;
    }
    assert!(previous < (CELL * CELL) as usize);
}
