// The 3x3 field: where each cell sits on screen, which cell owns a gesture,
// and the cached per-cell pictures that get blitted every frame.

use crate::assets::ImageStore;
use crate::cell::{CellConfig, PointerEvent, RevealSink, ScratchCell};
use crate::draw::blit;
use crate::error::Result;
use crate::game::GameSession;
use crate::gamma::GammaLut;
use crate::types::{FrameBuffer, ImageId, Position};

pub const GRID_COLUMNS: usize = 3;

pub struct Board {
    cells: Vec<ScratchCell>,
    frames: Vec<Option<FrameBuffer>>, // last composite per cell
    origin: (i32, i32),
    cell_size: i32,
    gap: i32,
    captured: Option<usize>, // cell that received the press of the running gesture
    images: ImageStore,
    lut: GammaLut,
}

impl Board {
    /// One cell per field of the session's current round, top-left at `origin`.
    pub fn new(
        session: &GameSession,
        config: CellConfig,
        origin: (i32, i32),
        cell_size: i32,
        gap: i32,
        images: ImageStore,
    ) -> Self {
        let cells: Vec<ScratchCell> = session
            .cell_specs()
            .map(|spec| {
                let mut cell = ScratchCell::new(spec, ImageId::for_answer(spec.is_winning), config);
                cell.layout(cell_size, cell_size);
                cell
            })
            .collect();
        let frames = vec![None; cells.len()];
        Self { cells, frames, origin, cell_size, gap, captured: None, images, lut: GammaLut::new() }
    }

    pub fn cells(&self) -> &[ScratchCell] {
        &self.cells
    }

    pub fn cell_size(&self) -> i32 {
        self.cell_size
    }

    /// Width and height the grid covers on screen.
    pub fn extent(&self) -> (i32, i32) {
        let cols = GRID_COLUMNS as i32;
        let rows = self.cells.len().div_ceil(GRID_COLUMNS) as i32;
        (
            cols * self.cell_size + (cols - 1).max(0) * self.gap,
            rows * self.cell_size + (rows - 1).max(0) * self.gap,
        )
    }

    /// Screen position of the top-left pixel of cell `index`.
    pub fn cell_origin(&self, index: usize) -> (i32, i32) {
        let col = (index % GRID_COLUMNS) as i32;
        let row = (index / GRID_COLUMNS) as i32;
        let step = self.cell_size + self.gap;
        (self.origin.0 + col * step, self.origin.1 + row * step)
    }

    /// Cell under a screen point; gaps between cells hit nothing.
    pub fn cell_at(&self, p: Position) -> Option<usize> {
        (0..self.cells.len()).find(|&i| {
            let (ox, oy) = self.cell_origin(i);
            let (x, y) = (p.x - ox as f32, p.y - oy as f32);
            x >= 0.0 && y >= 0.0 && x < self.cell_size as f32 && y < self.cell_size as f32
        })
    }

    /// Route a screen-space pointer event. The cell that got the press keeps
    /// the gesture until release, even when the pointer leaves it.
    pub fn pointer(&mut self, event: PointerEvent, sink: &mut impl RevealSink) {
        let target = match event {
            PointerEvent::Press(p) => {
                self.captured = self.cell_at(p);
                self.captured
            }
            PointerEvent::Move(_) => self.captured,
            PointerEvent::Release(_) => self.captured.take(),
        };
        let Some(index) = target else { return };

        let (ox, oy) = self.cell_origin(index);
        let to_local = |p: Position| Position::new(p.x - ox as f32, p.y - oy as f32);
        let local = match event {
            PointerEvent::Press(p) => PointerEvent::Press(to_local(p)),
            PointerEvent::Move(p) => PointerEvent::Move(to_local(p)),
            PointerEvent::Release(p) => PointerEvent::Release(to_local(p)),
        };
        self.cells[index].handle(local, sink);
    }

    /// New round from the session's answers: every cell opaque and unrevealed again.
    pub fn start_round(&mut self, session: &GameSession) {
        for (cell, spec) in self.cells.iter_mut().zip(session.cell_specs()) {
            cell.start_round(spec, ImageId::for_answer(spec.is_winning));
        }
        self.captured = None;
    }

    /// Change the field size; every cell starts over with a fresh mask.
    pub fn set_cell_size(&mut self, cell_size: i32) {
        self.cell_size = cell_size;
        for cell in self.cells.iter_mut() {
            cell.layout(cell_size, cell_size);
        }
    }

    /// Blit every cell into `screen`, recompositing only cells whose mask changed.
    pub fn draw(&mut self, screen: &mut FrameBuffer) -> Result<()> {
        for i in 0..self.cells.len() {
            let changed = self.cells[i].take_mask_changed();
            if changed || self.frames[i].is_none() {
                let (w, h) = self.cells[i].size();
                self.frames[i] = if w > 0 && h > 0 {
                    let image = self.images.get(self.cells[i].image(), w as u32, h as u32)?;
                    self.cells[i].render(image, &self.lut)?
                } else {
                    None
                };
            }
            if let Some(frame) = &self.frames[i] {
                let (ox, oy) = self.cell_origin(i);
                blit(screen, frame, ox, oy);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GameState;
    use crate::types::CellSpec;

    fn board(session: &GameSession) -> Board {
        Board::new(session, CellConfig::default(), (10, 50), 100, 10, ImageStore::new(None))
    }

    #[test]
    fn grid_positions_and_hit_testing() {
        let session = GameSession::seeded(1);
        let board = board(&session);
        assert_eq!(board.cells().len(), 9);
        assert_eq!(board.cell_origin(0), (10, 50));
        assert_eq!(board.cell_origin(4), (120, 160));
        assert_eq!(board.cell_origin(8), (230, 270));
        assert_eq!(board.extent(), (320, 320));

        assert_eq!(board.cell_at(Position::new(15.0, 55.0)), Some(0));
        assert_eq!(board.cell_at(Position::new(150.0, 200.0)), Some(4));
        assert_eq!(board.cell_at(Position::new(115.0, 55.0)), None); // gap
        assert_eq!(board.cell_at(Position::new(0.0, 0.0)), None);
    }

    #[test]
    fn cells_mirror_the_session_answers() {
        let session = GameSession::seeded(4);
        let board = board(&session);
        for (cell, &win) in board.cells().iter().zip(session.answers()) {
            assert_eq!(cell.spec().is_winning, win);
            assert_eq!(cell.image(), ImageId::for_answer(win));
        }
    }

    #[test]
    fn gesture_stays_with_the_pressed_cell() {
        let session = GameSession::seeded(2);
        let mut board = board(&session);
        let mut revealed = Vec::new();
        let mut sink = |spec: CellSpec| revealed.push(spec.index);

        board.pointer(PointerEvent::Press(Position::new(60.0, 100.0)), &mut sink);
        // drag across the gap into cell 1 and then into cell 4
        board.pointer(PointerEvent::Move(Position::new(170.0, 100.0)), &mut sink);
        board.pointer(PointerEvent::Move(Position::new(170.0, 200.0)), &mut sink);
        board.pointer(PointerEvent::Release(Position::new(170.0, 200.0)), &mut sink);

        assert_eq!(revealed, vec![0]);
        assert!(board.cells()[1].mask().unwrap().is_fully_opaque());
        assert!(board.cells()[4].mask().unwrap().is_fully_opaque());
    }

    #[test]
    fn press_in_a_gap_does_nothing() {
        let session = GameSession::seeded(2);
        let mut board = board(&session);
        let mut count = 0;
        let mut sink = |_: CellSpec| count += 1;
        board.pointer(PointerEvent::Press(Position::new(115.0, 100.0)), &mut sink);
        board.pointer(PointerEvent::Move(Position::new(150.0, 100.0)), &mut sink);
        board.pointer(PointerEvent::Release(Position::new(150.0, 100.0)), &mut sink);
        assert_eq!(count, 0);
        assert!(board.cells().iter().all(|c| c.mask().unwrap().is_fully_opaque()));
    }

    #[test]
    fn reveals_drive_the_session() {
        let mut session = GameSession::seeded(6);
        let mut board = board(&session);
        let winners: Vec<usize> =
            session.answers().iter().enumerate().filter(|(_, w)| **w).map(|(i, _)| i).collect();

        for &i in &winners {
            let (ox, oy) = board.cell_origin(i);
            let p = Position::new(ox as f32 + 50.0, oy as f32 + 50.0);
            board.pointer(PointerEvent::Press(p), &mut session);
            board.pointer(PointerEvent::Release(p), &mut session);
        }
        assert_eq!(session.state(), GameState::Win);

        session.reset();
        board.start_round(&session);
        assert!(board.cells().iter().all(|c| !c.is_revealed()));
        assert!(board.cells().iter().all(|c| c.mask().unwrap().is_fully_opaque()));
    }

    #[test]
    fn draw_blits_cells_and_shows_scratched_spots() {
        let session = GameSession::seeded(8);
        let mut board = board(&session);
        let mut screen = FrameBuffer::filled(400, 400, 0x0000_0000);
        board.draw(&mut screen).unwrap();
        let untouched = screen.get(60, 100).unwrap();
        assert_ne!(untouched, 0);

        let mut sink = |_: CellSpec| {};
        board.pointer(PointerEvent::Press(Position::new(60.0, 100.0)), &mut sink);
        board.draw(&mut screen).unwrap();
        // the paper under the mask shows through
        assert_eq!(screen.get(60, 100), Some(0x00F5_F5F5));
        // gaps keep the background
        assert_eq!(screen.get(115, 100), Some(0));
    }

    #[test]
    fn resizing_the_grid_restarts_masks() {
        let session = GameSession::seeded(8);
        let mut board = board(&session);
        let mut sink = |_: CellSpec| {};
        board.pointer(PointerEvent::Press(Position::new(60.0, 100.0)), &mut sink);
        board.set_cell_size(80);
        let mask = board.cells()[0].mask().unwrap();
        assert_eq!(mask.width(), 80);
        assert!(mask.is_fully_opaque());
    }
}
