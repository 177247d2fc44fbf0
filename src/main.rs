// What you SEE:
// • "Scratch it!" and a 3x3 grid of gray fields.
// • Hold Left Mouse and drag over a field: the gray comes off, a check or a blank shows.
// • Releasing counts the field as scratched. Three checks first = WINNER, otherwise you lose.
// • R starts a new round on the result screen. ESC quits.

use clap::Parser;

use scratch_card::assets::ImageStore;
use scratch_card::board::Board;
use scratch_card::config::Config;
use scratch_card::draw::{draw_text_centered, Drawer};
use scratch_card::{Error, FrameBuffer, GameSession, GameState, PointerEvent, Position};

const BACKGROUND: u32 = 0x00FF_FBFE;
const INK: u32 = 0x0021_1F26;
const HEADER_HEIGHT: i32 = 90;
const FOOTER_HEIGHT: i32 = 20;

fn main() -> Result<(), Error> {
    env_logger::init();
    let cfg = Config::parse();

    /* --- Round state ---
       The session picks the three winning fields and decides Win/Lose. */
    let mut game = match cfg.seed {
        Some(seed) => GameSession::seeded(seed),
        None => GameSession::new(),
    };
    game.subscribe(|state| match state {
        GameState::Win => println!("WINNER"),
        GameState::Lose => println!("Sorry, maybe next time!"),
        GameState::Running => println!("New round"),
    });

    /* --- Grid + window ---
       The window is sized around the 3x3 grid with a title above it. */
    let cell_size = cfg.cell_size.max(1) as i32;
    let gap = cfg.gap as i32;
    let mut board = Board::new(
        &game,
        cfg.cell_config(),
        (gap, HEADER_HEIGHT),
        cell_size,
        gap,
        ImageStore::new(cfg.assets.clone()),
    );
    let (grid_w, grid_h) = board.extent();
    let width = (grid_w + 2 * gap) as usize;
    let height = (HEADER_HEIGHT + grid_h + gap + FOOTER_HEIGHT) as usize;
    let mut drawer = Drawer::new("Scratch it!", width, height)?;
    let mut screen = FrameBuffer::filled(width, height, BACKGROUND);

    /* --- Pointer edge detection ---
       minifb only reports "button is down"; press/move/release come from comparing frames. */
    let mut was_down = false;
    let mut last_pos = Position::default();

    /* ------------------------------ Main loop ------------------------------ */
    while drawer.is_open() && !drawer.esc_pressed() {
        /* 1) Inputs -> pointer events -> cells (reveals go straight into the session) */
        let down = drawer.left_mouse_down();
        let pos = drawer.mouse_pos().map(|(x, y)| Position::new(x, y)).unwrap_or(last_pos);
        let event = match (was_down, down) {
            (false, true) => Some(PointerEvent::Press(pos)),
            (true, true) if pos != last_pos => Some(PointerEvent::Move(pos)),
            (true, false) => Some(PointerEvent::Release(pos)),
            _ => None,
        };
        if let Some(event) = event {
            if game.state() == GameState::Running {
                board.pointer(event, &mut game);
            }
        }
        was_down = down;
        last_pos = pos;

        if game.state() != GameState::Running && drawer.r_pressed_once() {
            game.reset();
            board.start_round(&game);
        }

        /* 2) Paint: title, then the grid or the result screen */
        screen.pixels.fill(BACKGROUND);
        draw_text_centered(&mut screen, 16, "Scratch it!", INK, 5);
        draw_text_centered(&mut screen, 62, "3 checks and you win!", INK, 2);

        match game.state() {
            GameState::Running => board.draw(&mut screen)?,
            GameState::Win => {
                draw_text_centered(&mut screen, HEADER_HEIGHT + 60, "WINNER", INK, 6);
                draw_text_centered(&mut screen, HEADER_HEIGHT + 140, "Press R to try again", INK, 2);
            }
            GameState::Lose => {
                draw_text_centered(&mut screen, HEADER_HEIGHT + 60, "Sorry, maybe", INK, 4);
                draw_text_centered(&mut screen, HEADER_HEIGHT + 100, "next time!", INK, 4);
                draw_text_centered(&mut screen, HEADER_HEIGHT + 160, "Press R to try again", INK, 2);
            }
        }

        /* 3) Present to the window */
        drawer.present(&screen)?;
    }

    Ok(())
}
