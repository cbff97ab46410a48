use snake_engine::{GameSnapshot, SnapshotObserver, TickEvent};

const HEAD: char = '@';
const BODY: char = 'o';
const FOOD: char = '*';
const EMPTY: char = '.';

/// Draws the board as text on stdout after every tick.
#[derive(Clone, Default)]
pub struct TextRenderer;

impl TextRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl SnapshotObserver for TextRenderer {
    async fn on_tick(&self, _event: TickEvent, snapshot: GameSnapshot) {
        println!("{}", render_board(&snapshot));
    }

    async fn on_game_over(&self, snapshot: GameSnapshot) {
        let reason = snapshot
            .game_over_reason()
            .map(|r| r.to_string())
            .unwrap_or_default();
        println!("GAME OVER: snake {}. Score {}. Enter r to restart or q to quit.", reason, snapshot.score);
    }

    async fn on_reset(&self, snapshot: GameSnapshot) {
        println!("{}", render_board(&snapshot));
    }
}

pub fn render_board(snapshot: &GameSnapshot) -> String {
    let size = snapshot.grid_size;
    let mut cells = vec![vec![EMPTY; size]; size];

    if let Some(food) = snapshot.food {
        cells[food.y as usize][food.x as usize] = FOOD;
    }
    for (index, segment) in snapshot.snake.iter().enumerate() {
        cells[segment.y as usize][segment.x as usize] = if index == 0 { HEAD } else { BODY };
    }

    let border = format!("+{}+", "-".repeat(size));
    let mut out = String::with_capacity((size + 3) * (size + 3));
    out.push_str(&format!("Score: {}\n", snapshot.score));
    out.push_str(&border);
    out.push('\n');
    for row in cells {
        out.push('|');
        out.extend(row);
        out.push_str("|\n");
    }
    out.push_str(&border);
    out
}
