use snake_engine::Direction;

/// What the player asked for: one of the four touch-pad arrows, restart, or quit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputCommand {
    Turn(Direction),
    Reset,
    Quit,
}

pub fn parse_input(line: &str) -> Option<InputCommand> {
    match line.trim().to_ascii_lowercase().as_str() {
        "w" | "up" | "k" => Some(InputCommand::Turn(Direction::Up)),
        "s" | "down" | "j" => Some(InputCommand::Turn(Direction::Down)),
        "a" | "left" | "h" => Some(InputCommand::Turn(Direction::Left)),
        "d" | "right" | "l" => Some(InputCommand::Turn(Direction::Right)),
        "r" | "reset" | "restart" => Some(InputCommand::Reset),
        "q" | "quit" | "exit" => Some(InputCommand::Quit),
        _ => None,
    }
}
