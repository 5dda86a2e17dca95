//! Line-based keyboard mapping.
//!
//! Every character of a line is one key press, so `ddd` moves three cells.
//! Layout follows the keys around `s`:
//!
//! ```text
//! q w e
//! a s d     s / empty line = confirm
//! z x c
//! ```
use game_core::Direction;
use runtime::Input;

/// One interpreted key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Input(Input),
    /// Answer to a yes/no prompt.
    Answer(bool),
    Quit,
}

pub fn parse_line(line: &str) -> Vec<Command> {
    let line = line.trim();
    match line.to_ascii_lowercase().as_str() {
        "" => return vec![Command::Input(Input::Confirm)],
        "esc" | "cancel" => return vec![Command::Input(Input::Cancel)],
        "quit" | "exit" => return vec![Command::Quit],
        "yes" => return vec![Command::Answer(true)],
        "no" => return vec![Command::Answer(false)],
        _ => {}
    }
    line.chars().filter_map(parse_key).collect()
}

fn parse_key(key: char) -> Option<Command> {
    let input = match key.to_ascii_lowercase() {
        'q' => Input::Direction(Direction::NorthWest),
        'w' => Input::Direction(Direction::North),
        'e' => Input::Direction(Direction::NorthEast),
        'a' => Input::Direction(Direction::West),
        'd' => Input::Direction(Direction::East),
        'z' => Input::Direction(Direction::SouthWest),
        'x' => Input::Direction(Direction::South),
        'c' => Input::Direction(Direction::SouthEast),
        's' => Input::Confirm,
        'k' => Input::Cancel,
        'p' => Input::TogglePause,
        'y' => return Some(Command::Answer(true)),
        'n' => return Some(Command::Answer(false)),
        digit @ '1'..='9' => Input::Select(digit as u8 - b'0'),
        _ => return None,
    };
    Some(Command::Input(input))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letters_map_to_directions() {
        assert_eq!(
            parse_line("dx"),
            vec![
                Command::Input(Input::Direction(Direction::East)),
                Command::Input(Input::Direction(Direction::South)),
            ]
        );
    }

    #[test]
    fn words_and_digits() {
        assert_eq!(parse_line(""), vec![Command::Input(Input::Confirm)]);
        assert_eq!(parse_line("esc"), vec![Command::Input(Input::Cancel)]);
        assert_eq!(parse_line("3"), vec![Command::Input(Input::Select(3))]);
        assert_eq!(parse_line("y"), vec![Command::Answer(true)]);
        assert_eq!(parse_line("quit"), vec![Command::Quit]);
        assert!(parse_line("?!").is_empty());
    }
}
