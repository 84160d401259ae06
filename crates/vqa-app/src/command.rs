/// A user command typed at the prompt.
#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    Capture,
    Ask,
    Quit,
    Help,
}

impl Command {
    /// Parse a prompt line; anything unknown asks for help.
    pub fn parse(line: &str) -> Self {
        match line.trim().to_lowercase().as_str() {
            "c" | "capture" => Command::Capture,
            "a" | "ask" => Command::Ask,
            "q" | "quit" | "exit" => Command::Quit,
            _ => Command::Help,
        }
    }
}

pub const HELP: &str = "commands:
  c, capture   take a picture with the webcam
  a, ask       type questions, one per line, and finish with a line containing only '.'
  q, quit      leave";

#[cfg(test)]
mod tests {
    use super::Command;

    #[test]
    fn parse_commands() {
        assert_eq!(Command::parse("c"), Command::Capture);
        assert_eq!(Command::parse(" Capture \n"), Command::Capture);
        assert_eq!(Command::parse("ask"), Command::Ask);
        assert_eq!(Command::parse("QUIT"), Command::Quit);
        assert_eq!(Command::parse("exit"), Command::Quit);
        assert_eq!(Command::parse("what?"), Command::Help);
        assert_eq!(Command::parse(""), Command::Help);
    }
}
