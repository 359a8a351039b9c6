/// Line that flushes the current segment and plays it.
pub const DONE: &str = "done";
/// Line that quits without playing anything pending.
pub const EXIT: &str = "exit";

pub const BANNER: &str = r#"Enter lines to synthesize. Type "done" to flush/play, "exit" to quit."#;
pub const PROMPT: &str = "> ";

/// What a console line asks the driver to do. Lines are matched exactly, without trimming.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleInput<'a> {
    Blank,
    Done,
    Exit,
    Text(&'a str),
}

impl<'a> ConsoleInput<'a> {
    pub fn parse(line: &'a str) -> Self {
        match line {
            "" => Self::Blank,
            DONE => Self::Done,
            EXIT => Self::Exit,
            text => Self::Text(text),
        }
    }
}
