/// Console output for the CLI
///
/// All lines go to stdout under one lock so concurrent renders never
/// interleave. Labels are colored when stdout is a capable terminal and
/// written plain otherwise (pipes, CI logs, `TERM=dumb`).
use lazy_static::lazy_static;
use std::io::Write;
use std::sync::Mutex;

lazy_static! {
    static ref CONSOLE: Mutex<()> = Mutex::new(());
}

const PREFIX: &str = "chemviz";

/// How a label is highlighted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tone {
    Success,
    Warning,
    Error,
}

impl Tone {
    fn color(self) -> term::color::Color {
        match self {
            Tone::Success => term::color::BRIGHT_GREEN,
            Tone::Warning => term::color::BRIGHT_YELLOW,
            Tone::Error => term::color::BRIGHT_RED,
        }
    }
}

fn with_console(f: impl FnOnce()) {
    // A poisoned lock only means another writer panicked mid-line
    let _guard = CONSOLE.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    f();
}

/// Write `label` in bold color, or plain when the terminal refuses.
fn paint(label: &str, tone: Tone) {
    let colored = term::stdout().ok_or(term::Error::NotSupported).and_then(|mut t| {
        t.fg(tone.color())?;
        t.attr(term::Attr::Bold)?;
        write!(t, "{}", label)?;
        t.reset()
    });
    if let Err(e) = colored {
        log::trace!("Plain console output: {}", e);
        print!("{}", label);
    }
}

/// "chemviz: rendering detailed report from payload.json"
pub fn status(s: &str) {
    with_console(|| println!("{}: {}", PREFIX, s));
}

/// Highlighted outcome line, e.g. the path of a written report
pub fn print_success(label: &str, detail: &str) {
    with_console(|| {
        print!("{}: ", PREFIX);
        paint(label, Tone::Success);
        println!(" {}", detail);
    });
}

pub fn print_warning(msg: &str) {
    with_console(|| {
        paint("warning", Tone::Warning);
        println!(": {}", msg);
    });
}

/// Error block, set off by blank lines
pub fn print_error(msg: &str) {
    with_console(|| {
        println!();
        paint("error", Tone::Error);
        println!(": {}\n", msg);
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tones_use_distinct_colors() {
        assert_eq!(Tone::Success.color(), term::color::BRIGHT_GREEN);
        assert_eq!(Tone::Warning.color(), term::color::BRIGHT_YELLOW);
        assert_eq!(Tone::Error.color(), term::color::BRIGHT_RED);
    }

    #[test]
    fn test_console_survives_poisoned_lock() {
        let _ = std::thread::spawn(|| {
            let _guard = CONSOLE.lock().unwrap();
            panic!("writer panicked");
        })
        .join();
        let mut ran = false;
        with_console(|| ran = true);
        assert!(ran);
    }
}
