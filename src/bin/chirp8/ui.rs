// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Terminal IO: reads key events with crossterm, and draws frames as text

use chirp8::{error::Result, Keypad, Screen, StopSignal, HEIGHT};
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{
        poll, read, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
        KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute, queue,
    style::Print,
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{debug, info, warn};
use owo_colors::OwoColorize;
use std::{io::Write, ops::ControlFlow, thread::JoinHandle, time::Duration};

/// How long the input thread waits for an event before checking for a stop
const INPUT_POLL: Duration = Duration::from_millis(50);

/// Maps a typed character onto the hex keypad
/// ```text
/// 1 2 3 4    1 2 3 C
/// q w e r    4 5 6 D
/// a s d f    7 8 9 E
/// z x c v    A 0 B F
/// ```
pub fn keymap(c: char) -> Option<usize> {
    Some(match c.to_ascii_lowercase() {
        '1' => 0x1,
        '2' => 0x2,
        '3' => 0x3,
        '4' => 0xc,
        'q' => 0x4,
        'w' => 0x5,
        'e' => 0x6,
        'r' => 0xd,
        'a' => 0x7,
        's' => 0x8,
        'd' => 0x9,
        'f' => 0xe,
        'z' => 0xa,
        'x' => 0x0,
        'c' => 0xb,
        'v' => 0xf,
        _ => return None,
    })
}

/// Applies one terminal event to the keypad. Breaks on Esc or Ctrl+C.
pub fn handle_event(event: &Event, keypad: &Keypad) -> ControlFlow<()> {
    let Event::Key(KeyEvent {
        code,
        modifiers,
        kind,
        ..
    }) = *event
    else {
        return ControlFlow::Continue(());
    };
    match code {
        KeyCode::Esc if kind != KeyEventKind::Release => {
            info!("escape pressed");
            ControlFlow::Break(())
        }
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
            info!("interrupted");
            ControlFlow::Break(())
        }
        KeyCode::Char(c) => {
            let Some(key) = keymap(c) else {
                return ControlFlow::Continue(());
            };
            let result = match kind {
                KeyEventKind::Release => keypad.release(key),
                KeyEventKind::Press | KeyEventKind::Repeat => keypad.press(key),
            };
            match result {
                Ok(_) => debug!("{kind:?} {key:X}"),
                Err(e) => warn!("{e}"),
            }
            ControlFlow::Continue(())
        }
        _ => ControlFlow::Continue(()),
    }
}

/// Feeds terminal key events to the keypad until Esc, Ctrl+C, or a stop, then stops the machine.
///
/// Releases are only reported by terminals with keyboard enhancement. Elsewhere a
/// key stays pressed until the program consumes it.
pub fn spawn_input(keypad: Keypad, stop: StopSignal) -> JoinHandle<()> {
    std::thread::spawn(move || {
        while !stop.is_stopped() {
            match poll(INPUT_POLL) {
                Ok(true) => {}
                Ok(false) => continue,
                Err(e) => {
                    warn!("input closed: {e}");
                    break;
                }
            }
            match read() {
                Ok(event) => {
                    if handle_event(&event, &keypad).is_break() {
                        break;
                    }
                }
                Err(e) => {
                    warn!("input closed: {e}");
                    break;
                }
            }
        }
        stop.stop();
    })
}

/// Holds the terminal in raw mode on the alternate screen, and restores it on drop
#[derive(Debug)]
pub struct RawMode {
    enhanced: bool,
}

impl RawMode {
    pub fn enable() -> Result<Self> {
        terminal::enable_raw_mode()?;
        let mut out = std::io::stdout();
        let enhanced = matches!(terminal::supports_keyboard_enhancement(), Ok(true));
        if enhanced {
            execute!(
                out,
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )?;
        } else {
            info!("terminal doesn't report key releases");
        }
        execute!(out, EnterAlternateScreen, Hide)?;
        Ok(RawMode { enhanced })
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        let mut out = std::io::stdout();
        if self.enhanced {
            if let Err(e) = execute!(out, PopKeyboardEnhancementFlags) {
                warn!("{e}");
            }
        }
        if let Err(e) = execute!(out, LeaveAlternateScreen, Show) {
            warn!("{e}");
        }
        if let Err(e) = terminal::disable_raw_mode() {
            warn!("{e}");
        }
    }
}

/// Draws frames to a terminal
#[derive(Debug)]
pub struct UI<W: Write> {
    out: W,
    frames: usize,
}

impl<W: Write> UI<W> {
    pub fn new(out: W) -> Self {
        UI { out, frames: 0 }
    }

    /// Clears the terminal, then draws the frame and the debug line under it
    pub fn render(&mut self, screen: &Screen, debug: Option<&str>) -> Result<()> {
        self.frames += 1;
        queue!(self.out, MoveTo(0, 0), Clear(ClearType::All))?;
        for (y, line) in screen.to_string().lines().enumerate() {
            queue!(self.out, MoveTo(0, y as u16), Print(line))?;
        }
        if let Some(debug) = debug {
            let line = format!("{:6} {}", self.frames.bright_black(), debug.cyan());
            queue!(self.out, MoveTo(0, HEIGHT as u16), Print(line))?;
        }
        self.out.flush()?;
        Ok(())
    }

    #[cfg(test)]
    pub fn frames(&self) -> usize {
        self.frames
    }
}
