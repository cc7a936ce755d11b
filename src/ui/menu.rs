use std::io::{self, Write};

use anyhow::{bail, Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::style::{Attribute, Print, SetAttribute};
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::{cursor, queue};

// ---------------------------------------------------------------------------
// Single-choice terminal menu
// ---------------------------------------------------------------------------

/// Restores the terminal on every exit path, including early `?` returns.
struct RawModeGuard;

impl RawModeGuard {
    fn enable() -> Result<Self> {
        terminal::enable_raw_mode().context("enabling raw terminal mode")?;
        let _ = queue!(io::stdout(), cursor::Hide);
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let mut stdout = io::stdout();
        let _ = queue!(stdout, cursor::Show);
        let _ = stdout.flush();
        let _ = terminal::disable_raw_mode();
    }
}

/// Present `options` as an in-terminal single-choice menu and return the
/// zero-based index the user confirmed with Enter.
///
/// Up/Down (or `k`/`j`) move the highlight, wrapping at the ends. Esc and
/// Ctrl-C abort the selection with an error; the session loop never recovers
/// from that, so an abort ends the program.
pub fn select<S: AsRef<str>>(prompt: &str, options: &[S]) -> Result<usize> {
    if options.is_empty() {
        bail!("menu needs at least one option");
    }

    println!("{prompt}");
    let mut stdout = io::stdout();
    let _guard = RawModeGuard::enable()?;

    let mut selected = 0usize;
    draw(&mut stdout, options, selected, false)?;

    loop {
        let Event::Key(key) = event::read().context("reading terminal input")? else {
            continue;
        };
        // Some terminals report both press and release.
        if key.kind != KeyEventKind::Press {
            continue;
        }
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                selected = selected.checked_sub(1).unwrap_or(options.len() - 1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                selected = (selected + 1) % options.len();
            }
            KeyCode::Enter => return Ok(selected),
            KeyCode::Esc => bail!("selection aborted"),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                bail!("selection aborted");
            }
            _ => continue,
        }
        draw(&mut stdout, options, selected, true)?;
    }
}

/// Ask a Yes/No question; `true` means Yes.
pub fn confirm(prompt: &str) -> Result<bool> {
    Ok(select(prompt, &["Yes", "No"])? == 0)
}

/// Render the option list, highlighting the selection. On redraw the cursor
/// is first moved back over the previously drawn block.
fn draw<S: AsRef<str>>(
    out: &mut impl Write,
    options: &[S],
    selected: usize,
    redraw: bool,
) -> Result<()> {
    if redraw {
        queue!(out, cursor::MoveUp(options.len() as u16))?;
    }
    for (idx, option) in options.iter().enumerate() {
        queue!(out, cursor::MoveToColumn(0), Clear(ClearType::CurrentLine))?;
        if idx == selected {
            queue!(
                out,
                SetAttribute(Attribute::Reverse),
                Print(format!("> {}", option.as_ref())),
                SetAttribute(Attribute::Reset)
            )?;
        } else {
            queue!(out, Print(format!("  {}", option.as_ref())))?;
        }
        queue!(out, Print("\r\n"))?;
    }
    out.flush()?;
    Ok(())
}
