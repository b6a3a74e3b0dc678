//! Input Actor: Dedicated thread for polling terminal events.
//!
//! This actor runs in its own thread and uses crossterm's event polling
//! to capture keyboard, mouse, and resize events without blocking the
//! UI thread. Events arrive on a channel; the host loop feeds them to the
//! view tree on the UI thread.

use super::messages::{InputEvent, KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseFlags};
use crossbeam_channel::Sender;
use crossterm::event::{self, Event, KeyEventKind};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Input actor that polls terminal events.
pub struct InputActor {
    /// Handle to the input thread.
    handle: Option<JoinHandle<()>>,
    /// Flag to signal shutdown.
    shutdown: Arc<AtomicBool>,
}

impl InputActor {
    /// Spawn the input actor thread.
    ///
    /// `poll_timeout` bounds how long the thread waits for an event before
    /// checking for shutdown.
    pub fn spawn(sender: Sender<InputEvent>, poll_timeout: Duration) -> Self {
        let shutdown = Arc::new(AtomicBool::new(false));
        let shutdown_clone = shutdown.clone();

        let handle = thread::Builder::new()
            .name("trellis-input".to_string())
            .spawn(move || {
                Self::run_loop(&sender, &shutdown_clone, poll_timeout);
            })
            .expect("Failed to spawn input thread");

        Self {
            handle: Some(handle),
            shutdown,
        }
    }

    /// Signal the input thread to shutdown.
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::Relaxed);
    }

    /// Wait for the input thread to finish.
    pub fn join(mut self) {
        self.shutdown();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }

    fn run_loop(sender: &Sender<InputEvent>, shutdown: &AtomicBool, poll_timeout: Duration) {
        loop {
            if shutdown.load(Ordering::Relaxed) {
                let _ = sender.send(InputEvent::Shutdown);
                break;
            }

            match event::poll(poll_timeout) {
                Ok(true) => match event::read() {
                    Ok(event) => {
                        if let Some(input_event) = convert_event(event)
                            && sender.send(input_event).is_err()
                        {
                            // Receiver dropped
                            break;
                        }
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "failed to read terminal event");
                        let _ = sender.send(InputEvent::Error(e.to_string()));
                    }
                },
                Ok(false) => {}
                Err(e) => {
                    tracing::warn!(error = %e, "failed to poll terminal events");
                    let _ = sender.send(InputEvent::Error(e.to_string()));
                }
            }
        }
    }
}

impl Drop for InputActor {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Convert a crossterm event to an [`InputEvent`].
pub fn convert_event(event: Event) -> Option<InputEvent> {
    match event {
        Event::Key(key_event) => {
            // Only key presses, not releases or repeats
            if key_event.kind != KeyEventKind::Press {
                return None;
            }
            let code = convert_key_code(key_event.code)?;
            Some(InputEvent::Key(KeyEvent::new(
                code,
                convert_modifiers(key_event.modifiers),
            )))
        }
        Event::Mouse(mouse_event) => convert_mouse_event(mouse_event).map(InputEvent::Mouse),
        Event::Resize(width, height) => Some(InputEvent::Resize { width, height }),
        Event::FocusGained => Some(InputEvent::FocusGained),
        Event::FocusLost => Some(InputEvent::FocusLost),
        Event::Paste(text) => Some(InputEvent::Paste(text)),
    }
}

const fn convert_key_code(code: event::KeyCode) -> Option<KeyCode> {
    Some(match code {
        event::KeyCode::Char(c) => KeyCode::Char(c),
        event::KeyCode::F(n) => KeyCode::F(n),
        event::KeyCode::Backspace => KeyCode::Backspace,
        event::KeyCode::Enter => KeyCode::Enter,
        event::KeyCode::Left => KeyCode::Left,
        event::KeyCode::Right => KeyCode::Right,
        event::KeyCode::Up => KeyCode::Up,
        event::KeyCode::Down => KeyCode::Down,
        event::KeyCode::Home => KeyCode::Home,
        event::KeyCode::End => KeyCode::End,
        event::KeyCode::PageUp => KeyCode::PageUp,
        event::KeyCode::PageDown => KeyCode::PageDown,
        event::KeyCode::Tab => KeyCode::Tab,
        event::KeyCode::BackTab => KeyCode::BackTab,
        event::KeyCode::Delete => KeyCode::Delete,
        event::KeyCode::Insert => KeyCode::Insert,
        event::KeyCode::Esc => KeyCode::Esc,
        _ => return None,
    })
}

fn convert_modifiers(mods: event::KeyModifiers) -> KeyModifiers {
    let mut out = KeyModifiers::empty();
    out.set(KeyModifiers::SHIFT, mods.contains(event::KeyModifiers::SHIFT));
    out.set(KeyModifiers::CONTROL, mods.contains(event::KeyModifiers::CONTROL));
    out.set(KeyModifiers::ALT, mods.contains(event::KeyModifiers::ALT));
    out.set(KeyModifiers::SUPER, mods.contains(event::KeyModifiers::SUPER));
    out
}

/// Terminals report press and release; a release counts as the click.
const fn button_flags(button: event::MouseButton, pressed: bool) -> MouseFlags {
    match (button, pressed) {
        (event::MouseButton::Left, true) => MouseFlags::BUTTON1_PRESSED,
        (event::MouseButton::Left, false) => MouseFlags::BUTTON1_RELEASED.union(MouseFlags::BUTTON1_CLICKED),
        (event::MouseButton::Middle, true) => MouseFlags::BUTTON2_PRESSED,
        (event::MouseButton::Middle, false) => MouseFlags::BUTTON2_RELEASED.union(MouseFlags::BUTTON2_CLICKED),
        (event::MouseButton::Right, true) => MouseFlags::BUTTON3_PRESSED,
        (event::MouseButton::Right, false) => MouseFlags::BUTTON3_RELEASED.union(MouseFlags::BUTTON3_CLICKED),
    }
}

fn convert_mouse_event(mouse: event::MouseEvent) -> Option<MouseEvent> {
    let flags = match mouse.kind {
        event::MouseEventKind::Down(button) => button_flags(button, true),
        event::MouseEventKind::Up(button) => button_flags(button, false),
        event::MouseEventKind::Drag(button) => {
            button_flags(button, true) | MouseFlags::REPORT_POSITION
        }
        event::MouseEventKind::Moved => MouseFlags::REPORT_POSITION,
        event::MouseEventKind::ScrollUp => MouseFlags::WHEELED_UP,
        event::MouseEventKind::ScrollDown => MouseFlags::WHEELED_DOWN,
        _ => return None,
    };
    Some(MouseEvent {
        x: i32::from(mouse.column),
        y: i32::from(mouse.row),
        flags,
        modifiers: convert_modifiers(mouse.modifiers),
    })
}
