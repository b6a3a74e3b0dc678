//! Widget Demo: a small form on a real terminal.
//!
//! Demonstrates:
//! - Relative layout with `Pos`/`Dim` expressions
//! - Checkbox and RadioGroup mnemonics (`w`, `r`, `g`, `b`, or Alt+letter)
//! - Tab / Shift+Tab focus cycling and mouse clicks
//! - Timer callbacks updating a label from the UI thread
//!
//! Press ESC or Ctrl+C to exit.

use crossbeam_channel::{select, unbounded};
use std::time::{Duration, Instant};
use trellis::{
    Checkbox, CrosstermDriver, Dim, Driver, DriverConfig, InputActor, InputEvent, KeyCode,
    KeyEvent, KeyModifiers, Label, Pos, RadioGroup, Scheduler, TimerActor, TimerCallback, ViewId,
    ViewTree,
};

/// Views the host loop reads back.
struct Form {
    check: ViewId,
    radio: ViewId,
    status: ViewId,
    clock: ViewId,
}

fn main() -> std::io::Result<()> {
    let mut driver = CrosstermDriver::stdout(DriverConfig::default())?;
    let (width, height) = driver.size();
    let mut tree = ViewTree::new(width, height);
    let form = build(&mut tree);

    let (input_tx, input_rx) = unbounded();
    let input = InputActor::spawn(input_tx, Duration::from_millis(50));
    let mut timer = TimerActor::spawn();
    let fired = timer.receiver().clone();
    let started = Instant::now();
    timer.schedule_after(Duration::from_secs(1), tick(form.clock, started));

    tree.focus(form.check);
    refresh_status(&mut tree, &form);
    tree.present(&mut driver)?;

    let mut running = true;
    while running {
        select! {
            recv(input_rx) -> event => match event {
                Ok(InputEvent::Key(KeyEvent { code: KeyCode::Esc, .. }) | InputEvent::Shutdown)
                | Err(_) => running = false,
                Ok(InputEvent::Key(KeyEvent { code: KeyCode::Char('c'), modifiers }))
                    if modifiers.contains(KeyModifiers::CONTROL) => running = false,
                Ok(InputEvent::Resize { width, height }) => {
                    driver.resize(width, height);
                    tree.resize(width, height);
                }
                Ok(event) => {
                    tree.process_event(&event);
                }
            },
            recv(fired) -> handle => {
                if let Ok(handle) = handle {
                    timer.fire(handle, &mut tree);
                    timer.schedule_after(Duration::from_secs(1), tick(form.clock, started));
                }
            }
        }

        refresh_status(&mut tree, &form);
        tree.present(&mut driver)?;
    }

    input.join();
    timer.join();
    driver.leave()
}

fn build(tree: &mut ViewTree) -> Form {
    let root = tree.root();

    let title = tree.create(Label::new("Trellis widget demo"));
    tree.set_x(title, Pos::center());
    tree.set_y(title, 1);
    tree.set_width(title, Dim::sized(19));
    tree.set_height(title, Dim::sized(1));
    tree.add_subview(root, title);

    let panel = tree.create_container();
    tree.set_x(panel, 4);
    tree.set_y(panel, Pos::bottom(title) + 1);
    tree.set_width(panel, Dim::fill(4));
    tree.set_height(panel, Dim::sized(5));
    tree.add_subview(root, panel);

    let check = tree.create(Checkbox::new("_Wrap lines"));
    tree.set_width(check, Dim::sized(16));
    tree.set_height(check, Dim::sized(1));
    tree.add_subview(panel, check);

    let radio = tree.create(RadioGroup::new(&["_Red", "_Green", "_Blue"]));
    tree.set_y(radio, Pos::bottom(check) + 1);
    tree.set_width(radio, Dim::sized(12));
    tree.set_height(radio, Dim::sized(3));
    tree.add_subview(panel, radio);

    let clock = tree.create(Label::new("0s"));
    tree.set_x(clock, Pos::anchor_end(8));
    tree.set_y(clock, Pos::anchor_end(1));
    tree.set_width(clock, Dim::sized(8));
    tree.set_height(clock, Dim::sized(1));
    tree.add_subview(root, clock);

    let status = tree.create(Label::new(""));
    tree.set_y(status, Pos::anchor_end(1));
    tree.set_width(status, Dim::fill(8));
    tree.set_height(status, Dim::sized(1));
    tree.add_subview(root, status);

    Form {
        check,
        radio,
        status,
        clock,
    }
}

fn refresh_status(tree: &mut ViewTree, form: &Form) {
    let wrap = tree.widget::<Checkbox>(form.check).is_some_and(Checkbox::checked);
    let color = tree
        .widget::<RadioGroup>(form.radio)
        .and_then(|radio| radio.items().get(radio.selected()))
        .map(|item| item.text().to_string())
        .unwrap_or_default();
    if let Some(label) = tree.widget_mut::<Label>(form.status) {
        label.set_text(format!(" wrap: {wrap}  color: {color}  (ESC to exit)"));
    }
}

fn tick(clock: ViewId, started: Instant) -> TimerCallback {
    Box::new(move |tree: &mut ViewTree| {
        if let Some(label) = tree.widget_mut::<Label>(clock) {
            label.set_text(format!("{}s", started.elapsed().as_secs()));
        }
    })
}
