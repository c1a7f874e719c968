use glium::glutin::dpi::PhysicalSize;
use glium::glutin::event::{Event, StartCause, WindowEvent};
use glium::glutin::event_loop::{ControlFlow, EventLoop};
use glium::glutin::window::WindowBuilder;
use glium::glutin::ContextBuilder;
use lazy_static::lazy_static;
use send_wrapper::SendWrapper;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::time::{Duration, Instant};

pub mod layout;
pub mod timer;
pub mod widgets;

use crate::config::Config;
use crate::game::Game;
use crate::input::{Click, Mouse};
use crate::render;
use layout::Layout;
use timer::Stopwatch;
use widgets::{Button, ButtonKind};

lazy_static! {
    static ref EVENT_LOOP: SendWrapper<RefCell<Option<EventLoop<()>>>> =
        SendWrapper::new(RefCell::new(Some(EventLoop::new())));
    /// Window and GL context.
    pub static ref DISPLAY: SendWrapper<glium::Display> = SendWrapper::new({
        let wb = WindowBuilder::new()
            .with_title(crate::TITLE.to_owned())
            .with_resizable(false);
        let cb = ContextBuilder::new().with_vsync(true);
        glium::Display::new(wb, cb, EVENT_LOOP.borrow().as_ref().unwrap())
            .expect("Failed to initialize display")
    });
}

/// Applies a click on the board to the game.
fn handle_click(game: &mut Game, layout: &Layout, pixel: (u32, u32), click: Click) {
    let pos = match layout.pixel_to_cell(pixel) {
        Some(pos) => pos,
        None => return,
    };
    let result = match click {
        Click::Reveal => game.reveal(pos).map(drop),
        Click::Mark => game.toggle_mark(pos).map(drop),
    };
    if let Err(e) = result {
        log::warn!("Ignoring {:?} at {:?}: {}", click, pixel, e);
    }
}

/// Opens the window and runs the game until it is closed.
pub fn show_gui(config: &Config, mut game: Game) -> ! {
    let display = &**DISPLAY;

    // Initialize runtime data.
    let mut layout = Layout::new(game.rows(), game.cols());
    let (w, h) = layout.window_size();
    display
        .gl_window()
        .window()
        .set_inner_size(PhysicalSize::new(w, h));

    let mut mouse = Mouse::default();
    let mut buttons = [
        Button::new(ButtonKind::Reset, layout.button_rect(1)),
        Button::new(ButtonKind::Exit, layout.button_rect(0)),
    ];
    let mut stopwatch = Stopwatch::new(Instant::now());
    let mut events_buffer = VecDeque::new();

    // Main loop.
    let frame_duration = Duration::from_secs_f64(1.0 / config.fps as f64);
    let mut next_frame_time = Instant::now();
    let ev_loop = EVENT_LOOP.borrow_mut().take().unwrap();
    ev_loop.run(move |event, _ev_loop, control_flow| {
        // Handle events.
        let mut now = Instant::now();
        let mut do_frame = false;
        match event.to_static() {
            Some(Event::NewEvents(cause)) => match cause {
                StartCause::ResumeTimeReached {
                    start: _,
                    requested_resume,
                } => {
                    now = requested_resume;
                    do_frame = true;
                }
                StartCause::Init => {
                    next_frame_time = now;
                    do_frame = true;
                }
                _ => (),
            },

            // The program is about to exit.
            Some(Event::LoopDestroyed) => log::info!("Exiting"),

            // Queue the event to be handled next time we render
            // everything.
            Some(ev) => events_buffer.push_back(ev),

            // Ignore this event.
            None => (),
        }

        if do_frame && next_frame_time <= now {
            next_frame_time = now + frame_duration;
            if next_frame_time < Instant::now() {
                // Skip a frame (or several).
                next_frame_time = Instant::now() + frame_duration;
            }
            *control_flow = ControlFlow::WaitUntil(next_frame_time);

            for ev in events_buffer.drain(..) {
                let event = match ev {
                    Event::WindowEvent { event, .. } => event,
                    _ => continue,
                };
                if let WindowEvent::CloseRequested = event {
                    *control_flow = ControlFlow::Exit;
                    continue;
                }

                if let Some(click) = mouse.handle_event(&event) {
                    if let Some(pixel) = mouse.cursor {
                        handle_click(&mut game, &layout, pixel, click);
                    }
                }

                // Buttons are checked after every event so that a press and
                // release within one frame still fires.
                for button in &mut buttons {
                    match button.update(mouse.cursor, mouse.primary_down) {
                        Some(ButtonKind::Reset) => {
                            log::debug!("Reset pressed");
                            game.reset();
                            stopwatch.restart(Instant::now());
                        }
                        Some(ButtonKind::Exit) => {
                            log::debug!("Exit pressed");
                            *control_flow = ControlFlow::Exit;
                        }
                        None => (),
                    }
                }
            }

            if game.status().is_over() {
                stopwatch.stop(Instant::now());
            }

            // Draw everything.
            let elapsed = stopwatch.elapsed(Instant::now());
            let batch = render::build(&game, &layout, &mouse, &buttons, elapsed);
            let mut target = display.draw();
            render::draw(&mut target, &batch, &mut layout);
            target.finish().expect("Failed to swap buffers");
        }
    })
}
