//! CPU Pong entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent};

    use cpu_pong::consts::*;
    use cpu_pong::hud::Hud;
    use cpu_pong::platform::web::{DomStatus, DomText};
    use cpu_pong::renderer::RenderState;
    use cpu_pong::{Game, Settings};

    type WebGame = Game<RenderState>;

    fn element(document: &Document, selector: &str) -> web_sys::Element {
        document
            .query_selector(selector)
            .ok()
            .flatten()
            .unwrap_or_else(|| panic!("missing element {}", selector))
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("CPU Pong starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Backing store at device resolution, same aspect as the game surface
        let dpr = window.device_pixel_ratio();
        let width = (SURFACE_WIDTH as f64 * dpr) as u32;
        let height = (SURFACE_HEIGHT as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .expect("Failed to create surface");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to get adapter");

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(
            surface,
            &adapter,
            width,
            height,
            glam::Vec2::new(SURFACE_WIDTH, SURFACE_HEIGHT),
        )
        .await;

        let hud = Hud::new(
            Box::new(DomText(element(&document, ".left-score"))),
            Box::new(DomText(element(&document, ".right-score"))),
            Box::new(DomStatus(element(&document, "#status"))),
        );

        let settings = Settings::load();
        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed, &settings, render_state, hud)));

        setup_input_handlers(game.clone());
        setup_auto_pause(game.clone());

        request_animation_frame(game);

        log::info!("CPU Pong running!");
    }

    fn setup_input_handlers(game: Rc<RefCell<WebGame>>) {
        let window = web_sys::window().unwrap();

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let bound = game.borrow_mut().key_down(&event.key());
                if bound {
                    // Keep Space and the arrows from scrolling the page
                    event.prevent_default();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().key_up(&event.key());
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_auto_pause(game: Rc<RefCell<WebGame>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    game.borrow_mut().focus_lost();
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Window blur (click outside)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow_mut().focus_lost();
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<WebGame>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<WebGame>>) {
        game.borrow_mut().frame();
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::time::{Duration, Instant};

    use cpu_pong::consts::FRAME_RATE;
    use cpu_pong::hud::Hud;
    use cpu_pong::platform::{LogStatus, LogText};
    use cpu_pong::renderer::Headless;
    use cpu_pong::{Game, Settings};

    env_logger::init();
    log::info!("CPU Pong (native) starting...");
    log::info!("Native mode runs headless - run with `trunk serve` for the web version");

    let frames: u64 = match std::env::args().nth(1) {
        Some(arg) => match arg.parse() {
            Ok(n) => n,
            Err(e) => {
                log::error!("Invalid frame count {:?}: {}", arg, e);
                std::process::exit(2);
            }
        },
        None => 60 * FRAME_RATE as u64,
    };
    let paced = std::env::var_os("PONG_UNPACED").is_none();

    let settings = Settings::load();
    let hud = Hud::new(
        Box::new(LogText::new("Player")),
        Box::new(LogText::new("CPU")),
        Box::new(LogStatus),
    );
    let mut game = Game::new(rand::random(), &settings, Headless::default(), hud);

    // Nobody at the keyboard: start the match and let the CPU play
    game.toggle();

    let frame_time = Duration::from_secs(1) / FRAME_RATE;
    let mut next = Instant::now();
    for _ in 0..frames {
        game.frame();
        if paced {
            next += frame_time;
            if let Some(wait) = next.checked_duration_since(Instant::now()) {
                std::thread::sleep(wait);
            }
        }
    }

    let state = game.state();
    log::info!(
        "Finished after {} frames: player {} - cpu {}",
        game.renderer().frames,
        state.left.score,
        state.right.score
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
