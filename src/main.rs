//! RPS Arena entry point
//!
//! Handles platform-specific initialization and drives the frame loop. The
//! simulation itself never schedules anything; this driver calls `tick` and
//! `render` once per animation frame (or in a tight loop headlessly).

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlImageElement, HtmlInputElement,
    };

    use rps_arena::consts::*;
    use rps_arena::sim::{Arena, Kind};
    use rps_arena::stats::now_ms;
    use rps_arena::{DrawSurface, Settings, WinStats};

    /// Canvas-2D backing for the drawing seam
    struct CanvasSurface {
        ctx: CanvasRenderingContext2d,
        sprites: [HtmlImageElement; 3],
    }

    impl CanvasSurface {
        fn new(document: &Document, ctx: CanvasRenderingContext2d) -> Self {
            let sprite = |id: &str| -> HtmlImageElement {
                document
                    .get_element_by_id(id)
                    .unwrap_or_else(|| panic!("missing sprite image #{id}"))
                    .dyn_into()
                    .expect("sprite element is not an image")
            };
            Self {
                ctx,
                sprites: [sprite("rock"), sprite("paper"), sprite("scissors")],
            }
        }

        fn sprite(&self, kind: Kind) -> &HtmlImageElement {
            match kind {
                Kind::Rock => &self.sprites[0],
                Kind::Paper => &self.sprites[1],
                Kind::Scissors => &self.sprites[2],
            }
        }

        fn clear(&self) {
            self.ctx
                .clear_rect(0.0, 0.0, ARENA_WIDTH as f64, ARENA_HEIGHT as f64);
        }

        /// Winner banner, drawn over the final frame
        fn draw_banner(&self, text: &str) {
            self.ctx.set_text_align("center");
            self.ctx.set_font("40pt \"Courier New\", Courier, monospace");
            self.ctx.set_fill_style_str("#faf0e6");
            let _ = self.ctx.fill_text(
                text,
                ARENA_WIDTH as f64 * 0.5,
                ARENA_HEIGHT as f64 * 0.5 - 20.0,
            );
        }
    }

    impl DrawSurface for CanvasSurface {
        fn draw_sprite(&mut self, kind: Kind, x: f32, y: f32, w: f32, h: f32) {
            let _ = self.ctx.draw_image_with_html_image_element_and_dw_and_dh(
                self.sprite(kind),
                x as f64,
                y as f64,
                w as f64,
                h as f64,
            );
        }
    }

    /// App state shared between the frame loop and the DOM handlers
    struct App {
        arena: Arena,
        surface: CanvasSurface,
        stats: WinStats,
        settings: Settings,
        battling: bool,
    }

    impl App {
        /// Record the outcome, refresh the readouts and re-arm the UI
        fn finish_battle(&mut self) {
            let Some(winner) = self.arena.winner() else {
                return;
            };

            if let Err(e) = self.stats.record_win(winner, now_ms()) {
                log::warn!("failed to persist win statistics: {e}");
            }
            update_stat_readouts(&self.stats);
            self.surface.draw_banner(&format!("{} win", winner.plural()));

            self.arena.reset();
            self.battling = false;
            set_controls_enabled(true);
        }
    }

    fn update_stat_readouts(stats: &WinStats) {
        let document = web_sys::window().unwrap().document().unwrap();
        let readouts = [
            ("w-rocks", Kind::Rock),
            ("w-papers", Kind::Paper),
            ("w-scissors", Kind::Scissors),
        ];
        for (id, kind) in readouts {
            if let Some(el) = document.get_element_by_id(id) {
                el.set_text_content(Some(&format!("{:.2}%", stats.share(kind))));
            }
        }
    }

    fn set_controls_enabled(enabled: bool) {
        let document = web_sys::window().unwrap().document().unwrap();
        for id in ["startBtn", "range"] {
            if let Some(el) = document.get_element_by_id(id) {
                if enabled {
                    let _ = el.remove_attribute("disabled");
                } else {
                    let _ = el.set_attribute("disabled", "true");
                }
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("RPS Arena starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("battleContainer")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");
        canvas.set_width(ARENA_WIDTH as u32);
        canvas.set_height(ARENA_HEIGHT as u32);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .expect("2d context request failed")
            .expect("no 2d context")
            .dyn_into()
            .expect("not a 2d context");

        let settings = Settings::load();
        let stats = WinStats::load();
        update_stat_readouts(&stats);

        // Reflect the stored battle size in the slider
        if let Some(range) = document
            .get_element_by_id("range")
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
        {
            range.set_value(&settings.agents_per_kind.to_string());
        }

        let seed = now_ms() as u64;
        let app = Rc::new(RefCell::new(App {
            arena: Arena::new(seed),
            surface: CanvasSurface::new(&document, ctx),
            stats,
            settings,
            battling: false,
        }));

        setup_range_input(&document, app.clone());
        setup_start_button(&document, app.clone());

        log::info!("RPS Arena ready (seed {seed})");
    }

    /// Slider: remember the battle size and show a placement preview
    fn setup_range_input(document: &Document, app: Rc<RefCell<App>>) {
        let Some(range) = document
            .get_element_by_id("range")
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
        else {
            return;
        };

        let input = range.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let mut app = app.borrow_mut();
            if app.battling {
                return;
            }
            if let Ok(n) = input.value().parse::<u32>() {
                app.settings.set_agents_per_kind(n);
                app.settings.save();
            }
            let n = app.settings.agents_per_kind;
            match app.arena.spawn(n) {
                Ok(()) => {
                    let App { arena, surface, .. } = &mut *app;
                    surface.clear();
                    arena.render(surface);
                }
                Err(e) => log::error!("spawn failed: {e}"),
            }
        });
        let _ = range.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_start_button(document: &Document, app: Rc<RefCell<App>>) {
        let Some(btn) = document.get_element_by_id("startBtn") else {
            return;
        };

        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::MouseEvent| {
            event.prevent_default();
            {
                let mut a = app.borrow_mut();
                if a.battling {
                    return;
                }
                // Keep a previewed placement; otherwise spawn fresh
                if a.arena.population() == 0 {
                    let n = a.settings.agents_per_kind;
                    if let Err(e) = a.arena.spawn(n) {
                        log::error!("spawn failed: {e}");
                        return;
                    }
                }
                a.battling = true;
                set_controls_enabled(false);
                log::info!("battle started: {} per kind", a.settings.agents_per_kind);
            }
            request_frame(app.clone());
        });
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_frame(app: Rc<RefCell<App>>) {
        let closure = Closure::once(move |_time: f64| frame(app));
        let _ = web_sys::window()
            .unwrap()
            .request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn frame(app: Rc<RefCell<App>>) {
        {
            let mut a = app.borrow_mut();
            if !a.battling {
                return;
            }

            let App { arena, surface, .. } = &mut *a;
            surface.clear();
            arena.tick();
            arena.render(surface);

            if a.arena.is_finished() {
                a.finish_battle();
                return; // loop stops; no further frames are scheduled
            }
        }
        request_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_app::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use rps_arena::sim::Arena;
    use rps_arena::stats::now_ms;
    use rps_arena::{Settings, WinStats};

    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| now_ms() as u64);
    let n = Settings::load().agents_per_kind;

    log::info!("RPS Arena headless battle: {n} per kind, seed {seed}");

    let mut arena = Arena::new(seed);
    if let Err(e) = arena.spawn(n) {
        log::error!("spawn failed: {e}");
        std::process::exit(1);
    }

    // Generous cap; battles normally settle well before this
    const MAX_TICKS: u64 = 5_000_000;
    let mut ticks = 0u64;
    while !arena.is_finished() && ticks < MAX_TICKS {
        arena.tick();
        ticks += 1;
    }

    match arena.winner() {
        Some(winner) => {
            log::info!("{} win after {ticks} ticks", winner.plural());
            let mut stats = WinStats::load();
            if let Err(e) = stats.record_win(winner, now_ms()) {
                log::warn!("failed to persist win statistics: {e}");
            }
            println!("{} win after {} ticks", winner.plural(), ticks);
        }
        None => {
            log::warn!("no winner after {MAX_TICKS} ticks");
            println!("no winner after {} ticks", MAX_TICKS);
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
