use std::time::Instant;

use miniquad::{conf, Context, EventHandler, KeyCode, KeyMods, PassAction};

use glesdemo::logging::{init_logging, LoggingConfig};
use glesdemo::{phrase, DemoHooks, DemoVariant, QuadDriver};

const WIDTH: i32 = 800;
const HEIGHT: i32 = 600;

struct Stage {
    hooks: DemoHooks<QuadDriver>,
    started: Instant,
    last_report: Instant,
    frame_count: usize,
    paused_at: Option<f32>,
}

impl Stage {
    pub fn new(ctx: &mut Context, variant: DemoVariant) -> Stage {
        // SAFETY: miniquad has loaded GL and made its context current before
        // calling the constructor, and the stage stays on this thread.
        let gl = unsafe { QuadDriver::new() };
        let mut hooks = DemoHooks::new(gl, variant.config());

        let (width, height) = ctx.screen_size();
        if hooks.gl_init(width as i32, height as i32) {
            log::info!("preview running demo `{variant}`");
        } else {
            log::error!("demo `{variant}` failed to initialize, showing background only");
        }

        Stage {
            hooks,
            started: Instant::now(),
            last_report: Instant::now(),
            frame_count: 0,
            paused_at: None,
        }
    }

    fn elapsed(&self) -> f32 {
        self.paused_at
            .unwrap_or_else(|| self.started.elapsed().as_secs_f32())
    }
}

impl EventHandler for Stage {
    fn update(&mut self, _: &mut Context) {
        self.frame_count += 1;
        let since = self.last_report.elapsed().as_secs_f32();
        if since >= 1.0 {
            log::debug!("fps: {:.1}", self.frame_count as f32 / since);
            self.frame_count = 0;
            self.last_report = Instant::now();
        }
    }

    fn resize_event(&mut self, _: &mut Context, width: f32, height: f32) {
        self.hooks.gl_init(width as i32, height as i32);
    }

    fn key_down_event(&mut self, _: &mut Context, keycode: KeyCode, _: KeyMods, _: bool) {
        match keycode {
            KeyCode::R => log::info!("{}", phrase::random_phrase()),
            KeyCode::Space => {
                self.paused_at = match self.paused_at {
                    Some(_) => None,
                    None => Some(self.elapsed()),
                }
            }
            _ => (),
        }
    }

    fn draw(&mut self, ctx: &mut Context) {
        let t = self.elapsed();

        if self.hooks.is_initialized() {
            self.hooks.gl_step_frame_at(t);
        } else {
            let [r, g, b, a] = self.hooks.demo().clear_color_at(t);
            ctx.begin_default_pass(PassAction::clear_color(r, g, b, a));
            ctx.end_render_pass();
        }

        ctx.commit_frame();
    }

    fn quit_requested_event(&mut self, _: &mut Context) {
        self.hooks.gl_deinit();
    }
}

fn main() {
    init_logging(LoggingConfig::default());
    phrase::seed_from_clock();

    let variant = match std::env::args().nth(1) {
        Some(name) => match DemoVariant::from_name(&name) {
            Some(variant) => variant,
            None => {
                log::error!("unknown demo `{name}`, expected `static` or `spinning`");
                std::process::exit(2);
            }
        },
        None => DemoVariant::default(),
    };

    miniquad::start(
        conf::Conf {
            window_title: format!("glesdemo: {variant}"),
            window_width: WIDTH,
            window_height: HEIGHT,
            high_dpi: false,
            ..Default::default()
        },
        move |ctx| Box::new(Stage::new(ctx, variant)),
    );
}
