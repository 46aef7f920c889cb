//! Letterfall entry point
//!
//! Browser builds expose a thin wasm facade the page drives; native builds
//! run a headless autoplay demo of the core loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use js_sys::Function;
    use serde::Serialize;
    use wasm_bindgen::prelude::*;

    use letterfall::sim::{FallingLetter, Projectile};
    use letterfall::{DifficultyTier, GameView, Key, Language, Session};

    /// Clock fallback when the page does not pass a rAF timestamp
    fn performance_now() -> f64 {
        web_sys::window()
            .and_then(|w| w.performance())
            .map(|p| p.now())
            .unwrap_or(0.0)
    }

    /// Entity positions handed to the page once per frame
    #[derive(Serialize)]
    struct EntityFrame<'a> {
        letters: &'a [FallingLetter],
        projectiles: &'a [Projectile],
        player_x: f32,
    }

    /// View half of the boundary: plain JS callbacks registered by the page
    #[derive(Default)]
    struct JsView {
        on_session_start: Option<Function>,
        on_session_end: Option<Function>,
        on_score_changed: Option<Function>,
        render_entities: Option<Function>,
        render_key_intensity: Option<Function>,
    }

    impl GameView for JsView {
        fn on_session_start(&mut self, tier: DifficultyTier, language: Language) {
            if let Some(f) = &self.on_session_start {
                let _ = f.call2(&JsValue::NULL, &tier.as_str().into(), &language.as_str().into());
            }
        }

        fn on_session_end(&mut self, final_score: u32) {
            if let Some(f) = &self.on_session_end {
                let _ = f.call1(&JsValue::NULL, &JsValue::from_f64(final_score as f64));
            }
        }

        fn on_score_changed(&mut self, score: u32) {
            if let Some(f) = &self.on_score_changed {
                let _ = f.call1(&JsValue::NULL, &JsValue::from_f64(score as f64));
            }
        }

        fn render_entities(
            &mut self,
            letters: &[FallingLetter],
            projectiles: &[Projectile],
            player_x: f32,
        ) {
            let Some(f) = &self.render_entities else { return };
            let frame = EntityFrame {
                letters,
                projectiles,
                player_x,
            };
            if let Ok(json) = serde_json::to_string(&frame) {
                let _ = f.call1(&JsValue::NULL, &json.into());
            }
        }

        fn render_key_intensity(&mut self, ch: char, intensity: Option<f32>) {
            if let Some(f) = &self.render_key_intensity {
                let value = match intensity {
                    Some(v) => JsValue::from_f64(v as f64),
                    None => JsValue::NULL,
                };
                let _ = f.call2(&JsValue::NULL, &ch.to_string().into(), &value);
            }
        }
    }

    /// Map KeyboardEvent.key values onto core key codes
    fn translate_key(key: &str) -> Option<Key> {
        match key {
            "ArrowLeft" => Some(Key::Left),
            "ArrowRight" => Some(Key::Right),
            _ => {
                let mut chars = key.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Some(Key::Char(c)),
                    _ => None,
                }
            }
        }
    }

    /// Browser-facing session wrapper. The page owns the DOM, the keyboard
    /// listeners and the requestAnimationFrame loop; everything else lives
    /// on this side.
    #[wasm_bindgen]
    pub struct WebSession {
        session: Session,
        view: JsView,
    }

    #[wasm_bindgen]
    impl WebSession {
        #[wasm_bindgen(constructor)]
        pub fn new(seed: Option<f64>) -> WebSession {
            let seed = seed.unwrap_or_else(js_sys::Date::now) as u64;
            log::info!("session created with seed {}", seed);
            WebSession {
                session: Session::new(seed),
                view: JsView::default(),
            }
        }

        /// Register any subset of view callbacks
        pub fn set_view(
            &mut self,
            on_session_start: Option<Function>,
            on_session_end: Option<Function>,
            on_score_changed: Option<Function>,
            render_entities: Option<Function>,
            render_key_intensity: Option<Function>,
        ) {
            self.view = JsView {
                on_session_start,
                on_session_end,
                on_score_changed,
                render_entities,
                render_key_intensity,
            };
        }

        pub fn choose_language(&mut self, language: &str) -> bool {
            match Language::from_str(language) {
                Some(l) => self.session.choose_language(l),
                None => {
                    log::warn!("unknown language '{}'", language);
                    false
                }
            }
        }

        pub fn choose_difficulty(&mut self, tier: &str, now_ms: Option<f64>) -> bool {
            let now = now_ms.unwrap_or_else(performance_now);
            match DifficultyTier::from_str(tier) {
                Some(t) => self.session.choose_difficulty(t, now, &mut self.view),
                None => {
                    log::warn!("unknown difficulty '{}'", tier);
                    false
                }
            }
        }

        /// Forward a KeyboardEvent.key value
        pub fn key_down(&mut self, key: &str) {
            if let Some(key) = translate_key(key) {
                self.session.key_down(key);
            }
        }

        pub fn key_up(&mut self, key: &str) {
            if let Some(key) = translate_key(key) {
                self.session.key_up(key);
            }
        }

        /// Drive one animation frame; `now_ms` is the rAF timestamp
        pub fn frame(&mut self, now_ms: Option<f64>) {
            let now = now_ms.unwrap_or_else(performance_now);
            self.session.frame(now, &mut self.view);
        }

        pub fn restart(&mut self) -> bool {
            self.session.restart()
        }

        pub fn phase(&self) -> String {
            self.session.phase().as_str().to_string()
        }

        pub fn score(&self) -> u32 {
            self.session.score()
        }

        /// Serialize the session for a later Continue
        pub fn snapshot(&self) -> Option<String> {
            serde_json::to_string(self.session.state()).ok()
        }

        /// Restore a previously snapshotted session
        pub fn restore(&mut self, json: &str) -> bool {
            match serde_json::from_str(json) {
                Ok(state) => {
                    self.session = Session::from_state(state);
                    true
                }
                Err(e) => {
                    log::warn!("snapshot restore failed: {}", e);
                    false
                }
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Letterfall core loaded");
}

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use letterfall::consts::*;
    use letterfall::sim::{FallingLetter, Projectile, SessionPhase};
    use letterfall::{DifficultyTier, GameView, Key, Language, Session};

    /// Headless view that narrates the run through the logger
    struct LogView;

    impl GameView for LogView {
        fn on_session_start(&mut self, tier: DifficultyTier, language: Language) {
            log::info!("demo session: {} / {}", tier.as_str(), language.as_str());
        }

        fn on_session_end(&mut self, final_score: u32) {
            log::info!("demo session over, final score {}", final_score);
        }

        fn on_score_changed(&mut self, score: u32) {
            log::debug!("score {}", score);
        }

        fn render_entities(
            &mut self,
            letters: &[FallingLetter],
            projectiles: &[Projectile],
            _player_x: f32,
        ) {
            log::trace!("{} letters, {} shots", letters.len(), projectiles.len());
        }

        fn render_key_intensity(&mut self, _ch: char, _intensity: Option<f32>) {}
    }

    /// Simple bot: chase the lowest letter, shoot when lined up
    #[derive(Default)]
    struct Autoplayer {
        holding: Option<Key>,
        fire_cooldown: u32,
    }

    impl Autoplayer {
        fn drive(&mut self, session: &mut Session) {
            let target = session
                .state()
                .letters
                .iter()
                .max_by(|a, b| {
                    a.pos
                        .y
                        .partial_cmp(&b.pos.y)
                        .unwrap_or(std::cmp::Ordering::Equal)
                })
                .map(|l| (l.ch, l.pos.x + LETTER_SIZE / 2.0));
            let player_center = session.state().player.center_x();

            let Some((target_ch, letter_center)) = target else {
                self.release(session);
                return;
            };

            let diff = letter_center - player_center;
            let desired = if diff < -PLAYER_SPEED {
                Some(Key::Left)
            } else if diff > PLAYER_SPEED {
                Some(Key::Right)
            } else {
                None
            };
            if desired != self.holding {
                self.release(session);
                if let Some(key) = desired {
                    session.key_down(key);
                }
                self.holding = desired;
            }

            if self.fire_cooldown > 0 {
                self.fire_cooldown -= 1;
            }
            if self.fire_cooldown == 0 && diff.abs() < LETTER_SIZE / 2.0 {
                session.key_down(Key::Char(target_ch));
                self.fire_cooldown = 30;
            }
        }

        fn release(&mut self, session: &mut Session) {
            if let Some(key) = self.holding.take() {
                session.key_up(key);
            }
        }
    }

    /// Run an autoplayed session for up to `frames` frames at 60 fps
    pub fn run(seed: u64, frames: u32) -> u32 {
        let mut view = LogView;
        let mut session = Session::new(seed);
        session.choose_language(Language::English);
        session.choose_difficulty(DifficultyTier::Normal, 0.0, &mut view);

        let mut bot = Autoplayer::default();
        for frame in 0..frames {
            let now = frame as f64 * (1000.0 / 60.0);
            bot.drive(&mut session);
            session.frame(now, &mut view);
            if session.phase() == SessionPhase::GameOver {
                break;
            }
        }

        if let Ok(snapshot) = serde_json::to_string(session.state()) {
            log::debug!("final snapshot: {} bytes", snapshot.len());
        }
        session.score()
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Letterfall (native) starting...");

    let seed = 0xC0FFEE;
    let score = demo::run(seed, 20_000);
    println!("autoplay demo finished with score {}", score);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
