//! Browser implementations of the platform traits

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Storage};

use super::{Presentation, ScoreStore, Screen};
use crate::persistence::{STORAGE_KEY, decode_best, encode_best};

/// Class toggled to hide an overlay
const HIDDEN: &str = "hidden";
/// Class toggled on the container for the game-over shake
const SHAKE: &str = "shake";
const SHAKE_MS: i32 = 400;

fn local_storage() -> Option<Storage> {
    web_sys::window()?.local_storage().ok()?
}

/// Best score in LocalStorage
#[derive(Debug, Default)]
pub struct LocalStorageStore;

impl LocalStorageStore {
    pub fn new() -> Self {
        Self
    }
}

impl ScoreStore for LocalStorageStore {
    fn load_best(&mut self) -> u64 {
        let Some(storage) = local_storage() else {
            log::warn!("LocalStorage unavailable, best score starts at 0");
            return 0;
        };
        match storage.get_item(STORAGE_KEY).ok().flatten() {
            Some(raw) => decode_best(&raw).unwrap_or_else(|| {
                log::warn!("Ignoring corrupt stored best score {:?}", raw);
                0
            }),
            None => 0,
        }
    }

    fn save_best(&mut self, score: u64) {
        if let Some(storage) = local_storage() {
            let _ = storage.set_item(STORAGE_KEY, &encode_best(score));
        }
    }
}

/// Overlays and HUD in the page
pub struct DomPresentation {
    container: Option<Element>,
    start_screen: Option<Element>,
    game_over_screen: Option<Element>,
    hud: Option<Element>,
    current_score: Option<Element>,
    hud_best_score: Option<Element>,
    final_score: Option<Element>,
    best_score: Option<Element>,
    start_best_score: Option<Element>,
}

fn set_hidden(el: &Option<Element>, hidden: bool) {
    if let Some(el) = el {
        let classes = el.class_list();
        let _ = if hidden {
            classes.add_1(HIDDEN)
        } else {
            classes.remove_1(HIDDEN)
        };
    }
}

fn set_text(el: &Option<Element>, text: &str) {
    if let Some(el) = el {
        el.set_text_content(Some(text));
    }
}

impl DomPresentation {
    pub fn new(document: &Document) -> Self {
        let get = |id: &str| document.get_element_by_id(id);
        Self {
            container: get("game-container"),
            start_screen: get("start-screen"),
            game_over_screen: get("game-over-screen"),
            hud: get("hud"),
            current_score: get("current-score"),
            hud_best_score: get("hud-best-score"),
            final_score: get("final-score"),
            best_score: get("best-score"),
            start_best_score: get("start-best-score"),
        }
    }
}

impl Presentation for DomPresentation {
    fn show(&mut self, screen: Screen, score: u64, best: u64) {
        set_hidden(&self.start_screen, screen != Screen::Start);
        set_hidden(&self.hud, screen != Screen::Hud);
        set_hidden(&self.game_over_screen, screen != Screen::GameOver);

        match screen {
            Screen::Start => set_text(&self.start_best_score, &best.to_string()),
            Screen::Hud => {
                set_text(&self.current_score, &score.to_string());
                set_text(&self.hud_best_score, &format!("Best: {}", best));
            }
            Screen::GameOver => {
                set_text(&self.final_score, &score.to_string());
                set_text(&self.best_score, &best.to_string());
                set_text(&self.start_best_score, &best.to_string());
            }
        }
    }

    fn set_score(&mut self, score: u64) {
        set_text(&self.current_score, &score.to_string());
    }

    fn shake(&mut self) {
        let Some(container) = self.container.clone() else { return };
        let _ = container.class_list().add_1(SHAKE);

        let Some(window) = web_sys::window() else { return };
        let closure = Closure::once(move || {
            let _ = container.class_list().remove_1(SHAKE);
        });
        let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            SHAKE_MS,
        );
        closure.forget();
    }
}
