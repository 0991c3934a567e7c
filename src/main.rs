// src/main.rs
//
// Calculatrice scientifique: point d’entrée NATIF + WEB (WASM)
// -------------------------------------------------------------
// - NATIF (Linux/Windows/macOS) : tracing + réglages + eframe::run_native
// - WEB  (wasm32)              : eframe::WebRunner + WebOptions + <canvas>
//
// Côté WEB (WASM) : index.html doit contenir un canvas :
//   <canvas id="the_canvas_id"></canvas>
//
// Journalisation native : RUST_LOG (défaut "info"), ex. RUST_LOG=debug

#![cfg_attr(target_arch = "wasm32", allow(unused_imports))]

use eframe::egui;

mod app;
mod calc;
mod engine;
mod settings;

use app::AppCalc;
use settings::Settings;

/// Titre unique (natif + web).
const TITRE_APP: &str = "Calculatrice scientifique";

/* ------------------------ Entrée NATIF (PC) ------------------------ */

#[cfg(not(target_arch = "wasm32"))]
fn main() -> eframe::Result<()> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let settings = Settings::load();
    tracing::info!(
        mode = settings.angle_mode.label(),
        history = settings.history_capacity,
        "démarrage"
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(TITRE_APP)
            .with_inner_size([640.0, 620.0])
            .with_min_inner_size([420.0, 520.0]),
        ..Default::default()
    };

    eframe::run_native(
        TITRE_APP,
        options,
        Box::new(move |_cc| Ok(Box::new(AppCalc::new(settings)))),
    )
}

/* ------------------------ Entrée WEB (WASM) ------------------------ */

#[cfg(target_arch = "wasm32")]
fn main() {
    // En wasm32, le démarrage réel passe par `start()` (wasm_bindgen).
}

#[cfg(target_arch = "wasm32")]
mod web {
    use super::{AppCalc, Settings, TITRE_APP};

    use wasm_bindgen::JsCast;
    use web_sys::{window, HtmlCanvasElement};

    /// ID du canvas attendu dans index.html.
    const CANVAS_ID: &str = "the_canvas_id";

    /// Point d’entrée automatique au chargement de la page.
    #[wasm_bindgen::prelude::wasm_bindgen(start)]
    pub async fn start() -> Result<(), wasm_bindgen::JsValue> {
        let w = window().ok_or_else(|| js_err("window() indisponible"))?;
        let d = w
            .document()
            .ok_or_else(|| js_err("document() indisponible"))?;

        d.set_title(TITRE_APP);

        let el = d
            .get_element_by_id(CANVAS_ID)
            .ok_or_else(|| js_err("canvas introuvable (id incorrect dans index.html)"))?;

        let canvas: HtmlCanvasElement = el
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| js_err("l’élément trouvé n’est pas un <canvas>"))?;

        // pas de dossier de config côté navigateur : réglages par défaut
        let settings = Settings::default();

        eframe::WebRunner::new()
            .start(
                canvas,
                eframe::WebOptions::default(),
                Box::new(move |_cc| Ok(Box::new(AppCalc::new(settings)))),
            )
            .await
    }

    fn js_err(msg: &str) -> wasm_bindgen::JsValue {
        wasm_bindgen::JsValue::from_str(msg)
    }
}
