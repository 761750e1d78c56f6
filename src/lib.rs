#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod geom;
pub mod strip;

use std::fmt;

use geom::StripParams;
use strip::MobiusStrip;
use wasm_bindgen::prelude::*;

cfg_if::cfg_if! {
    if #[cfg(all(feature = "console_error_panic_hook", target_arch = "wasm32"))] {
        #[wasm_bindgen(start)]
        pub fn initialize() {
            console_error_panic_hook::set_once();
            init_logger();
        }
    } else {
        #[wasm_bindgen(start)]
        pub fn initialize() {
            // geen panic hook zonder de feature
            init_logger();
        }
    }
}

#[cfg(feature = "debug_logs")]
fn init_logger() {
    use log::LevelFilter;
    use wasm_bindgen_console_logger::DEFAULT_LOGGER;
    // een tweede `initialize` laat de bestaande logger staan
    if log::set_logger(&DEFAULT_LOGGER).is_ok() {
        log::set_max_level(LevelFilter::Debug);
    }
}

#[cfg(not(feature = "debug_logs"))]
fn init_logger() {
    // geen logger zonder debug_logs
}

// JS wacht één keer op `initThreadPool` voordat de eerste strip gebouwd wordt.
#[cfg(all(feature = "parallel", target_arch = "wasm32"))]
pub use wasm_bindgen_rayon::init_thread_pool;

/// Wasm-facade rond één [`MobiusStrip`].
///
/// De strip wordt volledig opgebouwd in de constructor; alle getters lezen
/// alleen de opgeslagen resultaten. Nieuwe constanten betekent een nieuwe
/// `StripEngine`.
#[wasm_bindgen]
pub struct StripEngine {
    strip: MobiusStrip,
}

#[wasm_bindgen]
impl StripEngine {
    /// Bouw een strip met straal `radius`, breedte `width` en `resolution`
    /// samples per parameteras.
    #[wasm_bindgen(constructor)]
    pub fn new(radius: f64, width: f64, resolution: u32) -> Result<StripEngine, JsValue> {
        let params = StripParams::new(radius, width, resolution as usize);
        let strip = MobiusStrip::new(params).map_err(to_js_error)?;
        Ok(StripEngine { strip })
    }

    #[wasm_bindgen]
    pub fn radius(&self) -> f64 {
        self.strip.params().radius
    }

    #[wasm_bindgen]
    pub fn width(&self) -> f64 {
        self.strip.params().width
    }

    /// Aantal samples per as; de grids zijn `resolution × resolution`.
    #[wasm_bindgen]
    pub fn resolution(&self) -> u32 {
        u32::try_from(self.strip.params().resolution).unwrap_or(u32::MAX)
    }

    #[wasm_bindgen]
    pub fn surface_area(&self) -> f64 {
        self.strip.surface_area()
    }

    /// Lengte langs `v = +w/2`.
    #[wasm_bindgen]
    pub fn edge_length(&self) -> f64 {
        self.strip.edge_length()
    }

    /// Lengte van de volledige rand, beide passages.
    #[wasm_bindgen]
    pub fn boundary_length(&self) -> f64 {
        self.strip.boundary_length()
    }

    /// X-coördinaten, rij voor rij (rij = v, kolom = u).
    #[wasm_bindgen]
    pub fn x(&self) -> Vec<f64> {
        self.strip.x().as_slice().to_vec()
    }

    #[wasm_bindgen]
    pub fn y(&self) -> Vec<f64> {
        self.strip.y().as_slice().to_vec()
    }

    #[wasm_bindgen]
    pub fn z(&self) -> Vec<f64> {
        self.strip.z().as_slice().to_vec()
    }

    /// Driehoeksmesh voor de renderer, inclusief diagnostiek.
    #[wasm_bindgen]
    pub fn get_mesh(&self) -> Result<JsValue, JsValue> {
        let (mesh, diagnostics) = self.strip.mesh();
        if !diagnostics.warnings.is_empty() {
            log::warn!("strip mesh: {}", diagnostics.warnings.join("; "));
        }
        serde_wasm_bindgen::to_value(&MeshExport {
            mesh: &mesh,
            diagnostics: &diagnostics,
        })
        .map_err(to_js_error)
    }

    #[wasm_bindgen]
    pub fn get_report(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.strip.report()).map_err(to_js_error)
    }
}

impl StripEngine {
    #[must_use]
    pub fn strip(&self) -> &MobiusStrip {
        &self.strip
    }
}

#[derive(serde::Serialize)]
struct MeshExport<'a> {
    mesh: &'a geom::GeomMesh,
    diagnostics: &'a geom::GeomMeshDiagnostics,
}

fn to_js_error<E: fmt::Display>(error: E) -> JsValue {
    js_error(&error.to_string())
}

fn js_error(message: &str) -> JsValue {
    #[cfg(target_arch = "wasm32")]
    {
        JsError::new(message).into()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = message;
        JsValue::NULL
    }
}
