use wasm_bindgen::prelude::*;

pub mod chart;
pub mod error;
pub mod market;
pub mod model;
pub mod slider;
pub mod summary;
pub mod types;

pub use chart::*;
pub use error::MarketError;
pub use market::*;
pub use model::*;
pub use slider::*;
pub use summary::*;
pub use types::*;

#[cfg(feature = "instrument")]
pub use instrument;

// ============================================================================
// WASM API - Tax market handle driven by the page's slider
// ============================================================================

#[wasm_bindgen]
pub struct TaxMarket {
    model: MarketModel,
    style: ChartStyle,
    slider: TaxSlider,
}

impl Default for TaxMarket {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl TaxMarket {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        // Better panic messages in browser console
        console_error_panic_hook::set_once();

        Self {
            model: MarketModel::default(),
            style: ChartStyle::default(),
            slider: TaxSlider::default(),
        }
    }

    /// Create a handle for custom curves and chart sampling
    #[wasm_bindgen]
    pub fn with_market(curves: MarketParameters, domain: QuantityDomain) -> Result<TaxMarket, JsError> {
        Ok(Self::for_market(curves, domain)?)
    }

    #[wasm_bindgen]
    pub fn set_style(&mut self, style: ChartStyle) {
        self.style = style;
    }

    #[wasm_bindgen]
    pub fn set_locale(&mut self, locale: Locale) {
        self.style.labels = Labels::for_locale(locale);
    }

    /// Replace the tax control; a malformed slider leaves the old one in place
    #[wasm_bindgen]
    pub fn set_slider(&mut self, slider: TaxSlider) -> Result<(), JsError> {
        Ok(self.replace_slider(slider)?)
    }

    #[wasm_bindgen]
    pub fn slider(&self) -> TaxSlider {
        self.slider
    }

    /// Tick positions for the slider labels
    #[wasm_bindgen]
    pub fn slider_marks(&self) -> Vec<f64> {
        self.slider.marks()
    }

    /// Tax the page should show before the user touches the slider
    #[wasm_bindgen]
    pub fn initial_tax(&self) -> f64 {
        self.slider.initial
    }

    #[wasm_bindgen]
    pub fn labels(&self) -> Labels {
        self.style.labels.clone()
    }

    /// Equilibria, welfare, incidence, geometry and summary for one tax value
    #[wasm_bindgen]
    pub fn evaluate(&self, tax: f64) -> Result<MarketOutcome, JsError> {
        Ok(self.outcome(tax)?)
    }

    /// Styled chart for one tax value
    #[wasm_bindgen]
    pub fn figure(&self, tax: f64) -> Result<Figure, JsError> {
        Ok(self.render(tax)?)
    }

    /// The two text lines shown under the chart, as a JS string array
    #[wasm_bindgen]
    pub fn summary_lines(&self, tax: f64) -> Result<JsValue, JsError> {
        let lines = self.summary_text(tax)?;
        Ok(serde_wasm_bindgen::to_value(&lines)?)
    }
}

// Native entry points; the wasm methods above only convert errors.
impl TaxMarket {
    pub fn for_market(curves: MarketParameters, domain: QuantityDomain) -> error::Result<Self> {
        let mut market = Self::new();
        market.model = MarketModel::new(curves, domain)?;
        Ok(market)
    }

    pub fn replace_slider(&mut self, slider: TaxSlider) -> error::Result<()> {
        slider.check()?;
        self.slider = slider;
        Ok(())
    }

    pub fn model(&self) -> &MarketModel {
        &self.model
    }

    pub fn style(&self) -> &ChartStyle {
        &self.style
    }

    pub fn outcome(&self, tax: f64) -> error::Result<MarketOutcome> {
        let tax = self.slider.validate(tax)?;
        self.model.evaluate(tax)
    }

    pub fn render(&self, tax: f64) -> error::Result<Figure> {
        let outcome = self.outcome(tax)?;
        Ok(render_figure(&outcome.geometry, &self.style, tax))
    }

    pub fn summary_text(&self, tax: f64) -> error::Result<[String; 2]> {
        Ok(self.outcome(tax)?.summary.lines())
    }
}
