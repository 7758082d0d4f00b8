use serde::{Deserialize, Serialize};
use tsify_next::Tsify;

// ============================================================================
// Line and Fill Styles
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "lowercase")]
pub enum Dash {
    Solid,
    Dash,
    Dot,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
pub struct LineStyle {
    pub color: String,
    pub width: f64,
    pub dash: Dash,
}

impl LineStyle {
    fn new(color: &str, width: f64, dash: Dash) -> Self {
        Self {
            color: color.to_string(),
            width,
            dash,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
pub struct FillStyle {
    pub fill: String,
    pub outline: String,
}

impl FillStyle {
    /// Fill at 20% and outline at 50% opacity of the same colour.
    fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self {
            fill: format!("rgba({r}, {g}, {b}, 0.2)"),
            outline: format!("rgba({r}, {g}, {b}, 0.5)"),
        }
    }
}

// ============================================================================
// Labels - Localised text shown on the chart
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
pub enum Locale {
    #[default]
    En,
    Ru,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
pub struct Labels {
    pub title: String,
    pub tax_control: String,
    pub demand: String,
    pub supply: String,
    pub taxed_supply: String,
    pub consumer_surplus: String,
    pub producer_surplus: String,
    pub deadweight_loss: String,
    pub quantity_axis: String,
    pub price_axis: String,
}

impl Labels {
    pub fn for_locale(locale: Locale) -> Self {
        let texts: [&str; 10] = match locale {
            Locale::En => [
                "Per-unit tax in a competitive market",
                "Tax t:",
                "Demand (D)",
                "Supply (S)",
                "Supply after tax",
                "CS (Consumer surplus)",
                "PS (Producer surplus)",
                "DWL (Deadweight loss)",
                "Quantity (Q)",
                "Price (P)",
            ],
            Locale::Ru => [
                "Потоварный налог на рынке СК",
                "Размер налога t:",
                "Спрос (D)",
                "Предложение (S)",
                "Предложение после налога",
                "CS (Излишек потребителя)",
                "PS (Излишек производителя)",
                "DWL (Потери мертвого груза)",
                "Количество (Q)",
                "Цена (P)",
            ],
        };
        let [
            title,
            tax_control,
            demand,
            supply,
            taxed_supply,
            consumer_surplus,
            producer_surplus,
            deadweight_loss,
            quantity_axis,
            price_axis,
        ] = texts.map(String::from);
        Self {
            title,
            tax_control,
            demand,
            supply,
            taxed_supply,
            consumer_surplus,
            producer_surplus,
            deadweight_loss,
            quantity_axis,
            price_axis,
        }
    }
}

impl Default for Labels {
    fn default() -> Self {
        Self::for_locale(Locale::default())
    }
}

// ============================================================================
// Chart Style - Passed explicitly to every render call
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
pub struct ChartStyle {
    pub demand: LineStyle,
    pub supply: LineStyle,
    pub taxed_supply: LineStyle,
    pub guides: LineStyle,
    pub consumer_surplus: FillStyle,
    pub producer_surplus: FillStyle,
    pub deadweight_loss: FillStyle,
    pub quantity_range: (f64, f64),
    pub price_range: (f64, f64),
    pub show_legend: bool,
    pub font_family: String,
    pub template: String,
    pub labels: Labels,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            demand: LineStyle::new("blue", 2.0, Dash::Solid),
            supply: LineStyle::new("green", 2.0, Dash::Solid),
            taxed_supply: LineStyle::new("red", 2.0, Dash::Dash),
            guides: LineStyle::new("gray", 1.0, Dash::Dot),
            consumer_surplus: FillStyle::rgb(0, 100, 255),
            producer_surplus: FillStyle::rgb(0, 200, 0),
            deadweight_loss: FillStyle::rgb(0, 0, 0),
            quantity_range: (0.0, 100.0),
            price_range: (0.0, 100.0),
            show_legend: true,
            font_family: "Helvetica, Arial, sans-serif".to_string(),
            template: "plotly_white".to_string(),
            labels: Labels::default(),
        }
    }
}

impl ChartStyle {
    pub fn with_locale(self, locale: Locale) -> Self {
        Self {
            labels: Labels::for_locale(locale),
            ..self
        }
    }
}
