use serde::{Deserialize, Serialize};
use tsify_next::Tsify;

use super::geometry::{ChartGeometry, Point, Polygon, Polyline, Segment};
use super::style::{ChartStyle, Dash, FillStyle, LineStyle};

// ============================================================================
// Figure - Drawable description handed to the plotting front-end
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi)]
pub struct Trace {
    pub name: String,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub line: LineStyle,
    /// Fill colour when the trace is a closed region.
    pub fill: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi)]
pub struct Shape {
    pub from: Point,
    pub to: Point,
    pub line: LineStyle,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi)]
pub struct Layout {
    pub title: String,
    pub x_title: String,
    pub y_title: String,
    pub x_range: (f64, f64),
    pub y_range: (f64, f64),
    pub show_legend: bool,
    pub font_family: String,
    pub template: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi)]
pub struct Figure {
    pub traces: Vec<Trace>,
    pub shapes: Vec<Shape>,
    pub layout: Layout,
}

fn line_trace(name: &str, line: &Polyline, style: &LineStyle) -> Trace {
    Trace {
        name: name.to_string(),
        x: line.points.iter().map(|p| p.quantity).collect(),
        y: line.points.iter().map(|p| p.price).collect(),
        line: style.clone(),
        fill: None,
    }
}

fn region_trace(name: &str, region: &Polygon, style: &FillStyle) -> Trace {
    Trace {
        name: name.to_string(),
        x: region.vertices.iter().map(|p| p.quantity).collect(),
        y: region.vertices.iter().map(|p| p.price).collect(),
        line: LineStyle {
            color: style.outline.clone(),
            width: 1.0,
            dash: Dash::Solid,
        },
        fill: Some(style.fill.clone()),
    }
}

fn guide(segment: &Segment, style: &LineStyle) -> Shape {
    Shape {
        from: segment.from,
        to: segment.to,
        line: style.clone(),
    }
}

/// Turn geometry into a styled figure. Curves come first, then the shaded
/// regions so they draw over the curves in legend order.
pub fn render_figure(geometry: &ChartGeometry, style: &ChartStyle, tax_rate: f64) -> Figure {
    let labels = &style.labels;
    let traces = vec![
        line_trace(&labels.demand, &geometry.demand, &style.demand),
        line_trace(&labels.supply, &geometry.supply, &style.supply),
        line_trace(
            &format!("{} (t = {tax_rate})", labels.taxed_supply),
            &geometry.taxed_supply,
            &style.taxed_supply,
        ),
        region_trace(
            &labels.consumer_surplus,
            &geometry.consumer_surplus,
            &style.consumer_surplus,
        ),
        region_trace(
            &labels.producer_surplus,
            &geometry.producer_surplus,
            &style.producer_surplus,
        ),
        region_trace(
            &labels.deadweight_loss,
            &geometry.deadweight_loss,
            &style.deadweight_loss,
        ),
    ];

    Figure {
        traces,
        shapes: vec![
            guide(&geometry.price_guide, &style.guides),
            guide(&geometry.quantity_guide, &style.guides),
        ],
        layout: Layout {
            title: labels.title.clone(),
            x_title: labels.quantity_axis.clone(),
            y_title: labels.price_axis.clone(),
            x_range: style.quantity_range,
            y_range: style.price_range,
            show_legend: style.show_legend,
            font_family: style.font_family.clone(),
            template: style.template.clone(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::style::Locale;
    use crate::chart::{QuantityDomain, build_chart_geometry};
    use crate::market::compute_equilibrium;
    use crate::types::MarketParameters;

    fn figure(tax: f64, style: &ChartStyle) -> Figure {
        let params = MarketParameters::default().with_tax(tax);
        let initial = compute_equilibrium(&params.untaxed()).unwrap();
        let taxed = compute_equilibrium(&params).unwrap();
        let domain = QuantityDomain::new(0.0, 100.0, 11).unwrap();
        let geometry = build_chart_geometry(&initial, &taxed, &params, &domain).unwrap();
        render_figure(&geometry, style, tax)
    }

    #[test]
    fn curves_then_regions() {
        let fig = figure(20.0, &ChartStyle::default());
        let names: Vec<&str> = fig.traces.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(
            names,
            [
                "Demand (D)",
                "Supply (S)",
                "Supply after tax (t = 20)",
                "CS (Consumer surplus)",
                "PS (Producer surplus)",
                "DWL (Deadweight loss)",
            ]
        );
        assert!(fig.traces[..3].iter().all(|t| t.fill.is_none() && t.x.len() == 11));
        assert!(fig.traces[3..].iter().all(|t| t.fill.is_some() && t.x.len() == 3));
    }

    #[test]
    fn dwl_trace_uses_equilibrium_vertices() {
        let fig = figure(20.0, &ChartStyle::default());
        let dwl = &fig.traces[5];
        assert_eq!(dwl.x, vec![40.0, 50.0, 40.0]);
        assert_eq!(dwl.y, vec![40.0, 50.0, 60.0]);
    }

    #[test]
    fn style_is_applied_not_global() {
        let mut custom = ChartStyle::default().with_locale(Locale::Ru);
        custom.show_legend = false;
        custom.demand.color = "navy".to_string();

        let styled = figure(10.0, &custom);
        let plain = figure(10.0, &ChartStyle::default());

        assert_eq!(styled.traces[0].line.color, "navy");
        assert_eq!(styled.layout.x_title, "Количество (Q)");
        assert!(!styled.layout.show_legend);
        assert_eq!(plain.traces[0].line.color, "blue");
        assert!(plain.layout.show_legend);
    }

    #[test]
    fn guides_are_dotted_shapes() {
        let fig = figure(20.0, &ChartStyle::default());
        assert_eq!(fig.shapes.len(), 2);
        assert_eq!(fig.shapes[0].to, Point::new(40.0, 60.0));
        assert_eq!(fig.shapes[1].from, Point::new(40.0, 0.0));
        assert_eq!(fig.shapes[1].line.dash, Dash::Dot);
    }
}
