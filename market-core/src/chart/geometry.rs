use serde::{Deserialize, Serialize};
use tsify_next::Tsify;

use crate::error::{MarketError, Result};
use crate::types::{EquilibriumResult, MarketParameters};

// ============================================================================
// Primitives
// ============================================================================

/// A chart point: quantity on x, price on y.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi)]
pub struct Point {
    pub quantity: f64,
    pub price: f64,
}

impl Point {
    pub fn new(quantity: f64, price: f64) -> Self {
        Self { quantity, price }
    }
}

/// Open line through sampled points, in increasing quantity order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi)]
pub struct Polyline {
    pub points: Vec<Point>,
}

/// Closed region. The last vertex connects back to the first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi)]
pub struct Polygon {
    pub vertices: Vec<Point>,
}

impl Polygon {
    /// Shoelace area; positive for counter-clockwise winding.
    pub fn signed_area(&self) -> f64 {
        let n = self.vertices.len();
        if n < 3 {
            return 0.0;
        }
        let twice: f64 = (0..n)
            .map(|i| {
                let a = self.vertices[i];
                let b = self.vertices[(i + 1) % n];
                a.quantity * b.price - b.quantity * a.price
            })
            .sum();
        0.5 * twice
    }

    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi)]
pub struct Segment {
    pub from: Point,
    pub to: Point,
}

// ============================================================================
// Quantity Domain - Where the curves are sampled
// ============================================================================

/// Inclusive, evenly spaced sampling of the quantity axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
pub struct QuantityDomain {
    pub start: f64,
    pub end: f64,
    pub samples: usize,
}

impl Default for QuantityDomain {
    fn default() -> Self {
        Self {
            start: 0.0,
            end: 100.0,
            samples: 500,
        }
    }
}

impl QuantityDomain {
    pub fn new(start: f64, end: f64, samples: usize) -> Result<Self> {
        let domain = Self { start, end, samples };
        domain.validate()?;
        Ok(domain)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.start.is_finite() || !self.end.is_finite() {
            return Err(MarketError::InvalidDomain(format!(
                "bounds must be finite, got [{}, {}]",
                self.start, self.end
            )));
        }
        if self.end <= self.start {
            return Err(MarketError::InvalidDomain(format!(
                "end {} must exceed start {}",
                self.end, self.start
            )));
        }
        if self.samples < 2 {
            return Err(MarketError::InvalidDomain(format!(
                "need at least 2 samples, got {}",
                self.samples
            )));
        }
        Ok(())
    }

    /// Sampled quantities; first is `start`, last is exactly `end`.
    pub fn quantities(&self) -> impl Iterator<Item = f64> + '_ {
        let last = self.samples - 1;
        let step = (self.end - self.start) / last as f64;
        (0..self.samples).map(move |i| {
            if i == last {
                self.end
            } else {
                self.start + step * i as f64
            }
        })
    }

    fn sample(&self, price_at: impl Fn(f64) -> f64) -> Polyline {
        Polyline {
            points: self.quantities().map(|q| Point::new(q, price_at(q))).collect(),
        }
    }
}

// ============================================================================
// Chart Geometry
// ============================================================================

/// Everything needed to draw the market: three curves, three shaded regions
/// and the dotted guides marking the buyer price and traded quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi)]
pub struct ChartGeometry {
    pub demand: Polyline,
    pub supply: Polyline,
    pub taxed_supply: Polyline,
    pub consumer_surplus: Polygon,
    pub producer_surplus: Polygon,
    pub deadweight_loss: Polygon,
    pub price_guide: Segment,
    pub quantity_guide: Segment,
}

/// Sample the curves over `domain` and assemble the surplus regions.
///
/// Every polygon is wound counter-clockwise, and its area equals the matching
/// field of [`crate::SurplusResult`] for the same equilibria.
pub fn build_chart_geometry(
    initial: &EquilibriumResult,
    taxed: &EquilibriumResult,
    params: &MarketParameters,
    domain: &QuantityDomain,
) -> Result<ChartGeometry> {
    domain.validate()?;

    let q = taxed.quantity;
    let buyer = taxed.buyer_price;
    let seller = taxed.seller_price;

    let consumer_surplus = Polygon {
        vertices: vec![
            Point::new(0.0, buyer),
            Point::new(q, buyer),
            Point::new(0.0, params.demand_intercept),
        ],
    };
    let producer_surplus = Polygon {
        vertices: vec![
            Point::new(0.0, params.supply_intercept),
            Point::new(q, seller),
            Point::new(0.0, seller),
        ],
    };
    let deadweight_loss = Polygon {
        vertices: vec![
            Point::new(q, seller),
            Point::new(initial.quantity, initial.buyer_price),
            Point::new(q, buyer),
        ],
    };

    Ok(ChartGeometry {
        demand: domain.sample(|x| params.demand_price(x)),
        supply: domain.sample(|x| params.supply_price(x)),
        taxed_supply: domain.sample(|x| params.taxed_supply_price(x)),
        consumer_surplus,
        producer_surplus,
        deadweight_loss,
        price_guide: Segment {
            from: Point::new(0.0, buyer),
            to: Point::new(q, buyer),
        },
        quantity_guide: Segment {
            from: Point::new(q, 0.0),
            to: Point::new(q, buyer),
        },
    })
}
